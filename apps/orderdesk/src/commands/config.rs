//! # Config Commands
//!
//! Retrieving application configuration.

use tracing::debug;

use crate::state::DeskConfig;

/// Gets the current application configuration.
///
/// ## When Used
/// - Form startup (number prefixes shown on the save banner)
/// - Product picker (whether empty dimensions block a product)
pub fn get_config(config: &DeskConfig) -> DeskConfig {
    debug!("get_config command");
    config.clone()
}
