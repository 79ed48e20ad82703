//! # Distribution Module
//!
//! Spreads a single total quantity evenly over a product's combinations
//! ("quick fill" on the order form).
//!
//! ## Why Integer Split with Remainder?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  10 units across 3 combinations                                         │
//! │                                                                         │
//! │    base      = 10 / 3 = 3                                              │
//! │    remainder = 10 % 3 = 1                                              │
//! │                                                                         │
//! │    Red/S  ── 4   (base + 1, first `remainder` combinations)            │
//! │    Red/M  ── 3                                                         │
//! │    Red/L  ── 3                                                         │
//! │              ──                                                         │
//! │              10  ← always the exact total, never 9 or 11               │
//! │                                                                         │
//! │  The extra units always go to the first combinations, so the same      │
//! │  inputs produce the same split every time.                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::variants::VariantCombination;

/// Quantity assigned to one combination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Allocation {
    pub key: String,
    pub quantity: i64,
}

/// Splits `total` into `count` near-equal parts.
///
/// The result has length `count`, sums to `total`, and no two parts differ
/// by more than one.
///
/// ## Errors
/// - [`CoreError::NegativeQuantity`] when `total < 0`
/// - [`CoreError::NoCombinations`] when `count == 0`
///
/// ## Example
/// ```rust
/// use orderdesk_core::distribution::distribute_evenly;
///
/// assert_eq!(distribute_evenly(10, 3).unwrap(), vec![4, 3, 3]);
/// assert_eq!(distribute_evenly(0, 4).unwrap(), vec![0, 0, 0, 0]);
/// assert!(distribute_evenly(5, 0).is_err());
/// ```
pub fn distribute_evenly(total: i64, count: usize) -> CoreResult<Vec<i64>> {
    if total < 0 {
        return Err(CoreError::NegativeQuantity(total));
    }
    if count == 0 {
        return Err(CoreError::NoCombinations("distribution".to_string()));
    }

    let n = count as i64;
    let base = total / n;
    let remainder = (total % n) as usize;

    Ok((0..count)
        .map(|i| if i < remainder { base + 1 } else { base })
        .collect())
}

/// Splits `total` across combinations, pairing each share with its key.
pub fn distribute_across(
    total: i64,
    combinations: &[VariantCombination],
) -> CoreResult<Vec<Allocation>> {
    let shares = distribute_evenly(total, combinations.len())?;

    Ok(combinations
        .iter()
        .zip(shares)
        .map(|(combo, quantity)| Allocation {
            key: combo.key(),
            quantity,
        })
        .collect())
}

// =============================================================================
// Unit Tests
// =============================================================================
