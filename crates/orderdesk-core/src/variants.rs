//! # Variants Module
//!
//! Variant dimensions and the combinations generated from them.
//!
//! ## From Dimensions to Line Items
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Product "Crew Tee"                                                     │
//! │                                                                         │
//! │    Color: [Red, Blue]        Size: [S, M, L]                           │
//! │         │                        │                                      │
//! │         └──────────┬─────────────┘                                      │
//! │                    ▼                                                    │
//! │        generate_combinations() ← Cartesian product                     │
//! │                    │                                                    │
//! │                    ▼                                                    │
//! │    Red/S  Red/M  Red/L  Blue/S  Blue/M  Blue/L                         │
//! │      │      │      │      │       │       │                             │
//! │      ▼      ▼      ▼      ▼       ▼       ▼                             │
//! │    one OrderLineItem per combination (quantity 0 on creation)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Ordering
//! Combinations come out in dimension order, then value order: the first
//! dimension varies slowest. The same slice always yields the same list.

use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::validation::ValidationResult;
use crate::{COMBINATION_SEPARATOR, STANDARD_COMBINATION};

// =============================================================================
// Variant Dimension
// =============================================================================

/// A named axis of variation with its allowed values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct VariantDimension {
    /// Axis name shown in the form ("Color", "Size").
    pub name: String,
    /// Allowed values in display order.
    pub values: Vec<String>,
}

impl VariantDimension {
    /// Creates a dimension from a name and its values.
    pub fn new<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        VariantDimension {
            name: name.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Number of allowed values.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when the dimension has no values.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

// =============================================================================
// Empty Dimension Policy
// =============================================================================

/// What to do with a dimension that has no values.
///
/// ```text
/// Color: [Red, Blue]   Finish: []
///
///   Skip            → Red, Blue          (Finish ignored)
///   NoCombinations  → (nothing)          (product cannot be ordered)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum EmptyDimensionPolicy {
    /// Ignore empty dimensions.
    #[default]
    Skip,
    /// Any empty dimension empties the whole product.
    NoCombinations,
}

/// Applies the policy. `None` means the product has no combinations at all.
fn effective_dimensions(
    dimensions: &[VariantDimension],
    policy: EmptyDimensionPolicy,
) -> Option<Vec<&VariantDimension>> {
    match policy {
        EmptyDimensionPolicy::Skip => Some(dimensions.iter().filter(|d| !d.is_empty()).collect()),
        EmptyDimensionPolicy::NoCombinations => {
            if dimensions.iter().any(VariantDimension::is_empty) {
                None
            } else {
                Some(dimensions.iter().collect())
            }
        }
    }
}

// =============================================================================
// Variant Combination
// =============================================================================

/// One value per dimension, identifying an orderable variant.
///
/// A combination with no values is the standard combination of a product
/// without variants; its key is [`STANDARD_COMBINATION`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct VariantCombination {
    values: Vec<String>,
}

impl VariantCombination {
    /// The single combination of a product without variants.
    pub fn standard() -> Self {
        VariantCombination { values: Vec::new() }
    }

    /// True for the standard combination.
    #[inline]
    pub fn is_standard(&self) -> bool {
        self.values.is_empty()
    }

    /// Values in dimension order.
    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Canonical key: values joined by [`COMBINATION_SEPARATOR`].
    pub fn key(&self) -> String {
        if self.is_standard() {
            STANDARD_COMBINATION.to_string()
        } else {
            self.values.join(COMBINATION_SEPARATOR)
        }
    }

    /// Returns the value chosen for the named dimension.
    ///
    /// `dimensions` must be the same slice (and policy) the combination was
    /// generated from.
    pub fn value_for<'a>(
        &'a self,
        dimensions: &[VariantDimension],
        policy: EmptyDimensionPolicy,
        name: &str,
    ) -> Option<&'a str> {
        let dims = effective_dimensions(dimensions, policy)?;
        dims.iter()
            .position(|d| d.name.eq_ignore_ascii_case(name))
            .and_then(|idx| self.values.get(idx))
            .map(String::as_str)
    }

    /// Rebuilds a combination from its key.
    ///
    /// ## Example
    /// ```rust
    /// use orderdesk_core::variants::{EmptyDimensionPolicy, VariantCombination, VariantDimension};
    ///
    /// let dims = vec![
    ///     VariantDimension::new("Color", ["Red", "Blue"]),
    ///     VariantDimension::new("Size", ["S", "M"]),
    /// ];
    /// let combo = VariantCombination::parse("Blue/M", &dims, EmptyDimensionPolicy::Skip).unwrap();
    /// assert_eq!(combo.values(), ["Blue", "M"]);
    /// assert!(VariantCombination::parse("Green/M", &dims, EmptyDimensionPolicy::Skip).is_err());
    /// ```
    pub fn parse(
        key: &str,
        dimensions: &[VariantDimension],
        policy: EmptyDimensionPolicy,
    ) -> ValidationResult<Self> {
        let dims = effective_dimensions(dimensions, policy).ok_or_else(|| {
            ValidationError::InvalidFormat {
                field: "combination".to_string(),
                reason: "product has no variant combinations".to_string(),
            }
        })?;

        if dims.is_empty() {
            return if key == STANDARD_COMBINATION {
                Ok(VariantCombination::standard())
            } else {
                Err(ValidationError::InvalidFormat {
                    field: "combination".to_string(),
                    reason: format!("expected '{}'", STANDARD_COMBINATION),
                })
            };
        }

        let parts: Vec<&str> = key.split(COMBINATION_SEPARATOR).collect();
        if parts.len() != dims.len() {
            return Err(ValidationError::InvalidFormat {
                field: "combination".to_string(),
                reason: format!("expected {} values, got {}", dims.len(), parts.len()),
            });
        }

        for (part, dim) in parts.iter().zip(&dims) {
            if !dim.values.iter().any(|v| v == part) {
                return Err(ValidationError::InvalidFormat {
                    field: "combination".to_string(),
                    reason: format!("'{}' is not a valid {}", part, dim.name),
                });
            }
        }

        Ok(VariantCombination {
            values: parts.into_iter().map(str::to_string).collect(),
        })
    }
}

impl fmt::Display for VariantCombination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}

// =============================================================================
// Generation
// =============================================================================

/// Generates every combination of the given dimensions.
///
/// ## Algorithm
/// ```text
/// partials = [ [] ]
/// for each dimension (captured order):
///     partials = [ p + [v]  for p in partials, for v in dimension.values ]
/// ```
///
/// Zero dimensions (after the policy) yield exactly one standard
/// combination. With [`EmptyDimensionPolicy::NoCombinations`] an empty
/// dimension yields nothing.
pub fn generate_combinations(
    dimensions: &[VariantDimension],
    policy: EmptyDimensionPolicy,
) -> Vec<VariantCombination> {
    let Some(dims) = effective_dimensions(dimensions, policy) else {
        return Vec::new();
    };

    if dims.is_empty() {
        return vec![VariantCombination::standard()];
    }

    let mut partials: Vec<Vec<String>> = vec![Vec::new()];
    for dim in dims {
        partials = partials
            .into_iter()
            .flat_map(|partial| {
                dim.values.iter().map(move |value| {
                    let mut next = partial.clone();
                    next.push(value.clone());
                    next
                })
            })
            .collect();
    }

    partials
        .into_iter()
        .map(|values| VariantCombination { values })
        .collect()
}

/// Generates the combination keys only.
pub fn combination_keys(
    dimensions: &[VariantDimension],
    policy: EmptyDimensionPolicy,
) -> Vec<String> {
    generate_combinations(dimensions, policy)
        .iter()
        .map(VariantCombination::key)
        .collect()
}

/// Number of combinations, without building them.
///
/// Saturates at `usize::MAX` for grids too large to count.
pub fn combination_count(dimensions: &[VariantDimension], policy: EmptyDimensionPolicy) -> usize {
    match effective_dimensions(dimensions, policy) {
        None => 0,
        Some(dims) => dims
            .iter()
            .try_fold(1usize, |acc, d| acc.checked_mul(d.len()))
            .unwrap_or(usize::MAX),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
