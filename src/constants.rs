//! Cross-cutting, shared constants.
//!
//! Prefer deriving secondary constants from primary ones to avoid drift.
//!
//! # Feature-order invariant
//!
//! [`FEATURES_PER_ROW`] is derived from the feature-column table in
//! [`crate::features`]. The column order is shared implicitly with the
//! offline trainer; reordering it invalidates every shipped model.

/// Number of feature columns per candidate-template row.
pub const FEATURES_PER_ROW: usize = crate::features::FEATURE_COLUMNS.len();

/// Default number of predictions returned when the caller does not ask for
/// a specific K.
pub const DEFAULT_TOP_K: usize = 3;

/// Max entries held by the fuzzy-match memo cache.
pub const DEFAULT_FUZZY_CACHE_CAPACITY: u64 = 100_000;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn features_per_row_matches_column_table() {
        assert_eq!(FEATURES_PER_ROW, 27);
        assert_eq!(FEATURES_PER_ROW, crate::features::FEATURE_COLUMNS.len());
    }
}
