//! Per-query investor flags fed into the feature matrix.

use crate::normalize::{nfkd_normalize, replace_german_chars, to_lower};

use super::constants::find_nicknames;

/// Normalisation and nickname flags extracted from the raw investor name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NameFlags {
    /// Germanic transliteration would change the lowered name.
    pub has_german_char: bool,
    /// NFKD + ASCII-strip would change the lowered name.
    pub has_nfkd_normalized: bool,
    /// The first token of the lowered name is a known formal name with
    /// nickname variants.
    pub has_nickname: bool,
}

/// Extracts [`NameFlags`] from a raw (uncleaned) full name.
///
/// Flags are computed against the ASCII-lowered input, before any other
/// cleaning, so an accent dropped later by the decomposer still registers
/// here. Empty input yields all-false flags.
pub fn extract_name_flags(full_name: &str) -> NameFlags {
    if full_name.is_empty() {
        return NameFlags::default();
    }

    let lowered = to_lower(full_name);

    let has_german_char = replace_german_chars(&lowered) != lowered;
    let has_nfkd_normalized = nfkd_normalize(&lowered) != lowered;

    let has_nickname = lowered
        .split_whitespace()
        .next()
        .is_some_and(|first| !find_nicknames(first).is_empty());

    NameFlags {
        has_german_char,
        has_nfkd_normalized,
        has_nickname,
    }
}
