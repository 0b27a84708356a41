//! String normalisation primitives.
//!
//! Pure functions shared by the name decomposer, the feature extractor and
//! the firm-key normaliser. All of them operate on UTF-8 and degrade
//! gracefully on malformed input: bytes that match no rule are copied
//! through unchanged.


use unicode_normalization::UnicodeNormalization;

/// Germanic characters replaced ahead of NFKD so that e.g. `ü` becomes
/// `ue` rather than bare `u`. Greedy left-to-right, longest pattern first
/// is irrelevant here because no pattern is a prefix of another.
pub const GERMAN_ASCII_MAPPINGS: [(&str, &str); 6] = [
    ("ü", "ue"),
    ("ö", "oe"),
    ("ä", "ae"),
    ("ß", "ss"),
    ("ø", "o"),
    ("å", "aa"),
];

/// ASCII-only lowercasing. Multi-byte sequences pass through unchanged;
/// Unicode case folding is deliberately not applied so that the German and
/// NFKD passes see the original accented characters.
pub fn to_lower(input: &str) -> String {
    input
        .chars()
        .map(|c| if c.is_ascii_uppercase() { c.to_ascii_lowercase() } else { c })
        .collect()
}

/// Replaces Germanic special characters with their ASCII digraphs.
///
/// Greedy left-to-right over the fixed table; characters matching no
/// pattern are copied verbatim.
pub fn replace_german_chars(input: &str) -> String {
    let mut output = String::with_capacity(input.len());

    let mut rest = input;
    'outer: while !rest.is_empty() {
        for (pattern, replacement) in GERMAN_ASCII_MAPPINGS {
            if let Some(tail) = rest.strip_prefix(pattern) {
                output.push_str(replacement);
                rest = tail;
                continue 'outer;
            }
        }

        // No pattern matched at this position; advance one char.
        let mut chars = rest.chars();
        if let Some(c) = chars.next() {
            output.push(c);
            rest = chars.as_str();
        }
    }

    output
}

/// Unicode NFKD decomposition followed by removal of every non-ASCII
/// character, so `josé` compares equal to `jose`.
pub fn nfkd_normalize(input: &str) -> String {
    input.nfkd().filter(char::is_ascii).collect()
}

/// Splits on `delim`, collapsing runs of the delimiter and dropping
/// leading/trailing empties.
pub fn split(input: &str, delim: char) -> Vec<&str> {
    input.split(delim).filter(|s| !s.is_empty()).collect()
}
