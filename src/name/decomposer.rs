//! Raw full name → first / middle / last component vectors.

use crate::normalize::{nfkd_normalize, replace_german_chars, to_lower};

use super::constants::{REMOVABLE_TOKENS, SURNAME_PARTICLES};

/// Characters stripped from the end of a cleaned name.
const TRAILING_PUNCTUATION: &[char] = &['.', ',', ';', ':', '!', '?', '}', ']'];

/// Characters removed anywhere in the name (copy/paste artefacts).
const PASTE_NOISE: &[char] = &['"', '\'', '<', '>'];

/// A cleaned name partitioned into ordered first / middle / last vectors.
///
/// Decomposition never fails: input that reduces to zero tokens after
/// cleaning yields all-empty vectors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecomposedName {
    cleaned_full_name: String,
    first_names: Vec<String>,
    middle_names: Vec<String>,
    last_names: Vec<String>,
}

impl DecomposedName {
    /// Cleans and partitions `raw_name`.
    ///
    /// Cleaning: trim, ASCII lowercase, Germanic transliteration, NFKD +
    /// ASCII strip, trailing-punctuation trim, paste-noise removal,
    /// whitespace collapse, honorific/suffix stripping from both ends.
    ///
    /// Partitioning: a hyphenated first token becomes multiple first
    /// names; the first surname particle pulls itself and every following
    /// token into the last names; otherwise the final token is the last
    /// name and everything in between is a middle name.
    pub fn decompose(raw_name: &str) -> Self {
        let cleaned_full_name = normalize_full_name(raw_name);
        let mut decomposed = Self {
            cleaned_full_name,
            ..Self::default()
        };
        decomposed.parse();
        decomposed
    }

    fn parse(&mut self) {
        if self.cleaned_full_name.is_empty() {
            return;
        }

        let parts: Vec<&str> = self.cleaned_full_name.split(' ').collect();
        let Some((&head, rest)) = parts.split_first() else {
            return;
        };

        // Hyphenated first token becomes multiple first names.
        if head.contains('-') {
            self.first_names
                .extend(head.split('-').filter(|p| !p.is_empty()).map(str::to_string));
        } else {
            self.first_names.push(head.to_string());
        }

        for (offset, &part) in rest.iter().enumerate() {
            // The first particle pulls itself and everything after it into
            // the last names, ending the scan.
            if SURNAME_PARTICLES.contains(&part) {
                self.last_names
                    .extend(rest[offset..].iter().map(|s| s.to_string()));
                break;
            }

            if offset < rest.len() - 1 {
                self.middle_names.push(part.to_string());
            } else {
                self.last_names.push(part.to_string());
            }
        }
    }

    /// The cleaned, honorific-stripped full name the partitioning ran on.
    pub fn cleaned_full_name(&self) -> &str {
        &self.cleaned_full_name
    }

    pub fn first_names(&self) -> &[String] {
        &self.first_names
    }

    pub fn middle_names(&self) -> &[String] {
        &self.middle_names
    }

    pub fn last_names(&self) -> &[String] {
        &self.last_names
    }

    pub fn has_middle_name(&self) -> bool {
        !self.middle_names.is_empty()
    }

    pub fn has_multiple_first_names(&self) -> bool {
        self.first_names.len() > 1
    }

    pub fn has_multiple_middle_names(&self) -> bool {
        self.middle_names.len() > 1
    }

    pub fn has_multiple_last_names(&self) -> bool {
        self.last_names.len() > 1
    }

    /// True when every component vector is empty (input reduced to
    /// nothing during cleaning).
    pub fn is_empty(&self) -> bool {
        self.first_names.is_empty() && self.middle_names.is_empty() && self.last_names.is_empty()
    }
}

/// Runs the cleaning pipeline and rejoins the surviving tokens with single
/// spaces. Returns an empty string when nothing survives.
fn normalize_full_name(raw_name: &str) -> String {
    let trimmed = raw_name.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    let lowered = to_lower(trimmed);
    let transliterated = replace_german_chars(&lowered);
    let mut cleaned = nfkd_normalize(&transliterated);

    // Trailing punctuation, then paste noise anywhere.
    while cleaned.ends_with(TRAILING_PUNCTUATION) {
        cleaned.pop();
    }
    cleaned.retain(|c| !PASTE_NOISE.contains(&c));

    // Whitespace collapse and honorific/suffix stripping from both ends.
    let mut tokens: Vec<&str> = cleaned.split_whitespace().collect();
    while let Some(&front) = tokens.first()
        && REMOVABLE_TOKENS.contains(&front)
    {
        tokens.remove(0);
    }
    while let Some(&back) = tokens.last()
        && REMOVABLE_TOKENS.contains(&back)
    {
        tokens.pop();
    }

    tokens.join(" ")
}
