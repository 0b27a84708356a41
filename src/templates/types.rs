use std::collections::HashMap;

/// Which part of a decomposed name a template token draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NameGroup {
    First,
    Middle,
    Last,
}

/// Rendering flags carried by a component token.
///
/// The normalisation flags (`use_original`, `use_nfkd`, `use_translit`,
/// `use_nickname`, `use_surname_particle`) are produced by the mining
/// pipeline and kept for fidelity with the blob format; rendering itself
/// only branches on `use_initial` because name components are already
/// normalised by the decomposer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenFlags {
    pub use_original: bool,
    pub use_nfkd: bool,
    pub use_translit: bool,
    pub use_nickname: bool,
    pub use_surname_particle: bool,
    pub use_initial: bool,
}

/// A parsed structural token of an email template.
///
/// A token either renders a name component or emits a separator literal,
/// never both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateToken {
    /// Literal separator (`"."`, `"_"`, `"-"`).
    Separator(String),
    /// Name component reference.
    Component {
        group: NameGroup,
        /// Index into the component vector for `group`.
        index: usize,
        flags: TokenFlags,
    },
}

impl TemplateToken {
    /// Convenience constructor for a component token with default flags.
    pub fn component(group: NameGroup, index: usize) -> Self {
        Self::Component {
            group,
            index,
            flags: TokenFlags::default(),
        }
    }

    /// Convenience constructor for an initial (first-character) token.
    pub fn initial(group: NameGroup, index: usize) -> Self {
        Self::Component {
            group,
            index,
            flags: TokenFlags {
                use_initial: true,
                ..TokenFlags::default()
            },
        }
    }
}

/// An email-template candidate with its structure and mined statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateTemplate {
    /// Unique id within the template class.
    pub template_id: i32,
    /// Ordered token sequence rendering the local-part.
    pub token_seq: Vec<TemplateToken>,
    /// Global usage count across all investors.
    pub support_count: i32,
    /// Global coverage share of this template.
    pub coverage_pct: f32,
    /// Template appears in the mined sequential rules.
    pub in_mined_rules: bool,
    /// Highest rule confidence supporting this template.
    pub max_rule_confidence: f32,
    /// Mean rule confidence across supporting rules.
    pub avg_rule_confidence: f32,
    pub uses_middle_name: bool,
    pub uses_multiple_firsts: bool,
    pub uses_multiple_middles: bool,
    pub uses_multiple_lasts: bool,
}

/// Per-firm template-usage statistics, precomputed by the training
/// pipeline (diversity_ratio is not recomputed at load time).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FirmStats {
    pub num_templates: i32,
    pub num_investors: i32,
    pub diversity_ratio: f32,
    pub is_single_template: bool,
    pub is_shared_infra: bool,
    pub firm_is_multi_domain: bool,
}

/// How one template is used within one firm, derived from the firm's
/// `template_ids` list in a single pass at load time.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FirmTemplateUsage {
    pub support_count: i32,
    pub coverage_pct: f32,
    /// Member of the set of templates achieving the firm's max support
    /// count (every tied template carries the flag).
    pub is_top_template: bool,
}

/// In-memory view of the three template-metadata blobs.
///
/// Immutable after loading; candidate lists are sorted ascending by
/// `template_id`.
#[derive(Debug, Clone, Default)]
pub struct TemplateStore {
    std_templates: Vec<CandidateTemplate>,
    complex_templates: Vec<CandidateTemplate>,
    firm_stats: HashMap<String, FirmStats>,
    firm_usage: HashMap<String, HashMap<i32, FirmTemplateUsage>>,
}

impl TemplateStore {
    /// Builds a store from already-parsed parts, sorting each candidate
    /// list by `template_id`. Useful for serving façades and tests that
    /// assemble metadata in memory.
    pub fn from_parts(
        mut std_templates: Vec<CandidateTemplate>,
        mut complex_templates: Vec<CandidateTemplate>,
        firm_stats: HashMap<String, FirmStats>,
        firm_usage: HashMap<String, HashMap<i32, FirmTemplateUsage>>,
    ) -> Self {
        std_templates.sort_by_key(|t| t.template_id);
        complex_templates.sort_by_key(|t| t.template_id);
        Self {
            std_templates,
            complex_templates,
            firm_stats,
            firm_usage,
        }
    }

    /// Standard-class candidates, ascending by `template_id`.
    pub fn std_templates(&self) -> &[CandidateTemplate] {
        &self.std_templates
    }

    /// Complex-class candidates, ascending by `template_id`.
    pub fn complex_templates(&self) -> &[CandidateTemplate] {
        &self.complex_templates
    }

    pub fn firm_stats(&self) -> &HashMap<String, FirmStats> {
        &self.firm_stats
    }

    pub fn firm_usage(&self) -> &HashMap<String, HashMap<i32, FirmTemplateUsage>> {
        &self.firm_usage
    }

    pub fn firm_count(&self) -> usize {
        self.firm_stats.len()
    }
}
