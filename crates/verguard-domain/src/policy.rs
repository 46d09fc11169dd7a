//! The policy document model: rules keyed by (group, artifact).
//!
//! Constructed once by the parser in `verguard-repo`, immutable thereafter,
//! and owned by a single evaluation run.

/// A single version-enforcement rule.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rule {
    pub group: String,
    pub artifact: String,
    pub min_safe_version: String,
    /// When set, a breach blocks the run instead of warning.
    pub force_update: bool,
    /// Remediation guidance carried into the violation message.
    pub message: String,
}

/// An ordered collection of rules.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PolicyDocument {
    rules: Vec<Rule>,
}

impl PolicyDocument {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// Look up a rule by exact (group, artifact) match.
    ///
    /// Duplicated keys are permitted in a published policy; the first entry
    /// in document order wins and later ones are never consulted.
    pub fn find(&self, group: &str, artifact: &str) -> Option<&Rule> {
        self.rules
            .iter()
            .find(|r| r.group == group && r.artifact == artifact)
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
