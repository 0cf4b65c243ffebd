//! Literal text replacement rules
//!
//! A `RuleSet` is ordered once, when it is built: longest pattern first, with
//! ties kept in table order. Applying it is a plain find-and-replace-all per
//! rule over the whole text. No shell parsing and no word boundaries, so a
//! pattern inside a comment or a quoted string is rewritten too.

use std::cmp::Reverse;

use bstr::ByteSlice;
use once_cell::sync::Lazy;

use crate::errors::ConvertError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplacementRule {
    pub pattern: &'static str,
    pub replacement: &'static str,
}

impl ReplacementRule {
    pub const fn new(pattern: &'static str, replacement: &'static str) -> Self {
        Self {
            pattern,
            replacement,
        }
    }
}

/// Ubuntu (apt) to Fedora (dnf) invocations, in no particular order.
pub const APT_TO_DNF: [ReplacementRule; 9] = [
    ReplacementRule::new("sudo apt autoremove", "sudo dnf autoremove"),
    ReplacementRule::new("sudo apt upgrade", "sudo dnf upgrade"),
    ReplacementRule::new("sudo apt install", "sudo dnf install"),
    ReplacementRule::new("sudo apt update", "sudo dnf update"),
    ReplacementRule::new("add-apt-repository", "sudo dnf config-manager --add-repo"),
    ReplacementRule::new("sudo apt-get", "sudo dnf"),
    ReplacementRule::new("apt-get", "dnf"),
    ReplacementRule::new("sudo apt", "sudo dnf"),
    ReplacementRule::new("apt", "dnf"),
];

static APT_TO_DNF_RULES: Lazy<RuleSet> = Lazy::new(|| RuleSet::ordered(APT_TO_DNF.to_vec()));

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSet {
    rules: Vec<ReplacementRule>,
}

impl RuleSet {
    /// Builds a rule set from an arbitrary table. Empty patterns are rejected
    /// because they would match between every pair of characters.
    pub fn new(rules: Vec<ReplacementRule>) -> Result<Self, ConvertError> {
        if let Some(rule) = rules.iter().find(|rule| rule.pattern.is_empty()) {
            return Err(ConvertError::EmptyPattern {
                replacement: rule.replacement.to_string(),
            });
        }

        let set = Self::ordered(rules);
        if let Some((producer, matched)) = set.find_cascade() {
            log::warn!(
                "replacement '{}' contains pattern '{}', rewriting may not be idempotent",
                producer.replacement,
                matched.pattern
            );
        }

        Ok(set)
    }

    /// The fixed apt-to-dnf table, ordered once per process.
    pub fn apt_to_dnf() -> &'static RuleSet {
        &APT_TO_DNF_RULES
    }

    fn ordered(mut rules: Vec<ReplacementRule>) -> Self {
        // sort_by_key is stable, equal lengths keep their table order
        rules.sort_by_key(|rule| Reverse(rule.pattern.len()));
        Self { rules }
    }

    pub fn rules(&self) -> &[ReplacementRule] {
        &self.rules
    }

    pub fn apply(&self, text: &str) -> String {
        let mut output = text.to_string();
        for rule in &self.rules {
            if output.contains(rule.pattern) {
                output = output.replace(rule.pattern, rule.replacement);
            }
        }
        output
    }

    /// Same as `apply` over raw file contents. Bytes outside the patterns are
    /// kept as they are, whatever their encoding.
    pub fn apply_bytes(&self, content: &[u8]) -> Vec<u8> {
        let mut output = content.to_vec();
        for rule in &self.rules {
            if output.contains_str(rule.pattern) {
                output = output.replace(rule.pattern, rule.replacement);
            }
        }
        output
    }

    /// Returns the first pair of rules where the replacement of the first
    /// contains the pattern of the second. Such a pair lets a second pass
    /// rewrite text the first pass produced.
    pub fn find_cascade(&self) -> Option<(&ReplacementRule, &ReplacementRule)> {
        self.rules.iter().find_map(|producer| {
            self.rules
                .iter()
                .find(|candidate| producer.replacement.contains(candidate.pattern))
                .map(|matched| (producer, matched))
        })
    }
}
