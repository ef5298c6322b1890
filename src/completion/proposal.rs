//! Completion proposals and the builder that joins them onto a safe prefix

use std::hash::{Hash, Hasher};

use serde::Serialize;

/// A full replacement text for the input plus a human readable explanation
///
/// Two proposals are equal when their texts are equal; the explanation is
/// informational only.
#[derive(Debug, Clone, Serialize)]
pub struct CompletionProposal {
    pub text: String,
    pub explanation: String,
}

impl CompletionProposal {
    pub fn new(text: impl Into<String>, explanation: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            explanation: explanation.into(),
        }
    }
}

impl PartialEq for CompletionProposal {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl Eq for CompletionProposal {}

impl Hash for CompletionProposal {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.text.hash(state);
    }
}

/// Builds proposals that all share one verbatim prefix
#[derive(Debug, Clone)]
pub struct ProposalBuilder<'a> {
    prefix: &'a str,
}

impl<'a> ProposalBuilder<'a> {
    pub fn new(prefix: &'a str) -> Self {
        Self { prefix }
    }

    /// Append the suffix directly to the prefix
    ///
    /// Used when the suffix continues a token, e.g. finishing a component name.
    pub fn adjoin(&self, suffix: &str, explanation: impl Into<String>) -> CompletionProposal {
        CompletionProposal::new(format!("{}{suffix}", self.prefix), explanation)
    }

    /// Append the suffix after exactly one separating space
    ///
    /// No space is inserted when the prefix is empty or already ends in
    /// whitespace.
    pub fn separate(&self, suffix: &str, explanation: impl Into<String>) -> CompletionProposal {
        if self.prefix.is_empty() || self.prefix.ends_with(char::is_whitespace) {
            self.adjoin(suffix, explanation)
        } else {
            CompletionProposal::new(format!("{} {suffix}", self.prefix), explanation)
        }
    }
}
