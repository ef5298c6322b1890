//! Completes option values from metadata hints and defaults

use super::{configured_component, limit};
use crate::completion::proposal::{CompletionProposal, ProposalBuilder};
use crate::completion::registry::{RecoveryStrategy, Shape};
use crate::metadata::{Lookups, OptionDescriptor};
use crate::parser::{FaultKind, FaultVariant, Lexer, ParseFault, TokenKind};

/// Proposes `--<id>=` when `=` is missing, and `--<id>=<value>` after it
#[derive(Debug, Clone, Copy, Default)]
pub struct OptionValueStrategy {
    include_deprecated: bool,
}

impl OptionValueStrategy {
    pub fn new(include_deprecated: bool) -> Self {
        Self { include_deprecated }
    }

    fn find_option(
        &self,
        fault: &ParseFault,
        lookups: &Lookups,
        id: &str,
    ) -> Option<OptionDescriptor> {
        let (descriptor, used) = configured_component(fault, lookups)?;
        if used.has_option(id) {
            return None;
        }
        lookups
            .unused_options(&descriptor, used, self.include_deprecated)
            .into_iter()
            .find(|option| option.id == id)
    }
}

impl RecoveryStrategy for OptionValueStrategy {
    fn name(&self) -> &'static str {
        "option-value"
    }

    fn shapes(&self) -> &[Shape] {
        const SHAPES: &[Shape] = &[
            Shape::new(FaultKind::MissingOptionValue, &[TokenKind::Equals]),
            Shape::new(FaultKind::MissingOptionValue, &[TokenKind::Identifier]),
        ];
        SHAPES
    }

    fn propose(
        &self,
        fault: &ParseFault,
        lookups: &Lookups,
        detail_level: usize,
    ) -> Vec<CompletionProposal> {
        let FaultVariant::MissingOptionValue {
            option,
            after_equals,
        } = fault.variant()
        else {
            return Vec::new();
        };
        let Some(descriptor) = self.find_option(fault, lookups, option) else {
            return Vec::new();
        };

        let builder = ProposalBuilder::new(fault.safe_prefix());
        if !after_equals {
            return vec![builder.separate(&format!("--{option}="), descriptor.description)];
        }

        let mut values: Vec<(&str, &str)> = descriptor
            .hints
            .iter()
            .map(|hint| (hint.as_str(), "Suggested value"))
            .collect();
        if let Some(default) = descriptor.default_value.as_deref()
            && !descriptor.hints.iter().any(|hint| hint == default)
        {
            values.push((default, "Default value"));
        }

        values
            .into_iter()
            .take(limit(detail_level))
            .map(|(value, explanation)| {
                builder.separate(&format!("--{option}={}", render_value(value)), explanation)
            })
            .collect()
    }
}

/// Render a value so it parses back as a single option value
///
/// Plain dotted identifiers are kept as they are; anything else is wrapped in
/// single quotes with backslash escapes.
fn render_value(value: &str) -> String {
    if is_plain_value(value) {
        return value.to_string();
    }

    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('\'');
    for ch in value.chars() {
        if ch == '\'' || ch == '\\' {
            quoted.push('\\');
        }
        quoted.push(ch);
    }
    quoted.push('\'');
    quoted
}

fn is_plain_value(value: &str) -> bool {
    value.split('.').all(|segment| {
        let mut chars = segment.chars();
        chars.next().is_some_and(Lexer::is_identifier_start) && chars.all(Lexer::is_identifier_part)
    })
}
