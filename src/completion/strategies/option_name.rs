//! Strategies completing dotted option names
//!
//! The text typed after the last `--` is the buffer. A group whose id is the
//! buffer up to its last dot, or the buffer without a trailing dot, is being
//! completed directly: its options are proposed as leaves. Any other group
//! whose id extends the buffer contributes one more dotted segment.

use std::collections::HashSet;

use super::{configured_component, limit};
use crate::completion::proposal::{CompletionProposal, ProposalBuilder};
use crate::completion::registry::{RecoveryStrategy, Shape};
use crate::metadata::{Lookups, OptionDescriptor, OptionGroup, parent_group};
use crate::parser::{ComponentUse, FaultKind, FaultVariant, ParseFault, TokenKind};

const OPTION_NAME: &[Shape] = &[
    Shape::new(FaultKind::UnfinishedOptionName, &[TokenKind::Identifier]),
    Shape::new(FaultKind::UnfinishedOptionName, &[TokenKind::Dot]),
    Shape::new(FaultKind::TrailingOptionMarker, &[TokenKind::OptionMarker]),
];

/// What has been typed of the option name so far
struct NameBuffer<'a> {
    text: &'a str,
    head: &'a str,
    trimmed: &'a str,
}

impl<'a> NameBuffer<'a> {
    fn of(fault: &'a ParseFault) -> Option<Self> {
        let text = match fault.variant() {
            FaultVariant::UnfinishedOptionName { fragment } => fragment.as_str(),
            FaultVariant::TrailingOptionMarker => "",
            _ => return None,
        };
        Some(Self {
            text,
            head: parent_group(text),
            trimmed: text.strip_suffix('.').unwrap_or(text),
        })
    }

    fn is_completing(&self, group: &OptionGroup) -> bool {
        group.id == self.head || group.id == self.trimmed
    }
}

fn is_available(option: &OptionDescriptor, used: &ComponentUse, include_deprecated: bool) -> bool {
    (include_deprecated || !option.deprecated) && !used.has_option(&option.id)
}

/// Proposes `--<id>=` for options of the group being completed
#[derive(Debug, Clone, Copy, Default)]
pub struct OptionLeafStrategy {
    include_deprecated: bool,
}

impl OptionLeafStrategy {
    pub fn new(include_deprecated: bool) -> Self {
        Self { include_deprecated }
    }
}

impl RecoveryStrategy for OptionLeafStrategy {
    fn name(&self) -> &'static str {
        "option-leaf"
    }

    fn shapes(&self) -> &[Shape] {
        OPTION_NAME
    }

    fn propose(
        &self,
        fault: &ParseFault,
        lookups: &Lookups,
        detail_level: usize,
    ) -> Vec<CompletionProposal> {
        let Some(buffer) = NameBuffer::of(fault) else {
            return Vec::new();
        };
        let Some((descriptor, used)) = configured_component(fault, lookups) else {
            return Vec::new();
        };

        let builder = ProposalBuilder::new(fault.safe_prefix());
        lookups
            .option_groups(&descriptor)
            .into_iter()
            .filter(|group| buffer.is_completing(group))
            .flat_map(|group| group.options)
            .filter(|option| is_available(option, used, self.include_deprecated))
            .filter(|option| option.id.starts_with(buffer.text))
            .take(limit(detail_level))
            .map(|option| builder.separate(&format!("--{}=", option.id), option.description))
            .collect()
    }
}

/// Proposes the next dotted segment of groups extending the buffer
#[derive(Debug, Clone, Copy, Default)]
pub struct OptionGroupStrategy {
    include_deprecated: bool,
}

impl OptionGroupStrategy {
    pub fn new(include_deprecated: bool) -> Self {
        Self { include_deprecated }
    }
}

impl RecoveryStrategy for OptionGroupStrategy {
    fn name(&self) -> &'static str {
        "option-group"
    }

    fn shapes(&self) -> &[Shape] {
        OPTION_NAME
    }

    fn propose(
        &self,
        fault: &ParseFault,
        lookups: &Lookups,
        detail_level: usize,
    ) -> Vec<CompletionProposal> {
        let Some(buffer) = NameBuffer::of(fault) else {
            return Vec::new();
        };
        let Some((descriptor, used)) = configured_component(fault, lookups) else {
            return Vec::new();
        };

        let builder = ProposalBuilder::new(fault.safe_prefix());
        let mut seen = HashSet::new();
        let mut proposals = Vec::new();

        for group in lookups.option_groups(&descriptor) {
            if group.id.is_empty()
                || buffer.is_completing(&group)
                || !group.id.starts_with(buffer.text)
                || !group
                    .options
                    .iter()
                    .any(|option| is_available(option, used, self.include_deprecated))
            {
                continue;
            }

            let cut = group.id[buffer.text.len()..]
                .find('.')
                .map_or(group.id.len(), |dot| buffer.text.len() + dot);
            let segment = &group.id[..cut];
            if !seen.insert(segment.to_string()) {
                continue;
            }

            proposals.push(builder.separate(
                &format!("--{segment}."),
                format!("Options under '{segment}'"),
            ));
            if proposals.len() >= limit(detail_level) {
                break;
            }
        }

        proposals
    }
}
