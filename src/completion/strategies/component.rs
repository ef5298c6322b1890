//! Strategies completing component names

use tracing::trace;

use super::{last_significant, limit};
use crate::completion::forward::continuations;
use crate::completion::proposal::{CompletionProposal, ProposalBuilder};
use crate::completion::registry::{RecoveryStrategy, Shape};
use crate::metadata::Lookups;
use crate::parser::{ComponentUse, FaultKind, FaultVariant, ParseFault, TokenKind};

const DANGLING_NAME: &[Shape] = &[Shape::new(
    FaultKind::DanglingComponentName,
    &[TokenKind::Identifier],
)];

/// Completes a partially typed component name
///
/// Only the trailing identifier is replaced; everything before it is kept
/// verbatim, whitespace included.
#[derive(Debug, Clone, Copy, Default)]
pub struct ComponentNameStrategy;

impl RecoveryStrategy for ComponentNameStrategy {
    fn name(&self) -> &'static str {
        "component-name"
    }

    fn shapes(&self) -> &[Shape] {
        DANGLING_NAME
    }

    fn propose(
        &self,
        fault: &ParseFault,
        lookups: &Lookups,
        detail_level: usize,
    ) -> Vec<CompletionProposal> {
        let FaultVariant::DanglingComponentName { fragment } = fault.variant() else {
            return Vec::new();
        };
        let Some(token) = last_significant(fault) else {
            return Vec::new();
        };

        let builder = ProposalBuilder::new(&fault.input()[..token.start()]);
        let proposals: Vec<CompletionProposal> = lookups
            .components_at(fault.definition())
            .into_iter()
            .filter(|c| c.name.starts_with(fragment.as_str()) && c.name != *fragment)
            .take(limit(detail_level))
            .map(|c| builder.adjoin(&c.name, format!("{} component", c.category)))
            .collect();

        trace!("Component name '{}' has {} candidates", fragment, proposals.len());
        proposals
    }
}

/// Offers the next step once the typed name is already a valid component
#[derive(Debug, Clone, Copy, Default)]
pub struct ResolvedComponentStrategy {
    include_deprecated: bool,
}

impl ResolvedComponentStrategy {
    pub fn new(include_deprecated: bool) -> Self {
        Self { include_deprecated }
    }
}

impl RecoveryStrategy for ResolvedComponentStrategy {
    fn name(&self) -> &'static str {
        "resolved-component"
    }

    fn shapes(&self) -> &[Shape] {
        DANGLING_NAME
    }

    fn propose(
        &self,
        fault: &ParseFault,
        lookups: &Lookups,
        detail_level: usize,
    ) -> Vec<CompletionProposal> {
        let FaultVariant::DanglingComponentName { fragment } = fault.variant() else {
            return Vec::new();
        };
        let Some(token) = last_significant(fault) else {
            return Vec::new();
        };
        let Some(descriptor) = lookups.resolve_at(fragment, fault.definition()) else {
            return Vec::new();
        };

        let mut proposals = continuations(
            &fault.input()[..token.end()],
            &descriptor,
            &ComponentUse::new(fragment.as_str()),
            lookups,
            self.include_deprecated,
        );
        proposals.truncate(limit(detail_level));
        proposals
    }
}

/// Lists every component valid where a component name is missing
#[derive(Debug, Clone, Copy, Default)]
pub struct MissingComponentStrategy;

impl RecoveryStrategy for MissingComponentStrategy {
    fn name(&self) -> &'static str {
        "missing-component"
    }

    fn shapes(&self) -> &[Shape] {
        const SHAPES: &[Shape] = &[
            Shape::new(FaultKind::MissingComponent, &[]),
            Shape::new(FaultKind::TrailingPipe, &[TokenKind::Pipe]),
        ];
        SHAPES
    }

    fn propose(
        &self,
        fault: &ParseFault,
        lookups: &Lookups,
        detail_level: usize,
    ) -> Vec<CompletionProposal> {
        let builder = ProposalBuilder::new(fault.safe_prefix());
        lookups
            .components_at(fault.definition())
            .into_iter()
            .take(limit(detail_level))
            .map(|c| builder.separate(&c.name, format!("{} component", c.category)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::Catalog;
    use crate::parser::Parser;

    fn lookups() -> Lookups {
        Lookups::from_catalog(Catalog::builtin().unwrap())
    }

    fn run(strategy: &dyn RecoveryStrategy, input: &str, detail_level: usize) -> Vec<String> {
        let fault = Parser::parse(input).unwrap_err();
        assert!(strategy.shapes().iter().any(|s| s.matches(&fault)));
        strategy
            .propose(&fault, &lookups(), detail_level)
            .into_iter()
            .map(|p| p.text)
            .collect()
    }

    #[test]
    fn test_completes_name_after_pipe() {
        let texts = run(&ComponentNameStrategy, "http | fil", 0);
        assert_eq!(texts, vec!["http | filter", "http | file"]);
    }

    #[test]
    fn test_first_stage_only_offers_sources() {
        let texts = run(&ComponentNameStrategy, "fil", 0);
        assert_eq!(texts, vec!["file", "fileset"]);
    }

    #[test]
    fn test_keeps_spacing_before_fragment() {
        let texts = run(&ComponentNameStrategy, "http |fil", 1);
        assert_eq!(texts, vec!["http |filter"]);
    }

    #[test]
    fn test_exact_name_is_not_reproposed() {
        let texts = run(&ComponentNameStrategy, "http | file", 0);
        assert!(texts.is_empty());
    }

    #[test]
    fn test_resolved_name_gets_continuations() {
        let texts = run(&ResolvedComponentStrategy::new(false), "http | file", 0);
        assert_eq!(texts, vec!["http | file --"]);

        let texts = run(&ResolvedComponentStrategy::new(false), "time", 0);
        assert_eq!(texts, vec!["time |", "time --"]);
    }

    #[test]
    fn test_unknown_name_is_silent() {
        assert!(run(&ResolvedComponentStrategy::new(false), "nope", 0).is_empty());
        assert!(run(&ComponentNameStrategy, "nope", 0).is_empty());
    }

    #[test]
    fn test_missing_component_after_pipe() {
        let texts = run(&MissingComponentStrategy, "http |", 0);
        assert_eq!(
            texts,
            vec![
                "http | filter",
                "http | transform",
                "http | file",
                "http | log",
                "http | task-launcher"
            ]
        );
    }

    #[test]
    fn test_missing_component_on_empty_input() {
        let texts = run(&MissingComponentStrategy, "", 2);
        assert_eq!(texts, vec!["http", "time"]);
    }
}
