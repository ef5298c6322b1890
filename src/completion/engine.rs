//! Completion engine - orchestrates the completion flow
//!
//! The engine ties together parsing, strategy dispatch and proposal
//! post-processing. It holds no per-request state and can be shared freely
//! between threads.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, trace};

use super::forward::{close_literal, continuations};
use super::proposal::CompletionProposal;
use super::registry::StrategyRegistry;
use crate::error::Result;
use crate::metadata::Lookups;
use crate::parser::{ParseFault, Parser, PartialDefinition};

/// Main completion engine
#[derive(Debug, Clone)]
pub struct CompletionEngine {
    /// Recovery strategies, in dispatch order
    registry: Arc<StrategyRegistry>,
    /// Component and option metadata
    lookups: Lookups,
    /// Whether deprecated options count as available on the success path
    include_deprecated: bool,
}

impl CompletionEngine {
    /// Create a new completion engine
    ///
    /// # Arguments
    /// * `registry` - Validated strategy registry
    /// * `lookups` - Metadata collaborators
    pub fn new(registry: Arc<StrategyRegistry>, lookups: Lookups) -> Self {
        Self {
            registry,
            lookups,
            include_deprecated: false,
        }
    }

    /// Engine with the built-in strategies
    ///
    /// # Arguments
    /// * `lookups` - Metadata collaborators
    /// * `include_deprecated` - Whether deprecated options are proposed
    ///
    /// # Returns
    /// * `Result<Self>` - Engine, or a registration error
    pub fn standard(lookups: Lookups, include_deprecated: bool) -> Result<Self> {
        let registry = StrategyRegistry::standard(include_deprecated)?;
        Ok(Self::new(Arc::new(registry), lookups).with_include_deprecated(include_deprecated))
    }

    pub fn with_include_deprecated(mut self, include_deprecated: bool) -> Self {
        self.include_deprecated = include_deprecated;
        self
    }

    pub fn lookups(&self) -> &Lookups {
        &self.lookups
    }

    pub fn registry(&self) -> &StrategyRegistry {
        &self.registry
    }

    /// Complete a possibly broken definition
    ///
    /// # Arguments
    /// * `text` - The definition typed so far
    /// * `detail_level` - Maximum number of proposals; 0 means unlimited
    ///
    /// # Returns
    /// * `Vec<CompletionProposal>` - Full replacement texts, deduplicated, in
    ///   strategy order; never fails
    pub fn complete(&self, text: &str, detail_level: usize) -> Vec<CompletionProposal> {
        let mut proposals = match Parser::parse(text) {
            Ok(definition) => self.forward(text, &definition),
            Err(fault) => self.recover(&fault, detail_level),
        };

        let mut seen = HashSet::new();
        proposals.retain(|proposal| seen.insert(proposal.text.clone()));
        if detail_level > 0 {
            proposals.truncate(detail_level);
        }

        debug!("Completed {:?} with {} proposals", text, proposals.len());
        proposals
    }

    /// Proposals continuing a definition that parsed completely
    fn forward(&self, text: &str, definition: &PartialDefinition) -> Vec<CompletionProposal> {
        if let Some(closing) = close_literal(text) {
            return vec![closing];
        }

        let (Some(used), Some(descriptor)) =
            (definition.last(), self.lookups.resolve_last(definition))
        else {
            debug!("Last component of {:?} is unknown", text);
            return Vec::new();
        };

        continuations(
            text.trim_end(),
            &descriptor,
            used,
            &self.lookups,
            self.include_deprecated,
        )
    }

    /// Run every strategy whose shape matches the fault
    fn recover(&self, fault: &ParseFault, detail_level: usize) -> Vec<CompletionProposal> {
        debug!(
            "Parse fault {} at checkpoint {} ({})",
            fault.kind(),
            fault.checkpoint(),
            fault
        );

        let mut proposals = Vec::new();
        for strategy in self.registry.matching(fault) {
            let produced = strategy.propose(fault, &self.lookups, detail_level);
            trace!(
                "Strategy {} produced {} proposals",
                strategy.name(),
                produced.len()
            );
            proposals.extend(produced);
        }
        proposals
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::Catalog;

    fn engine() -> CompletionEngine {
        CompletionEngine::standard(Lookups::from_catalog(Catalog::builtin().unwrap()), false)
            .unwrap()
    }

    fn texts(engine: &CompletionEngine, input: &str, detail_level: usize) -> Vec<String> {
        engine
            .complete(input, detail_level)
            .into_iter()
            .map(|p| p.text)
            .collect()
    }

    #[test]
    fn test_success_path_forward_proposals() {
        let engine = engine();
        assert_eq!(texts(&engine, "http ", 0), vec!["http |", "http --"]);
        assert_eq!(
            texts(&engine, "http --port=8080", 0),
            vec!["http --port=8080 |", "http --port=8080 --"]
        );
    }

    #[test]
    fn test_success_path_sink_has_no_pipe() {
        assert_eq!(texts(&engine(), "http | log ", 0), vec!["http | log --"]);
    }

    #[test]
    fn test_unknown_last_component_is_silent() {
        assert!(texts(&engine(), "http | nope ", 0).is_empty());
    }

    #[test]
    fn test_union_of_strategies() {
        let engine = engine();
        let all = texts(&engine, "http --", 0);
        assert_eq!(
            all,
            vec![
                "http --port=",
                "http --path-pattern=",
                "http --format.",
                "http --server."
            ]
        );
    }

    #[test]
    fn test_detail_level_caps_total() {
        let engine = engine();
        assert_eq!(texts(&engine, "http --", 3).len(), 3);
        assert_eq!(texts(&engine, "http --", 1), vec!["http --port="]);
    }

    #[test]
    fn test_no_strategy_for_missing_separator() {
        assert!(texts(&engine(), "http @", 0).is_empty());
    }

    #[test]
    fn test_engine_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CompletionEngine>();
    }
}
