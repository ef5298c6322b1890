//! Completer for reedline backed by the completion engine

use std::sync::Arc;

use reedline::{Completer, Span, Suggestion};

use crate::completion::CompletionEngine;

/// Completer that replaces the text before the cursor with whole proposals
pub struct PipelineCompleter {
    engine: Arc<CompletionEngine>,
    detail_level: usize,
}

impl PipelineCompleter {
    /// Create a new completer
    ///
    /// # Arguments
    /// * `engine` - Shared completion engine
    /// * `detail_level` - Maximum number of suggestions (0 for unlimited)
    pub fn new(engine: Arc<CompletionEngine>, detail_level: usize) -> Self {
        Self {
            engine,
            detail_level,
        }
    }
}

impl Completer for PipelineCompleter {
    /// Proposals are full definitions, so the span always starts at 0
    fn complete(&mut self, line: &str, pos: usize) -> Vec<Suggestion> {
        let pos = pos.min(line.len());
        let Some(before_cursor) = line.get(..pos) else {
            return Vec::new();
        };

        self.engine
            .complete(before_cursor, self.detail_level)
            .into_iter()
            .map(|proposal| Suggestion {
                value: proposal.text,
                description: (!proposal.explanation.is_empty()).then_some(proposal.explanation),
                style: None,
                extra: None,
                span: Span::new(0, pos),
                append_whitespace: false,
                match_indices: None,
            })
            .collect()
    }
}
