//! Inline hints from the first proposal, falling back to history

use std::sync::Arc;

use nu_ansi_term::{Color, Style};
use reedline::{Hinter, History, SearchQuery};

use crate::completion::CompletionEngine;

/// Hinter showing the untyped remainder of the best proposal
pub struct PipelineHinter {
    engine: Arc<CompletionEngine>,
    style: Style,
    current_hint: String,
}

impl PipelineHinter {
    pub fn new(engine: Arc<CompletionEngine>) -> Self {
        Self {
            engine,
            style: Style::new().italic().fg(Color::DarkGray),
            current_hint: String::new(),
        }
    }

    /// Remainder of the first proposal that extends `line` verbatim
    fn from_proposals(&self, line: &str) -> Option<String> {
        self.engine
            .complete(line, 0)
            .into_iter()
            .find(|p| p.text.len() > line.len() && p.text.starts_with(line))
            .map(|p| p.text[line.len()..].to_string())
    }

    fn from_history(line: &str, history: &dyn History) -> Option<String> {
        let item = history
            .search(SearchQuery::last_with_prefix(line.to_string(), None))
            .ok()
            .and_then(|results| results.into_iter().next())?;

        let history_line = item.command_line.as_str();
        (history_line.len() > line.len() && history_line.starts_with(line))
            .then(|| history_line[line.len()..].to_string())
    }
}

impl Hinter for PipelineHinter {
    fn handle(
        &mut self,
        line: &str,
        pos: usize,
        history: &dyn History,
        use_ansi_coloring: bool,
        _cwd: &str,
    ) -> String {
        self.current_hint.clear();

        // Hints only make sense at the end of the line
        if pos != line.len() || line.trim().is_empty() {
            return String::new();
        }

        let Some(hint) = self
            .from_proposals(line)
            .or_else(|| Self::from_history(line, history))
        else {
            return String::new();
        };

        self.current_hint = hint;
        if use_ansi_coloring {
            self.style.paint(&self.current_hint).to_string()
        } else {
            self.current_hint.clone()
        }
    }

    /// Next component-sized piece of the hint
    fn next_hint_token(&self) -> String {
        let hint = self.current_hint.as_str();
        let leading = hint.len() - hint.trim_start().len();
        let end = hint[leading..]
            .find(char::is_whitespace)
            .map_or(hint.len(), |i| leading + i);
        hint[..end].to_string()
    }

    fn complete_hint(&self) -> String {
        self.current_hint.clone()
    }
}
