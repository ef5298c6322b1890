//! Interactive completion shell
//!
//! This module provides a line editor front end for the completion engine:
//! - Tab completion through a columnar menu
//! - Inline hints from the first matching proposal or from history
//! - Token-aware syntax highlighting
//! - Persistent history
//!
//! Submitting a line shows whether it parses and what could come next.

mod completer;
mod engine;
mod highlighter;
mod hinter;
mod prompt;

pub use completer::PipelineCompleter;
pub use engine::ReplEngine;
pub use highlighter::PipelineHighlighter;
pub use hinter::PipelineHinter;
pub use prompt::PipelinePrompt;

use std::sync::Arc;

use crate::completion::CompletionEngine;
use crate::error::Result;
use crate::formatter::{CatalogEntry, Formatter};
use crate::parser::Parser;

const HELP_TEXT: &str = "\
Type a pipeline definition and press Tab for proposals, Enter to check it.

  help      Show this message
  catalog   List known components and their options
  quit      Leave the shell (also: exit, Ctrl-D)";

/// A line submitted to the shell
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Help,
    Catalog,
    Quit,
    /// A pipeline definition to check
    Definition(String),
}

impl ReplCommand {
    /// Classify a submitted line
    pub fn parse(line: &str) -> Option<Self> {
        let trimmed = line.trim();
        match trimmed {
            "" => None,
            "help" | ":help" | "?" => Some(ReplCommand::Help),
            "catalog" | ":catalog" => Some(ReplCommand::Catalog),
            "quit" | "exit" | ":q" => Some(ReplCommand::Quit),
            _ => Some(ReplCommand::Definition(line.to_string())),
        }
    }
}

/// Evaluates shell commands against the completion engine
pub struct ReplSession {
    engine: Arc<CompletionEngine>,
    formatter: Formatter,
    detail_level: usize,
}

impl ReplSession {
    pub fn new(engine: Arc<CompletionEngine>, formatter: Formatter, detail_level: usize) -> Self {
        Self {
            engine,
            formatter,
            detail_level,
        }
    }

    pub fn engine(&self) -> &Arc<CompletionEngine> {
        &self.engine
    }

    /// Produce the output for a command; `None` for quit
    ///
    /// # Arguments
    /// * `command` - Classified input line
    ///
    /// # Returns
    /// * `Result<Option<String>>` - Text to print, or None to leave the shell
    pub fn execute(&self, command: ReplCommand) -> Result<Option<String>> {
        match command {
            ReplCommand::Quit => Ok(None),
            ReplCommand::Help => Ok(Some(HELP_TEXT.to_string())),
            ReplCommand::Catalog => {
                let entries = CatalogEntry::collect(self.engine.lookups());
                self.formatter.format_catalog(&entries).map(Some)
            }
            ReplCommand::Definition(text) => self.check(&text).map(Some),
        }
    }

    fn check(&self, text: &str) -> Result<String> {
        let status = match Parser::parse_finished(text) {
            Ok(definition) => format!("Valid pipeline with {} component(s)", definition.len()),
            Err(fault) => self.formatter.format_error(&fault.to_string()),
        };
        let proposals = self.engine.complete(text, self.detail_level);
        let listing = self.formatter.format_proposals(&proposals)?;
        Ok(format!("{status}\n{listing}"))
    }
}
