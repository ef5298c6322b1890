//! Fault-tolerant auto-completion for pipeline definitions
//!
//! Definitions are chains of components joined by `|`, each followed by
//! `--name=value` options, for example `http --port=8080 | log`. Given
//! possibly unfinished text, the engine proposes whole-line continuations.
//!
//! # Modules
//!
//! - `parser`: Lexer and checkpointing parser producing typed faults
//! - `completion`: Recovery strategies, their registry and the engine
//! - `metadata`: Component registry, option metadata and the TOML catalog
//! - `config`: Configuration management
//! - `formatter`: Text, JSON and table output
//! - `repl`: Interactive shell
//! - `cli`: Command-line interface
//! - `error`: Error types and handling
//!
//! # Example
//!
//! ```
//! use pipeline_complete::{Catalog, CompletionEngine, Lookups};
//!
//! let lookups = Lookups::from_catalog(Catalog::builtin().unwrap());
//! let engine = CompletionEngine::standard(lookups, false).unwrap();
//!
//! let proposals = engine.complete("http --for", 0);
//! assert_eq!(proposals[0].text, "http --format.");
//! ```

pub mod cli;
pub mod completion;
pub mod config;
pub mod error;
pub mod formatter;
pub mod metadata;
pub mod parser;
pub mod repl;

// Re-export commonly used types
pub use completion::{CompletionEngine, CompletionProposal, StrategyRegistry};
pub use config::Config;
pub use error::{PipelineError, Result};
pub use formatter::Formatter;
pub use metadata::{Catalog, Lookups};
pub use parser::{ParseFault, Parser, PartialDefinition};
pub use repl::ReplEngine;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get library version string
pub fn version() -> &'static str {
    VERSION
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
