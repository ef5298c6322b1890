//! Error handling for pipeline-complete
//!
//! Completion never returns an error: lexical anomalies become unknown tokens,
//! parse faults drive recovery and missing metadata yields no proposals. The
//! types here cover the fallible work around the engine:
//! - Loading configuration and metadata catalogs
//! - Assembling the recovery strategy registry
//! - Rendering output
//!
//! # Example
//!
//! ```rust,no_run
//! use pipeline_complete::error::{ConfigError, PipelineError, Result};
//!
//! fn load() -> Result<()> {
//!     Err(ConfigError::FileNotFound("config.toml".into()).into())
//! }
//!
//! match load() {
//!     Err(PipelineError::Config(e)) => eprintln!("{e}"),
//!     _ => {}
//! }
//! ```

pub mod kinds;

// Re-export commonly used types
pub use kinds::{CatalogError, ConfigError, PipelineError, RegistrationError, Result};
