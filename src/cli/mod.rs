//! Command-line interface for pipeline-complete
//!
//! This module handles:
//! - Command-line argument parsing using clap
//! - Configuration loading and argument overrides
//! - Building the completion engine from the configured catalog
//! - Dispatching subcommands

pub mod completion;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

use crate::completion::CompletionEngine;
use crate::config::{Config, LogLevel, OutputFormat};
use crate::error::{ConfigError, Result};
use crate::formatter::{CatalogEntry, Formatter};
use crate::metadata::{Catalog, Lookups};
use crate::repl::{ReplEngine, ReplSession};

/// Fault-tolerant completion for pipeline definitions
#[derive(Parser, Debug)]
#[command(
    name = "pipeline-complete",
    version,
    about = "Auto-completion for pipe-and-option pipeline definitions",
    long_about = "Proposes completions for definitions like `http --port=8080 | log`,
including text that does not parse yet. Runs an interactive shell by default."
)]
pub struct CliArgs {
    /// Configuration file path
    #[arg(short = 'c', long = "config", value_name = "FILE", global = true)]
    pub config_file: Option<PathBuf>,

    /// Component catalog (TOML); overrides the configured catalog
    #[arg(long, value_name = "FILE", global = true)]
    pub catalog: Option<PathBuf>,

    /// Output format (text, json, table)
    #[arg(long, value_name = "FORMAT", global = true)]
    pub format: Option<String>,

    /// Disable colored output
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,

    /// Verbose mode (debug logging)
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Very verbose mode (trace logging)
    #[arg(long = "vv", global = true)]
    pub very_verbose: bool,

    /// Subcommands
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subcommands for pipeline-complete
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print completion proposals for a definition
    Complete {
        /// Definition text, possibly unfinished
        #[arg(value_name = "TEXT", allow_hyphen_values = true)]
        text: String,

        /// Maximum number of proposals (0 for unlimited)
        #[arg(long, value_name = "N")]
        detail: Option<usize>,
    },

    /// List known components and their options
    Catalog,

    /// Start the interactive shell
    Repl,

    /// Generate shell completion script
    Completion {
        /// Shell type (bash, zsh, fish, powershell)
        #[arg(value_name = "SHELL")]
        shell: String,
    },
}

/// CLI interface handler
pub struct CliInterface {
    /// Parsed command-line arguments
    args: CliArgs,

    /// Loaded configuration
    config: Config,
}

impl CliInterface {
    /// Create a new CLI interface from the process arguments
    pub fn new() -> Result<Self> {
        Self::from_args(CliArgs::parse())
    }

    /// Create a CLI interface from already parsed arguments
    ///
    /// # Arguments
    /// * `args` - Command-line arguments
    ///
    /// # Returns
    /// * `Result<Self>` - New CLI interface or error
    pub fn from_args(args: CliArgs) -> Result<Self> {
        let config = Self::load_config(&args)?;
        Ok(Self { args, config })
    }

    /// Load configuration from file and merge with arguments
    fn load_config(args: &CliArgs) -> Result<Config> {
        let mut config = Config::load_from_file(args.config_file.as_deref())?;
        config.validate()?;
        Self::apply_args_to_config(&mut config, args)?;
        Ok(config)
    }

    /// Override configuration values with CLI arguments where provided
    fn apply_args_to_config(config: &mut Config, args: &CliArgs) -> Result<()> {
        if let Some(name) = &args.format {
            config.display.format =
                OutputFormat::from_name(name).ok_or_else(|| ConfigError::InvalidValue {
                    field: "format".to_string(),
                    value: name.clone(),
                })?;
        }

        if args.no_color {
            config.display.color_output = false;
        }

        if let Some(path) = &args.catalog {
            config.catalog.path = Some(path.clone());
        }

        if args.very_verbose {
            config.logging.level = LogLevel::Trace;
        } else if args.verbose {
            config.logging.level = LogLevel::Debug;
        }

        Ok(())
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn args(&self) -> &CliArgs {
        &self.args
    }

    /// Build the completion engine over the configured catalog
    ///
    /// # Returns
    /// * `Result<CompletionEngine>` - Engine with the standard strategies
    pub fn build_engine(&self) -> Result<CompletionEngine> {
        let catalog = match &self.config.catalog.path {
            Some(path) => {
                info!("Loading catalog from {}", path.display());
                Catalog::load(path)?
            }
            None => Catalog::builtin()?,
        };
        debug!("Catalog has {} component(s)", catalog.len());

        CompletionEngine::standard(
            Lookups::from_catalog(catalog),
            self.config.completion.include_deprecated,
        )
    }

    fn formatter(&self) -> Formatter {
        Formatter::from_config(&self.config.display)
    }

    /// Render proposals for one definition
    ///
    /// # Arguments
    /// * `text` - Definition text
    /// * `detail` - Explicit proposal cap; falls back to the configured one
    pub fn render_proposals(&self, text: &str, detail: Option<usize>) -> Result<String> {
        let engine = self.build_engine()?;
        let detail_level = detail.unwrap_or(self.config.completion.max_proposals);
        let proposals = engine.complete(text, detail_level);
        self.formatter().format_proposals(&proposals)
    }

    /// Render the catalog listing
    pub fn render_catalog(&self) -> Result<String> {
        let engine = self.build_engine()?;
        let entries = CatalogEntry::collect(engine.lookups());
        self.formatter().format_catalog(&entries)
    }

    /// Run the requested subcommand, or the interactive shell when none is given
    pub fn run(&self) -> Result<()> {
        match &self.args.command {
            Some(Commands::Complete { text, detail }) => {
                println!("{}", self.render_proposals(text, *detail)?);
            }
            Some(Commands::Catalog) => {
                println!("{}", self.render_catalog()?);
            }
            Some(Commands::Completion { shell }) => {
                completion::generate_completion(shell)?;
            }
            Some(Commands::Repl) | None => self.run_repl()?,
        }
        Ok(())
    }

    fn run_repl(&self) -> Result<()> {
        let engine = Arc::new(self.build_engine()?);
        let detail_level = self.config.completion.max_proposals;
        let session = ReplSession::new(engine, self.formatter(), detail_level);
        ReplEngine::new(
            session,
            self.config.history.clone(),
            self.config.display.color_output,
            detail_level,
        )
        .run()
    }
}
