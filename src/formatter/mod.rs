//! Output formatting for completion results
//!
//! This module renders proposals and catalog listings in the configured
//! output format:
//! - Text with optional ANSI colors
//! - Pretty-printed JSON
//! - Tables built with tabled

mod table;

pub use table::TableFormatter;

use nu_ansi_term::{Color, Style};
use serde::Serialize;

use crate::completion::CompletionProposal;
use crate::config::{DisplayConfig, OutputFormat};
use crate::error::Result;
use crate::metadata::{ComponentDescriptor, Lookups, OptionDescriptor};

/// A component together with every option it accepts
#[derive(Debug, Clone, Serialize)]
pub struct CatalogEntry {
    #[serde(flatten)]
    pub component: ComponentDescriptor,
    pub options: Vec<OptionDescriptor>,
}

impl CatalogEntry {
    /// Collect every registered component with its options
    pub fn collect(lookups: &Lookups) -> Vec<CatalogEntry> {
        lookups
            .registry()
            .components()
            .into_iter()
            .map(|component| CatalogEntry {
                options: lookups
                    .option_groups(&component)
                    .into_iter()
                    .flat_map(|group| group.options)
                    .collect(),
                component,
            })
            .collect()
    }
}

/// Main formatter for completion output
pub struct Formatter {
    /// Output format type
    format_type: OutputFormat,

    /// Enable colored output
    use_colors: bool,
}

impl Formatter {
    /// Create a new formatter
    ///
    /// # Arguments
    /// * `format_type` - Output format type
    /// * `use_colors` - Enable colored output
    pub fn new(format_type: OutputFormat, use_colors: bool) -> Self {
        Self {
            format_type,
            use_colors,
        }
    }

    /// Create a formatter from display configuration
    pub fn from_config(config: &DisplayConfig) -> Self {
        Self::new(config.format, config.color_output)
    }

    /// Format completion proposals
    ///
    /// # Arguments
    /// * `proposals` - Proposals in engine order
    ///
    /// # Returns
    /// * `Result<String>` - Formatted output or error
    pub fn format_proposals(&self, proposals: &[CompletionProposal]) -> Result<String> {
        match self.format_type {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(proposals)?),
            OutputFormat::Table => {
                Ok(TableFormatter::with_colors(self.use_colors).format_proposals(proposals))
            }
            OutputFormat::Text => Ok(self.format_proposals_text(proposals)),
        }
    }

    /// Format a catalog listing
    ///
    /// # Arguments
    /// * `entries` - Components with their options
    ///
    /// # Returns
    /// * `Result<String>` - Formatted output or error
    pub fn format_catalog(&self, entries: &[CatalogEntry]) -> Result<String> {
        match self.format_type {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(entries)?),
            OutputFormat::Table => {
                Ok(TableFormatter::with_colors(self.use_colors).format_catalog(entries))
            }
            OutputFormat::Text => Ok(self.format_catalog_text(entries)),
        }
    }

    /// Format an error or fault message
    pub fn format_error(&self, message: &str) -> String {
        self.paint(Color::Red.bold(), message)
    }

    fn format_proposals_text(&self, proposals: &[CompletionProposal]) -> String {
        if proposals.is_empty() {
            return self.paint(Style::new().dimmed(), "(no proposals)");
        }

        let width = proposals
            .iter()
            .map(|p| p.text.chars().count())
            .max()
            .unwrap_or(0);

        proposals
            .iter()
            .map(|p| {
                let padded = format!("{:<width$}", p.text);
                if p.explanation.is_empty() {
                    self.paint(Style::new().bold(), p.text.as_str())
                } else {
                    format!(
                        "{}  {}",
                        self.paint(Style::new().bold(), &padded),
                        self.paint(Style::new().fg(Color::DarkGray), &p.explanation)
                    )
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn format_catalog_text(&self, entries: &[CatalogEntry]) -> String {
        let mut out = Vec::new();
        for entry in entries {
            out.push(format!(
                "{} {}",
                self.paint(Color::Cyan.bold(), &entry.component.name),
                self.paint(
                    Style::new().fg(Color::DarkGray),
                    &format!("({})", entry.component.category)
                )
            ));
            for option in &entry.options {
                let mut line = format!("  --{}", option.id);
                if let Some(default) = &option.default_value {
                    line.push_str(&format!("={default}"));
                }
                if option.deprecated {
                    line.push_str(" [deprecated]");
                }
                if !option.description.is_empty() {
                    line.push_str(&format!("  {}", option.description));
                }
                out.push(line);
            }
        }
        out.join("\n")
    }

    fn paint(&self, style: Style, text: &str) -> String {
        if self.use_colors {
            style.paint(text).to_string()
        } else {
            text.to_string()
        }
    }
}
