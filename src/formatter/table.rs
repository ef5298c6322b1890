//! Table formatting for proposals and catalog listings using tabled

use tabled::{
    Table,
    builder::Builder,
    settings::{Alignment, Color, Modify, Style, object::Columns, object::Rows, width::Width},
};

use super::CatalogEntry;
use crate::completion::CompletionProposal;

/// Maximum width for a single column (characters)
const DEFAULT_MAX_COLUMN_WIDTH: usize = 60;

/// Table formatter
pub struct TableFormatter {
    /// Maximum column width
    max_column_width: usize,

    /// Enable colored output
    use_colors: bool,
}

impl TableFormatter {
    /// Create a new table formatter with default settings
    pub fn new() -> Self {
        Self::with_colors(false)
    }

    /// Create a new table formatter with color support
    ///
    /// # Arguments
    /// * `use_colors` - Enable colored header row
    pub fn with_colors(use_colors: bool) -> Self {
        Self {
            max_column_width: DEFAULT_MAX_COLUMN_WIDTH,
            use_colors,
        }
    }

    /// Set maximum column width
    pub fn with_max_column_width(mut self, width: usize) -> Self {
        self.max_column_width = width;
        self
    }

    /// Format proposals as a numbered table
    pub fn format_proposals(&self, proposals: &[CompletionProposal]) -> String {
        if proposals.is_empty() {
            return "(no proposals)".to_string();
        }

        let mut builder = Builder::default();
        builder.push_record(["#", "proposal", "explanation"]);
        for (index, proposal) in proposals.iter().enumerate() {
            builder.push_record([
                (index + 1).to_string(),
                proposal.text.clone(),
                proposal.explanation.clone(),
            ]);
        }

        self.finish(builder.build(), 3)
    }

    /// Format a catalog as one row per option
    pub fn format_catalog(&self, entries: &[CatalogEntry]) -> String {
        if entries.is_empty() {
            return "(empty catalog)".to_string();
        }

        let mut builder = Builder::default();
        builder.push_record(["component", "category", "option", "default", "description"]);
        for entry in entries {
            let name = entry.component.name.clone();
            let category = entry.component.category.to_string();
            if entry.options.is_empty() {
                builder.push_record([name, category, String::new(), String::new(), String::new()]);
                continue;
            }
            for option in &entry.options {
                let mut description = option.description.clone();
                if option.deprecated {
                    description.push_str(" (deprecated)");
                }
                builder.push_record([
                    name.clone(),
                    category.clone(),
                    option.id.clone(),
                    option.default_value.clone().unwrap_or_default(),
                    description,
                ]);
            }
        }

        self.finish(builder.build(), 5)
    }

    fn finish(&self, mut table: Table, columns: usize) -> String {
        table.with(Style::rounded());

        for i in 0..columns {
            table.with(Modify::new(Columns::new(i..=i)).with(Width::wrap(self.max_column_width)));
        }

        table.with(Modify::new(Rows::first()).with(Alignment::center()));

        if self.use_colors {
            table.modify(Rows::first(), Color::FG_CYAN | Color::BOLD);
        }

        table.to_string()
    }
}

impl Default for TableFormatter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::{Catalog, Lookups};

    #[test]
    fn test_proposal_table_has_rows() {
        let proposals = vec![
            CompletionProposal::new("http | filter", "processor component"),
            CompletionProposal::new("http | log", "sink component"),
        ];
        let output = TableFormatter::new().format_proposals(&proposals);
        assert!(output.contains("http | filter"));
        assert!(output.contains("sink component"));
        assert!(output.contains("explanation"));
        assert!(output.starts_with('╭'));
    }

    #[test]
    fn test_empty_tables() {
        assert_eq!(TableFormatter::new().format_proposals(&[]), "(no proposals)");
        assert_eq!(TableFormatter::new().format_catalog(&[]), "(empty catalog)");
    }

    #[test]
    fn test_catalog_table_marks_deprecated() {
        let lookups = Lookups::from_catalog(Catalog::builtin().unwrap());
        let entries = CatalogEntry::collect(&lookups);
        let output = TableFormatter::new()
            .with_max_column_width(80)
            .format_catalog(&entries);
        assert!(output.contains("(deprecated)"));
        assert!(output.contains("task-launcher"));
    }
}
