//! Prompt for the completion shell

use std::borrow::Cow;

use reedline::{Prompt, PromptEditMode, PromptHistorySearch, PromptHistorySearchStatus};

/// Prompt showing a label and how many lines have been checked
pub struct PipelinePrompt {
    label: String,
    checked: usize,
}

impl PipelinePrompt {
    /// Create a new prompt
    ///
    /// # Arguments
    /// * `label` - Text shown before the indicator
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            checked: 0,
        }
    }

    /// Count one more checked definition
    pub fn record_check(&mut self) {
        self.checked += 1;
    }

    pub fn checked(&self) -> usize {
        self.checked
    }
}

impl Default for PipelinePrompt {
    fn default() -> Self {
        Self::new("pipeline")
    }
}

impl Prompt for PipelinePrompt {
    fn render_prompt_left(&self) -> Cow<'_, str> {
        if self.checked == 0 {
            format!("{}> ", self.label).into()
        } else {
            format!("{} [{}]> ", self.label, self.checked).into()
        }
    }

    fn render_prompt_right(&self) -> Cow<'_, str> {
        "".into()
    }

    fn render_prompt_indicator(&self, _prompt_mode: PromptEditMode) -> Cow<'_, str> {
        "".into()
    }

    fn render_prompt_multiline_indicator(&self) -> Cow<'_, str> {
        "... ".into()
    }

    fn render_prompt_history_search_indicator(
        &self,
        history_search: PromptHistorySearch,
    ) -> Cow<'_, str> {
        let prefix = match history_search.status {
            PromptHistorySearchStatus::Passing => "",
            PromptHistorySearchStatus::Failing => "failing ",
        };

        format!("({}reverse-search: {}) ", prefix, history_search.term).into()
    }
}
