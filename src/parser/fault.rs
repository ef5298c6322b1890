//! Parse faults raised by the checkpointing parser
//!
//! A fault is not an error for the caller: it is the signal that drives
//! completion. Each variant is named after what the parser expected next when
//! it stopped, so recovery strategies never re-derive intent from raw tokens.

use std::fmt;
use std::sync::Arc;

use super::definition::PartialDefinition;
use super::lexer::{Token, TokenKind};

/// Fieldless tag of a fault variant, used in strategy shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaultKind {
    MissingComponent,
    TrailingPipe,
    DanglingComponentName,
    MissingSeparator,
    UnfinishedOptionMarker,
    TrailingOptionMarker,
    UnfinishedOptionName,
    MissingOptionValue,
}

impl FaultKind {
    /// Token kind that always ends the token stream for this fault
    ///
    /// Faults raised because input ran out right after a specific token have a
    /// fixed terminal kind; a fingerprint declared for them must end with it.
    ///
    /// # Returns
    /// * `Option<TokenKind>` - The terminal kind, or None when any tail is possible
    pub fn terminal_kind(self) -> Option<TokenKind> {
        match self {
            FaultKind::TrailingPipe => Some(TokenKind::Pipe),
            FaultKind::TrailingOptionMarker => Some(TokenKind::OptionMarker),
            FaultKind::DanglingComponentName => Some(TokenKind::Identifier),
            FaultKind::UnfinishedOptionMarker => Some(TokenKind::Unknown),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            FaultKind::MissingComponent => "missing-component",
            FaultKind::TrailingPipe => "trailing-pipe",
            FaultKind::DanglingComponentName => "dangling-component-name",
            FaultKind::MissingSeparator => "missing-separator",
            FaultKind::UnfinishedOptionMarker => "unfinished-option-marker",
            FaultKind::TrailingOptionMarker => "trailing-option-marker",
            FaultKind::UnfinishedOptionName => "unfinished-option-name",
            FaultKind::MissingOptionValue => "missing-option-value",
        }
    }
}

impl fmt::Display for FaultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What the parser expected when it stopped, with variant-specific details
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FaultVariant {
    /// Expected a component name at the start or after a pipe
    MissingComponent { found: TokenKind },

    /// Input ended right after a pipe
    TrailingPipe,

    /// Input ended directly after a component name that may still be typed
    DanglingComponentName { fragment: String },

    /// Expected an option marker, a pipe or the end after a component
    MissingSeparator { found: TokenKind },

    /// Input ended on a single `-`
    UnfinishedOptionMarker,

    /// Input ended right after `--`
    TrailingOptionMarker,

    /// Option name is incomplete; `fragment` is what was typed after `--`
    UnfinishedOptionName { fragment: String },

    /// Option name is complete but `=` or the value is missing
    MissingOptionValue { option: String, after_equals: bool },
}

impl FaultVariant {
    pub fn kind(&self) -> FaultKind {
        match self {
            FaultVariant::MissingComponent { .. } => FaultKind::MissingComponent,
            FaultVariant::TrailingPipe => FaultKind::TrailingPipe,
            FaultVariant::DanglingComponentName { .. } => FaultKind::DanglingComponentName,
            FaultVariant::MissingSeparator { .. } => FaultKind::MissingSeparator,
            FaultVariant::UnfinishedOptionMarker => FaultKind::UnfinishedOptionMarker,
            FaultVariant::TrailingOptionMarker => FaultKind::TrailingOptionMarker,
            FaultVariant::UnfinishedOptionName { .. } => FaultKind::UnfinishedOptionName,
            FaultVariant::MissingOptionValue { .. } => FaultKind::MissingOptionValue,
        }
    }
}

/// Structured description of how far parsing got before it failed
#[derive(Debug, Clone)]
pub struct ParseFault {
    input: Arc<str>,
    tokens: Arc<[Token]>,
    checkpoint: usize,
    definition: PartialDefinition,
    variant: FaultVariant,
}

impl ParseFault {
    pub(crate) fn new(
        input: Arc<str>,
        tokens: Arc<[Token]>,
        checkpoint: usize,
        definition: PartialDefinition,
        variant: FaultVariant,
    ) -> Self {
        debug_assert!(checkpoint <= tokens.len());
        Self {
            input,
            tokens,
            checkpoint,
            definition,
            variant,
        }
    }

    pub fn kind(&self) -> FaultKind {
        self.variant.kind()
    }

    pub fn variant(&self) -> &FaultVariant {
        &self.variant
    }

    /// Original input text
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Full token sequence, including the trailing `End`
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Number of tokens committed before the fault
    pub fn checkpoint(&self) -> usize {
        self.checkpoint
    }

    /// Components committed before the fault
    pub fn definition(&self) -> &PartialDefinition {
        &self.definition
    }

    /// Source offset of the checkpoint: end of the last committed token
    pub fn checkpoint_offset(&self) -> usize {
        match self.checkpoint {
            0 => 0,
            n => self.tokens[n - 1].end(),
        }
    }

    /// Input text up to the checkpoint, guaranteed to be valid so far
    pub fn safe_prefix(&self) -> &str {
        &self.input[..self.checkpoint_offset()]
    }

    /// Token kinds without the terminating `End`
    pub fn significant_kinds(&self) -> impl DoubleEndedIterator<Item = TokenKind> + '_ {
        self.tokens
            .iter()
            .map(|t| t.kind)
            .filter(|kind| *kind != TokenKind::End)
    }

    /// Check whether the token stream ends with the given kind pattern
    ///
    /// # Arguments
    /// * `pattern` - Trailing token kinds to compare, oldest first
    ///
    /// # Returns
    /// * `bool` - True if the last `pattern.len()` significant kinds equal the pattern
    pub fn ends_with(&self, pattern: &[TokenKind]) -> bool {
        let tail: Vec<TokenKind> = self.significant_kinds().rev().take(pattern.len()).collect();
        tail.len() == pattern.len() && tail.iter().rev().eq(pattern.iter())
    }

    /// Check whether another fault is the same fault at the same place
    pub fn is_same_fault(&self, other: &ParseFault) -> bool {
        self.checkpoint == other.checkpoint && self.variant == other.variant
    }
}

impl fmt::Display for ParseFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let offset = self.checkpoint_offset();
        match &self.variant {
            FaultVariant::MissingComponent { found } => {
                write!(f, "Expected component name at {offset}, found {found}")
            }
            FaultVariant::TrailingPipe => write!(f, "Expected component name after '|'"),
            FaultVariant::DanglingComponentName { fragment } => {
                write!(f, "Component name '{fragment}' may be incomplete")
            }
            FaultVariant::MissingSeparator { found } => {
                write!(f, "Expected '--', '|' or end of input at {offset}, found {found}")
            }
            FaultVariant::UnfinishedOptionMarker => write!(f, "Expected '--' to start an option"),
            FaultVariant::TrailingOptionMarker => write!(f, "Expected option name after '--'"),
            FaultVariant::UnfinishedOptionName { fragment } => {
                write!(f, "Option name '{fragment}' is incomplete")
            }
            FaultVariant::MissingOptionValue {
                option,
                after_equals: true,
            } => write!(f, "Expected value for option '{option}'"),
            FaultVariant::MissingOptionValue { option, .. } => {
                write!(f, "Expected '=' after option '{option}'")
            }
        }
    }
}

impl std::error::Error for ParseFault {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Lexer;

    fn fault(input: &str, checkpoint: usize, variant: FaultVariant) -> ParseFault {
        let tokens: Arc<[Token]> = Lexer::tokenize(input).into();
        ParseFault::new(
            Arc::from(input),
            tokens,
            checkpoint,
            PartialDefinition::new(),
            variant,
        )
    }

    #[test]
    fn test_safe_prefix_ends_at_last_committed_token() {
        let f = fault("http |   ", 2, FaultVariant::TrailingPipe);
        assert_eq!(f.checkpoint_offset(), 6);
        assert_eq!(f.safe_prefix(), "http |");
    }

    #[test]
    fn test_safe_prefix_empty_at_start() {
        let f = fault(
            "  fil",
            0,
            FaultVariant::DanglingComponentName {
                fragment: "fil".to_string(),
            },
        );
        assert_eq!(f.safe_prefix(), "");
    }

    #[test]
    fn test_ends_with_ignores_end_token() {
        use TokenKind::*;
        let f = fault(
            "http --format.",
            1,
            FaultVariant::UnfinishedOptionName {
                fragment: "format.".to_string(),
            },
        );
        assert!(f.ends_with(&[Dot]));
        assert!(f.ends_with(&[Identifier, Dot]));
        assert!(f.ends_with(&[]));
        assert!(!f.ends_with(&[Identifier]));
        assert!(!f.ends_with(&[End]));
    }

    #[test]
    fn test_ends_with_longer_than_stream() {
        let f = fault("|", 1, FaultVariant::TrailingPipe);
        assert!(f.ends_with(&[TokenKind::Pipe]));
        assert!(!f.ends_with(&[TokenKind::Identifier, TokenKind::Pipe]));
    }

    #[test]
    fn test_same_fault_compares_fields() {
        let a = fault(
            "http --for",
            1,
            FaultVariant::UnfinishedOptionName {
                fragment: "for".to_string(),
            },
        );
        let b = fault(
            "http --format.",
            1,
            FaultVariant::UnfinishedOptionName {
                fragment: "format.".to_string(),
            },
        );
        assert_eq!(a.kind(), b.kind());
        assert!(!a.is_same_fault(&b));
        assert!(a.is_same_fault(&a.clone()));
    }

    #[test]
    fn test_terminal_kinds() {
        assert_eq!(FaultKind::TrailingPipe.terminal_kind(), Some(TokenKind::Pipe));
        assert_eq!(FaultKind::MissingComponent.terminal_kind(), None);
    }

    #[test]
    fn test_display_messages() {
        let f = fault(
            "http --format.type=",
            1,
            FaultVariant::MissingOptionValue {
                option: "format.type".to_string(),
                after_equals: true,
            },
        );
        assert_eq!(f.to_string(), "Expected value for option 'format.type'");
    }
}
