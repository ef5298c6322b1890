//! Syntax highlighter for pipeline definitions
//!
//! Tokens come from the same lexer the parser uses, so highlighting never
//! disagrees with what the completion engine sees. Each token is styled by
//! its role: component name, option name, option value or punctuation.
//! Characters the language does not know about are shown in red.

use nu_ansi_term::{Color, Style};
use reedline::{Highlighter, StyledText};

use crate::parser::{Lexer, Token, TokenKind};

/// Role of the next identifier, driven by the preceding tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Position {
    Component,
    OptionName,
    OptionValue,
    /// After a value segment, where only a dot continues the value
    AfterValue,
    AfterComponent,
}

/// Highlighter for the completion shell
pub struct PipelineHighlighter {
    enabled: bool,
}

impl PipelineHighlighter {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    fn style_for(token: &Token, position: Position) -> Style {
        match token.kind {
            TokenKind::Pipe => Color::Magenta.bold(),
            TokenKind::OptionMarker | TokenKind::Dot => Color::Yellow.normal(),
            TokenKind::Equals => Style::new().fg(Color::DarkGray),
            TokenKind::StringLiteral => Color::Green.normal(),
            TokenKind::Unknown => Color::Red.bold(),
            TokenKind::Identifier => match position {
                Position::Component => Color::Cyan.bold(),
                Position::OptionName => Color::Yellow.normal(),
                Position::OptionValue => Color::Green.normal(),
                Position::AfterValue | Position::AfterComponent => Color::Red.normal(),
            },
            TokenKind::End => Style::default(),
        }
    }

    fn advance(token: &Token, position: Position) -> Position {
        match token.kind {
            TokenKind::Pipe => Position::Component,
            TokenKind::OptionMarker => Position::OptionName,
            TokenKind::Equals => Position::OptionValue,
            TokenKind::Dot if position == Position::OptionName => Position::OptionName,
            TokenKind::Identifier if position == Position::OptionName => Position::OptionName,
            TokenKind::Identifier if position == Position::OptionValue => Position::AfterValue,
            TokenKind::Dot if position == Position::AfterValue => Position::OptionValue,
            _ => Position::AfterComponent,
        }
    }
}

impl Default for PipelineHighlighter {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Highlighter for PipelineHighlighter {
    fn highlight(&self, line: &str, _cursor: usize) -> StyledText {
        let mut styled = StyledText::new();
        if !self.enabled {
            styled.push((Style::default(), line.to_string()));
            return styled;
        }

        let mut position = Position::Component;
        let mut written = 0;

        for token in Lexer::tokenize(line) {
            if token.is(TokenKind::End) {
                break;
            }
            if token.start() > written {
                styled.push((Style::default(), line[written..token.start()].to_string()));
            }
            styled.push((
                Self::style_for(&token, position),
                line[token.span.clone()].to_string(),
            ));
            written = token.end();
            position = Self::advance(&token, position);
        }

        if written < line.len() {
            styled.push((Style::default(), line[written..].to_string()));
        }

        styled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(styled: &StyledText) -> String {
        styled.buffer.iter().map(|(_, text)| text.as_str()).collect()
    }

    fn style_of(styled: &StyledText, text: &str) -> Style {
        styled
            .buffer
            .iter()
            .find(|(_, t)| t == text)
            .map(|(style, _)| *style)
            .unwrap()
    }

    #[test]
    fn test_text_preserved() {
        let line = "http  --format.type='a b' |  log @";
        let styled = PipelineHighlighter::default().highlight(line, line.len());
        assert_eq!(rendered(&styled), line);
    }

    #[test]
    fn test_roles() {
        let line = "http --port=8080 | log";
        let styled = PipelineHighlighter::default().highlight(line, 0);
        assert_eq!(style_of(&styled, "http"), Color::Cyan.bold());
        assert_eq!(style_of(&styled, "port"), Color::Yellow.normal());
        assert_eq!(style_of(&styled, "8080"), Color::Green.normal());
        assert_eq!(style_of(&styled, "|"), Color::Magenta.bold());
        assert_eq!(style_of(&styled, "log"), Color::Cyan.bold());
    }

    #[test]
    fn test_dotted_option_name() {
        let styled = PipelineHighlighter::default().highlight("http --format.type", 0);
        assert_eq!(style_of(&styled, "format"), Color::Yellow.normal());
        assert_eq!(style_of(&styled, "type"), Color::Yellow.normal());
    }

    #[test]
    fn test_dotted_value() {
        let styled = PipelineHighlighter::default().highlight("http --format.type=com.example", 0);
        assert_eq!(style_of(&styled, "com"), Color::Green.normal());
        assert_eq!(style_of(&styled, "example"), Color::Green.normal());
    }

    #[test]
    fn test_identifier_after_value_is_red() {
        let styled = PipelineHighlighter::default().highlight("http --port=8080 extra", 0);
        assert_eq!(style_of(&styled, "8080"), Color::Green.normal());
        assert_eq!(style_of(&styled, "extra"), Color::Red.normal());
    }

    #[test]
    fn test_unknown_characters_red() {
        let styled = PipelineHighlighter::default().highlight("http @", 0);
        assert_eq!(style_of(&styled, "@"), Color::Red.bold());
    }

    #[test]
    fn test_disabled_is_plain() {
        let styled = PipelineHighlighter::new(false).highlight("http | log", 0);
        assert_eq!(styled.buffer.len(), 1);
        assert_eq!(styled.buffer[0].0, Style::default());
    }
}
