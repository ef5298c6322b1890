//! Pipeline definition lexer for error-tolerant tokenization
//!
//! This lexer handles definitions like `http | filter --expression=foo | log`.
//! It is extremely forgiving and never panics, making it ideal for autocomplete scenarios.
//!
//! # Design Principles
//!
//! - **Never panic** - always return a valid token stream
//! - **Never reject input** - unknown characters become `Unknown` tokens
//! - **Single terminator** - every stream ends with exactly one `End` token
//! - **Byte spans** - token spans index directly into the original `&str`

use std::fmt;
use std::ops::Range;

/// Token kinds of the pipeline definition language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Component name, option name segment or plain option value
    Identifier,
    /// Pipe symbol `|`
    Pipe,
    /// Option marker `--`
    OptionMarker,
    /// Dot separator inside dotted option names
    Dot,
    /// Equals sign between option name and value
    Equals,
    /// Quoted string literal
    StringLiteral,
    /// Any character the language does not know about
    Unknown,
    /// End of input
    End,
}

impl TokenKind {
    /// Canonical source text for punctuation kinds
    ///
    /// # Returns
    /// * `Option<&'static str>` - Fixed characters, or None for kinds whose text varies
    pub fn token_chars(self) -> Option<&'static str> {
        match self {
            TokenKind::Pipe => Some("|"),
            TokenKind::OptionMarker => Some("--"),
            TokenKind::Dot => Some("."),
            TokenKind::Equals => Some("="),
            _ => None,
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Identifier => write!(f, "identifier"),
            TokenKind::StringLiteral => write!(f, "string literal"),
            TokenKind::Unknown => write!(f, "unknown character"),
            TokenKind::End => write!(f, "end of input"),
            kind => write!(f, "'{}'", kind.token_chars().unwrap_or_default()),
        }
    }
}

/// Token with position information
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// Raw source text of the token
    pub raw: String,
    /// Decoded value for identifiers and string literals, empty otherwise
    pub value: String,
    /// Byte range in the original input
    pub span: Range<usize>,
}

impl Token {
    /// Create a new token
    pub fn new(kind: TokenKind, raw: impl Into<String>, span: Range<usize>) -> Self {
        Self {
            kind,
            raw: raw.into(),
            value: String::new(),
            span,
        }
    }

    /// Create a token carrying a decoded value
    pub fn with_value(
        kind: TokenKind,
        raw: impl Into<String>,
        value: impl Into<String>,
        span: Range<usize>,
    ) -> Self {
        Self {
            kind,
            raw: raw.into(),
            value: value.into(),
            span,
        }
    }

    /// Check whether this token has the given kind
    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    /// Whether this is a string literal that runs to the end of input
    /// without its closing quote
    pub fn is_unterminated_literal(&self) -> bool {
        if !self.is(TokenKind::StringLiteral) {
            return false;
        }
        let mut chars = self.raw.chars();
        let Some(quote) = chars.next() else {
            return false;
        };
        let Some(body) = chars.as_str().strip_suffix(quote) else {
            return true;
        };
        // An odd run of backslashes escapes the final quote
        body.chars().rev().take_while(|&c| c == '\\').count() % 2 == 1
    }

    /// Source start offset of the token
    pub fn start(&self) -> usize {
        self.span.start
    }

    /// Source end offset of the token
    pub fn end(&self) -> usize {
        self.span.end
    }
}

/// Pipeline definition lexer - error-tolerant tokenizer
pub struct Lexer<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer from input string
    pub fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    /// Tokenize the entire input
    ///
    /// # Arguments
    /// * `input` - Definition text, possibly incomplete
    ///
    /// # Returns
    /// * `Vec<Token>` - Tokens, always terminated by a single `End` token
    pub fn tokenize(input: &str) -> Vec<Token> {
        let mut lexer = Lexer::new(input);
        let mut tokens = Vec::new();

        loop {
            let token = lexer.next_token();
            let is_end = token.is(TokenKind::End);
            tokens.push(token);
            if is_end {
                break;
            }
        }

        tokens
    }

    /// Get the next token
    fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let start = self.pos;

        if self.is_at_end() {
            return Token::new(TokenKind::End, "", start..start);
        }

        let ch = self.current_char();

        match ch {
            '|' => self.single(TokenKind::Pipe, start),
            '.' => self.single(TokenKind::Dot, start),
            '=' => self.single(TokenKind::Equals, start),
            '-' if self.peek_char() == '-' => {
                self.advance();
                self.advance();
                Token::new(TokenKind::OptionMarker, "--", start..self.pos)
            }
            '\'' | '"' => self.scan_string(ch, start),
            c if Self::is_identifier_start(c) => self.scan_identifier(start),
            _ => self.single(TokenKind::Unknown, start),
        }
    }

    /// Consume one character as a token of the given kind
    fn single(&mut self, kind: TokenKind, start: usize) -> Token {
        self.advance();
        Token::new(kind, &self.input[start..self.pos], start..self.pos)
    }

    /// Scan a string literal, decoding backslash escapes
    fn scan_string(&mut self, quote: char, start: usize) -> Token {
        self.advance(); // Skip opening quote

        let mut value = String::new();

        while !self.is_at_end() && self.current_char() != quote {
            let ch = self.current_char();
            if ch == '\\' {
                self.advance();
                if self.is_at_end() {
                    value.push('\\');
                    break;
                }
                match self.current_char() {
                    'n' => value.push('\n'),
                    't' => value.push('\t'),
                    'r' => value.push('\r'),
                    '\\' => value.push('\\'),
                    '\'' => value.push('\''),
                    '"' => value.push('"'),
                    other => {
                        value.push('\\');
                        value.push(other);
                    }
                }
            } else {
                value.push(ch);
            }
            self.advance();
        }

        // Unterminated literals simply run to the end of input
        if !self.is_at_end() && self.current_char() == quote {
            self.advance();
        }

        Token::with_value(
            TokenKind::StringLiteral,
            &self.input[start..self.pos],
            value,
            start..self.pos,
        )
    }

    /// Scan an identifier
    fn scan_identifier(&mut self, start: usize) -> Token {
        while !self.is_at_end() && Self::is_identifier_part(self.current_char()) {
            self.advance();
        }

        let text = &self.input[start..self.pos];
        Token::with_value(TokenKind::Identifier, text, text, start..self.pos)
    }

    pub(crate) fn is_identifier_start(ch: char) -> bool {
        ch.is_alphanumeric() || ch == '_' || ch == '$'
    }

    pub(crate) fn is_identifier_part(ch: char) -> bool {
        Self::is_identifier_start(ch) || ch == '-'
    }

    /// Skip whitespace characters
    fn skip_whitespace(&mut self) {
        while !self.is_at_end() && self.current_char().is_whitespace() {
            self.advance();
        }
    }

    /// Get current character
    fn current_char(&self) -> char {
        self.input[self.pos..].chars().next().unwrap_or('\0')
    }

    /// Peek at next character
    fn peek_char(&self) -> char {
        let mut chars = self.input[self.pos..].chars();
        chars.next();
        chars.next().unwrap_or('\0')
    }

    /// Advance position by one character
    fn advance(&mut self) {
        if let Some(ch) = self.input[self.pos..].chars().next() {
            self.pos += ch.len_utf8();
        }
    }

    /// Check if at end of input
    fn is_at_end(&self) -> bool {
        self.pos >= self.input.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        Lexer::tokenize(input).iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_tokenize_simple_pipeline() {
        use TokenKind::*;
        assert_eq!(
            kinds("http | log"),
            vec![Identifier, Pipe, Identifier, End]
        );
    }

    #[test]
    fn test_tokenize_dotted_option() {
        use TokenKind::*;
        let tokens = Lexer::tokenize("http --format.type=text");
        assert_eq!(
            tokens.iter().map(|t| t.kind).collect::<Vec<_>>(),
            vec![Identifier, OptionMarker, Identifier, Dot, Identifier, Equals, Identifier, End]
        );
        assert_eq!(tokens[2].value, "format");
        assert_eq!(tokens[4].value, "type");
        assert_eq!(tokens[6].value, "text");
    }

    #[test]
    fn test_tokenize_empty_input() {
        let tokens = Lexer::tokenize("");
        assert_eq!(tokens.len(), 1);
        assert!(tokens[0].is(TokenKind::End));
        assert_eq!(tokens[0].span, 0..0);
    }

    #[test]
    fn test_whitespace_counts_towards_offsets() {
        let tokens = Lexer::tokenize("  http   |  ");
        assert_eq!(tokens[0].span, 2..6);
        assert_eq!(tokens[1].span, 9..10);
        // End sits at the very end of input, after trailing whitespace
        assert_eq!(tokens[2].span, 12..12);
    }

    #[test]
    fn test_lone_dash_is_unknown() {
        let tokens = Lexer::tokenize("http -");
        assert!(tokens[1].is(TokenKind::Unknown));
        assert_eq!(tokens[1].raw, "-");
    }

    #[test]
    fn test_dash_inside_identifier() {
        let tokens = Lexer::tokenize("http-source --a-b=1");
        assert_eq!(tokens[0].value, "http-source");
        assert_eq!(tokens[2].value, "a-b");
        assert_eq!(tokens[4].value, "1");
    }

    #[test]
    fn test_string_literal_with_escapes() {
        let tokens = Lexer::tokenize(r#"filter --expression='it\'s here'"#);
        let literal = &tokens[4];
        assert!(literal.is(TokenKind::StringLiteral));
        assert_eq!(literal.value, "it's here");
        assert_eq!(literal.raw, r#"'it\'s here'"#);
    }

    #[test]
    fn test_unterminated_string_runs_to_end() {
        let tokens = Lexer::tokenize("log --level=\"DEB");
        let literal = &tokens[4];
        assert!(literal.is(TokenKind::StringLiteral));
        assert_eq!(literal.value, "DEB");
        assert!(tokens[5].is(TokenKind::End));
    }

    #[test]
    fn test_unterminated_literal_detection() {
        let last = |input: &str| Lexer::tokenize(input).into_iter().rev().nth(1).unwrap();
        assert!(last("log --level=\"DEB").is_unterminated_literal());
        assert!(last("http --path-pattern='").is_unterminated_literal());
        assert!(last(r"http --path-pattern='a\'").is_unterminated_literal());
        assert!(!last(r"http --path-pattern='a\\'").is_unterminated_literal());
        assert!(!last("http --path-pattern='/'").is_unterminated_literal());
        assert!(!last("http --port=8080").is_unterminated_literal());
    }

    #[test]
    fn test_unknown_chars_never_fail() {
        let tokens = Lexer::tokenize("http @ #");
        assert!(tokens[1].is(TokenKind::Unknown));
        assert_eq!(tokens[1].raw, "@");
        assert!(tokens[2].is(TokenKind::Unknown));
        assert!(tokens.last().is_some_and(|t| t.is(TokenKind::End)));
    }

    #[test]
    fn test_multibyte_offsets() {
        let tokens = Lexer::tokenize("héllo | x");
        assert_eq!(tokens[0].value, "héllo");
        assert_eq!(tokens[0].span, 0..6);
        assert_eq!(tokens[1].span, 7..8);
    }

    #[test]
    fn test_token_kind_display() {
        assert_eq!(TokenKind::Pipe.to_string(), "'|'");
        assert_eq!(TokenKind::End.to_string(), "end of input");
    }
}
