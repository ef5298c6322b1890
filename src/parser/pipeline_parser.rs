//! Checkpointing pipeline definition parser
//!
//! Recursive descent over the token stream produced by [`Lexer`]. Every time a
//! production is committed (a component name, a full `--key=value` option, a
//! pipe) the cursor is recorded as the new checkpoint. When a token cannot
//! extend the current production, parsing stops with a [`ParseFault`] whose
//! variant describes what was expected next.
//!
//! # Grammar
//!
//! ```text
//! definition   := componentUse (PIPE componentUse)*
//! componentUse := IDENTIFIER option*
//! option       := OPTION_MARKER IDENTIFIER (DOT IDENTIFIER)* EQUALS value
//! value        := IDENTIFIER (DOT IDENTIFIER)* | STRING_LITERAL
//! ```

use std::sync::Arc;

use super::definition::{ComponentUse, PartialDefinition};
use super::fault::{FaultVariant, ParseFault};
use super::lexer::{Lexer, Token, TokenKind};

type ParseResult<T> = std::result::Result<T, ParseFault>;

/// Pipeline definition parser
pub struct Parser {
    input: Arc<str>,
    tokens: Arc<[Token]>,
    pos: usize,
    checkpoint: usize,
    definition: PartialDefinition,
    /// Input is final: names touching the end of input are complete
    finished: bool,
}

impl Parser {
    /// Create a parser over already tokenized input
    ///
    /// # Arguments
    /// * `input` - Original text the tokens were produced from
    /// * `tokens` - Token stream; an `End` token is appended if missing
    pub fn new(input: &str, tokens: Vec<Token>) -> Self {
        let mut tokens = tokens;
        if !tokens.last().is_some_and(|t| t.is(TokenKind::End)) {
            let end = tokens.last().map_or(0, Token::end);
            tokens.push(Token::new(TokenKind::End, "", end..end));
        }

        Self {
            input: Arc::from(input),
            tokens: tokens.into(),
            pos: 0,
            checkpoint: 0,
            definition: PartialDefinition::new(),
            finished: false,
        }
    }

    /// Tokenize and parse a definition
    ///
    /// # Arguments
    /// * `input` - Definition text
    ///
    /// # Returns
    /// * `Result<PartialDefinition, ParseFault>` - Complete definition or the fault that stopped parsing
    pub fn parse(input: &str) -> ParseResult<PartialDefinition> {
        Self::new(input, Lexer::tokenize(input)).parse_definition()
    }

    /// Parse input as a finished definition
    ///
    /// A component name or option key touching the end of input counts as
    /// complete instead of possibly unfinished.
    pub fn parse_finished(input: &str) -> ParseResult<PartialDefinition> {
        let mut parser = Self::new(input, Lexer::tokenize(input));
        parser.finished = true;
        parser.parse_definition()
    }

    /// Parse the whole token stream
    pub fn parse_definition(mut self) -> ParseResult<PartialDefinition> {
        loop {
            self.parse_component_use()?;

            let kind = self.current().kind;
            match kind {
                TokenKind::End => return Ok(self.definition),
                TokenKind::Pipe => {
                    self.advance();
                    self.commit();
                    if self.current().is(TokenKind::End) {
                        return Err(self.fault(FaultVariant::TrailingPipe));
                    }
                }
                // parse_component_use only returns on '|' or end of input
                found => return Err(self.fault(FaultVariant::MissingSeparator { found })),
            }
        }
    }

    /// Parse a component name followed by its options
    fn parse_component_use(&mut self) -> ParseResult<()> {
        let name_token = self.current().clone();
        if !name_token.is(TokenKind::Identifier) {
            return Err(self.fault(FaultVariant::MissingComponent {
                found: name_token.kind,
            }));
        }
        self.advance();

        if self.at_end_adjacent_to(&name_token) {
            return Err(self.fault(FaultVariant::DanglingComponentName {
                fragment: name_token.value,
            }));
        }

        self.definition.push(ComponentUse::new(name_token.value));
        self.commit();

        loop {
            let kind = self.current().kind;
            match kind {
                TokenKind::OptionMarker => self.parse_option()?,
                TokenKind::Pipe | TokenKind::End => return Ok(()),
                TokenKind::Unknown
                    if self.current().raw == "-" && self.peek().is(TokenKind::End) =>
                {
                    return Err(self.fault(FaultVariant::UnfinishedOptionMarker));
                }
                found => return Err(self.fault(FaultVariant::MissingSeparator { found })),
            }
        }
    }

    /// Parse `--key.segments=value`
    fn parse_option(&mut self) -> ParseResult<()> {
        self.advance(); // '--'

        let mut key = match self.current().kind {
            TokenKind::Identifier => self.current().value.clone(),
            TokenKind::End => return Err(self.fault(FaultVariant::TrailingOptionMarker)),
            _ => {
                return Err(self.fault(FaultVariant::UnfinishedOptionName {
                    fragment: String::new(),
                }));
            }
        };
        let mut last_key_token = self.current().clone();
        self.advance();

        while self.current().is(TokenKind::Dot) {
            self.advance();
            key.push('.');
            if !self.current().is(TokenKind::Identifier) {
                return Err(self.fault(FaultVariant::UnfinishedOptionName { fragment: key }));
            }
            key.push_str(&self.current().value);
            last_key_token = self.current().clone();
            self.advance();
        }

        if self.at_end_adjacent_to(&last_key_token) {
            return Err(self.fault(FaultVariant::UnfinishedOptionName { fragment: key }));
        }

        if !self.current().is(TokenKind::Equals) {
            return Err(self.fault(FaultVariant::MissingOptionValue {
                option: key,
                after_equals: false,
            }));
        }
        self.advance();

        let value_kind = self.current().kind;
        let value = match value_kind {
            TokenKind::Identifier => self.parse_dotted_value(),
            TokenKind::StringLiteral => {
                let value = self.current().value.clone();
                self.advance();
                value
            }
            _ => {
                return Err(self.fault(FaultVariant::MissingOptionValue {
                    option: key,
                    after_equals: true,
                }));
            }
        };

        if let Some(component) = self.definition.last_mut() {
            component.options.insert(key, value);
        }
        self.commit();
        Ok(())
    }

    /// Parse `IDENTIFIER (DOT IDENTIFIER)*` as a single value
    fn parse_dotted_value(&mut self) -> String {
        let mut value = self.current().value.clone();
        self.advance();
        while self.current().is(TokenKind::Dot) && self.peek().is(TokenKind::Identifier) {
            self.advance();
            value.push('.');
            value.push_str(&self.current().value);
            self.advance();
        }
        value
    }

    /// Check whether input ends immediately after the given token
    fn at_end_adjacent_to(&self, token: &Token) -> bool {
        let current = self.current();
        !self.finished && current.is(TokenKind::End) && current.start() == token.end()
    }

    /// Record the cursor as the new checkpoint
    fn commit(&mut self) {
        self.checkpoint = self.pos;
    }

    fn fault(&self, variant: FaultVariant) -> ParseFault {
        ParseFault::new(
            Arc::clone(&self.input),
            Arc::clone(&self.tokens),
            self.checkpoint,
            self.definition.clone(),
            variant,
        )
    }

    /// Get the current token; the stream always ends with `End`
    fn current(&self) -> &Token {
        let last = self.tokens.len() - 1;
        &self.tokens[self.pos.min(last)]
    }

    /// Peek at the token after the current one
    fn peek(&self) -> &Token {
        let last = self.tokens.len() - 1;
        &self.tokens[(self.pos + 1).min(last)]
    }

    fn advance(&mut self) {
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
    }
}
