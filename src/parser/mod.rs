//! Fault-tolerant parser for pipeline definitions
//!
//! This module turns possibly incomplete definition text into either a
//! [`PartialDefinition`] or a [`ParseFault`] describing exactly how far parsing
//! got and what was expected next.
//!
//! # Architecture
//!
//! - `lexer`: Error-tolerant tokenizer, never fails
//! - `definition`: Components and options committed by the parser
//! - `fault`: Closed taxonomy of parse faults plus the checkpoint data
//! - `pipeline_parser`: Checkpointing recursive descent parser
//!
//! # Examples
//!
//! ```
//! use pipeline_complete::parser::{FaultKind, Parser};
//!
//! let definition = Parser::parse_finished("http --port=8080 | log").unwrap();
//! assert_eq!(definition.len(), 2);
//!
//! let fault = Parser::parse("http | fil").unwrap_err();
//! assert_eq!(fault.kind(), FaultKind::DanglingComponentName);
//! assert_eq!(fault.safe_prefix(), "http |");
//! ```

mod definition;
mod fault;
mod lexer;
mod pipeline_parser;

// Re-export public API
pub use definition::{ComponentUse, PartialDefinition};
pub use fault::{FaultKind, FaultVariant, ParseFault};
pub use lexer::{Lexer, Token, TokenKind};
pub use pipeline_parser::Parser;
