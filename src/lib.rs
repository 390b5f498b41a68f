//! Lexical front end of the treko scripting language.
//!
//! [`scan`] turns source text into a `Vec<Token>` ending with a single
//! `Eof` token. Lexical errors go to a caller-supplied [`Reporter`] and never
//! stop the scan.

pub mod diagnostics;
pub mod keyword;
pub mod lexer;
pub mod token;

pub use diagnostics::{Diagnostic, Diagnostics, Reporter};
pub use lexer::{scan, Lexer, LexerError};
pub use token::{LiteralValue, Token, TokenType};
