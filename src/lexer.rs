use std::fmt;

use crate::diagnostics::Reporter;
use crate::keyword;
use crate::token::{LiteralValue, Token, TokenType};

#[derive(Debug, PartialEq)]
pub enum LexerError {
    UnexpectedCharacter { line: u32, character: char },
    UnterminatedString { line: u32 },
    /// Never produced by the number grammar; stands in for a panic on decode.
    MalformedNumber { line: u32, lexeme: String },
}

impl LexerError {
    pub fn line(&self) -> u32 {
        match self {
            LexerError::UnexpectedCharacter { line, .. }
            | LexerError::UnterminatedString { line }
            | LexerError::MalformedNumber { line, .. } => *line,
        }
    }
}

impl fmt::Display for LexerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexerError::UnexpectedCharacter { character, .. } => {
                write!(f, "Unexpected character '{}'.", character.escape_debug())
            }
            LexerError::UnterminatedString { .. } => write!(f, "Unterminated string."),
            LexerError::MalformedNumber { lexeme, .. } => write!(f, "Malformed number '{}'.", lexeme),
        }
    }
}

/// Scans `source` to completion. Malformed input is handed to `reporter` and
/// produces no token; the result always ends with a single `Eof` token.
pub fn scan<R: Reporter + ?Sized>(source: &str, reporter: &mut R) -> Vec<Token> {
    Lexer::new(source).scan_tokens(reporter)
}

pub struct Lexer<'a> {
    source: &'a str,
    tokens: Vec<Token>,
    start: usize,
    current: usize,
    line: u32,
    start_line: u32,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Lexer<'a> {
        Lexer {
            source,
            tokens: Vec::new(),
            start: 0,
            current: 0,
            line: 1,
            start_line: 1,
        }
    }

    pub fn scan_tokens<R: Reporter + ?Sized>(mut self, reporter: &mut R) -> Vec<Token> {
        while !self.is_at_end() {
            self.start = self.current;
            self.start_line = self.line;

            if let Err(err) = self.scan_token() {
                reporter.report(err.line(), &err.to_string());
            }
        }

        self.tokens.push(Token::eof(self.line));
        self.tokens
    }

    fn scan_token(&mut self) -> Result<(), LexerError> {
        let Some(c) = self.advance() else {
            return Ok(());
        };

        match c {
            // Single-character
            '(' => self.add_token(TokenType::LeftParenthesis),
            ')' => self.add_token(TokenType::RightParenthesis),
            '{' => self.add_token(TokenType::LeftBrace),
            '}' => self.add_token(TokenType::RightBrace),
            ',' => self.add_token(TokenType::Comma),
            '.' => self.add_token(TokenType::Dot),
            ';' => self.add_token(TokenType::Semicolon),
            ':' => self.add_token(TokenType::Colon),
            '-' => self.add_token(TokenType::Minus),
            '+' => self.add_token(TokenType::Plus),
            '*' => self.add_token(TokenType::Star),
            '/' => {
                if self.match_char('/') {
                    // Line comment, the newline is left for the next iteration
                    while let Some(c) = self.peek() {
                        if c == '\n' {
                            break;
                        }
                        self.advance();
                    }
                } else {
                    self.add_token(TokenType::Slash);
                }
            }

            // One or two character tokens
            '!' => {
                let token_type = if self.match_char('=') { TokenType::BangEqual } else { TokenType::Bang };
                self.add_token(token_type);
            }
            '=' => {
                let token_type = if self.match_char('=') { TokenType::EqualEqual } else { TokenType::Equal };
                self.add_token(token_type);
            }
            '>' => {
                let token_type = if self.match_char('=') { TokenType::GreaterEqual } else { TokenType::Greater };
                self.add_token(token_type);
            }
            '<' => {
                let token_type = if self.match_char('=') { TokenType::LessEqual } else { TokenType::Less };
                self.add_token(token_type);
            }

            ' ' | '\r' | '\t' => {}
            '\n' => self.line += 1,

            // Literals
            '"' => return self.string(),
            c if c.is_ascii_digit() => return self.number(),
            c if c.is_ascii_alphabetic() || c == '_' => self.identifier(),

            _ => return Err(LexerError::UnexpectedCharacter { line: self.line, character: c }),
        }
        Ok(())
    }

    fn string(&mut self) -> Result<(), LexerError> {
        while let Some(c) = self.peek() {
            match c {
                '"' => break,
                '\n' => self.line += 1,
                _ => {}
            };
            self.advance();
        }

        if self.is_at_end() {
            return Err(LexerError::UnterminatedString { line: self.line });
        }

        // Closing quote
        self.advance();

        let value = &self.source[(self.start + 1)..(self.current - 1)];
        self.add_token_with_literal(TokenType::String, LiteralValue::String(value.to_owned()));
        Ok(())
    }

    fn number(&mut self) -> Result<(), LexerError> {
        self.digits();

        // A dot only belongs to the number when a digit follows it
        if self.peek() == Some('.') && self.peek_next().map_or(false, |c| c.is_ascii_digit()) {
            self.advance();
            self.digits();
        }

        let lexeme = self.lexeme();
        let value = lexeme.parse::<f64>().map_err(|_| LexerError::MalformedNumber {
            line: self.start_line,
            lexeme: lexeme.to_owned(),
        })?;
        self.add_token_with_literal(TokenType::Number, LiteralValue::Number(value));
        Ok(())
    }

    fn digits(&mut self) {
        while let Some(d) = self.peek() {
            if d.is_ascii_digit() {
                self.advance();
                continue;
            }
            break;
        }
    }

    fn identifier(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_ascii_alphanumeric() || c == '_' {
                self.advance();
                continue;
            }
            break;
        }

        let token_type = keyword::lookup(self.lexeme());
        self.add_token_with_literal(token_type, keyword::literal(token_type));
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.current += c.len_utf8();
        Some(c)
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.current += expected.len_utf8();
            return true;
        }
        false
    }

    fn peek(&self) -> Option<char> {
        self.source[self.current..].chars().next()
    }

    fn peek_next(&self) -> Option<char> {
        self.source[self.current..].chars().nth(1)
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.source.len()
    }

    fn lexeme(&self) -> &'a str {
        let source: &'a str = self.source;
        &source[self.start..self.current]
    }

    fn add_token(&mut self, token_type: TokenType) {
        self.add_token_with_literal(token_type, LiteralValue::Absent);
    }

    fn add_token_with_literal(&mut self, token_type: TokenType, literal: LiteralValue) {
        let token = Token::new(token_type, self.lexeme(), literal, self.start_line);
        self.tokens.push(token);
    }
}
