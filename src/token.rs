use std::fmt;

#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum TokenType {
    // Single-character tokens
    LeftParenthesis,
    RightParenthesis,
    LeftBrace,
    RightBrace,
    Comma,
    Dot,
    Semicolon,
    Colon,
    Minus,
    Plus,
    Slash,
    Star,

    // One or two character tokens
    Bang,
    BangEqual,
    Equal,
    EqualEqual,
    Greater,
    GreaterEqual,
    Less,
    LessEqual,

    // Literals
    Identifier,
    String,
    Number,
    /// Reserved for the parser, the scanner never emits it.
    Bool,

    // Keywords
    And,
    Or,
    If,
    Elsif,
    Else,
    Unless,
    Class,
    This,
    Super,
    Var,
    Let,
    Fun,
    Print,
    Return,
    Loop,
    While,
    For,
    Until,
    True,
    False,
    Nil,

    Eof,
}

/// Decoded payload of a literal token.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LiteralValue {
    Number(f64),
    String(String),
    Bool(bool),
    #[default]
    Absent,
}

impl fmt::Display for LiteralValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LiteralValue::Number(value) => write!(f, "{}", value),
            LiteralValue::String(value) => write!(f, "{}", value),
            LiteralValue::Bool(value) => write!(f, "{}", value),
            LiteralValue::Absent => write!(f, "nil"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub token_type: TokenType,
    pub lexeme: String,
    pub literal: LiteralValue,
    /// Line of the token's first character, starting at 1.
    pub line: u32,
}

impl Token {
    pub fn new(token_type: TokenType, lexeme: &str, literal: LiteralValue, line: u32) -> Token {
        Token {
            token_type,
            lexeme: lexeme.to_owned(),
            literal,
            line,
        }
    }

    pub fn eof(line: u32) -> Token {
        Token::new(TokenType::Eof, "", LiteralValue::Absent, line)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} {} {}", self.token_type, self.lexeme, self.literal)
    }
}
