use crate::token::{LiteralValue, TokenType};

/// Resolves an identifier-shaped lexeme to its keyword category, or to
/// `TokenType::Identifier` when the spelling is not reserved. Matching is
/// exact and case-sensitive.
pub fn lookup(lexeme: &str) -> TokenType {
    match lexeme {
        "and" =>        TokenType::And,
        "or" =>         TokenType::Or,
        "if" =>         TokenType::If,
        "elsif" =>      TokenType::Elsif,
        "else" =>       TokenType::Else,
        "unless" =>     TokenType::Unless,
        "class" =>      TokenType::Class,
        "this" =>       TokenType::This,
        "super" =>      TokenType::Super,
        "var" =>        TokenType::Var,
        "let" =>        TokenType::Let,
        "fun" =>        TokenType::Fun,
        "print" =>      TokenType::Print,
        "return" =>     TokenType::Return,
        "loop" =>       TokenType::Loop,
        "while" =>      TokenType::While,
        "for" =>        TokenType::For,
        "until" =>      TokenType::Until,
        "true" =>       TokenType::True,
        "false" =>      TokenType::False,
        "nil" =>        TokenType::Nil,

        _ =>            TokenType::Identifier
    }
}

/// Literal carried by a token resolved from the keyword table. Only `true`
/// and `false` carry a value.
pub fn literal(token_type: TokenType) -> LiteralValue {
    match token_type {
        TokenType::True => LiteralValue::Bool(true),
        TokenType::False => LiteralValue::Bool(false),
        _ => LiteralValue::Absent,
    }
}
