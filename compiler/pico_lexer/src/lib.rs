//! Lexer for pico cartridge sources using logos.
//!
//! The dialect is a Lua subset: `--` line comments, `--[[ ]]` block
//! comments, single- or double-quoted strings, decimal, hex and binary
//! numbers. `!=` is accepted as a spelling of `~=`.

mod lex_error;
mod token;

use logos::Logos;
use pico_ir::Span;

pub use lex_error::{LexError, LexErrorKind};
pub use token::{Token, TokenKind};

/// Raw token from logos (before escape processing).
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\n\f]+")]
enum RawToken {
    // === Comments ===
    #[token("--", comment)]
    Comment,

    // === Keywords ===
    #[token("and")]
    And,
    #[token("break")]
    Break,
    #[token("do")]
    Do,
    #[token("else")]
    Else,
    #[token("elseif")]
    Elseif,
    #[token("end")]
    End,
    #[token("false")]
    False,
    #[token("for")]
    For,
    #[token("function")]
    Function,
    #[token("goto")]
    Goto,
    #[token("if")]
    If,
    #[token("in")]
    In,
    #[token("local")]
    Local,
    #[token("nil")]
    Nil,
    #[token("not")]
    Not,
    #[token("or")]
    Or,
    #[token("repeat")]
    Repeat,
    #[token("return")]
    Return,
    #[token("then")]
    Then,
    #[token("true")]
    True,
    #[token("until")]
    Until,
    #[token("while")]
    While,

    // === Operators ===
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("^")]
    Caret,
    #[token("#")]
    Hash,
    #[token("==")]
    EqEq,
    #[token("~=")]
    #[token("!=")]
    NotEq,
    #[token("<=")]
    LtEq,
    #[token(">=")]
    GtEq,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("=")]
    Eq,

    // === Punctuation ===
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(";")]
    Semicolon,
    #[token("::")]
    DoubleColon,
    #[token(":")]
    Colon,
    #[token(",")]
    Comma,
    #[token("...")]
    Ellipsis,
    #[token("..")]
    DotDot,
    #[token(".")]
    Dot,

    // === Literals ===
    #[regex(r"0[xX][0-9a-fA-F]+", |lex| {
        u64::from_str_radix(&lex.slice()[2..], 16).ok().map(|v| v as f64)
    })]
    #[regex(r"0[bB][01]+", |lex| {
        u64::from_str_radix(&lex.slice()[2..], 2).ok().map(|v| v as f64)
    })]
    #[regex(r"[0-9]+(\.[0-9]+)?([eE][+-]?[0-9]+)?", |lex| lex.slice().parse::<f64>().ok())]
    #[regex(r"\.[0-9]+([eE][+-]?[0-9]+)?", |lex| lex.slice().parse::<f64>().ok())]
    Number(f64),

    #[regex(r#""([^"\\\n]|\\.)*""#)]
    #[regex(r"'([^'\\\n]|\\.)*'")]
    Str,

    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Ident,
}

/// Consume the rest of a comment after its `--`.
///
/// Returns `false` for an unterminated block comment.
fn comment(lex: &mut logos::Lexer<RawToken>) -> bool {
    let rest = lex.remainder();
    if let Some(body) = rest.strip_prefix("[[") {
        match body.find("]]") {
            Some(end) => {
                lex.bump(2 + end + 2);
                true
            }
            None => {
                lex.bump(rest.len());
                false
            }
        }
    } else {
        lex.bump(rest.find('\n').unwrap_or(rest.len()));
        true
    }
}

/// Tokenize a whole source text.
///
/// The returned list always ends with an `Eof` token.
pub fn lex(source: &str) -> Result<Vec<Token>, LexError> {
    let mut tokens = Vec::new();
    let mut logos = RawToken::lexer(source);

    while let Some(token_result) = logos.next() {
        let span = Span::from_range(logos.span());
        let slice = logos.slice();
        match token_result {
            Ok(RawToken::Comment) => {}
            Ok(raw) => {
                let kind = convert_token(raw, slice, span)?;
                tokens.push(Token::new(kind, span));
            }
            Err(()) => return Err(classify_error(slice, span)),
        }
    }

    tokens.push(Token::new(TokenKind::Eof, Span::from_range(source.len()..source.len())));
    Ok(tokens)
}

fn classify_error(slice: &str, span: Span) -> LexError {
    let kind = match slice.chars().next() {
        Some('"' | '\'') => LexErrorKind::UnterminatedString,
        Some('-') if slice.starts_with("--[[") => LexErrorKind::UnterminatedComment,
        Some(c) if c.is_ascii_digit() || c == '.' => LexErrorKind::MalformedNumber(slice.to_string()),
        Some(c) => LexErrorKind::UnexpectedCharacter(c),
        None => LexErrorKind::UnexpectedCharacter('\0'),
    };
    LexError::new(kind, span)
}

fn convert_token(raw: RawToken, slice: &str, span: Span) -> Result<TokenKind, LexError> {
    Ok(match raw {
        RawToken::Number(n) => TokenKind::Number(n),
        RawToken::Str => {
            let content = &slice[1..slice.len() - 1];
            let unescaped = unescape(content).map_err(|kind| LexError::new(kind, span))?;
            TokenKind::Str(unescaped)
        }
        RawToken::Ident => TokenKind::Ident(slice.to_string()),

        RawToken::And => TokenKind::And,
        RawToken::Break => TokenKind::Break,
        RawToken::Do => TokenKind::Do,
        RawToken::Else => TokenKind::Else,
        RawToken::Elseif => TokenKind::Elseif,
        RawToken::End => TokenKind::End,
        RawToken::False => TokenKind::False,
        RawToken::For => TokenKind::For,
        RawToken::Function => TokenKind::Function,
        RawToken::Goto => TokenKind::Goto,
        RawToken::If => TokenKind::If,
        RawToken::In => TokenKind::In,
        RawToken::Local => TokenKind::Local,
        RawToken::Nil => TokenKind::Nil,
        RawToken::Not => TokenKind::Not,
        RawToken::Or => TokenKind::Or,
        RawToken::Repeat => TokenKind::Repeat,
        RawToken::Return => TokenKind::Return,
        RawToken::Then => TokenKind::Then,
        RawToken::True => TokenKind::True,
        RawToken::Until => TokenKind::Until,
        RawToken::While => TokenKind::While,

        RawToken::Plus => TokenKind::Plus,
        RawToken::Minus => TokenKind::Minus,
        RawToken::Star => TokenKind::Star,
        RawToken::Slash => TokenKind::Slash,
        RawToken::Percent => TokenKind::Percent,
        RawToken::Caret => TokenKind::Caret,
        RawToken::Hash => TokenKind::Hash,
        RawToken::EqEq => TokenKind::EqEq,
        RawToken::NotEq => TokenKind::NotEq,
        RawToken::LtEq => TokenKind::LtEq,
        RawToken::GtEq => TokenKind::GtEq,
        RawToken::Lt => TokenKind::Lt,
        RawToken::Gt => TokenKind::Gt,
        RawToken::Eq => TokenKind::Eq,

        RawToken::LParen => TokenKind::LParen,
        RawToken::RParen => TokenKind::RParen,
        RawToken::LBrace => TokenKind::LBrace,
        RawToken::RBrace => TokenKind::RBrace,
        RawToken::LBracket => TokenKind::LBracket,
        RawToken::RBracket => TokenKind::RBracket,
        RawToken::Semicolon => TokenKind::Semicolon,
        RawToken::DoubleColon => TokenKind::DoubleColon,
        RawToken::Colon => TokenKind::Colon,
        RawToken::Comma => TokenKind::Comma,
        RawToken::Ellipsis => TokenKind::Ellipsis,
        RawToken::DotDot => TokenKind::DotDot,
        RawToken::Dot => TokenKind::Dot,

        // Filtered out by `lex`.
        RawToken::Comment => TokenKind::Eof,
    })
}

/// Process escape sequences in a string literal body.
fn unescape(s: &str) -> Result<String, LexErrorKind> {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => result.push('\n'),
            Some('t') => result.push('\t'),
            Some('r') => result.push('\r'),
            Some('0') => result.push('\0'),
            Some('\\') => result.push('\\'),
            Some('"') => result.push('"'),
            Some('\'') => result.push('\''),
            Some(other) => return Err(LexErrorKind::InvalidEscape(other)),
            None => return Err(LexErrorKind::UnterminatedString),
        }
    }
    Ok(result)
}
