//! Lexer for the pattern macro DSL.
//!
//! Produces span-based tokens without storing text; text is sliced from the
//! source only when needed. Consecutive unrecognized characters are
//! coalesced into single `Garbage` tokens so malformed input stays
//! manageable.

use logos::Logos;
use remac_core::Span;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n]+")]
#[logos(skip(r"//[^\n]*", allow_greedy = true))]
pub enum TokenKind {
    #[token("#define")]
    Define,
    #[token("import")]
    Import,
    #[token("as")]
    As,
    #[token("export")]
    Export,
    #[token("=")]
    Eq,
    #[token("|")]
    Pipe,
    #[token("*")]
    Star,
    #[token("+")]
    Plus,
    #[token("?")]
    Question,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token(",")]
    Comma,
    #[token("..")]
    DotDot,
    #[token(".")]
    Dot,
    #[regex(r"[0-9]+")]
    Int,
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Ident,
    #[regex(r#""([^"\\\n]|\\.)*""#)]
    Str,
    #[regex(r"'([^'\\\n]|\\.)'")]
    Char,
    /// Coalesced run of characters the lexer could not recognize.
    Garbage,
}

/// Zero-copy token: kind plus span, text retrieved from the source on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    #[inline]
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    pub fn text<'s>(&self, source: &'s str) -> &'s str {
        self.span.text(source)
    }
}

fn to_span(range: std::ops::Range<usize>) -> Span {
    Span::new(range.start as u32, range.end as u32)
}

/// Tokenize source into span-based tokens, coalescing lexer errors.
pub fn lex(source: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut lexer = TokenKind::lexer(source);
    let mut error_start: Option<usize> = None;

    loop {
        match lexer.next() {
            Some(Ok(kind)) => {
                if let Some(start) = error_start.take() {
                    tokens.push(Token::new(TokenKind::Garbage, to_span(start..lexer.span().start)));
                }
                tokens.push(Token::new(kind, to_span(lexer.span())));
            }
            Some(Err(())) => {
                if error_start.is_none() {
                    error_start = Some(lexer.span().start);
                }
            }
            None => {
                if let Some(start) = error_start.take() {
                    tokens.push(Token::new(TokenKind::Garbage, to_span(start..source.len())));
                }
                break;
            }
        }
    }

    tokens
}
