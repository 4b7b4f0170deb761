//! Recursive-descent parser for the pattern macro DSL.
//!
//! A module is a sequence of items:
//!
//! ```text
//! #define lbrace 123        // integer constant
//! import "core.rm" as core  // qualified import
//! import "core.rm"          // unqualified import
//! export Word = alpha (alpha | digit)*
//! ```
//!
//! Expressions use `|` for alternation, juxtaposition for sequence, postfix
//! `*` `+` `?` `{n}` `{n,m}` `{n,}` for repetition, and atoms: integer
//! literals, inclusive ranges `65..90`, character literals, string literals
//! (a sequence of codepoint constants), parenthesized groups, and plain or
//! `alias.Name` qualified references.
//!
//! Bounded repetition desugars at parse time into `Seq`/`Alt`/`Star`
//! combinations over deep copies of the repeated subtree, so the compiler
//! only ever sees the closed five-operator set.

pub mod lexer;

use remac_core::{ExprId, Module, PatternDef, PatternExpr, Span};

use crate::error::ParseError;
use lexer::{Token, TokenKind, lex};

/// An `import` item, resolved to a `ModuleId` later by the loader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportDecl {
    pub path: String,
    pub alias: Option<String>,
    pub span: Span,
}

/// Parse one source file into a module (imports still unresolved).
pub fn parse_module(source: &str, name: &str) -> Result<(Module, Vec<ImportDecl>), ParseError> {
    let tokens = lex(source);
    let parser = Parser {
        src: source,
        tokens,
        pos: 0,
        module: Module {
            name: name.to_owned(),
            source: source.to_owned(),
            ..Module::default()
        },
        imports: Vec::new(),
    };
    parser.parse()
}

struct Parser<'s> {
    src: &'s str,
    tokens: Vec<Token>,
    pos: usize,
    module: Module,
    imports: Vec<ImportDecl>,
}

impl<'s> Parser<'s> {
    fn parse(mut self) -> Result<(Module, Vec<ImportDecl>), ParseError> {
        while let Some(tok) = self.peek() {
            match tok.kind {
                TokenKind::Define => self.parse_const()?,
                TokenKind::Import => self.parse_import()?,
                TokenKind::Export => {
                    self.bump();
                    self.parse_def(true)?;
                }
                TokenKind::Ident => self.parse_def(false)?,
                _ => {
                    return Err(self.unexpected(tok, "a definition, `#define`, or `import`"));
                }
            }
        }
        Ok((self.module, self.imports))
    }

    // ── items ────────────────────────────────────────────────────────────

    fn parse_const(&mut self) -> Result<(), ParseError> {
        let start = self.bump().span;
        let name_tok = self.expect(TokenKind::Ident, "a constant name")?;
        let value_tok = self.expect(TokenKind::Int, "an integer value")?;
        let name = name_tok.text(self.src).to_owned();
        let value = self.parse_int(value_tok)?;
        let span = start.cover(value_tok.span);

        self.check_fresh(&name, name_tok.span)?;
        self.module.consts.insert(
            name.clone(),
            remac_core::ConstDef { name, value, span },
        );
        Ok(())
    }

    fn parse_import(&mut self) -> Result<(), ParseError> {
        let start = self.bump().span;
        let path_tok = self.expect(TokenKind::Str, "a quoted module path")?;
        let raw = path_tok.text(self.src);
        let path = raw[1..raw.len() - 1].to_owned();

        let mut alias = None;
        let mut end = path_tok.span;
        if self.eat(TokenKind::As) {
            let alias_tok = self.expect(TokenKind::Ident, "an import alias")?;
            alias = Some(alias_tok.text(self.src).to_owned());
            end = alias_tok.span;
        }

        self.imports.push(ImportDecl {
            path,
            alias,
            span: start.cover(end),
        });
        Ok(())
    }

    fn parse_def(&mut self, export: bool) -> Result<(), ParseError> {
        let name_tok = self.expect(TokenKind::Ident, "a pattern name")?;
        let name = name_tok.text(self.src).to_owned();
        self.expect(TokenKind::Eq, "`=`")?;
        let body = self.parse_alt()?;

        self.check_fresh(&name, name_tok.span)?;
        let index = self.module.defs.len() as u32;
        self.module.arena.assign_def(body, index);
        let span = name_tok.span.cover(self.module.arena.node(body).span);
        self.module.defs.push(PatternDef {
            name: name.clone(),
            body,
            span,
            export,
        });
        self.module.def_names.insert(name, index);
        Ok(())
    }

    fn check_fresh(&self, name: &str, span: Span) -> Result<(), ParseError> {
        if self.module.def_names.contains_key(name) || self.module.consts.contains_key(name) {
            return Err(ParseError::DuplicateDefinition {
                name: name.to_owned(),
                span,
            });
        }
        Ok(())
    }

    // ── expressions ──────────────────────────────────────────────────────

    fn parse_alt(&mut self) -> Result<ExprId, ParseError> {
        let first = self.parse_seq()?;
        if !self.at(TokenKind::Pipe) {
            return Ok(first);
        }

        let mut branches = vec![first];
        while self.eat(TokenKind::Pipe) {
            branches.push(self.parse_seq()?);
        }

        let span = self.cover_all(&branches);
        Ok(self.module.arena.alloc(PatternExpr::Alt(branches), span))
    }

    fn parse_seq(&mut self) -> Result<ExprId, ParseError> {
        let at = self.here();
        let mut items = Vec::new();
        while self.at_atom_start() {
            items.push(self.parse_postfix()?);
        }

        match items.len() {
            // Zero-width branch: matches the empty input.
            0 => Ok(self
                .module
                .arena
                .alloc(PatternExpr::Seq(Vec::new()), Span::empty(at))),
            1 => Ok(items[0]),
            _ => {
                let span = self.cover_all(&items);
                Ok(self.module.arena.alloc(PatternExpr::Seq(items), span))
            }
        }
    }

    fn at_atom_start(&self) -> bool {
        matches!(
            self.peek().map(|t| t.kind),
            Some(
                TokenKind::Int
                    | TokenKind::Char
                    | TokenKind::Str
                    | TokenKind::Ident
                    | TokenKind::LParen
            )
        )
    }

    fn parse_postfix(&mut self) -> Result<ExprId, ParseError> {
        let mut node = self.parse_atom()?;
        loop {
            let Some(tok) = self.peek() else { break };
            match tok.kind {
                TokenKind::Star => {
                    self.bump();
                    let span = self.node_span(node).cover(tok.span);
                    node = self.module.arena.alloc(PatternExpr::Star(node), span);
                }
                TokenKind::Plus => {
                    self.bump();
                    let span = self.node_span(node).cover(tok.span);
                    let copy = self.module.arena.duplicate(node);
                    let star = self.module.arena.alloc(PatternExpr::Star(copy), span);
                    node = self
                        .module
                        .arena
                        .alloc(PatternExpr::Seq(vec![node, star]), span);
                }
                TokenKind::Question => {
                    self.bump();
                    let span = self.node_span(node).cover(tok.span);
                    node = self.make_optional(node, span);
                }
                TokenKind::LBrace => {
                    node = self.parse_bounded(node)?;
                }
                _ => break,
            }
        }
        Ok(node)
    }

    /// `{n}`, `{n,}`, `{n,m}` — desugared to repeated sequence plus an
    /// optional or star tail.
    fn parse_bounded(&mut self, node: ExprId) -> Result<ExprId, ParseError> {
        self.bump(); // `{`
        let min_tok = self.expect(TokenKind::Int, "a repeat count")?;
        let min = self.parse_int(min_tok)?;

        let mut max = Some(min);
        if self.eat(TokenKind::Comma) {
            if self.at(TokenKind::Int) {
                let max_tok = self.bump();
                max = Some(self.parse_int(max_tok)?);
            } else {
                max = None;
            }
        }
        let close = self.expect(TokenKind::RBrace, "`}`")?;
        let span = self.node_span(node).cover(close.span);

        if let Some(max) = max
            && max < min
        {
            return Err(ParseError::ReversedBounds {
                min,
                max,
                span: close.span,
            });
        }

        let mut items = Vec::new();
        for i in 0..min {
            let copy = if i == 0 {
                node
            } else {
                self.module.arena.duplicate(node)
            };
            items.push(copy);
        }

        match max {
            Some(max) => {
                for _ in min..max {
                    let copy = self.module.arena.duplicate(node);
                    let optional = self.make_optional(copy, span);
                    items.push(optional);
                }
            }
            None => {
                let copy = self.module.arena.duplicate(node);
                let star = self.module.arena.alloc(PatternExpr::Star(copy), span);
                items.push(star);
            }
        }

        Ok(match items.len() {
            0 => self.module.arena.alloc(PatternExpr::Seq(Vec::new()), span),
            1 => items[0],
            _ => self.module.arena.alloc(PatternExpr::Seq(items), span),
        })
    }

    fn make_optional(&mut self, node: ExprId, span: Span) -> ExprId {
        let at = self.node_span(node).end;
        let eps = self
            .module
            .arena
            .alloc(PatternExpr::Seq(Vec::new()), Span::empty(at));
        self.module
            .arena
            .alloc(PatternExpr::Alt(vec![node, eps]), span)
    }

    fn parse_atom(&mut self) -> Result<ExprId, ParseError> {
        let tok = self.peek().ok_or(ParseError::UnexpectedEof {
            expected: "an expression",
        })?;
        match tok.kind {
            TokenKind::Int => {
                self.bump();
                let lo = self.parse_int(tok)?;
                if self.at(TokenKind::DotDot) {
                    self.bump();
                    let hi_tok = self.expect(TokenKind::Int, "a range upper bound")?;
                    let hi = self.parse_int(hi_tok)?;
                    let span = tok.span.cover(hi_tok.span);
                    // lo > hi is surfaced by the compiler as MalformedRange.
                    Ok(self
                        .module
                        .arena
                        .alloc(PatternExpr::Const { lo, hi }, span))
                } else {
                    Ok(self
                        .module
                        .arena
                        .alloc(PatternExpr::Const { lo, hi: lo }, tok.span))
                }
            }
            TokenKind::Char => {
                self.bump();
                let lo = self.char_value(tok)?;
                if self.at(TokenKind::DotDot) {
                    self.bump();
                    let hi_tok = self.expect(TokenKind::Char, "a range upper bound")?;
                    let hi = self.char_value(hi_tok)?;
                    let span = tok.span.cover(hi_tok.span);
                    Ok(self
                        .module
                        .arena
                        .alloc(PatternExpr::Const { lo, hi }, span))
                } else {
                    Ok(self
                        .module
                        .arena
                        .alloc(PatternExpr::Const { lo, hi: lo }, tok.span))
                }
            }
            TokenKind::Str => {
                self.bump();
                self.string_atom(tok)
            }
            TokenKind::Ident => {
                self.bump();
                let first = tok.text(self.src).to_owned();
                if self.at(TokenKind::Dot) {
                    self.bump();
                    let name_tok = self.expect(TokenKind::Ident, "a qualified name")?;
                    let span = tok.span.cover(name_tok.span);
                    Ok(self.module.arena.alloc(
                        PatternExpr::Ref {
                            qualifier: Some(first),
                            name: name_tok.text(self.src).to_owned(),
                        },
                        span,
                    ))
                } else {
                    Ok(self.module.arena.alloc(
                        PatternExpr::Ref {
                            qualifier: None,
                            name: first,
                        },
                        tok.span,
                    ))
                }
            }
            TokenKind::LParen => {
                self.bump();
                let inner = self.parse_alt()?;
                self.expect(TokenKind::RParen, "`)`")?;
                Ok(inner)
            }
            _ => Err(self.unexpected(tok, "an expression")),
        }
    }

    /// A string literal becomes a sequence of codepoint constants, each
    /// spanning its own characters inside the literal.
    fn string_atom(&mut self, tok: Token) -> Result<ExprId, ParseError> {
        let inner_start = tok.span.start + 1;
        let inner = &self.src[(tok.span.start + 1) as usize..(tok.span.end - 1) as usize];

        let mut consts = Vec::new();
        let mut chars = inner.char_indices().peekable();
        while let Some((offset, c)) = chars.next() {
            let at = inner_start + offset as u32;
            let (value, len) = if c == '\\' {
                let Some((_, esc)) = chars.next() else {
                    return Err(ParseError::InvalidEscape {
                        span: Span::new(at, at + 1),
                    });
                };
                let span = Span::new(at, at + 1 + esc.len_utf8() as u32);
                (decode_escape(esc, span)?, 1 + esc.len_utf8() as u32)
            } else {
                (c as u32, c.len_utf8() as u32)
            };
            let span = Span::new(at, at + len);
            consts.push(
                self.module
                    .arena
                    .alloc(PatternExpr::Const { lo: value, hi: value }, span),
            );
        }

        Ok(match consts.len() {
            1 => consts[0],
            _ => self
                .module
                .arena
                .alloc(PatternExpr::Seq(consts), tok.span),
        })
    }

    fn char_value(&self, tok: Token) -> Result<u32, ParseError> {
        let inner = &self.src[(tok.span.start + 1) as usize..(tok.span.end - 1) as usize];
        let mut chars = inner.chars();
        let first = chars.next().ok_or(ParseError::InvalidEscape { span: tok.span })?;
        if first == '\\' {
            let esc = chars.next().ok_or(ParseError::InvalidEscape { span: tok.span })?;
            decode_escape(esc, tok.span)
        } else {
            Ok(first as u32)
        }
    }

    fn parse_int(&self, tok: Token) -> Result<u32, ParseError> {
        tok.text(self.src)
            .parse::<u32>()
            .map_err(|_| ParseError::IntOutOfRange { span: tok.span })
    }

    // ── token plumbing ───────────────────────────────────────────────────

    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).copied()
    }

    fn bump(&mut self) -> Token {
        let tok = self.tokens[self.pos];
        self.pos += 1;
        tok
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.peek().map(|t| t.kind) == Some(kind)
    }

    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.at(kind) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: TokenKind, expected: &'static str) -> Result<Token, ParseError> {
        match self.peek() {
            Some(tok) if tok.kind == kind => {
                self.pos += 1;
                Ok(tok)
            }
            Some(tok) => Err(self.unexpected(tok, expected)),
            None => Err(ParseError::UnexpectedEof { expected }),
        }
    }

    fn unexpected(&self, tok: Token, expected: &'static str) -> ParseError {
        ParseError::UnexpectedToken {
            found: tok.text(self.src).to_owned(),
            expected,
            span: tok.span,
        }
    }

    /// Position of the next token, or end of input.
    fn here(&self) -> u32 {
        self.peek()
            .map(|t| t.span.start)
            .unwrap_or(self.src.len() as u32)
    }

    fn node_span(&self, id: ExprId) -> Span {
        self.module.arena.node(id).span
    }

    fn cover_all(&self, ids: &[ExprId]) -> Span {
        let mut span = self.node_span(ids[0]);
        for id in &ids[1..] {
            span = span.cover(self.node_span(*id));
        }
        span
    }
}

fn decode_escape(esc: char, span: Span) -> Result<u32, ParseError> {
    match esc {
        'n' => Ok(10),
        't' => Ok(9),
        'r' => Ok(13),
        '0' => Ok(0),
        '\\' | '\'' | '"' => Ok(esc as u32),
        _ => Err(ParseError::InvalidEscape { span }),
    }
}
