//! Parser for PHP class files.
//!
//! This module is organized into submodules by parsing category:
//! - `file`: Top-level statements (namespaces, imports, declarations)
//! - `class`: Class declarations and their members
//! - `expr`: Types and constant expressions
//! - `body`: Statement splitting for routine bodies and opaque statements

mod body;
mod class;
mod expr;
mod file;

use crate::ast::*;
use crate::error::{ParseError, ParseResult};
use crate::lexer::{literal_line_starts, Lexer, Token, TokenKind};

// ==================== PARSER STATE ====================

/// Parser state.
///
/// Comments are kept out of the token stream and attached to statements
/// by source position.
pub struct Parser<'a> {
    source: &'a str,
    tokens: Vec<Token>,
    comments: Vec<Token>,
    eof: Token,
    pos: usize,
    /// End offset of the last statement (or block opener) consumed.
    last_end: usize,
    /// Text after a closing `?>` at the end of the file.
    epilogue: Option<String>,
}

impl<'a> Parser<'a> {
    /// Create a parser for a whole file.
    pub fn new(source: &'a str) -> ParseResult<Self> {
        Ok(Self::from_tokens(source, Lexer::for_file(source).tokenize()?))
    }

    /// Create a parser for a code fragment without an opening tag.
    pub fn for_code(source: &'a str) -> ParseResult<Self> {
        Ok(Self::from_tokens(source, Lexer::for_code(source).tokenize()?))
    }

    fn from_tokens(source: &'a str, all: Vec<Token>) -> Self {
        let (comments, tokens): (Vec<Token>, Vec<Token>) =
            all.into_iter().partition(Token::is_comment);
        let eof = tokens
            .last()
            .filter(|t| matches!(t.kind, TokenKind::Eof))
            .cloned()
            .unwrap_or_else(|| Token::eof(source.len(), 1, 1));
        Self {
            source,
            tokens,
            comments,
            eof,
            pos: 0,
            last_end: 0,
            epilogue: None,
        }
    }
}

// ==================== TOKEN HELPERS ====================

impl<'a> Parser<'a> {
    pub(crate) fn peek(&self) -> &Token {
        self.tokens.get(self.pos).unwrap_or(&self.eof)
    }

    pub(crate) fn peek_at(&self, offset: usize) -> &Token {
        self.tokens.get(self.pos + offset).unwrap_or(&self.eof)
    }

    pub(crate) fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    pub(crate) fn check(&self, kind: &TokenKind) -> bool {
        std::mem::discriminant(&self.peek().kind) == std::mem::discriminant(kind)
    }

    pub(crate) fn check_word(&self, word: &str) -> bool {
        self.peek().kind.is_word(word)
    }

    pub(crate) fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(crate) fn eat_word(&mut self, word: &str) -> bool {
        if self.check_word(word) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(crate) fn expect(&mut self, kind: &TokenKind) -> ParseResult<Token> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(kind.name()))
        }
    }

    pub(crate) fn expect_word(&mut self, word: &str) -> ParseResult<Token> {
        if self.check_word(word) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(&format!("'{}'", word)))
        }
    }

    /// Expect any word (identifier or keyword).
    pub(crate) fn expect_name(&mut self) -> ParseResult<String> {
        match &self.peek().kind {
            TokenKind::Ident(name) => {
                let name = name.clone();
                self.advance();
                Ok(name)
            }
            _ => Err(self.unexpected("name")),
        }
    }

    pub(crate) fn expect_variable(&mut self) -> ParseResult<String> {
        match &self.peek().kind {
            TokenKind::Variable(name) => {
                let name = name.clone();
                self.advance();
                Ok(name)
            }
            _ => Err(self.unexpected("variable")),
        }
    }

    /// Error for the current token.
    pub(crate) fn unexpected(&self, expected: &str) -> ParseError {
        let token = self.peek();
        match token.kind {
            TokenKind::Eof => ParseError::unexpected_eof(token.span, expected),
            _ => ParseError::unexpected_token(token.span, expected, token.kind.name()),
        }
    }

    /// End offset of the last consumed token.
    pub(crate) fn prev_end(&self) -> usize {
        match self.pos.checked_sub(1).and_then(|i| self.tokens.get(i)) {
            Some(token) => token.span.end,
            None => 0,
        }
    }
}

// ==================== LAYOUT HELPERS ====================

impl<'a> Parser<'a> {
    /// Comments lying entirely within `start..end`.
    pub(crate) fn comments_between(&self, start: usize, end: usize) -> &[Token] {
        let from = self.comments.partition_point(|c| c.span.start < start);
        let to = self.comments.partition_point(|c| c.span.end <= end);
        if from < to {
            &self.comments[from..to]
        } else {
            &[]
        }
    }

    /// Source text of `start..end`, dedented to the indentation of its first
    /// line. Lines inside string literals are left as they are.
    pub(crate) fn slice(&self, start: usize, end: usize) -> String {
        let from = self.tokens.partition_point(|t| t.span.end <= start);
        let to = self.tokens.partition_point(|t| t.span.start < end).max(from);
        let literal_lines: Vec<usize> = literal_line_starts(self.source, &self.tokens[from..to])
            .into_iter()
            .filter(|&offset| offset > start && offset < end)
            .map(|offset| offset - start)
            .collect();
        dedent(&self.source[start..end], line_indent(self.source, start), &literal_lines)
    }

    fn comment_text(&self, comment: &Token) -> String {
        self.slice(comment.span.start, comment.span.end)
    }

    pub(crate) fn has_blank_line(&self, start: usize, end: usize) -> bool {
        start <= end && self.source[start..end].matches('\n').count() >= 2
    }

    pub(crate) fn has_newline(&self, start: usize, end: usize) -> bool {
        start <= end && self.source[start..end].contains('\n')
    }

    /// Comments and spacing between the previous statement and the current
    /// token.
    pub(crate) fn leading_trivia(&mut self) -> Trivia {
        let next = self.peek().span.start;
        let comments = self.comments_between(self.last_end, next);
        let first = comments.first().map_or(next, |c| c.span.start);
        let texts = comments.iter().map(|c| self.comment_text(c)).collect();
        Trivia {
            comments: texts,
            attributes: Vec::new(),
            blank_line_before: Some(self.has_blank_line(self.last_end, first)),
            trailing_comment: None,
        }
    }

    /// Close a statement: pick up a comment on the same line and move
    /// `last_end` past it.
    pub(crate) fn finish_stmt(&mut self, trivia: &mut Trivia) {
        let end = self.prev_end();
        self.last_end = end;
        if let Some(comment) = self.same_line_comment(end) {
            trivia.trailing_comment = Some(self.comment_text(&comment));
            self.last_end = comment.span.end;
        }
    }

    pub(crate) fn same_line_comment(&self, end: usize) -> Option<Token> {
        let next = self.peek().span.start;
        let comment = self.comments_between(end, next).first()?;
        if self.has_newline(end, comment.span.start) {
            None
        } else {
            Some(comment.clone())
        }
    }

    /// Comments between the last statement and the current token (a closing
    /// brace or the end of input).
    pub(crate) fn closing_comments(&mut self) -> Vec<String> {
        let next = self.peek().span.start;
        let comments = self.comments_between(self.last_end, next);
        let texts = comments.iter().map(|c| self.comment_text(c)).collect();
        if let Some(last) = comments.last() {
            self.last_end = last.span.end;
        }
        texts
    }

    /// Parse `#[...]` attribute groups as source text.
    pub(crate) fn parse_attributes(&mut self) -> ParseResult<Vec<String>> {
        let mut attributes = Vec::new();
        while self.check(&TokenKind::AttrOpen) {
            let start = self.peek().span.start;
            self.skip_balanced()?;
            attributes.push(self.slice(start, self.prev_end()));
        }
        Ok(attributes)
    }
}

/// Strip up to `width` leading blanks from every line after the first,
/// except the lines starting at one of the `verbatim` offsets.
pub(crate) fn dedent(text: &str, width: usize, verbatim: &[usize]) -> String {
    let mut out = String::with_capacity(text.len());
    let mut line_start = 0;
    for (i, raw) in text.split('\n').enumerate() {
        let line = raw.trim_end_matches('\r');
        let offset = line_start;
        line_start += raw.len() + 1;
        if i == 0 {
            out.push_str(line);
            continue;
        }
        out.push('\n');
        if verbatim.contains(&offset) {
            out.push_str(line);
            continue;
        }
        let mut rest = line;
        for _ in 0..width {
            match rest.strip_prefix(' ').or_else(|| rest.strip_prefix('\t')) {
                Some(r) => rest = r,
                None => break,
            }
        }
        out.push_str(rest);
    }
    out
}

/// Indentation width of the line containing `pos`.
pub(crate) fn line_indent(source: &str, pos: usize) -> usize {
    let line_start = source[..pos].rfind('\n').map_or(0, |i| i + 1);
    source[line_start..pos]
        .chars()
        .take_while(|c| *c == ' ' || *c == '\t')
        .count()
}

// ==================== PUBLIC API ====================

/// Parse a complete PHP file.
pub fn parse_file(input: &str) -> ParseResult<SourceFile> {
    Parser::new(input)?.parse_source_file()
}

/// Parse a sequence of statements (a routine body) without an opening tag.
///
/// A leading `<?php` tag is tolerated.
pub fn parse_fragment(input: &str) -> ParseResult<Vec<InnerStmt>> {
    let trimmed = input.trim_start();
    let code = match trimmed.get(..5) {
        Some(tag) if tag.eq_ignore_ascii_case("<?php") => &trimmed[5..],
        _ => input,
    };
    Parser::for_code(code)?.parse_inner_stmts(false)
}

/// Parse a single constant expression.
pub fn parse_expr(input: &str) -> ParseResult<Expr> {
    let mut parser = Parser::for_code(input)?;
    let expr = parser.parse_expr()?;
    parser.eat(&TokenKind::Semicolon);
    parser.expect(&TokenKind::Eof)?;
    Ok(expr)
}

// ==================== TESTS ====================
