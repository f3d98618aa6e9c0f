//! Type and expression parsing.
//!
//! Literal shapes the engine edits (strings, numbers, named constants and
//! arrays) are parsed into nodes. Anything else is kept as source text up
//! to the next separator.

use super::Parser;
use crate::ast::*;
use crate::error::{ParseError, ParseResult};
use crate::lexer::{StringToken, TokenKind};

impl<'a> Parser<'a> {
    // ==================== TYPES ====================

    /// Parse a type declaration: `?T`, `A|B`, `A&B`, `(A&B)|null`.
    pub(crate) fn parse_type(&mut self) -> ParseResult<String> {
        let mut ty = String::new();
        if self.eat(&TokenKind::Question) {
            ty.push('?');
        }
        loop {
            if self.eat(&TokenKind::LParen) {
                ty.push('(');
                ty.push_str(&self.expect_name()?);
                while self.eat(&TokenKind::Amp) {
                    ty.push('&');
                    ty.push_str(&self.expect_name()?);
                }
                self.expect(&TokenKind::RParen)?;
                ty.push(')');
            } else {
                ty.push_str(&self.expect_name().map_err(|_| self.unexpected("type"))?);
            }

            if self.eat(&TokenKind::Pipe) {
                ty.push('|');
            } else if self.check(&TokenKind::Amp) && self.amp_is_intersection() {
                self.advance();
                ty.push('&');
            } else {
                break;
            }
        }
        Ok(ty)
    }

    /// An `&` followed by a variable or `...` marks a by-reference
    /// parameter, not an intersection type.
    fn amp_is_intersection(&self) -> bool {
        !matches!(
            self.peek_at(1).kind,
            TokenKind::Variable(_) | TokenKind::Ellipsis
        )
    }

    // ==================== EXPRESSIONS ====================

    /// Parse an expression in a default value, constant or array entry.
    pub(crate) fn parse_expr(&mut self) -> ParseResult<Expr> {
        let start = self.pos;
        if let Some(expr) = self.parse_literal()? {
            if self.at_expr_end() {
                return Ok(expr);
            }
        }
        self.pos = start;
        self.parse_raw_expr()
    }

    fn at_expr_end(&self) -> bool {
        matches!(
            self.peek().kind,
            TokenKind::Comma
                | TokenKind::Semicolon
                | TokenKind::RParen
                | TokenKind::RBracket
                | TokenKind::RBrace
                | TokenKind::Arrow
                | TokenKind::CloseTag
                | TokenKind::Eof
        )
    }

    /// Try to parse a literal. Returns `None` for other shapes; the caller
    /// rewinds.
    fn parse_literal(&mut self) -> ParseResult<Option<Expr>> {
        let token = self.peek().clone();
        let expr = match &token.kind {
            TokenKind::String(StringToken {
                raw,
                value,
                interpolated: false,
            }) => {
                self.advance();
                Expr::Str(StrLit {
                    value: value.clone(),
                    raw: Some(raw.clone()),
                })
            }
            TokenKind::Int(raw) => {
                self.advance();
                match parse_int(raw) {
                    Some(value) => Expr::Int(IntLit {
                        value,
                        raw: Some(raw.clone()),
                    }),
                    None => return Ok(None),
                }
            }
            TokenKind::Float(raw) => {
                self.advance();
                match raw.replace('_', "").parse::<f64>() {
                    Ok(value) => Expr::Float(FloatLit {
                        value,
                        raw: Some(raw.clone()),
                    }),
                    Err(_) => return Ok(None),
                }
            }
            TokenKind::Minus => {
                self.advance();
                let number = self.advance();
                let raw = format!("-{}", &self.source[number.span.start..number.span.end]);
                match &number.kind {
                    TokenKind::Int(digits) => match parse_int(digits) {
                        Some(value) => Expr::Int(IntLit {
                            value: -value,
                            raw: Some(raw),
                        }),
                        None => return Ok(None),
                    },
                    TokenKind::Float(digits) => match digits.replace('_', "").parse::<f64>() {
                        Ok(value) => Expr::Float(FloatLit {
                            value: -value,
                            raw: Some(raw),
                        }),
                        Err(_) => return Ok(None),
                    },
                    _ => return Ok(None),
                }
            }
            TokenKind::LBracket => Expr::Array(self.parse_array(TokenKind::RBracket, false)?),
            TokenKind::Ident(word)
                if word.eq_ignore_ascii_case("array")
                    && matches!(self.peek_at(1).kind, TokenKind::LParen) =>
            {
                self.advance();
                Expr::Array(self.parse_array(TokenKind::RParen, true)?)
            }
            TokenKind::Ident(name) => {
                self.advance();
                Expr::Const(name.clone())
            }
            _ => return Ok(None),
        };
        Ok(Some(expr))
    }

    fn parse_array(&mut self, close: TokenKind, long_syntax: bool) -> ParseResult<ArrayExpr> {
        let open = self.advance();
        let mut array = ArrayExpr {
            long_syntax,
            ..ArrayExpr::default()
        };
        let mut prev_end = open.span.end;
        array.multiline = self.has_newline(prev_end, self.peek().span.start);

        loop {
            let next_start = self.peek().span.start;
            let comments: Vec<String> = self
                .comments_between(prev_end, next_start)
                .iter()
                .map(|c| self.slice(c.span.start, c.span.end))
                .collect();

            if self.check(&close) {
                array.trailing_comments = comments;
                self.advance();
                break;
            }
            if self.check(&TokenKind::Eof) {
                return Err(self.unexpected(close.name()));
            }

            let mut item = self.parse_array_item()?;
            item.comments = comments;
            array.items.push(item);

            if self.eat(&TokenKind::Comma) {
                prev_end = self.prev_end();
                if let Some(comment) = self.same_line_comment(prev_end) {
                    if let Some(last) = array.items.last_mut() {
                        last.trailing_comment =
                            Some(self.slice(comment.span.start, comment.span.end));
                    }
                    prev_end = comment.span.end;
                }
            } else {
                prev_end = self.prev_end();
                let next_start = self.peek().span.start;
                array.trailing_comments = self
                    .comments_between(prev_end, next_start)
                    .iter()
                    .map(|c| self.slice(c.span.start, c.span.end))
                    .collect();
                self.expect(&close)?;
                break;
            }
        }

        let has_comments = !array.trailing_comments.is_empty()
            || array
                .items
                .iter()
                .any(|item| !item.comments.is_empty() || item.trailing_comment.is_some());
        array.multiline |= has_comments;
        Ok(array)
    }

    fn parse_array_item(&mut self) -> ParseResult<ArrayItem> {
        if self.eat(&TokenKind::Ellipsis) {
            let mut item = ArrayItem::positional(self.parse_expr()?);
            item.spread = true;
            return Ok(item);
        }

        let by_ref = self.eat(&TokenKind::Amp);
        let first = self.parse_expr()?;
        if !by_ref && self.eat(&TokenKind::Arrow) {
            let by_ref = self.eat(&TokenKind::Amp);
            let mut item = ArrayItem::keyed(first, self.parse_expr()?);
            item.by_ref = by_ref;
            return Ok(item);
        }

        let mut item = ArrayItem::positional(first);
        item.by_ref = by_ref;
        Ok(item)
    }

    /// Consume tokens up to a separator at bracket depth zero.
    fn parse_raw_expr(&mut self) -> ParseResult<Expr> {
        let start = self.peek().span.start;
        let first = self.pos;
        let mut stack: Vec<TokenKind> = Vec::new();

        loop {
            let token = self.peek().clone();
            if stack.is_empty() && self.at_expr_end() {
                break;
            }
            match &token.kind {
                TokenKind::Eof => {
                    return Err(ParseError::unexpected_eof(token.span, "closing bracket"));
                }
                kind if kind.is_open_bracket() => stack.push(match kind {
                    TokenKind::LParen => TokenKind::RParen,
                    TokenKind::LBrace => TokenKind::RBrace,
                    _ => TokenKind::RBracket,
                }),
                kind if kind.is_close_bracket() => match stack.pop() {
                    Some(expected) if expected == *kind => {}
                    Some(expected) => {
                        return Err(ParseError::unbalanced(
                            token.span,
                            expected.name(),
                            kind.name(),
                        ));
                    }
                    None => break,
                },
                _ => {}
            }
            self.advance();
        }

        if self.pos == first {
            return Err(self.unexpected("expression"));
        }
        Ok(Expr::Raw(self.slice(start, self.prev_end())))
    }
}

/// Parse an integer literal in any PHP notation.
fn parse_int(raw: &str) -> Option<i64> {
    let digits = raw.replace('_', "");
    let lower = digits.to_ascii_lowercase();
    if let Some(hex) = lower.strip_prefix("0x") {
        i64::from_str_radix(hex, 16).ok()
    } else if let Some(bin) = lower.strip_prefix("0b") {
        i64::from_str_radix(bin, 2).ok()
    } else if let Some(oct) = lower.strip_prefix("0o") {
        i64::from_str_radix(oct, 8).ok()
    } else if lower.len() > 1 && lower.starts_with('0') {
        i64::from_str_radix(&lower[1..], 8).ok()
    } else {
        lower.parse().ok()
    }
}
