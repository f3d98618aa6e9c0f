//! Top-level statement parsing.
//!
//! Handles the file envelope and the statements of the global scope and of
//! namespace blocks:
//! - `declare(...)`
//! - `namespace Name;` and `namespace Name { ... }`
//! - `use` imports (plain, `function`, `const`, grouped)
//! - class declarations
//! - anything else as opaque statement text

use super::Parser;
use crate::ast::*;
use crate::error::{ParseError, ParseResult};
use crate::lexer::TokenKind;

/// Where a statement list stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scope {
    /// File level: end of input.
    File,
    /// `namespace Name;`: the next namespace declaration or end of input.
    Namespace,
    /// `namespace Name { ... }`: the closing brace.
    BracedNamespace,
}

impl<'a> Parser<'a> {
    /// Parse a complete file.
    pub fn parse_source_file(&mut self) -> ParseResult<SourceFile> {
        let mut file = SourceFile::default();

        if let TokenKind::InlineHtml(text) = &self.peek().kind {
            file.prologue = Some(text.clone());
            self.advance();
        }
        if !self.check(&TokenKind::OpenTag) {
            return Err(ParseError::missing_open_tag());
        }
        let open = self.advance();
        self.last_end = open.span.end;

        let (stmts, trailing) = self.parse_top_stmts(Scope::File)?;
        file.stmts = stmts;
        file.trailing_comments = trailing;
        file.epilogue = self.epilogue.take();
        Ok(file)
    }

    fn at_namespace_decl(&self) -> bool {
        self.check_word("namespace")
            && matches!(
                self.peek_at(1).kind,
                TokenKind::Ident(_) | TokenKind::LBrace
            )
    }

    fn at_class_decl(&self) -> bool {
        let mut offset = 0;
        while ["abstract", "final", "readonly"]
            .iter()
            .any(|w| self.peek_at(offset).kind.is_word(w))
        {
            offset += 1;
        }
        self.peek_at(offset).kind.is_word("class")
            && matches!(self.peek_at(offset + 1).kind, TokenKind::Ident(_))
    }

    fn parse_top_stmts(&mut self, scope: Scope) -> ParseResult<(Vec<Stmt>, Vec<String>)> {
        let mut stmts = Vec::new();
        loop {
            match self.peek().kind {
                TokenKind::Eof if scope == Scope::BracedNamespace => {
                    return Err(self.unexpected("'}'"));
                }
                TokenKind::Eof => break,
                TokenKind::RBrace if scope == Scope::BracedNamespace => break,
                _ if scope == Scope::Namespace && self.at_namespace_decl() => {
                    return Ok((stmts, Vec::new()));
                }
                TokenKind::CloseTag => {
                    if let Some(stmt) = self.parse_inline_html()? {
                        stmts.push(stmt);
                    }
                }
                _ => stmts.push(self.parse_top_stmt(scope)?),
            }
        }
        let trailing = self.closing_comments();
        Ok((stmts, trailing))
    }

    /// `?> text <?php`. A closing tag at the end of the file becomes the
    /// epilogue.
    fn parse_inline_html(&mut self) -> ParseResult<Option<Stmt>> {
        self.advance();
        let text = match &self.peek().kind {
            TokenKind::InlineHtml(text) => {
                let text = text.clone();
                self.advance();
                text
            }
            _ => String::new(),
        };
        match self.peek().kind {
            TokenKind::Eof => {
                self.epilogue = Some(text);
                Ok(None)
            }
            TokenKind::OpenTag => {
                let open = self.advance();
                self.last_end = open.span.end;
                Ok(Some(Stmt::InlineHtml(text)))
            }
            _ => Err(self.unexpected("'<?php'")),
        }
    }

    fn parse_top_stmt(&mut self, scope: Scope) -> ParseResult<Stmt> {
        let mut trivia = self.leading_trivia();
        trivia.attributes = self.parse_attributes()?;

        let mut stmt = if trivia.attributes.is_empty() && self.at_namespace_decl() {
            if scope != Scope::File {
                return Err(self.unexpected("statement"));
            }
            return self.parse_namespace(trivia).map(Stmt::Namespace);
        } else if trivia.attributes.is_empty() && self.check_word("use") {
            Stmt::Use(self.parse_use(trivia)?)
        } else if self.at_class_decl() {
            return self.parse_class(trivia).map(Stmt::Class);
        } else if trivia.attributes.is_empty()
            && self.check_word("declare")
            && matches!(self.peek_at(1).kind, TokenKind::LParen)
        {
            let start = self.peek().span.start;
            self.scan_statement()?;
            Stmt::Declare(RawStmt {
                text: self.slice(start, self.prev_end()),
                trivia,
            })
        } else {
            let start = self.peek().span.start;
            self.scan_statement()?;
            Stmt::Raw(RawStmt {
                text: self.slice(start, self.prev_end()),
                trivia,
            })
        };

        if let Some(trivia) = stmt.trivia_mut() {
            self.finish_stmt(trivia);
        }
        Ok(stmt)
    }

    // ==================== NAMESPACE ====================

    fn parse_namespace(&mut self, mut trivia: Trivia) -> ParseResult<NamespaceDecl> {
        self.expect_word("namespace")?;
        let name = match &self.peek().kind {
            TokenKind::Ident(name) => {
                let name = name.clone();
                self.advance();
                Some(name)
            }
            _ => None,
        };

        if self.check(&TokenKind::LBrace) {
            let open = self.advance();
            self.last_end = open.span.end;
            let (stmts, trailing_comments) = self.parse_top_stmts(Scope::BracedNamespace)?;
            self.expect(&TokenKind::RBrace)?;
            self.finish_stmt(&mut trivia);
            return Ok(NamespaceDecl {
                trivia,
                name,
                braced: true,
                stmts,
                trailing_comments,
            });
        }

        let Some(name) = name else {
            return Err(self.unexpected("namespace name"));
        };
        self.expect(&TokenKind::Semicolon)?;
        self.finish_stmt(&mut trivia);
        let (stmts, trailing_comments) = self.parse_top_stmts(Scope::Namespace)?;
        Ok(NamespaceDecl {
            trivia,
            name: Some(name),
            braced: false,
            stmts,
            trailing_comments,
        })
    }

    // ==================== IMPORTS ====================

    fn parse_use_kind(&mut self) -> Option<UseKind> {
        let kind = if self.check_word("function") {
            UseKind::Function
        } else if self.check_word("const") {
            UseKind::Const
        } else {
            return None;
        };
        // `use function\foo;` lexes as a single name, so a following name
        // is required.
        if matches!(self.peek_at(1).kind, TokenKind::Ident(_)) {
            self.advance();
            Some(kind)
        } else {
            None
        }
    }

    fn parse_use_item(&mut self, kind: Option<UseKind>) -> ParseResult<UseItem> {
        let name = self.expect_name()?;
        let alias = if self.eat_word("as") {
            Some(self.expect_name()?)
        } else {
            None
        };
        Ok(UseItem { kind, name, alias })
    }

    pub(crate) fn parse_use(&mut self, trivia: Trivia) -> ParseResult<UseStmt> {
        self.expect_word("use")?;
        let kind = self.parse_use_kind().unwrap_or_default();

        let mut stmt = UseStmt {
            trivia,
            kind,
            prefix: None,
            items: Vec::new(),
        };

        let first = self.expect_name()?;
        if first.ends_with('\\') && self.eat(&TokenKind::LBrace) {
            stmt.prefix = Some(first.trim_end_matches('\\').to_string());
            while !self.check(&TokenKind::RBrace) {
                let item_kind = self.parse_use_kind();
                stmt.items.push(self.parse_use_item(item_kind)?);
                if !self.eat(&TokenKind::Comma) {
                    break;
                }
            }
            self.expect(&TokenKind::RBrace)?;
        } else {
            let alias = if self.eat_word("as") {
                Some(self.expect_name()?)
            } else {
                None
            };
            stmt.items.push(UseItem {
                kind: None,
                name: first,
                alias,
            });
            while self.eat(&TokenKind::Comma) {
                stmt.items.push(self.parse_use_item(None)?);
            }
        }

        self.expect(&TokenKind::Semicolon)?;
        Ok(stmt)
    }
}
