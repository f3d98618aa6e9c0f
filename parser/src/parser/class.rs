//! Class declaration parsing.

use super::Parser;
use crate::ast::*;
use crate::error::ParseResult;
use crate::lexer::TokenKind;

impl<'a> Parser<'a> {
    pub(crate) fn parse_class(&mut self, mut trivia: Trivia) -> ParseResult<ClassDecl> {
        let mut modifiers = Vec::new();
        loop {
            let modifier = if self.check_word("abstract") {
                ClassModifier::Abstract
            } else if self.check_word("final") {
                ClassModifier::Final
            } else if self.check_word("readonly") {
                ClassModifier::Readonly
            } else {
                break;
            };
            self.advance();
            modifiers.push(modifier);
        }

        self.expect_word("class")?;
        let name = self.expect_name()?;

        let extends = if self.eat_word("extends") {
            Some(self.expect_name()?)
        } else {
            None
        };

        let mut implements = Vec::new();
        if self.eat_word("implements") {
            implements.push(self.expect_name()?);
            while self.eat(&TokenKind::Comma) {
                implements.push(self.expect_name()?);
            }
        }

        let open = self.expect(&TokenKind::LBrace)?;
        self.last_end = open.span.end;

        let mut members = Vec::new();
        while !self.check(&TokenKind::RBrace) {
            if self.check(&TokenKind::Eof) {
                return Err(self.unexpected("'}'"));
            }
            members.push(self.parse_member()?);
        }
        let trailing_comments = self.closing_comments();
        self.expect(&TokenKind::RBrace)?;
        self.finish_stmt(&mut trivia);

        Ok(ClassDecl {
            trivia,
            modifiers,
            name,
            extends,
            implements,
            members,
            trailing_comments,
        })
    }

    // ==================== MEMBERS ====================

    fn parse_member(&mut self) -> ParseResult<MemberStmt> {
        let mut trivia = self.leading_trivia();
        trivia.attributes = self.parse_attributes()?;

        if self.check_word("use") {
            let member = Member::MixinUse(self.parse_mixin_use()?);
            self.finish_stmt(&mut trivia);
            return Ok(MemberStmt { trivia, member });
        }

        let modifiers = self.parse_modifiers();

        let member = if self.eat_word("const") {
            Member::Constants(self.parse_constants(modifiers)?)
        } else if self.check_word("function") {
            Member::Routine(self.parse_routine(modifiers)?)
        } else if modifiers.is_empty() {
            return Err(self.unexpected("class member"));
        } else {
            Member::Fields(self.parse_fields(modifiers)?)
        };

        self.finish_stmt(&mut trivia);
        Ok(MemberStmt { trivia, member })
    }

    fn parse_modifiers(&mut self) -> Modifiers {
        let mut modifiers = Modifiers::default();
        loop {
            let TokenKind::Ident(word) = &self.peek().kind else {
                break;
            };
            match word.to_ascii_lowercase().as_str() {
                "public" => modifiers.visibility = Some(Visibility::Public),
                "protected" => modifiers.visibility = Some(Visibility::Protected),
                "private" => modifiers.visibility = Some(Visibility::Private),
                "static" => modifiers.is_static = true,
                "abstract" => modifiers.is_abstract = true,
                "final" => modifiers.is_final = true,
                "readonly" => modifiers.is_readonly = true,
                "var" => modifiers.is_var = true,
                _ => break,
            }
            self.advance();
        }
        modifiers
    }

    fn parse_mixin_use(&mut self) -> ParseResult<MixinUse> {
        self.expect_word("use")?;
        let mut names = vec![self.expect_name()?];
        while self.eat(&TokenKind::Comma) {
            names.push(self.expect_name()?);
        }

        let adaptations = if self.check(&TokenKind::LBrace) {
            Some(self.parse_block()?)
        } else {
            self.expect(&TokenKind::Semicolon)?;
            None
        };
        Ok(MixinUse { names, adaptations })
    }

    fn parse_constants(&mut self, modifiers: Modifiers) -> ParseResult<ConstantGroup> {
        // A typed constant has a second name before `=`.
        let ty = if matches!(self.peek_at(1).kind, TokenKind::Eq) {
            None
        } else {
            Some(self.parse_type()?)
        };

        let mut items = Vec::new();
        loop {
            let name = self.expect_name()?;
            self.expect(&TokenKind::Eq)?;
            let value = self.parse_expr()?;
            items.push(ConstItem { name, value });
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        self.expect(&TokenKind::Semicolon)?;
        Ok(ConstantGroup {
            modifiers,
            ty,
            items,
        })
    }

    fn parse_fields(&mut self, modifiers: Modifiers) -> ParseResult<FieldGroup> {
        let ty = if self.check(&TokenKind::Variable(String::new())) {
            None
        } else {
            Some(self.parse_type()?)
        };

        let mut items = Vec::new();
        loop {
            let name = self.expect_variable()?;
            let default = if self.eat(&TokenKind::Eq) {
                Some(self.parse_expr()?)
            } else {
                None
            };
            items.push(FieldItem { name, default });
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        self.expect(&TokenKind::Semicolon)?;
        Ok(FieldGroup {
            modifiers,
            ty,
            items,
        })
    }

    // ==================== ROUTINES ====================

    fn parse_routine(&mut self, modifiers: Modifiers) -> ParseResult<Routine> {
        self.expect_word("function")?;
        let by_ref = self.eat(&TokenKind::Amp);
        let name = self.expect_name()?;

        let open = self.expect(&TokenKind::LParen)?;
        let params_multiline = !self.check(&TokenKind::RParen)
            && self.has_newline(open.span.end, self.peek().span.start);
        let mut params = Vec::new();
        while !self.check(&TokenKind::RParen) {
            params.push(self.parse_param()?);
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        self.expect(&TokenKind::RParen)?;

        let return_type = if self.eat(&TokenKind::Colon) {
            Some(self.parse_type()?)
        } else {
            None
        };

        let mut body_layout = BodyLayout::NextLine;
        let body = if self.eat(&TokenKind::Semicolon) {
            None
        } else {
            let signature_end = self.prev_end();
            let open = self.peek().span.start;
            let body = self.parse_block()?;
            if !self.has_newline(signature_end, open) {
                body_layout = if self.has_newline(open, self.prev_end()) {
                    BodyLayout::SameLine
                } else {
                    BodyLayout::Inline
                };
            }
            Some(body)
        };

        Ok(Routine {
            modifiers,
            by_ref,
            name,
            params,
            params_multiline,
            return_type,
            body,
            body_layout,
        })
    }

    fn parse_param(&mut self) -> ParseResult<Param> {
        let attributes = self.parse_attributes()?;
        let modifiers = self.parse_modifiers();

        let ty = match self.peek().kind {
            TokenKind::Variable(_) | TokenKind::Amp | TokenKind::Ellipsis => None,
            _ => Some(self.parse_type()?),
        };
        let by_ref = self.eat(&TokenKind::Amp);
        let variadic = self.eat(&TokenKind::Ellipsis);
        let name = self.expect_variable()?;
        let default = if self.eat(&TokenKind::Eq) {
            Some(self.parse_expr()?)
        } else {
            None
        };

        Ok(Param {
            attributes,
            modifiers,
            ty,
            by_ref,
            variadic,
            name,
            default,
        })
    }
}
