//! Statement splitting.
//!
//! Routine bodies, trait adaptation blocks and top-level statements the
//! engine does not model are kept as source text. The splitter only tracks
//! bracket balance and the statement shapes that do not end in `;`.

use super::Parser;
use crate::ast::*;
use crate::error::{ParseError, ParseResult};
use crate::lexer::TokenKind;

/// Keywords whose header may be followed by `:` (alternative syntax).
const ALT_HEADERS: &[&str] = &["if", "foreach", "for", "while", "switch", "declare"];

/// Keywords closing an alternative-syntax block.
const ALT_ENDINGS: &[&str] = &[
    "endif",
    "endforeach",
    "endfor",
    "endwhile",
    "endswitch",
    "enddeclare",
];

/// Words that continue a control statement after its block.
const CONTINUATIONS: &[&str] = &["else", "elseif", "catch", "finally"];

fn closer_for(open: &TokenKind) -> TokenKind {
    match open {
        TokenKind::LParen => TokenKind::RParen,
        TokenKind::LBrace => TokenKind::RBrace,
        _ => TokenKind::RBracket,
    }
}

impl<'a> Parser<'a> {
    /// Consume one bracketed group, starting at its opening token.
    pub(crate) fn skip_balanced(&mut self) -> ParseResult<()> {
        let mut stack = Vec::new();
        loop {
            let token = self.advance();
            match &token.kind {
                TokenKind::Eof => return Err(ParseError::unexpected_eof(token.span, "closing bracket")),
                kind if kind.is_open_bracket() => stack.push((closer_for(kind), token.span)),
                kind if kind.is_close_bracket() => match stack.pop() {
                    Some((expected, _)) if expected == *kind => {}
                    Some((expected, _)) => {
                        return Err(ParseError::unbalanced(token.span, expected.name(), kind.name()))
                    }
                    None => {
                        return Err(ParseError::unbalanced(
                            token.span,
                            "opening bracket",
                            kind.name(),
                        ));
                    }
                },
                _ => {}
            }
            if stack.is_empty() {
                return Ok(());
            }
        }
    }

    /// Returns true if the statement at the current position ends with a
    /// block rather than a semicolon.
    fn starts_compound(&self) -> bool {
        let mut offset = 0;
        // Skip attribute groups.
        while matches!(self.peek_at(offset).kind, TokenKind::AttrOpen) {
            let mut depth = 0usize;
            loop {
                let kind = &self.peek_at(offset).kind;
                if kind.is_open_bracket() {
                    depth += 1;
                } else if kind.is_close_bracket() {
                    depth = depth.saturating_sub(1);
                } else if matches!(kind, TokenKind::Eof) {
                    return false;
                }
                offset += 1;
                if depth == 0 {
                    break;
                }
            }
        }

        let first = &self.peek_at(offset).kind;
        let second = &self.peek_at(offset + 1).kind;
        match first {
            TokenKind::LBrace => true,
            TokenKind::Ident(word) => match word.to_ascii_lowercase().as_str() {
                "if" | "for" | "foreach" | "while" | "switch" | "try" | "do" | "declare" => true,
                "function" => matches!(second, TokenKind::Ident(_) | TokenKind::Amp),
                "class" | "interface" | "trait" | "enum" => matches!(second, TokenKind::Ident(_)),
                "abstract" | "final" | "readonly" => true,
                _ => false,
            },
            _ => false,
        }
    }

    fn after_member_access(&self) -> bool {
        match self.pos.checked_sub(1).and_then(|i| self.tokens.get(i)) {
            Some(prev) => matches!(
                prev.kind,
                TokenKind::Op("->") | TokenKind::Op("?->") | TokenKind::DoubleColon
            ) || prev.kind.is_word("function")
                || prev.kind.is_word("fn"),
            None => false,
        }
    }

    /// Consume the tokens of one statement.
    pub(crate) fn scan_statement(&mut self) -> ParseResult<()> {
        // Inline HTML between tags forms a statement of its own.
        if matches!(
            self.peek().kind,
            TokenKind::CloseTag | TokenKind::InlineHtml(_) | TokenKind::OpenTag
        ) {
            while matches!(
                self.peek().kind,
                TokenKind::CloseTag | TokenKind::InlineHtml(_) | TokenKind::OpenTag
            ) {
                self.advance();
            }
            return Ok(());
        }

        let compound = self.starts_compound();
        let is_do = self.check_word("do");
        let mut stack: Vec<TokenKind> = Vec::new();
        let mut alt_depth = 0usize;

        loop {
            let token = self.peek().clone();
            let top_level = stack.is_empty() && alt_depth == 0;
            match &token.kind {
                TokenKind::Eof => {
                    return Err(match stack.last() {
                        Some(closer) => ParseError::unexpected_eof(token.span, closer.name()),
                        None => ParseError::unexpected_eof(token.span, "';'"),
                    });
                }
                kind if kind.is_open_bracket() => {
                    stack.push(closer_for(kind));
                    self.advance();
                }
                kind if kind.is_close_bracket() => {
                    match stack.pop() {
                        Some(expected) if expected == *kind => {}
                        Some(expected) => {
                            return Err(ParseError::unbalanced(
                                token.span,
                                expected.name(),
                                kind.name(),
                            ));
                        }
                        None => return Err(ParseError::unexpected_token(token.span, "';'", kind.name())),
                    }
                    self.advance();
                    if compound
                        && stack.is_empty()
                        && alt_depth == 0
                        && matches!(kind, TokenKind::RBrace)
                        && !self.continues(is_do)
                    {
                        return Ok(());
                    }
                }
                TokenKind::Semicolon if top_level => {
                    self.advance();
                    if !(compound && self.continues(is_do)) {
                        return Ok(());
                    }
                }
                TokenKind::CloseTag if top_level => return Ok(()),
                TokenKind::Ident(word)
                    if stack.is_empty()
                        && ALT_HEADERS.iter().any(|h| word.eq_ignore_ascii_case(h))
                        && matches!(self.peek_at(1).kind, TokenKind::LParen)
                        && !self.after_member_access() =>
                {
                    self.advance();
                    self.skip_balanced()?;
                    if self.eat(&TokenKind::Colon) {
                        alt_depth += 1;
                    }
                }
                TokenKind::Ident(word)
                    if stack.is_empty() && ALT_ENDINGS.iter().any(|e| word.eq_ignore_ascii_case(e)) =>
                {
                    alt_depth = alt_depth.saturating_sub(1);
                    self.advance();
                }
                _ => {
                    self.advance();
                }
            }
        }
    }

    fn continues(&self, is_do: bool) -> bool {
        let next = &self.peek().kind;
        CONTINUATIONS.iter().any(|w| next.is_word(w)) || (is_do && next.is_word("while"))
    }

    /// Split statements up to a closing brace (consumed) or the end of input.
    pub(crate) fn parse_inner_stmts(&mut self, braced: bool) -> ParseResult<Vec<InnerStmt>> {
        let mut stmts = Vec::new();
        let mut prev_end = self.last_end;

        loop {
            let next = self.peek().clone();
            let at_close = braced && matches!(next.kind, TokenKind::RBrace);
            if braced && matches!(next.kind, TokenKind::Eof) {
                return Err(ParseError::unexpected_eof(next.span, "'}'"));
            }

            let leading = self.comments_between(prev_end, next.span.start);
            let start = leading.first().map_or(next.span.start, |c| c.span.start);

            if at_close || matches!(next.kind, TokenKind::Eof) {
                // Comments before the closing brace stand alone.
                if let Some(last) = leading.last() {
                    let end = last.span.end;
                    stmts.push(InnerStmt {
                        text: self.slice(start, end),
                        blank_line_before: !stmts.is_empty() && self.has_blank_line(prev_end, start),
                    });
                }
                break;
            }

            self.scan_statement()?;
            let mut end = self.prev_end();
            if let Some(comment) = self.same_line_comment(end) {
                end = comment.span.end;
            }

            stmts.push(InnerStmt {
                text: self.slice(start, end),
                blank_line_before: !stmts.is_empty() && self.has_blank_line(prev_end, start),
            });
            prev_end = end;
        }

        if braced {
            let close = self.expect(&TokenKind::RBrace)?;
            self.last_end = close.span.end;
        }
        Ok(stmts)
    }

    /// Parse a `{ ... }` block of opaque statements.
    pub(crate) fn parse_block(&mut self) -> ParseResult<Vec<InnerStmt>> {
        let open = self.expect(&TokenKind::LBrace)?;
        self.last_end = open.span.end;
        self.parse_inner_stmts(true)
    }
}

#[cfg(test)]
mod tests {
    use crate::parse_fragment;

    fn texts(input: &str) -> Vec<String> {
        parse_fragment(input)
            .unwrap()
            .into_iter()
            .map(|s| s.text)
            .collect()
    }

    #[test]
    fn test_split_simple_statements() {
        assert_eq!(
            texts("$a = 1; return $a;"),
            vec!["$a = 1;", "return $a;"]
        );
    }

    #[test]
    fn test_split_control_statements() {
        let input = "if ($a) {\n    foo();\n} else {\n    bar();\n}\nreturn 1;";
        let stmts = texts(input);
        assert_eq!(stmts.len(), 2);
        assert_eq!(stmts[0], "if ($a) {\n    foo();\n} else {\n    bar();\n}");
        assert_eq!(stmts[1], "return 1;");
    }

    #[test]
    fn test_closure_statement_ends_at_semicolon() {
        let stmts = texts("$f = function () {\n    return 1;\n};\n$f();");
        assert_eq!(stmts.len(), 2);
    }

    #[test]
    fn test_try_catch_finally() {
        let stmts = texts("try { a(); } catch (E $e) { b(); } finally { c(); }\nd();");
        assert_eq!(stmts.len(), 2);
    }

    #[test]
    fn test_do_while() {
        let stmts = texts("do { $i++; } while ($i < 3);\nreturn $i;");
        assert_eq!(stmts.len(), 2);
        assert_eq!(stmts[0], "do { $i++; } while ($i < 3);");
    }

    #[test]
    fn test_alternative_syntax() {
        let input = "foreach ($items as $item):\n    echo $item;\nendforeach;\nreturn;";
        let stmts = texts(input);
        assert_eq!(stmts.len(), 2);
        assert!(stmts[0].ends_with("endforeach;"));
    }

    #[test]
    fn test_comments_and_blank_lines() {
        let stmts = parse_fragment("// first\n$a = 1; // same line\n\nreturn $a;\n// end").unwrap();
        assert_eq!(stmts.len(), 3);
        assert_eq!(stmts[0].text, "// first\n$a = 1; // same line");
        assert!(stmts[1].blank_line_before);
        assert_eq!(stmts[2].text, "// end");
    }

    #[test]
    fn test_missing_semicolon_is_an_error() {
        assert!(parse_fragment("return $a").is_err());
    }

    #[test]
    fn test_unbalanced_brackets_are_an_error() {
        assert!(parse_fragment("invalid php code {{{").is_err());
        assert!(parse_fragment("foo(];").is_err());
    }
}
