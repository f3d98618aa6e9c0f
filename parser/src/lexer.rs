//! Lexer (tokenizer) for PHP source text.
//!
//! Words (keywords and names alike) are produced as `Ident` tokens; the
//! parser recognises keywords by context, since PHP allows most keywords as
//! member names.

use crate::{ParseError, ParseResult, Span};

/// Multi-character operators, longest first.
const OPERATORS: &[&str] = &[
    "<<=", ">>=", "**=", "...", "<=>", "===", "!==", "??=", "?->", "::", "->", "=>", "==", "!=",
    "<>", "<=", ">=", "&&", "||", "??", "++", "--", "+=", "-=", "*=", "/=", ".=", "%=", "&=",
    "|=", "^=", "<<", ">>", "**",
];

/// Token types.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// `<?php`
    OpenTag,
    /// `?>`
    CloseTag,
    /// Text outside of PHP tags.
    InlineHtml(String),
    /// `//`, `#` or `/* */` comment, markers included.
    Comment(String),
    /// `#[` opening an attribute group.
    AttrOpen,

    // Words and literals
    Ident(String),
    /// Variable name without the `$`.
    Variable(String),
    Int(String),
    Float(String),
    String(StringToken),
    /// Heredoc or nowdoc, raw text from `<<<` to the closing label.
    Heredoc(String),

    // Symbols
    LParen,     // (
    RParen,     // )
    LBrace,     // {
    RBrace,     // }
    LBracket,   // [
    RBracket,   // ]
    Comma,      // ,
    Semicolon,  // ;
    Colon,      // :
    DoubleColon, // ::
    Eq,         // =
    Arrow,      // =>
    Question,   // ?
    Pipe,       // |
    Amp,        // &
    Ellipsis,   // ...
    Minus,      // -
    /// Any other operator.
    Op(&'static str),

    // End of file
    Eof,
}

/// A quoted string literal.
#[derive(Debug, Clone, PartialEq)]
pub struct StringToken {
    /// Source spelling, quotes included.
    pub raw: String,
    /// Decoded value (escape sequences resolved).
    pub value: String,
    /// Double-quoted or backtick string containing variables.
    pub interpolated: bool,
}

impl TokenKind {
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::OpenTag => "'<?php'",
            TokenKind::CloseTag => "'?>'",
            TokenKind::InlineHtml(_) => "inline HTML",
            TokenKind::Comment(_) => "comment",
            TokenKind::AttrOpen => "'#['",
            TokenKind::Ident(_) => "identifier",
            TokenKind::Variable(_) => "variable",
            TokenKind::Int(_) => "integer",
            TokenKind::Float(_) => "float",
            TokenKind::String(_) => "string",
            TokenKind::Heredoc(_) => "heredoc",
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::LBrace => "'{'",
            TokenKind::RBrace => "'}'",
            TokenKind::LBracket => "'['",
            TokenKind::RBracket => "']'",
            TokenKind::Comma => "','",
            TokenKind::Semicolon => "';'",
            TokenKind::Colon => "':'",
            TokenKind::DoubleColon => "'::'",
            TokenKind::Eq => "'='",
            TokenKind::Arrow => "'=>'",
            TokenKind::Question => "'?'",
            TokenKind::Pipe => "'|'",
            TokenKind::Amp => "'&'",
            TokenKind::Ellipsis => "'...'",
            TokenKind::Minus => "'-'",
            TokenKind::Op(_) => "operator",
            TokenKind::Eof => "end of input",
        }
    }

    /// Returns true for the given word, compared case-insensitively.
    pub fn is_word(&self, word: &str) -> bool {
        matches!(self, TokenKind::Ident(s) if s.eq_ignore_ascii_case(word))
    }

    /// Returns true for `(`, `[` and `{` (and `#[`).
    pub fn is_open_bracket(&self) -> bool {
        matches!(
            self,
            TokenKind::LParen | TokenKind::LBracket | TokenKind::LBrace | TokenKind::AttrOpen
        )
    }

    /// Returns true for `)`, `]` and `}`.
    pub fn is_close_bracket(&self) -> bool {
        matches!(
            self,
            TokenKind::RParen | TokenKind::RBracket | TokenKind::RBrace
        )
    }

    fn from_operator(op: &'static str) -> Self {
        match op {
            "(" => TokenKind::LParen,
            ")" => TokenKind::RParen,
            "{" => TokenKind::LBrace,
            "}" => TokenKind::RBrace,
            "[" => TokenKind::LBracket,
            "]" => TokenKind::RBracket,
            "," => TokenKind::Comma,
            ";" => TokenKind::Semicolon,
            ":" => TokenKind::Colon,
            "::" => TokenKind::DoubleColon,
            "=" => TokenKind::Eq,
            "=>" => TokenKind::Arrow,
            "?" => TokenKind::Question,
            "|" => TokenKind::Pipe,
            "&" => TokenKind::Amp,
            "..." => TokenKind::Ellipsis,
            "-" => TokenKind::Minus,
            other => TokenKind::Op(other),
        }
    }
}

/// A token with its span.
#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    pub fn eof(pos: usize, line: usize, column: usize) -> Self {
        Self {
            kind: TokenKind::Eof,
            span: Span::new(pos, pos, line, column),
        }
    }

    pub fn is_comment(&self) -> bool {
        matches!(self.kind, TokenKind::Comment(_))
    }

    /// String literal or heredoc: its text is program data.
    pub fn is_literal_text(&self) -> bool {
        matches!(self.kind, TokenKind::String(_) | TokenKind::Heredoc(_))
    }
}

/// Offsets in `source` of the lines that begin inside a string literal or
/// heredoc token. Those lines are part of a value and keep their leading
/// blanks.
pub(crate) fn literal_line_starts(source: &str, tokens: &[Token]) -> Vec<usize> {
    tokens
        .iter()
        .filter(|t| t.is_literal_text())
        .flat_map(|t| {
            source[t.span.start..t.span.end]
                .match_indices('\n')
                .map(move |(i, _)| t.span.start + i + 1)
        })
        .collect()
}

/// [`literal_line_starts`] for a standalone code fragment. Text that does not
/// lex has no protected lines.
pub(crate) fn fragment_literal_lines(code: &str) -> Vec<usize> {
    if !code.contains('\n') {
        return Vec::new();
    }
    match Lexer::for_code(code).tokenize() {
        Ok(tokens) => literal_line_starts(code, &tokens),
        Err(_) => Vec::new(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Html,
    Code,
}

/// Lexer state.
pub struct Lexer<'a> {
    input: &'a str,
    pos: usize,
    line: usize,
    column: usize,
    mode: Mode,
}

impl<'a> Lexer<'a> {
    /// Lexer for a whole file: text before `<?php` is inline HTML.
    pub fn for_file(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            line: 1,
            column: 1,
            mode: Mode::Html,
        }
    }

    /// Lexer for a code fragment without an opening tag.
    pub fn for_code(input: &'a str) -> Self {
        Self {
            mode: Mode::Code,
            ..Self::for_file(input)
        }
    }

    /// Tokenize all input into a vector of tokens.
    pub fn tokenize(mut self) -> ParseResult<Vec<Token>> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let is_eof = matches!(token.kind, TokenKind::Eof);
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        Ok(tokens)
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn current_span(&self) -> Span {
        Span::new(self.pos, self.pos, self.line, self.column)
    }

    fn span_from(&self, start: usize, start_line: usize, start_col: usize) -> Span {
        Span::new(start, self.pos, start_line, start_col)
    }

    fn peek_char(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn peek_nth(&self, n: usize) -> Option<char> {
        self.rest().chars().nth(n)
    }

    fn next_char(&mut self) -> Option<char> {
        let c = self.peek_char()?;
        self.pos += c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn advance_by(&mut self, text: &str) {
        for _ in text.chars() {
            self.next_char();
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek_char() {
            if c.is_whitespace() {
                self.next_char();
            } else {
                break;
            }
        }
    }

    fn at_open_tag(&self) -> bool {
        let rest = self.rest();
        rest.len() >= 5
            && rest.is_char_boundary(5)
            && rest[..5].eq_ignore_ascii_case("<?php")
            && rest[5..].chars().next().map_or(true, char::is_whitespace)
    }

    fn next_token(&mut self) -> ParseResult<Token> {
        if self.mode == Mode::Html {
            return Ok(self.next_html_token());
        }

        self.skip_whitespace();

        let start = self.pos;
        let start_line = self.line;
        let start_col = self.column;

        let Some(c) = self.peek_char() else {
            return Ok(Token::eof(self.pos, self.line, self.column));
        };

        let kind = if self.rest().starts_with("?>") {
            self.advance_by("?>");
            self.mode = Mode::Html;
            TokenKind::CloseTag
        } else if self.rest().starts_with("#[") {
            self.advance_by("#[");
            TokenKind::AttrOpen
        } else if c == '#' || self.rest().starts_with("//") {
            self.scan_line_comment()
        } else if self.rest().starts_with("/*") {
            self.scan_block_comment(start, start_line, start_col)?
        } else if self.rest().starts_with("<<<") {
            self.scan_heredoc(start, start_line, start_col)?
        } else if c == '$' && self.peek_nth(1).is_some_and(is_ident_start) {
            self.next_char();
            TokenKind::Variable(self.scan_word())
        } else if is_ident_start(c) || (c == '\\' && self.peek_nth(1).is_some_and(is_ident_start)) {
            TokenKind::Ident(self.scan_name())
        } else if c.is_ascii_digit() || (c == '.' && self.peek_nth(1).is_some_and(|d| d.is_ascii_digit())) {
            self.scan_number()
        } else if c == '\'' {
            self.scan_single_quoted(start, start_line, start_col)?
        } else if c == '"' || c == '`' {
            self.scan_double_quoted(c, start, start_line, start_col)?
        } else {
            self.scan_operator(start, start_line, start_col)?
        };

        Ok(Token::new(
            kind,
            self.span_from(start, start_line, start_col),
        ))
    }

    fn next_html_token(&mut self) -> Token {
        let start = self.pos;
        let start_line = self.line;
        let start_col = self.column;

        if self.rest().is_empty() {
            return Token::eof(self.pos, self.line, self.column);
        }

        if self.at_open_tag() {
            self.advance_by("<?php");
            let span = self.span_from(start, start_line, start_col);
            // The single whitespace character after the tag belongs to it.
            if self.peek_char().is_some_and(char::is_whitespace) {
                self.next_char();
            }
            self.mode = Mode::Code;
            return Token::new(TokenKind::OpenTag, span);
        }

        while !self.rest().is_empty() && !self.at_open_tag() {
            self.next_char();
        }
        let text = self.input[start..self.pos].to_string();
        Token::new(
            TokenKind::InlineHtml(text),
            self.span_from(start, start_line, start_col),
        )
    }

    fn scan_line_comment(&mut self) -> TokenKind {
        let start = self.pos;
        while let Some(c) = self.peek_char() {
            if c == '\n' || self.rest().starts_with("?>") {
                break;
            }
            self.next_char();
        }
        TokenKind::Comment(self.input[start..self.pos].trim_end().to_string())
    }

    fn scan_block_comment(
        &mut self,
        start: usize,
        start_line: usize,
        start_col: usize,
    ) -> ParseResult<TokenKind> {
        self.advance_by("/*");
        match self.rest().find("*/") {
            Some(offset) => {
                let end = self.pos + offset + 2;
                while self.pos < end {
                    self.next_char();
                }
                Ok(TokenKind::Comment(self.input[start..self.pos].to_string()))
            }
            None => Err(ParseError::unterminated(
                self.span_from(start, start_line, start_col),
                "comment",
            )),
        }
    }

    fn scan_heredoc(
        &mut self,
        start: usize,
        start_line: usize,
        start_col: usize,
    ) -> ParseResult<TokenKind> {
        self.advance_by("<<<");
        while matches!(self.peek_char(), Some(' ') | Some('\t')) {
            self.next_char();
        }
        let quote = match self.peek_char() {
            Some(q @ ('\'' | '"')) => {
                self.next_char();
                Some(q)
            }
            _ => None,
        };
        if !self.peek_char().is_some_and(is_ident_start) {
            return Err(ParseError::unexpected_token(
                self.current_span(),
                "heredoc label",
                "invalid character",
            ));
        }
        let label = self.scan_word();
        if let Some(q) = quote {
            if self.peek_char() != Some(q) {
                return Err(ParseError::unterminated(
                    self.span_from(start, start_line, start_col),
                    "heredoc label",
                ));
            }
            self.next_char();
        }

        // Find a line whose first non-blank text is the label.
        loop {
            match self.next_char() {
                None => {
                    return Err(ParseError::unterminated(
                        self.span_from(start, start_line, start_col),
                        "heredoc",
                    ))
                }
                Some('\n') => {
                    while matches!(self.peek_char(), Some(' ') | Some('\t')) {
                        self.next_char();
                    }
                    let rest = self.rest();
                    if rest.starts_with(label.as_str())
                        && !rest[label.len()..].chars().next().is_some_and(is_ident_char)
                    {
                        self.advance_by(&label);
                        break;
                    }
                }
                Some(_) => {}
            }
        }

        Ok(TokenKind::Heredoc(self.input[start..self.pos].to_string()))
    }

    /// Scan identifier characters (no namespace separators).
    fn scan_word(&mut self) -> String {
        let start = self.pos;
        while self.peek_char().is_some_and(is_ident_char) {
            self.next_char();
        }
        self.input[start..self.pos].to_string()
    }

    /// Scan a possibly qualified name (`Foo\Bar`, `\Foo`, `Foo\` before `{`).
    fn scan_name(&mut self) -> String {
        let start = self.pos;
        if self.peek_char() == Some('\\') {
            self.next_char();
        }
        loop {
            self.scan_word();
            if self.peek_char() != Some('\\') {
                break;
            }
            match self.peek_nth(1) {
                Some(c) if is_ident_start(c) => {
                    self.next_char();
                }
                Some('{') => {
                    // Group import prefix: keep the trailing separator.
                    self.next_char();
                    break;
                }
                _ => break,
            }
        }
        self.input[start..self.pos].to_string()
    }

    fn scan_number(&mut self) -> TokenKind {
        let start = self.pos;
        let lower_prefix = self.rest().get(..2).map(str::to_ascii_lowercase);
        if matches!(lower_prefix.as_deref(), Some("0x") | Some("0b") | Some("0o")) {
            self.next_char();
            self.next_char();
            while self.peek_char().is_some_and(|c| c.is_ascii_hexdigit() || c == '_') {
                self.next_char();
            }
            return TokenKind::Int(self.input[start..self.pos].to_string());
        }

        let mut is_float = false;
        self.scan_digits();
        if self.peek_char() == Some('.') && self.peek_nth(1).is_some_and(|c| c.is_ascii_digit()) {
            is_float = true;
            self.next_char();
            self.scan_digits();
        }
        if matches!(self.peek_char(), Some('e') | Some('E')) {
            let exponent_digit = match self.peek_nth(1) {
                Some('+') | Some('-') => self.peek_nth(2),
                other => other,
            };
            if exponent_digit.is_some_and(|c| c.is_ascii_digit()) {
                is_float = true;
                self.next_char();
                if matches!(self.peek_char(), Some('+') | Some('-')) {
                    self.next_char();
                }
                self.scan_digits();
            }
        }

        let raw = self.input[start..self.pos].to_string();
        if is_float {
            TokenKind::Float(raw)
        } else {
            TokenKind::Int(raw)
        }
    }

    fn scan_digits(&mut self) {
        while self.peek_char().is_some_and(|c| c.is_ascii_digit() || c == '_') {
            self.next_char();
        }
    }

    fn scan_single_quoted(
        &mut self,
        start: usize,
        start_line: usize,
        start_col: usize,
    ) -> ParseResult<TokenKind> {
        self.next_char();
        let mut value = String::new();
        loop {
            match self.next_char() {
                None => {
                    return Err(ParseError::unterminated(
                        self.span_from(start, start_line, start_col),
                        "string literal",
                    ));
                }
                Some('\'') => break,
                Some('\\') => match self.peek_char() {
                    Some(c @ ('\\' | '\'')) => {
                        self.next_char();
                        value.push(c);
                    }
                    _ => value.push('\\'),
                },
                Some(c) => value.push(c),
            }
        }
        Ok(TokenKind::String(StringToken {
            raw: self.input[start..self.pos].to_string(),
            value,
            interpolated: false,
        }))
    }

    fn scan_double_quoted(
        &mut self,
        quote: char,
        start: usize,
        start_line: usize,
        start_col: usize,
    ) -> ParseResult<TokenKind> {
        self.next_char();
        let mut value = String::new();
        let mut interpolated = quote == '`';
        loop {
            match self.next_char() {
                None => {
                    return Err(ParseError::unterminated(
                        self.span_from(start, start_line, start_col),
                        "string literal",
                    ));
                }
                Some(c) if c == quote => break,
                Some('\\') => {
                    let escaped = match self.next_char() {
                        Some('n') => "\n".to_string(),
                        Some('t') => "\t".to_string(),
                        Some('r') => "\r".to_string(),
                        Some('v') => "\u{0B}".to_string(),
                        Some('e') => "\u{1B}".to_string(),
                        Some('f') => "\u{0C}".to_string(),
                        Some('0') => "\0".to_string(),
                        Some('\\') => "\\".to_string(),
                        Some('$') => "$".to_string(),
                        Some(c) if c == quote => c.to_string(),
                        Some(c) => format!("\\{}", c),
                        None => {
                            return Err(ParseError::unterminated(
                                self.current_span(),
                                "escape sequence",
                            ));
                        }
                    };
                    value.push_str(&escaped);
                }
                Some('$') => {
                    if self.peek_char().is_some_and(|c| is_ident_start(c) || c == '{') {
                        interpolated = true;
                    }
                    value.push('$');
                }
                Some('{') => {
                    if self.peek_char() == Some('$') {
                        interpolated = true;
                    }
                    value.push('{');
                }
                Some(c) => value.push(c),
            }
        }
        Ok(TokenKind::String(StringToken {
            raw: self.input[start..self.pos].to_string(),
            value,
            interpolated,
        }))
    }

    fn scan_operator(
        &mut self,
        start: usize,
        start_line: usize,
        start_col: usize,
    ) -> ParseResult<TokenKind> {
        if let Some(&op) = OPERATORS.iter().find(|op| self.rest().starts_with(**op)) {
            self.advance_by(op);
            return Ok(TokenKind::from_operator(op));
        }

        let Some(c) = self.next_char() else {
            return Ok(TokenKind::Eof);
        };
        let op: &'static str = match c {
            '(' => "(",
            ')' => ")",
            '{' => "{",
            '}' => "}",
            '[' => "[",
            ']' => "]",
            ',' => ",",
            ';' => ";",
            ':' => ":",
            '=' => "=",
            '?' => "?",
            '|' => "|",
            '&' => "&",
            '-' => "-",
            '+' => "+",
            '*' => "*",
            '/' => "/",
            '%' => "%",
            '.' => ".",
            '!' => "!",
            '<' => "<",
            '>' => ">",
            '^' => "^",
            '~' => "~",
            '@' => "@",
            '$' => "$",
            '\\' => "\\",
            _ => {
                return Err(ParseError::unexpected_token(
                    self.span_from(start, start_line, start_col),
                    "token",
                    &format!("character '{}'", c),
                ));
            }
        };
        Ok(TokenKind::from_operator(op))
    }
}

fn is_ident_start(c: char) -> bool {
    c == '_' || c.is_ascii_alphabetic() || !c.is_ascii()
}

fn is_ident_char(c: char) -> bool {
    c == '_' || c.is_ascii_alphanumeric() || !c.is_ascii()
}
