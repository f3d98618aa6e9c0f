//! Source printer.
//!
//! Emits PHP source text for a [`SourceFile`]. Parsed nodes keep their
//! spacing and literal spelling; synthesized nodes get the conventional
//! layout (one blank line between member categories and routines, none
//! between consecutive imports or members of one category).

use crate::ast::*;
use crate::lexer::fragment_literal_lines;

/// Output layout settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintConfig {
    /// One indentation level.
    pub indent: String,
    pub line_ending: String,
}

impl Default for PrintConfig {
    fn default() -> Self {
        Self {
            indent: "    ".to_string(),
            line_ending: "\n".to_string(),
        }
    }
}

impl PrintConfig {
    pub fn with_indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = indent.into();
        self
    }

    pub fn with_line_ending(mut self, line_ending: impl Into<String>) -> Self {
        self.line_ending = line_ending.into();
        self
    }
}

/// Line ending used by most lines of `text`: `"\r\n"` or `"\n"`.
pub fn dominant_line_ending(text: &str) -> &'static str {
    let crlf = text.matches("\r\n").count();
    let lf = text.matches('\n').count() - crlf;
    if crlf > lf {
        "\r\n"
    } else {
        "\n"
    }
}

/// Print a file.
pub fn print_file(file: &SourceFile, config: &PrintConfig) -> String {
    let mut printer = Printer {
        config,
        out: String::new(),
    };
    printer.file(file);

    let out = printer.out.replace("\r\n", "\n");
    if config.line_ending == "\n" {
        out
    } else {
        out.replace('\n', &config.line_ending)
    }
}

/// Print a single expression at the given indentation.
pub fn print_expr(expr: &Expr, indent: &str, config: &PrintConfig) -> String {
    let printer = Printer {
        config,
        out: String::new(),
    };
    printer.expr(expr, indent)
}

/// Indent every non-empty line after the first. Lines that continue a
/// string literal are copied unchanged.
fn reindent(text: &str, indent: &str) -> String {
    let verbatim = fragment_literal_lines(text);
    let mut out = String::with_capacity(text.len());
    let mut line_start = 0;
    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            out.push('\n');
            if !line.trim().is_empty() && !verbatim.contains(&line_start) {
                out.push_str(indent);
            }
        }
        out.push_str(line);
        line_start += line.len() + 1;
    }
    out
}

fn default_stmt_gap(prev: Option<&Stmt>, stmt: &Stmt) -> bool {
    !matches!((prev, stmt), (Some(Stmt::Use(_)), Stmt::Use(_)))
}

fn default_member_gap(prev: Option<&MemberStmt>, member: &MemberStmt) -> bool {
    match prev {
        None => false,
        Some(prev) => {
            let category = member.member.category();
            category == MemberCategory::Routine || prev.member.category() != category
        }
    }
}

struct Printer<'a> {
    config: &'a PrintConfig,
    out: String,
}

impl<'a> Printer<'a> {
    fn file(&mut self, file: &SourceFile) {
        if let Some(prologue) = &file.prologue {
            self.out.push_str(prologue);
        }
        self.out.push_str("<?php");
        self.stmts(&file.stmts, "", true);
        self.closing_comments(&file.trailing_comments, "");
        match &file.epilogue {
            Some(epilogue) => {
                self.out.push_str("\n?>");
                self.out.push_str(epilogue);
            }
            None => self.out.push('\n'),
        }
    }

    /// Statements of a file or namespace. `first_gap` is the default spacing
    /// before the first statement.
    fn stmts(&mut self, stmts: &[Stmt], indent: &str, first_gap: bool) {
        let mut prev: Option<&Stmt> = None;
        for stmt in stmts {
            if let Stmt::InlineHtml(text) = stmt {
                self.out.push_str("\n?>");
                self.out.push_str(text);
                self.out.push_str("<?php");
                prev = Some(stmt);
                continue;
            }

            let default_gap = match prev {
                None => first_gap,
                Some(_) => default_stmt_gap(prev, stmt),
            };
            let trivia = stmt.trivia();
            let gap = trivia
                .and_then(|t| t.blank_line_before)
                .unwrap_or(default_gap);
            self.newline(gap);
            if let Some(trivia) = trivia {
                self.leading(trivia, indent);
            }

            self.out.push_str(indent);
            match stmt {
                Stmt::Declare(raw) | Stmt::Raw(raw) => {
                    self.out.push_str(&reindent(&raw.text, indent));
                    self.trailing(&raw.trivia);
                }
                Stmt::Use(use_stmt) => {
                    self.use_stmt(use_stmt);
                    self.trailing(&use_stmt.trivia);
                }
                Stmt::Namespace(ns) => self.namespace(ns, indent),
                Stmt::Class(class) => self.class(class, indent),
                Stmt::InlineHtml(_) => {}
            }
            prev = Some(stmt);
        }
    }

    fn newline(&mut self, blank: bool) {
        self.out.push('\n');
        if blank {
            self.out.push('\n');
        }
    }

    fn leading(&mut self, trivia: &Trivia, indent: &str) {
        for comment in &trivia.comments {
            self.out.push_str(indent);
            self.out.push_str(&reindent(comment, indent));
            self.out.push('\n');
        }
        for attribute in &trivia.attributes {
            self.out.push_str(indent);
            self.out.push_str(&reindent(attribute, indent));
            self.out.push('\n');
        }
    }

    fn trailing(&mut self, trivia: &Trivia) {
        if let Some(comment) = &trivia.trailing_comment {
            self.out.push(' ');
            self.out.push_str(comment);
        }
    }

    fn closing_comments(&mut self, comments: &[String], indent: &str) {
        for comment in comments {
            self.out.push('\n');
            self.out.push_str(indent);
            self.out.push_str(&reindent(comment, indent));
        }
    }

    // ==================== NAMESPACES & IMPORTS ====================

    fn namespace(&mut self, ns: &NamespaceDecl, indent: &str) {
        self.out.push_str("namespace");
        if let Some(name) = &ns.name {
            self.out.push(' ');
            self.out.push_str(name);
        }

        if ns.braced {
            self.out.push_str(" {");
            let inner = format!("{}{}", indent, self.config.indent);
            self.stmts(&ns.stmts, &inner, false);
            self.closing_comments(&ns.trailing_comments, &inner);
            self.out.push('\n');
            self.out.push_str(indent);
            self.out.push('}');
            self.trailing(&ns.trivia);
        } else {
            self.out.push(';');
            self.trailing(&ns.trivia);
            self.stmts(&ns.stmts, indent, true);
            self.closing_comments(&ns.trailing_comments, indent);
        }
    }

    fn use_stmt(&mut self, stmt: &UseStmt) {
        self.out.push_str("use ");
        if let Some(keyword) = stmt.kind.keyword() {
            self.out.push_str(keyword);
            self.out.push(' ');
        }

        let items: Vec<String> = stmt
            .items
            .iter()
            .map(|item| {
                let mut text = String::new();
                if let Some(keyword) = item.kind.and_then(|k| k.keyword()) {
                    text.push_str(keyword);
                    text.push(' ');
                }
                text.push_str(&item.name);
                if let Some(alias) = &item.alias {
                    text.push_str(" as ");
                    text.push_str(alias);
                }
                text
            })
            .collect();

        match &stmt.prefix {
            Some(prefix) => {
                self.out.push_str(prefix);
                self.out.push_str("\\{");
                self.out.push_str(&items.join(", "));
                self.out.push('}');
            }
            None => self.out.push_str(&items.join(", ")),
        }
        self.out.push(';');
    }

    // ==================== CLASSES ====================

    fn class(&mut self, class: &ClassDecl, indent: &str) {
        for modifier in &class.modifiers {
            self.out.push_str(modifier.keyword());
            self.out.push(' ');
        }
        self.out.push_str("class ");
        self.out.push_str(&class.name);
        if let Some(parent) = &class.extends {
            self.out.push_str(" extends ");
            self.out.push_str(parent);
        }
        if !class.implements.is_empty() {
            self.out.push_str(" implements ");
            self.out.push_str(&class.implements.join(", "));
        }
        self.out.push('\n');
        self.out.push_str(indent);
        self.out.push('{');

        let inner = format!("{}{}", indent, self.config.indent);
        let mut prev: Option<&MemberStmt> = None;
        for member in &class.members {
            let gap = member
                .trivia
                .blank_line_before
                .unwrap_or_else(|| default_member_gap(prev, member));
            self.newline(gap);
            self.leading(&member.trivia, &inner);
            self.out.push_str(&inner);
            self.member(&member.member, &inner);
            self.trailing(&member.trivia);
            prev = Some(member);
        }
        self.closing_comments(&class.trailing_comments, &inner);

        self.out.push('\n');
        self.out.push_str(indent);
        self.out.push('}');
        self.trailing(&class.trivia);
    }

    fn member(&mut self, member: &Member, indent: &str) {
        match member {
            Member::MixinUse(mixin) => self.mixin_use(mixin, indent),
            Member::Constants(group) => self.constants(group, indent),
            Member::Fields(group) => self.fields(group, indent),
            Member::Routine(routine) => self.routine(routine, indent),
        }
    }

    fn mixin_use(&mut self, mixin: &MixinUse, indent: &str) {
        self.out.push_str("use ");
        self.out.push_str(&mixin.names.join(", "));
        match &mixin.adaptations {
            Some(rules) => {
                self.out.push_str(" {");
                self.block(rules, indent);
            }
            None => self.out.push(';'),
        }
    }

    fn modifiers(&mut self, modifiers: &Modifiers) {
        let mut words: Vec<&str> = Vec::new();
        if modifiers.is_final {
            words.push("final");
        }
        if modifiers.is_abstract {
            words.push("abstract");
        }
        match modifiers.visibility {
            Some(visibility) => words.push(visibility.keyword()),
            None if modifiers.is_var => words.push("var"),
            None => {}
        }
        if modifiers.is_static {
            words.push("static");
        }
        if modifiers.is_readonly {
            words.push("readonly");
        }
        for word in words {
            self.out.push_str(word);
            self.out.push(' ');
        }
    }

    fn constants(&mut self, group: &ConstantGroup, indent: &str) {
        self.modifiers(&group.modifiers);
        self.out.push_str("const ");
        if let Some(ty) = &group.ty {
            self.out.push_str(ty);
            self.out.push(' ');
        }
        let items: Vec<String> = group
            .items
            .iter()
            .map(|item| format!("{} = {}", item.name, self.expr(&item.value, indent)))
            .collect();
        self.out.push_str(&items.join(", "));
        self.out.push(';');
    }

    fn fields(&mut self, group: &FieldGroup, indent: &str) {
        self.modifiers(&group.modifiers);
        if let Some(ty) = &group.ty {
            self.out.push_str(ty);
            self.out.push(' ');
        }
        let items: Vec<String> = group
            .items
            .iter()
            .map(|item| match &item.default {
                Some(default) => format!("${} = {}", item.name, self.expr(default, indent)),
                None => format!("${}", item.name),
            })
            .collect();
        self.out.push_str(&items.join(", "));
        self.out.push(';');
    }

    fn routine(&mut self, routine: &Routine, indent: &str) {
        self.modifiers(&routine.modifiers);
        self.out.push_str("function ");
        if routine.by_ref {
            self.out.push('&');
        }
        self.out.push_str(&routine.name);

        let params: Vec<String> = routine
            .params
            .iter()
            .map(|param| self.param(param, indent))
            .collect();
        if routine.params_multiline && !params.is_empty() {
            let inner = format!("{}{}", indent, self.config.indent);
            self.out.push_str("(\n");
            for param in &params {
                self.out.push_str(&inner);
                self.out.push_str(param);
                self.out.push_str(",\n");
            }
            self.out.push_str(indent);
            self.out.push(')');
        } else {
            self.out.push('(');
            self.out.push_str(&params.join(", "));
            self.out.push(')');
        }

        if let Some(ty) = &routine.return_type {
            self.out.push_str(": ");
            self.out.push_str(ty);
        }

        let Some(body) = &routine.body else {
            self.out.push(';');
            return;
        };
        let fits_inline = body.iter().all(|s| !s.text.contains('\n'));
        match routine.body_layout {
            BodyLayout::Inline if fits_inline => {
                self.out.push_str(" {");
                for stmt in body {
                    self.out.push(' ');
                    self.out.push_str(&stmt.text);
                }
                if !body.is_empty() {
                    self.out.push(' ');
                }
                self.out.push('}');
            }
            BodyLayout::SameLine | BodyLayout::Inline => {
                self.out.push_str(" {");
                self.block(body, indent);
            }
            BodyLayout::NextLine => {
                self.out.push('\n');
                self.out.push_str(indent);
                self.out.push('{');
                self.block(body, indent);
            }
        }
    }

    fn param(&self, param: &Param, indent: &str) -> String {
        let mut text = String::new();
        for attribute in &param.attributes {
            text.push_str(attribute);
            text.push(' ');
        }
        if let Some(visibility) = param.modifiers.visibility {
            text.push_str(visibility.keyword());
            text.push(' ');
        }
        if param.modifiers.is_readonly {
            text.push_str("readonly ");
        }
        if let Some(ty) = &param.ty {
            text.push_str(ty);
            text.push(' ');
        }
        if param.by_ref {
            text.push('&');
        }
        if param.variadic {
            text.push_str("...");
        }
        text.push('$');
        text.push_str(&param.name);
        if let Some(default) = &param.default {
            text.push_str(" = ");
            text.push_str(&self.expr(default, indent));
        }
        text
    }

    /// Statements of a `{ ... }` block whose opening brace is already
    /// printed.
    fn block(&mut self, stmts: &[InnerStmt], indent: &str) {
        let inner = format!("{}{}", indent, self.config.indent);
        for (i, stmt) in stmts.iter().enumerate() {
            self.newline(i > 0 && stmt.blank_line_before);
            self.out.push_str(&inner);
            self.out.push_str(&reindent(&stmt.text, &inner));
        }
        self.out.push('\n');
        self.out.push_str(indent);
        self.out.push('}');
    }

    // ==================== EXPRESSIONS ====================

    fn expr(&self, expr: &Expr, indent: &str) -> String {
        match expr {
            Expr::Str(lit) => match &lit.raw {
                Some(raw) => raw.clone(),
                None => quote(&lit.value),
            },
            Expr::Int(lit) => match &lit.raw {
                Some(raw) => raw.clone(),
                None => format_int(lit.value),
            },
            Expr::Float(lit) => match &lit.raw {
                Some(raw) => raw.clone(),
                None => format_float(lit.value),
            },
            Expr::Const(name) => name.clone(),
            Expr::Raw(text) => reindent(text, indent),
            Expr::Array(array) => self.array(array, indent),
        }
    }

    fn array_item(&self, item: &ArrayItem, indent: &str) -> String {
        let mut text = String::new();
        if item.spread {
            text.push_str("...");
        }
        if let Some(key) = &item.key {
            text.push_str(&self.expr(key, indent));
            text.push_str(" => ");
        }
        if item.by_ref {
            text.push('&');
        }
        text.push_str(&self.expr(&item.value, indent));
        text
    }

    fn array(&self, array: &ArrayExpr, indent: &str) -> String {
        let (open, close) = if array.long_syntax {
            ("array(", ")")
        } else {
            ("[", "]")
        };

        if !array.multiline || (array.items.is_empty() && array.trailing_comments.is_empty()) {
            let items: Vec<String> = array
                .items
                .iter()
                .map(|item| self.array_item(item, indent))
                .collect();
            return format!("{}{}{}", open, items.join(", "), close);
        }

        let inner = format!("{}{}", indent, self.config.indent);
        let mut text = String::from(open);
        for item in &array.items {
            for comment in &item.comments {
                text.push('\n');
                text.push_str(&inner);
                text.push_str(&reindent(comment, &inner));
            }
            text.push('\n');
            text.push_str(&inner);
            text.push_str(&self.array_item(item, &inner));
            text.push(',');
            if let Some(comment) = &item.trailing_comment {
                text.push(' ');
                text.push_str(comment);
            }
        }
        for comment in &array.trailing_comments {
            text.push('\n');
            text.push_str(&inner);
            text.push_str(&reindent(comment, &inner));
        }
        text.push('\n');
        text.push_str(indent);
        text.push_str(close);
        text
    }
}

/// Single-quoted string literal.
fn quote(value: &str) -> String {
    format!("'{}'", value.replace('\\', "\\\\").replace('\'', "\\'"))
}

/// Float spelling that PHP reads back as a float: always has a `.` or an
/// exponent.
fn format_float(value: f64) -> String {
    if !value.is_finite() {
        value.to_string()
    } else if value.abs() >= 1e15 {
        format!("{:e}", value)
    } else if value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        value.to_string()
    }
}

/// `i64::MIN` has no literal: `-9223372036854775808` reads as a float.
fn format_int(value: i64) -> String {
    if value == i64::MIN {
        "PHP_INT_MIN".to_string()
    } else {
        value.to_string()
    }
}
