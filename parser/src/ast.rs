//! Abstract Syntax Tree types for PHP class files.
//!
//! The tree models the structural parts of a file in detail (namespaces,
//! imports, class declarations and their members) and keeps everything else
//! (method bodies, free-standing statements, unusual expressions) as source
//! text split at statement boundaries.

use std::fmt;

/// Source location for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub line: usize,
    pub column: usize,
}

impl Span {
    pub fn new(start: usize, end: usize, line: usize, column: usize) -> Self {
        Self {
            start,
            end,
            line,
            column,
        }
    }
}

/// Layout and decoration that precede a statement.
///
/// `blank_line_before` is `None` for synthesized nodes; the printer then
/// picks the conventional spacing.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Trivia {
    pub comments: Vec<String>,
    pub attributes: Vec<String>,
    pub blank_line_before: Option<bool>,
    /// Comment that followed the statement on its last line.
    pub trailing_comment: Option<String>,
}

impl Trivia {
    pub fn is_synthesized(&self) -> bool {
        self.blank_line_before.is_none()
    }
}

/// A parsed source file.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SourceFile {
    /// Inline text before the opening `<?php` tag.
    pub prologue: Option<String>,
    pub stmts: Vec<Stmt>,
    /// Comments after the last statement.
    pub trailing_comments: Vec<String>,
    /// Inline text after a closing `?>` tag at the end of the file.
    pub epilogue: Option<String>,
}

/// A top-level (or namespace-level) statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Declare(RawStmt),
    Namespace(NamespaceDecl),
    Use(UseStmt),
    Class(ClassDecl),
    /// Inline text between `?>` and the next `<?php`.
    InlineHtml(String),
    Raw(RawStmt),
}

impl Stmt {
    pub fn trivia(&self) -> Option<&Trivia> {
        match self {
            Stmt::Declare(s) | Stmt::Raw(s) => Some(&s.trivia),
            Stmt::Namespace(n) => Some(&n.trivia),
            Stmt::Use(u) => Some(&u.trivia),
            Stmt::Class(c) => Some(&c.trivia),
            Stmt::InlineHtml(_) => None,
        }
    }

    pub fn trivia_mut(&mut self) -> Option<&mut Trivia> {
        match self {
            Stmt::Declare(s) | Stmt::Raw(s) => Some(&mut s.trivia),
            Stmt::Namespace(n) => Some(&mut n.trivia),
            Stmt::Use(u) => Some(&mut u.trivia),
            Stmt::Class(c) => Some(&mut c.trivia),
            Stmt::InlineHtml(_) => None,
        }
    }
}

/// Statement kept as source text.
#[derive(Debug, Clone, PartialEq)]
pub struct RawStmt {
    pub trivia: Trivia,
    pub text: String,
}

// ==================== NAMESPACES & IMPORTS ====================

/// `namespace Name;` (followed by its statements) or `namespace Name { ... }`.
#[derive(Debug, Clone, PartialEq)]
pub struct NamespaceDecl {
    pub trivia: Trivia,
    /// `None` only for the braced global namespace `namespace { ... }`.
    pub name: Option<String>,
    pub braced: bool,
    pub stmts: Vec<Stmt>,
    /// Comments before the closing brace of a braced namespace.
    pub trailing_comments: Vec<String>,
}

impl NamespaceDecl {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            trivia: Trivia::default(),
            name: Some(name.into()),
            braced: false,
            stmts: Vec::new(),
            trailing_comments: Vec::new(),
        }
    }
}

/// Kind of symbol an import brings in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UseKind {
    #[default]
    Class,
    Function,
    Const,
}

impl UseKind {
    pub fn keyword(&self) -> Option<&'static str> {
        match self {
            UseKind::Class => None,
            UseKind::Function => Some("function"),
            UseKind::Const => Some("const"),
        }
    }
}

/// `use A\B as C, D;` or `use A\{B, C as D};`
#[derive(Debug, Clone, PartialEq)]
pub struct UseStmt {
    pub trivia: Trivia,
    pub kind: UseKind,
    /// Prefix of a group import (`A` in `use A\{B, C}`).
    pub prefix: Option<String>,
    pub items: Vec<UseItem>,
}

impl UseStmt {
    /// A single class import.
    pub fn single(path: impl Into<String>, alias: Option<String>) -> Self {
        Self {
            trivia: Trivia::default(),
            kind: UseKind::Class,
            prefix: None,
            items: vec![UseItem {
                kind: None,
                name: path.into(),
                alias,
            }],
        }
    }

    /// Fully qualified path of an item (group prefix applied).
    pub fn full_path(&self, item: &UseItem) -> String {
        match &self.prefix {
            Some(prefix) => format!("{}\\{}", prefix.trim_end_matches('\\'), item.name),
            None => item.name.clone(),
        }
    }
}

/// One imported symbol.
#[derive(Debug, Clone, PartialEq)]
pub struct UseItem {
    /// Per-item kind inside a mixed group import.
    pub kind: Option<UseKind>,
    pub name: String,
    pub alias: Option<String>,
}

// ==================== CLASSES ====================

/// Modifier on a class declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassModifier {
    Abstract,
    Final,
    Readonly,
}

impl ClassModifier {
    pub fn keyword(&self) -> &'static str {
        match self {
            ClassModifier::Abstract => "abstract",
            ClassModifier::Final => "final",
            ClassModifier::Readonly => "readonly",
        }
    }
}

/// `class Name extends Parent implements A, B { ... }`
#[derive(Debug, Clone, PartialEq)]
pub struct ClassDecl {
    pub trivia: Trivia,
    pub modifiers: Vec<ClassModifier>,
    pub name: String,
    pub extends: Option<String>,
    pub implements: Vec<String>,
    pub members: Vec<MemberStmt>,
    /// Comments before the closing brace.
    pub trailing_comments: Vec<String>,
}

impl ClassDecl {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            trivia: Trivia::default(),
            modifiers: Vec::new(),
            name: name.into(),
            extends: None,
            implements: Vec::new(),
            members: Vec::new(),
            trailing_comments: Vec::new(),
        }
    }
}

/// Member visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Visibility {
    Public,
    Protected,
    Private,
}

impl Visibility {
    pub fn keyword(&self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Protected => "protected",
            Visibility::Private => "private",
        }
    }

    /// Parse a visibility keyword (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "public" => Some(Visibility::Public),
            "protected" => Some(Visibility::Protected),
            "private" => Some(Visibility::Private),
            _ => None,
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.keyword())
    }
}

/// Member modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub visibility: Option<Visibility>,
    pub is_static: bool,
    pub is_abstract: bool,
    pub is_final: bool,
    pub is_readonly: bool,
    /// Legacy `var` keyword on properties.
    pub is_var: bool,
}

impl Modifiers {
    pub fn with_visibility(visibility: Visibility) -> Self {
        Self {
            visibility: Some(visibility),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Replace the visibility; an explicit visibility supersedes `var`.
    pub fn set_visibility(&mut self, visibility: Visibility) {
        self.visibility = Some(visibility);
        self.is_var = false;
    }
}

/// A statement inside a class body.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberStmt {
    pub trivia: Trivia,
    pub member: Member,
}

impl MemberStmt {
    pub fn new(member: Member) -> Self {
        Self {
            trivia: Trivia::default(),
            member,
        }
    }
}

/// Class member statement kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum Member {
    MixinUse(MixinUse),
    Constants(ConstantGroup),
    Fields(FieldGroup),
    Routine(Routine),
}

impl Member {
    pub fn category(&self) -> MemberCategory {
        match self {
            Member::MixinUse(_) => MemberCategory::MixinUse,
            Member::Constants(_) => MemberCategory::Constant,
            Member::Fields(_) => MemberCategory::Field,
            Member::Routine(_) => MemberCategory::Routine,
        }
    }
}

/// Coarse member category, used for ordering and spacing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberCategory {
    MixinUse,
    Constant,
    Field,
    Routine,
}

/// `use TraitA, TraitB;` inside a class.
#[derive(Debug, Clone, PartialEq)]
pub struct MixinUse {
    pub names: Vec<String>,
    /// Conflict-resolution rules of a `use A, B { ... }` block.
    pub adaptations: Option<Vec<InnerStmt>>,
}

impl MixinUse {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            names: vec![name.into()],
            adaptations: None,
        }
    }
}

/// `const A = 1, B = 2;`
#[derive(Debug, Clone, PartialEq)]
pub struct ConstantGroup {
    pub modifiers: Modifiers,
    pub ty: Option<String>,
    pub items: Vec<ConstItem>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConstItem {
    pub name: String,
    pub value: Expr,
}

/// `protected ?int $a = 1, $b;`
#[derive(Debug, Clone, PartialEq)]
pub struct FieldGroup {
    pub modifiers: Modifiers,
    pub ty: Option<String>,
    pub items: Vec<FieldItem>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldItem {
    /// Name without the leading `$`.
    pub name: String,
    pub default: Option<Expr>,
}

/// A method declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct Routine {
    pub modifiers: Modifiers,
    pub by_ref: bool,
    pub name: String,
    pub params: Vec<Param>,
    /// Parameters laid out one per line.
    pub params_multiline: bool,
    pub return_type: Option<String>,
    /// `None` for abstract methods.
    pub body: Option<Vec<InnerStmt>>,
    pub body_layout: BodyLayout,
}

/// Placement of a routine body's braces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BodyLayout {
    /// `{` on its own line.
    #[default]
    NextLine,
    /// `{` at the end of the signature line.
    SameLine,
    /// The whole body on the signature line: `{ return 1; }`.
    Inline,
}

impl Routine {
    /// A public routine with an empty body.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            modifiers: Modifiers::with_visibility(Visibility::Public),
            by_ref: false,
            name: name.into(),
            params: Vec::new(),
            params_multiline: false,
            return_type: None,
            body: Some(Vec::new()),
            body_layout: BodyLayout::NextLine,
        }
    }
}

/// A routine parameter.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Param {
    pub attributes: Vec<String>,
    /// Constructor promotion modifiers.
    pub modifiers: Modifiers,
    pub ty: Option<String>,
    pub by_ref: bool,
    pub variadic: bool,
    /// Name without the leading `$`.
    pub name: String,
    pub default: Option<Expr>,
}

impl Param {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// A statement kept as source text (method bodies, adaptation rules).
///
/// `text` is dedented: continuation lines are relative to the column of the
/// statement's first character.
#[derive(Debug, Clone, PartialEq)]
pub struct InnerStmt {
    pub text: String,
    pub blank_line_before: bool,
}

impl InnerStmt {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            blank_line_before: false,
        }
    }
}

// ==================== EXPRESSIONS ====================

/// An expression in a default value, constant value or array entry.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Str(StrLit),
    Int(IntLit),
    Float(FloatLit),
    /// Named constant: `true`, `false`, `null`, `PHP_EOL`, ...
    Const(String),
    Array(ArrayExpr),
    /// Any other expression, kept as source text.
    Raw(String),
}

impl Expr {
    pub fn string(value: impl Into<String>) -> Self {
        Expr::Str(StrLit {
            value: value.into(),
            raw: None,
        })
    }

    pub fn int(value: i64) -> Self {
        Expr::Int(IntLit { value, raw: None })
    }

    pub fn float(value: f64) -> Self {
        Expr::Float(FloatLit { value, raw: None })
    }

    pub fn constant(name: impl Into<String>) -> Self {
        Expr::Const(name.into())
    }

    pub fn null() -> Self {
        Expr::Const("null".to_string())
    }

    /// String value if this is a string literal.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Expr::Str(s) => Some(&s.value),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&ArrayExpr> {
        match self {
            Expr::Array(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_array_mut(&mut self) -> Option<&mut ArrayExpr> {
        match self {
            Expr::Array(a) => Some(a),
            _ => None,
        }
    }

    /// Returns true for the constant `null` (any case).
    pub fn is_null(&self) -> bool {
        matches!(self, Expr::Const(name) if name.eq_ignore_ascii_case("null"))
    }
}

/// String literal. `raw` holds the original spelling (quotes included) for
/// parsed literals; synthesized literals print single-quoted.
#[derive(Debug, Clone, PartialEq)]
pub struct StrLit {
    pub value: String,
    pub raw: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IntLit {
    pub value: i64,
    pub raw: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FloatLit {
    pub value: f64,
    pub raw: Option<String>,
}

/// Array literal.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ArrayExpr {
    pub items: Vec<ArrayItem>,
    /// `array(...)` instead of `[...]`.
    pub long_syntax: bool,
    /// One item per line.
    pub multiline: bool,
    /// Comments before the closing bracket.
    pub trailing_comments: Vec<String>,
}

impl ArrayExpr {
    pub fn new(items: Vec<ArrayItem>) -> Self {
        Self {
            items,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArrayItem {
    /// Comments on the lines before the item.
    pub comments: Vec<String>,
    pub key: Option<Expr>,
    pub value: Expr,
    pub by_ref: bool,
    pub spread: bool,
    /// Comment after the item's comma on the same line.
    pub trailing_comment: Option<String>,
}

impl ArrayItem {
    pub fn positional(value: Expr) -> Self {
        Self {
            comments: Vec::new(),
            key: None,
            value,
            by_ref: false,
            spread: false,
            trailing_comment: None,
        }
    }

    pub fn keyed(key: Expr, value: Expr) -> Self {
        Self {
            comments: Vec::new(),
            key: Some(key),
            value,
            by_ref: false,
            spread: false,
            trailing_comment: None,
        }
    }
}
