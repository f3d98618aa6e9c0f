//! Tree navigation shared by the operations.

use sculptor_parser::{
    ClassDecl, ConstantGroup, FieldGroup, Member, NamespaceDecl, Routine, SourceFile, Stmt,
};

/// Strip the leading `\` of a fully qualified name.
pub fn bare_name(name: &str) -> &str {
    name.strip_prefix('\\').unwrap_or(name)
}

/// Compare two symbol paths, ignoring a leading `\`.
pub fn names_match(a: &str, b: &str) -> bool {
    bare_name(a) == bare_name(b)
}

/// Compare two routine names (case-insensitive).
pub fn routine_names_match(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b)
}

/// The first class declaration in source order.
pub fn first_class(file: &SourceFile) -> Option<&ClassDecl> {
    file.stmts.iter().find_map(|stmt| match stmt {
        Stmt::Class(class) => Some(class),
        Stmt::Namespace(ns) => ns.stmts.iter().find_map(|s| match s {
            Stmt::Class(class) => Some(class),
            _ => None,
        }),
        _ => None,
    })
}

pub fn first_class_mut(file: &mut SourceFile) -> Option<&mut ClassDecl> {
    file.stmts.iter_mut().find_map(|stmt| match stmt {
        Stmt::Class(class) => Some(class),
        Stmt::Namespace(ns) => ns.stmts.iter_mut().find_map(|s| match s {
            Stmt::Class(class) => Some(class),
            _ => None,
        }),
        _ => None,
    })
}

/// The namespace that holds the target class, else the first namespace.
pub fn target_namespace_mut(file: &mut SourceFile) -> Option<&mut NamespaceDecl> {
    let holds_class = |stmt: &Stmt| {
        matches!(stmt, Stmt::Namespace(ns) if ns.stmts.iter().any(|s| matches!(s, Stmt::Class(_))))
    };
    let index = file
        .stmts
        .iter()
        .position(holds_class)
        .or_else(|| {
            file.stmts
                .iter()
                .position(|s| matches!(s, Stmt::Namespace(_)))
        })?;
    match file.stmts.get_mut(index) {
        Some(Stmt::Namespace(ns)) => Some(ns),
        _ => None,
    }
}

/// Position of a member group holding an item named `name`, with the item
/// index inside the group.
pub fn find_field(class: &ClassDecl, name: &str) -> Option<(usize, usize)> {
    class.members.iter().enumerate().find_map(|(i, stmt)| match &stmt.member {
        Member::Fields(group) => group
            .items
            .iter()
            .position(|item| item.name == name)
            .map(|j| (i, j)),
        _ => None,
    })
}

pub fn find_constant(class: &ClassDecl, name: &str) -> Option<(usize, usize)> {
    class.members.iter().enumerate().find_map(|(i, stmt)| match &stmt.member {
        Member::Constants(group) => group
            .items
            .iter()
            .position(|item| item.name == name)
            .map(|j| (i, j)),
        _ => None,
    })
}

pub fn find_routine(class: &ClassDecl, name: &str) -> Option<usize> {
    class.members.iter().position(|stmt| {
        matches!(&stmt.member, Member::Routine(routine) if routine_names_match(&routine.name, name))
    })
}

pub fn field_group_mut(class: &mut ClassDecl, index: usize) -> Option<&mut FieldGroup> {
    match class.members.get_mut(index).map(|stmt| &mut stmt.member) {
        Some(Member::Fields(group)) => Some(group),
        _ => None,
    }
}

pub fn constant_group_mut(class: &mut ClassDecl, index: usize) -> Option<&mut ConstantGroup> {
    match class.members.get_mut(index).map(|stmt| &mut stmt.member) {
        Some(Member::Constants(group)) => Some(group),
        _ => None,
    }
}

pub fn routine_mut(class: &mut ClassDecl, index: usize) -> Option<&mut Routine> {
    match class.members.get_mut(index).map(|stmt| &mut stmt.member) {
        Some(Member::Routine(routine)) => Some(routine),
        _ => None,
    }
}

/// Strip the `$` sigil a caller may include in a field name.
pub fn field_name(name: &str) -> &str {
    name.strip_prefix('$').unwrap_or(name)
}
