//! Imports (`use` statements at namespace level).

use sculptor_parser::{SourceFile, Stmt, UseKind, UseStmt};

use crate::locate::{bare_name, names_match, target_namespace_mut};
use crate::position::{import_position, remove_stmt, splice_stmt};
use crate::result::MutationOutcome;

/// Add `use Path [as Alias];`.
///
/// Without a namespace block the file's top-level statements act as the
/// global namespace.
#[derive(Debug, Clone, PartialEq)]
pub struct AddImport {
    pub path: String,
    pub alias: Option<String>,
}

impl AddImport {
    pub fn new(path: impl Into<String>, alias: Option<String>) -> Self {
        Self {
            path: path.into(),
            alias: alias.filter(|a| !a.is_empty()),
        }
    }

    pub fn apply(&self, file: &mut SourceFile) -> MutationOutcome {
        match target_namespace_mut(file) {
            Some(ns) => self.apply_to(&mut ns.stmts),
            None => self.apply_to(&mut file.stmts),
        }
    }

    fn apply_to(&self, stmts: &mut Vec<Stmt>) -> MutationOutcome {
        let present = stmts.iter().any(|stmt| match stmt {
            Stmt::Use(import) if import.kind == UseKind::Class => import.items.iter().any(|item| {
                item.kind.unwrap_or(UseKind::Class) == UseKind::Class
                    && names_match(&import.full_path(item), &self.path)
                    && item.alias == self.alias
            }),
            _ => false,
        });
        if present {
            return MutationOutcome::duplicate();
        }

        let index = import_position(stmts);
        splice_stmt(
            stmts,
            index,
            Stmt::Use(UseStmt::single(bare_name(&self.path), self.alias.clone())),
        );
        MutationOutcome::Applied
    }
}

/// Remove one imported path; the statement goes with its last item.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoveImport {
    pub path: String,
}

impl RemoveImport {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    pub fn apply(&self, file: &mut SourceFile) -> MutationOutcome {
        if self.remove_from(&mut file.stmts) {
            return MutationOutcome::Applied;
        }
        for stmt in &mut file.stmts {
            if let Stmt::Namespace(ns) = stmt {
                if self.remove_from(&mut ns.stmts) {
                    return MutationOutcome::Applied;
                }
            }
        }
        MutationOutcome::not_found()
    }

    fn remove_from(&self, stmts: &mut Vec<Stmt>) -> bool {
        let found = stmts.iter().enumerate().find_map(|(i, stmt)| match stmt {
            Stmt::Use(import) if import.kind == UseKind::Class => import
                .items
                .iter()
                .position(|item| {
                    item.kind.unwrap_or(UseKind::Class) == UseKind::Class
                        && names_match(&import.full_path(item), &self.path)
                })
                .map(|j| (i, j, import.items.len())),
            _ => None,
        });

        match found {
            Some((i, _, 1)) => {
                remove_stmt(stmts, i);
                true
            }
            Some((i, j, _)) => {
                if let Stmt::Use(import) = &mut stmts[i] {
                    import.items.remove(j);
                }
                true
            }
            None => false,
        }
    }
}
