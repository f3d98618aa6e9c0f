//! Namespace declarations.

use sculptor_parser::{NamespaceDecl, SourceFile, Stmt};

use crate::locate::bare_name;
use crate::position::leading_declares;
use crate::result::MutationOutcome;

/// Replace the name of the first namespace.
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeNamespace {
    pub namespace: String,
}

impl ChangeNamespace {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
        }
    }

    pub fn apply(&self, file: &mut SourceFile) -> MutationOutcome {
        let namespace = file.stmts.iter_mut().find_map(|stmt| match stmt {
            Stmt::Namespace(ns) => Some(ns),
            _ => None,
        });
        match namespace {
            Some(ns) => {
                ns.name = Some(bare_name(&self.namespace).to_string());
                MutationOutcome::Applied
            }
            None => MutationOutcome::not_found(),
        }
    }
}

/// Wrap the file's statements in a new namespace.
///
/// The declaration goes after any leading `declare` statements; every
/// statement after it moves into the namespace.
#[derive(Debug, Clone, PartialEq)]
pub struct AddNamespace {
    pub namespace: String,
}

impl AddNamespace {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
        }
    }

    pub fn apply(&self, file: &mut SourceFile) -> MutationOutcome {
        if file.stmts.iter().any(|s| matches!(s, Stmt::Namespace(_))) {
            return MutationOutcome::duplicate();
        }

        let index = leading_declares(&file.stmts);
        let mut ns = NamespaceDecl::new(bare_name(&self.namespace));
        ns.stmts = file.stmts.split_off(index);
        if let Some(trivia) = ns.stmts.first_mut().and_then(Stmt::trivia_mut) {
            trivia.blank_line_before = Some(true);
        }
        file.stmts.push(Stmt::Namespace(ns));
        MutationOutcome::Applied
    }
}
