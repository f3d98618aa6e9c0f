//! Class header: name, parent and interfaces.

use sculptor_parser::SourceFile;

use crate::locate::{bare_name, first_class_mut, names_match};
use crate::result::MutationOutcome;

#[derive(Debug, Clone, PartialEq)]
pub struct RenameClass {
    pub name: String,
}

impl RenameClass {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn apply(&self, file: &mut SourceFile) -> MutationOutcome {
        match first_class_mut(file) {
            Some(class) => {
                class.name = self.name.clone();
                MutationOutcome::Applied
            }
            None => MutationOutcome::not_found(),
        }
    }
}

/// Set the `extends` clause.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtendClass {
    pub parent: String,
}

impl ExtendClass {
    pub fn new(parent: impl Into<String>) -> Self {
        Self {
            parent: parent.into(),
        }
    }

    pub fn apply(&self, file: &mut SourceFile) -> MutationOutcome {
        let Some(class) = first_class_mut(file) else {
            return MutationOutcome::not_found();
        };
        if class
            .extends
            .as_deref()
            .is_some_and(|parent| names_match(parent, &self.parent))
        {
            return MutationOutcome::duplicate();
        }
        class.extends = Some(self.parent.clone());
        MutationOutcome::Applied
    }
}

/// Append an interface to the `implements` list.
#[derive(Debug, Clone, PartialEq)]
pub struct ImplementInterface {
    pub interface: String,
}

impl ImplementInterface {
    pub fn new(interface: impl Into<String>) -> Self {
        Self {
            interface: interface.into(),
        }
    }

    pub fn apply(&self, file: &mut SourceFile) -> MutationOutcome {
        let Some(class) = first_class_mut(file) else {
            return MutationOutcome::not_found();
        };
        let present = class
            .implements
            .iter()
            .any(|name| bare_name(name) == bare_name(&self.interface));
        if present {
            return MutationOutcome::duplicate();
        }
        class.implements.push(self.interface.clone());
        MutationOutcome::Applied
    }
}
