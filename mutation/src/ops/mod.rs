//! Built-in operation implementations.
//!
//! Each family of edits (mixins, imports, fields, routines, constants, the
//! class header and namespaces) lives in its own module. Every operation
//! is a plain value with an `apply` method over the tree.

mod class;
mod constant;
mod field;
mod import;
mod mixin;
mod namespace;
mod routine;

pub use class::{ExtendClass, ImplementInterface, RenameClass};
pub use constant::{AddConstant, ChangeConstant, RemoveConstant};
pub use field::{AddField, ChangeField, ExtendCollectionField, RemoveField};
pub use import::{AddImport, RemoveImport};
pub use mixin::{AddMixin, RemoveMixin};
pub use namespace::{AddNamespace, ChangeNamespace};
pub use routine::{AddRoutine, ChangeRoutine, RemoveRoutine};
