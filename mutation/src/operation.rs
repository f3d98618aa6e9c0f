//! Operation catalogue.
//!
//! [`OperationKind`] names every built-in edit, [`Operation`] is the closed
//! set of built-in operations and [`Mutation`] is the open interface that
//! registry-supplied kinds implement.

use std::fmt;
use std::str::FromStr;

use sculptor_core::{Params, Value};
use sculptor_parser::{SourceFile, Visibility};

use crate::error::{MutationError, MutationResult};
use crate::ops::*;
use crate::result::MutationOutcome;
use crate::signature::ParamSpec;

/// A tree edit that can be applied once the queue drains.
pub trait Mutation: Send + Sync {
    fn apply(&self, file: &mut SourceFile) -> MutationOutcome;
}

/// Built-in operation kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    AddMixin,
    RemoveMixin,
    AddImport,
    RemoveImport,
    AddField,
    RemoveField,
    ChangeField,
    ChangeFieldType,
    ChangeFieldDefault,
    ChangeFieldVisibility,
    ExtendCollectionField,
    AddRoutine,
    ChangeRoutine,
    ChangeRoutineBody,
    ChangeRoutineVisibility,
    RemoveRoutine,
    AddConstant,
    ChangeConstant,
    RemoveConstant,
    ChangeClassName,
    ChangeNamespace,
    AddNamespace,
    ExtendClass,
    ImplementInterface,
}

impl OperationKind {
    pub const ALL: [OperationKind; 24] = [
        OperationKind::AddMixin,
        OperationKind::RemoveMixin,
        OperationKind::AddImport,
        OperationKind::RemoveImport,
        OperationKind::AddField,
        OperationKind::RemoveField,
        OperationKind::ChangeField,
        OperationKind::ChangeFieldType,
        OperationKind::ChangeFieldDefault,
        OperationKind::ChangeFieldVisibility,
        OperationKind::ExtendCollectionField,
        OperationKind::AddRoutine,
        OperationKind::ChangeRoutine,
        OperationKind::ChangeRoutineBody,
        OperationKind::ChangeRoutineVisibility,
        OperationKind::RemoveRoutine,
        OperationKind::AddConstant,
        OperationKind::ChangeConstant,
        OperationKind::RemoveConstant,
        OperationKind::ChangeClassName,
        OperationKind::ChangeNamespace,
        OperationKind::AddNamespace,
        OperationKind::ExtendClass,
        OperationKind::ImplementInterface,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::AddMixin => "add_mixin",
            OperationKind::RemoveMixin => "remove_mixin",
            OperationKind::AddImport => "add_import",
            OperationKind::RemoveImport => "remove_import",
            OperationKind::AddField => "add_field",
            OperationKind::RemoveField => "remove_field",
            OperationKind::ChangeField => "change_field",
            OperationKind::ChangeFieldType => "change_field_type",
            OperationKind::ChangeFieldDefault => "change_field_default",
            OperationKind::ChangeFieldVisibility => "change_field_visibility",
            OperationKind::ExtendCollectionField => "extend_collection_field",
            OperationKind::AddRoutine => "add_routine",
            OperationKind::ChangeRoutine => "change_routine",
            OperationKind::ChangeRoutineBody => "change_routine_body",
            OperationKind::ChangeRoutineVisibility => "change_routine_visibility",
            OperationKind::RemoveRoutine => "remove_routine",
            OperationKind::AddConstant => "add_constant",
            OperationKind::ChangeConstant => "change_constant",
            OperationKind::RemoveConstant => "remove_constant",
            OperationKind::ChangeClassName => "change_class_name",
            OperationKind::ChangeNamespace => "change_namespace",
            OperationKind::AddNamespace => "add_namespace",
            OperationKind::ExtendClass => "extend_class",
            OperationKind::ImplementInterface => "implement_interface",
        }
    }

    /// Parameter names in positional order.
    pub fn param_names(&self) -> &'static [&'static str] {
        match self {
            OperationKind::AddMixin | OperationKind::RemoveMixin => &["mixin"],
            OperationKind::AddImport => &["path", "alias"],
            OperationKind::RemoveImport => &["path"],
            OperationKind::AddField | OperationKind::ChangeField => {
                &["name", "default", "visibility", "type"]
            }
            OperationKind::ChangeFieldType => &["name", "type"],
            OperationKind::ChangeFieldDefault => &["name", "default"],
            OperationKind::ChangeFieldVisibility | OperationKind::ChangeRoutineVisibility => {
                &["name", "visibility"]
            }
            OperationKind::ExtendCollectionField => &["name", "additions"],
            OperationKind::AddRoutine => &["name", "params", "body", "visibility", "override"],
            OperationKind::ChangeRoutine => &["name", "params", "body", "visibility"],
            OperationKind::ChangeRoutineBody => &["name", "body"],
            OperationKind::AddConstant | OperationKind::ChangeConstant => {
                &["name", "value", "visibility"]
            }
            OperationKind::RemoveField
            | OperationKind::RemoveRoutine
            | OperationKind::RemoveConstant
            | OperationKind::ChangeClassName => &["name"],
            OperationKind::ChangeNamespace | OperationKind::AddNamespace => &["namespace"],
            OperationKind::ExtendClass => &["parent"],
            OperationKind::ImplementInterface => &["interface"],
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for OperationKind {
    type Err = MutationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OperationKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| MutationError::unknown_operation(s))
    }
}

/// Typed access to descriptor parameters.
struct ParamReader<'a> {
    kind: OperationKind,
    params: &'a Params,
}

impl<'a> ParamReader<'a> {
    fn invalid(&self, key: &str, expected: &str) -> MutationError {
        MutationError::invalid_parameter(self.kind.as_str(), key, expected)
    }

    fn string(&self, key: &str) -> MutationResult<String> {
        self.opt_string(key)?
            .ok_or_else(|| self.invalid(key, "string"))
    }

    /// Missing or null means not supplied.
    fn opt_string(&self, key: &str) -> MutationResult<Option<String>> {
        match self.params.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(_) => Err(self.invalid(key, "string")),
        }
    }

    /// A present key is supplied, even with a null value.
    fn opt_value(&self, key: &str) -> Option<Value> {
        self.params.get(key).cloned()
    }

    fn value(&self, key: &str) -> MutationResult<Value> {
        self.opt_value(key).ok_or_else(|| self.invalid(key, "value"))
    }

    fn collection(&self, key: &str) -> MutationResult<Value> {
        match self.params.get(key) {
            Some(value) if value.is_collection() => Ok(value.clone()),
            _ => Err(self.invalid(key, "list or map")),
        }
    }

    fn flag(&self, key: &str) -> MutationResult<bool> {
        match self.params.get(key) {
            None | Some(Value::Null) => Ok(false),
            Some(Value::Bool(b)) => Ok(*b),
            Some(_) => Err(self.invalid(key, "bool")),
        }
    }

    /// Unknown visibility words read as not supplied.
    fn visibility(&self, key: &str) -> MutationResult<Option<Visibility>> {
        Ok(self.opt_string(key)?.as_deref().and_then(Visibility::parse))
    }

    /// For kinds whose only facet is the visibility.
    fn required_visibility(&self, key: &str) -> MutationResult<Visibility> {
        self.opt_string(key)?
            .as_deref()
            .and_then(Visibility::parse)
            .ok_or_else(|| self.invalid(key, "public, protected or private"))
    }

    fn opt_params(&self, key: &str) -> MutationResult<Option<Vec<ParamSpec>>> {
        match self.params.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::List(items)) => items
                .iter()
                .map(|item| {
                    ParamSpec::from_value(item)
                        .ok_or_else(|| self.invalid(key, "parameter name or {name, type, default}"))
                })
                .collect::<MutationResult<Vec<_>>>()
                .map(Some),
            Some(_) => Err(self.invalid(key, "list of parameters")),
        }
    }
}

/// A built-in operation, ready to apply.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    AddMixin(AddMixin),
    RemoveMixin(RemoveMixin),
    AddImport(AddImport),
    RemoveImport(RemoveImport),
    AddField(AddField),
    RemoveField(RemoveField),
    ChangeField(ChangeField),
    ExtendCollectionField(ExtendCollectionField),
    AddRoutine(AddRoutine),
    ChangeRoutine(ChangeRoutine),
    RemoveRoutine(RemoveRoutine),
    AddConstant(AddConstant),
    ChangeConstant(ChangeConstant),
    RemoveConstant(RemoveConstant),
    RenameClass(RenameClass),
    ChangeNamespace(ChangeNamespace),
    AddNamespace(AddNamespace),
    ExtendClass(ExtendClass),
    ImplementInterface(ImplementInterface),
}

impl Operation {
    /// Build an operation from a kind name and its parameters.
    pub fn from_params(kind: &str, params: &Params) -> MutationResult<Self> {
        Self::build(kind.parse()?, params)
    }

    pub fn build(kind: OperationKind, params: &Params) -> MutationResult<Self> {
        let p = ParamReader { kind, params };
        let op = match kind {
            OperationKind::AddMixin => Operation::AddMixin(AddMixin::new(p.string("mixin")?)),
            OperationKind::RemoveMixin => {
                Operation::RemoveMixin(RemoveMixin::new(p.string("mixin")?))
            }
            OperationKind::AddImport => {
                Operation::AddImport(AddImport::new(p.string("path")?, p.opt_string("alias")?))
            }
            OperationKind::RemoveImport => {
                Operation::RemoveImport(RemoveImport::new(p.string("path")?))
            }
            OperationKind::AddField => {
                let mut op = AddField::new(p.string("name")?);
                op.default = p.opt_value("default");
                op.visibility = p.visibility("visibility")?;
                op.ty = p.opt_string("type")?;
                Operation::AddField(op)
            }
            OperationKind::RemoveField => Operation::RemoveField(RemoveField::new(p.string("name")?)),
            OperationKind::ChangeField => {
                let mut op = ChangeField::new(p.string("name")?);
                op.default = p.opt_value("default");
                op.visibility = p.visibility("visibility")?;
                op.ty = p.opt_string("type")?;
                Operation::ChangeField(op)
            }
            OperationKind::ChangeFieldType => Operation::ChangeField(
                ChangeField::new(p.string("name")?).with_type(p.string("type")?),
            ),
            OperationKind::ChangeFieldDefault => Operation::ChangeField(
                ChangeField::new(p.string("name")?).with_default(p.value("default")?),
            ),
            OperationKind::ChangeFieldVisibility => Operation::ChangeField(
                ChangeField::new(p.string("name")?)
                    .with_visibility(Some(p.required_visibility("visibility")?)),
            ),
            OperationKind::ExtendCollectionField => Operation::ExtendCollectionField(
                ExtendCollectionField::new(p.string("name")?, p.collection("additions")?),
            ),
            OperationKind::AddRoutine => {
                let mut op = AddRoutine::new(
                    p.string("name")?,
                    p.opt_params("params")?.unwrap_or_default(),
                    p.opt_string("body")?.unwrap_or_default(),
                );
                op.visibility = p.visibility("visibility")?;
                op.overwrite = p.flag("override")?;
                Operation::AddRoutine(op)
            }
            OperationKind::ChangeRoutine => {
                let mut op = ChangeRoutine::new(p.string("name")?)
                    .with_visibility(p.visibility("visibility")?);
                op.params = p.opt_params("params")?;
                op.body = p.opt_string("body")?;
                Operation::ChangeRoutine(op)
            }
            OperationKind::ChangeRoutineBody => Operation::ChangeRoutine(
                ChangeRoutine::new(p.string("name")?).with_body(p.opt_string("body")?.unwrap_or_default()),
            ),
            OperationKind::ChangeRoutineVisibility => Operation::ChangeRoutine(
                ChangeRoutine::new(p.string("name")?)
                    .with_visibility(Some(p.required_visibility("visibility")?)),
            ),
            OperationKind::RemoveRoutine => {
                Operation::RemoveRoutine(RemoveRoutine::new(p.string("name")?))
            }
            OperationKind::AddConstant => {
                let mut op = AddConstant::new(p.string("name")?, p.value("value")?);
                op.visibility = p.visibility("visibility")?;
                Operation::AddConstant(op)
            }
            OperationKind::ChangeConstant => {
                let mut op = ChangeConstant::new(p.string("name")?);
                op.value = p.opt_value("value");
                op.visibility = p.visibility("visibility")?;
                Operation::ChangeConstant(op)
            }
            OperationKind::RemoveConstant => {
                Operation::RemoveConstant(RemoveConstant::new(p.string("name")?))
            }
            OperationKind::ChangeClassName => {
                Operation::RenameClass(RenameClass::new(p.string("name")?))
            }
            OperationKind::ChangeNamespace => {
                Operation::ChangeNamespace(ChangeNamespace::new(p.string("namespace")?))
            }
            OperationKind::AddNamespace => {
                Operation::AddNamespace(AddNamespace::new(p.string("namespace")?))
            }
            OperationKind::ExtendClass => {
                Operation::ExtendClass(ExtendClass::new(p.string("parent")?))
            }
            OperationKind::ImplementInterface => {
                Operation::ImplementInterface(ImplementInterface::new(p.string("interface")?))
            }
        };
        Ok(op)
    }
}

impl Mutation for Operation {
    fn apply(&self, file: &mut SourceFile) -> MutationOutcome {
        match self {
            Operation::AddMixin(op) => op.apply(file),
            Operation::RemoveMixin(op) => op.apply(file),
            Operation::AddImport(op) => op.apply(file),
            Operation::RemoveImport(op) => op.apply(file),
            Operation::AddField(op) => op.apply(file),
            Operation::RemoveField(op) => op.apply(file),
            Operation::ChangeField(op) => op.apply(file),
            Operation::ExtendCollectionField(op) => op.apply(file),
            Operation::AddRoutine(op) => op.apply(file),
            Operation::ChangeRoutine(op) => op.apply(file),
            Operation::RemoveRoutine(op) => op.apply(file),
            Operation::AddConstant(op) => op.apply(file),
            Operation::ChangeConstant(op) => op.apply(file),
            Operation::RemoveConstant(op) => op.apply(file),
            Operation::RenameClass(op) => op.apply(file),
            Operation::ChangeNamespace(op) => op.apply(file),
            Operation::AddNamespace(op) => op.apply(file),
            Operation::ExtendClass(op) => op.apply(file),
            Operation::ImplementInterface(op) => op.apply(file),
        }
    }
}
