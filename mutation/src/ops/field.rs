//! Fields (properties).

use sculptor_core::Value;
use sculptor_parser::{
    ArrayExpr, Expr, FieldGroup, FieldItem, Member, MemberCategory, MemberStmt, Modifiers,
    SourceFile, Visibility,
};

use crate::literal::{encode, merge};
use crate::locate::{field_group_mut, field_name, find_field, first_class_mut};
use crate::position::{member_position, remove_member, splice_member};
use crate::result::MutationOutcome;

/// Add a field group holding one field.
///
/// `default: None` declares the field without a default; `Some(Value::Null)`
/// declares it `= null`.
#[derive(Debug, Clone, PartialEq)]
pub struct AddField {
    pub name: String,
    pub default: Option<Value>,
    pub visibility: Option<Visibility>,
    pub ty: Option<String>,
}

impl AddField {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            name: field_name(&name).to_string(),
            default: None,
            visibility: None,
            ty: None,
        }
    }

    pub fn apply(&self, file: &mut SourceFile) -> MutationOutcome {
        let Some(class) = first_class_mut(file) else {
            return MutationOutcome::not_found();
        };
        if find_field(class, &self.name).is_some() {
            return MutationOutcome::duplicate();
        }

        let group = FieldGroup {
            modifiers: Modifiers::with_visibility(self.visibility.unwrap_or(Visibility::Protected)),
            ty: self.ty.clone().filter(|t| !t.is_empty()),
            items: vec![FieldItem {
                name: self.name.clone(),
                default: self.default.as_ref().map(encode),
            }],
        };
        let index = member_position(&class.members, MemberCategory::Field);
        splice_member(&mut class.members, index, MemberStmt::new(Member::Fields(group)));
        MutationOutcome::Applied
    }
}

/// Remove a field; the group goes with its last field.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoveField {
    pub name: String,
}

impl RemoveField {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            name: field_name(&name).to_string(),
        }
    }

    pub fn apply(&self, file: &mut SourceFile) -> MutationOutcome {
        let Some(class) = first_class_mut(file) else {
            return MutationOutcome::not_found();
        };
        let Some((i, j)) = find_field(class, &self.name) else {
            return MutationOutcome::not_found();
        };

        if let Some(group) = field_group_mut(class, i) {
            if group.items.len() > 1 {
                group.items.remove(j);
                return MutationOutcome::Applied;
            }
        }
        remove_member(&mut class.members, i);
        MutationOutcome::Applied
    }
}

/// Change a field in place. Each facet changes only when supplied.
///
/// Type and visibility belong to the whole group, so they change for every
/// field declared alongside the target.
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeField {
    pub name: String,
    pub default: Option<Value>,
    pub visibility: Option<Visibility>,
    /// An empty type removes the declared type.
    pub ty: Option<String>,
}

impl ChangeField {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            name: field_name(&name).to_string(),
            default: None,
            visibility: None,
            ty: None,
        }
    }

    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }

    pub fn with_visibility(mut self, visibility: Option<Visibility>) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn with_type(mut self, ty: impl Into<String>) -> Self {
        self.ty = Some(ty.into());
        self
    }

    pub fn apply(&self, file: &mut SourceFile) -> MutationOutcome {
        let Some(class) = first_class_mut(file) else {
            return MutationOutcome::not_found();
        };
        let Some((i, j)) = find_field(class, &self.name) else {
            return MutationOutcome::not_found();
        };
        let Some(group) = field_group_mut(class, i) else {
            return MutationOutcome::not_found();
        };

        if let Some(ty) = &self.ty {
            group.ty = Some(ty.clone()).filter(|t| !t.is_empty());
        }
        if let Some(visibility) = self.visibility {
            group.modifiers.set_visibility(visibility);
        }
        if let Some(default) = &self.default {
            group.items[j].default = Some(encode(default));
        }
        MutationOutcome::Applied
    }
}

/// Merge entries into a collection-valued field default.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtendCollectionField {
    pub name: String,
    pub additions: Value,
}

impl ExtendCollectionField {
    pub fn new(name: impl Into<String>, additions: impl Into<Value>) -> Self {
        let name = name.into();
        Self {
            name: field_name(&name).to_string(),
            additions: additions.into(),
        }
    }

    pub fn apply(&self, file: &mut SourceFile) -> MutationOutcome {
        let Some(class) = first_class_mut(file) else {
            return MutationOutcome::not_found();
        };
        let Some((i, j)) = find_field(class, &self.name) else {
            return MutationOutcome::not_found();
        };
        let Some(group) = field_group_mut(class, i) else {
            return MutationOutcome::not_found();
        };

        let default = &mut group.items[j].default;
        if !matches!(default, Some(Expr::Array(_))) {
            *default = Some(Expr::Array(ArrayExpr::default()));
        }
        if let Some(array) = default.as_mut().and_then(Expr::as_array_mut) {
            merge(array, &self.additions);
        }
        MutationOutcome::Applied
    }
}
