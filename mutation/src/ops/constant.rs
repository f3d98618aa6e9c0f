//! Class constants.

use sculptor_core::Value;
use sculptor_parser::{
    ConstItem, ConstantGroup, Member, MemberCategory, MemberStmt, Modifiers, SourceFile, Visibility,
};

use crate::literal::encode;
use crate::locate::{constant_group_mut, find_constant, first_class_mut};
use crate::position::{member_position, remove_member, splice_member};
use crate::result::MutationOutcome;

/// Add a constant at the top of the class body.
#[derive(Debug, Clone, PartialEq)]
pub struct AddConstant {
    pub name: String,
    pub value: Value,
    pub visibility: Option<Visibility>,
}

impl AddConstant {
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            visibility: None,
        }
    }

    pub fn apply(&self, file: &mut SourceFile) -> MutationOutcome {
        let Some(class) = first_class_mut(file) else {
            return MutationOutcome::not_found();
        };
        if find_constant(class, &self.name).is_some() {
            return MutationOutcome::duplicate();
        }

        let group = ConstantGroup {
            modifiers: Modifiers::with_visibility(self.visibility.unwrap_or(Visibility::Public)),
            ty: None,
            items: vec![ConstItem {
                name: self.name.clone(),
                value: encode(&self.value),
            }],
        };
        let index = member_position(&class.members, MemberCategory::Constant);
        splice_member(&mut class.members, index, MemberStmt::new(Member::Constants(group)));
        MutationOutcome::Applied
    }
}

/// Change a constant's value or visibility in place.
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeConstant {
    pub name: String,
    pub value: Option<Value>,
    pub visibility: Option<Visibility>,
}

impl ChangeConstant {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
            visibility: None,
        }
    }

    pub fn apply(&self, file: &mut SourceFile) -> MutationOutcome {
        let Some(class) = first_class_mut(file) else {
            return MutationOutcome::not_found();
        };
        let Some((i, j)) = find_constant(class, &self.name) else {
            return MutationOutcome::not_found();
        };
        let Some(group) = constant_group_mut(class, i) else {
            return MutationOutcome::not_found();
        };

        if let Some(value) = &self.value {
            group.items[j].value = encode(value);
        }
        if let Some(visibility) = self.visibility {
            group.modifiers.set_visibility(visibility);
        }
        MutationOutcome::Applied
    }
}

/// Remove a constant; the group goes with its last constant.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoveConstant {
    pub name: String,
}

impl RemoveConstant {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn apply(&self, file: &mut SourceFile) -> MutationOutcome {
        let Some(class) = first_class_mut(file) else {
            return MutationOutcome::not_found();
        };
        let Some((i, j)) = find_constant(class, &self.name) else {
            return MutationOutcome::not_found();
        };

        if let Some(group) = constant_group_mut(class, i) {
            if group.items.len() > 1 {
                group.items.remove(j);
                return MutationOutcome::Applied;
            }
        }
        remove_member(&mut class.members, i);
        MutationOutcome::Applied
    }
}
