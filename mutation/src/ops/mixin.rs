//! Mixin (trait) uses inside the class body.

use sculptor_parser::{Member, MemberCategory, MemberStmt, MixinUse, SourceFile};

use crate::locate::{first_class_mut, names_match};
use crate::position::{member_position, remove_member, splice_member};
use crate::result::MutationOutcome;

/// Add `use Mixin;` to the class.
#[derive(Debug, Clone, PartialEq)]
pub struct AddMixin {
    pub mixin: String,
}

impl AddMixin {
    pub fn new(mixin: impl Into<String>) -> Self {
        Self {
            mixin: mixin.into(),
        }
    }

    pub fn apply(&self, file: &mut SourceFile) -> MutationOutcome {
        let Some(class) = first_class_mut(file) else {
            return MutationOutcome::not_found();
        };

        let present = class.members.iter().any(|stmt| match &stmt.member {
            Member::MixinUse(mixin) => mixin.names.iter().any(|n| names_match(n, &self.mixin)),
            _ => false,
        });
        if present {
            return MutationOutcome::duplicate();
        }

        let index = member_position(&class.members, MemberCategory::MixinUse);
        splice_member(
            &mut class.members,
            index,
            MemberStmt::new(Member::MixinUse(MixinUse::new(self.mixin.clone()))),
        );
        MutationOutcome::Applied
    }
}

/// Remove a mixin from its use statement; the statement goes with its
/// last mixin.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoveMixin {
    pub mixin: String,
}

impl RemoveMixin {
    pub fn new(mixin: impl Into<String>) -> Self {
        Self {
            mixin: mixin.into(),
        }
    }

    pub fn apply(&self, file: &mut SourceFile) -> MutationOutcome {
        let Some(class) = first_class_mut(file) else {
            return MutationOutcome::not_found();
        };

        let found = class.members.iter().enumerate().find_map(|(i, stmt)| match &stmt.member {
            Member::MixinUse(mixin) => mixin
                .names
                .iter()
                .position(|n| names_match(n, &self.mixin))
                .map(|j| (i, j, mixin.names.len())),
            _ => None,
        });

        match found {
            Some((i, _, 1)) => {
                remove_member(&mut class.members, i);
            }
            Some((i, j, _)) => {
                if let Member::MixinUse(mixin) = &mut class.members[i].member {
                    mixin.names.remove(j);
                }
            }
            None => return MutationOutcome::not_found(),
        }
        MutationOutcome::Applied
    }
}
