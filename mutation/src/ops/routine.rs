//! Routines (methods).

use sculptor_parser::{BodyLayout, Member, MemberStmt, Modifiers, Routine, SourceFile, Trivia, Visibility};

use crate::locate::{find_routine, first_class_mut, routine_mut};
use crate::position::remove_member;
use crate::result::MutationOutcome;
use crate::signature::{build_body, ParamSpec};

/// Append a routine to the class.
///
/// An existing routine with the same name is kept unless `overwrite` is
/// set, in which case its statement is replaced in place.
#[derive(Debug, Clone, PartialEq)]
pub struct AddRoutine {
    pub name: String,
    pub params: Vec<ParamSpec>,
    pub body: String,
    pub visibility: Option<Visibility>,
    pub overwrite: bool,
}

impl AddRoutine {
    pub fn new(name: impl Into<String>, params: Vec<ParamSpec>, body: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params,
            body: body.into(),
            visibility: None,
            overwrite: false,
        }
    }

    fn build(&self) -> Routine {
        Routine {
            modifiers: Modifiers::with_visibility(self.visibility.unwrap_or(Visibility::Public)),
            params: self.params.iter().map(ParamSpec::to_param).collect(),
            body: Some(build_body(&self.name, &self.body)),
            ..Routine::new(self.name.clone())
        }
    }

    pub fn apply(&self, file: &mut SourceFile) -> MutationOutcome {
        let Some(class) = first_class_mut(file) else {
            return MutationOutcome::not_found();
        };

        match find_routine(class, &self.name) {
            Some(_) if !self.overwrite => MutationOutcome::duplicate(),
            Some(index) => {
                // The old docblock and attributes described the old
                // signature; only the spacing survives.
                let stmt = &mut class.members[index];
                stmt.trivia = Trivia {
                    blank_line_before: stmt.trivia.blank_line_before,
                    ..Trivia::default()
                };
                stmt.member = Member::Routine(self.build());
                MutationOutcome::Applied
            }
            None => {
                class
                    .members
                    .push(MemberStmt::new(Member::Routine(self.build())));
                MutationOutcome::Applied
            }
        }
    }
}

/// Change a routine in place. Each facet changes only when supplied.
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeRoutine {
    pub name: String,
    pub params: Option<Vec<ParamSpec>>,
    pub body: Option<String>,
    pub visibility: Option<Visibility>,
}

impl ChangeRoutine {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: None,
            body: None,
            visibility: None,
        }
    }

    pub fn with_params(mut self, params: Vec<ParamSpec>) -> Self {
        self.params = Some(params);
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn with_visibility(mut self, visibility: Option<Visibility>) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn apply(&self, file: &mut SourceFile) -> MutationOutcome {
        let Some(class) = first_class_mut(file) else {
            return MutationOutcome::not_found();
        };
        let Some(index) = find_routine(class, &self.name) else {
            return MutationOutcome::not_found();
        };
        let Some(routine) = routine_mut(class, index) else {
            return MutationOutcome::not_found();
        };

        if let Some(params) = &self.params {
            routine.params = params.iter().map(ParamSpec::to_param).collect();
            routine.params_multiline = false;
        }
        if let Some(body) = &self.body {
            routine.body = Some(build_body(&routine.name, body));
            routine.modifiers.is_abstract = false;
            if routine.body_layout == BodyLayout::Inline {
                routine.body_layout = BodyLayout::NextLine;
            }
        }
        if let Some(visibility) = self.visibility {
            routine.modifiers.set_visibility(visibility);
        }
        MutationOutcome::Applied
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RemoveRoutine {
    pub name: String,
}

impl RemoveRoutine {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn apply(&self, file: &mut SourceFile) -> MutationOutcome {
        let Some(class) = first_class_mut(file) else {
            return MutationOutcome::not_found();
        };
        match find_routine(class, &self.name) {
            Some(index) => {
                remove_member(&mut class.members, index);
                MutationOutcome::Applied
            }
            None => MutationOutcome::not_found(),
        }
    }
}
