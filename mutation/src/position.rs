//! Insertion-position resolver.
//!
//! Picks the splice index for a new statement so that class members keep
//! the conventional order: mixin uses, constants, fields, routines.

use sculptor_parser::{MemberCategory, MemberStmt, Stmt, Trivia};

/// Category indices found in one scan of a class body.
#[derive(Debug, Default)]
struct MemberLayout {
    last_mixin: Option<usize>,
    first_field: Option<usize>,
    last_field: Option<usize>,
    first_routine: Option<usize>,
}

impl MemberLayout {
    fn scan(members: &[MemberStmt]) -> Self {
        let mut layout = MemberLayout::default();
        for (i, stmt) in members.iter().enumerate() {
            match stmt.member.category() {
                MemberCategory::MixinUse => layout.last_mixin = Some(i),
                MemberCategory::Field => {
                    layout.first_field.get_or_insert(i);
                    layout.last_field = Some(i);
                }
                MemberCategory::Routine => {
                    layout.first_routine.get_or_insert(i);
                }
                MemberCategory::Constant => {}
            }
        }
        layout
    }
}

/// Index at which a new member of `category` is inserted.
pub fn member_position(members: &[MemberStmt], category: MemberCategory) -> usize {
    let layout = MemberLayout::scan(members);
    match category {
        MemberCategory::MixinUse => layout
            .last_mixin
            .map(|i| i + 1)
            .or(layout.first_field)
            .or(layout.first_routine)
            .unwrap_or(0),
        MemberCategory::Field => layout
            .last_field
            .or(layout.last_mixin)
            .map(|i| i + 1)
            .or(layout.first_routine)
            .unwrap_or(0),
        MemberCategory::Constant => 0,
        MemberCategory::Routine => members.len(),
    }
}

/// Index at which a new import is inserted into a statement list.
///
/// After the last import, else before the first class, else after any
/// leading `declare` statements.
pub fn import_position(stmts: &[Stmt]) -> usize {
    if let Some(last) = stmts.iter().rposition(|s| matches!(s, Stmt::Use(_))) {
        return last + 1;
    }
    if let Some(first) = stmts.iter().position(|s| matches!(s, Stmt::Class(_))) {
        return first;
    }
    leading_declares(stmts)
}

/// Number of `declare` statements at the head of a statement list.
pub fn leading_declares(stmts: &[Stmt]) -> usize {
    stmts
        .iter()
        .take_while(|s| matches!(s, Stmt::Declare(_)))
        .count()
}

/// Insert a member. A member pushed off the top of the body falls back to
/// the default spacing.
pub fn splice_member(members: &mut Vec<MemberStmt>, index: usize, stmt: MemberStmt) {
    if index == 0 {
        if let Some(first) = members.first_mut() {
            release_top_gap(&mut first.trivia);
        }
    }
    members.insert(index, stmt);
}

/// Insert a statement, with the same spacing rule as [`splice_member`].
pub fn splice_stmt(stmts: &mut Vec<Stmt>, index: usize, stmt: Stmt) {
    if index == 0 {
        if let Some(trivia) = stmts.first_mut().and_then(Stmt::trivia_mut) {
            release_top_gap(trivia);
        }
    }
    stmts.insert(index, stmt);
}

/// Remove a member. The follower takes over the removed member's gap when
/// it moves to the top of the body or was packed against it.
pub fn remove_member(members: &mut Vec<MemberStmt>, index: usize) -> MemberStmt {
    let removed = members.remove(index);
    if let Some(next) = members.get_mut(index) {
        inherit_gap(&mut next.trivia, removed.trivia.blank_line_before, index == 0);
    }
    removed
}

/// Remove a statement, with the same spacing rule as [`remove_member`].
pub fn remove_stmt(stmts: &mut Vec<Stmt>, index: usize) -> Stmt {
    let removed = stmts.remove(index);
    let gap = removed.trivia().and_then(|t| t.blank_line_before);
    if let Some(trivia) = stmts.get_mut(index).and_then(Stmt::trivia_mut) {
        inherit_gap(trivia, gap, index == 0);
    }
    removed
}

fn inherit_gap(next: &mut Trivia, gap: Option<bool>, at_top: bool) {
    if at_top || next.blank_line_before == Some(false) {
        next.blank_line_before = gap;
    }
}

fn release_top_gap(trivia: &mut Trivia) {
    if trivia.blank_line_before == Some(false) {
        trivia.blank_line_before = None;
    }
}
