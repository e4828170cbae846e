//! Rule sets for the edit forms.
//!
//! Choice fields take the ids of the lookup rows that currently exist, so a
//! stale or forged id is a validation error rather than a foreign-key
//! failure in the store.

use crate::types::DbId;
use crate::validation::{Rule, RuleSet};

/// Largest accepted avatar upload.
pub const AVATAR_MAX_KIB: u64 = 1024;

/// Field carrying the avatar upload on the user form.
pub const AVATAR_FIELD: &str = "avatar_file";

fn one_of(ids: &[DbId]) -> Rule {
    Rule::In(ids.iter().map(DbId::to_string).collect())
}

/// `name` required, `email` required+email, `number` and `department_id`
/// required+numeric, `avatar_file` optional image up to 1 MiB.
pub fn user_rules(department_ids: &[DbId]) -> RuleSet {
    RuleSet::new()
        .field("name", [Rule::Required])
        .field("email", [Rule::Required, Rule::Email])
        .field("number", [Rule::Required, Rule::Numeric])
        .field(
            "department_id",
            [Rule::Required, Rule::Numeric, one_of(department_ids)],
        )
        .field(
            AVATAR_FIELD,
            [Rule::Nullable, Rule::Image, Rule::Max(AVATAR_MAX_KIB)],
        )
}

const PROJECT_NAME_MAX: u64 = 255;

/// Lookup ids offered by the project form.
#[derive(Debug, Clone, Default)]
pub struct ProjectChoices {
    pub status_ids: Vec<DbId>,
    pub category_ids: Vec<DbId>,
    pub priority_ids: Vec<DbId>,
}

pub fn project_rules(choices: &ProjectChoices) -> RuleSet {
    RuleSet::new()
        .field_with_messages(
            "name",
            [
                (Rule::Required, Rule::Required.default_message("name")),
                (
                    Rule::Max(PROJECT_NAME_MAX),
                    format!("The name field must not be greater than {PROJECT_NAME_MAX} characters."),
                ),
            ],
        )
        .field(
            "status_id",
            [Rule::Required, Rule::Numeric, one_of(&choices.status_ids)],
        )
        .field(
            "category_id",
            [Rule::Nullable, Rule::Numeric, one_of(&choices.category_ids)],
        )
        .field(
            "priority_id",
            [Rule::Nullable, Rule::Numeric, one_of(&choices.priority_ids)],
        )
}
