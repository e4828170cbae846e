//! Form validation engine.
//!
//! A [`RuleSet`] maps each field to an ordered list of rules with messages.
//! Fields are checked independently and the result is all-or-nothing:
//! either a [`ValidatedForm`] or the [`FieldErrors`] for every failing field.

pub mod evaluator;
pub mod input;
pub mod rules;

pub use input::{FieldValue, FormInput, ValidatedForm};
pub use rules::{FieldErrors, FieldRules, Rule, RuleCheck, RuleSet};
