//! Rule evaluator — pure logic, no database access.

use std::collections::BTreeMap;

use validator::ValidateEmail;

use super::input::{FieldValue, FormInput, ValidatedForm};
use super::rules::{FieldErrors, Rule, RuleSet};

impl RuleSet {
    /// Run every field's checks. Either all pass and the named fields are
    /// returned, or nothing is returned but the violations.
    pub fn validate(&self, input: FormInput) -> Result<ValidatedForm, FieldErrors> {
        let mut errors = FieldErrors::new();
        let mut values = input.into_values();
        let mut validated = BTreeMap::new();

        for field_rules in &self.fields {
            let value = values.remove(&field_rules.field);

            for check in &field_rules.checks {
                if !passes(&check.rule, value.as_ref()) {
                    errors.add(field_rules.field.clone(), check.message.clone());
                }
            }

            if let Some(value) = value {
                validated.insert(field_rules.field.clone(), value);
            }
        }

        if errors.is_empty() {
            Ok(ValidatedForm::new(validated))
        } else {
            Err(errors)
        }
    }
}

fn passes(rule: &Rule, value: Option<&FieldValue>) -> bool {
    let Some(value) = value else {
        return !rule.is_implicit();
    };

    match (rule, value) {
        (Rule::Required | Rule::Nullable, _) => true,
        (Rule::Email, FieldValue::Text(text)) => text.validate_email(),
        (Rule::Numeric, FieldValue::Text(text)) => is_numeric(text),
        (Rule::In(allowed), FieldValue::Text(text)) => allowed.iter().any(|a| a == text),
        (Rule::Image, FieldValue::File(file)) => file.is_image(),
        (Rule::Max(max), FieldValue::File(file)) => file.size_kib() <= *max,
        (Rule::Max(max), FieldValue::Text(text)) => text.chars().count() as u64 <= *max,
        // A text rule given a file, or a file rule given text.
        (Rule::Email | Rule::Numeric | Rule::In(_) | Rule::Image, _) => false,
    }
}

fn is_numeric(text: &str) -> bool {
    text.parse::<f64>().is_ok_and(f64::is_finite)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::uploads::fixtures::{png, text};

    fn user_like_rules() -> RuleSet {
        RuleSet::new()
            .field("name", [Rule::Required])
            .field("email", [Rule::Required, Rule::Email])
            .field("number", [Rule::Required, Rule::Numeric])
            .field("avatar_file", [Rule::Nullable, Rule::Image, Rule::Max(1024)])
    }

    fn valid_input() -> FormInput {
        FormInput::from_pairs([
            ("name", "Ada Lovelace"),
            ("email", "ada@example.com"),
            ("number", "0612345678"),
        ])
    }

    #[test]
    fn valid_input_passes() {
        let form = user_like_rules().validate(valid_input()).unwrap();
        assert_eq!(form.text("name"), Some("Ada Lovelace"));
        assert_eq!(form.text("email"), Some("ada@example.com"));
        assert!(form.file("avatar_file").is_none());
    }

    #[test]
    fn malformed_email_reports_on_email_only() {
        let mut input = valid_input();
        input.insert_text("email", "not-an-email");
        let errors = user_like_rules().validate(input).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.first("email"),
            Some("The email field must be a valid email address.")
        );
    }

    #[test]
    fn blank_required_field_reports_only_required() {
        let mut input = valid_input();
        input.insert_text("email", "   ");
        let errors = user_like_rules().validate(input).unwrap_err();
        assert_eq!(errors.get("email"), ["The email field is required."]);
    }

    #[test]
    fn every_failing_field_is_reported() {
        let errors = user_like_rules()
            .validate(FormInput::from_pairs([("number", "12b")]))
            .unwrap_err();
        assert!(errors.has("name"));
        assert!(errors.has("email"));
        assert_eq!(errors.first("number"), Some("The number field must be a number."));
        assert!(!errors.has("avatar_file"));
    }

    #[test]
    fn numeric_accepts_signed_and_decimal() {
        for ok in ["42", "-3", "+7", "2.5", ".5", "1e3"] {
            assert!(is_numeric(ok), "{ok} should be numeric");
        }
        for bad in ["abc", "1,000", "NaN", "inf", "12 34"] {
            assert!(!is_numeric(bad), "{bad} should not be numeric");
        }
    }

    #[test]
    fn image_rules_check_content_and_size() {
        let rules = user_like_rules();

        let mut input = valid_input();
        input.insert_file("avatar_file", png(2048));
        let form = rules.validate(input).unwrap();
        assert!(form.file("avatar_file").is_some());

        let mut input = valid_input();
        input.insert_file("avatar_file", png(1024 * 1024 + 1));
        let errors = rules.validate(input).unwrap_err();
        assert_eq!(
            errors.get("avatar_file"),
            ["The avatar file field must not be greater than 1024 kilobytes."]
        );

        let mut input = valid_input();
        input.insert_file("avatar_file", text("avatar.png"));
        let errors = rules.validate(input).unwrap_err();
        assert_eq!(errors.first("avatar_file"), Some("The avatar file field must be an image."));
    }

    #[test]
    fn in_rule_limits_choices() {
        let rules = RuleSet::new().field(
            "department_id",
            [Rule::Required, Rule::Numeric, Rule::In(vec!["1".into(), "2".into()])],
        );
        assert!(rules
            .validate(FormInput::from_pairs([("department_id", "2")]))
            .is_ok());
        let errors = rules
            .validate(FormInput::from_pairs([("department_id", "9")]))
            .unwrap_err();
        assert_eq!(errors.get("department_id"), ["The selected department id is invalid."]);
    }

    #[test]
    fn custom_messages_replace_defaults() {
        let rules = RuleSet::new().field_with_messages(
            "name",
            [(Rule::Required, "Give the project a name.".to_string())],
        );
        let errors = rules.validate(FormInput::new()).unwrap_err();
        assert_eq!(errors.first("name"), Some("Give the project a name."));
    }

    #[test]
    fn unknown_fields_are_dropped() {
        let mut input = valid_input();
        input.insert_text("is_admin", "1");
        let form = user_like_rules().validate(input).unwrap();
        assert_eq!(form.text("is_admin"), None);
    }

    #[test]
    fn integer_accepts_integral_decimals() {
        let rules = RuleSet::new().field("n", [Rule::Numeric]);
        let form = rules.validate(FormInput::from_pairs([("n", "3.0")])).unwrap();
        assert_eq!(form.integer("n"), Some(3));
        let form = rules.validate(FormInput::from_pairs([("n", "3.5")])).unwrap();
        assert_eq!(form.integer("n"), None);
    }

    #[test]
    fn field_errors_display_lists_every_message() {
        let mut errors = FieldErrors::new();
        errors.add("email", "bad email");
        errors.add("name", "missing");
        assert_eq!(errors.to_string(), "email: bad email; name: missing");
    }
}
