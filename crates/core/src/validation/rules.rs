//! Declarative per-field rule sets.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

/// A single predicate applied to one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    /// The field must be present and non-blank.
    Required,
    /// Marks the field optional. Never fails.
    Nullable,
    /// A well-formed email address.
    Email,
    /// Parses as a finite number.
    Numeric,
    /// One of the listed values (e.g. ids of existing lookup rows).
    In(Vec<String>),
    /// An uploaded file whose content is a supported image.
    Image,
    /// At most this many KiB for files, or characters for text.
    Max(u64),
}

impl Rule {
    /// Whether the rule runs on a blank field. Only `required` does; every
    /// other rule passes vacuously when the field is absent.
    pub fn is_implicit(&self) -> bool {
        matches!(self, Self::Required)
    }

    /// Default human-readable message for a failure on `field`.
    pub fn default_message(&self, field: &str) -> String {
        let label = field.replace('_', " ");
        match self {
            Self::Required => format!("The {label} field is required."),
            Self::Nullable => String::new(),
            Self::Email => format!("The {label} field must be a valid email address."),
            Self::Numeric => format!("The {label} field must be a number."),
            Self::In(_) => format!("The selected {label} is invalid."),
            Self::Image => format!("The {label} field must be an image."),
            Self::Max(max) => {
                format!("The {label} field must not be greater than {max} kilobytes.")
            }
        }
    }
}

/// A rule paired with the message reported when it fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleCheck {
    pub rule: Rule,
    pub message: String,
}

/// The ordered checks for one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRules {
    pub field: String,
    pub checks: Vec<RuleCheck>,
}

/// Field name to ordered checks. Fields are validated independently and in
/// declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSet {
    pub(crate) fields: Vec<FieldRules>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field whose rules report their default messages.
    pub fn field(self, field: &str, rules: impl IntoIterator<Item = Rule>) -> Self {
        let checks = rules
            .into_iter()
            .map(|rule| RuleCheck {
                message: rule.default_message(field),
                rule,
            })
            .collect();
        self.push(field, checks)
    }

    /// Add a field with explicit messages.
    pub fn field_with_messages(
        self,
        field: &str,
        rules: impl IntoIterator<Item = (Rule, String)>,
    ) -> Self {
        let checks = rules
            .into_iter()
            .map(|(rule, message)| RuleCheck { rule, message })
            .collect();
        self.push(field, checks)
    }

    fn push(mut self, field: &str, checks: Vec<RuleCheck>) -> Self {
        self.fields.push(FieldRules {
            field: field.to_string(),
            checks,
        });
        self
    }
}

/// Field name to the messages of every rule it violated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    pub fn get(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn first(&self, field: &str) -> Option<&str> {
        self.get(field).first().map(String::as_str)
    }

    pub fn has(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of fields with at least one violation.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in self.iter() {
            for message in messages {
                if !first {
                    f.write_str("; ")?;
                }
                write!(f, "{field}: {message}")?;
                first = false;
            }
        }
        Ok(())
    }
}
