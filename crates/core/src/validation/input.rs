//! Submitted form values before and after validation.

use std::collections::BTreeMap;

use crate::error::CoreError;
use crate::uploads::UploadedFile;

/// A single submitted field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    File(UploadedFile),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::File(_) => None,
        }
    }

    pub fn as_file(&self) -> Option<&UploadedFile> {
        match self {
            Self::File(file) => Some(file),
            Self::Text(_) => None,
        }
    }
}

/// Raw form input keyed by field name.
///
/// Text is trimmed on insert and blank text is dropped, so an empty input
/// and a missing input look the same to the rules. Empty file parts (a
/// file input left blank) are dropped too.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormInput {
    values: BTreeMap<String, FieldValue>,
}

impl FormInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: AsRef<str>,
    {
        let mut input = Self::new();
        for (key, value) in pairs {
            input.insert_text(key, value.as_ref());
        }
        input
    }

    pub fn insert_text(&mut self, field: impl Into<String>, value: &str) {
        let field = field.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            self.values.remove(&field);
        } else {
            self.values
                .insert(field, FieldValue::Text(trimmed.to_string()));
        }
    }

    pub fn insert_file(&mut self, field: impl Into<String>, file: UploadedFile) {
        let field = field.into();
        if file.bytes.is_empty() {
            self.values.remove(&field);
        } else {
            self.values.insert(field, FieldValue::File(file));
        }
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.values.get(field)
    }

    pub fn text(&self, field: &str) -> Option<&str> {
        self.get(field).and_then(FieldValue::as_text)
    }

    /// Text values only, for re-filling a form after a failed submit.
    pub fn text_values(&self) -> BTreeMap<String, String> {
        self.values
            .iter()
            .filter_map(|(key, value)| value.as_text().map(|text| (key.clone(), text.to_string())))
            .collect()
    }

    pub(crate) fn into_values(self) -> BTreeMap<String, FieldValue> {
        self.values
    }
}

/// Input that passed every rule, restricted to the fields the rule set names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidatedForm {
    values: BTreeMap<String, FieldValue>,
}

impl ValidatedForm {
    pub(crate) fn new(values: BTreeMap<String, FieldValue>) -> Self {
        Self { values }
    }

    pub fn text(&self, field: &str) -> Option<&str> {
        self.values.get(field).and_then(FieldValue::as_text)
    }

    pub fn file(&self, field: &str) -> Option<&UploadedFile> {
        self.values.get(field).and_then(FieldValue::as_file)
    }

    /// Integer value of a field that passed `numeric`. Fractional input
    /// such as `"2.0"` is accepted when it is integral.
    pub fn integer(&self, field: &str) -> Option<i64> {
        let text = self.text(field)?;
        text.parse::<i64>().ok().or_else(|| {
            text.parse::<f64>()
                .ok()
                .filter(|n| n.fract() == 0.0 && n.abs() < i64::MAX as f64)
                .map(|n| n as i64)
        })
    }

    /// Like [`text`](Self::text) for a field guarded by `required`.
    pub fn required_text(&self, field: &str) -> Result<&str, CoreError> {
        self.text(field)
            .ok_or_else(|| CoreError::Internal(format!("validated form is missing '{field}'")))
    }

    /// Like [`integer`](Self::integer) for a field guarded by `required|numeric`.
    pub fn required_integer(&self, field: &str) -> Result<i64, CoreError> {
        self.integer(field).ok_or_else(|| {
            CoreError::Internal(format!("validated form has no integer '{field}'"))
        })
    }
}
