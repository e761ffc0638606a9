//! Required-field bookkeeping shared by the account and tenant payload checks.

use std::collections::BTreeMap;

use serde::Serialize;

/// Field path (dotted, camelCase as the forms submit it) mapped to a message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_insert_with(|| message.into());
    }

    /// Records `message` when `value` is blank after trimming.
    pub fn require_text(&mut self, field: &str, value: &str, message: &str) {
        if value.trim().is_empty() {
            self.insert(field, message);
        }
    }

    pub fn require_some<T>(&mut self, field: &str, value: Option<&T>, message: &str) {
        if value.is_none() {
            self.insert(field, message);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// `Ok(())` when nothing was recorded.
    pub fn into_result(self) -> Result<(), ValidationFailure> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(ValidationFailure { fields: self })
        }
    }
}

/// Raised when one or more required fields are missing or malformed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid or missing fields: {}", .fields.fields().collect::<Vec<_>>().join(", "))]
pub struct ValidationFailure {
    pub fields: FieldErrors,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_first_message_per_field() {
        let mut errors = FieldErrors::new();
        errors.insert("email", "Email is required");
        errors.insert("email", "Email is malformed");
        assert_eq!(errors.get("email"), Some("Email is required"));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn blank_text_counts_as_missing() {
        let mut errors = FieldErrors::new();
        errors.require_text("firstName", "   ", "First name is required");
        errors.require_text("lastName", "Okafor", "Last name is required");
        let failure = errors.into_result().expect_err("first name missing");
        assert_eq!(failure.to_string(), "invalid or missing fields: firstName");
    }
}
