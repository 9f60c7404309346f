//! Read-only access to untyped provider records.
//!
//! Commits, pull requests, and issues arrive as JSON objects whose full shape
//! the pipeline never needs. `RawRecord` exposes the handful of fields the
//! classifier reads and tolerates anything else the provider adds.

use serde_json::Value;

/// One commit, pull request, or issue object as returned by the provider.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord(Value);

impl RawRecord {
    /// Wraps a JSON value.
    #[must_use]
    pub const fn new(value: Value) -> Self {
        Self(value)
    }

    /// Returns a top-level string field.
    #[must_use]
    pub fn str_field(&self, name: &str) -> Option<&str> {
        self.0.get(name).and_then(Value::as_str)
    }

    /// Follows a path of object keys and returns the string at its end.
    #[must_use]
    pub fn nested_str(&self, path: &[&str]) -> Option<&str> {
        path.iter()
            .try_fold(&self.0, |value, key| value.get(*key))
            .and_then(Value::as_str)
    }

    /// Returns true when the field is present and carries a value that is
    /// neither `null` nor empty.
    #[must_use]
    pub fn has_value(&self, name: &str) -> bool {
        self.0.get(name).is_some_and(is_populated)
    }

    /// Creation timestamp as sent by the provider.
    #[must_use]
    pub fn created_at(&self) -> Option<&str> {
        self.str_field("created_at")
    }

    /// API URL of the resource.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        self.str_field("url")
    }

    /// Login of the linked author account, if the record has one.
    #[must_use]
    pub fn author_login(&self) -> Option<&str> {
        if !self.has_value("author") {
            return None;
        }
        self.nested_str(&["author", "login"])
    }

    /// Returns true for issue-endpoint records that link to a pull request.
    #[must_use]
    pub fn has_pull_request(&self) -> bool {
        self.has_value("pull_request")
    }

    /// Borrows the underlying JSON value.
    #[must_use]
    pub const fn as_value(&self) -> &Value {
        &self.0
    }
}

fn is_populated(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::String(text) => !text.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
        Value::Number(_) => true,
    }
}
