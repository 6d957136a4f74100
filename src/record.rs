//! Default-on-missing access to loosely shaped OpenAlex JSON records.
//!
//! The service omits fields, sends `null` for absent objects, and has changed
//! the shape of some fields over time. [`Record`] wraps a borrowed
//! [`serde_json::Value`] and never fails: a missing or null object degrades to
//! an empty record, a missing leaf to the caller's default.

use serde_json::Value;

static NULL: Value = Value::Null;

/// Borrowed view over one JSON object with default-on-missing accessors.
#[derive(Debug, Clone, Copy)]
pub struct Record<'a> {
    value: &'a Value,
}

impl<'a> Record<'a> {
    /// Wraps a JSON value. Non-object values behave like an empty record.
    #[must_use]
    pub fn new(value: &'a Value) -> Self {
        Self { value }
    }

    /// An empty record.
    #[must_use]
    pub fn empty() -> Self {
        Self { value: &NULL }
    }

    /// True when the record has no fields (null, non-object or `{}`).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.value.as_object().is_none_or(serde_json::Map::is_empty)
    }

    /// Returns the raw value for `key` unless it is missing or null.
    #[must_use]
    pub fn raw(&self, key: &str) -> Option<&'a Value> {
        self.value.get(key).filter(|value| !value.is_null())
    }

    /// Nested object for `key`; missing or null degrades to an empty record.
    #[must_use]
    pub fn field(&self, key: &str) -> Record<'a> {
        self.raw(key).map_or_else(Record::empty, Record::new)
    }

    /// String value for `key`, if it is a string.
    #[must_use]
    pub fn text(&self, key: &str) -> Option<&'a str> {
        self.raw(key).and_then(Value::as_str)
    }

    /// String value for `key`, or `default` when missing, null or not a string.
    #[must_use]
    pub fn text_or(&self, key: &str, default: &'a str) -> &'a str {
        self.text(key).unwrap_or(default)
    }

    /// Non-negative integer for `key`, or 0.
    #[must_use]
    pub fn count(&self, key: &str) -> u64 {
        self.raw(key).and_then(Value::as_u64).unwrap_or(0)
    }

    /// Floating-point value for `key`, or 0.0.
    #[must_use]
    pub fn score(&self, key: &str) -> f64 {
        self.raw(key).and_then(Value::as_f64).unwrap_or(0.0)
    }

    /// Elements of the list at `key`; anything but a list yields no elements.
    #[must_use]
    pub fn list(&self, key: &str) -> &'a [Value] {
        self.raw(key)
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Resolves a field that may be either a list of objects or one object.
    ///
    /// A list yields its first element, an object yields itself, anything
    /// else an empty record.
    #[must_use]
    pub fn first_or_self(&self, key: &str) -> Record<'a> {
        match self.raw(key) {
            Some(Value::Array(items)) => items.first().map_or_else(Record::empty, Record::new),
            Some(object) if object.is_object() => Record::new(object),
            _ => Record::empty(),
        }
    }
}

/// Reduces a full service URL to its trailing identifier.
///
/// Values starting with `https` are cut to their last path segment; anything
/// else is assumed to be a bare identifier already and returned unchanged.
///
/// ```
/// use openalex_tools::record::extract_id;
///
/// assert_eq!(extract_id("https://openalex.org/A5020577047"), "A5020577047");
/// assert_eq!(extract_id("A5020577047"), "A5020577047");
/// ```
#[must_use]
pub fn extract_id(value: &str) -> &str {
    if value.starts_with("https") {
        value.rsplit('/').next().unwrap_or(value)
    } else {
        value
    }
}
