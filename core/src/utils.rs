//! Utility functions and types.

use std::fmt::Debug;

/// Redacts a secret for `Debug` output.
///
/// - Empty input renders as `EMPTY`.
/// - Input shorter than 12 characters is fully masked.
/// - Longer input keeps the first and last three characters so different
///   secrets can still be told apart in logs.
pub struct Redact<'a>(&'a str);

impl<'a> From<&'a str> for Redact<'a> {
    fn from(value: &'a str) -> Self {
        Redact(value)
    }
}

impl<'a> From<&'a String> for Redact<'a> {
    fn from(value: &'a String) -> Self {
        Redact(value.as_str())
    }
}

impl<'a> From<&'a Option<String>> for Redact<'a> {
    fn from(value: &'a Option<String>) -> Self {
        Redact(value.as_deref().unwrap_or_default())
    }
}

impl Debug for Redact<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let length = self.0.chars().count();
        if length == 0 {
            f.write_str("EMPTY")
        } else if length < 12 {
            f.write_str("***")
        } else {
            let head: String = self.0.chars().take(3).collect();
            let tail: String = self.0.chars().skip(length - 3).collect();
            write!(f, "{head}***{tail}")
        }
    }
}
