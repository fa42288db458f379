//! Utility functions and types.

use std::fmt;
use std::fmt::Debug;
use std::fmt::Display;

/// Query keys whose values must never show up in logs.
const SENSITIVE_QUERY_KEYS: [&str; 2] = ["apikey", "signature"];

/// The first pair of a full URI carries everything up to `?` in its key.
fn is_sensitive(key: &str) -> bool {
    let key = key.rsplit('?').next().unwrap_or(key);
    SENSITIVE_QUERY_KEYS.contains(&key)
}

/// Redacts a string by replacing all but the first and last three characters with asterisks.
///
/// - If the input string has fewer than 12 characters, it is entirely redacted.
/// - If the input string has 12 or more characters, only the first three and the last three
///   are kept.
///
/// Different keys stay distinguishable in logs without leaking them.
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

impl Debug for Redact<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let length = self.0.len();
        if length == 0 {
            f.write_str("EMPTY")
        } else if length < 12
            || !self.0.is_char_boundary(3)
            || !self.0.is_char_boundary(length - 3)
        {
            f.write_str("***")
        } else {
            f.write_str(&self.0[..3])?;
            f.write_str("***")?;
            f.write_str(&self.0[length - 3..])
        }
    }
}

/// Formats an encoded query string, or a full URI, with the values of
/// `apikey` and `signature` redacted.
///
/// ```
/// use cloudstack_sign_core::utils::RedactQuery;
///
/// let q = "apikey=abcdefghijklmnop&command=listZones&signature=xyz";
/// assert_eq!(
///     RedactQuery::from(q).to_string(),
///     "apikey=abc***nop&command=listZones&signature=***"
/// );
/// ```
pub struct RedactQuery<'a>(&'a str);

impl<'a> From<&'a str> for RedactQuery<'a> {
    fn from(value: &'a str) -> Self {
        RedactQuery(value)
    }
}

impl Display for RedactQuery<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, pair) in self.0.split('&').enumerate() {
            if idx != 0 {
                f.write_str("&")?;
            }

            match pair.split_once('=') {
                Some((k, v)) if is_sensitive(k) => write!(f, "{k}={:?}", Redact(v))?,
                _ => f.write_str(pair)?,
            }
        }

        Ok(())
    }
}

impl Debug for RedactQuery<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{self}\"")
    }
}
