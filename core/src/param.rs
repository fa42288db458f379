//! Parameter coercion and query encoding.

use percent_encoding::utf8_percent_encode;
use percent_encoding::AsciiSet;
use percent_encoding::NON_ALPHANUMERIC;
use serde_json::Value;

use crate::Error;
use crate::Result;

/// AsciiSet for [RFC 3986](https://www.rfc-editor.org/rfc/rfc3986#section-2.3) query encoding.
///
/// - Encode every byte except the unreserved characters: 'A'-'Z', 'a'-'z', '0'-'9', '-', '.', '_', and '~'.
pub static QUERY_ENCODE_SET: AsciiSet = NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Percent-encode a query key or value with [`QUERY_ENCODE_SET`].
pub fn percent_encode(input: &str) -> String {
    utf8_percent_encode(input, &QUERY_ENCODE_SET).to_string()
}

/// Coerce a parameter value into the string that is sent on the wire.
///
/// - booleans become `true` / `false`
/// - numbers become their decimal form: integral floats below 1e15 drop the
///   fraction, other floats use the shortest form that round-trips and never
///   an exponent
/// - strings are kept as is
///
/// `null`, arrays and objects are rejected with an invalid argument error
/// naming the key.
pub fn param_to_string(key: &str, value: &Value) -> Result<String> {
    match value {
        Value::Bool(true) => Ok("true".to_string()),
        Value::Bool(false) => Ok("false".to_string()),
        Value::Number(n) => {
            if let Some(v) = n.as_i64() {
                Ok(v.to_string())
            } else if let Some(v) = n.as_u64() {
                Ok(v.to_string())
            } else {
                // serde_json numbers are always finite.
                Ok(format_float(n.as_f64().unwrap_or_default()))
            }
        }
        Value::String(s) => Ok(s.clone()),
        v => Err(Error::invalid_argument(format!(
            "unsupported parameter type: `{key}` expected boolean, number or string, found {}",
            type_name(v)
        ))),
    }
}

fn format_float(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        format!("{v}")
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
