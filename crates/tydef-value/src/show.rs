//! External representation of values.
//!
//! `show` produces the text used verbatim in diagnostics. Two values with
//! the same representation are considered equal enumeration members.

use time::OffsetDateTime;

use crate::Value;

/// Render a value. References already on the current printing path render
/// as `<Circular>`.
pub fn show(value: &Value) -> String {
    let mut path = Vec::new();
    show_inner(value, &mut path)
}

fn show_inner(value: &Value, path: &mut Vec<usize>) -> String {
    match value {
        Value::Undefined => "undefined".to_string(),
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => show_number(*n),
        Value::String(s) => show_string(s),
        Value::Date(ms) => match iso_string(*ms) {
            Some(iso) => format!("new Date ({})", show_string(&iso)),
            None => "new Date (NaN)".to_string(),
        },
        Value::RegExp(re) => format!("/{}/{}", re.source, re.flags),
        Value::Error(message) => format!("new Error ({})", show_string(message)),
        Value::Placeholder => "__".to_string(),
        Value::Function(function) => match function.display() {
            Some(display) => display.to_string(),
            None if function.name().is_empty() => "[Function]".to_string(),
            None => format!("[Function {}]", function.name()),
        },
        Value::Array(array) => {
            let id = array.identity();
            if path.contains(&id) {
                return "<Circular>".to_string();
            }
            path.push(id);
            let items = array.to_vec();
            let parts: Vec<String> = items.iter().map(|v| show_inner(v, path)).collect();
            path.pop();
            format!("[{}]", parts.join(", "))
        }
        Value::Object(object) => {
            if let Some(hook) = object.show_hook() {
                return hook(object);
            }
            let id = object.identity();
            if path.contains(&id) {
                return "<Circular>".to_string();
            }
            path.push(id);
            let parts: Vec<String> = object
                .entries()
                .iter()
                .map(|(k, v)| format!("{}: {}", show_string(k), show_inner(v, path)))
                .collect();
            path.pop();
            format!("{{{}}}", parts.join(", "))
        }
    }
}

/// Numbers in the host's notation: `-0`, `NaN`, `Infinity`, `1e+21`.
pub fn show_number(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return (if n > 0.0 { "Infinity" } else { "-Infinity" }).to_string();
    }
    if n == 0.0 {
        return (if n.is_sign_negative() { "-0" } else { "0" }).to_string();
    }
    let abs = n.abs();
    if abs >= 1e21 || abs < 1e-6 {
        let exp = format!("{n:e}");
        return match exp.split_once('e') {
            Some((mantissa, power)) if !power.starts_with('-') => {
                format!("{mantissa}e+{power}")
            }
            _ => exp,
        };
    }
    format!("{n}")
}

/// Double-quoted string with JSON escapes.
pub fn show_string(s: &str) -> String {
    serde_json::Value::String(s.to_string()).to_string()
}

/// Largest timestamp magnitude, in milliseconds, the host accepts.
pub const MAX_TIMESTAMP_MS: f64 = 8.64e15;

/// Whether a date's timestamp denotes an actual instant.
pub fn is_valid_timestamp(ms: f64) -> bool {
    ms.is_finite() && ms.abs() <= MAX_TIMESTAMP_MS
}

/// `YYYY-MM-DDTHH:MM:SS.sssZ` for a millisecond timestamp, with six-digit
/// signed years outside 0000-9999. `None` for invalid timestamps.
fn iso_string(ms: f64) -> Option<String> {
    if !is_valid_timestamp(ms) {
        return None;
    }
    let nanos = i128::from(ms.trunc() as i64) * 1_000_000;
    let t = OffsetDateTime::from_unix_timestamp_nanos(nanos).ok()?;
    let year = t.year();
    let year = if (0..=9999).contains(&year) {
        format!("{year:04}")
    } else if year < 0 {
        format!("-{:06}", -year)
    } else {
        format!("+{year:06}")
    };
    Some(format!(
        "{year}-{:02}-{:02}T{:02}:{:02}:{:02}.{:03}Z",
        u8::from(t.month()),
        t.day(),
        t.hour(),
        t.minute(),
        t.second(),
        t.millisecond()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Array, Object};

    #[test]
    fn primitives() {
        assert_eq!(show(&Value::Undefined), "undefined");
        assert_eq!(show(&Value::Null), "null");
        assert_eq!(show(&Value::from(true)), "true");
        assert_eq!(show(&Value::from("XXX")), "\"XXX\"");
        assert_eq!(show(&Value::from("a\"b\n")), "\"a\\\"b\\n\"");
        assert_eq!(show(&Value::from("\u{1}")), "\"\\u0001\"");
        assert_eq!(show(&Value::regexp("xxx", "g")), "/xxx/g");
        assert_eq!(show(&Value::error("boom")), "new Error (\"boom\")");
    }

    #[test]
    fn numbers_use_host_notation() {
        assert_eq!(show_number(2.0), "2");
        assert_eq!(show_number(-0.0), "-0");
        assert_eq!(show_number(1.5), "1.5");
        assert_eq!(show_number(f64::NAN), "NaN");
        assert_eq!(show_number(f64::NEG_INFINITY), "-Infinity");
        assert_eq!(show_number(1e21), "1e+21");
        assert_eq!(show_number(1.5e-7), "1.5e-7");
    }

    #[test]
    fn dates() {
        assert_eq!(
            show(&Value::Date(0.0)),
            "new Date (\"1970-01-01T00:00:00.000Z\")"
        );
        assert_eq!(
            show(&Value::Date(946_684_800_123.0)),
            "new Date (\"2000-01-01T00:00:00.123Z\")"
        );
        assert_eq!(
            show(&Value::Date(-1.0)),
            "new Date (\"1969-12-31T23:59:59.999Z\")"
        );
        assert_eq!(
            show(&Value::Date(MAX_TIMESTAMP_MS)),
            "new Date (\"+275760-09-13T00:00:00.000Z\")"
        );
        assert_eq!(show(&Value::Date(f64::NAN)), "new Date (NaN)");
    }

    #[test]
    fn out_of_range_dates_are_invalid() {
        for ms in [f64::INFINITY, f64::NEG_INFINITY, 1e300, MAX_TIMESTAMP_MS + 1.0] {
            assert_eq!(show(&Value::Date(ms)), "new Date (NaN)");
            assert!(!is_valid_timestamp(ms));
        }
    }

    #[test]
    fn containers_sort_keys() {
        let value = Value::object([("y", Value::Null), ("x", Value::from(0))]);
        assert_eq!(show(&value), "{\"x\": 0, \"y\": null}");
        let xs = Value::array([Value::from(1), Value::from("a")]);
        assert_eq!(show(&xs), "[1, \"a\"]");
    }

    #[test]
    fn circular_references() {
        let z = Array::new(Vec::new());
        z.push(Value::Array(z.clone()));
        assert_eq!(show(&Value::Array(z)), "[<Circular>]");
    }

    #[test]
    fn shared_but_acyclic_references_print_twice() {
        let inner = Value::array([Value::from(1)]);
        let outer = Value::array([inner.clone(), inner]);
        assert_eq!(show(&outer), "[[1], [1]]");
    }

    #[test]
    fn show_hooks_and_functions() {
        let just = Object::with_show("my-package/Maybe", [("value", Value::from(1))], |o| {
            format!("Just ({})", show(&o.get("value").unwrap_or(Value::Undefined)))
        });
        assert_eq!(show(&Value::Object(just)), "Just (1)");
        let f = Value::function("inc", 1, |args| Ok(args[0].clone()));
        assert_eq!(show(&f), "[Function inc]");
        assert_eq!(show(&Value::Placeholder), "__");
    }
}
