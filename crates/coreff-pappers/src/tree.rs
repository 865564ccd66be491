//! Plain-text rendering of provider payloads.
//!
//! Every terminal value becomes one `label = value` line, indented with one
//! tab per nesting level. Object members are labelled with their key. Array
//! elements are labelled with the whole array they belong to, so a list of
//! scalars shows the list on every line.
//!
//! Strings are written without quotes; other scalars use their JSON form
//! (`true`, `null`, `404`).

use serde_json::Value;
use std::fmt::{self, Write};

/// Label attached to a rendered value.
enum Label<'a> {
    Key(&'a str),
    Sequence(&'a [Value]),
}

impl fmt::Display for Label<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(key) => f.write_str(key),
            Self::Sequence(items) => {
                let text = serde_json::to_string(items).map_err(|_| fmt::Error)?;
                f.write_str(&text)
            }
        }
    }
}

/// Render a payload starting at depth 0.
///
/// ```rust
/// let payload = serde_json::json!({"a": 5});
/// assert_eq!(coreff_pappers::tree::render(&payload), "\ta = 5\n");
/// ```
#[must_use]
pub fn render(value: &Value) -> String {
    render_at(value, 0)
}

/// Render a payload as if it were nested `depth` levels deep.
///
/// A bare scalar gets an empty label.
#[must_use]
pub fn render_at(value: &Value, depth: usize) -> String {
    let mut out = String::new();
    render_into(&mut out, value, depth, &Label::Key(""));
    out
}

fn render_into(out: &mut String, value: &Value, depth: usize, label: &Label<'_>) {
    match value {
        // Singletons follow the same rule: one level deeper, labelled by the array.
        Value::Array(items) => {
            for item in items {
                render_into(out, item, depth + 1, &Label::Sequence(items));
            }
        }
        Value::Object(map) => {
            for (key, child) in map {
                render_into(out, child, depth + 1, &Label::Key(key));
            }
        }
        scalar => {
            for _ in 0..depth {
                out.push('\t');
            }
            // Writing to a String cannot fail.
            let _ = writeln!(out, "{label} = {}", scalar_text(scalar));
        }
    }
}

/// Text of a scalar as it appears to users: strings without quotes,
/// everything else in its JSON form.
#[must_use]
pub fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_single_field() {
        assert_eq!(render(&json!({"a": 5})), "\ta = 5\n");
    }

    #[test]
    fn test_indentation_follows_depth() {
        assert_eq!(render_at(&json!({"a": 5}), 2), "\t\t\ta = 5\n");
        assert_eq!(render_at(&json!(7), 1), "\t = 7\n");
    }

    #[test]
    fn test_nested_objects_keep_key_order() {
        let payload = json!({
            "siren": "552100554",
            "siege": {"ville": "Paris", "code_postal": "75008"},
            "capital": 1500.5
        });
        assert_eq!(
            render(&payload),
            "\tsiren = 552100554\n\t\tville = Paris\n\t\tcode_postal = 75008\n\tcapital = 1500.5\n"
        );
    }

    #[test]
    fn test_array_elements_are_labelled_by_the_array() {
        let payload = json!({"codes": [1, 2]});
        assert_eq!(render(&payload), "\t\t[1,2] = 1\n\t\t[1,2] = 2\n");
    }

    #[test]
    fn test_singleton_array() {
        let payload = json!({"tags": ["sas"]});
        assert_eq!(render(&payload), "\t\t[\"sas\"] = sas\n");
    }

    #[test]
    fn test_array_of_objects_uses_member_keys() {
        let payload = json!({"representants": [{"nom": "A"}, {"nom": "B"}]});
        assert_eq!(render(&payload), "\t\t\tnom = A\n\t\t\tnom = B\n");
    }

    #[test]
    fn test_empty_containers_render_nothing() {
        assert_eq!(render(&json!({})), "");
        assert_eq!(render(&json!({"list": []})), "");
    }

    #[test]
    fn test_scalar_text() {
        assert_eq!(scalar_text(&json!("texte")), "texte");
        assert_eq!(scalar_text(&json!(404)), "404");
        assert_eq!(scalar_text(&json!(true)), "true");
        assert_eq!(scalar_text(&Value::Null), "null");
    }
}
