//! Diff summaries for audit entries

use serde_json::Value;

/// Summarize top-level field changes between two JSON snapshots
///
/// Returns `None` when nothing changed.
pub fn generate_diff(before: &Value, after: &Value) -> Option<String> {
    let changes: Vec<String> = match (before, after) {
        (Value::Object(before_obj), Value::Object(after_obj)) => {
            let mut changes = Vec::new();
            for (key, old) in before_obj {
                match after_obj.get(key) {
                    Some(new) if new != old => changes.push(format!(
                        "{}: {} -> {}",
                        key,
                        format_value(old),
                        format_value(new)
                    )),
                    Some(_) => {}
                    None => changes.push(format!("{}: {} -> (removed)", key, format_value(old))),
                }
            }
            for (key, new) in after_obj {
                if !before_obj.contains_key(key) {
                    changes.push(format!("{}: (added) -> {}", key, format_value(new)));
                }
            }
            changes
        }
        _ if before != after => vec![format!(
            "{} -> {}",
            format_value(before),
            format_value(after)
        )],
        _ => Vec::new(),
    };

    if changes.is_empty() {
        None
    } else {
        Some(changes.join(", "))
    }
}

fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) if s.chars().count() > 50 => {
            let head: String = s.chars().take(47).collect();
            format!("\"{}...\"", head)
        }
        Value::String(s) => format!("\"{}\"", s),
        Value::Array(arr) => format!("[{} items]", arr.len()),
        Value::Object(obj) => format!("{{{} fields}}", obj.len()),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_no_changes() {
        let v = json!({"name": "Wallet"});
        assert_eq!(generate_diff(&v, &v), None);
    }

    #[test]
    fn test_changed_added_removed() {
        let before = json!({"name": "Wallet", "icon": "💳"});
        let after = json!({"name": "Purse", "deadline": "2030-01-01"});
        let diff = generate_diff(&before, &after).unwrap();
        assert!(diff.contains("name: \"Wallet\" -> \"Purse\""));
        assert!(diff.contains("icon: \"💳\" -> (removed)"));
        assert!(diff.contains("deadline: (added) -> \"2030-01-01\""));
    }

    #[test]
    fn test_history_is_summarized() {
        let before = json!({"history": [1]});
        let after = json!({"history": [1, 2]});
        assert_eq!(
            generate_diff(&before, &after).as_deref(),
            Some("history: [1 items] -> [2 items]")
        );
    }

    #[test]
    fn test_long_multibyte_string_truncates_on_char_boundary() {
        let long = "é".repeat(60);
        let diff = generate_diff(&json!({"t": ""}), &json!({"t": long})).unwrap();
        assert!(diff.ends_with("...\""));
    }

    #[test]
    fn test_scalar_values() {
        assert_eq!(generate_diff(&json!(1), &json!(2)).as_deref(), Some("1 -> 2"));
    }
}
