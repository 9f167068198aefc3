//! Human-readable change report

use super::reconcile::ChangeRecord;
use serde_json::Value;

/// Shown in place of a value that did not exist
pub const ABSENT: &str = "<empty>";

/// Render a settings value for display; strings appear without quotes
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

impl ChangeRecord {
    /// Render this change, prefixed with the settings file `label`
    pub fn render(&self, label: &str) -> String {
        let before = self
            .before
            .as_ref()
            .map(display_value)
            .unwrap_or_else(|| ABSENT.to_string());
        format!(
            "{}:{} changed\n  WAS: {}\n  NOW: {}\n",
            label,
            self.path,
            before,
            display_value(&self.after)
        )
    }
}

/// Render every change, in order
pub fn render_report(label: &str, changes: &[ChangeRecord]) -> String {
    changes.iter().map(|c| c.render(label)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_addition() {
        let change = ChangeRecord {
            path: "a".to_string(),
            before: None,
            after: json!(1),
        };
        assert_eq!(change.render("~/.arcrc"), "~/.arcrc:a changed\n  WAS: <empty>\n  NOW: 1\n");
    }

    #[test]
    fn test_render_strings_verbatim() {
        let change = ChangeRecord {
            path: "some/rest".to_string(),
            before: Some(json!("mutable")),
            after: json!("change"),
        };
        let text = change.render("rc");
        assert!(text.contains(":some/rest "));
        assert!(text.contains("  WAS: mutable\n  NOW: change\n"));
    }

    #[test]
    fn test_render_structures_as_json() {
        let change = ChangeRecord {
            path: "a/b/c".to_string(),
            before: Some(json!([1, 2, 3])),
            after: json!({"1": 2, "3": 4}),
        };
        assert!(change
            .render("rc")
            .contains("  WAS: [1,2,3]\n  NOW: {\"1\":2,\"3\":4}\n"));
    }

    #[test]
    fn test_render_report() {
        let changes = vec![
            ChangeRecord {
                path: "a".to_string(),
                before: None,
                after: json!(1),
            },
            ChangeRecord {
                path: "b".to_string(),
                before: None,
                after: json!(2),
            },
        ];
        let report = render_report("rc", &changes);
        assert_eq!(report.lines().count(), 6);
        assert!(report.starts_with("rc:a changed"));
        assert!(render_report("rc", &[]).is_empty());
    }
}
