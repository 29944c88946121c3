//! Markdown summary renderer for diff reports.

use crate::diff::model::{ChangeEntry, ChangeKind, DiffReport, Resolution};

/// Render a Markdown summary of a [`DiffReport`] for operator review.
///
/// Informational only; merges are driven by the structured report.
pub fn render_diff_summary(report: &DiffReport) -> String {
    let mut out = String::new();

    out.push_str("## Schema Diff\n\n");

    if report.is_empty() {
        out.push_str("_Local snapshot matches remote._\n");
        return out;
    }

    out.push_str(&format!(
        "**Modules changed**: {}  \n**Shared types changed**: {}\n\n",
        report.module_changes.len(),
        report.shared_type_changes.len()
    ));

    render_section(&mut out, "Modules", &report.module_changes);
    render_section(&mut out, "Shared Types", &report.shared_type_changes);

    out
}

fn render_section(out: &mut String, title: &str, changes: &[ChangeEntry]) {
    if changes.is_empty() {
        return;
    }
    out.push_str(&format!("### {}\n\n", title));
    for change in changes {
        out.push_str(&format!("- **{}** `{}`", kind_label(change.kind), change.name));
        if change.resolution == Resolution::RequiresEndpointResolution {
            out.push_str(" _(resolve per endpoint)_");
        }
        out.push('\n');
        for line in &change.details {
            out.push_str(&format!("  - {}\n", line));
        }
    }
    out.push('\n');
}

fn kind_label(kind: ChangeKind) -> &'static str {
    match kind {
        ChangeKind::Added => "Added",
        ChangeKind::Removed => "Removed",
        ChangeKind::Modified => "Modified",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::model::EntityKind;

    #[test]
    fn test_empty_report() {
        let summary = render_diff_summary(&DiffReport::default());
        assert!(summary.contains("_Local snapshot matches remote._"));
        assert!(!summary.contains("### Modules"));
    }

    #[test]
    fn test_marks_entries_needing_endpoint_resolution() {
        let report = DiffReport {
            module_changes: vec![ChangeEntry {
                entity: EntityKind::Module,
                name: "pet".to_string(),
                kind: ChangeKind::Modified,
                details: vec!["a".to_string(), "b".to_string()],
                resolution: Resolution::RequiresEndpointResolution,
                endpoint_changes: Vec::new(),
            }],
            shared_type_changes: Vec::new(),
        };
        let summary = render_diff_summary(&report);
        assert!(summary.contains("- **Modified** `pet` _(resolve per endpoint)_"));
        assert!(summary.contains("  - a\n  - b\n"));
        assert!(!summary.contains("### Shared Types"));
    }
}
