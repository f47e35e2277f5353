//! CSV serialization of the visible ticket projection.
//!
//! Every field is double-quoted; embedded quotes are doubled and embedded
//! newlines replaced with spaces. No further escaping.

use std::fmt::Write;

use crate::ticket::Ticket;

/// Column set of an exported row, in feed order
pub const CSV_COLUMNS: [&str; 9] = [
    "id", "number", "status", "priority_id", "dept", "created", "subject", "message", "user",
];

/// Quote a single CSV field.
pub fn csv_field(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\"").replace('\n', " "))
}

fn row_values(t: &Ticket) -> [String; 9] {
    [
        t.id.map(|v| v.to_string()).unwrap_or_default(),
        t.number.clone().unwrap_or_default(),
        t.status.clone().unwrap_or_default(),
        t.priority_id.map(|v| v.to_string()).unwrap_or_default(),
        t.dept.clone().unwrap_or_default(),
        t.created.clone().unwrap_or_default(),
        t.subject.clone().unwrap_or_default(),
        t.message.clone().unwrap_or_default(),
        t.requester_display().to_string(),
    ]
}

/// Render the projection as CSV text.
///
/// `None` when there are no rows; exporting an empty table is a no-op,
/// not an error.
pub fn tickets_to_csv(rows: &[&Ticket]) -> Option<String> {
    if rows.is_empty() {
        return None;
    }
    let mut out = String::new();
    let _ = writeln!(out, "{}", CSV_COLUMNS.join(","));
    for row in rows {
        let line: Vec<String> = row_values(row).iter().map(|v| csv_field(v)).collect();
        let _ = writeln!(out, "{}", line.join(","));
    }
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_projection_is_noop() {
        assert!(tickets_to_csv(&[]).is_none());
    }

    #[test]
    fn test_quotes_doubled_and_newlines_flattened() {
        let t = Ticket {
            id: Some(1),
            subject: Some("a,\"b\"".to_string()),
            message: Some("line one\nline two".to_string()),
            ..Default::default()
        };
        let csv = tickets_to_csv(&[&t]).unwrap();
        let mut lines = csv.lines();
        assert_eq!(lines.next().unwrap(), CSV_COLUMNS.join(","));
        let row = lines.next().unwrap();
        assert!(row.contains("\"a,\"\"b\"\"\""));
        assert!(row.contains("\"line one line two\""));
        assert!(lines.next().is_none());
    }

    #[test]
    fn test_missing_fields_export_empty() {
        let t = Ticket::default();
        let csv = tickets_to_csv(&[&t]).unwrap();
        let row = csv.lines().nth(1).unwrap();
        // all columns quoted, requester falls back to the placeholder
        assert_eq!(row, "\"\",\"\",\"\",\"\",\"\",\"\",\"\",\"\",\"-\"");
    }
}
