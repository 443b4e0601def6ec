//! CSV export of conversations.
//!
//! One row per conversation. The header is the set of top-level field names
//! of the first conversation's JSON form; every cell is the JSON encoding of
//! the field value, so nested lists and quotes survive a round trip through
//! any JSON parser. Empty, null, `false` and `0` values export as `""`.

use serde::Serialize;
use serde_json::{Map, Value};
use sophi_core::conversation::Conversation;
use sophi_core::error::{Result, SophiError};
use std::path::Path;

/// Renders `rows` as CSV text; returns `None` when there is nothing to export.
pub fn export_csv<T: Serialize>(rows: &[T]) -> Result<Option<String>> {
    let objects = rows
        .iter()
        .map(|row| match serde_json::to_value(row)? {
            Value::Object(map) => Ok(map),
            other => Err(SophiError::invalid_input(format!(
                "CSV rows must serialize to objects, got {other}"
            ))),
        })
        .collect::<Result<Vec<Map<String, Value>>>>()?;

    let Some(first) = objects.first() else {
        return Ok(None);
    };
    let headers: Vec<&String> = first.keys().collect();

    let mut lines = Vec::with_capacity(objects.len() + 1);
    lines.push(
        headers
            .iter()
            .map(|h| h.as_str())
            .collect::<Vec<_>>()
            .join(","),
    );
    for object in &objects {
        let cells = headers
            .iter()
            .map(|header| encode_cell(object.get(header.as_str())))
            .collect::<Result<Vec<_>>>()?;
        lines.push(cells.join(","));
    }

    Ok(Some(lines.join("\n")))
}

pub fn export_conversations_csv(conversations: &[Conversation]) -> Result<Option<String>> {
    export_csv(conversations)
}

/// Writes the conversation CSV to `path`; returns false when there was nothing to write.
pub fn write_conversations_csv(path: &Path, conversations: &[Conversation]) -> Result<bool> {
    let Some(csv) = export_conversations_csv(conversations)? else {
        return Ok(false);
    };
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, csv)?;
    tracing::info!(
        "[Export] Wrote {} conversations to {:?}",
        conversations.len(),
        path
    );
    Ok(true)
}

fn encode_cell(value: Option<&Value>) -> Result<String> {
    let value = match value {
        None | Some(Value::Null) | Some(Value::Bool(false)) => return Ok("\"\"".to_string()),
        Some(Value::String(s)) if s.is_empty() => return Ok("\"\"".to_string()),
        Some(Value::Number(n)) if n.as_f64() == Some(0.0) => return Ok("\"\"".to_string()),
        Some(value) => value,
    };
    Ok(serde_json::to_string(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sophi_core::conversation::Message;

    fn conversation(title: &str) -> Conversation {
        let mut conv = Conversation::new(title, &["Stoic".to_string()], 1000);
        conv.title = title.to_string();
        conv.push_message(Message::user("He said \"hi\", then left", 1001), 1001);
        conv
    }

    #[test]
    fn test_empty_export_is_none() {
        assert!(export_conversations_csv(&[]).unwrap().is_none());
    }

    #[test]
    fn test_header_comes_from_first_conversation() {
        let csv = export_conversations_csv(&[conversation("A")]).unwrap().unwrap();
        let header = csv.lines().next().unwrap();
        let columns: Vec<&str> = header.split(',').collect();

        for expected in ["id", "title", "messages", "tags", "persona", "createdAt", "updatedAt"] {
            assert!(columns.contains(&expected), "missing column {expected}");
        }
        assert!(!columns.contains(&"pinnedNoteId"));
    }

    #[test]
    fn test_one_row_per_conversation_with_json_cells() {
        let conversations = vec![conversation("A"), conversation("B")];
        let csv = export_conversations_csv(&conversations).unwrap().unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);

        assert!(lines[1].contains(",\"A\","));
        assert!(lines[2].contains(",\"B\","));
        assert!(csv.contains("\\\"hi\\\""));
    }

    #[test]
    fn test_falsy_values_encode_as_empty_string() {
        assert_eq!(encode_cell(None).unwrap(), "\"\"");
        assert_eq!(encode_cell(Some(&Value::Bool(false))).unwrap(), "\"\"");
        assert_eq!(encode_cell(Some(&serde_json::json!(0))).unwrap(), "\"\"");
        assert_eq!(encode_cell(Some(&serde_json::json!([]))).unwrap(), "[]");
        assert_eq!(encode_cell(Some(&serde_json::json!(7))).unwrap(), "7");
    }

    #[test]
    fn test_write_creates_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("out").join("log.csv");
        assert!(write_conversations_csv(&path, &[conversation("A")]).unwrap());
        assert!(std::fs::read_to_string(&path).unwrap().contains("title"));

        let empty = dir.path().join("empty.csv");
        assert!(!write_conversations_csv(&empty, &[]).unwrap());
        assert!(!empty.exists());
    }
}
