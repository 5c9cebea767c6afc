//! JSONL file writer for invocation events.
//!
//! Each [`InvocationEvent`] is serialized as a single JSON line with a
//! `type` field and `timestamp`, appended to the file via a buffered writer.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use toolrelay_application::ports::invocation_logger::{InvocationEvent, InvocationLogger};
use tracing::warn;

/// JSONL invocation logger that writes one JSON object per line.
///
/// Thread-safe via `Mutex<BufWriter<File>>`. Appends to an existing file and
/// flushes after every record.
pub struct JsonlInvocationLogger {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlInvocationLogger {
    /// Create a logger appending to the given path.
    ///
    /// Creates the file (and parent directories) if they don't exist.
    /// Returns `None` if the file cannot be opened.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(
                "Could not create invocation log directory {}: {}",
                parent.display(),
                e
            );
            return None;
        }

        let file = match OpenOptions::new().create(true).append(true).open(path) {
            Ok(f) => f,
            Err(e) => {
                warn!(
                    "Could not open invocation log file {}: {}",
                    path.display(),
                    e
                );
                return None;
            }
        };

        Some(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
        })
    }

    /// Get the path to the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl InvocationLogger for JsonlInvocationLogger {
    fn log(&self, event: InvocationEvent) {
        let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);

        let record = if let serde_json::Value::Object(mut map) = event.payload {
            map.insert(
                "type".to_string(),
                serde_json::Value::String(event.event_type.to_string()),
            );
            map.insert(
                "timestamp".to_string(),
                serde_json::Value::String(timestamp),
            );
            serde_json::Value::Object(map)
        } else {
            serde_json::json!({
                "type": event.event_type,
                "timestamp": timestamp,
                "data": event.payload,
            })
        };

        let Ok(line) = serde_json::to_string(&record) else {
            return;
        };

        // A panic mid-write leaves at worst one torn line; keep logging after it
        let mut writer = self
            .writer
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let _ = writeln!(writer, "{}", line);
        let _ = writer.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_lines(path: &Path) -> Vec<serde_json::Value> {
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn test_jsonl_logger_writes_valid_jsonl() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("invocations.jsonl");
        let logger = JsonlInvocationLogger::new(&path).unwrap();

        logger.log(InvocationEvent::new(
            "tool_completed",
            serde_json::json!({"tool": "check_inventory", "duration_ms": 301}),
        ));
        logger.log(InvocationEvent::new(
            "tool_failed",
            serde_json::json!({"tool": "teleport", "code": "UNKNOWN_TOOL"}),
        ));

        let records = read_lines(&path);
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.get("timestamp").is_some()));
        assert_eq!(records[0]["type"], "tool_completed");
        assert_eq!(records[0]["tool"], "check_inventory");
        assert_eq!(records[1]["code"], "UNKNOWN_TOOL");
    }

    #[test]
    fn test_jsonl_logger_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("invocations.jsonl");

        for _ in 0..2 {
            let logger = JsonlInvocationLogger::new(&path).unwrap();
            logger.log(InvocationEvent::new("filler_sent", serde_json::json!({"tool": "x"})));
        }

        assert_eq!(read_lines(&path).len(), 2);
    }

    #[test]
    fn test_jsonl_logger_survives_poisoned_lock() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("poisoned.jsonl");
        let logger = std::sync::Arc::new(JsonlInvocationLogger::new(&path).unwrap());

        let holder = std::sync::Arc::clone(&logger);
        let _ = std::thread::spawn(move || {
            let _writer = holder.writer.lock().unwrap();
            panic!("writer panicked while holding the lock");
        })
        .join();
        assert!(logger.writer.is_poisoned());

        logger.log(InvocationEvent::new("tool_completed", serde_json::json!({"tool": "x"})));
        logger.log(InvocationEvent::new("tool_completed", serde_json::json!({"tool": "y"})));

        let records = read_lines(&path);
        assert_eq!(records.len(), 2);
        assert_eq!(records[1]["tool"], "y");
    }

    #[test]
    fn test_jsonl_logger_handles_non_object_payload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plain.jsonl");
        let logger = JsonlInvocationLogger::new(&path).unwrap();

        logger.log(InvocationEvent::new("note", serde_json::json!("just a string")));

        let records = read_lines(&path);
        assert_eq!(records[0]["type"], "note");
        assert_eq!(records[0]["data"], "just a string");
    }
}
