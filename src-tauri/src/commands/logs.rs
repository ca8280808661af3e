use crate::core::app_log::{self, AppLogRecord, LogLevel};
use serde_json::Value;

fn renderer_record(
    level: LogLevel,
    scope: &str,
    message: &str,
    data: Option<Value>,
) -> AppLogRecord {
    AppLogRecord {
        data,
        ..AppLogRecord::new(level, &format!("renderer/{}", scope), message)
    }
}

/// Renderer-side records go through the same log file as the shell's own.
#[tauri::command]
pub async fn append_log(
    level: LogLevel,
    scope: String,
    message: String,
    data: Option<Value>,
) -> Result<(), String> {
    app_log::append(renderer_record(level, &scope, &message, data))
}
