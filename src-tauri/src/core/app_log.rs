use chrono::Utc;
use once_cell::sync::Lazy;
use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::{
    fs::{self, OpenOptions},
    io::{self, Write},
    path::{Path, PathBuf},
    sync::atomic::{AtomicBool, Ordering},
};

const LOG_FILE_NAME: &str = "app.log.jsonl";
const MAX_LOG_BYTES: u64 = 5 * 1024 * 1024;
const MAX_ROTATIONS: usize = 3;

static LOG_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));
static LOG_DIR: Lazy<RwLock<Option<PathBuf>>> = Lazy::new(|| RwLock::new(None));
static VERBOSE: AtomicBool = AtomicBool::new(false);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Info,
    Warn,
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppLogRecord {
    pub ts_ms: i64,
    pub level: LogLevel,
    pub scope: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl AppLogRecord {
    pub fn new(level: LogLevel, scope: &str, message: &str) -> Self {
        Self {
            ts_ms: Utc::now().timestamp_millis(),
            level,
            scope: scope.to_string(),
            message: message.to_string(),
            data: None,
        }
    }
}

/// Points the logger at `dir`. Records logged before this are dropped.
pub fn init(dir: PathBuf, verbose: bool) -> Result<(), String> {
    fs::create_dir_all(&dir).map_err(|e| format!("Failed to create log dir: {}", e))?;
    *LOG_DIR.write() = Some(dir);
    VERBOSE.store(verbose, Ordering::Relaxed);
    Ok(())
}

pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::Relaxed)
}

fn log_path(dir: &Path) -> PathBuf {
    dir.join(LOG_FILE_NAME)
}

fn rotated_path(dir: &Path, index: usize) -> PathBuf {
    dir.join(format!("app.log.{}.jsonl", index))
}

/// `app.log.jsonl` becomes `app.log.1.jsonl`, older files shift up by one and
/// the oldest is dropped.
fn rotate_if_needed(dir: &Path, max_bytes: u64) -> io::Result<()> {
    let live = log_path(dir);
    match fs::metadata(&live) {
        Ok(meta) if meta.len() >= max_bytes => {}
        _ => return Ok(()),
    }

    let _ = fs::remove_file(rotated_path(dir, MAX_ROTATIONS));
    for index in (1..MAX_ROTATIONS).rev() {
        let from = rotated_path(dir, index);
        if from.exists() {
            fs::rename(&from, rotated_path(dir, index + 1))?;
        }
    }
    fs::rename(&live, rotated_path(dir, 1))
}

fn append_to(dir: &Path, record: &AppLogRecord, max_bytes: u64) -> Result<(), String> {
    rotate_if_needed(dir, max_bytes).map_err(|e| format!("Failed to rotate log: {}", e))?;
    let path = log_path(dir);

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|e| format!("Failed to open log file: {}", e))?;

    let line = serde_json::to_string(record)
        .map_err(|e| format!("Failed to serialize log record: {}", e))?;
    file.write_all(line.as_bytes())
        .and_then(|_| file.write_all(b"\n"))
        .map_err(|e| format!("Failed to write log record: {}", e))?;
    Ok(())
}

pub fn append(record: AppLogRecord) -> Result<(), String> {
    let _guard = LOG_LOCK.lock();
    if is_verbose() {
        eprintln!("[{:?}] [{}] {}", record.level, record.scope, record.message);
    }
    let dir = LOG_DIR
        .read()
        .clone()
        .ok_or_else(|| "Logger not initialized".to_string())?;
    append_to(&dir, &record, MAX_LOG_BYTES)
}

/// Fire-and-forget: a failing log write never reaches the caller.
pub fn log(level: LogLevel, scope: &str, message: &str) {
    let _ = append(AppLogRecord::new(level, scope, message));
}

pub fn log_with_data(level: LogLevel, scope: &str, message: &str, data: Value) {
    let mut record = AppLogRecord::new(level, scope, message);
    record.data = Some(data);
    let _ = append(record);
}

pub fn info(scope: &str, message: &str) {
    log(LogLevel::Info, scope, message);
}

pub fn warn(scope: &str, message: &str) {
    log(LogLevel::Warn, scope, message);
}

pub fn error(scope: &str, message: &str) {
    log(LogLevel::Error, scope, message);
}

pub fn install_panic_hook() {
    let prev = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let payload = if let Some(s) = info.payload().downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "panic".to_string()
        };
        let location = info
            .location()
            .map(|l| format!("{}:{}", l.file(), l.line()))
            .unwrap_or_else(|| "unknown".to_string());

        error("panic", &format!("{} ({})", payload, location));

        prev(info);
    }));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_records(path: &Path) -> Vec<AppLogRecord> {
        fs::read_to_string(path)
            .expect("read log")
            .lines()
            .map(|line| serde_json::from_str(line).expect("record"))
            .collect()
    }

    #[test]
    fn append_writes_one_json_line_per_record() {
        let dir = tempfile::tempdir().expect("tempdir");
        let record = AppLogRecord::new(LogLevel::Warn, "window_state", "no prior state");
        append_to(dir.path(), &record, MAX_LOG_BYTES).expect("append");
        append_to(dir.path(), &record, MAX_LOG_BYTES).expect("append");

        let records = read_records(&log_path(dir.path()));
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].level, LogLevel::Warn);
        assert_eq!(records[0].scope, "window_state");
        assert!(records[0].data.is_none());
    }

    #[test]
    fn oversized_log_is_rotated_before_append() {
        let dir = tempfile::tempdir().expect("tempdir");
        let record = AppLogRecord::new(LogLevel::Info, "app", "startup");
        append_to(dir.path(), &record, 1).expect("first");
        append_to(dir.path(), &record, 1).expect("second");
        append_to(dir.path(), &record, 1).expect("third");

        assert_eq!(read_records(&log_path(dir.path())).len(), 1);
        assert!(rotated_path(dir.path(), 1).exists());
        assert!(rotated_path(dir.path(), 2).exists());
        assert!(!rotated_path(dir.path(), 3).exists());
    }

    #[test]
    fn level_serializes_lowercase() {
        let json = serde_json::to_string(&LogLevel::Error).expect("serialize");
        assert_eq!(json, "\"error\"");
    }
}
