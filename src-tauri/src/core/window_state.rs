//! Durable round-trip of the main window's geometry.

use crate::core::app_log;
use crate::models::{PersistedWindowState, WindowGeometry};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const WINDOW_STATE_FILE_NAME: &str = "ttthMainWindowPosSize.json";

const LOG_SCOPE: &str = "window_state";

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("no usable window state at {path}: {reason}")]
    Unavailable { path: PathBuf, reason: String },
    #[error("failed to write window state to {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// The only reader and writer of the geometry file.
#[derive(Debug, Clone)]
pub struct WindowStateStore {
    path: PathBuf,
}

impl WindowStateStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn in_dir(data_dir: &Path) -> Self {
        Self::new(data_dir.join(WINDOW_STATE_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> WindowGeometry {
        load_geometry(&self.path)
    }

    pub fn save(&self, geometry: &WindowGeometry) -> Result<(), PersistenceError> {
        save_geometry(&self.path, geometry)
    }
}

/// Parses the geometry file. Missing `bounds`, missing size fields and
/// non-integer values are all `Unavailable`; an undersized size is replaced by
/// the default size while the position is kept.
pub fn read_geometry(path: &Path) -> Result<WindowGeometry, PersistenceError> {
    let unavailable = |reason: String| PersistenceError::Unavailable {
        path: path.to_path_buf(),
        reason,
    };

    let bytes = fs::read(path).map_err(|e| unavailable(e.to_string()))?;
    let state: PersistedWindowState =
        serde_json::from_slice(&bytes).map_err(|e| unavailable(e.to_string()))?;

    let geometry = state.bounds;
    if !geometry.has_valid_size() {
        app_log::warn(
            LOG_SCOPE,
            &format!(
                "stored size {}x{} is below the minimum, using default size",
                geometry.width, geometry.height
            ),
        );
    }
    Ok(geometry.with_size_or_default())
}

/// Never fails: every problem degrades to [`WindowGeometry::default`].
pub fn load_geometry(path: &Path) -> WindowGeometry {
    match read_geometry(path) {
        Ok(geometry) => {
            app_log::info(
                LOG_SCOPE,
                &format!(
                    "restored {}x{} at {:?}",
                    geometry.width,
                    geometry.height,
                    geometry.position()
                ),
            );
            geometry
        }
        Err(e) => {
            app_log::warn(LOG_SCOPE, &e.to_string());
            WindowGeometry::default()
        }
    }
}

fn write_atomically(path: &Path, state: &PersistedWindowState) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let tmp = path.with_extension("tmp");
    let mut file = fs::File::create(&tmp)?;
    serde_json::to_writer(&mut file, state).map_err(io::Error::other)?;
    file.sync_all()?;

    fs::rename(tmp, path)?;
    Ok(())
}

pub fn save_geometry(path: &Path, geometry: &WindowGeometry) -> Result<(), PersistenceError> {
    let state = PersistedWindowState { bounds: *geometry };
    write_atomically(path, &state).map_err(|source| PersistenceError::WriteFailed {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::window_geometry::{DEFAULT_HEIGHT, DEFAULT_WIDTH};

    fn store_in(dir: &tempfile::TempDir) -> WindowStateStore {
        WindowStateStore::in_dir(dir.path())
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = store_in(&dir);
        let geometry = WindowGeometry::new(-300, 45, 1024, 768);
        store.save(&geometry).expect("save");
        assert_eq!(store.load(), geometry);
    }

    #[test]
    fn save_overwrites_previous_state() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = store_in(&dir);
        store.save(&WindowGeometry::new(1, 2, 900, 700)).expect("first");
        store.save(&WindowGeometry::new(3, 4, 1000, 800)).expect("second");
        assert_eq!(store.load(), WindowGeometry::new(3, 4, 1000, 800));
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = store_in(&dir);
        assert!(matches!(
            read_geometry(store.path()),
            Err(PersistenceError::Unavailable { .. })
        ));
        let geometry = store.load();
        assert_eq!(geometry.width, DEFAULT_WIDTH);
        assert_eq!(geometry.height, DEFAULT_HEIGHT);
        assert_eq!(geometry.x, None);
        assert_eq!(geometry.y, None);
    }

    #[test]
    fn malformed_json_yields_defaults_without_partial_fields() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = store_in(&dir);
        fs::write(store.path(), r#"{"bounds":{"x":10,"y":20,"width":9"#).expect("write");
        assert_eq!(store.load(), WindowGeometry::default());
    }

    #[test]
    fn document_without_bounds_yields_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = store_in(&dir);
        fs::write(store.path(), r#"{"x":10,"y":20,"width":900,"height":700}"#).expect("write");
        assert_eq!(store.load(), WindowGeometry::default());
    }

    #[test]
    fn size_without_position_keeps_position_absent() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = store_in(&dir);
        fs::write(store.path(), r#"{"bounds":{"width":1000,"height":650}}"#).expect("write");
        let geometry = store.load();
        assert_eq!((geometry.width, geometry.height), (1000, 650));
        assert_eq!(geometry.x, None);
        assert_eq!(geometry.y, None);
        assert_eq!(geometry.position(), None);
    }

    #[test]
    fn non_integer_size_is_unavailable() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = store_in(&dir);
        fs::write(store.path(), r#"{"bounds":{"width":"wide","height":700}}"#).expect("write");
        assert!(read_geometry(store.path()).is_err());
        assert_eq!(store.load(), WindowGeometry::default());
    }

    #[test]
    fn undersized_bounds_fall_back_to_default_size() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = store_in(&dir);
        fs::write(
            store.path(),
            r#"{"bounds":{"x":5,"y":6,"width":300,"height":200}}"#,
        )
        .expect("write");
        assert_eq!(
            store.load(),
            WindowGeometry::new(5, 6, DEFAULT_WIDTH, DEFAULT_HEIGHT)
        );
    }

    #[test]
    fn restores_written_document_and_defaults_in_empty_dir() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = store_in(&dir);
        fs::write(
            store.path(),
            r#"{"bounds":{"x":10,"y":20,"width":900,"height":700}}"#,
        )
        .expect("write");
        assert_eq!(store.load(), WindowGeometry::new(10, 20, 900, 700));

        let empty = tempfile::tempdir().expect("tempdir");
        let geometry = store_in(&empty).load();
        assert_eq!(
            geometry,
            WindowGeometry {
                x: None,
                y: None,
                width: 800,
                height: 600,
            }
        );
    }

    #[test]
    fn save_creates_missing_parent_dir() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join(WINDOW_STATE_FILE_NAME);
        save_geometry(&path, &WindowGeometry::new(0, 0, 800, 600)).expect("save");
        assert!(path.exists());
    }

    #[test]
    fn save_into_unwritable_location_reports_write_failed() {
        let dir = tempfile::tempdir().expect("tempdir");
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, b"file, not a dir").expect("write");
        let path = blocker.join(WINDOW_STATE_FILE_NAME);
        let err = save_geometry(&path, &WindowGeometry::default()).unwrap_err();
        assert!(matches!(err, PersistenceError::WriteFailed { .. }));
    }
}
