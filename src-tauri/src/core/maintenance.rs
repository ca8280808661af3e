use crate::core::app_log;
use std::fs;
use std::path::Path;

pub const CACHE_DIR_NAME: &str = "Cache";

/// Deletes the files directly inside `dir`. Returns how many were removed.
pub fn clear_cache_dir(dir: &Path) -> usize {
    let Ok(entries) = fs::read_dir(dir) else {
        return 0;
    };

    let mut removed = 0;
    for entry in entries.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        match fs::remove_file(&path) {
            Ok(()) => removed += 1,
            Err(e) => app_log::warn(
                "maintenance",
                &format!("Failed to remove {}: {}", path.display(), e),
            ),
        }
    }
    removed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removes_files_and_keeps_subdirectories() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(dir.path().join("data_0"), b"x").expect("write");
        fs::write(dir.path().join("data_1"), b"y").expect("write");
        fs::create_dir(dir.path().join("index-dir")).expect("mkdir");

        assert_eq!(clear_cache_dir(dir.path()), 2);
        assert!(dir.path().join("index-dir").exists());
        assert!(!dir.path().join("data_0").exists());
    }

    #[test]
    fn missing_dir_is_not_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        assert_eq!(clear_cache_dir(&dir.path().join(CACHE_DIR_NAME)), 0);
    }
}
