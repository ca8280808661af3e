use crate::core::badge::BadgeCounter;
use crate::core::lifecycle::AppLifecycleController;
use crate::core::single_instance::{FileInstanceLock, SingleInstanceCoordinator};
use crate::models::SharedSettings;
use parking_lot::{Mutex, RwLock};
use std::path::{Path, PathBuf};
use tauri::WebviewWindow;

pub const SERVICES_DIR_NAME: &str = "storage";
pub const USER_SETTINGS_DIR_NAME: &str = "ttthUserSettings";

/// Tauri-managed state. Lock order when both are needed: `coordinator`, then
/// `controller`.
///
/// `controller` is only locked on the main thread: window callbacks, menu
/// events, run events and setup run there, and plugin callbacks from other
/// threads are forwarded with `run_on_main_thread`.
pub struct ShellState {
    data_dir: PathBuf,
    pub coordinator: Mutex<SingleInstanceCoordinator<FileInstanceLock>>,
    pub controller: Mutex<AppLifecycleController<WebviewWindow>>,
    pub shared_settings: RwLock<SharedSettings>,
    pub badge: Mutex<BadgeCounter>,
}

impl ShellState {
    pub fn new(
        data_dir: PathBuf,
        coordinator: SingleInstanceCoordinator<FileInstanceLock>,
        controller: AppLifecycleController<WebviewWindow>,
    ) -> Self {
        Self {
            data_dir,
            coordinator: Mutex::new(coordinator),
            controller: Mutex::new(controller),
            shared_settings: RwLock::new(SharedSettings::default()),
            badge: Mutex::new(BadgeCounter::default()),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn services_dir(&self) -> PathBuf {
        self.data_dir.join(SERVICES_DIR_NAME)
    }

    pub fn user_settings_dir(&self) -> PathBuf {
        self.data_dir.join(USER_SETTINGS_DIR_NAME)
    }
}
