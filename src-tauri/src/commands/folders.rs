use crate::core::shell_state::ShellState;
use std::path::Path;
use tauri::{AppHandle, State};
use tauri_plugin_opener::OpenerExt;

fn open_folder(app_handle: &AppHandle, dir: &Path) -> Result<(), String> {
    std::fs::create_dir_all(dir).map_err(|e| format!("Failed to create {}: {}", dir.display(), e))?;
    app_handle
        .opener()
        .open_path(dir.to_string_lossy(), None::<&str>)
        .map_err(|e| format!("Failed to open {}: {}", dir.display(), e))
}

#[tauri::command]
pub async fn open_user_services_config_folder(
    app_handle: AppHandle,
    state: State<'_, ShellState>,
) -> Result<(), String> {
    open_folder(&app_handle, &state.services_dir())
}

#[tauri::command]
pub async fn open_user_settings_config_folder(
    app_handle: AppHandle,
    state: State<'_, ShellState>,
) -> Result<(), String> {
    open_folder(&app_handle, &state.user_settings_dir())
}
