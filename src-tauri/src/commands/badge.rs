use crate::core::badge::supports_badge_count;
use crate::core::shell_state::ShellState;
use crate::core::ui_emit::MAIN_WINDOW_LABEL;
use tauri::{AppHandle, Manager, State};

/// Returns whether the badge was pushed to the OS.
#[tauri::command]
pub async fn update_badge_count(
    app_handle: AppHandle,
    state: State<'_, ShellState>,
    count: i64,
) -> Result<bool, String> {
    if !supports_badge_count() {
        return Ok(false);
    }
    let mut counter = state.badge.lock();
    let Some(badge) = counter.pending(count) else {
        return Ok(false);
    };
    let window = app_handle
        .get_webview_window(MAIN_WINDOW_LABEL)
        .ok_or_else(|| "Main window not found".to_string())?;
    window
        .set_badge_count(badge)
        .map_err(|e| format!("Failed to set badge count: {}", e))?;
    counter.commit(count);
    Ok(true)
}
