use crate::core::ui_emit::{self, CONFIG_WINDOW_LABEL, MAIN_WINDOW_LABEL};
use crate::core::windows;
use tauri::{AppHandle, Manager, UserAttentionType, WebviewWindow};

const SERVICE_TO_CREATE_EVENT: &str = "serviceToCreate";
const SERVICE_TO_CONFIGURE_EVENT: &str = "serviceToConfigure";

fn window_by_label(app_handle: &AppHandle, label: &str) -> Result<WebviewWindow, String> {
    app_handle
        .get_webview_window(label)
        .ok_or_else(|| format!("Window {} not found", label))
}

#[tauri::command]
pub async fn reload_main_window(app_handle: AppHandle) -> Result<(), String> {
    let window = window_by_label(&app_handle, MAIN_WINDOW_LABEL)?;
    windows::reload(&window)
}

#[tauri::command]
pub async fn make_window_urgent(app_handle: AppHandle) -> Result<(), String> {
    window_by_label(&app_handle, MAIN_WINDOW_LABEL)?
        .request_user_attention(Some(UserAttentionType::Critical))
        .map_err(|e| format!("Failed to request user attention: {}", e))
}

fn show_config_window(app_handle: &AppHandle, event: &str, service_id: String) -> Result<(), String> {
    let window = window_by_label(app_handle, CONFIG_WINDOW_LABEL)?;
    window
        .show()
        .map_err(|e| format!("Failed to show config window: {}", e))?;
    let _ = window.set_focus();
    if !ui_emit::emit_to_window(app_handle, CONFIG_WINDOW_LABEL, event, service_id) {
        return Err(format!("Failed to emit {}", event));
    }
    Ok(())
}

#[tauri::command]
pub async fn show_configure_single_service_window_new(
    app_handle: AppHandle,
    service_id: String,
) -> Result<(), String> {
    show_config_window(&app_handle, SERVICE_TO_CREATE_EVENT, service_id)
}

#[tauri::command]
pub async fn show_configure_single_service_window(
    app_handle: AppHandle,
    service_id: String,
) -> Result<(), String> {
    show_config_window(&app_handle, SERVICE_TO_CONFIGURE_EVENT, service_id)
}

#[tauri::command]
pub async fn close_configure_single_service_window(app_handle: AppHandle) -> Result<(), String> {
    window_by_label(&app_handle, CONFIG_WINDOW_LABEL)?
        .hide()
        .map_err(|e| format!("Failed to hide config window: {}", e))
}
