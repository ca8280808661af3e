use serde::Serialize;
use tauri::{AppHandle, Emitter, Manager};

pub const MAIN_WINDOW_LABEL: &str = "main";
pub const CONFIG_WINDOW_LABEL: &str = "config";

pub fn emit_to_window<T: Serialize + Clone>(
    app_handle: &AppHandle,
    label: &str,
    event: &str,
    payload: T,
) -> bool {
    if app_handle.get_webview_window(label).is_none() {
        return false;
    }
    app_handle.emit_to(label, event, payload).is_ok()
}

pub fn emit_to_main<T: Serialize + Clone>(app_handle: &AppHandle, event: &str, payload: T) -> bool {
    emit_to_window(app_handle, MAIN_WINDOW_LABEL, event, payload)
}
