use crate::core::app_log;
use crate::core::ui_emit;
use tauri::AppHandle;
use tauri_plugin_global_shortcut::{GlobalShortcutExt, ShortcutState};

const SWITCH_TO_TAB_EVENT: &str = "switchToTab";
const LOG_SCOPE: &str = "shortcuts";

/// `shortcut` uses accelerator syntax, e.g. `CmdOrCtrl+1`.
#[tauri::command]
pub async fn create_new_global_shortcut(
    app_handle: AppHandle,
    shortcut: String,
    target_tab: String,
) -> Result<(), String> {
    app_handle
        .global_shortcut()
        .on_shortcut(shortcut.as_str(), move |app, _shortcut, event| {
            if event.state == ShortcutState::Pressed {
                ui_emit::emit_to_main(app, SWITCH_TO_TAB_EVENT, target_tab.clone());
            }
        })
        .map_err(|e| format!("Failed to register global shortcut {}: {}", shortcut, e))?;
    app_log::info(LOG_SCOPE, &format!("registered {}", shortcut));
    Ok(())
}

#[tauri::command]
pub async fn delete_all_global_services_shortcuts(app_handle: AppHandle) -> Result<(), String> {
    app_handle
        .global_shortcut()
        .unregister_all()
        .map_err(|e| format!("Failed to unregister global shortcuts: {}", e))
}
