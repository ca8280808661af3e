use crate::core::shell_state::ShellState;
use crate::models::SharedSettings;
use serde_json::Value;
use tauri::State;

#[tauri::command]
pub async fn global_object_set(
    state: State<'_, ShellState>,
    property: String,
    value: Value,
) -> Result<(), String> {
    state.shared_settings.write().set(&property, value)
}

#[tauri::command]
pub async fn global_object_get(state: State<'_, ShellState>) -> Result<SharedSettings, String> {
    Ok(state.shared_settings.read().clone())
}
