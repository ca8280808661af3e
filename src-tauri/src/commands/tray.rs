use crate::tray_menu::{self, TrayIconVariant};
use tauri::AppHandle;

#[tauri::command]
pub async fn change_tray_icon_to_unread_messages(app_handle: AppHandle) -> Result<(), String> {
    tray_menu::set_tray_icon(&app_handle, TrayIconVariant::Unread)
}

#[tauri::command]
pub async fn change_tray_icon_to_default(app_handle: AppHandle) -> Result<(), String> {
    tray_menu::set_tray_icon(&app_handle, TrayIconVariant::Default)
}

#[tauri::command]
pub async fn disable_tray(app_handle: AppHandle) -> Result<(), String> {
    tray_menu::disable_tray(&app_handle);
    Ok(())
}

#[tauri::command]
pub async fn recreate_tray(app_handle: AppHandle) -> Result<(), String> {
    tray_menu::create_tray(&app_handle).map_err(|e| format!("Failed to create tray: {}", e))
}
