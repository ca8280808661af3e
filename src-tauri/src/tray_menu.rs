use crate::core::app_log;
use crate::core::shell_state::ShellState;
use tauri::{
    image::Image,
    menu::{MenuBuilder, MenuItemBuilder},
    tray::TrayIconBuilder,
    AppHandle, Manager, Wry,
};

pub const TRAY_ID: &str = "main-tray";
pub const TRAY_MENU_PREFIX: &str = "tray.";

const TRAY_MENU_SHOW_ID: &str = "tray.show";
const TRAY_MENU_EXIT_ID: &str = "tray.exit";
const TRAY_TOOLTIP: &str = "ttth";

const DEFAULT_ICON: &[u8] = include_bytes!("../icons/tray_default.png");
const UNREAD_ICON: &[u8] = include_bytes!("../icons/tray_unread.png");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrayIconVariant {
    Default,
    Unread,
}

impl TrayIconVariant {
    fn bytes(self) -> &'static [u8] {
        match self {
            Self::Default => DEFAULT_ICON,
            Self::Unread => UNREAD_ICON,
        }
    }
}

fn build_tray_menu(app: &AppHandle<Wry>) -> tauri::Result<tauri::menu::Menu<Wry>> {
    let show = MenuItemBuilder::with_id(TRAY_MENU_SHOW_ID, "Show").build(app)?;
    let exit = MenuItemBuilder::with_id(TRAY_MENU_EXIT_ID, "Exit").build(app)?;

    MenuBuilder::new(app)
        .item(&show)
        .separator()
        .item(&exit)
        .build()
}

/// No-op when the tray already exists.
pub fn create_tray(app: &AppHandle<Wry>) -> tauri::Result<()> {
    if app.tray_by_id(TRAY_ID).is_some() {
        return Ok(());
    }

    let menu = build_tray_menu(app)?;
    let icon = Image::from_bytes(TrayIconVariant::Default.bytes())?;
    TrayIconBuilder::with_id(TRAY_ID)
        .icon(icon)
        .tooltip(TRAY_TOOLTIP)
        .menu(&menu)
        .build(app)?;

    app_log::info("tray", "created tray");
    Ok(())
}

/// Returns whether a tray was removed.
pub fn disable_tray(app: &AppHandle<Wry>) -> bool {
    let removed = app.remove_tray_by_id(TRAY_ID).is_some();
    if removed {
        app_log::info("tray", "disabled tray");
    }
    removed
}

/// Silently does nothing when the tray has been disabled.
pub fn set_tray_icon(app: &AppHandle<Wry>, variant: TrayIconVariant) -> Result<(), String> {
    let Some(tray) = app.tray_by_id(TRAY_ID) else {
        return Ok(());
    };
    let icon = Image::from_bytes(variant.bytes())
        .map_err(|e| format!("Failed to load tray icon: {}", e))?;
    tray.set_icon(Some(icon))
        .map_err(|e| format!("Failed to set tray icon: {}", e))
}

pub fn handle_menu_event(app: &AppHandle<Wry>, id: &str) {
    match id {
        TRAY_MENU_SHOW_ID => {
            let state = app.state::<ShellState>();
            state.controller.lock().reveal_main_window();
        }
        TRAY_MENU_EXIT_ID => app.exit(0),
        _ => {}
    }
}
