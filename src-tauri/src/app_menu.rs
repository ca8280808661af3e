use crate::core::app_log;
use crate::core::maintenance::{self, CACHE_DIR_NAME};
use crate::core::shell_state::ShellState;
use crate::core::ui_emit::{self, MAIN_WINDOW_LABEL};
use crate::core::windows;
use serde_json::json;
use tauri::{
    menu::{Menu, MenuBuilder, MenuItemBuilder, PredefinedMenuItem, SubmenuBuilder},
    AppHandle, Manager, WebviewWindow, Wry,
};
use tauri_plugin_dialog::DialogExt;
use tauri_plugin_opener::OpenerExt;

const LOG_SCOPE: &str = "menu";

const URL_HOMEPAGE: &str = "https://github.com/yafp/ttth";
const URL_ISSUES: &str = "https://github.com/yafp/ttth/issues";
const URL_RELEASES: &str = "https://github.com/yafp/ttth/releases";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Settings,
    Exit,
    NextService,
    PreviousService,
    Reload,
    ReloadCurrentService,
    ToggleFullscreen,
    Hide,
    Minimize,
    ToggleMaximize,
    About,
    Homepage,
    ReportIssue,
    Releases,
    SearchUpdates,
    ConsoleForCurrentService,
    Console,
    ClearCache,
}

impl MenuAction {
    const ALL: [MenuAction; 18] = [
        Self::Settings,
        Self::Exit,
        Self::NextService,
        Self::PreviousService,
        Self::Reload,
        Self::ReloadCurrentService,
        Self::ToggleFullscreen,
        Self::Hide,
        Self::Minimize,
        Self::ToggleMaximize,
        Self::About,
        Self::Homepage,
        Self::ReportIssue,
        Self::Releases,
        Self::SearchUpdates,
        Self::ConsoleForCurrentService,
        Self::Console,
        Self::ClearCache,
    ];

    fn id(self) -> &'static str {
        match self {
            Self::Settings => "menu.settings",
            Self::Exit => "menu.exit",
            Self::NextService => "menu.next-service",
            Self::PreviousService => "menu.previous-service",
            Self::Reload => "menu.reload",
            Self::ReloadCurrentService => "menu.reload-current-service",
            Self::ToggleFullscreen => "menu.toggle-fullscreen",
            Self::Hide => "menu.hide",
            Self::Minimize => "menu.minimize",
            Self::ToggleMaximize => "menu.toggle-maximize",
            Self::About => "menu.about",
            Self::Homepage => "menu.homepage",
            Self::ReportIssue => "menu.report-issue",
            Self::Releases => "menu.releases",
            Self::SearchUpdates => "menu.search-updates",
            Self::ConsoleForCurrentService => "menu.console-current-service",
            Self::Console => "menu.console",
            Self::ClearCache => "menu.clear-cache",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Settings => "Settings",
            Self::Exit => "Exit",
            Self::NextService => "Next Service",
            Self::PreviousService => "Previous Service",
            Self::Reload => "Reload",
            Self::ReloadCurrentService => "Reload current service",
            Self::ToggleFullscreen => "Toggle Fullscreen",
            Self::Hide => "Hide",
            Self::Minimize => "Minimize",
            Self::ToggleMaximize => "Maximize",
            Self::About => "About",
            Self::Homepage => "Homepage",
            Self::ReportIssue => "Report issue",
            Self::Releases => "Releases",
            Self::SearchUpdates => "Search updates",
            Self::ConsoleForCurrentService => "Console for current service",
            Self::Console => "Console",
            Self::ClearCache => "Clear cache",
        }
    }

    fn accelerator(self) -> Option<&'static str> {
        let accelerator = match self {
            Self::Settings => "CmdOrCtrl+,",
            Self::Exit => "CmdOrCtrl+Q",
            Self::NextService => "CmdOrCtrl+Right",
            Self::PreviousService => "CmdOrCtrl+Left",
            Self::Reload => "CmdOrCtrl+R",
            Self::ReloadCurrentService => "CmdOrCtrl+S",
            Self::ToggleFullscreen => "F11",
            Self::Hide => "CmdOrCtrl+H",
            Self::Minimize => "CmdOrCtrl+M",
            Self::ToggleMaximize => "CmdOrCtrl+K",
            Self::Homepage => "F1",
            Self::ReportIssue => "F2",
            Self::Releases => "F5",
            Self::SearchUpdates => "F9",
            Self::ConsoleForCurrentService => "F10",
            Self::Console => "F12",
            Self::About | Self::ClearCache => return None,
        };
        Some(accelerator)
    }

    /// Event sent to the main window's renderer, for actions the renderer owns.
    fn renderer_event(self) -> Option<&'static str> {
        match self {
            Self::Settings => Some("showSettings"),
            Self::NextService => Some("nextTab"),
            Self::PreviousService => Some("previousTab"),
            Self::ReloadCurrentService => Some("reloadCurrentService"),
            Self::SearchUpdates => Some("startSearchUpdates"),
            Self::ConsoleForCurrentService => Some("openDevToolForCurrentService"),
            _ => None,
        }
    }

    fn from_menu_id(menu_id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|action| action.id() == menu_id)
    }
}

fn item(app: &AppHandle, action: MenuAction) -> tauri::Result<tauri::menu::MenuItem<Wry>> {
    let builder = MenuItemBuilder::with_id(action.id(), action.label());
    match action.accelerator() {
        Some(accelerator) => builder.accelerator(accelerator).build(app),
        None => builder.build(app),
    }
}

pub fn build_menu(app: &AppHandle) -> tauri::Result<Menu<Wry>> {
    let separator = PredefinedMenuItem::separator(app)?;

    let file_menu = SubmenuBuilder::new(app, "File")
        .item(&item(app, MenuAction::Settings)?)
        .item(&separator)
        .item(&item(app, MenuAction::Exit)?)
        .build()?;

    let edit_menu = SubmenuBuilder::new(app, "Edit")
        .item(&PredefinedMenuItem::undo(app, None)?)
        .item(&PredefinedMenuItem::redo(app, None)?)
        .item(&separator)
        .item(&PredefinedMenuItem::cut(app, None)?)
        .item(&PredefinedMenuItem::copy(app, None)?)
        .item(&PredefinedMenuItem::paste(app, None)?)
        .item(&PredefinedMenuItem::select_all(app, None)?)
        .build()?;

    let view_menu = SubmenuBuilder::new(app, "View")
        .item(&item(app, MenuAction::NextService)?)
        .item(&item(app, MenuAction::PreviousService)?)
        .item(&separator)
        .item(&item(app, MenuAction::Reload)?)
        .item(&item(app, MenuAction::ReloadCurrentService)?)
        .build()?;

    let window_menu = SubmenuBuilder::new(app, "Window")
        .item(&item(app, MenuAction::ToggleFullscreen)?)
        .item(&item(app, MenuAction::Hide)?)
        .item(&item(app, MenuAction::Minimize)?)
        .item(&item(app, MenuAction::ToggleMaximize)?)
        .build()?;

    let console_menu = SubmenuBuilder::new(app, "Console")
        .item(&item(app, MenuAction::ConsoleForCurrentService)?)
        .item(&item(app, MenuAction::Console)?)
        .build()?;
    let maintenance_menu = SubmenuBuilder::new(app, "Maintenance")
        .item(&item(app, MenuAction::ClearCache)?)
        .build()?;

    let help_menu = SubmenuBuilder::new(app, "Help")
        .item(&item(app, MenuAction::About)?)
        .item(&item(app, MenuAction::Homepage)?)
        .item(&item(app, MenuAction::ReportIssue)?)
        .item(&item(app, MenuAction::Releases)?)
        .item(&separator)
        .item(&item(app, MenuAction::SearchUpdates)?)
        .item(&separator)
        .item(&console_menu)
        .item(&separator)
        .item(&maintenance_menu)
        .build()?;

    MenuBuilder::new(app)
        .items(&[&file_menu, &edit_menu, &view_menu, &window_menu, &help_menu])
        .build()
}

pub fn handle_menu_event(app: &AppHandle, id: &str) {
    let Some(action) = MenuAction::from_menu_id(id) else {
        return;
    };

    if let Some(event) = action.renderer_event() {
        ui_emit::emit_to_main(app, event, ());
        return;
    }

    match action {
        MenuAction::Exit => app.exit(0),
        MenuAction::About => show_about(app),
        MenuAction::Homepage => open_url(app, URL_HOMEPAGE),
        MenuAction::ReportIssue => open_url(app, URL_ISSUES),
        MenuAction::Releases => open_url(app, URL_RELEASES),
        MenuAction::ClearCache => clear_cache(app),
        _ => with_main_window(app, |window| apply_window_action(window, action)),
    }
}

fn with_main_window(app: &AppHandle, f: impl FnOnce(&WebviewWindow)) {
    if let Some(window) = app.get_webview_window(MAIN_WINDOW_LABEL) {
        f(&window);
    }
}

fn apply_window_action(window: &WebviewWindow, action: MenuAction) {
    match action {
        MenuAction::Reload => {
            if let Err(e) = windows::reload(window) {
                app_log::warn(LOG_SCOPE, &e);
            }
        }
        MenuAction::ToggleFullscreen => {
            if let Ok(fullscreen) = window.is_fullscreen() {
                let _ = window.set_fullscreen(!fullscreen);
            }
        }
        MenuAction::Hide => {
            let _ = window.hide();
        }
        MenuAction::Minimize => {
            let _ = window.minimize();
        }
        MenuAction::ToggleMaximize => match window.is_maximized() {
            Ok(true) => {
                let _ = window.unmaximize();
            }
            Ok(false) => {
                let _ = window.maximize();
            }
            Err(_) => {}
        },
        MenuAction::Console => {
            if window.is_devtools_open() {
                window.close_devtools();
            } else {
                window.open_devtools();
            }
        }
        _ => {}
    }
}

fn show_about(app: &AppHandle) {
    let info = app.package_info();
    app.dialog()
        .message(format!("{} {}", info.name, info.version))
        .title("About")
        .show(|_| {});
}

fn open_url(app: &AppHandle, url: &str) {
    if let Err(e) = app.opener().open_url(url, None::<&str>) {
        app_log::warn(LOG_SCOPE, &format!("Failed to open {}: {}", url, e));
    }
}

fn clear_cache(app: &AppHandle) {
    let cache_dir = app.state::<ShellState>().data_dir().join(CACHE_DIR_NAME);
    let removed = maintenance::clear_cache_dir(&cache_dir);
    app_log::log_with_data(
        app_log::LogLevel::Info,
        LOG_SCOPE,
        "cleared cache",
        json!({ "removed": removed }),
    );
    with_main_window(app, |window| apply_window_action(window, MenuAction::Reload));
}
