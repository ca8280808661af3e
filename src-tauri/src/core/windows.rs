use crate::core::connectivity;
use crate::core::lifecycle::{log_lifecycle_event, LifecycleEvent};
use crate::core::shell_state::ShellState;
use crate::core::ui_emit::{self, CONFIG_WINDOW_LABEL, MAIN_WINDOW_LABEL};
use crate::models::window_geometry::{MIN_HEIGHT, MIN_WIDTH};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tauri::webview::PageLoadEvent;
use tauri::{AppHandle, Manager, WebviewUrl, WebviewWindow, WebviewWindowBuilder};

pub const START_SEARCH_UPDATES_SILENT_EVENT: &str = "startSearchUpdatesSilent";

const CONFIG_WINDOW_WIDTH: f64 = 600.0;
const CONFIG_WINDOW_HEIGHT: f64 = 650.0;

/// Builds the main window hidden, sized from the stored geometry. It is shown
/// once its page has loaded for the first time, which also starts the
/// connectivity probe.
pub fn create_main_window(app: &AppHandle) -> tauri::Result<()> {
    let state = app.state::<ShellState>();
    let geometry = {
        let controller = state.controller.lock();
        if controller.has_main_window() {
            return Ok(());
        }
        controller.initial_geometry()
    };

    let first_load = Arc::new(AtomicBool::new(true));
    let window = WebviewWindowBuilder::new(
        app,
        MAIN_WINDOW_LABEL,
        WebviewUrl::App("index.html".into()),
    )
    .title("ttth")
    .decorations(false)
    .visible(false)
    .inner_size(geometry.width as f64, geometry.height as f64)
    .min_inner_size(MIN_WIDTH as f64, MIN_HEIGHT as f64)
    .center()
    .on_page_load(move |window, payload| {
        if !matches!(payload.event(), PageLoadEvent::Finished) {
            return;
        }
        log_lifecycle_event(&LifecycleEvent::PageLoaded {
            label: window.label().to_string(),
        });
        if !first_load.swap(false, Ordering::SeqCst) {
            return;
        }
        let _ = window.show();
        let _ = window.set_focus();
        connectivity::spawn_probe(window.app_handle().clone());
    })
    .build()?;

    log_lifecycle_event(&LifecycleEvent::WindowCreated {
        label: MAIN_WINDOW_LABEL.to_string(),
    });
    state
        .controller
        .lock()
        .attach_main_window(window.clone(), &geometry);

    create_config_window(app, &window)
}

/// Hidden child window for creating/configuring a single service. Close
/// requests hide it; it is destroyed together with the main window.
pub fn create_config_window(app: &AppHandle, main: &WebviewWindow) -> tauri::Result<()> {
    if app.get_webview_window(CONFIG_WINDOW_LABEL).is_some() {
        return Ok(());
    }

    let first_load = Arc::new(AtomicBool::new(true));
    WebviewWindowBuilder::new(
        app,
        CONFIG_WINDOW_LABEL,
        WebviewUrl::App("configWindow.html".into()),
    )
    .parent(main)?
    .title("ttth")
    .decorations(false)
    .visible(false)
    .resizable(false)
    .inner_size(CONFIG_WINDOW_WIDTH, CONFIG_WINDOW_HEIGHT)
    .min_inner_size(CONFIG_WINDOW_WIDTH, CONFIG_WINDOW_HEIGHT)
    .on_page_load(move |window, payload| {
        if matches!(payload.event(), PageLoadEvent::Finished)
            && first_load.swap(false, Ordering::SeqCst)
        {
            ui_emit::emit_to_main(window.app_handle(), START_SEARCH_UPDATES_SILENT_EVENT, ());
        }
    })
    .build()?;

    log_lifecycle_event(&LifecycleEvent::WindowCreated {
        label: CONFIG_WINDOW_LABEL.to_string(),
    });
    Ok(())
}

pub fn destroy_config_window(app: &AppHandle) {
    if let Some(window) = app.get_webview_window(CONFIG_WINDOW_LABEL) {
        let _ = window.destroy();
    }
}

pub fn reload(window: &WebviewWindow) -> Result<(), String> {
    window
        .eval("window.location.reload()")
        .map_err(|e| format!("Failed to reload window: {}", e))
}
