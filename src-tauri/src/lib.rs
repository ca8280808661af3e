mod app_menu;
mod commands;
mod core;
mod models;
mod tray_menu;

use anyhow::Context;
use crate::core::app_log::{self, LogLevel};
use crate::core::lifecycle::{self, AppLifecycleController, LifecycleEvent};
use crate::core::shell_state::ShellState;
use crate::core::single_instance::{
    FileInstanceLock, FocusOutcome, InstanceState, SecondAttempt, SingleInstanceCoordinator,
};
use crate::core::ui_emit::{CONFIG_WINDOW_LABEL, MAIN_WINDOW_LABEL};
use crate::core::window_state::WindowStateStore;
use crate::core::windows;
use serde_json::json;
use tauri::{App, AppHandle, Manager, RunEvent, Window, WindowEvent};

fn setup_shell(app: &mut App) -> anyhow::Result<()> {
    let options = crate::core::launch_args::from_env();
    let app_handle = app.handle().clone();
    let data_dir = app_handle
        .path()
        .app_data_dir()
        .context("Failed to resolve app data dir")?;

    let mut coordinator = SingleInstanceCoordinator::new(FileInstanceLock::in_dir(&data_dir));
    if coordinator.start() == InstanceState::Secondary {
        std::process::exit(0);
    }

    let log_dir = app_handle
        .path()
        .app_log_dir()
        .context("Failed to resolve app log dir")?;
    if let Err(e) = app_log::init(log_dir, options.verbose) {
        eprintln!("{}", e);
    }
    app_log::install_panic_hook();
    lifecycle::log_lifecycle_event(&LifecycleEvent::Ready);
    if !options.ignored.is_empty() {
        app_log::log_with_data(
            LogLevel::Warn,
            "launch",
            "ignored arguments",
            json!({ "args": options.ignored }),
        );
    }

    coordinator.on_focus_requested(|attempt, outcome| {
        lifecycle::log_lifecycle_event(&LifecycleEvent::SecondInstance {
            argv: attempt.argv.clone(),
        });
        if outcome == FocusOutcome::NoWindow {
            app_log::info("single_instance", "second launch while no main window exists");
        }
    });

    let controller = AppLifecycleController::new(WindowStateStore::in_dir(&data_dir));
    app.manage(ShellState::new(data_dir, coordinator, controller));

    windows::create_main_window(&app_handle).context("Failed to create main window")?;
    let menu = app_menu::build_menu(&app_handle).context("Failed to build app menu")?;
    app_handle
        .set_menu(menu)
        .context("Failed to set app menu")?;
    tray_menu::create_tray(&app_handle).context("Failed to create tray")?;

    Ok(())
}

/// The plugin may call this off the main thread (D-Bus on Linux). The work is
/// moved onto the main thread, where every other controller access happens.
#[cfg_attr(not(desktop), allow(dead_code))]
fn on_second_instance(app: &AppHandle, attempt: SecondAttempt) {
    let app_handle = app.clone();
    let scheduled = app.run_on_main_thread(move || {
        // Can arrive before setup has managed the state.
        let Some(state) = app_handle.try_state::<ShellState>() else {
            return;
        };
        let coordinator = state.coordinator.lock();
        let controller = state.controller.lock();
        coordinator.handle_second_attempt(&attempt, controller.main_window());
    });
    if let Err(e) = scheduled {
        app_log::warn(
            "single_instance",
            &format!("Failed to schedule focus on main thread: {}", e),
        );
    }
}

fn on_window_event(window: &Window, event: &WindowEvent) {
    let label = window.label();
    if let Some(lifecycle_event) = LifecycleEvent::from_window_event(label, event) {
        lifecycle::log_lifecycle_event(&lifecycle_event);
    }

    let app_handle = window.app_handle();
    let Some(state) = app_handle.try_state::<ShellState>() else {
        return;
    };
    match (label, event) {
        (MAIN_WINDOW_LABEL, WindowEvent::CloseRequested { .. }) => {
            state.controller.lock().on_main_window_close_requested();
        }
        (CONFIG_WINDOW_LABEL, WindowEvent::CloseRequested { api, .. }) => {
            api.prevent_close();
            let _ = window.hide();
        }
        (MAIN_WINDOW_LABEL, WindowEvent::Destroyed) => {
            state.controller.lock().on_main_window_destroyed();
            windows::destroy_config_window(app_handle);
        }
        _ => {}
    }
}

fn on_run_event(app_handle: &AppHandle, event: RunEvent) {
    match event {
        RunEvent::ExitRequested { code, api, .. } => match code {
            // Explicit exit (tray or menu): no close request reaches the main window.
            Some(code) => {
                if let Some(state) = app_handle.try_state::<ShellState>() {
                    state.controller.lock().on_main_window_close_requested();
                }
                lifecycle::log_lifecycle_event(&LifecycleEvent::Quit { code: Some(code) });
            }
            None => {
                lifecycle::log_lifecycle_event(&LifecycleEvent::WindowAllClosed);
                if lifecycle::keep_running_without_windows() {
                    api.prevent_exit();
                } else {
                    lifecycle::log_lifecycle_event(&LifecycleEvent::Quit { code: None });
                }
            }
        },
        #[cfg(target_os = "macos")]
        RunEvent::Reopen {
            has_visible_windows,
            ..
        } => {
            lifecycle::log_lifecycle_event(&LifecycleEvent::Activate {
                has_visible_windows,
            });
            if let Err(e) = windows::create_main_window(app_handle) {
                app_log::error("lifecycle", &format!("Failed to recreate main window: {}", e));
            }
        }
        _ => {}
    }
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    let builder = tauri::Builder::default();

    #[cfg(desktop)]
    let builder = builder.plugin(tauri_plugin_single_instance::init(|app, argv, cwd| {
        on_second_instance(app, SecondAttempt { argv, cwd });
    }));

    builder
        .plugin(tauri_plugin_opener::init())
        .plugin(tauri_plugin_dialog::init())
        .plugin(tauri_plugin_global_shortcut::Builder::new().build())
        .on_menu_event(|app, event| {
            let id = event.id().as_ref();
            if id.starts_with(tray_menu::TRAY_MENU_PREFIX) {
                tray_menu::handle_menu_event(app, id);
            } else {
                app_menu::handle_menu_event(app, id);
            }
        })
        .setup(|app| Ok(setup_shell(app)?))
        .invoke_handler(tauri::generate_handler![
            commands::tray::change_tray_icon_to_unread_messages,
            commands::tray::change_tray_icon_to_default,
            commands::tray::disable_tray,
            commands::tray::recreate_tray,
            commands::window::make_window_urgent,
            commands::window::reload_main_window,
            commands::window::show_configure_single_service_window_new,
            commands::window::show_configure_single_service_window,
            commands::window::close_configure_single_service_window,
            commands::folders::open_user_services_config_folder,
            commands::folders::open_user_settings_config_folder,
            commands::shortcuts::create_new_global_shortcut,
            commands::shortcuts::delete_all_global_services_shortcuts,
            commands::badge::update_badge_count,
            commands::settings::global_object_set,
            commands::settings::global_object_get,
            commands::logs::append_log,
        ])
        .on_window_event(on_window_event)
        .build(tauri::generate_context!())
        .expect("error while building tauri application")
        .run(on_run_event);
}
