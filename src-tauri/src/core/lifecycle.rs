//! Owns the main window handle and turns app/window signals into actions.

use crate::core::app_log::{self, LogLevel};
use crate::core::single_instance::{self, FocusOutcome};
use crate::core::window_manager::ManagedWindow;
use crate::core::window_state::WindowStateStore;
use crate::models::WindowGeometry;
use serde_json::json;

const LOG_SCOPE: &str = "lifecycle";

/// Every app and window transition the shell observes, logged through
/// [`log_lifecycle_event`].
#[derive(Debug, Clone, PartialEq)]
pub enum LifecycleEvent {
    Ready,
    /// macOS dock click or relaunch while running.
    Activate { has_visible_windows: bool },
    SecondInstance { argv: Vec<String> },
    WindowAllClosed,
    Quit { code: Option<i32> },
    WindowCreated { label: String },
    PageLoaded { label: String },
    Focused { label: String },
    Blurred { label: String },
    Moved { label: String },
    Resized { label: String },
    ScaleFactorChanged { label: String, scale_factor: f64 },
    ThemeChanged { label: String, theme: String },
    CloseRequested { label: String },
    Closed { label: String },
}

impl LifecycleEvent {
    pub fn from_window_event(label: &str, event: &tauri::WindowEvent) -> Option<Self> {
        use tauri::WindowEvent;

        let label = label.to_string();
        let event = match event {
            WindowEvent::Focused(true) => Self::Focused { label },
            WindowEvent::Focused(false) => Self::Blurred { label },
            WindowEvent::Moved(_) => Self::Moved { label },
            WindowEvent::Resized(_) => Self::Resized { label },
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => Self::ScaleFactorChanged {
                label,
                scale_factor: *scale_factor,
            },
            WindowEvent::ThemeChanged(theme) => Self::ThemeChanged {
                label,
                theme: format!("{:?}", theme),
            },
            WindowEvent::CloseRequested { .. } => Self::CloseRequested { label },
            WindowEvent::Destroyed => Self::Closed { label },
            _ => return None,
        };
        Some(event)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Ready => "ready",
            Self::Activate { .. } => "activate",
            Self::SecondInstance { .. } => "second-instance",
            Self::WindowAllClosed => "window-all-closed",
            Self::Quit { .. } => "quit",
            Self::WindowCreated { .. } => "window-created",
            Self::PageLoaded { .. } => "page-loaded",
            Self::Focused { .. } => "focus",
            Self::Blurred { .. } => "blur",
            Self::Moved { .. } => "move",
            Self::Resized { .. } => "resize",
            Self::ScaleFactorChanged { .. } => "scale-factor-changed",
            Self::ThemeChanged { .. } => "theme-changed",
            Self::CloseRequested { .. } => "close",
            Self::Closed { .. } => "closed",
        }
    }

    /// `None` for events too frequent to be worth a log line.
    pub fn level(&self) -> Option<LogLevel> {
        match self {
            Self::Focused { .. } | Self::Blurred { .. } | Self::Moved { .. } | Self::Resized { .. } => {
                None
            }
            _ => Some(LogLevel::Info),
        }
    }

    fn data(&self) -> serde_json::Value {
        match self {
            Self::Activate {
                has_visible_windows,
            } => json!({ "has_visible_windows": has_visible_windows }),
            Self::SecondInstance { argv } => json!({ "argv": argv }),
            Self::Quit { code } => json!({ "code": code }),
            Self::ScaleFactorChanged {
                label,
                scale_factor,
            } => json!({ "label": label, "scale_factor": scale_factor }),
            Self::ThemeChanged { label, theme } => json!({ "label": label, "theme": theme }),
            Self::WindowCreated { label }
            | Self::PageLoaded { label }
            | Self::Focused { label }
            | Self::Blurred { label }
            | Self::Moved { label }
            | Self::Resized { label }
            | Self::CloseRequested { label }
            | Self::Closed { label } => json!({ "label": label }),
            Self::Ready | Self::WindowAllClosed => serde_json::Value::Null,
        }
    }
}

pub fn log_lifecycle_event(event: &LifecycleEvent) {
    let Some(level) = event.level() else {
        return;
    };
    let message = format!("event: {}", event.name());
    match event.data() {
        serde_json::Value::Null => app_log::log(level, LOG_SCOPE, &message),
        data => app_log::log_with_data(level, LOG_SCOPE, &message, data),
    }
}

/// macOS apps stay alive with no windows until the user quits explicitly.
pub fn keep_running_without_windows() -> bool {
    cfg!(target_os = "macos")
}

pub struct AppLifecycleController<W> {
    main_window: Option<W>,
    store: WindowStateStore,
}

impl<W: ManagedWindow> AppLifecycleController<W> {
    pub fn new(store: WindowStateStore) -> Self {
        Self {
            main_window: None,
            store,
        }
    }

    pub fn main_window(&self) -> Option<&W> {
        self.main_window.as_ref()
    }

    pub fn has_main_window(&self) -> bool {
        self.main_window.is_some()
    }

    /// Geometry to build the main window with. Always succeeds.
    pub fn initial_geometry(&self) -> WindowGeometry {
        self.store.load()
    }

    /// Takes ownership of a freshly built window. The position is applied only
    /// when both coordinates were restored; otherwise the window stays centered.
    pub fn attach_main_window(&mut self, window: W, geometry: &WindowGeometry) {
        if let Some((x, y)) = geometry.position() {
            if let Err(e) = window.set_position(x, y) {
                app_log::warn(LOG_SCOPE, &e);
            }
        }
        self.main_window = Some(window);
    }

    /// Persists the current bounds. Never blocks the close. A minimized window
    /// reports OS placeholder bounds (off-screen, zero size on Windows), so the
    /// previously stored geometry is kept instead.
    pub fn on_main_window_close_requested(&self) {
        let Some(window) = self.main_window.as_ref() else {
            return;
        };
        if window.is_minimized() {
            app_log::info(LOG_SCOPE, "main window minimized on close, keeping stored bounds");
            return;
        }
        let geometry = match window.bounds() {
            Ok(geometry) => geometry,
            Err(e) => {
                app_log::error(LOG_SCOPE, &format!("cannot read bounds on close: {}", e));
                return;
            }
        };
        if let Err(e) = self.store.save(&geometry) {
            app_log::error(LOG_SCOPE, &e.to_string());
        }
    }

    pub fn on_main_window_destroyed(&mut self) -> Option<W> {
        self.main_window.take()
    }

    /// Second launch: restore if minimized, then focus.
    pub fn focus_main_window(&self) -> FocusOutcome {
        single_instance::focus_existing_window(self.main_window.as_ref())
    }

    /// Tray "Show": restore a minimized window, show a hidden one, then focus.
    pub fn reveal_main_window(&self) -> FocusOutcome {
        let Some(window) = self.main_window.as_ref() else {
            return FocusOutcome::NoWindow;
        };
        let restored = window.is_minimized();
        let shown = if restored {
            window.restore()
        } else {
            window.show()
        };
        if let Err(e) = shown {
            app_log::warn(LOG_SCOPE, &e);
        }
        if let Err(e) = window.focus() {
            app_log::warn(LOG_SCOPE, &e);
        }
        FocusOutcome::Focused { restored }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::window_manager::testing::FakeWindow;
    use std::fs;

    fn controller(dir: &tempfile::TempDir) -> AppLifecycleController<FakeWindow> {
        AppLifecycleController::new(WindowStateStore::in_dir(dir.path()))
    }

    #[test]
    fn attach_applies_restored_position() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut controller = controller(&dir);
        let window = FakeWindow::default();
        controller.attach_main_window(window.clone(), &WindowGeometry::new(10, 20, 900, 700));

        assert!(controller.has_main_window());
        assert_eq!(window.calls(), vec!["set_position(10,20)"]);
    }

    #[test]
    fn attach_without_position_leaves_window_centered() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut controller = controller(&dir);
        let window = FakeWindow::default();
        controller.attach_main_window(window.clone(), &WindowGeometry::default());

        assert!(window.calls().is_empty());
    }

    #[test]
    fn close_request_persists_bounds_for_next_start() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut controller = controller(&dir);
        let bounds = WindowGeometry::new(33, 44, 1280, 720);
        controller.attach_main_window(FakeWindow::with_bounds(bounds), &WindowGeometry::default());

        controller.on_main_window_close_requested();
        controller.on_main_window_destroyed();

        let next = self::controller(&dir);
        assert_eq!(next.initial_geometry(), bounds);
    }

    #[test]
    fn minimized_close_keeps_previously_stored_bounds() {
        let dir = tempfile::tempdir().expect("tempdir");
        let stored = WindowGeometry::new(120, 80, 1024, 768);
        WindowStateStore::in_dir(dir.path())
            .save(&stored)
            .expect("seed");

        let mut controller = controller(&dir);
        let window = FakeWindow::with_bounds(WindowGeometry::new(-32000, -32000, 0, 0));
        *window.minimized.lock() = true;
        controller.attach_main_window(window.clone(), &WindowGeometry::default());

        controller.on_main_window_close_requested();
        controller.on_main_window_destroyed();

        assert!(!window.calls().contains(&"bounds".to_string()));
        assert_eq!(self::controller(&dir).initial_geometry(), stored);
    }

    #[test]
    fn minimized_close_on_first_run_leaves_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut controller = controller(&dir);
        let window = FakeWindow::with_bounds(WindowGeometry::new(-32000, -32000, 0, 0));
        *window.minimized.lock() = true;
        controller.attach_main_window(window, &WindowGeometry::default());

        controller.on_main_window_close_requested();

        assert_eq!(
            self::controller(&dir).initial_geometry(),
            WindowGeometry::default()
        );
    }

    #[test]
    fn close_request_survives_unwritable_state_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, b"not a dir").expect("write");
        let mut controller: AppLifecycleController<FakeWindow> =
            AppLifecycleController::new(WindowStateStore::in_dir(&blocker));
        controller.attach_main_window(
            FakeWindow::with_bounds(WindowGeometry::new(0, 0, 800, 600)),
            &WindowGeometry::default(),
        );

        controller.on_main_window_close_requested();
        assert!(controller.on_main_window_destroyed().is_some());
        assert!(!controller.has_main_window());
    }

    #[test]
    fn focus_after_destroy_is_a_no_op() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut controller = controller(&dir);
        let window = FakeWindow::minimized();
        controller.attach_main_window(window.clone(), &WindowGeometry::default());
        controller.on_main_window_destroyed();

        assert_eq!(controller.focus_main_window(), FocusOutcome::NoWindow);
        assert_eq!(controller.reveal_main_window(), FocusOutcome::NoWindow);
        assert!(window.calls().is_empty());
    }

    #[test]
    fn reveal_restores_minimized_or_shows_hidden_window() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut controller = controller(&dir);
        let minimized = FakeWindow::minimized();
        controller.attach_main_window(minimized.clone(), &WindowGeometry::default());
        assert_eq!(
            controller.reveal_main_window(),
            FocusOutcome::Focused { restored: true }
        );
        assert_eq!(minimized.calls(), vec!["restore", "focus"]);

        controller.on_main_window_destroyed();
        let hidden = FakeWindow::default();
        controller.attach_main_window(hidden.clone(), &WindowGeometry::default());
        controller.reveal_main_window();
        assert_eq!(hidden.calls(), vec!["show", "focus"]);
    }

    #[test]
    fn noisy_window_events_are_not_logged() {
        let moved = LifecycleEvent::Moved {
            label: "main".to_string(),
        };
        let closed = LifecycleEvent::Closed {
            label: "main".to_string(),
        };
        assert_eq!(moved.level(), None);
        assert_eq!(closed.level(), Some(LogLevel::Info));
        assert_eq!(LifecycleEvent::WindowAllClosed.name(), "window-all-closed");
    }

    #[test]
    fn window_events_map_to_lifecycle_events() {
        assert_eq!(
            LifecycleEvent::from_window_event("main", &tauri::WindowEvent::Focused(false)),
            Some(LifecycleEvent::Blurred {
                label: "main".to_string()
            })
        );
        assert_eq!(
            LifecycleEvent::from_window_event("config", &tauri::WindowEvent::Destroyed),
            Some(LifecycleEvent::Closed {
                label: "config".to_string()
            })
        );
    }
}
