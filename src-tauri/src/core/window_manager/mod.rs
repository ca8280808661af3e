//! Window-manager capability used by the lifecycle controller and the
//! single-instance coordinator. Geometry is exchanged in logical pixels so a
//! stored size means the same thing on every display scale.

use crate::models::WindowGeometry;
use tauri::{LogicalPosition, Position, WebviewWindow};

pub trait ManagedWindow {
    fn bounds(&self) -> Result<WindowGeometry, String>;
    fn set_position(&self, x: i32, y: i32) -> Result<(), String>;
    fn is_minimized(&self) -> bool;
    fn restore(&self) -> Result<(), String>;
    fn show(&self) -> Result<(), String>;
    fn focus(&self) -> Result<(), String>;
}

impl ManagedWindow for WebviewWindow {
    fn bounds(&self) -> Result<WindowGeometry, String> {
        let scale = self
            .scale_factor()
            .map_err(|e| format!("Failed to read scale factor: {}", e))?;
        let position = self
            .outer_position()
            .map_err(|e| format!("Failed to read window position: {}", e))?
            .to_logical::<i32>(scale);
        let size = self
            .inner_size()
            .map_err(|e| format!("Failed to read window size: {}", e))?
            .to_logical::<u32>(scale);
        Ok(WindowGeometry::new(position.x, position.y, size.width, size.height))
    }

    fn set_position(&self, x: i32, y: i32) -> Result<(), String> {
        WebviewWindow::set_position(
            self,
            Position::Logical(LogicalPosition::new(x as f64, y as f64)),
        )
        .map_err(|e| format!("Failed to set window position: {}", e))
    }

    fn is_minimized(&self) -> bool {
        WebviewWindow::is_minimized(self).unwrap_or(false)
    }

    fn restore(&self) -> Result<(), String> {
        self.unminimize()
            .map_err(|e| format!("Failed to restore window: {}", e))
    }

    fn show(&self) -> Result<(), String> {
        WebviewWindow::show(self).map_err(|e| format!("Failed to show window: {}", e))
    }

    fn focus(&self) -> Result<(), String> {
        self.set_focus()
            .map_err(|e| format!("Failed to focus window: {}", e))
    }
}
