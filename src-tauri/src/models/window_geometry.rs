use serde::{Deserialize, Serialize};

pub const DEFAULT_WIDTH: u32 = 800;
pub const DEFAULT_HEIGHT: u32 = 600;

/// The main window cannot be made smaller than its default size.
pub const MIN_WIDTH: u32 = DEFAULT_WIDTH;
pub const MIN_HEIGHT: u32 = DEFAULT_HEIGHT;

/// Position and size of a window in logical pixels.
///
/// `x`/`y` are independent of the size: a file may carry a usable size but no
/// position, in which case the window is left where the OS places it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowGeometry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<i32>,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowGeometry {
    fn default() -> Self {
        Self {
            x: None,
            y: None,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
        }
    }
}

impl WindowGeometry {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            width,
            height,
        }
    }

    /// Both coordinates, or nothing. A half-known position is not applied.
    pub fn position(&self) -> Option<(i32, i32)> {
        match (self.x, self.y) {
            (Some(x), Some(y)) => Some((x, y)),
            _ => None,
        }
    }

    pub fn has_valid_size(&self) -> bool {
        self.width >= MIN_WIDTH && self.height >= MIN_HEIGHT
    }

    /// Replaces an undersized width/height with the defaults, keeping position.
    pub fn with_size_or_default(mut self) -> Self {
        if !self.has_valid_size() {
            self.width = DEFAULT_WIDTH;
            self.height = DEFAULT_HEIGHT;
        }
        self
    }
}

/// On-disk layout of `ttthMainWindowPosSize.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistedWindowState {
    pub bounds: WindowGeometry,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_requires_both_coordinates() {
        let mut g = WindowGeometry::new(10, 20, 900, 700);
        assert_eq!(g.position(), Some((10, 20)));
        g.y = None;
        assert_eq!(g.position(), None);
    }

    #[test]
    fn undersized_geometry_keeps_position_but_resets_size() {
        let g = WindowGeometry::new(-1200, 40, 640, 480).with_size_or_default();
        assert_eq!(g, WindowGeometry::new(-1200, 40, DEFAULT_WIDTH, DEFAULT_HEIGHT));
    }

    #[test]
    fn absent_position_is_not_serialized() {
        let json = serde_json::to_string(&PersistedWindowState {
            bounds: WindowGeometry::default(),
        })
        .expect("serialize");
        assert_eq!(json, r#"{"bounds":{"width":800,"height":600}}"#);
    }
}
