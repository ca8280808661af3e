pub mod shared_settings;
pub mod window_geometry;

pub use shared_settings::SharedSettings;
pub use window_geometry::{PersistedWindowState, WindowGeometry};
