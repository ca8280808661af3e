pub mod badge;
pub mod folders;
pub mod logs;
pub mod settings;
pub mod shortcuts;
pub mod tray;
pub mod window;
