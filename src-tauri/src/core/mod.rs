pub mod app_log;
pub mod badge;
pub mod connectivity;
pub mod launch_args;
pub mod lifecycle;
pub mod maintenance;
pub mod shell_state;
pub mod single_instance;
pub mod ui_emit;
pub mod window_manager;
pub mod window_state;
pub mod windows;
