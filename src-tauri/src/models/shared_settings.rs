use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Settings the renderer publishes to the shell one property at a time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SharedSettings {
    pub setting_default_view: String,
    pub setting_theme: String,
    pub setting_autostart: String,
    pub setting_disable_tray: bool,
    pub setting_urgent_window: bool,
    pub setting_enable_error_reporting: bool,
    pub setting_enable_prereleases: bool,
}

impl Default for SharedSettings {
    fn default() -> Self {
        Self {
            setting_default_view: String::new(),
            setting_theme: "default".to_string(),
            setting_autostart: String::new(),
            setting_disable_tray: false,
            setting_urgent_window: false,
            setting_enable_error_reporting: true,
            setting_enable_prereleases: false,
        }
    }
}

fn expect_string(property: &str, value: Value) -> Result<String, String> {
    match value {
        Value::String(s) => Ok(s),
        other => Err(format!("{} expects a string, got {}", property, other)),
    }
}

fn expect_bool(property: &str, value: Value) -> Result<bool, String> {
    match value {
        Value::Bool(b) => Ok(b),
        other => Err(format!("{} expects a boolean, got {}", property, other)),
    }
}

impl SharedSettings {
    /// Property names are the renderer's (`settingTheme`, ...).
    pub fn set(&mut self, property: &str, value: Value) -> Result<(), String> {
        match property {
            "settingDefaultView" => self.setting_default_view = expect_string(property, value)?,
            "settingTheme" => self.setting_theme = expect_string(property, value)?,
            "settingAutostart" => self.setting_autostart = expect_string(property, value)?,
            "settingDisableTray" => self.setting_disable_tray = expect_bool(property, value)?,
            "settingUrgentWindow" => self.setting_urgent_window = expect_bool(property, value)?,
            "settingEnableErrorReporting" => {
                self.setting_enable_error_reporting = expect_bool(property, value)?
            }
            "settingEnablePrereleases" => {
                self.setting_enable_prereleases = expect_bool(property, value)?
            }
            _ => return Err(format!("Unknown shared setting: {}", property)),
        }
        Ok(())
    }
}
