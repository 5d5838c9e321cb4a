//! Notification switches, kept only on this device, and the app details panel

use std::fmt::Display;

use local_store::{
    SETTINGS_KEY,
    json::{load_json, save_json},
    traits::KeyValueStore,
};
use remoove_api_caller::json::alert::{AlertItem, AlertType};
use serde::{Deserialize, Serialize};

const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
const APP_DEVELOPER: &str = "ReMoove";
const APP_LICENSE: &str = env!("CARGO_PKG_LICENSE");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationToggle {
    Alerts,
    SortingErrors,
    FullBin,
}

impl Display for NotificationToggle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            NotificationToggle::Alerts => "Enable Alerts",
            NotificationToggle::SortingErrors => "Sorting Errors",
            NotificationToggle::FullBin => "Full Bin Notifications",
        };
        f.write_str(s)
    }
}

/// Everything is on until the user turns it off. Fields missing from an older stored
/// file read as on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NotificationSettings {
    pub alerts_enabled: bool,
    pub sorting_errors_enabled: bool,
    pub full_bin_enabled: bool,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            alerts_enabled: true,
            sorting_errors_enabled: true,
            full_bin_enabled: true,
        }
    }
}

impl NotificationSettings {
    #[must_use]
    pub fn get(&self, toggle: NotificationToggle) -> bool {
        match toggle {
            NotificationToggle::Alerts => self.alerts_enabled,
            NotificationToggle::SortingErrors => self.sorting_errors_enabled,
            NotificationToggle::FullBin => self.full_bin_enabled,
        }
    }

    pub fn set(&mut self, toggle: NotificationToggle, enabled: bool) {
        let field = match toggle {
            NotificationToggle::Alerts => &mut self.alerts_enabled,
            NotificationToggle::SortingErrors => &mut self.sorting_errors_enabled,
            NotificationToggle::FullBin => &mut self.full_bin_enabled,
        };
        *field = enabled;
    }

    /// Errors are sorting failures and warnings are fill warnings; info always passes
    /// while alerts are enabled.
    #[must_use]
    pub fn shows(&self, alert: &AlertItem) -> bool {
        self.alerts_enabled
            && match alert.alert_type {
                AlertType::Info => true,
                AlertType::Error => self.sorting_errors_enabled,
                AlertType::Warning => self.full_bin_enabled,
            }
    }

    /// A missing or unreadable stored value gives the defaults
    pub async fn load(store: &dyn KeyValueStore) -> Self {
        match load_json::<Self>(store, SETTINGS_KEY).await {
            Ok(settings) => settings.unwrap_or_default(),
            Err(e) => {
                tracing::error!("Failed to load settings: {e}");
                Self::default()
            }
        }
    }

    /// A storage failure is logged; the in-memory value is changed regardless
    pub async fn update(
        &mut self,
        store: &dyn KeyValueStore,
        toggle: NotificationToggle,
        enabled: bool,
    ) {
        self.set(toggle, enabled);
        if let Err(e) = save_json(store, SETTINGS_KEY, &*self).await {
            tracing::error!("Failed to save settings: {e}");
        }
    }
}

impl Display for NotificationSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Notifications")?;
        for toggle in [
            NotificationToggle::Alerts,
            NotificationToggle::SortingErrors,
            NotificationToggle::FullBin,
        ] {
            let state = if self.get(toggle) { "on" } else { "off" };
            writeln!(f, "  {:<24} {state}", toggle.to_string())?;
        }

        writeln!(f, "App Details")?;
        writeln!(f, "  Version: {APP_VERSION}")?;
        writeln!(f, "  Developer: {APP_DEVELOPER}")?;
        writeln!(f, "  License: {APP_LICENSE}")
    }
}
