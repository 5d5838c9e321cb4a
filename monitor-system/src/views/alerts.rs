use std::fmt::Display;

use remoove_api_caller::{
    errors::ApiError,
    json::alert::{AlertItem, AlertType},
    traits::RemooveApi,
};

use super::{roster::BorderColor, settings::NotificationSettings};

pub const NO_ALERTS_MESSAGE: &str = "No alerts at the moment.";
pub const ALERTS_DISABLED_MESSAGE: &str = "Alerts are turned off in settings.";

#[derive(thiserror::Error, Debug)]
pub enum AlertsError {
    #[error("No alert with id `{0}`")]
    UnknownAlert(String),
    #[error(transparent)]
    Api(#[from] ApiError),
}

#[must_use]
pub fn alert_border_color(alert_type: AlertType) -> BorderColor {
    match alert_type {
        AlertType::Info => BorderColor::Green,
        AlertType::Warning => BorderColor::Yellow,
        AlertType::Error => BorderColor::Red,
    }
}

/// Local alert list. Removals are applied locally first and mirrored to the server afterwards;
/// a failed remote call is reported but the local list is not restored.
#[must_use]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlertsView {
    alerts: Vec<AlertItem>,
}

impl AlertsView {
    pub async fn fetch(api: &dyn RemooveApi) -> Result<Self, ApiError> {
        let alerts = api.fetch_alerts().await?;
        tracing::debug!("Fetched {} alerts", alerts.len());
        Ok(Self { alerts })
    }

    pub fn from_alerts(alerts: Vec<AlertItem>) -> Self {
        Self { alerts }
    }

    #[must_use]
    pub fn alerts(&self) -> &[AlertItem] {
        &self.alerts
    }

    pub async fn dismiss(
        &mut self,
        api: &dyn RemooveApi,
        alert_id: &str,
    ) -> Result<AlertItem, AlertsError> {
        let position = self
            .alerts
            .iter()
            .position(|a| a.id == alert_id)
            .ok_or_else(|| AlertsError::UnknownAlert(alert_id.to_string()))?;
        let removed = self.alerts.remove(position);

        if let Err(e) = api.dismiss_alert(&removed.id, &removed.timestamp).await {
            tracing::error!("Alert {} removed locally only: {e}", removed.id);
            return Err(e.into());
        }

        Ok(removed)
    }

    pub async fn clear(&mut self, api: &dyn RemooveApi) -> Result<(), AlertsError> {
        self.alerts.clear();

        api.clear_alerts().await.map_err(|e| {
            tracing::error!("Alerts cleared locally only: {e}");
            AlertsError::from(e)
        })
    }

    /// Rendering restricted to what the notification switches let through. The list itself
    /// is untouched, so hidden alerts can still be dismissed by id.
    pub fn visible<'a>(&'a self, settings: &'a NotificationSettings) -> VisibleAlerts<'a> {
        VisibleAlerts {
            view: self,
            settings,
        }
    }
}

fn write_alerts<'a>(
    f: &mut std::fmt::Formatter<'_>,
    alerts: impl IntoIterator<Item = &'a AlertItem>,
) -> std::fmt::Result {
    let mut alerts = alerts.into_iter().peekable();
    if alerts.peek().is_none() {
        return writeln!(f, "{NO_ALERTS_MESSAGE}");
    }
    for alert in alerts {
        writeln!(
            f,
            "[{}] {} | Trash Can {} | {} | {} ({})",
            alert_border_color(alert.alert_type),
            alert.id,
            alert.trash_can_id,
            alert.timestamp,
            alert.message,
            alert.alert_type,
        )?;
    }
    Ok(())
}

impl Display for AlertsView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write_alerts(f, &self.alerts)
    }
}

#[must_use]
pub struct VisibleAlerts<'a> {
    view: &'a AlertsView,
    settings: &'a NotificationSettings,
}

impl Display for VisibleAlerts<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if !self.settings.alerts_enabled {
            return writeln!(f, "{ALERTS_DISABLED_MESSAGE}");
        }
        write_alerts(
            f,
            self.view.alerts.iter().filter(|a| self.settings.shows(a)),
        )
    }
}
