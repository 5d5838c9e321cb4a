use serde::{Deserialize, Serialize};

use super::ids::deserialize_id;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertType {
    Info,
    Warning,
    Error,
}

impl std::fmt::Display for AlertType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            AlertType::Info => "info",
            AlertType::Warning => "warning",
            AlertType::Error => "error",
        };
        f.write_str(s)
    }
}

#[must_use]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertItem {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub message: String,
    #[serde(deserialize_with = "deserialize_id")]
    pub trash_can_id: String,
    pub timestamp: String,
    #[serde(rename = "type")]
    pub alert_type: AlertType,
}

/// Body of `DELETE /Alerts/{id}`
#[derive(Debug, Clone, Serialize)]
pub struct DismissAlertRequest<'a> {
    pub timestamp: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_alerts() {
        let alerts: Vec<AlertItem> = serde_json::from_value(json!([
            {"id": "test-1", "message": "Trash can #1 is full", "trashCanId": 1, "timestamp": "10:00:00", "type": "warning"},
            {"id": "test-2", "message": "Trash can #2 lost connection", "trashCanId": "2", "timestamp": "10:01:00", "type": "error"},
            {"id": 3, "message": "Maintenance scheduled tomorrow", "trashCanId": "1", "timestamp": "10:02:00", "type": "info"}
        ]))
        .unwrap();

        assert_eq!(alerts.len(), 3);
        assert_eq!(alerts[0].trash_can_id, "1");
        assert_eq!(alerts[0].alert_type, AlertType::Warning);
        assert_eq!(alerts[1].alert_type, AlertType::Error);
        assert_eq!(alerts[2].id, "3");
        assert_eq!(alerts[2].alert_type, AlertType::Info);
    }

    #[test]
    fn unknown_type_is_rejected() {
        let result = serde_json::from_value::<AlertItem>(json!(
            {"id": "x", "message": "m", "trashCanId": "1", "timestamp": "t", "type": "critical"}
        ));
        assert!(result.is_err());
    }

    #[test]
    fn dismiss_body() {
        let body = DismissAlertRequest {
            timestamp: "2025-02-10T14:30:00Z",
        };
        assert_eq!(
            serde_json::to_value(body).unwrap(),
            json!({"timestamp": "2025-02-10T14:30:00Z"})
        );
    }
}
