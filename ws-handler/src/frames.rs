use remoove_api_caller::{
    envelope,
    json::{
        ids::raw_id_matches,
        status::{FillLevels, TrashCanStatus},
    },
};
use serde::Serialize;
use serde_json::Value;

const TRASH_CAN_ID_FIELD: &str = "trashCanId";

/// Parses an inbound text frame and keeps it only if it belongs to `subscription_id`.
/// Frames that cannot be parsed are logged and dropped; frames for other cans are dropped silently.
#[must_use]
pub fn status_from_frame(text: &str, subscription_id: &str) -> Option<TrashCanStatus> {
    let payload = match serde_json::from_str::<Value>(text)
        .map_err(envelope::EnvelopeError::MalformedJson)
        .and_then(envelope::unwrap_envelope)
    {
        Ok(v) => v,
        Err(e) => {
            tracing::error!("Dropping unparsable WebSocket frame: {e}");
            return None;
        }
    };

    let matches = payload
        .get(TRASH_CAN_ID_FIELD)
        .is_some_and(|id| raw_id_matches(id, subscription_id));
    if !matches {
        return None;
    }

    match serde_json::from_value::<TrashCanStatus>(payload) {
        Ok(status) => Some(status),
        Err(e) => {
            tracing::error!("Dropping WebSocket frame for trash can {subscription_id}: {e}");
            None
        }
    }
}

#[must_use]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "action")]
pub enum OutboundFrame {
    #[serde(rename = "subscribe")]
    Subscribe {
        #[serde(rename = "trashCanId")]
        trash_can_id: String,
    },
    #[serde(rename = "sendMessage", rename_all = "camelCase")]
    StatusUpdate {
        trash_can_id: String,
        fill_levels: FillLevels,
        sorting_status: String,
        trap_status: String,
        last_updated: String,
    },
}

impl OutboundFrame {
    pub fn subscribe(trash_can_id: impl Into<String>) -> Self {
        Self::Subscribe {
            trash_can_id: trash_can_id.into(),
        }
    }

    pub fn status_update(
        trash_can_id: impl Into<String>,
        status: &TrashCanStatus,
        last_updated: impl Into<String>,
    ) -> Self {
        Self::StatusUpdate {
            trash_can_id: trash_can_id.into(),
            fill_levels: status.fill_levels.clone(),
            sorting_status: status.sorting_status.clone(),
            trap_status: status.trap_status.clone(),
            last_updated: last_updated.into(),
        }
    }

    pub fn to_text(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use remoove_api_caller::json::status::WasteCategory;
    use rstest::rstest;
    use serde_json::json;

    fn frame(id: &Value) -> String {
        json!({
            "trashCanId": id,
            "fillLevels": {"Containers": 55, "Organics": 20, "Landfill": 0, "Paper": 90},
            "sortingStatus": "Sorting",
            "trapStatus": "Open"
        })
        .to_string()
    }

    #[rstest]
    #[case(json!("1"))]
    #[case(json!(1))]
    fn matching_frame_is_kept(#[case] id: Value) {
        let status = status_from_frame(&frame(&id), "1").unwrap();
        assert_eq!(status.fill_levels.get(WasteCategory::Paper), 90.);
        assert_eq!(status.sorting_status, "Sorting");
        assert_eq!(status.trap_status, "Open");
    }

    #[test]
    fn enveloped_frame_is_kept() {
        let text = json!({"body": frame(&json!("4"))}).to_string();
        assert!(status_from_frame(&text, "4").is_some());
    }

    #[rstest]
    #[case(frame(&json!("2")))]
    #[case(frame(&json!(11)))]
    #[case(json!({"fillLevels": {}}).to_string())]
    #[case("not json".to_string())]
    #[case(json!({"trashCanId": "1", "fillLevels": "full"}).to_string())]
    fn other_frames_are_dropped(#[case] text: String) {
        assert_eq!(status_from_frame(&text, "1"), None);
    }

    #[test]
    fn subscribe_frame() {
        let text = OutboundFrame::subscribe("7").to_text().unwrap();
        assert_eq!(
            serde_json::from_str::<Value>(&text).unwrap(),
            json!({"action": "subscribe", "trashCanId": "7"})
        );
    }

    #[test]
    fn status_update_frame() {
        let status: TrashCanStatus = serde_json::from_str(&frame(&json!("7"))).unwrap();
        let text = OutboundFrame::status_update("7", &status, "2025-02-10T14:30:00+00:00")
            .to_text()
            .unwrap();
        assert_eq!(
            serde_json::from_str::<Value>(&text).unwrap(),
            json!({
                "action": "sendMessage",
                "trashCanId": "7",
                "fillLevels": {"Containers": 55.0, "Organics": 20.0, "Landfill": 0.0, "Paper": 90.0},
                "sortingStatus": "Sorting",
                "trapStatus": "Open",
                "lastUpdated": "2025-02-10T14:30:00+00:00"
            })
        );
    }
}
