use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// DynamoDB attribute value, as the sensor table exports it. Only strings and numbers are
/// read; attributes of any other type are kept as raw JSON and ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttributeValue {
    S(String),
    N(String),
    #[serde(untagged)]
    Other(serde_json::Value),
}

pub type RawSensorItem = HashMap<String, AttributeValue>;

#[derive(Debug, Clone, Deserialize)]
pub struct SensorDataPayload {
    items: Option<Vec<RawSensorItem>>,
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum SensorRecordError {
    #[error("Response carries no `items` array")]
    MissingItems,
    #[error("Attribute `{0}` is missing or has the wrong type")]
    MissingAttribute(&'static str),
    #[error("Attribute `{name}` is not a number: `{value}`")]
    InvalidNumber { name: &'static str, value: String },
}

#[must_use]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SensorRecord {
    #[serde(rename = "deviceID")]
    pub device_id: String,
    pub time_stamp: String,
    pub trash_type: String,
    /// Kilograms
    pub weight: f64,
    pub location: String,
}

fn string_attr(item: &RawSensorItem, name: &'static str) -> Result<String, SensorRecordError> {
    match item.get(name) {
        Some(AttributeValue::S(s)) => Ok(s.clone()),
        _ => Err(SensorRecordError::MissingAttribute(name)),
    }
}

fn number_attr(item: &RawSensorItem, name: &'static str) -> Result<f64, SensorRecordError> {
    match item.get(name) {
        Some(AttributeValue::N(n)) => {
            n.trim()
                .parse::<f64>()
                .map_err(|_| SensorRecordError::InvalidNumber {
                    name,
                    value: n.clone(),
                })
        }
        _ => Err(SensorRecordError::MissingAttribute(name)),
    }
}

impl TryFrom<&RawSensorItem> for SensorRecord {
    type Error = SensorRecordError;

    fn try_from(item: &RawSensorItem) -> Result<Self, Self::Error> {
        Ok(Self {
            device_id: string_attr(item, "deviceID")?,
            time_stamp: string_attr(item, "timeStamp")?,
            trash_type: string_attr(item, "trashType")?,
            weight: number_attr(item, "weight")?,
            location: string_attr(item, "location")?,
        })
    }
}

impl SensorDataPayload {
    pub fn into_records(self) -> Result<Vec<SensorRecord>, SensorRecordError> {
        self.items
            .ok_or(SensorRecordError::MissingItems)?
            .iter()
            .map(SensorRecord::try_from)
            .collect()
    }
}

/// Query of `GET /fetchSensorData`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SensorDataQuery {
    pub device_id: String,
    pub time_stamp: Option<String>,
}

impl SensorDataQuery {
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(&'static str, &str)> {
        let mut pairs = vec![("deviceID", self.device_id.as_str())];
        if let Some(ts) = self.time_stamp.as_deref().filter(|ts| !ts.is_empty()) {
            pairs.push(("timeStamp", ts));
        }
        pairs
    }
}
