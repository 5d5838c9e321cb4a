use std::fmt::Display;

use remoove_api_caller::{
    errors::ApiError,
    json::sensor::{SensorDataQuery, SensorRecord},
    traits::RemooveApi,
};

pub const NO_DATA_MESSAGE: &str = "No data found";

#[derive(Debug)]
pub struct SensorLogView {
    query: SensorDataQuery,
    records: Result<Vec<SensorRecord>, ApiError>,
}

impl SensorLogView {
    pub async fn fetch(api: &dyn RemooveApi, query: SensorDataQuery) -> Self {
        let records = api.fetch_sensor_data(&query).await;
        if let Err(e) = &records {
            tracing::error!("Sensor data for device {}: {e}", query.device_id);
        }
        Self { query, records }
    }

    #[must_use]
    pub fn query(&self) -> &SensorDataQuery {
        &self.query
    }

    #[must_use]
    pub fn records(&self) -> Option<&[SensorRecord]> {
        self.records.as_deref().ok()
    }
}

impl Display for SensorLogView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Sensor data for device {}", self.query.device_id)?;
        match &self.records {
            Err(e) => writeln!(f, "Error: {e} ({})", e.cause()),
            Ok(records) if records.is_empty() => writeln!(f, "{NO_DATA_MESSAGE}"),
            Ok(records) => records.iter().try_for_each(|r| {
                writeln!(
                    f,
                    "{} | {} | {} | {} | {}",
                    r.time_stamp, r.device_id, r.trash_type, r.weight, r.location
                )
            }),
        }
    }
}
