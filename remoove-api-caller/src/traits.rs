use async_trait::async_trait;
use serde_json::Value;

use crate::errors::ApiError;
use crate::json::{
    alert::AlertItem,
    chart::ChartData,
    feedback::{FeedbackOutcome, FeedbackRequest},
    manual_control::ManualControlCommand,
    roster::RosterEntry,
    sensor::{SensorDataQuery, SensorRecord},
    status::TrashCanStatus,
};

#[async_trait]
pub trait RemooveApi: Send + Sync {
    /// Attempt a call to the API that only tests whether the API is healthy
    #[must_use]
    async fn test_call(&self) -> Result<(), ApiError>;

    #[must_use]
    async fn fetch_roster(&self) -> Result<Vec<RosterEntry>, ApiError>;

    #[must_use]
    async fn fetch_status(&self, trash_can_id: &str) -> Result<TrashCanStatus, ApiError>;

    /// Returns whatever the device acknowledged with; callers usually ignore it
    #[must_use]
    async fn send_manual_control(
        &self,
        trash_can_id: &str,
        command: &ManualControlCommand,
    ) -> Result<Value, ApiError>;

    #[must_use]
    async fn fetch_chart_data(&self, trash_can_id: &str) -> Result<ChartData, ApiError>;

    #[must_use]
    async fn fetch_alerts(&self) -> Result<Vec<AlertItem>, ApiError>;

    #[must_use]
    async fn dismiss_alert(&self, alert_id: &str, timestamp: &str) -> Result<(), ApiError>;

    #[must_use]
    async fn clear_alerts(&self) -> Result<(), ApiError>;

    #[must_use]
    async fn fetch_sensor_data(
        &self,
        query: &SensorDataQuery,
    ) -> Result<Vec<SensorRecord>, ApiError>;

    /// A refusal by the server is an `Ok(FeedbackOutcome::Rejected)`; only transport and
    /// decode failures are errors
    #[must_use]
    async fn submit_feedback(&self, request: &FeedbackRequest)
    -> Result<FeedbackOutcome, ApiError>;
}
