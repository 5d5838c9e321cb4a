use async_trait::async_trait;
use remoove_api_caller::errors::ApiError;
use remoove_api_caller::json::{
    alert::AlertItem,
    chart::ChartData,
    feedback::{FeedbackOutcome, FeedbackRequest},
    manual_control::ManualControlCommand,
    roster::RosterEntry,
    sensor::{SensorDataQuery, SensorRecord},
    status::TrashCanStatus,
};
use remoove_api_caller::traits::RemooveApi;
use serde_json::Value;

#[must_use]
pub fn make_remoove_client_mock() -> MockRemooveApi {
    MockRemooveApi::new()
}

mockall::mock! {
    pub RemooveApi {}

    #[async_trait]
    impl RemooveApi for RemooveApi {
        async fn test_call(&self) -> Result<(), ApiError>;
        async fn fetch_roster(&self) -> Result<Vec<RosterEntry>, ApiError>;
        async fn fetch_status(&self, trash_can_id: &str) -> Result<TrashCanStatus, ApiError>;
        async fn send_manual_control(
            &self,
            trash_can_id: &str,
            command: &ManualControlCommand,
        ) -> Result<Value, ApiError>;
        async fn fetch_chart_data(&self, trash_can_id: &str) -> Result<ChartData, ApiError>;
        async fn fetch_alerts(&self) -> Result<Vec<AlertItem>, ApiError>;
        async fn dismiss_alert(&self, alert_id: &str, timestamp: &str) -> Result<(), ApiError>;
        async fn clear_alerts(&self) -> Result<(), ApiError>;
        async fn fetch_sensor_data(
            &self,
            query: &SensorDataQuery,
        ) -> Result<Vec<SensorRecord>, ApiError>;
        async fn submit_feedback(
            &self,
            request: &FeedbackRequest,
        ) -> Result<FeedbackOutcome, ApiError>;
    }
}
