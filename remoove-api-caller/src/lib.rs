pub mod config;
pub mod envelope;
pub mod errors;
pub mod json;
pub mod traits;

use async_trait::async_trait;
use config::RemooveApiConfig;
use errors::{ApiError, ApiFailure, ApiOperation};
use json::{
    alert::{AlertItem, DismissAlertRequest},
    chart::{ChartData, ChartRequest},
    feedback::{FeedbackOutcome, FeedbackRequest},
    manual_control::{ManualControlCommand, ManualControlRequest},
    roster::RosterEntry,
    sensor::{SensorDataPayload, SensorDataQuery, SensorRecord},
    status::TrashCanStatus,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use traits::RemooveApi;

pub fn make_remoove_client(config: RemooveApiConfig) -> anyhow::Result<Box<dyn RemooveApi>> {
    let builder = reqwest::ClientBuilder::new();
    let client = match &config.api_proxy {
        Some(proxy) => builder.proxy(reqwest::Proxy::all(proxy)?).build()?,
        None => builder.build()?,
    };

    let result = RemooveApiClient { client, config };

    Ok(Box::new(result))
}

struct RemooveApiClient {
    client: reqwest::Client,
    config: RemooveApiConfig,
}

impl RemooveApiClient {
    async fn call<T: DeserializeOwned>(
        &self,
        operation: ApiOperation,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ApiError> {
        let result = send_and_decode(request.headers(json_headers_map())).await;

        result.map_err(|cause| failed(operation, cause))
    }
}

fn failed(operation: ApiOperation, cause: ApiFailure) -> ApiError {
    let error = ApiError::new(operation, cause);
    tracing::error!("{error}: {}", error.cause());
    error
}

async fn send_and_decode<T: DeserializeOwned>(
    request: reqwest::RequestBuilder,
) -> Result<T, ApiFailure> {
    let response = request.send().await?;
    let status = response.status();
    let body = response.bytes().await?;

    if !status.is_success() {
        return Err(ApiFailure::HttpStatus {
            status: status.as_u16(),
            body: String::from_utf8_lossy(&body).into_owned(),
        });
    }

    Ok(envelope::decode_bytes(&body)?)
}

#[async_trait]
impl RemooveApi for RemooveApiClient {
    async fn test_call(&self) -> Result<(), ApiError> {
        let url = self.config.control_url("Home");
        let request = self.client.get(url);
        let response: Value = self.call(ApiOperation::TestCall, request).await?;

        tracing::debug!("API test call succeeded with output: {response}");

        Ok(())
    }

    async fn fetch_roster(&self) -> Result<Vec<RosterEntry>, ApiError> {
        let url = self.config.control_url("Home");
        let request = self.client.get(url);
        let result: Vec<RosterEntry> = self.call(ApiOperation::FetchRoster, request).await?;

        tracing::debug!("Call `fetch_roster` returned {} trash cans", result.len());

        Ok(result)
    }

    async fn fetch_status(&self, trash_can_id: &str) -> Result<TrashCanStatus, ApiError> {
        let url = self
            .config
            .control_url_with_id("status", trash_can_id)
            .map_err(|cause| failed(ApiOperation::FetchStatus, cause))?;
        let request = self.client.get(url);
        let result: TrashCanStatus = self.call(ApiOperation::FetchStatus, request).await?;

        tracing::debug!("Call `fetch_status` with id {trash_can_id} with response: {result:?}");

        Ok(result)
    }

    async fn send_manual_control(
        &self,
        trash_can_id: &str,
        command: &ManualControlCommand,
    ) -> Result<Value, ApiError> {
        let url = self.config.control_url("ManualControls");
        let body = ManualControlRequest {
            trash_can_id,
            command,
        };
        let request = self.client.post(url).json(&body);
        let result: Value = self.call(ApiOperation::SendManualControl, request).await?;

        tracing::info!("Sent `{command}` to trash can {trash_can_id}");

        Ok(result)
    }

    async fn fetch_chart_data(&self, trash_can_id: &str) -> Result<ChartData, ApiError> {
        let url = self.config.control_url("TrashCount");
        let request = self.client.post(url).json(&ChartRequest { trash_can_id });
        let result: ChartData = self.call(ApiOperation::FetchChartData, request).await?;

        tracing::debug!(
            "Call `fetch_chart_data` with id {trash_can_id} returned ranges: {:?}",
            result.range_names().collect::<Vec<_>>()
        );

        Ok(result)
    }

    async fn fetch_alerts(&self) -> Result<Vec<AlertItem>, ApiError> {
        let url = self.config.control_url("Alerts");
        let request = self.client.get(url);
        let result: Vec<AlertItem> = self.call(ApiOperation::FetchAlerts, request).await?;

        tracing::debug!("Call `fetch_alerts` returned {} alerts", result.len());

        Ok(result)
    }

    async fn dismiss_alert(&self, alert_id: &str, timestamp: &str) -> Result<(), ApiError> {
        let url = self
            .config
            .control_url_with_id("Alerts", alert_id)
            .map_err(|cause| failed(ApiOperation::DismissAlert, cause))?;
        let request = self
            .client
            .delete(url)
            .json(&DismissAlertRequest { timestamp });
        let _: Value = self.call(ApiOperation::DismissAlert, request).await?;

        tracing::debug!("Dismissed alert {alert_id}");

        Ok(())
    }

    async fn clear_alerts(&self) -> Result<(), ApiError> {
        let url = self.config.control_url("Alerts/clear");
        let request = self.client.delete(url);
        let _: Value = self.call(ApiOperation::ClearAlerts, request).await?;

        tracing::debug!("Cleared all alerts");

        Ok(())
    }

    async fn fetch_sensor_data(
        &self,
        query: &SensorDataQuery,
    ) -> Result<Vec<SensorRecord>, ApiError> {
        let url = self.config.data_url("fetchSensorData");
        let request = self.client.get(url).query(&query.query_pairs());
        let payload: SensorDataPayload = self.call(ApiOperation::FetchSensorData, request).await?;

        let result = payload.into_records().map_err(|e| {
            failed(
                ApiOperation::FetchSensorData,
                ApiFailure::InvalidShape(e.to_string()),
            )
        })?;

        tracing::debug!(
            "Call `fetch_sensor_data` for device {} returned {} records",
            query.device_id,
            result.len()
        );

        Ok(result)
    }

    async fn submit_feedback(
        &self,
        request: &FeedbackRequest,
    ) -> Result<FeedbackOutcome, ApiError> {
        let url = self.config.data_url("feedback");
        let to_error = |cause: reqwest::Error| {
            let error = ApiError::new(ApiOperation::SubmitFeedback, cause);
            tracing::error!("{error}: {}", error.cause());
            error
        };

        let response = self
            .client
            .post(url)
            .headers(json_headers_map())
            .json(request)
            .send()
            .await
            .map_err(to_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(to_error)?;

        let outcome = if status == reqwest::StatusCode::OK {
            FeedbackOutcome::Accepted
        } else {
            FeedbackOutcome::from_rejection_body(&body)
        };

        tracing::info!(
            "Feedback from user {} answered with HTTP {status}: {}",
            request.user_id,
            outcome.message()
        );

        Ok(outcome)
    }
}

fn json_headers_map() -> reqwest::header::HeaderMap {
    let mut headers = reqwest::header::HeaderMap::new();
    headers.insert(
        reqwest::header::ACCEPT,
        reqwest::header::HeaderValue::from_static("application/json"),
    );
    headers
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    pub fn base_url() -> String {
        "https://example.execute-api.us-east-1.amazonaws.com/Dev".to_string()
    }

    fn make_config(base_url: String) -> RemooveApiConfig {
        RemooveApiConfig {
            control_api_base_url: base_url.clone(),
            data_api_base_url: base_url,
            api_proxy: None,
        }
    }

    #[rstest]
    fn client_with_proxy_builds(base_url: String) {
        let config = RemooveApiConfig {
            api_proxy: Some("http://127.0.0.1:3128".to_string()),
            ..make_config(base_url)
        };
        assert!(make_remoove_client(config).is_ok());
    }

    #[tokio::test]
    async fn id_calls_with_unusable_base_url() {
        let client = make_remoove_client(make_config("no-scheme".to_string())).unwrap();

        let err = client.dismiss_alert("1", "now").await.unwrap_err();
        assert_eq!(err.operation(), ApiOperation::DismissAlert);
        assert!(matches!(err.cause(), ApiFailure::InvalidUrl(_)));

        let err = client.fetch_status("1").await.unwrap_err();
        assert_eq!(err.operation(), ApiOperation::FetchStatus);
        assert!(matches!(err.cause(), ApiFailure::InvalidUrl(_)));
    }

    #[tokio::test]
    async fn unreachable_server_is_transport_error() {
        let client = make_remoove_client(make_config("http://127.0.0.1:1".to_string())).unwrap();

        let err = client.fetch_status("1").await.unwrap_err();
        assert!(err.is_transport());
        assert_eq!(err.to_string(), "Failed to fetch trash can status");

        let err = client
            .submit_feedback(&FeedbackRequest {
                user_id: "u".to_string(),
                device_id: "d".to_string(),
                suggestion: "s".to_string(),
            })
            .await
            .unwrap_err();
        assert!(err.is_transport());
    }

    #[tokio::test]
    #[rstest]
    #[ignore = "If you want to run this, set the fixture url then run it"]
    async fn test_call(base_url: String) {
        let client = make_remoove_client(make_config(base_url)).unwrap();
        client.test_call().await.unwrap();
    }

    #[tokio::test]
    #[rstest]
    #[ignore = "If you want to run this, set the fixture url, set the parameters then run it"]
    async fn fetch_status(base_url: String) {
        let trash_can_id = "1";

        let client = make_remoove_client(make_config(base_url)).unwrap();
        println!(
            "Status: {:?}",
            client.fetch_status(trash_can_id).await.unwrap()
        );
    }

    #[tokio::test]
    #[rstest]
    #[ignore = "If you want to run this, set the fixture url, set the parameters then run it"]
    async fn fetch_chart_data(base_url: String) {
        let trash_can_id = "1";

        let client = make_remoove_client(make_config(base_url)).unwrap();
        println!(
            "Chart: {:?}",
            client.fetch_chart_data(trash_can_id).await.unwrap()
        );
    }

    #[tokio::test]
    #[rstest]
    #[ignore = "If you want to run this, set the fixture url, set the parameters then run it"]
    async fn fetch_sensor_data(base_url: String) {
        let query = SensorDataQuery {
            device_id: "device123".to_string(),
            time_stamp: None,
        };

        let client = make_remoove_client(make_config(base_url)).unwrap();
        println!(
            "Records: {:?}",
            client.fetch_sensor_data(&query).await.unwrap()
        );
    }
}
