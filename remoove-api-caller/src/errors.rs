use crate::envelope::EnvelopeError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiOperation {
    TestCall,
    FetchRoster,
    FetchStatus,
    SendManualControl,
    FetchChartData,
    FetchAlerts,
    DismissAlert,
    ClearAlerts,
    FetchSensorData,
    SubmitFeedback,
}

impl std::fmt::Display for ApiOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ApiOperation::TestCall => "reach the ReMoove API",
            ApiOperation::FetchRoster => "fetch home trash cans",
            ApiOperation::FetchStatus => "fetch trash can status",
            ApiOperation::SendManualControl => "send command",
            ApiOperation::FetchChartData => "fetch chart data",
            ApiOperation::FetchAlerts => "fetch alerts",
            ApiOperation::DismissAlert => "dismiss alert",
            ApiOperation::ClearAlerts => "clear alerts",
            ApiOperation::FetchSensorData => "fetch sensor data",
            ApiOperation::SubmitFeedback => "submit feedback",
        };
        f.write_str(s)
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ApiFailure {
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Unexpected HTTP status {status}: {body}")]
    HttpStatus { status: u16, body: String },
    #[error("{0}")]
    Envelope(#[from] EnvelopeError),
    #[error("Invalid API response structure: {0}")]
    InvalidShape(String),
    #[error("Invalid request URL: {0}")]
    InvalidUrl(String),
}

/// The one error every API call returns. Its message is the generic user-facing text
/// ("Failed to fetch trash can status"); the cause is kept as the error source.
#[derive(thiserror::Error, Debug)]
#[error("Failed to {operation}")]
pub struct ApiError {
    operation: ApiOperation,
    #[source]
    cause: ApiFailure,
}

impl ApiError {
    pub fn new(operation: ApiOperation, cause: impl Into<ApiFailure>) -> Self {
        Self {
            operation,
            cause: cause.into(),
        }
    }

    #[must_use]
    pub fn operation(&self) -> ApiOperation {
        self.operation
    }

    #[must_use]
    pub fn cause(&self) -> &ApiFailure {
        &self.cause
    }

    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self.cause, ApiFailure::Transport(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn message_is_generic_and_cause_is_kept() {
        let e = ApiError::new(
            ApiOperation::FetchStatus,
            ApiFailure::HttpStatus {
                status: 502,
                body: "Bad Gateway".to_string(),
            },
        );
        assert_eq!(e.to_string(), "Failed to fetch trash can status");
        assert_eq!(
            e.source().unwrap().to_string(),
            "Unexpected HTTP status 502: Bad Gateway"
        );
        assert!(!e.is_transport());
        assert_eq!(e.operation(), ApiOperation::FetchStatus);
    }
}
