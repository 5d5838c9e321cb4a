use serde::{Deserialize, Serialize};

pub const FEEDBACK_ACCEPTED_MESSAGE: &str = "Feedback submitted successfully!";
pub const FEEDBACK_SERVER_ERROR_MESSAGE: &str = "An error occurred on the server.";

/// Body of `POST /feedback`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedbackRequest {
    pub user_id: String,
    pub device_id: String,
    pub suggestion: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedbackOutcome {
    Accepted,
    /// The server answered, but refused the submission
    Rejected { message: String },
}

impl FeedbackOutcome {
    #[must_use]
    pub fn from_rejection_body(body: &[u8]) -> Self {
        let message = serde_json::from_slice::<FeedbackErrorBody>(body)
            .ok()
            .and_then(|b| b.error)
            .unwrap_or_else(|| FEEDBACK_SERVER_ERROR_MESSAGE.to_string());
        Self::Rejected { message }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            FeedbackOutcome::Accepted => FEEDBACK_ACCEPTED_MESSAGE,
            FeedbackOutcome::Rejected { message } => message,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FeedbackErrorBody {
    error: Option<String>,
}
