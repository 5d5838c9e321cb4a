use remoove_api_caller::{
    json::feedback::{FEEDBACK_SERVER_ERROR_MESSAGE, FeedbackRequest},
    traits::RemooveApi,
};

pub const CONNECTION_FAILED_MESSAGE: &str =
    "Failed to connect to server. Check your internet connection.";

/// Submits the form and returns the message to show the user
pub async fn submit_feedback(api: &dyn RemooveApi, request: &FeedbackRequest) -> String {
    match api.submit_feedback(request).await {
        Ok(outcome) => outcome.message().to_string(),
        Err(e) if e.is_transport() => {
            tracing::error!("Feedback not sent: {e}");
            CONNECTION_FAILED_MESSAGE.to_string()
        }
        Err(e) => {
            tracing::error!("Feedback not accepted: {e}");
            FEEDBACK_SERVER_ERROR_MESSAGE.to_string()
        }
    }
}
