#[derive(thiserror::Error, Debug)]
pub enum WsHandlerError {
    #[error("WebSocket error: {0}")]
    Tungstenite(#[from] tokio_tungstenite::tungstenite::Error),
    #[error("Encoding outbound frame failed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Connection closed by server: code={code}, reason={reason}")]
    ConnectionClosed { code: u16, reason: String },
}
