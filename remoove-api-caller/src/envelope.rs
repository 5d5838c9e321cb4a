//! API Gateway Lambda-proxy responses may wrap the real payload as `{"body": "<json string>"}`.
//! Every endpoint goes through the same rule: a string `body` field is decoded and used as the
//! payload, anything else is used as-is.

use serde::de::DeserializeOwned;
use serde_json::Value;

const ENVELOPE_BODY_FIELD: &str = "body";

#[derive(thiserror::Error, Debug)]
pub enum EnvelopeError {
    #[error("Response is not valid JSON: {0}")]
    MalformedJson(serde_json::Error),
    #[error("Envelope body is not valid JSON: {0}")]
    MalformedBody(serde_json::Error),
    #[error("Payload does not have the expected shape: {0}")]
    UnexpectedShape(serde_json::Error),
}

pub fn unwrap_envelope(raw: Value) -> Result<Value, EnvelopeError> {
    let body = match &raw {
        Value::Object(map) => map
            .get(ENVELOPE_BODY_FIELD)
            .and_then(Value::as_str)
            .map(str::to_owned),
        _ => None,
    };

    match body {
        Some(body) => serde_json::from_str(&body).map_err(EnvelopeError::MalformedBody),
        None => Ok(raw),
    }
}

pub fn decode_payload<T: DeserializeOwned>(raw: Value) -> Result<T, EnvelopeError> {
    serde_json::from_value(unwrap_envelope(raw)?).map_err(EnvelopeError::UnexpectedShape)
}

pub fn decode_bytes<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, EnvelopeError> {
    let raw = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(bytes).map_err(EnvelopeError::MalformedJson)?
    };
    decode_payload(raw)
}
