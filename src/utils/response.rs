use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::utils::error::ClientError;

/// Envelope code the backend uses for a successful call. Anything else is a
/// business rejection, regardless of HTTP status.
pub const SUCCESS_CODE: i64 = 0;

const PREVIEW_LIMIT: usize = 200;

#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    pub code: i64,
    pub data: Option<T>,
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn is_success(&self) -> bool {
        self.code == SUCCESS_CODE
    }

    pub fn into_result(self) -> Result<Option<T>, ClientError> {
        if self.is_success() {
            Ok(self.data)
        } else {
            Err(ClientError::Rejected {
                code: self.code,
                message: self.message.unwrap_or_default(),
            })
        }
    }
}

/// Decodes a 2xx body that must carry a value, enveloped or bare.
pub fn decode<T>(body: &[u8]) -> Result<T, ClientError>
where
    T: DeserializeOwned,
{
    decode_optional(body)?
        .ok_or_else(|| ClientError::MalformedResponse("response carried no data".to_string()))
}

/// Decodes a 2xx body where an empty body, `null`, or an envelope without
/// data all mean "nothing".
pub fn decode_optional<T>(body: &[u8]) -> Result<Option<T>, ClientError>
where
    T: DeserializeOwned,
{
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }

    let value: Value = serde_json::from_slice(body)
        .map_err(|e| ClientError::MalformedResponse(format!("invalid JSON: {e}")))?;

    if value.is_null() {
        return Ok(None);
    }

    if is_envelope(&value) {
        let envelope: ApiResponse<Value> = serde_json::from_value(value)
            .map_err(|e| ClientError::MalformedResponse(format!("invalid envelope: {e}")))?;
        return match envelope.into_result()? {
            None | Some(Value::Null) => Ok(None),
            Some(data) => from_value(data).map(Some),
        };
    }

    from_value(value).map(Some)
}

fn from_value<T>(value: Value) -> Result<T, ClientError>
where
    T: DeserializeOwned,
{
    serde_json::from_value(value)
        .map_err(|e| ClientError::MalformedResponse(format!("unexpected shape: {e}")))
}

fn is_envelope(value: &Value) -> bool {
    value.as_object().is_some_and(|object| {
        object.get("code").is_some_and(Value::is_number)
            && (object.contains_key("data") || object.contains_key("message"))
    })
}

/// Pulls a human readable message out of an error body. Handles envelope
/// bodies, `{ error: { message } }` bodies, JSON strings and plain text.
pub fn error_message(body: &[u8]) -> String {
    if let Ok(value) = serde_json::from_slice::<Value>(body) {
        let message = value
            .get("message")
            .and_then(Value::as_str)
            .or_else(|| {
                value
                    .get("error")
                    .and_then(|error| error.get("message"))
                    .and_then(Value::as_str)
            })
            .or_else(|| value.as_str());
        if let Some(message) = message {
            return message.to_string();
        }
    }

    let text = String::from_utf8_lossy(body);
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return "no response body".to_string();
    }
    trimmed.chars().take(PREVIEW_LIMIT).collect()
}
