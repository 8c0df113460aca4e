use thiserror::Error;
use tracing::{debug, error, warn};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Network failure: {0}")]
    Network(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not signed in")]
    Unauthenticated,

    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Request rejected ({code}): {message}")]
    Rejected { code: i64, message: String },

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for field '{field}': {reason}")]
    InvalidField { field: String, reason: String },

    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Failed to encode request body: {0}")]
    Encoding(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ClientError {
    /// Classifies a non-2xx response by its status code.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            400 | 409 | 422 => ClientError::Validation(message),
            // The backend answers signed-out calls by redirecting to sign-in.
            300..=399 | 401 | 403 => ClientError::Unauthenticated,
            404 => ClientError::NotFound(message),
            _ => ClientError::Http { status, message },
        }
    }

    pub fn status_code(&self) -> Option<u16> {
        match self {
            ClientError::NotFound(_) => Some(404),
            ClientError::Validation(_) => Some(400),
            ClientError::Unauthenticated => Some(401),
            ClientError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ClientError::Network(_) => "NETWORK_FAILURE",
            ClientError::NotFound(_) => "NOT_FOUND",
            ClientError::Validation(_) => "VALIDATION_ERROR",
            ClientError::Unauthenticated => "UNAUTHENTICATED",
            ClientError::Http { .. } => "HTTP_ERROR",
            ClientError::MalformedResponse(_) => "MALFORMED_RESPONSE",
            ClientError::Rejected { .. } => "REJECTED",
            ClientError::MissingField(_) => "MISSING_FIELD",
            ClientError::InvalidField { .. } => "INVALID_FIELD",
            ClientError::UnknownField(_) => "UNKNOWN_FIELD",
            ClientError::Encoding(_) => "ENCODING_ERROR",
            ClientError::Config(_) => "CONFIG_ERROR",
        }
    }

    pub fn log(&self) {
        match self {
            ClientError::Unauthenticated => {
                debug!("Principal check failed, redirecting to sign-in");
            }
            ClientError::MissingField(_)
            | ClientError::InvalidField { .. }
            | ClientError::UnknownField(_)
            | ClientError::Validation(_)
            | ClientError::NotFound(_) => {
                warn!(error = %self, code = self.code(), "Request not accepted");
            }
            _ => {
                error!(error = ?self, code = self.code(), "Client error");
            }
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_builder() {
            ClientError::Config(e.to_string())
        } else {
            ClientError::Network(e.to_string())
        }
    }
}
