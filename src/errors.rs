use std::fmt;

use actix_web::{
    error::ResponseError,
    http::{header::ContentType, StatusCode},
    HttpResponse
};
use derive_more::Display;

use crate::constants::{
    DELIVERY_FAILED_MESSAGE, INVALID_DATA_MESSAGE, METHOD_NOT_ALLOWED_MESSAGE, RATE_LIMITED_MESSAGE,
};

#[derive(Debug)]
pub enum AppError {
    RateLimited,
    InvalidPayload(String),
    ValidationError(Vec<String>),
    DeliveryFailed(String),
    InternalError(String),
    MethodNotAllowed,
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::RateLimited => write!(f, "Rate limit exceeded"),
            AppError::InvalidPayload(msg) => write!(f, "Invalid payload: {}", msg),
            AppError::ValidationError(errors) => {
                write!(f, "validation error: {}", errors.join(", "))
            }
            AppError::DeliveryFailed(msg) => write!(f, "Delivery failed: {}", msg),
            AppError::InternalError(msg) => write!(f, "Internal server error: {}", msg),
            AppError::MethodNotAllowed => write!(f, "Method not allowed"),
        }
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        // Only fixed messages and validation details reach the client.
        let body = match self {
            AppError::RateLimited => serde_json::json!({
                "success": false,
                "error": RATE_LIMITED_MESSAGE
            }),
            AppError::InvalidPayload(_) => serde_json::json!({
                "success": false,
                "error": INVALID_DATA_MESSAGE
            }),
            AppError::ValidationError(errors) => serde_json::json!({
                "success": false,
                "error": INVALID_DATA_MESSAGE,
                "details": errors
            }),
            AppError::DeliveryFailed(_) | AppError::InternalError(_) => serde_json::json!({
                "success": false,
                "error": DELIVERY_FAILED_MESSAGE
            }),
            AppError::MethodNotAllowed => serde_json::json!({
                "error": METHOD_NOT_ALLOWED_MESSAGE
            }),
        };
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::json())
            .json(body)
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            AppError::InvalidPayload(_) => StatusCode::BAD_REQUEST,
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::DeliveryFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
        }
    }
}

impl AppError {
    pub fn to_http_response(&self) -> HttpResponse {
        self.error_response()
    }

    /// Failures whose detail must stay in the logs.
    pub fn is_internal(&self) -> bool {
        matches!(self, AppError::DeliveryFailed(_) | AppError::InternalError(_))
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalError(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InvalidPayload(err.to_string())
    }
}

impl From<DeliveryError> for AppError {
    fn from(err: DeliveryError) -> Self {
        AppError::DeliveryFailed(err.to_string())
    }
}

impl From<RateLimitError> for AppError {
    fn from(err: RateLimitError) -> Self {
        AppError::InternalError(err.to_string())
    }
}

#[derive(Debug, Display)]
pub enum DeliveryError {
    #[display("Email provider unreachable: {_0}")]
    Transport(String),

    #[display("Email provider rejected the message ({status}): {body}")]
    Rejected { status: u16, body: String },

    #[display("Email delivery is not configured: {_0}")]
    NotConfigured(String),
}

impl From<reqwest::Error> for DeliveryError {
    fn from(err: reqwest::Error) -> Self {
        DeliveryError::Transport(err.to_string())
    }
}

#[derive(Debug, Display)]
pub enum RateLimitError {
    #[display("Redis pool error: {_0}")]
    Pool(String),

    #[display("Redis operation failed: {_0}")]
    RedisOperation(String),

    #[display("Rate limit record is corrupt: {_0}")]
    CorruptRecord(String),

    #[display("Rate limit record for {_0} kept changing, giving up")]
    Contention(String),

    #[display("Rate limit window of {_0}s is out of range")]
    InvalidWindow(u64),
}

impl From<deadpool_redis::PoolError> for RateLimitError {
    fn from(err: deadpool_redis::PoolError) -> Self {
        RateLimitError::Pool(err.to_string())
    }
}

impl From<redis::RedisError> for RateLimitError {
    fn from(err: redis::RedisError) -> Self {
        RateLimitError::RedisOperation(err.to_string())
    }
}

impl From<serde_json::Error> for RateLimitError {
    fn from(err: serde_json::Error) -> Self {
        RateLimitError::CorruptRecord(err.to_string())
    }
}
