// src/handlers/error.rs
use std::fmt;
use warp::http::StatusCode;
use warp::reject::Reject;

use crate::services::error::CollarError;

#[derive(Debug, Clone)]
pub struct ApiError {
    pub status: StatusCode,
    pub kind: &'static str,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, kind: &'static str, message: impl Into<String>) -> Self {
        ApiError {
            status,
            kind,
            message: message.into(),
        }
    }
}

impl From<CollarError> for ApiError {
    fn from(e: CollarError) -> Self {
        let status = match e {
            CollarError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            CollarError::LookupNotFound { .. } => StatusCode::NOT_FOUND,
            CollarError::DataProvider(_) => StatusCode::BAD_GATEWAY,
        };
        ApiError::new(status, e.kind(), format!("Something went wrong: {}", e))
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ApiError {}
impl Reject for ApiError {}
