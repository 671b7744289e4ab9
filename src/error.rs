use thiserror::Error;
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(String),

    #[error("Invalid alert area: {0}")]
    InvalidArea(String),

    #[error("Invalid geohash: {0}")]
    InvalidGeohash(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl EngineError {
    fn code(&self) -> &'static str {
        match self {
            EngineError::InvalidCoordinate(_) => "invalid_coordinate",
            EngineError::InvalidArea(_) => "invalid_area",
            EngineError::InvalidGeohash(_) => "invalid_geohash",
            EngineError::Config(_) => "config_error",
        }
    }
}

impl ResponseError for EngineError {
    fn error_response(&self) -> HttpResponse {
        match self {
            EngineError::InvalidCoordinate(msg)
            | EngineError::InvalidArea(msg)
            | EngineError::InvalidGeohash(msg) => {
                HttpResponse::BadRequest().json(json!({
                    "error": self.code(),
                    "message": msg
                }))
            }
            EngineError::Config(msg) => {
                log::error!("Configuration error: {}", msg);
                HttpResponse::InternalServerError().json(json!({
                    "error": self.code(),
                    "message": "An internal server error occurred"
                }))
            }
        }
    }
}
