use actix_web::http::StatusCode;
use actix_web::http::header::ContentType;
use actix_web::{error, HttpResponse};
use serde::Serialize;
use thiserror::Error;

pub mod bookmark_error;
pub mod popup_error;
pub mod router_error;
pub mod scroll_error;

#[derive(Error, Debug, Serialize, Clone, PartialEq)]
pub enum UrlError {
    #[error("invalid url: {0}")]
    InvalidUrl(String),
}

impl From<url::ParseError> for UrlError {
    fn from(value: url::ParseError) -> Self {
        Self::InvalidUrl(value.to_string())
    }
}

impl error::ResponseError for UrlError {
    fn status_code(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::json())
            .json(self)
    }
}

#[derive(Error, Debug, Serialize, Clone, PartialEq)]
pub enum StorageError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("serialization failed: {0}")]
    Serialization(String),
}

impl From<std::io::Error> for StorageError {
    fn from(value: std::io::Error) -> Self {
        Self::Unavailable(value.to_string())
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialization(value.to_string())
    }
}

impl error::ResponseError for StorageError {
    fn status_code(&self) -> StatusCode {
        StatusCode::SERVICE_UNAVAILABLE
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::json())
            .json(self)
    }
}

/// Failures reported by the browser tab capabilities (query, injection, messaging).
#[derive(Error, Debug, Serialize, Clone, PartialEq)]
pub enum TabError {
    #[error("tab access denied: {0}")]
    Denied(String),
    #[error("tab unreachable: {0}")]
    Unreachable(String),
    #[error("no active tab found")]
    NoActiveTab,
    #[error("unexpected tab response: {0}")]
    Protocol(String),
}

impl From<reqwest::Error> for TabError {
    fn from(value: reqwest::Error) -> Self {
        if value.is_decode() {
            Self::Protocol(value.to_string())
        } else {
            Self::Unreachable(value.to_string())
        }
    }
}

impl From<serde_json::Error> for TabError {
    fn from(value: serde_json::Error) -> Self {
        Self::Protocol(value.to_string())
    }
}
