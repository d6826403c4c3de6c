use actix_web::http::StatusCode;
use actix_web::http::header::ContentType;
use actix_web::HttpResponse;
use serde::Serialize;
use thiserror::Error;
use crate::error::{StorageError, UrlError};

#[derive(Error, Debug, Serialize, Clone, PartialEq)]
pub enum BookmarkError {
    #[error("url error: {0}")]
    InvalidUrl(UrlError),
    #[error("invalid scroll position: {0}")]
    InvalidPosition(String),
    #[error("storage error: {0}")]
    Storage(StorageError),
}

impl From<UrlError> for BookmarkError {
    fn from(value: UrlError) -> Self {
        Self::InvalidUrl(value)
    }
}

impl From<StorageError> for BookmarkError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

impl actix_web::ResponseError for BookmarkError {
    fn status_code(&self) -> StatusCode {
        match self {
            BookmarkError::InvalidUrl(_) => StatusCode::BAD_REQUEST,
            BookmarkError::InvalidPosition(_) => StatusCode::BAD_REQUEST,
            BookmarkError::Storage(v) => v.status_code(),
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::json())
            .json(self)
    }
}
