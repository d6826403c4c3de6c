use actix_web::http::StatusCode;
use actix_web::http::header::ContentType;
use actix_web::HttpResponse;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug, Serialize, Clone, PartialEq)]
pub enum RouterError {
    #[error("no resident page agent attached for command: {0}")]
    AgentNotAttached(String),
    #[error("no tab given or known for command: {0}")]
    MissingTab(String),
    #[error("no url given or known for command: {0}")]
    MissingUrl(String),
}

impl actix_web::ResponseError for RouterError {
    fn status_code(&self) -> StatusCode {
        match self {
            RouterError::AgentNotAttached(_) => StatusCode::NOT_IMPLEMENTED,
            _ => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::json())
            .json(self)
    }
}
