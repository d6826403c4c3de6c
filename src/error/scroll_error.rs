use actix_web::http::StatusCode;
use actix_web::http::header::ContentType;
use actix_web::HttpResponse;
use serde::Serialize;
use thiserror::Error;
use crate::error::TabError;

#[derive(Error, Debug, Serialize, Clone, PartialEq)]
pub enum ScrollError {
    #[error("injection denied: {0}")]
    InjectionDenied(String),
    #[error("scroll injection failed: {0}")]
    ScrollInjectionFailed(String),
    #[error("page agent unavailable: {0}")]
    AgentUnavailable(String),
    #[error("timed out after [{0}] ms")]
    Timeout(u64),
    #[error("scroll target unreachable: {0}")]
    ScrollUnreachable(String),
}

impl ScrollError {
    /// Maps a tab failure raised while injecting code into the page.
    pub fn from_injection(value: TabError) -> Self {
        match value {
            TabError::Denied(message) => Self::InjectionDenied(message),
            other => Self::ScrollInjectionFailed(other.to_string()),
        }
    }

    /// Maps a tab failure raised while messaging the resident page agent.
    pub fn from_agent(value: TabError) -> Self {
        Self::AgentUnavailable(value.to_string())
    }
}

impl actix_web::ResponseError for ScrollError {
    fn status_code(&self) -> StatusCode {
        match self {
            ScrollError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            ScrollError::InjectionDenied(_) => StatusCode::FORBIDDEN,
            _ => StatusCode::BAD_GATEWAY,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::json())
            .json(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_denied_injection_maps_to_injection_denied() {
        let error = ScrollError::from_injection(TabError::Denied("chrome://settings".to_string()));
        assert_eq!(error, ScrollError::InjectionDenied("chrome://settings".to_string()));
    }

    #[test]
    fn test_unreachable_injection_maps_to_injection_failed() {
        let error = ScrollError::from_injection(TabError::Unreachable("tab closed".to_string()));
        assert!(matches!(error, ScrollError::ScrollInjectionFailed(_)));
    }
}
