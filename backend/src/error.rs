use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use common::responses::ErrorBody;

/// Failure of a service operation.
///
/// Caller mistakes map to 400/404. Storage and network failures map to 503.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("upload error: {0}")]
    Multipart(String),
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{0}")]
    Slack(String),
    #[error("background task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl ServiceError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ServiceError::BadRequest(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ServiceError::NotFound(message.into())
    }
}

// `MultipartError` carries a non-`Send` actix error, so only its message is kept.
impl From<actix_multipart::MultipartError> for ServiceError {
    fn from(e: actix_multipart::MultipartError) -> Self {
        ServiceError::Multipart(e.to_string())
    }
}

impl ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::BadRequest(_) | ServiceError::Csv(_) | ServiceError::Multipart(_) => {
                StatusCode::BAD_REQUEST
            }
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody {
            error: self.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caller_mistakes_are_not_service_failures() {
        assert_eq!(
            ServiceError::bad_request("Contact is required").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ServiceError::not_found("Template not found").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ServiceError::Slack("channel_not_found".into()).status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            ServiceError::from(rusqlite::Error::QueryReturnedNoRows).status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn errors_cross_threads() {
        fn assert_send<T: Send + 'static>() {}
        assert_send::<ServiceError>();
    }

    #[test]
    fn broken_uploads_are_caller_mistakes() {
        let err = ServiceError::Multipart("incomplete body".into());
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "upload error: incomplete body");
    }

    #[test]
    fn messages_are_passed_through() {
        assert_eq!(
            ServiceError::bad_request("No file uploaded").to_string(),
            "No file uploaded"
        );
    }
}
