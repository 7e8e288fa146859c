use crate::database::StoreError;
use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use core::fmt;
use log::error;
use std::error::Error;

#[derive(Debug, Eq, PartialEq)]
pub struct HttpError(StatusCode);

// HttpError essentially wraps a StatusCode
impl HttpError {
    pub fn new(status_code: StatusCode) -> Self {
        Self(status_code)
    }

    fn reason(&self) -> &'static str {
        self.0.canonical_reason().unwrap_or("unknown")
    }
}

impl From<StoreError> for HttpError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(_) => Self::new(StatusCode::NOT_FOUND),
            StoreError::Validation(_) => Self::new(StatusCode::BAD_REQUEST),
            StoreError::Database(_) => {
                error!("{err}");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR)
            }
        }
    }
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}: {}", self.0.as_str(), self.reason())
    }
}

impl Error for HttpError {}

impl ResponseError for HttpError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.0).body(self.reason())
    }

    fn status_code(&self) -> StatusCode {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_store_error() {
        assert_eq!(
            HttpError::from(StoreError::NotFound(1)),
            HttpError::new(StatusCode::NOT_FOUND)
        );
        assert_eq!(
            HttpError::from(StoreError::Database(diesel::result::Error::NotFound)),
            HttpError::new(StatusCode::INTERNAL_SERVER_ERROR)
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(
            HttpError::new(StatusCode::NOT_FOUND).to_string(),
            "404: Not Found"
        );
    }
}
