//! Top-level error type for the upload service.

use reqwest::StatusCode;
use serde::Deserialize;
use serde::Serialize;
use utoipa::ToSchema;
use warp::reject::Reject;
use warp::reply::json;
use warp::reply::with_status;
use warp::reply::Reply;

use crate::common::messages::MessageCatalog;

/// Errors surfaced by the upload handler and the GitHub client.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The request body parsed as JSON but carries no `portfolioData` field.
    #[error("Missing 'portfolioData' in request body")]
    MissingPortfolioData,

    /// The `portfolioData` field is not valid base64.
    #[error("Invalid base64 in 'portfolioData': {0}")]
    InvalidBase64(#[from] base64::DecodeError),

    /// Required server-side configuration is missing or malformed.
    #[error("Server configuration error: {0}")]
    Configuration(String),

    /// GitHub answered with a status the client does not handle.
    #[error("GitHub API request failed with status {0}: {1}")]
    GithubApi(StatusCode, String),

    /// The request to GitHub never produced a response.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The commit timestamp could not be formatted.
    #[error("Timestamp formatting error: {0}")]
    TimestampFormat(#[from] time::error::Format),
}

/// Error implementation.
impl Error {
    /// Status code the caller receives for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::MissingPortfolioData => StatusCode::BAD_REQUEST,
            Error::InvalidBase64(_) => StatusCode::BAD_REQUEST,
            Error::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::GithubApi(_, _) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::Network(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::TimestampFormat(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message body the caller receives, rendered through the catalog.
    pub fn error_message(&self, messages: &MessageCatalog) -> String {
        match self {
            Error::MissingPortfolioData => messages.missing_portfolio_data().to_string(),
            Error::InvalidBase64(detail) => messages.invalid_base64(detail),
            Error::Configuration(detail) => messages.configuration_error(detail),
            Error::GithubApi(_, _) | Error::Network(_) | Error::TimestampFormat(_) => {
                messages.unexpected_error(&self.to_string())
            }
        }
    }

    /// Convert the error into a JSON reply with the right status code.
    pub fn into_response(self, messages: &MessageCatalog) -> warp::reply::Response {
        let body = ErrorResponse {
            error: self.error_message(messages),
        };
        with_status(json(&body), self.status_code()).into_response()
    }
}

/// Structure representing an error response
/// This is used to serialize error messages in HTTP responses
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub(crate) error: String,
}

/// Implement reject for error.
impl Reject for Error {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::messages::Language;

    #[test]
    fn client_errors_map_to_bad_request() {
        assert_eq!(
            Error::MissingPortfolioData.status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn remote_errors_map_to_internal_server_error() {
        let error = Error::GithubApi(StatusCode::FORBIDDEN, "rate limited".to_string());
        assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn remote_errors_render_as_unexpected() {
        let messages = MessageCatalog::new(Language::English);
        let error = Error::GithubApi(StatusCode::FORBIDDEN, "rate limited".to_string());
        assert_eq!(
            error.error_message(&messages),
            "An unexpected server error occurred: \
             GitHub API request failed with status 403 Forbidden: rate limited"
        );
    }

    #[test]
    fn missing_field_renders_verbatim() {
        let messages = MessageCatalog::new(Language::English);
        assert_eq!(
            Error::MissingPortfolioData.error_message(&messages),
            "Missing 'portfolioData' in request body"
        );
    }
}
