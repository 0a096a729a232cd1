//! Handlers for the portfolio upload API.

use std::convert::Infallible;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use time::macros::format_description;
use time::OffsetDateTime;
use tracing::{debug, error, instrument};
use warp::http::StatusCode;
use warp::reply::{json, with_status, Reply};
use warp::Rejection;

use crate::api::models::{UploadPortfolioRequestBody, UploadPortfolioResponse};
use crate::common::error::{Error, ErrorResponse};
use crate::context::AppContext;

/// Repository path of the portfolio spreadsheet.
pub const PORTFOLIO_FILE_PATH: &str = "data/AIPEPortfolio_new.xlsx";

/// Branch that receives portfolio commits.
pub const TARGET_BRANCH: &str = "main";

/// Upload portfolio handler.
#[utoipa::path(
    post,
    operation_id = "uploadPortfolio",
    path = "/",
    tag = "portfolio",
    request_body = UploadPortfolioRequestBody,
    responses(
        (status = 200, description = "Portfolio committed successfully", body = UploadPortfolioResponse),
        (status = 400, description = "Invalid request body", body = ErrorResponse),
        (status = 405, description = "Method not allowed", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(context, body))]
pub async fn upload_portfolio(
    context: AppContext,
    body: UploadPortfolioRequestBody,
) -> impl warp::reply::Reply {
    debug!("In upload portfolio");
    // Internal handler so `?` can be used correctly while still returning a reply.
    async fn handler(
        context: AppContext,
        body: UploadPortfolioRequestBody,
    ) -> Result<impl warp::reply::Reply, Error> {
        // Validate the payload before touching the network. Encoders
        // that wrap lines leave whitespace in the payload, so drop it.
        let encoded = body.portfolio_data.ok_or(Error::MissingPortfolioData)?;
        let encoded: String = encoded
            .chars()
            .filter(|c| !c.is_ascii_whitespace())
            .collect();
        let content = STANDARD.decode(encoded)?;

        // Commit.
        let github = context.github()?;
        let message = commit_message(OffsetDateTime::now_utc())?;
        let action = github
            .commit_file(PORTFOLIO_FILE_PATH, TARGET_BRANCH, &content, &message)
            .await?;

        // Respond.
        let response = UploadPortfolioResponse {
            message: context
                .messages
                .success(action, PORTFOLIO_FILE_PATH, TARGET_BRANCH),
        };
        Ok(with_status(json(&response), StatusCode::OK))
    }

    // Handle and respond.
    let messages = context.messages;
    handler(context, body)
        .await
        .map_or_else(|error| error.into_response(&messages), Reply::into_response)
}

/// Preflight handler for CORS.
#[utoipa::path(
    options,
    operation_id = "uploadPortfolioPreflight",
    path = "/",
    tag = "portfolio",
    responses(
        (status = 204, description = "CORS preflight accepted")
    )
)]
pub async fn preflight_portfolio() -> impl warp::reply::Reply {
    with_status(warp::reply(), StatusCode::NO_CONTENT)
}

/// Central error handler for Warp rejections, converting them to appropriate HTTP responses.
pub async fn handle_rejection(err: Rejection) -> Result<impl Reply, Infallible> {
    if err.is_not_found() {
        let body = json(&ErrorResponse {
            error: "Not Found".to_string(),
        });
        return Ok(with_status(body, StatusCode::NOT_FOUND));
    }

    if let Some(e) = err.find::<warp::filters::body::BodyDeserializeError>() {
        let body = json(&ErrorResponse {
            error: format!("Invalid Body: {}", e),
        });
        return Ok(with_status(body, StatusCode::BAD_REQUEST));
    }

    if err.find::<warp::reject::UnsupportedMediaType>().is_some() {
        let body = json(&ErrorResponse {
            error: "Invalid Body: unsupported media type".to_string(),
        });
        return Ok(with_status(body, StatusCode::BAD_REQUEST));
    }

    if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        let body = json(&ErrorResponse {
            error: "Method Not Allowed".to_string(),
        });
        return Ok(with_status(body, StatusCode::METHOD_NOT_ALLOWED));
    }

    error!("Unhandled error: {:?}", err);
    let body = json(&ErrorResponse {
        error: format!("Internal Server Error: {err:?}"),
    });
    Ok(with_status(body, StatusCode::INTERNAL_SERVER_ERROR))
}

/// Commit message for a portfolio write, stamped to minute precision.
fn commit_message(now: OffsetDateTime) -> Result<String, Error> {
    let timestamp = now.format(format_description!("[year]-[month]-[day] [hour]:[minute]"))?;
    Ok(format!(
        "chore: Update portfolio data via web UI on {timestamp}"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn commit_message_embeds_minute_precision_timestamp() {
        let message = commit_message(datetime!(2024-07-16 09:05 UTC)).unwrap();
        assert_eq!(
            message,
            "chore: Update portfolio data via web UI on 2024-07-16 09:05"
        );
    }

    #[test]
    fn commit_message_zero_pads_components() {
        let message = commit_message(datetime!(2026-01-02 03:04 UTC)).unwrap();
        assert_eq!(
            message,
            "chore: Update portfolio data via web UI on 2026-01-02 03:04"
        );
    }
}
