//! Portfolio upload API entrypoint for AWS Lambda.

use portfolio_uploader::context::AppContext;
use tracing::info;
use warp::Filter;

use portfolio_uploader::api;
use portfolio_uploader::logging;

#[tokio::main]
async fn main() {
    logging::setup_logging("info,portfolio_uploader=debug", false);

    let context: AppContext = AppContext::from_env().unwrap_or_else(|e| panic!("{e}"));

    // Print configuration. The token stays out of the logs.
    info!(
        repo_owner = ?context.settings.repo_owner,
        repo_name = ?context.settings.repo_name,
        api_url = %context.settings.github_api_url,
        language = ?context.settings.language,
        "Portfolio uploader context setup for Lambda."
    );

    // Make routes.
    let routes = api::routes::routes(context).with(warp::log("api"));

    // Create warp service.
    let warp_service = warp::service(routes);

    warp_lambda::run(warp_service)
        .await
        .expect("An error occurred");
}
