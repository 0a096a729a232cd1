//! Portfolio upload local server binary.

use std::net::ToSocketAddrs;

use clap::Parser;
use clap::ValueEnum;
use portfolio_uploader::context::AppContext;
use tracing::error;
use tracing::info;
use warp::Filter;

use portfolio_uploader::api;
use portfolio_uploader::logging;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogOutputFormat {
    Json,
    Pretty,
}

/// Command line arguments for the local server.
#[derive(Debug, Parser)]
#[clap(name = "Portfolio Uploader")]
struct ServerArgs {
    /// Host the server binds to.
    #[clap(long, default_value = "127.0.0.1")]
    host: String,

    /// Port the server listens on.
    #[clap(long, env = "PORT", default_value_t = 3030)]
    port: u16,

    #[clap(short = 'o', long = "output-format", default_value = "pretty")]
    output_format: Option<LogOutputFormat>,
}

#[tokio::main]
async fn main() {
    // Parse the command line arguments.
    let args = ServerArgs::parse();

    // Configure the binary's stdout/err output based on the provided output format.
    let pretty = matches!(args.output_format, Some(LogOutputFormat::Pretty));
    logging::setup_logging("info,portfolio_uploader=debug", pretty);

    let context: AppContext = AppContext::from_env().unwrap_or_else(|e| panic!("{e}"));

    // Print configuration. The token stays out of the logs.
    info!(
        repo_owner = ?context.settings.repo_owner,
        repo_name = ?context.settings.repo_name,
        api_url = %context.settings.github_api_url,
        language = ?context.settings.language,
        "Portfolio uploader context setup for the local server."
    );

    let routes = api::routes::routes(context).with(warp::log("api"));

    let addr_str = format!("{}:{}", args.host, args.port);
    info!("Server will run locally on {}", addr_str);
    let addr = match addr_str.to_socket_addrs() {
        Ok(mut addrs) => addrs.next().expect("No addresses found"),
        Err(e) => {
            error!("Failed to resolve address: {}", e);
            return;
        }
    };

    warp::serve(routes).run(addr).await;
}
