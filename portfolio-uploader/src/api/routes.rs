//! Route definitions for the portfolio upload endpoint.

use std::convert::Infallible;

use warp::http::header::ORIGIN;
use warp::http::HeaderMap;
use warp::Filter;

use crate::context::AppContext;

use super::handlers;

/// The full route tree: the upload endpoint and its CORS preflight,
/// with rejections turned into JSON replies and CORS headers attached
/// to every response on the way out.
pub fn routes(
    context: AppContext,
) -> impl Filter<Extract = (impl warp::Reply,), Error = Infallible> + Clone {
    let cors = context.cors.clone();
    origin_header()
        .and(
            upload_portfolio(context)
                .or(preflight_portfolio())
                .recover(handlers::handle_rejection),
        )
        .map(move |origin: Option<String>, reply| cors.decorate(reply, origin.as_deref()))
}

/// Upload portfolio endpoint.
fn upload_portfolio(
    context: AppContext,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    warp::path::end()
        .and(warp::post())
        .map(move || context.clone())
        .and(warp::body::json())
        .then(handlers::upload_portfolio)
}

/// CORS preflight endpoint.
fn preflight_portfolio() -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone
{
    warp::path::end()
        .and(warp::options())
        .then(handlers::preflight_portfolio)
}

/// The caller's origin header, if any, extracted without ever rejecting
/// the request. A value that is not visible ASCII counts as absent.
fn origin_header() -> impl Filter<Extract = (Option<String>,), Error = Infallible> + Copy {
    warp::header::headers_cloned().map(|headers: HeaderMap| {
        headers
            .get(ORIGIN)
            .and_then(|value| value.to_str().ok())
            .map(String::from)
    })
}
