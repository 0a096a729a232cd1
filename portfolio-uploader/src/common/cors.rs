//! CORS policy applied to every reply the service produces.

use warp::http::header;
use warp::http::HeaderValue;
use warp::reply::Reply;

/// Origins allowed when `ALLOWED_ORIGIN` is not set.
pub const DEFAULT_ALLOWED_ORIGINS: &str =
    "https://digital-era.github.io,http://127.0.0.1:5500,http://localhost:5500";

/// The set of origins whose requests get `Access-Control-Allow-Origin`
/// echoed back.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CorsPolicy {
    allowed_origins: Vec<String>,
}

/// Policy implementation.
impl CorsPolicy {
    /// Parse a comma separated allow-list into a policy.
    ///
    /// Entries are trimmed and empty entries are dropped, so a single
    /// origin without commas works the same as a list.
    pub fn from_allow_list(allow_list: &str) -> Self {
        let allowed_origins = allow_list
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();
        CorsPolicy { allowed_origins }
    }

    /// Whether the given origin is on the allow-list.
    pub fn is_allowed(&self, origin: &str) -> bool {
        self.allowed_origins.iter().any(|allowed| allowed == origin)
    }

    /// Attach the CORS headers to a reply.
    ///
    /// The method and header grants are unconditional. The origin echo
    /// only happens for allow-listed origins, so disallowed callers get
    /// a response their browser refuses to hand to the page.
    pub fn decorate(&self, reply: impl Reply, origin: Option<&str>) -> warp::reply::Response {
        let mut response = reply.into_response();
        let headers = response.headers_mut();
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static("POST, OPTIONS"),
        );
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("Content-Type"),
        );
        if let Some(origin) = origin.filter(|origin| self.is_allowed(origin)) {
            if let Ok(value) = HeaderValue::from_str(origin) {
                headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, value);
            }
        }
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allow_list_parsing_trims_and_skips_empty_entries() {
        let policy = CorsPolicy::from_allow_list(" https://a.example , ,https://b.example,");
        assert!(policy.is_allowed("https://a.example"));
        assert!(policy.is_allowed("https://b.example"));
        assert!(!policy.is_allowed(""));
        assert!(!policy.is_allowed("https://c.example"));
    }

    #[test]
    fn default_allow_list_covers_local_development() {
        let policy = CorsPolicy::from_allow_list(DEFAULT_ALLOWED_ORIGINS);
        assert!(policy.is_allowed("https://digital-era.github.io"));
        assert!(policy.is_allowed("http://localhost:5500"));
        assert!(!policy.is_allowed("https://evil.example"));
    }

    #[test]
    fn decorate_echoes_known_origin() {
        let policy = CorsPolicy::from_allow_list("https://a.example");
        let response = policy.decorate(warp::reply(), Some("https://a.example"));
        let headers = response.headers();
        assert_eq!(
            headers.get("access-control-allow-origin").unwrap(),
            "https://a.example"
        );
        assert_eq!(
            headers.get("access-control-allow-methods").unwrap(),
            "POST, OPTIONS"
        );
        assert_eq!(
            headers.get("access-control-allow-headers").unwrap(),
            "Content-Type"
        );
    }

    #[test]
    fn decorate_withholds_echo_from_unknown_origin() {
        let policy = CorsPolicy::from_allow_list("https://a.example");
        let response = policy.decorate(warp::reply(), Some("https://evil.example"));
        let headers = response.headers();
        assert!(headers.get("access-control-allow-origin").is_none());
        assert_eq!(
            headers.get("access-control-allow-methods").unwrap(),
            "POST, OPTIONS"
        );
    }

    #[test]
    fn decorate_without_origin_sets_no_echo() {
        let policy = CorsPolicy::from_allow_list("https://a.example");
        let response = policy.decorate(warp::reply(), None);
        assert!(response
            .headers()
            .get("access-control-allow-origin")
            .is_none());
    }
}
