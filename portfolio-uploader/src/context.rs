//! Context for the upload service.

use std::env;

use crate::client::github::GithubClient;
use crate::client::github::DEFAULT_API_URL;
use crate::common::cors::CorsPolicy;
use crate::common::cors::DEFAULT_ALLOWED_ORIGINS;
use crate::common::error::Error;
use crate::common::messages::Language;
use crate::common::messages::MessageCatalog;

/// Settings read from the environment at startup.
///
/// The repository credentials are optional here on purpose. The service
/// must come up and answer CORS preflights even when it is not yet
/// configured to reach GitHub, so the check for complete credentials
/// happens per request in [`AppContext::github`].
#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    /// Token used to authenticate against the GitHub API.
    pub github_token: Option<String>,
    /// Owner of the repository that receives the portfolio file.
    pub repo_owner: Option<String>,
    /// Name of the repository that receives the portfolio file.
    pub repo_name: Option<String>,
    /// Base URL of the GitHub API.
    pub github_api_url: String,
    /// Comma separated allow-list of CORS origins.
    pub allowed_origins: String,
    /// Language used for response messages.
    pub language: Language,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            github_token: None,
            repo_owner: None,
            repo_name: None,
            github_api_url: DEFAULT_API_URL.to_string(),
            allowed_origins: DEFAULT_ALLOWED_ORIGINS.to_string(),
            language: Language::default(),
        }
    }
}

/// Implement settings loading.
impl Settings {
    /// Read settings from the environment.
    ///
    /// Unset or empty variables fall back to their defaults. Only a
    /// malformed `RESPONSE_LANGUAGE` makes this fail.
    pub fn from_env() -> Result<Self, Error> {
        let language = match env_nonempty("RESPONSE_LANGUAGE") {
            Some(value) => value.parse()?,
            None => Language::default(),
        };
        Ok(Settings {
            github_token: env_nonempty("GITHUB_TOKEN"),
            repo_owner: env_nonempty("GITHUB_REPO_OWNER"),
            repo_name: env_nonempty("GITHUB_REPO_NAME"),
            github_api_url: env_nonempty("GITHUB_API_URL")
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            allowed_origins: env_nonempty("ALLOWED_ORIGIN")
                .unwrap_or_else(|| DEFAULT_ALLOWED_ORIGINS.to_string()),
            language,
        })
    }
}

/// Read an environment variable, treating empty values as unset.
fn env_nonempty(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Shared state injected into every request handler.
#[derive(Clone, Debug)]
pub struct AppContext {
    /// Settings the context was built from.
    pub settings: Settings,
    /// CORS policy derived from the configured allow-list.
    pub cors: CorsPolicy,
    /// Message catalog for the configured language.
    pub messages: MessageCatalog,
    /// HTTP client shared across requests.
    pub http_client: reqwest::Client,
}

/// Implementation of Context.
impl AppContext {
    /// Build the context from the environment.
    pub fn from_env() -> Result<Self, Error> {
        Ok(AppContext::new(Settings::from_env()?))
    }

    /// Build the context from explicit settings.
    pub fn new(settings: Settings) -> Self {
        let cors = CorsPolicy::from_allow_list(&settings.allowed_origins);
        let messages = MessageCatalog::new(settings.language);
        AppContext {
            settings,
            cors,
            messages,
            http_client: reqwest::Client::new(),
        }
    }

    /// Build a GitHub client from the configured credentials.
    ///
    /// Reports every missing variable at once so a misconfigured
    /// deployment can be fixed in one pass.
    pub fn github(&self) -> Result<GithubClient, Error> {
        let settings = &self.settings;
        match (
            settings.github_token.as_deref(),
            settings.repo_owner.as_deref(),
            settings.repo_name.as_deref(),
        ) {
            (Some(token), Some(owner), Some(repo)) => Ok(GithubClient::new(
                self.http_client.clone(),
                &settings.github_api_url,
                token,
                owner,
                repo,
            )),
            (token, owner, repo) => {
                let mut missing = Vec::new();
                if token.is_none() {
                    missing.push("GITHUB_TOKEN");
                }
                if owner.is_none() {
                    missing.push("GITHUB_REPO_OWNER");
                }
                if repo.is_none() {
                    missing.push("GITHUB_REPO_NAME");
                }
                Err(Error::Configuration(format!(
                    "missing {}",
                    missing.join(", ")
                )))
            }
        }
    }
}
