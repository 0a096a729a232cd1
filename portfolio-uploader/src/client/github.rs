//! Client for the GitHub repository contents API.
//!
//! Writes go through the two-step flow the contents API requires: look
//! the file up to learn whether it exists and, if it does, grab the
//! blob version token, then PUT the new contents with or without that
//! token.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use reqwest::header;
use reqwest::Response;
use reqwest::StatusCode;
use serde::Deserialize;
use serde::Serialize;
use tracing::debug;

use crate::common::error::Error;
use crate::common::FileAction;

/// Base URL of the public GitHub API.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Media type GitHub documents for its REST API.
const GITHUB_ACCEPT: &str = "application/vnd.github+json";

/// The GitHub API rejects requests that carry no User-Agent.
const USER_AGENT: &str = "portfolio-uploader";

/// Outcome of looking up a file in the repository.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RemoteFile {
    /// The file exists on the branch.
    Found {
        /// Version token of the current blob, required to replace it.
        sha: String,
    },
    /// The file does not exist on the branch.
    Absent,
}

/// Client bound to one repository.
#[derive(Clone, Debug)]
pub struct GithubClient {
    api_url: String,
    token: String,
    owner: String,
    repo: String,
    client: reqwest::Client,
}

/// The subset of the contents response the client needs.
#[derive(Debug, Deserialize)]
struct GetContentsResponse {
    sha: String,
}

/// Body of a contents PUT request.
#[derive(Debug, Serialize)]
struct PutContentsRequest<'a> {
    message: &'a str,
    content: String,
    branch: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    sha: Option<&'a str>,
}

/// The error envelope GitHub returns for failed requests.
#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    message: String,
}

/// Client implementation.
impl GithubClient {
    /// Create a client for the repository at `owner/repo`.
    pub fn new(
        client: reqwest::Client,
        api_url: &str,
        token: &str,
        owner: &str,
        repo: &str,
    ) -> Self {
        GithubClient {
            api_url: api_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
            owner: owner.to_string(),
            repo: repo.to_string(),
            client,
        }
    }

    /// Look up a file on the given branch.
    pub async fn get_file(&self, path: &str, branch: &str) -> Result<RemoteFile, Error> {
        let response = self
            .client
            .get(self.contents_url(path))
            .query(&[("ref", branch)])
            .header(header::AUTHORIZATION, format!("Bearer {}", self.token))
            .header(header::ACCEPT, GITHUB_ACCEPT)
            .header(header::USER_AGENT, USER_AGENT)
            .send()
            .await?;

        match response.status() {
            StatusCode::OK => {
                let contents: GetContentsResponse = response.json().await?;
                Ok(RemoteFile::Found { sha: contents.sha })
            }
            StatusCode::NOT_FOUND => Ok(RemoteFile::Absent),
            _ => Err(api_error(response).await),
        }
    }

    /// Create a file that does not exist yet on the branch.
    pub async fn create_file(
        &self,
        path: &str,
        branch: &str,
        content: &[u8],
        message: &str,
    ) -> Result<(), Error> {
        debug!(path, branch, "creating repository file");
        let body = PutContentsRequest {
            message,
            content: STANDARD.encode(content),
            branch,
            sha: None,
        };
        self.put_contents(path, &body).await
    }

    /// Replace a file, identified by the version token from
    /// [`GithubClient::get_file`].
    pub async fn update_file(
        &self,
        path: &str,
        branch: &str,
        content: &[u8],
        message: &str,
        sha: &str,
    ) -> Result<(), Error> {
        debug!(path, branch, sha, "updating repository file");
        let body = PutContentsRequest {
            message,
            content: STANDARD.encode(content),
            branch,
            sha: Some(sha),
        };
        self.put_contents(path, &body).await
    }

    /// Write a file on the branch, creating or replacing it as needed.
    pub async fn commit_file(
        &self,
        path: &str,
        branch: &str,
        content: &[u8],
        message: &str,
    ) -> Result<FileAction, Error> {
        match self.get_file(path, branch).await? {
            RemoteFile::Found { sha } => {
                self.update_file(path, branch, content, message, &sha)
                    .await?;
                Ok(FileAction::Updated)
            }
            RemoteFile::Absent => {
                self.create_file(path, branch, content, message).await?;
                Ok(FileAction::Created)
            }
        }
    }

    async fn put_contents(&self, path: &str, body: &PutContentsRequest<'_>) -> Result<(), Error> {
        let response = self
            .client
            .put(self.contents_url(path))
            .header(header::AUTHORIZATION, format!("Bearer {}", self.token))
            .header(header::ACCEPT, GITHUB_ACCEPT)
            .header(header::USER_AGENT, USER_AGENT)
            .json(body)
            .send()
            .await?;

        match response.status() {
            StatusCode::OK | StatusCode::CREATED => Ok(()),
            _ => Err(api_error(response).await),
        }
    }

    fn contents_url(&self, path: &str) -> String {
        format!(
            "{}/repos/{}/{}/contents/{}",
            self.api_url, self.owner, self.repo, path
        )
    }
}

/// Turn a failed response into an error, preferring the message GitHub
/// put in the body over the raw text.
async fn api_error(response: Response) -> Error {
    let status = response.status();
    let detail = match response.text().await {
        Ok(text) => serde_json::from_str::<ApiErrorResponse>(&text)
            .map(|body| body.message)
            .unwrap_or(text),
        Err(error) => error.to_string(),
    };
    Error::GithubApi(status, detail)
}
