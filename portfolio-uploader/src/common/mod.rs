//! Types shared across the API surface and the GitHub client.

/// CORS policy applied to every response.
pub mod cors;
/// Errors.
pub mod error;
/// Caller-facing message templates.
pub mod messages;

/// The write operation performed against the repository file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FileAction {
    /// The file did not exist and was created.
    Created,
    /// The file existed and was replaced.
    Updated,
}
