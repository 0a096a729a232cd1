//! Clients for the remote services the upload handler talks to.

/// GitHub repository contents client.
pub mod github;
