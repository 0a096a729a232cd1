//! This module contains the API for the portfolio upload service.

/// Handlers.
pub mod handlers;
/// Models.
pub mod models;
/// Routes.
pub mod routes;
