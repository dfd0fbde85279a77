//! Recall HTTP API Service.
//!
//! This crate provides the HTTP API for the recall memory trainer:
//!
//! - Account registration, login and token verification
//! - Recording practice sessions (best score of the day)
//! - Daily, monthly, heatmap and recent-days score views
//!
//! # Authentication
//!
//! Score endpoints take a session token issued by `/api/register` or
//! `/api/login` as `Authorization: Bearer <token>`. Every score read and
//! write is scoped to the account the token resolves to.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
// Allow some pedantic lints that are noisy for Axum handler functions
#![allow(clippy::missing_errors_doc)] // Axum handlers all return Result
#![allow(clippy::unused_async)] // Health handlers need async for routing

pub mod auth;
pub mod config;
pub mod crypto;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod routes;
pub mod state;

pub use config::{KvBackendKind, ServiceConfig};
pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;
