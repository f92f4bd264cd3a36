//! Web layer for the triage server.
//!
//! Provides HTTP endpoints for nearby lookup, wait-time estimation,
//! ranking and end-to-end recommendations.

mod dto;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
pub use templates::*;
