//! Web layer for the route optimizer.
//!
//! Provides JSON endpoints for route optimization and catalog management.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
