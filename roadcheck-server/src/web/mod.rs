//! HTTP API over [`crate::facts::RoadFacts`].
//!
//! Every endpoint is a GET with query parameters and a JSON response.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
