//! Web layer for the travel mode recommender.
//!
//! Provides HTTP endpoints for recommendations, location suggestions and
//! chat, with HTML fragments for the browser front end.

mod dto;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::create_router;
pub use state::AppState;
pub use templates::*;
