//! REST surface over the game lifecycle.

mod error;
mod routes;
mod state;

pub use error::{ApiError, ErrorBody, INVALID_PAYLOAD_MESSAGE};
pub use routes::{MoveRequest, router};
pub use state::AppState;
