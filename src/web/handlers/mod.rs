//! HTTP API handlers.

pub mod auth;
pub mod board;
pub mod comment;

pub use auth::*;
pub use board::*;
pub use comment::*;
