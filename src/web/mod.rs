//! Web API module for miniboard.
//!
//! JSON over HTTP for members, posts, comments and hearts, plus static
//! serving of uploaded images.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod server;

pub use error::ApiError;
pub use router::create_router;
pub use server::WebServer;
