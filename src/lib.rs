//! miniboard - a small category board service.
//!
//! Members sign up and log in with JWT bearer tokens, write posts with an
//! image in one of a fixed set of categories, comment on posts and toggle
//! hearts.

pub mod auth;
pub mod board;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod storage;
pub mod web;

pub use board::{BoardService, Category};
pub use config::Config;
pub use db::{Database, Member, MemberRepository, NewMember};
pub use error::{BoardError, Result};
pub use storage::{ImageStore, LocalImageStore};
