//! Board module for miniboard.
//!
//! This module provides the post board:
//! - Posts filed under a closed set of categories, each with one image
//! - Comments and hearts (likes) attached to posts
//! - A service enforcing existence and ownership rules

mod comment;
mod comment_repository;
mod heart_repository;
mod post;
mod post_repository;
mod service;
mod types;

pub use comment::{Comment, CommentView, NewComment};
pub use comment_repository::CommentRepository;
pub use heart_repository::HeartRepository;
pub use post::{NewPost, Post, PostSummary, PostUpdate};
pub use post_repository::PostRepository;
pub use service::{
    BoardService, HeartToggle, ImageUpload, PaginatedResult, Pagination, PostDetail,
    MAX_BODY_LENGTH, MAX_COMMENT_LENGTH, MAX_TITLE_LENGTH, RECENT_POST_LIMIT,
};
pub use types::Category;
