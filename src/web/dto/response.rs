//! Response DTOs for the HTTP API.

use serde::Serialize;

use crate::board::{Category, Comment, CommentView, HeartToggle, PostDetail, PostSummary};
use crate::db::Member;

// ============================================================================
// Generic Response Wrappers
// ============================================================================

/// Success envelope: `{"success": true, "data": ..., "error": null}`.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    /// Always true.
    pub success: bool,
    /// Response data.
    pub data: T,
    /// Always null.
    pub error: Option<()>,
}

impl<T: Serialize> ApiResponse<T> {
    /// Create a new API response.
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
            error: None,
        }
    }
}

/// Paginated success envelope.
#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T: Serialize> {
    /// Always true.
    pub success: bool,
    /// Response data.
    pub data: Vec<T>,
    /// Always null.
    pub error: Option<()>,
    /// Pagination metadata.
    pub meta: PaginationMeta,
}

impl<T: Serialize> PaginatedResponse<T> {
    /// Create a new paginated response.
    pub fn new(data: Vec<T>, page: u32, per_page: u32, total: u64) -> Self {
        Self {
            success: true,
            data,
            error: None,
            meta: PaginationMeta {
                page,
                per_page,
                total,
            },
        }
    }
}

/// Pagination metadata.
#[derive(Debug, Serialize)]
pub struct PaginationMeta {
    /// Current page number.
    pub page: u32,
    /// Items per page.
    pub per_page: u32,
    /// Total number of items.
    pub total: u64,
}

/// Plain message payload.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

// ============================================================================
// Member DTOs
// ============================================================================

/// Member information in responses.
#[derive(Debug, Serialize)]
pub struct MemberResponse {
    pub id: i64,
    pub username: String,
    pub name: String,
    pub image: Option<String>,
    pub created_at: String,
}

impl From<Member> for MemberResponse {
    fn from(m: Member) -> Self {
        Self {
            id: m.id,
            username: m.username,
            name: m.name,
            image: m.image,
            created_at: m.created_at,
        }
    }
}

/// Login response.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    /// Access token (JWT).
    pub access_token: String,
    /// Always "Bearer".
    pub token_type: &'static str,
    /// Access token expiry in seconds.
    pub expires_in: u64,
    /// The logged-in member.
    pub member: MemberResponse,
}

// ============================================================================
// Board DTOs
// ============================================================================

/// Post list entry.
#[derive(Debug, Serialize)]
pub struct PostSummaryResponse {
    pub id: i64,
    pub title: String,
    pub image: String,
    pub category: Category,
    pub heart_count: i64,
    pub created_at: String,
}

impl From<PostSummary> for PostSummaryResponse {
    fn from(p: PostSummary) -> Self {
        Self {
            id: p.id,
            title: p.title,
            image: p.image,
            category: p.category,
            heart_count: p.heart_count,
            created_at: p.created_at,
        }
    }
}

/// Comment as shown under a post.
#[derive(Debug, Serialize)]
pub struct CommentResponse {
    pub id: i64,
    /// Writer display name.
    pub writer: String,
    pub writer_image: Option<String>,
    pub content: String,
    pub created_at: String,
}

impl From<CommentView> for CommentResponse {
    fn from(c: CommentView) -> Self {
        Self {
            id: c.id,
            writer: c.writer,
            writer_image: c.writer_image,
            content: c.content,
            created_at: c.created_at,
        }
    }
}

impl CommentResponse {
    /// Response for a comment just written by `writer`.
    pub fn written_by(comment: Comment, writer: &Member) -> Self {
        Self {
            id: comment.id,
            writer: writer.name.clone(),
            writer_image: writer.image.clone(),
            content: comment.content,
            created_at: comment.created_at,
        }
    }
}

/// Full post view.
#[derive(Debug, Serialize)]
pub struct PostDetailResponse {
    pub id: i64,
    pub title: String,
    pub image: String,
    pub content: String,
    pub category: Category,
    /// Author display name.
    pub writer: String,
    pub created_at: String,
    pub heart_count: i64,
    /// Viewer display name, null for anonymous viewers.
    pub member_name: Option<String>,
    /// Whether the viewer liked the post.
    pub heart: bool,
    /// Newest first.
    pub comments: Vec<CommentResponse>,
}

impl From<PostDetail> for PostDetailResponse {
    fn from(d: PostDetail) -> Self {
        Self {
            id: d.id,
            title: d.title,
            image: d.image,
            content: d.content,
            category: d.category,
            writer: d.writer,
            created_at: d.created_at,
            heart_count: d.heart_count,
            member_name: d.member_name,
            heart: d.heart,
            comments: d.comments.into_iter().map(CommentResponse::from).collect(),
        }
    }
}

/// Post creation response.
#[derive(Debug, Serialize)]
pub struct PostCreatedResponse {
    pub id: i64,
    pub message: String,
}

/// Heart toggle response.
#[derive(Debug, Serialize)]
pub struct HeartResponse {
    pub heart: bool,
    pub heart_count: i64,
}

impl From<HeartToggle> for HeartResponse {
    fn from(t: HeartToggle) -> Self {
        Self {
            heart: t.heart,
            heart_count: t.heart_count,
        }
    }
}
