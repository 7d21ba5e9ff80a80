//! Comment model for miniboard.

/// Comment entity attached to a post.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Comment {
    /// Unique comment ID.
    pub id: i64,
    /// ID of the post the comment belongs to.
    pub post_id: i64,
    /// ID of the member who wrote the comment.
    pub author_id: i64,
    /// Comment body.
    pub content: String,
    /// Comment creation timestamp.
    pub created_at: String,
}

impl Comment {
    /// Check if the given member wrote this comment.
    pub fn is_written_by(&self, member_id: i64) -> bool {
        self.author_id == member_id
    }
}

/// Data for creating a new comment.
#[derive(Debug, Clone)]
pub struct NewComment {
    pub post_id: i64,
    pub author_id: i64,
    pub content: String,
}

impl NewComment {
    /// Create a new comment.
    pub fn new(post_id: i64, author_id: i64, content: impl Into<String>) -> Self {
        Self {
            post_id,
            author_id,
            content: content.into(),
        }
    }
}

/// Comment joined with its writer, as shown under a post.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CommentView {
    pub id: i64,
    pub content: String,
    pub created_at: String,
    /// Display name of the writer.
    pub writer: String,
    /// Profile image of the writer.
    pub writer_image: Option<String>,
}
