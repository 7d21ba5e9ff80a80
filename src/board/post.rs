//! Post model for miniboard.

use super::types::Category;

/// Post entity representing a board entry.
#[derive(Debug, Clone)]
pub struct Post {
    /// Unique post ID.
    pub id: i64,
    /// ID of the member who wrote the post.
    pub author_id: i64,
    /// Post title.
    pub title: String,
    /// Post body.
    pub content: String,
    /// Stored image reference (URL returned by the image store).
    pub image: String,
    /// Post category.
    pub category: Category,
    /// Post creation timestamp.
    pub created_at: String,
}

impl Post {
    /// Check if the given member wrote this post.
    pub fn is_written_by(&self, member_id: i64) -> bool {
        self.author_id == member_id
    }
}

/// List entry for a post, with its like count.
#[derive(Debug, Clone)]
pub struct PostSummary {
    /// Post ID.
    pub id: i64,
    /// Post title.
    pub title: String,
    /// Stored image reference.
    pub image: String,
    /// Post category.
    pub category: Category,
    /// Number of hearts on the post.
    pub heart_count: i64,
    /// Post creation timestamp.
    pub created_at: String,
}

/// Data for creating a new post.
#[derive(Debug, Clone)]
pub struct NewPost {
    /// ID of the member creating the post.
    pub author_id: i64,
    /// Post title.
    pub title: String,
    /// Post body.
    pub content: String,
    /// Stored image reference.
    pub image: String,
    /// Post category.
    pub category: Category,
}

impl NewPost {
    /// Create a new post with required fields.
    pub fn new(
        author_id: i64,
        title: impl Into<String>,
        content: impl Into<String>,
        image: impl Into<String>,
        category: Category,
    ) -> Self {
        Self {
            author_id,
            title: title.into(),
            content: content.into(),
            image: image.into(),
            category,
        }
    }
}

/// Data for updating an existing post.
#[derive(Debug, Clone, Default)]
pub struct PostUpdate {
    /// New title.
    pub title: Option<String>,
    /// New body.
    pub content: Option<String>,
    /// New category.
    pub category: Option<Category>,
}

impl PostUpdate {
    /// Create an empty update.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set new title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set new body.
    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Set new category.
    pub fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    /// Check if any fields are set.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none() && self.category.is_none()
    }
}
