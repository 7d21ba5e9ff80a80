//! Request DTOs for the HTTP API.

use serde::Deserialize;
use validator::Validate;

use super::validation::{not_empty_trimmed, single_line_text};
use crate::board::{Category, PostUpdate};

/// Member signup request.
#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    /// Username.
    #[validate(length(min = 3, max = 20, message = "Username must be 3-20 characters"))]
    pub username: String,
    /// Password.
    #[validate(length(min = 8, max = 128, message = "Password must be 8-128 characters"))]
    pub password: String,
    /// Display name.
    #[validate(
        custom(function = "single_line_text"),
        length(max = 20, message = "Name must be at most 20 characters")
    )]
    pub name: String,
    /// Profile image URL (optional).
    #[serde(default)]
    pub image: Option<String>,
}

/// Login request.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// Username.
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Post update request.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdatePostRequest {
    /// New title.
    #[validate(
        custom(function = "single_line_text"),
        length(max = 50, message = "Title must be at most 50 characters")
    )]
    pub title: String,
    /// New body.
    #[validate(
        custom(function = "not_empty_trimmed"),
        length(max = 10000, message = "Content must be at most 10000 characters")
    )]
    pub content: String,
    /// New category.
    pub category: Category,
}

impl From<UpdatePostRequest> for PostUpdate {
    fn from(req: UpdatePostRequest) -> Self {
        PostUpdate::new()
            .title(req.title)
            .content(req.content)
            .category(req.category)
    }
}

/// Comment creation request.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCommentRequest {
    /// Comment body.
    #[validate(
        custom(function = "not_empty_trimmed"),
        length(max = 1000, message = "Comment must be at most 1000 characters")
    )]
    pub content: String,
}

/// `?category=` query.
#[derive(Debug, Deserialize)]
pub struct CategoryQuery {
    /// Category to filter by.
    pub category: Category,
}

/// `?category=&page=&per_page=` query.
#[derive(Debug, Deserialize)]
pub struct CategoryPageQuery {
    /// Category to filter by.
    pub category: Category,
    /// 1-based page number; all posts when absent.
    pub page: Option<u32>,
    /// Items per page.
    pub per_page: Option<u32>,
}

impl CategoryPageQuery {
    /// Default page size.
    pub const DEFAULT_PER_PAGE: u32 = 20;
    /// Largest accepted page size.
    pub const MAX_PER_PAGE: u32 = 100;

    /// Resolved (page, per_page), or None when the whole category is wanted.
    pub fn page(&self) -> Option<(u32, u32)> {
        if self.page.is_none() && self.per_page.is_none() {
            return None;
        }
        let page = self.page.unwrap_or(1).max(1);
        let per_page = self
            .per_page
            .unwrap_or(Self::DEFAULT_PER_PAGE)
            .clamp(1, Self::MAX_PER_PAGE);
        Some((page, per_page))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{MAX_BODY_LENGTH, MAX_COMMENT_LENGTH, MAX_TITLE_LENGTH};

    fn page_query(page: Option<u32>, per_page: Option<u32>) -> CategoryPageQuery {
        CategoryPageQuery {
            category: Category::Food,
            page,
            per_page,
        }
    }

    #[test]
    fn test_category_page_query() {
        assert_eq!(page_query(None, None).page(), None);
        assert_eq!(page_query(Some(2), None).page(), Some((2, 20)));
        assert_eq!(page_query(None, Some(5)).page(), Some((1, 5)));
        assert_eq!(page_query(Some(0), Some(0)).page(), Some((1, 1)));
        assert_eq!(page_query(Some(3), Some(1000)).page(), Some((3, 100)));
    }

    #[test]
    fn test_signup_request_validation() {
        let req = SignupRequest {
            username: "alice".to_string(),
            password: "password123".to_string(),
            name: "Alice".to_string(),
            image: None,
        };
        assert!(req.validate().is_ok());

        let req = SignupRequest {
            username: "al".to_string(),
            password: "short".to_string(),
            name: "  ".to_string(),
            image: None,
        };
        let errors = req.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("username"));
        assert!(fields.contains_key("password"));
        assert!(fields.contains_key("name"));
    }

    #[test]
    fn test_update_post_request_validation() {
        let req: UpdatePostRequest = serde_json::from_str(
            r#"{"title": "New", "content": "Body", "category": "travel"}"#,
        )
        .unwrap();
        assert!(req.validate().is_ok());
        assert_eq!(req.category, Category::Travel);

        let req = UpdatePostRequest {
            title: "x".repeat(MAX_TITLE_LENGTH + 1),
            content: " ".to_string(),
            category: Category::Etc,
        };
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("title"));
        assert!(errors.field_errors().contains_key("content"));
    }

    #[test]
    fn test_length_limits_match_service() {
        let ok = UpdatePostRequest {
            title: "t".repeat(MAX_TITLE_LENGTH),
            content: "c".repeat(MAX_BODY_LENGTH),
            category: Category::Etc,
        };
        assert!(ok.validate().is_ok());

        let comment = CreateCommentRequest {
            content: "c".repeat(MAX_COMMENT_LENGTH + 1),
        };
        assert!(comment.validate().is_err());
    }

    #[test]
    fn test_update_post_request_into_update() {
        let req = UpdatePostRequest {
            title: "T".to_string(),
            content: "C".to_string(),
            category: Category::Study,
        };
        let update: PostUpdate = req.into();
        assert_eq!(update.title.as_deref(), Some("T"));
        assert_eq!(update.content.as_deref(), Some("C"));
        assert_eq!(update.category, Some(Category::Study));
    }
}
