//! Board service for miniboard.
//!
//! This module provides the high-level post operations: listings, detail
//! view, creation with image upload, owner-only update and delete, comments
//! and hearts. Read-check-write sequences run in a single transaction.

use tracing::{info, warn};

use crate::db::{Database, Member, MemberRepository};
use crate::storage::{ImageStore, BOARD_NAMESPACE};
use crate::{BoardError, Result};

use super::comment::{Comment, CommentView, NewComment};
use super::comment_repository::CommentRepository;
use super::heart_repository::HeartRepository;
use super::post::{NewPost, Post, PostSummary, PostUpdate};
use super::post_repository::PostRepository;
use super::types::Category;

/// Number of posts returned by the "recent" listings.
pub const RECENT_POST_LIMIT: i64 = 5;

/// Maximum length for post titles (in characters).
pub const MAX_TITLE_LENGTH: usize = 50;

/// Maximum length for post body (in characters).
pub const MAX_BODY_LENGTH: usize = 10_000;

/// Maximum length for comments (in characters).
pub const MAX_COMMENT_LENGTH: usize = 1_000;

/// Validate a title string.
fn validate_title(title: &str) -> Result<()> {
    let char_count = title.chars().count();
    if char_count > MAX_TITLE_LENGTH {
        return Err(BoardError::Validation(format!(
            "title must be at most {} characters",
            MAX_TITLE_LENGTH
        )));
    }
    if title.trim().is_empty() {
        return Err(BoardError::Validation("title is required".to_string()));
    }
    if title.chars().any(char::is_control) {
        return Err(BoardError::Validation(
            "title must be a single line without control characters".to_string(),
        ));
    }
    Ok(())
}

/// Validate a post body string.
fn validate_body(body: &str) -> Result<()> {
    let char_count = body.chars().count();
    if char_count > MAX_BODY_LENGTH {
        return Err(BoardError::Validation(format!(
            "content must be at most {} characters",
            MAX_BODY_LENGTH
        )));
    }
    if body.trim().is_empty() {
        return Err(BoardError::Validation("content is required".to_string()));
    }
    Ok(())
}

fn validate_comment(content: &str) -> Result<()> {
    if content.chars().count() > MAX_COMMENT_LENGTH {
        return Err(BoardError::Validation(format!(
            "comment must be at most {} characters",
            MAX_COMMENT_LENGTH
        )));
    }
    if content.trim().is_empty() {
        return Err(BoardError::Validation("comment is required".to_string()));
    }
    Ok(())
}

/// Pagination parameters.
#[derive(Debug, Clone, Copy, Default)]
pub struct Pagination {
    /// Number of items to skip.
    pub offset: i64,
    /// Maximum number of items to return.
    pub limit: i64,
}

impl Pagination {
    /// Create new pagination parameters.
    pub fn new(offset: i64, limit: i64) -> Self {
        Self { offset, limit }
    }

    /// Create pagination for a 1-based page number.
    pub fn page(page: u32, per_page: u32) -> Self {
        let page = i64::from(page.max(1));
        let per_page = i64::from(per_page);
        Self::new((page - 1) * per_page, per_page)
    }
}

/// Result of a paginated query.
#[derive(Debug, Clone)]
pub struct PaginatedResult<T> {
    /// The items in this page.
    pub items: Vec<T>,
    /// Total number of items (across all pages).
    pub total: i64,
    /// Current offset.
    pub offset: i64,
    /// Limit used for this query.
    pub limit: i64,
}

impl<T> PaginatedResult<T> {
    /// Check if there are more items after this page.
    pub fn has_more(&self) -> bool {
        self.offset + (self.items.len() as i64) < self.total
    }

    /// Get the next page pagination, or None if no more pages.
    pub fn next_page(&self) -> Option<Pagination> {
        if self.has_more() {
            Some(Pagination::new(self.offset + self.limit, self.limit))
        } else {
            None
        }
    }
}

/// Uploaded image payload.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    /// Client-supplied file name.
    pub file_name: String,
    /// Raw image bytes.
    pub content: Vec<u8>,
}

impl ImageUpload {
    /// Create a new upload payload.
    pub fn new(file_name: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            content: content.into(),
        }
    }
}

/// Full view of a single post.
#[derive(Debug, Clone)]
pub struct PostDetail {
    pub id: i64,
    pub title: String,
    pub image: String,
    pub content: String,
    pub category: Category,
    /// Display name of the author.
    pub writer: String,
    pub created_at: String,
    pub heart_count: i64,
    /// Display name of the viewer, if signed in.
    pub member_name: Option<String>,
    /// Whether the viewer has liked the post.
    pub heart: bool,
    /// Comments, newest first.
    pub comments: Vec<CommentView>,
}

/// Outcome of toggling a heart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeartToggle {
    /// Whether the member likes the post after the toggle.
    pub heart: bool,
    /// Heart count after the toggle.
    pub heart_count: i64,
}

/// Service for board operations with ownership checking.
pub struct BoardService<'a> {
    db: &'a Database,
    images: &'a dyn ImageStore,
}

impl<'a> BoardService<'a> {
    /// Create a new BoardService.
    pub fn new(db: &'a Database, images: &'a dyn ImageStore) -> Self {
        Self { db, images }
    }

    /// The most recent posts overall, newest first.
    pub async fn recent_posts(&self) -> Result<Vec<PostSummary>> {
        let mut conn = self.db.acquire().await?;
        PostRepository::new(&mut conn)
            .list_recent(RECENT_POST_LIMIT)
            .await
    }

    /// The most recent posts in a category, newest first.
    pub async fn recent_posts_by_category(&self, category: Category) -> Result<Vec<PostSummary>> {
        let mut conn = self.db.acquire().await?;
        PostRepository::new(&mut conn)
            .list_recent_by_category(category, RECENT_POST_LIMIT)
            .await
    }

    /// Every post in a category, in insertion order.
    pub async fn posts_by_category(&self, category: Category) -> Result<Vec<PostSummary>> {
        let mut conn = self.db.acquire().await?;
        PostRepository::new(&mut conn)
            .list_by_category(category)
            .await
    }

    /// One page of the posts in a category, in insertion order.
    pub async fn posts_by_category_paginated(
        &self,
        category: Category,
        pagination: Pagination,
    ) -> Result<PaginatedResult<PostSummary>> {
        let mut conn = self.db.acquire().await?;
        let mut repo = PostRepository::new(&mut conn);
        let items = repo
            .list_by_category_paginated(category, pagination.offset, pagination.limit)
            .await?;
        let total = repo.count_by_category(category).await?;

        Ok(PaginatedResult {
            items,
            total,
            offset: pagination.offset,
            limit: pagination.limit,
        })
    }

    /// Get a post with its writer, hearts and comments.
    ///
    /// `viewer` is the signed-in member, if any; it decides `member_name`
    /// and `heart` in the result.
    pub async fn get_post(&self, post_id: i64, viewer: Option<&Member>) -> Result<PostDetail> {
        let mut tx = self.db.begin().await?;

        let post = PostRepository::new(&mut tx)
            .get_by_id(post_id)
            .await?
            .ok_or_else(|| BoardError::NotFound("post".to_string()))?;

        let writer = MemberRepository::new(&mut tx)
            .get_by_id(post.author_id)
            .await?
            .ok_or_else(|| BoardError::NotFound("member".to_string()))?;

        let mut hearts = HeartRepository::new(&mut tx);
        let heart_count = hearts.count_by_post(post_id).await?;
        let heart = match viewer {
            Some(member) => hearts.exists(member.id, post_id).await?,
            None => false,
        };

        let comments = CommentRepository::new(&mut tx)
            .list_by_post(post_id)
            .await?;

        tx.commit().await?;

        Ok(PostDetail {
            id: post.id,
            title: post.title,
            image: post.image,
            content: post.content,
            category: post.category,
            writer: writer.name,
            created_at: post.created_at,
            heart_count,
            member_name: viewer.map(|m| m.name.clone()),
            heart,
            comments,
        })
    }

    /// Create a post.
    ///
    /// The image is uploaded first; if the upload fails nothing is written.
    pub async fn create_post(
        &self,
        author: &Member,
        title: &str,
        content: &str,
        category: Category,
        image: ImageUpload,
    ) -> Result<Post> {
        validate_title(title)?;
        validate_body(content)?;

        let url = self
            .images
            .upload(&image.content, &image.file_name, BOARD_NAMESPACE)
            .await?;

        let new_post = NewPost::new(author.id, title, content, url.clone(), category);
        match self.insert_post(&new_post).await {
            Ok(post) => {
                info!(post_id = post.id, author_id = author.id, "Post created");
                Ok(post)
            }
            Err(e) => {
                self.discard_image(&url).await;
                Err(e)
            }
        }
    }

    /// Update a post's title, content or category. Only the writer may update.
    pub async fn update_post(
        &self,
        post_id: i64,
        update: &PostUpdate,
        actor: &Member,
    ) -> Result<Post> {
        if let Some(ref title) = update.title {
            validate_title(title)?;
        }
        if let Some(ref content) = update.content {
            validate_body(content)?;
        }

        let mut tx = self.db.begin().await?;
        let mut repo = PostRepository::new(&mut tx);

        let post = repo
            .get_by_id(post_id)
            .await?
            .ok_or_else(|| BoardError::NotFound("post".to_string()))?;
        if !post.is_written_by(actor.id) {
            return Err(BoardError::NotValidWriter("post".to_string()));
        }

        let updated = repo
            .update(post_id, update)
            .await?
            .ok_or_else(|| BoardError::NotFound("post".to_string()))?;
        tx.commit().await?;

        info!(post_id, actor_id = actor.id, "Post updated");
        Ok(updated)
    }

    /// Delete a post with its comments and hearts. Only the writer may delete.
    ///
    /// The stored image is removed afterwards on a best-effort basis.
    pub async fn delete_post(&self, post_id: i64, actor: &Member) -> Result<()> {
        let mut tx = self.db.begin().await?;
        let mut repo = PostRepository::new(&mut tx);

        let post = repo
            .get_by_id(post_id)
            .await?
            .ok_or_else(|| BoardError::NotFound("post".to_string()))?;
        if !post.is_written_by(actor.id) {
            return Err(BoardError::NotValidWriter("post".to_string()));
        }

        repo.delete(post_id).await?;
        tx.commit().await?;
        info!(post_id, actor_id = actor.id, "Post deleted");

        self.discard_image(&post.image).await;
        Ok(())
    }

    /// Add a comment to a post.
    pub async fn add_comment(&self, post_id: i64, content: &str, author: &Member) -> Result<Comment> {
        validate_comment(content)?;

        let mut tx = self.db.begin().await?;
        if PostRepository::new(&mut tx).get_by_id(post_id).await?.is_none() {
            return Err(BoardError::NotFound("post".to_string()));
        }

        let comment = CommentRepository::new(&mut tx)
            .create(&NewComment::new(post_id, author.id, content))
            .await?;
        tx.commit().await?;

        Ok(comment)
    }

    /// Delete a comment. Only the writer may delete.
    pub async fn delete_comment(&self, comment_id: i64, actor: &Member) -> Result<()> {
        let mut tx = self.db.begin().await?;
        let mut repo = CommentRepository::new(&mut tx);

        let comment = repo
            .get_by_id(comment_id)
            .await?
            .ok_or_else(|| BoardError::NotFound("comment".to_string()))?;
        if !comment.is_written_by(actor.id) {
            return Err(BoardError::NotValidWriter("comment".to_string()));
        }

        repo.delete(comment_id).await?;
        tx.commit().await?;
        Ok(())
    }

    /// Like the post if the member hasn't yet, otherwise take the like back.
    pub async fn toggle_heart(&self, post_id: i64, member: &Member) -> Result<HeartToggle> {
        let mut tx = self.db.begin().await?;
        if PostRepository::new(&mut tx).get_by_id(post_id).await?.is_none() {
            return Err(BoardError::NotFound("post".to_string()));
        }

        let mut hearts = HeartRepository::new(&mut tx);
        let heart = if hearts.delete(member.id, post_id).await? {
            false
        } else {
            hearts.create(member.id, post_id).await?
        };
        let heart_count = hearts.count_by_post(post_id).await?;
        tx.commit().await?;

        Ok(HeartToggle { heart, heart_count })
    }

    async fn insert_post(&self, new_post: &NewPost) -> Result<Post> {
        let mut conn = self.db.acquire().await?;
        PostRepository::new(&mut conn).create(new_post).await
    }

    async fn discard_image(&self, url: &str) {
        match self.images.remove(url).await {
            Ok(true) => {}
            Ok(false) => warn!(url = %url, "Image was already gone"),
            Err(e) => warn!(url = %url, error = %e, "Failed to remove image"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::NewMember;
    use axum::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// In-memory image store recording what it holds.
    #[derive(Default)]
    struct MemoryImageStore {
        stored: Mutex<Vec<String>>,
        next: AtomicUsize,
        fail_uploads: bool,
        fail_removals: bool,
    }

    impl MemoryImageStore {
        fn failing() -> Self {
            Self {
                fail_uploads: true,
                ..Self::default()
            }
        }

        fn stored(&self) -> Vec<String> {
            self.stored.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ImageStore for MemoryImageStore {
        async fn upload(&self, _content: &[u8], _file_name: &str, namespace: &str) -> Result<String> {
            if self.fail_uploads {
                return Err(BoardError::Storage("bucket unavailable".to_string()));
            }
            let n = self.next.fetch_add(1, Ordering::SeqCst);
            let url = format!("/images/{namespace}/{n}.png");
            self.stored.lock().unwrap().push(url.clone());
            Ok(url)
        }

        async fn remove(&self, url: &str) -> Result<bool> {
            if self.fail_removals {
                return Err(BoardError::Storage("bucket unavailable".to_string()));
            }
            let mut stored = self.stored.lock().unwrap();
            let before = stored.len();
            stored.retain(|u| u != url);
            Ok(stored.len() < before)
        }
    }

    async fn setup_db() -> Database {
        Database::open_in_memory().await.unwrap()
    }

    async fn create_member(db: &Database, username: &str) -> Member {
        let mut conn = db.acquire().await.unwrap();
        MemberRepository::new(&mut conn)
            .create(&NewMember::new(username, "hash", username.to_uppercase()))
            .await
            .unwrap()
    }

    fn image() -> ImageUpload {
        ImageUpload::new("photo.png", b"png".to_vec())
    }

    async fn create_post(service: &BoardService<'_>, author: &Member, title: &str) -> Post {
        service
            .create_post(author, title, "Body", Category::Daily, image())
            .await
            .unwrap()
    }

    async fn post_count(db: &Database) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM posts")
            .fetch_one(db.pool())
            .await
            .unwrap()
    }

    #[test]
    fn test_validate_title() {
        assert!(validate_title("Hello").is_ok());
        assert!(validate_title("   ").is_err());
        assert!(validate_title(&"a".repeat(MAX_TITLE_LENGTH)).is_ok());
        assert!(validate_title(&"a".repeat(MAX_TITLE_LENGTH + 1)).is_err());
        assert!(validate_title("line1\nline2").is_err());
        assert!(validate_title("bell\x07").is_err());
        assert!(validate_title("tab\there").is_err());
    }

    #[test]
    fn test_validate_body() {
        assert!(validate_body("Body").is_ok());
        assert!(validate_body("\n\t").is_err());
        assert!(validate_body(&"a".repeat(MAX_BODY_LENGTH + 1)).is_err());
    }

    #[test]
    fn test_pagination_page() {
        let p = Pagination::page(3, 10);
        assert_eq!(p.offset, 20);
        assert_eq!(p.limit, 10);

        let p = Pagination::page(0, 10);
        assert_eq!(p.offset, 0);
    }

    #[test]
    fn test_paginated_result_next_page() {
        let result = PaginatedResult {
            items: vec![1, 2],
            total: 5,
            offset: 0,
            limit: 2,
        };
        assert!(result.has_more());
        let next = result.next_page().unwrap();
        assert_eq!(next.offset, 2);

        let last = PaginatedResult {
            items: vec![5],
            total: 5,
            offset: 4,
            limit: 2,
        };
        assert!(!last.has_more());
        assert!(last.next_page().is_none());
    }

    #[tokio::test]
    async fn test_create_post_stores_image_url() {
        let db = setup_db().await;
        let images = MemoryImageStore::default();
        let service = BoardService::new(&db, &images);
        let author = create_member(&db, "alice").await;

        let post = create_post(&service, &author, "Hello").await;
        assert_eq!(post.author_id, author.id);
        assert_eq!(post.image, "/images/board/0.png");
        assert_eq!(images.stored(), vec!["/images/board/0.png".to_string()]);
    }

    #[tokio::test]
    async fn test_create_post_failing_upload_writes_nothing() {
        let db = setup_db().await;
        let images = MemoryImageStore::failing();
        let service = BoardService::new(&db, &images);
        let author = create_member(&db, "alice").await;

        let result = service
            .create_post(&author, "Hello", "Body", Category::Food, image())
            .await;
        assert!(matches!(result, Err(BoardError::Storage(_))));
        assert_eq!(post_count(&db).await, 0);
    }

    #[tokio::test]
    async fn test_create_post_validation_skips_upload() {
        let db = setup_db().await;
        let images = MemoryImageStore::default();
        let service = BoardService::new(&db, &images);
        let author = create_member(&db, "alice").await;

        let result = service
            .create_post(&author, "  ", "Body", Category::Food, image())
            .await;
        assert!(matches!(result, Err(BoardError::Validation(_))));
        assert!(images.stored().is_empty());
    }

    #[tokio::test]
    async fn test_create_post_rejects_multiline_title() {
        let db = setup_db().await;
        let images = MemoryImageStore::default();
        let service = BoardService::new(&db, &images);
        let author = create_member(&db, "alice").await;

        let result = service
            .create_post(&author, "line1\nline2\x07", "Body", Category::Food, image())
            .await;
        assert!(matches!(result, Err(BoardError::Validation(_))));
        assert!(images.stored().is_empty());
        assert_eq!(post_count(&db).await, 0);
    }

    #[tokio::test]
    async fn test_recent_posts_caps_at_five_newest_first() {
        let db = setup_db().await;
        let images = MemoryImageStore::default();
        let service = BoardService::new(&db, &images);
        let author = create_member(&db, "alice").await;

        for i in 1..=7 {
            create_post(&service, &author, &format!("Post {i}")).await;
        }

        let recent = service.recent_posts().await.unwrap();
        assert_eq!(recent.len(), 5);
        let titles: Vec<&str> = recent.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["Post 7", "Post 6", "Post 5", "Post 4", "Post 3"]);
    }

    #[tokio::test]
    async fn test_posts_by_category() {
        let db = setup_db().await;
        let images = MemoryImageStore::default();
        let service = BoardService::new(&db, &images);
        let author = create_member(&db, "alice").await;

        for i in 1..=3 {
            service
                .create_post(&author, &format!("Meal {i}"), "Body", Category::Food, image())
                .await
                .unwrap();
        }
        create_post(&service, &author, "Other").await;

        let all = service.posts_by_category(Category::Food).await.unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].title, "Meal 1");

        let recent = service
            .recent_posts_by_category(Category::Food)
            .await
            .unwrap();
        assert_eq!(recent[0].title, "Meal 3");

        let page = service
            .posts_by_category_paginated(Category::Food, Pagination::page(2, 2))
            .await
            .unwrap();
        assert_eq!(page.total, 3);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].title, "Meal 3");
        assert!(!page.has_more());
    }

    #[tokio::test]
    async fn test_get_post_not_found() {
        let db = setup_db().await;
        let images = MemoryImageStore::default();
        let service = BoardService::new(&db, &images);

        let result = service.get_post(42, None).await;
        assert!(matches!(result, Err(BoardError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_get_post_for_anonymous_viewer() {
        let db = setup_db().await;
        let images = MemoryImageStore::default();
        let service = BoardService::new(&db, &images);
        let author = create_member(&db, "alice").await;
        let post = create_post(&service, &author, "Hello").await;

        let detail = service.get_post(post.id, None).await.unwrap();
        assert_eq!(detail.title, "Hello");
        assert_eq!(detail.writer, "ALICE");
        assert!(detail.member_name.is_none());
        assert!(!detail.heart);
        assert_eq!(detail.heart_count, 0);
        assert!(detail.comments.is_empty());
    }

    #[tokio::test]
    async fn test_get_post_for_viewer_with_heart_and_comments() {
        let db = setup_db().await;
        let images = MemoryImageStore::default();
        let service = BoardService::new(&db, &images);
        let author = create_member(&db, "alice").await;
        let viewer = create_member(&db, "bob").await;
        let post = create_post(&service, &author, "Hello").await;

        service.toggle_heart(post.id, &viewer).await.unwrap();
        service.add_comment(post.id, "first", &viewer).await.unwrap();
        service.add_comment(post.id, "second", &author).await.unwrap();

        let detail = service.get_post(post.id, Some(&viewer)).await.unwrap();
        assert_eq!(detail.member_name.as_deref(), Some("BOB"));
        assert!(detail.heart);
        assert_eq!(detail.heart_count, 1);
        assert_eq!(detail.comments.len(), 2);
        assert_eq!(detail.comments[0].content, "second");
        assert_eq!(detail.comments[0].writer, "ALICE");

        let as_author = service.get_post(post.id, Some(&author)).await.unwrap();
        assert!(!as_author.heart);

        // A later timestamp wins over a higher id
        sqlx::query("UPDATE comments SET created_at = '2099-01-01 00:00:00' WHERE content = 'first'")
            .execute(db.pool())
            .await
            .unwrap();
        let detail = service.get_post(post.id, None).await.unwrap();
        assert_eq!(detail.comments[0].content, "first");
        assert_eq!(detail.comments[1].content, "second");
    }

    #[tokio::test]
    async fn test_update_post_by_writer() {
        let db = setup_db().await;
        let images = MemoryImageStore::default();
        let service = BoardService::new(&db, &images);
        let author = create_member(&db, "alice").await;
        let post = create_post(&service, &author, "Before").await;

        let update = PostUpdate::new()
            .title("After")
            .content("New body")
            .category(Category::Travel);
        let updated = service.update_post(post.id, &update, &author).await.unwrap();
        assert_eq!(updated.title, "After");
        assert_eq!(updated.content, "New body");
        assert_eq!(updated.category, Category::Travel);
        assert_eq!(updated.image, post.image);
    }

    #[tokio::test]
    async fn test_update_post_by_other_member_is_rejected() {
        let db = setup_db().await;
        let images = MemoryImageStore::default();
        let service = BoardService::new(&db, &images);
        let author = create_member(&db, "alice").await;
        let other = create_member(&db, "mallory").await;
        let post = create_post(&service, &author, "Mine").await;

        let update = PostUpdate::new().title("Hijacked");
        let result = service.update_post(post.id, &update, &other).await;
        assert!(matches!(result, Err(BoardError::NotValidWriter(_))));

        let detail = service.get_post(post.id, None).await.unwrap();
        assert_eq!(detail.title, "Mine");
    }

    #[tokio::test]
    async fn test_update_missing_post() {
        let db = setup_db().await;
        let images = MemoryImageStore::default();
        let service = BoardService::new(&db, &images);
        let author = create_member(&db, "alice").await;

        let result = service
            .update_post(99, &PostUpdate::new().title("x"), &author)
            .await;
        assert!(matches!(result, Err(BoardError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_post_by_other_member_is_rejected() {
        let db = setup_db().await;
        let images = MemoryImageStore::default();
        let service = BoardService::new(&db, &images);
        let author = create_member(&db, "alice").await;
        let other = create_member(&db, "mallory").await;
        let post = create_post(&service, &author, "Mine").await;

        let result = service.delete_post(post.id, &other).await;
        assert!(matches!(result, Err(BoardError::NotValidWriter(_))));
        assert_eq!(post_count(&db).await, 1);
        assert_eq!(images.stored().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_post_removes_children_and_image() {
        let db = setup_db().await;
        let images = MemoryImageStore::default();
        let service = BoardService::new(&db, &images);
        let author = create_member(&db, "alice").await;
        let fan = create_member(&db, "bob").await;
        let post = create_post(&service, &author, "Doomed").await;

        service.add_comment(post.id, "nice", &fan).await.unwrap();
        service.toggle_heart(post.id, &fan).await.unwrap();

        service.delete_post(post.id, &author).await.unwrap();

        assert_eq!(post_count(&db).await, 0);
        let comments: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM comments")
            .fetch_one(db.pool())
            .await
            .unwrap();
        let hearts: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM hearts")
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(comments, 0);
        assert_eq!(hearts, 0);
        assert!(images.stored().is_empty());
    }

    #[tokio::test]
    async fn test_delete_post_ignores_image_removal_failure() {
        let db = setup_db().await;
        let images = MemoryImageStore {
            fail_removals: true,
            ..MemoryImageStore::default()
        };
        let service = BoardService::new(&db, &images);
        let author = create_member(&db, "alice").await;
        let post = create_post(&service, &author, "Doomed").await;

        service.delete_post(post.id, &author).await.unwrap();
        assert_eq!(post_count(&db).await, 0);
    }

    #[tokio::test]
    async fn test_toggle_heart_twice_restores_count() {
        let db = setup_db().await;
        let images = MemoryImageStore::default();
        let service = BoardService::new(&db, &images);
        let author = create_member(&db, "alice").await;
        let fan = create_member(&db, "bob").await;
        let post = create_post(&service, &author, "Likeable").await;

        let first = service.toggle_heart(post.id, &fan).await.unwrap();
        assert_eq!(
            first,
            HeartToggle {
                heart: true,
                heart_count: 1
            }
        );

        let second = service.toggle_heart(post.id, &fan).await.unwrap();
        assert_eq!(
            second,
            HeartToggle {
                heart: false,
                heart_count: 0
            }
        );
    }

    #[tokio::test]
    async fn test_toggle_heart_missing_post() {
        let db = setup_db().await;
        let images = MemoryImageStore::default();
        let service = BoardService::new(&db, &images);
        let fan = create_member(&db, "bob").await;

        let result = service.toggle_heart(7, &fan).await;
        assert!(matches!(result, Err(BoardError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_comment_rules() {
        let db = setup_db().await;
        let images = MemoryImageStore::default();
        let service = BoardService::new(&db, &images);
        let author = create_member(&db, "alice").await;
        let other = create_member(&db, "bob").await;
        let post = create_post(&service, &author, "Discuss").await;

        let missing = service.add_comment(99, "hello", &author).await;
        assert!(matches!(missing, Err(BoardError::NotFound(_))));

        let blank = service.add_comment(post.id, "   ", &author).await;
        assert!(matches!(blank, Err(BoardError::Validation(_))));

        let comment = service.add_comment(post.id, "hello", &author).await.unwrap();
        let forbidden = service.delete_comment(comment.id, &other).await;
        assert!(matches!(forbidden, Err(BoardError::NotValidWriter(_))));

        service.delete_comment(comment.id, &author).await.unwrap();
        let gone = service.delete_comment(comment.id, &author).await;
        assert!(matches!(gone, Err(BoardError::NotFound(_))));
    }
}
