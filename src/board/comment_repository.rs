//! Comment repository for miniboard.

use sqlx::SqliteConnection;

use super::comment::{Comment, CommentView, NewComment};
use crate::{BoardError, Result};

/// Repository for comment persistence.
pub struct CommentRepository<'c> {
    conn: &'c mut SqliteConnection,
}

impl<'c> CommentRepository<'c> {
    /// Create a new CommentRepository on the given connection.
    pub fn new(conn: &'c mut SqliteConnection) -> Self {
        Self { conn }
    }

    /// Create a new comment.
    pub async fn create(&mut self, new_comment: &NewComment) -> Result<Comment> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO comments (post_id, author_id, content) VALUES (?, ?, ?) RETURNING id",
        )
        .bind(new_comment.post_id)
        .bind(new_comment.author_id)
        .bind(&new_comment.content)
        .fetch_one(&mut *self.conn)
        .await?;

        self.get_by_id(id)
            .await?
            .ok_or_else(|| BoardError::NotFound("comment".to_string()))
    }

    /// Get a comment by ID.
    pub async fn get_by_id(&mut self, id: i64) -> Result<Option<Comment>> {
        let comment = sqlx::query_as::<_, Comment>(
            "SELECT id, post_id, author_id, content, created_at FROM comments WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&mut *self.conn)
        .await?;

        Ok(comment)
    }

    /// Delete a comment by ID.
    pub async fn delete(&mut self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM comments WHERE id = ?")
            .bind(id)
            .execute(&mut *self.conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// List the comments of a post with their writers, newest first.
    pub async fn list_by_post(&mut self, post_id: i64) -> Result<Vec<CommentView>> {
        let comments = sqlx::query_as::<_, CommentView>(
            "SELECT c.id, c.content, c.created_at, m.name AS writer, m.image AS writer_image
             FROM comments c
             JOIN members m ON m.id = c.author_id
             WHERE c.post_id = ?
             ORDER BY c.created_at DESC, c.id DESC",
        )
        .bind(post_id)
        .fetch_all(&mut *self.conn)
        .await?;

        Ok(comments)
    }

    /// Count the comments of a post.
    pub async fn count_by_post(&mut self, post_id: i64) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM comments WHERE post_id = ?")
            .bind(post_id)
            .fetch_one(&mut *self.conn)
            .await?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Category, NewPost, PostRepository};
    use crate::db::{MemberRepository, NewMember};
    use crate::Database;

    async fn setup() -> (Database, i64, i64) {
        let db = Database::open_in_memory().await.unwrap();
        let mut conn = db.acquire().await.unwrap();
        let member = MemberRepository::new(&mut conn)
            .create(&NewMember::new("reader", "hash", "Reader").with_image("/images/r.png"))
            .await
            .unwrap();
        let post = PostRepository::new(&mut conn)
            .create(&NewPost::new(
                member.id,
                "Post",
                "Body",
                "/images/board/p.png",
                Category::Daily,
            ))
            .await
            .unwrap();
        drop(conn);
        (db, member.id, post.id)
    }

    #[tokio::test]
    async fn test_create_and_get_comment() {
        let (db, member_id, post_id) = setup().await;
        let mut conn = db.acquire().await.unwrap();
        let mut repo = CommentRepository::new(&mut conn);

        let comment = repo
            .create(&NewComment::new(post_id, member_id, "First"))
            .await
            .unwrap();
        assert_eq!(comment.post_id, post_id);
        assert_eq!(comment.content, "First");

        let found = repo.get_by_id(comment.id).await.unwrap().unwrap();
        assert_eq!(found.author_id, member_id);
        assert!(repo.get_by_id(999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_by_post_newest_first_with_writer() {
        let (db, member_id, post_id) = setup().await;
        let mut conn = db.acquire().await.unwrap();
        let mut repo = CommentRepository::new(&mut conn);

        for text in ["one", "two", "three"] {
            repo.create(&NewComment::new(post_id, member_id, text))
                .await
                .unwrap();
        }

        let comments = repo.list_by_post(post_id).await.unwrap();
        let contents: Vec<&str> = comments.iter().map(|c| c.content.as_str()).collect();
        assert_eq!(contents, vec!["three", "two", "one"]);
        assert_eq!(comments[0].writer, "Reader");
        assert_eq!(comments[0].writer_image.as_deref(), Some("/images/r.png"));
        assert_eq!(repo.count_by_post(post_id).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_list_by_post_orders_by_created_at_before_id() {
        let (db, member_id, post_id) = setup().await;
        let mut conn = db.acquire().await.unwrap();

        // Insertion order deliberately disagrees with the timestamps
        for (text, created_at) in [
            ("newest", "2024-03-01 10:00:00"),
            ("oldest", "2024-01-01 10:00:00"),
            ("middle", "2024-02-01 10:00:00"),
        ] {
            sqlx::query(
                "INSERT INTO comments (post_id, author_id, content, created_at) VALUES (?, ?, ?, ?)",
            )
            .bind(post_id)
            .bind(member_id)
            .bind(text)
            .bind(created_at)
            .execute(&mut *conn)
            .await
            .unwrap();
        }

        let comments = CommentRepository::new(&mut conn)
            .list_by_post(post_id)
            .await
            .unwrap();
        let contents: Vec<&str> = comments.iter().map(|c| c.content.as_str()).collect();
        assert_eq!(contents, vec!["newest", "middle", "oldest"]);
    }

    #[tokio::test]
    async fn test_delete_comment() {
        let (db, member_id, post_id) = setup().await;
        let mut conn = db.acquire().await.unwrap();
        let mut repo = CommentRepository::new(&mut conn);

        let comment = repo
            .create(&NewComment::new(post_id, member_id, "Bye"))
            .await
            .unwrap();
        assert!(repo.delete(comment.id).await.unwrap());
        assert!(!repo.delete(comment.id).await.unwrap());
        assert_eq!(repo.count_by_post(post_id).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_comment_on_missing_post_fails() {
        let (db, member_id, _) = setup().await;
        let mut conn = db.acquire().await.unwrap();
        let mut repo = CommentRepository::new(&mut conn);

        let result = repo.create(&NewComment::new(999, member_id, "Orphan")).await;
        assert!(result.is_err());
    }
}
