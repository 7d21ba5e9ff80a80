//! Heart (like) repository for miniboard.
//!
//! A heart is the existence of a (member, post) pair; the pair is unique.

use sqlx::SqliteConnection;

use crate::Result;

/// Repository for heart persistence.
pub struct HeartRepository<'c> {
    conn: &'c mut SqliteConnection,
}

impl<'c> HeartRepository<'c> {
    /// Create a new HeartRepository on the given connection.
    pub fn new(conn: &'c mut SqliteConnection) -> Self {
        Self { conn }
    }

    /// Record a heart from a member on a post.
    ///
    /// Returns false if the member had already liked the post.
    pub async fn create(&mut self, member_id: i64, post_id: i64) -> Result<bool> {
        let result = sqlx::query("INSERT OR IGNORE INTO hearts (member_id, post_id) VALUES (?, ?)")
            .bind(member_id)
            .bind(post_id)
            .execute(&mut *self.conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Remove a member's heart from a post.
    ///
    /// Returns false if there was nothing to remove.
    pub async fn delete(&mut self, member_id: i64, post_id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM hearts WHERE member_id = ? AND post_id = ?")
            .bind(member_id)
            .bind(post_id)
            .execute(&mut *self.conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Check whether a member has liked a post.
    pub async fn exists(&mut self, member_id: i64, post_id: i64) -> Result<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM hearts WHERE member_id = ? AND post_id = ?)",
        )
        .bind(member_id)
        .bind(post_id)
        .fetch_one(&mut *self.conn)
        .await?;
        Ok(exists)
    }

    /// Count the hearts on a post.
    pub async fn count_by_post(&mut self, post_id: i64) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM hearts WHERE post_id = ?")
            .bind(post_id)
            .fetch_one(&mut *self.conn)
            .await?;
        Ok(count)
    }
}
