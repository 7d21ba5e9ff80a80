//! Post repository for miniboard.
//!
//! This module provides CRUD and listing operations for posts.

use sqlx::{QueryBuilder, SqliteConnection};

use super::post::{NewPost, Post, PostSummary, PostUpdate};
use super::types::Category;
use crate::{BoardError, Result};

const POST_COLUMNS: &str = "id, author_id, title, content, image, category, created_at";

/// Summary projection; the heart count is computed per post.
const SUMMARY_SELECT: &str = "SELECT p.id, p.title, p.image, p.category, p.created_at,
        (SELECT COUNT(*) FROM hearts h WHERE h.post_id = p.id) AS heart_count
     FROM posts p";

/// Repository for post persistence.
pub struct PostRepository<'c> {
    conn: &'c mut SqliteConnection,
}

impl<'c> PostRepository<'c> {
    /// Create a new PostRepository on the given connection.
    pub fn new(conn: &'c mut SqliteConnection) -> Self {
        Self { conn }
    }

    /// Create a new post.
    ///
    /// Returns the created post with the assigned ID.
    pub async fn create(&mut self, new_post: &NewPost) -> Result<Post> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO posts (author_id, title, content, image, category)
             VALUES (?, ?, ?, ?, ?) RETURNING id",
        )
        .bind(new_post.author_id)
        .bind(&new_post.title)
        .bind(&new_post.content)
        .bind(&new_post.image)
        .bind(new_post.category.as_str())
        .fetch_one(&mut *self.conn)
        .await?;

        self.get_by_id(id)
            .await?
            .ok_or_else(|| BoardError::NotFound("post".to_string()))
    }

    /// Get a post by ID.
    pub async fn get_by_id(&mut self, id: i64) -> Result<Option<Post>> {
        let sql = format!("SELECT {POST_COLUMNS} FROM posts WHERE id = ?");
        let row: Option<PostRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&mut *self.conn)
            .await?;

        row.map(PostRow::into_post).transpose()
    }

    /// Update a post by ID.
    ///
    /// Only fields that are set in the update will be modified.
    /// Returns the updated post, or None if not found.
    pub async fn update(&mut self, id: i64, update: &PostUpdate) -> Result<Option<Post>> {
        if update.is_empty() {
            return self.get_by_id(id).await;
        }

        let mut query: QueryBuilder<sqlx::Sqlite> = QueryBuilder::new("UPDATE posts SET ");
        let mut separated = query.separated(", ");

        if let Some(ref title) = update.title {
            separated.push("title = ");
            separated.push_bind_unseparated(title.clone());
        }
        if let Some(ref content) = update.content {
            separated.push("content = ");
            separated.push_bind_unseparated(content.clone());
        }
        if let Some(category) = update.category {
            separated.push("category = ");
            separated.push_bind_unseparated(category.as_str());
        }

        query.push(" WHERE id = ");
        query.push_bind(id);

        let result = query.build().execute(&mut *self.conn).await?;
        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.get_by_id(id).await
    }

    /// Delete a post by ID. Comments and hearts go with it.
    ///
    /// Returns true if a post was deleted, false if not found.
    pub async fn delete(&mut self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM posts WHERE id = ?")
            .bind(id)
            .execute(&mut *self.conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// List the most recent posts, newest first.
    pub async fn list_recent(&mut self, limit: i64) -> Result<Vec<PostSummary>> {
        let sql = format!("{SUMMARY_SELECT} ORDER BY p.created_at DESC, p.id DESC LIMIT ?");
        let rows: Vec<SummaryRow> = sqlx::query_as(&sql)
            .bind(limit)
            .fetch_all(&mut *self.conn)
            .await?;

        rows.into_iter().map(SummaryRow::into_summary).collect()
    }

    /// List the most recent posts in a category, newest first.
    pub async fn list_recent_by_category(
        &mut self,
        category: Category,
        limit: i64,
    ) -> Result<Vec<PostSummary>> {
        let sql = format!(
            "{SUMMARY_SELECT} WHERE p.category = ? ORDER BY p.created_at DESC, p.id DESC LIMIT ?"
        );
        let rows: Vec<SummaryRow> = sqlx::query_as(&sql)
            .bind(category.as_str())
            .bind(limit)
            .fetch_all(&mut *self.conn)
            .await?;

        rows.into_iter().map(SummaryRow::into_summary).collect()
    }

    /// List every post in a category, in insertion order.
    pub async fn list_by_category(&mut self, category: Category) -> Result<Vec<PostSummary>> {
        let sql = format!("{SUMMARY_SELECT} WHERE p.category = ? ORDER BY p.id ASC");
        let rows: Vec<SummaryRow> = sqlx::query_as(&sql)
            .bind(category.as_str())
            .fetch_all(&mut *self.conn)
            .await?;

        rows.into_iter().map(SummaryRow::into_summary).collect()
    }

    /// List posts in a category with pagination, in insertion order.
    pub async fn list_by_category_paginated(
        &mut self,
        category: Category,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<PostSummary>> {
        let sql = format!("{SUMMARY_SELECT} WHERE p.category = ? ORDER BY p.id ASC LIMIT ? OFFSET ?");
        let rows: Vec<SummaryRow> = sqlx::query_as(&sql)
            .bind(category.as_str())
            .bind(limit)
            .bind(offset)
            .fetch_all(&mut *self.conn)
            .await?;

        rows.into_iter().map(SummaryRow::into_summary).collect()
    }

    /// Count posts in a category.
    pub async fn count_by_category(&mut self, category: Category) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM posts WHERE category = ?")
            .bind(category.as_str())
            .fetch_one(&mut *self.conn)
            .await?;
        Ok(count)
    }
}

/// Internal struct for mapping database rows to Post.
#[derive(sqlx::FromRow)]
struct PostRow {
    id: i64,
    author_id: i64,
    title: String,
    content: String,
    image: String,
    category: String,
    created_at: String,
}

impl PostRow {
    fn into_post(self) -> Result<Post> {
        Ok(Post {
            id: self.id,
            author_id: self.author_id,
            title: self.title,
            content: self.content,
            image: self.image,
            category: parse_category(&self.category)?,
            created_at: self.created_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct SummaryRow {
    id: i64,
    title: String,
    image: String,
    category: String,
    created_at: String,
    heart_count: i64,
}

impl SummaryRow {
    fn into_summary(self) -> Result<PostSummary> {
        Ok(PostSummary {
            id: self.id,
            title: self.title,
            image: self.image,
            category: parse_category(&self.category)?,
            heart_count: self.heart_count,
            created_at: self.created_at,
        })
    }
}

/// Stored categories are written by us; anything else is a corrupt row.
fn parse_category(value: &str) -> Result<Category> {
    value
        .parse()
        .map_err(|e: String| BoardError::Database(format!("invalid stored category: {e}")))
}
