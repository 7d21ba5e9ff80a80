//! Member repository for miniboard.

use sqlx::SqliteConnection;

use super::member::{Member, NewMember};
use crate::{BoardError, Result};

/// Repository for member persistence.
pub struct MemberRepository<'c> {
    conn: &'c mut SqliteConnection,
}

impl<'c> MemberRepository<'c> {
    /// Create a new MemberRepository on the given connection.
    pub fn new(conn: &'c mut SqliteConnection) -> Self {
        Self { conn }
    }

    /// Create a new member.
    ///
    /// Returns the created member with the assigned ID, or `Conflict` if the
    /// username is already taken.
    pub async fn create(&mut self, new_member: &NewMember) -> Result<Member> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO members (username, password, name, image) VALUES (?, ?, ?, ?) RETURNING id",
        )
        .bind(&new_member.username)
        .bind(&new_member.password)
        .bind(&new_member.name)
        .bind(&new_member.image)
        .fetch_one(&mut *self.conn)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                BoardError::Conflict("username".to_string())
            }
            e => BoardError::from(e),
        })?;

        self.get_by_id(id)
            .await?
            .ok_or_else(|| BoardError::NotFound("member".to_string()))
    }

    /// Get a member by ID.
    pub async fn get_by_id(&mut self, id: i64) -> Result<Option<Member>> {
        let member = sqlx::query_as::<_, Member>(
            "SELECT id, username, password, name, image, created_at FROM members WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&mut *self.conn)
        .await?;

        Ok(member)
    }

    /// Get a member by username (case-insensitive).
    pub async fn get_by_username(&mut self, username: &str) -> Result<Option<Member>> {
        let member = sqlx::query_as::<_, Member>(
            "SELECT id, username, password, name, image, created_at
             FROM members WHERE username = ? COLLATE NOCASE",
        )
        .bind(username)
        .fetch_optional(&mut *self.conn)
        .await?;

        Ok(member)
    }

    /// Check if a username is already taken (case-insensitive).
    pub async fn username_exists(&mut self, username: &str) -> Result<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM members WHERE username = ? COLLATE NOCASE)",
        )
        .bind(username)
        .fetch_one(&mut *self.conn)
        .await?;

        Ok(exists)
    }
}
