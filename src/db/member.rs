//! Member model for miniboard.

/// Member entity representing a registered account.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Member {
    /// Unique member ID.
    pub id: i64,
    /// Login username (unique, case-insensitive).
    pub username: String,
    /// Password hash (Argon2).
    pub password: String,
    /// Display name shown as the writer of posts and comments.
    pub name: String,
    /// Profile image URL (optional).
    pub image: Option<String>,
    /// Account creation timestamp.
    pub created_at: String,
}

impl Member {
    /// Check whether this member is the same account as `member_id`.
    pub fn is(&self, member_id: i64) -> bool {
        self.id == member_id
    }
}

/// Data for creating a new member.
#[derive(Debug, Clone)]
pub struct NewMember {
    /// Login username.
    pub username: String,
    /// Password hash (should be pre-hashed with Argon2).
    pub password: String,
    /// Display name.
    pub name: String,
    /// Profile image URL.
    pub image: Option<String>,
}

impl NewMember {
    /// Create a new member with the required fields.
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            name: name.into(),
            image: None,
        }
    }

    /// Set the profile image URL.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }
}
