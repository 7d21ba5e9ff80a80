//! Member signup and login for miniboard.

use sqlx::SqliteConnection;
use tracing::{info, warn};

use crate::auth::validation::validate_signup;
use crate::auth::{hash_password, verify_password, PasswordError};
use crate::db::{Member, MemberRepository, NewMember};
use crate::{BoardError, Result};

/// Signup request data.
#[derive(Debug, Clone)]
pub struct SignupRequest {
    /// Desired username (3-20 alphanumeric + underscore).
    pub username: String,
    /// Password (8-128 characters).
    pub password: String,
    /// Display name.
    pub name: String,
    /// Optional profile image URL.
    pub image: Option<String>,
}

impl SignupRequest {
    /// Create a new signup request.
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

/// Register a new member.
///
/// Validates the fields, rejects a taken username (case-insensitive) with
/// `Conflict`, then stores the member with an Argon2id password hash.
pub async fn signup(conn: &mut SqliteConnection, request: SignupRequest) -> Result<Member> {
    validate_signup(&request.username, &request.password, &request.name)
        .map_err(|e| BoardError::Validation(e.to_string()))?;

    let mut repo = MemberRepository::new(conn);
    if repo.username_exists(&request.username).await? {
        return Err(BoardError::Conflict("username".to_string()));
    }

    let password_hash = hash_password(&request.password).map_err(password_error)?;

    let mut new_member = NewMember::new(&request.username, password_hash, request.name.trim());
    if let Some(ref image) = request.image {
        new_member = new_member.with_image(image);
    }

    let member = repo.create(&new_member).await?;

    info!(
        username = %member.username,
        member_id = member.id,
        "New member registered"
    );

    Ok(member)
}

/// Length problems are the caller's fault; anything else is ours.
fn password_error(e: PasswordError) -> BoardError {
    match e {
        PasswordError::TooShort | PasswordError::TooLong => BoardError::Validation(e.to_string()),
        _ => BoardError::Internal(e.to_string()),
    }
}

/// Check a username and password.
///
/// Unknown usernames and wrong passwords fail the same way.
pub async fn authenticate(
    conn: &mut SqliteConnection,
    username: &str,
    password: &str,
) -> Result<Member> {
    let member = MemberRepository::new(conn)
        .get_by_username(username)
        .await?
        .ok_or_else(|| BoardError::Auth("invalid username or password".to_string()))?;

    if verify_password(password, &member.password).is_err() {
        warn!(username = %username, "Login failed: wrong password");
        return Err(BoardError::Auth("invalid username or password".to_string()));
    }

    info!(member_id = member.id, "Member logged in");
    Ok(member)
}
