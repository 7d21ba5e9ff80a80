//! Input validation for member signup.
//!
//! This module provides validation functions for usernames and display
//! names. Password length rules live in the password module.

use thiserror::Error;

use super::password::{validate_password, PasswordError};

/// Minimum username length.
pub const MIN_USERNAME_LENGTH: usize = 3;

/// Maximum username length.
pub const MAX_USERNAME_LENGTH: usize = 20;

/// Maximum display name length.
pub const MAX_NAME_LENGTH: usize = 20;

/// Validation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Username is too short.
    #[error("username must be at least {MIN_USERNAME_LENGTH} characters")]
    UsernameTooShort,

    /// Username is too long.
    #[error("username must be at most {MAX_USERNAME_LENGTH} characters")]
    UsernameTooLong,

    /// Username contains invalid characters.
    #[error("username can only contain alphanumeric characters and underscores")]
    UsernameInvalidChars,

    /// Password length is out of range.
    #[error("{0}")]
    Password(String),

    /// Display name is empty.
    #[error("name cannot be empty")]
    NameEmpty,

    /// Display name is too long.
    #[error("name must be at most {MAX_NAME_LENGTH} characters")]
    NameTooLong,

    /// Display name contains control characters.
    #[error("name contains invalid characters")]
    NameInvalidChars,
}

impl From<PasswordError> for ValidationError {
    fn from(e: PasswordError) -> Self {
        ValidationError::Password(e.to_string())
    }
}

/// Validate a username.
///
/// Requirements:
/// - Length: 3-20 characters
/// - Characters: alphanumeric (a-z, A-Z, 0-9) and underscore (_)
///
/// # Examples
///
/// ```
/// use miniboard::auth::validation::validate_username;
///
/// assert!(validate_username("john_doe").is_ok());
/// assert!(validate_username("ab").is_err()); // too short
/// assert!(validate_username("john-doe").is_err()); // hyphen
/// ```
pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    if username.len() < MIN_USERNAME_LENGTH {
        return Err(ValidationError::UsernameTooShort);
    }
    if username.len() > MAX_USERNAME_LENGTH {
        return Err(ValidationError::UsernameTooLong);
    }

    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        return Err(ValidationError::UsernameInvalidChars);
    }

    Ok(())
}

/// Validate a display name.
pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::NameEmpty);
    }
    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(ValidationError::NameTooLong);
    }
    if name.chars().any(|c| c.is_control()) {
        return Err(ValidationError::NameInvalidChars);
    }
    Ok(())
}

/// Validate all signup fields, stopping at the first failure.
pub fn validate_signup(username: &str, password: &str, name: &str) -> Result<(), ValidationError> {
    validate_username(username)?;
    validate_password(password)?;
    validate_name(name)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_length_bounds() {
        assert_eq!(validate_username("ab"), Err(ValidationError::UsernameTooShort));
        assert!(validate_username("abc").is_ok());
        assert!(validate_username(&"a".repeat(20)).is_ok());
        assert_eq!(
            validate_username(&"a".repeat(21)),
            Err(ValidationError::UsernameTooLong)
        );
    }

    #[test]
    fn test_username_chars() {
        assert!(validate_username("User_01").is_ok());
        assert_eq!(
            validate_username("user name"),
            Err(ValidationError::UsernameInvalidChars)
        );
        assert_eq!(
            validate_username("user.name"),
            Err(ValidationError::UsernameInvalidChars)
        );
        assert_eq!(
            validate_username("유저이름"),
            Err(ValidationError::UsernameInvalidChars)
        );
    }

    #[test]
    fn test_validate_name() {
        assert!(validate_name("Alice").is_ok());
        assert!(validate_name("김철수").is_ok());
        assert_eq!(validate_name("   "), Err(ValidationError::NameEmpty));
        assert_eq!(
            validate_name(&"x".repeat(21)),
            Err(ValidationError::NameTooLong)
        );
        assert_eq!(
            validate_name("bad\u{7}name"),
            Err(ValidationError::NameInvalidChars)
        );
    }

    #[test]
    fn test_validate_signup() {
        assert!(validate_signup("alice", "password123", "Alice").is_ok());
        assert!(matches!(
            validate_signup("alice", "short", "Alice"),
            Err(ValidationError::Password(_))
        ));
        assert_eq!(
            validate_signup("alice", "password123", ""),
            Err(ValidationError::NameEmpty)
        );
    }
}
