//! Authentication module for miniboard.
//!
//! This module provides password hashing, signup validation, member
//! registration and credential checks.

mod password;
mod registration;
pub mod validation;

pub use password::{
    hash_password, validate_password, verify_password, PasswordError, MAX_PASSWORD_LENGTH,
    MIN_PASSWORD_LENGTH,
};
pub use registration::{authenticate, signup, SignupRequest};
pub use validation::ValidationError;
