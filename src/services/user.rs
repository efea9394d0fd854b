//! User service
//!
//! Registration, credential checks and user search. Email uniqueness and
//! format plus the password length floor are enforced here, before any
//! hashing or persistence happens.

use crate::db::repositories::UserRepository;
use crate::models::User;
use crate::services::password::{hash_password, verify_password};
use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;

/// Minimum accepted password length
const MIN_PASSWORD_LEN: usize = 6;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\w+([.-]?\w+)*@\w+([.-]?\w+)*(\.\w{2,3})+$").unwrap()
});

/// Error types for user service operations
#[derive(Debug, thiserror::Error)]
pub enum UserServiceError {
    /// Invalid input
    #[error("{0}")]
    Validation(String),

    /// Email is already registered
    #[error("User already exists")]
    UserExists,

    /// Credentials did not match
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Registration input
#[derive(Debug, Clone)]
pub struct RegisterInput {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// User service for registration, login and search
pub struct UserService {
    user_repo: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(user_repo: Arc<dyn UserRepository>) -> Self {
        Self { user_repo }
    }

    /// Register a new user.
    ///
    /// Fails with `UserExists` when the email is already taken, or
    /// `Validation` when name/email/password don't pass the field checks.
    pub async fn register(&self, input: RegisterInput) -> Result<User, UserServiceError> {
        self.validate_register_input(&input)?;

        if self
            .user_repo
            .get_by_email(&input.email)
            .await
            .context("Failed to check email")?
            .is_some()
        {
            return Err(UserServiceError::UserExists);
        }

        let password_hash = hash_password(&input.password).context("Failed to hash password")?;
        let user = User::new(input.name, input.email, password_hash);

        let created = self
            .user_repo
            .create(&user)
            .await
            .context("Failed to create user")?;

        Ok(created)
    }

    /// Check credentials and return the matching user.
    ///
    /// An unknown email and a wrong password both map to
    /// `InvalidCredentials` so the response never reveals which one failed.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, UserServiceError> {
        let user = self
            .user_repo
            .get_by_email(email)
            .await
            .context("Failed to look up user")?
            .ok_or(UserServiceError::InvalidCredentials)?;

        let matches = verify_password(password, &user.password_hash)
            .context("Failed to verify password")?;
        if !matches {
            return Err(UserServiceError::InvalidCredentials);
        }

        Ok(user)
    }

    /// Find users whose name contains `query` as a case-sensitive substring
    pub async fn search(&self, query: &str) -> Result<Vec<User>> {
        self.user_repo
            .search_by_name(query)
            .await
            .context("Error searching users.")
    }

    /// Resolve a user id to its record (used by the auth guard)
    pub async fn find_by_id(&self, id: i64) -> Result<Option<User>> {
        self.user_repo
            .get_by_id(id)
            .await
            .context("Failed to look up user")
    }

    fn validate_register_input(&self, input: &RegisterInput) -> Result<(), UserServiceError> {
        if input.name.trim().is_empty() {
            return Err(UserServiceError::Validation("Name is required".to_string()));
        }
        if !EMAIL_RE.is_match(&input.email) {
            return Err(UserServiceError::Validation(
                "Please fill a valid email address".to_string(),
            ));
        }
        if input.password.len() < MIN_PASSWORD_LEN {
            return Err(UserServiceError::Validation(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LEN
            )));
        }
        Ok(())
    }
}
