//! Account records and credential rules.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::UserId;

/// Minimum accepted password length, in characters.
pub const MIN_PASSWORD_LEN: usize = 6;

/// A registered account, keyed in storage by its lower-cased email.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Stable identifier that namespaces the user's score keys.
    pub user_id: UserId,
    /// Lower-cased email address.
    pub email: String,
    /// Password hash in PHC string format.
    pub password_hash: String,
    /// Registration time.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new account with a fresh user id.
    #[must_use]
    pub fn new(email: &str, password_hash: String) -> Self {
        Self {
            user_id: UserId::generate(),
            email: normalize_email(email),
            password_hash,
            created_at: Utc::now(),
        }
    }
}

/// Emails are compared and stored lower-cased.
#[must_use]
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Accept `local@domain.tld` shaped addresses without whitespace.
///
/// # Errors
///
/// Returns `ValidationError::InvalidEmail` otherwise.
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    let mut parts = email.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(ValidationError::InvalidEmail);
    };

    let has_inner_dot = domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len());

    if local.is_empty() || email.chars().any(char::is_whitespace) || !has_inner_dot {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(())
}

/// Enforce the minimum password length.
///
/// # Errors
///
/// Returns `ValidationError::WeakPassword` for short passwords.
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::WeakPassword {
            min: MIN_PASSWORD_LEN,
        });
    }
    Ok(())
}
