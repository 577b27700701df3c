//! Username/password pair submitted by the login and registration forms.
//!
//! Values are kept exactly as submitted: no trimming, no case folding. The
//! database compares them byte-for-byte against what registration stored.

use std::fmt;

use serde::Deserialize;

use crate::error::CoreError;

/// Longest username or password accepted from a form.
pub const MAX_FIELD_LENGTH: usize = 255;

/// Form body for `POST /login` and `POST /register`.
///
/// Missing form fields deserialize as empty strings and then fail
/// [`validate`](Self::validate).
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Check that both fields are present, within [`MAX_FIELD_LENGTH`], and
    /// free of NUL characters.
    ///
    /// Any other content, SQL metacharacters included, is accepted; it is
    /// only ever bound as a statement parameter.
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_field("username", &self.username)?;
        validate_field("password", &self.password)
    }
}

fn validate_field(name: &str, value: &str) -> Result<(), CoreError> {
    if value.is_empty() {
        return Err(CoreError::Validation(format!("{name} must not be empty")));
    }
    // PostgreSQL text cannot hold NUL.
    if value.contains('\0') {
        return Err(CoreError::Validation(format!(
            "{name} must not contain NUL characters"
        )));
    }
    if value.chars().count() > MAX_FIELD_LENGTH {
        return Err(CoreError::Validation(format!(
            "{name} must be at most {MAX_FIELD_LENGTH} characters long"
        )));
    }
    Ok(())
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}
