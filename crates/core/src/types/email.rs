//! Validated email address for the login and registration forms.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Why an email address was rejected.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EmailError {
    #[error("email cannot be empty")]
    Empty,

    /// Over the RFC 5321 length limit.
    #[error("email must be at most {0} characters")]
    TooLong(usize),

    /// Not of the form `local@domain` with both sides non-empty.
    #[error("email must look like name@domain")]
    Malformed,
}

/// A structurally valid email address.
///
/// Validation is deliberately shallow: the backend is the authority on
/// whether an account exists, this type only keeps obvious typos from
/// reaching the network.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// Maximum length of an email address (RFC 5321).
    pub const MAX_LENGTH: usize = 254;

    /// Validate and wrap an address.
    ///
    /// # Errors
    ///
    /// Rejects the empty string, anything over [`Self::MAX_LENGTH`], and
    /// anything without a non-empty local part and domain around an `@`.
    pub fn parse(s: &str) -> Result<Self, EmailError> {
        if s.is_empty() {
            return Err(EmailError::Empty);
        }
        if s.len() > Self::MAX_LENGTH {
            return Err(EmailError::TooLong(Self::MAX_LENGTH));
        }

        match s.split_once('@') {
            Some((local, domain)) if !local.is_empty() && !domain.is_empty() => {
                Ok(Self(s.to_owned()))
            }
            _ => Err(EmailError::Malformed),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper and return the inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Email {
    type Err = EmailError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
