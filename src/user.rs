//! The identifier of the user that owns a transaction.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::Error;

/// A newtype wrapper for the opaque string that identifies a user.
///
/// Users are managed by an external identity provider, so the ID is never
/// checked against a user table. The only guarantee is that it is not empty.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Create a user ID from a string.
    ///
    /// # Errors
    /// Returns [Error::MissingUserId] if `id` is empty.
    pub fn new(id: &str) -> Result<Self, Error> {
        if id.is_empty() {
            return Err(Error::MissingUserId);
        }

        Ok(Self(id.to_owned()))
    }

    /// Create a user ID without checking that it is non-empty.
    ///
    /// The caller should ensure the string is not empty.
    pub fn new_unchecked(id: &str) -> Self {
        Self(id.to_owned())
    }

    /// The user ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use crate::{Error, UserId};

    #[test]
    fn empty_id_is_rejected() {
        assert_eq!(UserId::new(""), Err(Error::MissingUserId));
    }

    #[test]
    fn any_non_empty_id_is_accepted() {
        let id = UserId::new("user_2abc").unwrap();

        assert_eq!(id.as_str(), "user_2abc");
        assert_eq!(id.to_string(), "user_2abc");
    }
}
