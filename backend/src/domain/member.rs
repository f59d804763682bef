//! Member identity.
//!
//! A member is created once with a username and a creation instant. The
//! creation instant is the lower bound for every fee charged to the member.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum username length in characters.
pub const USERNAME_MAX: usize = 64;

/// Validation errors raised while building member values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MemberValidationError {
    /// Member identifiers are positive.
    #[error("member id must be a positive integer")]
    InvalidId,
    /// Username was blank.
    #[error("username must not be empty")]
    EmptyUsername,
    /// Username exceeded [`USERNAME_MAX`] characters.
    #[error("username must be at most {max} characters")]
    UsernameTooLong {
        /// Maximum accepted length.
        max: usize,
    },
}

/// Store-assigned member identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct MemberId(i64);

impl MemberId {
    /// Validate a raw identifier.
    pub fn new(raw: i64) -> Result<Self, MemberValidationError> {
        if raw < 1 {
            return Err(MemberValidationError::InvalidId);
        }
        Ok(Self(raw))
    }

    /// Raw integer value.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i64> for MemberId {
    type Error = MemberValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<MemberId> for i64 {
    fn from(value: MemberId) -> Self {
        value.0
    }
}

/// Trimmed, non-empty username of at most [`USERNAME_MAX`] characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Validate and construct a username, trimming surrounding whitespace.
    ///
    /// # Examples
    /// ```
    /// use fee_ledger::domain::Username;
    ///
    /// let name = Username::new("  ada ").expect("valid username");
    /// assert_eq!(name.as_ref(), "ada");
    /// assert!(Username::new("   ").is_err());
    /// ```
    pub fn new(raw: impl Into<String>) -> Result<Self, MemberValidationError> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(MemberValidationError::EmptyUsername);
        }
        if trimmed.chars().count() > USERNAME_MAX {
            return Err(MemberValidationError::UsernameTooLong { max: USERNAME_MAX });
        }
        if trimmed.len() == raw.len() {
            Ok(Self(raw))
        } else {
            Ok(Self(trimmed.to_owned()))
        }
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl TryFrom<String> for Username {
    type Error = MemberValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

/// A stored member.
///
/// ## Invariants
/// - `id` and `created_at` never change after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    id: MemberId,
    username: Username,
    created_at: DateTime<Utc>,
}

impl Member {
    /// Assemble a member read back from a store.
    #[must_use]
    pub const fn new(id: MemberId, username: Username, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            username,
            created_at,
        }
    }

    /// Store-assigned identifier.
    #[must_use]
    pub const fn id(&self) -> MemberId {
        self.id
    }

    /// Current username.
    #[must_use]
    pub const fn username(&self) -> &Username {
        &self.username
    }

    /// Creation instant.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Copy of this member carrying a new username.
    #[must_use]
    pub fn renamed(&self, username: Username) -> Self {
        Self {
            username,
            ..self.clone()
        }
    }
}

/// Member awaiting insertion; the store assigns the identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMember {
    /// Username to store.
    pub username: Username,
    /// Creation instant to store.
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(0)]
    #[case(-4)]
    fn member_id_rejects_non_positive_values(#[case] raw: i64) {
        assert_eq!(MemberId::new(raw), Err(MemberValidationError::InvalidId));
    }

    #[rstest]
    fn member_id_deserialises_through_validation() {
        let parsed: Result<MemberId, _> = serde_json::from_str("0");
        assert!(parsed.is_err());
        let parsed: MemberId = serde_json::from_str("12").expect("valid id");
        assert_eq!(parsed.get(), 12);
    }

    #[rstest]
    #[case("", MemberValidationError::EmptyUsername)]
    #[case(" \t ", MemberValidationError::EmptyUsername)]
    fn username_rejects_blank_values(#[case] raw: &str, #[case] expected: MemberValidationError) {
        assert_eq!(Username::new(raw), Err(expected));
    }

    #[rstest]
    fn username_length_counts_characters_not_bytes() {
        let at_limit = "é".repeat(USERNAME_MAX);
        assert!(Username::new(at_limit).is_ok());

        let too_long = "a".repeat(USERNAME_MAX + 1);
        assert_eq!(
            Username::new(too_long),
            Err(MemberValidationError::UsernameTooLong { max: USERNAME_MAX })
        );
    }

    #[rstest]
    fn renamed_keeps_identity_and_creation_time() {
        let created_at = Utc
            .with_ymd_and_hms(2022, 1, 1, 0, 0, 0)
            .single()
            .expect("valid timestamp");
        let id = MemberId::new(3).expect("valid id");
        let member = Member::new(id, Username::new("ada").expect("valid"), created_at);

        let renamed = member.renamed(Username::new("grace").expect("valid"));

        assert_eq!(renamed.id(), id);
        assert_eq!(renamed.created_at(), created_at);
        assert_eq!(renamed.username().as_ref(), "grace");
    }
}
