//! Row ID - integer primary key assigned by the database

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a user, post, comment or category row
///
/// Rows are numbered by SQLite (`INTEGER PRIMARY KEY AUTOINCREMENT`), so an id is
/// only meaningful once the row has been inserted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowId(i64);

/// Id of a registered user
pub type UserId = RowId;

/// Id of a post
pub type PostId = RowId;

/// Id of a comment
pub type CommentId = RowId;

impl RowId {
    /// Create a RowId from a raw i64 value
    #[inline]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the inner i64 value
    #[inline]
    pub const fn into_inner(self) -> i64 {
        self.0
    }

    /// Parse from string representation
    pub fn parse(s: &str) -> Result<Self, RowIdParseError> {
        match s.parse::<i64>() {
            Ok(id) if id > 0 => Ok(Self(id)),
            _ => Err(RowIdParseError::InvalidFormat),
        }
    }
}

/// Error when parsing a RowId from a path segment or query string
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RowIdParseError {
    #[error("invalid id format")]
    InvalidFormat,
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for RowId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<RowId> for i64 {
    fn from(id: RowId) -> Self {
        id.0
    }
}

impl std::str::FromStr for RowId {
    type Err = RowIdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RowId::parse(s)
    }
}
