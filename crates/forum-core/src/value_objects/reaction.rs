//! Reaction value objects - what is being reacted to, and how

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

/// A like (+1) or a dislike (-1)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum ReactionValue {
    Like,
    Dislike,
}

impl ReactionValue {
    /// Stored integer form
    #[inline]
    pub const fn as_i64(self) -> i64 {
        match self {
            Self::Like => 1,
            Self::Dislike => -1,
        }
    }
}

impl TryFrom<i64> for ReactionValue {
    type Error = DomainError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Like),
            -1 => Ok(Self::Dislike),
            other => Err(DomainError::InvalidReactionValue(other)),
        }
    }
}

impl From<ReactionValue> for i64 {
    fn from(value: ReactionValue) -> Self {
        value.as_i64()
    }
}

/// Kind of content a reaction is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetKind {
    Post,
    Comment,
}

impl TargetKind {
    /// Stored text form
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Post => "post",
            Self::Comment => "comment",
        }
    }
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TargetKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "post" => Ok(Self::Post),
            "comment" => Ok(Self::Comment),
            other => Err(DomainError::InvalidTargetKind(other.to_string())),
        }
    }
}
