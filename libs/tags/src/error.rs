//! Error types for tag parsing and validation.

use thiserror::Error;

use crate::TagKind;

/// Errors that can occur when parsing, constructing, or validating tags.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TagError {
    /// The string has no recognisable `<kind>-` prefix.
    #[error("{tag:?} is not a valid tag")]
    NotATag { tag: String },

    /// The kind prefix was recognised but the payload fails that kind's grammar.
    #[error("{tag:?} is not a valid {kind} tag")]
    InvalidTagOfKind { tag: String, kind: TagKind },

    /// The tag is well formed but of a different kind than the caller asked for.
    #[error("{tag:?} is not a valid {expected} tag: found a {actual} tag")]
    KindMismatch {
        tag: String,
        expected: TagKind,
        actual: TagKind,
    },

    /// A constructor was handed components that do not form a valid id.
    #[error("{id:?} is not a valid {kind} id")]
    InvalidIdentifier { kind: TagKind, id: String },

    /// An application name was rejected, with a human-readable reason.
    #[error("invalid application name {name:?}{reason}")]
    InvalidApplicationName { name: String, reason: String },

    /// A user domain was rejected.
    #[error("invalid user domain {domain:?}")]
    InvalidUserDomain { domain: String },

    /// A bare (domain-less) user name was rejected.
    #[error("invalid user name {name:?}")]
    InvalidUserName { name: String },

    /// The tag configuration is invalid.
    #[error("invalid tag configuration: {message}")]
    InvalidConfig { message: String },
}

impl TagError {
    pub(crate) fn not_a_tag(tag: &str) -> Self {
        TagError::NotATag {
            tag: tag.to_string(),
        }
    }

    pub(crate) fn invalid_tag(tag: &str, kind: TagKind) -> Self {
        TagError::InvalidTagOfKind {
            tag: tag.to_string(),
            kind,
        }
    }

    pub(crate) fn invalid_id(kind: TagKind, id: impl Into<String>) -> Self {
        TagError::InvalidIdentifier {
            kind,
            id: id.into(),
        }
    }

    /// Returns true if the input was not recognisable as a tag at all.
    pub fn is_not_a_tag(&self) -> bool {
        matches!(self, TagError::NotATag { .. })
    }

    /// Returns true if this error indicates the tag was of an unexpected kind.
    pub fn is_kind_mismatch(&self) -> bool {
        matches!(self, TagError::KindMismatch { .. })
    }

    /// Returns true if this error came from deserializing a tag string,
    /// as opposed to programmatic construction.
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            TagError::NotATag { .. }
                | TagError::InvalidTagOfKind { .. }
                | TagError::KindMismatch { .. }
        )
    }

    /// The kind this error is about, if any.
    pub fn kind(&self) -> Option<TagKind> {
        match self {
            TagError::InvalidTagOfKind { kind, .. } | TagError::InvalidIdentifier { kind, .. } => {
                Some(*kind)
            }
            TagError::KindMismatch { expected, .. } => Some(*expected),
            TagError::InvalidApplicationName { .. } => Some(TagKind::Application),
            TagError::InvalidUserDomain { .. } | TagError::InvalidUserName { .. } => {
                Some(TagKind::User)
            }
            TagError::NotATag { .. } | TagError::InvalidConfig { .. } => None,
        }
    }
}
