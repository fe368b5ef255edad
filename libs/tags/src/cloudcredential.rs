//! Cloud credential tags.
//!
//! A credential is identified by the cloud it is for, the user owning it,
//! and its name: `aws/bob/default`. The canonical string joins the three
//! fields with `_` and escapes literal underscores as `%5f`, so
//! `manual_cloud/bob/foo_bar` renders as
//! `cloudcred-manual%5fcloud_bob_foo%5fbar`.

use std::fmt;

use crate::{grammar, structured, CloudTag, TagError, TagKind, UserTag};

/// Returns whether `id` is a valid `cloud/owner/name` credential id.
pub fn is_valid_cloud_credential(id: &str) -> bool {
    grammar::cloud_credential().is_match(id)
}

/// Returns whether `name` is a valid credential name.
pub fn is_valid_cloud_credential_name(name: &str) -> bool {
    grammar::cloud_credential_name().is_match(name)
}

/// A tag identifying a cloud credential.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CloudCredentialTag {
    cloud: CloudTag,
    owner: UserTag,
    name: String,
}

impl CloudCredentialTag {
    /// The kind of this tag type.
    pub const KIND: TagKind = TagKind::CloudCredential;

    /// Creates a tag from its three components.
    pub fn new(cloud: &str, owner: &str, name: &str) -> Result<Self, TagError> {
        let invalid = || TagError::invalid_id(Self::KIND, format!("{cloud}/{owner}/{name}"));
        if !is_valid_cloud_credential_name(name) {
            return Err(invalid());
        }
        Ok(Self {
            cloud: CloudTag::new(cloud).map_err(|_| invalid())?,
            owner: UserTag::new(owner).map_err(|_| invalid())?,
            name: name.to_string(),
        })
    }

    /// Creates a tag from a `cloud/owner/name` id.
    pub fn from_id(id: &str) -> Result<Self, TagError> {
        let caps = grammar::cloud_credential()
            .captures(id)
            .ok_or_else(|| TagError::invalid_id(Self::KIND, id))?;
        let field = |i| caps.get(i).map_or("", |m| m.as_str());
        Self::new(field(1), field(2), field(3))
    }

    /// Parses a tag from its canonical string.
    pub fn parse(s: &str) -> Result<Self, TagError> {
        crate::dispatch::parse_as(s)
    }

    /// Returns the kind of this tag.
    #[must_use]
    pub const fn kind(&self) -> TagKind {
        Self::KIND
    }

    /// Returns the `cloud/owner/name` id. A local owner has no domain.
    #[must_use]
    pub fn id(&self) -> String {
        format!("{}/{}/{}", self.cloud.id(), self.owner.id(), self.name)
    }

    /// Returns the id with the owner's domain always spelled out.
    #[must_use]
    pub fn canonical(&self) -> String {
        format!("{}/{}/{}", self.cloud.id(), self.owner.canonical(), self.name)
    }

    /// Returns the cloud this credential is for.
    #[must_use]
    pub fn cloud(&self) -> &CloudTag {
        &self.cloud
    }

    /// Returns the user owning this credential.
    #[must_use]
    pub fn owner(&self) -> &UserTag {
        &self.owner
    }

    /// Returns the credential name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for CloudCredentialTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let owner = self.owner.id();
        write!(
            f,
            "{}-{}",
            Self::KIND,
            structured::join_escaped([self.cloud.id(), owner.as_str(), self.name.as_str()])
        )
    }
}

impl_tag_serde!(CloudCredentialTag);
