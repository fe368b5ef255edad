//! The closed set of tag kinds.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::TagError;

/// The entity category a tag identifies.
///
/// The wire token (`as_str`) is the part of a canonical tag string before
/// the first `-`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagKind {
    Machine,
    Unit,
    Application,
    User,
    Model,
    Controller,
    Action,
    Operation,
    Storage,
    Filesystem,
    Volume,
    Space,
    Subnet,
    Cloud,
    #[serde(rename = "cloudcred")]
    CloudCredential,
    #[serde(rename = "applicationoffer")]
    ApplicationOffer,
    #[serde(rename = "caasapplication")]
    CaasApplication,
    #[serde(rename = "caasunit")]
    CaasUnit,
    Charm,
    Payload,
    Disk,
    Network,
}

impl TagKind {
    /// Every kind, in registry order.
    pub const ALL: [TagKind; 22] = [
        TagKind::Machine,
        TagKind::Unit,
        TagKind::Application,
        TagKind::User,
        TagKind::Model,
        TagKind::Controller,
        TagKind::Action,
        TagKind::Operation,
        TagKind::Storage,
        TagKind::Filesystem,
        TagKind::Volume,
        TagKind::Space,
        TagKind::Subnet,
        TagKind::Cloud,
        TagKind::CloudCredential,
        TagKind::ApplicationOffer,
        TagKind::CaasApplication,
        TagKind::CaasUnit,
        TagKind::Charm,
        TagKind::Payload,
        TagKind::Disk,
        TagKind::Network,
    ];

    /// The wire token for this kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            TagKind::Machine => "machine",
            TagKind::Unit => "unit",
            TagKind::Application => "application",
            TagKind::User => "user",
            TagKind::Model => "model",
            TagKind::Controller => "controller",
            TagKind::Action => "action",
            TagKind::Operation => "operation",
            TagKind::Storage => "storage",
            TagKind::Filesystem => "filesystem",
            TagKind::Volume => "volume",
            TagKind::Space => "space",
            TagKind::Subnet => "subnet",
            TagKind::Cloud => "cloud",
            TagKind::CloudCredential => "cloudcred",
            TagKind::ApplicationOffer => "applicationoffer",
            TagKind::CaasApplication => "caasapplication",
            TagKind::CaasUnit => "caasunit",
            TagKind::Charm => "charm",
            TagKind::Payload => "payload",
            TagKind::Disk => "disk",
            TagKind::Network => "network",
        }
    }

    /// Looks up a kind by its wire token.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == token)
    }
}

impl fmt::Display for TagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TagKind {
    type Err = TagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_token(s).ok_or_else(|| TagError::not_a_tag(s))
    }
}
