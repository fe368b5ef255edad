//! Tag parsing configuration.
//!
//! The only tunable today is the architecture enumeration that charm tags
//! use to tell an architecture segment from a series segment.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{grammar, TagError};

/// Environment variable holding a comma-separated architecture list.
pub const ARCHITECTURES_ENV: &str = "PLFM_TAGS_ARCHITECTURES";

/// Architectures recognised when no configuration is supplied.
pub const DEFAULT_ARCHITECTURES: [&str; 5] = ["amd64", "arm64", "ppc64el", "s390x", "riscv64"];

/// Configuration consulted by grammar rules that are data, not syntax.
///
/// Deserializing validates; missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTagConfig")]
pub struct TagConfig {
    /// Architecture tokens a charm URL may lead with.
    pub architectures: BTreeSet<String>,
}

#[derive(Deserialize)]
#[serde(default)]
struct RawTagConfig {
    architectures: BTreeSet<String>,
}

impl Default for RawTagConfig {
    fn default() -> Self {
        Self {
            architectures: TagConfig::default().architectures,
        }
    }
}

impl TryFrom<RawTagConfig> for TagConfig {
    type Error = TagError;

    fn try_from(raw: RawTagConfig) -> Result<Self, Self::Error> {
        Self::with_architectures(raw.architectures)
    }
}

impl Default for TagConfig {
    fn default() -> Self {
        Self {
            architectures: DEFAULT_ARCHITECTURES
                .iter()
                .map(|arch| arch.to_string())
                .collect(),
        }
    }
}

impl TagConfig {
    /// Builds a configuration recognising exactly the given architectures.
    pub fn with_architectures<I, S>(architectures: I) -> Result<Self, TagError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let config = Self {
            architectures: architectures.into_iter().map(Into::into).collect(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from environment variables.
    ///
    /// Falls back to the defaults when `PLFM_TAGS_ARCHITECTURES` is unset.
    pub fn from_env() -> Result<Self, TagError> {
        let config = match std::env::var(ARCHITECTURES_ENV) {
            Ok(raw) => Self::with_architectures(
                raw.split(',')
                    .map(str::trim)
                    .filter(|arch| !arch.is_empty()),
            )?,
            Err(_) => Self::default(),
        };

        debug!(
            architectures = ?config.architectures,
            "Loaded tag configuration"
        );
        Ok(config)
    }

    /// Checks every architecture token is usable as a charm URL segment.
    pub fn validate(&self) -> Result<(), TagError> {
        if self.architectures.is_empty() {
            return Err(TagError::InvalidConfig {
                message: "at least one architecture is required".to_string(),
            });
        }
        if let Some(bad) = self
            .architectures
            .iter()
            .find(|arch| !grammar::charm_segment().is_match(arch))
        {
            return Err(TagError::InvalidConfig {
                message: format!("invalid architecture {bad:?}"),
            });
        }
        Ok(())
    }

    /// Returns true if `arch` is a recognised architecture.
    #[must_use]
    pub fn is_architecture(&self, arch: &str) -> bool {
        self.architectures.contains(arch)
    }
}
