//! Charm tags.
//!
//! A charm is identified by a URL of the form
//! `[schema:][architecture/][series/]name[-revision]`. Architecture and
//! series share a character grammar, so when only one of them is present
//! it is an architecture only if the active [`TagConfig`] lists it. With
//! both present, the first is always the architecture.

use std::fmt;

use crate::{dispatch, grammar, TagConfig, TagError, TagKind};

/// Where a charm comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CharmSource {
    /// A charm deployed from the local filesystem.
    Local,
    /// A charm published to Charmhub. The default when no schema is given.
    CharmHub,
}

impl CharmSource {
    /// Returns the URL schema for this source.
    #[must_use]
    pub const fn schema(self) -> &'static str {
        match self {
            CharmSource::Local => "local",
            CharmSource::CharmHub => "ch",
        }
    }

    fn from_schema(schema: &str) -> Option<Self> {
        match schema {
            "local" => Some(CharmSource::Local),
            "ch" => Some(CharmSource::CharmHub),
            _ => None,
        }
    }
}

impl fmt::Display for CharmSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.schema())
    }
}

/// Returns whether `url` is a valid charm URL under the process-wide
/// configuration.
pub fn is_valid_charm(url: &str) -> bool {
    is_valid_charm_with(url, dispatch::default_parser().config())
}

/// Returns whether `url` is a valid charm URL under `config`.
pub fn is_valid_charm_with(url: &str, config: &TagConfig) -> bool {
    CharmTag::new_with(url, config).is_ok()
}

/// A tag identifying a charm.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CharmTag {
    source: CharmSource,
    architecture: Option<String>,
    series: Option<String>,
    name: String,
    revision: Option<u64>,
}

impl CharmTag {
    /// The kind of this tag type.
    pub const KIND: TagKind = TagKind::Charm;

    /// Creates a tag from a charm URL using the process-wide configuration.
    pub fn new(url: &str) -> Result<Self, TagError> {
        Self::new_with(url, dispatch::default_parser().config())
    }

    /// Creates a tag from a charm URL, consulting `config` for the set of
    /// known architectures.
    ///
    /// A tag built under a non-default config reads back with
    /// [`CharmTag::parse_with`] and the same config.
    pub fn new_with(url: &str, config: &TagConfig) -> Result<Self, TagError> {
        let invalid = || TagError::invalid_id(Self::KIND, url);
        if !grammar::charm().is_match(url) {
            return Err(invalid());
        }

        let (source, path) = match url.split_once(':') {
            Some((schema, path)) => (CharmSource::from_schema(schema).ok_or_else(invalid)?, path),
            None => (CharmSource::CharmHub, url),
        };

        let segments: Vec<&str> = path.split('/').collect();
        let (architecture, series, last) = match segments.as_slice() {
            [last] => (None, None, *last),
            [first, last] if config.is_architecture(first) => (Some(*first), None, *last),
            [first, last] => (None, Some(*first), *last),
            [arch, series, last] => (Some(*arch), Some(*series), *last),
            _ => return Err(invalid()),
        };

        let (name, revision) = split_revision(last).ok_or_else(invalid)?;
        Ok(Self {
            source,
            architecture: architecture.map(str::to_string),
            series: series.map(str::to_string),
            name: name.to_string(),
            revision,
        })
    }

    /// Parses a tag from its canonical string.
    pub fn parse(s: &str) -> Result<Self, TagError> {
        dispatch::parse_as(s)
    }

    /// Parses a tag from its canonical string under `config`.
    pub fn parse_with(s: &str, config: &TagConfig) -> Result<Self, TagError> {
        dispatch::parse_as_with(s, config)
    }

    /// Returns the kind of this tag.
    #[must_use]
    pub const fn kind(&self) -> TagKind {
        Self::KIND
    }

    /// Returns the charm URL with the schema always present and absent
    /// segments omitted, e.g. `ch:amd64/mysql-42`.
    #[must_use]
    pub fn id(&self) -> String {
        let mut id = format!("{}:", self.source.schema());
        for segment in [&self.architecture, &self.series].into_iter().flatten() {
            id.push_str(segment);
            id.push('/');
        }
        id.push_str(&self.name);
        if let Some(revision) = self.revision {
            id.push('-');
            id.push_str(&revision.to_string());
        }
        id
    }

    /// Returns where the charm comes from.
    #[must_use]
    pub const fn source(&self) -> CharmSource {
        self.source
    }

    /// Returns the URL schema, `local` or `ch`.
    #[must_use]
    pub const fn schema(&self) -> &'static str {
        self.source.schema()
    }

    #[must_use]
    pub fn architecture(&self) -> Option<&str> {
        self.architecture.as_deref()
    }

    #[must_use]
    pub fn series(&self) -> Option<&str> {
        self.series.as_deref()
    }

    /// Returns the charm name without revision.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the revision, or `None` if the URL carries none (or `-1`).
    #[must_use]
    pub const fn revision(&self) -> Option<u64> {
        self.revision
    }
}

/// Splits `name-42` into `("name", Some(42))` by scanning back over the
/// trailing digits. A `--1` suffix means no revision. Returns `None` only
/// when the revision does not fit in a `u64`.
fn split_revision(segment: &str) -> Option<(&str, Option<u64>)> {
    if let Some(name) = segment.strip_suffix("--1") {
        return Some((name, None));
    }
    let digits = segment.bytes().rev().take_while(u8::is_ascii_digit).count();
    let split = segment.len() - digits;
    if digits == 0 || split < 2 || segment.as_bytes()[split - 1] != b'-' {
        return Some((segment, None));
    }
    let revision = segment[split..].parse().ok()?;
    Some((&segment[..split - 1], Some(revision)))
}

impl fmt::Display for CharmTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", Self::KIND, self.id())
    }
}

impl_tag_serde!(CharmTag);
