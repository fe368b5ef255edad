//! Payload tags.
//!
//! A payload is named by its charm-defined class and an opaque id chosen by
//! the workload. The raw id may contain anything, including `/`, so the tag
//! id carries it base64-encoded with `/` swapped for `.`, which keeps exactly
//! one `/` between class and encoded id. Raw ids are bytes; they need not
//! be UTF-8.

use std::fmt;

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::{grammar, TagError, TagKind};

/// Returns whether `id` is a valid `<class>/<encoded-id>` payload id.
pub fn is_valid_payload(id: &str) -> bool {
    PayloadTag::from_id(id).is_ok()
}

/// Returns whether `class` is a valid payload class name.
pub fn is_valid_payload_class(class: &str) -> bool {
    grammar::payload_class().is_match(class)
}

fn encode_raw_id(raw: &[u8]) -> String {
    STANDARD.encode(raw).replace('/', ".")
}

fn decode_raw_id(encoded: &str) -> Option<Vec<u8>> {
    if encoded.contains('/') {
        return None;
    }
    STANDARD.decode(encoded.replace('.', "/")).ok()
}

/// A tag identifying a workload payload.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PayloadTag {
    class: String,
    raw_id: Vec<u8>,
}

impl PayloadTag {
    /// The kind of this tag type.
    pub const KIND: TagKind = TagKind::Payload;

    /// Creates a tag for the payload `raw_id` of the given class.
    pub fn new(class: &str, raw_id: impl AsRef<[u8]>) -> Result<Self, TagError> {
        let raw_id = raw_id.as_ref();
        if !is_valid_payload_class(class) || raw_id.is_empty() {
            return Err(TagError::invalid_id(
                Self::KIND,
                format!("{class}/{}", String::from_utf8_lossy(raw_id)),
            ));
        }
        Ok(Self {
            class: class.to_string(),
            raw_id: raw_id.to_vec(),
        })
    }

    /// Creates a tag from the human-facing `<class>/<raw-id>` form. The
    /// class ends at the first `/`; the rest is the raw id.
    pub fn from_full_id(full_id: &str) -> Result<Self, TagError> {
        let (class, raw_id) = full_id
            .split_once('/')
            .ok_or_else(|| TagError::invalid_id(Self::KIND, full_id))?;
        Self::new(class, raw_id)
    }

    /// Creates a tag from its `<class>/<encoded-id>` id.
    pub fn from_id(id: &str) -> Result<Self, TagError> {
        let invalid = || TagError::invalid_id(Self::KIND, id);
        let caps = grammar::payload().captures(id).ok_or_else(invalid)?;
        let class = caps.get(1).map_or("", |m| m.as_str());
        let encoded = caps.get(2).map_or("", |m| m.as_str());
        let raw_id = decode_raw_id(encoded).ok_or_else(invalid)?;
        Self::new(class, raw_id).map_err(|_| invalid())
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

    /// Returns `<class>/<encoded-id>`.
    #[must_use]
    pub fn id(&self) -> String {
        format!("{}/{}", self.class, encode_raw_id(&self.raw_id))
    }

    /// Returns `<class>/<raw-id>`. For display only: the raw id may itself
    /// contain `/`, and bytes that are not UTF-8 are replaced.
    #[must_use]
    pub fn full_id(&self) -> String {
        format!("{}/{}", self.class, String::from_utf8_lossy(&self.raw_id))
    }

    #[must_use]
    pub fn class(&self) -> &str {
        &self.class
    }

    #[must_use]
    pub fn raw_id(&self) -> &[u8] {
        &self.raw_id
    }

    /// Returns the raw id if it is UTF-8.
    #[must_use]
    pub fn raw_id_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.raw_id).ok()
    }
}

impl fmt::Display for PayloadTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", Self::KIND, self.id())
    }
}

impl_tag_serde!(PayloadTag);
