//! Action tags.
//!
//! An action id is the receiver it was queued against, the `_a_` marker,
//! and a sequence number: `mysql/3_a_11`. The receiver is a unit or an
//! application name. The `/` of a unit receiver stays literal in the
//! canonical string, since the marker already delimits the receiver.

use std::fmt;

use crate::dispatch::{ReceiverProbe, DEFAULT_RECEIVER_PROBES};
use crate::{grammar, structured, Tag, TagError, TagKind};

/// Returns whether `id` is a valid `<receiver>_a_<sequence>` action id.
pub fn is_valid_action(id: &str) -> bool {
    split_action_id(id).is_some()
}

/// Returns whether `prefix` names a unit or application that actions can be
/// queued against.
pub fn is_valid_action_receiver(prefix: &str) -> bool {
    DEFAULT_RECEIVER_PROBES
        .iter()
        .any(|probe| (probe.matches)(prefix))
}

fn split_action_id(id: &str) -> Option<(&str, u64)> {
    let (prefix, sequence) = structured::split_marker(id, grammar::ACTION_MARKER)?;
    if !is_valid_action_receiver(prefix) || !grammar::number().is_match(sequence) {
        return None;
    }
    Some((prefix, sequence.parse().ok()?))
}

/// A tag identifying an action queued against a unit or application.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ActionTag {
    prefix: String,
    sequence: u64,
}

impl ActionTag {
    /// The kind of this tag type.
    pub const KIND: TagKind = TagKind::Action;

    /// Creates a tag for the `sequence`th action queued against `prefix`.
    pub fn new(prefix: &str, sequence: u64) -> Result<Self, TagError> {
        if !is_valid_action_receiver(prefix) {
            return Err(TagError::invalid_id(
                Self::KIND,
                format!("{prefix}{}{sequence}", grammar::ACTION_MARKER),
            ));
        }
        Ok(Self {
            prefix: prefix.to_string(),
            sequence,
        })
    }

    /// Creates a tag from a full `<receiver>_a_<sequence>` id.
    pub fn from_id(id: &str) -> Result<Self, TagError> {
        let (prefix, sequence) =
            split_action_id(id).ok_or_else(|| TagError::invalid_id(Self::KIND, id))?;
        Ok(Self {
            prefix: prefix.to_string(),
            sequence,
        })
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

    /// Returns the action id, e.g. `mysql/3_a_11`.
    #[must_use]
    pub fn id(&self) -> String {
        format!("{}{}{}", self.prefix, grammar::ACTION_MARKER, self.sequence)
    }

    /// Returns the receiver name the action was queued against.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Returns the action's sequence number.
    #[must_use]
    pub const fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Resolves the receiver into a unit or application tag.
    #[must_use]
    pub fn prefix_tag(&self) -> Option<Tag> {
        self.prefix_tag_with(DEFAULT_RECEIVER_PROBES)
    }

    /// Resolves the receiver with the first probe that accepts it. If no
    /// probe matches, the receiver is tried as a full tag string.
    #[must_use]
    pub fn prefix_tag_with(&self, probes: &[ReceiverProbe]) -> Option<Tag> {
        match probes.iter().find(|probe| (probe.matches)(&self.prefix)) {
            Some(probe) => (probe.build)(&self.prefix).ok(),
            None => crate::dispatch::parse_tag(&self.prefix).ok(),
        }
    }
}

impl fmt::Display for ActionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", Self::KIND, self.id())
    }
}

impl_tag_serde!(ActionTag);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ApplicationTag, UnitTag};

    #[test]
    fn test_action_ids() {
        for (id, valid) in [
            ("", false),
            ("service-name/0_a_0", true),
            ("service-name-0_a_0", false),
            ("service-name/0_a_11", true),
            ("wordpress_a_5", true),
            ("_a_0", false),
            ("_a_00", false),
            ("_a_01", false),
            ("mysql/0_a_", false),
            ("mysql/0_a_01", false),
            ("mysql/0_a_-1", false),
            ("mysql/0_a_1_a_2", false),
            ("mysql/0", false),
            ("mysql/0_a_18446744073709551616", false),
        ] {
            assert_eq!(is_valid_action(id), valid, "{id}");
            assert_eq!(ActionTag::from_id(id).is_ok(), valid, "{id}");
        }
    }

    #[test]
    fn test_new_action_tag() {
        let tag = ActionTag::new("mysql/3", 11).unwrap();
        assert_eq!(tag.to_string(), "action-mysql/3_a_11");
        assert_eq!(tag.id(), "mysql/3_a_11");
        assert_eq!(tag.prefix(), "mysql/3");
        assert_eq!(tag.sequence(), 11);

        assert_eq!(
            ActionTag::new("mysql-3", 1),
            Err(TagError::InvalidIdentifier {
                kind: TagKind::Action,
                id: "mysql-3_a_1".to_string()
            })
        );
        assert!(ActionTag::new("", 0).is_err());
    }

    #[test]
    fn test_receiver_unit_number_must_fit() {
        let largest = "mysql/18446744073709551615";
        assert!(is_valid_action_receiver(largest));
        let tag = ActionTag::new(largest, 0).unwrap();
        assert_eq!(tag.prefix_tag(), Some(Tag::Unit(UnitTag::new(largest).unwrap())));

        let overflow = "mysql/18446744073709551616";
        assert!(!is_valid_action_receiver(overflow));
        assert!(ActionTag::new(overflow, 0).is_err());
        assert!(!is_valid_action(&format!("{overflow}_a_0")));
    }

    #[test]
    fn test_prefix_tag_prefers_unit() {
        let unit = ActionTag::new("mysql/3", 0).unwrap();
        assert_eq!(
            unit.prefix_tag(),
            Some(Tag::Unit(UnitTag::new("mysql/3").unwrap()))
        );

        let application = ActionTag::new("mysql", 0).unwrap();
        assert_eq!(
            application.prefix_tag(),
            Some(Tag::Application(ApplicationTag::new("mysql").unwrap()))
        );
    }

    #[test]
    fn test_prefix_tag_with_custom_probes() {
        fn never(_: &str) -> bool {
            false
        }
        fn unreachable_build(id: &str) -> Result<Tag, TagError> {
            Err(TagError::not_a_tag(id))
        }
        let probes = [ReceiverProbe {
            kind: TagKind::Unit,
            matches: never,
            build: unreachable_build,
        }];

        // No probe claims the receiver and it is not a tag string either.
        let tag = ActionTag::new("mysql/3", 0).unwrap();
        assert_eq!(tag.prefix_tag_with(&probes), None);
        assert_eq!(tag.prefix_tag_with(&[]), None);
    }
}
