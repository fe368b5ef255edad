//! Machine tags.
//!
//! A machine id is a number, optionally followed by `/<container-type>/<n>`
//! pairs for nested containers: `3`, `3/lxd/0`, `3/lxd/0/kvm/1`. In the
//! canonical string every `/` becomes `-`, which is unambiguous because the
//! grammar admits no hyphens.

use std::fmt;

use crate::{grammar, structured, TagError, TagKind};

/// Returns whether `id` is a valid machine id.
pub fn is_valid_machine(id: &str) -> bool {
    grammar::machine().is_match(id)
}

/// Returns whether `id` is a valid id of a machine inside a container.
pub fn is_valid_container_machine(id: &str) -> bool {
    is_valid_machine(id) && id.contains('/')
}

/// A tag identifying a machine or container.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MachineTag {
    id: String,
}

impl MachineTag {
    /// The kind of this tag type.
    pub const KIND: TagKind = TagKind::Machine;

    /// Creates a tag for the machine with the given id.
    pub fn new(id: impl Into<String>) -> Result<Self, TagError> {
        let id = id.into();
        if !is_valid_machine(&id) {
            return Err(TagError::invalid_id(Self::KIND, id));
        }
        Ok(Self { id })
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

    /// Returns the machine id, e.g. `3/lxd/0`.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns true if this machine is a container inside another machine.
    #[must_use]
    pub fn is_container(&self) -> bool {
        self.id.contains('/')
    }

    /// Returns the machine hosting this container, or `None` for a top-level
    /// machine.
    #[must_use]
    pub fn parent(&self) -> Option<MachineTag> {
        let (rest, _child) = self.id.rsplit_once('/')?;
        let (parent, _container_type) = rest.rsplit_once('/')?;
        Some(MachineTag {
            id: parent.to_string(),
        })
    }

    /// Returns the container type (e.g. `lxd`), or `None` for a top-level
    /// machine.
    #[must_use]
    pub fn container_type(&self) -> Option<&str> {
        let (rest, _child) = self.id.rsplit_once('/')?;
        rest.rsplit_once('/').map(|(_, container_type)| container_type)
    }

    /// Returns the final number in the id: the machine number for a
    /// top-level machine, the container number otherwise.
    #[must_use]
    pub fn child_id(&self) -> &str {
        self.id.rsplit_once('/').map_or(&self.id, |(_, child)| child)
    }
}

impl fmt::Display for MachineTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", Self::KIND, structured::slashes_to_hyphens(&self.id))
    }
}

impl_tag_serde!(MachineTag);
