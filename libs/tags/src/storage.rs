//! Storage instance, volume, and filesystem tags.

use std::fmt;

use crate::{grammar, structured, MachineTag, TagError, TagKind};

/// Returns whether `id` is a valid storage instance id (`<name>/<number>`).
pub fn is_valid_storage(id: &str) -> bool {
    grammar::storage().is_match(id)
}

/// Returns whether `id` is a valid volume id.
pub fn is_valid_volume(id: &str) -> bool {
    grammar::machine_scoped().is_match(id)
}

/// Returns whether `id` is a valid filesystem id.
pub fn is_valid_filesystem(id: &str) -> bool {
    grammar::machine_scoped().is_match(id)
}

/// Returns the storage name of a storage instance id, e.g. `data` for
/// `data/0`.
pub fn storage_name(id: &str) -> Result<String, TagError> {
    let caps = grammar::storage()
        .captures(id)
        .ok_or_else(|| TagError::invalid_id(TagKind::Storage, id))?;
    Ok(caps.get(1).map_or("", |m| m.as_str()).to_string())
}

/// A tag identifying a storage instance.
///
/// Storage names follow the application grammar, so only the last `/` is
/// swapped for `-` in the canonical string.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StorageTag {
    id: String,
}

impl StorageTag {
    /// The kind of this tag type.
    pub const KIND: TagKind = TagKind::Storage;

    /// Creates a tag for the storage instance with the given id.
    pub fn new(id: impl Into<String>) -> Result<Self, TagError> {
        let id = id.into();
        if !is_valid_storage(&id) {
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

    /// Returns the storage instance id, e.g. `data/0`.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the storage name, e.g. `data`.
    #[must_use]
    pub fn storage_name(&self) -> &str {
        self.id.rsplit_once('/').map_or(&self.id, |(name, _)| name)
    }
}

impl fmt::Display for StorageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", Self::KIND, structured::last_slash_to_hyphen(&self.id))
    }
}

impl_tag_serde!(StorageTag);

/// Defines a tag whose id is a number, optionally scoped to a machine as
/// `<machine>/<number>`. Machine ids contain no hyphens, so every `/` maps
/// to `-` in the canonical string.
macro_rules! define_machine_scoped_tag {
    ($(#[$meta:meta])* $name:ident, $kind:expr, $validator:path) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name {
            id: String,
        }

        impl $name {
            /// The kind of this tag type.
            pub const KIND: TagKind = $kind;

            /// Creates a tag, failing if `id` is not valid for this kind.
            pub fn new(id: impl Into<String>) -> Result<Self, TagError> {
                let id = id.into();
                if !$validator(&id) {
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

            /// Returns the id, e.g. `0/lxd/1/3` or `7`.
            #[must_use]
            pub fn id(&self) -> &str {
                &self.id
            }

            /// Returns the machine this id is scoped to, if any.
            #[must_use]
            pub fn machine(&self) -> Option<MachineTag> {
                let (machine, _) = self.id.rsplit_once('/')?;
                MachineTag::new(machine).ok()
            }

            /// Returns true if the id is scoped to a machine.
            #[must_use]
            pub fn is_machine_scoped(&self) -> bool {
                self.id.contains('/')
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}-{}", Self::KIND, structured::slashes_to_hyphens(&self.id))
            }
        }

        impl_tag_serde!($name);
    };
}

define_machine_scoped_tag!(
    /// A tag identifying a volume.
    VolumeTag,
    TagKind::Volume,
    is_valid_volume
);

define_machine_scoped_tag!(
    /// A tag identifying a filesystem.
    FilesystemTag,
    TagKind::Filesystem,
    is_valid_filesystem
);
