//! Unit tags.
//!
//! A unit name is `<application>/<number>`. Application names may contain
//! hyphens, so the canonical string swaps only the last `/` for `-` and the
//! parser swaps only the last `-` back.

use std::fmt;

use crate::{grammar, TagError, TagKind};

/// Returns whether `name` is a valid unit name.
pub fn is_valid_unit(name: &str) -> bool {
    split_unit_name(name, TagKind::Unit).is_ok()
}

/// Returns whether `name` is a valid CAAS unit name.
pub fn is_valid_caas_unit(name: &str) -> bool {
    split_unit_name(name, TagKind::CaasUnit).is_ok()
}

/// Returns the name of the application a unit belongs to.
pub fn unit_application(name: &str) -> Result<String, TagError> {
    split_unit_name(name, TagKind::Unit).map(|(application, _)| application.to_string())
}

/// Returns the name of the application a CAAS unit belongs to.
pub fn caas_unit_application(name: &str) -> Result<String, TagError> {
    split_unit_name(name, TagKind::CaasUnit).map(|(application, _)| application.to_string())
}

fn split_unit_name(name: &str, kind: TagKind) -> Result<(&str, u64), TagError> {
    let caps = grammar::unit()
        .captures(name)
        .ok_or_else(|| TagError::invalid_id(kind, name))?;
    let application = caps.get(1).map_or("", |m| m.as_str());
    let number = caps
        .get(2)
        .and_then(|m| m.as_str().parse().ok())
        .ok_or_else(|| TagError::invalid_id(kind, name))?;
    Ok((application, number))
}

macro_rules! define_unit_tag {
    ($(#[$meta:meta])* $name:ident, $kind:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name {
            application: String,
            number: u64,
        }

        impl $name {
            /// The kind of this tag type.
            pub const KIND: TagKind = $kind;

            /// Creates a tag for the unit with the given `application/number` name.
            pub fn new(name: &str) -> Result<Self, TagError> {
                let (application, number) = split_unit_name(name, Self::KIND)?;
                Ok(Self {
                    application: application.to_string(),
                    number,
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

            /// Returns the unit name, e.g. `wordpress/0`.
            #[must_use]
            pub fn id(&self) -> String {
                format!("{}/{}", self.application, self.number)
            }

            /// Returns the name of the application this unit belongs to.
            #[must_use]
            pub fn application(&self) -> &str {
                &self.application
            }

            /// Returns the unit number.
            #[must_use]
            pub const fn number(&self) -> u64 {
                self.number
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}-{}-{}", Self::KIND, self.application, self.number)
            }
        }

        impl_tag_serde!($name);
    };
}

define_unit_tag!(
    /// A tag identifying a unit of an application.
    UnitTag,
    TagKind::Unit
);

impl UnitTag {
    /// Returns the tag of the application this unit belongs to.
    #[must_use]
    pub fn application_tag(&self) -> crate::ApplicationTag {
        crate::ApplicationTag::from_unit_application(&self.application)
    }
}

define_unit_tag!(
    /// A tag identifying a unit of an application on a container substrate.
    CaasUnitTag,
    TagKind::CaasUnit
);
