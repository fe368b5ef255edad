//! Macros for defining tag types.

/// Implements `FromStr`, `Serialize`, and `Deserialize` for a tag type in
/// terms of its canonical string.
///
/// The type must already implement `Display` (rendering the canonical
/// string) and have an inherent `parse(&str) -> Result<Self, TagError>`.
macro_rules! impl_tag_serde {
    ($name:ident) => {
        impl std::str::FromStr for $name {
            type Err = $crate::TagError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.collect_str(self)
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let s = String::deserialize(deserializer)?;
                Self::parse(&s).map_err(serde::de::Error::custom)
            }
        }
    };
}

/// Defines a tag whose id is a single string checked by one predicate.
///
/// This generates a newtype wrapper around `String` with:
/// - A `KIND` constant
/// - `new()` that validates the id
/// - `parse()` to parse from the canonical `kind-id` string
/// - `Display`, `FromStr`, `Serialize`, and `Deserialize`
/// - `Ord`, `Hash`, and other standard traits
///
/// # Example
///
/// ```ignore
/// define_tag!(
///     /// A tag identifying a network.
///     NetworkTag, TagKind::Network, is_valid_network
/// );
///
/// let tag = NetworkTag::new("mynet1")?;
/// let parsed: NetworkTag = "network-mynet1".parse()?;
/// ```
macro_rules! define_tag {
    ($(#[$meta:meta])* $name:ident, $kind:expr, $validator:path) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(String);

        impl $name {
            /// The kind of this tag type.
            pub const KIND: $crate::TagKind = $kind;

            /// Creates a tag, failing if `id` is not valid for this kind.
            pub fn new(id: impl Into<String>) -> Result<Self, $crate::TagError> {
                let id = id.into();
                if !$validator(&id) {
                    return Err($crate::TagError::invalid_id(Self::KIND, id));
                }
                Ok(Self(id))
            }

            /// Parses a tag from its canonical string.
            pub fn parse(s: &str) -> Result<Self, $crate::TagError> {
                $crate::dispatch::parse_as(s)
            }

            /// Returns the kind of this tag.
            #[must_use]
            pub const fn kind(&self) -> $crate::TagKind {
                Self::KIND
            }

            /// Returns the id this tag was created with.
            #[must_use]
            pub fn id(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}-{}", Self::KIND, self.0)
            }
        }

        impl_tag_serde!($name);
    };
}

/// Defines a tag whose id is a lowercase hyphenated UUID.
///
/// The UUID is stored parsed, so `id()` always renders the canonical form.
macro_rules! define_uuid_tag {
    ($(#[$meta:meta])* $name:ident, $kind:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(uuid::Uuid);

        impl $name {
            /// The kind of this tag type.
            pub const KIND: $crate::TagKind = $kind;

            /// Creates a tag from a UUID string.
            ///
            /// Only the lowercase 8-4-4-4-12 form is accepted.
            pub fn new(id: &str) -> Result<Self, $crate::TagError> {
                if !$crate::grammar::uuid().is_match(id) {
                    return Err($crate::TagError::invalid_id(Self::KIND, id));
                }
                uuid::Uuid::parse_str(id)
                    .map(Self)
                    .map_err(|_| $crate::TagError::invalid_id(Self::KIND, id))
            }

            /// Creates a tag with a fresh random UUID.
            #[must_use]
            pub fn generate() -> Self {
                Self(uuid::Uuid::new_v4())
            }

            /// Creates a tag from a raw UUID.
            #[must_use]
            pub const fn from_uuid(uuid: uuid::Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the underlying UUID.
            #[must_use]
            pub const fn uuid(&self) -> uuid::Uuid {
                self.0
            }

            /// Parses a tag from its canonical string.
            pub fn parse(s: &str) -> Result<Self, $crate::TagError> {
                $crate::dispatch::parse_as(s)
            }

            /// Returns the kind of this tag.
            #[must_use]
            pub const fn kind(&self) -> $crate::TagKind {
                Self::KIND
            }

            /// Returns the UUID in canonical string form.
            #[must_use]
            pub fn id(&self) -> String {
                self.0.hyphenated().to_string()
            }
        }

        impl From<uuid::Uuid> for $name {
            fn from(uuid: uuid::Uuid) -> Self {
                Self(uuid)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}-{}", Self::KIND, self.0.hyphenated())
            }
        }

        impl_tag_serde!($name);
    };
}
