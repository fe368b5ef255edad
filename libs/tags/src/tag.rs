//! The closed set of tag types.

use std::borrow::Cow;
use std::fmt;

use crate::{
    ActionTag, ApplicationOfferTag, ApplicationTag, CaasApplicationTag, CaasUnitTag, CharmTag,
    CloudCredentialTag, CloudTag, ControllerAgentTag, ControllerTag, DiskTag, FilesystemTag,
    MachineTag, ModelTag, NetworkTag, OperationTag, PayloadTag, SpaceTag, StorageTag, SubnetTag,
    TagError, TagKind, UnitTag, UserTag, VolumeTag,
};

/// Behaviour shared by every concrete tag type.
///
/// Implemented for each `*Tag` struct; generic code uses it to move between
/// a concrete type and the [`Tag`] union.
pub trait Taggable: fmt::Display + Sized {
    /// The kind every value of this type reports.
    const KIND: TagKind;

    /// Returns the decoded id.
    fn id(&self) -> Cow<'_, str>;

    /// Wraps this tag in the union.
    fn into_tag(self) -> Tag;

    /// Unwraps `tag` if it holds this type.
    fn from_tag(tag: Tag) -> Option<Self>;
}

macro_rules! define_tag_union {
    ($($variant:ident($ty:ty)),+ $(,)?) => {
        /// Any tag.
        ///
        /// Two tags are equal iff they hold the same concrete type with the
        /// same content, which is equivalent to equal canonical strings.
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub enum Tag {
            $($variant($ty),)+
        }

        impl Tag {
            /// Returns the kind of the held tag.
            #[must_use]
            pub const fn kind(&self) -> TagKind {
                match self {
                    $(Tag::$variant(_) => <$ty>::KIND,)+
                }
            }

            /// Returns the decoded id of the held tag.
            #[must_use]
            pub fn id(&self) -> Cow<'_, str> {
                match self {
                    $(Tag::$variant(tag) => Taggable::id(tag),)+
                }
            }
        }

        impl fmt::Display for Tag {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match self {
                    $(Tag::$variant(tag) => fmt::Display::fmt(tag, f),)+
                }
            }
        }

        $(
            impl Taggable for $ty {
                const KIND: TagKind = <$ty>::KIND;

                fn id(&self) -> Cow<'_, str> {
                    Cow::from(<$ty>::id(self))
                }

                fn into_tag(self) -> Tag {
                    Tag::$variant(self)
                }

                fn from_tag(tag: Tag) -> Option<Self> {
                    match tag {
                        Tag::$variant(tag) => Some(tag),
                        _ => None,
                    }
                }
            }

            impl From<$ty> for Tag {
                fn from(tag: $ty) -> Self {
                    Tag::$variant(tag)
                }
            }
        )+
    };
}

define_tag_union!(
    Machine(MachineTag),
    Unit(UnitTag),
    CaasUnit(CaasUnitTag),
    Application(ApplicationTag),
    CaasApplication(CaasApplicationTag),
    User(UserTag),
    Model(ModelTag),
    Controller(ControllerTag),
    ControllerAgent(ControllerAgentTag),
    ApplicationOffer(ApplicationOfferTag),
    Action(ActionTag),
    Operation(OperationTag),
    Storage(StorageTag),
    Volume(VolumeTag),
    Filesystem(FilesystemTag),
    Space(SpaceTag),
    Subnet(SubnetTag),
    Cloud(CloudTag),
    CloudCredential(CloudCredentialTag),
    Charm(CharmTag),
    Payload(PayloadTag),
    Disk(DiskTag),
    Network(NetworkTag),
);

impl Tag {
    /// Parses any tag from its canonical string.
    pub fn parse(s: &str) -> Result<Self, TagError> {
        crate::dispatch::parse_tag(s)
    }

    /// Returns the held tag as `T`, or `None` if it is another type.
    pub fn downcast<T: Taggable>(self) -> Option<T> {
        T::from_tag(self)
    }
}

impl_tag_serde!(Tag);
