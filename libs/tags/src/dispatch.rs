//! Parsing of canonical tag strings.
//!
//! A canonical string is `<kind>-<payload>`. The kind ends at the first `-`
//! and selects one entry of a fixed registry. Each entry knows how to turn
//! the wire payload back into an id, how to check that id, and how to build
//! the typed tag from it.

use std::borrow::Cow;
use std::fmt;
use std::sync::OnceLock;

use tracing::{debug, trace, warn};

use crate::{
    action, charm, cloudcredential, machine, payload, simple, storage, structured, unit, user,
};
use crate::{
    ActionTag, ApplicationOfferTag, ApplicationTag, CaasApplicationTag, CaasUnitTag, CharmTag,
    CloudCredentialTag, CloudTag, ControllerAgentTag, ControllerTag, DiskTag, FilesystemTag,
    MachineTag, ModelTag, NetworkTag, OperationTag, PayloadTag, SpaceTag, StorageTag, SubnetTag,
    Tag, TagConfig, TagError, TagKind, Taggable, UnitTag, UserTag, VolumeTag,
};

// =============================================================================
// Registry
// =============================================================================

/// How a registry entry checks a decoded id.
#[derive(Clone, Copy)]
enum Validator {
    /// The grammar alone decides.
    Syntax(fn(&str) -> bool),
    /// The answer depends on configuration.
    Configured(fn(&str, &TagConfig) -> bool),
}

impl Validator {
    fn check(self, id: &str, config: &TagConfig) -> bool {
        match self {
            Validator::Syntax(f) => f(id),
            Validator::Configured(f) => f(id, config),
        }
    }
}

struct KindEntry {
    kind: TagKind,
    /// Turns the wire payload back into an id.
    decode: fn(&str) -> Option<Cow<'_, str>>,
    validate: Validator,
    build: fn(&str, &TagConfig) -> Result<Tag, TagError>,
}

fn identity(payload: &str) -> Option<Cow<'_, str>> {
    Some(Cow::Borrowed(payload))
}

fn last_hyphen(payload: &str) -> Option<Cow<'_, str>> {
    Some(structured::last_hyphen_to_slash(payload))
}

fn all_hyphens(payload: &str) -> Option<Cow<'_, str>> {
    Some(structured::hyphens_to_slashes(payload))
}

fn escaped_fields(payload: &str) -> Option<Cow<'_, str>> {
    let fields = structured::split_escaped::<3>(payload)?;
    Some(Cow::Owned(fields.join("/")))
}

fn is_valid_any_controller(id: &str) -> bool {
    simple::is_valid_controller(id) || simple::is_valid_controller_agent(id)
}

macro_rules! builder {
    ($name:ident, $variant:ident, $ctor:expr) => {
        fn $name(id: &str, _config: &TagConfig) -> Result<Tag, TagError> {
            $ctor(id).map(Tag::$variant)
        }
    };
}

builder!(build_machine, Machine, MachineTag::new);
builder!(build_unit, Unit, UnitTag::new);
builder!(build_caas_unit, CaasUnit, CaasUnitTag::new);
builder!(build_application, Application, ApplicationTag::new);
builder!(build_caas_application, CaasApplication, CaasApplicationTag::new);
builder!(build_user, User, UserTag::new);
builder!(build_model, Model, ModelTag::new);
builder!(build_application_offer, ApplicationOffer, ApplicationOfferTag::new);
builder!(build_action, Action, ActionTag::from_id);
builder!(build_operation, Operation, OperationTag::new);
builder!(build_storage, Storage, StorageTag::new);
builder!(build_volume, Volume, VolumeTag::new);
builder!(build_filesystem, Filesystem, FilesystemTag::new);
builder!(build_space, Space, SpaceTag::new);
builder!(build_subnet, Subnet, SubnetTag::new);
builder!(build_cloud, Cloud, CloudTag::new);
builder!(build_cloud_credential, CloudCredential, CloudCredentialTag::from_id);
builder!(build_payload, Payload, PayloadTag::from_id);
builder!(build_disk, Disk, DiskTag::new);
builder!(build_network, Network, NetworkTag::new);

/// Numbers are controller agents; UUIDs are controllers.
fn build_controller(id: &str, _config: &TagConfig) -> Result<Tag, TagError> {
    if simple::is_valid_controller_agent(id) {
        ControllerAgentTag::new(id).map(Tag::ControllerAgent)
    } else {
        ControllerTag::new(id).map(Tag::Controller)
    }
}

fn build_charm(id: &str, config: &TagConfig) -> Result<Tag, TagError> {
    CharmTag::new_with(id, config).map(Tag::Charm)
}

static REGISTRY: [KindEntry; TagKind::ALL.len()] = [
    KindEntry {
        kind: TagKind::Machine,
        decode: all_hyphens,
        validate: Validator::Syntax(machine::is_valid_machine),
        build: build_machine,
    },
    KindEntry {
        kind: TagKind::Unit,
        decode: last_hyphen,
        validate: Validator::Syntax(unit::is_valid_unit),
        build: build_unit,
    },
    KindEntry {
        kind: TagKind::CaasUnit,
        decode: last_hyphen,
        validate: Validator::Syntax(unit::is_valid_caas_unit),
        build: build_caas_unit,
    },
    KindEntry {
        kind: TagKind::Application,
        decode: identity,
        validate: Validator::Syntax(simple::is_valid_application),
        build: build_application,
    },
    KindEntry {
        kind: TagKind::CaasApplication,
        decode: identity,
        validate: Validator::Syntax(simple::is_valid_caas_application),
        build: build_caas_application,
    },
    KindEntry {
        kind: TagKind::User,
        decode: identity,
        validate: Validator::Syntax(user::is_valid_user),
        build: build_user,
    },
    KindEntry {
        kind: TagKind::Model,
        decode: identity,
        validate: Validator::Syntax(simple::is_valid_model),
        build: build_model,
    },
    KindEntry {
        kind: TagKind::Controller,
        decode: identity,
        validate: Validator::Syntax(is_valid_any_controller),
        build: build_controller,
    },
    KindEntry {
        kind: TagKind::ApplicationOffer,
        decode: identity,
        validate: Validator::Syntax(simple::is_valid_application_offer),
        build: build_application_offer,
    },
    KindEntry {
        kind: TagKind::Action,
        decode: identity,
        validate: Validator::Syntax(action::is_valid_action),
        build: build_action,
    },
    KindEntry {
        kind: TagKind::Operation,
        decode: identity,
        validate: Validator::Syntax(simple::is_valid_operation),
        build: build_operation,
    },
    KindEntry {
        kind: TagKind::Storage,
        decode: last_hyphen,
        validate: Validator::Syntax(storage::is_valid_storage),
        build: build_storage,
    },
    KindEntry {
        kind: TagKind::Volume,
        decode: all_hyphens,
        validate: Validator::Syntax(storage::is_valid_volume),
        build: build_volume,
    },
    KindEntry {
        kind: TagKind::Filesystem,
        decode: all_hyphens,
        validate: Validator::Syntax(storage::is_valid_filesystem),
        build: build_filesystem,
    },
    KindEntry {
        kind: TagKind::Space,
        decode: identity,
        validate: Validator::Syntax(simple::is_valid_space),
        build: build_space,
    },
    KindEntry {
        kind: TagKind::Subnet,
        decode: identity,
        validate: Validator::Syntax(simple::is_valid_subnet),
        build: build_subnet,
    },
    KindEntry {
        kind: TagKind::Cloud,
        decode: identity,
        validate: Validator::Syntax(simple::is_valid_cloud),
        build: build_cloud,
    },
    KindEntry {
        kind: TagKind::CloudCredential,
        decode: escaped_fields,
        validate: Validator::Syntax(cloudcredential::is_valid_cloud_credential),
        build: build_cloud_credential,
    },
    KindEntry {
        kind: TagKind::Charm,
        decode: identity,
        validate: Validator::Configured(charm::is_valid_charm_with),
        build: build_charm,
    },
    KindEntry {
        kind: TagKind::Payload,
        decode: identity,
        validate: Validator::Syntax(payload::is_valid_payload),
        build: build_payload,
    },
    KindEntry {
        kind: TagKind::Disk,
        decode: identity,
        validate: Validator::Syntax(simple::is_valid_disk),
        build: build_disk,
    },
    KindEntry {
        kind: TagKind::Network,
        decode: identity,
        validate: Validator::Syntax(simple::is_valid_network),
        build: build_network,
    },
];

fn entry(kind: TagKind) -> Option<&'static KindEntry> {
    REGISTRY.iter().find(|entry| entry.kind == kind)
}

// =============================================================================
// Receiver probes
// =============================================================================

/// Recognises one kind of action receiver and builds its tag.
///
/// Action tags resolve their receiver through an ordered slice of probes
/// instead of naming the unit and application types directly.
#[derive(Clone, Copy)]
pub struct ReceiverProbe {
    pub kind: TagKind,
    pub matches: fn(&str) -> bool,
    pub build: fn(&str) -> Result<Tag, TagError>,
}

impl fmt::Debug for ReceiverProbe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReceiverProbe")
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

fn unit_receiver(name: &str) -> Result<Tag, TagError> {
    UnitTag::new(name).map(Tag::Unit)
}

fn application_receiver(name: &str) -> Result<Tag, TagError> {
    ApplicationTag::new(name).map(Tag::Application)
}

/// Units first, then applications.
pub const DEFAULT_RECEIVER_PROBES: &[ReceiverProbe] = &[
    ReceiverProbe {
        kind: TagKind::Unit,
        matches: unit::is_valid_unit,
        build: unit_receiver,
    },
    ReceiverProbe {
        kind: TagKind::Application,
        matches: simple::is_valid_application,
        build: application_receiver,
    },
];

// =============================================================================
// Parser
// =============================================================================

/// Parses canonical tag strings under a fixed configuration.
#[derive(Debug, Clone, Default)]
pub struct TagParser {
    config: TagConfig,
}

impl TagParser {
    /// Binds `config` to the registry, failing if the config is invalid.
    pub fn new(config: TagConfig) -> Result<Self, TagError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &TagConfig {
        &self.config
    }

    /// Returns the kind named by `s` without looking at the payload.
    pub fn kind_of(&self, s: &str) -> Result<TagKind, TagError> {
        split_kind(s).map(|(kind, _)| kind)
    }

    /// Parses a tag of any kind.
    pub fn parse(&self, s: &str) -> Result<Tag, TagError> {
        let (kind, payload) = split_kind(s)?;
        parse_payload(s, kind, payload, &self.config)
    }

    /// Parses a tag that must be of the `expected` kind.
    ///
    /// A tag of another recognised kind fails with
    /// [`TagError::KindMismatch`] before its payload is examined.
    pub fn parse_of_kind(&self, s: &str, expected: TagKind) -> Result<Tag, TagError> {
        parse_of_kind_with(s, expected, &self.config)
    }

    /// Parses a tag into the concrete type `T`.
    pub fn parse_as<T: Taggable>(&self, s: &str) -> Result<T, TagError> {
        parse_as_with(s, &self.config)
    }
}

fn parse_of_kind_with(s: &str, expected: TagKind, config: &TagConfig) -> Result<Tag, TagError> {
    let (kind, payload) = split_kind(s)?;
    if kind != expected {
        debug!(tag = %s, %expected, actual = %kind, "Tag kind mismatch");
        return Err(TagError::KindMismatch {
            tag: s.to_string(),
            expected,
            actual: kind,
        });
    }
    parse_payload(s, kind, payload, config)
}

/// Parses a tag into `T` under `config` without building a parser.
pub(crate) fn parse_as_with<T: Taggable>(s: &str, config: &TagConfig) -> Result<T, TagError> {
    let tag = parse_of_kind_with(s, T::KIND, config)?;
    T::from_tag(tag).ok_or_else(|| {
        debug!(tag = %s, kind = %T::KIND, "Tag holds a different type of this kind");
        TagError::invalid_tag(s, T::KIND)
    })
}

fn parse_payload(
    s: &str,
    kind: TagKind,
    payload: &str,
    config: &TagConfig,
) -> Result<Tag, TagError> {
    let tag = entry(kind).and_then(|entry| {
        (entry.decode)(payload)
            .filter(|id| entry.validate.check(id, config))
            .and_then(|id| (entry.build)(&id, config).ok())
    });

    match tag {
        Some(tag) => {
            trace!(tag = %s, %kind, "Parsed tag");
            Ok(tag)
        }
        None => {
            debug!(tag = %s, %kind, "Invalid tag payload");
            Err(TagError::invalid_tag(s, kind))
        }
    }
}

fn split_kind(s: &str) -> Result<(TagKind, &str), TagError> {
    let parsed = s
        .split_once('-')
        .and_then(|(kind, payload)| Some((TagKind::from_token(kind)?, payload)));
    parsed.ok_or_else(|| {
        debug!(tag = %s, "Not a tag");
        TagError::not_a_tag(s)
    })
}

/// Returns the process-wide parser.
///
/// Built on first use from [`TagConfig::from_env`]; an invalid environment
/// falls back to the default configuration.
pub fn default_parser() -> &'static TagParser {
    static PARSER: OnceLock<TagParser> = OnceLock::new();
    PARSER.get_or_init(|| {
        TagConfig::from_env()
            .and_then(TagParser::new)
            .unwrap_or_else(|e| {
                warn!(error = %e, "Invalid tag configuration, using defaults");
                TagParser::default()
            })
    })
}

/// Parses a tag of any kind.
pub fn parse_tag(s: &str) -> Result<Tag, TagError> {
    default_parser().parse(s)
}

/// Parses a tag that must be of the `expected` kind.
pub fn parse_tag_of_kind(s: &str, expected: TagKind) -> Result<Tag, TagError> {
    default_parser().parse_of_kind(s, expected)
}

/// Returns the kind named by a tag string.
pub fn tag_kind(s: &str) -> Result<TagKind, TagError> {
    default_parser().kind_of(s)
}

/// Parses a tag into the concrete type `T`.
pub fn parse_as<T: Taggable>(s: &str) -> Result<T, TagError> {
    default_parser().parse_as(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser() -> TagParser {
        TagParser::default()
    }

    #[test]
    fn test_registry_covers_every_kind() {
        for kind in TagKind::ALL {
            let count = REGISTRY.iter().filter(|entry| entry.kind == kind).count();
            assert_eq!(count, 1, "{kind}");
        }
    }

    #[test]
    fn test_not_a_tag() {
        for s in ["", "dave", "unit", "-unit", "foo-bar", "Unit-dave/0"] {
            assert_eq!(parser().parse(s), Err(TagError::not_a_tag(s)), "{s}");
            assert!(parser().kind_of(s).unwrap_err().is_not_a_tag(), "{s}");
        }
    }

    #[test]
    fn test_invalid_payload_names_kind() {
        for (s, kind) in [
            ("unit-dave", TagKind::Unit),
            ("unit-", TagKind::Unit),
            ("machine-01", TagKind::Machine),
            ("payload-docker/YQ", TagKind::Payload),
            ("cloudcred-aws_bob", TagKind::CloudCredential),
            ("controller-foo", TagKind::Controller),
        ] {
            assert_eq!(parser().parse(s), Err(TagError::invalid_tag(s, kind)), "{s}");
        }
    }

    #[test]
    fn test_kind_mismatch_before_payload() {
        let err = parser()
            .parse_of_kind("application-dave", TagKind::Unit)
            .unwrap_err();
        assert_eq!(
            err,
            TagError::KindMismatch {
                tag: "application-dave".to_string(),
                expected: TagKind::Unit,
                actual: TagKind::Application,
            }
        );

        // The payload is not valid for either kind; the mismatch still wins.
        let err = parser().parse_of_kind("user-!!", TagKind::Unit).unwrap_err();
        assert!(err.is_kind_mismatch());
    }

    #[test]
    fn test_parse_as_controller_variants() {
        let uuid = "f47ac10b-58cc-4372-a567-0e02b2c3d479";
        let controller: ControllerTag = parser().parse_as(&format!("controller-{uuid}")).unwrap();
        assert_eq!(controller.id(), uuid);

        let agent: ControllerAgentTag = parser().parse_as("controller-2").unwrap();
        assert_eq!(agent.number(), Some(2));

        assert_eq!(
            parser().parse_as::<ControllerTag>("controller-2"),
            Err(TagError::invalid_tag("controller-2", TagKind::Controller))
        );
    }

    #[test]
    fn test_wire_decoding() {
        let cases = [
            ("machine-0-lxd-1", "0/lxd/1"),
            ("unit-rabbitmq-server-123", "rabbitmq-server/123"),
            ("caasunit-foo-bar-0", "foo-bar/0"),
            ("storage-shared-fs-3", "shared-fs/3"),
            ("volume-0-lxd-0-3", "0/lxd/0/3"),
            ("filesystem-4", "4"),
            ("cloudcred-manual%5fcloud_bob_foo%5fbar", "manual_cloud/bob/foo_bar"),
            ("action-mysql/3_a_11", "mysql/3_a_11"),
        ];
        for (s, id) in cases {
            let tag = parser().parse(s).unwrap();
            assert_eq!(tag.id(), id, "{s}");
            assert_eq!(tag.to_string(), s);
        }
    }

    #[test]
    fn test_charm_uses_parser_config() {
        let config = TagConfig::with_architectures(["loong64"]).unwrap();
        let custom = TagParser::new(config).unwrap();
        let tag: CharmTag = custom.parse_as("charm-loong64/mysql-1").unwrap();
        assert_eq!(tag.architecture(), Some("loong64"));

        let tag: CharmTag = parser().parse_as("charm-loong64/mysql-1").unwrap();
        assert_eq!(tag.series(), Some("loong64"));
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let empty = TagConfig {
            architectures: Default::default(),
        };
        assert!(matches!(TagParser::new(empty), Err(TagError::InvalidConfig { .. })));

        let upper = TagConfig {
            architectures: ["AMD64".to_string()].into(),
        };
        assert!(matches!(TagParser::new(upper), Err(TagError::InvalidConfig { .. })));
        assert!(TagParser::new(TagConfig::default()).is_ok());
    }

    #[test]
    fn test_default_probes_order() {
        let kinds: Vec<_> = DEFAULT_RECEIVER_PROBES.iter().map(|p| p.kind).collect();
        assert_eq!(kinds, [TagKind::Unit, TagKind::Application]);
        assert!((DEFAULT_RECEIVER_PROBES[0].build)("mysql/0").is_ok());
        assert!((DEFAULT_RECEIVER_PROBES[1].build)("mysql/0").is_err());
    }
}
