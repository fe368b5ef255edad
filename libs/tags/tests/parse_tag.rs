//! Integration tests for the generic tag parser.
//!
//! These drive everything through the public entry points a consumer uses:
//! `parse_tag` for strings of unknown kind, `parse_tag_of_kind` and the
//! concrete `parse` methods when the kind is known, and serde.

use plfm_tags::{
    parse_tag, parse_tag_of_kind, tag_kind, ActionTag, ApplicationTag, CharmTag,
    CloudCredentialTag, MachineTag, PayloadTag, Tag, TagConfig, TagError, TagKind, UnitTag,
    UserTag,
};
use serde::{Deserialize, Serialize};

#[test]
fn test_parse_every_kind() {
    let cases = [
        ("machine-0", TagKind::Machine, "0"),
        ("machine-3-lxd-0-kvm-1", TagKind::Machine, "3/lxd/0/kvm/1"),
        ("unit-wordpress-2", TagKind::Unit, "wordpress/2"),
        ("caasunit-gitlab-0", TagKind::CaasUnit, "gitlab/0"),
        ("application-wordpress", TagKind::Application, "wordpress"),
        ("caasapplication-gitlab", TagKind::CaasApplication, "gitlab"),
        ("user-bob@remote", TagKind::User, "bob@remote"),
        (
            "model-f47ac10b-58cc-4372-a567-0e02b2c3d479",
            TagKind::Model,
            "f47ac10b-58cc-4372-a567-0e02b2c3d479",
        ),
        (
            "controller-f47ac10b-58cc-4372-a567-0e02b2c3d479",
            TagKind::Controller,
            "f47ac10b-58cc-4372-a567-0e02b2c3d479",
        ),
        ("controller-0", TagKind::Controller, "0"),
        (
            "applicationoffer-f47ac10b-58cc-4372-a567-0e02b2c3d479",
            TagKind::ApplicationOffer,
            "f47ac10b-58cc-4372-a567-0e02b2c3d479",
        ),
        ("action-wordpress/0_a_3", TagKind::Action, "wordpress/0_a_3"),
        ("operation-666", TagKind::Operation, "666"),
        ("storage-data-0", TagKind::Storage, "data/0"),
        ("volume-0-1", TagKind::Volume, "0/1"),
        ("filesystem-0-lxd-0-3", TagKind::Filesystem, "0/lxd/0/3"),
        ("space-db", TagKind::Space, "db"),
        ("subnet-16", TagKind::Subnet, "16"),
        ("cloud-aws", TagKind::Cloud, "aws"),
        ("cloudcred-aws_bob_default", TagKind::CloudCredential, "aws/bob/default"),
        ("charm-ch:amd64/jammy/mysql-42", TagKind::Charm, "ch:amd64/jammy/mysql-42"),
        ("payload-docker/YWJj", TagKind::Payload, "docker/YWJj"),
        ("disk-1", TagKind::Disk, "1"),
        ("network-mynet1", TagKind::Network, "mynet1"),
    ];

    for (s, kind, id) in cases {
        let tag = parse_tag(s).unwrap_or_else(|e| panic!("{s}: {e}"));
        assert_eq!(tag.kind(), kind, "{s}");
        assert_eq!(tag.id(), id, "{s}");
        assert_eq!(tag.to_string(), s, "{s}");
        assert_eq!(tag_kind(s), Ok(kind), "{s}");
        assert_eq!(parse_tag_of_kind(s, kind), Ok(tag), "{s}");
    }
}

#[test]
fn test_dispatcher_rejections() {
    assert!(parse_tag("").unwrap_err().is_not_a_tag());
    assert!(parse_tag("dave").unwrap_err().is_not_a_tag());
    assert!(parse_tag("unit").unwrap_err().is_not_a_tag());
    assert!(parse_tag("service-foo").unwrap_err().is_not_a_tag());

    assert_eq!(
        parse_tag("unit-dave"),
        Err(TagError::InvalidTagOfKind {
            tag: "unit-dave".to_string(),
            kind: TagKind::Unit,
        })
    );
    assert_eq!(
        UnitTag::parse("application-dave"),
        Err(TagError::KindMismatch {
            tag: "application-dave".to_string(),
            expected: TagKind::Unit,
            actual: TagKind::Application,
        })
    );
    assert!(parse_tag_of_kind("user-dave", TagKind::Unit)
        .unwrap_err()
        .is_kind_mismatch());

    // Kind tokens are exact.
    assert!(tag_kind("Unit-dave-0").unwrap_err().is_not_a_tag());
}

#[test]
fn test_separator_round_trip() {
    let unit = UnitTag::new("rabbitmq-server/123").unwrap();
    assert_eq!(unit.to_string(), "unit-rabbitmq-server-123");
    assert_eq!(UnitTag::new(&unit.id()).unwrap().to_string(), unit.to_string());
    assert_eq!(UnitTag::parse(&unit.to_string()).unwrap(), unit);

    let machine = MachineTag::new("0/lxd/1").unwrap();
    assert_eq!(MachineTag::parse("machine-0-lxd-1").unwrap(), machine);
}

#[test]
fn test_action_scenario() {
    let action = ActionTag::new("mysql/3", 11).unwrap();
    let parsed = ActionTag::parse(&action.to_string()).unwrap();

    assert_eq!(parsed, action);
    assert_eq!(parsed.sequence(), 11);
    assert_eq!(
        parsed.prefix_tag(),
        Some(Tag::Unit(UnitTag::new("mysql/3").unwrap()))
    );

    let on_application = ActionTag::parse("action-mysql_a_0").unwrap();
    assert_eq!(
        on_application.prefix_tag(),
        Some(Tag::Application(ApplicationTag::new("mysql").unwrap()))
    );
}

#[test]
fn test_cloud_credential_escaping() {
    let tag = CloudCredentialTag::new("aws", "bob", "foo_bar").unwrap();
    let s = tag.to_string();
    assert_eq!(s, "cloudcred-aws_bob_foo%5fbar");

    let parsed = CloudCredentialTag::parse(&s).unwrap();
    assert_eq!(parsed.name(), "foo_bar");
    assert_eq!(parsed, tag);

    let federated = CloudCredentialTag::parse("cloudcred-aws_bob@remote_foo%5fbar").unwrap();
    assert_eq!(federated.owner(), &UserTag::new("bob@remote").unwrap());
}

#[test]
fn test_charm_disambiguation() {
    let tag = CharmTag::parse("charm-amd64/mysql-42").unwrap();
    assert_eq!(tag.architecture(), Some("amd64"));
    assert_eq!(tag.series(), None);
    assert_eq!(tag.name(), "mysql");
    assert_eq!(tag.revision(), Some(42));

    let tag = CharmTag::parse("charm-focal/mysql-42").unwrap();
    assert_eq!(tag.architecture(), None);
    assert_eq!(tag.series(), Some("focal"));

    // A bare URL parses, and renders with its schema.
    assert_eq!(CharmTag::parse("charm-mysql").unwrap().to_string(), "charm-ch:mysql");
}

#[test]
fn test_payload_rejects_undecodable_ids() {
    assert_eq!(
        PayloadTag::parse("payload-docker/!!"),
        Err(TagError::InvalidTagOfKind {
            tag: "payload-docker/!!".to_string(),
            kind: TagKind::Payload,
        })
    );
}

#[test]
fn test_payload_raw_id_bytes() {
    let tag = parse_tag("payload-docker/gA==").unwrap();
    assert_eq!(tag.to_string(), "payload-docker/gA==");

    let payload = tag.downcast::<PayloadTag>().unwrap();
    assert_eq!(payload.class(), "docker");
    assert_eq!(payload.raw_id(), [0x80]);
}

#[test]
fn test_charm_with_custom_architectures() {
    let config = TagConfig::with_architectures(["loong64"]).unwrap();

    let tag = CharmTag::new_with("loong64/focal/mysql", &config).unwrap();
    let s = tag.to_string();
    assert_eq!(parse_tag(&s).unwrap(), Tag::Charm(tag.clone()));
    assert_eq!(serde_json::from_str::<CharmTag>(&format!("{s:?}")).unwrap(), tag);

    let tag = CharmTag::new_with("loong64/mysql", &config).unwrap();
    assert_eq!(CharmTag::parse_with(&tag.to_string(), &config).unwrap(), tag);
}

#[test]
fn test_user_local_domain() {
    let explicit = UserTag::new("bob@local").unwrap();
    assert_eq!(explicit.to_string(), "user-bob");
    assert_eq!(UserTag::parse("user-bob@local").unwrap(), explicit);
    assert_eq!(UserTag::parse("user-bob").unwrap(), explicit);
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Record {
    owner: UserTag,
    receiver: Tag,
    charm: Option<CharmTag>,
}

#[test]
fn test_serde_uses_canonical_strings() {
    let record = Record {
        owner: UserTag::new("bob@remote").unwrap(),
        receiver: Tag::from(UnitTag::new("mysql/3").unwrap()),
        charm: None,
    };

    let json = serde_json::to_string(&record).unwrap();
    assert_eq!(
        json,
        r#"{"owner":"user-bob@remote","receiver":"unit-mysql-3","charm":null}"#
    );
    let parsed: Record = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, record);

    let err = serde_json::from_str::<UnitTag>(r#""application-mysql""#).unwrap_err();
    assert!(err.to_string().contains("found a application tag"), "{err}");
}
