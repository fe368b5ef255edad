//! # plfm-tags
//!
//! Typed entity tags, parsing, and validation for the plfm-vt platform.
//!
//! ## Design Principles
//!
//! - Every entity kind has its own tag type; tags of different kinds never mix
//! - Constructors always validate and return `Result`; `is_valid_*`
//!   predicates exist for callers that only want to check
//! - All tags have a canonical string with strict parsing, and
//!   `parse(tag.to_string()) == tag` for every tag
//! - Grammars and the kind registry are built once and never mutated
//!
//! ## Tag Format
//!
//! A canonical tag string is `{kind}-{payload}`. The kind is a lowercase
//! token and ends at the first `-`. The payload is the kind's id, with any
//! `/` rewritten so the string stays unambiguous.
//!
//! Examples:
//! - `machine-0-lxd-1` (machine `0/lxd/1`)
//! - `unit-rabbitmq-server-3` (unit `rabbitmq-server/3`)
//! - `action-mysql/3_a_11` (action 11 queued on `mysql/3`)
//! - `cloudcred-aws_bob_foo%5fbar` (credential `aws/bob/foo_bar`)
//!
//! Use [`parse_tag`] when the kind is not known up front, or the concrete
//! type's `parse` (also reachable through `FromStr` and serde) when it is.

#[macro_use]
mod macros;

mod action;
mod charm;
mod cloudcredential;
mod config;
mod dispatch;
mod error;
pub mod grammar;
mod kind;
mod machine;
mod payload;
mod simple;
mod storage;
pub mod structured;
mod tag;
mod unit;
mod user;

pub use action::{is_valid_action, is_valid_action_receiver, ActionTag};
pub use charm::{is_valid_charm, is_valid_charm_with, CharmSource, CharmTag};
pub use cloudcredential::{
    is_valid_cloud_credential, is_valid_cloud_credential_name, CloudCredentialTag,
};
pub use config::{TagConfig, ARCHITECTURES_ENV, DEFAULT_ARCHITECTURES};
pub use dispatch::{
    default_parser, parse_as, parse_tag, parse_tag_of_kind, tag_kind, ReceiverProbe, TagParser,
    DEFAULT_RECEIVER_PROBES,
};
pub use error::TagError;
pub use kind::TagKind;
pub use machine::{is_valid_container_machine, is_valid_machine, MachineTag};
pub use payload::{is_valid_payload, is_valid_payload_class, PayloadTag};
pub use simple::*;
pub use storage::{
    is_valid_filesystem, is_valid_storage, is_valid_volume, storage_name, FilesystemTag,
    StorageTag, VolumeTag,
};
pub use tag::{Tag, Taggable};
pub use unit::{
    caas_unit_application, is_valid_caas_unit, is_valid_unit, unit_application, CaasUnitTag,
    UnitTag,
};
pub use user::{
    is_valid_user, is_valid_user_domain, is_valid_user_name, UserTag, LOCAL_USER_DOMAIN,
};
