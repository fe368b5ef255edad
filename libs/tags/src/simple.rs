//! Tags whose id is a single validated field.

use crate::{grammar, TagError, TagKind};

// =============================================================================
// Applications
// =============================================================================

/// Returns whether `name` is a valid application name.
pub fn is_valid_application(name: &str) -> bool {
    grammar::application().is_match(name)
}

/// Checks an application name, explaining why it is invalid.
pub fn validate_application_name(name: &str) -> Result<(), TagError> {
    if is_valid_application(name) {
        return Ok(());
    }

    let reason = if grammar::has_uppercase(name) {
        ", unexpected uppercase character".to_string()
    } else if grammar::has_numeric_tail(name) {
        ", unexpected number(s) found after last hyphen".to_string()
    } else if let Some(c) = name
        .chars()
        .find(|c| !(c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-'))
    {
        format!(", unexpected character {c}")
    } else {
        String::new()
    };

    Err(TagError::InvalidApplicationName {
        name: name.to_string(),
        reason,
    })
}

define_tag!(
    /// A tag identifying an application.
    ApplicationTag,
    TagKind::Application,
    is_valid_application
);

impl ApplicationTag {
    /// Wraps an application name already matched by the unit grammar.
    pub(crate) fn from_unit_application(name: &str) -> Self {
        debug_assert!(is_valid_application(name), "{name:?} is not an application");
        Self(name.to_string())
    }
}

/// Returns whether `name` is a valid CAAS application name.
pub fn is_valid_caas_application(name: &str) -> bool {
    grammar::application().is_match(name)
}

define_tag!(
    /// A tag identifying an application deployed to a container substrate.
    CaasApplicationTag,
    TagKind::CaasApplication,
    is_valid_caas_application
);

// =============================================================================
// Clouds, models, and controllers
// =============================================================================

/// Returns whether `id` is a valid cloud name.
pub fn is_valid_cloud(id: &str) -> bool {
    grammar::cloud().is_match(id)
}

define_tag!(
    /// A tag identifying a cloud, e.g. `aws` or `kubernetes`.
    CloudTag,
    TagKind::Cloud,
    is_valid_cloud
);

/// Returns whether `id` is a valid model UUID.
pub fn is_valid_model(id: &str) -> bool {
    grammar::uuid().is_match(id)
}

/// Returns whether `name` is a valid model display name.
pub fn is_valid_model_name(name: &str) -> bool {
    grammar::model_name().is_match(name)
}

define_uuid_tag!(
    /// A tag identifying a model by UUID.
    ModelTag,
    TagKind::Model
);

impl ModelTag {
    /// Length of the abbreviated id shown to humans.
    pub const SHORT_ID_LEN: usize = 6;

    /// Returns the first few characters of the id, for display.
    #[must_use]
    pub fn short_id(&self) -> String {
        self.id()[..Self::SHORT_ID_LEN].to_string()
    }
}

/// Returns whether `id` is a valid controller UUID.
pub fn is_valid_controller(id: &str) -> bool {
    grammar::uuid().is_match(id)
}

/// Returns whether `name` is a valid controller display name.
pub fn is_valid_controller_name(name: &str) -> bool {
    grammar::model_name().is_match(name)
}

define_uuid_tag!(
    /// A tag identifying a controller by UUID.
    ControllerTag,
    TagKind::Controller
);

/// Returns whether `id` is a valid controller agent number.
pub fn is_valid_controller_agent(id: &str) -> bool {
    grammar::number().is_match(id)
}

define_tag!(
    /// A tag identifying one controller agent.
    ///
    /// Shares the `controller` kind with [`ControllerTag`]; the payload
    /// grammar (number versus UUID) tells them apart.
    ControllerAgentTag,
    TagKind::Controller,
    is_valid_controller_agent
);

impl ControllerAgentTag {
    /// Returns the agent number, or `None` if it does not fit in a `u64`.
    #[must_use]
    pub fn number(&self) -> Option<u64> {
        self.id().parse().ok()
    }
}

/// Returns whether `id` is a valid application offer UUID.
pub fn is_valid_application_offer(id: &str) -> bool {
    grammar::uuid().is_match(id)
}

define_uuid_tag!(
    /// A tag identifying an application offer by UUID.
    ApplicationOfferTag,
    TagKind::ApplicationOffer
);

// =============================================================================
// Operations and hardware
// =============================================================================

/// Returns whether `id` is a valid operation id.
pub fn is_valid_operation(id: &str) -> bool {
    grammar::number().is_match(id)
}

define_tag!(
    /// A tag identifying an operation (a batch of actions).
    OperationTag,
    TagKind::Operation,
    is_valid_operation
);

/// Returns whether `name` is a valid disk name.
pub fn is_valid_disk(name: &str) -> bool {
    grammar::number().is_match(name)
}

define_tag!(
    /// A tag identifying a disk.
    DiskTag,
    TagKind::Disk,
    is_valid_disk
);

// =============================================================================
// Networking
// =============================================================================

/// Returns whether `name` is a valid network name.
pub fn is_valid_network(name: &str) -> bool {
    grammar::network().is_match(name)
}

define_tag!(
    /// A tag identifying a network.
    NetworkTag,
    TagKind::Network,
    is_valid_network
);

/// Returns whether `id` is a valid space id.
///
/// Spaces are identified by UUID; the older name form is still accepted.
pub fn is_valid_space(id: &str) -> bool {
    grammar::uuid().is_match(id) || grammar::network().is_match(id)
}

define_tag!(
    /// A tag identifying a network space.
    SpaceTag,
    TagKind::Space,
    is_valid_space
);

/// Returns whether `id` is a valid subnet id (a number or a UUID).
pub fn is_valid_subnet(id: &str) -> bool {
    grammar::number().is_match(id) || grammar::uuid().is_match(id)
}

define_tag!(
    /// A tag identifying a subnet.
    SubnetTag,
    TagKind::Subnet,
    is_valid_subnet
);

// =============================================================================
// Tests
// =============================================================================
