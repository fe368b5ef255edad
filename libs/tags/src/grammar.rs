//! Character-level grammar shared by every tag kind.
//!
//! Snippets are unanchored regex fragments that compose into larger
//! patterns. The compiled validators below anchor them start-to-end and are
//! built once, on first use, then only read.

use std::sync::OnceLock;

use regex::Regex;

/// A non-negative integer without a leading zero, except `0` itself.
pub const NUMBER_SNIPPET: &str = "(?:0|[1-9][0-9]*)";

/// A lowercase, hyphen-grouped 8-4-4-4-12 UUID.
pub const UUID_SNIPPET: &str =
    "[a-f0-9]{8}-[a-f0-9]{4}-[a-f0-9]{4}-[a-f0-9]{4}-[a-f0-9]{12}";

/// An application name. No hyphen-separated segment may be purely numeric,
/// so `foo-2` is rejected and can never be mistaken for a unit.
pub const APPLICATION_SNIPPET: &str = "(?:[a-z][a-z0-9]*(?:-[a-z0-9]*[a-z][a-z0-9]*)*)";

/// A container type inside a machine id, e.g. `lxd`.
pub const CONTAINER_TYPE_SNIPPET: &str = "[a-z]+";

/// A machine id: a number followed by any depth of `/type/number` pairs.
pub const MACHINE_SNIPPET: &str = concat!(
    "(?:0|[1-9][0-9]*)",
    "(?:/[a-z]+/(?:0|[1-9][0-9]*))*"
);

/// A user name without domain.
pub const USER_NAME_SNIPPET: &str = "[a-zA-Z0-9][a-zA-Z0-9.+-]*[a-zA-Z0-9]";

/// A user name with optional `@domain`.
pub const USER_SNIPPET: &str = concat!(
    "(?:[a-zA-Z0-9][a-zA-Z0-9.+-]*[a-zA-Z0-9]",
    "(?:@[a-zA-Z0-9][a-zA-Z0-9.+-]*[a-zA-Z0-9])?)"
);

/// A cloud name.
pub const CLOUD_SNIPPET: &str = "[a-zA-Z0-9][a-zA-Z0-9._-]*";

/// The name part of a cloud credential.
pub const CLOUD_CREDENTIAL_NAME_SNIPPET: &str = "[a-zA-Z][a-zA-Z0-9.@+_-]*";

/// A network or legacy space name.
pub const NETWORK_SNIPPET: &str = "(?:[a-z0-9]+(?:-[a-z0-9]+)*)";

/// A model or controller display name.
pub const MODEL_NAME_SNIPPET: &str = "[a-z0-9]+[a-z0-9-]*";

/// A charm-defined payload class.
pub const PAYLOAD_CLASS_SNIPPET: &str = "(?:[a-zA-Z](?:[-A-Za-z0-9_]*[a-zA-Z0-9])?)";

/// An architecture or series token inside a charm URL.
pub const CHARM_SEGMENT_SNIPPET: &str = "[a-z][a-z0-9]*";

/// An optional charm URL schema.
pub const CHARM_SCHEMA_SNIPPET: &str = "(?:(?:local|ch):)?";

/// An optional charm revision. `--1` is accepted and means "no revision".
pub const CHARM_REVISION_SNIPPET: &str = "(?:-(?:-1|0|[1-9][0-9]*))?";

/// The token joining an action's receiver to its sequence number.
pub const ACTION_MARKER: &str = "_a_";

macro_rules! anchored {
    ($(#[$meta:meta])* $vis:vis fn $name:ident = [$($part:expr),+ $(,)?]) => {
        $(#[$meta])*
        $vis fn $name() -> &'static Regex {
            static PATTERN: OnceLock<Regex> = OnceLock::new();
            PATTERN.get_or_init(|| {
                let source = ["^", $($part,)+ "$"].concat();
                Regex::new(&source).expect("tag grammar must compile")
            })
        }
    };
}

anchored!(pub(crate) fn number = [NUMBER_SNIPPET]);
anchored!(pub(crate) fn uuid = [UUID_SNIPPET]);
anchored!(pub(crate) fn application = [APPLICATION_SNIPPET]);
anchored!(pub(crate) fn machine = [MACHINE_SNIPPET]);
anchored!(
    /// Captures the application name and the unit number.
    pub(crate) fn unit = ["(", APPLICATION_SNIPPET, ")/(", NUMBER_SNIPPET, ")"]
);
anchored!(
    /// Captures `name` and optional `domain`.
    pub(crate) fn user = [
        "(?P<name>", USER_NAME_SNIPPET, ")(?:@(?P<domain>", USER_NAME_SNIPPET, "))?"
    ]
);
anchored!(pub(crate) fn user_name = [USER_NAME_SNIPPET]);
anchored!(pub(crate) fn cloud = [CLOUD_SNIPPET]);
anchored!(
    /// Captures cloud, owner, and name of a `cloud/owner/name` id.
    pub(crate) fn cloud_credential = [
        "(", CLOUD_SNIPPET, ")/(", USER_SNIPPET, ")/(", CLOUD_CREDENTIAL_NAME_SNIPPET, ")"
    ]
);
anchored!(pub(crate) fn cloud_credential_name = [CLOUD_CREDENTIAL_NAME_SNIPPET]);
anchored!(pub(crate) fn network = [NETWORK_SNIPPET]);
anchored!(pub(crate) fn model_name = [MODEL_NAME_SNIPPET]);
anchored!(
    /// Captures the storage name and the instance number.
    pub(crate) fn storage = ["(", APPLICATION_SNIPPET, ")/(", NUMBER_SNIPPET, ")"]
);
anchored!(
    /// A volume or filesystem id, optionally scoped to a machine.
    pub(crate) fn machine_scoped = ["(?:", MACHINE_SNIPPET, "/)?", NUMBER_SNIPPET]
);
anchored!(
    /// Captures the class and the remainder of a `class/id` payload id.
    pub(crate) fn payload = ["(", PAYLOAD_CLASS_SNIPPET, ")/(.+)"]
);
anchored!(pub(crate) fn payload_class = [PAYLOAD_CLASS_SNIPPET]);
anchored!(pub(crate) fn charm_segment = [CHARM_SEGMENT_SNIPPET]);
anchored!(
    pub(crate) fn charm = [
        CHARM_SCHEMA_SNIPPET,
        "(?:", CHARM_SEGMENT_SNIPPET, "/)?",
        "(?:", CHARM_SEGMENT_SNIPPET, "/)?",
        APPLICATION_SNIPPET,
        CHARM_REVISION_SNIPPET,
    ]
);

/// Returns true if `s` contains an ASCII uppercase letter.
pub(crate) fn has_uppercase(s: &str) -> bool {
    s.bytes().any(|b| b.is_ascii_uppercase())
}

/// Returns true if `s` ends in `-` followed by one or more digits.
pub(crate) fn has_numeric_tail(s: &str) -> bool {
    s.rsplit_once('-')
        .is_some_and(|(_, tail)| !tail.is_empty() && tail.bytes().all(|b| b.is_ascii_digit()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_leading_zero() {
        for ok in ["0", "1", "10", "123"] {
            assert!(number().is_match(ok), "{ok}");
        }
        for bad in ["", "00", "01", "-1", "1a", " 1"] {
            assert!(!number().is_match(bad), "{bad}");
        }
    }

    #[test]
    fn test_uuid_lowercase_only() {
        assert!(uuid().is_match("f47ac10b-58cc-4372-a567-0e02b2c3d479"));
        assert!(!uuid().is_match("F47AC10B-58CC-4372-A567-0E02B2C3D479"));
        assert!(!uuid().is_match("f47ac10b58cc4372a5670e02b2c3d479"));
        assert!(!uuid().is_match("xf47ac10b-58cc-4372-a567-0e02b2c3d479"));
    }

    #[test]
    fn test_application_segments() {
        for ok in ["wordpress", "foo42", "doing55in54", "but-this-works", "foo2"] {
            assert!(application().is_match(ok), "{ok}");
        }
        for bad in ["", "%not", "42also-not", "so-42-far-not-good", "foo/42", "is-it-", "broken2-", "foo-2"] {
            assert!(!application().is_match(bad), "{bad}");
        }
    }

    #[test]
    fn test_charm_pattern() {
        for ok in [
            "charm",
            "local:charm",
            "local:charm--1",
            "local:charm-1",
            "local:focal/charm-3",
            "ch:amd64/focal/charm-0",
            "series/charm-1",
        ] {
            assert!(charm().is_match(ok), "{ok}");
        }
        for bad in ["", "local:charm--2", "blah:charm-2", "local:series/charm-01", "cs:~user/charm"] {
            assert!(!charm().is_match(bad), "{bad}");
        }
    }

    #[test]
    fn test_empty_never_matches() {
        let all = [
            number(),
            uuid(),
            application(),
            machine(),
            unit(),
            user(),
            user_name(),
            cloud(),
            cloud_credential(),
            cloud_credential_name(),
            network(),
            model_name(),
            storage(),
            machine_scoped(),
            payload(),
            payload_class(),
            charm_segment(),
            charm(),
        ];
        for re in all {
            assert!(!re.is_match(""), "{} matched empty input", re.as_str());
        }
    }
}
