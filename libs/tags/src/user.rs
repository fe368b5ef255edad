//! User tags.
//!
//! A user id is `name` or `name@domain`. Users of the local domain carry no
//! visible domain: `bob` and `bob@local` are the same user and both render
//! as `user-bob`. [`UserTag::canonical`] always spells the domain out.

use std::fmt;

use crate::{grammar, TagError, TagKind};

/// The domain of users managed by the controller itself.
pub const LOCAL_USER_DOMAIN: &str = "local";

/// Returns whether `id` is a valid user id, with or without a domain.
pub fn is_valid_user(id: &str) -> bool {
    grammar::user().is_match(id)
}

/// Returns whether `name` is a valid user name without a domain.
pub fn is_valid_user_name(name: &str) -> bool {
    grammar::user_name().is_match(name)
}

/// Returns whether `domain` is a valid user domain.
pub fn is_valid_user_domain(domain: &str) -> bool {
    grammar::user_name().is_match(domain)
}

/// A tag identifying a user.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UserTag {
    name: String,
    /// Empty for the local domain.
    domain: String,
}

impl UserTag {
    /// The kind of this tag type.
    pub const KIND: TagKind = TagKind::User;

    /// Creates a tag from a `name` or `name@domain` id.
    pub fn new(id: &str) -> Result<Self, TagError> {
        let caps = grammar::user()
            .captures(id)
            .ok_or_else(|| TagError::invalid_id(Self::KIND, id))?;
        let name = caps.name("name").map_or("", |m| m.as_str());
        let domain = match caps.name("domain").map(|m| m.as_str()) {
            None | Some(LOCAL_USER_DOMAIN) => "",
            Some(domain) => domain,
        };
        Ok(Self {
            name: name.to_string(),
            domain: domain.to_string(),
        })
    }

    /// Creates a tag for a user of the local domain.
    pub fn new_local(name: &str) -> Result<Self, TagError> {
        if !is_valid_user_name(name) {
            return Err(TagError::InvalidUserName {
                name: name.to_string(),
            });
        }
        Ok(Self {
            name: name.to_string(),
            domain: String::new(),
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

    /// Returns the user id, omitting the local domain.
    #[must_use]
    pub fn id(&self) -> String {
        if self.is_local() {
            self.name.clone()
        } else {
            format!("{}@{}", self.name, self.domain)
        }
    }

    /// Returns the user name without domain.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the user domain, or an empty string for local users.
    #[must_use]
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Returns true if the user belongs to the local domain.
    #[must_use]
    pub fn is_local(&self) -> bool {
        self.domain.is_empty()
    }

    /// Returns `name@domain`, naming the local domain explicitly.
    #[must_use]
    pub fn canonical(&self) -> String {
        let domain = if self.is_local() {
            LOCAL_USER_DOMAIN
        } else {
            &self.domain
        };
        format!("{}@{}", self.name, domain)
    }

    /// Returns a copy of this tag moved into `domain`.
    pub fn with_domain(&self, domain: &str) -> Result<Self, TagError> {
        if !is_valid_user_domain(domain) {
            return Err(TagError::InvalidUserDomain {
                domain: domain.to_string(),
            });
        }
        let domain = if domain == LOCAL_USER_DOMAIN { "" } else { domain };
        Ok(Self {
            name: self.name.clone(),
            domain: domain.to_string(),
        })
    }
}

impl fmt::Display for UserTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", Self::KIND, self.name)?;
        if !self.is_local() {
            write!(f, "@{}", self.domain)?;
        }
        Ok(())
    }
}

impl_tag_serde!(UserTag);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_validity() {
        for (id, valid) in [
            ("", false),
            ("bob", true),
            ("Bob", true),
            ("bOB", true),
            ("b^b", false),
            ("bob1", true),
            ("bob-1", true),
            ("bob+1", true),
            ("bob+", false),
            ("+bob", false),
            ("bob.1", true),
            ("1bob", true),
            ("1-bob", true),
            ("1+bob", true),
            ("1.bob", true),
            ("jim.bob+99-1.", false),
            ("a", false),
            ("0foo", true),
            ("foo bar", false),
            ("bar{}", false),
            ("bar+foo", true),
            ("bar_foo", false),
            ("bar!", false),
            ("bar^", false),
            ("bar*", false),
            ("foo=bar", false),
            ("foo?", false),
            ("[bar]", false),
            ("'foo'", false),
            ("%bar", false),
            ("&bar", false),
            ("#1foo", false),
            ("bar@ram.u", true),
            ("bar@", false),
            ("@local", false),
            ("not/valid", false),
        ] {
            assert_eq!(is_valid_user(id), valid, "{id}");
            assert_eq!(UserTag::new(id).is_ok(), valid, "{id}");
        }
    }

    #[test]
    fn test_local_domain_is_invisible() {
        let bob = UserTag::new("bob").unwrap();
        let explicit = UserTag::new("bob@local").unwrap();
        assert_eq!(bob, explicit);
        assert_eq!(explicit.to_string(), "user-bob");
        assert_eq!(explicit.id(), "bob");
        assert_eq!(explicit.domain(), "");
        assert!(explicit.is_local());
        assert_eq!(explicit.canonical(), "bob@local");
    }

    #[test]
    fn test_remote_user() {
        let tag = UserTag::new("bob@remote").unwrap();
        assert_eq!(tag.to_string(), "user-bob@remote");
        assert_eq!(tag.name(), "bob");
        assert_eq!(tag.domain(), "remote");
        assert!(!tag.is_local());
        assert_eq!(tag.canonical(), "bob@remote");
    }

    #[test]
    fn test_with_domain() {
        let bob = UserTag::new_local("bob").unwrap();
        let remote = bob.with_domain("foo").unwrap();
        assert_eq!(remote.id(), "bob@foo");
        assert_eq!(remote.with_domain(LOCAL_USER_DOMAIN).unwrap(), bob);

        assert_eq!(
            bob.with_domain(""),
            Err(TagError::InvalidUserDomain {
                domain: String::new()
            })
        );
        assert!(bob.with_domain("@foo").is_err());
    }

    #[test]
    fn test_new_local_rejects_domain() {
        assert!(UserTag::new_local("bob@remote").is_err());
        assert_eq!(
            UserTag::new_local("a"),
            Err(TagError::InvalidUserName {
                name: "a".to_string()
            })
        );
    }
}
