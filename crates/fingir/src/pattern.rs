//! Call pattern descriptors.
//!
//! The engine never inspects call-expression syntax. Test code (or a
//! generated front-end) builds explicit descriptors instead: a member key
//! plus one matcher per argument position.

use crate::matcher::MatchSpec;
use crate::result::{FingirError, FingirResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies an intercepted member.
///
/// Keys are case-sensitive and exact. Method overloads sharing a simple name
/// share one setup/journal bucket; arity is the only disambiguator applied
/// during matching. Property accessors use synthetic `get_<Name>_Mock` /
/// `set_<Name>_Mock` keys so they cannot collide with method overloads of
/// the same simple name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MemberKey(String);

impl MemberKey {
    /// Key for a method, as declared
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Synthetic key for a property getter
    #[must_use]
    pub fn getter(property: &str) -> Self {
        Self(format!("get_{property}_Mock"))
    }

    /// Synthetic key for a property setter
    #[must_use]
    pub fn setter(property: &str) -> Self {
        Self(format!("set_{property}_Mock"))
    }

    /// The key as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MemberKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MemberKey {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for MemberKey {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// Descriptor for a call shape: member key plus ordered matchers.
///
/// Used both to register setups and to verify call counts.
///
/// # Example
///
/// ```
/// use fingir::{CallPattern, MatchSpec};
///
/// let pattern = CallPattern::method("GetSum")
///     .arg(MatchSpec::equals(1))
///     .arg(MatchSpec::any());
/// assert_eq!(pattern.member().as_str(), "GetSum");
/// assert_eq!(pattern.matchers().len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct CallPattern {
    member: MemberKey,
    matchers: Vec<MatchSpec>,
}

impl CallPattern {
    /// Pattern for a method call, matchers added via [`CallPattern::arg`]
    pub fn method(name: impl Into<MemberKey>) -> Self {
        Self {
            member: name.into(),
            matchers: Vec::new(),
        }
    }

    /// Pattern for a property read (getters take no arguments)
    #[must_use]
    pub fn getter(property: &str) -> Self {
        Self {
            member: MemberKey::getter(property),
            matchers: Vec::new(),
        }
    }

    /// Pattern for a property write matching the assigned value
    #[must_use]
    pub fn setter(property: &str, value: MatchSpec) -> Self {
        Self {
            member: MemberKey::setter(property),
            matchers: vec![value],
        }
    }

    /// Append a matcher for the next argument position
    #[must_use]
    pub fn arg(mut self, matcher: MatchSpec) -> Self {
        self.matchers.push(matcher);
        self
    }

    /// Append matchers for the remaining argument positions
    #[must_use]
    pub fn with_args(mut self, matchers: impl IntoIterator<Item = MatchSpec>) -> Self {
        self.matchers.extend(matchers);
        self
    }

    /// The member this pattern targets
    #[must_use]
    pub const fn member(&self) -> &MemberKey {
        &self.member
    }

    /// The ordered argument matchers
    #[must_use]
    pub fn matchers(&self) -> &[MatchSpec] {
        &self.matchers
    }

    pub(crate) fn validate(&self) -> FingirResult<()> {
        if self.member.as_str().is_empty() {
            return Err(FingirError::UnsupportedPattern {
                message: "member name must not be empty".to_string(),
            });
        }
        Ok(())
    }

    pub(crate) fn into_parts(self) -> (MemberKey, Vec<MatchSpec>) {
        (self.member, self.matchers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessor_keys_are_synthetic() {
        assert_eq!(MemberKey::getter("Prop").as_str(), "get_Prop_Mock");
        assert_eq!(MemberKey::setter("Prop").as_str(), "set_Prop_Mock");
    }

    #[test]
    fn test_keys_are_case_sensitive() {
        assert_ne!(MemberKey::new("DoIt"), MemberKey::new("doit"));
    }

    #[test]
    fn test_builder_preserves_matcher_order() {
        let pattern = CallPattern::method("M")
            .arg(MatchSpec::equals(1))
            .arg(MatchSpec::any());
        assert!(matches!(pattern.matchers()[0], MatchSpec::Equals(_)));
        assert!(matches!(pattern.matchers()[1], MatchSpec::Any));
    }

    #[test]
    fn test_setter_pattern_carries_value_matcher() {
        let pattern = CallPattern::setter("Prop", MatchSpec::equals(7));
        assert_eq!(pattern.member().as_str(), "set_Prop_Mock");
        assert_eq!(pattern.matchers().len(), 1);
    }

    #[test]
    fn test_empty_member_is_unsupported() {
        let pattern = CallPattern::method("");
        assert!(matches!(
            pattern.validate(),
            Err(FingirError::UnsupportedPattern { .. })
        ));
    }
}
