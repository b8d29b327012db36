//! Setup registry: append-ordered setups per member key.

use crate::pattern::MemberKey;
use crate::setup::Setup;
use crate::value::ArgValue;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Owns every registered setup, in registration order per member key.
///
/// Writes happen during the test's setup phase; by convention that phase
/// completes before concurrent exercise begins, so `find` during `add` on
/// the same key is out of contract.
#[derive(Debug, Default)]
pub(crate) struct SetupRegistry {
    setups: RwLock<HashMap<MemberKey, Vec<Arc<Setup>>>>,
}

impl SetupRegistry {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Append a setup under its member key, preserving insertion order
    pub(crate) fn add(&self, setup: Arc<Setup>) {
        let mut setups = self.setups.write().expect("setup registry lock poisoned");
        setups
            .entry(setup.member().clone())
            .or_default()
            .push(setup);
    }

    /// Resolve the earliest-registered setup matching the call.
    ///
    /// Earliest wins, so a narrow setup registered first shadows a later
    /// `Any`-matcher fallback for the arguments it covers.
    pub(crate) fn find(&self, member: &MemberKey, args: &[ArgValue]) -> Option<Arc<Setup>> {
        let setups = self.setups.read().expect("setup registry lock poisoned");
        setups
            .get(member)?
            .iter()
            .find(|setup| setup.matches(args))
            .cloned()
    }

    #[cfg(test)]
    pub(crate) fn len_for(&self, member: &MemberKey) -> usize {
        let setups = self.setups.read().expect("setup registry lock poisoned");
        setups.get(member).map_or(0, Vec::len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::MatchSpec;
    use crate::setup::Reaction;

    fn registered(registry: &SetupRegistry, member: &str, matchers: Vec<MatchSpec>) -> Arc<Setup> {
        let setup = Arc::new(Setup::new(MemberKey::new(member), matchers));
        registry.add(Arc::clone(&setup));
        setup
    }

    #[test]
    fn test_earliest_registered_match_wins() {
        let registry = SetupRegistry::new();
        let narrow = registered(&registry, "M", vec![MatchSpec::equals(5)]);
        let fallback = registered(&registry, "M", vec![MatchSpec::any()]);

        let hit = registry
            .find(&MemberKey::new("M"), &[ArgValue::from(5)])
            .unwrap();
        assert!(Arc::ptr_eq(&hit, &narrow));

        let hit = registry
            .find(&MemberKey::new("M"), &[ArgValue::from(7)])
            .unwrap();
        assert!(Arc::ptr_eq(&hit, &fallback));
    }

    #[test]
    fn test_arity_mismatch_excludes_without_error() {
        let registry = SetupRegistry::new();
        registered(&registry, "M", vec![MatchSpec::any(), MatchSpec::any()]);

        assert!(registry
            .find(&MemberKey::new("M"), &[ArgValue::from(1)])
            .is_none());
    }

    #[test]
    fn test_unknown_member_finds_nothing() {
        let registry = SetupRegistry::new();
        assert!(registry.find(&MemberKey::new("Missing"), &[]).is_none());
    }

    #[test]
    fn test_keys_do_not_share_buckets() {
        let registry = SetupRegistry::new();
        registered(&registry, "A", vec![]);
        registered(&registry, "B", vec![]);

        assert_eq!(registry.len_for(&MemberKey::new("A")), 1);
        assert_eq!(registry.len_for(&MemberKey::new("B")), 1);
        assert!(registry.find(&MemberKey::new("A"), &[]).is_some());
        assert!(registry
            .find(&MemberKey::new("A"), &[ArgValue::from(1)])
            .is_none());
    }

    #[test]
    fn test_found_setup_is_the_registered_one() {
        let registry = SetupRegistry::new();
        let setup = registered(&registry, "M", vec![MatchSpec::any()]);
        crate::setup::SetupHandle::new(Arc::clone(&setup)).throws("boom");

        let hit = registry
            .find(&MemberKey::new("M"), &[ArgValue::from(1)])
            .unwrap();
        assert!(matches!(hit.reaction(), Reaction::Fail(ref m) if m == "boom"));
    }
}
