//! Matchers: immutable predicates over a single captured argument.
//!
//! A [`MatchSpec`] is used both when registering setups ("when called with
//! X") and when verifying call counts. Specs are stateless after
//! construction and can be evaluated concurrently.

use crate::value::ArgValue;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

type PredicateFn = Arc<dyn Fn(&ArgValue) -> bool + Send + Sync>;

/// Predicate over one argument position.
#[derive(Clone)]
pub enum MatchSpec {
    /// Accepts every argument
    Any,
    /// Accepts arguments structurally equal to the captured value
    Equals(ArgValue),
    /// Accepts arguments the predicate approves of
    Predicate(PredicateFn),
}

impl MatchSpec {
    /// Matcher accepting any argument (the `It.IsAny` token)
    #[must_use]
    pub const fn any() -> Self {
        Self::Any
    }

    /// Matcher accepting arguments equal to `expected`.
    ///
    /// Equality is structural over the captured snapshot - value semantics,
    /// never identity.
    pub fn equals<T: Serialize>(expected: T) -> Self {
        Self::Equals(ArgValue::capture(&expected))
    }

    /// Matcher evaluating a raw predicate over the captured snapshot
    pub fn predicate<F>(pred: F) -> Self
    where
        F: Fn(&ArgValue) -> bool + Send + Sync + 'static,
    {
        Self::Predicate(Arc::new(pred))
    }

    /// Typed predicate matcher (the `It.Is` token).
    ///
    /// The snapshot is decoded back into `T` before the predicate runs; a
    /// snapshot that does not decode as `T` is rejected. A panicking
    /// predicate propagates to the evaluating caller.
    pub fn satisfies<T, F>(pred: F) -> Self
    where
        T: DeserializeOwned,
        F: Fn(T) -> bool + Send + Sync + 'static,
    {
        Self::Predicate(Arc::new(move |arg| {
            arg.decode::<T>().is_some_and(|value| pred(value))
        }))
    }

    /// Evaluate this matcher against one captured argument
    #[must_use]
    pub fn accepts(&self, arg: &ArgValue) -> bool {
        match self {
            Self::Any => true,
            Self::Equals(expected) => expected == arg,
            Self::Predicate(pred) => pred(arg),
        }
    }
}

impl fmt::Debug for MatchSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str("Any"),
            Self::Equals(expected) => f.debug_tuple("Equals").field(expected).finish(),
            Self::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_any_accepts_everything() {
        let spec = MatchSpec::any();
        assert!(spec.accepts(&ArgValue::from(1)));
        assert!(spec.accepts(&ArgValue::from("anything")));
        assert!(spec.accepts(&ArgValue::Opaque("placeholder".to_string())));
    }

    #[test]
    fn test_equals_is_structural() {
        let spec = MatchSpec::equals(vec![1, 2, 3]);
        assert!(spec.accepts(&ArgValue::capture(&vec![1, 2, 3])));
        assert!(!spec.accepts(&ArgValue::capture(&vec![1, 2])));
        assert!(!spec.accepts(&ArgValue::from("1,2,3")));
    }

    #[test]
    fn test_satisfies_bounds() {
        let spec = MatchSpec::satisfies(|x: i32| x > 10 && x < 100);
        assert!(spec.accepts(&ArgValue::from(50)));
        assert!(!spec.accepts(&ArgValue::from(5)));
        assert!(!spec.accepts(&ArgValue::from(150)));
    }

    #[test]
    fn test_satisfies_rejects_wrong_type() {
        let spec = MatchSpec::satisfies(|x: i32| x > 0);
        assert!(!spec.accepts(&ArgValue::from("not a number")));
        assert!(!spec.accepts(&ArgValue::Opaque("placeholder".to_string())));
    }

    #[test]
    fn test_raw_predicate_sees_snapshot() {
        let spec = MatchSpec::predicate(ArgValue::is_opaque);
        assert!(spec.accepts(&ArgValue::Opaque("x".to_string())));
        assert!(!spec.accepts(&ArgValue::from(1)));
    }

    #[test]
    fn test_debug_formatting() {
        assert_eq!(format!("{:?}", MatchSpec::any()), "Any");
        assert_eq!(
            format!("{:?}", MatchSpec::predicate(|_| true)),
            "Predicate(..)"
        );
    }
}
