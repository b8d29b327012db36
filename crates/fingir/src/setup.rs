//! Setups: a registered call pattern plus the reaction it triggers.
//!
//! Registration and configuration are split to support a fluent surface:
//! the runtime registers the `(member, matchers)` pair first and hands back
//! a [`SetupHandle`], and `returns`/`callback`/`throws` configure the
//! reaction afterwards. Reconfiguring a handle before the first matching
//! call is legal and replaces the reaction wholesale.

use crate::matcher::MatchSpec;
use crate::pattern::MemberKey;
use crate::value::ArgValue;
use std::any::Any;
use std::fmt;
use std::sync::{Arc, RwLock};

pub(crate) type ValueProvider = Arc<dyn Fn() -> Box<dyn Any + Send> + Send + Sync>;
pub(crate) type VoidCallback = Arc<dyn Fn() + Send + Sync>;

/// What a matched setup does. Exactly one reaction is active at a time.
#[derive(Clone)]
pub(crate) enum Reaction {
    /// Nothing configured; the invocation falls through to the neutral default
    Unset,
    /// Run a side-effect callback (void members)
    Callback(VoidCallback),
    /// Produce the configured return value (value members)
    Provide(ValueProvider),
    /// Panic with the configured message
    Fail(String),
}

impl fmt::Debug for Reaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unset => f.write_str("Unset"),
            Self::Callback(_) => f.write_str("Callback(..)"),
            Self::Provide(_) => f.write_str("Provide(..)"),
            Self::Fail(message) => f.debug_tuple("Fail").field(message).finish(),
        }
    }
}

/// A registered conditional behavior for one member.
pub struct Setup {
    member: MemberKey,
    matchers: Vec<MatchSpec>,
    reaction: RwLock<Reaction>,
}

impl Setup {
    /// Create an unconfigured setup for `member` gated by `matchers`
    #[must_use]
    pub fn new(member: MemberKey, matchers: Vec<MatchSpec>) -> Self {
        Self {
            member,
            matchers,
            reaction: RwLock::new(Reaction::Unset),
        }
    }

    /// The member this setup reacts to
    #[must_use]
    pub const fn member(&self) -> &MemberKey {
        &self.member
    }

    /// The ordered argument matchers
    #[must_use]
    pub fn matchers(&self) -> &[MatchSpec] {
        &self.matchers
    }

    /// Whether this setup applies to a call with the given arguments.
    ///
    /// Arity must match exactly; a setup for a different arity is excluded
    /// without error.
    pub(crate) fn matches(&self, args: &[ArgValue]) -> bool {
        self.matchers.len() == args.len()
            && self
                .matchers
                .iter()
                .zip(args)
                .all(|(matcher, arg)| matcher.accepts(arg))
    }

    pub(crate) fn reaction(&self) -> Reaction {
        self.reaction
            .read()
            .expect("setup reaction lock poisoned")
            .clone()
    }

    fn set_reaction(&self, reaction: Reaction) {
        *self
            .reaction
            .write()
            .expect("setup reaction lock poisoned") = reaction;
    }
}

impl fmt::Debug for Setup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Setup")
            .field("member", &self.member)
            .field("matchers", &self.matchers)
            .field("reaction", &self.reaction())
            .finish()
    }
}

/// Fluent configurator for a registered setup.
///
/// Cloning a handle is cheap; all clones configure the same setup.
#[derive(Debug, Clone)]
pub struct SetupHandle {
    setup: Arc<Setup>,
}

impl SetupHandle {
    pub(crate) const fn new(setup: Arc<Setup>) -> Self {
        Self { setup }
    }

    /// React by returning a clone of `value`
    pub fn returns<T>(&self, value: T) -> &Self
    where
        T: Clone + Send + Sync + 'static,
    {
        self.setup
            .set_reaction(Reaction::Provide(Arc::new(move || Box::new(value.clone()))));
        self
    }

    /// React by returning whatever `provider` produces per call
    pub fn returns_with<T, F>(&self, provider: F) -> &Self
    where
        T: Send + 'static,
        F: Fn() -> T + Send + Sync + 'static,
    {
        self.setup
            .set_reaction(Reaction::Provide(Arc::new(move || Box::new(provider()))));
        self
    }

    /// React by running `callback` (void members)
    pub fn callback<F>(&self, callback: F) -> &Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.setup
            .set_reaction(Reaction::Callback(Arc::new(callback)));
        self
    }

    /// React by panicking with `message`, standing in for a failure of the
    /// mocked member itself
    pub fn throws(&self, message: impl Into<String>) -> &Self {
        self.setup.set_reaction(Reaction::Fail(message.into()));
        self
    }
}
