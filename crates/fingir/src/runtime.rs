//! The mock runtime facade.
//!
//! Composes the setup registry, the call journal, and the verification
//! engine behind the surface a generated stand-in forwards into:
//!
//! - void member `M(a1..an)` calls [`MockRuntime::invoke_void`];
//! - value member `M(a1..an) -> T` returns [`MockRuntime::invoke_value`];
//! - async members use the `_async` variants, which hand back an
//!   already-resolved future (the engine performs no scheduling);
//! - property accessors use the synthetic `get_<P>_Mock` / `set_<P>_Mock`
//!   keys (see [`crate::MemberKey`]).
//!
//! One runtime instance lives per mocked object, for the test's duration.
//! It is `Send + Sync` and may be invoked from many threads at once;
//! configure setups before spawning concurrent callers, and join all
//! exercising work before verifying.

use crate::journal::CallJournal;
use crate::matcher::MatchSpec;
use crate::pattern::{CallPattern, MemberKey};
use crate::registry::SetupRegistry;
use crate::result::FingirResult;
use crate::setup::{Reaction, Setup, SetupHandle};
use crate::value::ArgValue;
use crate::verify::{Times, VerificationEngine};
use std::future::{ready, Ready};
use std::sync::Arc;

/// Runtime engine for one mocked object.
///
/// # Example
///
/// ```
/// use fingir::{args, CallPattern, MatchSpec, MockRuntime, Times};
///
/// let runtime = MockRuntime::new();
/// runtime
///     .setup(
///         CallPattern::method("GetSum")
///             .arg(MatchSpec::equals(1))
///             .arg(MatchSpec::equals(2)),
///     )
///     .unwrap()
///     .returns(10);
///
/// assert_eq!(runtime.invoke_value::<i32>("GetSum", args![1, 2]), 10);
/// assert_eq!(runtime.invoke_value::<i32>("GetSum", args![2, 2]), 0);
///
/// runtime
///     .verify(
///         CallPattern::method("GetSum")
///             .arg(MatchSpec::equals(1))
///             .arg(MatchSpec::equals(2)),
///         Times::once(),
///     )
///     .unwrap();
/// ```
#[derive(Debug)]
pub struct MockRuntime {
    registry: SetupRegistry,
    journal: Arc<CallJournal>,
    verifier: VerificationEngine,
}

impl Default for MockRuntime {
    fn default() -> Self {
        Self::new()
    }
}

impl MockRuntime {
    /// Create an empty runtime: no setups, empty journal
    #[must_use]
    pub fn new() -> Self {
        let journal = Arc::new(CallJournal::new());
        Self {
            registry: SetupRegistry::new(),
            verifier: VerificationEngine::new(Arc::clone(&journal)),
            journal,
        }
    }

    /// Register a conditional behavior for the calls `pattern` describes.
    ///
    /// The returned handle configures the reaction (`returns`, `callback`,
    /// `throws`). Setups registered earlier win over later ones, so narrow
    /// setups go first and `Any`-matcher fallbacks last.
    ///
    /// # Errors
    ///
    /// [`FingirError::UnsupportedPattern`] if the pattern is unusable;
    /// previously registered setups are unaffected.
    pub fn setup(&self, pattern: CallPattern) -> FingirResult<SetupHandle> {
        pattern.validate()?;
        let (member, matchers) = pattern.into_parts();
        tracing::debug!(member = %member, matchers = matchers.len(), "registering setup");
        Ok(self.add_setup(Setup::new(member, matchers)))
    }

    /// Register a behavior for reads of property `property`
    ///
    /// # Errors
    ///
    /// [`FingirError::UnsupportedPattern`] if the pattern is unusable.
    pub fn setup_get(&self, property: &str) -> FingirResult<SetupHandle> {
        self.setup(CallPattern::getter(property))
    }

    /// Register a behavior for writes of property `property` whose assigned
    /// value is accepted by `value`
    ///
    /// # Errors
    ///
    /// [`FingirError::UnsupportedPattern`] if the pattern is unusable.
    pub fn setup_set(&self, property: &str, value: MatchSpec) -> FingirResult<SetupHandle> {
        self.setup(CallPattern::setter(property, value))
    }

    /// Register an already-built setup descriptor
    pub fn add_setup(&self, setup: Setup) -> SetupHandle {
        let setup = Arc::new(setup);
        self.registry.add(Arc::clone(&setup));
        SetupHandle::new(setup)
    }

    /// Forwarding target for void members.
    ///
    /// Journals the call, then runs the earliest matching setup's callback
    /// if one is configured. Unmatched calls are legal no-ops.
    ///
    /// # Panics
    ///
    /// Panics with the configured message when the matching setup `throws` -
    /// indistinguishable from the mocked member itself failing.
    pub fn invoke_void(&self, member: &str, args: Vec<ArgValue>) {
        let member = MemberKey::new(member);
        self.journal.record(&member, &args);
        match self.resolve(&member, &args) {
            Some(Reaction::Callback(callback)) => callback(),
            Some(Reaction::Fail(message)) => panic!("{message}"),
            _ => {}
        }
    }

    /// Forwarding target for value-returning members.
    ///
    /// Journals the call, then returns the earliest matching setup's
    /// provided value. Unmatched (or unconfigured) calls return the type's
    /// neutral default - never an error.
    ///
    /// # Panics
    ///
    /// Panics with the configured message when the matching setup `throws`,
    /// or with a descriptive message when the configured value is not a `T`.
    pub fn invoke_value<T: Default + 'static>(&self, member: &str, args: Vec<ArgValue>) -> T {
        let member = MemberKey::new(member);
        self.journal.record(&member, &args);
        match self.resolve(&member, &args) {
            Some(Reaction::Provide(provider)) => match provider().downcast::<T>() {
                Ok(value) => *value,
                Err(_) => panic!(
                    "setup for \"{member}\" does not provide a value of type {}",
                    std::any::type_name::<T>()
                ),
            },
            Some(Reaction::Fail(message)) => panic!("{message}"),
            _ => T::default(),
        }
    }

    /// Forwarding target for async void members.
    ///
    /// Semantics match [`MockRuntime::invoke_void`]; the caller receives an
    /// already-resolved future.
    ///
    /// # Panics
    ///
    /// As [`MockRuntime::invoke_void`].
    pub fn invoke_void_async(&self, member: &str, args: Vec<ArgValue>) -> Ready<()> {
        self.invoke_void(member, args);
        ready(())
    }

    /// Forwarding target for async value-returning members.
    ///
    /// Semantics match [`MockRuntime::invoke_value`]; the caller receives an
    /// already-resolved future of the behavior's outcome.
    ///
    /// # Panics
    ///
    /// As [`MockRuntime::invoke_value`].
    pub fn invoke_value_async<T: Default + 'static>(
        &self,
        member: &str,
        args: Vec<ArgValue>,
    ) -> Ready<T> {
        ready(self.invoke_value(member, args))
    }

    /// Assert that the journal holds exactly `times` calls matching
    /// `pattern`.
    ///
    /// Read-only and idempotent.
    ///
    /// # Errors
    ///
    /// [`FingirError::CallCountMismatch`] carrying the member, expected, and
    /// actual counts; [`FingirError::UnsupportedPattern`] for an unusable
    /// pattern.
    pub fn verify(&self, pattern: CallPattern, times: Times) -> FingirResult<()> {
        pattern.validate()?;
        let (member, matchers) = pattern.into_parts();
        self.verifier.verify(&member, &matchers, times)
    }

    /// Assert the read count of property `property`
    ///
    /// # Errors
    ///
    /// As [`MockRuntime::verify`].
    pub fn verify_get(&self, property: &str, times: Times) -> FingirResult<()> {
        self.verify(CallPattern::getter(property), times)
    }

    /// Assert the write count of property `property` for assigned values
    /// accepted by `value`
    ///
    /// # Errors
    ///
    /// As [`MockRuntime::verify`].
    pub fn verify_set(&self, property: &str, value: MatchSpec, times: Times) -> FingirResult<()> {
        self.verify(CallPattern::setter(property, value), times)
    }

    /// Number of journaled calls matching `pattern`
    #[must_use]
    pub fn call_count(&self, pattern: &CallPattern) -> usize {
        self.verifier.count(pattern.member(), pattern.matchers())
    }

    /// Read access to the call journal
    #[must_use]
    pub fn journal(&self) -> &CallJournal {
        &self.journal
    }

    fn resolve(&self, member: &MemberKey, args: &[ArgValue]) -> Option<Reaction> {
        let setup = self.registry.find(member, args);
        tracing::trace!(member = %member, matched = setup.is_some(), "resolved invocation");
        setup.map(|setup| setup.reaction())
    }
}
