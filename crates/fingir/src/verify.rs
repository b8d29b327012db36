//! Call-count verification.

use crate::journal::{CallJournal, CallRecord};
use crate::matcher::MatchSpec;
use crate::pattern::MemberKey;
use crate::result::{FingirError, FingirResult};
use std::sync::Arc;

/// Expected-call-count assertion value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Times {
    expected: usize,
}

impl Times {
    /// Expect exactly one matching call
    #[must_use]
    pub const fn once() -> Self {
        Self { expected: 1 }
    }

    /// Expect no matching call at all
    #[must_use]
    pub const fn never() -> Self {
        Self { expected: 0 }
    }

    /// Expect exactly `expected` matching calls
    #[must_use]
    pub const fn exactly(expected: usize) -> Self {
        Self { expected }
    }

    /// The expected count
    #[must_use]
    pub const fn expected(self) -> usize {
        self.expected
    }
}

/// Counts journaled calls against matcher sets.
///
/// Verification is read-only and idempotent; it can be repeated without
/// side effects. It is not safe to call while invocations it depends on are
/// still in flight - join exercising work first.
#[derive(Debug)]
pub(crate) struct VerificationEngine {
    journal: Arc<CallJournal>,
}

impl VerificationEngine {
    pub(crate) const fn new(journal: Arc<CallJournal>) -> Self {
        Self { journal }
    }

    /// Number of journaled calls to `member` accepted by `matchers`.
    ///
    /// A record counts iff its arity equals the matcher count and every
    /// matcher accepts the positionally aligned argument.
    pub(crate) fn count(&self, member: &MemberKey, matchers: &[MatchSpec]) -> usize {
        self.journal
            .entries_for(member)
            .iter()
            .filter(|record| record_matches(record, matchers))
            .count()
    }

    /// Compare the matching-call count against `times`.
    pub(crate) fn verify(
        &self,
        member: &MemberKey,
        matchers: &[MatchSpec],
        times: Times,
    ) -> FingirResult<()> {
        let actual = self.count(member, matchers);
        tracing::debug!(member = %member, expected = times.expected(), actual, "verifying call count");
        if actual == times.expected() {
            Ok(())
        } else {
            Err(FingirError::CallCountMismatch {
                member: member.clone(),
                expected: times.expected(),
                actual,
            })
        }
    }
}

fn record_matches(record: &CallRecord, matchers: &[MatchSpec]) -> bool {
    record.args().len() == matchers.len()
        && matchers
            .iter()
            .zip(record.args())
            .all(|(matcher, arg)| matcher.accepts(arg))
}
