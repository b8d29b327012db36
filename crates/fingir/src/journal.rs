//! Call journal: thread-safe, append-only log of invocations.
//!
//! The journal is the only structure under sustained concurrent write
//! pressure, and exactness here is a hard correctness requirement: exactly
//! N parallel invocations must later count to exactly N. Appends take a
//! write lock, so entries are never lost or torn.
//!
//! Arguments arrive already isolated (see [`crate::value`]); records hold
//! their own copies, so nothing a caller does after the invocation returns
//! can change what verification observes.

use crate::pattern::MemberKey;
use crate::value::ArgValue;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;

/// An immutable snapshot of one invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallRecord {
    member: MemberKey,
    args: Vec<ArgValue>,
}

impl CallRecord {
    pub(crate) const fn new(member: MemberKey, args: Vec<ArgValue>) -> Self {
        Self { member, args }
    }

    /// The member that was invoked
    #[must_use]
    pub const fn member(&self) -> &MemberKey {
        &self.member
    }

    /// The isolated argument snapshots, in call order
    #[must_use]
    pub fn args(&self) -> &[ArgValue] {
        &self.args
    }
}

/// Append-only log of invocations, keyed by member.
///
/// Records are retained for the lifetime of the owning runtime (or until
/// [`CallJournal::clear`]).
#[derive(Debug, Default)]
pub struct CallJournal {
    calls: RwLock<HashMap<MemberKey, Vec<CallRecord>>>,
}

impl CallJournal {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Append one invocation. Linearizable per key; concurrent writers
    /// cannot lose entries.
    pub(crate) fn record(&self, member: &MemberKey, args: &[ArgValue]) {
        tracing::trace!(member = %member, arity = args.len(), "journaling call");
        let record = CallRecord::new(member.clone(), args.to_vec());
        let mut calls = self.calls.write().expect("call journal lock poisoned");
        calls.entry(member.clone()).or_default().push(record);
    }

    /// Stable view of every call recorded for `member`, in append order.
    ///
    /// The view is a copy; later invocations do not grow it.
    #[must_use]
    pub fn entries_for(&self, member: &MemberKey) -> Vec<CallRecord> {
        let calls = self.calls.read().expect("call journal lock poisoned");
        calls.get(member).cloned().unwrap_or_default()
    }

    /// Number of calls recorded for `member`
    #[must_use]
    pub fn len_for(&self, member: &MemberKey) -> usize {
        let calls = self.calls.read().expect("call journal lock poisoned");
        calls.get(member).map_or(0, Vec::len)
    }

    /// Total calls recorded across all members
    #[must_use]
    pub fn total_recorded(&self) -> usize {
        let calls = self.calls.read().expect("call journal lock poisoned");
        calls.values().map(Vec::len).sum()
    }

    /// Discard every recorded call
    pub fn clear(&self) {
        self.calls
            .write()
            .expect("call journal lock poisoned")
            .clear();
    }
}
