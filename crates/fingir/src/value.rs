//! Captured argument snapshots and the isolation policy.
//!
//! Every intercepted argument is snapshotted into an [`ArgValue`] before it
//! reaches the journal or a matcher. The snapshot is a serialization round
//! trip into an owned `serde_json::Value` tree, so later mutation of the
//! caller's object cannot retroactively change what verification observes
//! for a past call.
//!
//! The policy, in order:
//! - primitives and strings become JSON scalars (copied by value);
//! - sequences become JSON arrays with element-wise isolated copies;
//! - any other serializable value is captured as a full owned tree;
//! - a value that cannot be serialized is replaced with an [`ArgValue::Opaque`]
//!   placeholder. Isolation never aborts the mocked invocation.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An isolated snapshot of one intercepted argument.
///
/// Snapshots compare structurally: two captures of equal values are equal
/// regardless of where the originals lived.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ArgValue {
    /// Structurally captured argument
    Snapshot(Value),
    /// Placeholder for an argument that could not be captured
    Opaque(String),
}

impl ArgValue {
    /// Capture an isolated snapshot of `value`.
    ///
    /// A value that fails to serialize is journaled as a descriptive
    /// placeholder instead of failing the call.
    pub fn capture<T: Serialize + ?Sized>(value: &T) -> Self {
        match serde_json::to_value(value) {
            Ok(snapshot) => Self::Snapshot(snapshot),
            Err(err) => {
                let ty = std::any::type_name::<T>();
                tracing::debug!(%ty, %err, "argument not capturable, journaling placeholder");
                Self::Opaque(format!("[uncapturable {ty}: {err}]"))
            }
        }
    }

    /// Snapshot of the unit/null argument
    #[must_use]
    pub const fn null() -> Self {
        Self::Snapshot(Value::Null)
    }

    /// Whether this argument was replaced by a placeholder during capture
    #[must_use]
    pub const fn is_opaque(&self) -> bool {
        matches!(self, Self::Opaque(_))
    }

    /// Borrow the captured JSON tree, if any
    #[must_use]
    pub const fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Snapshot(value) => Some(value),
            Self::Opaque(_) => None,
        }
    }

    /// Decode the snapshot back into a typed value.
    ///
    /// Returns `None` for opaque placeholders and for snapshots that do not
    /// deserialize as `T`.
    #[must_use]
    pub fn decode<T: serde::de::DeserializeOwned>(&self) -> Option<T> {
        match self {
            Self::Snapshot(value) => serde_json::from_value(value.clone()).ok(),
            Self::Opaque(_) => None,
        }
    }
}

macro_rules! impl_from_primitive {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl From<$ty> for ArgValue {
                fn from(value: $ty) -> Self {
                    Self::capture(&value)
                }
            }
        )+
    };
}

impl_from_primitive!(bool, i8, i16, i32, i64, u8, u16, u32, u64, f32, f64, char);

impl From<&str> for ArgValue {
    fn from(value: &str) -> Self {
        Self::capture(value)
    }
}

impl From<String> for ArgValue {
    fn from(value: String) -> Self {
        Self::capture(&value)
    }
}

impl<T: Serialize> From<Vec<T>> for ArgValue {
    fn from(value: Vec<T>) -> Self {
        Self::capture(&value)
    }
}

impl<T: Serialize> From<&[T]> for ArgValue {
    fn from(value: &[T]) -> Self {
        Self::capture(value)
    }
}

/// Capture an ordered argument list for [`MockRuntime::invoke_void`] and
/// friends.
///
/// Each expression is snapshotted via [`ArgValue::capture`], so the produced
/// vector is already isolated from the caller's values.
///
/// [`MockRuntime::invoke_void`]: crate::MockRuntime::invoke_void
///
/// # Example
///
/// ```
/// use fingir::args;
///
/// let none = args![];
/// let pair = args![1, "two"];
/// assert!(none.is_empty());
/// assert_eq!(pair.len(), 2);
/// ```
#[macro_export]
macro_rules! args {
    () => {
        ::std::vec::Vec::<$crate::ArgValue>::new()
    };
    ($($arg:expr),+ $(,)?) => {
        ::std::vec![$($crate::ArgValue::capture(&$arg)),+]
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::ser::Error as _;

    /// Serializes to an error unconditionally, like a handle-bearing type.
    struct Uncapturable;

    impl Serialize for Uncapturable {
        fn serialize<S: serde::Serializer>(&self, _: S) -> Result<S::Ok, S::Error> {
            Err(S::Error::custom("handle cannot be serialized"))
        }
    }

    #[test]
    fn test_capture_primitives_by_value() {
        assert_eq!(ArgValue::capture(&5), ArgValue::Snapshot(Value::from(5)));
        assert_eq!(
            ArgValue::capture(&true),
            ArgValue::Snapshot(Value::from(true))
        );
        assert_eq!(ArgValue::capture("hi"), ArgValue::Snapshot(Value::from("hi")));
    }

    #[test]
    fn test_capture_sequence_element_wise() {
        let items = vec!["a".to_string(), "b".to_string()];
        let captured = ArgValue::capture(&items);
        assert_eq!(
            captured.as_json().and_then(Value::as_array).map(Vec::len),
            Some(2)
        );
    }

    #[test]
    fn test_capture_structural_equality() {
        #[derive(Serialize)]
        struct Point {
            x: i32,
            y: i32,
        }

        let a = ArgValue::capture(&Point { x: 1, y: 2 });
        let b = ArgValue::capture(&Point { x: 1, y: 2 });
        let c = ArgValue::capture(&Point { x: 1, y: 3 });
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_capture_failure_becomes_opaque() {
        let captured = ArgValue::capture(&Uncapturable);
        assert!(captured.is_opaque());
        assert!(matches!(
            captured,
            ArgValue::Opaque(ref placeholder) if placeholder.contains("uncapturable")
        ));
    }

    #[test]
    fn test_decode_round_trip() {
        let captured = ArgValue::capture(&42_i32);
        assert_eq!(captured.decode::<i32>(), Some(42));
        assert_eq!(captured.decode::<String>(), None);
        assert_eq!(ArgValue::Opaque("x".to_string()).decode::<i32>(), None);
    }

    #[test]
    fn test_args_macro() {
        let empty = args![];
        assert!(empty.is_empty());

        let three = args![1, "two", vec![3, 3, 3]];
        assert_eq!(three.len(), 3);
        assert_eq!(three[0], ArgValue::from(1));
        assert_eq!(three[1], ArgValue::from("two"));
    }
}
