//! Fingir: runtime engine for generated test doubles.
//!
//! Fingir (Spanish: "to feign") is the runtime half of a mocking library.
//! A code generator (out of scope here) emits a stand-in type per mocked
//! trait; every intercepted member forwards into one [`MockRuntime`], which
//! resolves registered setups, journals the invocation, and later answers
//! call-count verification.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                     FINGIR Architecture                       │
//! ├──────────────────────────────────────────────────────────────┤
//! │  ┌───────────┐   invoke    ┌─────────────┐   ┌────────────┐  │
//! │  │ Generated │────────────►│ MockRuntime │──►│ CallJournal│  │
//! │  │ stand-in  │             │   (facade)  │   │ (append-   │  │
//! │  └───────────┘             └──────┬──────┘   │  only log) │  │
//! │  ┌───────────┐  setup/verify      │          └─────┬──────┘  │
//! │  │ Test code │────────────────────┤                │         │
//! │  └───────────┘             ┌──────▼──────┐   ┌─────▼──────┐  │
//! │                            │SetupRegistry│   │Verification│  │
//! │                            │(first match)│   │   Engine   │  │
//! │                            └─────────────┘   └────────────┘  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use fingir::{args, CallPattern, MatchSpec, MockRuntime, Times};
//!
//! let runtime = MockRuntime::new();
//!
//! // Narrow setup first, Any-matcher fallback last: earliest match wins.
//! runtime
//!     .setup(CallPattern::method("GetSum").arg(MatchSpec::equals(5)))
//!     .unwrap()
//!     .returns(500);
//! runtime
//!     .setup(CallPattern::method("GetSum").arg(MatchSpec::any()))
//!     .unwrap()
//!     .returns(-1);
//!
//! assert_eq!(runtime.invoke_value::<i32>("GetSum", args![5]), 500);
//! assert_eq!(runtime.invoke_value::<i32>("GetSum", args![7]), -1);
//!
//! runtime
//!     .verify(CallPattern::method("GetSum").arg(MatchSpec::any()), Times::exactly(2))
//!     .unwrap();
//! ```

#![warn(missing_docs)]
// Lints are configured in workspace Cargo.toml [workspace.lints.clippy]

mod journal;
mod matcher;
mod pattern;
mod registry;
mod result;
mod runtime;
mod setup;
mod value;
mod verify;


pub use journal::{CallJournal, CallRecord};
pub use matcher::MatchSpec;
pub use pattern::{CallPattern, MemberKey};
pub use result::{FingirError, FingirResult};
pub use runtime::MockRuntime;
pub use setup::{Setup, SetupHandle};
pub use value::ArgValue;
pub use verify::Times;
