#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Selection session controller and analysis request lifecycle.
//!
//! This is the orchestration core: drawing-tool and pointer events come
//! in, well-formed backend requests go out, and completions are matched
//! back against the selection that spawned them. Everything here is
//! synchronous and single-threaded — only the transport call itself
//! suspends, and it lives in the client crate. Cancellation is logical:
//! a completion tagged with a stale [`SelectionId`] is dropped, whether
//! or not the underlying transport could abort the call.
//!
//! [`SelectionId`]: parcel_map_session_models::SelectionId

pub mod controller;
pub mod lifecycle;

pub use controller::SessionController;
pub use lifecycle::Lifecycle;
