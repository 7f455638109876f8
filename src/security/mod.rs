//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Normalized request:
//!     → path_guard.rs (reject absolute-URL sub-paths, pin target origin)
//!     → headers.rs (drop hop-by-hop headers, inject credential)
//!     → Pass to forwarder
//! ```
//!
//! # Design Decisions
//! - Fail closed: reject on any security check failure
//! - No trust in client input
//! - Deny-list is a process-wide constant, never mutated

pub mod headers;
pub mod path_guard;

pub use headers::{filter_headers, inject_credential, is_hop_by_hop, HeaderMapping, HOP_BY_HOP_HEADERS};
pub use path_guard::{check_sub_path, check_target, is_absolute_url};
