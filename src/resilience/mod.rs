//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Request to backend:
//!     → timeouts.rs (enforce overall deadline)
//!     → On failure: surfaced as ForwardError, never retried
//! ```
//!
//! # Design Decisions
//! - Timeouts are non-negotiable; every external call has a deadline
//! - No retries and no circuit breaking: the gateway is a single hop and
//!   the caller owns retry policy

pub mod timeouts;
