//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → GatewayConfig (validated, immutable)
//!     → shared via Arc with the request handler
//!
//! Per request:
//!     sources.rs resolves base URL + credential from the named sources
//!     → BackendConfig (lives for one invocation only)
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; there is no reload path
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks
//! - Secrets never live in GatewayConfig, only the names of their sources

pub mod loader;
pub mod schema;
pub mod sources;
pub mod validation;

pub use loader::{load_config, load_or_default, ConfigError};
pub use schema::{
    BackendSources, GatewayConfig, GatewaySettings, ListenerConfig, LogFormat, ObservabilityConfig,
};
pub use sources::{resolve_backend, resolve_first, BackendConfig, ConfigSource, EnvSource, MapSource};
