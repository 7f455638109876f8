//! Ordered-fallback resolution of the backend settings.
//!
//! The base URL and credential are looked up on every invocation from a
//! list of named sources, first non-empty value wins. Lookup goes through
//! [`ConfigSource`] so the precedence logic never touches the process
//! environment directly and can be exercised with an injected map.

use std::collections::HashMap;
use std::fmt;

use crate::config::schema::BackendSources;
use crate::gateway::GatewayError;

/// Message returned to callers when no base URL source yields a value.
pub const MISSING_BASE_URL: &str = "Backend base URL is not configured";

/// A named key/value source (environment, injected map, ...).
pub trait ConfigSource: Send + Sync {
    /// Raw value stored under `name`, if any.
    fn get(&self, name: &str) -> Option<String>;
}

/// Reads from the process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvSource;

impl ConfigSource for EnvSource {
    fn get(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

/// Fixed in-memory source.
#[derive(Debug, Clone, Default)]
pub struct MapSource {
    values: HashMap<String, String>,
}

impl MapSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MapSource {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

impl ConfigSource for MapSource {
    fn get(&self, name: &str) -> Option<String> {
        self.values.get(name).cloned()
    }
}

/// A value together with the name of the source that supplied it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved<'a> {
    pub source: &'a str,
    pub value: String,
}

/// Return the first source in `names` whose value is non-empty after trimming.
pub fn resolve_first<'a, S, N>(source: &S, names: &'a [N]) -> Option<Resolved<'a>>
where
    S: ConfigSource + ?Sized,
    N: AsRef<str>,
{
    names.iter().find_map(|name| {
        let name = name.as_ref();
        let value = source.get(name)?;
        let value = value.trim();
        if value.is_empty() {
            None
        } else {
            Some(Resolved {
                source: name,
                value: value.to_string(),
            })
        }
    })
}

/// Backend settings resolved for a single invocation.
#[derive(Clone, PartialEq, Eq)]
pub struct BackendConfig {
    /// Absolute base URL, never ending in `/`.
    pub base_url: String,
    /// Secret injected into every outbound request when present.
    pub credential: Option<String>,
}

impl fmt::Debug for BackendConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendConfig")
            .field("base_url", &self.base_url)
            .field("credential", &self.credential.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Resolve the backend base URL and credential from `source`.
///
/// A missing base URL is a configuration error; a missing credential is not.
pub fn resolve_backend<S>(source: &S, sources: &BackendSources) -> Result<BackendConfig, GatewayError>
where
    S: ConfigSource + ?Sized,
{
    let base = resolve_first(source, &sources.base_url_sources)
        .map(|r| {
            tracing::debug!(source = r.source, "Backend base URL resolved");
            r.value.trim_end_matches('/').to_string()
        })
        .filter(|base| !base.is_empty())
        .ok_or_else(|| GatewayError::Configuration(MISSING_BASE_URL.to_string()))?;

    let credential = resolve_first(source, &sources.credential_sources).map(|r| {
        tracing::debug!(source = r.source, "Backend credential resolved");
        r.value
    });
    if credential.is_none() {
        tracing::debug!("No credential configured, forwarding without one");
    }

    Ok(BackendConfig {
        base_url: base,
        credential,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_first_non_empty_wins() {
        let source = MapSource::new().with("A", "").with("B", "second").with("C", "third");
        let order = names(&["A", "B", "C"]);
        let resolved = resolve_first(&source, &order).unwrap();
        assert_eq!(resolved.source, "B");
        assert_eq!(resolved.value, "second");
    }

    #[test]
    fn test_whitespace_counts_as_empty() {
        let source = MapSource::new().with("A", "   ").with("B", " v \n");
        let order = names(&["A", "B"]);
        let resolved = resolve_first(&source, &order).unwrap();
        assert_eq!(resolved.source, "B");
        assert_eq!(resolved.value, "v");
    }

    #[test]
    fn test_nothing_resolves() {
        let source = MapSource::new().with("OTHER", "x");
        assert!(resolve_first(&source, &names(&["A", "B"])).is_none());
    }

    #[test]
    fn test_trailing_slashes_stripped() {
        let source = MapSource::new().with("API_BASE_URL", "https://api.example.com///");
        let backend = resolve_backend(&source, &BackendSources::default()).unwrap();
        assert_eq!(backend.base_url, "https://api.example.com");
        assert_eq!(backend.credential, None);
    }

    #[test]
    fn test_slash_only_base_is_missing() {
        let source = MapSource::new().with("BACKEND_BASE_URL", "/");
        let err = resolve_backend(&source, &BackendSources::default()).unwrap_err();
        assert!(matches!(err, GatewayError::Configuration(_)));
    }

    #[test]
    fn test_missing_base_url_is_configuration_error() {
        let source = MapSource::new().with("MY_API_KEY", "secret");
        let err = resolve_backend(&source, &BackendSources::default()).unwrap_err();
        assert_eq!(err.to_string(), MISSING_BASE_URL);
    }

    #[test]
    fn test_credential_precedence() {
        let source: MapSource = [
            ("BACKEND_BASE_URL", "https://api.example.com"),
            ("MY_API_KEY", ""),
            ("API_KEY", "secret123"),
            ("BACKEND_API_KEY", "ignored"),
        ]
        .into_iter()
        .collect();
        let backend = resolve_backend(&source, &BackendSources::default()).unwrap();
        assert_eq!(backend.credential.as_deref(), Some("secret123"));
    }

    #[test]
    fn test_debug_redacts_credential() {
        let backend = BackendConfig {
            base_url: "https://api.example.com".into(),
            credential: Some("secret123".into()),
        };
        let printed = format!("{:?}", backend);
        assert!(!printed.contains("secret123"));
        assert!(printed.contains("<redacted>"));
    }
}
