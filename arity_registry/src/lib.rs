//! # Arity Registry
//!
//! This crate implements callable-arity lookup for structural editing.
//!
//! ## Philosophy
//!
//! - **Lookup, not analysis**: The registry answers "minimum required
//!   arguments for this name" from a table the host populates; it never
//!   inspects code.
//! - **Unresolvable is an answer**: Unknown names, non-callables and
//!   excluded irregular forms resolve to `None`. That routes callers to
//!   their fallback policy; it is not an error.
//! - **Typed config**: The exclusion set is explicit serializable
//!   configuration, not a hard-coded list.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

/// Minimum number of required leading arguments for a callable
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MinArity(pub usize);

impl MinArity {
    pub const fn get(self) -> usize {
        self.0
    }
}

impl fmt::Display for MinArity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Name-to-arity lookup consumed by the structural editor
///
/// `None` means unresolvable: empty or unknown name, a non-callable, or a
/// name in the exclusion set.
pub trait ArityResolver {
    fn resolve(&self, name: &str) -> Option<MinArity>;
}

/// Exclusion configuration
///
/// Names whose call syntax is irregular and must never be arity-wrapped.
/// The defaults are the anonymous-function constructor and the
/// interactive-declaration marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArityConfig {
    pub excluded: Vec<String>,
}

impl Default for ArityConfig {
    fn default() -> Self {
        Self {
            excluded: vec!["lambda".to_string(), "interactive".to_string()],
        }
    }
}

/// Table-backed arity resolver with a configurable exclusion set
#[derive(Debug, Clone)]
pub struct ArityRegistry {
    arities: BTreeMap<String, MinArity>,
    excluded: BTreeSet<String>,
}

impl ArityRegistry {
    /// Creates a registry with the default exclusion set
    pub fn new() -> Self {
        Self::with_config(ArityConfig::default())
    }

    /// Creates a registry seeded from `config`
    pub fn with_config(config: ArityConfig) -> Self {
        Self {
            arities: BTreeMap::new(),
            excluded: config.excluded.into_iter().collect(),
        }
    }

    /// Registers a callable; re-registering a name updates its arity
    pub fn register(&mut self, name: impl Into<String>, arity: MinArity) {
        self.arities.insert(name.into(), arity);
    }

    /// Adds a name to the exclusion set
    pub fn exclude(&mut self, name: impl Into<String>) {
        self.excluded.insert(name.into());
    }

    pub fn is_excluded(&self, name: &str) -> bool {
        self.excluded.contains(name)
    }

    /// Number of registered callables
    pub fn len(&self) -> usize {
        self.arities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arities.is_empty()
    }
}

impl Default for ArityRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ArityResolver for ArityRegistry {
    fn resolve(&self, name: &str) -> Option<MinArity> {
        if name.is_empty() || self.excluded.contains(name) {
            return None;
        }
        self.arities.get(name).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_resolve() {
        let mut registry = ArityRegistry::new();
        registry.register("concat", MinArity(2));
        assert_eq!(registry.resolve("concat"), Some(MinArity(2)));
        assert_eq!(registry.resolve("unknown"), None);
    }

    #[test]
    fn test_empty_name_unresolvable() {
        let mut registry = ArityRegistry::new();
        registry.register("", MinArity(1));
        assert_eq!(registry.resolve(""), None);
    }

    #[test]
    fn test_reregistration_updates() {
        let mut registry = ArityRegistry::new();
        registry.register("f", MinArity(1));
        registry.register("f", MinArity(3));
        assert_eq!(registry.resolve("f"), Some(MinArity(3)));
    }

    #[test]
    fn test_default_exclusions() {
        let mut registry = ArityRegistry::new();
        registry.register("lambda", MinArity(2));
        registry.register("interactive", MinArity(0));
        assert!(registry.is_excluded("lambda"));
        assert!(registry.is_excluded("interactive"));
        assert_eq!(registry.resolve("lambda"), None);
        assert_eq!(registry.resolve("interactive"), None);
    }

    #[test]
    fn test_exclusion_survives_registration_order() {
        // Exclude then register
        let mut registry = ArityRegistry::new();
        registry.exclude("setq");
        registry.register("setq", MinArity(2));
        assert_eq!(registry.resolve("setq"), None);

        // Register then exclude
        let mut registry = ArityRegistry::new();
        registry.register("when", MinArity(1));
        registry.exclude("when");
        assert_eq!(registry.resolve("when"), None);
    }

    #[test]
    fn test_zero_arity_is_resolvable() {
        let mut registry = ArityRegistry::new();
        registry.register("buffer-name", MinArity(0));
        assert_eq!(registry.resolve("buffer-name"), Some(MinArity(0)));
    }

    #[test]
    fn test_custom_config() {
        let config = ArityConfig {
            excluded: vec!["fn".to_string()],
        };
        let mut registry = ArityRegistry::with_config(config);
        registry.register("fn", MinArity(2));
        registry.register("lambda", MinArity(2));
        assert_eq!(registry.resolve("fn"), None);
        assert_eq!(registry.resolve("lambda"), Some(MinArity(2)));
    }

    #[test]
    fn test_config_default_shape() {
        let config = ArityConfig::default();
        let json = serde_json::to_value(&config).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({ "excluded": ["lambda", "interactive"] })
        );
    }
}
