//! Test/production classification of compilations and files.

use dashmap::DashMap;
use once_cell::sync::Lazy;
use std::path::Path;
use std::sync::Arc;

/// Marker whose presence (any case) classifies an identity as test code.
const TEST_MARKER: &str = "tests";

static SHARED: Lazy<Arc<ClassificationCache>> = Lazy::new(|| Arc::new(ClassificationCache::new()));

/// Memoized "is this a test artifact?" predicate.
///
/// Entries are created on first lookup and never invalidated. Two threads
/// racing on the same key may both compute the value; the result depends
/// only on the key, so whichever insert wins is correct.
#[derive(Debug, Default)]
pub struct ClassificationCache {
    entries: DashMap<String, bool>,
}

impl ClassificationCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide cache instance.
    #[must_use]
    pub fn shared() -> Arc<Self> {
        Arc::clone(&SHARED)
    }

    /// Returns true if `identity` names test code.
    ///
    /// Blank identities are never test units and are not cached.
    #[must_use]
    pub fn is_test_unit(&self, identity: &str) -> bool {
        if identity.trim().is_empty() {
            return false;
        }
        if let Some(hit) = self.entries.get(identity) {
            return *hit;
        }
        *self
            .entries
            .entry(identity.to_string())
            .or_insert_with(|| identity.to_ascii_lowercase().contains(TEST_MARKER))
    }

    /// Classifies a compilation by assembly name. An absent name is treated
    /// as empty.
    #[must_use]
    pub fn is_test_assembly(&self, assembly_name: Option<&str>) -> bool {
        self.is_test_unit(assembly_name.unwrap_or_default())
    }

    /// Classifies a source file by its path.
    #[must_use]
    pub fn is_test_file(&self, path: Option<&Path>) -> bool {
        path.is_some_and(|p| self.is_test_unit(&p.to_string_lossy()))
    }

    /// Number of cached identities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing has been classified yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
