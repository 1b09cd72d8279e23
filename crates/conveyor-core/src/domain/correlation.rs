//! Correlation keys: one opaque base, three derived cache sub-keys.

use serde::{Deserialize, Serialize};
use std::fmt;
use ulid::Ulid;

/// Identifier tying together all state for one dispatched task.
///
/// The base travels in the dispatch message; the sub-keys (`status`,
/// `dataframe`, `result`) are deterministic suffixes of it, so any holder
/// of the base can reconstruct them without a lookup. Keys are created
/// fresh per dispatch and never reused; the cache entries they point at are
/// garbage-collected by TTL, never by explicit deletion.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CorrelationKey {
    base: String,
}

impl CorrelationKey {
    /// Generate a fresh key. ULID bases are coordination-free and have
    /// enough entropy that concurrent dispatches never collide.
    pub fn new() -> Self {
        Self::from_ulid(Ulid::new())
    }

    pub fn from_ulid(ulid: Ulid) -> Self {
        Self {
            base: format!("task-{ulid}"),
        }
    }

    /// Reconstruct a key from a base read off a dispatch message.
    pub fn from_base(base: impl Into<String>) -> Self {
        Self { base: base.into() }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    /// Sub-key holding the task's mutable status flag.
    pub fn status(&self) -> String {
        format!("{}-status", self.base)
    }

    /// Sub-key holding bulky tabular input, when the dispatch carried one.
    pub fn dataframe(&self) -> String {
        format!("{}-dataframe", self.base)
    }

    /// Sub-key where the consumer deposits the task's result.
    pub fn result(&self) -> String {
        format!("{}-result", self.base)
    }
}

impl Default for CorrelationKey {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CorrelationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn bases_are_pairwise_distinct() {
        let bases: HashSet<String> = (0..1000)
            .map(|_| CorrelationKey::new().base().to_string())
            .collect();
        assert_eq!(bases.len(), 1000);
    }

    #[test]
    fn sub_key_derivation_is_deterministic() {
        let key = CorrelationKey::new();
        assert_eq!(key.status(), key.status());
        assert_eq!(key.dataframe(), key.dataframe());
        assert_eq!(key.result(), key.result());
    }

    #[test]
    fn sub_keys_share_the_base() {
        let key = CorrelationKey::from_base("task-01H");
        assert_eq!(key.status(), "task-01H-status");
        assert_eq!(key.dataframe(), "task-01H-dataframe");
        assert_eq!(key.result(), "task-01H-result");
    }

    #[test]
    fn reconstruction_from_base_matches_original() {
        let key = CorrelationKey::new();
        let rebuilt = CorrelationKey::from_base(key.base());
        assert_eq!(rebuilt, key);
        assert_eq!(rebuilt.status(), key.status());
    }
}
