//! Memoization of completed extractions.
//!
//! Identical requests within a session are answered from a bounded LRU cache
//! instead of repeating the provider call. A cached hit returns the stored
//! result verbatim, including its original token and model figures; it does
//! not represent new spend.

use std::num::NonZeroUsize;

use exstruct_core::ExtractionResult;
use lru::LruCache;
use parking_lot::Mutex;
use sha2::{Digest, Sha256};

/// Stable fingerprint over the semantically relevant inputs of a call.
///
/// Fields are length-delimited before hashing so no two distinct input
/// tuples can collapse onto the same byte stream.
#[must_use]
pub fn fingerprint(schema_identity: &str, prompt: &str, input: &str, model: &str) -> String {
    let mut hasher = Sha256::new();
    for field in [schema_identity, prompt, input, model] {
        hasher.update((field.len() as u64).to_be_bytes());
        hasher.update(field.as_bytes());
    }
    hex::encode(hasher.finalize())
}

/// Bounded LRU cache of successful extraction results.
///
/// Capacity 0 disables caching entirely; every lookup misses and every
/// store is dropped.
pub struct ResponseCache {
    inner: Option<Mutex<LruCache<String, ExtractionResult>>>,
}

impl ResponseCache {
    /// Create a cache holding up to `capacity` results.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: NonZeroUsize::new(capacity).map(|cap| Mutex::new(LruCache::new(cap))),
        }
    }

    /// Whether caching is active.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.inner.is_some()
    }

    /// Look up a previously stored result, refreshing its recency.
    pub fn get(&self, key: &str) -> Option<ExtractionResult> {
        let cache = self.inner.as_ref()?;
        cache.lock().get(key).cloned()
    }

    /// Store a result. Only successful results are kept; failures must be
    /// re-attempted, not replayed.
    pub fn put(&self, key: String, result: &ExtractionResult) {
        if !result.success() {
            return;
        }
        if let Some(cache) = &self.inner {
            cache.lock().put(key, result.clone());
        }
    }

    /// Number of cached entries.
    #[must_use]
    pub fn len(&self) -> usize {
        match &self.inner {
            Some(cache) => cache.lock().len(),
            None => 0,
        }
    }

    /// Whether the cache holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn success(tag: &str) -> ExtractionResult {
        ExtractionResult::ok(json!({"tag": tag}), "gpt-4o-2024-08-06", Some(30))
    }

    #[test]
    fn test_fingerprint_is_stable() {
        let a = fingerprint("recipe", "Extract the recipe.", "text", "gpt-4o");
        let b = fingerprint("recipe", "Extract the recipe.", "text", "gpt-4o");
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn test_fingerprint_distinguishes_fields() {
        let base = fingerprint("recipe", "prompt", "input", "gpt-4o");
        assert_ne!(base, fingerprint("review", "prompt", "input", "gpt-4o"));
        assert_ne!(base, fingerprint("recipe", "other", "input", "gpt-4o"));
        assert_ne!(base, fingerprint("recipe", "prompt", "other", "gpt-4o"));
        assert_ne!(base, fingerprint("recipe", "prompt", "input", "gpt-4o-mini"));
    }

    #[test]
    fn test_fingerprint_field_boundaries() {
        // "ab" + "c" must not collide with "a" + "bc".
        assert_ne!(
            fingerprint("ab", "c", "", ""),
            fingerprint("a", "bc", "", "")
        );
    }

    #[test]
    fn test_hit_returns_stored_result() {
        let cache = ResponseCache::new(4);
        let result = success("first");
        cache.put("key".to_string(), &result);

        let hit = cache.get("key").unwrap();
        assert!(hit.success());
        assert_eq!(hit.data(), result.data());
        assert_eq!(hit.tokens_used(), Some(30));
    }

    #[test]
    fn test_miss_on_unknown_key() {
        let cache = ResponseCache::new(4);
        assert!(cache.get("absent").is_none());
    }

    #[test]
    fn test_errors_are_not_stored() {
        let cache = ResponseCache::new(4);
        cache.put("key".to_string(), &ExtractionResult::error("boom"));
        assert!(cache.get("key").is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_zero_capacity_disables_cache() {
        let cache = ResponseCache::new(0);
        assert!(!cache.is_enabled());
        cache.put("key".to_string(), &success("x"));
        assert!(cache.get("key").is_none());
    }

    #[test]
    fn test_lru_eviction() {
        let cache = ResponseCache::new(2);
        cache.put("a".to_string(), &success("a"));
        cache.put("b".to_string(), &success("b"));

        // Touch "a" so "b" is the least recently used entry.
        assert!(cache.get("a").is_some());
        cache.put("c".to_string(), &success("c"));

        assert!(cache.get("a").is_some());
        assert!(cache.get("b").is_none());
        assert!(cache.get("c").is_some());
    }
}
