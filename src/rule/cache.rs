//! Cache of trees rebuilt from printable form

use crate::rule::ast::Node;
use crate::rule::evaluator::evaluate;
use crate::rule::printable::from_printable;
use crate::rule::value::Record;
use ahash::AHashMap;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::sync::Arc;

/// Trees kept before the cache starts over
pub const MAX_CACHE_ENTRIES: usize = 4096;

/// Global printable-form cache with fast hashing (ahash)
static PRINTABLE_CACHE: Lazy<RwLock<AHashMap<String, Arc<Node>>>> = Lazy::new(|| {
    let map = AHashMap::with_capacity(256);
    RwLock::new(map)
});

/// Get or rebuild the tree for a printable form
#[inline]
pub fn get_or_reconstruct(printable: &str) -> Arc<Node> {
    // Fast path: check read lock first
    {
        let cache = PRINTABLE_CACHE.read();
        if let Some(ast) = cache.get(printable) {
            return Arc::clone(ast);
        }
    }

    let ast = Arc::new(from_printable(printable));

    {
        let mut cache = PRINTABLE_CACHE.write();
        if cache.len() >= MAX_CACHE_ENTRIES && !cache.contains_key(printable) {
            cache.clear();
        }
        cache.insert(printable.to_string(), Arc::clone(&ast));
    }

    ast
}

/// Evaluate a persisted rule's printable form against a record.
/// Empty text holds no tree and is false.
#[inline]
pub fn check_printable(printable: &str, record: &Record) -> bool {
    if printable.trim().is_empty() {
        return false;
    }

    let ast = get_or_reconstruct(printable);
    evaluate(&ast, record)
}

/// Clear the cache
pub fn clear_cache() {
    let mut cache = PRINTABLE_CACHE.write();
    cache.clear();
}

/// Number of cached trees
pub fn cache_size() -> usize {
    let cache = PRINTABLE_CACHE.read();
    cache.len()
}

/// Whether a printable form is cached
pub fn is_cached(printable: &str) -> bool {
    PRINTABLE_CACHE.read().contains_key(printable)
}
