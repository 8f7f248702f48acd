//! Bounded memoizing wrapper around the conversion engine
//!
//! Eviction is FIFO by insertion order; reads do not refresh recency. The
//! conversion workload is a handful of hot triples per instrument screen, so
//! recency tracking buys nothing over plain insertion order. The cache is a
//! pure accelerator: a cached answer is always the answer the engine would
//! have produced.

use crate::convert;
use crate::registry::UnitRegistry;
use helm_core::ConversionError;
use std::collections::{HashMap, VecDeque};

pub const DEFAULT_CACHE_CAPACITY: usize = 100;

pub struct ConversionCache {
    capacity: usize,
    entries: HashMap<String, f64>,
    insertion_order: VecDeque<String>,
    hits: u64,
    misses: u64,
}

impl ConversionCache {
    pub fn new(capacity: usize) -> Self {
        ConversionCache {
            capacity: capacity.max(1),
            entries: HashMap::with_capacity(capacity.max(1)),
            insertion_order: VecDeque::with_capacity(capacity.max(1)),
            hits: 0,
            misses: 0,
        }
    }

    /// Convert through the cache, falling back to the engine on a miss
    ///
    /// Errors are never cached; only successful conversions occupy capacity.
    pub fn convert(
        &mut self,
        registry: &UnitRegistry,
        value: f64,
        from_id: &str,
        to_id: &str,
    ) -> Result<f64, ConversionError> {
        let key = cache_key(value, from_id, to_id);
        if let Some(&cached) = self.entries.get(&key) {
            self.hits += 1;
            return Ok(cached);
        }

        let result = convert::convert(registry, value, from_id, to_id)?;
        self.insert(key, result);
        Ok(result)
    }

    /// Category-scoped variant of [`ConversionCache::convert`]
    ///
    /// Scoped and bare conversions of the same triple are distinct cache
    /// entries, since duplicate ids may resolve to different units.
    pub fn convert_in(
        &mut self,
        registry: &UnitRegistry,
        category: &str,
        value: f64,
        from_id: &str,
        to_id: &str,
    ) -> Result<f64, ConversionError> {
        let key = format!("{}#{}", category, cache_key(value, from_id, to_id));
        if let Some(&cached) = self.entries.get(&key) {
            self.hits += 1;
            return Ok(cached);
        }

        let result = convert::convert_in(registry, category, value, from_id, to_id)?;
        self.insert(key, result);
        Ok(result)
    }

    fn insert(&mut self, key: String, result: f64) {
        self.misses += 1;
        if self.entries.len() >= self.capacity {
            if let Some(oldest) = self.insertion_order.pop_front() {
                self.entries.remove(&oldest);
            }
        }
        self.entries.insert(key.clone(), result);
        self.insertion_order.push_back(key);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Engine invocations performed on behalf of this cache
    pub fn misses(&self) -> u64 {
        self.misses
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.insertion_order.clear();
        self.hits = 0;
        self.misses = 0;
    }
}

impl Default for ConversionCache {
    fn default() -> Self {
        ConversionCache::new(DEFAULT_CACHE_CAPACITY)
    }
}

fn cache_key(value: f64, from_id: &str, to_id: &str) -> String {
    format!("{}|{}|{}", value, from_id, to_id)
}
