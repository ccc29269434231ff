//! In-memory fakes for the collaborator traits.

use std::cell::Cell;
use std::collections::HashMap;
use std::rc::Rc;

use harmony_traits::{BoxError, KeyValueStore, RandomSource};

/// `HashMap`-backed key-value store.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, BoxError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), BoxError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&mut self, key: &str) -> Result<(), BoxError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// A store whose writes always fail (quota exceeded, read-only profile, ...).
/// Reads succeed and return nothing.
#[derive(Debug, Default)]
pub struct ReadOnlyStore;

impl KeyValueStore for ReadOnlyStore {
    fn get(&self, _key: &str) -> Result<Option<String>, BoxError> {
        Ok(None)
    }

    fn set(&mut self, _key: &str, _value: &str) -> Result<(), BoxError> {
        Err(Box::new(std::io::Error::other("store is read-only")))
    }

    fn delete(&mut self, _key: &str) -> Result<(), BoxError> {
        Err(Box::new(std::io::Error::other("store is read-only")))
    }
}

/// Deterministic source that always returns the point at fraction `t` of the range.
/// `t = 0.0` yields the lower bound, `t = 1.0` the upper bound.
#[derive(Debug, Clone)]
pub struct FixedRandom {
    t: Rc<Cell<f64>>,
}

impl FixedRandom {
    pub fn new(t: f64) -> Self {
        Self {
            t: Rc::new(Cell::new(t.clamp(0.0, 1.0))),
        }
    }

    /// Change the fraction; clones observe the change.
    pub fn set(&self, t: f64) {
        self.t.set(t.clamp(0.0, 1.0));
    }
}

impl RandomSource for FixedRandom {
    fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        if hi <= lo {
            return lo;
        }
        lo + (hi - lo) * self.t.get()
    }
}
