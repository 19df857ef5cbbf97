//! Throttle store port - keyed state behind the throttle ledger.
//!
//! The ledger never reads a value and writes it back in two calls. Every
//! check-then-increment goes through [`ThrottleStore::update`], which
//! implementations must execute atomically per key. Housekeeping goes
//! through [`ThrottleStore::retain`] under the same discipline, so an
//! eviction can never remove a window a concurrent writer just refreshed.
//!
//! Implementations can use a process-wide map (single server) or an
//! external cache that offers an equivalent atomic primitive.

/// Port for throttle state keyed by identity or fingerprint.
///
/// Operations are synchronous and must not block on I/O.
pub trait ThrottleStore<V>: Send + Sync {
    /// Returns a copy of the value stored under `key`.
    fn get(&self, key: &str) -> Option<V>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: V);

    /// Removes `key`. Returns true if something was removed.
    fn delete(&self, key: &str) -> bool;

    /// Snapshot of every entry.
    fn scan(&self) -> Vec<(String, V)>;

    /// Atomic read-modify-write of one key.
    ///
    /// `apply` receives the current value and returns the value to store;
    /// returning `None` removes the key. No other operation on the same key
    /// may interleave between the read and the write. Returns the stored
    /// value.
    fn update(&self, key: &str, apply: &mut dyn FnMut(Option<V>) -> Option<V>) -> Option<V>;

    /// Keeps only entries for which `keep` returns true, atomically.
    ///
    /// Returns the number of entries removed.
    fn retain(&self, keep: &mut dyn FnMut(&str, &V) -> bool) -> usize;

    /// Number of stored entries, expired or not.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
