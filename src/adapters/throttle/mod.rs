//! Throttle adapters.
//!
//! ## Available Adapters
//!
//! - `InMemoryThrottleStore` - Process-local store for windows and quotas
//! - `ThrottleReaper` - Background eviction of expired windows
//!
//! ## Usage
//!
//! ```ignore
//! use coaching_core::adapters::clock::SystemClock;
//! use coaching_core::adapters::throttle::{InMemoryThrottleStore, ThrottleReaper};
//! use coaching_core::application::ThrottleLedger;
//!
//! let ledger = Arc::new(ThrottleLedger::new(
//!     Arc::new(InMemoryThrottleStore::new()),
//!     Arc::new(InMemoryThrottleStore::new()),
//!     Arc::new(SystemClock),
//! ));
//! let reaper = ThrottleReaper::new(ledger.clone()).spawn(shutdown_rx);
//! ```

mod in_memory_store;
mod reaper;

pub use in_memory_store::InMemoryThrottleStore;
pub use reaper::{ThrottleReaper, ThrottleReaperConfig};
