//! Core business logic abstractions

pub mod cache;
pub mod clock;
pub mod config;
pub mod convert;
pub mod currency;
pub mod format;
pub mod log;
pub mod rates;

// Re-export main types for cleaner imports
pub use cache::{KeyValueCollection, RateCache, Store};
pub use clock::{Clock, ManualClock, SystemClock};
pub use rates::{RateError, RateProvider, RateSnapshot, RateSource, STALENESS_WINDOW};
