//! Core rule engine and service wiring for the binday collection calendar.

/// Per-year memoization of derived date sets.
pub mod cache;
/// The collection-day decision function.
pub mod engine;
/// Configuration errors.
pub mod error;
/// Holiday rules and their expansion to dates.
pub mod holiday;
/// Leap-forward windows after rescheduling holidays.
pub mod leap;
/// Domain models shared by all providers.
pub mod model;
/// Registry for plugging municipality providers into the service.
pub mod plugin;
/// Traits describing the provider interfaces.
pub mod ports;
/// Week rotation indexing.
pub mod rotation;
/// High-level service facade used by clients.
pub mod service;

pub use engine::*;
pub use error::*;
pub use holiday::{HolidayKind, HolidayOffset, HolidayRule};
pub use model::*;
pub use plugin::*;
pub use ports::*;
pub use service::*;
