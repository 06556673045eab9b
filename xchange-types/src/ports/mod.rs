//! Port traits (interfaces for adapters).
//!
//! These are the contracts that adapters must implement.
//! The service layer depends on these traits, not concrete implementations.

mod clock;
mod network;
mod preference;
mod store;

pub use clock::{Clock, SystemClock};
pub use network::{Endpoint, HttpMethod, NetworkClient};
pub use preference::{PreferenceKey, PreferenceStore};
pub use store::RateStore;
