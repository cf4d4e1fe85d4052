//! # Adapters Layer (Outer Hexagon)
//!
//! - **memory_store**: `LedgerStore` over in-process maps
//! - **staged**: copy-on-write overlay that turns one invocation into a `WriteSet`
//! - **mock_host**: bank, clock and randomness around a hosted contract

pub mod memory_store;
pub mod mock_host;
pub mod staged;

pub use memory_store::InMemoryStore;
pub use mock_host::{DeliveredCallback, MockHost};
pub use staged::StagedStore;
