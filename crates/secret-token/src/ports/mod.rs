//! # Ports Layer
//!
//! - **inbound**: the contract API driven by the host
//! - **outbound**: the keyed state store the engine drives

pub mod inbound;
pub mod outbound;

pub use inbound::TokenContractApi;
pub use outbound::{LedgerStore, WriteSet};
