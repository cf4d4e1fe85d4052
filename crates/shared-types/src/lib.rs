//! # Shared Types Crate
//!
//! Primitives that cross the boundary between the host execution environment
//! and the token engine.
//!
//! ## Design Principles
//!
//! - **Strings on the wire**: 128-bit amounts serialize as decimal strings so
//!   no client loses precision decoding them.
//! - **Canonical identity**: the engine keys all state by `CanonicalAddr`;
//!   `HumanAddr` only appears at the boundary.
//! - **Host owns effects**: moving native coin or calling other contracts is
//!   expressed as `HostMsg` values the host executes after a successful call.

pub mod entities;
pub mod envelope;
pub mod errors;
pub mod security;

pub use entities::*;
pub use envelope::*;
pub use errors::*;
pub use security::*;
