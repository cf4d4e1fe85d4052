//! # Secret-Token Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── harness.rs        # TestChain: a hosted token plus query shortcuts
//! │
//! └── integration/      # End-to-end scenarios through the mock host
//!     ├── bridge_flows.rs
//!     ├── allowance_flows.rs
//!     ├── receiver_flows.rs
//!     ├── history_flows.rs
//!     └── admin_flows.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p token-tests
//!
//! # By category
//! cargo test -p token-tests integration::allowance_flows::
//!
//! # Benchmarks
//! cargo bench -p token-tests
//! ```

pub mod harness;
pub mod integration;
