//! # Integration Scenarios
//!
//! Each module drives the contract only through the mock host, the same way
//! a chain would: typed messages in, padded bodies and host messages out.

pub mod admin_flows;
pub mod allowance_flows;
pub mod bridge_flows;
pub mod history_flows;
