//! # Inbound Ports (Driving Ports)
//!
//! The API the host drives. Each call runs to completion with no suspension
//! points; ordering and isolation across calls belong to the host.

use crate::errors::{ExecuteError, TokenError};
use crate::msg::{HandleMsg, HandleResponse, InitMsg, QueryAnswer, QueryMsg};
use shared_types::{BlockInfo, Env};

/// Primary API of the token contract.
pub trait TokenContractApi {
    /// One-time setup of token metadata and contract state.
    fn instantiate(&mut self, env: &Env, msg: InitMsg) -> Result<(), TokenError>;

    /// Run one state-changing message.
    ///
    /// # Returns
    /// The padded answer plus host messages to run in the same atomic unit.
    /// On failure no state has changed and the error carries a padded body.
    fn execute(&mut self, env: &Env, msg: HandleMsg) -> Result<HandleResponse, ExecuteError>;

    /// Run one read-only query.
    fn query(&self, block: &BlockInfo, msg: QueryMsg) -> Result<QueryAnswer, TokenError>;
}
