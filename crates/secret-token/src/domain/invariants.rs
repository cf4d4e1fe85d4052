//! Conservation invariants for the ledger and the coin bridge.
//!
//! Checked by the mock host between invocations and by the property tests.

/// INVARIANT-1: Supply Accounting
/// The recorded total supply equals the sum of all balances.
#[must_use]
pub fn invariant_supply_matches_balances(total_supply: u128, balance_sum: u128) -> bool {
    total_supply == balance_sum
}

/// INVARIANT-2: Full Backing
/// Every token in circulation is backed by one unit of escrowed native coin.
#[must_use]
pub fn invariant_supply_backed_by_escrow(total_supply: u128, escrowed: u128) -> bool {
    total_supply == escrowed
}

/// INVARIANT-3: Allowance Bound
/// A delegated spend never exceeds the allowance it draws on.
#[must_use]
pub fn invariant_spend_within_allowance(allowance: u128, spend: u128) -> bool {
    spend <= allowance
}

/// Invariant check result.
#[derive(Debug, PartialEq, Eq)]
pub enum InvariantViolation {
    /// Balances do not add up to the recorded supply.
    SupplyMismatch,
    /// Supply is not matched by escrowed coin.
    UnbackedSupply,
}

/// Check the ledger-wide invariants at a transaction boundary.
pub fn check_ledger_invariants(
    total_supply: u128,
    balance_sum: u128,
    escrowed: u128,
) -> Result<(), InvariantViolation> {
    if !invariant_supply_matches_balances(total_supply, balance_sum) {
        return Err(InvariantViolation::SupplyMismatch);
    }

    if !invariant_supply_backed_by_escrow(total_supply, escrowed) {
        return Err(InvariantViolation::UnbackedSupply);
    }

    Ok(())
}
