//! External ledger collaborator: balance transfers, burns, and the
//! full-balance scan the liquidation engine relies on.
//!
//! The ledger is shared, mutable state owned by the enclosing
//! transaction; this module only defines the call surface ([`Ledger`])
//! and an in-memory implementation ([`MemLedger`]) for tests and
//! genesis tooling.  Ledger errors are never rewrapped: the registry
//! propagates them to callers unchanged.

mod memory;

use std::ops::ControlFlow;

use crate::domain::{AccountAddress, Amount, Coin, Coins, Denom};

pub use memory::MemLedger;

/// Errors surfaced by ledger operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    /// An account's balance cannot cover a debit.
    #[error("insufficient funds: {address} has {available}{denom}, needs {needed}{denom}")]
    InsufficientFunds {
        /// Debited account.
        address: String,
        /// Denomination being debited.
        denom: String,
        /// Amount the operation required.
        needed: u128,
        /// Amount actually available.
        available: u128,
    },

    /// A module account name does not resolve to a valid address.
    #[error("unknown module account: {module:?}")]
    UnknownModule {
        /// The rejected module name.
        module: String,
    },

    /// Crediting a balance overflowed.
    #[error("balance overflow on {denom}")]
    Overflow {
        /// Denomination whose balance overflowed.
        denom: String,
    },
}

/// Call surface of the balance-transfer and token-burn ledger.
pub trait Ledger {
    /// Transfers `coins` between two accounts.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::InsufficientFunds`] if `from` cannot cover
    /// any coin, or [`LedgerError::Overflow`] on a credit overflow.
    fn send(
        &mut self,
        from: &AccountAddress,
        to: &AccountAddress,
        coins: &[Coin],
    ) -> Result<(), LedgerError>;

    /// Transfers `coins` from an account into a module account.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`Ledger::send`], plus
    /// [`LedgerError::UnknownModule`] for an invalid module name.
    fn send_to_module(
        &mut self,
        from: &AccountAddress,
        module: &str,
        coins: &[Coin],
    ) -> Result<(), LedgerError>;

    /// Destroys `coins` held by a module account, removing them from
    /// circulation.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::InsufficientFunds`] if the module account
    /// does not hold the coins, or [`LedgerError::UnknownModule`] for an
    /// invalid module name.
    fn burn(&mut self, module: &str, coins: &[Coin]) -> Result<(), LedgerError>;

    /// Full balance multiset of one account.
    #[must_use]
    fn balances(&self, address: &AccountAddress) -> Coins;

    /// Balance of one denomination for one account.
    #[must_use]
    fn balance(&self, address: &AccountAddress, denom: &Denom) -> Amount {
        self.balances(address).amount_of(denom)
    }

    /// Visits every `(account, coin)` pair on the ledger in the
    /// ledger's iteration order.  The visitor interrupts the walk by
    /// returning [`ControlFlow::Break`].
    fn for_each_balance(&self, visit: &mut dyn FnMut(&AccountAddress, &Coin) -> ControlFlow<()>);
}
