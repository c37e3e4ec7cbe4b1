//! In-memory ledger with deterministic iteration order.

use std::collections::BTreeMap;
use std::ops::ControlFlow;

use super::{Ledger, LedgerError};
use crate::domain::{AccountAddress, Coin, Coins};

/// Map-backed [`Ledger`] for tests and genesis tooling.
///
/// Accounts iterate in address order and balances in denomination
/// order, so full scans are deterministic.  Module accounts are ordinary
/// accounts addressed by their module name.
#[derive(Debug, Clone, Default)]
#[must_use]
pub struct MemLedger {
    accounts: BTreeMap<AccountAddress, Coins>,
}

impl MemLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Credits `coin` to `address` out of thin air.  Setup utility for
    /// tests and genesis; circulating-supply bookkeeping is the real
    /// ledger's concern.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Overflow`] if the credit overflows.
    pub fn fund(&mut self, address: &AccountAddress, coin: Coin) -> Result<(), LedgerError> {
        self.credit(address, &coin)
    }

    fn module_address(module: &str) -> Result<AccountAddress, LedgerError> {
        AccountAddress::parse(module).map_err(|_| LedgerError::UnknownModule {
            module: module.to_string(),
        })
    }

    fn credit(&mut self, address: &AccountAddress, coin: &Coin) -> Result<(), LedgerError> {
        let held = self.accounts.entry(address.clone()).or_default();
        *held = held.checked_add(coin).ok_or_else(|| LedgerError::Overflow {
            denom: coin.denom.to_string(),
        })?;
        Ok(())
    }

    fn debit(&mut self, address: &AccountAddress, coin: &Coin) -> Result<(), LedgerError> {
        let held = self.accounts.entry(address.clone()).or_default();
        *held = held
            .checked_sub(coin)
            .ok_or_else(|| LedgerError::InsufficientFunds {
                address: address.to_string(),
                denom: coin.denom.to_string(),
                needed: coin.amount.get(),
                available: held.amount_of(&coin.denom).get(),
            })?;
        Ok(())
    }
}

impl Ledger for MemLedger {
    fn send(
        &mut self,
        from: &AccountAddress,
        to: &AccountAddress,
        coins: &[Coin],
    ) -> Result<(), LedgerError> {
        for coin in coins {
            self.debit(from, coin)?;
            self.credit(to, coin)?;
        }
        Ok(())
    }

    fn send_to_module(
        &mut self,
        from: &AccountAddress,
        module: &str,
        coins: &[Coin],
    ) -> Result<(), LedgerError> {
        let to = Self::module_address(module)?;
        self.send(from, &to, coins)
    }

    fn burn(&mut self, module: &str, coins: &[Coin]) -> Result<(), LedgerError> {
        let account = Self::module_address(module)?;
        for coin in coins {
            self.debit(&account, coin)?;
        }
        Ok(())
    }

    fn balances(&self, address: &AccountAddress) -> Coins {
        self.accounts.get(address).cloned().unwrap_or_default()
    }

    fn for_each_balance(&self, visit: &mut dyn FnMut(&AccountAddress, &Coin) -> ControlFlow<()>) {
        for (address, coins) in &self.accounts {
            for coin in coins {
                if let ControlFlow::Break(()) = visit(address, coin) {
                    return;
                }
            }
        }
    }
}
