//! Denominated amounts and multisets of them.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::{Amount, Denom};

/// A single (denomination, amount) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[must_use]
pub struct Coin {
    /// Asset denomination.
    pub denom: Denom,
    /// Raw amount in the smallest unit.
    pub amount: Amount,
}

impl Coin {
    /// Creates a coin.
    pub const fn new(denom: Denom, amount: Amount) -> Self {
        Self { denom, amount }
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.denom)
    }
}

/// A multiset of coins, normalized to be denom-sorted, duplicate-free,
/// and free of zero amounts.
///
/// `Coins` models a pool's total held liquidity and an account's full
/// balance.  Normalization makes equality comparisons meaningful and
/// keeps iteration order deterministic.
///
/// # Examples
///
/// ```
/// use lagoon::domain::{Amount, Coin, Coins, Denom};
///
/// let a = Denom::new("tokena").expect("valid denom");
/// let coins = Coins::try_new(vec![Coin::new(a.clone(), Amount::new(100))])
///     .expect("valid coins");
/// assert_eq!(coins.amount_of(&a), Amount::new(100));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
#[must_use]
pub struct Coins(Vec<Coin>);

impl Coins {
    /// The empty multiset.
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Builds a normalized multiset from an arbitrary coin list:
    /// duplicates are merged, zero amounts dropped, entries sorted by
    /// denomination.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::RegistryError::Overflow`] if merging
    /// duplicate denominations overflows.
    pub fn try_new(coins: Vec<Coin>) -> Result<Self, crate::error::RegistryError> {
        let mut out = Self::new();
        for coin in coins {
            out = out
                .checked_add(&coin)
                .ok_or(crate::error::RegistryError::Overflow)?;
        }
        Ok(out)
    }

    /// Returns `true` if the multiset holds no coins.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of distinct denominations held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the multiset holds no coins.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Amount held of `denom`, zero when absent.
    #[must_use]
    pub fn amount_of(&self, denom: &Denom) -> Amount {
        match self.0.binary_search_by(|c| c.denom.cmp(denom)) {
            Ok(idx) => self.0[idx].amount,
            Err(_) => Amount::ZERO,
        }
    }

    /// The denomination names held, in sorted order.
    #[must_use]
    pub fn denoms(&self) -> Vec<Denom> {
        self.0.iter().map(|c| c.denom.clone()).collect()
    }

    /// Iterates the held coins in denomination order.
    pub fn iter(&self) -> core::slice::Iter<'_, Coin> {
        self.0.iter()
    }

    /// Adds `coin` to the multiset.  Returns `None` on overflow.
    /// Adding a zero amount is a no-op.
    #[must_use]
    pub fn checked_add(&self, coin: &Coin) -> Option<Self> {
        if coin.amount.is_zero() {
            return Some(self.clone());
        }
        let mut next = self.0.clone();
        match next.binary_search_by(|c| c.denom.cmp(&coin.denom)) {
            Ok(idx) => {
                next[idx].amount = next[idx].amount.checked_add(&coin.amount)?;
            }
            Err(idx) => next.insert(idx, coin.clone()),
        }
        Some(Self(next))
    }

    /// Removes `coin` from the multiset.  Returns `None` if the held
    /// amount is smaller than the amount removed.  A denomination whose
    /// amount reaches zero disappears from the set.
    #[must_use]
    pub fn checked_sub(&self, coin: &Coin) -> Option<Self> {
        if coin.amount.is_zero() {
            return Some(self.clone());
        }
        let mut next = self.0.clone();
        let idx = next.binary_search_by(|c| c.denom.cmp(&coin.denom)).ok()?;
        let remaining = next[idx].amount.checked_sub(&coin.amount)?;
        if remaining.is_zero() {
            let _ = next.remove(idx);
        } else {
            next[idx].amount = remaining;
        }
        Some(Self(next))
    }
}

impl<'a> IntoIterator for &'a Coins {
    type Item = &'a Coin;
    type IntoIter = core::slice::Iter<'a, Coin>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Coins {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for coin in &self.0 {
            if !first {
                f.write_str(",")?;
            }
            write!(f, "{coin}")?;
            first = false;
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn denom(name: &str) -> Denom {
        let Ok(d) = Denom::new(name) else {
            panic!("valid denom");
        };
        d
    }

    fn coins(pairs: &[(&str, u128)]) -> Coins {
        let list = pairs
            .iter()
            .map(|(d, a)| Coin::new(denom(d), Amount::new(*a)))
            .collect();
        let Ok(c) = Coins::try_new(list) else {
            panic!("valid coins");
        };
        c
    }

    // -- Normalization --------------------------------------------------------

    #[test]
    fn try_new_sorts_by_denom() {
        let c = coins(&[("zeta", 1), ("alpha", 2)]);
        assert_eq!(c.denoms(), vec![denom("alpha"), denom("zeta")]);
    }

    #[test]
    fn try_new_merges_duplicates() {
        let c = coins(&[("atom", 10), ("atom", 5)]);
        assert_eq!(c.len(), 1);
        assert_eq!(c.amount_of(&denom("atom")), Amount::new(15));
    }

    #[test]
    fn try_new_drops_zero_amounts() {
        let c = coins(&[("atom", 0), ("uosmo", 3)]);
        assert_eq!(c.len(), 1);
        assert_eq!(c.amount_of(&denom("atom")), Amount::ZERO);
    }

    #[test]
    fn try_new_overflow() {
        let list = vec![
            Coin::new(denom("atom"), Amount::MAX),
            Coin::new(denom("atom"), Amount::new(1)),
        ];
        assert!(Coins::try_new(list).is_err());
    }

    // -- Queries --------------------------------------------------------------

    #[test]
    fn amount_of_absent_denom_is_zero() {
        let c = coins(&[("atom", 10)]);
        assert_eq!(c.amount_of(&denom("uosmo")), Amount::ZERO);
    }

    #[test]
    fn empty_is_zero() {
        assert!(Coins::new().is_zero());
        assert!(!coins(&[("atom", 1)]).is_zero());
    }

    // -- checked_add / checked_sub --------------------------------------------

    #[test]
    fn add_new_denom() {
        let c = coins(&[("atom", 10)]);
        let Some(c) = c.checked_add(&Coin::new(denom("uosmo"), Amount::new(5))) else {
            panic!("add should succeed");
        };
        assert_eq!(c.len(), 2);
        assert_eq!(c.amount_of(&denom("uosmo")), Amount::new(5));
    }

    #[test]
    fn add_existing_denom() {
        let c = coins(&[("atom", 10)]);
        let Some(c) = c.checked_add(&Coin::new(denom("atom"), Amount::new(5))) else {
            panic!("add should succeed");
        };
        assert_eq!(c.amount_of(&denom("atom")), Amount::new(15));
    }

    #[test]
    fn add_zero_is_noop() {
        let c = coins(&[("atom", 10)]);
        assert_eq!(c.checked_add(&Coin::new(denom("uosmo"), Amount::ZERO)), Some(c));
    }

    #[test]
    fn sub_partial() {
        let c = coins(&[("atom", 10)]);
        let Some(c) = c.checked_sub(&Coin::new(denom("atom"), Amount::new(4))) else {
            panic!("sub should succeed");
        };
        assert_eq!(c.amount_of(&denom("atom")), Amount::new(6));
    }

    #[test]
    fn sub_to_zero_removes_entry() {
        let c = coins(&[("atom", 10), ("uosmo", 1)]);
        let Some(c) = c.checked_sub(&Coin::new(denom("atom"), Amount::new(10))) else {
            panic!("sub should succeed");
        };
        assert_eq!(c.len(), 1);
        assert!(c.amount_of(&denom("atom")).is_zero());
    }

    #[test]
    fn sub_underflow_fails() {
        let c = coins(&[("atom", 3)]);
        assert_eq!(c.checked_sub(&Coin::new(denom("atom"), Amount::new(4))), None);
    }

    #[test]
    fn sub_absent_denom_fails() {
        let c = coins(&[("atom", 3)]);
        assert_eq!(c.checked_sub(&Coin::new(denom("uosmo"), Amount::new(1))), None);
    }

    // -- Display & serde ------------------------------------------------------

    #[test]
    fn display_joins_with_commas() {
        let c = coins(&[("uosmo", 50), ("atom", 100)]);
        assert_eq!(format!("{c}"), "100atom,50uosmo");
    }

    #[test]
    fn serde_round_trip() {
        let c = coins(&[("atom", 100), ("uosmo", 50)]);
        let Ok(json) = serde_json::to_string(&c) else {
            panic!("serialize coins");
        };
        let Ok(back) = serde_json::from_str::<Coins>(&json) else {
            panic!("deserialize coins");
        };
        assert_eq!(back, c);
    }
}
