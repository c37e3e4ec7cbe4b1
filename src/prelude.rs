//! Convenience re-exports for common types and traits.
//!
//! The prelude provides a single import to bring all commonly used items
//! into scope:
//!
//! ```rust
//! use lagoon::prelude::*;
//! ```

pub use crate::cleanup::cleanup_pools;
pub use crate::context::{Context, Event, EventManager, GasMeter};
pub use crate::domain::{AccountAddress, Amount, Coin, Coins, Denom, PoolId, Timestamp};
pub use crate::error::{RegistryError, Result};
pub use crate::hooks::{ContractHost, HookDispatcher, CONTRACT_HOOK_GAS_LIMIT};
pub use crate::ledger::{Ledger, LedgerError, MemLedger};
pub use crate::pools::PoolRecord;
pub use crate::registry::PoolRegistry;
pub use crate::store::{KeyedStore, MemStore};
pub use crate::traits::Pool;
pub use crate::MODULE_NAME;
