//! Contract hook bindings and the gas-sandboxed dispatcher.
//!
//! Pools can bind one contract per action prefix (for example
//! `"beforeSwap"`).  When the matching lifecycle point is reached the
//! dispatcher invokes the bound contract in an isolated child context:
//! its own gas ceiling, its own event collector.  A runaway or faulting
//! contract can therefore burn at most [`CONTRACT_HOOK_GAS_LIMIT`] gas
//! and leak no events; the pool operation that triggered it decides
//! whether the returned error is fatal.

use std::panic::{catch_unwind, AssertUnwindSafe};

use tracing::{debug, warn};

use crate::context::{Context, OutOfGas};
use crate::domain::{AccountAddress, PoolId};
use crate::error::{RegistryError, Result};
use crate::registry::PoolRegistry;
use crate::store::{pool_hook_key, KeyedStore};

/// Gas ceiling for a single contract hook invocation.
///
/// Deliberately a small fraction of a typical transaction budget: a
/// hook is a notification, not a venue for heavy computation.
pub const CONTRACT_HOOK_GAS_LIMIT: u64 = 1_000_000;

/// Host capable of executing a privileged call into a bound contract.
///
/// The dispatcher is agnostic to the contract runtime; anything that
/// can run a contract under a metered [`Context`] can back it.
pub trait ContractHost {
    /// Executes `msg` against `contract` with host privileges.
    ///
    /// All gas the call burns must go through `ctx`'s meter, and all
    /// events through `ctx`'s collector.
    ///
    /// # Errors
    ///
    /// Returns the contract's own failure message.  Gas exhaustion is
    /// not an error return: the meter unwinds, and the dispatcher
    /// catches that at the call boundary.
    fn sudo(
        &mut self,
        ctx: &mut Context,
        contract: &AccountAddress,
        msg: &[u8],
    ) -> Result<Vec<u8>, String>;
}

/// Dispatches lifecycle notifications to per-pool bound contracts.
#[derive(Debug, Clone, Copy)]
#[must_use]
pub struct HookDispatcher {
    gas_limit: u64,
}

impl Default for HookDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl HookDispatcher {
    /// Dispatcher with the standard per-call ceiling.
    pub const fn new() -> Self {
        Self {
            gas_limit: CONTRACT_HOOK_GAS_LIMIT,
        }
    }

    /// Dispatcher with a custom per-call ceiling.
    pub const fn with_gas_limit(gas_limit: u64) -> Self {
        Self { gas_limit }
    }

    /// Binds `contract` to `(pool_id, action_prefix)`, overwriting any
    /// prior binding.  An empty `contract` string removes the binding
    /// instead.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::MalformedAddress`] if `contract` is
    /// neither empty nor a well-formed address.
    pub fn set_binding<S: KeyedStore>(
        &self,
        registry: &mut PoolRegistry<S>,
        pool_id: PoolId,
        action_prefix: &str,
        contract: &str,
    ) -> Result<()> {
        let key = pool_hook_key(pool_id, action_prefix);
        if contract.is_empty() {
            registry.store_mut().delete(&key);
            debug!(
                pool_id = pool_id.get(),
                action = action_prefix,
                "removed hook binding"
            );
            return Ok(());
        }
        let address = AccountAddress::parse(contract)?;
        registry.store_mut().set(&key, address.as_str().as_bytes());
        debug!(
            pool_id = pool_id.get(),
            action = action_prefix,
            contract = address.as_str(),
            "set hook binding"
        );
        Ok(())
    }

    /// The contract bound to `(pool_id, action_prefix)`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::MalformedAddress`] if the stored bytes
    /// do not decode to a valid address.  Bindings are validated on
    /// write, so this indicates store corruption.
    pub fn binding<S: KeyedStore>(
        &self,
        registry: &PoolRegistry<S>,
        pool_id: PoolId,
        action_prefix: &str,
    ) -> Result<Option<AccountAddress>> {
        let key = pool_hook_key(pool_id, action_prefix);
        let Some(raw) = registry.store().get(&key) else {
            return Ok(None);
        };
        let text = String::from_utf8(raw).map_err(|e| RegistryError::MalformedAddress {
            address: String::from_utf8_lossy(e.as_bytes()).into_owned(),
        })?;
        AccountAddress::parse(&text).map(Some)
    }

    /// Notifies the contract bound to `(pool_id, action_prefix)`, if
    /// one exists.  No binding means no work and `Ok(())`.
    ///
    /// The contract runs in a child context with a fresh gas ceiling
    /// and a fresh event collector.  Only when the call succeeds are
    /// the child's consumed gas charged to the caller's meter and the
    /// child's events merged into the caller's collector; a failed call
    /// costs the caller nothing and leaks nothing.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::ContractHookOutOfGas`] if the call unwinds.
    ///   The child meter is the only sanctioned panic source inside the
    ///   sandbox, so every unwind is attributed to gas exhaustion.
    /// - [`RegistryError::Contract`] carrying the contract's own error
    ///   message.
    pub fn dispatch<S: KeyedStore, H: ContractHost>(
        &self,
        registry: &PoolRegistry<S>,
        host: &mut H,
        ctx: &mut Context,
        pool_id: PoolId,
        action_prefix: &str,
        msg: &[u8],
    ) -> Result<()> {
        let Some(contract) = self.binding(registry, pool_id, action_prefix)? else {
            return Ok(());
        };

        let mut child = ctx.isolated(self.gas_limit);
        let outcome = catch_unwind(AssertUnwindSafe(|| host.sudo(&mut child, &contract, msg)));

        match outcome {
            Err(payload) => {
                let label = payload
                    .downcast_ref::<OutOfGas>()
                    .map_or("<non-meter unwind>", |o| o.label);
                warn!(
                    pool_id = pool_id.get(),
                    action = action_prefix,
                    contract = contract.as_str(),
                    label,
                    "contract hook exceeded its gas ceiling"
                );
                Err(RegistryError::ContractHookOutOfGas {
                    gas_limit: self.gas_limit,
                })
            }
            Ok(Err(message)) => {
                debug!(
                    pool_id = pool_id.get(),
                    action = action_prefix,
                    contract = contract.as_str(),
                    "contract hook returned an error"
                );
                Err(RegistryError::Contract(message))
            }
            Ok(Ok(_response)) => {
                ctx.gas_meter_mut()
                    .consume(child.gas_meter().consumed(), "contract hook");
                let child_events = std::mem::take(child.events_mut());
                ctx.events_mut().absorb(child_events);
                Ok(())
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::context::{Event, GasMeter};
    use crate::domain::Timestamp;
    use crate::store::MemStore;

    fn registry() -> PoolRegistry<MemStore> {
        PoolRegistry::new(MemStore::new())
    }

    fn ctx() -> Context {
        Context::new(Timestamp::new(100), GasMeter::unlimited())
    }

    /// Scripted host: burns gas, emits an event, then follows its
    /// programmed outcome.
    struct ScriptedHost {
        burn: u64,
        fail_with: Option<String>,
        calls: Vec<(String, Vec<u8>)>,
    }

    impl ScriptedHost {
        fn burning(burn: u64) -> Self {
            Self {
                burn,
                fail_with: None,
                calls: Vec::new(),
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                burn: 10,
                fail_with: Some(message.to_string()),
                calls: Vec::new(),
            }
        }
    }

    impl ContractHost for ScriptedHost {
        fn sudo(
            &mut self,
            ctx: &mut Context,
            contract: &AccountAddress,
            msg: &[u8],
        ) -> Result<Vec<u8>, String> {
            self.calls.push((contract.as_str().to_string(), msg.to_vec()));
            ctx.gas_meter_mut().consume(self.burn, "scripted work");
            ctx.events_mut()
                .emit(Event::new("hook_ran").attr("contract", contract.as_str()));
            match &self.fail_with {
                Some(message) => Err(message.clone()),
                None => Ok(b"ok".to_vec()),
            }
        }
    }

    // -- bindings -------------------------------------------------------------

    #[test]
    fn set_and_read_binding() {
        let mut registry = registry();
        let dispatcher = HookDispatcher::new();
        let Ok(()) = dispatcher.set_binding(&mut registry, PoolId::new(1), "beforeSwap", "contractalpha")
        else {
            panic!("set binding");
        };
        let Ok(Some(bound)) = dispatcher.binding(&registry, PoolId::new(1), "beforeSwap") else {
            panic!("binding should exist");
        };
        assert_eq!(bound.as_str(), "contractalpha");
    }

    #[test]
    fn empty_contract_removes_binding() {
        let mut registry = registry();
        let dispatcher = HookDispatcher::new();
        let Ok(()) = dispatcher.set_binding(&mut registry, PoolId::new(1), "beforeSwap", "contractalpha")
        else {
            panic!("set binding");
        };
        let Ok(()) = dispatcher.set_binding(&mut registry, PoolId::new(1), "beforeSwap", "") else {
            panic!("clear binding");
        };
        let Ok(None) = dispatcher.binding(&registry, PoolId::new(1), "beforeSwap") else {
            panic!("binding should be gone");
        };
    }

    #[test]
    fn clearing_an_absent_binding_is_a_noop() {
        let mut registry = registry();
        let dispatcher = HookDispatcher::new();
        let Ok(()) = dispatcher.set_binding(&mut registry, PoolId::new(9), "afterSwap", "") else {
            panic!("clear should succeed");
        };
    }

    #[test]
    fn malformed_contract_address_rejected() {
        let mut registry = registry();
        let dispatcher = HookDispatcher::new();
        assert!(matches!(
            dispatcher.set_binding(&mut registry, PoolId::new(1), "beforeSwap", "NOT VALID"),
            Err(RegistryError::MalformedAddress { .. })
        ));
    }

    #[test]
    fn bindings_are_scoped_per_pool_and_action() {
        let mut registry = registry();
        let dispatcher = HookDispatcher::new();
        let Ok(()) = dispatcher.set_binding(&mut registry, PoolId::new(1), "beforeSwap", "contractalpha")
        else {
            panic!("set binding");
        };
        let Ok(None) = dispatcher.binding(&registry, PoolId::new(1), "afterSwap") else {
            panic!("other action must be unbound");
        };
        let Ok(None) = dispatcher.binding(&registry, PoolId::new(2), "beforeSwap") else {
            panic!("other pool must be unbound");
        };
    }

    // -- dispatch -------------------------------------------------------------

    #[test]
    fn dispatch_without_binding_is_a_noop() {
        let registry = registry();
        let dispatcher = HookDispatcher::new();
        let mut host = ScriptedHost::burning(10);
        let mut ctx = ctx();
        let Ok(()) = dispatcher.dispatch(
            &registry,
            &mut host,
            &mut ctx,
            PoolId::new(1),
            "beforeSwap",
            b"{}",
        ) else {
            panic!("no binding means no work");
        };
        assert!(host.calls.is_empty());
        assert_eq!(ctx.gas_meter().consumed(), 0);
    }

    #[test]
    fn successful_call_charges_gas_and_merges_events() {
        let mut registry = registry();
        let dispatcher = HookDispatcher::new();
        let Ok(()) = dispatcher.set_binding(&mut registry, PoolId::new(1), "afterSwap", "contractalpha")
        else {
            panic!("set binding");
        };
        let mut host = ScriptedHost::burning(250);
        let mut ctx = ctx();
        let Ok(()) = dispatcher.dispatch(
            &registry,
            &mut host,
            &mut ctx,
            PoolId::new(1),
            "afterSwap",
            b"{\"kind\":\"afterSwap\"}",
        ) else {
            panic!("dispatch should succeed");
        };
        assert_eq!(host.calls.len(), 1);
        assert_eq!(host.calls[0].0, "contractalpha");
        assert_eq!(ctx.gas_meter().consumed(), 250);
        assert_eq!(ctx.events().events().len(), 1);
        assert_eq!(ctx.events().events()[0].kind, "hook_ran");
    }

    #[test]
    fn gas_exhaustion_is_contained_and_costs_the_caller_nothing() {
        let mut registry = registry();
        let dispatcher = HookDispatcher::with_gas_limit(100);
        let Ok(()) = dispatcher.set_binding(&mut registry, PoolId::new(1), "afterSwap", "contractalpha")
        else {
            panic!("set binding");
        };
        let mut host = ScriptedHost::burning(101);
        let mut ctx = ctx();
        let result = dispatcher.dispatch(
            &registry,
            &mut host,
            &mut ctx,
            PoolId::new(1),
            "afterSwap",
            b"{}",
        );
        assert!(matches!(
            result,
            Err(RegistryError::ContractHookOutOfGas { gas_limit: 100 })
        ));
        assert_eq!(ctx.gas_meter().consumed(), 0);
        assert!(ctx.events().events().is_empty());
    }

    #[test]
    fn contract_error_propagates_without_charging_or_leaking_events() {
        let mut registry = registry();
        let dispatcher = HookDispatcher::new();
        let Ok(()) = dispatcher.set_binding(&mut registry, PoolId::new(1), "afterSwap", "contractalpha")
        else {
            panic!("set binding");
        };
        let mut host = ScriptedHost::failing("swap rejected");
        let mut ctx = ctx();
        let result = dispatcher.dispatch(
            &registry,
            &mut host,
            &mut ctx,
            PoolId::new(1),
            "afterSwap",
            b"{}",
        );
        let Err(RegistryError::Contract(message)) = result else {
            panic!("expected the contract's error");
        };
        assert_eq!(message, "swap rejected");
        assert_eq!(ctx.gas_meter().consumed(), 0);
        assert!(ctx.events().events().is_empty());
    }

    #[test]
    fn exact_ceiling_consumption_succeeds() {
        let mut registry = registry();
        let dispatcher = HookDispatcher::with_gas_limit(100);
        let Ok(()) = dispatcher.set_binding(&mut registry, PoolId::new(1), "afterSwap", "contractalpha")
        else {
            panic!("set binding");
        };
        let mut host = ScriptedHost::burning(100);
        let mut ctx = ctx();
        let Ok(()) = dispatcher.dispatch(
            &registry,
            &mut host,
            &mut ctx,
            PoolId::new(1),
            "afterSwap",
            b"{}",
        ) else {
            panic!("consuming exactly the ceiling is allowed");
        };
        assert_eq!(ctx.gas_meter().consumed(), 100);
    }
}
