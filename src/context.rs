//! Execution-environment collaborators: block time, gas metering, and
//! event collection.
//!
//! [`Context`] bundles what the surrounding transaction hands every
//! operation.  The hook dispatcher builds an isolated child context
//! ([`Context::isolated`]) so an untrusted contract call runs under its
//! own gas ceiling and its own event collector; the child's consumed
//! gas is charged back to the parent only once the call succeeds.

use crate::domain::Timestamp;

/// Unwind payload raised by [`GasMeter::consume`] on ceiling breach.
///
/// The hook dispatcher catches this at the call boundary and converts
/// it into an ordinary
/// [`ContractHookOutOfGas`](crate::error::RegistryError::ContractHookOutOfGas)
/// error; it must never cross that boundary uncaught.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutOfGas {
    /// Ceiling that was exceeded.
    pub limit: u64,
    /// Label of the consumption that tripped the meter.
    pub label: &'static str,
}

/// A fuel counter with an optional ceiling.
///
/// Mirrors the environment's transaction gas meter: `consume` debits,
/// `remaining` reports headroom, and breaching a ceiling aborts the
/// metered scope by unwinding with an [`OutOfGas`] payload.
#[derive(Debug, Clone)]
#[must_use]
pub struct GasMeter {
    limit: Option<u64>,
    consumed: u64,
}

impl GasMeter {
    /// A meter that unwinds once consumption exceeds `limit`.
    pub const fn limited(limit: u64) -> Self {
        Self {
            limit: Some(limit),
            consumed: 0,
        }
    }

    /// A meter that only counts, with no ceiling.
    pub const fn unlimited() -> Self {
        Self {
            limit: None,
            consumed: 0,
        }
    }

    /// Debits `amount` units of gas.
    ///
    /// # Panics
    ///
    /// Unwinds with an [`OutOfGas`] payload if consumption exceeds the
    /// meter's ceiling.  Callers running untrusted work catch this at
    /// the call boundary.
    pub fn consume(&mut self, amount: u64, label: &'static str) {
        self.consumed = self.consumed.saturating_add(amount);
        if let Some(limit) = self.limit {
            if self.consumed > limit {
                std::panic::panic_any(OutOfGas { limit, label });
            }
        }
    }

    /// Gas debited so far.
    #[must_use]
    pub const fn consumed(&self) -> u64 {
        self.consumed
    }

    /// Headroom left under the ceiling; `None` for an unlimited meter.
    #[must_use]
    pub const fn remaining(&self) -> Option<u64> {
        match self.limit {
            Some(limit) => Some(limit.saturating_sub(self.consumed)),
            None => None,
        }
    }

    /// The configured ceiling, if any.
    #[must_use]
    pub const fn limit(&self) -> Option<u64> {
        self.limit
    }
}

/// One emitted event: a kind plus key/value attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct Event {
    /// Event kind, e.g. `"pool_deleted"`.
    pub kind: String,
    /// Ordered attribute pairs.
    pub attributes: Vec<(String, String)>,
}

impl Event {
    /// Creates an event with no attributes.
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            attributes: Vec::new(),
        }
    }

    /// Appends an attribute.
    pub fn attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((key.into(), value.into()));
        self
    }
}

/// Append-only event collector scoped to one execution context.
#[derive(Debug, Clone, Default)]
#[must_use]
pub struct EventManager {
    events: Vec<Event>,
}

impl EventManager {
    /// Creates an empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an event.
    pub fn emit(&mut self, event: Event) {
        self.events.push(event);
    }

    /// Events recorded so far, in emission order.
    #[must_use]
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Appends every event from `other`, consuming it.  Used to merge a
    /// child scope's events once its work is known to have succeeded.
    pub fn absorb(&mut self, other: EventManager) {
        self.events.extend(other.events);
    }
}

/// What the enclosing transaction hands to every operation: the block
/// time, a gas meter, and an event collector.
#[derive(Debug)]
#[must_use]
pub struct Context {
    block_time: Timestamp,
    gas_meter: GasMeter,
    events: EventManager,
}

impl Context {
    /// Creates a context for the current block.
    pub fn new(block_time: Timestamp, gas_meter: GasMeter) -> Self {
        Self {
            block_time,
            gas_meter,
            events: EventManager::new(),
        }
    }

    /// The current block time.
    #[must_use]
    pub const fn block_time(&self) -> Timestamp {
        self.block_time
    }

    /// Shared view of the gas meter.
    #[must_use]
    pub const fn gas_meter(&self) -> &GasMeter {
        &self.gas_meter
    }

    /// Mutable access to the gas meter.
    pub fn gas_meter_mut(&mut self) -> &mut GasMeter {
        &mut self.gas_meter
    }

    /// Shared view of the event collector.
    #[must_use]
    pub const fn events(&self) -> &EventManager {
        &self.events
    }

    /// Mutable access to the event collector.
    pub fn events_mut(&mut self) -> &mut EventManager {
        &mut self.events
    }

    /// Builds an isolated child scope at the same block time, with a
    /// fresh meter capped at `gas_limit` and a fresh event collector.
    /// Nothing recorded in the child is visible to this context unless
    /// explicitly merged back.
    pub fn isolated(&self, gas_limit: u64) -> Context {
        Context::new(self.block_time, GasMeter::limited(gas_limit))
    }
}
