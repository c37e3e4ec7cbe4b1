//! Contract hook example: bind a contract to a pool action and watch
//! the dispatcher sandbox its gas.
//!
//! # Run
//!
//! ```bash
//! cargo run --example hooks
//! ```

use lagoon::context::{Context, Event, GasMeter};
use lagoon::domain::{AccountAddress, PoolId, Timestamp};
use lagoon::hooks::{ContractHost, HookDispatcher};
use lagoon::registry::PoolRegistry;
use lagoon::store::MemStore;

/// Toy host whose contracts burn a configurable amount of gas.
struct ToyHost {
    burn: u64,
}

impl ContractHost for ToyHost {
    fn sudo(
        &mut self,
        ctx: &mut Context,
        contract: &AccountAddress,
        msg: &[u8],
    ) -> Result<Vec<u8>, String> {
        ctx.gas_meter_mut().consume(self.burn, "toy contract");
        ctx.events_mut()
            .emit(Event::new("wasm").attr("contract", contract.as_str()));
        println!("  contract {} got {} bytes", contract.as_str(), msg.len());
        Ok(Vec::new())
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Contract hooks: sandboxed dispatch ===\n");

    let mut registry = PoolRegistry::new(MemStore::new());
    let dispatcher = HookDispatcher::with_gas_limit(1_000);
    dispatcher.set_binding(&mut registry, PoolId::new(1), "afterSwap", "contractalpha")?;
    println!("Bound contractalpha to pool 1 afterSwap, ceiling 1000 gas");

    // ── 1. A well-behaved contract: gas charged, events merged ──────────
    let mut ctx = Context::new(Timestamp::new(0), GasMeter::limited(1_000_000));
    let mut polite = ToyHost { burn: 400 };
    dispatcher.dispatch(
        &registry,
        &mut polite,
        &mut ctx,
        PoolId::new(1),
        "afterSwap",
        b"{\"after_swap\":{}}",
    )?;
    println!(
        "Polite contract: caller paid {} gas, {} event(s) merged\n",
        ctx.gas_meter().consumed(),
        ctx.events().events().len()
    );

    // ── 2. A runaway contract: contained, caller pays nothing ───────────
    let mut greedy = ToyHost { burn: 5_000 };
    let outcome = dispatcher.dispatch(
        &registry,
        &mut greedy,
        &mut ctx,
        PoolId::new(1),
        "afterSwap",
        b"{}",
    );
    println!("Greedy contract: {outcome:?}");
    println!(
        "Caller still at {} gas consumed",
        ctx.gas_meter().consumed()
    );

    println!("\n=== Done ===");
    Ok(())
}
