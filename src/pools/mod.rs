//! Feature-gated pool implementations and the [`PoolRecord`] codec.
//!
//! Each pool type is behind its own Cargo feature flag.  [`PoolRecord`]
//! wraps the enabled variants behind one enum, giving the registry
//! static dispatch over the [`Pool`](crate::traits::Pool) capability set
//! and a variant-preserving serialized form.
//!
//! # Pool Types
//!
//! | Feature | Pool | Style |
//! |---------|------|-------|
//! | `weighted` | [`WeightedPool`] | Balancer |
//! | `stable` | [`StablePool`] | Curve StableSwap |
//! | `concentrated` | [`ConcentratedPool`] | Uniswap V3 |

#[cfg(feature = "concentrated")]
pub mod concentrated;
#[cfg(feature = "stable")]
pub mod stable;
#[cfg(feature = "weighted")]
pub mod weighted;

mod record;

#[cfg(test)]
mod proptest_properties;

#[cfg(feature = "concentrated")]
pub use concentrated::ConcentratedPool;
pub use record::PoolRecord;
#[cfg(feature = "stable")]
pub use stable::StablePool;
#[cfg(feature = "weighted")]
pub use weighted::{PoolAsset, SmoothWeightChange, WeightedPool, MAX_POOL_ASSETS, MIN_POOL_ASSETS};
