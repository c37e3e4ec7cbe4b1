//! Core trait abstractions for pool lifecycle management.
//!
//! This module defines [`Pool`], the capability set every pool variant
//! must satisfy for the registry, liquidation engine, and hook
//! dispatcher to operate on it polymorphically.

mod pool;

pub use pool::Pool;
