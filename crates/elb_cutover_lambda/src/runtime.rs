//! Runtime module boundary over the core crate's primitives.

pub use elb_cutover_core::{contract, plan};
