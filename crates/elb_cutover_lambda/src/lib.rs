//! AWS-oriented adapters and handlers for blue/green load-balancer cutover.
//!
//! This crate owns runtime integration details (the Lambda handler, the
//! provisioning callback delivery, and the autoscaling-group membership
//! adapter) and exposes a single runtime module boundary for the contract
//! and planning primitives.

pub mod adapters;
pub mod handlers;
pub mod logging;
pub mod runtime;
