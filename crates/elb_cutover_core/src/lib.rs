//! Shared blue/green cutover domain primitives.
//!
//! This crate owns the custom-resource request/response contracts and the
//! deterministic attach/detach planning behavior. It intentionally excludes
//! AWS SDK and Lambda runtime concerns.

pub mod contract;
pub mod plan;
