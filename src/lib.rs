//! shelfd - A small book catalog HTTP API
//!
//! Request lifecycle pipeline: per-request correlation identity, a closed
//! error taxonomy with stable codes, and a uniform response envelope.

pub mod api;
pub mod cli;
pub mod correlation;
pub mod errors;
pub mod model;
pub mod observability;
pub mod store;
