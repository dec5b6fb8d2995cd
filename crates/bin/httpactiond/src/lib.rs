//! # httpactiond — httpaction daemon
//!
//! Composition root that wires the reqwest client into the HTTP request
//! component and runs the configured automations.
//!
//! ## Responsibilities
//! - Parse configuration (env vars, config file)
//! - Build the HTTP request component and register it for setup
//! - Turn `[[automations]]` into templated request actions
//! - Fire the startup trigger, run interval tickers, fire shutdown on SIGINT
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

pub mod config;
pub mod wiring;
