//! # httpaction-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement:
//!   - `HttpClient` — begin / configure / send / end for one request
//!   - `TriggerPublisher` — publish trigger events
//! - Define the **component lifecycle** (`Component`, `ComponentRegistry`)
//! - Provide the **request executor** (`HttpRequestComponent`) and the
//!   **templated action adapter** (`HttpRequestSendAction`)
//! - Provide **in-process infrastructure** (trigger bus, trigger scheduler,
//!   automation engine) that doesn't need IO
//!
//! ## Dependency rule
//! Depends on `httpaction-domain` only (plus `tokio` for sync and timers).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod action;
pub mod automation_engine;
pub mod component;
pub mod http_request;
pub mod ports;
pub mod trigger_bus;
pub mod trigger_scheduler;

#[cfg(test)]
mod testing;
