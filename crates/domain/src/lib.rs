//! # httpaction-domain
//!
//! Pure domain model for the httpaction request runner.
//!
//! ## Responsibilities
//! - Foundational types: event identifiers, error conventions
//! - Define the **request configuration** (URL, method, headers, timeout, …)
//! - Define **templated values** resolved against a trigger context
//! - Define **triggers** and the events they publish
//! - Classify raw client **response codes** into success or failure
//! - Hold the component **health status**
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;

pub mod endpoint;
pub mod header;
pub mod method;
pub mod request;
pub mod response;
pub mod status;
pub mod template;
pub mod tls;
pub mod trigger;
