//! Runtime adapters and handlers for the location CRUD exerciser.
//!
//! This crate owns runtime integration details (Lambda handler, blocking HTTP
//! transport, and configuration) and exposes a single runtime module boundary
//! for the record and envelope primitives.
//! See `crates/location_crud_lambda/README.md` for ownership boundaries.

pub mod adapters;
pub mod config;
pub mod handlers;
pub mod runtime;
