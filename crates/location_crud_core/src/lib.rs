//! Shared location CRUD primitives.
//!
//! This crate owns the record shapes, synthetic record generation, and the
//! request/response contracts of the CRUD exerciser. It intentionally excludes
//! HTTP client and Lambda runtime concerns.
//! See `crates/location_crud_core/README.md` for ownership boundaries.

pub mod contract;
pub mod generation;
pub mod routes;
