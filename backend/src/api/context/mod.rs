//! Module for the application context API.
//!
//! Exposes the domain providers mounted at startup: which ones exist and what
//! data each one currently supplies.

pub mod handlers;
pub mod routes;
