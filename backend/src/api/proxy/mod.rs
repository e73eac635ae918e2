//! Module for the REST pass-through API.
//!
//! Page components reach the REST backend through these endpoints so that
//! every call shares the gateway's token handling and its single reaction to
//! authentication failures.

pub mod handlers;
pub mod routes;
