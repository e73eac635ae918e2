//! Module for the signed-in user's API endpoints.
//!
//! This module handles information about the current session's user that is
//! distinct from the core authentication process, such as the session summary
//! and the student profile served by the scoped student data provider.

pub mod handlers;
pub mod routes;
