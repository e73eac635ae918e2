//! Authentication module for sessions, roles and access control.
//!
//! This module provides the public interface for the portal's session layer:
//! role normalization, the session service over an injected store, the route
//! guard, and the login/logout endpoints.

pub mod routes;
pub mod handlers;
pub mod models;
pub mod middleware;
pub mod service;
pub mod errors;

// Re-exports for convenience
pub use errors::AuthError;
pub use middleware::{evaluate_guard, route_guard, CallerSystem, GuardDecision, PortalSession};
pub use models::{LoginForm, LoginOutcome, Role, SessionSummary, UserRole};
pub use routes::auth_router;
pub use service::SessionService;
