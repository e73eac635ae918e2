//! Module for core services shared by the handlers.
//!
//! This module holds the application context with its domain providers, the
//! REST gateway every backend call travels through, and the scoped
//! per-student data provider.

pub mod app_context;
pub mod rest_gateway;
pub mod student_data;

pub use app_context::{AppContext, Domain, DomainProvider, UnknownDomain};
pub use rest_gateway::{GatewayError, RestGateway};
pub use student_data::StudentDataProvider;
