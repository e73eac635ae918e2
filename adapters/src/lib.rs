//! Core `adapters` crate for the portal's external collaborators.
//!
//! This crate defines the two seams the gateway depends on: the `SessionStore`
//! trait, standing in for the browser-persisted key/value session, and the
//! `RestBackend` trait, abstracting the institutional REST service. Concrete
//! implementations (in-memory and cookie-backed stores, a `reqwest` client)
//! live in the sibling modules.

pub mod cookie;
pub mod errors;
pub mod memory;
pub mod models;
pub mod rest;

pub use cookie::{CookieOptions, CookieStore};
pub use errors::AdapterError;
pub use memory::MemoryStore;
pub use models::*;
pub use rest::{RestBackend, RestClient, RestMethod, RestRequest};

/// Key/value session state owned by the browser.
///
/// Every read of token, role and user id goes through this trait. Reads never
/// mutate the store.
pub trait SessionStore: Send {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&mut self, key: &str, value: &str);

    fn remove(&mut self, key: &str);

    /// Removes every key, including ones the portal does not own.
    fn clear(&mut self);
}
