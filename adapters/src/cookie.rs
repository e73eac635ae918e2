//! Cookie-backed `SessionStore` implementation.
//!
//! The store is loaded from the `Cookie` request headers, mutated while the
//! request is handled, and flushed back to the browser as `Set-Cookie`
//! headers. Values are hex-encoded so any opaque token survives the cookie
//! grammar; a value that fails to decode reads as absent.

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use crate::SessionStore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookieOptions {
    pub secure: bool,
    pub max_age_secs: u64,
}

impl Default for CookieOptions {
    fn default() -> Self {
        Self {
            secure: false,
            max_age_secs: 30 * 24 * 60 * 60,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CookieStore {
    values: BTreeMap<String, String>,
    /// Every cookie name the browser sent, decodable or not.
    received: BTreeSet<String>,
    /// Pending writes; `None` expires the cookie.
    changes: BTreeMap<String, Option<String>>,
    options: CookieOptions,
}

impl CookieStore {
    pub fn from_header_values<'a>(
        headers: impl IntoIterator<Item = &'a str>,
        options: CookieOptions,
    ) -> Self {
        let mut store = Self {
            options,
            ..Self::default()
        };

        for pair in headers.into_iter().flat_map(|h| h.split(';')) {
            let Some((name, raw)) = pair.trim().split_once('=') else {
                continue;
            };
            let name = name.trim();
            if name.is_empty() {
                continue;
            }
            store.received.insert(name.to_string());

            match decode_value(raw.trim().trim_matches('"')) {
                Some(value) => {
                    store.values.insert(name.to_string(), value);
                }
                None => debug!(cookie = name, "ignoring undecodable session cookie"),
            }
        }

        store
    }

    /// Renders the pending mutations as `Set-Cookie` header values.
    pub fn set_cookie_headers(&self) -> Vec<String> {
        self.changes
            .iter()
            .map(|(name, value)| match value {
                Some(value) => format!(
                    "{name}={}; Path=/; Max-Age={}; HttpOnly; SameSite=Lax{}",
                    hex::encode(value),
                    self.options.max_age_secs,
                    self.secure_attr()
                ),
                None => format!(
                    "{name}=; Path=/; Max-Age=0; HttpOnly; SameSite=Lax{}",
                    self.secure_attr()
                ),
            })
            .collect()
    }

    fn secure_attr(&self) -> &'static str {
        if self.options.secure {
            "; Secure"
        } else {
            ""
        }
    }
}

fn decode_value(raw: &str) -> Option<String> {
    let bytes = hex::decode(raw).ok()?;
    String::from_utf8(bytes).ok()
}

impl SessionStore for CookieStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
        self.changes
            .insert(key.to_string(), Some(value.to_string()));
    }

    fn remove(&mut self, key: &str) {
        self.values.remove(key);
        if self.received.contains(key) {
            self.changes.insert(key.to_string(), None);
        } else {
            self.changes.remove(key);
        }
    }

    fn clear(&mut self) {
        let names: BTreeSet<String> = self
            .received
            .iter()
            .chain(self.values.keys())
            .cloned()
            .collect();
        for name in names {
            self.remove(&name);
        }
    }
}
