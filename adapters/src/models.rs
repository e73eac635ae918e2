//! Generic data models for the `adapters` crate.
//!
//! These models define the session key names shared with the browser and the
//! payloads exchanged with the REST backend's authentication endpoint.

use serde::{Deserialize, Deserializer, Serialize};

/// Key holding the bearer token.
pub const TOKEN_KEY: &str = "token";

/// Keys that may hold the role, in priority order. The first present wins.
pub const ROLE_KEYS: [&str; 3] = ["role", "userRole", "user_role"];

/// Key holding the opaque user identifier.
pub const USER_ID_KEY: &str = "userId";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Successful answer of the backend's login endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub role: String,
    #[serde(alias = "user_id", alias = "id", deserialize_with = "opaque_id")]
    pub user_id: String,
}

/// Accepts identifiers sent either as strings or as numbers.
fn opaque_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(text) => text,
        Id::Number(number) => number.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn login_response_accepts_numeric_ids() {
        let parsed: LoginResponse =
            serde_json::from_value(json!({"token": "t", "role": "staff", "userId": 42}))
                .expect("numeric id");
        assert_eq!(parsed.user_id, "42");
    }

    #[test]
    fn login_response_accepts_snake_case_id() {
        let parsed: LoginResponse =
            serde_json::from_value(json!({"token": "t", "role": "admin", "user_id": "u-7"}))
                .expect("snake case id");
        assert_eq!(parsed.user_id, "u-7");
        assert_eq!(parsed.role, "admin");
    }

    #[test]
    fn role_keys_keep_priority_order() {
        assert_eq!(ROLE_KEYS, ["role", "userRole", "user_role"]);
    }
}
