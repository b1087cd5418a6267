//! Password sign-in against the auth token endpoint.
//!
//! The backend issues a JWT access token; the payload carries the expiry
//! used to warn before the session goes stale.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, TimeZone, Utc};
use serde::Deserialize;
use uuid::Uuid;

use super::Client;
use crate::error::{HuddleError, Result};
use crate::storage::session::Session;

/// Token endpoint response (password grant)
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    user: TokenUser,
}

#[derive(Debug, Deserialize)]
struct TokenUser {
    id: Uuid,
    email: String,
}

impl Client {
    /// Exchange email + password for a session.
    pub fn sign_in(&self, email: &str, password: &str) -> Result<Session> {
        let req = self
            .request("POST", "/auth/v1/token")
            .query("grant_type", "password");

        let token: TokenResponse = Self::send_json(
            req,
            serde_json::json!({ "email": email, "password": password }),
        )?;

        Ok(Session {
            expires_at: token_expiry(&token.access_token),
            access_token: token.access_token,
            user_id: token.user.id,
            email: token.user.email,
            selected_team_id: None,
        })
    }

    /// Revoke the current token. Best-effort: local logout proceeds even if
    /// the server is unreachable.
    pub fn sign_out(&self) -> Result<()> {
        if self.access_token.is_none() {
            return Err(HuddleError::auth("not signed in"));
        }
        Self::call_no_body(self.request("POST", "/auth/v1/logout"))
    }
}

/// Read the `exp` claim out of a JWT without verifying the signature. The
/// client only uses it as an expiry hint; the server stays authoritative.
pub fn token_expiry(token: &str) -> Option<DateTime<Utc>> {
    let payload = token.split('.').nth(1)?;
    let bytes = URL_SAFE_NO_PAD.decode(payload).ok()?;
    let claims: serde_json::Value = serde_json::from_slice(&bytes).ok()?;
    let exp = claims.get("exp")?.as_i64()?;
    Utc.timestamp_opt(exp, 0).single()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Unsigned token with the given payload, enough for claim parsing
    fn fake_jwt(payload: serde_json::Value) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"none"}"#);
        let body = URL_SAFE_NO_PAD.encode(payload.to_string().as_bytes());
        format!("{}.{}.sig", header, body)
    }

    #[test]
    fn test_token_expiry_parses_exp_claim() {
        let token = fake_jwt(serde_json::json!({ "exp": 1_900_000_000, "sub": "x" }));
        let expiry = token_expiry(&token).unwrap();
        assert_eq!(expiry.timestamp(), 1_900_000_000);
    }

    #[test]
    fn test_token_expiry_tolerates_garbage() {
        assert!(token_expiry("not-a-jwt").is_none());
        assert!(token_expiry("a.b.c").is_none());

        let token = fake_jwt(serde_json::json!({ "sub": "x" }));
        assert!(token_expiry(&token).is_none());
    }
}
