//! Remote store client
//!
//! Blocking HTTP client for the hosted Huddle backend: a row-scoped REST
//! surface (`/rest/v1/{table}` with `column=eq.value` filters) plus a token
//! endpoint for password sign-in. Every call is scoped server-side by the
//! bearer token; the client additionally filters by owning user/team ids so
//! a stale token can never read across tenants.
//!
//! All calls block; callers run them on background threads and report back
//! over channels (see `app.rs`).

pub mod auth;
pub mod profiles;
pub mod tasks;
pub mod teams;

use std::time::Duration;

use serde::Deserialize;

use crate::error::{HuddleError, Result};
use crate::storage::config::ServerConfig;
use crate::storage::session::Session;

/// Request timeout for all remote calls
const TIMEOUT_SECS: u64 = 10;

/// Handle to the hosted backend, cheap to clone into worker threads.
#[derive(Clone)]
pub struct Client {
    base_url: String,
    anon_key: String,
    access_token: Option<String>,
    agent: ureq::Agent,
}

impl Client {
    /// Build a client from server config; `session` adds the bearer token.
    pub fn new(server: &ServerConfig, session: Option<&Session>) -> Result<Self> {
        let base_url = server.effective_url();
        // Reject junk URLs up front instead of failing on the first request
        let parsed = url::Url::parse(&base_url)
            .map_err(|e| HuddleError::config(format!("invalid server url '{}': {}", base_url, e)))?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(HuddleError::config(format!(
                "invalid server url '{}': expected http(s)",
                base_url
            )));
        }

        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(TIMEOUT_SECS))
            .build();

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key: server.anon_key.clone(),
            access_token: session.map(|s| s.access_token.clone()),
            agent,
        })
    }

    /// Absolute URL for a path under the base
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Start a request against a REST table with auth headers applied
    fn rest(&self, method: &str, table: &str) -> ureq::Request {
        self.request(method, &format!("/rest/v1/{}", table))
    }

    /// Start a request with `apikey` + bearer headers applied
    fn request(&self, method: &str, path: &str) -> ureq::Request {
        #[cfg(feature = "trace")]
        tracing::debug!(method, path, "remote request");

        let mut req = self
            .agent
            .request(method, &self.url(path))
            .set("apikey", &self.anon_key);
        if let Some(token) = &self.access_token {
            req = req.set("Authorization", &format!("Bearer {}", token));
        }
        req
    }

    /// Map a ureq error to `HuddleError`, extracting the API message body
    fn map_err(err: ureq::Error) -> HuddleError {
        match err {
            ureq::Error::Status(status, response) => {
                let message = response
                    .into_string()
                    .ok()
                    .map(|body| parse_api_message(&body))
                    .unwrap_or_else(|| "unknown error".to_string());
                HuddleError::api(status, message)
            }
            ureq::Error::Transport(t) => HuddleError::http(t.to_string()),
        }
    }

    /// Run a request expecting a JSON body back
    fn call_json<T: serde::de::DeserializeOwned>(req: ureq::Request) -> Result<T> {
        let response = req.call().map_err(Self::map_err)?;
        response
            .into_json::<T>()
            .map_err(|e| HuddleError::http(format!("bad response body: {}", e)))
    }

    /// Run a request with a JSON payload, expecting a JSON body back
    fn send_json<T: serde::de::DeserializeOwned>(
        req: ureq::Request,
        body: impl serde::Serialize,
    ) -> Result<T> {
        let response = req.send_json(body).map_err(Self::map_err)?;
        response
            .into_json::<T>()
            .map_err(|e| HuddleError::http(format!("bad response body: {}", e)))
    }

    /// Run a request with a JSON payload, discarding the response body
    fn send_json_no_body(req: ureq::Request, body: impl serde::Serialize) -> Result<()> {
        req.send_json(body).map_err(Self::map_err)?;
        Ok(())
    }

    /// Run a request discarding the response body
    fn call_no_body(req: ureq::Request) -> Result<()> {
        req.call().map_err(Self::map_err)?;
        Ok(())
    }
}

/// Error payload shapes the backend produces. REST errors carry `message`,
/// the auth endpoint `error_description` or `msg`.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: Option<String>,
    error_description: Option<String>,
    msg: Option<String>,
}

/// Pull a human-readable message out of an error body; fall back to the raw
/// body when it is not the JSON shape we expect.
fn parse_api_message(body: &str) -> String {
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(parsed) => parsed
            .message
            .or(parsed.error_description)
            .or(parsed.msg)
            .unwrap_or_else(|| body.trim().to_string()),
        Err(_) => body.trim().to_string(),
    }
}

/// `id=in.(a,b,c)` filter value for a set of ids
fn in_filter<I: std::fmt::Display>(ids: &[I]) -> String {
    let joined = ids
        .iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(",");
    format!("in.({})", joined)
}

/// `eq.{value}` filter value
fn eq_filter(value: impl std::fmt::Display) -> String {
    format!("eq.{}", value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_parse_api_message_variants() {
        assert_eq!(
            parse_api_message(r#"{"message":"duplicate key value"}"#),
            "duplicate key value"
        );
        assert_eq!(
            parse_api_message(r#"{"error_description":"Invalid login credentials"}"#),
            "Invalid login credentials"
        );
        assert_eq!(parse_api_message(r#"{"msg":"JWT expired"}"#), "JWT expired");
        assert_eq!(parse_api_message("plain text"), "plain text");
        assert_eq!(parse_api_message(r#"{"other":1}"#), r#"{"other":1}"#);
    }

    #[test]
    fn test_filters() {
        assert_eq!(eq_filter("todo"), "eq.todo");

        let ids = vec![Uuid::nil(), Uuid::nil()];
        assert_eq!(
            in_filter(&ids),
            "in.(00000000-0000-0000-0000-000000000000,00000000-0000-0000-0000-000000000000)"
        );
    }

    #[test]
    fn test_client_rejects_bad_url() {
        let server = ServerConfig {
            url: "not a url".to_string(),
            anon_key: String::new(),
        };
        assert!(Client::new(&server, None).is_err());

        let server = ServerConfig {
            url: "ftp://api.huddle.dev".to_string(),
            anon_key: String::new(),
        };
        assert!(Client::new(&server, None).is_err());
    }

    #[test]
    fn test_url_join_strips_trailing_slash() {
        let server = ServerConfig {
            url: "https://api.huddle.dev/".to_string(),
            anon_key: String::new(),
        };
        let client = Client::new(&server, None).unwrap();
        assert_eq!(
            client.url("/rest/v1/tasks"),
            "https://api.huddle.dev/rest/v1/tasks"
        );
    }
}
