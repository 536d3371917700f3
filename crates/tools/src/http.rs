//! Shared outbound GET helper for tools.
//!
//! Every request carries the configured `User-Agent`, has a fixed 8s
//! timeout, and is attempted exactly once.

use std::time::{Duration, Instant};

use reqwest::header::{ACCEPT, USER_AGENT};
use serde_json::Value;

use dl_domain::error::{Error, Result};
use dl_domain::trace::TraceEvent;

/// Outbound timeout for tool calls. Not configurable at this layer.
pub const TOOL_HTTP_TIMEOUT: Duration = Duration::from_secs(8);

const ACCEPT_JSON: &str = "application/geo+json, application/json;q=0.9, */*;q=0.1";

#[derive(Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    user_agent: String,
}

impl HttpFetcher {
    pub fn new(user_agent: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(TOOL_HTTP_TIMEOUT)
            .build()
            .map_err(|e| Error::Http(format!("build tool http client: {e}")))?;
        Ok(Self {
            client,
            user_agent: user_agent.into(),
        })
    }

    /// GET `url` with query params and decode the body as JSON.
    ///
    /// Non-2xx responses become [`Error::Status`].
    pub async fn get_json(&self, url: &str, query: &[(&str, &str)]) -> Result<Value> {
        let started = Instant::now();
        let resp = self
            .client
            .get(url)
            .query(query)
            .header(USER_AGENT, &self.user_agent)
            .header(ACCEPT, ACCEPT_JSON)
            .send()
            .await
            .map_err(from_reqwest)?;

        let status = resp.status();
        TraceEvent::HttpCall {
            endpoint: url.to_owned(),
            status: status.as_u16(),
            duration_ms: started.elapsed().as_millis() as u64,
        }
        .emit();

        if !status.is_success() {
            return Err(Error::Status {
                endpoint: url.to_owned(),
                status: status.as_u16(),
            });
        }
        resp.json::<Value>().await.map_err(from_reqwest)
    }
}

/// Convert a [`reqwest::Error`] into the domain [`Error`] type.
///
/// Timeout errors map to [`Error::Timeout`]; everything else maps to
/// [`Error::Http`].
pub(crate) fn from_reqwest(e: reqwest::Error) -> Error {
    if e.is_timeout() {
        Error::Timeout(e.to_string())
    } else {
        Error::Http(e.to_string())
    }
}
