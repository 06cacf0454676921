use std::fmt::{self, Display};
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpVerb {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpVerb {
    pub const ALL: [HttpVerb; 4] = [HttpVerb::Get, HttpVerb::Post, HttpVerb::Put, HttpVerb::Delete];

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpVerb::Get => "GET",
            HttpVerb::Post => "POST",
            HttpVerb::Put => "PUT",
            HttpVerb::Delete => "DELETE",
        }
    }

    /// Only POST and PUT write a request body.
    pub fn carries_body(&self) -> bool {
        matches!(self, HttpVerb::Post | HttpVerb::Put)
    }
}

impl Display for HttpVerb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported http verb: {0}")]
pub struct UnknownVerb(pub String);

impl FromStr for HttpVerb {
    type Err = UnknownVerb;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        HttpVerb::ALL
            .into_iter()
            .find(|verb| verb.as_str().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| UnknownVerb(value.to_string()))
    }
}

impl From<HttpVerb> for reqwest::Method {
    fn from(verb: HttpVerb) -> Self {
        match verb {
            HttpVerb::Get => reqwest::Method::GET,
            HttpVerb::Post => reqwest::Method::POST,
            HttpVerb::Put => reqwest::Method::PUT,
            HttpVerb::Delete => reqwest::Method::DELETE,
        }
    }
}

/// One call's worth of input: where, how, and what to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonRequest {
    pub url: String,
    pub verb: HttpVerb,
    pub payload: Option<String>,
}

impl JsonRequest {
    pub fn new(verb: HttpVerb, url: impl Into<String>, payload: Option<String>) -> Self {
        Self {
            url: url.into(),
            verb,
            payload,
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(HttpVerb::Get, url, None)
    }

    pub fn post(url: impl Into<String>, payload: impl Into<String>) -> Self {
        Self::new(HttpVerb::Post, url, Some(payload.into()))
    }

    pub fn put(url: impl Into<String>, payload: impl Into<String>) -> Self {
        Self::new(HttpVerb::Put, url, Some(payload.into()))
    }

    pub fn delete(url: impl Into<String>) -> Self {
        Self::new(HttpVerb::Delete, url, None)
    }

    /// Bytes written to the wire. `None` for verbs without a body, even when a payload was set;
    /// a POST/PUT without payload sends an empty body.
    pub fn body(&self) -> Option<Vec<u8>> {
        if !self.verb.carries_body() {
            return None;
        }
        Some(
            self.payload
                .as_deref()
                .unwrap_or_default()
                .as_bytes()
                .to_vec(),
        )
    }
}
