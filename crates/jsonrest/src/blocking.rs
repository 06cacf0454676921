//! Synchronous surface. Each call runs to completion on the calling thread; the connection is
//! released when the response and, for the free functions, the client go out of scope.
//!
//! Do not call these from inside an async runtime; use [`crate::JsonRestClient`] there.

use std::time::Duration;

use jsonrest_core::ClientConfig;
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::CONTENT_TYPE;
use tracing::{debug, info, instrument};

use crate::client::{accept_status, JSON_CONTENT_TYPE};
use crate::error::RestError;
use crate::normalize::{normalize_body, JsonObject};
use crate::request::JsonRequest;

#[derive(Debug, Clone)]
pub struct BlockingJsonRestClient {
    http: Client,
}

impl BlockingJsonRestClient {
    pub fn new() -> Result<Self, RestError> {
        Self::from_config(&ClientConfig::default())
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, RestError> {
        // reqwest's blocking builder otherwise applies a 30 s total timeout.
        let mut builder = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(None::<Duration>);

        if let Some(ref http_proxy) = config.http_proxy {
            info!("configuring HTTP proxy {}", http_proxy);
            builder = builder.proxy(reqwest::Proxy::http(http_proxy)?);
        }

        if let Some(ref https_proxy) = config.https_proxy {
            info!("configuring HTTPS proxy {}", https_proxy);
            builder = builder.proxy(reqwest::Proxy::https(https_proxy)?);
        }

        Ok(Self {
            http: builder.build()?,
        })
    }

    pub fn get(&self, url: &str) -> Result<JsonObject, RestError> {
        self.execute(JsonRequest::get(url))
    }

    pub fn post(&self, url: &str, payload: &str) -> Result<JsonObject, RestError> {
        self.execute(JsonRequest::post(url, payload))
    }

    pub fn put(&self, url: &str, payload: &str) -> Result<JsonObject, RestError> {
        self.execute(JsonRequest::put(url, payload))
    }

    pub fn delete(&self, url: &str) -> Result<JsonObject, RestError> {
        self.execute(JsonRequest::delete(url))
    }

    #[instrument(skip(self, request), fields(method = %request.verb, url = %request.url))]
    pub fn execute(&self, request: JsonRequest) -> Result<JsonObject, RestError> {
        let response = self.prepare_request(&request).send()?;
        accept_status(response.status())?;

        let body = response.text()?;
        debug!(bytes = body.len(), "response body read");
        normalize_body(&body)
    }

    fn prepare_request(&self, request: &JsonRequest) -> RequestBuilder {
        let builder = self
            .http
            .request(request.verb.into(), request.url.as_str())
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE);

        match request.body() {
            Some(body) => builder.body(body),
            None => builder,
        }
    }
}

pub fn get(url: &str) -> Result<JsonObject, RestError> {
    BlockingJsonRestClient::new()?.get(url)
}

pub fn post(url: &str, payload: &str) -> Result<JsonObject, RestError> {
    BlockingJsonRestClient::new()?.post(url, payload)
}

pub fn put(url: &str, payload: &str) -> Result<JsonObject, RestError> {
    BlockingJsonRestClient::new()?.put(url, payload)
}

pub fn delete(url: &str) -> Result<JsonObject, RestError> {
    BlockingJsonRestClient::new()?.delete(url)
}
