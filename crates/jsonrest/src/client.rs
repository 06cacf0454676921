use async_trait::async_trait;
use jsonrest_core::ClientConfig;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, RequestBuilder, StatusCode};
use tracing::{debug, info, instrument, warn};

use crate::error::RestError;
use crate::normalize::{normalize_body, JsonObject};
use crate::request::JsonRequest;

pub(crate) const JSON_CONTENT_TYPE: &str = "application/json";

/// Executes one request and reduces its response to a JSON object.
#[async_trait]
pub trait JsonExecutor: Send + Sync {
    async fn execute(&self, request: JsonRequest) -> Result<JsonObject, RestError>;
}

#[derive(Debug, Clone)]
pub struct JsonRestClient {
    http: Client,
}

impl JsonRestClient {
    /// Client with default settings; reads nothing from the environment.
    pub fn new() -> Result<Self, RestError> {
        Self::from_config(&ClientConfig::default())
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, RestError> {
        let mut builder = Client::builder().user_agent(config.user_agent.as_str());

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

    pub async fn get(&self, url: &str) -> Result<JsonObject, RestError> {
        self.execute(JsonRequest::get(url)).await
    }

    pub async fn post(&self, url: &str, payload: &str) -> Result<JsonObject, RestError> {
        self.execute(JsonRequest::post(url, payload)).await
    }

    pub async fn put(&self, url: &str, payload: &str) -> Result<JsonObject, RestError> {
        self.execute(JsonRequest::put(url, payload)).await
    }

    pub async fn delete(&self, url: &str) -> Result<JsonObject, RestError> {
        self.execute(JsonRequest::delete(url)).await
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

#[async_trait]
impl JsonExecutor for JsonRestClient {
    #[instrument(skip(self, request), fields(method = %request.verb, url = %request.url))]
    async fn execute(&self, request: JsonRequest) -> Result<JsonObject, RestError> {
        let response = self.prepare_request(&request).send().await?;
        accept_status(response.status())?;

        let body = response.text().await?;
        debug!(bytes = body.len(), "response body read");
        normalize_body(&body)
    }
}

/// Only 200 and 202 count as success.
pub(crate) fn accept_status(status: StatusCode) -> Result<(), RestError> {
    info!(status = status.as_u16(), "response code");
    if status == StatusCode::OK || status == StatusCode::ACCEPTED {
        return Ok(());
    }

    warn!(status = status.as_u16(), "rejecting response status");
    Err(RestError::Server {
        status: status.as_u16(),
    })
}

pub async fn get(url: &str) -> Result<JsonObject, RestError> {
    JsonRestClient::new()?.get(url).await
}

pub async fn post(url: &str, payload: &str) -> Result<JsonObject, RestError> {
    JsonRestClient::new()?.post(url, payload).await
}

pub async fn put(url: &str, payload: &str) -> Result<JsonObject, RestError> {
    JsonRestClient::new()?.put(url, payload).await
}

pub async fn delete(url: &str) -> Result<JsonObject, RestError> {
    JsonRestClient::new()?.delete(url).await
}
