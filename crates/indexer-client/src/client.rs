use std::time::Duration;

use async_trait::async_trait;
use log::Level::{Debug, Trace};
use log::{debug, log_enabled, trace};
use reqwest::header::{HeaderValue, AUTHORIZATION};
use serde::{Deserialize, Serialize};

use crate::types::{flatten_topics, HeightResponse, Query, QueryResponse};
use crate::IndexerApi;

/// Default timeout of a single HTTP request to the indexer.
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// Connection settings of the indexer [`Client`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the endpoint, e.g. `https://eth.hypersync.xyz`.
    pub url: String,
    /// Bearer token sent in the `Authorization` header.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bearer_token: Option<String>,
    /// Request timeout, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECONDS
}

impl ClientConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            bearer_token: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Client implements the HyperSync JSON API over HTTP.
#[derive(Clone, Debug)]
pub struct Client {
    http: reqwest::Client,
    /// Base URL without a trailing slash.
    url: String,
    /// The value of the `Authorization` HTTP header.
    auth: Option<HeaderValue>,
}

impl Client {
    /// Creates a client to a HyperSync endpoint.
    pub fn new(config: ClientConfig) -> Result<Self> {
        reqwest::Url::parse(&config.url).map_err(|_| Error::InvalidUrl(config.url.clone()))?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        let auth = config
            .bearer_token
            .map(|token| HeaderValue::from_str(&format!("Bearer {}", token)))
            .transpose()
            .map_err(|_| Error::InvalidBearerToken)?;

        Ok(Self {
            http,
            url: config.url.trim_end_matches('/').to_string(),
            auth,
        })
    }

    /// Base URL of the endpoint.
    pub fn url(&self) -> &str {
        &self.url
    }

    async fn send<R>(&self, request: reqwest::RequestBuilder, route: &str) -> Result<R>
    where
        R: serde::de::DeserializeOwned,
    {
        let request = match &self.auth {
            Some(auth) => request.header(AUTHORIZATION, auth.clone()),
            None => request,
        };

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            debug!(target: "indexer_client", "{} failed with status {}: {}", route, status, body);
            return Err(Error::Status {
                status: status.as_u16(),
                body,
            });
        }

        if log_enabled!(Trace) {
            trace!(target: "indexer_client", "{} response: {}", route, body);
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl IndexerApi for Client {
    async fn get_height(&self) -> Result<u64> {
        let route = format!("{}/height", self.url);
        let response: HeightResponse = self.send(self.http.get(&route), &route).await?;

        debug!(target: "indexer_client", "Height of {} is {}", self.url, response.height);

        Ok(response.height)
    }

    async fn get(&self, query: &Query) -> Result<QueryResponse> {
        let route = format!("{}/query", self.url);
        if log_enabled!(Debug) {
            debug!(
                target: "indexer_client",
                "Query request: {}",
                serde_json::to_string(query)?
            );
        }

        let mut response: QueryResponse =
            self.send(self.http.post(&route).json(query), &route).await?;

        for data in response.data.iter_mut() {
            data.logs.iter_mut().for_each(flatten_topics);
        }

        Ok(response)
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// The error type for errors produced in this library.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::error::Error),

    #[error("indexer responded with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("invalid indexer URL: {0}")]
    InvalidUrl(String),

    #[error("bearer token is not a valid header value")]
    InvalidBearerToken,

    /// The indexer returned a `next_block` that doesn't advance the query.
    #[error("query cursor stalled at block {next_block}, query started at {from_block}")]
    StalledCursor { from_block: u64, next_block: u64 },
}
