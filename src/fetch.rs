//! HTTP transport for the forecast-app backend
//!
//! [`ApiClient`] is built once at start-up and cloned into every model. Each
//! request is a single attempt: no retry, no backoff, no deduplication of
//! concurrent calls to the same endpoint.

use std::sync::Arc;

use futures_util::future::try_join_all;
use log::debug;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use url::Url;

use forecast_rust_schema::{parse, Validated};

use crate::auth::AuthStorage;
use crate::config::ClientOptions;
use crate::error::{Error, Result};
use crate::storage::SessionStore;

pub use reqwest::Method;

/// Shared HTTP client bound to one backend and one session store
#[derive(Clone)]
pub struct ApiClient {
    http_client: Client,
    base_url: String,
    auth: AuthStorage,
}

impl ApiClient {
    /// Create a client from options and the store holding the auth token
    pub fn new(options: &ClientOptions, store: Arc<dyn SessionStore>) -> Result<Self> {
        let mut builder = Client::builder().user_agent(options.user_agent.clone());
        if let Some(timeout) = options.request_timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http_client: builder.build()?,
            base_url: options.normalized_base_url().to_string(),
            auth: AuthStorage::new(store, options.token_lifetime, options.production),
        })
    }

    /// Token and user persistence used by this client
    pub fn auth_storage(&self) -> &AuthStorage {
        &self.auth
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Start a request with an explicit method
    pub fn request(&self, method: Method, path: &str) -> FetchBuilder<'_> {
        FetchBuilder::new(self, path, method)
    }

    /// Create a GET request
    pub fn get(&self, path: &str) -> FetchBuilder<'_> {
        self.request(Method::GET, path)
    }

    /// Create a POST request
    pub fn post(&self, path: &str) -> FetchBuilder<'_> {
        self.request(Method::POST, path)
    }

    /// Create a PUT request
    pub fn put(&self, path: &str) -> FetchBuilder<'_> {
        self.request(Method::PUT, path)
    }

    /// Create a DELETE request
    pub fn delete(&self, path: &str) -> FetchBuilder<'_> {
        self.request(Method::DELETE, path)
    }

    /// Run several authenticated requests concurrently.
    ///
    /// Results come back in request order; the first failure aborts the batch.
    /// POST and PUT entries without a body send an empty JSON object.
    pub async fn batch(&self, requests: &[BatchRequest]) -> Result<Vec<Value>> {
        let calls = requests.iter().map(|request| async move {
            let mut builder = self.request(request.method.clone(), &request.path);
            if let Some(body) = &request.body {
                builder = builder.json(body)?;
            } else if request.method == Method::POST || request.method == Method::PUT {
                builder = builder.json(&serde_json::json!({}))?;
            }
            builder.send().await
        });
        try_join_all(calls).await
    }
}

/// One entry of [`ApiClient::batch`]
#[derive(Debug, Clone)]
pub struct BatchRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

impl BatchRequest {
    pub fn get(path: &str) -> Self {
        Self {
            method: Method::GET,
            path: path.to_string(),
            body: None,
        }
    }

    pub fn with_body(method: Method, path: &str, body: Value) -> Self {
        Self {
            method,
            path: path.to_string(),
            body: Some(body),
        }
    }
}

/// Helper for building and executing HTTP requests
pub struct FetchBuilder<'a> {
    client: &'a ApiClient,
    path: String,
    method: Method,
    query_params: Vec<(String, String)>,
    body: Option<Vec<u8>>,
    include_auth: bool,
}

impl<'a> FetchBuilder<'a> {
    fn new(client: &'a ApiClient, path: &str, method: Method) -> Self {
        Self {
            client,
            path: path.to_string(),
            method,
            query_params: Vec::new(),
            body: None,
            include_auth: true,
        }
    }

    /// Whether to attach the stored bearer token (on by default)
    pub fn auth(mut self, include: bool) -> Self {
        self.include_auth = include;
        self
    }

    /// Add a query parameter
    pub fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.query_params.push((key.to_string(), value.to_string()));
        self
    }

    /// Add a JSON body to the request
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self> {
        self.body = Some(serde_json::to_vec(body)?);
        Ok(self)
    }

    fn url(&self) -> Result<Url> {
        let mut url = Url::parse(&format!("{}{}", self.client.base_url, self.path))?;
        if !self.query_params.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in &self.query_params {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    fn headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if self.include_auth {
            if let Some(token) = self.client.auth.token()? {
                let value = HeaderValue::from_str(&format!("Bearer {}", token))
                    .map_err(|e| Error::application(format!("invalid auth token: {}", e)))?;
                headers.insert(AUTHORIZATION, value);
            }
        }
        Ok(headers)
    }

    /// Build the request
    fn build(&self) -> Result<RequestBuilder> {
        let url = self.url()?;
        debug!("{} {}", self.method, url);

        let mut req = self
            .client
            .http_client
            .request(self.method.clone(), url)
            .headers(self.headers()?);

        if let Some(body) = &self.body {
            req = req.body(body.clone());
        }

        Ok(req)
    }

    /// Execute the request and return the parsed body.
    ///
    /// A body that is not JSON comes back as a JSON string; an empty body as `null`.
    pub async fn send(&self) -> Result<Value> {
        let response = self.build()?.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let message = if text.trim().is_empty() {
                format!("HTTP error! status: {}", status.as_u16())
            } else {
                text.trim_end().to_string()
            };
            return Err(Error::Request {
                status: status.as_u16(),
                message,
            });
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(match serde_json::from_str(&text) {
            Ok(value) => value,
            Err(_) => Value::String(text),
        })
    }

    /// Execute the request and deserialize the body without schema checks
    pub async fn execute<T: DeserializeOwned>(&self) -> Result<T> {
        let value = self.send().await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Execute the request and validate the body against `T`'s schema
    pub async fn execute_validated<T: Validated>(&self) -> Result<T> {
        let value = self.send().await?;
        Ok(parse::<T>(value)?)
    }
}
