//! HTTP client for communicating with the marketplace API

use crate::credentials::CredentialStore;
use crate::envelope::{CollectionShape, decode_collection};
use crate::error::{ClientError, ClientResult};
use bizdash_core::config::ApiConfig;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// API client for making HTTP requests to the marketplace API
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    credentials: CredentialStore,
}

impl ApiClient {
    /// Create a client with the default timeouts
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is not http(s) or the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>, credentials: CredentialStore) -> ClientResult<Self> {
        let api = ApiConfig {
            base_url: base_url.into(),
            ..ApiConfig::default()
        };
        Self::from_config(&api, credentials)
    }

    /// Create a client from the `[api]` configuration section
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is not http(s) or the HTTP client cannot be built.
    pub fn from_config(api: &ApiConfig, credentials: CredentialStore) -> ClientResult<Self> {
        let base_url = api.base_url.trim().trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ClientError::InvalidUrl(api.base_url.clone()));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(api.request_timeout_secs))
            .connect_timeout(Duration::from_secs(api.connect_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url,
            credentials,
        })
    }

    /// Origin every endpoint and media path resolves against
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Credential handle consulted on every request
    pub const fn credentials(&self) -> &CredentialStore {
        &self.credentials
    }

    /// Absolute URL for a media reference returned inside a record
    pub fn media_url(&self, path: &str) -> String {
        bizdash_core::utils::resolve_media(&self.base_url, path)
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Attach the bearer token as it is right now
    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.credentials.token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn execute(&self, method: Method, url: &str, request: RequestBuilder) -> ClientResult<Response> {
        debug!(%method, url, "sending request");
        let response = self.authorize(request).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status {
                method,
                url: url.to_string(),
                status,
            });
        }
        debug!(%method, url, %status, "request succeeded");
        Ok(response)
    }

    /// Read a whole collection, accepting bare or wrapped arrays
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-2xx status or an undecodable body.
    pub async fn get_collection<T: DeserializeOwned>(
        &self,
        path: &str,
        shape: CollectionShape,
    ) -> ClientResult<Vec<T>> {
        let url = self.url(path);
        let response = self
            .execute(Method::GET, &url, self.client.get(&url))
            .await?;

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ClientError::decode(&url, e.to_string()))?;

        decode_collection(body, shape).map_err(|message| ClientError::decode(&url, message))
    }

    /// Send a JSON body with `method`; any 2xx counts as success
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-2xx status.
    pub async fn send_json<B: Serialize + Sync>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> ClientResult<()> {
        let url = self.url(path);
        let request = self.client.request(method.clone(), &url).json(body);
        self.execute(method, &url, request).await?;
        Ok(())
    }

    /// `PATCH` a JSON body
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-2xx status.
    pub async fn patch_json<B: Serialize + Sync>(&self, path: &str, body: &B) -> ClientResult<()> {
        self.send_json(Method::PATCH, path, body).await
    }

    /// `PUT` a JSON body
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-2xx status.
    pub async fn put_json<B: Serialize + Sync>(&self, path: &str, body: &B) -> ClientResult<()> {
        self.send_json(Method::PUT, path, body).await
    }

    /// `DELETE` a resource
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-2xx status.
    pub async fn delete(&self, path: &str) -> ClientResult<()> {
        let url = self.url(path);
        self.execute(Method::DELETE, &url, self.client.delete(&url))
            .await?;
        Ok(())
    }
}
