//! HTTP client with timeouts and status handling
//!
//! Thin wrapper over `reqwest::Client` shared by the registry and participant
//! clients. It owns the base URL, applies the configured timeouts and turns
//! transport failures and non-success statuses into [`ClientError`].

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Response};
use serde::{Serialize, de::DeserializeOwned};
use tracing::debug;

use crate::config::HttpClientConfig;
use crate::error::{ClientError, Result};

/// HTTP client bound to one base URL
#[derive(Clone, Debug)]
pub struct HttpClient {
    client: Client,
    config: HttpClientConfig,
}

impl HttpClient {
    /// Create a new HTTP client
    pub fn new(config: HttpClientConfig) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
            .timeout(Duration::from_millis(config.read_timeout_ms))
            .build()?;

        Ok(Self { client, config })
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Build full URL from a path
    pub fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    /// Start a request for `path`
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = self.build_url(path);
        debug!("{} {}", method, url);
        self.client.request(method, url)
    }

    /// Send a request and return the raw response, whatever its status
    pub async fn send(&self, builder: RequestBuilder) -> Result<Response> {
        Ok(builder.send().await?)
    }

    /// Send a request and require a 2xx status
    pub async fn send_checked(&self, builder: RequestBuilder) -> Result<Response> {
        let response = self.send(builder).await?;
        Self::check_status(response).await
    }

    /// Make a GET request and decode a JSON body
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.send_checked(self.request(Method::GET, path)).await?;
        Self::decode(response).await
    }

    /// Make a GET request with query parameters and decode a JSON body
    pub async fn get_json_with_query<T: DeserializeOwned, Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> Result<T> {
        let response = self
            .send_checked(self.request(Method::GET, path).query(query))
            .await?;
        Self::decode(response).await
    }

    /// Send a JSON body and decode a JSON response
    pub async fn send_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let response = self
            .send_checked(self.request(method, path).json(body))
            .await?;
        Self::decode(response).await
    }

    /// Send a JSON body and ignore the response body
    pub async fn send_json_no_content<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<()> {
        self.send_checked(self.request(method, path).json(body))
            .await?;
        Ok(())
    }

    /// Make a DELETE request without a body
    pub async fn delete(&self, path: &str) -> Result<()> {
        self.send_checked(self.request(Method::DELETE, path)).await?;
        Ok(())
    }

    async fn check_status(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(ClientError::RequestFailed {
            status: status.as_u16(),
            body,
        })
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| ClientError::Decode(e.to_string()))
    }
}
