//! Portal API client.

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;

use super::endpoint::Endpoint;
use super::envelope::ApiEnvelope;
use crate::adapters::ReqwestHttpClient;
use crate::config::PortalConfig;
use crate::error::{
    classify_http_error, ApiError, ErrorContext, NetworkError, PortalResult, ResultExt,
};
use crate::models::{AboutTopic, Dashboard, DashboardRole, Event, Institution, NewsItem, Program};
use crate::traits::{Headers, HttpClient};

/// Reads portal resources over an injected [`HttpClient`].
///
/// Every request is bounded by the configured timeout, independent of
/// whatever the transport does.
pub struct PortalApiClient<C: HttpClient = ReqwestHttpClient> {
    /// Base URL for all endpoints
    pub base_url: String,
    timeout: Duration,
    http: Arc<C>,
}

impl PortalApiClient<ReqwestHttpClient> {
    /// Production client for `config`.
    pub fn from_config(config: &PortalConfig) -> Self {
        Self::with_http(
            config,
            ReqwestHttpClient::with_timeout(config.request_timeout),
        )
    }
}

impl<C: HttpClient> PortalApiClient<C> {
    pub fn with_http(config: &PortalConfig, http: C) -> Self {
        Self {
            base_url: config.base_url.clone(),
            timeout: config.request_timeout,
            http: Arc::new(http),
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn url_for(&self, endpoint: &Endpoint) -> String {
        format!("{}{}", self.base_url, endpoint.path())
    }

    /// GET `endpoint` and unwrap its envelope.
    pub async fn fetch<T: DeserializeOwned>(&self, endpoint: Endpoint) -> PortalResult<T> {
        self.fetch_inner(&endpoint)
            .await
            .with_context(|| ErrorContext::new(format!("fetch_{}", endpoint.name())))
    }

    async fn fetch_inner<T: DeserializeOwned>(&self, endpoint: &Endpoint) -> PortalResult<T> {
        let url = self.url_for(endpoint);
        let timeout_secs = self.timeout.as_secs().max(1);

        let mut headers = Headers::new();
        headers.insert("accept".to_string(), "application/json".to_string());

        tracing::debug!("GET {}", url);

        let response = match tokio::time::timeout(self.timeout, self.http.get(&url, &headers)).await
        {
            Ok(result) => result.map_err(|e| classify_http_error(e, &url, timeout_secs))?,
            Err(_) => {
                return Err(NetworkError::Timeout {
                    operation: format!("GET {}", endpoint.path()),
                    duration_secs: timeout_secs,
                }
                .into())
            }
        };

        if !response.is_success() {
            let message = response
                .json::<ApiEnvelope<serde_json::Value>>()
                .ok()
                .and_then(|envelope| envelope.message)
                .or_else(|| response.text().ok())
                .unwrap_or_default();
            return Err(NetworkError::HttpStatus {
                status: response.status,
                message,
            }
            .into());
        }

        let envelope: ApiEnvelope<T> = response.json().map_err(|e| ApiError::InvalidBody {
            endpoint: endpoint.name().to_string(),
            message: e.to_string(),
        })?;

        Ok(envelope.into_result(endpoint.name())?)
    }

    pub async fn fetch_about_topics(&self) -> PortalResult<Vec<AboutTopic>> {
        self.fetch(Endpoint::AboutTopics).await
    }

    pub async fn fetch_programs(&self) -> PortalResult<Vec<Program>> {
        self.fetch(Endpoint::Programs).await
    }

    pub async fn fetch_events(&self) -> PortalResult<Vec<Event>> {
        self.fetch(Endpoint::Events).await
    }

    pub async fn fetch_news(&self) -> PortalResult<Vec<NewsItem>> {
        self.fetch(Endpoint::News).await
    }

    pub async fn fetch_institutions(&self) -> PortalResult<Vec<Institution>> {
        self.fetch(Endpoint::Institutions).await
    }

    pub async fn fetch_dashboard(&self, role: DashboardRole) -> PortalResult<Dashboard> {
        self.fetch(Endpoint::Dashboard(role)).await
    }
}

impl<C: HttpClient> Clone for PortalApiClient<C> {
    fn clone(&self) -> Self {
        Self {
            base_url: self.base_url.clone(),
            timeout: self.timeout,
            http: Arc::clone(&self.http),
        }
    }
}
