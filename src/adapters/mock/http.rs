//! Mock HTTP client for testing.
//!
//! Returns predefined responses per URL and records every request so tests
//! can assert how many fetches a screen issued.

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::traits::{Headers, HttpClient, HttpError, Response};

/// A recorded HTTP request for verification in tests.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub url: String,
    pub headers: Headers,
}

/// Configuration for a mock response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Return a response (any status).
    Success(Response),
    /// Return a transport error.
    Error(HttpError),
    /// Wait, then resolve with the inner response.
    Delayed(Duration, Box<MockResponse>),
    /// Never resolve. Models a request still in flight when its screen goes away.
    Pending,
}

impl MockResponse {
    /// `200` with a JSON body.
    pub fn json(value: serde_json::Value) -> Self {
        MockResponse::Success(Response::json_body(200, &value))
    }

    /// Delay this response by `delay`.
    pub fn delayed(self, delay: Duration) -> Self {
        MockResponse::Delayed(delay, Box::new(self))
    }
}

/// Mock HTTP client for testing.
///
/// Queued responses (see [`MockHttpClient::push_response`]) are consumed
/// first, in order; after that the fixed response for the URL applies,
/// then the default.
///
/// ```ignore
/// let client = MockHttpClient::new();
/// client.set_response(
///     "https://portal.example.edu/api/news",
///     MockResponse::json(serde_json::json!({ "success": true, "data": [] })),
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockHttpClient {
    responses: Arc<Mutex<HashMap<String, MockResponse>>>,
    queued: Arc<Mutex<HashMap<String, VecDeque<MockResponse>>>>,
    default_response: Arc<Mutex<Option<MockResponse>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the fixed response for a URL (exact or prefix match).
    pub fn set_response(&self, url: &str, response: MockResponse) {
        let mut responses = self.responses.lock().unwrap();
        responses.insert(url.to_string(), response);
    }

    /// Queue a one-shot response for a URL, ahead of the fixed one.
    pub fn push_response(&self, url: &str, response: MockResponse) {
        let mut queued = self.queued.lock().unwrap();
        queued.entry(url.to_string()).or_default().push_back(response);
    }

    pub fn set_default_response(&self, response: MockResponse) {
        let mut default = self.default_response.lock().unwrap();
        *default = Some(response);
    }

    pub fn get_requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Number of requests made to exactly this URL.
    pub fn request_count(&self, url: &str) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.url == url)
            .count()
    }

    pub fn clear_requests(&self) {
        self.requests.lock().unwrap().clear();
    }

    pub fn clear_responses(&self) {
        self.responses.lock().unwrap().clear();
        self.queued.lock().unwrap().clear();
    }

    fn record_request(&self, method: &str, url: &str, headers: &Headers) {
        let mut requests = self.requests.lock().unwrap();
        requests.push(RecordedRequest {
            method: method.to_string(),
            url: url.to_string(),
            headers: headers.clone(),
        });
    }

    fn get_response(&self, url: &str) -> Option<MockResponse> {
        if let Some(queue) = self.queued.lock().unwrap().get_mut(url) {
            if let Some(response) = queue.pop_front() {
                return Some(response);
            }
        }

        let responses = self.responses.lock().unwrap();

        if let Some(response) = responses.get(url) {
            return Some(response.clone());
        }

        for (pattern, response) in responses.iter() {
            if url.starts_with(pattern) {
                return Some(response.clone());
            }
        }

        let default = self.default_response.lock().unwrap();
        default.clone()
    }
}

async fn resolve(response: MockResponse) -> Result<Response, HttpError> {
    let mut current = response;
    loop {
        match current {
            MockResponse::Success(response) => return Ok(response),
            MockResponse::Error(err) => return Err(err),
            MockResponse::Delayed(delay, inner) => {
                tokio::time::sleep(delay).await;
                current = *inner;
            }
            MockResponse::Pending => futures::future::pending::<()>().await,
        }
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn get(&self, url: &str, headers: &Headers) -> Result<Response, HttpError> {
        self.record_request("GET", url, headers);

        match self.get_response(url) {
            Some(response) => resolve(response).await,
            None => Err(HttpError::Other(format!("No mock response for URL: {}", url))),
        }
    }
}
