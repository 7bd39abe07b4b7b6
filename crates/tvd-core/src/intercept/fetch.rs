//! Future-returning fetch primitive and its intercepting wrapper.

use serde_json::Value;
use std::borrow::Cow;
use std::future::Future;
use std::sync::Arc;

use super::{parse_document, side_channel, InterceptPolicy};
use crate::error::Result;
use crate::publish::MessageSink;

/// Outgoing call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub method: String,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
}

impl Request {
    pub fn new(method: &str, url: &str) -> Self {
        Self {
            method: method.to_string(),
            url: url.to_string(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn get(url: &str) -> Self {
        Self::new("GET", url)
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    pub fn body(mut self, body: Vec<u8>) -> Self {
        self.body = Some(body);
        self
    }
}

/// Completed response. The body is shared, so `clone()` is a cheap duplicate
/// that leaves the original readable.
#[derive(Debug, Clone)]
pub struct Response {
    status: u32,
    url: String,
    body: Arc<[u8]>,
}

impl Response {
    pub fn new(status: u32, url: impl Into<String>, body: Vec<u8>) -> Self {
        Self {
            status,
            url: url.into(),
            body: body.into(),
        }
    }

    pub fn status(&self) -> u32 {
        self.status
    }

    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Final URL (after redirects, when the primitive follows them).
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }

    pub fn json(&self) -> Result<Value> {
        parse_document(&self.body)
    }
}

/// Asynchronous fetch primitive.
pub trait Fetch: Send + Sync {
    fn fetch(&self, request: Request) -> impl Future<Output = Result<Response>> + Send;
}

/// `Fetch` wrapper that routes matching responses to the extraction engine.
///
/// The caller gets exactly what the inner primitive returned, as soon as it
/// returned it. Processing runs on a detached blocking task.
pub struct InterceptingFetch<F, S: ?Sized> {
    inner: F,
    sink: Arc<S>,
    policy: Arc<InterceptPolicy>,
}

impl<F, S: MessageSink + ?Sized + 'static> InterceptingFetch<F, S> {
    pub fn new(inner: F, sink: Arc<S>, policy: Arc<InterceptPolicy>) -> Self {
        Self {
            inner,
            sink,
            policy,
        }
    }

    pub fn inner(&self) -> &F {
        &self.inner
    }

    fn spawn_side_channel(&self, response: Response) {
        let sink = Arc::clone(&self.sink);
        let task = move || side_channel(response.url(), response.body(), &*sink);
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn_blocking(task);
            }
            Err(_) => {
                std::thread::spawn(task);
            }
        }
    }
}

impl<F, S> Fetch for InterceptingFetch<F, S>
where
    F: Fetch,
    S: MessageSink + ?Sized + 'static,
{
    async fn fetch(&self, request: Request) -> Result<Response> {
        let intercept = self.policy.matches(&request.url);
        let result = self.inner.fetch(request).await;
        if intercept {
            if let Ok(response) = &result {
                self.spawn_side_channel(response.clone());
            }
        }
        result
    }
}
