//! Event-driven request primitive and its intercepting wrapper.

use std::sync::Arc;

use super::fetch::Response;
use super::{side_channel, InterceptPolicy};
use crate::error::InterceptError;
use crate::publish::MessageSink;

/// Runs once when the response body is ready.
pub type LoadListener = Box<dyn FnOnce(&Response) + Send + 'static>;
/// Runs once when the request fails without a response.
pub type ErrorListener = Box<dyn FnOnce(&InterceptError) + Send + 'static>;

/// Request object that reports completion through listeners: `open`, register
/// listeners, then `send`. Listeners fire in registration order.
pub trait EventRequest {
    fn open(&mut self, method: &str, url: &str);
    fn set_request_header(&mut self, name: &str, value: &str);
    fn add_load_listener(&mut self, listener: LoadListener);
    fn add_error_listener(&mut self, listener: ErrorListener);
    fn send(&mut self, body: Option<Vec<u8>>);
}

/// `EventRequest` wrapper that remembers the URL given to `open` and, when it
/// matches, registers one extra load listener at `send` time. The host's own
/// listeners were registered first and run first.
pub struct InterceptingRequest<R, S: ?Sized> {
    inner: R,
    url: Option<String>,
    sink: Arc<S>,
    policy: Arc<InterceptPolicy>,
}

impl<R, S: MessageSink + ?Sized + 'static> InterceptingRequest<R, S> {
    pub fn new(inner: R, sink: Arc<S>, policy: Arc<InterceptPolicy>) -> Self {
        Self {
            inner,
            url: None,
            sink,
            policy,
        }
    }

    pub fn inner(&self) -> &R {
        &self.inner
    }

    pub fn inner_mut(&mut self) -> &mut R {
        &mut self.inner
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R, S> EventRequest for InterceptingRequest<R, S>
where
    R: EventRequest,
    S: MessageSink + ?Sized + 'static,
{
    fn open(&mut self, method: &str, url: &str) {
        self.url = Some(url.to_string());
        self.inner.open(method, url);
    }

    fn set_request_header(&mut self, name: &str, value: &str) {
        self.inner.set_request_header(name, value);
    }

    fn add_load_listener(&mut self, listener: LoadListener) {
        self.inner.add_load_listener(listener);
    }

    fn add_error_listener(&mut self, listener: ErrorListener) {
        self.inner.add_error_listener(listener);
    }

    fn send(&mut self, body: Option<Vec<u8>>) {
        if let Some(url) = self.url.as_deref().filter(|u| self.policy.matches(u)) {
            let url = url.to_string();
            let sink = Arc::clone(&self.sink);
            self.inner.add_load_listener(Box::new(move |response: &Response| {
                side_channel(&url, response.body(), &*sink);
            }));
        }
        self.inner.send(body);
    }
}
