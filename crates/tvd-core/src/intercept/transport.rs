//! curl-backed primitives for use outside a browser.
//!
//! Each call runs a blocking curl Easy transfer on its own thread (or the
//! tokio blocking pool for `CurlFetch`).

use std::mem;
use std::thread::JoinHandle;
use std::time::Duration;

use super::fetch::{Fetch, Request, Response};
use super::request::{ErrorListener, EventRequest, LoadListener};
use crate::config::HttpConfig;
use crate::error::{InterceptError, Result};

/// Perform one transfer and buffer the whole body. Non-2xx statuses are
/// returned as responses, not errors.
fn perform(request: &Request, http: &HttpConfig) -> Result<Response> {
    let mut body = Vec::new();

    let mut easy = curl::easy::Easy::new();
    easy.url(&request.url)?;
    easy.follow_location(true)?;
    easy.max_redirections(10)?;
    easy.accept_encoding("")?;
    easy.connect_timeout(Duration::from_secs(http.connect_timeout_secs))?;
    easy.timeout(Duration::from_secs(http.timeout_secs))?;

    match request.method.to_ascii_uppercase().as_str() {
        "GET" => easy.get(true)?,
        "HEAD" => easy.nobody(true)?,
        "POST" => easy.post(true)?,
        other => easy.custom_request(other)?,
    }
    if let Some(payload) = &request.body {
        easy.post_fields_copy(payload)?;
    }

    let mut list = curl::easy::List::new();
    for (k, v) in &request.headers {
        list.append(&format!("{}: {}", k.trim(), v.trim()))?;
    }
    if !request.headers.is_empty() {
        easy.http_headers(list)?;
    }

    {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| {
            body.extend_from_slice(data);
            Ok(data.len())
        })?;
        transfer.perform()?;
    }

    let status = easy.response_code()?;
    let final_url = easy
        .effective_url()?
        .map(str::to_string)
        .unwrap_or_else(|| request.url.clone());
    tracing::debug!(
        method = %request.method,
        url = %request.url,
        status,
        bytes = body.len(),
        "transfer complete"
    );
    Ok(Response::new(status, final_url, body))
}

/// `Fetch` over libcurl.
#[derive(Debug, Clone, Default)]
pub struct CurlFetch {
    http: HttpConfig,
}

impl CurlFetch {
    pub fn new(http: HttpConfig) -> Self {
        Self { http }
    }
}

impl Fetch for CurlFetch {
    async fn fetch(&self, request: Request) -> Result<Response> {
        let http = self.http.clone();
        tokio::task::spawn_blocking(move || perform(&request, &http))
            .await
            .map_err(|e| InterceptError::NoResponse(e.to_string()))?
    }
}

/// `EventRequest` over libcurl. `send` starts the transfer on a worker thread
/// and returns immediately; listeners run on that thread.
#[derive(Default)]
pub struct CurlRequest {
    http: HttpConfig,
    request: Option<Request>,
    load: Vec<LoadListener>,
    error: Vec<ErrorListener>,
    worker: Option<JoinHandle<()>>,
}

impl CurlRequest {
    pub fn new(http: HttpConfig) -> Self {
        Self {
            http,
            ..Self::default()
        }
    }

    /// Block until the in-flight transfer (and its listeners) finished.
    pub fn wait(&mut self) {
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                tracing::warn!("request worker panicked");
            }
        }
    }
}

impl EventRequest for CurlRequest {
    fn open(&mut self, method: &str, url: &str) {
        self.request = Some(Request::new(method, url));
    }

    fn set_request_header(&mut self, name: &str, value: &str) {
        if let Some(request) = self.request.as_mut() {
            request.headers.push((name.to_string(), value.to_string()));
        }
    }

    fn add_load_listener(&mut self, listener: LoadListener) {
        self.load.push(listener);
    }

    fn add_error_listener(&mut self, listener: ErrorListener) {
        self.error.push(listener);
    }

    fn send(&mut self, body: Option<Vec<u8>>) {
        let load = mem::take(&mut self.load);
        let error = mem::take(&mut self.error);
        let Some(mut request) = self.request.take() else {
            let err = InterceptError::NoResponse("send before open".to_string());
            for listener in error {
                listener(&err);
            }
            return;
        };
        request.body = body;
        let http = self.http.clone();

        self.worker = Some(std::thread::spawn(move || match perform(&request, &http) {
            Ok(response) => {
                for listener in load {
                    listener(&response);
                }
            }
            Err(err) => {
                tracing::debug!(url = %request.url, error = %err, "request failed");
                for listener in error {
                    listener(&err);
                }
            }
        }));
    }
}
