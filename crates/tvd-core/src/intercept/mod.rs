//! Interception layer.
//!
//! Wraps injected network primitives so matching responses are routed to the
//! extraction engine on a side channel. The wrapped primitive's result,
//! errors and timing are untouched; side-channel failures are logged at debug
//! level and dropped.

mod fetch;
mod policy;
mod request;
mod transport;

use serde_json::Value;
use std::panic::{catch_unwind, AssertUnwindSafe};

use crate::error::{InterceptError, Result};
use crate::extract::collect_posts_with_video;
use crate::publish::{publish_results, MessageSink};

pub use fetch::{Fetch, InterceptingFetch, Request, Response};
pub use policy::{should_intercept, InterceptPolicy, API_PATH_PATTERNS, ENTITY_KEYWORD};
pub use request::{ErrorListener, EventRequest, InterceptingRequest, LoadListener};
pub use transport::{CurlFetch, CurlRequest};

/// Parse a response body as a JSON document.
pub fn parse_document(body: &[u8]) -> Result<Value> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(InterceptError::EmptyBody);
    }
    Ok(serde_json::from_slice(body)?)
}

/// Parse, extract and publish. Returns the number of messages posted.
pub fn process_body<S: MessageSink + ?Sized>(body: &[u8], sink: &S) -> Result<usize> {
    let doc = parse_document(body)?;
    Ok(publish_results(collect_posts_with_video(&doc), sink))
}

/// Side-channel boundary: nothing escapes, not even a panic.
pub(crate) fn side_channel<S: MessageSink + ?Sized>(url: &str, body: &[u8], sink: &S) {
    match catch_unwind(AssertUnwindSafe(|| process_body(body, sink))) {
        Ok(Ok(posted)) => tracing::debug!(url, posted, "intercepted response processed"),
        Ok(Err(e)) => tracing::debug!(url, error = %e, "intercepted response ignored"),
        Err(_) => tracing::debug!(url, "intercepted response processing panicked"),
    }
}
