//! Replay a HAR capture through the interception side channel.

use anyhow::{Context, Result};
use std::path::Path;

use crate::intercept::{process_body, InterceptPolicy};
use crate::publish::MessageSink;

use super::parse::{HarEntry, HarLog};

/// Counts from one replay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    /// Entries in the capture.
    pub entries: usize,
    /// Entries whose URL matched the policy and carried a usable body.
    pub intercepted: usize,
    /// Matching entries whose body could not be processed (not JSON, etc.).
    pub ignored: usize,
    /// Messages posted to the sink.
    pub published: usize,
}

/// Reads a HAR file and feeds every matching response body to the
/// extraction engine, in capture order. Later captures of the same post are
/// published later, so an idempotent consumer ends up with the newest data.
///
/// Only the HAR file itself can fail the replay; bad bodies are skipped.
pub fn replay_har<S: MessageSink + ?Sized>(
    path: &Path,
    policy: &InterceptPolicy,
    sink: &S,
) -> Result<ReplaySummary> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("read HAR file: {}", path.display()))?;
    let har: HarLog = serde_json::from_slice(&bytes)
        .with_context(|| format!("parse HAR JSON: {}", path.display()))?;

    let mut summary = ReplaySummary {
        entries: har.log.entries.len(),
        ..ReplaySummary::default()
    };

    for entry in &har.log.entries {
        let Some(body) = replayable_body(entry, policy) else {
            continue;
        };
        summary.intercepted += 1;
        match process_body(body.as_bytes(), sink) {
            Ok(posted) => summary.published += posted,
            Err(e) => {
                summary.ignored += 1;
                tracing::debug!(
                    method = %entry.request.method,
                    url = %entry.request.url,
                    status = entry.response.status,
                    error = %e,
                    "HAR entry ignored"
                );
            }
        }
    }

    tracing::info!(
        path = %path.display(),
        entries = summary.entries,
        intercepted = summary.intercepted,
        published = summary.published,
        "HAR replay finished"
    );
    Ok(summary)
}

/// Body text of an entry the interceptor would have looked at.
fn replayable_body<'a>(entry: &'a HarEntry, policy: &InterceptPolicy) -> Option<&'a str> {
    if !policy.matches(&entry.request.url) {
        return None;
    }
    let content = &entry.response.content;
    if content
        .encoding
        .as_deref()
        .is_some_and(|e| e.eq_ignore_ascii_case("base64"))
    {
        tracing::debug!(url = %entry.request.url, "skipping base64-encoded HAR body");
        return None;
    }
    content.text.as_deref()
}
