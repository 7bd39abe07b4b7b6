//! `tvd fetch <url>` – one intercepted call; prints each VIDEO_DATA message as a JSON line.

use anyhow::{Context, Result};
use std::sync::Arc;
use tvd_core::config::TvdConfig;
use tvd_core::error::InterceptError;
use tvd_core::intercept::{
    CurlFetch, CurlRequest, EventRequest, Fetch, InterceptPolicy, InterceptingFetch,
    InterceptingRequest, Request, Response,
};
use tvd_core::publish::ChannelSink;

/// Split `Name: value`.
fn parse_header(raw: &str) -> Result<(String, String)> {
    let (name, value) = raw
        .split_once(':')
        .with_context(|| format!("header must be NAME:VALUE, got {raw:?}"))?;
    let name = name.trim();
    if name.is_empty() {
        anyhow::bail!("header name is empty in {raw:?}");
    }
    Ok((name.to_string(), value.trim().to_string()))
}

pub async fn run_fetch(cfg: &TvdConfig, url: &str, headers: &[String], xhr: bool) -> Result<()> {
    let headers = headers
        .iter()
        .map(String::as_str)
        .map(parse_header)
        .collect::<Result<Vec<_>>>()?;
    let policy = Arc::new(InterceptPolicy::from_config(cfg));
    if !policy.matches(url) {
        eprintln!("note: {url} does not match the intercept policy; nothing will be extracted");
    }
    let (sink, mut rx) = ChannelSink::new();
    let sink = Arc::new(sink);

    if xhr {
        let http = cfg.http();
        let url = url.to_string();
        tokio::task::spawn_blocking(move || {
            let mut req = InterceptingRequest::new(CurlRequest::new(http), sink, policy);
            req.open("GET", &url);
            for (name, value) in &headers {
                req.set_request_header(name, value);
            }
            req.add_load_listener(Box::new(|r: &Response| {
                eprintln!("HTTP {} ({} bytes)", r.status(), r.body().len());
            }));
            req.add_error_listener(Box::new(|e: &InterceptError| eprintln!("request failed: {e}")));
            req.send(None);
            req.inner_mut().wait();
        })
        .await
        .context("request worker")?;
    } else {
        let fetch = InterceptingFetch::new(CurlFetch::new(cfg.http()), sink, policy);
        let mut request = Request::get(url);
        request.headers = headers;
        let response = fetch.fetch(request).await?;
        eprintln!("HTTP {} ({} bytes)", response.status(), response.body().len());
    }

    // Every sink clone is gone once the side channel has finished.
    while let Some(message) = rx.recv().await {
        println!("{}", serde_json::to_string(&message)?);
    }
    Ok(())
}
