//! Single-stream HTTP GET of a variant into a local file.

use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::unique_path;
use crate::config::HttpConfig;

fn check_scheme(url: &str) -> Result<()> {
    let parsed = url::Url::parse(url).with_context(|| format!("invalid variant URL: {url}"))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => anyhow::bail!("refusing to download {} URL: {}", other, url),
    }
}

/// Downloads `url` into `dir/filename` (uniquified), creating `dir` as needed.
/// Returns the path written. A partial file is removed on failure.
pub fn download_to(url: &str, dir: &Path, filename: &str, http: &HttpConfig) -> Result<PathBuf> {
    check_scheme(url)?;
    fs::create_dir_all(dir).with_context(|| format!("create folder: {}", dir.display()))?;
    let path = unique_path(&dir.join(filename));

    let result = get_into(url, &path, http);
    if result.is_err() {
        let _ = fs::remove_file(&path);
    }
    let written = result?;
    tracing::info!(url, path = %path.display(), bytes = written, "variant downloaded");
    Ok(path)
}

fn get_into(url: &str, path: &Path, http: &HttpConfig) -> Result<u64> {
    let mut file =
        File::create(path).with_context(|| format!("create file: {}", path.display()))?;
    let mut written = 0u64;
    let mut write_error = None;

    let mut easy = curl::easy::Easy::new();
    easy.url(url).context("invalid URL")?;
    easy.follow_location(true)?;
    easy.max_redirections(10)?;
    easy.connect_timeout(Duration::from_secs(http.connect_timeout_secs))?;
    easy.low_speed_limit(1024)?;
    easy.low_speed_time(Duration::from_secs(60))?;

    let performed = {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| match file.write_all(data) {
            Ok(()) => {
                written += data.len() as u64;
                Ok(data.len())
            }
            Err(e) => {
                tracing::warn!("variant write failed: {}", e);
                write_error = Some(e);
                Ok(0) // abort transfer
            }
        })?;
        transfer.perform()
    };
    if let Some(e) = write_error {
        return Err(e).with_context(|| format!("write {}", path.display()));
    }
    performed.context("GET request failed")?;

    let code = easy.response_code().context("no response code")?;
    if !(200..300).contains(&code) {
        anyhow::bail!("GET {} returned HTTP {}", url, code);
    }
    file.flush()?;
    Ok(written)
}
