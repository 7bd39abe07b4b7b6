//! `tvd download <post-id> --har <path>` – save one variant of a post's video.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tvd_core::cache::format_bitrate;
use tvd_core::config::TvdConfig;
use tvd_core::download::{download_to, sanitize_folder, variant_filename};

use super::import_har::load_cache;

pub async fn run_download(
    cfg: &TvdConfig,
    post_id: &str,
    har: &Path,
    resolution: Option<&str>,
    folder: Option<&str>,
) -> Result<()> {
    let (cache, _) = load_cache(cfg, har)?;
    if cache.variants_for(post_id).is_none() {
        anyhow::bail!(
            "no video data captured for post {post_id}; capture the page again after the video loads"
        );
    }
    let Some(variant) = cache.pick(post_id, resolution) else {
        let available: Vec<&str> = cache
            .variants_for(post_id)
            .unwrap_or_default()
            .iter()
            .map(|v| v.resolution.as_str())
            .collect();
        anyhow::bail!(
            "post {post_id} has no {} variant (available: {})",
            resolution.unwrap_or("matching"),
            available.join(", ")
        );
    };

    let dir = PathBuf::from(sanitize_folder(folder.unwrap_or(&cfg.download_folder)));
    let filename = variant_filename(post_id, &variant.resolution);
    println!(
        "Downloading {} ({}) to {}/{} ...",
        variant.resolution,
        format_bitrate(variant.bitrate),
        dir.display(),
        filename
    );

    let url = variant.url.clone();
    let http = cfg.http();
    let path = tokio::task::spawn_blocking(move || download_to(&url, &dir, &filename, &http))
        .await
        .context("download worker")??;
    println!("Saved {}", path.display());
    Ok(())
}
