//! `tvd import-har <path>` – replay a HAR capture and list posts with video.

use anyhow::Result;
use std::path::Path;
use tvd_core::cache::VideoDataCache;
use tvd_core::config::TvdConfig;
use tvd_core::har;
use tvd_core::intercept::InterceptPolicy;
use tvd_core::publish::ChannelSink;

use super::print_post;

/// Replay `path` into a fresh cache (last capture of a post wins).
pub(super) fn load_cache(
    cfg: &TvdConfig,
    path: &Path,
) -> Result<(VideoDataCache, har::ReplaySummary)> {
    let policy = InterceptPolicy::from_config(cfg);
    let (sink, mut rx) = ChannelSink::new();
    let summary = har::replay_har(path, &policy, &sink)?;
    drop(sink);

    let mut cache = VideoDataCache::new();
    while let Ok(message) = rx.try_recv() {
        cache.apply(message);
    }
    Ok((cache, summary))
}

pub fn run_import_har(cfg: &TvdConfig, path: &Path) -> Result<()> {
    let (cache, summary) = load_cache(cfg, path)?;
    println!(
        "Replayed {} entries ({} intercepted, {} ignored); {} post(s) with video.",
        summary.entries,
        summary.intercepted,
        summary.ignored,
        cache.len()
    );
    for post_id in cache.post_ids() {
        if let Some(variants) = cache.variants_for(post_id) {
            print_post(post_id, variants);
        }
    }
    Ok(())
}
