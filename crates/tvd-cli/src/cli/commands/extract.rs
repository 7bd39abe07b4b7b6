//! `tvd extract <json>` – list variants in a saved API response.

use anyhow::{Context, Result};
use std::path::Path;
use tvd_core::collect_posts_with_video;

use super::print_post;

pub fn run_extract(path: &Path) -> Result<()> {
    let bytes = std::fs::read(path).with_context(|| format!("read {}", path.display()))?;
    let doc: serde_json::Value = serde_json::from_slice(&bytes)
        .with_context(|| format!("parse JSON: {}", path.display()))?;

    let results = collect_posts_with_video(&doc);
    if results.is_empty() {
        println!("No videos found.");
        return Ok(());
    }
    for (post_id, variants) in &results {
        print_post(post_id, variants);
    }
    Ok(())
}
