//! Saving a chosen variant to disk.
//!
//! Naming is `tweet_<post id>_<resolution>.mp4` inside a sanitized folder;
//! an existing file is never overwritten.

mod fetch;
mod folder;

use std::path::{Path, PathBuf};

pub use fetch::download_to;
pub use folder::sanitize_folder;

/// Folder used when the configured one is empty or sanitizes to nothing.
pub const DEFAULT_FOLDER: &str = "x-video-dl";

/// File name for a downloaded variant.
pub fn variant_filename(post_id: &str, resolution: &str) -> String {
    let keep = |s: &str| -> String {
        s.chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
            .collect()
    };
    format!("tweet_{}_{}.mp4", keep(post_id), keep(resolution))
}

/// `path` if free, otherwise the first free `stem (n).ext`.
pub fn unique_path(path: &Path) -> PathBuf {
    if !path.exists() {
        return path.to_path_buf();
    }
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let ext = path.extension().map(|e| e.to_string_lossy().into_owned());
    let parent = path.parent().unwrap_or_else(|| Path::new(""));
    let mut n = 1u32;
    loop {
        let name = match &ext {
            Some(ext) => format!("{stem} ({n}).{ext}"),
            None => format!("{stem} ({n})"),
        };
        let candidate = parent.join(name);
        if !candidate.exists() {
            return candidate;
        }
        n += 1;
    }
}
