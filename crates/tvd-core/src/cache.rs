//! Subscriber-side cache of published video data.
//!
//! Accumulates across documents; the last message for a post wins.

use std::collections::HashMap;

use crate::publish::{ChannelMessage, VideoDataMessage};
use crate::variant::VideoVariant;

#[derive(Debug, Default, Clone)]
pub struct VideoDataCache {
    posts: HashMap<String, Vec<VideoVariant>>,
}

impl VideoDataCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message. Returns false (and changes nothing) for messages
    /// without an identifier.
    pub fn apply(&mut self, message: ChannelMessage) -> bool {
        let ChannelMessage::VideoData(VideoDataMessage {
            post_identifier,
            variants,
        }) = message;
        if post_identifier.is_empty() {
            return false;
        }
        self.posts.insert(post_identifier, variants);
        true
    }

    pub fn variants_for(&self, post_id: &str) -> Option<&[VideoVariant]> {
        self.posts
            .get(post_id)
            .map(Vec::as_slice)
            .filter(|v| !v.is_empty())
    }

    /// Variant to download: the one matching `resolution` (highest bitrate
    /// among matches), or the best overall when no resolution is given.
    pub fn pick(&self, post_id: &str, resolution: Option<&str>) -> Option<&VideoVariant> {
        let variants = self.variants_for(post_id)?;
        let mut candidates = variants
            .iter()
            .filter(|v| resolution.map_or(true, |r| v.resolution.eq_ignore_ascii_case(r)));
        let first = candidates.next()?;
        Some(candidates.fold(first, |best, v| if v.bitrate > best.bitrate { v } else { best }))
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    /// Post identifiers, sorted.
    pub fn post_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.posts.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }
}

/// Human-readable bitrate: `2.2 Mbps`, `832 kbps`, `900 bps`.
pub fn format_bitrate(bitrate: u64) -> String {
    if bitrate >= 1_000_000 {
        format!("{:.1} Mbps", bitrate as f64 / 1_000_000.0)
    } else if bitrate >= 1_000 {
        format!("{} kbps", (bitrate as f64 / 1_000.0).round() as u64)
    } else {
        format!("{} bps", bitrate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn msg(id: &str, variants: &[(u64, &str)]) -> ChannelMessage {
        ChannelMessage::VideoData(VideoDataMessage {
            post_identifier: id.to_string(),
            variants: variants
                .iter()
                .map(|(b, r)| VideoVariant {
                    bitrate: *b,
                    url: format!("https://v.example.com/{b}.mp4"),
                    resolution: r.to_string(),
                })
                .collect(),
        })
    }

    #[test]
    fn last_write_wins() {
        let mut cache = VideoDataCache::new();
        assert!(cache.apply(msg("1", &[(100, "360p")])));
        assert!(cache.apply(msg("1", &[(2_000_000, "720p")])));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.variants_for("1").unwrap()[0].bitrate, 2_000_000);
    }

    #[test]
    fn empty_identifier_is_ignored() {
        let mut cache = VideoDataCache::new();
        assert!(!cache.apply(msg("", &[(100, "360p")])));
        assert!(cache.is_empty());
    }

    #[test]
    fn pick_best_or_by_resolution() {
        let mut cache = VideoDataCache::new();
        cache.apply(msg(
            "5",
            &[(2_176_000, "1280p"), (832_000, "640p"), (950_000, "640p")],
        ));
        assert_eq!(cache.pick("5", None).unwrap().bitrate, 2_176_000);
        assert_eq!(cache.pick("5", Some("640P")).unwrap().bitrate, 950_000);
        assert!(cache.pick("5", Some("4K")).is_none());
        assert!(cache.pick("missing", None).is_none());
    }

    #[test]
    fn empty_variant_list_reads_as_unknown() {
        let mut cache = VideoDataCache::new();
        cache.apply(msg("2", &[]));
        assert!(cache.variants_for("2").is_none());
    }

    #[test]
    fn bitrate_formatting() {
        assert_eq!(format_bitrate(2_176_000), "2.2 Mbps");
        assert_eq!(format_bitrate(832_000), "832 kbps");
        assert_eq!(format_bitrate(1_500), "2 kbps");
        assert_eq!(format_bitrate(900), "900 bps");
    }
}
