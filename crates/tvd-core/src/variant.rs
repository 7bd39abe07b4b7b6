//! Variant normalization: turn a `video_info` node into ranked, labelled MP4 variants.

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::LazyLock;

/// Only progressive MP4 renditions are directly downloadable.
pub const MP4_CONTENT_TYPE: &str = "video/mp4";

/// `/WIDTHxHEIGHT/` path segment, e.g. `/vid/avc1/1280x720/abc.mp4`.
static RESOLUTION_SEGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/([0-9]{2,4})x([0-9]{2,4})/").expect("static regex"));

/// One encoded rendition of a post's video.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoVariant {
    pub bitrate: u64,
    pub url: String,
    pub resolution: String,
}

/// Bitrate band label. Bounds are exclusive upper limits.
pub fn bitrate_to_quality(bitrate: u64) -> &'static str {
    match bitrate {
        0..=399_999 => "360p",
        400_000..=899_999 => "480p",
        900_000..=2_999_999 => "720p",
        3_000_000..=5_999_999 => "1080p",
        _ => "4K",
    }
}

/// Resolution label for a variant: the larger URL dimension suffixed with `p`,
/// or the bitrate band when the URL carries no `WxH` segment.
pub fn extract_resolution(url: &str, bitrate: u64) -> String {
    let dims = RESOLUTION_SEGMENT.captures(url).and_then(|caps| {
        let a: u32 = caps[1].parse().ok()?;
        let b: u32 = caps[2].parse().ok()?;
        Some(a.max(b))
    });
    match dims {
        Some(side) => format!("{side}p"),
        None => bitrate_to_quality(bitrate).to_string(),
    }
}

/// Non-numeric, negative or missing bitrates count as 0.
fn bitrate_of(entry: &Value) -> u64 {
    match entry.get("bitrate") {
        Some(Value::Number(n)) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f > 0.0).map(|f| f as u64))
            .unwrap_or(0),
        _ => 0,
    }
}

/// Normalize a `video_info` node into MP4 variants, best (highest bitrate) first.
///
/// Never fails: a missing node, a missing or non-array `variants` field, or
/// entries of the wrong shape simply produce fewer variants. Entries without a
/// usable URL are dropped.
pub fn normalize_video_info(video_info: Option<&Value>) -> Vec<VideoVariant> {
    let Some(entries) = video_info
        .and_then(|v| v.get("variants"))
        .and_then(Value::as_array)
    else {
        return Vec::new();
    };

    let mut out: Vec<VideoVariant> = entries
        .iter()
        .filter(|e| e.get("content_type").and_then(Value::as_str) == Some(MP4_CONTENT_TYPE))
        .filter_map(|e| {
            let url = e.get("url").and_then(Value::as_str).filter(|u| !u.is_empty())?;
            let bitrate = bitrate_of(e);
            Some(VideoVariant {
                bitrate,
                url: url.to_string(),
                resolution: extract_resolution(url, bitrate),
            })
        })
        .collect();

    // Stable: equal bitrates keep their source order.
    out.sort_by(|a, b| b.bitrate.cmp(&a.bitrate));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn quality_band_boundaries() {
        assert_eq!(bitrate_to_quality(0), "360p");
        assert_eq!(bitrate_to_quality(399_999), "360p");
        assert_eq!(bitrate_to_quality(400_000), "480p");
        assert_eq!(bitrate_to_quality(899_999), "480p");
        assert_eq!(bitrate_to_quality(900_000), "720p");
        assert_eq!(bitrate_to_quality(3_000_000), "1080p");
        assert_eq!(bitrate_to_quality(5_999_999), "1080p");
        assert_eq!(bitrate_to_quality(6_000_000), "4K");
        assert_eq!(bitrate_to_quality(u64::MAX), "4K");
    }

    #[test]
    fn quality_band_is_monotonic() {
        let rank = |q: &str| ["360p", "480p", "720p", "1080p", "4K"].iter().position(|x| *x == q);
        let mut prev = rank(bitrate_to_quality(0));
        for b in (0..8_000_000u64).step_by(50_000) {
            let cur = rank(bitrate_to_quality(b));
            assert!(cur >= prev, "band went down at {b}");
            prev = cur;
        }
    }

    #[test]
    fn resolution_from_url_segment_wins_over_bitrate() {
        let url = "https://video.twimg.com/ext_tw_video/1/pu/vid/960x544/a.mp4";
        assert_eq!(extract_resolution(url, 100), "960p");
        let portrait = "https://video.twimg.com/ext_tw_video/1/pu/vid/720x1280/b.mp4";
        assert_eq!(extract_resolution(portrait, 9_000_000), "1280p");
    }

    #[test]
    fn resolution_falls_back_to_bitrate_band() {
        assert_eq!(extract_resolution("https://v.example.com/a.mp4", 5_000_000), "1080p");
        // Five-digit dimensions are not a resolution segment.
        assert_eq!(extract_resolution("https://v.example.com/12345x678/a.mp4", 0), "360p");
    }

    #[test]
    fn non_ascii_digits_are_not_a_resolution_segment() {
        let url = "https://v.example.com/vid/\u{0661}\u{0662}\u{0663}x\u{0664}\u{0665}\u{0666}/a.mp4";
        assert_eq!(extract_resolution(url, 2_000_000), "720p");
    }

    #[test]
    fn normalize_filters_non_mp4_and_sorts() {
        let info = json!({
            "variants": [
                { "content_type": "application/x-mpegURL", "url": "https://v.example.com/pl.m3u8" },
                { "content_type": "video/mp4", "bitrate": 832000, "url": "https://v.example.com/vid/640x360/a.mp4" },
                { "content_type": "video/mp4", "bitrate": 2176000, "url": "https://v.example.com/vid/1280x720/b.mp4" },
                { "content_type": "video/mp4", "bitrate": 256000, "url": "https://v.example.com/vid/480x270/c.mp4" }
            ]
        });
        let out = normalize_video_info(Some(&info));
        let bitrates: Vec<u64> = out.iter().map(|v| v.bitrate).collect();
        assert_eq!(bitrates, vec![2_176_000, 832_000, 256_000]);
        assert_eq!(out[0].resolution, "1280p");
        assert!(out.iter().all(|v| v.url.ends_with(".mp4")));
    }

    #[test]
    fn normalize_defaults_missing_bitrate_to_zero() {
        let info = json!({
            "variants": [
                { "content_type": "video/mp4", "url": "https://v.example.com/a.mp4" },
                { "content_type": "video/mp4", "bitrate": "fast", "url": "https://v.example.com/b.mp4" }
            ]
        });
        let out = normalize_video_info(Some(&info));
        assert_eq!(out.len(), 2);
        assert!(out.iter().all(|v| v.bitrate == 0 && v.resolution == "360p"));
    }

    #[test]
    fn normalize_drops_entries_without_url() {
        let info = json!({
            "variants": [
                { "content_type": "video/mp4", "bitrate": 800000 },
                { "content_type": "video/mp4", "bitrate": 800000, "url": "" }
            ]
        });
        assert!(normalize_video_info(Some(&info)).is_empty());
    }

    #[test]
    fn normalize_absent_or_malformed_is_empty() {
        assert!(normalize_video_info(None).is_empty());
        assert!(normalize_video_info(Some(&json!({}))).is_empty());
        assert!(normalize_video_info(Some(&json!({ "variants": "nope" }))).is_empty());
        assert!(normalize_video_info(Some(&json!({ "variants": [] }))).is_empty());
        assert!(normalize_video_info(Some(&json!(42))).is_empty());
    }
}
