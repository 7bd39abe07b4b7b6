//! Extraction engine: map post identifiers to their video variants.
//!
//! Two independent depth-first passes over the same read-only document:
//!
//! 1. `PrimaryPass` treats every object with `rest_id`/`id_str` as a post and
//!    gathers variants from its `legacy`/top-level media lists, deduplicated
//!    by URL per post.
//! 2. `OrphanPass` re-walks the document carrying the nearest identifier and
//!    attaches any stray `video_info` node to it, but only for identifiers
//!    pass 1 found nothing for.

mod orphan;
mod predicates;
mod primary;
mod walk;

use serde_json::Value;
use std::collections::BTreeMap;

use crate::variant::VideoVariant;

pub use predicates::{media_descriptors, post_id, video_info, ID_FIELDS, VIDEO_INFO_FIELD};

/// Post identifier → variants, best first. Never holds an empty list.
pub type ExtractionResult = BTreeMap<String, Vec<VideoVariant>>;

/// Collect every post in `root` that carries at least one MP4 variant.
pub fn collect_posts_with_video(root: &Value) -> ExtractionResult {
    let mut primary = primary::PrimaryPass::default();
    walk::walk(root, &mut primary, &());
    let mut result = primary.finish();

    let mut orphans = orphan::OrphanPass::new(&result);
    walk::walk(root, &mut orphans, &None);
    let recovered = orphans.finish();

    result.extend(recovered);
    result
}
