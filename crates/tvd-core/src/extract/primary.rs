//! Pass 1: associate media with the post objects that list them.

use serde_json::{Map, Value};
use std::collections::{HashMap, HashSet};

use super::predicates::{media_descriptors, post_id, video_info};
use super::walk::Visitor;
use super::ExtractionResult;
use crate::variant::normalize_video_info;

/// Every object carrying an identifier is treated as a post. Walking continues
/// below it so quoted and retweeted posts are handled on their own.
#[derive(Default)]
pub(crate) struct PrimaryPass {
    found: ExtractionResult,
    /// Per-post URL set; repeated sightings of a post share it.
    seen_urls: HashMap<String, HashSet<String>>,
}

impl PrimaryPass {
    fn process_post(&mut self, id: &str, post: &Map<String, Value>) {
        for media in media_descriptors(post) {
            let Some(info) = media.as_object().and_then(video_info) else {
                continue;
            };
            for variant in normalize_video_info(Some(info)) {
                let seen = self.seen_urls.entry(id.to_string()).or_default();
                if !seen.insert(variant.url.clone()) {
                    continue;
                }
                self.found.entry(id.to_string()).or_default().push(variant);
            }
        }
    }

    pub(crate) fn finish(self) -> ExtractionResult {
        self.found
    }
}

impl<'doc> Visitor<'doc> for PrimaryPass {
    type Scope = ();

    fn visit_object(&mut self, obj: &'doc Map<String, Value>, _scope: &()) {
        if let Some(id) = post_id(obj) {
            self.process_post(&id, obj);
        }
    }
}
