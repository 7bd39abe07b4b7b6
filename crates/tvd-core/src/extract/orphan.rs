//! Pass 2: recover `video_info` nodes that sit outside a post's media lists.

use serde_json::{Map, Value};
use std::borrow::Cow;

use super::predicates::{post_id, video_info};
use super::walk::Visitor;
use super::ExtractionResult;
use crate::variant::normalize_video_info;

/// Attaches displaced video nodes to the nearest identifier at or above them.
/// Only fills identifiers pass 1 left empty; the first recovered node wins.
pub(crate) struct OrphanPass<'r> {
    primary: &'r ExtractionResult,
    recovered: ExtractionResult,
}

impl<'r> OrphanPass<'r> {
    pub(crate) fn new(primary: &'r ExtractionResult) -> Self {
        Self {
            primary,
            recovered: ExtractionResult::new(),
        }
    }

    fn is_filled(&self, id: &str) -> bool {
        self.primary.contains_key(id) || self.recovered.contains_key(id)
    }

    pub(crate) fn finish(self) -> ExtractionResult {
        self.recovered
    }
}

impl<'r, 'doc> Visitor<'doc> for OrphanPass<'r> {
    /// Nearest identifier seen on the path from the root.
    type Scope = Option<Cow<'doc, str>>;

    fn visit_object(
        &mut self,
        obj: &'doc Map<String, Value>,
        inherited: &Self::Scope,
    ) -> Self::Scope {
        let scope = post_id(obj).or_else(|| inherited.clone());

        if let (Some(info), Some(id)) = (video_info(obj), scope.as_deref()) {
            if !self.is_filled(id) {
                let variants = normalize_video_info(Some(info));
                if !variants.is_empty() {
                    self.recovered.insert(id.to_string(), variants);
                }
            }
        }

        scope
    }
}
