//! Publication channel: one `VIDEO_DATA` message per discovered post.
//!
//! Delivery is best-effort. Consumers are expected to be idempotent: the last
//! message for an identifier replaces what they knew about it.

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use crate::extract::ExtractionResult;
use crate::variant::VideoVariant;

/// Origin wildcard used for every published message.
pub const ANY_ORIGIN: &str = "*";

/// Message crossing the isolation boundary to the UI layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ChannelMessage {
    #[serde(rename = "VIDEO_DATA")]
    VideoData(VideoDataMessage),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoDataMessage {
    pub post_identifier: String,
    pub variants: Vec<VideoVariant>,
}

/// Cross-isolation post primitive. Implementations must not block or fail
/// loudly: a missing listener is not an error.
pub trait MessageSink: Send + Sync {
    fn post_message(&self, message: ChannelMessage, target_origin: &str);
}

/// Sink backed by an unbounded tokio channel; dropped receivers are ignored.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<ChannelMessage>,
}

impl ChannelSink {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<ChannelMessage>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl MessageSink for ChannelSink {
    fn post_message(&self, message: ChannelMessage, _target_origin: &str) {
        if self.tx.send(message).is_err() {
            tracing::debug!("publication channel closed; message dropped");
        }
    }
}

impl<S: MessageSink + ?Sized> MessageSink for std::sync::Arc<S> {
    fn post_message(&self, message: ChannelMessage, target_origin: &str) {
        (**self).post_message(message, target_origin)
    }
}

/// Post one message per non-empty entry. Returns how many were posted.
pub fn publish_results<S: MessageSink + ?Sized>(results: ExtractionResult, sink: &S) -> usize {
    let mut posted = 0;
    for (post_identifier, variants) in results {
        if variants.is_empty() {
            continue;
        }
        tracing::info!(
            post = %post_identifier,
            variants = variants.len(),
            "video data discovered"
        );
        sink.post_message(
            ChannelMessage::VideoData(VideoDataMessage {
                post_identifier,
                variants,
            }),
            ANY_ORIGIN,
        );
        posted += 1;
    }
    posted
}
