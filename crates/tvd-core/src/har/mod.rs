//! HAR (HTTP Archive) replay: run captured API responses through the extractor.
//!
//! Lets a browser capture (DevTools "Save all as HAR with content") stand in
//! for live interception. Entries are filtered with the same relevance policy
//! the live wrappers use.

mod parse;
mod replay;

pub use replay::{replay_har, ReplaySummary};
