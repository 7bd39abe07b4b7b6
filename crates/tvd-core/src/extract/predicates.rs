//! Structural predicates over untyped API objects.
//!
//! The upstream API has no stable schema, so posts and media are recognised
//! by field presence alone.

use serde_json::{Map, Value};
use std::borrow::Cow;

/// Field names that identify a post object, in priority order.
pub const ID_FIELDS: [&str; 2] = ["rest_id", "id_str"];

pub const VIDEO_INFO_FIELD: &str = "video_info";

/// Container that older response shapes nest the post body in.
const LEGACY_FIELD: &str = "legacy";
/// Media list containers, in the order their media are gathered.
static MEDIA_CONTAINERS: [&str; 2] = ["extended_entities", "entities"];

/// A usable identifier value: non-empty string or non-zero number.
fn as_identifier(value: &Value) -> Option<Cow<'_, str>> {
    match value {
        Value::String(s) if !s.is_empty() => Some(Cow::Borrowed(s.as_str())),
        Value::Number(n) if n.as_f64().is_some_and(|f| f != 0.0) => Some(Cow::Owned(n.to_string())),
        _ => None,
    }
}

/// Identifier carried directly by this object, if any (`rest_id` before `id_str`).
pub fn post_id(obj: &Map<String, Value>) -> Option<Cow<'_, str>> {
    ID_FIELDS
        .iter()
        .find_map(|field| obj.get(*field).and_then(as_identifier))
}

/// `video_info` carried directly by this object. Null counts as absent.
pub fn video_info(obj: &Map<String, Value>) -> Option<&Value> {
    obj.get(VIDEO_INFO_FIELD).filter(|v| !v.is_null())
}

fn media_in(container: Option<&Value>) -> &[Value] {
    container
        .and_then(|c| c.get("media"))
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// Media descriptors of a post, concatenated in gathering order:
/// `legacy.extended_entities.media`, `legacy.entities.media`,
/// then the same two lists at the top level of the post.
pub fn media_descriptors(post: &Map<String, Value>) -> impl Iterator<Item = &Value> {
    let legacy = post.get(LEGACY_FIELD);
    let nested = MEDIA_CONTAINERS
        .iter()
        .flat_map(move |field| media_in(legacy.and_then(|l| l.get(*field))));
    let top_level = MEDIA_CONTAINERS
        .iter()
        .flat_map(move |field| media_in(post.get(*field)));
    nested.chain(top_level)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn obj(v: Value) -> Map<String, Value> {
        match v {
            Value::Object(m) => m,
            _ => panic!("not an object"),
        }
    }

    #[test]
    fn post_id_prefers_rest_id() {
        let o = obj(json!({ "rest_id": "1", "id_str": "2" }));
        assert_eq!(post_id(&o).as_deref(), Some("1"));
        let o = obj(json!({ "id_str": "2" }));
        assert_eq!(post_id(&o).as_deref(), Some("2"));
    }

    #[test]
    fn post_id_skips_falsy_values() {
        assert!(post_id(&obj(json!({ "rest_id": "" }))).is_none());
        assert!(post_id(&obj(json!({ "rest_id": null, "id_str": 0 }))).is_none());
        assert!(post_id(&obj(json!({ "rest_id": true }))).is_none());
        assert_eq!(post_id(&obj(json!({ "rest_id": "", "id_str": "9" }))).as_deref(), Some("9"));
        assert_eq!(post_id(&obj(json!({ "rest_id": 42 }))).as_deref(), Some("42"));
    }

    #[test]
    fn video_info_presence() {
        assert!(video_info(&obj(json!({ "video_info": { "variants": [] } }))).is_some());
        assert!(video_info(&obj(json!({ "video_info": null }))).is_none());
        assert!(video_info(&obj(json!({ "media_url": "x" }))).is_none());
    }

    #[test]
    fn media_descriptors_gathering_order() {
        let post = obj(json!({
            "legacy": {
                "extended_entities": { "media": [ { "n": 1 } ] },
                "entities": { "media": [ { "n": 2 } ] }
            },
            "extended_entities": { "media": [ { "n": 3 } ] },
            "entities": { "media": [ { "n": 4 }, { "n": 5 } ] }
        }));
        let order: Vec<u64> = media_descriptors(&post)
            .filter_map(|m| m.get("n").and_then(Value::as_u64))
            .collect();
        assert_eq!(order, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn media_descriptors_ignores_malformed_lists() {
        let post = obj(json!({
            "legacy": { "extended_entities": { "media": "not a list" } },
            "entities": 7
        }));
        assert_eq!(media_descriptors(&post).count(), 0);
    }
}
