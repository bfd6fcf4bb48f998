//! Utility functions for probe documents and media paths.

use std::collections::BTreeMap;
use std::path::Path;

use serde_json::Value;

/// Flattens a nested JSON document into a single-level map.
///
/// Object keys are joined with `.`; array elements get an `[index]` suffix,
/// so a stream field becomes e.g. `streams[0].codec_type`. Scalar leaves
/// keep their JSON value.
#[must_use]
pub fn flatten_json(value: &Value) -> BTreeMap<String, Value> {
    let mut items = BTreeMap::new();
    flatten_into(value, "", &mut items);
    items
}

fn flatten_into(value: &Value, key: &str, items: &mut BTreeMap<String, Value>) {
    match value {
        Value::Object(map) => {
            for (child_key, child) in map {
                let new_key = if key.is_empty() {
                    child_key.clone()
                } else {
                    format!("{key}.{child_key}")
                };
                flatten_into(child, &new_key, items);
            }
        }
        Value::Array(elements) => {
            for (index, element) in elements.iter().enumerate() {
                flatten_into(element, &format!("{key}[{index}]"), items);
            }
        }
        scalar => {
            if !key.is_empty() {
                items.insert(key.to_string(), scalar.clone());
            }
        }
    }
}

/// Lowercase file extension of a media path, as a cheap container hint.
#[must_use]
pub fn container_extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flatten_json() {
        let flat = flatten_json(&json!({
            "a": {"b": 1},
            "c": [2, {"d": 3}],
            "e": "five"
        }));

        assert_eq!(flat.get("a.b"), Some(&json!(1)));
        assert_eq!(flat.get("c[0]"), Some(&json!(2)));
        assert_eq!(flat.get("c[1].d"), Some(&json!(3)));
        assert_eq!(flat.get("e"), Some(&json!("five")));
        assert_eq!(flat.len(), 4);
    }

    #[test]
    fn test_flatten_json_probe_shape() {
        let flat = flatten_json(&json!({
            "format": {"duration": "10.0"},
            "streams": [
                {"codec_type": "video", "width": 1920},
                {"codec_type": "audio"}
            ]
        }));

        assert_eq!(flat.get("format.duration"), Some(&json!("10.0")));
        assert_eq!(flat.get("streams[0].codec_type"), Some(&json!("video")));
        assert_eq!(flat.get("streams[0].width"), Some(&json!(1920)));
        assert_eq!(flat.get("streams[1].codec_type"), Some(&json!("audio")));
    }

    #[test]
    fn test_flatten_json_empty() {
        assert!(flatten_json(&json!({})).is_empty());
        assert!(flatten_json(&json!({"a": {}, "b": []})).is_empty());
    }

    #[test]
    fn test_container_extension() {
        assert_eq!(
            container_extension(Path::new("/tmp/video.MP4")),
            Some("mp4".to_string())
        );
        assert_eq!(
            container_extension(Path::new("clip.mkv")),
            Some("mkv".to_string())
        );
        assert_eq!(container_extension(Path::new("no_extension")), None);
        assert_eq!(container_extension(Path::new("")), None);
    }
}
