//! WMS query string parsing.
//!
//! Parameter names are matched case-insensitively, as WMS clients disagree on
//! casing (`WIDTH` vs `width`). When a name repeats, the first occurrence wins.
//! Accessors never fail: a missing or unparsable value is `None`.

use std::collections::HashMap;

use wms_common::BoundingBox;

const WIDTH: &str = "width";
const HEIGHT: &str = "height";
const BBOX: &str = "bbox";
const FORMAT: &str = "format";

/// Read-only view over a parsed query string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WmsQuery {
    params: HashMap<String, String>,
}

impl WmsQuery {
    /// Split `name=value` pairs separated by `&`.
    ///
    /// A pair without `=` is recorded with an empty value; empty pairs are skipped.
    pub fn parse(query: &str) -> Self {
        let mut params = HashMap::new();

        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (name, value) = pair.split_once('=').unwrap_or((pair, ""));
            params
                .entry(name.to_ascii_lowercase())
                .or_insert_with(|| value.to_string());
        }

        Self { params }
    }

    /// Raw value of a parameter, by case-insensitive name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.params
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Number of distinct parameters.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Requested image width in pixels.
    pub fn width(&self) -> Option<u32> {
        self.get_u32(WIDTH)
    }

    /// Requested image height in pixels.
    pub fn height(&self) -> Option<u32> {
        self.get_u32(HEIGHT)
    }

    /// Raw bounding-box text, unparsed.
    pub fn bbox_string(&self) -> Option<&str> {
        self.get(BBOX)
    }

    /// Requested output MIME type, e.g. `image/png`.
    pub fn format(&self) -> Option<&str> {
        self.get(FORMAT).filter(|f| !f.is_empty())
    }

    /// Parse bounding-box text. Malformed, wrong-arity or inverted boxes are `None`.
    pub fn parse_bbox(bbox: &str) -> Option<BoundingBox> {
        BoundingBox::from_wms_string(bbox).ok()
    }

    fn get_u32(&self, name: &str) -> Option<u32> {
        self.get(name)?.parse().ok()
    }
}
