//! Bounding box types and operations.

use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in the map's native coordinate system.
///
/// Boxes produced by [`BoundingBox::new`] always have finite bounds with
/// `min_x <= max_x` and `min_y <= max_y`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    /// Create a bounding box, rejecting non-finite bounds and corners that
    /// are out of order.
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Result<Self, BboxParseError> {
        if let Some(bad) = [min_x, min_y, max_x, max_y]
            .into_iter()
            .find(|v| !v.is_finite())
        {
            return Err(BboxParseError::InvalidNumber(bad.to_string()));
        }

        if !(min_x <= max_x && min_y <= max_y) {
            return Err(BboxParseError::Inverted {
                min_x,
                min_y,
                max_x,
                max_y,
            });
        }

        Ok(Self {
            min_x,
            min_y,
            max_x,
            max_y,
        })
    }

    /// Parse a WMS BBOX parameter string: "minx,miny,maxx,maxy"
    ///
    /// Transposed corners are rejected, not swapped.
    pub fn from_wms_string(s: &str) -> Result<Self, BboxParseError> {
        let parts: Vec<&str> = s.split(',').collect();
        if parts.len() != 4 {
            return Err(BboxParseError::InvalidFormat(s.to_string()));
        }

        let mut values = [0.0f64; 4];
        for (slot, part) in values.iter_mut().zip(&parts) {
            *slot = part
                .parse()
                .map_err(|_| BboxParseError::InvalidNumber(part.to_string()))?;
        }

        let [min_x, min_y, max_x, max_y] = values;
        Self::new(min_x, min_y, max_x, max_y)
    }

    /// Width of the bounding box in coordinate units.
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Height of the bounding box in coordinate units.
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum BboxParseError {
    #[error("Invalid BBOX format: {0}. Expected 'minx,miny,maxx,maxy'")]
    InvalidFormat(String),

    #[error("Invalid number in BBOX: {0}")]
    InvalidNumber(String),

    #[error("BBOX corners out of order: {min_x},{min_y},{max_x},{max_y}")]
    Inverted {
        min_x: f64,
        min_y: f64,
        max_x: f64,
        max_y: f64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_wms_bbox() {
        let bbox = BoundingBox::from_wms_string("-125.0,24.0,-66.0,50.0").unwrap();
        assert_eq!(bbox.min_x, -125.0);
        assert_eq!(bbox.min_y, 24.0);
        assert_eq!(bbox.max_x, -66.0);
        assert_eq!(bbox.max_y, 50.0);
    }

    #[test]
    fn test_inverted_x_rejected() {
        let result = BoundingBox::from_wms_string("0,0,-10,10");
        assert!(matches!(result, Err(BboxParseError::Inverted { .. })));
    }

    #[test]
    fn test_nan_rejected() {
        let result = BoundingBox::from_wms_string("NaN,0,10,10");
        assert!(matches!(result, Err(BboxParseError::InvalidNumber(_))));
    }
}
