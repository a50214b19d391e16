//! Tests for BoundingBox parsing and invariants.

use wms_common::bbox::{BboxParseError, BoundingBox};

// ============================================================================
// Constructor tests
// ============================================================================

#[test]
fn test_bbox_new() {
    let bbox = BoundingBox::new(-180.0, -90.0, 180.0, 90.0).unwrap();
    assert_eq!(bbox.min_x, -180.0);
    assert_eq!(bbox.min_y, -90.0);
    assert_eq!(bbox.max_x, 180.0);
    assert_eq!(bbox.max_y, 90.0);
}

#[test]
fn test_bbox_new_degenerate_allowed() {
    // A zero-area box still satisfies min <= max
    let bbox = BoundingBox::new(5.0, 5.0, 5.0, 5.0).unwrap();
    assert_eq!(bbox.width(), 0.0);
    assert_eq!(bbox.height(), 0.0);
}

#[test]
fn test_bbox_new_inverted_rejected() {
    let result = BoundingBox::new(10.0, 10.0, 0.0, 0.0);
    assert!(matches!(result, Err(BboxParseError::Inverted { .. })));
}

// ============================================================================
// from_wms_string tests
// ============================================================================

#[test]
fn test_parse_wms_bbox_integer() {
    let bbox = BoundingBox::from_wms_string("0,0,10,10").unwrap();
    assert_eq!(bbox.min_x, 0.0);
    assert_eq!(bbox.min_y, 0.0);
    assert_eq!(bbox.max_x, 10.0);
    assert_eq!(bbox.max_y, 10.0);
}

#[test]
fn test_parse_wms_bbox_floating() {
    let bbox = BoundingBox::from_wms_string("-125.5,24.75,-66.25,50.125").unwrap();
    assert!((bbox.min_x - (-125.5)).abs() < 0.001);
    assert!((bbox.min_y - 24.75).abs() < 0.001);
    assert!((bbox.max_x - (-66.25)).abs() < 0.001);
    assert!((bbox.max_y - 50.125).abs() < 0.001);
}

#[test]
fn test_parse_wms_bbox_scientific_notation() {
    let bbox = BoundingBox::from_wms_string("1e-6,2e-6,1e6,2e6").unwrap();
    assert!((bbox.min_x - 1e-6).abs() < 1e-10);
    assert!((bbox.max_x - 1e6).abs() < 0.001);
}

#[test]
fn test_parse_wms_bbox_web_mercator() {
    let bbox =
        BoundingBox::from_wms_string("-20037508.34,-20037508.34,20037508.34,20037508.34").unwrap();
    assert!((bbox.min_x - (-20037508.34)).abs() < 0.01);
    assert!((bbox.max_x - 20037508.34).abs() < 0.01);
}

#[test]
fn test_parse_wms_bbox_max_x_below_min_x() {
    let result = BoundingBox::from_wms_string("0,0,-10,10");
    assert!(matches!(result, Err(BboxParseError::Inverted { .. })));
}

#[test]
fn test_parse_wms_bbox_max_y_below_min_y() {
    let result = BoundingBox::from_wms_string("0,10,10,0");
    assert!(matches!(result, Err(BboxParseError::Inverted { .. })));
}

#[test]
fn test_parse_wms_bbox_too_few() {
    let result = BoundingBox::from_wms_string("1,2,3");
    assert!(matches!(result, Err(BboxParseError::InvalidFormat(_))));
}

#[test]
fn test_parse_wms_bbox_too_many() {
    let result = BoundingBox::from_wms_string("0,0,100,100,200");
    assert!(matches!(result, Err(BboxParseError::InvalidFormat(_))));
}

#[test]
fn test_parse_wms_bbox_non_numeric() {
    let result = BoundingBox::from_wms_string("a,b,c,d");
    assert!(matches!(result, Err(BboxParseError::InvalidNumber(_))));
}

#[test]
fn test_parse_wms_bbox_empty_component() {
    let result = BoundingBox::from_wms_string("0,,10,10");
    assert!(matches!(result, Err(BboxParseError::InvalidNumber(_))));
}

#[test]
fn test_parse_wms_bbox_empty_string() {
    let result = BoundingBox::from_wms_string("");
    assert!(matches!(result, Err(BboxParseError::InvalidFormat(_))));
}

#[test]
fn test_parse_wms_bbox_infinite_rejected() {
    for input in ["inf,0,inf,1", "-inf,-inf,inf,inf", "0,0,infinity,1"] {
        let result = BoundingBox::from_wms_string(input);
        assert!(
            matches!(result, Err(BboxParseError::InvalidNumber(_))),
            "{} should be rejected",
            input
        );
    }
}

#[test]
fn test_bbox_new_non_finite_rejected() {
    assert!(BoundingBox::new(0.0, 0.0, f64::INFINITY, 1.0).is_err());
    assert!(BoundingBox::new(f64::NEG_INFINITY, 0.0, 1.0, 1.0).is_err());
}

#[test]
fn test_parse_wms_bbox_whitespace() {
    let result = BoundingBox::from_wms_string(" 0, 0, 100, 100 ");
    assert!(result.is_err());
}

// ============================================================================
// Geometry tests
// ============================================================================

#[test]
fn test_bbox_width_negative_coords() {
    let bbox = BoundingBox::new(-100.0, 0.0, -50.0, 10.0).unwrap();
    assert_eq!(bbox.width(), 50.0);
}

#[test]
fn test_bbox_degenerate_has_zero_extent() {
    let bbox = BoundingBox::new(5.0, 5.0, 5.0, 5.0).unwrap();
    assert_eq!(bbox.width(), 0.0);
    assert_eq!(bbox.height(), 0.0);
}
