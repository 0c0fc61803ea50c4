mod common;

use approx::assert_abs_diff_eq;
use common::synthetic::{paint_dot, three_dot_frame, to_rgba, BACKGROUND, PINK, RED};
use nalgebra::Point2;
use tridot_core::RgbImage;
use tridot_detect::{
    compute_heading, validate_markers, InvalidReason, MarkerDetector, SteeringMode,
    ToleranceConfig, TridotConfig, TurnDirection, ValidationResult,
};

#[test]
fn detects_validates_and_steers() {
    let img = three_dot_frame(500, 300, (400.0, 150.0), (250.0, 150.0), (100.0, 150.0), 10.0);
    let detector = MarkerDetector::default();
    let markers = detector.detect(&img.view());

    let red = markers.red.expect("red");
    let pink = markers.pink.expect("pink");
    let green = markers.green.expect("green");
    assert_abs_diff_eq!(red.x, 400.0, epsilon = 0.5);
    assert_abs_diff_eq!(pink.x, 250.0, epsilon = 0.5);
    assert_abs_diff_eq!(green.x, 100.0, epsilon = 0.5);

    let verdict = validate_markers(&markers, &ToleranceConfig::default());
    assert_eq!(verdict, ValidationResult::Valid);

    let heading = compute_heading(&markers, Point2::new(325.0, 250.0)).expect("heading");
    assert_abs_diff_eq!(heading.pivot.x, 325.0, epsilon = 0.5);
    assert_abs_diff_eq!(heading.pivot.y, 150.0, epsilon = 0.5);
    assert_abs_diff_eq!(heading.rotation_degrees, 90.0, epsilon = 0.5);
    assert_eq!(heading.direction, TurnDirection::Right);

    let ahead = compute_heading(&markers, Point2::new(490.0, 140.0)).expect("heading");
    assert_eq!(ahead.mode, SteeringMode::Simple);
    assert_eq!(ahead.direction, TurnDirection::Left);
    assert!(ahead.magnitude_percent < 10);
}

#[test]
fn rgba_frames_match_rgb_frames() {
    let rgb = three_dot_frame(320, 240, (60.0, 60.0), (120.0, 120.0), (180.0, 180.0), 8.0);
    let rgba = to_rgba(&rgb);
    let detector = MarkerDetector::default();
    assert_eq!(detector.detect(&rgb.view()), detector.detect(&rgba.view()));
}

#[test]
fn diagonal_arrangement_is_valid() {
    let img = three_dot_frame(420, 420, (100.0, 100.0), (210.0, 210.0), (320.0, 320.0), 9.0);
    let markers = MarkerDetector::default().detect(&img.view());
    assert!(validate_markers(&markers, &ToleranceConfig::default()).is_valid());

    // facing up-left; a target further up-left needs almost no turn
    let heading = compute_heading(&markers, Point2::new(20.0, 20.0)).expect("heading");
    assert!(heading.rotation_degrees.abs() < 1.0);
}

#[test]
fn bent_arrangement_is_not_collinear() {
    let img = three_dot_frame(400, 300, (300.0, 150.0), (200.0, 230.0), (100.0, 150.0), 10.0);
    let markers = MarkerDetector::default().detect(&img.view());
    assert_eq!(
        validate_markers(&markers, &ToleranceConfig::default()),
        ValidationResult::Invalid(InvalidReason::NotCollinear)
    );
}

#[test]
fn off_center_pink_fails_intervals() {
    let img = three_dot_frame(600, 300, (40.0, 150.0), (170.0, 150.0), (560.0, 150.0), 10.0);
    let markers = MarkerDetector::default().detect(&img.view());
    assert_eq!(
        validate_markers(&markers, &ToleranceConfig::default()),
        ValidationResult::Invalid(InvalidReason::UnequalIntervals)
    );
}

#[test]
fn missing_green_short_circuits() {
    let mut img = RgbImage::filled(400, 300, BACKGROUND);
    paint_dot(&mut img, 300.0, 150.0, 10.0, RED);
    paint_dot(&mut img, 200.0, 150.0, 10.0, PINK);
    let markers = MarkerDetector::default().detect(&img.view());
    assert!(markers.green.is_none());
    assert_eq!(
        validate_markers(&markers, &ToleranceConfig::default()),
        ValidationResult::Invalid(InvalidReason::InsufficientMarkers)
    );
}

#[test]
fn small_red_decoy_loses_to_marker() {
    let mut img = three_dot_frame(600, 300, (450.0, 150.0), (300.0, 150.0), (150.0, 150.0), 10.0);
    // scanned first, but smaller
    paint_dot(&mut img, 560.0, 20.0, 4.0, RED);
    let markers = MarkerDetector::default().detect(&img.view());
    let red = markers.red.expect("red");
    assert_abs_diff_eq!(red.x, 450.0, epsilon = 0.5);
    assert_abs_diff_eq!(red.y, 150.0, epsilon = 0.5);
}

#[test]
fn config_drives_detector() {
    let img = three_dot_frame(500, 300, (400.0, 150.0), (250.0, 150.0), (100.0, 150.0), 10.0);
    let cfg = TridotConfig {
        stride: 1,
        ..TridotConfig::default()
    };
    let markers = cfg.build_detector().detect(&img.view());
    assert!(validate_markers(&markers, &cfg.tolerances).is_valid());
    let pink = markers.pink.expect("pink");
    assert_abs_diff_eq!(pink.x, 250.0, epsilon = 1e-3);
    assert_abs_diff_eq!(pink.y, 150.0, epsilon = 1e-3);
}
