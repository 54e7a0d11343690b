use approx::assert_relative_eq;

use seedplate_core::error::SeedplateError;
use seedplate_core::geometry::DisplayRect;
use seedplate_core::roi::TargetSize;
use seedplate_core::viewport::{DragGesture, ViewportMapper};

fn plate_mapper() -> ViewportMapper {
    ViewportMapper::new(6000, 2000, TargetSize::new(5676, 1892), 800.0, 600.0).unwrap()
}

#[test]
fn test_scale_in_unit_interval() {
    let cases = [
        (6000u32, 2000u32, 800.0f32, 600.0f32),
        (100, 100, 800.0, 600.0),
        (2000, 1000, 1000.0, 1000.0),
        (1, 1, 1.0, 1.0),
        (4096, 4096, 400.0, 300.0),
    ];
    for (sw, sh, vw, vh) in cases {
        let scale = ViewportMapper::compute_scale(sw, sh, vw, vh);
        assert!(scale > 0.0 && scale <= 1.0, "scale {scale} out of range");

        let fits = sw as f32 <= vw && sh as f32 <= vh;
        assert_eq!(scale == 1.0, fits, "{sw}x{sh} in {vw}x{vh}");
    }
}

#[test]
fn test_scale_scenario_plate() {
    let scale = ViewportMapper::compute_scale(6000, 2000, 800.0, 600.0);
    assert_relative_eq!(scale, 800.0 / 6000.0, epsilon = 1e-6);

    // Initial ROI display size for the 5676x1892 target at this scale.
    let mapper = plate_mapper();
    let roi = mapper.place_initial_roi();
    assert_eq!((roi.x, roi.y), (0.0, 0.0));
    assert!((roi.width - 756.8).abs() < 0.5);
    assert!((roi.height - 252.3).abs() < 0.5);
}

#[test]
fn test_zero_viewport_falls_back() {
    // Unsized viewport uses the 400x300 fallback instead of dividing by zero.
    let scale = ViewportMapper::compute_scale(1000, 1000, 0.0, 0.0);
    assert_relative_eq!(scale, 0.3, epsilon = 1e-6);
}

#[test]
fn test_scale_floored_at_epsilon() {
    let scale = ViewportMapper::compute_scale(10_000_000, 10_000_000, 1.0, 1.0);
    assert_relative_eq!(scale, 1e-3, epsilon = 1e-9);
}

#[test]
fn test_never_upscales() {
    let scale = ViewportMapper::compute_scale(100, 50, 4000.0, 4000.0);
    assert_eq!(scale, 1.0);
}

#[test]
fn test_undersized_source_rejected() {
    // 5000x1800 cannot host a 5676x1892 target.
    let err = ViewportMapper::new(5000, 1800, TargetSize::new(5676, 1892), 800.0, 600.0)
        .unwrap_err();
    assert!(matches!(err, SeedplateError::SourceTooSmall { .. }));
}

#[test]
fn test_drag_clamps_arbitrary_deltas() {
    let mapper = plate_mapper();
    let boundary = mapper.boundary();
    let rect = mapper.place_initial_roi();

    for (dx, dy) in [
        (1e6f32, 1e6f32),
        (-1e6, -1e6),
        (3.0, -4.0),
        (0.0, 1e9),
        (-0.5, 0.5),
    ] {
        let moved = mapper.drag(&rect, dx, dy);
        assert!(moved.x >= boundary.x);
        assert!(moved.x <= boundary.right() - moved.width);
        assert!(moved.y >= boundary.y);
        assert!(moved.y <= boundary.bottom() - moved.height);
        assert_eq!(moved.width, rect.width);
        assert_eq!(moved.height, rect.height);
    }
}

#[test]
fn test_drag_start_outside_rect_rejected() {
    let mapper = plate_mapper();
    let rect = mapper.place_initial_roi();

    assert!(DragGesture::begin(rect.right() + 10.0, rect.y, &rect).is_none());
    assert!(DragGesture::begin(rect.x, rect.bottom() + 10.0, &rect).is_none());

    let gesture = DragGesture::begin(rect.x + 5.0, rect.y + 5.0, &rect).unwrap();
    let moved = gesture.update(1e6, 1e6, &rect, &mapper);
    let boundary = mapper.boundary();
    assert!(moved.x <= boundary.right() - moved.width);
    assert!(moved.y <= boundary.bottom() - moved.height);
}

#[test]
fn test_source_round_trip_exact() {
    let mapper = plate_mapper();
    let target = TargetSize::new(5676, 1892);

    for (x, y) in [(0u32, 0u32), (137, 55), (324, 108), (100, 200)] {
        let roi = target.roi_at(x, y);
        let display = mapper.from_source(&roi);
        let round_tripped = mapper.to_source(&display);
        assert_eq!(round_tripped, roi);
    }
}

#[test]
fn test_to_source_clamped_to_image() {
    let mapper = plate_mapper();
    // A display rect pushed far past the boundary still resolves to an ROI
    // inside the source image.
    let rect = DisplayRect::new(1e5, 1e5, 756.8, 252.3);
    let roi = mapper.to_source(&rect);
    assert_eq!(roi.x, 6000 - 5676);
    assert_eq!(roi.y, 2000 - 1892);
}
