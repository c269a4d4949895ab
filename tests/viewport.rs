//! Viewport transform tests
//!
//! Per-axis fit/crop layout, zoom modes, wheel zoom bounds and panning.

mod common;

use common::{assert_close, viewport};
use lumen::geometry::{Point, Rect, Size};
use lumen::viewport::{ViewportState, ZoomMode};

// ========================================================================
// Recompute layout
// ========================================================================

#[test]
fn test_fitting_image_is_centered_at_native_size() {
    let vp = viewport((800.0, 600.0), (400.0, 300.0), ZoomMode::AutoZoom);
    assert_eq!(vp.zoom, 1.0);
    assert_eq!(vp.dest, Rect::new(200.0, 150.0, 400.0, 300.0));
    assert_eq!(vp.src, Rect::new(0.0, 0.0, 400.0, 300.0));
}

#[test]
fn test_scale_to_fit_exact_fit_shows_whole_image() {
    let vp = viewport((800.0, 600.0), (4000.0, 3000.0), ZoomMode::ScaleToFit);
    assert_close(vp.zoom, 0.2);
    assert!((vp.src.width - 4000.0).abs() < 1e-6);
    assert!((vp.src.height - 3000.0).abs() < 1e-6);
    assert_close(vp.src.x, 0.0);
    assert_close(vp.src.y, 0.0);
    assert!((vp.dest.width - 800.0).abs() < 1e-6);
    assert!((vp.dest.height - 600.0).abs() < 1e-6);
}

#[test]
fn test_axes_are_laid_out_independently() {
    // Wide image: fits vertically, cropped horizontally
    let mut vp = viewport((200.0, 200.0), (1000.0, 100.0), ZoomMode::LockZoom);
    vp.recompute();

    assert_eq!(vp.src.y, 0.0);
    assert_eq!(vp.src.height, 100.0);
    assert_eq!(vp.dest.y, 50.0);
    assert_eq!(vp.dest.height, 100.0);

    assert_eq!(vp.src.width, 200.0);
    assert_eq!(vp.dest.x, 0.0);
    assert_eq!(vp.dest.width, 200.0);
}

#[test]
fn test_layout_branch_holds_across_zooms_and_clients() {
    let clients = [(320.0, 240.0), (800.0, 600.0), (1920.0, 1080.0), (1.0, 1.0)];
    let zooms = [0.01, 0.05, 0.3, 1.0, 2.5, 17.0, 100.0];
    let image = Size::new(640.0, 480.0);

    for (cw, ch) in clients {
        for zoom in zooms {
            let mut vp = ViewportState::new(0.01, 100.0, 0.0, ZoomMode::LockZoom);
            vp.set_client_size(Size::new(cw, ch));
            vp.reset_for_image(image);
            vp.zoom = zoom;
            vp.recompute();

            for (client, img, src_pos, src_len, dest_pos, dest_len) in [
                (cw, image.width, vp.src.x, vp.src.width, vp.dest.x, vp.dest.width),
                (ch, image.height, vp.src.y, vp.src.height, vp.dest.y, vp.dest.height),
            ] {
                let scaled = img * zoom;
                if client > scaled {
                    assert_eq!(src_pos, 0.0);
                    assert_eq!(src_len, img);
                    assert!((dest_pos - (client - scaled) / 2.0).abs() < 1e-9);
                    assert!((dest_len - scaled).abs() < 1e-9);
                } else {
                    assert!((src_len - client / zoom).abs() < 1e-9, "zoom {zoom}");
                    assert_eq!(dest_pos, 0.0);
                    assert_eq!(dest_len, client);
                }
                assert!(src_pos >= 0.0 && src_pos + src_len <= img + 1e-9);
            }
        }
    }
}

#[test]
fn test_recompute_only_when_dirty() {
    let mut vp = viewport((100.0, 100.0), (50.0, 50.0), ZoomMode::AutoZoom);
    assert!(!vp.is_dirty());
    assert!(!vp.recompute_if_dirty());

    vp.set_client_size(Size::new(120.0, 100.0));
    assert!(vp.is_dirty());
    assert!(vp.recompute_if_dirty());
    assert_eq!(vp.dest.x, 35.0);
}

#[test]
fn test_recompute_records_old_zoom() {
    let mut vp = viewport((100.0, 100.0), (1000.0, 1000.0), ZoomMode::LockZoom);
    vp.zoom = 3.0;
    vp.recompute();
    assert_eq!(vp.old_zoom, 3.0);
}

// ========================================================================
// Zoom modes
// ========================================================================

#[test]
fn test_zoom_modes_derive_factor() {
    let client = (800.0, 400.0);
    let image = (1600.0, 400.0);
    let cases = [
        (ZoomMode::AutoZoom, 0.5),
        (ZoomMode::ScaleToWidth, 0.5),
        (ZoomMode::ScaleToHeight, 1.0),
        (ZoomMode::ScaleToFit, 0.5),
        (ZoomMode::ScaleToFill, 1.0),
    ];
    for (mode, expected) in cases {
        let vp = viewport(client, image, mode);
        assert_close(vp.zoom, expected);
        assert!(!vp.manual_zoom);
    }
}

#[test]
fn test_padding_shrinks_available_area() {
    let mut vp = ViewportState::new(0.01, 100.0, 100.0, ZoomMode::ScaleToFit);
    vp.set_client_size(Size::new(500.0, 500.0));
    vp.reset_for_image(Size::new(800.0, 800.0));
    assert_close(vp.zoom, 0.5);
}

#[test]
fn test_lock_zoom_keeps_manual_factor() {
    let mut vp = viewport((100.0, 100.0), (1000.0, 1000.0), ZoomMode::ScaleToFit);
    vp.zoom = 3.0;
    vp.update_zoom_mode(ZoomMode::LockZoom);
    assert_eq!(vp.zoom, 3.0);
    assert!(!vp.manual_zoom);
    assert!(vp.is_dirty());
}

#[test]
fn test_client_smaller_than_padding_falls_back_to_min_zoom() {
    let mut vp = ViewportState::new(0.05, 100.0, 50.0, ZoomMode::ScaleToFit);
    vp.set_client_size(Size::new(20.0, 20.0));
    vp.reset_for_image(Size::new(100.0, 100.0));
    assert_eq!(vp.zoom, 0.05);
}

// ========================================================================
// Wheel zoom
// ========================================================================

#[test]
fn test_zoom_to_point_rejected_beyond_bounds() {
    let mut vp = viewport((100.0, 100.0), (1000.0, 1000.0), ZoomMode::LockZoom);

    vp.zoom = 101.0;
    let before = vp.clone();
    assert!(!vp.zoom_to_point(120.0, Point::new(10.0, 10.0)));
    assert_eq!(vp, before);

    vp.zoom = 0.005;
    let before = vp.clone();
    assert!(!vp.zoom_to_point(-120.0, Point::new(10.0, 10.0)));
    assert_eq!(vp, before);
}

#[test]
fn test_zoom_step_crossing_bound_still_lands() {
    let mut vp = viewport((100.0, 100.0), (1000.0, 1000.0), ZoomMode::LockZoom);
    vp.zoom = 99.0;

    assert!(vp.zoom_to_point(120.0, Point::new(50.0, 50.0)));
    assert!(vp.zoom > vp.max_zoom);
    assert!(!vp.zoom_to_point(120.0, Point::new(50.0, 50.0)));
}

#[test]
fn test_zoom_in_then_out_restores_factor() {
    let mut vp = viewport((400.0, 300.0), (2000.0, 1500.0), ZoomMode::AutoZoom);
    let original = vp.zoom;
    let anchor = Point::new(120.0, 80.0);

    for _ in 0..5 {
        vp.zoom_to_point(120.0, anchor);
        vp.recompute();
    }
    for _ in 0..5 {
        vp.zoom_to_point(-120.0, anchor);
        vp.recompute();
    }
    assert!((vp.zoom - original).abs() < 1e-9);
}

#[test]
fn test_zoom_keeps_anchor_pixel_in_place() {
    let mut vp = viewport((200.0, 200.0), (1000.0, 1000.0), ZoomMode::LockZoom);
    vp.src.x = 400.0;
    vp.src.y = 400.0;
    let anchor = Point::new(50.0, 150.0);
    let before = vp.screen_to_image(anchor);

    assert!(vp.zoom_to_point(120.0, anchor));
    vp.recompute();
    let after = vp.screen_to_image(anchor);

    assert!((before.x - after.x).abs() < 0.01, "{:?} vs {:?}", before, after);
    assert!((before.y - after.y).abs() < 0.01, "{:?} vs {:?}", before, after);
}

#[test]
fn test_zoom_marks_manual_and_dirty() {
    let mut vp = viewport((100.0, 100.0), (1000.0, 1000.0), ZoomMode::ScaleToFit);
    let anchor = Point::new(30.0, 40.0);
    assert!(vp.zoom_to_point(60.0, anchor));
    assert!(vp.manual_zoom);
    assert!(vp.is_dirty());
    assert_eq!(vp.draw_point, anchor);
}

#[test]
fn test_zero_delta_is_noop() {
    let mut vp = viewport((100.0, 100.0), (1000.0, 1000.0), ZoomMode::ScaleToFit);
    let before = vp.clone();
    assert!(!vp.zoom_to_point(0.0, Point::new(1.0, 1.0)));
    assert_eq!(vp, before);
}

#[test]
fn test_set_zoom_clamps() {
    let mut vp = viewport((100.0, 100.0), (1000.0, 1000.0), ZoomMode::ScaleToFit);
    assert!(vp.set_zoom(500.0));
    assert_eq!(vp.zoom, 100.0);
    assert!(vp.set_zoom(0.0));
    assert_eq!(vp.zoom, 0.01);
    assert!(!vp.set_zoom(f64::NAN));
}

// ========================================================================
// Panning
// ========================================================================

#[test]
fn test_pan_without_image_is_noop() {
    let mut vp = ViewportState::new(0.01, 100.0, 0.0, ZoomMode::AutoZoom);
    vp.set_client_size(Size::new(100.0, 100.0));
    assert!(!vp.pan_to(10.0, 10.0));
}

#[test]
fn test_zero_pan_keeps_source_rect() {
    let mut vp = viewport((100.0, 100.0), (1000.0, 1000.0), ZoomMode::LockZoom);
    vp.pan_to(300.0, 200.0);
    let src = vp.src;
    assert!(vp.pan_to(0.0, 0.0));
    assert_eq!(vp.src, src);
}

#[test]
fn test_pan_divides_by_zoom() {
    let mut vp = viewport((100.0, 100.0), (1000.0, 1000.0), ZoomMode::LockZoom);
    vp.zoom = 2.0;
    vp.recompute();
    let x0 = vp.src.x;
    vp.pan_to(40.0, 0.0);
    assert_close(vp.src.x, x0 + 20.0);
}

#[test]
fn test_pan_clamps_to_image_and_flags_axis() {
    let mut vp = viewport((100.0, 100.0), (1000.0, 1000.0), ZoomMode::LockZoom);
    vp.pan_to(-50.0, 0.0);
    assert_eq!(vp.src.x, 0.0);
    assert_eq!(vp.out_of_bounds(), (true, false));

    vp.pan_to(5000.0, 5000.0);
    assert_eq!(vp.src.x, 900.0);
    assert_eq!(vp.src.y, 900.0);
    assert_eq!(vp.out_of_bounds(), (true, true));
}

#[test]
fn test_drag_freezes_reference_on_clamped_axis() {
    let mut vp = viewport((100.0, 100.0), (1000.0, 1000.0), ZoomMode::LockZoom);
    vp.pan_to(200.0, 200.0);

    vp.begin_pan(Point::new(50.0, 50.0));
    // Dragging right moves the crop left; x hits zero, y stays in range
    assert!(vp.drag_to(Point::new(400.0, 40.0)));
    assert_eq!(vp.src.x, 0.0);
    assert_eq!(vp.pan_reference(), Point::new(50.0, 40.0));
}

#[test]
fn test_pan_speed_is_carried() {
    let mut vp = viewport((100.0, 100.0), (1000.0, 1000.0), ZoomMode::LockZoom);
    vp.pan_to(100.0, 100.0);
    vp.pan_speed = Point::new(3.0, 0.0);
    let x0 = vp.src.x;
    vp.pan_to(0.0, 0.0);
    assert_close(vp.src.x, x0 + 3.0);

    vp.begin_pan(Point::ZERO);
    assert_eq!(vp.pan_speed, Point::ZERO);
}

#[test]
fn test_screen_to_image_accounts_for_centering() {
    let vp = viewport((800.0, 600.0), (400.0, 300.0), ZoomMode::AutoZoom);
    let p = vp.screen_to_image(Point::new(200.0, 150.0));
    assert_eq!(p, Point::ZERO);
    let p = vp.screen_to_image(Point::new(400.0, 300.0));
    assert_eq!(p, Point::new(200.0, 150.0));
}
