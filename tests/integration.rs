// SPDX-License-Identifier: MPL-2.0
//! End-to-end tests driving a viewing session the way the window does.

use image_rs::{ImageBuffer, Rgba};
use marklens::config::{self, Config};
use marklens::interaction::{CursorIcon, Mode};
use marklens::markers::{
    ArrowMarker, LabelFonts, Marker, MarkerColor, MarkerGeometry, MarkerId, MarkerShape,
    VisibilityRange,
};
use marklens::media::{ImageAdjustments, RedrawStatus};
use marklens::session::ViewerSession;
use std::cell::Cell;
use std::path::Path;
use std::rc::Rc;
use tiny_skia::Point;

fn write_png(dir: &Path, width: u32, height: u32) -> std::path::PathBuf {
    let path = dir.join("frame.png");
    ImageBuffer::from_pixel(width, height, Rgba([0u8, 0, 0, 255]))
        .save(&path)
        .expect("write png");
    path
}

fn loaded_session(dir: &Path) -> ViewerSession {
    let mut session = ViewerSession::new(&Config::default(), LabelFonts::empty());
    assert!(session.load_image(&write_png(dir, 400, 300)));
    session
}

/// Device position of the center of a marker's label.
fn label_center(session: &ViewerSession, id: MarkerId) -> Point {
    let marker = session.markers().get(id).expect("marker");
    let area = marker.label_area(session.pipeline().label_metrics());
    session.pipeline().to_device(area.center())
}

fn enter_resize(session: &mut ViewerSession, id: MarkerId) {
    let label = label_center(session, id);
    session.pointer_moved(label);
    assert_eq!(session.selected(), Some(id));
    session.pointer_clicked(label, 2);
    assert_eq!(session.mode(), Mode::Resize);
}

#[test]
fn added_marker_is_drawn_into_the_composite() {
    let dir = tempfile::tempdir().expect("temp dir");
    let mut session = loaded_session(dir.path());
    let frames = Rc::new(Cell::new(0));
    let seen = Rc::clone(&frames);
    session.subscribe(move |_frame| seen.set(seen.get() + 1));

    assert_eq!(session.redraw(), RedrawStatus::Full);
    session.add_marker();
    assert_eq!(session.redraw(), RedrawStatus::MarkersOnly);
    assert_eq!(frames.get(), 2);

    // Left edge of the default 100x100 box centered on (200, 150).
    let frame = session.frame().expect("frame");
    let pixel = frame.raster.pixel(150, 150).expect("in bounds");
    assert!(pixel.red() > 200);
    assert_eq!(pixel.green(), 0);
    // Hidden at other time indices.
    session.set_time_index(1);
    session.redraw();
    let frame = session.frame().expect("frame");
    assert_eq!(frame.raster.pixel(150, 150).expect("in bounds").red(), 0);
}

#[test]
fn double_click_then_corner_drag_resizes_the_box() {
    let dir = tempfile::tempdir().expect("temp dir");
    let mut session = loaded_session(dir.path());
    let id = session.add_marker();
    session.redraw();
    enter_resize(&mut session, id);

    let corner = session.pipeline().to_device(Point::from_xy(250.0, 200.0));
    session.pointer_moved(corner);
    assert_eq!(session.mode(), Mode::Resize);
    assert!(!session.pointer_pressed());

    let target = session.pipeline().to_device(Point::from_xy(270.0, 230.0));
    assert!(session.pointer_dragged(target).expect("valid resize"));
    match &session.markers().get(id).expect("marker").geometry {
        MarkerGeometry::Shape(shape) => {
            assert_eq!((shape.width(), shape.height()), (120.0, 130.0));
            assert_eq!(shape.center(), Point::from_xy(210.0, 165.0));
        }
        MarkerGeometry::Arrow(_) => panic!("box expected"),
    }
}

#[test]
fn rotate_handle_turns_the_box() {
    let dir = tempfile::tempdir().expect("temp dir");
    let mut session = loaded_session(dir.path());
    let id = session.add_marker();
    session.redraw();
    enter_resize(&mut session, id);

    let handle = session
        .markers()
        .get(id)
        .and_then(Marker::rotate_point)
        .expect("boxes rotate");
    session.pointer_moved(session.pipeline().to_device(handle));
    assert_eq!(session.mode(), Mode::Rotate);

    let target = Point::from_xy(handle.x + 50.0, handle.y);
    assert!(session
        .pointer_dragged(session.pipeline().to_device(target))
        .expect("rotate"));
    match &session.markers().get(id).expect("marker").geometry {
        MarkerGeometry::Shape(shape) => assert!((shape.rotation().degrees() - 1.5).abs() < 1e-3),
        MarkerGeometry::Arrow(_) => panic!("box expected"),
    }
}

#[test]
fn arrow_tip_follows_the_pointer() {
    let dir = tempfile::tempdir().expect("temp dir");
    let mut session = loaded_session(dir.path());
    let arrow = ArrowMarker::new(Point::from_xy(100.0, 200.0), Point::from_xy(300.0, 250.0));
    let id = session.insert_marker(Marker::new(
        "arrow",
        MarkerColor::RED,
        VisibilityRange::single(0),
        MarkerGeometry::Arrow(arrow),
    ));
    enter_resize(&mut session, id);

    session.pointer_moved(session.pipeline().to_device(Point::from_xy(300.0, 250.0)));
    let target = Point::from_xy(320.0, 260.0);
    assert!(session
        .pointer_dragged(session.pipeline().to_device(target))
        .expect("arrow drag"));
    let marker = session.markers().get(id).expect("marker");
    assert_eq!(marker.geometry.scale_points()[0], Point::from_xy(100.0, 200.0));
    let tip = marker.geometry.scale_points()[1];
    assert!((tip.x - 320.0).abs() < 1e-3 && (tip.y - 260.0).abs() < 1e-3);
}

#[test]
fn move_follows_pointer_in_a_mirrored_rotated_view() {
    let dir = tempfile::tempdir().expect("temp dir");
    let mut session = loaded_session(dir.path());
    session.set_adjustments(ImageAdjustments {
        mirror_x: true,
        rotation: 90.0,
        ..ImageAdjustments::default()
    });
    let id = session.add_marker();
    session.redraw();

    let label = label_center(&session, id);
    session.pointer_moved(label);
    assert_eq!(session.cursor(), CursorIcon::Hand);
    assert!(session.pointer_pressed());
    assert_eq!(session.cursor(), CursorIcon::Move);

    let device = Point::from_xy(120.0, 90.0);
    assert!(session.pointer_dragged(device).expect("move"));
    let anchor = session
        .markers()
        .get(id)
        .expect("marker")
        .geometry
        .label_anchor();
    let expected = session.pipeline().to_marker_space(device);
    assert!((anchor.x - expected.x).abs() < 1e-2 && (anchor.y - expected.y).abs() < 1e-2);

    session.pointer_released();
    assert_eq!(session.mode(), Mode::None);
    assert_eq!(session.cursor(), CursorIcon::Hand);
}

#[test]
fn configured_marker_defaults_reach_new_markers() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("settings.toml");
    std::fs::write(
        &path,
        "[markers]\ndefault_color = \"#00ff00\"\ndefault_width = 40.0\ndefault_height = 20.0\n",
    )
    .expect("write config");
    let config = config::load_from_path(&path).expect("config");

    let mut session = ViewerSession::new(&config, LabelFonts::empty());
    assert!(session.load_image(&write_png(dir.path(), 100, 100)));
    let id = session.add_marker();
    let marker = session.markers().get(id).expect("marker");
    assert_eq!(marker.color, MarkerColor::from_hex("#00ff00").expect("hex"));
    match &marker.geometry {
        MarkerGeometry::Shape(shape) => assert_eq!((shape.width(), shape.height()), (40.0, 20.0)),
        MarkerGeometry::Arrow(_) => panic!("box expected"),
    }
}
