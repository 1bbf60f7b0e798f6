use homeboard::board::drag::{DragController, DragKind, DragUpdate};
use homeboard::board::layout::{Point, Size, WorkingLayout};

#[test]
fn documented_drag_example_clamps_to_the_top_edge() {
    // Widget at (50,50); press the handle at (100,100), move to (80,40).
    let mut drag = DragController::default();
    drag.begin_move("weather", Point::new(100.0, 100.0), Point::new(50.0, 50.0));
    let update = drag
        .pointer_moved(Point::new(80.0, 40.0), Point::new(50.0, 50.0))
        .expect("session is active");
    assert_eq!(
        update,
        DragUpdate::Move {
            id: "weather".into(),
            position: Point::new(30.0, 0.0),
        }
    );
}

#[test]
fn drag_updates_flow_into_the_layout_store() {
    let mut layout = WorkingLayout::with_defaults();
    let mut drag = DragController::default();
    let start = layout.get("forex").expect("forex entry").position;

    drag.begin_move(
        "forex",
        Point::new(start.x + 10.0, start.y + 10.0),
        start,
    );
    for step in 1..=5 {
        let pointer = Point::new(
            start.x + 10.0 + step as f32 * 20.0,
            start.y + 10.0 - step as f32 * 60.0,
        );
        if let Some(DragUpdate::Move { id, position }) = drag.pointer_moved(pointer, start) {
            layout.update_position(&id, position);
        }
    }
    drag.release();

    let entry = layout.get("forex").expect("forex entry");
    assert_eq!(entry.position.x, start.x + 100.0);
    assert_eq!(entry.position.y, 0.0);
    assert!(drag.is_idle());
}

#[test]
fn resize_is_computed_from_the_top_left_corner() {
    let mut drag = DragController::default();
    drag.begin_resize("monitor");
    assert_eq!(drag.kind(), Some(DragKind::Resize));

    let update = drag
        .pointer_moved(Point::new(460.0, 540.0), Point::new(100.0, 120.0))
        .expect("session is active");
    assert_eq!(
        update,
        DragUpdate::Resize {
            id: "monitor".into(),
            size: Size::new(360.0, 420.0),
        }
    );
}

#[test]
fn only_one_session_is_tracked_at_a_time() {
    let mut drag = DragController::default();
    drag.begin_move("weather", Point::new(0.0, 0.0), Point::new(0.0, 0.0));
    drag.begin_move("forex", Point::new(9.0, 9.0), Point::new(0.0, 0.0));
    drag.begin_resize("monitor");
    assert_eq!(drag.active_widget(), Some("weather"));

    drag.release();
    drag.begin_resize("monitor");
    assert_eq!(drag.active_widget(), Some("monitor"));
}
