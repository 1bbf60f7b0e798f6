use crate::board::layout::{clamp_position, clamp_size, Point, Size};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragKind {
    Move,
    Resize,
}

/// Transient pointer interaction. Exists only while the button is held and
/// is never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    pub widget_id: String,
    pub kind: DragKind,
    origin_offset: Point,
}

/// Update published to the layout store on each pointer move.
#[derive(Debug, Clone, PartialEq)]
pub enum DragUpdate {
    Move { id: String, position: Point },
    Resize { id: String, size: Size },
}

/// Pointer-interaction state machine: Idle, or one active move/resize
/// session. Pure math over pointer positions; values are clamped, never
/// rejected, and nothing here can fail.
#[derive(Debug, Default)]
pub struct DragController {
    session: Option<DragSession>,
}

impl DragController {
    pub fn is_idle(&self) -> bool {
        self.session.is_none()
    }

    pub fn active_widget(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.widget_id.as_str())
    }

    pub fn kind(&self) -> Option<DragKind> {
        self.session.as_ref().map(|s| s.kind)
    }

    /// Pointer-down on a drag handle. Captures the offset between the
    /// pointer and the widget's corner so the widget doesn't jump to the
    /// cursor. Ignored while another session is active: only one pointer is
    /// tracked.
    pub fn begin_move(&mut self, widget_id: &str, pointer: Point, widget_pos: Point) {
        if self.session.is_some() {
            return;
        }
        self.session = Some(DragSession {
            widget_id: widget_id.to_string(),
            kind: DragKind::Move,
            origin_offset: Point::new(pointer.x - widget_pos.x, pointer.y - widget_pos.y),
        });
    }

    /// Pointer-down on a resize corner. No offset is needed: the new size is
    /// computed straight from the pointer and the widget's top-left corner.
    pub fn begin_resize(&mut self, widget_id: &str) {
        if self.session.is_some() {
            return;
        }
        self.session = Some(DragSession {
            widget_id: widget_id.to_string(),
            kind: DragKind::Resize,
            origin_offset: Point::default(),
        });
    }

    pub fn pointer_moved(&self, pointer: Point, widget_top_left: Point) -> Option<DragUpdate> {
        let session = self.session.as_ref()?;
        match session.kind {
            DragKind::Move => Some(DragUpdate::Move {
                id: session.widget_id.clone(),
                position: clamp_position(Point::new(
                    pointer.x - session.origin_offset.x,
                    pointer.y - session.origin_offset.y,
                )),
            }),
            DragKind::Resize => Some(DragUpdate::Resize {
                id: session.widget_id.clone(),
                size: clamp_size(Size::new(
                    pointer.x - widget_top_left.x,
                    pointer.y - widget_top_left.y,
                )),
            }),
        }
    }

    /// Any pointer release ends the session, whatever state it was in.
    pub fn release(&mut self) {
        self.session = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::layout::{MIN_WIDGET_HEIGHT, MIN_WIDGET_WIDTH};

    #[test]
    fn move_applies_origin_offset_and_clamps() {
        let mut drag = DragController::default();
        drag.begin_move("weather", Point::new(100.0, 100.0), Point::new(50.0, 50.0));
        let update = drag
            .pointer_moved(Point::new(80.0, 40.0), Point::new(50.0, 50.0))
            .expect("active session");
        // Unclamped target is (30, -10); y clamps to zero.
        assert_eq!(
            update,
            DragUpdate::Move {
                id: "weather".into(),
                position: Point::new(30.0, 0.0),
            }
        );
    }

    #[test]
    fn resize_clamps_to_minimum_size() {
        let mut drag = DragController::default();
        drag.begin_resize("forex");
        let update = drag
            .pointer_moved(Point::new(110.0, 120.0), Point::new(100.0, 100.0))
            .expect("active session");
        assert_eq!(
            update,
            DragUpdate::Resize {
                id: "forex".into(),
                size: Size::new(MIN_WIDGET_WIDTH, MIN_WIDGET_HEIGHT),
            }
        );
    }

    #[test]
    fn second_press_does_not_steal_the_session() {
        let mut drag = DragController::default();
        drag.begin_move("weather", Point::new(0.0, 0.0), Point::new(0.0, 0.0));
        drag.begin_resize("forex");
        assert_eq!(drag.active_widget(), Some("weather"));
        assert_eq!(drag.kind(), Some(DragKind::Move));
    }

    #[test]
    fn release_returns_to_idle_from_any_state() {
        let mut drag = DragController::default();
        assert!(drag.is_idle());
        drag.release();
        assert!(drag.is_idle());

        drag.begin_resize("forex");
        assert!(!drag.is_idle());
        drag.release();
        assert!(drag.is_idle());
        assert!(drag
            .pointer_moved(Point::new(1.0, 1.0), Point::new(0.0, 0.0))
            .is_none());
    }
}
