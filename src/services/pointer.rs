/// Window Interaction Service
/// Translates pointer gestures (drag on a title bar, resize on a handle)
/// into registry updates. One shared pointer device drives everything, so
/// at most one gesture is active at a time.

use crate::models::{Position, Size};
use crate::services::windows::WindowManager;

/// The active gesture, if any. Both moving states remember where the
/// gesture started; every move applies the absolute delta from that start,
/// so coalesced or dropped move events cannot accumulate error.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gesture {
    Idle,
    Dragging {
        id: u64,
        start_pointer: Position,
        start_window: Position,
    },
    Resizing {
        id: u64,
        start_pointer: Position,
        start_size: Size,
    },
}

pub struct PointerController {
    gesture: Gesture,
}

impl PointerController {
    pub fn new() -> Self {
        Self {
            gesture: Gesture::Idle,
        }
    }

    pub fn gesture(&self) -> Gesture {
        self.gesture
    }

    pub fn is_active(&self) -> bool {
        self.gesture != Gesture::Idle
    }

    /// Pointer-down on a window's title bar. Maximized windows accept no
    /// drag; unknown ids leave the controller idle. Starting a drag
    /// focuses the window.
    pub fn begin_drag(&mut self, windows: &mut WindowManager, id: u64, pointer: Position) {
        let Some(window) = windows.get(id) else {
            return;
        };
        if window.maximized {
            return;
        }
        self.gesture = Gesture::Dragging {
            id,
            start_pointer: pointer,
            start_window: window.position,
        };
        windows.focus(id);
    }

    /// Pointer-down on a window's resize handle. Focuses the window the
    /// same way a drag does (any interaction focuses).
    pub fn begin_resize(&mut self, windows: &mut WindowManager, id: u64, pointer: Position) {
        let Some(window) = windows.get(id) else {
            return;
        };
        if window.maximized {
            return;
        }
        self.gesture = Gesture::Resizing {
            id,
            start_pointer: pointer,
            start_size: window.size,
        };
        windows.focus(id);
    }

    /// Pointer moved. Applies the delta from gesture start to the start
    /// geometry. If the window was closed mid-gesture the registry treats
    /// the update as a no-op.
    pub fn pointer_move(&mut self, windows: &mut WindowManager, pointer: Position) {
        match self.gesture {
            Gesture::Idle => {}
            Gesture::Dragging {
                id,
                start_pointer,
                start_window,
            } => {
                let (dx, dy) = pointer.delta_from(start_pointer);
                windows.update_position(id, start_window.offset(dx, dy));
            }
            Gesture::Resizing {
                id,
                start_pointer,
                start_size,
            } => {
                let (dx, dy) = pointer.delta_from(start_pointer);
                // registry clamps to the minimum size
                windows.update_size(id, start_size.grown(dx, dy));
            }
        }
    }

    /// Pointer released: the gesture ends where it is, no rollback
    pub fn pointer_up(&mut self) {
        self.gesture = Gesture::Idle;
    }
}

impl Default for PointerController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AppKind;

    fn setup() -> (WindowManager, PointerController, u64) {
        let mut wm = WindowManager::new();
        let id = wm.open(AppKind::Notes, "Notes");
        (wm, PointerController::new(), id)
    }

    #[test]
    fn drag_applies_absolute_delta_from_start() {
        let (mut wm, mut pc, id) = setup();
        // window opens at (100,100); pointer-down at (150,150)
        pc.begin_drag(&mut wm, id, Position::new(150.0, 150.0));
        pc.pointer_move(&mut wm, Position::new(200.0, 170.0));
        assert_eq!(wm.get(id).unwrap().position, Position::new(150.0, 120.0));
        pc.pointer_up();
        assert_eq!(pc.gesture(), Gesture::Idle);
    }

    #[test]
    fn drag_is_idempotent_under_repeated_moves() {
        let (mut wm, mut pc, id) = setup();
        pc.begin_drag(&mut wm, id, Position::new(0.0, 0.0));
        pc.pointer_move(&mut wm, Position::new(40.0, 40.0));
        pc.pointer_move(&mut wm, Position::new(40.0, 40.0));
        assert_eq!(wm.get(id).unwrap().position, Position::new(140.0, 140.0));
    }

    #[test]
    fn drag_focuses_the_window() {
        let mut wm = WindowManager::new();
        let notes = wm.open(AppKind::Notes, "Notes");
        let term = wm.open(AppKind::Terminal, "Terminal");
        assert!(wm.get(term).unwrap().z_index > wm.get(notes).unwrap().z_index);

        let mut pc = PointerController::new();
        pc.begin_drag(&mut wm, notes, Position::new(110.0, 110.0));
        assert!(wm.get(notes).unwrap().z_index > wm.get(term).unwrap().z_index);
    }

    #[test]
    fn resize_focuses_too() {
        let mut wm = WindowManager::new();
        let notes = wm.open(AppKind::Notes, "Notes");
        let term = wm.open(AppKind::Terminal, "Terminal");

        let mut pc = PointerController::new();
        pc.begin_resize(&mut wm, notes, Position::new(0.0, 0.0));
        assert!(wm.get(notes).unwrap().z_index > wm.get(term).unwrap().z_index);
    }

    #[test]
    fn resize_grows_from_start_size_and_clamps() {
        let (mut wm, mut pc, id) = setup();
        pc.begin_resize(&mut wm, id, Position::new(900.0, 700.0));
        pc.pointer_move(&mut wm, Position::new(950.0, 720.0));
        assert_eq!(wm.get(id).unwrap().size, Size::new(850.0, 620.0));

        // shrinking far past the minimum clamps instead
        pc.pointer_move(&mut wm, Position::new(0.0, 0.0));
        let size = wm.get(id).unwrap().size;
        assert_eq!(size, Size::new(crate::models::MIN_WIDTH, crate::models::MIN_HEIGHT));
    }

    #[test]
    fn maximized_window_ignores_gesture_start() {
        let (mut wm, mut pc, id) = setup();
        wm.maximize(id);
        pc.begin_drag(&mut wm, id, Position::new(0.0, 0.0));
        assert_eq!(pc.gesture(), Gesture::Idle);
        pc.begin_resize(&mut wm, id, Position::new(0.0, 0.0));
        assert_eq!(pc.gesture(), Gesture::Idle);
    }

    #[test]
    fn unknown_window_leaves_controller_idle() {
        let mut wm = WindowManager::new();
        let mut pc = PointerController::new();
        pc.begin_drag(&mut wm, 99, Position::new(0.0, 0.0));
        assert!(!pc.is_active());
    }

    #[test]
    fn window_closed_mid_gesture_degrades_to_no_ops() {
        let (mut wm, mut pc, id) = setup();
        pc.begin_drag(&mut wm, id, Position::new(0.0, 0.0));
        wm.close(id);
        pc.pointer_move(&mut wm, Position::new(50.0, 50.0));
        assert!(wm.windows().is_empty());
        pc.pointer_up();
        assert_eq!(pc.gesture(), Gesture::Idle);
    }

    #[test]
    fn gestures_are_mutually_exclusive() {
        let (mut wm, mut pc, id) = setup();
        pc.begin_drag(&mut wm, id, Position::new(0.0, 0.0));
        assert!(matches!(pc.gesture(), Gesture::Dragging { .. }));
        // a new pointer-down replaces the previous gesture outright
        pc.begin_resize(&mut wm, id, Position::new(0.0, 0.0));
        assert!(matches!(pc.gesture(), Gesture::Resizing { .. }));
    }
}
