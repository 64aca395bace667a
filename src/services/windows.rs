/// Window Registry Service
/// Single source of truth for the set of open windows and their z-order.
/// All mutation goes through this manager; every mutating call re-delivers
/// the full window list to subscribers (there is no partial-update channel).

use crate::models::{AppKind, Position, Size, Window};

/// Initial placement of the first window; each following window is
/// staggered by `STAGGER_STEP` so new windows do not perfectly overlap.
const INITIAL_POSITION: Position = Position { x: 100.0, y: 100.0 };
const STAGGER_STEP: f64 = 30.0;
const DEFAULT_SIZE: Size = Size {
    width: 800.0,
    height: 600.0,
};
/// First z-index handed out; the counter only ever increments
const INITIAL_Z_INDEX: u64 = 1000;

type WindowObserver = Box<dyn Fn(&[Window]) + Send + Sync>;

pub struct WindowManager {
    windows: Vec<Window>,
    next_window_id: u64,
    next_z_index: u64,
    observers: Vec<WindowObserver>,
}

impl WindowManager {
    pub fn new() -> Self {
        Self {
            windows: Vec::new(),
            next_window_id: 1,
            next_z_index: INITIAL_Z_INDEX,
            observers: Vec::new(),
        }
    }

    /// Register an observer for window list changes
    pub fn subscribe(&mut self, observer: impl Fn(&[Window]) + Send + Sync + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Current window list, in creation order
    pub fn windows(&self) -> &[Window] {
        &self.windows
    }

    pub fn get(&self, id: u64) -> Option<&Window> {
        self.windows.iter().find(|w| w.id == id)
    }

    /// Open an application window. Idempotent by kind: if a window for
    /// `kind` is already open it is focused instead of duplicated.
    /// Returns the id of the (new or existing) window.
    pub fn open(&mut self, kind: AppKind, title: impl Into<String>) -> u64 {
        if let Some(existing) = self.windows.iter().find(|w| w.app_kind == kind) {
            let id = existing.id;
            log::info!("[Windows] {:?} already open, focusing window {}", kind, id);
            self.focus(id);
            return id;
        }

        let id = self.next_window_id;
        self.next_window_id += 1;
        let stagger = self.windows.len() as f64 * STAGGER_STEP;
        let window = Window {
            id,
            title: title.into(),
            app_kind: kind,
            minimized: false,
            maximized: false,
            position: INITIAL_POSITION.offset(stagger, stagger),
            size: DEFAULT_SIZE,
            z_index: self.allocate_z_index(),
        };
        log::info!("[Windows] opened {:?} as window {}", kind, id);
        self.windows.push(window);
        self.notify();
        id
    }

    /// Remove a window. Unknown ids are a no-op; the UI may race a close
    /// against an in-flight drag.
    pub fn close(&mut self, id: u64) {
        self.windows.retain(|w| w.id != id);
        self.notify();
    }

    /// Hide the window without touching its z-index
    pub fn minimize(&mut self, id: u64) {
        if let Some(w) = self.windows.iter_mut().find(|w| w.id == id) {
            w.minimized = true;
        }
        self.notify();
    }

    /// Toggle maximized; a maximized window is never minimized. Stored
    /// position and size are retained for restore.
    pub fn maximize(&mut self, id: u64) {
        if let Some(w) = self.windows.iter_mut().find(|w| w.id == id) {
            w.maximized = !w.maximized;
            w.minimized = false;
        }
        self.notify();
    }

    /// Raise the window to the top of the stack and un-minimize it.
    /// This is the only operation that changes z-order, so "most recently
    /// focused is topmost" holds as a total order.
    pub fn focus(&mut self, id: u64) {
        let z = self.allocate_z_index();
        if let Some(w) = self.windows.iter_mut().find(|w| w.id == id) {
            w.z_index = z;
            w.minimized = false;
        }
        self.notify();
    }

    pub fn update_position(&mut self, id: u64, position: Position) {
        if let Some(w) = self.windows.iter_mut().find(|w| w.id == id) {
            w.position = position;
        }
        self.notify();
    }

    /// Replace the window's size, clamped to the enforced minimums
    pub fn update_size(&mut self, id: u64, size: Size) {
        if let Some(w) = self.windows.iter_mut().find(|w| w.id == id) {
            w.size = size.clamped();
        }
        self.notify();
    }

    fn allocate_z_index(&mut self) -> u64 {
        let z = self.next_z_index;
        self.next_z_index += 1;
        z
    }

    fn notify(&self) {
        debug_assert!(
            {
                let mut ids: Vec<u64> = self.windows.iter().map(|w| w.id).collect();
                ids.sort_unstable();
                ids.windows(2).all(|pair| pair[0] != pair[1])
            },
            "duplicate window id in registry"
        );
        for observer in &self.observers {
            observer(&self.windows);
        }
    }
}

impl Default for WindowManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn open_is_idempotent_by_kind() {
        let mut wm = WindowManager::new();
        let first = wm.open(AppKind::Notes, "Notes");
        let z_before = wm.get(first).unwrap().z_index;
        let second = wm.open(AppKind::Notes, "Notes");
        assert_eq!(first, second);
        assert_eq!(wm.windows().len(), 1);
        // re-open only refreshed the stacking order
        assert!(wm.get(first).unwrap().z_index > z_before);
    }

    #[test]
    fn successive_windows_are_staggered() {
        let mut wm = WindowManager::new();
        let a = wm.open(AppKind::Notes, "Notes");
        let b = wm.open(AppKind::Terminal, "Terminal");
        let pa = wm.get(a).unwrap().position;
        let pb = wm.get(b).unwrap().position;
        assert_eq!(pa, Position::new(100.0, 100.0));
        assert_eq!(pb, Position::new(130.0, 130.0));
    }

    #[test]
    fn later_open_is_topmost_until_refocus() {
        let mut wm = WindowManager::new();
        let notes = wm.open(AppKind::Notes, "Notes");
        let term = wm.open(AppKind::Terminal, "Terminal");
        assert!(wm.get(term).unwrap().z_index > wm.get(notes).unwrap().z_index);

        wm.focus(notes);
        assert!(wm.get(notes).unwrap().z_index > wm.get(term).unwrap().z_index);
    }

    #[test]
    fn focus_strictly_increases_z_and_clears_minimized() {
        let mut wm = WindowManager::new();
        let id = wm.open(AppKind::Settings, "Settings");
        wm.minimize(id);
        assert!(wm.get(id).unwrap().minimized);
        let z_before = wm.get(id).unwrap().z_index;
        wm.focus(id);
        let w = wm.get(id).unwrap();
        assert!(!w.minimized);
        assert!(w.z_index > z_before);
    }

    #[test]
    fn minimize_does_not_change_z_index() {
        let mut wm = WindowManager::new();
        let id = wm.open(AppKind::Browser, "Browser");
        let z = wm.get(id).unwrap().z_index;
        wm.minimize(id);
        assert_eq!(wm.get(id).unwrap().z_index, z);
    }

    #[test]
    fn maximize_toggles_and_retains_geometry() {
        let mut wm = WindowManager::new();
        let id = wm.open(AppKind::CodeEditor, "Code Editor");
        wm.update_position(id, Position::new(250.0, 40.0));
        wm.minimize(id);
        wm.maximize(id);
        let w = wm.get(id).unwrap();
        assert!(w.maximized);
        assert!(!w.minimized);
        assert_eq!(w.position, Position::new(250.0, 40.0));
        wm.maximize(id);
        assert!(!wm.get(id).unwrap().maximized);
    }

    #[test]
    fn size_is_clamped_to_minimums() {
        let mut wm = WindowManager::new();
        let id = wm.open(AppKind::Calendar, "Calendar");
        wm.update_size(id, Size::new(10.0, 10.0));
        let w = wm.get(id).unwrap();
        assert_eq!(w.size.width, crate::models::MIN_WIDTH);
        assert_eq!(w.size.height, crate::models::MIN_HEIGHT);
    }

    #[test]
    fn operations_on_unknown_ids_are_no_ops() {
        let mut wm = WindowManager::new();
        let id = wm.open(AppKind::Notes, "Notes");
        wm.close(id);
        wm.close(id);
        wm.focus(id);
        wm.minimize(id);
        wm.maximize(id);
        wm.update_position(id, Position::new(0.0, 0.0));
        wm.update_size(id, Size::new(500.0, 500.0));
        assert!(wm.windows().is_empty());
    }

    #[test]
    fn every_mutation_notifies_with_full_list() {
        let mut wm = WindowManager::new();
        let count = Arc::new(AtomicUsize::new(0));
        let sink = count.clone();
        wm.subscribe(move |_| {
            sink.fetch_add(1, Ordering::SeqCst);
        });

        let id = wm.open(AppKind::Notes, "Notes");
        wm.minimize(id);
        wm.focus(id);
        wm.update_position(id, Position::new(5.0, 5.0));
        wm.close(id);
        assert_eq!(count.load(Ordering::SeqCst), 5);
    }
}
