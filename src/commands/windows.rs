/// Window Commands
/// Tauri commands for the window registry and the pointer gesture stream.
/// Registry operations never fail: unknown ids are silent no-ops, so these
/// commands return plain values instead of Results.

use std::sync::Arc;
use tauri::State;

use crate::models::{AppCatalogEntry, AppKind, Position, Window};
use crate::services::DesktopState;

/// Open an application window (or focus the one already open for that
/// kind). Returns the window id.
#[tauri::command]
pub fn open_app(state: State<'_, Arc<DesktopState>>, kind: AppKind, title: String) -> u64 {
    state.windows.lock().open(kind, title)
}

#[tauri::command]
pub fn close_window(state: State<'_, Arc<DesktopState>>, id: u64) {
    state.windows.lock().close(id)
}

#[tauri::command]
pub fn minimize_window(state: State<'_, Arc<DesktopState>>, id: u64) {
    state.windows.lock().minimize(id)
}

#[tauri::command]
pub fn maximize_window(state: State<'_, Arc<DesktopState>>, id: u64) {
    state.windows.lock().maximize(id)
}

#[tauri::command]
pub fn focus_window(state: State<'_, Arc<DesktopState>>, id: u64) {
    state.windows.lock().focus(id)
}

/// Current window list (also pushed on the `desktop:windows` event after
/// every mutation)
#[tauri::command]
pub fn list_windows(state: State<'_, Arc<DesktopState>>) -> Vec<Window> {
    state.windows.lock().windows().to_vec()
}

/// Pointer-down on a window title bar: start a drag gesture
#[tauri::command]
pub fn pointer_down_titlebar(state: State<'_, Arc<DesktopState>>, id: u64, pos: Position) {
    let mut windows = state.windows.lock();
    state.pointer.lock().begin_drag(&mut windows, id, pos)
}

/// Pointer-down on a window resize handle: start a resize gesture
#[tauri::command]
pub fn pointer_down_resize(state: State<'_, Arc<DesktopState>>, id: u64, pos: Position) {
    let mut windows = state.windows.lock();
    state.pointer.lock().begin_resize(&mut windows, id, pos)
}

/// Pointer moved while a gesture may be active
#[tauri::command]
pub fn pointer_move(state: State<'_, Arc<DesktopState>>, pos: Position) {
    let mut windows = state.windows.lock();
    state.pointer.lock().pointer_move(&mut windows, pos)
}

/// Pointer released: end any active gesture
#[tauri::command]
pub fn pointer_up(state: State<'_, Arc<DesktopState>>) {
    state.pointer.lock().pointer_up()
}

/// The closed application catalog for the desktop icon grid and taskbar
#[tauri::command]
pub fn app_catalog() -> Vec<AppCatalogEntry> {
    AppKind::ALL
        .iter()
        .map(|&kind| AppCatalogEntry {
            kind,
            title: kind.title(),
            icon: kind.icon(),
        })
        .collect()
}
