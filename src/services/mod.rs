/// Services module
/// Business logic for the desktop: window registry, pointer gestures,
/// virtual filesystem, and the terminal shell

pub mod fs;
pub mod pointer;
pub mod shell;
pub mod windows;

use parking_lot::Mutex;
use std::sync::Arc;

use fs::VirtualFs;
use pointer::PointerController;
use shell::ShellSession;
use windows::WindowManager;

/// Shared state for one desktop instance. Constructed explicitly and
/// injected via `tauri::State`; nothing here is a module-level singleton,
/// so tests can spin up independent desktops.
pub struct DesktopState {
    pub windows: Mutex<WindowManager>,
    pub pointer: Mutex<PointerController>,
    pub fs: Arc<VirtualFs>,
    pub shell: Mutex<ShellSession>,
}

impl DesktopState {
    pub fn new() -> Self {
        let fs = Arc::new(VirtualFs::new());
        Self {
            windows: Mutex::new(WindowManager::new()),
            pointer: Mutex::new(PointerController::new()),
            shell: Mutex::new(ShellSession::new(fs.clone())),
            fs,
        }
    }
}

impl Default for DesktopState {
    fn default() -> Self {
        Self::new()
    }
}
