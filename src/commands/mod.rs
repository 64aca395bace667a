/// Commands module
/// Tauri IPC handlers (frontend → backend). Thin wrappers that lock the
/// shared desktop state and delegate to the services.

pub mod fs;
pub mod shell;
pub mod windows;
