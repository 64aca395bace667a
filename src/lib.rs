/// NeuraOS backend
/// Browser-hosted desktop environment with Tauri backend + React frontend.
/// The backend owns all core state: the window registry, the pointer
/// gesture controller, the virtual filesystem, and the terminal shell.
///
/// Module structure:
/// - commands: Tauri IPC handlers (frontend → backend)
/// - services: business logic for windows/pointer/filesystem/shell
/// - models: shared data types

pub mod commands;
pub mod models;
pub mod services;

use std::sync::Arc;

use services::DesktopState;
use tauri::Emitter;

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    let desktop = Arc::new(DesktopState::new());

    tauri::Builder::default()
        .manage(desktop.clone())
        .setup(move |app| {
            if cfg!(debug_assertions) {
                app.handle().plugin(
                    tauri_plugin_log::Builder::default()
                        .level(log::LevelFilter::Info)
                        .build(),
                )?;
            }

            // Push the full window list to the webview after every
            // registry mutation
            let handle = app.handle().clone();
            desktop.windows.lock().subscribe(move |windows| {
                let _ = handle.emit("desktop:windows", windows);
            });

            // Surface filesystem changes so files created in the terminal
            // appear on the desktop
            let handle = app.handle().clone();
            desktop.fs.subscribe(move |event| {
                let _ = handle.emit("desktop:fs", event);
            });

            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            commands::windows::open_app,
            commands::windows::close_window,
            commands::windows::minimize_window,
            commands::windows::maximize_window,
            commands::windows::focus_window,
            commands::windows::list_windows,
            commands::windows::pointer_down_titlebar,
            commands::windows::pointer_down_resize,
            commands::windows::pointer_move,
            commands::windows::pointer_up,
            commands::windows::app_catalog,
            commands::fs::fs_list,
            commands::fs::fs_read,
            commands::fs::fs_mkdir,
            commands::fs::fs_create,
            commands::fs::fs_remove,
            commands::shell::shell_execute,
            commands::shell::shell_lines,
            commands::shell::shell_clear,
            commands::shell::shell_history_prev,
            commands::shell::shell_history_next,
            commands::shell::shell_complete,
            commands::shell::shell_prompt,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
