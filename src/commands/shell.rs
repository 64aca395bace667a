/// Shell Commands
/// Tauri commands for the terminal app: execute a line, recall history,
/// tab-complete, and fetch the rendered line log. The frontend pulls the
/// full log after each call; there is no partial-update channel.

use std::sync::Arc;
use tauri::State;

use crate::models::TerminalLine;
use crate::services::DesktopState;

/// Execute one input line and return the updated line log
#[tauri::command]
pub fn shell_execute(state: State<'_, Arc<DesktopState>>, line: String) -> Vec<TerminalLine> {
    let mut shell = state.shell.lock();
    shell.execute(&line);
    shell.lines().to_vec()
}

/// Current rendered line log
#[tauri::command]
pub fn shell_lines(state: State<'_, Arc<DesktopState>>) -> Vec<TerminalLine> {
    state.shell.lock().lines().to_vec()
}

/// Empty the terminal log (command history is preserved)
#[tauri::command]
pub fn shell_clear(state: State<'_, Arc<DesktopState>>) {
    state.shell.lock().clear()
}

/// Up-arrow: recall the next-older history entry, if any
#[tauri::command]
pub fn shell_history_prev(state: State<'_, Arc<DesktopState>>) -> Option<String> {
    state.shell.lock().history_prev()
}

/// Down-arrow: step back toward the newest entry; `Some("")` means the
/// input line should be cleared
#[tauri::command]
pub fn shell_history_next(state: State<'_, Arc<DesktopState>>) -> Option<String> {
    state.shell.lock().history_next()
}

/// Tab: complete the partial input when exactly one command matches
#[tauri::command]
pub fn shell_complete(state: State<'_, Arc<DesktopState>>, partial: String) -> Option<String> {
    state.shell.lock().complete(&partial)
}

/// Prompt path for the input line ("/home/neuraos-user")
#[tauri::command]
pub fn shell_prompt(state: State<'_, Arc<DesktopState>>) -> String {
    state.shell.lock().prompt()
}
