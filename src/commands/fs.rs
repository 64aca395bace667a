/// Filesystem Commands
/// Tauri commands exposing the virtual filesystem to the file manager and
/// desktop icon views. Domain outcomes are stringified at this boundary.

use std::sync::Arc;
use tauri::State;

use crate::models::FsEntry;
use crate::services::fs::{CreateOutcome, ReadOutcome, RemoveOutcome};
use crate::services::DesktopState;

fn rooted(path: &[String]) -> String {
    format!("/{}", path.join("/"))
}

/// List the children of a directory
#[tauri::command]
pub fn fs_list(state: State<'_, Arc<DesktopState>>, path: Vec<String>) -> Result<Vec<FsEntry>, String> {
    state
        .fs
        .list(&path)
        .ok_or_else(|| format!("Not a directory: {}", rooted(&path)))
}

/// Read a file's content
#[tauri::command]
pub fn fs_read(state: State<'_, Arc<DesktopState>>, path: Vec<String>, name: String) -> Result<String, String> {
    match state.fs.read_file(&path, &name) {
        ReadOutcome::Content(content) => Ok(content),
        ReadOutcome::NotFound => Err(format!("No such file: {}", name)),
        ReadOutcome::InvalidParent => Err(format!("Not a directory: {}", rooted(&path))),
    }
}

/// Create a directory
#[tauri::command]
pub fn fs_mkdir(state: State<'_, Arc<DesktopState>>, path: Vec<String>, name: String) -> Result<(), String> {
    match state.fs.create_directory(&path, &name) {
        CreateOutcome::Created => Ok(()),
        CreateOutcome::AlreadyExists => Err(format!("Already exists: {}", name)),
        CreateOutcome::InvalidParent => Err(format!("Not a directory: {}", rooted(&path))),
    }
}

/// Create a file. Existing children are never overwritten; remove first.
#[tauri::command]
pub fn fs_create(
    state: State<'_, Arc<DesktopState>>,
    path: Vec<String>,
    name: String,
    content: String,
) -> Result<(), String> {
    match state.fs.create_file(&path, &name, &content) {
        CreateOutcome::Created => Ok(()),
        CreateOutcome::AlreadyExists => Err(format!("Already exists: {}", name)),
        CreateOutcome::InvalidParent => Err(format!("Not a directory: {}", rooted(&path))),
    }
}

/// Remove a file or directory (recursively)
#[tauri::command]
pub fn fs_remove(state: State<'_, Arc<DesktopState>>, path: Vec<String>, name: String) -> Result<(), String> {
    match state.fs.remove(&path, &name) {
        RemoveOutcome::Removed => Ok(()),
        RemoveOutcome::NotFound => Err(format!("No such file or directory: {}", name)),
    }
}
