/// Models module
/// Shared data types and structures between frontend and backend
/// All types here should be serializable/deserializable for IPC

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Minimum window width in pixels, enforced on every resize
pub const MIN_WIDTH: f64 = 400.0;
/// Minimum window height in pixels, enforced on every resize
pub const MIN_HEIGHT: f64 = 300.0;

/// 2D position in desktop coordinates (pixels)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Component-wise offset of `self` relative to `origin`
    pub fn delta_from(self, origin: Position) -> (f64, f64) {
        (self.x - origin.x, self.y - origin.y)
    }

    pub fn offset(self, dx: f64, dy: f64) -> Position {
        Position::new(self.x + dx, self.y + dy)
    }
}

/// 2D extent in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Clamp to the minimum window dimensions
    pub fn clamped(self) -> Size {
        Size::new(self.width.max(MIN_WIDTH), self.height.max(MIN_HEIGHT))
    }

    pub fn grown(self, dw: f64, dh: f64) -> Size {
        Size::new(self.width + dw, self.height + dh)
    }
}

/// The closed set of applications the desktop can host
///
/// Serialized as the component name the frontend registry keys on.
/// Unknown persisted kinds deserialize to `Unknown`, whose renderer lookup
/// is the "app not found" placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AppKind {
    FileManager,
    Notes,
    CodeEditor,
    AiAssistant,
    Calendar,
    Terminal,
    Settings,
    Browser,
    Unknown,
}

impl AppKind {
    /// All renderable kinds, in desktop icon order
    pub const ALL: [AppKind; 8] = [
        AppKind::FileManager,
        AppKind::Notes,
        AppKind::CodeEditor,
        AppKind::AiAssistant,
        AppKind::Calendar,
        AppKind::Terminal,
        AppKind::Settings,
        AppKind::Browser,
    ];

    /// Component name used by the frontend renderer registry
    pub fn as_str(self) -> &'static str {
        match self {
            AppKind::FileManager => "FileManager",
            AppKind::Notes => "NotesApp",
            AppKind::CodeEditor => "CodeEditor",
            AppKind::AiAssistant => "AIAssistant",
            AppKind::Calendar => "Calendar",
            AppKind::Terminal => "Terminal",
            AppKind::Settings => "Settings",
            AppKind::Browser => "Browser",
            AppKind::Unknown => "Unknown",
        }
    }

    /// Default window title for this application
    pub fn title(self) -> &'static str {
        match self {
            AppKind::FileManager => "File Manager",
            AppKind::Notes => "Notes",
            AppKind::CodeEditor => "Code Editor",
            AppKind::AiAssistant => "AI Assistant",
            AppKind::Calendar => "Calendar",
            AppKind::Terminal => "Terminal",
            AppKind::Settings => "Settings",
            AppKind::Browser => "Browser",
            AppKind::Unknown => "App Not Found",
        }
    }

    /// Icon identifier for the desktop icon grid
    pub fn icon(self) -> &'static str {
        match self {
            AppKind::FileManager => "folder",
            AppKind::Notes => "file-text",
            AppKind::CodeEditor => "code",
            AppKind::AiAssistant => "brain",
            AppKind::Calendar => "calendar",
            AppKind::Terminal => "terminal",
            AppKind::Settings => "settings",
            AppKind::Browser => "monitor",
            AppKind::Unknown => "help-circle",
        }
    }
}

impl From<String> for AppKind {
    fn from(value: String) -> Self {
        match value.as_str() {
            "FileManager" => AppKind::FileManager,
            "NotesApp" => AppKind::Notes,
            "CodeEditor" => AppKind::CodeEditor,
            "AIAssistant" => AppKind::AiAssistant,
            "Calendar" => AppKind::Calendar,
            "Terminal" => AppKind::Terminal,
            "Settings" => AppKind::Settings,
            "Browser" => AppKind::Browser,
            _ => AppKind::Unknown,
        }
    }
}

impl From<AppKind> for String {
    fn from(value: AppKind) -> Self {
        value.as_str().to_string()
    }
}

/// One entry of the desktop application catalog (icon grid / taskbar)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppCatalogEntry {
    pub kind: AppKind,
    pub title: &'static str,
    pub icon: &'static str,
}

/// One open application window
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Window {
    pub id: u64,
    pub title: String,
    pub app_kind: AppKind,
    #[serde(rename = "isMinimized")]
    pub minimized: bool,
    #[serde(rename = "isMaximized")]
    pub maximized: bool,
    /// Retained while maximized so restore puts the window back
    pub position: Position,
    pub size: Size,
    pub z_index: u64,
}

/// Kind of a rendered terminal line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineKind {
    Command,
    Output,
    Suggestion,
}

/// One immutable rendered terminal line
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TerminalLine {
    pub kind: LineKind,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl TerminalLine {
    pub fn new(kind: LineKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Kind of a filesystem directory entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Directory,
}

/// One child of a directory, as surfaced to listings and fs events
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FsEntry {
    pub name: String,
    pub kind: EntryKind,
}
