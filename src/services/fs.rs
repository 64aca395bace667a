/// Virtual Filesystem Service
/// In-memory directory tree with path-addressed CRUD and change observers.
/// Nothing here touches the host filesystem; the tree lives and dies with
/// the desktop session.

use chrono::{DateTime, Utc};
use parking_lot::{Mutex, RwLock};
use serde::Serialize;
use std::collections::HashMap;

use crate::models::{EntryKind, FsEntry};

/// A node of the virtual tree. Directories own their children by name;
/// files own their text content. A node is never both.
#[derive(Debug, Clone)]
pub enum FsNode {
    File {
        content: String,
        created_at: DateTime<Utc>,
    },
    Directory {
        children: HashMap<String, FsNode>,
        created_at: DateTime<Utc>,
    },
}

impl FsNode {
    fn file(content: impl Into<String>) -> Self {
        FsNode::File {
            content: content.into(),
            created_at: Utc::now(),
        }
    }

    fn directory() -> Self {
        FsNode::Directory {
            children: HashMap::new(),
            created_at: Utc::now(),
        }
    }

    pub fn is_directory(&self) -> bool {
        matches!(self, FsNode::Directory { .. })
    }

    pub fn entry_kind(&self) -> EntryKind {
        match self {
            FsNode::File { .. } => EntryKind::File,
            FsNode::Directory { .. } => EntryKind::Directory,
        }
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        match self {
            FsNode::File { created_at, .. } => *created_at,
            FsNode::Directory { created_at, .. } => *created_at,
        }
    }
}

/// Outcome of a create operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateOutcome {
    Created,
    /// A child of that name (of either type) already exists
    AlreadyExists,
    /// The parent path does not resolve to a directory
    InvalidParent,
}

/// Outcome of a remove operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    Removed,
    NotFound,
}

/// Outcome of reading a named file inside a directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    Content(String),
    /// Missing, or the name refers to a directory
    NotFound,
    /// The parent path does not resolve to a directory
    InvalidParent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FsEventKind {
    Created,
    Removed,
}

/// Change notification delivered to observers after every successful
/// mutation. `entries` is the parent directory's post-mutation listing so a
/// subscriber can re-render without re-querying.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FsEvent {
    pub kind: FsEventKind,
    pub path: Vec<String>,
    pub name: String,
    pub entries: Vec<FsEntry>,
}

type FsObserver = Box<dyn Fn(&FsEvent) + Send + Sync>;

/// The virtual filesystem. Tree mutation happens in place under a single
/// write lock, which enforces the single-writer rule; readers never observe
/// a partially updated tree.
pub struct VirtualFs {
    root: RwLock<FsNode>,
    observers: Mutex<Vec<FsObserver>>,
}

/// Default terminal working directory
pub const HOME_PATH: [&str; 2] = ["home", "neuraos-user"];

impl VirtualFs {
    /// Create a filesystem seeded with the stock home tree
    pub fn new() -> Self {
        Self {
            root: RwLock::new(seed_tree()),
            observers: Mutex::new(Vec::new()),
        }
    }

    /// Create an empty filesystem (just the root directory)
    pub fn empty() -> Self {
        Self {
            root: RwLock::new(FsNode::directory()),
            observers: Mutex::new(Vec::new()),
        }
    }

    /// Register an observer for create/remove events
    pub fn subscribe(&self, observer: impl Fn(&FsEvent) + Send + Sync + 'static) {
        self.observers.lock().push(Box::new(observer));
    }

    /// True if `path` resolves to a directory. The empty path is the root.
    pub fn is_directory(&self, path: &[String]) -> bool {
        let root = self.root.read();
        resolve(&root, path).map(FsNode::is_directory).unwrap_or(false)
    }

    /// List the children of the directory at `path`, sorted by name.
    /// Returns `None` if the path does not resolve to a directory.
    pub fn list(&self, path: &[String]) -> Option<Vec<FsEntry>> {
        let root = self.root.read();
        match resolve(&root, path)? {
            FsNode::Directory { children, .. } => {
                let mut entries: Vec<FsEntry> = children
                    .iter()
                    .map(|(name, node)| FsEntry {
                        name: name.clone(),
                        kind: node.entry_kind(),
                    })
                    .collect();
                entries.sort_by(|a, b| a.name.cmp(&b.name));
                Some(entries)
            }
            FsNode::File { .. } => None,
        }
    }

    /// Read the content of the file named `name` in the directory at `path`
    pub fn read_file(&self, path: &[String], name: &str) -> ReadOutcome {
        let root = self.root.read();
        let children = match resolve(&root, path) {
            Some(FsNode::Directory { children, .. }) => children,
            _ => return ReadOutcome::InvalidParent,
        };
        match children.get(name) {
            Some(FsNode::File { content, .. }) => ReadOutcome::Content(content.clone()),
            _ => ReadOutcome::NotFound,
        }
    }

    /// Create an empty directory named `name` under the directory at `path`
    pub fn create_directory(&self, path: &[String], name: &str) -> CreateOutcome {
        self.insert(path, name, FsNode::directory())
    }

    /// Create a file named `name` under the directory at `path`.
    /// An existing child of either type blocks creation; callers that want
    /// overwrite semantics must remove the child first.
    pub fn create_file(&self, path: &[String], name: &str, content: &str) -> CreateOutcome {
        self.insert(path, name, FsNode::file(content))
    }

    /// Remove the child named `name` from the directory at `path`.
    /// Removing a directory removes its whole subtree. Idempotent: a missing
    /// name reports `NotFound` and leaves the tree untouched.
    pub fn remove(&self, path: &[String], name: &str) -> RemoveOutcome {
        let event = {
            let mut root = self.root.write();
            let children = match resolve_mut(&mut root, path) {
                Some(FsNode::Directory { children, .. }) => children,
                _ => return RemoveOutcome::NotFound,
            };
            if children.remove(name).is_none() {
                return RemoveOutcome::NotFound;
            }
            FsEvent {
                kind: FsEventKind::Removed,
                path: path.to_vec(),
                name: name.to_string(),
                entries: listing_of(children),
            }
        };
        log::debug!("[Fs] removed {:?}/{}", event.path, event.name);
        self.notify(&event);
        RemoveOutcome::Removed
    }

    fn insert(&self, path: &[String], name: &str, node: FsNode) -> CreateOutcome {
        let created_kind = node.entry_kind();
        let event = {
            let mut root = self.root.write();
            let children = match resolve_mut(&mut root, path) {
                Some(FsNode::Directory { children, .. }) => children,
                _ => return CreateOutcome::InvalidParent,
            };
            if children.contains_key(name) {
                return CreateOutcome::AlreadyExists;
            }
            children.insert(name.to_string(), node);
            FsEvent {
                kind: FsEventKind::Created,
                path: path.to_vec(),
                name: name.to_string(),
                entries: listing_of(children),
            }
        };
        log::debug!("[Fs] created {:?} {:?}/{}", created_kind, event.path, event.name);
        self.notify(&event);
        CreateOutcome::Created
    }

    // Observers run outside the tree lock so a callback may re-enter
    // read operations.
    fn notify(&self, event: &FsEvent) {
        for observer in self.observers.lock().iter() {
            observer(event);
        }
    }
}

impl Default for VirtualFs {
    fn default() -> Self {
        Self::new()
    }
}

/// Walk `path` from `root`, failing on the first missing segment or on
/// descending through a file. The empty path is the root itself.
fn resolve<'a>(root: &'a FsNode, path: &[String]) -> Option<&'a FsNode> {
    let mut node = root;
    for segment in path {
        match node {
            FsNode::Directory { children, .. } => node = children.get(segment)?,
            FsNode::File { .. } => return None,
        }
    }
    Some(node)
}

fn resolve_mut<'a>(root: &'a mut FsNode, path: &[String]) -> Option<&'a mut FsNode> {
    let mut node = root;
    for segment in path {
        match node {
            FsNode::Directory { children, .. } => node = children.get_mut(segment)?,
            FsNode::File { .. } => return None,
        }
    }
    Some(node)
}

fn listing_of(children: &HashMap<String, FsNode>) -> Vec<FsEntry> {
    let mut entries: Vec<FsEntry> = children
        .iter()
        .map(|(name, node)| FsEntry {
            name: name.clone(),
            kind: node.entry_kind(),
        })
        .collect();
    entries.sort_by(|a, b| a.name.cmp(&b.name));
    entries
}

/// The stock tree every fresh desktop session starts with
fn seed_tree() -> FsNode {
    let mut user = HashMap::new();
    user.insert("Documents".to_string(), FsNode::directory());
    user.insert("Projects".to_string(), FsNode::directory());
    user.insert("Downloads".to_string(), FsNode::directory());
    user.insert("welcome.txt".to_string(), FsNode::file("Welcome to WebOS!"));
    user.insert(
        "notes.md".to_string(),
        FsNode::file("# My Notes\n\nThis is a markdown file."),
    );

    let mut home = HashMap::new();
    home.insert(
        "neuraos-user".to_string(),
        FsNode::Directory {
            children: user,
            created_at: Utc::now(),
        },
    );

    let mut bin = HashMap::new();
    bin.insert("neuraos".to_string(), FsNode::file(""));

    let mut root = HashMap::new();
    root.insert(
        "home".to_string(),
        FsNode::Directory {
            children: home,
            created_at: Utc::now(),
        },
    );
    root.insert(
        "bin".to_string(),
        FsNode::Directory {
            children: bin,
            created_at: Utc::now(),
        },
    );

    FsNode::Directory {
        children: root,
        created_at: Utc::now(),
    }
}

/// Owned copy of the default home path
pub fn home_path() -> Vec<String> {
    HOME_PATH.iter().map(|s| s.to_string()).collect()
}
