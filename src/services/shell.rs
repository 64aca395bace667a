/// Shell Service
/// Line-oriented command interpreter for the terminal app. Parses one line
/// at a time, executes against the virtual filesystem and the working-path
/// cursor, and appends rendered lines to an append-only log.

use std::sync::Arc;

use crate::models::{EntryKind, LineKind, TerminalLine};
use crate::services::fs::{home_path, CreateOutcome, ReadOutcome, RemoveOutcome, VirtualFs};

/// Command names for tab completion; names that take an argument complete
/// with a trailing space.
const COMMANDS: [&str; 12] = [
    "help", "clear", "ls", "pwd", "whoami", "date", "mkdir ", "touch ", "rm ", "cat ", "echo ",
    "cd ",
];

const USER: &str = "neuraos-user";

const HELP_TEXT: &str = "Available commands:
help - Show this help message
clear - Clear terminal
ls - List files and directories
pwd - Show current working directory
cd [directory] - Change directory
mkdir [directory] - Create directory (appears on desktop!)
touch [file] - Create file (appears on desktop!)
rm [item] - Remove file or directory
cat [file] - Display file content
echo [text] > [file] - Write text to file
whoami - Show current user
date - Show current date";

/// One terminal session: working-path cursor, input history, and the
/// rendered line log. Commands execute synchronously, one line at a time.
pub struct ShellSession {
    fs: Arc<VirtualFs>,
    current_path: Vec<String>,
    history: Vec<String>,
    /// Recall cursor into `history`, counted back from the most recent
    /// entry; `None` means not browsing.
    history_index: Option<usize>,
    lines: Vec<TerminalLine>,
}

impl ShellSession {
    pub fn new(fs: Arc<VirtualFs>) -> Self {
        Self {
            fs,
            current_path: home_path(),
            history: Vec::new(),
            history_index: None,
            lines: vec![
                TerminalLine::new(LineKind::Output, "Welcome to NeuraOS Terminal v2.0"),
                TerminalLine::new(
                    LineKind::Output,
                    "Type \"help\" for commands. Files/folders created here appear on desktop!",
                ),
            ],
        }
    }

    /// Rendered line log, oldest first
    pub fn lines(&self) -> &[TerminalLine] {
        &self.lines
    }

    pub fn current_path(&self) -> &[String] {
        &self.current_path
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Prompt path, rooted ("/home/neuraos-user")
    pub fn prompt(&self) -> String {
        format!("/{}", self.current_path.join("/"))
    }

    /// Empty the rendered log. Input history is preserved.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Execute one input line: echo it, dispatch, append output.
    /// Blank lines are ignored.
    pub fn execute(&mut self, line: &str) {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return;
        }

        self.history.push(line.to_string());
        self.history_index = None;

        let tokens: Vec<&str> = trimmed.split_whitespace().collect();
        let command = tokens[0].to_lowercase();
        let args = &tokens[1..];

        log::debug!("[Shell] executing: {}", trimmed);
        self.push(LineKind::Command, format!("$ {}", line));

        // clear erases everything appended so far, including the echo
        if command == "clear" {
            self.clear();
            return;
        }

        let (output, suggestion) = self.dispatch(&command, args);
        self.push(LineKind::Output, output);
        if let Some(text) = suggestion {
            self.push(LineKind::Suggestion, text);
        }
    }

    /// Up-arrow recall: step to the next-older history entry. Returns the
    /// recalled line, or `None` when already at the oldest (no wrapping).
    pub fn history_prev(&mut self) -> Option<String> {
        let next = match self.history_index {
            None if !self.history.is_empty() => 0,
            Some(i) if i + 1 < self.history.len() => i + 1,
            _ => return None,
        };
        self.history_index = Some(next);
        Some(self.history[self.history.len() - 1 - next].clone())
    }

    /// Down-arrow recall: step back toward the newest entry. Stepping past
    /// it leaves browsing and yields an empty input line. Returns `None`
    /// when not browsing.
    pub fn history_next(&mut self) -> Option<String> {
        match self.history_index? {
            0 => {
                self.history_index = None;
                Some(String::new())
            }
            i => {
                self.history_index = Some(i - 1);
                Some(self.history[self.history.len() - i].clone())
            }
        }
    }

    /// Tab completion: replaces the input only when exactly one command
    /// name matches the partial prefix.
    pub fn complete(&self, partial: &str) -> Option<String> {
        let mut matches = COMMANDS.iter().filter(|c| c.starts_with(partial));
        match (matches.next(), matches.next()) {
            (Some(only), None) => Some(only.to_string()),
            _ => None,
        }
    }

    fn dispatch(&mut self, command: &str, args: &[&str]) -> (String, Option<String>) {
        let output = match command {
            "help" => HELP_TEXT.to_string(),
            "ls" => self.cmd_ls(),
            "pwd" => self.prompt(),
            "whoami" => USER.to_string(),
            "date" => chrono::Local::now().to_rfc2822(),
            "cd" => self.cmd_cd(args.first().copied()),
            "mkdir" => self.cmd_mkdir(args.first().copied()),
            "touch" => self.cmd_touch(args.first().copied()),
            "rm" => self.cmd_rm(args.first().copied()),
            "cat" => self.cmd_cat(args.first().copied()),
            "echo" => self.cmd_echo(args),
            _ => {
                return (
                    format!("Command not found: {}", command),
                    Some("Type \"help\" for available commands".to_string()),
                )
            }
        };
        (output, None)
    }

    fn cmd_ls(&self) -> String {
        match self.fs.list(&self.current_path) {
            Some(entries) if entries.is_empty() => "Directory is empty".to_string(),
            Some(entries) => entries
                .iter()
                .map(|e| match e.kind {
                    EntryKind::Directory => format!("{}/", e.name),
                    EntryKind::File => e.name.clone(),
                })
                .collect::<Vec<_>>()
                .join("  "),
            None => "Error: Cannot list files in a non-directory.".to_string(),
        }
    }

    fn cmd_cd(&mut self, target: Option<&str>) -> String {
        match target {
            None | Some("~") => {
                self.current_path = home_path();
                format!("Changed directory to: {}", self.prompt())
            }
            Some(target) => {
                let mut candidate = self.current_path.clone();
                match target {
                    ".." => {
                        // no-op at root
                        candidate.pop();
                    }
                    "/" => candidate.clear(),
                    name => candidate.push(name.to_string()),
                }
                if self.fs.is_directory(&candidate) {
                    self.current_path = candidate;
                    format!("Changed directory to: {}", self.prompt())
                } else {
                    // cursor stays where it was
                    format!("cd: No such directory: {}", target)
                }
            }
        }
    }

    fn cmd_mkdir(&mut self, name: Option<&str>) -> String {
        let Some(name) = name else {
            return "Usage: mkdir <directory name>".to_string();
        };
        match self.fs.create_directory(&self.current_path, name) {
            CreateOutcome::Created => format!("Created directory: {} (visible on desktop!)", name),
            CreateOutcome::AlreadyExists => format!("mkdir: Directory already exists: {}", name),
            CreateOutcome::InvalidParent => format!("mkdir: Cannot create directory: {}", name),
        }
    }

    fn cmd_touch(&mut self, name: Option<&str>) -> String {
        let Some(name) = name else {
            return "Usage: touch <file name>".to_string();
        };
        match self.fs.create_file(&self.current_path, name, "") {
            CreateOutcome::Created => format!("Created file: {} (visible on desktop!)", name),
            CreateOutcome::AlreadyExists => format!("touch: File already exists: {}", name),
            CreateOutcome::InvalidParent => format!("Error creating file: {}", name),
        }
    }

    fn cmd_rm(&mut self, name: Option<&str>) -> String {
        let Some(name) = name else {
            return "Usage: rm <file or directory name>".to_string();
        };
        match self.fs.remove(&self.current_path, name) {
            RemoveOutcome::Removed => format!("Removed: {}", name),
            RemoveOutcome::NotFound => format!("rm: No such file or directory: {}", name),
        }
    }

    fn cmd_cat(&self, name: Option<&str>) -> String {
        let Some(name) = name else {
            return "Usage: cat <file name>".to_string();
        };
        match self.fs.read_file(&self.current_path, name) {
            ReadOutcome::Content(content) if content.is_empty() => "(empty file)".to_string(),
            ReadOutcome::Content(content) => content,
            ReadOutcome::NotFound => format!("cat: No such file: {}", name),
            ReadOutcome::InvalidParent => "Error: Current path is not a directory.".to_string(),
        }
    }

    /// `echo tokens...` prints the tokens; `echo tokens... > name` writes
    /// them to a new file instead. `>` without a destination is treated as
    /// plain text.
    fn cmd_echo(&mut self, args: &[&str]) -> String {
        let redirect = args.iter().position(|a| *a == ">");
        match redirect {
            Some(i) if i + 1 < args.len() => {
                let content = args[..i].join(" ");
                let name = args[i + 1];
                match self.fs.create_file(&self.current_path, name, &content) {
                    CreateOutcome::Created => format!("Wrote to file: {}", name),
                    _ => format!("Error writing to file: {}", name),
                }
            }
            _ => args.join(" "),
        }
    }

    fn push(&mut self, kind: LineKind, text: impl Into<String>) {
        self.lines.push(TerminalLine::new(kind, text));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> ShellSession {
        ShellSession::new(Arc::new(VirtualFs::new()))
    }

    fn last_output(session: &ShellSession) -> &str {
        session
            .lines()
            .iter()
            .rev()
            .find(|l| l.kind == LineKind::Output)
            .map(|l| l.text.as_str())
            .unwrap()
    }

    #[test]
    fn starts_at_home_with_welcome_banner() {
        let s = session();
        assert_eq!(s.prompt(), "/home/neuraos-user");
        assert_eq!(s.lines().len(), 2);
        assert!(s.lines()[0].text.contains("NeuraOS Terminal"));
    }

    #[test]
    fn command_names_are_case_insensitive() {
        let mut s = session();
        s.execute("PWD");
        assert_eq!(last_output(&s), "/home/neuraos-user");
        s.execute("WhoAmI");
        assert_eq!(last_output(&s), "neuraos-user");
    }

    #[test]
    fn unknown_command_gets_error_and_suggestion() {
        let mut s = session();
        s.execute("frobnicate");
        let lines = s.lines();
        let last = &lines[lines.len() - 2..];
        assert_eq!(last[0].kind, LineKind::Output);
        assert_eq!(last[0].text, "Command not found: frobnicate");
        assert_eq!(last[1].kind, LineKind::Suggestion);
        assert_eq!(last[1].text, "Type \"help\" for available commands");
    }

    #[test]
    fn clear_empties_log_but_keeps_history() {
        let mut s = session();
        s.execute("pwd");
        s.execute("clear");
        assert!(s.lines().is_empty());
        assert_eq!(s.history(), &["pwd".to_string(), "clear".to_string()]);
    }

    #[test]
    fn cd_dotdot_at_root_is_a_no_op() {
        let mut s = session();
        s.execute("cd /");
        assert_eq!(s.prompt(), "/");
        s.execute("cd ..");
        assert_eq!(s.prompt(), "/");
        assert_eq!(last_output(&s), "Changed directory to: /");
    }

    #[test]
    fn cd_into_missing_child_leaves_cursor_and_reports() {
        let mut s = session();
        s.execute("cd nonexistent");
        assert_eq!(s.prompt(), "/home/neuraos-user");
        assert_eq!(last_output(&s), "cd: No such directory: nonexistent");
    }

    #[test]
    fn cd_tilde_and_bare_cd_reset_to_home() {
        let mut s = session();
        s.execute("cd /");
        s.execute("cd ~");
        assert_eq!(s.prompt(), "/home/neuraos-user");
        s.execute("cd /");
        s.execute("cd");
        assert_eq!(s.prompt(), "/home/neuraos-user");
    }

    #[test]
    fn cd_into_a_file_is_rejected() {
        let mut s = session();
        s.execute("cd welcome.txt");
        assert_eq!(s.prompt(), "/home/neuraos-user");
        assert_eq!(last_output(&s), "cd: No such directory: welcome.txt");
    }

    #[test]
    fn mkdir_cd_touch_cat_ls_scenario() {
        let mut s = session();
        s.execute("mkdir projects");
        assert_eq!(
            last_output(&s),
            "Created directory: projects (visible on desktop!)"
        );
        s.execute("cd projects");
        s.execute("touch readme.txt");
        s.execute("cat readme.txt");
        assert_eq!(last_output(&s), "(empty file)");
        s.execute("cd ..");
        s.execute("ls");
        assert!(last_output(&s).contains("projects/"));
    }

    #[test]
    fn mkdir_reports_already_exists_distinctly() {
        let mut s = session();
        s.execute("mkdir projects");
        s.execute("mkdir projects");
        assert_eq!(last_output(&s), "mkdir: Directory already exists: projects");
    }

    #[test]
    fn touch_reports_existing_file_distinctly() {
        let mut s = session();
        s.execute("touch notes.md");
        assert_eq!(last_output(&s), "touch: File already exists: notes.md");
    }

    #[test]
    fn rm_distinguishes_not_found() {
        let mut s = session();
        s.execute("rm welcome.txt");
        assert_eq!(last_output(&s), "Removed: welcome.txt");
        s.execute("rm welcome.txt");
        assert_eq!(
            last_output(&s),
            "rm: No such file or directory: welcome.txt"
        );
    }

    #[test]
    fn cat_on_directory_or_missing_is_an_error() {
        let mut s = session();
        s.execute("cat Documents");
        assert_eq!(last_output(&s), "cat: No such file: Documents");
        s.execute("cat ghost.txt");
        assert_eq!(last_output(&s), "cat: No such file: ghost.txt");
    }

    #[test]
    fn echo_without_redirect_echoes_tokens() {
        let mut s = session();
        s.execute("echo hello   world");
        assert_eq!(last_output(&s), "hello world");
    }

    #[test]
    fn echo_redirect_writes_file() {
        let mut s = session();
        s.execute("echo hello world > greet.txt");
        assert_eq!(last_output(&s), "Wrote to file: greet.txt");
        s.execute("cat greet.txt");
        assert_eq!(last_output(&s), "hello world");
    }

    #[test]
    fn echo_redirect_refuses_to_overwrite() {
        let mut s = session();
        s.execute("echo one > f.txt");
        s.execute("echo two > f.txt");
        assert_eq!(last_output(&s), "Error writing to file: f.txt");
        s.execute("cat f.txt");
        assert_eq!(last_output(&s), "one");
    }

    #[test]
    fn echo_trailing_redirect_is_plain_text() {
        let mut s = session();
        s.execute("echo dangling >");
        assert_eq!(last_output(&s), "dangling >");
    }

    #[test]
    fn ls_lists_directories_with_suffix() {
        let mut s = session();
        s.execute("ls");
        let out = last_output(&s);
        assert!(out.contains("Documents/"));
        assert!(out.contains("welcome.txt"));
        assert!(!out.contains("welcome.txt/"));
    }

    #[test]
    fn ls_of_empty_directory_says_so() {
        let mut s = session();
        s.execute("mkdir void");
        s.execute("cd void");
        s.execute("ls");
        assert_eq!(last_output(&s), "Directory is empty");
    }

    #[test]
    fn history_recall_steps_without_wrapping() {
        let mut s = session();
        s.execute("pwd");
        s.execute("ls");
        assert_eq!(s.history_prev().as_deref(), Some("ls"));
        assert_eq!(s.history_prev().as_deref(), Some("pwd"));
        // at the oldest entry, another Up does nothing
        assert_eq!(s.history_prev(), None);
        assert_eq!(s.history_next().as_deref(), Some("ls"));
        // stepping past the newest clears the input
        assert_eq!(s.history_next().as_deref(), Some(""));
        // not browsing anymore
        assert_eq!(s.history_next(), None);
    }

    #[test]
    fn executing_resets_history_browsing() {
        let mut s = session();
        s.execute("pwd");
        assert_eq!(s.history_prev().as_deref(), Some("pwd"));
        s.execute("ls");
        // fresh recall starts from the newest entry again
        assert_eq!(s.history_prev().as_deref(), Some("ls"));
    }

    #[test]
    fn tab_completes_only_unique_prefixes() {
        let s = session();
        assert_eq!(s.complete("pw").as_deref(), Some("pwd"));
        assert_eq!(s.complete("mk").as_deref(), Some("mkdir "));
        // "c" matches clear, cat, cd, ...
        assert_eq!(s.complete("c"), None);
        assert_eq!(s.complete("zz"), None);
    }

    #[test]
    fn blank_lines_are_ignored() {
        let mut s = session();
        s.execute("   ");
        assert_eq!(s.lines().len(), 2);
        assert!(s.history().is_empty());
    }
}
