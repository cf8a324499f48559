//! Snapshots of editor, workspace and git state supplied by the host

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// The focused text editor at the time of the build
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorSnapshot {
    pub document_path: PathBuf,
    pub language_id: String,
    pub line_count: usize,
    /// 0-based
    pub selection_line: usize,
    /// 0-based
    pub selection_column: usize,
    #[serde(default)]
    pub file_size_bytes: Option<u64>,
}

impl EditorSnapshot {
    pub fn new(document_path: impl Into<PathBuf>, language_id: impl Into<String>) -> Self {
        Self {
            document_path: document_path.into(),
            language_id: language_id.into(),
            line_count: 0,
            selection_line: 0,
            selection_column: 0,
            file_size_bytes: None,
        }
    }

    pub fn with_lines(mut self, line_count: usize) -> Self {
        self.line_count = line_count;
        self
    }

    pub fn with_selection(mut self, line: usize, column: usize) -> Self {
        self.selection_line = line;
        self.selection_column = column;
        self
    }

    pub fn with_file_size(mut self, bytes: u64) -> Self {
        self.file_size_bytes = Some(bytes);
        self
    }

    /// Base name including the extension, e.g. `main.rs`
    pub fn file_name(&self) -> Option<String> {
        self.document_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
    }

    /// Extension with its leading dot, e.g. `.rs`
    pub fn file_extension(&self) -> Option<String> {
        self.document_path
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy()))
    }

    /// Name of the directory holding the document
    pub fn dir_name(&self) -> Option<String> {
        self.document_path
            .parent()
            .and_then(Path::file_name)
            .map(|n| n.to_string_lossy().into_owned())
    }

    pub fn folder_and_file(&self) -> Option<String> {
        let file = self.file_name()?;
        Some(match self.dir_name() {
            Some(dir) => format!("{}{}{}", dir, std::path::MAIN_SEPARATOR, file),
            None => file,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceContext {
    /// Display name of the open workspace, possibly with a ` (Workspace)` suffix
    pub workspace_name: Option<String>,
    /// Name of the workspace folder containing the active document
    pub folder_name: Option<String>,
    /// File-system path of that folder, used for exclusion checks
    pub folder_path: Option<PathBuf>,
    /// Path of the active document relative to the workspace root
    pub relative_file_path: Option<PathBuf>,
}

/// A parsed git remote
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitRemote {
    /// The remote rendered in its HTTPS form, possibly ending in `.git`
    pub https_url: String,
    pub host: String,
    pub owner: String,
    #[serde(default)]
    pub organization: Option<String>,
    pub name: String,
}

impl GitRemote {
    pub fn repository_url(&self) -> &str {
        self.https_url
            .strip_suffix(".git")
            .unwrap_or(&self.https_url)
    }

    pub fn organization_or_owner(&self) -> &str {
        self.organization.as_deref().unwrap_or(&self.owner)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitContext {
    pub remote: Option<GitRemote>,
    /// Local repository name, used when no remote is configured
    pub repo_name: Option<String>,
    pub branch: Option<String>,
}

/// The editor build the extension is running in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppInfo {
    pub name: String,
}

impl AppInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn is_insiders(&self) -> bool {
        self.name.contains("Insiders")
    }

    pub fn is_codium(&self) -> bool {
        self.name.starts_with("VSCodium") || self.name.starts_with("codium")
    }
}

impl Default for AppInfo {
    fn default() -> Self {
        Self::new("Visual Studio Code")
    }
}

/// Everything a single presence build reads besides configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityInput {
    pub app: AppInfo,
    /// `None` means idle
    pub editor: Option<EditorSnapshot>,
    pub workspace: WorkspaceContext,
    pub git: Option<GitContext>,
    pub is_debugging: bool,
    pub is_viewing: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_editor_path_parts() {
        let editor = EditorSnapshot::new("/work/crate/src/main.rs", "rust");
        assert_eq!(editor.file_name().as_deref(), Some("main.rs"));
        assert_eq!(editor.file_extension().as_deref(), Some(".rs"));
        assert_eq!(editor.dir_name().as_deref(), Some("src"));
        assert_eq!(
            editor.folder_and_file(),
            Some(format!("src{}main.rs", std::path::MAIN_SEPARATOR))
        );
    }

    #[test]
    fn test_editor_without_extension() {
        let editor = EditorSnapshot::new("Makefile", "makefile");
        assert_eq!(editor.file_extension(), None);
        assert_eq!(editor.dir_name(), None);
        assert_eq!(editor.folder_and_file().as_deref(), Some("Makefile"));
    }

    #[test]
    fn test_git_remote_helpers() {
        let remote = GitRemote {
            https_url: "https://github.com/org/repo.git".to_string(),
            host: "github.com".to_string(),
            owner: "someone".to_string(),
            organization: None,
            name: "repo".to_string(),
        };
        assert_eq!(remote.repository_url(), "https://github.com/org/repo");
        assert_eq!(remote.organization_or_owner(), "someone");
    }

    #[test]
    fn test_app_variants() {
        assert!(AppInfo::new("Visual Studio Code - Insiders").is_insiders());
        assert!(AppInfo::new("VSCodium").is_codium());
        assert!(AppInfo::new("codium").is_codium());
        assert!(!AppInfo::default().is_codium());
        assert!(!AppInfo::default().is_insiders());
    }
}
