//! Placeholder tokens and their expansion.
//!
//! Expansion is a single left-to-right pass: replacement values are copied to
//! the output verbatim and never scanned again, so a file called
//! `{workspace}.txt` cannot pull the workspace name into the presence.

use std::borrow::Cow;
use std::path::{Path, MAIN_SEPARATOR};

use num_format::{Locale, ToFormattedString};

use crate::context::{EditorSnapshot, GitContext, WorkspaceContext};
use crate::icon::{to_lower, to_title, to_upper};

/// Stand-in for values that are not available. Two zero-width spaces, since
/// the presence client rejects empty and one-character strings.
pub const EMPTY_PLACEHOLDER: &str = "\u{200b}\u{200b}";

const WORKSPACE_SUFFIX: &str = "(Workspace)";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Token {
    Empty,
    FileName,
    FileExtension,
    FileSize,
    DirName,
    FullDirName,
    FolderAndFile,
    Workspace,
    WorkspaceFolder,
    WorkspaceAndFolder,
    GitRepo,
    GitBranch,
    LanguageLowerCase,
    LanguageTitleCase,
    LanguageUpperCase,
    TotalLines,
    CurrentLine,
    CurrentColumn,
    Problems,
    ProblemsCount,
    AppName,
    SmallImageIcon,
    LargeImageIdleIcon,
}

impl Token {
    pub const ALL: [Token; 23] = [
        Token::Empty,
        Token::FileName,
        Token::FileExtension,
        Token::FileSize,
        Token::DirName,
        Token::FullDirName,
        Token::FolderAndFile,
        Token::Workspace,
        Token::WorkspaceFolder,
        Token::WorkspaceAndFolder,
        Token::GitRepo,
        Token::GitBranch,
        Token::LanguageLowerCase,
        Token::LanguageTitleCase,
        Token::LanguageUpperCase,
        Token::TotalLines,
        Token::CurrentLine,
        Token::CurrentColumn,
        Token::Problems,
        Token::ProblemsCount,
        Token::AppName,
        Token::SmallImageIcon,
        Token::LargeImageIdleIcon,
    ];

    /// The name between the braces
    pub fn name(self) -> &'static str {
        match self {
            Token::Empty => "empty",
            Token::FileName => "file_name",
            Token::FileExtension => "file_extension",
            Token::FileSize => "file_size",
            Token::DirName => "dir_name",
            Token::FullDirName => "full_dir_name",
            Token::FolderAndFile => "folder_and_file",
            Token::Workspace => "workspace",
            Token::WorkspaceFolder => "workspace_folder",
            Token::WorkspaceAndFolder => "workspace_and_folder",
            Token::GitRepo => "git_repo",
            Token::GitBranch => "git_branch",
            Token::LanguageLowerCase => "lang",
            Token::LanguageTitleCase => "Lang",
            Token::LanguageUpperCase => "LANG",
            Token::TotalLines => "total_lines",
            Token::CurrentLine => "current_line",
            Token::CurrentColumn => "current_column",
            Token::Problems => "problems",
            Token::ProblemsCount => "problems_count",
            Token::AppName => "app_name",
            Token::SmallImageIcon => "small_image_icon",
            Token::LargeImageIdleIcon => "large_image_idle_icon",
        }
    }

    pub fn from_name(name: &str) -> Option<Token> {
        Token::ALL.into_iter().find(|t| t.name() == name)
    }
}

/// Replace every known `{token}` in `template` using `resolve`.
///
/// Tokens for which `resolve` returns `None`, and brace sequences that are not
/// tokens at all, are copied through unchanged.
pub fn expand_with<'v, F>(template: &str, mut resolve: F) -> String
where
    F: FnMut(Token) -> Option<Cow<'v, str>>,
{
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];

        let replaced = after.find('}').and_then(|close| {
            let token = Token::from_name(&after[..close])?;
            resolve(token).map(|value| (value, close))
        });

        match replaced {
            Some((value, close)) => {
                out.push_str(&value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}

/// Expand every known token against `ctx`. No known token survives.
pub fn expand(template: &str, ctx: &ResolvedContext<'_>) -> String {
    expand_with(template, |token| Some(ctx.value(token)))
}

/// Workspace display names after applying their fallbacks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceNames {
    pub workspace: String,
    pub folder: String,
}

impl WorkspaceNames {
    /// Workspace name falls back to the folder name, the folder name falls back
    /// to `no_workspace_found`.
    pub fn resolve(workspace: &WorkspaceContext, no_workspace_found: &str) -> Self {
        let no_workspace_found = expand_with(no_workspace_found, |token| {
            (token == Token::Empty).then_some(Cow::Borrowed(EMPTY_PLACEHOLDER))
        });

        let folder = workspace
            .folder_name
            .clone()
            .unwrap_or(no_workspace_found);

        let workspace = workspace
            .workspace_name
            .as_deref()
            .map(strip_workspace_suffix)
            .unwrap_or_else(|| folder.clone());

        Self { workspace, folder }
    }

    pub fn workspace_and_folder(&self) -> String {
        if self.folder == EMPTY_PLACEHOLDER {
            self.workspace.clone()
        } else {
            format!("{} - {}", self.workspace, self.folder)
        }
    }
}

fn strip_workspace_suffix(name: &str) -> String {
    name.replace(WORKSPACE_SUFFIX, "").trim_end().to_string()
}

/// `<workspace><sep><directory of the file relative to the workspace>`
pub fn full_dir_name(workspace: &WorkspaceContext) -> Option<String> {
    let name = strip_workspace_suffix(workspace.workspace_name.as_deref()?);

    let relative_dir = workspace
        .relative_file_path
        .as_deref()
        .and_then(Path::parent)
        .map(|p| p.to_string_lossy().into_owned())
        .filter(|p| !p.is_empty());

    Some(match relative_dir {
        Some(dir) => format!("{}{}{}", name, MAIN_SEPARATOR, dir),
        None => name,
    })
}

/// Remote repository name, then local repository name
pub fn git_repo_name(git: Option<&GitContext>) -> Option<String> {
    let git = git?;
    git.remote
        .as_ref()
        .map(|r| r.name.clone())
        .filter(|name| !name.is_empty())
        .or_else(|| git.repo_name.clone())
}

/// Everything a template can refer to, resolved for one build call.
///
/// Line and column numbers are formatted lazily, only when a template asks.
#[derive(Debug, Clone)]
pub struct ResolvedContext<'a> {
    pub app_name: &'a str,
    pub small_image_icon: String,
    pub large_image_idle_icon: String,
    pub editor: Option<&'a EditorSnapshot>,
    pub language: Option<String>,
    pub file_size: Option<String>,
    pub workspace: WorkspaceNames,
    pub full_dir_name: Option<String>,
    pub git_repo: Option<String>,
    pub git_branch: Option<String>,
    /// Already expanded, or empty when problems are disabled
    pub problems: String,
    /// `None` when problems are disabled
    pub problems_count: Option<usize>,
}

impl ResolvedContext<'_> {
    pub fn value(&self, token: Token) -> Cow<'_, str> {
        fn or_empty(value: Option<String>) -> Cow<'static, str> {
            value.map_or(Cow::Borrowed(EMPTY_PLACEHOLDER), Cow::Owned)
        }

        let editor = self.editor;
        match token {
            Token::Empty => Cow::Borrowed(EMPTY_PLACEHOLDER),
            Token::FileName => or_empty(editor.and_then(EditorSnapshot::file_name)),
            Token::FileExtension => or_empty(editor.and_then(EditorSnapshot::file_extension)),
            Token::DirName => or_empty(editor.and_then(EditorSnapshot::dir_name)),
            Token::FolderAndFile => or_empty(editor.and_then(EditorSnapshot::folder_and_file)),
            Token::FileSize => or_empty(self.file_size.clone()),
            Token::FullDirName => or_empty(self.full_dir_name.clone()),
            Token::Workspace => Cow::Borrowed(self.workspace.workspace.as_str()),
            Token::WorkspaceFolder => Cow::Borrowed(self.workspace.folder.as_str()),
            Token::WorkspaceAndFolder => Cow::Owned(self.workspace.workspace_and_folder()),
            Token::GitRepo => or_empty(self.git_repo.clone()),
            Token::GitBranch => or_empty(self.git_branch.clone()),
            Token::LanguageLowerCase => or_empty(self.language.as_deref().map(to_lower)),
            Token::LanguageTitleCase => or_empty(self.language.as_deref().map(to_title)),
            Token::LanguageUpperCase => or_empty(self.language.as_deref().map(to_upper)),
            Token::TotalLines => or_empty(editor.map(|e| grouped(e.line_count))),
            Token::CurrentLine => or_empty(editor.map(|e| grouped(e.selection_line + 1))),
            Token::CurrentColumn => or_empty(editor.map(|e| grouped(e.selection_column + 1))),
            Token::Problems => Cow::Borrowed(self.problems.as_str()),
            Token::ProblemsCount => self
                .problems_count
                .map_or(Cow::Borrowed(""), |count| Cow::Owned(count.to_string())),
            Token::AppName => Cow::Borrowed(self.app_name),
            Token::SmallImageIcon => Cow::Borrowed(self.small_image_icon.as_str()),
            Token::LargeImageIdleIcon => Cow::Borrowed(self.large_image_idle_icon.as_str()),
        }
    }
}

fn grouped(n: usize) -> String {
    n.to_formatted_string(&Locale::en)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(editor: Option<&EditorSnapshot>) -> ResolvedContext<'_> {
        ResolvedContext {
            app_name: "Visual Studio Code",
            small_image_icon: "vscode".to_string(),
            large_image_idle_icon: "idle-vscode".to_string(),
            editor,
            language: editor.map(|e| e.language_id.clone()),
            file_size: None,
            workspace: WorkspaceNames {
                workspace: "crate".to_string(),
                folder: "crate".to_string(),
            },
            full_dir_name: None,
            git_repo: None,
            git_branch: None,
            problems: String::new(),
            problems_count: Some(0),
        }
    }

    #[test]
    fn test_token_names_round_trip() {
        for token in Token::ALL {
            assert_eq!(Token::from_name(token.name()), Some(token));
        }
        assert_eq!(Token::from_name("nope"), None);
    }

    #[test]
    fn test_expands_file_and_line_tokens() {
        let editor = EditorSnapshot::new("src/main.rs", "rust")
            .with_lines(120)
            .with_selection(9, 0);
        let ctx = context(Some(&editor));

        assert_eq!(
            expand("Editing {file_name} ({current_line}/{total_lines})", &ctx),
            "Editing main.rs (10/120)"
        );
    }

    #[test]
    fn test_line_numbers_are_grouped() {
        let editor = EditorSnapshot::new("big.txt", "plaintext")
            .with_lines(1_234_567)
            .with_selection(0, 41);
        let ctx = context(Some(&editor));

        assert_eq!(
            expand("{total_lines} lines, col {current_column}", &ctx),
            "1,234,567 lines, col 42"
        );
    }

    #[test]
    fn test_repeated_tokens_all_replaced() {
        let editor = EditorSnapshot::new("a.rs", "rust");
        let ctx = context(Some(&editor));
        assert_eq!(expand("{LANG} {lang} {Lang} {lang}", &ctx), "RUST rust Rust rust");
    }

    #[test]
    fn test_missing_editor_uses_placeholder() {
        let ctx = context(None);
        let out = expand("{file_name}|{current_line}|{lang}", &ctx);
        assert_eq!(out, format!("{0}|{0}|{0}", EMPTY_PLACEHOLDER));
        for token in Token::ALL {
            assert!(!expand(&format!("{{{}}}", token.name()), &ctx).contains('{'));
        }
    }

    #[test]
    fn test_values_are_not_rescanned() {
        let editor = EditorSnapshot::new("{workspace}.txt", "plaintext");
        let ctx = context(Some(&editor));
        assert_eq!(expand("{file_name} in {workspace}", &ctx), "{workspace}.txt in crate");
    }

    #[test]
    fn test_unknown_and_unbalanced_braces_pass_through() {
        let ctx = context(None);
        assert_eq!(expand("{unknown} {app_name}", &ctx), "{unknown} Visual Studio Code");
        assert_eq!(expand("{{app_name}}", &ctx), "{Visual Studio Code}");
        assert_eq!(expand("open { brace", &ctx), "open { brace");
    }

    #[test]
    fn test_workspace_fallbacks() {
        let names = WorkspaceNames::resolve(&WorkspaceContext::default(), "{empty}");
        assert_eq!(names.workspace, EMPTY_PLACEHOLDER);
        assert_eq!(names.workspace_and_folder(), EMPTY_PLACEHOLDER);

        let ws = WorkspaceContext {
            workspace_name: Some("mono (Workspace)".to_string()),
            folder_name: Some("api".to_string()),
            ..Default::default()
        };
        let names = WorkspaceNames::resolve(&ws, "No workspace");
        assert_eq!(names.workspace, "mono");
        assert_eq!(names.workspace_and_folder(), "mono - api");

        let ws = WorkspaceContext {
            folder_name: Some("api".to_string()),
            ..Default::default()
        };
        let names = WorkspaceNames::resolve(&ws, "No workspace");
        assert_eq!(names.workspace, "api");
    }

    #[test]
    fn test_full_dir_name() {
        let ws = WorkspaceContext {
            workspace_name: Some("crate".to_string()),
            relative_file_path: Some(Path::new("src").join("template").join("mod.rs")),
            ..Default::default()
        };
        assert_eq!(
            full_dir_name(&ws),
            Some(format!("crate{0}src{0}template", MAIN_SEPARATOR))
        );
        assert_eq!(full_dir_name(&WorkspaceContext::default()), None);
    }
}
