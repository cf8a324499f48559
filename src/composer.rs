//! Builds a [`PresenceState`] from editor state and configuration.
//!
//! Composition is a total function: missing context degrades to placeholders
//! and fallbacks, never to an error.

use std::borrow::Cow;

use chrono::{DateTime, Utc};

use crate::config::{PresenceConfig, WorkspaceIgnoreText};
use crate::context::{ActivityInput, EditorSnapshot, GitRemote};
use crate::exclusion::is_excluded;
use crate::file_size::{ByteSizeFormatter, FileSizeResolver};
use crate::icon::{
    FileIconResolver, LanguageIdIcons, IDLE_VSCODE_IMAGE_KEY, IDLE_VSCODE_INSIDERS_IMAGE_KEY,
    VSCODE_IMAGE_KEY, VSCODE_INSIDERS_IMAGE_KEY, VSCODIUM_IMAGE_KEY, VSCODIUM_INSIDERS_IMAGE_KEY,
};
use crate::presence::{Button, PresenceState};
use crate::template::{
    expand, expand_with, full_dir_name, git_repo_name, select, InteractionState,
    ResolvedContext, Token, WorkspaceNames, EMPTY_PLACEHOLDER,
};

/// Details text for an ignored workspace when none is configured
pub const DEFAULT_WORKSPACE_IGNORE_TEXT: &str = "No workspace ignore text provided.";

const MIN_IMAGE_TEXT_CHARS: usize = 2;

pub struct PresenceComposer {
    icons: Box<dyn FileIconResolver>,
    file_sizes: Box<dyn FileSizeResolver>,
}

impl PresenceComposer {
    pub fn new(icons: Box<dyn FileIconResolver>, file_sizes: Box<dyn FileSizeResolver>) -> Self {
        Self { icons, file_sizes }
    }

    /// Build the presence for one moment in time.
    ///
    /// Only `previous.start_timestamp` is read from the previous presence, so
    /// elapsed time keeps counting across rebuilds.
    pub fn compose(
        &self,
        config: &PresenceConfig,
        input: &ActivityInput,
        problems_count: usize,
        previous: Option<&PresenceState>,
        now: DateTime<Utc>,
    ) -> PresenceState {
        let ctx = self.resolve_context(config, input, problems_count);

        let start_timestamp = if config.idle.reset_elapsed_time {
            None
        } else {
            Some(previous.and_then(|p| p.start_timestamp).unwrap_or(now))
        };

        let presence = PresenceState {
            details: None,
            state: None,
            start_timestamp,
            large_image_key: expand(&config.images.large.idle_key, &ctx),
            large_image_text: expand(&config.images.large.idle_text, &ctx),
            small_image_key: expand(&config.images.small.key, &ctx),
            small_image_text: expand(&config.images.small.text, &ctx),
            buttons: Vec::new(),
        };

        match input.editor.as_ref() {
            None => compose_idle(config, &ctx, presence),
            Some(editor) => self.compose_active(config, input, editor, &ctx, presence),
        }
    }

    fn resolve_context<'a>(
        &self,
        config: &PresenceConfig,
        input: &'a ActivityInput,
        problems_count: usize,
    ) -> ResolvedContext<'a> {
        let editor = input.editor.as_ref();
        let git = input.git.as_ref();

        let problems = if config.problems.enabled {
            expand_with(&config.problems.text, |token| {
                (token == Token::ProblemsCount).then(|| Cow::Owned(problems_count.to_string()))
            })
        } else {
            String::new()
        };

        ResolvedContext {
            app_name: &input.app.name,
            small_image_icon: self.small_image_icon(config, input),
            large_image_idle_icon: self.icons.icon_key(if input.app.is_insiders() {
                IDLE_VSCODE_INSIDERS_IMAGE_KEY
            } else {
                IDLE_VSCODE_IMAGE_KEY
            }),
            editor,
            language: editor.map(|e| self.icons.resolve(e)),
            file_size: editor.and_then(|e| self.file_sizes.file_size(config, e)),
            workspace: WorkspaceNames::resolve(&input.workspace, &config.state.no_workspace_found),
            full_dir_name: full_dir_name(&input.workspace),
            git_repo: git_repo_name(git),
            git_branch: git.and_then(|g| g.branch.clone()),
            problems,
            problems_count: config.problems.enabled.then_some(problems_count),
        }
    }

    fn small_image_icon(&self, config: &PresenceConfig, input: &ActivityInput) -> String {
        if input.is_debugging {
            return config.images.small.debugging_key.clone();
        }

        let key = match (input.app.is_insiders(), input.app.is_codium()) {
            (true, true) => VSCODIUM_INSIDERS_IMAGE_KEY,
            (true, false) => VSCODE_INSIDERS_IMAGE_KEY,
            (false, true) => VSCODIUM_IMAGE_KEY,
            (false, false) => VSCODE_IMAGE_KEY,
        };
        self.icons.icon_key(key)
    }

    fn compose_active(
        &self,
        config: &PresenceConfig,
        input: &ActivityInput,
        editor: &EditorSnapshot,
        ctx: &ResolvedContext<'_>,
        mut presence: PresenceState,
    ) -> PresenceState {
        let interaction = InteractionState {
            has_active_editor: true,
            is_debugging: input.is_debugging,
            is_viewing: input.is_viewing,
        };

        let folder_path = input
            .workspace
            .folder_path
            .as_deref()
            .map(|p| p.to_string_lossy().into_owned());
        let workspace_excluded =
            is_excluded(Some(&config.ignore.workspaces), folder_path.as_deref());

        if workspace_excluded {
            tracing::debug!("Workspace {:?} is ignored, hiding file details", folder_path);
            presence.details = config
                .details
                .enabled
                .then(|| workspace_excluded_text(config, input));
            presence.state = None;
        } else {
            presence.details = config
                .details
                .enabled
                .then(|| expand(select(interaction, config.details.templates()), ctx));
            presence.state = config
                .state
                .enabled
                .then(|| expand(select(interaction, config.state.templates()), ctx));
        }

        let icon = ctx
            .language
            .clone()
            .unwrap_or_else(|| self.icons.resolve(editor));

        // The large key takes the icon as-is, not lower-cased
        presence.large_image_key = expand_with(&config.images.large.key, |token| match token {
            Token::LanguageLowerCase => Some(Cow::Borrowed(icon.as_str())),
            other => Some(ctx.value(other)),
        });
        presence.large_image_text = pad_image_text(expand(&config.images.large.text, ctx));

        if config.buttons.active.enabled {
            if let Some(remote) = input.git.as_ref().and_then(|g| g.remote.as_ref()) {
                presence.buttons =
                    repository_button(config, remote, folder_path.as_deref(), workspace_excluded)
                        .into_iter()
                        .collect();
            }
        }

        presence
    }
}

impl Default for PresenceComposer {
    fn default() -> Self {
        Self::new(Box::new(LanguageIdIcons::default()), Box::new(ByteSizeFormatter))
    }
}

fn compose_idle(
    config: &PresenceConfig,
    ctx: &ResolvedContext<'_>,
    mut presence: PresenceState,
) -> PresenceState {
    let idle = InteractionState::default();

    presence.details = (config.details.enabled && config.details.idle_enabled)
        .then(|| expand(select(idle, config.details.templates()), ctx));
    presence.state = (config.state.enabled && config.state.idle_enabled)
        .then(|| expand(select(idle, config.state.templates()), ctx));

    let inactive = &config.buttons.inactive;
    if inactive.is_complete() {
        presence.buttons = vec![Button {
            label: inactive.label.clone(),
            url: inactive.url.clone(),
        }];
    }

    presence
}

/// Per-workspace text, then the shared text, then the built-in default
fn workspace_excluded_text(config: &PresenceConfig, input: &ActivityInput) -> String {
    let name = input
        .workspace
        .folder_name
        .as_deref()
        .or(input.workspace.workspace_name.as_deref());

    let configured = match (&config.ignore.workspaces_text, name) {
        (Some(WorkspaceIgnoreText::PerWorkspace(texts)), Some(name)) => texts.get(name).cloned(),
        (Some(WorkspaceIgnoreText::Text(text)), Some(_)) if !text.is_empty() => Some(text.clone()),
        _ => None,
    };

    configured.unwrap_or_else(|| DEFAULT_WORKSPACE_IGNORE_TEXT.to_string())
}

/// The "view repository" button, unless any ignore list covers this repo
fn repository_button(
    config: &PresenceConfig,
    remote: &GitRemote,
    workspace_path: Option<&str>,
    workspace_excluded: bool,
) -> Option<Button> {
    let active = &config.buttons.active;
    let ignore = &config.ignore;

    let repo_url = remote.repository_url();
    let excluded = is_excluded(Some(&ignore.repositories), Some(repo_url))
        || workspace_excluded
        || is_excluded(Some(&ignore.organizations), Some(remote.organization_or_owner()))
        || is_excluded(Some(&ignore.git_hosts), Some(&remote.host));

    if excluded {
        tracing::debug!(
            "Repository button hidden for {} (workspace {:?})",
            repo_url,
            workspace_path
        );
        return None;
    }

    if repo_url.is_empty() || active.label.is_empty() {
        return None;
    }

    let url = if active.url.is_empty() {
        repo_url.to_string()
    } else {
        active.url.clone()
    };

    Some(Button {
        label: active.label.clone(),
        url,
    })
}

/// The presence client rejects image texts shorter than two characters
fn pad_image_text(mut text: String) -> String {
    let fill = EMPTY_PLACEHOLDER.chars().next().unwrap_or('\u{200b}');
    while text.chars().count() < MIN_IMAGE_TEXT_CHARS {
        text.push(fill);
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pad_image_text() {
        assert_eq!(pad_image_text("Go".to_string()), "Go");
        assert_eq!(pad_image_text("C".to_string()), "C\u{200b}");
        assert_eq!(pad_image_text(String::new()), "\u{200b}\u{200b}");
    }

    #[test]
    fn test_workspace_excluded_text_fallbacks() {
        let mut config = PresenceConfig::default();
        let mut input = ActivityInput::default();
        input.workspace.folder_name = Some("secret".to_string());

        assert_eq!(
            workspace_excluded_text(&config, &input),
            DEFAULT_WORKSPACE_IGNORE_TEXT
        );

        config.ignore.workspaces_text = Some(WorkspaceIgnoreText::Text("Busy".to_string()));
        assert_eq!(workspace_excluded_text(&config, &input), "Busy");

        config.ignore.workspaces_text = Some(WorkspaceIgnoreText::PerWorkspace(
            [("other".to_string(), "Elsewhere".to_string())].into(),
        ));
        assert_eq!(
            workspace_excluded_text(&config, &input),
            DEFAULT_WORKSPACE_IGNORE_TEXT
        );
    }

    #[test]
    fn test_repository_button_prefers_override_url() {
        let mut config = PresenceConfig::default();
        let remote = GitRemote {
            https_url: "https://gitlab.com/team/app.git".to_string(),
            host: "gitlab.com".to_string(),
            owner: "team".to_string(),
            organization: None,
            name: "app".to_string(),
        };

        let button = repository_button(&config, &remote, None, false).unwrap();
        assert_eq!(button.url, "https://gitlab.com/team/app");

        config.buttons.active.url = "https://example.com/about".to_string();
        let button = repository_button(&config, &remote, None, false).unwrap();
        assert_eq!(button.url, "https://example.com/about");

        assert!(repository_button(&config, &remote, None, true).is_none());

        config.ignore.git_hosts = "gitlab.com".into();
        assert!(repository_button(&config, &remote, None, false).is_none());
    }
}
