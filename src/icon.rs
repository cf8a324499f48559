//! Language and icon resolution for image keys and `{lang}` placeholders

use crate::context::EditorSnapshot;

pub const VSCODE_IMAGE_KEY: &str = "vscode";
pub const VSCODE_INSIDERS_IMAGE_KEY: &str = "vscode-insiders";
pub const VSCODIUM_IMAGE_KEY: &str = "vscodium";
pub const VSCODIUM_INSIDERS_IMAGE_KEY: &str = "vscodium-insiders";
pub const IDLE_VSCODE_IMAGE_KEY: &str = "idle-vscode";
pub const IDLE_VSCODE_INSIDERS_IMAGE_KEY: &str = "idle-vscode-insiders";

/// Fallback icon for languages without a dedicated asset
pub const DEFAULT_FILE_ICON: &str = "text";

/// Maps documents to the icon/language key used for the large image
pub trait FileIconResolver: Send + Sync {
    fn resolve(&self, editor: &EditorSnapshot) -> String;

    /// Turn a bare asset name into the key the presence client expects
    fn icon_key(&self, name: &str) -> String {
        name.to_string()
    }
}

/// Resolves icons from the editor's language id, with a few aliases
#[derive(Debug, Clone, Default)]
pub struct LanguageIdIcons {
    /// Prepended to every icon key, e.g. an asset CDN URL
    pub base_url: Option<String>,
}

const LANGUAGE_ALIASES: &[(&str, &str)] = &[
    ("plaintext", DEFAULT_FILE_ICON),
    ("typescriptreact", "react"),
    ("javascriptreact", "react"),
    ("jsonc", "json"),
    ("shellscript", "shell"),
    ("dockercompose", "docker"),
    ("dockerfile", "docker"),
    ("cpp", "cplusplus"),
    ("csharp", "c-sharp"),
];

impl FileIconResolver for LanguageIdIcons {
    fn resolve(&self, editor: &EditorSnapshot) -> String {
        let id = editor.language_id.trim().to_lowercase();
        if id.is_empty() {
            return DEFAULT_FILE_ICON.to_string();
        }

        LANGUAGE_ALIASES
            .iter()
            .find(|(language, _)| *language == id)
            .map(|(_, icon)| icon.to_string())
            .unwrap_or(id)
    }

    fn icon_key(&self, name: &str) -> String {
        match &self.base_url {
            Some(base) => format!("{}/{}.png", base.trim_end_matches('/'), name),
            None => name.to_string(),
        }
    }
}

pub fn to_lower(value: &str) -> String {
    value.to_lowercase()
}

/// First character upper-cased, the rest lower-cased
pub fn to_title(value: &str) -> String {
    let lower = value.to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn to_upper(value: &str) -> String {
    value.to_uppercase()
}
