//! User configuration for presence building.
//!
//! Every option has a default, so a config file only needs the keys the user
//! wants to change. A missing file means "all defaults".

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::exclusion::{deserialize_lenient, ExclusionPattern};
use crate::file_size::SizeStandard;
use crate::template::TemplateSet;

const CONFIG_DIR: &str = "editor-presence";
const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetailsConfig {
    pub enabled: bool,
    pub idle_enabled: bool,
    pub idle: String,
    pub viewing: String,
    pub editing: String,
    pub debugging: String,
}

impl DetailsConfig {
    pub fn templates(&self) -> TemplateSet<'_> {
        TemplateSet {
            idle: &self.idle,
            viewing: &self.viewing,
            editing: &self.editing,
            debugging: &self.debugging,
        }
    }
}

impl Default for DetailsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            idle_enabled: true,
            idle: "Idling".to_string(),
            viewing: "Viewing {file_name}".to_string(),
            editing: "Editing {file_name}".to_string(),
            debugging: "Debugging {file_name}".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StateConfig {
    pub enabled: bool,
    pub idle_enabled: bool,
    pub idle: String,
    pub viewing: String,
    pub editing: String,
    pub debugging: String,
    /// Used for `{workspace}` and `{workspace_folder}` outside any workspace
    pub no_workspace_found: String,
}

impl StateConfig {
    pub fn templates(&self) -> TemplateSet<'_> {
        TemplateSet {
            idle: &self.idle,
            viewing: &self.viewing,
            editing: &self.editing,
            debugging: &self.debugging,
        }
    }
}

impl Default for StateConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            idle_enabled: true,
            idle: "{empty}".to_string(),
            viewing: "In {workspace} {problems}".to_string(),
            editing: "In {workspace} {problems}".to_string(),
            debugging: "Debugging: {workspace}".to_string(),
            no_workspace_found: "{empty}".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LargeImageConfig {
    /// `{lang}` is replaced with the resolved file icon
    pub key: String,
    pub text: String,
    pub idle_key: String,
    pub idle_text: String,
}

impl Default for LargeImageConfig {
    fn default() -> Self {
        Self {
            key: "{lang}".to_string(),
            text: "Editing a {LANG} file".to_string(),
            idle_key: "{large_image_idle_icon}".to_string(),
            idle_text: "Idling".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmallImageConfig {
    pub key: String,
    pub text: String,
    /// Replaces `{small_image_icon}` while a debug session is active
    pub debugging_key: String,
}

impl Default for SmallImageConfig {
    fn default() -> Self {
        Self {
            key: "{small_image_icon}".to_string(),
            text: "{app_name}".to_string(),
            debugging_key: "debug".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageConfig {
    pub large: LargeImageConfig,
    pub small: SmallImageConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProblemsConfig {
    pub enabled: bool,
    /// `{problems_count}` is replaced with the live count
    pub text: String,
}

impl Default for ProblemsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            text: "- {problems_count} problems found".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdleConfig {
    pub reset_elapsed_time: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ButtonConfig {
    pub enabled: bool,
    pub label: String,
    pub url: String,
}

impl ButtonConfig {
    pub fn is_complete(&self) -> bool {
        self.enabled && !self.label.is_empty() && !self.url.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ButtonsConfig {
    /// Shown while editing a file in a repository with a remote. An empty
    /// `url` means "link to the repository".
    pub active: ButtonConfig,
    /// Shown while idle
    pub inactive: ButtonConfig,
}

impl Default for ButtonsConfig {
    fn default() -> Self {
        Self {
            active: ButtonConfig {
                enabled: true,
                label: "View Repository".to_string(),
                url: String::new(),
            },
            inactive: ButtonConfig::default(),
        }
    }
}

/// Details text shown for an ignored workspace
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WorkspaceIgnoreText {
    PerWorkspace(HashMap<String, String>),
    Text(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IgnoreConfig {
    #[serde(deserialize_with = "deserialize_lenient")]
    pub workspaces: ExclusionPattern,
    pub workspaces_text: Option<WorkspaceIgnoreText>,
    #[serde(deserialize_with = "deserialize_lenient")]
    pub repositories: ExclusionPattern,
    #[serde(deserialize_with = "deserialize_lenient")]
    pub organizations: ExclusionPattern,
    #[serde(deserialize_with = "deserialize_lenient")]
    pub git_hosts: ExclusionPattern,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSizeConfig {
    pub standard: SizeStandard,
    pub precision: usize,
}

impl Default for FileSizeConfig {
    fn default() -> Self {
        Self {
            standard: SizeStandard::Iec,
            precision: 2,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PresenceConfig {
    pub details: DetailsConfig,
    pub state: StateConfig,
    pub images: ImageConfig,
    pub problems: ProblemsConfig,
    pub idle: IdleConfig,
    pub buttons: ButtonsConfig,
    pub ignore: IgnoreConfig,
    pub file_size: FileSizeConfig,
}

impl PresenceConfig {
    /// `<config dir>/editor-presence/config.json`
    pub fn default_path() -> Result<PathBuf> {
        let dir = dirs::config_dir().ok_or(Error::NoConfigDir)?;
        Ok(dir.join(CONFIG_DIR).join(CONFIG_FILE))
    }

    pub fn load(path: &Path) -> Result<Self> {
        tracing::debug!("Loading presence config from {}", path.display());

        if !path.exists() {
            tracing::info!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_json_str(&contents)
    }

    pub fn from_json_str(contents: &str) -> Result<Self> {
        let config: PresenceConfig = serde_json::from_str(contents)?;
        for warning in config.validate() {
            tracing::warn!("Presence config: {}", warning);
        }
        Ok(config)
    }

    /// Combinations of options that load fine but will never show anything
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.buttons.active.enabled && self.buttons.active.label.is_empty() {
            warnings.push("active button is enabled but has no label".to_string());
        }

        let inactive = &self.buttons.inactive;
        if inactive.enabled && (inactive.label.is_empty() || inactive.url.is_empty()) {
            warnings.push("inactive button is enabled but needs both a label and a url".to_string());
        }

        if !self.details.enabled && !self.state.enabled {
            warnings.push("both details and state are disabled".to_string());
        }

        warnings
    }
}
