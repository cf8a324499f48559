//! Rich presence for code editors.
//!
//! The host feeds editor, workspace and git snapshots into a
//! [`PresenceManager`], which expands the user's templates into a
//! [`PresenceState`] and hands it to every registered [`PresenceProvider`].

pub mod composer;
pub mod config;
pub mod context;
pub mod diagnostics;
pub mod error;
pub mod exclusion;
pub mod file_size;
pub mod icon;
pub mod logging;
pub mod presence;
pub mod template;

#[cfg(feature = "discord")]
pub mod discord;

pub use composer::PresenceComposer;
pub use config::PresenceConfig;
pub use context::{ActivityInput, AppInfo, EditorSnapshot, GitContext, GitRemote, WorkspaceContext};
pub use diagnostics::{Diagnostic, DiagnosticsCounter, Severity};
pub use error::{Error, Result};
pub use exclusion::{is_excluded, ExclusionPattern};
pub use presence::{Button, PresenceManager, PresenceProvider, PresenceState};
