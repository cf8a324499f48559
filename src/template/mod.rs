//! Template selection and placeholder expansion

mod placeholder;
mod selector;

pub use placeholder::{
    expand, expand_with, full_dir_name, git_repo_name, ResolvedContext, Token, WorkspaceNames,
    EMPTY_PLACEHOLDER,
};
pub use selector::{select, InteractionState, TemplateKind, TemplateSet};
