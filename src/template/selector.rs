/// The four mutually exclusive templates for one text field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplateSet<'a> {
    pub idle: &'a str,
    pub viewing: &'a str,
    pub editing: &'a str,
    pub debugging: &'a str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateKind {
    Idle,
    Debugging,
    Viewing,
    Editing,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InteractionState {
    pub has_active_editor: bool,
    pub is_debugging: bool,
    pub is_viewing: bool,
}

impl InteractionState {
    /// No editor beats debugging, which beats viewing, which beats editing
    pub fn kind(self) -> TemplateKind {
        if !self.has_active_editor {
            TemplateKind::Idle
        } else if self.is_debugging {
            TemplateKind::Debugging
        } else if self.is_viewing {
            TemplateKind::Viewing
        } else {
            TemplateKind::Editing
        }
    }
}

pub fn select<'a>(state: InteractionState, templates: TemplateSet<'a>) -> &'a str {
    match state.kind() {
        TemplateKind::Idle => templates.idle,
        TemplateKind::Debugging => templates.debugging,
        TemplateKind::Viewing => templates.viewing,
        TemplateKind::Editing => templates.editing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEMPLATES: TemplateSet<'static> = TemplateSet {
        idle: "idle",
        viewing: "viewing",
        editing: "editing",
        debugging: "debugging",
    };

    fn state(has_active_editor: bool, is_debugging: bool, is_viewing: bool) -> InteractionState {
        InteractionState {
            has_active_editor,
            is_debugging,
            is_viewing,
        }
    }

    #[test]
    fn test_no_editor_is_always_idle() {
        assert_eq!(select(state(false, true, true), TEMPLATES), "idle");
        assert_eq!(select(state(false, false, false), TEMPLATES), "idle");
    }

    #[test]
    fn test_debugging_beats_viewing() {
        assert_eq!(select(state(true, true, true), TEMPLATES), "debugging");
        assert_eq!(select(state(true, true, false), TEMPLATES), "debugging");
    }

    #[test]
    fn test_viewing_then_editing() {
        assert_eq!(select(state(true, false, true), TEMPLATES), "viewing");
        assert_eq!(select(state(true, false, false), TEMPLATES), "editing");
    }
}
