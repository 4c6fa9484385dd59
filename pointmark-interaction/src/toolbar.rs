//! Toolbar actions and the button strip that issues them

use serde::{Deserialize, Serialize};

use pointmark_core::LabelingMode;
use pointmark_visualization::ViewAction;

/// Everything the toolbar can ask for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ToolbarAction {
    SetMode(LabelingMode),
    ZoomIn,
    ZoomOut,
    ResetView,
    /// Discard the model and points and go back to file selection
    ChangeFile,
}

impl ToolbarAction {
    /// The one-shot camera command this action issues, if any
    pub fn view_action(self) -> Option<ViewAction> {
        match self {
            ToolbarAction::ZoomIn => Some(ViewAction::ZoomIn),
            ToolbarAction::ZoomOut => Some(ViewAction::ZoomOut),
            ToolbarAction::ResetView => Some(ViewAction::Reset),
            ToolbarAction::SetMode(_) | ToolbarAction::ChangeFile => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolbarButton {
    pub action: ToolbarAction,
    pub title: &'static str,
    /// Highlighted as the current mode
    pub active: bool,
}

/// Buttons in display order: file, view, then modes.
///
/// The change-file button only appears when a file can be changed.
pub fn toolbar_buttons(mode: LabelingMode, can_change_file: bool) -> Vec<ToolbarButton> {
    let mut buttons = Vec::with_capacity(7);
    if can_change_file {
        buttons.push(ToolbarButton {
            action: ToolbarAction::ChangeFile,
            title: "Choose another file",
            active: false,
        });
    }

    let view = [
        (ToolbarAction::ZoomIn, "Zoom in"),
        (ToolbarAction::ZoomOut, "Zoom out"),
        (ToolbarAction::ResetView, "Reset view"),
    ];
    buttons.extend(view.into_iter().map(|(action, title)| ToolbarButton {
        action,
        title,
        active: false,
    }));

    buttons.extend(LabelingMode::ALL.into_iter().map(|m| ToolbarButton {
        action: ToolbarAction::SetMode(m),
        title: match m {
            LabelingMode::Add => "Add points",
            LabelingMode::Select => "Select and move points",
            LabelingMode::Delete => "Delete points",
        },
        active: m == mode,
    }));
    buttons
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_actions() {
        assert_eq!(ToolbarAction::ZoomIn.view_action(), Some(ViewAction::ZoomIn));
        assert_eq!(ToolbarAction::ResetView.view_action(), Some(ViewAction::Reset));
        assert_eq!(ToolbarAction::SetMode(LabelingMode::Delete).view_action(), None);
        assert_eq!(ToolbarAction::ChangeFile.view_action(), None);
    }

    #[test]
    fn test_buttons_mark_current_mode() {
        let buttons = toolbar_buttons(LabelingMode::Select, false);
        assert_eq!(buttons.len(), 6);
        let active: Vec<_> = buttons.iter().filter(|b| b.active).map(|b| b.action).collect();
        assert_eq!(active, vec![ToolbarAction::SetMode(LabelingMode::Select)]);

        let buttons = toolbar_buttons(LabelingMode::Add, true);
        assert_eq!(buttons[0].action, ToolbarAction::ChangeFile);
    }
}
