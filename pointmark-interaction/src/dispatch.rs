//! Mode-driven routing of clicks into point store operations

use log::debug;

use pointmark_algorithms::ClickTarget;
use pointmark_core::{LabelingMode, PointId};

use crate::store::PointStore;

/// What a click did to the store
#[derive(Debug, Clone, PartialEq)]
pub enum ClickEffect {
    Added(PointId),
    SelectionChanged(Option<PointId>),
    Removed(PointId),
    Ignored,
}

/// Apply a click according to `mode`:
///
/// | mode   | empty space / surface | marker           |
/// |--------|-----------------------|------------------|
/// | add    | add a point there     | ignored          |
/// | select | ignored               | toggle selection |
/// | delete | ignored               | remove the point |
pub fn dispatch_click(
    mode: LabelingMode,
    target: ClickTarget,
    store: &mut PointStore,
) -> ClickEffect {
    let effect = match (mode, target) {
        (LabelingMode::Add, ClickTarget::Position(position)) => {
            ClickEffect::Added(store.add(position))
        }
        (LabelingMode::Select, ClickTarget::Marker(id)) => {
            store.toggle_selection(&id);
            ClickEffect::SelectionChanged(store.selected().cloned())
        }
        (LabelingMode::Delete, ClickTarget::Marker(id)) => {
            if store.remove(&id) {
                ClickEffect::Removed(id)
            } else {
                ClickEffect::Ignored
            }
        }
        _ => ClickEffect::Ignored,
    };
    debug!("{} mode click: {:?}", mode, effect);
    effect
}

/// A pointer-down on `hovered` may start a point drag only in select mode
/// and only on the selected marker.
pub fn drag_candidate(
    mode: LabelingMode,
    hovered: Option<&PointId>,
    selected: Option<&PointId>,
) -> Option<PointId> {
    match hovered {
        Some(id) if mode == LabelingMode::Select && selected == Some(id) => Some(id.clone()),
        _ => None,
    }
}
