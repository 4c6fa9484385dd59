//! Rows of the point list panel and the edits it can make

use serde::{Deserialize, Serialize};

use pointmark_core::{Color, FeaturePoint, PointId, PointUpdate};

use crate::store::PointStore;

/// Shown in place of rows when the store is empty
pub const EMPTY_LIST_HINT: &str = "Click the 3D view in add mode to add points.";

/// One row of the list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointRow {
    pub id: PointId,
    /// Label as displayed, with a fallback for blank labels
    pub display_label: String,
    /// Label as stored, for the rename field
    pub label: String,
    pub swatch: Color,
    /// `(x, y, z)` with two decimals
    pub coordinates: String,
    pub selected: bool,
}

impl PointRow {
    fn from_point(point: &FeaturePoint, selected: bool) -> Self {
        let display_label = if point.label.is_empty() {
            let short: String = point.id.as_str().chars().take(6).collect();
            format!("Point {}", short)
        } else {
            point.label.clone()
        };
        let p = &point.position;
        Self {
            id: point.id.clone(),
            display_label,
            label: point.label.clone(),
            swatch: point.color,
            coordinates: format!("({:.2}, {:.2}, {:.2})", p.x, p.y, p.z),
            selected,
        }
    }
}

/// Snapshot of the list panel, in store order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointListView {
    pub header: String,
    pub rows: Vec<PointRow>,
    pub empty_hint: Option<String>,
}

impl PointListView {
    pub fn build(store: &PointStore) -> Self {
        let rows: Vec<PointRow> = store
            .points()
            .iter()
            .map(|point| PointRow::from_point(point, store.is_selected(&point.id)))
            .collect();
        Self {
            header: format!("Feature Points ({})", rows.len()),
            empty_hint: rows.is_empty().then(|| EMPTY_LIST_HINT.to_string()),
            rows,
        }
    }
}

/// Edits issued from the list panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ListAction {
    /// Select the row, or clear the selection if it is already selected
    Select(PointId),
    Rename(PointId, String),
    Delete(PointId),
}

/// Apply a list edit through the same store operations the viewport uses
pub fn apply_list_action(store: &mut PointStore, action: ListAction) {
    match action {
        ListAction::Select(id) => store.toggle_selection(&id),
        ListAction::Rename(id, label) => {
            store.update(&id, PointUpdate::label(label));
        }
        ListAction::Delete(id) => {
            store.remove(&id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::IdGenerator;
    use pointmark_core::{FixedClock, Palette, Point3d};

    fn store() -> PointStore {
        PointStore::with_parts(Palette::default(), IdGenerator::seeded(5), Box::new(FixedClock(99)))
    }

    #[test]
    fn test_empty_list() {
        let view = PointListView::build(&store());
        assert_eq!(view.header, "Feature Points (0)");
        assert!(view.rows.is_empty());
        assert_eq!(view.empty_hint.as_deref(), Some(EMPTY_LIST_HINT));
    }

    #[test]
    fn test_rows_format() {
        let mut store = store();
        let a = store.add(Point3d::new(1.0, -0.5, 2.346));
        let b = store.add(Point3d::new(0.0, 0.0, 0.0));
        store.update(&a, PointUpdate::label(""));

        let view = PointListView::build(&store);
        assert_eq!(view.header, "Feature Points (2)");
        assert!(view.empty_hint.is_none());

        let first = &view.rows[0];
        assert_eq!(first.id, a);
        assert_eq!(first.display_label, "Point pt_99_");
        assert_eq!(first.label, "");
        assert_eq!(first.coordinates, "(1.00, -0.50, 2.35)");
        assert!(!first.selected);

        assert_eq!(view.rows[1].id, b);
        assert_eq!(view.rows[1].display_label, "Point 2");
        assert!(view.rows[1].selected);
    }

    #[test]
    fn test_list_actions() {
        let mut store = store();
        let a = store.add(Point3d::origin());
        let b = store.add(Point3d::origin());

        apply_list_action(&mut store, ListAction::Select(a.clone()));
        assert_eq!(store.selected(), Some(&a));
        apply_list_action(&mut store, ListAction::Select(a.clone()));
        assert_eq!(store.selected(), None);

        apply_list_action(&mut store, ListAction::Rename(b.clone(), "chin".into()));
        assert_eq!(store.get(&b).unwrap().label, "chin");

        apply_list_action(&mut store, ListAction::Delete(a.clone()));
        assert!(store.get(&a).is_none());
        apply_list_action(&mut store, ListAction::Rename(a, "gone".into()));
        assert_eq!(store.len(), 1);
    }
}
