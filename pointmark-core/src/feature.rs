//! Feature points: labeled, colored positions attached to a loaded model

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::color::Color;
use crate::point::Point3d;

/// Opaque identifier of a feature point, unique within a session
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PointId(String);

impl PointId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PointId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// A labeled point placed by the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeaturePoint {
    pub id: PointId,
    pub position: Point3d,
    pub label: String,
    pub color: Color,
    /// Milliseconds since the Unix epoch; metadata only, never used for ordering
    pub created_at: u64,
}

impl FeaturePoint {
    /// Apply the fields present in `update`, leaving identity, color and
    /// creation time untouched.
    pub fn apply(&mut self, update: PointUpdate) {
        if let Some(position) = update.position {
            self.position = position;
        }
        if let Some(label) = update.label {
            self.label = label;
        }
    }
}

/// A partial change to the mutable fields of a [`FeaturePoint`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PointUpdate {
    pub position: Option<Point3d>,
    pub label: Option<String>,
}

impl PointUpdate {
    pub fn position(position: Point3d) -> Self {
        Self {
            position: Some(position),
            label: None,
        }
    }

    pub fn label(label: impl Into<String>) -> Self {
        Self {
            position: None,
            label: Some(label.into()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.position.is_none() && self.label.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_point() -> FeaturePoint {
        FeaturePoint {
            id: PointId::new("pt_1_abc"),
            position: Point3d::new(1.0, 2.0, 3.0),
            label: "Point 1".to_string(),
            color: Color::rgb(255, 0, 0),
            created_at: 42,
        }
    }

    #[test]
    fn test_apply_merges_only_given_fields() {
        let mut point = sample_point();
        point.apply(PointUpdate::label("nose tip"));
        assert_eq!(point.label, "nose tip");
        assert_eq!(point.position, Point3d::new(1.0, 2.0, 3.0));

        point.apply(PointUpdate::position(Point3d::new(0.0, 0.0, 0.0)));
        assert_eq!(point.label, "nose tip");
        assert_eq!(point.position, Point3d::origin());
        assert_eq!(point.id.as_str(), "pt_1_abc");
        assert_eq!(point.color, Color::rgb(255, 0, 0));
        assert_eq!(point.created_at, 42);
    }

    #[test]
    fn test_empty_update_is_noop() {
        let mut point = sample_point();
        let before = point.clone();
        assert!(PointUpdate::default().is_empty());
        point.apply(PointUpdate::default());
        assert_eq!(point, before);
    }
}
