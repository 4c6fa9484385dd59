//! Scene description handed to the renderer
//!
//! [`build_render_commands`] is a pure function of the loaded model, the
//! points, the selection and the mode. The renderer draws the returned list
//! verbatim; it never reads interaction state directly.

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use pointmark_core::{FeaturePoint, LabelingMode, Point3d, PointId, Transform3D};
use pointmark_io::{LoadedModel, ModelKind};

/// Appearance of point markers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerStyle {
    pub radius: f64,
    pub selected_emissive: f32,
    pub idle_emissive: f32,
    pub selected_opacity: f32,
    pub idle_opacity: f32,
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            radius: 0.08,
            selected_emissive: 0.5,
            idle_emissive: 0.2,
            selected_opacity: 1.0,
            idle_opacity: 0.9,
        }
    }
}

/// Per-marker GPU instance data
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct MarkerInstance {
    pub position: [f32; 3],
    pub radius: f32,
    /// RGB plus opacity
    pub color: [f32; 4],
    pub emissive_intensity: f32,
}

impl MarkerInstance {
    pub fn from_point(point: &FeaturePoint, selected: bool, style: &MarkerStyle) -> Self {
        let [r, g, b] = point.color.to_linear_f32();
        let (emissive, opacity) = if selected {
            (style.selected_emissive, style.selected_opacity)
        } else {
            (style.idle_emissive, style.idle_opacity)
        };
        Self {
            position: [
                point.position.x as f32,
                point.position.y as f32,
                point.position.z as f32,
            ],
            radius: style.radius as f32,
            color: [r, g, b, opacity],
            emissive_intensity: emissive,
        }
    }
}

/// One item of the scene to draw
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    AmbientLight { intensity: f32 },
    DirectionalLight { position: Point3d, intensity: f32, cast_shadow: bool },
    /// The loaded model, placed by `transform`
    Model { kind: ModelKind, transform: Transform3D },
    /// Reference grid on the ground; never hittable
    Grid { size: f64, divisions: u32 },
    /// `draggable` marks the one marker a pointer drag may move
    Marker { id: PointId, selected: bool, draggable: bool, instance: MarkerInstance },
}

/// Pointer cursor to show over the viewport
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CursorStyle {
    #[default]
    Default,
    Pointer,
    Grab,
    Grabbing,
}

impl CursorStyle {
    pub fn css_name(self) -> &'static str {
        match self {
            CursorStyle::Default => "default",
            CursorStyle::Pointer => "pointer",
            CursorStyle::Grab => "grab",
            CursorStyle::Grabbing => "grabbing",
        }
    }
}

/// Cursor for the current hover state: `grabbing` while a point is being
/// dragged, `grab` over the draggable (selected, select mode) marker,
/// `pointer` over any other marker.
pub fn cursor_style(
    hovered_marker: Option<&PointId>,
    selected: Option<&PointId>,
    mode: LabelingMode,
    dragging: bool,
) -> CursorStyle {
    if dragging {
        return CursorStyle::Grabbing;
    }
    match hovered_marker {
        Some(id) if mode == LabelingMode::Select && selected == Some(id) => CursorStyle::Grab,
        Some(_) => CursorStyle::Pointer,
        None => CursorStyle::Default,
    }
}

/// Build the draw list for one frame
pub fn build_render_commands(
    model: Option<&LoadedModel>,
    points: &[FeaturePoint],
    selected: Option<&PointId>,
    mode: LabelingMode,
    style: &MarkerStyle,
) -> Vec<RenderCommand> {
    let mut commands = Vec::with_capacity(points.len() + 5);

    commands.push(RenderCommand::AmbientLight { intensity: 0.6 });
    commands.push(RenderCommand::DirectionalLight {
        position: Point3d::new(5.0, 5.0, 5.0),
        intensity: 1.0,
        cast_shadow: true,
    });
    commands.push(RenderCommand::DirectionalLight {
        position: Point3d::new(-5.0, 5.0, -5.0),
        intensity: 0.3,
        cast_shadow: false,
    });

    if let Some(model) = model {
        commands.push(RenderCommand::Model {
            kind: model.kind(),
            transform: model.transform,
        });
    }

    commands.push(RenderCommand::Grid { size: 10.0, divisions: 10 });

    commands.extend(points.iter().map(|point| {
        let is_selected = selected == Some(&point.id);
        RenderCommand::Marker {
            id: point.id.clone(),
            selected: is_selected,
            draggable: is_selected && mode == LabelingMode::Select,
            instance: MarkerInstance::from_point(point, is_selected, style),
        }
    }));

    commands
}
