//! Scripted labeling session
//!
//! This demo drives a session the way a viewport would:
//! - Rejecting an unsupported file
//! - Loading a triangulated mesh (normalized on load)
//! - Adding, renaming, moving and deleting points
//! - Zoom and reset through one-shot view commands
//!
//! Run with `RUST_LOG=debug` to see every store mutation and gesture.

use anyhow::{bail, Context};
use log::info;
use nalgebra::Vector3;

use pointmark_core::{
    LabelingMode, Point3d, ScreenPoint, Transform3D, Transformable, TriangleMesh,
};
use pointmark_interaction::{
    ClickEffect, LabelingConfig, LabelingSession, ListAction, PointerId, SessionState,
    ToolbarAction,
};
use pointmark_io::{InMemoryLoader, ModelKind};
use pointmark_visualization::{RenderCommand, Viewport};

const WIDTH: f64 = 1280.0;
const HEIGHT: f64 = 720.0;
const MOUSE: PointerId = PointerId(1);

/// A square pyramid sitting on the ground, in arbitrary file units
fn pyramid() -> TriangleMesh {
    let mut mesh = TriangleMesh::new();
    let base = [
        mesh.add_vertex(Point3d::new(-50.0, 0.0, -50.0)),
        mesh.add_vertex(Point3d::new(50.0, 0.0, -50.0)),
        mesh.add_vertex(Point3d::new(50.0, 0.0, 50.0)),
        mesh.add_vertex(Point3d::new(-50.0, 0.0, 50.0)),
    ];
    let apex = mesh.add_vertex(Point3d::new(0.0, 80.0, 0.0));
    for i in 0..4 {
        mesh.add_face([base[i], base[(i + 1) % 4], apex]);
    }
    mesh.add_face([base[0], base[2], base[1]]);
    mesh.add_face([base[0], base[3], base[2]]);
    // the exporter placed it far from the origin
    mesh.transform(&Transform3D::translation(Vector3::new(200.0, 0.0, -120.0)));
    mesh
}

fn project(session: &LabelingSession, world: Point3d) -> ScreenPoint {
    let camera = session.camera();
    let ndc = (camera.projection_matrix() * camera.view_matrix()).transform_point(&world);
    ScreenPoint::new((ndc.x + 1.0) / 2.0 * WIDTH, (1.0 - ndc.y) / 2.0 * HEIGHT)
}

fn click(session: &mut LabelingSession, world: Point3d) -> ClickEffect {
    let at = project(session, world);
    session.pointer_down(MOUSE, at);
    session.pointer_up(MOUSE, at)
}

fn print_list(session: &LabelingSession) {
    let list = session.list_view();
    println!("\n{}", list.header);
    for row in &list.rows {
        let marker = if row.selected { '*' } else { ' ' };
        println!(" {} {} {:<12} {}", marker, row.swatch, row.display_label, row.coordinates);
    }
    if let Some(hint) = &list.empty_hint {
        println!("   {}", hint);
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("pointmark labeling session");
    println!("==========================");

    let mut session = LabelingSession::new(LabelingConfig::default());
    session.set_viewport(Viewport::new(WIDTH, HEIGHT));
    session
        .registry_mut()
        .register(ModelKind::MeshTextTriangulated, Box::new(InMemoryLoader::new(vec![pyramid()])));

    if let Err(err) = session.open_file("file:///tmp/readme.txt", "readme.txt") {
        println!("Rejected: {}", err);
    }

    let ticket = session
        .open_file("file:///tmp/pyramid.stl", "pyramid.stl")
        .context("pyramid.stl should be accepted")?;
    session.load(ticket);
    if let SessionState::Failed { message } = session.state() {
        bail!("loading the pyramid failed: {}", message);
    }
    if let Some(model) = session.model() {
        info!("{} triangles, model transform:{}", model.triangle_count(), model.transform.matrix);
    }
    print_list(&session);

    // Near the apex, on the ground beside the model, and on the front face
    let targets = [
        Point3d::new(0.0, 1.0, 0.0),
        Point3d::new(2.5, 0.0, 0.5),
        Point3d::new(0.0, 0.3, 0.6),
    ];
    for target in targets {
        match click(&mut session, target) {
            ClickEffect::Added(id) => {
                let point = session.store().get(&id).context("added point is stored")?;
                println!(
                    "Added {} at ({:.3}, {:.3}, {:.3})",
                    point.label, point.position.x, point.position.y, point.position.z
                );
            }
            other => println!("Click at {:?} had no effect: {:?}", target, other),
        }
    }

    if let Some(first) = session.points().first().map(|p| p.id.clone()) {
        session.apply_list_action(ListAction::Rename(first, "apex".to_string()));
    }

    // Move the ground point: select it, then drag it across the drag plane
    session.apply_toolbar(ToolbarAction::SetMode(LabelingMode::Select));
    if let Some(ground) = session.points().get(1).cloned() {
        if session.selected() != Some(&ground.id) {
            click(&mut session, ground.position);
        }
        let from = project(&session, ground.position);
        let to = project(&session, Point3d::new(2.5, 0.0, -1.0));
        session.pointer_down(MOUSE, from);
        println!("Cursor while dragging: {}", session.cursor().css_name());
        session.pointer_move(MOUSE, to);
        session.pointer_up(MOUSE, to);
    }
    print_list(&session);

    session.apply_toolbar(ToolbarAction::SetMode(LabelingMode::Delete));
    if let Some(last) = session.points().last().map(|p| p.position) {
        println!("Delete click: {:?}", click(&mut session, last));
    }

    session.apply_toolbar(ToolbarAction::ZoomIn);
    session.sync_view();
    session.sync_view();
    println!("\nCamera distance after one zoom in: {:.3}", session.camera().distance());
    session.apply_toolbar(ToolbarAction::ResetView);
    session.sync_view();
    println!("Camera distance after reset: {:.3}", session.camera().distance());

    let commands = session.render_commands();
    let markers = commands
        .iter()
        .filter(|c| matches!(c, RenderCommand::Marker { .. }))
        .count();
    println!("Render list: {} commands, {} markers", commands.len(), markers);
    print_list(&session);

    session.apply_toolbar(ToolbarAction::ChangeFile);
    println!("\nAfter changing file: {:?}", session.state());
    print_list(&session);

    Ok(())
}
