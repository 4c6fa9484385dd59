//! The labeling session: one model, its points, and the pointer pipeline
//!
//! Pointer events flow through the [`GestureClassifier`], are projected into
//! world rays by the camera, resolved against the hit targets by the
//! [`HitResolver`], routed by the current mode and finally applied to the
//! [`PointStore`]. Everything runs on the caller's thread; the only
//! asynchronous step is model loading, which is fenced by a
//! [`ModelGeneration`] token.

use log::{debug, info, warn};

use pointmark_algorithms::{ClickTarget, HitResolver, HitTarget, PlaneModel};
use pointmark_core::{FeaturePoint, LabelingMode, PointId, PointUpdate, Ray, Result, ScreenPoint};
use pointmark_io::{
    classify_or_reject, LoadTicket, LoadedModel, LoaderRegistry, ModelGeneration, ModelSource,
};
use pointmark_visualization::{
    build_render_commands, cursor_style, Camera, CameraControls, CursorStyle, OrbitControls,
    RenderCommand, ViewController, ViewRequests, Viewport,
};

use crate::config::LabelingConfig;
use crate::dispatch::{dispatch_click, drag_candidate, ClickEffect};
use crate::gesture::{GestureClassifier, PointerDown, PointerId, PointerMove};
use crate::list::{apply_list_action, ListAction, PointListView};
use crate::store::PointStore;
use crate::toolbar::ToolbarAction;

/// Where the session is in the model lifecycle
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    /// Waiting for the user to pick a file
    Empty,
    /// A load was started and has not completed
    Loading { file_name: String },
    /// A model is loaded and accepts pointer input
    Ready,
    /// The last load failed; the session holds no model and no points
    Failed { message: String },
}

/// A labeling session over one model at a time
pub struct LabelingSession {
    config: LabelingConfig,
    registry: LoaderRegistry,
    state: SessionState,
    generation: ModelGeneration,
    model: Option<LoadedModel>,
    store: PointStore,
    mode: LabelingMode,
    gestures: GestureClassifier,
    resolver: HitResolver,
    controls: OrbitControls,
    view_requests: ViewRequests,
    view: ViewController,
    viewport: Viewport,
    hovered: Option<PointId>,
}

impl LabelingSession {
    pub fn new(config: LabelingConfig) -> Self {
        let store = PointStore::new(config.palette.clone());
        Self::with_store(config, store)
    }

    /// Session around a prepared store (custom clock or id generator)
    pub fn with_store(config: LabelingConfig, store: PointStore) -> Self {
        let viewport = Viewport::new(1280.0, 720.0);
        Self {
            registry: config.loader_registry(),
            gestures: GestureClassifier::new(config.click_threshold_px),
            controls: config.orbit_controls(viewport.aspect_ratio()),
            config,
            state: SessionState::Empty,
            generation: ModelGeneration::default(),
            model: None,
            store,
            mode: LabelingMode::default(),
            resolver: HitResolver::new(),
            view_requests: ViewRequests::new(),
            view: ViewController::new(),
            viewport,
            hovered: None,
        }
    }

    pub fn config(&self) -> &LabelingConfig {
        &self.config
    }

    /// Loaders for mesh formats are registered here by the host
    pub fn registry_mut(&mut self) -> &mut LoaderRegistry {
        &mut self.registry
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_ready(&self) -> bool {
        self.state == SessionState::Ready
    }

    pub fn generation(&self) -> ModelGeneration {
        self.generation
    }

    pub fn model(&self) -> Option<&LoadedModel> {
        self.model.as_ref()
    }

    pub fn mode(&self) -> LabelingMode {
        self.mode
    }

    pub fn store(&self) -> &PointStore {
        &self.store
    }

    pub fn points(&self) -> &[FeaturePoint] {
        self.store.points()
    }

    pub fn selected(&self) -> Option<&PointId> {
        self.store.selected()
    }

    pub fn camera(&self) -> &Camera {
        self.controls.camera()
    }

    pub fn controls(&self) -> &OrbitControls {
        &self.controls
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.controls.set_aspect_ratio(viewport.aspect_ratio());
    }

    // Model lifecycle

    /// Accept a user-picked file and start loading it.
    ///
    /// Unsupported files are rejected without touching the current model or
    /// points. Otherwise the current model and points are discarded and a
    /// ticket for the new load is returned.
    pub fn open_file(&mut self, locator: &str, file_name: &str) -> Result<LoadTicket> {
        let kind = match classify_or_reject(file_name) {
            Ok(kind) => kind,
            Err(err) => {
                warn!("{}", err);
                return Err(err);
            }
        };

        self.discard_model();
        self.state = SessionState::Loading {
            file_name: file_name.to_string(),
        };
        info!("loading {} as {}", file_name, kind);
        Ok(LoadTicket {
            generation: self.generation,
            source: ModelSource::new(locator, file_name, kind),
        })
    }

    /// Deliver the outcome of the load started with `ticket`.
    ///
    /// Returns `false` when the ticket belongs to an earlier model and the
    /// outcome was dropped.
    pub fn complete_load(&mut self, ticket: LoadTicket, outcome: Result<LoadedModel>) -> bool {
        if !ticket.is_current(self.generation) {
            warn!(
                "dropping stale load of {} (generation {}, current {})",
                ticket.source.file_name,
                ticket.generation.value(),
                self.generation.value()
            );
            return false;
        }

        match outcome {
            Ok(model) => {
                info!("{} ready", model.source.file_name);
                self.model = Some(model);
                self.store.reset();
                self.controls.reset();
                self.state = SessionState::Ready;
            }
            Err(err) => {
                warn!("failed to load {}: {}", ticket.source.file_name, err);
                self.model = None;
                self.store.reset();
                self.state = SessionState::Failed {
                    message: err.to_string(),
                };
            }
        }
        true
    }

    /// Run the registry loader for `ticket` synchronously and deliver it
    pub fn load(&mut self, ticket: LoadTicket) -> bool {
        let outcome = self.registry.load(&ticket.source);
        self.complete_load(ticket, outcome)
    }

    /// Drop the model and every point and return to file selection
    pub fn change_file(&mut self) {
        self.discard_model();
        self.state = SessionState::Empty;
        info!("returned to file selection");
    }

    fn discard_model(&mut self) {
        self.generation.bump();
        self.model = None;
        self.store.reset();
        self.gestures.clear();
        self.hovered = None;
        self.controls.set_enabled(true);
        self.view_requests.clear();
    }

    // Toolbar and list

    pub fn apply_toolbar(&mut self, action: ToolbarAction) {
        if let Some(view_action) = action.view_action() {
            self.view_requests.issue(view_action);
            return;
        }
        match action {
            ToolbarAction::SetMode(mode) => self.set_mode(mode),
            ToolbarAction::ChangeFile => self.change_file(),
            _ => {}
        }
    }

    pub fn set_mode(&mut self, mode: LabelingMode) {
        if self.mode != mode {
            debug!("mode {} -> {}", self.mode, mode);
            self.mode = mode;
        }
    }

    pub fn apply_list_action(&mut self, action: ListAction) {
        apply_list_action(&mut self.store, action);
        if self.hovered.as_ref().is_some_and(|id| self.store.get(id).is_none()) {
            self.hovered = None;
        }
    }

    pub fn list_view(&self) -> PointListView {
        PointListView::build(&self.store)
    }

    // Pointer input

    pub fn pointer_down(&mut self, pointer: PointerId, position: ScreenPoint) {
        if !self.is_ready() {
            return;
        }
        let hovered = self.marker_at(&position);
        let grabbed = drag_candidate(self.mode, hovered.as_ref(), self.store.selected());
        let down = self.gestures.on_pointer_down(pointer, position, grabbed);
        if let PointerDown::PointDragStarted(_) = down {
            self.controls.set_enabled(false);
        }
    }

    pub fn pointer_move(&mut self, pointer: PointerId, position: ScreenPoint) {
        if !self.is_ready() {
            return;
        }
        match self.gestures.on_pointer_move(pointer, position) {
            PointerMove::DragPoint { id, position } => {
                let target =
                    self.ray_at(&position).and_then(|ray| self.resolver.resolve_drag(&ray));
                if let Some(target) = target {
                    self.store.update(&id, PointUpdate::position(target));
                }
            }
            PointerMove::Orbit { dx, dy } => self.controls.orbit(dx, dy),
            PointerMove::Ignored => {
                if self.gestures.active().is_none() {
                    self.hovered = self.marker_at(&position);
                }
            }
        }
    }

    /// Finish the gesture for `pointer`; a click is routed by the current mode
    pub fn pointer_up(&mut self, pointer: PointerId, position: ScreenPoint) -> ClickEffect {
        if !self.is_ready() {
            return ClickEffect::Ignored;
        }
        let up = self.gestures.on_pointer_up(pointer, position);
        if up.ended_drag.is_some() {
            self.controls.set_enabled(true);
        }
        let effect = match up.click {
            Some(click) => self.click(&click),
            None => ClickEffect::Ignored,
        };
        // the click may have added or removed the marker under the pointer
        self.hovered = self.marker_at(&position);
        effect
    }

    /// Abort the gesture for `pointer` without a click. A cancelled pointer
    /// no longer hovers anything.
    pub fn pointer_cancel(&mut self, pointer: PointerId) {
        if self.gestures.on_pointer_cancel(pointer).is_some() {
            self.controls.set_enabled(true);
            self.hovered = None;
        }
    }

    pub fn pointer_leave(&mut self) {
        self.hovered = None;
    }

    fn click(&mut self, position: &ScreenPoint) -> ClickEffect {
        let target = match self.ray_at(position) {
            Some(ray) => {
                let targets = self.hit_targets();
                self.resolver.resolve_click(&ray, &targets)
            }
            None => ClickTarget::Miss,
        };
        dispatch_click(self.mode, target, &mut self.store)
    }

    fn ray_at(&self, position: &ScreenPoint) -> Option<Ray> {
        self.controls.camera().ray_through(position, &self.viewport)
    }

    fn marker_at(&self, position: &ScreenPoint) -> Option<PointId> {
        let ray = self.ray_at(position)?;
        match self.resolver.resolve_click(&ray, &self.hit_targets()) {
            ClickTarget::Marker(id) => Some(id),
            _ => None,
        }
    }

    /// Surfaces of the model, the ground catch plane (add mode only) and
    /// every point marker
    fn hit_targets(&self) -> Vec<HitTarget<'_>> {
        let mut targets = Vec::new();
        if let Some(model) = &self.model {
            targets.extend(model.surfaces.iter().map(|mesh| HitTarget::Surface {
                mesh,
                transform: model.transform,
            }));
        }
        if self.mode == LabelingMode::Add {
            targets.push(HitTarget::GroundPlane {
                plane: PlaneModel::horizontal(0.0),
                half_extent: self.config.ground_half_extent,
            });
        }
        let radius = self.config.marker.radius;
        targets.extend(self.store.points().iter().map(|point| HitTarget::Marker {
            id: &point.id,
            center: point.position,
            radius,
        }));
        targets
    }

    // Frame output

    /// Apply the pending view command, if it has not been applied yet
    pub fn sync_view(&mut self) -> bool {
        self.view.sync(&mut self.view_requests, &mut self.controls)
    }

    pub fn view_requests(&self) -> &ViewRequests {
        &self.view_requests
    }

    pub fn render_commands(&self) -> Vec<RenderCommand> {
        build_render_commands(
            self.model.as_ref(),
            self.store.points(),
            self.store.selected(),
            self.mode,
            &self.config.marker,
        )
    }

    pub fn cursor(&self) -> CursorStyle {
        cursor_style(
            self.hovered.as_ref(),
            self.store.selected(),
            self.mode,
            self.gestures.is_dragging_point(),
        )
    }

    pub fn orbit_enabled(&self) -> bool {
        self.controls.is_enabled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::IdGenerator;
    use pointmark_core::{Error, FixedClock};

    fn session() -> LabelingSession {
        let config = LabelingConfig::default();
        let clock = Box::new(FixedClock(10));
        let store = PointStore::with_parts(config.palette.clone(), IdGenerator::seeded(1), clock);
        LabelingSession::with_store(config, store)
    }

    fn ready_session() -> LabelingSession {
        let mut session = session();
        let ticket = session.open_file("blob:img", "photo.png").unwrap();
        assert!(session.load(ticket));
        session
    }

    fn center() -> ScreenPoint {
        ScreenPoint::new(640.0, 360.0)
    }

    #[test]
    fn test_rejected_file_changes_nothing() {
        let mut session = ready_session();
        session.pointer_down(PointerId(1), center());
        session.pointer_up(PointerId(1), center());
        let generation = session.generation();

        let err = session.open_file("blob:x", "notes.txt").unwrap_err();
        assert!(matches!(err, Error::UnsupportedFormat { .. }));
        assert_eq!(session.state(), &SessionState::Ready);
        assert_eq!(session.points().len(), 1);
        assert_eq!(session.generation(), generation);
    }

    #[test]
    fn test_pointer_ignored_until_ready() {
        let mut session = session();
        let ticket = session.open_file("blob:img", "photo.png").unwrap();
        session.pointer_down(PointerId(1), center());
        assert_eq!(session.pointer_up(PointerId(1), center()), ClickEffect::Ignored);
        assert!(session.load(ticket));
        assert!(session.points().is_empty());
    }

    #[test]
    fn test_click_on_image_plane_adds_point() {
        let mut session = ready_session();
        session.pointer_down(PointerId(1), center());
        let effect = session.pointer_up(PointerId(1), center());
        assert!(matches!(effect, ClickEffect::Added(_)));
        let point = &session.points()[0];
        // the default camera looks straight at the origin
        assert!(point.position.coords.norm() < 1e-6);
        assert_eq!(session.list_view().header, "Feature Points (1)");
    }

    #[test]
    fn test_stale_completion_dropped() {
        let mut session = session();
        let first = session.open_file("blob:1", "a.png").unwrap();
        let second = session.open_file("blob:2", "b.png").unwrap();

        assert!(!session.load(first));
        assert_eq!(session.state(), &SessionState::Loading { file_name: "b.png".into() });
        assert!(session.load(second));
        assert_eq!(session.model().map(|m| m.source.file_name.as_str()), Some("b.png"));
    }

    #[test]
    fn test_failed_load() {
        let mut session = session();
        // no loader is registered for glTF by default
        let ticket = session.open_file("blob:1", "scene.glb").unwrap();
        assert!(session.load(ticket));
        assert!(matches!(session.state(), SessionState::Failed { .. }));
        assert!(session.points().is_empty());
        session.pointer_down(PointerId(1), center());
        assert_eq!(session.pointer_up(PointerId(1), center()), ClickEffect::Ignored);
    }

    #[test]
    fn test_change_file_clears_everything_but_mode() {
        let mut session = ready_session();
        session.pointer_down(PointerId(1), center());
        session.pointer_up(PointerId(1), center());
        session.apply_toolbar(ToolbarAction::SetMode(LabelingMode::Select));

        session.apply_toolbar(ToolbarAction::ChangeFile);
        assert_eq!(session.state(), &SessionState::Empty);
        assert!(session.points().is_empty());
        assert!(session.selected().is_none());
        assert!(session.model().is_none());
        assert_eq!(session.mode(), LabelingMode::Select);
    }

    #[test]
    fn test_ground_plane_only_in_add_mode() {
        let mut session = ready_session();
        // far off the image plane, but on the ground catch plane
        let off_plane = ScreenPoint::new(100.0, 600.0);
        session.pointer_down(PointerId(1), off_plane);
        assert!(matches!(session.pointer_up(PointerId(1), off_plane), ClickEffect::Added(_)));

        session.set_mode(LabelingMode::Select);
        let lower = ScreenPoint::new(100.0, 640.0);
        session.pointer_down(PointerId(1), lower);
        assert_eq!(session.pointer_up(PointerId(1), lower), ClickEffect::Ignored);
        assert_eq!(session.points().len(), 1);
    }

    #[test]
    fn test_view_command_applied_once_per_issue() {
        let mut session = ready_session();
        let start = session.camera().distance();
        session.apply_toolbar(ToolbarAction::ZoomIn);
        assert!(session.sync_view());
        assert!(!session.sync_view());
        assert!(session.camera().distance() < start);

        session.apply_toolbar(ToolbarAction::ResetView);
        assert!(session.sync_view());
        assert!((session.camera().distance() - start).abs() < 1e-9);
    }

    #[test]
    fn test_cursor_over_markers() {
        let mut session = ready_session();
        session.pointer_down(PointerId(1), center());
        session.pointer_up(PointerId(1), center());

        session.pointer_move(PointerId(1), center());
        assert_eq!(session.cursor(), CursorStyle::Pointer);
        session.set_mode(LabelingMode::Select);
        assert_eq!(session.cursor(), CursorStyle::Grab);
        session.pointer_leave();
        assert_eq!(session.cursor(), CursorStyle::Default);
    }

    #[test]
    fn test_cursor_resets_when_hovered_marker_is_deleted() {
        let mut session = ready_session();
        session.pointer_down(PointerId(1), center());
        session.pointer_up(PointerId(1), center());
        session.pointer_move(PointerId(1), center());
        assert_eq!(session.cursor(), CursorStyle::Pointer);

        session.set_mode(LabelingMode::Delete);
        session.pointer_down(PointerId(1), center());
        assert!(matches!(session.pointer_up(PointerId(1), center()), ClickEffect::Removed(_)));
        assert!(session.points().is_empty());
        assert_eq!(session.cursor(), CursorStyle::Default);
    }

    #[test]
    fn test_cursor_resets_when_hovered_marker_is_deleted_from_list() {
        let mut session = ready_session();
        session.pointer_down(PointerId(1), center());
        session.pointer_up(PointerId(1), center());
        session.pointer_move(PointerId(1), center());
        let id = session.points()[0].id.clone();

        session.apply_list_action(ListAction::Delete(id));
        assert_eq!(session.cursor(), CursorStyle::Default);
    }

    #[test]
    fn test_zoom_with_inverted_distance_range_does_not_abort() {
        let mut config = LabelingConfig::default();
        config.orbit.min_distance = 50.0;
        config.orbit.max_distance = 10.0;
        let mut session = LabelingSession::new(config);
        let ticket = session.open_file("blob:img", "photo.png").unwrap();
        assert!(session.load(ticket));

        session.apply_toolbar(ToolbarAction::ZoomIn);
        assert!(session.sync_view());
        let distance = session.camera().distance();
        assert!((10.0..=50.0).contains(&distance), "distance {}", distance);
    }
}
