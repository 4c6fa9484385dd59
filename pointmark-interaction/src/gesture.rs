//! Pointer gesture classification
//!
//! A [`Gesture`] lives from pointer-down to pointer-up (or cancel). While it
//! lives, the classifier tracks how far the pointer strayed from where it
//! went down and, for point drags, which point holds the pointer capture.
//! On release it decides whether the gesture was a click.

use log::debug;
use serde::{Deserialize, Serialize};

use pointmark_core::{PointId, ScreenPoint};

/// Default click tolerance in pixels
pub const CLICK_MOVE_THRESHOLD_PX: f64 = 6.0;

/// Identifies one pointer (mouse, pen or touch contact)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PointerId(pub u32);

/// A point being dragged; the dragged point owns the pointer capture
#[derive(Debug, Clone, PartialEq)]
pub struct PointDrag {
    pub id: PointId,
    /// At least one move event arrived while dragging
    pub moved: bool,
}

/// State of the gesture in progress
#[derive(Debug, Clone, PartialEq)]
pub struct Gesture {
    pub pointer: PointerId,
    pub start: ScreenPoint,
    pub last: ScreenPoint,
    /// Largest squared distance from `start` seen so far
    pub max_displacement_sq: f64,
    pub drag: Option<PointDrag>,
}

impl Gesture {
    fn new(pointer: PointerId, start: ScreenPoint, drag: Option<PointDrag>) -> Self {
        Self {
            pointer,
            start,
            last: start,
            max_displacement_sq: 0.0,
            drag,
        }
    }

    fn track(&mut self, position: ScreenPoint) {
        let displacement = (position - self.start).norm_squared();
        self.max_displacement_sq = self.max_displacement_sq.max(displacement);
        self.last = position;
    }
}

/// Result of a pointer-down
#[derive(Debug, Clone, PartialEq)]
pub enum PointerDown {
    /// Another gesture is already active
    Ignored,
    /// Plain gesture; may become a click or an orbit
    Started,
    /// The grabbed point captured the pointer and orbiting is suspended
    PointDragStarted(PointId),
}

/// Result of a pointer-move
#[derive(Debug, Clone, PartialEq)]
pub enum PointerMove {
    /// No gesture for this pointer
    Ignored,
    /// Move the dragged point to wherever the pointer now projects
    DragPoint { id: PointId, position: ScreenPoint },
    /// Pixel delta to forward to the camera orbit
    Orbit { dx: f64, dy: f64 },
}

/// Result of a pointer-up
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PointerUp {
    /// Where the click landed, if the gesture counts as one
    pub click: Option<ScreenPoint>,
    /// The point drag that ended, releasing the capture
    pub ended_drag: Option<PointDrag>,
}

/// Turns raw pointer events into clicks, point drags and orbit drags
#[derive(Debug, Clone)]
pub struct GestureClassifier {
    threshold_sq: f64,
    active: Option<Gesture>,
}

impl GestureClassifier {
    pub fn new(click_threshold_px: f64) -> Self {
        Self {
            threshold_sq: click_threshold_px * click_threshold_px,
            active: None,
        }
    }

    pub fn active(&self) -> Option<&Gesture> {
        self.active.as_ref()
    }

    /// Pointer currently captured by a point drag
    pub fn captured_pointer(&self) -> Option<PointerId> {
        self.active
            .as_ref()
            .filter(|g| g.drag.is_some())
            .map(|g| g.pointer)
    }

    pub fn is_dragging_point(&self) -> bool {
        self.captured_pointer().is_some()
    }

    /// Camera orbit is allowed exactly when no point drag is in progress
    pub fn orbit_enabled(&self) -> bool {
        !self.is_dragging_point()
    }

    /// Begin a gesture. `grabbed` is the point under the pointer when it is
    /// eligible for dragging.
    pub fn on_pointer_down(
        &mut self,
        pointer: PointerId,
        position: ScreenPoint,
        grabbed: Option<PointId>,
    ) -> PointerDown {
        if self.active.is_some() {
            debug!("pointer {:?} down during an active gesture, ignored", pointer);
            return PointerDown::Ignored;
        }

        let drag = grabbed.map(|id| PointDrag { id, moved: false });
        let outcome = match &drag {
            Some(drag) => {
                debug!("pointer {:?} captured for dragging {}", pointer, drag.id);
                PointerDown::PointDragStarted(drag.id.clone())
            }
            None => PointerDown::Started,
        };
        self.active = Some(Gesture::new(pointer, position, drag));
        outcome
    }

    pub fn on_pointer_move(&mut self, pointer: PointerId, position: ScreenPoint) -> PointerMove {
        let Some(gesture) = self.active.as_mut().filter(|g| g.pointer == pointer) else {
            return PointerMove::Ignored;
        };

        let delta = position - gesture.last;
        gesture.track(position);

        match gesture.drag.as_mut() {
            Some(drag) => {
                drag.moved = true;
                PointerMove::DragPoint {
                    id: drag.id.clone(),
                    position,
                }
            }
            None => PointerMove::Orbit {
                dx: delta.x,
                dy: delta.y,
            },
        }
    }

    /// Finish the gesture. The gesture is a click when the pointer never
    /// strayed beyond the threshold and no point was actually dragged.
    pub fn on_pointer_up(&mut self, pointer: PointerId, position: ScreenPoint) -> PointerUp {
        if !self.active.as_ref().is_some_and(|g| g.pointer == pointer) {
            return PointerUp::default();
        }
        let Some(mut gesture) = self.active.take() else {
            return PointerUp::default();
        };
        gesture.track(position);

        let within_threshold = gesture.max_displacement_sq <= self.threshold_sq;
        let dragged_point = gesture.drag.as_ref().is_some_and(|d| d.moved);
        let click = (within_threshold && !dragged_point).then_some(position);

        if let Some(drag) = &gesture.drag {
            debug!("pointer {:?} released by {}", pointer, drag.id);
        }
        PointerUp {
            click,
            ended_drag: gesture.drag,
        }
    }

    /// Abort the gesture without a click, releasing any capture
    pub fn on_pointer_cancel(&mut self, pointer: PointerId) -> Option<Gesture> {
        if !self.active.as_ref().is_some_and(|g| g.pointer == pointer) {
            return None;
        }
        let gesture = self.active.take();
        debug!("pointer {:?} cancelled", pointer);
        gesture
    }

    /// Forget any gesture in progress
    pub fn clear(&mut self) {
        self.active = None;
    }
}

impl Default for GestureClassifier {
    fn default() -> Self {
        Self::new(CLICK_MOVE_THRESHOLD_PX)
    }
}
