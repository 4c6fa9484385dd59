//! The canonical point collection and the current selection
//!
//! [`PointStore`] is the single source of truth for both the 3D view and the
//! list view. It knows nothing about rendering or pointers; every mutation
//! arrives through one of a handful of operations, and operations naming an
//! id that no longer exists are silent no-ops.

use log::{debug, trace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;

use pointmark_core::{Clock, FeaturePoint, Palette, Point3d, PointId, PointUpdate, SystemClock};

const ID_ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const ID_SUFFIX_LEN: usize = 7;

/// Issues point ids of the form `pt_{millis}_{suffix}`, where the suffix is
/// seven random base-36 characters.
///
/// Ids from different milliseconds never collide, so only the suffixes drawn
/// in the current millisecond are remembered. A repeated suffix is redrawn.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    rng: StdRng,
    millis: Option<u64>,
    suffixes: HashSet<String>,
}

impl IdGenerator {
    /// Generator seeded from the operating system
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Deterministic generator for tests and replays
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    pub fn with_rng(rng: StdRng) -> Self {
        Self {
            rng,
            millis: None,
            suffixes: HashSet::new(),
        }
    }

    /// Produce an id that has not been issued before
    pub fn next_id(&mut self, now_millis: u64) -> PointId {
        if self.millis != Some(now_millis) {
            self.millis = Some(now_millis);
            self.suffixes.clear();
        }
        loop {
            let suffix: String = (0..ID_SUFFIX_LEN)
                .map(|_| ID_ALPHABET[self.rng.gen_range(0..ID_ALPHABET.len())] as char)
                .collect();
            if self.suffixes.insert(suffix.clone()) {
                return PointId::new(format!("pt_{}_{}", now_millis, suffix));
            }
            trace!("id suffix collision on {} at {}, drawing again", suffix, now_millis);
        }
    }

    /// Ids remembered for the current millisecond
    pub fn issued_count(&self) -> usize {
        self.suffixes.len()
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Ordered feature points of the loaded model plus at most one selection
pub struct PointStore {
    points: Vec<FeaturePoint>,
    selected: Option<PointId>,
    palette: Palette,
    ids: IdGenerator,
    clock: Box<dyn Clock>,
}

impl PointStore {
    /// Empty store using the system clock and an OS-seeded id generator
    pub fn new(palette: Palette) -> Self {
        Self::with_parts(palette, IdGenerator::new(), Box::new(SystemClock))
    }

    pub fn with_parts(palette: Palette, ids: IdGenerator, clock: Box<dyn Clock>) -> Self {
        Self {
            points: Vec::new(),
            selected: None,
            palette,
            ids,
            clock,
        }
    }

    /// Append a point at `position` and select it.
    ///
    /// The label is `Point {n}` and the color is the palette entry at index
    /// `n - 1`, where `n - 1` is the number of points held before the call.
    pub fn add(&mut self, position: Point3d) -> PointId {
        let count = self.points.len();
        let created_at = self.clock.now_millis();
        let id = self.ids.next_id(created_at);

        self.points.push(FeaturePoint {
            id: id.clone(),
            position,
            label: format!("Point {}", count + 1),
            color: self.palette.color_for(count),
            created_at,
        });
        self.selected = Some(id.clone());

        debug!(
            "added {} at ({:.3}, {:.3}, {:.3})",
            id, position.x, position.y, position.z
        );
        id
    }

    /// Merge the provided fields into the point with `id`.
    ///
    /// Returns `false` when there is no such point.
    pub fn update(&mut self, id: &PointId, update: PointUpdate) -> bool {
        match self.points.iter_mut().find(|p| &p.id == id) {
            Some(point) => {
                point.apply(update);
                true
            }
            None => {
                trace!("update of unknown point {} ignored", id);
                false
            }
        }
    }

    /// Remove the point with `id`, clearing the selection if it pointed at it
    pub fn remove(&mut self, id: &PointId) -> bool {
        let before = self.points.len();
        self.points.retain(|p| &p.id != id);
        if self.selected.as_ref() == Some(id) {
            self.selected = None;
        }

        let removed = self.points.len() != before;
        if removed {
            debug!("removed {}", id);
        } else {
            trace!("remove of unknown point {} ignored", id);
        }
        removed
    }

    /// Set the selection. The id is not validated; an unknown id simply
    /// matches no point.
    pub fn select(&mut self, id: Option<PointId>) {
        self.selected = id;
    }

    /// Select `id`, or clear the selection if `id` is already selected
    pub fn toggle_selection(&mut self, id: &PointId) {
        if self.selected.as_ref() == Some(id) {
            self.selected = None;
        } else {
            self.selected = Some(id.clone());
        }
    }

    /// Drop every point and the selection. Issued ids stay reserved.
    pub fn reset(&mut self) {
        debug!("store reset, {} points discarded", self.points.len());
        self.points.clear();
        self.selected = None;
    }

    pub fn points(&self) -> &[FeaturePoint] {
        &self.points
    }

    pub fn get(&self, id: &PointId) -> Option<&FeaturePoint> {
        self.points.iter().find(|p| &p.id == id)
    }

    pub fn selected(&self) -> Option<&PointId> {
        self.selected.as_ref()
    }

    /// The selected point, if the selection names one that exists
    pub fn selected_point(&self) -> Option<&FeaturePoint> {
        self.selected.as_ref().and_then(|id| self.get(id))
    }

    pub fn is_selected(&self, id: &PointId) -> bool {
        self.selected.as_ref() == Some(id)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }
}
