//! One-shot view commands (zoom in, zoom out, reset)
//!
//! The toolbar issues [`ViewCommand`]s through [`ViewRequests`], each tagged
//! with a strictly increasing sequence number. [`ViewController`] applies a
//! command only if its sequence number is newer than the last one it
//! applied, so redrawing with the same pending command is harmless.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::controls::CameraControls;

/// A discrete camera request from the toolbar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ViewAction {
    ZoomIn,
    ZoomOut,
    Reset,
}

/// A view action with its issue order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewCommand {
    pub sequence: u64,
    pub action: ViewAction,
}

/// Single-slot mailbox of view commands waiting to be applied
#[derive(Debug, Clone, Default)]
pub struct ViewRequests {
    last_sequence: u64,
    pending: Option<ViewCommand>,
}

impl ViewRequests {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `action`, superseding any command not yet consumed
    pub fn issue(&mut self, action: ViewAction) -> ViewCommand {
        self.last_sequence += 1;
        let command = ViewCommand {
            sequence: self.last_sequence,
            action,
        };
        if let Some(previous) = self.pending.replace(command) {
            debug!("view command {:?} superseded by {:?}", previous, command);
        }
        command
    }

    pub fn pending(&self) -> Option<ViewCommand> {
        self.pending
    }

    /// Clear the pending command if it is the one identified by `sequence`
    pub fn consume(&mut self, sequence: u64) {
        if self.pending.is_some_and(|cmd| cmd.sequence == sequence) {
            self.pending = None;
        }
    }

    /// Drop any pending command
    pub fn clear(&mut self) {
        self.pending = None;
    }
}

/// Applies view commands to camera controls exactly once each
#[derive(Debug, Clone, Default)]
pub struct ViewController {
    last_applied: Option<u64>,
}

impl ViewController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_applied(&self) -> Option<u64> {
        self.last_applied
    }

    /// Apply `command` if it is newer than anything applied so far.
    ///
    /// Returns the sequence number to report as consumed, or `None` when
    /// there was nothing new to do.
    pub fn apply<C: CameraControls + ?Sized>(
        &mut self,
        command: Option<ViewCommand>,
        controls: &mut C,
    ) -> Option<u64> {
        let command = command?;
        if self.last_applied.is_some_and(|last| command.sequence <= last) {
            return None;
        }

        match command.action {
            ViewAction::ZoomIn => controls.zoom_in(),
            ViewAction::ZoomOut => controls.zoom_out(),
            ViewAction::Reset => controls.reset(),
        }
        self.last_applied = Some(command.sequence);
        Some(command.sequence)
    }

    /// Apply whatever `requests` holds and mark it consumed
    pub fn sync<C: CameraControls + ?Sized>(
        &mut self,
        requests: &mut ViewRequests,
        controls: &mut C,
    ) -> bool {
        match self.apply(requests.pending(), controls) {
            Some(sequence) => {
                requests.consume(sequence);
                true
            }
            None => {
                // Already applied; make sure it does not linger
                if let Some(cmd) = requests.pending() {
                    requests.consume(cmd.sequence);
                }
                false
            }
        }
    }
}
