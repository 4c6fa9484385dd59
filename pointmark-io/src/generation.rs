//! Guarding asynchronous load completions against model switches

use serde::{Deserialize, Serialize};

use crate::model::ModelSource;

/// Identifies one "currently loaded model" epoch. Every file switch or
/// reset starts a new generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct ModelGeneration(u64);

impl ModelGeneration {
    pub fn value(self) -> u64 {
        self.0
    }

    /// Advance to the next generation
    pub fn bump(&mut self) -> ModelGeneration {
        self.0 += 1;
        *self
    }
}

/// Handed out when a load starts and presented back when it finishes.
///
/// A completion is only applied when its generation still matches the
/// current one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    pub generation: ModelGeneration,
    pub source: ModelSource,
}

impl LoadTicket {
    pub fn is_current(&self, current: ModelGeneration) -> bool {
        self.generation == current
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::ModelKind;

    #[test]
    fn test_ticket_goes_stale_after_bump() {
        let mut generation = ModelGeneration::default();
        let ticket = LoadTicket {
            generation: generation.bump(),
            source: ModelSource::new("blob:1", "a.stl", ModelKind::MeshTextTriangulated),
        };
        assert!(ticket.is_current(generation));
        generation.bump();
        assert!(!ticket.is_current(generation));
        assert_eq!(generation.value(), 2);
    }
}
