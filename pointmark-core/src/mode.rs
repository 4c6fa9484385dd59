//! Labeling modes selected from the toolbar

use serde::{Deserialize, Serialize};
use std::fmt;

/// What a click in the viewport means
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelingMode {
    #[default]
    Add,
    Select,
    Delete,
}

impl LabelingMode {
    pub const ALL: [LabelingMode; 3] = [
        LabelingMode::Add,
        LabelingMode::Select,
        LabelingMode::Delete,
    ];

    pub fn label(self) -> &'static str {
        match self {
            LabelingMode::Add => "add",
            LabelingMode::Select => "select",
            LabelingMode::Delete => "delete",
        }
    }
}

impl fmt::Display for LabelingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
