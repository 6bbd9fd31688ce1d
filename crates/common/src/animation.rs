//! Animation summaries reported by the authoring tool

use serde::{Deserialize, Serialize};

/// One action found in an imported model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationClip {
    pub name: String,
    /// Frame range length (end - start)
    pub duration_frames: f32,
    /// `"Bone: <name>"` entries, or `"Object animation"`
    #[serde(default)]
    pub affected_elements: Vec<String>,
}

/// Animation information for a model file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnimationReport {
    pub supports_animation: bool,
    #[serde(default)]
    pub animations: Vec<AnimationClip>,
}

impl AnimationReport {
    /// Report for formats that are not inspected
    #[must_use]
    pub fn unsupported() -> Self {
        Self {
            supports_animation: false,
            animations: Vec::new(),
        }
    }

    /// Longest clip, in frames
    #[must_use]
    pub fn longest_clip(&self) -> Option<&AnimationClip> {
        self.animations
            .iter()
            .max_by(|a, b| a.duration_frames.total_cmp(&b.duration_frames))
    }
}
