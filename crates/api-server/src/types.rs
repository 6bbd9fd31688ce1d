//! API request and response types

use asset_viz_common::{AnimationReport, ModelFormat, TransformMap};
use serde::{Deserialize, Serialize};

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// Whether Blender-backed operations are available
    pub converter_enabled: bool,
}

/// Upload response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    pub success: bool,
    /// Name of the stored GLB
    pub filename: String,
    /// True when the upload was converted to GLB
    #[serde(default)]
    pub converted: bool,
}

/// Combine request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombineRequest {
    /// Stored model names, in import order
    pub models: Vec<String>,
    /// Output file name (must end in `.glb`); generated when absent
    #[serde(default)]
    pub output_name: Option<String>,
    /// Placement per model index
    #[serde(default)]
    pub positions: TransformMap,
}

/// Combine response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombineResponse {
    pub success: bool,
    pub filename: String,
    pub input_count: usize,
    pub output_size: u64,
}

/// Model info response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelInfoResponse {
    pub name: String,
    pub format: ModelFormat,
    pub size_bytes: u64,
    /// Animation summary; `None` when conversion is disabled
    pub animations: Option<AnimationReport>,
}
