//! Common types and utilities for the asset visualization backend
//!
//! Shared between the HTTP server and the Blender bridge:
//! - `AssetError` taxonomy and `Result` alias
//! - `ModelFormat` extension dispatch
//! - `Transform` records passed through to the authoring tool
//! - `AnimationReport` produced by animation extraction

pub mod animation;
pub mod format;
pub mod transform;

use thiserror::Error;

pub use animation::{AnimationClip, AnimationReport};
pub use format::ModelFormat;
pub use transform::{Scale, Transform, TransformMap};

/// Processing errors
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Invalid file name: {0}")]
    InvalidName(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Model conversion is disabled")]
    ConverterDisabled,

    #[error("Authoring tool failed: {0}")]
    ToolFailed(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type for asset operations
pub type Result<T> = std::result::Result<T, AssetError>;
