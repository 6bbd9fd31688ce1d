//! Batch-mode Blender invocation
//!
//! Each operation renders a short Python script, runs Blender headless with
//! `--background --python-expr`, and waits for it to exit:
//! - `convert_to_glb`: import one model (OBJ, FBX, STL, DAE, glTF, .blend) and export GLB
//! - `combine_models`: import several models, place them, export one GLB
//! - `extract_animations`: list the actions found in a glTF/GLB file
//!
//! A non-zero exit is reported as `BridgeError::ProcessFailed` carrying the
//! process stderr. There is no timeout or retry.
//!
//! # Example
//! ```no_run
//! use blender_bridge::BlenderRunner;
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let runner = BlenderRunner::new("blender");
//! let result = runner.convert_to_glb(Path::new("tank.fbx"), Path::new("tank.glb"))?;
//! println!("{} bytes", result.output_size);
//! # Ok(())
//! # }
//! ```

pub mod script;

use asset_viz_common::{AnimationReport, AssetError, ModelFormat, TransformMap};
use serde::{Deserialize, Serialize};
use std::ffi::OsStr;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use thiserror::Error;
use tracing::{debug, info};

/// Errors from driving the Blender process
#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("Failed to launch {binary}: {source}")]
    Spawn {
        binary: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Blender exited with code {code:?}: {stderr}")]
    ProcessFailed { code: Option<i32>, stderr: String },

    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("No input models given")]
    NoInputs,

    #[error("Blender reported success but did not write {0}")]
    MissingOutput(String),

    #[error("Invalid animation report: {0}")]
    InvalidReport(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<BridgeError> for AssetError {
    fn from(err: BridgeError) -> Self {
        match err {
            BridgeError::UnsupportedFormat(ext) => AssetError::UnsupportedFormat(ext),
            BridgeError::FileNotFound(path) => AssetError::NotFound(path),
            BridgeError::NoInputs => AssetError::InvalidRequest("No input models given".to_string()),
            BridgeError::ProcessFailed { stderr, .. } => AssetError::ToolFailed(stderr),
            BridgeError::IoError(e) => AssetError::IoError(e),
            other => AssetError::ToolFailed(other.to_string()),
        }
    }
}

/// Result of a conversion or combine run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionResult {
    /// Path to output file
    pub output_path: String,
    /// Total size of the input files (bytes)
    pub input_size: u64,
    /// Size of the written GLB (bytes)
    pub output_size: u64,
}

/// Handle on a Blender executable
#[derive(Debug, Clone)]
pub struct BlenderRunner {
    binary: PathBuf,
    extra_args: Vec<String>,
}

impl Default for BlenderRunner {
    fn default() -> Self {
        Self::new("blender")
    }
}

impl BlenderRunner {
    /// Create a runner for the given executable (name on `PATH` or full path)
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
            extra_args: Vec::new(),
        }
    }

    /// Arguments inserted before the batch-mode flags
    #[must_use]
    pub fn with_extra_args(mut self, args: Vec<String>) -> Self {
        self.extra_args = args;
        self
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }

    fn command(&self, script: &str, args: &[&OsStr]) -> Command {
        let mut cmd = Command::new(&self.binary);
        cmd.args(&self.extra_args)
            .args(["--background", "--factory-startup", "--python-exit-code", "1"])
            .arg("--python-expr")
            .arg(script)
            .arg("--")
            .args(args);
        cmd
    }

    fn run(&self, script: &str, args: &[&OsStr]) -> Result<Output, BridgeError> {
        let mut cmd = self.command(script, args);
        debug!("Blender command: {:?} -- {:?}", self.binary, args);

        let output = cmd.output().map_err(|source| BridgeError::Spawn {
            binary: self.binary.display().to_string(),
            source,
        })?;

        if !output.status.success() {
            let mut stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            if stderr.is_empty() {
                stderr = String::from_utf8_lossy(&output.stdout).trim().to_string();
            }
            return Err(BridgeError::ProcessFailed {
                code: output.status.code(),
                stderr,
            });
        }
        Ok(output)
    }

    /// Convert one model file to GLB
    pub fn convert_to_glb(
        &self,
        input_path: &Path,
        output_path: &Path,
    ) -> Result<ConversionResult, BridgeError> {
        let format = check_input(input_path)?;
        let input_size = std::fs::metadata(input_path)?.len();

        debug!(
            "Converting {} ({}) to {}",
            input_path.display(),
            format.name(),
            output_path.display()
        );

        self.run(
            &script::convert_script(format),
            &[input_path.as_os_str(), output_path.as_os_str()],
        )?;

        let output_size = output_size(output_path)?;
        info!(
            "Converted {} -> {} ({} -> {} bytes)",
            input_path.display(),
            output_path.display(),
            input_size,
            output_size
        );

        Ok(ConversionResult {
            output_path: output_path.display().to_string(),
            input_size,
            output_size,
        })
    }

    /// Import every model, apply `transforms[index]` to the objects each one
    /// brings in, and export the scene as one GLB.
    ///
    /// The placements are written to a temporary JSON file that is removed
    /// when this call returns.
    pub fn combine_models(
        &self,
        input_paths: &[PathBuf],
        output_path: &Path,
        transforms: &TransformMap,
    ) -> Result<ConversionResult, BridgeError> {
        if input_paths.is_empty() {
            return Err(BridgeError::NoInputs);
        }

        let mut formats = Vec::with_capacity(input_paths.len());
        let mut input_size = 0;
        for path in input_paths {
            formats.push(check_input(path)?);
            input_size += std::fs::metadata(path)?.len();
        }

        let mut placements = tempfile::Builder::new()
            .prefix("placements-")
            .suffix(".json")
            .tempfile()?;
        let json = serde_json::to_vec(transforms)
            .map_err(|e| BridgeError::IoError(std::io::Error::other(e)))?;
        placements.write_all(&json)?;
        placements.flush()?;

        debug!(
            "Combining {} models into {} ({} placements)",
            input_paths.len(),
            output_path.display(),
            transforms.values().filter(|t| !t.is_identity()).count()
        );

        let mut args: Vec<&OsStr> = Vec::with_capacity(input_paths.len() + 2);
        args.push(placements.path().as_os_str());
        args.push(output_path.as_os_str());
        args.extend(input_paths.iter().map(|p| p.as_os_str()));

        self.run(&script::combine_script(&formats), &args)?;
        drop(placements);

        let output_size = output_size(output_path)?;
        info!(
            "Combined {} models into {} ({} bytes)",
            input_paths.len(),
            output_path.display(),
            output_size
        );

        Ok(ConversionResult {
            output_path: output_path.display().to_string(),
            input_size,
            output_size,
        })
    }

    /// Summarize the animations of a glTF/GLB file.
    ///
    /// Other formats are not inspected and report `supports_animation: false`.
    pub fn extract_animations(&self, input_path: &Path) -> Result<AnimationReport, BridgeError> {
        let format = check_input(input_path)?;
        if !format.is_glb_family() {
            return Ok(AnimationReport::unsupported());
        }

        let report_file = tempfile::Builder::new()
            .prefix("animations-")
            .suffix(".json")
            .tempfile()?;

        self.run(
            &script::animation_script(),
            &[input_path.as_os_str(), report_file.path().as_os_str()],
        )?;

        let contents = std::fs::read_to_string(report_file.path())?;
        if contents.trim().is_empty() {
            return Err(BridgeError::MissingOutput(
                report_file.path().display().to_string(),
            ));
        }
        serde_json::from_str(&contents).map_err(|e| BridgeError::InvalidReport(e.to_string()))
    }
}

fn check_input(path: &Path) -> Result<ModelFormat, BridgeError> {
    let format = ModelFormat::from_path(path).map_err(|e| match e {
        AssetError::UnsupportedFormat(ext) => BridgeError::UnsupportedFormat(ext),
        other => BridgeError::UnsupportedFormat(other.to_string()),
    })?;
    if !path.is_file() {
        return Err(BridgeError::FileNotFound(path.display().to_string()));
    }
    Ok(format)
}

fn output_size(path: &Path) -> Result<u64, BridgeError> {
    match std::fs::metadata(path) {
        Ok(meta) => Ok(meta.len()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(BridgeError::MissingOutput(path.display().to_string()))
        }
        Err(e) => Err(e.into()),
    }
}
