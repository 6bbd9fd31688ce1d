//! HTTP request handlers for API endpoints

use asset_viz_common::{
    format::{is_glb_file, supported_extensions},
    AssetError, ModelFormat,
};
use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use blender_bridge::BlenderRunner;
use std::sync::Arc;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::{
    catalog,
    error::{api_error, ApiError},
    types::{
        CombineRequest, CombineResponse, HealthResponse, ModelInfoResponse, UploadResponse,
    },
    ApiState,
};

/// Health check endpoint
pub async fn health_check(State(state): State<ApiState>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        converter_enabled: state.converter_enabled(),
    })
}

/// Model files by category
pub async fn list_models() -> impl IntoResponse {
    Json(catalog::models())
}

/// Available scenarios
pub async fn list_scenarios() -> impl IntoResponse {
    Json(catalog::scenarios())
}

/// Scene setup for one scenario
pub async fn load_scenario(
    Path(scenario_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    match catalog::scenario_config(&scenario_id) {
        Some(config) => Ok(Json(config)),
        None => Err((StatusCode::NOT_FOUND, "Scenario not found".to_string())),
    }
}

/// Simulated entities for the entity viewer
pub async fn list_entities() -> impl IntoResponse {
    Json(catalog::entities())
}

/// Accept a model upload (multipart field `model`)
///
/// GLB files are stored as-is. Other importable formats are stored and
/// converted to `<stem>.glb` when Blender is available.
pub async fn upload_model(
    State(state): State<ApiState>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| (e.status(), format!("Invalid multipart body: {}", e.body_text())))?
    {
        if field.name() != Some("model") {
            continue;
        }

        let filename = field
            .file_name()
            .map(str::to_string)
            .ok_or_else(|| (StatusCode::BAD_REQUEST, "Missing file name".to_string()))?;
        // Over-limit bodies surface here as 413
        let bytes = field
            .bytes()
            .await
            .map_err(|e| (e.status(), format!("Failed to read upload: {}", e.body_text())))?;

        info!("Upload request: {} ({} bytes)", filename, bytes.len());
        let response = store_upload(&state, &filename, &bytes).await?;
        return Ok(Json(response));
    }

    Err((
        StatusCode::BAD_REQUEST,
        "Missing 'model' file field".to_string(),
    ))
}

async fn store_upload(
    state: &ApiState,
    filename: &str,
    bytes: &[u8],
) -> Result<UploadResponse, ApiError> {
    let invalid_type = || invalid_file_type(state.converter_enabled());

    if is_glb_file(filename) {
        state.store.save(filename, bytes).map_err(api_error)?;
        return Ok(UploadResponse {
            success: true,
            filename: filename.to_string(),
            converted: false,
        });
    }

    ModelFormat::from_path(filename).map_err(|_| invalid_type())?;
    let Some(converter) = state.converter.clone() else {
        return Err(invalid_type());
    };

    let stem = std::path::Path::new(filename)
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(invalid_type)?;
    let glb_name = format!("{stem}.glb");

    let source = state.store.save(filename, bytes).map_err(api_error)?;
    let target = state.store.resolve(&glb_name).map_err(api_error)?;

    let input = source.clone();
    let converted = run_blocking(converter, move |runner| {
        runner.convert_to_glb(&input, &target)
    })
    .await;
    let result = match converted {
        Ok(result) => result,
        Err(err) => {
            // Only converted uploads are kept
            if let Err(e) = std::fs::remove_file(&source) {
                warn!("Failed to remove {}: {}", source.display(), e);
            }
            return Err(err);
        }
    };

    info!(
        "Converted upload {} to {} ({} bytes)",
        filename, glb_name, result.output_size
    );
    Ok(UploadResponse {
        success: true,
        filename: glb_name,
        converted: true,
    })
}

/// 400 listing the extensions an upload may carry
fn invalid_file_type(converter_enabled: bool) -> ApiError {
    let accepted = if converter_enabled {
        supported_extensions().join(", ")
    } else {
        ".glb".to_string()
    };
    (
        StatusCode::BAD_REQUEST,
        format!("Invalid file type (accepted: {accepted})"),
    )
}

/// Combine stored models into one GLB
pub async fn combine_models(
    State(state): State<ApiState>,
    Json(request): Json<CombineRequest>,
) -> Result<impl IntoResponse, ApiError> {
    info!(
        "Combine request: models={:?}, placements={}",
        request.models,
        request.positions.len()
    );

    let Some(converter) = state.converter.clone() else {
        return Err(api_error(AssetError::ConverterDisabled));
    };
    if request.models.is_empty() {
        return Err(api_error(AssetError::InvalidRequest(
            "No models to combine".to_string(),
        )));
    }

    let mut inputs = Vec::with_capacity(request.models.len());
    for name in &request.models {
        inputs.push(state.store.existing(name).map_err(api_error)?);
    }

    let filename = request
        .output_name
        .unwrap_or_else(|| format!("combined_{}.glb", Uuid::new_v4().simple()));
    if !is_glb_file(&filename) {
        return Err(api_error(AssetError::InvalidName(format!(
            "{filename} (output must be a .glb file)"
        ))));
    }
    let output = state.store.resolve(&filename).map_err(api_error)?;

    let input_count = inputs.len();
    let positions = request.positions;
    let result = run_blocking(converter, move |runner| {
        runner.combine_models(&inputs, &output, &positions)
    })
    .await?;

    Ok(Json(CombineResponse {
        success: true,
        filename,
        input_count,
        output_size: result.output_size,
    }))
}

/// Format, size and animation summary of a stored model
pub async fn model_info(
    State(state): State<ApiState>,
    Path(name): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let stored = state.store.info(&name).map_err(api_error)?;

    let animations = match state.converter.clone() {
        Some(converter) => {
            let path = stored.path.clone();
            let report =
                run_blocking(converter, move |runner| runner.extract_animations(&path)).await?;
            if let Some(clip) = report.longest_clip() {
                info!(
                    "{}: {} animations, longest {} ({} frames)",
                    name,
                    report.animations.len(),
                    clip.name,
                    clip.duration_frames
                );
            }
            Some(report)
        }
        None => None,
    };

    Ok(Json(ModelInfoResponse {
        name: stored.name,
        format: stored.format,
        size_bytes: stored.size_bytes,
        animations,
    }))
}

/// Run a Blender call on the blocking pool
async fn run_blocking<T, F>(runner: Arc<BlenderRunner>, call: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce(&BlenderRunner) -> Result<T, blender_bridge::BridgeError> + Send + 'static,
{
    let joined = tokio::task::spawn_blocking(move || call(&runner)).await;
    match joined {
        Ok(result) => result.map_err(|e| api_error(AssetError::from(e))),
        Err(e) => {
            error!("Blender task panicked: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Blender task failed: {e}"),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::ModelStore;
    use tempfile::TempDir;

    fn state(dir: &TempDir, converter: Option<BlenderRunner>) -> ApiState {
        ApiState {
            store: Arc::new(ModelStore::open(dir.path().join("models")).unwrap()),
            converter: converter.map(Arc::new),
            static_dir: dir.path().to_path_buf(),
            max_upload_bytes: 1024 * 1024,
        }
    }

    #[tokio::test]
    async fn test_store_glb_upload() {
        let dir = TempDir::new().unwrap();
        let state = state(&dir, None);
        let response = store_upload(&state, "jet.glb", b"glTF").await.unwrap();
        assert!(response.success);
        assert!(!response.converted);
        assert!(state.store.exists("jet.glb"));
    }

    #[tokio::test]
    async fn test_reject_unknown_extension() {
        let dir = TempDir::new().unwrap();
        let state = state(&dir, Some(BlenderRunner::default()));
        let (status, body) = store_upload(&state, "notes.txt", b"hi").await.unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.starts_with("Invalid file type"));
        assert!(body.contains(".fbx, .stl, .dae"));
        assert!(!state.store.exists("notes.txt"));
    }

    #[tokio::test]
    async fn test_non_glb_rejected_without_converter() {
        let dir = TempDir::new().unwrap();
        let state = state(&dir, None);
        let (status, body) = store_upload(&state, "tank.fbx", b"fbx").await.unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "Invalid file type (accepted: .glb)");
        assert!(!state.store.exists("tank.fbx"));
    }

    #[tokio::test]
    async fn test_failed_conversion_removes_source() {
        let dir = TempDir::new().unwrap();
        let state = state(&dir, Some(BlenderRunner::new(dir.path().join("no-such-blender"))));
        let (status, _) = store_upload(&state, "truck.obj", b"v 0 0 0").await.unwrap_err();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!state.store.exists("truck.obj"));
        assert!(!state.store.exists("truck.glb"));
    }

    #[tokio::test]
    async fn test_upload_rejects_path_names() {
        let dir = TempDir::new().unwrap();
        let state = state(&dir, None);
        let (status, _) = store_upload(&state, "../escape.glb", b"glTF")
            .await
            .unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_run_blocking_maps_tool_failure() {
        let runner = Arc::new(BlenderRunner::default());
        let (status, body) = run_blocking(runner, |_| -> Result<(), _> {
            Err(blender_bridge::BridgeError::ProcessFailed {
                code: Some(1),
                stderr: "Traceback: import failed".to_string(),
            })
        })
        .await
        .unwrap_err();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body.contains("Traceback: import failed"));
    }
}
