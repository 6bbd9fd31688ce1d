//! Extension-based model format dispatch

use crate::AssetError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Model formats the authoring tool can import
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelFormat {
    /// Wavefront OBJ
    Obj,
    /// Autodesk FBX
    Fbx,
    /// Stereolithography mesh
    Stl,
    /// COLLADA (.dae)
    Collada,
    /// glTF, binary (.glb) or JSON (.gltf)
    Gltf,
    /// Native .blend library (objects are appended)
    Blend,
}

impl ModelFormat {
    /// Every format, in dispatch table order
    pub const ALL: [ModelFormat; 6] = [
        ModelFormat::Obj,
        ModelFormat::Fbx,
        ModelFormat::Stl,
        ModelFormat::Collada,
        ModelFormat::Gltf,
        ModelFormat::Blend,
    ];

    /// Look up a format from a file extension (with or without the leading dot)
    pub fn from_extension(ext: &str) -> Result<Self, AssetError> {
        let ext = ext.trim_start_matches('.').to_ascii_lowercase();
        match ext.as_str() {
            "obj" => Ok(ModelFormat::Obj),
            "fbx" => Ok(ModelFormat::Fbx),
            "stl" => Ok(ModelFormat::Stl),
            "dae" => Ok(ModelFormat::Collada),
            "glb" | "gltf" => Ok(ModelFormat::Gltf),
            "blend" => Ok(ModelFormat::Blend),
            _ => Err(AssetError::UnsupportedFormat(format!(".{ext}"))),
        }
    }

    /// Look up a format from a path's extension
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, AssetError> {
        let path = path.as_ref();
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) => Self::from_extension(ext),
            None => Err(AssetError::UnsupportedFormat(path.display().to_string())),
        }
    }

    /// File extensions mapped to this format
    #[must_use]
    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            ModelFormat::Obj => &["obj"],
            ModelFormat::Fbx => &["fbx"],
            ModelFormat::Stl => &["stl"],
            ModelFormat::Collada => &["dae"],
            ModelFormat::Gltf => &["glb", "gltf"],
            ModelFormat::Blend => &["blend"],
        }
    }

    /// True for formats the glTF importer reads directly
    #[must_use]
    pub fn is_glb_family(self) -> bool {
        self == ModelFormat::Gltf
    }

    /// Short lowercase name used in API responses
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            ModelFormat::Obj => "obj",
            ModelFormat::Fbx => "fbx",
            ModelFormat::Stl => "stl",
            ModelFormat::Collada => "collada",
            ModelFormat::Gltf => "gltf",
            ModelFormat::Blend => "blend",
        }
    }
}

/// Every extension in the dispatch table, dot-prefixed, in table order
#[must_use]
pub fn supported_extensions() -> Vec<String> {
    ModelFormat::ALL
        .iter()
        .flat_map(|format| format.extensions())
        .map(|ext| format!(".{ext}"))
        .collect()
}

/// True if `path` ends in `.glb` (case-insensitive)
pub fn is_glb_file(path: impl AsRef<Path>) -> bool {
    path.as_ref()
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("glb"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_table() {
        assert_eq!(ModelFormat::from_extension("obj").unwrap(), ModelFormat::Obj);
        assert_eq!(ModelFormat::from_extension("fbx").unwrap(), ModelFormat::Fbx);
        assert_eq!(ModelFormat::from_extension("stl").unwrap(), ModelFormat::Stl);
        assert_eq!(
            ModelFormat::from_extension("dae").unwrap(),
            ModelFormat::Collada
        );
        assert_eq!(ModelFormat::from_extension("glb").unwrap(), ModelFormat::Gltf);
        assert_eq!(ModelFormat::from_extension("gltf").unwrap(), ModelFormat::Gltf);
        assert_eq!(
            ModelFormat::from_extension("blend").unwrap(),
            ModelFormat::Blend
        );
    }

    #[test]
    fn test_dispatch_is_case_insensitive() {
        assert_eq!(ModelFormat::from_path("MODEL.OBJ").unwrap(), ModelFormat::Obj);
        assert_eq!(ModelFormat::from_extension(".Fbx").unwrap(), ModelFormat::Fbx);
    }

    #[test]
    fn test_unsupported_extension() {
        let err = ModelFormat::from_path("archive.tar.gz").unwrap_err();
        assert!(matches!(err, AssetError::UnsupportedFormat(ref e) if e == ".gz"));

        let err = ModelFormat::from_path("no_extension").unwrap_err();
        assert!(matches!(err, AssetError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_extensions_round_trip_through_table() {
        for format in ModelFormat::ALL {
            for ext in format.extensions() {
                assert_eq!(ModelFormat::from_extension(ext).unwrap(), format);
            }
        }
    }

    #[test]
    fn test_supported_extensions_list() {
        let all = supported_extensions();
        assert_eq!(all.len(), 7);
        assert_eq!(all[0], ".obj");
        assert!(all.contains(&".dae".to_string()));
        assert!(all.contains(&".gltf".to_string()));
        assert_eq!(all.last().map(String::as_str), Some(".blend"));
    }

    #[test]
    fn test_glb_family() {
        assert!(ModelFormat::Gltf.is_glb_family());
        assert!(!ModelFormat::Fbx.is_glb_family());
        assert!(is_glb_file("plane.GLB"));
        assert!(!is_glb_file("plane.gltf"));
    }
}
