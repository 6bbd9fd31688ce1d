//! Per-model placement records for combine requests
//!
//! Placement data is accepted as any well-formed JSON. Components that are
//! not a 3-number array (or, for scale, a single number) are dropped, and
//! keys that name no model index are carried along and never applied.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Scale given either as one factor or per axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scale {
    Uniform(f32),
    Axes([f32; 3]),
}

impl Scale {
    /// Expand to per-axis factors
    #[must_use]
    pub fn to_axes(self) -> [f32; 3] {
        match self {
            Scale::Uniform(s) => [s, s, s],
            Scale::Axes(axes) => axes,
        }
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_f64().map(|s| Scale::Uniform(s as f32)),
            other => vec3(other).map(Scale::Axes),
        }
    }
}

/// Placement applied to all objects imported from one model.
///
/// Rotation is Euler XYZ in degrees.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Transform {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<[f32; 3]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation: Option<[f32; 3]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<Scale>,
}

impl Transform {
    /// True when no component is set
    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.position.is_none() && self.rotation.is_none() && self.scale.is_none()
    }

    /// Read the usable components of an arbitrary JSON value
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        Self {
            position: value.get("position").and_then(vec3),
            rotation: value.get("rotation").and_then(vec3),
            scale: value.get("scale").and_then(Scale::from_value),
        }
    }
}

impl<'de> Deserialize<'de> for Transform {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_value(&value))
    }
}

fn vec3(value: &Value) -> Option<[f32; 3]> {
    match value.as_array()?.as_slice() {
        [x, y, z] => Some([x.as_f64()? as f32, y.as_f64()? as f32, z.as_f64()? as f32]),
        _ => None,
    }
}

/// Model index (`"0"`, `"1"`, ...) -> placement
pub type TransformMap = BTreeMap<String, Transform>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_scalar_or_axes() {
        let t: Transform = serde_json::from_str(r#"{"scale": 2.0}"#).unwrap();
        assert_eq!(t.scale, Some(Scale::Uniform(2.0)));
        assert_eq!(t.scale.unwrap().to_axes(), [2.0, 2.0, 2.0]);

        let t: Transform = serde_json::from_str(r#"{"scale": [1, 2, 3]}"#).unwrap();
        assert_eq!(t.scale.unwrap().to_axes(), [1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_transform_map_uses_index_keys() {
        let json = r#"{
            "0": {"position": [0, 10, 0]},
            "2": {"rotation": [0, 90, 0], "scale": 0.5}
        }"#;
        let map: TransformMap = serde_json::from_str(json).unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map["0"].position, Some([0.0, 10.0, 0.0]));
        assert_eq!(map["2"].rotation, Some([0.0, 90.0, 0.0]));
        assert!(!map.contains_key("1"));

        let back = serde_json::to_value(&map).unwrap();
        assert_eq!(back["0"]["position"][1], 10.0);
        assert!(back["0"].get("rotation").is_none());
    }

    #[test]
    fn test_malformed_components_are_dropped() {
        let t: Transform = serde_json::from_str(r#"{"position": [1, 2]}"#).unwrap();
        assert!(t.position.is_none());

        let t: Transform =
            serde_json::from_str(r#"{"position": [1, 2, 3, 4], "rotation": [0, 90, 0]}"#).unwrap();
        assert!(t.position.is_none());
        assert_eq!(t.rotation, Some([0.0, 90.0, 0.0]));

        let t: Transform =
            serde_json::from_str(r#"{"position": [1, "up", 3], "scale": "big"}"#).unwrap();
        assert!(t.is_identity());

        let t: Transform = serde_json::from_str("42").unwrap();
        assert!(t.is_identity());
    }

    #[test]
    fn test_non_index_keys_are_kept() {
        let json = r#"{"plane": {"position": [0, 500, 0]}, "0": {"scale": [1, 1]}}"#;
        let map: TransformMap = serde_json::from_str(json).unwrap();
        assert_eq!(map["plane"].position, Some([0.0, 500.0, 0.0]));
        assert!(map["0"].is_identity());
    }

    #[test]
    fn test_identity() {
        assert!(Transform::default().is_identity());
        let t = Transform {
            position: Some([1.0, 0.0, 0.0]),
            ..Default::default()
        };
        assert!(!t.is_identity());
    }
}
