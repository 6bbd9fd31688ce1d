//! Canned demo catalog: model lists, scenarios and simulated entities
//!
//! Everything here is fixed data served as-is.

use serde::Serialize;

/// Model files grouped by category
#[derive(Debug, Clone, Serialize)]
pub struct ModelCatalog {
    pub aircraft: Vec<&'static str>,
    pub vehicles: Vec<&'static str>,
    pub city: Vec<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScenarioSummary {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Lighting {
    Day,
    Night,
    Dusk,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PhysicsMode {
    Simple,
    Complex,
}

#[derive(Debug, Clone, Serialize)]
pub struct Camera {
    pub position: [f32; 3],
    pub target: [f32; 3],
}

/// Scene setup for one scenario
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioConfig {
    pub environment: &'static str,
    pub models: Vec<&'static str>,
    pub camera: Camera,
    pub lighting: Lighting,
    pub physics: PhysicsMode,
}

pub fn models() -> ModelCatalog {
    ModelCatalog {
        aircraft: vec![
            "f16.glb",
            "b2_spirit.glb",
            "helicopter.glb",
            "commercial_airliner.glb",
        ],
        vehicles: vec!["car.glb", "truck.glb", "tank.glb", "train.glb"],
        city: vec![
            "new_york.glb",
            "tokyo.glb",
            "london.glb",
            "custom_city.glb",
        ],
    }
}

pub fn scenarios() -> Vec<ScenarioSummary> {
    vec![
        ScenarioSummary {
            id: "city_flyover",
            name: "City Flyover",
            description: "Aircraft flying over a city",
        },
        ScenarioSummary {
            id: "ground_vehicles",
            name: "Ground Vehicle Simulation",
            description: "Vehicles moving through city streets",
        },
        ScenarioSummary {
            id: "military_op",
            name: "Military Operation",
            description: "Combined aircraft and ground vehicle operation",
        },
    ]
}

/// Configuration for a scenario id, if known
pub fn scenario_config(id: &str) -> Option<ScenarioConfig> {
    let config = match id {
        "city_flyover" => ScenarioConfig {
            environment: "new_york.glb",
            models: vec!["b2_spirit.glb"],
            camera: Camera {
                position: [0.0, 500.0, 500.0],
                target: [0.0, 0.0, 0.0],
            },
            lighting: Lighting::Day,
            physics: PhysicsMode::Simple,
        },
        "ground_vehicles" => ScenarioConfig {
            environment: "tokyo.glb",
            models: vec!["car.glb", "truck.glb"],
            camera: Camera {
                position: [0.0, 100.0, 100.0],
                target: [0.0, 0.0, 0.0],
            },
            lighting: Lighting::Night,
            physics: PhysicsMode::Complex,
        },
        "military_op" => ScenarioConfig {
            environment: "custom_city.glb",
            models: vec!["f16.glb", "tank.glb"],
            camera: Camera {
                position: [0.0, 300.0, 300.0],
                target: [0.0, 0.0, 0.0],
            },
            lighting: Lighting::Dusk,
            physics: PhysicsMode::Complex,
        },
        _ => return None,
    };
    Some(config)
}

/// Entity health, serialized as its integer code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(into = "u8")]
pub enum HealthStatus {
    Unknown = 0,
    Healthy = 1,
    Unhealthy = 2,
    Degraded = 3,
}

impl From<HealthStatus> for u8 {
    fn from(status: HealthStatus) -> Self {
        status as u8
    }
}

/// Sensor state, serialized as its integer code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(into = "u8")]
pub enum OperationalState {
    Unknown = 0,
    Off = 1,
    NonOperational = 2,
    Degraded = 3,
    Operational = 4,
}

impl From<OperationalState> for u8 {
    fn from(state: OperationalState) -> Self {
        state as u8
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Ontology {
    pub platform_type: &'static str,
    pub specific_type: &'static str,
}

/// Altitude wrapper; the viewer reads `altitude_hae_meters.__root__`
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Altitude {
    #[serde(rename = "__root__")]
    pub meters: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Position {
    pub latitude_degrees: f64,
    pub longitude_degrees: f64,
    pub altitude_hae_meters: Option<Altitude>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Location {
    pub position: Position,
}

#[derive(Debug, Clone, Serialize)]
pub struct Health {
    pub health_status: HealthStatus,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Indicators {
    pub simulated: bool,
    pub exercise: bool,
    pub emergency: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct Sensor {
    pub sensor_id: &'static str,
    pub sensor_description: &'static str,
    pub sensor_type: &'static str,
    pub operational_state: OperationalState,
}

#[derive(Debug, Clone, Serialize)]
pub struct Sensors {
    pub sensors: Vec<Sensor>,
}

/// Simulated tracked entity
#[derive(Debug, Clone, Serialize)]
pub struct Entity {
    pub entity_id: &'static str,
    pub description: &'static str,
    pub created_time: &'static str,
    pub is_live: bool,
    pub ontology: Ontology,
    pub location: Option<Location>,
    pub health: Health,
    pub indicators: Indicators,
    pub sensors: Sensors,
}

pub fn entities() -> Vec<Entity> {
    vec![
        Entity {
            entity_id: "viper-01",
            description: "F-16 Viper 01",
            created_time: "2024-03-14T09:30:00Z",
            is_live: true,
            ontology: Ontology {
                platform_type: "Aircraft",
                specific_type: "F-16C",
            },
            location: Some(Location {
                position: Position {
                    latitude_degrees: 40.712_776,
                    longitude_degrees: -74.005_974,
                    altitude_hae_meters: Some(Altitude { meters: 3048.0 }),
                },
            }),
            health: Health {
                health_status: HealthStatus::Healthy,
            },
            indicators: Indicators {
                simulated: true,
                exercise: true,
                emergency: false,
            },
            sensors: Sensors {
                sensors: vec![
                    Sensor {
                        sensor_id: "viper-01-radar",
                        sensor_description: "Fire control radar",
                        sensor_type: "SENSOR_TYPE_RADAR",
                        operational_state: OperationalState::Operational,
                    },
                    Sensor {
                        sensor_id: "viper-01-eo",
                        sensor_description: "Targeting pod",
                        sensor_type: "SENSOR_TYPE_ELECTRO_OPTICAL",
                        operational_state: OperationalState::Degraded,
                    },
                ],
            },
        },
        Entity {
            entity_id: "armor-07",
            description: "Tank Platoon Lead",
            created_time: "2024-03-14T09:42:10Z",
            is_live: true,
            ontology: Ontology {
                platform_type: "Ground Vehicle",
                specific_type: "Main Battle Tank",
            },
            location: Some(Location {
                position: Position {
                    latitude_degrees: 40.730_610,
                    longitude_degrees: -73.935_242,
                    altitude_hae_meters: Some(Altitude { meters: 12.5 }),
                },
            }),
            health: Health {
                health_status: HealthStatus::Degraded,
            },
            indicators: Indicators {
                simulated: true,
                exercise: true,
                emergency: false,
            },
            sensors: Sensors {
                sensors: vec![Sensor {
                    sensor_id: "armor-07-thermal",
                    sensor_description: "Thermal sight",
                    sensor_type: "SENSOR_TYPE_INFRARED",
                    operational_state: OperationalState::NonOperational,
                }],
            },
        },
        Entity {
            entity_id: "rotor-03",
            description: "Medevac Helicopter",
            created_time: "2024-03-14T10:05:45Z",
            is_live: false,
            ontology: Ontology {
                platform_type: "Aircraft",
                specific_type: "UH-60",
            },
            location: None,
            health: Health {
                health_status: HealthStatus::Unhealthy,
            },
            indicators: Indicators {
                simulated: true,
                exercise: false,
                emergency: true,
            },
            sensors: Sensors {
                sensors: Vec::new(),
            },
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_models_by_category() {
        let json = serde_json::to_value(models()).unwrap();
        assert_eq!(json["aircraft"][0], "f16.glb");
        assert_eq!(json["vehicles"].as_array().unwrap().len(), 4);
        assert_eq!(json["city"][3], "custom_city.glb");
    }

    #[test]
    fn test_every_scenario_has_config() {
        for scenario in scenarios() {
            assert!(scenario_config(scenario.id).is_some(), "{}", scenario.id);
        }
        assert!(scenario_config("moon_landing").is_none());
    }

    #[test]
    fn test_scenario_config_shape() {
        let json = serde_json::to_value(scenario_config("ground_vehicles").unwrap()).unwrap();
        assert_eq!(json["environment"], "tokyo.glb");
        assert_eq!(json["camera"]["position"][1], 100.0);
        assert_eq!(json["lighting"], "night");
        assert_eq!(json["physics"], "complex");
    }

    #[test]
    fn test_entity_enums_serialize_as_codes() {
        let json = serde_json::to_value(entities()).unwrap();
        assert_eq!(json[0]["health"]["health_status"], 1);
        assert_eq!(json[0]["sensors"]["sensors"][0]["operational_state"], 4);
        assert_eq!(json[1]["health"]["health_status"], 3);
        assert_eq!(
            json[0]["location"]["position"]["altitude_hae_meters"]["__root__"],
            3048.0
        );
        assert!(json[2]["location"].is_null());
    }
}
