use serde::{Deserialize, Serialize};

use crate::catalog::PowerGenerator;
use crate::error::ConfigError;

// ============================================================================
// Game Config - Starting conditions of a new session
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomConfig {
    pub name: String,
    pub temperature: f32,
    pub humidity: f32,
    pub isolation: f32,
}

impl RoomConfig {
    fn standard(name: &str) -> Self {
        Self {
            name: name.to_string(),
            temperature: 18.0,
            humidity: 0.4,
            isolation: 0.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonConfig {
    pub name: String,
    pub max_stamina: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub starting_money: i64,
    pub starting_energy: i64,
    pub house_temperature: f32,
    pub house_humidity: f32,
    pub optimal_temperature: f32,
    pub optimal_humidity: f32,
    pub rooms: Vec<RoomConfig>,
    pub persons: Vec<PersonConfig>, // Ids follow list order
    pub generators: Vec<PowerGenerator>,
    pub heater_setpoint: f32, // Used by the "Heater On" task
    pub ac_setpoint: f32,     // Used by the "AC On" task
    pub weather_temperature: f32,
    pub weather_humidity: f32,
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            starting_money: 500,
            starting_energy: 100,
            house_temperature: 18.0,
            house_humidity: 0.4,
            optimal_temperature: 21.0,
            optimal_humidity: 0.45,
            rooms: ["Kitchen", "Bedroom", "Living room", "Bathroom", "Office"]
                .into_iter()
                .map(RoomConfig::standard)
                .collect(),
            persons: vec![
                PersonConfig {
                    name: "Jean".to_string(),
                    max_stamina: 10,
                },
                PersonConfig {
                    name: "Marie".to_string(),
                    max_stamina: 10,
                },
            ],
            generators: vec![PowerGenerator::new("Linky", 0, 100, 100)],
            heater_setpoint: 23.0,
            ac_setpoint: 18.0,
            weather_temperature: 20.0,
            weather_humidity: 0.5,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON config; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rooms.is_empty() {
            return Err(ConfigError::Invalid("a house needs at least one room".into()));
        }
        if self.persons.is_empty() {
            return Err(ConfigError::Invalid("a family needs at least one person".into()));
        }
        if let Some(room) = self
            .rooms
            .iter()
            .find(|r| !(0.0..=1.0).contains(&r.isolation))
        {
            return Err(ConfigError::Invalid(format!(
                "room {} has isolation {} outside [0, 1]",
                room.name, room.isolation
            )));
        }
        if let Some(person) = self.persons.iter().find(|p| p.max_stamina <= 0) {
            return Err(ConfigError::Invalid(format!(
                "{} needs a positive max stamina",
                person.name
            )));
        }
        Ok(())
    }
}
