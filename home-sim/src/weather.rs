//! Outdoor weather as a daily stochastic process.
//!
//! Day-to-day variation grows with a logistic difficulty curve centred on
//! day 5: early days are calm, later days swing hard.
//!
//! The only randomness in the engine lives here, and it is drawn from a
//! caller-supplied `Rng` so runs replay exactly under a fixed seed.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::SkyCondition;

/// Day at which the difficulty curve reaches 0.5
pub const DIFFICULTY_MIDPOINT_DAY: f64 = 5.0;

/// Steepness of the difficulty curve
pub const DIFFICULTY_STEEPNESS: f64 = 0.5;

/// Largest daily temperature swing at full difficulty
pub const MAX_TEMPERATURE_SWING: f64 = 20.0;

/// Largest daily humidity swing at full difficulty
pub const MAX_HUMIDITY_SWING: f64 = 0.1;

/// Temperature jump when rain starts (negative) or stops (positive)
pub const RAIN_TRANSITION_JUMP: f32 = 5.0;

/// Humidity after rain stops
pub const POST_RAIN_HUMIDITY: f32 = 0.5;

/// Logistic difficulty for a day, rising from ~0.08 at day 0 toward 1.0
pub fn difficulty_for_day(day: u32) -> f32 {
    let x = -DIFFICULTY_STEEPNESS * (day as f64 - DIFFICULTY_MIDPOINT_DAY);
    (1.0 / (1.0 + x.exp())) as f32
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weather {
    pub temperature: f32,
    pub humidity: f32,
    pub rainy: bool,
    pub snowy: bool,
    pub sunny: bool,
    pub lightning: bool,
    pub difficulty: f32,
}

impl Weather {
    pub fn new(temperature: f32, humidity: f32) -> Self {
        Self {
            temperature,
            humidity,
            rainy: false,
            snowy: false,
            sunny: false,
            lightning: false,
            difficulty: 0.0,
        }
    }

    /// Restore weather from a saved sky condition. Snow and lightning only
    /// ever happen while it rains, so both imply `rainy`.
    pub fn with_sky(mut self, sky: SkyCondition) -> Self {
        self.rainy = matches!(
            sky,
            SkyCondition::Rainy | SkyCondition::Snowy | SkyCondition::Lightning
        );
        self.snowy = sky == SkyCondition::Snowy;
        self.lightning = sky == SkyCondition::Lightning;
        self.sunny = sky == SkyCondition::Sunny;
        self
    }

    /// Single condition summarising the flags, most severe first
    pub fn sky(&self) -> SkyCondition {
        if self.snowy {
            SkyCondition::Snowy
        } else if self.lightning {
            SkyCondition::Lightning
        } else if self.rainy {
            SkyCondition::Rainy
        } else {
            SkyCondition::Sunny
        }
    }

    /// Roll the weather for a new day
    pub fn update<R: Rng>(&mut self, day: u32, rng: &mut R) {
        self.difficulty = difficulty_for_day(day);
        let difficulty = self.difficulty as f64;

        let was_rainy = self.rainy;
        self.rainy = rng.random::<f64>() < difficulty / 2.0;
        self.snowy = self.rainy && self.temperature <= 0.0;
        self.sunny = !self.rainy;
        self.lightning = false;

        let sign = if rng.random::<f64>() < 0.5 { -1.0 } else { 1.0 };

        let swing = sign * rng.random::<f64>() * difficulty * MAX_TEMPERATURE_SWING;
        self.temperature += swing as f32;
        if self.sunny && was_rainy {
            self.temperature += RAIN_TRANSITION_JUMP;
        } else if self.rainy && !was_rainy {
            self.temperature -= RAIN_TRANSITION_JUMP;
        }

        if self.rainy {
            self.humidity = 1.0;
            self.lightning = rng.random::<f64>() < difficulty / 4.0;
        } else if was_rainy {
            self.humidity = POST_RAIN_HUMIDITY;
        } else {
            let drift = sign * rng.random::<f64>() * difficulty * MAX_HUMIDITY_SWING;
            self.humidity = (self.humidity + drift as f32).clamp(0.0, 1.0);
        }

        #[cfg(feature = "instrument")]
        tracing::info!(
            target: "weather",
            day = day,
            temperature = self.temperature as f64,
            humidity = self.humidity as f64,
            rainy = self.rainy,
            difficulty = difficulty,
        );
    }
}

impl Default for Weather {
    fn default() -> Self {
        Self::new(20.0, 0.5)
    }
}

impl fmt::Display for Weather {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Weather - T : {:.1}°C, humidity : {}%, Sky: {}",
            self.temperature,
            (self.humidity * 100.0).round() as i32,
            self.sky().label()
        )
    }
}
