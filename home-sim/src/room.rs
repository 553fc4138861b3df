//! Per-room thermal and humidity model.
//!
//! A room is advanced once per task slot against the outdoor conditions. An
//! open window averages the room with the outside and ignores the walls; a
//! closed room is first pulled toward any active heater/AC setpoint and then
//! leaks toward the outside in proportion to `1 - isolation`.

use serde::{Deserialize, Serialize};

/// Fraction of the indoor/outdoor humidity gap crossing the walls per tick
pub const HUMIDITY_LEAK: f32 = 0.1;

/// Fraction of the indoor/outdoor temperature gap crossing the walls per tick
pub const TEMPERATURE_LEAK: f32 = 0.2;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub name: String,
    pub heater_setpoint: f32,
    pub heater_on: bool,
    pub ac_setpoint: f32,
    pub ac_on: bool,
    pub temperature: f32,
    pub humidity: f32,  // 0.0 - 1.0
    pub isolation: f32, // 0.0 - 1.0, 1.0 = no exchange with outside
    pub window_open: bool,
}

impl Room {
    pub fn new(name: impl Into<String>, temperature: f32, humidity: f32) -> Self {
        Self {
            name: name.into(),
            heater_setpoint: 0.0,
            heater_on: false,
            ac_setpoint: 0.0,
            ac_on: false,
            temperature,
            humidity,
            isolation: 0.5,
            window_open: false,
        }
    }

    pub fn with_isolation(mut self, isolation: f32) -> Self {
        self.isolation = isolation;
        self
    }

    /// Advance one tick against the outdoor temperature and humidity
    pub fn update(&mut self, outside_temperature: f32, outside_humidity: f32) {
        if self.window_open {
            self.temperature = (self.temperature + outside_temperature) / 2.0;
            self.humidity = (self.humidity + outside_humidity) / 2.0;
            return;
        }

        if self.heater_on && self.heater_setpoint > self.temperature {
            self.temperature = (self.temperature + self.heater_setpoint) / 2.0;
        }
        if self.ac_on && self.ac_setpoint < self.temperature {
            self.temperature = (self.temperature + self.ac_setpoint) / 2.0;
        }

        let leak = 1.0 - self.isolation;
        self.humidity = (self.humidity
            + leak * (outside_humidity - self.humidity) * HUMIDITY_LEAK)
            .clamp(0.0, 1.0);
        self.temperature += leak * (outside_temperature - self.temperature) * TEMPERATURE_LEAK;
    }

    pub fn turn_heater_on(&mut self, setpoint: f32) {
        self.heater_setpoint = setpoint;
        self.heater_on = true;
    }

    pub fn turn_ac_on(&mut self, setpoint: f32) {
        self.ac_setpoint = setpoint;
        self.ac_on = true;
    }

    /// Heater or AC currently drawing power
    pub fn is_conditioning(&self) -> bool {
        self.heater_on || self.ac_on
    }
}
