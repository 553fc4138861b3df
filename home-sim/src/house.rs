//! The house: rooms, power supply and the family living in it.
//!
//! Aggregate temperature/humidity are derived from the rooms on every
//! [`House::update`]; the stored values are only a cache for queries and for
//! the viability check.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::catalog::{Automation, Perk, PerkEffect, PowerGenerator, perk_effect};
use crate::household::Family;
use crate::room::Room;
use crate::weather::Weather;

/// Energy drawn per tick by each room with a heater or AC running
pub const CONDITIONING_ENERGY_COST: i64 = 5;

/// Allowed distance from the optimal temperature
pub const TEMPERATURE_TOLERANCE: f32 = 10.0;

/// Allowed distance from the optimal humidity
pub const HUMIDITY_TOLERANCE: f32 = 0.2;

/// Room whose window state gates the climate automation. Only this room is
/// probed, not every room: a window opened elsewhere does not pause it.
pub const AUTO_CLIMATE_PROBE_ROOM: usize = 0;

// ============================================================================
// Viability - Whether the household can go on
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Viability {
    Viable,
    TemperatureTooHigh(f32),
    TemperatureTooLow(f32),
    HumidityTooHigh(f32),
    HumidityTooLow(f32),
    InsufficientFunds,
    InsufficientEnergy,
}

impl Viability {
    pub fn is_viable(&self) -> bool {
        matches!(self, Viability::Viable)
    }
}

impl fmt::Display for Viability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Viability::Viable => f.write_str("Viable"),
            Viability::TemperatureTooHigh(t) => write!(f, "Temperature too high: {t:.1}°C"),
            Viability::TemperatureTooLow(t) => write!(f, "Temperature too low: {t:.1}°C"),
            Viability::HumidityTooHigh(h) => {
                write!(f, "Humidity too high: {}%", (h * 100.0).round() as i32)
            }
            Viability::HumidityTooLow(h) => {
                write!(f, "Humidity too low: {}%", (h * 100.0).round() as i32)
            }
            Viability::InsufficientFunds => f.write_str("Not enough money to continue"),
            Viability::InsufficientEnergy => f.write_str("Not enough energy to continue"),
        }
    }
}

// ============================================================================
// House
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct House {
    pub temperature: f32,
    pub humidity: f32,
    pub energy: i64,
    pub rooms: Vec<Room>,
    pub power_supply: Vec<PowerGenerator>,
    pub family: Family,
    pub optimal_temperature: f32,
    pub optimal_humidity: f32,
}

impl House {
    pub fn new(
        temperature: f32,
        humidity: f32,
        energy: i64,
        rooms: Vec<Room>,
        power_supply: Vec<PowerGenerator>,
        family: Family,
        optimal_temperature: f32,
        optimal_humidity: f32,
    ) -> Self {
        Self {
            temperature,
            humidity,
            energy,
            rooms,
            power_supply,
            family,
            optimal_temperature,
            optimal_humidity,
        }
    }

    /// First failed condition, in fixed priority order
    pub fn is_viable(&self) -> Viability {
        if self.temperature > self.optimal_temperature + TEMPERATURE_TOLERANCE {
            return Viability::TemperatureTooHigh(self.temperature);
        }
        if self.temperature < self.optimal_temperature - TEMPERATURE_TOLERANCE {
            return Viability::TemperatureTooLow(self.temperature);
        }
        if self.humidity > self.optimal_humidity + HUMIDITY_TOLERANCE {
            return Viability::HumidityTooHigh(self.humidity);
        }
        if self.humidity < self.optimal_humidity - HUMIDITY_TOLERANCE {
            return Viability::HumidityTooLow(self.humidity);
        }
        if self.family.money < 0 {
            return Viability::InsufficientFunds;
        }
        if self.energy < 0 {
            return Viability::InsufficientEnergy;
        }
        Viability::Viable
    }

    /// Advance every room one tick, re-derive the aggregates, run automation
    /// perks, then pay the conditioning energy.
    pub fn update(&mut self, weather: &Weather, bought_perks: &[Perk]) {
        for room in &mut self.rooms {
            room.update(weather.temperature, weather.humidity);
        }
        self.recompute_aggregates();

        for perk in bought_perks {
            if let PerkEffect::Automate(automation) = perk_effect(perk.id) {
                self.automate(automation, weather);
            }
        }

        let conditioned = self.rooms.iter().filter(|r| r.is_conditioning()).count() as i64;
        self.energy -= conditioned * CONDITIONING_ENERGY_COST;
    }

    fn recompute_aggregates(&mut self) {
        if self.rooms.is_empty() {
            return;
        }
        let n = self.rooms.len() as f32;
        self.temperature = self.rooms.iter().map(|r| r.temperature).sum::<f32>() / n;
        self.humidity = self.rooms.iter().map(|r| r.humidity).sum::<f32>() / n;
    }

    fn automate(&mut self, automation: Automation, weather: &Weather) {
        match automation {
            Automation::Windows => {
                let optimal = self.optimal_temperature;
                let outside = weather.temperature;
                let better_outside = (self.temperature < optimal && self.temperature < outside)
                    || (self.temperature > optimal && self.temperature > outside);
                self.set_all_windows_open(better_outside);
            }
            Automation::Climate => {
                let probe_open = self
                    .rooms
                    .get(AUTO_CLIMATE_PROBE_ROOM)
                    .is_some_and(|r| r.window_open);
                if probe_open {
                    return;
                }
                let optimal = self.optimal_temperature;
                if self.temperature < optimal {
                    self.set_all_heaters(optimal);
                    self.turn_off_all_ac();
                } else {
                    self.set_all_ac(optimal);
                    self.turn_off_all_heaters();
                }
            }
        }
    }

    /// Daily bookkeeping: generators produce and charge, occupants rest,
    /// perks charge their upkeep.
    pub fn on_new_day(&mut self, bought_perks: &[Perk]) {
        for generator in &self.power_supply {
            self.energy += generator.daily_production;
            self.family.money -= generator.daily_cost;
        }
        for person in self.family.persons_mut() {
            person.on_new_day();
        }
        for perk in bought_perks {
            self.energy -= perk.daily_energy_cost;
            self.family.money -= perk.daily_money_cost;
        }
    }

    pub fn add_power_supply(&mut self, generator: PowerGenerator) {
        self.power_supply.push(generator);
    }

    /// Overwrite the aggregate conditions, seeding every room with them so the
    /// next tick continues from the same mean.
    pub fn set_conditions(&mut self, temperature: f32, humidity: f32) {
        self.temperature = temperature;
        self.humidity = humidity;
        for room in &mut self.rooms {
            room.temperature = temperature;
            room.humidity = humidity;
        }
    }

    pub fn set_all_windows_open(&mut self, open: bool) {
        for room in &mut self.rooms {
            room.window_open = open;
        }
    }

    pub fn set_all_heaters(&mut self, setpoint: f32) {
        for room in &mut self.rooms {
            room.turn_heater_on(setpoint);
        }
    }

    pub fn turn_off_all_heaters(&mut self) {
        for room in &mut self.rooms {
            room.heater_on = false;
        }
    }

    pub fn set_all_ac(&mut self, setpoint: f32) {
        for room in &mut self.rooms {
            room.turn_ac_on(setpoint);
        }
    }

    pub fn turn_off_all_ac(&mut self) {
        for room in &mut self.rooms {
            room.ac_on = false;
        }
    }

    pub fn set_isolation(&mut self, isolation: f32) {
        for room in &mut self.rooms {
            room.isolation = isolation;
        }
    }
}

impl fmt::Display for House {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Rooms are switched house-wide, so the first one speaks for all
        let (windows, heaters, ac) = match self.rooms.first() {
            Some(room) => (
                if room.window_open { "Open".to_string() } else { "Closed".to_string() },
                if room.heater_on {
                    format!("{:.1}°C", room.heater_setpoint)
                } else {
                    "Off".to_string()
                },
                if room.ac_on {
                    format!("{:.1}°C", room.ac_setpoint)
                } else {
                    "Off".to_string()
                },
            ),
            None => ("-".to_string(), "-".to_string(), "-".to_string()),
        };
        write!(
            f,
            "House - T: {:.1}°C, humidity: {}%, windows: {}, heaters: {}, AC: {}",
            self.temperature,
            (self.humidity * 100.0).round() as i32,
            windows,
            heaters,
            ac
        )
    }
}
