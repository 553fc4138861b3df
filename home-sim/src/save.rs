//! Flat integer save snapshot.
//!
//! Layout:
//!
//! | index | value |
//! |---|---|
//! | 0 | day number |
//! | 1 | family money |
//! | 2 | house energy |
//! | 3 | weather temperature × 100 |
//! | 4 | weather humidity × 100 |
//! | 5 | sky code (0 rainy, 1 snowy, 2 sunny, 3 lightning) |
//! | 6 | house temperature × 100 |
//! | 7 | house humidity × 100 |
//! | 8 | K, number of bought perks |
//! | 9.. | K bought perk ids, in purchase order |
//!
//! Perks are replayed in order on load, so an order-dependent history (the
//! 90% insulation after the 65% one) resolves to the same catalog state.
//!
//! The snapshot carries no phase and no task lists, and loading always
//! starts at task selection. [`Game::save`] is therefore only allowed at the
//! start of a day; saving mid-day would let the same day's tasks pay twice.

use crate::catalog::default_perks;
use crate::config::GameConfig;
use crate::error::{GameError, SnapshotError};
use crate::game::Game;
use crate::types::{PerkId, Phase, SkyCondition};
use crate::weather::{Weather, difficulty_for_day};

pub const HEADER_LEN: usize = 9;

const DAY: usize = 0;
const MONEY: usize = 1;
const ENERGY: usize = 2;
const WEATHER_TEMPERATURE: usize = 3;
const WEATHER_HUMIDITY: usize = 4;
const SKY: usize = 5;
const HOUSE_TEMPERATURE: usize = 6;
const HOUSE_HUMIDITY: usize = 7;
const PERK_COUNT: usize = 8;

fn to_centi(value: f32) -> i32 {
    (value * 100.0).round() as i32
}

fn from_centi(value: i32) -> f32 {
    value as f32 / 100.0
}

fn cell(field: &'static str, value: i64) -> Result<i32, SnapshotError> {
    i32::try_from(value).map_err(|_| SnapshotError::ValueOutOfRange { field, value })
}

impl Game {
    /// Save at the start of a day, the only point a snapshot can describe
    pub fn save(&self) -> Result<Vec<i32>, GameError> {
        if self.phase != Phase::TaskSelection {
            return Err(GameError::WrongPhase {
                expected: Phase::TaskSelection,
                actual: self.phase,
            });
        }
        Ok(self.to_snapshot()?)
    }

    /// Encode the persistent part of the game, whatever the phase. Fails if
    /// money, energy or the day no longer fit an `i32`.
    pub(crate) fn to_snapshot(&self) -> Result<Vec<i32>, SnapshotError> {
        let mut out = Vec::with_capacity(HEADER_LEN + self.bought_perks.len());
        out.push(cell("day", self.day_number as i64)?);
        out.push(cell("money", self.house.family.money)?);
        out.push(cell("energy", self.house.energy)?);
        out.push(to_centi(self.weather.temperature));
        out.push(to_centi(self.weather.humidity));
        out.push(self.weather.sky().code());
        out.push(to_centi(self.house.temperature));
        out.push(to_centi(self.house.humidity));
        out.push(self.bought_perks.len() as i32);
        out.extend(self.bought_perks.iter().map(|p| p.id.0 as i32));
        Ok(out)
    }

    /// Rebuild a game from a snapshot. Any inconsistency is fatal; no field
    /// is ever defaulted.
    pub fn from_snapshot(snapshot: &[i32], config: &GameConfig) -> Result<Game, SnapshotError> {
        if snapshot.len() < HEADER_LEN {
            return Err(SnapshotError::TooShort {
                len: snapshot.len(),
                min: HEADER_LEN,
            });
        }

        let day = snapshot[DAY];
        if day < 0 {
            return Err(SnapshotError::NegativeDay(day));
        }
        let declared = snapshot[PERK_COUNT];
        if declared < 0 {
            return Err(SnapshotError::NegativePerkCount(declared));
        }
        let declared = declared as usize;
        let expected = HEADER_LEN + declared;
        if snapshot.len() != expected {
            return Err(SnapshotError::LengthMismatch {
                declared,
                len: snapshot.len(),
                expected,
            });
        }

        let sky = SkyCondition::from_code(snapshot[SKY])
            .ok_or(SnapshotError::UnknownSkyCondition(snapshot[SKY]))?;
        let mut weather = Weather::new(
            from_centi(snapshot[WEATHER_TEMPERATURE]),
            from_centi(snapshot[WEATHER_HUMIDITY]),
        )
        .with_sky(sky);
        weather.difficulty = difficulty_for_day(day as u32);

        let mut game = Game::with_weather(config, day as u32, weather);
        game.house.family.money = snapshot[MONEY] as i64;
        game.house.energy = snapshot[ENERGY] as i64;
        game.house.set_conditions(
            from_centi(snapshot[HOUSE_TEMPERATURE]),
            from_centi(snapshot[HOUSE_HUMIDITY]),
        );

        let catalog = default_perks();
        for &raw in &snapshot[HEADER_LEN..] {
            let known = u32::try_from(raw)
                .ok()
                .map(PerkId::new)
                .filter(|id| catalog.iter().any(|p| p.id == *id))
                .ok_or(SnapshotError::UnknownPerk(raw))?;
            if !game.add_perk_from_id(known) {
                return Err(SnapshotError::PerkNotAvailable(known));
            }
        }

        Ok(game)
    }
}
