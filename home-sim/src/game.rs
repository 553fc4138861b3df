//! The simulation engine: one household, one weather process, three catalogs.
//!
//! Core operations here are phase-agnostic; [`crate::commands`] layers the
//! task-selection → execution → shopping cycle on top of them.

use rand::Rng;

use crate::catalog::{Perk, PerkEffect, Task, TaskEffect, default_perks, default_tasks, perk_effect};
use crate::config::GameConfig;
use crate::error::GameError;
use crate::house::House;
use crate::household::{Family, Person};
use crate::room::Room;
use crate::types::{PerkId, PersonId, Phase, TaskId};
use crate::weather::{Weather, difficulty_for_day};

/// Result of trying to buy a perk. Only `Bought` changes any state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurchaseOutcome {
    Bought,
    NotAvailable,
    CannotAfford,
}

#[derive(Debug, Clone)]
pub struct Game {
    pub(crate) house: House,
    pub(crate) weather: Weather,
    pub(crate) day_number: u32,
    pub(crate) available_tasks: Vec<Task>,
    pub(crate) available_perks: Vec<Perk>,
    pub(crate) bought_perks: Vec<Perk>,
    pub(crate) game_over_reason: String, // Empty while the game runs
    pub(crate) phase: Phase,
    pub(crate) next_slot: usize, // Next task slot to run during execution
    pub(crate) heater_setpoint: f32,
    pub(crate) ac_setpoint: f32,
}

impl Game {
    pub fn new(config: &GameConfig) -> Self {
        let mut weather = Weather::new(config.weather_temperature, config.weather_humidity);
        weather.difficulty = difficulty_for_day(0);
        Self::with_weather(config, 0, weather)
    }

    pub fn with_defaults() -> Self {
        Self::new(&GameConfig::default())
    }

    /// Fresh household at an arbitrary day under a given weather
    pub(crate) fn with_weather(config: &GameConfig, day_number: u32, weather: Weather) -> Self {
        Self {
            house: init_house(config),
            weather,
            day_number,
            available_tasks: default_tasks(),
            available_perks: default_perks(),
            bought_perks: Vec::new(),
            game_over_reason: String::new(),
            phase: Phase::TaskSelection,
            next_slot: 0,
            heater_setpoint: config.heater_setpoint,
            ac_setpoint: config.ac_setpoint,
        }
    }

    // === Queries ===

    pub fn day_number(&self) -> u32 {
        self.day_number
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn house(&self) -> &House {
        &self.house
    }

    pub fn house_mut(&mut self) -> &mut House {
        &mut self.house
    }

    pub fn family(&self) -> &Family {
        &self.house.family
    }

    pub fn weather(&self) -> &Weather {
        &self.weather
    }

    pub fn available_tasks(&self) -> &[Task] {
        &self.available_tasks
    }

    pub fn available_perks(&self) -> &[Perk] {
        &self.available_perks
    }

    pub fn bought_perks(&self) -> &[Perk] {
        &self.bought_perks
    }

    pub fn game_over_reason(&self) -> &str {
        &self.game_over_reason
    }

    pub fn is_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn has_bought(&self, id: PerkId) -> bool {
        self.bought_perks.iter().any(|p| p.id == id)
    }

    /// Look a task up by id; ids past the catalog size are never valid
    pub fn find_task_from_id(&self, id: TaskId) -> Option<&Task> {
        if id.0 as usize >= self.available_tasks.len() {
            return None;
        }
        self.available_tasks.iter().find(|t| t.id == id)
    }

    /// Look an available (not yet bought) perk up by id
    pub fn get_perk_by_id(&self, id: PerkId) -> Option<&Perk> {
        self.available_perks.iter().find(|p| p.id == id)
    }

    pub fn find_person(&self, id: PersonId) -> Option<&Person> {
        self.house.family.person(id)
    }

    // === Day Cycle ===

    /// Run slot `n` of every occupant's task list, then tick the house once
    pub fn do_nth_task_of_all_persons(&mut self, n: usize) {
        // Snapshot the slot first: effects touch the house the persons live in
        let slot: Vec<(PersonId, Task)> = self
            .house
            .family
            .persons()
            .iter()
            .filter_map(|p| p.task_at(n).map(|t| (p.id, t.clone())))
            .collect();

        for (person_id, task) in slot {
            self.apply_task_effect(TaskEffect::for_task(task.id));

            if let Some(person) = self.house.family.person_mut(person_id) {
                person.stamina += task.stamina;
            }
            self.house.family.money += task.money;
            self.house.energy += task.energy;

            #[cfg(feature = "instrument")]
            {
                let stamina_after = self
                    .house
                    .family
                    .person(person_id)
                    .map(|p| p.stamina as i64)
                    .unwrap_or_default();
                tracing::info!(
                    target: "task",
                    day = self.day_number,
                    slot = n as u64,
                    person_id = person_id.0,
                    task_id = task.id.0,
                    stamina_after = stamina_after,
                    money_after = self.house.family.money,
                    energy_after = self.house.energy,
                );
            }
        }

        self.house.update(&self.weather, &self.bought_perks);

        #[cfg(feature = "instrument")]
        tracing::info!(
            target: "house_tick",
            day = self.day_number,
            temperature = self.house.temperature as f64,
            humidity = self.house.humidity as f64,
            energy = self.house.energy,
        );
    }

    fn apply_task_effect(&mut self, effect: TaskEffect) {
        match effect {
            TaskEffect::HeatersOn => self.house.set_all_heaters(self.heater_setpoint),
            TaskEffect::HeatersOff => self.house.turn_off_all_heaters(),
            TaskEffect::AcOn => self.house.set_all_ac(self.ac_setpoint),
            TaskEffect::AcOff => self.house.turn_off_all_ac(),
            TaskEffect::OpenWindows => self.house.set_all_windows_open(true),
            TaskEffect::CloseWindows => self.house.set_all_windows_open(false),
            TaskEffect::None => {}
        }
    }

    /// Close the day. Refuses (and ends the game) if the house is not viable;
    /// nothing else is mutated in that case. Returns the new day number.
    pub fn on_new_day<R: Rng>(&mut self, rng: &mut R) -> Result<u32, GameError> {
        let viability = self.house.is_viable();
        if !viability.is_viable() {
            self.game_over_reason = viability.to_string();
            self.phase = Phase::GameOver;

            #[cfg(feature = "instrument")]
            tracing::info!(
                target: "game_over",
                day = self.day_number,
                reason = self.game_over_reason.as_str(),
            );

            return Err(GameError::NotViable(self.game_over_reason.clone()));
        }

        self.day_number += 1;
        self.house.on_new_day(&self.bought_perks);
        self.weather.update(self.day_number, rng);
        self.phase = Phase::TaskSelection;
        self.next_slot = 0;

        #[cfg(feature = "instrument")]
        tracing::info!(
            target: "day",
            day = self.day_number,
            money = self.house.family.money,
            energy = self.house.energy,
            weather_temperature = self.weather.temperature as f64,
            weather_humidity = self.weather.humidity as f64,
            rainy = self.weather.rainy,
        );

        Ok(self.day_number)
    }

    // === Perks ===

    /// Buy an available perk if the family can pay for it
    pub fn buy_perk_from_id(&mut self, id: PerkId) -> PurchaseOutcome {
        let Some(cost) = self.get_perk_by_id(id).map(|p| p.installation_cost) else {
            return PurchaseOutcome::NotAvailable;
        };
        if cost > self.house.family.money {
            return PurchaseOutcome::CannotAfford;
        }
        self.house.family.money -= cost;
        self.add_perk_from_id(id);

        #[cfg(feature = "instrument")]
        tracing::info!(
            target: "perk",
            day = self.day_number,
            perk_id = id.0,
            installation_cost = cost,
            money_after = self.house.family.money,
        );

        PurchaseOutcome::Bought
    }

    /// Move a perk from available to bought and apply its one-time effect.
    /// Also used to replay purchases from a save. Returns false if the perk
    /// is not on sale.
    pub fn add_perk_from_id(&mut self, id: PerkId) -> bool {
        let Some(index) = self.available_perks.iter().position(|p| p.id == id) else {
            return false;
        };
        let perk = self.available_perks.remove(index);
        self.bought_perks.push(perk);
        self.apply_perk_effect(perk_effect(id));
        true
    }

    fn apply_perk_effect(&mut self, effect: PerkEffect) {
        match effect {
            PerkEffect::Upkeep | PerkEffect::Automate(_) => {}
            PerkEffect::ReplaceTask(task) => {
                if let Some(slot) = self.available_tasks.iter_mut().find(|t| t.id == task.id) {
                    *slot = task;
                }
            }
            PerkEffect::AddGenerator(generator) => self.house.add_power_supply(generator),
            PerkEffect::Insulate {
                isolation,
                discount,
                supersedes,
            } => {
                self.house.set_isolation(isolation);
                if let Some((target, cost)) = discount {
                    if let Some(perk) = self.available_perks.iter_mut().find(|p| p.id == target) {
                        *perk = perk.repriced(cost);
                    }
                }
                if let Some(weaker) = supersedes {
                    self.available_perks.retain(|p| p.id != weaker);
                }
            }
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::with_defaults()
    }
}

fn init_house(config: &GameConfig) -> House {
    let rooms = config
        .rooms
        .iter()
        .map(|r| Room::new(r.name.clone(), r.temperature, r.humidity).with_isolation(r.isolation))
        .collect();

    let mut family = Family::new(config.starting_money);
    for person in &config.persons {
        family.add_person(person.name.clone(), person.max_stamina);
    }

    House::new(
        config.house_temperature,
        config.house_humidity,
        config.starting_energy,
        rooms,
        config.generators.clone(),
        family,
        config.optimal_temperature,
        config.optimal_humidity,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{
        PERK_COOKING_ROBOT, PERK_INSULATION_65, PERK_INSULATION_90, PERK_MATTRESS,
        PERK_SOLAR_PANELS, TASK_COOK, TASK_HEATER_ON, TASK_OPEN_WINDOWS, TASK_SLEEP, TASK_WORK,
    };
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn queue(game: &mut Game, person: u32, task: TaskId) {
        let task = game.find_task_from_id(task).cloned().unwrap();
        game.house
            .family
            .person_mut(PersonId(person))
            .unwrap()
            .add_task(task);
    }

    #[test]
    fn test_new_game_matches_starting_household() {
        let game = Game::with_defaults();
        assert_eq!(game.day_number(), 0);
        assert_eq!(game.family().money, 500);
        assert_eq!(game.house().energy, 100);
        assert_eq!(game.house().rooms.len(), 5);
        assert_eq!(game.family().persons().len(), 2);
        assert_eq!(game.find_person(PersonId(0)).unwrap().name, "Jean");
        assert_eq!(game.find_person(PersonId(1)).unwrap().name, "Marie");
        assert_eq!(game.phase(), Phase::TaskSelection);
        assert_eq!(game.game_over_reason(), "");
        assert_eq!(game.available_perks().len(), 8);
        assert!(game.bought_perks().is_empty());
    }

    #[test]
    fn test_task_lookup_bounds() {
        let game = Game::with_defaults();
        assert_eq!(game.find_task_from_id(TASK_WORK).unwrap().name, "Work");
        assert!(game.find_task_from_id(TaskId(10)).is_none());
        assert!(game.find_task_from_id(TaskId(u32::MAX)).is_none());
    }

    #[test]
    fn test_work_slot_pays_and_tires() {
        let mut game = Game::with_defaults();
        queue(&mut game, 0, TASK_WORK);
        game.do_nth_task_of_all_persons(0);
        assert_eq!(game.find_person(PersonId(0)).unwrap().stamina, 5);
        assert_eq!(game.find_person(PersonId(1)).unwrap().stamina, 10);
        assert_eq!(game.family().money, 700);
    }

    #[test]
    fn test_slot_past_end_only_ticks_house() {
        let mut game = Game::with_defaults();
        queue(&mut game, 0, TASK_WORK);
        let before = game.family().money;
        game.do_nth_task_of_all_persons(3);
        assert_eq!(game.family().money, before);
        // Outdoor 20°C pulls the 18°C rooms up a little
        assert!(game.house().temperature > 18.0);
    }

    #[test]
    fn test_toggle_tasks_are_idempotent() {
        let mut game = Game::with_defaults();
        queue(&mut game, 0, TASK_HEATER_ON);
        queue(&mut game, 1, TASK_HEATER_ON);
        game.do_nth_task_of_all_persons(0);
        let house = game.house();
        assert!(house.rooms.iter().all(|r| r.heater_on && r.heater_setpoint == 23.0));
        // One conditioning charge per room, not per person
        assert_eq!(house.energy, 100 - 5 * 5);
    }

    #[test]
    fn test_cook_costs_money_and_energy() {
        let mut game = Game::with_defaults();
        queue(&mut game, 1, TASK_COOK);
        game.do_nth_task_of_all_persons(0);
        assert_eq!(game.family().money, 450);
        assert_eq!(game.house().energy, 70);
        assert_eq!(game.find_person(PersonId(1)).unwrap().stamina, 11);
    }

    #[test]
    fn test_open_windows_task() {
        let mut game = Game::with_defaults();
        queue(&mut game, 0, TASK_OPEN_WINDOWS);
        game.do_nth_task_of_all_persons(0);
        // 18°C averaged with 20°C outside
        assert!(game.house().rooms.iter().all(|r| r.window_open));
        assert!((game.house().temperature - 19.0).abs() < 1e-5);
    }

    #[test]
    fn test_new_day_advances_and_resets() {
        let mut game = Game::with_defaults();
        let mut rng = StdRng::seed_from_u64(1);
        queue(&mut game, 0, TASK_WORK);
        game.do_nth_task_of_all_persons(0);
        assert_eq!(game.on_new_day(&mut rng), Ok(1));
        let jean = game.find_person(PersonId(0)).unwrap();
        assert_eq!(jean.stamina, 10);
        assert!(jean.tasks().is_empty());
        // Linky: +100 energy, -100 money
        assert_eq!(game.family().money, 600);
    }

    #[test]
    fn test_non_viable_day_is_refused_untouched() {
        let mut game = Game::with_defaults();
        let mut rng = StdRng::seed_from_u64(1);
        game.house.family.money = -1;
        let weather_before = game.weather().clone();
        let energy_before = game.house().energy;

        let result = game.on_new_day(&mut rng);
        assert_eq!(
            result,
            Err(GameError::NotViable("Not enough money to continue".into()))
        );
        assert_eq!(game.day_number(), 0);
        assert_eq!(game.weather(), &weather_before);
        assert_eq!(game.house().energy, energy_before);
        assert_eq!(game.family().money, -1);
        assert_eq!(game.game_over_reason(), "Not enough money to continue");
        assert!(game.is_over());
    }

    #[test]
    fn test_buy_requires_money() {
        let mut game = Game::with_defaults();
        assert_eq!(game.buy_perk_from_id(PERK_MATTRESS), PurchaseOutcome::CannotAfford);
        assert_eq!(game.family().money, 500);
        assert!(game.get_perk_by_id(PERK_MATTRESS).is_some());

        game.house.family.money = 1000;
        assert_eq!(game.buy_perk_from_id(PERK_MATTRESS), PurchaseOutcome::Bought);
        assert_eq!(game.family().money, 0);
        assert!(game.has_bought(PERK_MATTRESS));
        assert!(game.get_perk_by_id(PERK_MATTRESS).is_none());
        assert_eq!(game.find_task_from_id(TASK_SLEEP).unwrap().stamina, 3);
    }

    #[test]
    fn test_buy_unknown_perk_is_noop() {
        let mut game = Game::with_defaults();
        assert_eq!(game.buy_perk_from_id(PerkId(99)), PurchaseOutcome::NotAvailable);
        assert_eq!(game.family().money, 500);
    }

    #[test]
    fn test_cooking_robot_replaces_cook_in_place() {
        let mut game = Game::with_defaults();
        assert!(game.add_perk_from_id(PERK_COOKING_ROBOT));
        let position = game.available_tasks().iter().position(|t| t.id == TASK_COOK);
        assert_eq!(position, Some(TASK_COOK.0 as usize));
        let cook = game.find_task_from_id(TASK_COOK).unwrap();
        assert_eq!((cook.stamina, cook.money, cook.energy), (3, -50, -30));
    }

    #[test]
    fn test_generator_perks_add_supply() {
        let mut game = Game::with_defaults();
        assert!(game.add_perk_from_id(PERK_SOLAR_PANELS));
        assert_eq!(game.house().power_supply.len(), 2);
        assert_eq!(game.house().power_supply[1].name, "Solar panel");
    }

    #[test]
    fn test_insulation_upgrade_path() {
        let mut game = Game::with_defaults();
        assert!(game.add_perk_from_id(PERK_INSULATION_65));
        assert!(game.house().rooms.iter().all(|r| r.isolation == 0.65));
        assert_eq!(
            game.get_perk_by_id(PERK_INSULATION_90).unwrap().installation_cost,
            2500
        );

        assert!(game.add_perk_from_id(PERK_INSULATION_90));
        assert!(game.house().rooms.iter().all(|r| r.isolation == 0.9));
        assert!(game.get_perk_by_id(PERK_INSULATION_65).is_none());
        assert!(!game.add_perk_from_id(PERK_INSULATION_90));
    }

    #[test]
    fn test_best_insulation_withdraws_weaker() {
        let mut game = Game::with_defaults();
        game.house.family.money = 5000;
        assert_eq!(game.buy_perk_from_id(PERK_INSULATION_90), PurchaseOutcome::Bought);
        assert!(game.get_perk_by_id(PERK_INSULATION_65).is_none());
        assert_eq!(game.buy_perk_from_id(PERK_INSULATION_65), PurchaseOutcome::NotAvailable);
        assert_eq!(game.family().money, 0);
    }
}
