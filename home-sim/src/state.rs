use serde::{Deserialize, Serialize};
use tsify_next::Tsify;

use crate::catalog::{Perk, Task};
use crate::game::Game;
use crate::household::Person;
use crate::types::{Phase, SkyCondition};

// ============================================================================
// Serializable State Snapshot for JS
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi)]
pub struct GameView {
    pub day: u32,
    pub phase: Phase,
    pub money: i64,
    pub energy: i64,
    pub persons: Vec<PersonView>,
    pub weather: WeatherView,
    pub house: HouseView,
    pub available_tasks: Vec<TaskView>,
    pub available_perks: Vec<PerkView>,
    pub bought_perks: Vec<PerkView>,
    pub next_slot: u32,
    pub game_over_reason: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi)]
pub struct PersonView {
    pub id: u32,
    pub name: String,
    pub stamina: i32,
    pub max_stamina: i32,
    pub remaining_stamina: i32, // After today's queued tasks
    pub tasks: Vec<TaskView>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi)]
pub struct TaskView {
    pub id: u32,
    pub name: String,
    pub message: String,
    pub stamina: i32,
    pub money: i64,
    pub energy: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi)]
pub struct PerkView {
    pub id: u32,
    pub name: String,
    pub installation_cost: i64,
    pub daily_money_cost: i64,
    pub daily_energy_cost: i64,
    pub affordable: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi)]
pub struct WeatherView {
    pub temperature: f32,
    pub humidity: f32,
    pub sky: SkyCondition,
    pub difficulty: f32,
    pub summary: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi)]
pub struct HouseView {
    pub temperature: f32,
    pub humidity: f32,
    pub optimal_temperature: f32,
    pub optimal_humidity: f32,
    pub rooms: Vec<RoomView>,
    pub generators: Vec<String>,
    pub viability: String,
    pub summary: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi)]
pub struct RoomView {
    pub name: String,
    pub temperature: f32,
    pub humidity: f32,
    pub isolation: f32,
    pub window_open: bool,
    pub heater: Option<f32>, // Setpoint when on
    pub ac: Option<f32>,
}

impl From<&Task> for TaskView {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id.0,
            name: task.name.clone(),
            message: task.message.clone(),
            stamina: task.stamina,
            money: task.money,
            energy: task.energy,
        }
    }
}

impl From<&Person> for PersonView {
    fn from(person: &Person) -> Self {
        Self {
            id: person.id.0,
            name: person.name.clone(),
            stamina: person.stamina,
            max_stamina: person.max_stamina,
            remaining_stamina: person.remaining_stamina(),
            tasks: person.tasks().iter().map(TaskView::from).collect(),
        }
    }
}

fn perk_view(perk: &Perk, money: i64) -> PerkView {
    PerkView {
        id: perk.id.0,
        name: perk.name.clone(),
        installation_cost: perk.installation_cost,
        daily_money_cost: perk.daily_money_cost,
        daily_energy_cost: perk.daily_energy_cost,
        affordable: perk.installation_cost <= money,
    }
}

impl GameView {
    pub fn from_game(game: &Game) -> Self {
        let house = game.house();
        let weather = game.weather();
        let money = house.family.money;

        GameView {
            day: game.day_number(),
            phase: game.phase(),
            money,
            energy: house.energy,
            persons: house.family.persons().iter().map(PersonView::from).collect(),
            weather: WeatherView {
                temperature: weather.temperature,
                humidity: weather.humidity,
                sky: weather.sky(),
                difficulty: weather.difficulty,
                summary: weather.to_string(),
            },
            house: HouseView {
                temperature: house.temperature,
                humidity: house.humidity,
                optimal_temperature: house.optimal_temperature,
                optimal_humidity: house.optimal_humidity,
                rooms: house
                    .rooms
                    .iter()
                    .map(|r| RoomView {
                        name: r.name.clone(),
                        temperature: r.temperature,
                        humidity: r.humidity,
                        isolation: r.isolation,
                        window_open: r.window_open,
                        heater: r.heater_on.then_some(r.heater_setpoint),
                        ac: r.ac_on.then_some(r.ac_setpoint),
                    })
                    .collect(),
                generators: house.power_supply.iter().map(|g| g.name.clone()).collect(),
                viability: house.is_viable().to_string(),
                summary: house.to_string(),
            },
            available_tasks: game.available_tasks().iter().map(TaskView::from).collect(),
            available_perks: game
                .available_perks()
                .iter()
                .map(|p| perk_view(p, money))
                .collect(),
            bought_perks: game
                .bought_perks()
                .iter()
                .map(|p| perk_view(p, money))
                .collect(),
            next_slot: game.next_slot as u32,
            game_over_reason: game.game_over_reason().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PersonId, TaskId};

    #[test]
    fn test_view_of_new_game() {
        let view = GameView::from_game(&Game::with_defaults());
        assert_eq!(view.day, 0);
        assert_eq!(view.phase, Phase::TaskSelection);
        assert_eq!(view.persons.len(), 2);
        assert_eq!(view.persons[0].remaining_stamina, 10);
        assert_eq!(view.house.rooms.len(), 5);
        assert_eq!(view.house.viability, "Viable");
        assert_eq!(view.available_tasks.len(), 10);
        // Nothing costs less than 1000 at the start
        assert!(view.available_perks.iter().all(|p| !p.affordable));
        assert!(view.game_over_reason.is_empty());
    }

    #[test]
    fn test_view_tracks_queued_tasks() {
        let mut game = Game::with_defaults();
        game.select_task(PersonId(1), TaskId(6)).unwrap();
        let view = GameView::from_game(&game);
        assert_eq!(view.persons[1].tasks.len(), 1);
        assert_eq!(view.persons[1].remaining_stamina, 5);
        assert_eq!(view.persons[1].stamina, 10);
    }

    #[test]
    fn test_view_serializes_to_json() {
        let view = GameView::from_game(&Game::with_defaults());
        let json = serde_json::to_string(&view).unwrap();
        assert!(json.contains("\"phase\":\"TaskSelection\""));
        assert!(json.contains("\"name\":\"Jean\""));
    }
}
