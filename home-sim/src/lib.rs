use rand::SeedableRng;
use rand::rngs::StdRng;
use wasm_bindgen::prelude::*;

mod catalog;
mod commands;
mod config;
mod error;
mod game;
mod house;
mod household;
mod room;
mod save;
mod state;
mod types;
mod weather;

pub use catalog::*;
pub use commands::*;
pub use config::*;
pub use error::*;
pub use game::*;
pub use house::*;
pub use household::*;
pub use room::*;
pub use save::HEADER_LEN;
pub use state::*;
pub use types::*;
pub use weather::*;

// ============================================================================
// WASM API - Simulation
// ============================================================================

#[wasm_bindgen]
pub struct Simulation {
    game: Game,
    rng: StdRng,         // Drives the weather only
    config: GameConfig,  // Reused by new_game / load_game
}

#[wasm_bindgen]
impl Simulation {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        // Better panic messages in browser console
        console_error_panic_hook::set_once();
        Self::from_config(GameConfig::default())
    }

    /// Default household with a reproducible weather sequence
    #[wasm_bindgen]
    pub fn with_seed(seed: u64) -> Self {
        Self::from_config(GameConfig {
            seed: Some(seed),
            ..GameConfig::default()
        })
    }

    /// Start from a JS config object; missing fields take their defaults
    #[wasm_bindgen]
    pub fn with_config(config: JsValue) -> Result<Simulation, JsError> {
        console_error_panic_hook::set_once();
        let config: GameConfig = serde_wasm_bindgen::from_value(config)?;
        config.validate()?;
        Ok(Self::from_config(config))
    }

    /// Replace the current game with one decoded from a save snapshot
    #[wasm_bindgen]
    pub fn load_game(&mut self, snapshot: Vec<i32>) -> Result<(), JsError> {
        self.game = Game::from_snapshot(&snapshot, &self.config)?;
        Ok(())
    }

    /// Throw the current game away and start over at day 0
    #[wasm_bindgen]
    pub fn new_game(&mut self) {
        self.game = Game::new(&self.config);
    }

    /// Queue a task; returns false when the occupant already has it or
    /// cannot afford the stamina
    #[wasm_bindgen]
    pub fn select_task(&mut self, person_id: u32, task_id: u32) -> Result<bool, JsError> {
        let outcome = self.game.select_task(PersonId::new(person_id), TaskId::new(task_id))?;
        Ok(outcome == TaskSelection::Added)
    }

    #[wasm_bindgen]
    pub fn reset_tasks(&mut self, person_id: u32) -> Result<(), JsError> {
        Ok(self.game.reset_tasks(PersonId::new(person_id))?)
    }

    #[wasm_bindgen]
    pub fn start_day(&mut self) -> Result<(), JsError> {
        Ok(self.game.start_day()?)
    }

    /// Run the next task slot; returns true once the day's tasks are done
    #[wasm_bindgen]
    pub fn advance_task_slot(&mut self) -> Result<bool, JsError> {
        Ok(self.game.advance_task_slot()?.day_finished)
    }

    /// Run slot `n` explicitly; returns true once the day's tasks are done
    #[wasm_bindgen]
    pub fn advance_task_slot_at(&mut self, n: u32) -> Result<bool, JsError> {
        Ok(self.game.advance_task_slot_at(n as usize)?.day_finished)
    }

    /// Returns true if the perk was bought
    #[wasm_bindgen]
    pub fn buy_perk(&mut self, perk_id: u32) -> Result<bool, JsError> {
        let outcome = self.game.buy_perk(PerkId::new(perk_id))?;
        Ok(outcome == PurchaseOutcome::Bought)
    }

    /// Returns false when the house failed and the game is over; the reason
    /// is available from `get_game_over_reason`
    #[wasm_bindgen]
    pub fn go_to_next_day(&mut self) -> Result<bool, JsError> {
        match self.game.go_to_next_day(&mut self.rng) {
            Ok(_) => Ok(true),
            Err(GameError::NotViable(_)) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// Only allowed while tasks are being picked for the day
    #[wasm_bindgen]
    pub fn save_game(&self) -> Result<Vec<i32>, JsError> {
        Ok(self.game.save()?)
    }

    #[wasm_bindgen]
    pub fn get_day(&self) -> u32 {
        self.game.day_number()
    }

    #[wasm_bindgen]
    pub fn get_money(&self) -> i64 {
        self.game.family().money
    }

    #[wasm_bindgen]
    pub fn get_energy(&self) -> i64 {
        self.game.house().energy
    }

    #[wasm_bindgen]
    pub fn get_game_over_reason(&self) -> String {
        self.game.game_over_reason().to_string()
    }

    /// Get a snapshot of the current state for rendering
    #[wasm_bindgen]
    pub fn get_state_snapshot(&self) -> GameView {
        GameView::from_game(&self.game)
    }
}

impl Simulation {
    pub fn from_config(config: GameConfig) -> Self {
        let seed = config.seed.unwrap_or_else(entropy_seed);
        Self {
            game: Game::new(&config),
            rng: StdRng::seed_from_u64(seed),
            config,
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut Game {
        &mut self.game
    }
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(target_arch = "wasm32")]
fn entropy_seed() -> u64 {
    (js_sys::Math::random() * u32::MAX as f64) as u64
}

#[cfg(not(target_arch = "wasm32"))]
fn entropy_seed() -> u64 {
    rand::random()
}
