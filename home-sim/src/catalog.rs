//! Static definitions: tasks, perks, power generators and the perk effect table.
//!
//! Catalog entries are immutable values. A perk purchase never edits an entry
//! in place; it swaps whole definitions (a stronger "Sleep" task, a discounted
//! insulation perk) or relocates a perk from the available list to the bought
//! list.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::{PerkId, TaskId};

// ============================================================================
// Task - A per-day, per-person action
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub name: String,
    pub message: String,
    pub stamina: i32, // negative = costs effort
    pub money: i64,
    pub energy: i64,
}

impl Task {
    pub fn new(
        id: u32,
        name: impl Into<String>,
        message: impl Into<String>,
        stamina: i32,
        money: i64,
        energy: i64,
    ) -> Self {
        Self {
            id: TaskId::new(id),
            name: name.into(),
            message: message.into(),
            stamina,
            money,
            energy,
        }
    }

    /// Free tasks (rest, cooking) may only be picked once per day
    pub fn is_free(&self) -> bool {
        self.stamina >= 0
    }
}

// Task ids with a house-wide environment effect
pub const TASK_HEATER_ON: TaskId = TaskId(0);
pub const TASK_HEATER_OFF: TaskId = TaskId(1);
pub const TASK_AC_ON: TaskId = TaskId(2);
pub const TASK_AC_OFF: TaskId = TaskId(3);
pub const TASK_OPEN_WINDOWS: TaskId = TaskId(4);
pub const TASK_CLOSE_WINDOWS: TaskId = TaskId(5);
pub const TASK_WORK: TaskId = TaskId(6);
pub const TASK_SLEEP: TaskId = TaskId(7);
pub const TASK_BIKING: TaskId = TaskId(8);
pub const TASK_COOK: TaskId = TaskId(9);

/// The tasks every new game starts with, in id order
pub fn default_tasks() -> Vec<Task> {
    vec![
        Task::new(0, "Heater On", "Turning heater On.", -1, 0, 0),
        Task::new(1, "Heater Off", "Turning heater Off.", -1, 0, 0),
        Task::new(2, "AC On", "Turning AC On.", -1, 0, 0),
        Task::new(3, "AC Off", "Turning AC Off.", -1, 0, 0),
        Task::new(4, "Open windows", "Opening windows.", -1, 0, 0),
        Task::new(5, "Close windows", "Closing windows.", -1, 0, 0),
        Task::new(6, "Work", "Currently working.", -5, 200, 0),
        Task::new(7, "Sleep", "Sleeping.", 2, 0, 0),
        Task::new(8, "Biking", "Biking.", -4, 0, 50),
        Task::new(9, "Cook", "Cooking and eating.", 1, -50, -30),
    ]
}

/// What a task does to the house besides its stamina/money/energy deltas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskEffect {
    HeatersOn,
    HeatersOff,
    AcOn,
    AcOff,
    OpenWindows,
    CloseWindows,
    None,
}

impl TaskEffect {
    pub fn for_task(id: TaskId) -> Self {
        match id {
            TASK_HEATER_ON => TaskEffect::HeatersOn,
            TASK_HEATER_OFF => TaskEffect::HeatersOff,
            TASK_AC_ON => TaskEffect::AcOn,
            TASK_AC_OFF => TaskEffect::AcOff,
            TASK_OPEN_WINDOWS => TaskEffect::OpenWindows,
            TASK_CLOSE_WINDOWS => TaskEffect::CloseWindows,
            _ => TaskEffect::None,
        }
    }
}

// ============================================================================
// Power Generator - A daily energy source
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerGenerator {
    pub name: String,
    pub installation_cost: i64,
    pub daily_cost: i64,
    pub daily_production: i64,
}

impl PowerGenerator {
    pub fn new(
        name: impl Into<String>,
        installation_cost: i64,
        daily_cost: i64,
        daily_production: i64,
    ) -> Self {
        Self {
            name: name.into(),
            installation_cost,
            daily_cost,
            daily_production,
        }
    }
}

// ============================================================================
// Perk - A permanent upgrade bought once
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Perk {
    pub id: PerkId,
    pub name: String,
    pub installation_cost: i64,
    pub daily_money_cost: i64,
    pub daily_energy_cost: i64,
}

impl Perk {
    pub fn new(
        id: u32,
        name: impl Into<String>,
        installation_cost: i64,
        daily_money_cost: i64,
        daily_energy_cost: i64,
    ) -> Self {
        Self {
            id: PerkId::new(id),
            name: name.into(),
            installation_cost,
            daily_money_cost,
            daily_energy_cost,
        }
    }

    /// Copy of this perk at a different installation price
    pub fn repriced(&self, installation_cost: i64) -> Self {
        Self {
            installation_cost,
            ..self.clone()
        }
    }
}

impl fmt::Display for Perk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} |  cost: {}, daily money cost: {} daily energy cost: {}",
            self.name, self.installation_cost, self.daily_money_cost, self.daily_energy_cost
        )
    }
}

pub const PERK_AUTO_WINDOWS: PerkId = PerkId(0);
pub const PERK_AUTO_CLIMATE: PerkId = PerkId(1);
pub const PERK_MATTRESS: PerkId = PerkId(2);
pub const PERK_COOKING_ROBOT: PerkId = PerkId(3);
pub const PERK_SOLAR_PANELS: PerkId = PerkId(4);
pub const PERK_WIND_TURBINE: PerkId = PerkId(5);
pub const PERK_INSULATION_65: PerkId = PerkId(6);
pub const PERK_INSULATION_90: PerkId = PerkId(7);

/// The perks offered at the start of a game, in id order
pub fn default_perks() -> Vec<Perk> {
    vec![
        Perk::new(0, "Automatic windows", 1000, 100, 100),
        Perk::new(1, "Automatic AC and heaters", 1500, 150, 100),
        Perk::new(2, "Better mattress", 1000, 0, 0),
        Perk::new(3, "Cooking robot", 1000, 0, 50),
        Perk::new(4, "Solar panels (100 daily energy)", 2000, 0, 0),
        Perk::new(5, "Wind turbine (100 daily energy)", 2000, 0, 0),
        Perk::new(6, "Isolate rooms at 65%", 2000, 0, 0),
        Perk::new(7, "Isolate rooms at 90%", 5000, 0, 0),
    ]
}

// ============================================================================
// Perk Effects - What owning a perk does
// ============================================================================

/// Continuous control loops run by the house after every tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Automation {
    /// Open windows whenever outside is on the better side of the optimum
    Windows,
    /// Drive heaters/AC toward the optimum unless windows are open
    Climate,
}

/// One-time and ongoing effect attached to a perk id
#[derive(Debug, Clone, PartialEq)]
pub enum PerkEffect {
    /// Only the daily upkeep applies
    Upkeep,
    /// Checked on every house update
    Automate(Automation),
    /// Swap a task definition for a stronger one
    ReplaceTask(Task),
    /// Install an extra energy source
    AddGenerator(PowerGenerator),
    /// Set every room's isolation rate
    Insulate {
        isolation: f32,
        /// Another perk to re-price if it is still on sale
        discount: Option<(PerkId, i64)>,
        /// Weaker perk withdrawn from sale
        supersedes: Option<PerkId>,
    },
}

/// Effect table keyed by perk id
pub fn perk_effect(id: PerkId) -> PerkEffect {
    match id {
        PERK_AUTO_WINDOWS => PerkEffect::Automate(Automation::Windows),
        PERK_AUTO_CLIMATE => PerkEffect::Automate(Automation::Climate),
        PERK_MATTRESS => PerkEffect::ReplaceTask(Task::new(7, "Sleep", "Sleeping.", 3, 0, 0)),
        PERK_COOKING_ROBOT => {
            PerkEffect::ReplaceTask(Task::new(9, "Cook", "Cooking and eating.", 3, -50, -30))
        }
        PERK_SOLAR_PANELS => {
            PerkEffect::AddGenerator(PowerGenerator::new("Solar panel", 2000, 50, 100))
        }
        PERK_WIND_TURBINE => {
            PerkEffect::AddGenerator(PowerGenerator::new("Wind turbine", 2000, 50, 100))
        }
        PERK_INSULATION_65 => PerkEffect::Insulate {
            isolation: 0.65,
            discount: Some((PERK_INSULATION_90, 2500)),
            supersedes: None,
        },
        PERK_INSULATION_90 => PerkEffect::Insulate {
            isolation: 0.9,
            discount: None,
            supersedes: Some(PERK_INSULATION_65),
        },
        _ => PerkEffect::Upkeep,
    }
}
