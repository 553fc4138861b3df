use serde::{Deserialize, Serialize};
use std::fmt;
use tsify_next::Tsify;

// ============================================================================
// IDs - Small dense integers, stable across saves
// ============================================================================

#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub struct PersonId(pub u32);

impl PersonId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }
}

#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub struct TaskId(pub u32);

impl TaskId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }
}

#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub struct PerkId(pub u32);

impl PerkId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "person#{}", self.0)
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "task#{}", self.0)
    }
}

impl fmt::Display for PerkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "perk#{}", self.0)
    }
}

// ============================================================================
// Phase - Where the day cycle currently stands
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
pub enum Phase {
    /// Occupants are picking the tasks for the coming day
    TaskSelection,
    /// Task slots are being executed one at a time
    TaskExecution,
    /// Day is over, perks may be bought before moving on
    PerkShopping,
    /// The house stopped being viable; terminal
    GameOver,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::TaskSelection => "task selection",
            Phase::TaskExecution => "task execution",
            Phase::PerkShopping => "perk shopping",
            Phase::GameOver => "game over",
        };
        f.write_str(name)
    }
}

// ============================================================================
// Sky Condition - Single-value summary of the weather flags
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
pub enum SkyCondition {
    Rainy,
    Snowy,
    Sunny,
    Lightning,
}

impl SkyCondition {
    /// Code stored at index 5 of a save snapshot
    pub fn code(self) -> i32 {
        match self {
            SkyCondition::Rainy => 0,
            SkyCondition::Snowy => 1,
            SkyCondition::Sunny => 2,
            SkyCondition::Lightning => 3,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(SkyCondition::Rainy),
            1 => Some(SkyCondition::Snowy),
            2 => Some(SkyCondition::Sunny),
            3 => Some(SkyCondition::Lightning),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SkyCondition::Rainy => "Rainy",
            SkyCondition::Snowy => "Snowy",
            SkyCondition::Sunny => "Sunny",
            SkyCondition::Lightning => "Lightnings",
        }
    }
}
