use serde::{Deserialize, Serialize};
use std::fmt;

use crate::catalog::Task;
use crate::types::{PersonId, TaskId};

// ============================================================================
// Person - An occupant with a daily stamina budget
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Person {
    pub id: PersonId,
    pub name: String,
    pub max_stamina: i32,
    pub stamina: i32,
    tasks: Vec<Task>, // Ordered slots for the current day
}

impl Person {
    pub fn new(id: PersonId, name: impl Into<String>, max_stamina: i32) -> Self {
        Self {
            id,
            name: name.into(),
            max_stamina,
            stamina: max_stamina,
            tasks: Vec::new(),
        }
    }

    /// Queue a task for today. Free tasks are deduplicated by id; effort tasks
    /// may repeat. Returns false if the task was already picked.
    pub fn add_task(&mut self, task: Task) -> bool {
        if task.is_free() && self.has_task(task.id) {
            return false;
        }
        self.tasks.push(task);
        true
    }

    pub fn has_task(&self, id: TaskId) -> bool {
        self.tasks.iter().any(|t| t.id == id)
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn task_at(&self, slot: usize) -> Option<&Task> {
        self.tasks.get(slot)
    }

    pub fn clear_tasks(&mut self) {
        self.tasks.clear();
    }

    /// Sum of stamina deltas of the queued tasks (negative when tiring)
    pub fn planned_stamina_delta(&self) -> i32 {
        self.tasks.iter().map(|t| t.stamina).sum()
    }

    /// Stamina left for the day once every queued task has run
    pub fn remaining_stamina(&self) -> i32 {
        self.max_stamina + self.planned_stamina_delta()
    }

    /// Whether queueing `task` keeps the cumulative cost within max stamina
    pub fn can_afford(&self, task: &Task) -> bool {
        -(task.stamina + self.planned_stamina_delta()) <= self.max_stamina
    }

    pub fn on_new_day(&mut self) {
        self.stamina = self.max_stamina;
        self.tasks.clear();
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - Stamina: {}, max stamina: {}",
            self.name, self.stamina, self.max_stamina
        )
    }
}

// ============================================================================
// Family - Shared purse plus the occupants
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Family {
    pub money: i64, // May dip below zero until the viability check runs
    persons: Vec<Person>,
}

impl Family {
    pub fn new(money: i64) -> Self {
        Self {
            money,
            persons: Vec::new(),
        }
    }

    /// Add an occupant with the next free id
    pub fn add_person(&mut self, name: impl Into<String>, max_stamina: i32) -> PersonId {
        let id = PersonId::new(self.persons.len() as u32);
        self.persons.push(Person::new(id, name, max_stamina));
        id
    }

    pub fn persons(&self) -> &[Person] {
        &self.persons
    }

    pub fn persons_mut(&mut self) -> &mut [Person] {
        &mut self.persons
    }

    pub fn person(&self, id: PersonId) -> Option<&Person> {
        self.persons.iter().find(|p| p.id == id)
    }

    pub fn person_mut(&mut self, id: PersonId) -> Option<&mut Person> {
        self.persons.iter_mut().find(|p| p.id == id)
    }

    /// Length of the longest task list, i.e. how many slots today has
    pub fn slot_count(&self) -> usize {
        self.persons.iter().map(|p| p.tasks.len()).max().unwrap_or(0)
    }
}
