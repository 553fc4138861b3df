//! Phase-gated command layer used by the presentation layer.
//!
//! A day runs: pick tasks → execute slots one by one → shop for perks → next
//! day. Each command checks the phase first and returns
//! [`GameError::WrongPhase`] without touching state when issued out of turn.

use rand::Rng;

use crate::error::GameError;
use crate::game::{Game, PurchaseOutcome};
use crate::types::{PerkId, PersonId, Phase, TaskId};

/// What happened to a task selection request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskSelection {
    Added,
    /// Free task already on today's list
    AlreadyPicked,
    /// Cumulative stamina cost would exceed the occupant's max stamina
    OverBudget,
}

/// Outcome of running one task slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotReport {
    pub slot: usize,
    /// True once every slot of the day has run (phase is now shopping)
    pub day_finished: bool,
}

impl Game {
    fn expect_phase(&self, expected: Phase) -> Result<(), GameError> {
        if self.phase != expected {
            return Err(GameError::WrongPhase {
                expected,
                actual: self.phase,
            });
        }
        Ok(())
    }

    /// Queue a task for an occupant, honouring their stamina budget
    pub fn select_task(
        &mut self,
        person_id: PersonId,
        task_id: TaskId,
    ) -> Result<TaskSelection, GameError> {
        self.expect_phase(Phase::TaskSelection)?;
        let task = self
            .find_task_from_id(task_id)
            .cloned()
            .ok_or(GameError::UnknownTask(task_id))?;
        let person = self
            .house
            .family
            .person_mut(person_id)
            .ok_or(GameError::UnknownPerson(person_id))?;

        if !person.can_afford(&task) {
            return Ok(TaskSelection::OverBudget);
        }
        if person.add_task(task) {
            Ok(TaskSelection::Added)
        } else {
            Ok(TaskSelection::AlreadyPicked)
        }
    }

    pub fn reset_tasks(&mut self, person_id: PersonId) -> Result<(), GameError> {
        self.expect_phase(Phase::TaskSelection)?;
        self.house
            .family
            .person_mut(person_id)
            .ok_or(GameError::UnknownPerson(person_id))?
            .clear_tasks();
        Ok(())
    }

    /// Lock in today's tasks and begin executing them
    pub fn start_day(&mut self) -> Result<(), GameError> {
        self.expect_phase(Phase::TaskSelection)?;
        self.phase = Phase::TaskExecution;
        self.next_slot = 0;
        Ok(())
    }

    /// Number of slots today: the longest task list, at least one so that an
    /// idle day still lets the house exchange heat with the outside
    pub fn slot_count(&self) -> usize {
        self.house.family.slot_count().max(1)
    }

    /// Run the next pending slot
    pub fn advance_task_slot(&mut self) -> Result<SlotReport, GameError> {
        self.advance_task_slot_at(self.next_slot)
    }

    /// Run slot `n` explicitly; later slots continue from `n + 1`. Slots
    /// only run once a day, so `n` may skip ahead but never go back.
    pub fn advance_task_slot_at(&mut self, n: usize) -> Result<SlotReport, GameError> {
        self.expect_phase(Phase::TaskExecution)?;
        if n < self.next_slot {
            return Err(GameError::SlotAlreadyRun {
                slot: n,
                next: self.next_slot,
            });
        }
        self.do_nth_task_of_all_persons(n);
        self.next_slot = n.saturating_add(1);

        let day_finished = self.next_slot >= self.slot_count();
        if day_finished {
            self.phase = Phase::PerkShopping;
        }
        Ok(SlotReport { slot: n, day_finished })
    }

    pub fn buy_perk(&mut self, perk_id: PerkId) -> Result<PurchaseOutcome, GameError> {
        self.expect_phase(Phase::PerkShopping)?;
        Ok(self.buy_perk_from_id(perk_id))
    }

    /// Leave the shop. On a non-viable house the game ends with the reason
    /// recorded and `GameError::NotViable` is returned.
    pub fn go_to_next_day<R: Rng>(&mut self, rng: &mut R) -> Result<u32, GameError> {
        self.expect_phase(Phase::PerkShopping)?;
        self.on_new_day(rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{PERK_MATTRESS, TASK_BIKING, TASK_SLEEP, TASK_WORK};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const JEAN: PersonId = PersonId(0);
    const MARIE: PersonId = PersonId(1);

    #[test]
    fn test_selection_respects_budget_and_dedup() {
        let mut game = Game::with_defaults();
        assert_eq!(game.select_task(JEAN, TASK_WORK), Ok(TaskSelection::Added));
        assert_eq!(game.select_task(JEAN, TASK_WORK), Ok(TaskSelection::Added));
        assert_eq!(game.select_task(JEAN, TASK_BIKING), Ok(TaskSelection::OverBudget));
        assert_eq!(game.select_task(JEAN, TASK_SLEEP), Ok(TaskSelection::Added));
        assert_eq!(game.select_task(JEAN, TASK_SLEEP), Ok(TaskSelection::AlreadyPicked));
        // Sleep gives 2 back, biking would still need 12 of 10
        assert_eq!(game.select_task(JEAN, TASK_BIKING), Ok(TaskSelection::OverBudget));
        assert_eq!(game.find_person(JEAN).unwrap().tasks().len(), 3);
    }

    #[test]
    fn test_selection_rejects_unknown_ids() {
        let mut game = Game::with_defaults();
        assert_eq!(
            game.select_task(PersonId(7), TASK_WORK),
            Err(GameError::UnknownPerson(PersonId(7)))
        );
        assert_eq!(
            game.select_task(JEAN, TaskId(42)),
            Err(GameError::UnknownTask(TaskId(42)))
        );
    }

    #[test]
    fn test_reset_clears_one_person() {
        let mut game = Game::with_defaults();
        game.select_task(JEAN, TASK_WORK).unwrap();
        game.select_task(MARIE, TASK_WORK).unwrap();
        game.reset_tasks(JEAN).unwrap();
        assert!(game.find_person(JEAN).unwrap().tasks().is_empty());
        assert_eq!(game.find_person(MARIE).unwrap().tasks().len(), 1);
    }

    #[test]
    fn test_full_day_cycle() {
        let mut game = Game::with_defaults();
        let mut rng = StdRng::seed_from_u64(5);

        game.select_task(JEAN, TASK_WORK).unwrap();
        game.select_task(JEAN, TASK_SLEEP).unwrap();
        game.select_task(MARIE, TASK_WORK).unwrap();
        game.start_day().unwrap();
        assert_eq!(game.phase(), Phase::TaskExecution);

        let first = game.advance_task_slot().unwrap();
        assert_eq!(first, SlotReport { slot: 0, day_finished: false });
        let second = game.advance_task_slot().unwrap();
        assert_eq!(second, SlotReport { slot: 1, day_finished: true });
        assert_eq!(game.phase(), Phase::PerkShopping);
        assert_eq!(game.family().money, 900);

        assert_eq!(game.buy_perk(PERK_MATTRESS), Ok(PurchaseOutcome::CannotAfford));
        assert_eq!(game.go_to_next_day(&mut rng), Ok(1));
        assert_eq!(game.phase(), Phase::TaskSelection);
    }

    #[test]
    fn test_slots_run_once_per_day() {
        let mut game = Game::with_defaults();
        game.select_task(JEAN, TASK_WORK).unwrap();
        game.select_task(JEAN, TASK_SLEEP).unwrap();
        game.start_day().unwrap();

        game.advance_task_slot_at(0).unwrap();
        for _ in 0..4 {
            assert_eq!(
                game.advance_task_slot_at(0),
                Err(GameError::SlotAlreadyRun { slot: 0, next: 1 })
            );
        }
        // Work paid once, stamina spent once
        assert_eq!(game.family().money, 700);
        assert_eq!(game.find_person(JEAN).unwrap().stamina, 5);
        assert_eq!(game.phase(), Phase::TaskExecution);

        let report = game.advance_task_slot().unwrap();
        assert_eq!(report, SlotReport { slot: 1, day_finished: true });
        assert_eq!(game.find_person(JEAN).unwrap().stamina, 7);
    }

    #[test]
    fn test_far_slot_finishes_the_day() {
        let mut game = Game::with_defaults();
        game.select_task(JEAN, TASK_WORK).unwrap();
        game.start_day().unwrap();
        let report = game.advance_task_slot_at(usize::MAX).unwrap();
        assert!(report.day_finished);
        // Slot 0 was skipped
        assert_eq!(game.family().money, 500);
        assert_eq!(game.phase(), Phase::PerkShopping);
    }

    #[test]
    fn test_idle_day_still_runs_one_slot() {
        let mut game = Game::with_defaults();
        game.start_day().unwrap();
        let report = game.advance_task_slot().unwrap();
        assert!(report.day_finished);
        assert_eq!(game.phase(), Phase::PerkShopping);
    }

    #[test]
    fn test_commands_out_of_turn_are_rejected() {
        let mut game = Game::with_defaults();
        let mut rng = StdRng::seed_from_u64(5);
        assert_eq!(
            game.advance_task_slot(),
            Err(GameError::WrongPhase {
                expected: Phase::TaskExecution,
                actual: Phase::TaskSelection,
            })
        );
        assert!(game.buy_perk(PERK_MATTRESS).is_err());
        assert!(game.go_to_next_day(&mut rng).is_err());
        assert_eq!(game.day_number(), 0);

        game.start_day().unwrap();
        assert!(game.select_task(JEAN, TASK_WORK).is_err());
        assert!(game.reset_tasks(JEAN).is_err());
    }

    #[test]
    fn test_game_over_is_terminal() {
        let mut game = Game::with_defaults();
        let mut rng = StdRng::seed_from_u64(5);
        game.house_mut().energy = -1;
        game.start_day().unwrap();
        game.advance_task_slot().unwrap();
        let err = game.go_to_next_day(&mut rng).unwrap_err();
        assert_eq!(err, GameError::NotViable("Not enough energy to continue".into()));
        assert_eq!(game.phase(), Phase::GameOver);
        assert!(game.start_day().is_err());
        assert!(game.go_to_next_day(&mut rng).is_err());
    }
}
