//! End-to-end day cycles through the command layer
//!
//! Weather is driven by a seeded `StdRng` so every run is reproducible.

use home_sim::{
    Game, GameConfig, GameError, PERK_MATTRESS, PERK_SOLAR_PANELS, PersonId, Phase,
    PurchaseOutcome, TASK_CLOSE_WINDOWS, TASK_COOK, TASK_HEATER_ON, TASK_SLEEP, TASK_WORK,
    TaskSelection, Viability,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

// === TEST FIXTURES ===

const JEAN: PersonId = PersonId(0);
const MARIE: PersonId = PersonId(1);

/// Execute every slot of the planned day and land in the shop
fn run_day(game: &mut Game) {
    game.start_day().unwrap();
    while game.phase() == Phase::TaskExecution {
        game.advance_task_slot().unwrap();
    }
    assert_eq!(game.phase(), Phase::PerkShopping);
}

// === SCENARIOS ===

#[test]
fn jean_goes_to_work() {
    let mut game = Game::with_defaults();
    let mut rng = StdRng::seed_from_u64(7);

    assert_eq!(game.day_number(), 0);
    assert_eq!(game.family().money, 500);
    assert_eq!(game.house().energy, 100);
    let jean = game.find_person(JEAN).unwrap();
    assert_eq!((jean.name.as_str(), jean.max_stamina), ("Jean", 10));
    let marie = game.find_person(MARIE).unwrap();
    assert_eq!((marie.name.as_str(), marie.max_stamina), ("Marie", 10));

    assert_eq!(game.select_task(JEAN, TASK_WORK), Ok(TaskSelection::Added));
    game.start_day().unwrap();
    game.advance_task_slot_at(0).unwrap();

    assert_eq!(game.find_person(JEAN).unwrap().stamina, 5);
    assert_eq!(game.family().money, 700);

    assert_eq!(game.go_to_next_day(&mut rng), Ok(1));
    let jean = game.find_person(JEAN).unwrap();
    assert_eq!(jean.stamina, 10);
    assert!(jean.tasks().is_empty());
}

#[test]
fn overdrawn_family_ends_the_game() {
    let mut game = Game::with_defaults();
    let mut rng = StdRng::seed_from_u64(7);

    // The daily grid bill tips the family over
    game.house_mut().family.money = 99;
    run_day(&mut game);
    assert_eq!(game.go_to_next_day(&mut rng), Ok(1));
    assert_eq!(game.family().money, -1);
    assert_eq!(game.house().is_viable(), Viability::InsufficientFunds);

    run_day(&mut game);
    let err = game.go_to_next_day(&mut rng).unwrap_err();
    assert_eq!(err, GameError::NotViable("Not enough money to continue".into()));
    assert_eq!(game.game_over_reason(), "Not enough money to continue");
    assert_eq!(game.phase(), Phase::GameOver);
    assert_eq!(game.day_number(), 1);
}

#[test]
fn saving_up_for_a_mattress() {
    let mut game = Game::with_defaults();
    let mut rng = StdRng::seed_from_u64(21);

    // Both occupants work every day until the mattress is affordable
    let mut bought = false;
    for _ in 0..5 {
        game.select_task(JEAN, TASK_WORK).unwrap();
        game.select_task(MARIE, TASK_WORK).unwrap();
        game.select_task(JEAN, TASK_SLEEP).unwrap();
        run_day(&mut game);
        if game.buy_perk(PERK_MATTRESS) == Ok(PurchaseOutcome::Bought) {
            bought = true;
            break;
        }
        game.go_to_next_day(&mut rng).unwrap();
    }

    assert!(bought);
    assert!(game.has_bought(PERK_MATTRESS));
    assert_eq!(game.find_task_from_id(TASK_SLEEP).unwrap().stamina, 3);
    assert_eq!(game.buy_perk(PERK_MATTRESS), Ok(PurchaseOutcome::NotAvailable));
}

#[test]
fn generators_pay_for_themselves_in_energy() {
    let mut config = GameConfig::default();
    config.starting_money = 2600;
    let mut game = Game::new(&config);
    let mut rng = StdRng::seed_from_u64(3);

    run_day(&mut game);
    assert_eq!(game.buy_perk(PERK_SOLAR_PANELS), Ok(PurchaseOutcome::Bought));
    let energy_before = game.house().energy;
    game.go_to_next_day(&mut rng).unwrap();

    // Linky and the panels each produce 100
    assert_eq!(game.house().energy, energy_before + 200);
    // Linky charges 100 a day, the panels 50
    assert_eq!(game.family().money, 2600 - 2000 - 150);
}

#[test]
fn heaters_burn_energy_every_slot() {
    let mut game = Game::with_defaults();

    game.select_task(JEAN, TASK_HEATER_ON).unwrap();
    game.select_task(JEAN, TASK_CLOSE_WINDOWS).unwrap();
    game.select_task(MARIE, TASK_COOK).unwrap();
    run_day(&mut game);

    // Two slots with five heated rooms, plus the cook
    assert_eq!(game.house().energy, 100 - 2 * 25 - 30);
    assert!(game.house().temperature > 18.0);
    assert!(game.house().rooms.iter().all(|r| r.heater_on));
}

#[test]
fn seeded_season_is_reproducible() {
    let play = |seed: u64| {
        let mut game = Game::with_defaults();
        let mut rng = StdRng::seed_from_u64(seed);
        let mut days = Vec::new();
        for _ in 0..6 {
            game.select_task(JEAN, TASK_WORK).unwrap();
            run_day(&mut game);
            if game.go_to_next_day(&mut rng).is_err() {
                break;
            }
            days.push((game.weather().clone(), game.family().money, game.house().energy));
        }
        (days, game.game_over_reason().to_string())
    };

    assert_eq!(play(99), play(99));
}
