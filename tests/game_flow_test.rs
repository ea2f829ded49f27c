//! End-to-end checks of the mode machine driven through the public API.

use flappy_levels::entities::ObstaclePair;
use flappy_levels::scoring::Difficulty;
use flappy_levels::state::{EXIT_BUTTON, START_BUTTON};
use flappy_levels::{Flow, GameConfig, GameEvent, GameState, Mode};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn create_test_rng() -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(2024)
}

fn started_game(rng: &mut ChaCha8Rng) -> GameState {
    let mut state = GameState::new(GameConfig::default());
    assert_eq!(
        state.handle_event(GameEvent::PointerDown(START_BUTTON.center()), rng),
        Flow::Continue
    );
    assert_eq!(state.mode, Mode::Playing);
    state
}

/// A pair already left of the avatar and clear of its box.
fn pair_behind_avatar() -> ObstaclePair {
    ObstaclePair::new(10.0, 300.0, 180.0, 60.0, 600.0)
}

fn update_until_game_over(state: &mut GameState) {
    for _ in 0..500 {
        state.update();
        if state.mode == Mode::GameOver {
            return;
        }
    }
    panic!("avatar never hit the ground");
}

#[test]
fn test_twelve_passes_reach_level_two() {
    let mut rng = create_test_rng();
    let mut state = started_game(&mut rng);
    for _ in 0..12 {
        state.obstacles.push(pair_behind_avatar());
    }

    state.update();

    assert_eq!(state.mode, Mode::Playing);
    assert_eq!(state.scoreboard.score, 12);
    assert_eq!(state.scoreboard.level, 2);
    assert_eq!(state.scoreboard.difficulty, Difficulty { speed: 6.0, gap: 170.0 });
    assert_eq!(state.scoreboard.level_up_timer, 60);
}

#[test]
fn test_level_up_timer_armed_on_tenth_pass_only() {
    let mut rng = create_test_rng();
    let mut state = started_game(&mut rng);

    for pass in 1..=12 {
        state.obstacles.push(pair_behind_avatar());
        state.update();
        assert_eq!(state.scoreboard.score, pass);
        match pass {
            1..=9 => assert_eq!(state.scoreboard.level_up_timer, 0),
            10 => assert_eq!(state.scoreboard.level_up_timer, 60),
            // Counting down, not re-armed
            _ => assert_eq!(state.scoreboard.level_up_timer, 60 - (pass - 10)),
        }
        state.avatar.jump(state.config.jump_impulse);
    }
    assert_eq!(state.scoreboard.level, 2);
}

#[test]
fn test_gap_change_only_affects_new_spawns() {
    let mut rng = create_test_rng();
    let mut state = started_game(&mut rng);
    state.handle_event(GameEvent::SpawnObstacle, &mut rng);
    let old_gap = state.obstacles[0].gap_width();

    for _ in 0..10 {
        state.obstacles.push(pair_behind_avatar());
    }
    state.update();
    assert_eq!(state.scoreboard.level, 2);

    state.handle_event(GameEvent::SpawnObstacle, &mut rng);
    let spawned = state.obstacles.last().unwrap();
    assert!((spawned.gap_width() - 170.0).abs() < 1e-9);
    assert!((state.obstacles[0].gap_width() - old_gap).abs() < 1e-9);
    assert!((old_gap - 180.0).abs() < 1e-9);
}

#[test]
fn test_restart_restores_fresh_state() {
    let mut rng = create_test_rng();
    let fresh = started_game(&mut rng);

    let mut state = started_game(&mut rng);
    for _ in 0..3 {
        state.handle_event(GameEvent::SpawnObstacle, &mut rng);
    }
    for _ in 0..10 {
        state.obstacles.push(pair_behind_avatar());
    }
    state.update();
    assert_eq!(state.scoreboard.level, 2);

    update_until_game_over(&mut state);
    assert_eq!(state.mode, Mode::GameOver);

    state.handle_event(GameEvent::Jump, &mut rng);
    assert_eq!(state.mode, Mode::Playing);
    assert_eq!(state, fresh);
    assert!(state.obstacles.is_empty());
    assert_eq!(state.scoreboard.score, 0);
    assert_eq!(state.scoreboard.level, 1);
    assert_eq!(state.scoreboard.difficulty, Difficulty::base(&state.config));
    assert_eq!(state.avatar.velocity, 0.0);
}

#[test]
fn test_spawn_events_ignored_outside_playing() {
    let mut rng = create_test_rng();
    let mut state = GameState::new(GameConfig::default());
    for _ in 0..5 {
        state.handle_event(GameEvent::SpawnObstacle, &mut rng);
    }
    assert!(state.obstacles.is_empty());

    state.handle_event(GameEvent::PointerDown(START_BUTTON.center()), &mut rng);
    update_until_game_over(&mut state);
    let before = state.obstacles.len();
    for _ in 0..5 {
        state.handle_event(GameEvent::SpawnObstacle, &mut rng);
    }
    assert_eq!(state.obstacles.len(), before);
}

#[test]
fn test_full_cycle_menu_play_over_menu_exit() {
    let mut rng = create_test_rng();
    let mut state = started_game(&mut rng);

    update_until_game_over(&mut state);
    assert_eq!(state.mode, Mode::GameOver);

    // Updates are frozen after death
    let frozen = state.clone();
    state.update();
    assert_eq!(state, frozen);

    state.handle_event(GameEvent::Cancel, &mut rng);
    assert_eq!(state.mode, Mode::Menu);

    // Jump on the menu does nothing
    state.handle_event(GameEvent::Jump, &mut rng);
    assert_eq!(state.mode, Mode::Menu);

    let flow = state.handle_event(GameEvent::PointerDown(EXIT_BUTTON.center()), &mut rng);
    assert_eq!(flow, Flow::Exit);
}

#[test]
fn test_flying_through_spawned_obstacles_scores() {
    let mut rng = create_test_rng();
    let mut state = started_game(&mut rng);
    state.handle_event(GameEvent::SpawnObstacle, &mut rng);

    // Hover the avatar in the middle of the gap until the pair is behind it
    let gap_middle = state.obstacles[0].lower.top() - state.obstacles[0].gap_width() / 2.0;
    for _ in 0..200 {
        state.avatar.position.y = gap_middle;
        state.avatar.velocity = 0.0;
        state.update();
        if state.scoreboard.score == 1 {
            break;
        }
    }
    assert_eq!(state.mode, Mode::Playing);
    assert_eq!(state.scoreboard.score, 1);
    assert!(state.obstacles.iter().all(|pair| pair.passed));
}
