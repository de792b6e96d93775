use invaders::config::GameConfig;
use invaders::input::{InputState, Key, KeyEdge};
use invaders::invaders::*;

const SEED: u64 = 1234;
const DT: f32 = 1.0 / 60.0;

fn game() -> Invaders {
    Invaders::new(GameConfig::default(), SEED).unwrap()
}

fn any_key() -> InputState {
    InputState {
        key_count: 1,
        ..InputState::idle()
    }
}

/// Drive a fresh game into `Active`.
fn active_game() -> Invaders {
    let mut g = game();
    g.update(&any_key(), DT).unwrap();
    g.update(&InputState::idle(), DT).unwrap();
    assert_eq!(g.state(), FlowState::Active);
    g
}

// ── KeyEdge ───────────────────────────────────────────────────────────────────

#[test]
fn edge_fires_once_per_press() {
    let mut edge = KeyEdge::new();
    assert!(!edge.observe(0));
    assert!(edge.observe(1));
    assert!(!edge.observe(1)); // held
    assert!(!edge.observe(2)); // another key while held
    assert!(!edge.observe(0));
    assert!(edge.observe(3));
}

#[test]
fn input_snapshot_reports_held_keys() {
    let input = InputState::holding(&[Key::Left, Key::Fire]);
    assert!(input.is_key_down(Key::Left));
    assert!(input.is_key_down(Key::Fire));
    assert!(!input.is_key_down(Key::Right));
    assert_eq!(input.key_count(), 2);
}

// ── Start-up ──────────────────────────────────────────────────────────────────

#[test]
fn starts_inactive_with_prompt() {
    let g = game();
    assert_eq!(g.state(), FlowState::Inactive);
    assert!(g.wave().is_none());
    assert_eq!(g.message(), Some(Message::PressAnyKey));
    assert_eq!(g.wave_number(), 0);
}

#[test]
fn stays_inactive_without_input() {
    let mut g = game();
    for _ in 0..10 {
        g.update(&InputState::idle(), DT).unwrap();
    }
    assert_eq!(g.state(), FlowState::Inactive);
}

#[test]
fn key_press_goes_new_wave_then_active() {
    let mut g = game();
    g.update(&any_key(), DT).unwrap();
    assert_eq!(g.state(), FlowState::NewWave);
    assert!(g.wave().is_some());
    assert_eq!(g.wave_number(), 1);
    assert_eq!(g.message(), Some(Message::Incoming(1)));

    // No new key event needed.
    g.update(&any_key(), DT).unwrap();
    assert_eq!(g.state(), FlowState::Active);
    assert!(g.message().is_none());
}

#[test]
fn wave_only_updates_while_active() {
    let mut g = game();
    g.update(&any_key(), DT).unwrap();
    let before = g.wave().unwrap().ship().unwrap().x;
    // NewWave frame: input is not forwarded to the wave.
    g.update(&InputState::holding(&[Key::Left]), DT).unwrap();
    assert_eq!(g.wave().unwrap().ship().unwrap().x, before);

    g.update(&InputState::holding(&[Key::Left]), DT).unwrap();
    assert!(g.wave().unwrap().ship().unwrap().x < before);
}

// ── Pause & continue ──────────────────────────────────────────────────────────

/// One stationary alien above the left wall that fires as soon as it can.
fn sniper_config() -> GameConfig {
    let mut config = GameConfig::default();
    config.alien_rows = 1;
    config.aliens_in_row = 1;
    config.bolt_rate = 1;
    config.alien_h_walk = 0.001;
    config
}

/// Hold Left (parking the ship under the sniper) until play stops.
fn play_until_hit(g: &mut Invaders) {
    let mut frames = 0;
    while g.state() == FlowState::Active {
        g.update(&InputState::holding(&[Key::Left]), 0.1).unwrap();
        frames += 1;
        assert!(frames < 2_000, "ship was never hit");
    }
}

fn active_sniper_game() -> Invaders {
    let mut g = Invaders::new(sniper_config(), SEED).unwrap();
    g.update(&any_key(), DT).unwrap();
    g.update(&InputState::idle(), DT).unwrap();
    g
}

#[test]
fn losing_a_life_pauses_then_continues() {
    let mut g = active_sniper_game();
    play_until_hit(&mut g);

    assert_eq!(g.state(), FlowState::Paused);
    assert_eq!(g.message(), Some(Message::LostLife));
    let wave = g.wave().unwrap();
    assert!(wave.ship().is_none());
    assert_eq!(wave.lives(), 2);

    // Still paused without a key press.
    g.update(&InputState::idle(), DT).unwrap();
    assert_eq!(g.state(), FlowState::Paused);

    g.update(&any_key(), DT).unwrap();
    assert_eq!(g.state(), FlowState::Continue);
    assert!(g.wave().unwrap().ship().is_some());
    assert_eq!(g.message(), Some(Message::LostLife));

    g.update(&any_key(), DT).unwrap();
    assert_eq!(g.state(), FlowState::Active);
    assert!(g.message().is_none());
}

#[test]
fn key_held_through_the_hit_does_not_resume() {
    let mut g = active_sniper_game();
    play_until_hit(&mut g);
    assert_eq!(g.state(), FlowState::Paused);

    // Left was down when the ship died and is still down.
    g.update(&InputState::holding(&[Key::Left]), DT).unwrap();
    assert_eq!(g.state(), FlowState::Paused);

    g.update(&InputState::idle(), DT).unwrap();
    g.update(&InputState::holding(&[Key::Left]), DT).unwrap();
    assert_eq!(g.state(), FlowState::Continue);
}

#[test]
fn losing_the_last_life_completes_as_defeat() {
    let mut g = active_sniper_game();
    for _ in 0..3 {
        play_until_hit(&mut g);
        if g.state() == FlowState::Paused {
            g.update(&InputState::idle(), DT).unwrap();
            g.update(&any_key(), DT).unwrap();
            g.update(&any_key(), DT).unwrap();
        }
    }

    assert_eq!(g.state(), FlowState::Complete(Outcome::Defeated));
    assert_eq!(g.message(), Some(Message::Lost));
    let wave = g.wave().unwrap();
    assert!(wave.is_game_over());
    assert_eq!(wave.lives(), 0);
}

// ── Completion ────────────────────────────────────────────────────────────────

#[test]
fn idle_play_ends_the_wave_as_a_loss() {
    let mut g = active_game();
    let mut frames = 0;
    loop {
        match g.state() {
            FlowState::Complete(_) => break,
            FlowState::Paused => g.update(&any_key(), DT).unwrap(),
            _ => g.update(&InputState::idle(), 0.1).unwrap(),
        }
        // Release between presses so every pause sees a fresh key edge.
        g.update(&InputState::idle(), 0.0).unwrap();
        frames += 1;
        assert!(frames < 100_000, "wave never finished");
    }

    let FlowState::Complete(outcome) = g.state() else {
        unreachable!()
    };
    assert!(!outcome.is_win());
    assert_eq!(g.message(), Some(Message::Lost));

    // Complete is terminal for update().
    g.update(&any_key(), DT).unwrap();
    assert!(matches!(g.state(), FlowState::Complete(_)));
}

#[test]
fn clearing_a_one_alien_wave_wins_and_carries_over() {
    let mut config = GameConfig::default();
    config.alien_rows = 1;
    config.aliens_in_row = 1;
    // Freeze the formation so it never steps or fires.
    config.alien_step_interval = 1_000.0;
    let mut g = Invaders::new(config, SEED).unwrap();
    g.update(&any_key(), DT).unwrap();
    g.update(&InputState::idle(), DT).unwrap();

    // Walk the ship under the lone alien, then fire.
    let mut frames = 0;
    while g.state() == FlowState::Active {
        let wave = g.wave().unwrap();
        let ship_x = wave.ship().unwrap().x;
        let target = wave.aliens().get(0, 0).unwrap().x;
        let input = if ship_x > target + 3.0 {
            InputState::holding(&[Key::Left])
        } else if ship_x < target - 3.0 {
            InputState::holding(&[Key::Right])
        } else {
            InputState::holding(&[Key::Fire])
        };
        g.update(&input, DT).unwrap();
        frames += 1;
        assert!(frames < 1_000, "alien was never hit");
    }

    assert_eq!(g.state(), FlowState::Complete(Outcome::Cleared));
    assert_eq!(g.message(), Some(Message::Won));
    assert_eq!(g.wave().unwrap().score(), 10);
    assert_eq!(g.wave().unwrap().lives(), 3);

    assert!(g.next_wave().unwrap());
    assert_eq!(g.state(), FlowState::NewWave);
    assert_eq!(g.wave_number(), 2);
    assert_eq!(g.message(), Some(Message::Incoming(2)));
    let wave = g.wave().unwrap();
    assert_eq!(wave.score(), 10);
    assert_eq!(wave.lives(), 3);
    assert!(!wave.is_all_aliens_dead());
}

#[test]
fn next_wave_after_a_loss_returns_to_title() {
    let mut config = GameConfig::default();
    config.ship_lives = 1;
    // Aliens start right on the defense line.
    config.alien_ceiling = config.game_height - config.defense_line - 20.0;
    config.alien_rows = 1;
    let mut g = Invaders::new(config, SEED).unwrap();
    g.update(&any_key(), DT).unwrap();
    g.update(&InputState::idle(), DT).unwrap();
    g.update(&InputState::idle(), DT).unwrap();

    assert_eq!(g.state(), FlowState::Complete(Outcome::Breached));
    assert_eq!(g.message(), Some(Message::Lost));

    assert!(g.next_wave().unwrap());
    assert_eq!(g.state(), FlowState::Inactive);
    assert!(g.wave().is_none());
    assert_eq!(g.wave_number(), 0);
    assert_eq!(g.message(), Some(Message::PressAnyKey));
}

#[test]
fn next_wave_is_ignored_mid_game() {
    let mut g = active_game();
    assert!(!g.next_wave().unwrap());
    assert_eq!(g.state(), FlowState::Active);
}

// ── Messages ──────────────────────────────────────────────────────────────────

#[test]
fn message_texts() {
    assert_eq!(Message::PressAnyKey.text(), "Press Any Key To Play");
    assert_eq!(Message::Incoming(3).text(), "Wave 3");
    assert_eq!(
        Message::LostLife.text(),
        "You Lost A Life, Press Any Key To Play"
    );
    assert_eq!(Message::Won.text(), "Yay, You Won!");
    assert_eq!(Message::Lost.text(), "Oops, You Lost, Try Again");
}

#[test]
fn invalid_config_is_rejected_up_front() {
    let mut config = GameConfig::default();
    config.aliens_in_row = 0;
    assert!(Invaders::new(config, SEED).is_err());
}
