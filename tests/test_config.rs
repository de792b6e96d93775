use std::path::Path;

use invaders::config::GameConfig;
use invaders::constants;
use invaders::error::GameError;

fn path() -> &'static Path {
    Path::new("invaders.toml")
}

// ── Defaults ──────────────────────────────────────────────────────────────────

#[test]
fn defaults_mirror_constants() {
    let c = GameConfig::default();
    assert_eq!(c.game_width, constants::GAME_WIDTH);
    assert_eq!(c.alien_rows, constants::ALIEN_ROWS);
    assert_eq!(c.bolt_rate, constants::BOLT_RATE);
    assert_eq!(c.ship_lives, constants::SHIP_LIVES);
    assert!(c.validate().is_ok());
}

#[test]
fn march_bounds() {
    let c = GameConfig::default();
    assert_eq!(c.march_left_bound(), 32.5);
    assert_eq!(c.march_right_bound(), 767.5);
}

// ── TOML parsing ──────────────────────────────────────────────────────────────

#[test]
fn partial_toml_overrides_only_given_keys() {
    let c = GameConfig::from_toml_str("alien_rows = 3\nalien_step_interval = 0.25\n", path())
        .unwrap();
    assert_eq!(c.alien_rows, 3);
    assert_eq!(c.alien_step_interval, 0.25);
    assert_eq!(c.aliens_in_row, constants::ALIENS_IN_ROW);
    assert_eq!(c.bolt_speed, constants::BOLT_SPEED);
}

#[test]
fn empty_toml_is_the_default() {
    let c = GameConfig::from_toml_str("", path()).unwrap();
    assert_eq!(c, GameConfig::default());
}

#[test]
fn malformed_toml_is_a_parse_error() {
    let err = GameConfig::from_toml_str("alien_rows = \"many\"", path()).unwrap_err();
    assert!(matches!(err, GameError::ConfigParse { .. }));
    assert!(err.to_string().contains("invaders.toml"));
}

#[test]
fn missing_file_is_a_read_error() {
    let err = GameConfig::load(Path::new("/nonexistent/invaders.toml")).unwrap_err();
    assert!(matches!(err, GameError::ConfigRead { .. }));
}

#[test]
fn missing_file_falls_back_to_defaults() {
    let c = GameConfig::load_or_default(Path::new("/nonexistent/invaders.toml"));
    assert_eq!(c, GameConfig::default());
}

// ── Validation ────────────────────────────────────────────────────────────────

#[test]
fn zero_columns_is_an_empty_formation() {
    let err = GameConfig::from_toml_str("aliens_in_row = 0", path()).unwrap_err();
    assert!(matches!(err, GameError::EmptyFormation { rows: 5, cols: 0 }));
}

#[test]
fn zero_bolt_rate_is_rejected() {
    let mut c = GameConfig::default();
    c.bolt_rate = 0;
    assert!(matches!(
        c.validate(),
        Err(GameError::InvalidConstant { name: "bolt_rate", .. })
    ));
}

#[test]
fn non_positive_speeds_are_rejected() {
    let mut c = GameConfig::default();
    c.bolt_speed = 0.0;
    assert!(matches!(
        c.validate(),
        Err(GameError::InvalidConstant { name: "bolt_speed", .. })
    ));

    let mut c = GameConfig::default();
    c.alien_step_interval = f32::NAN;
    assert!(matches!(
        c.validate(),
        Err(GameError::InvalidConstant { name: "alien_step_interval", .. })
    ));
}

#[test]
fn defense_line_must_be_on_screen() {
    let mut c = GameConfig::default();
    c.defense_line = c.game_height + 1.0;
    let err = c.validate().unwrap_err();
    assert!(err.to_string().contains("defense_line"));
}

#[test]
fn nan_spacing_is_rejected() {
    let err = GameConfig::from_toml_str("alien_h_sep = nan", path()).unwrap_err();
    assert!(matches!(
        err,
        GameError::InvalidConstant { name: "alien_h_sep", .. }
    ));
}

#[test]
fn negative_offsets_are_rejected() {
    let err = GameConfig::from_toml_str("alien_ceiling = -5000.0", path()).unwrap_err();
    assert!(matches!(
        err,
        GameError::InvalidConstant { name: "alien_ceiling", .. }
    ));

    let mut c = GameConfig::default();
    c.ship_bottom = -100.0;
    assert!(matches!(
        c.validate(),
        Err(GameError::InvalidConstant { name: "ship_bottom", .. })
    ));

    let mut c = GameConfig::default();
    c.alien_v_sep = f32::INFINITY;
    assert!(matches!(
        c.validate(),
        Err(GameError::InvalidConstant { name: "alien_v_sep", .. })
    ));
}

#[test]
fn zero_spacing_is_allowed() {
    let mut c = GameConfig::default();
    c.alien_h_sep = 0.0;
    c.alien_v_sep = 0.0;
    assert!(c.validate().is_ok());
}
