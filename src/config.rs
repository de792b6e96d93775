//! Runtime game configuration, optionally loaded from a TOML file.
//!
//! [`GameConfig`] mirrors every value in [`crate::constants`]. Missing keys
//! fall back to the compile-time defaults, so a file can override just the
//! values you care about:
//!
//! ```toml
//! alien_rows = 3
//! alien_step_interval = 0.25
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::constants::*;
use crate::error::GameError;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // ── Play area ─────────────────────────────────────────────────────────────
    pub game_width: f32,
    pub game_height: f32,
    pub defense_line: f32,

    // ── Ship ──────────────────────────────────────────────────────────────────
    pub ship_width: f32,
    pub ship_height: f32,
    pub ship_bottom: f32,
    pub ship_movement: f32,
    pub ship_lives: u32,

    // ── Aliens ────────────────────────────────────────────────────────────────
    pub alien_width: f32,
    pub alien_height: f32,
    pub alien_h_sep: f32,
    pub alien_v_sep: f32,
    pub alien_ceiling: f32,
    pub alien_rows: usize,
    pub aliens_in_row: usize,
    pub alien_h_walk: f32,
    pub alien_v_walk: f32,
    pub alien_step_interval: f32,
    pub alien_points: u32,

    // ── Bolts ─────────────────────────────────────────────────────────────────
    pub bolt_width: f32,
    pub bolt_height: f32,
    pub bolt_speed: f32,
    pub bolt_rate: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            game_width: GAME_WIDTH,
            game_height: GAME_HEIGHT,
            defense_line: DEFENSE_LINE,
            ship_width: SHIP_WIDTH,
            ship_height: SHIP_HEIGHT,
            ship_bottom: SHIP_BOTTOM,
            ship_movement: SHIP_MOVEMENT,
            ship_lives: SHIP_LIVES,
            alien_width: ALIEN_WIDTH,
            alien_height: ALIEN_HEIGHT,
            alien_h_sep: ALIEN_H_SEP,
            alien_v_sep: ALIEN_V_SEP,
            alien_ceiling: ALIEN_CEILING,
            alien_rows: ALIEN_ROWS,
            aliens_in_row: ALIENS_IN_ROW,
            alien_h_walk: ALIEN_H_WALK,
            alien_v_walk: ALIEN_V_WALK,
            alien_step_interval: ALIEN_STEP_INTERVAL,
            alien_points: ALIEN_POINTS,
            bolt_width: BOLT_WIDTH,
            bolt_height: BOLT_HEIGHT,
            bolt_speed: BOLT_SPEED,
            bolt_rate: BOLT_RATE,
        }
    }
}

impl GameConfig {
    /// Parse a config from TOML text and validate it.
    pub fn from_toml_str(text: &str, path: &Path) -> Result<Self, GameError> {
        let config: GameConfig = toml::from_str(text).map_err(|source| GameError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate the file at `path`.
    pub fn load(path: &Path) -> Result<Self, GameError> {
        let text = std::fs::read_to_string(path).map_err(|source| GameError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text, path)
    }

    /// Like [`GameConfig::load`], but any failure is logged and the defaults
    /// are used instead.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => {
                log::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                log::warn!("{e}; using default config");
                Self::default()
            }
        }
    }

    /// Reject values the simulation cannot run with.
    pub fn validate(&self) -> Result<(), GameError> {
        if self.alien_rows == 0 || self.aliens_in_row == 0 {
            return Err(GameError::EmptyFormation {
                rows: self.alien_rows,
                cols: self.aliens_in_row,
            });
        }
        if self.bolt_rate == 0 {
            return Err(GameError::InvalidConstant {
                name: "bolt_rate",
                value: 0.0,
                expected: "at least 1",
            });
        }

        let positive: [(&'static str, f32); 13] = [
            ("game_width", self.game_width),
            ("game_height", self.game_height),
            ("ship_width", self.ship_width),
            ("ship_height", self.ship_height),
            ("ship_movement", self.ship_movement),
            ("alien_width", self.alien_width),
            ("alien_height", self.alien_height),
            ("alien_h_walk", self.alien_h_walk),
            ("alien_step_interval", self.alien_step_interval),
            ("bolt_width", self.bolt_width),
            ("bolt_height", self.bolt_height),
            ("bolt_speed", self.bolt_speed),
            ("alien_v_walk", self.alien_v_walk),
        ];
        for (name, value) in positive {
            if !(value > 0.0 && value.is_finite()) {
                return Err(GameError::InvalidConstant {
                    name,
                    value,
                    expected: "a positive finite number",
                });
            }
        }

        let non_negative: [(&'static str, f32); 4] = [
            ("alien_h_sep", self.alien_h_sep),
            ("alien_v_sep", self.alien_v_sep),
            ("alien_ceiling", self.alien_ceiling),
            ("ship_bottom", self.ship_bottom),
        ];
        for (name, value) in non_negative {
            if !(value >= 0.0 && value.is_finite()) {
                return Err(GameError::InvalidConstant {
                    name,
                    value,
                    expected: "a non-negative finite number",
                });
            }
        }

        if self.ship_width > self.game_width {
            return Err(GameError::InvalidConstant {
                name: "ship_width",
                value: self.ship_width,
                expected: "no wider than game_width",
            });
        }
        if !(0.0..self.game_height).contains(&self.defense_line) {
            return Err(GameError::InvalidConstant {
                name: "defense_line",
                value: self.defense_line,
                expected: "inside [0, game_height)",
            });
        }
        Ok(())
    }

    /// Leftmost x an alien centre may reach before the formation turns.
    pub fn march_left_bound(&self) -> f32 {
        0.5 * self.alien_width + self.alien_h_sep
    }

    /// Rightmost x an alien centre may reach before the formation turns.
    pub fn march_right_bound(&self) -> f32 {
        self.game_width - 0.5 * self.alien_width - self.alien_h_sep
    }
}
