//! Compile-time defaults for every tunable value.
//!
//! World units: the play area is `GAME_WIDTH` x `GAME_HEIGHT` with the origin
//! at the bottom-left corner and y growing upward. [`crate::config::GameConfig`]
//! mirrors each value here and uses it as its default.

// ── Play area ─────────────────────────────────────────────────────────────────

pub const GAME_WIDTH: f32 = 800.0;
pub const GAME_HEIGHT: f32 = 700.0;

/// y of the horizontal line the aliens must not cross.
pub const DEFENSE_LINE: f32 = 100.0;

// ── Ship ──────────────────────────────────────────────────────────────────────

pub const SHIP_WIDTH: f32 = 44.0;
pub const SHIP_HEIGHT: f32 = 44.0;
pub const SHIP_BOTTOM: f32 = 32.0;
/// Horizontal distance covered per frame while a direction key is held.
pub const SHIP_MOVEMENT: f32 = 5.0;
pub const SHIP_LIVES: u32 = 3;

// ── Aliens ────────────────────────────────────────────────────────────────────

pub const ALIEN_WIDTH: f32 = 33.0;
pub const ALIEN_HEIGHT: f32 = 33.0;
pub const ALIEN_H_SEP: f32 = 16.0;
pub const ALIEN_V_SEP: f32 = 16.0;
/// Gap between the top of the screen and the top row of the formation.
pub const ALIEN_CEILING: f32 = 100.0;
pub const ALIEN_ROWS: usize = 5;
pub const ALIENS_IN_ROW: usize = 12;
/// Horizontal distance of one march step.
pub const ALIEN_H_WALK: f32 = 8.0;
/// Total descent per reversal, split evenly across the rows.
pub const ALIEN_V_WALK: f32 = 80.0;
/// Seconds between march steps.
pub const ALIEN_STEP_INTERVAL: f32 = 0.5;
pub const ALIEN_POINTS: u32 = 10;

// ── Bolts ─────────────────────────────────────────────────────────────────────

pub const BOLT_WIDTH: f32 = 5.0;
pub const BOLT_HEIGHT: f32 = 20.0;
/// Vertical distance a bolt travels per frame.
pub const BOLT_SPEED: f32 = 10.0;
/// Upper bound (inclusive) of the random march-step countdown between alien shots.
pub const BOLT_RATE: u32 = 5;
/// Gap left between a firing alien and the top of its bolt.
pub const ALIEN_BOLT_GAP: f32 = 2.0;
