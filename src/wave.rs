/// One wave of play: the ship, the alien formation and the bolts in flight.
///
/// A `Wave` is built fresh for every level and driven by [`Wave::update`]
/// once per frame. All randomness (the alien-fire countdown and the choice of
/// shooter) comes from a `Pcg32` seeded at construction, so a wave replays
/// identically for the same seed and inputs.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::config::GameConfig;
use crate::constants::ALIEN_BOLT_GAP;
use crate::entities::{Bolt, BoltOwner, Ship};
use crate::error::GameError;
use crate::formation::AlienGrid;
use crate::input::{InputState, Key};

/// Horizontal direction of the formation's march.
///
/// The descent at a bound happens inside a single march pass, immediately
/// followed by the flip, so it is never a resting direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum March {
    Right,
    Left,
}

#[derive(Clone, Debug)]
pub struct Wave {
    config: GameConfig,
    ship: Option<Ship>,
    aliens: AlienGrid,
    bolts: Vec<Bolt>,
    direction: March,
    /// Seconds accumulated towards the next march step.
    step_timer: f32,
    /// March steps that must pass (strictly exceeded) before aliens fire again.
    alien_fire: u32,
    steps_since_fire: u32,
    lives: u32,
    score: u32,
    rng: Pcg32,
}

// ── Construction ──────────────────────────────────────────────────────────────

impl Wave {
    /// A first wave: full formation, `ship_lives` lives, zero score.
    pub fn new(config: &GameConfig, seed: u64) -> Result<Self, GameError> {
        Self::with_carryover(config, config.ship_lives, 0, seed)
    }

    /// A later wave that keeps the lives and score earned so far.
    pub fn with_carryover(
        config: &GameConfig,
        lives: u32,
        score: u32,
        seed: u64,
    ) -> Result<Self, GameError> {
        config.validate()?;
        let aliens = AlienGrid::standard(config)?;
        Ok(Self::assemble(config, aliens, lives, score, seed))
    }

    /// A wave over a custom formation, e.g. a hand-placed test layout.
    pub fn with_formation(
        config: &GameConfig,
        aliens: AlienGrid,
        seed: u64,
    ) -> Result<Self, GameError> {
        config.validate()?;
        Ok(Self::assemble(config, aliens, config.ship_lives, 0, seed))
    }

    fn assemble(config: &GameConfig, aliens: AlienGrid, lives: u32, score: u32, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let alien_fire = rng.gen_range(1..=config.bolt_rate);
        log::info!(
            "New wave: {}x{} aliens, {} lives, score {} (seed {seed})",
            aliens.rows(),
            aliens.cols(),
            lives,
            score
        );
        Self {
            ship: Some(Self::starting_ship(config)),
            aliens,
            bolts: Vec::new(),
            direction: March::Right,
            step_timer: 0.0,
            alien_fire,
            steps_since_fire: 0,
            lives,
            score,
            rng,
            config: config.clone(),
        }
    }

    fn starting_ship(config: &GameConfig) -> Ship {
        Ship::new(
            0.5 * config.game_width,
            config.ship_bottom,
            config.ship_width,
            config.ship_height,
        )
    }
}

// ── Accessors ─────────────────────────────────────────────────────────────────

impl Wave {
    pub fn ship(&self) -> Option<&Ship> {
        self.ship.as_ref()
    }

    pub fn aliens(&self) -> &AlienGrid {
        &self.aliens
    }

    pub fn bolts(&self) -> &[Bolt] {
        &self.bolts
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn direction(&self) -> March {
        self.direction
    }

    pub fn defense_line(&self) -> f32 {
        self.config.defense_line
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    fn has_bolt(&self, owner: BoltOwner) -> bool {
        self.bolts.iter().any(|b| b.owner == owner)
    }

    /// Put a bolt in flight unless one from the same side already is.
    /// Returns whether the bolt was added.
    pub fn try_add_bolt(&mut self, bolt: Bolt) -> bool {
        if self.has_bolt(bolt.owner) {
            return false;
        }
        self.bolts.push(bolt);
        true
    }
}

// ── Per-frame update ──────────────────────────────────────────────────────────

impl Wave {
    /// Advance the wave by one frame. `dt` is the time in seconds since the
    /// previous frame; negative or non-finite values count as zero.
    pub fn update(&mut self, input: &InputState, dt: f32) {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };

        self.move_ship(input);
        let steps = self.march(dt);
        self.fire_ship_bolt(input);
        self.advance_bolts();
        self.steps_since_fire = self.steps_since_fire.saturating_add(steps);
        self.fire_alien_bolt();
        self.resolve_collisions();
    }

    fn move_ship(&mut self, input: &InputState) {
        let Some(ship) = self.ship.as_mut() else {
            return;
        };
        let width = self.config.game_width;
        if input.is_key_down(Key::Left) {
            ship.move_by(-self.config.ship_movement, width);
        }
        if input.is_key_down(Key::Right) {
            ship.move_by(self.config.ship_movement, width);
        }
    }

    /// Step the formation if its timer is due, turning and descending at the
    /// bounds. Returns the number of march steps taken this frame.
    fn march(&mut self, dt: f32) -> u32 {
        let mut steps = 0;
        if self.step_timer >= self.config.alien_step_interval {
            let distance = self.config.alien_h_walk;
            let direction = self.direction;
            let mut moved = 0;
            for alien in self.aliens.iter_live_mut() {
                match direction {
                    March::Right => alien.step_right(distance),
                    March::Left => alien.step_left(distance),
                }
                moved += 1;
            }
            self.step_timer = 0.0;
            if moved > 0 {
                steps = 1;
                self.turn_at_bounds();
            }
        }
        self.step_timer += dt;
        steps
    }

    /// Bounds are checked against the extreme live aliens, so the formation
    /// still turns after its corner aliens are shot.
    fn turn_at_bounds(&mut self) {
        let Some((leftmost, rightmost)) = self.aliens.x_extent() else {
            return;
        };
        let turn = match self.direction {
            March::Right if rightmost >= self.config.march_right_bound() => March::Left,
            March::Left if leftmost <= self.config.march_left_bound() => March::Right,
            _ => return,
        };

        let drop = self.config.alien_v_walk / self.aliens.rows() as f32;
        for alien in self.aliens.iter_live_mut() {
            alien.step_down(drop);
        }
        self.direction = turn;
        log::debug!("Formation reached a bound; descending and marching {turn:?}");
    }

    fn fire_ship_bolt(&mut self, input: &InputState) {
        if !input.is_key_down(Key::Fire) || self.has_bolt(BoltOwner::Player) {
            return;
        }
        let Some(ship) = &self.ship else {
            return;
        };
        let bolt = Bolt::new(
            ship.x,
            ship.nose(),
            self.config.bolt_width,
            self.config.bolt_height,
            BoltOwner::Player,
        );
        self.bolts.push(bolt);
    }

    fn advance_bolts(&mut self) {
        let speed = self.config.bolt_speed;
        let margin = self.config.bolt_height;
        let ceiling = self.config.game_height + margin;
        self.bolts.retain_mut(|bolt| {
            bolt.advance(speed);
            bolt.bottom >= -margin && bolt.bottom <= ceiling
        });
    }

    fn fire_alien_bolt(&mut self) {
        if self.steps_since_fire <= self.alien_fire || self.has_bolt(BoltOwner::Alien) {
            return;
        }
        let columns = self.aliens.occupied_columns();
        if columns.is_empty() {
            return;
        }
        let col = columns[self.rng.gen_range(0..columns.len())];
        let Some(shooter) = self.aliens.lowest_in_column(col) else {
            return;
        };

        let bottom =
            shooter.y - 0.5 * shooter.height - self.config.bolt_height - ALIEN_BOLT_GAP;
        let bolt = Bolt::new(
            shooter.x,
            bottom,
            self.config.bolt_width,
            self.config.bolt_height,
            BoltOwner::Alien,
        );
        log::debug!("Alien in column {col} fires from x={:.1}", bolt.x);
        self.bolts.push(bolt);

        self.steps_since_fire = 0;
        self.alien_fire = self.rng.gen_range(1..=self.config.bolt_rate);
    }

    fn resolve_collisions(&mut self) {
        if let Some(ship) = &self.ship {
            if let Some(i) = self
                .bolts
                .iter()
                .position(|b| ship.collides_with_alien_bolt(b))
            {
                self.bolts.remove(i);
                self.ship = None;
                self.lives = self.lives.saturating_sub(1);
                log::info!("Ship destroyed, {} lives left", self.lives);
            }
        }

        for row in 0..self.aliens.rows() {
            for col in 0..self.aliens.cols() {
                let Some(alien) = self.aliens.get(row, col) else {
                    continue;
                };
                let Some(i) = self
                    .bolts
                    .iter()
                    .position(|b| alien.collides_with_player_bolt(b))
                else {
                    continue;
                };
                self.bolts.remove(i);
                self.aliens.kill(row, col);
                self.score = self.score.saturating_add(self.config.alien_points);
            }
        }
    }
}

// ── Status ────────────────────────────────────────────────────────────────────

impl Wave {
    pub fn is_all_aliens_dead(&self) -> bool {
        self.aliens.is_empty()
    }

    /// True once any live alien's centre sinks to within half an alien of the
    /// defense line.
    pub fn have_aliens_breached_line(&self) -> bool {
        let line = self.config.defense_line;
        self.aliens
            .iter_live()
            .any(|(_, alien)| alien.y <= line + 0.5 * alien.height)
    }

    /// The ship is down but a life remains to bring it back.
    pub fn is_paused(&self) -> bool {
        self.ship.is_none() && self.lives > 0
    }

    pub fn is_game_over(&self) -> bool {
        self.ship.is_none() && self.lives == 0
    }

    /// Rebuild the ship at its starting spot, if any lives remain.
    pub fn restart_ship(&mut self) {
        if self.lives > 0 {
            self.ship = Some(Self::starting_ship(&self.config));
        }
    }
}
