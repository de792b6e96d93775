/// Game flow controller.
///
/// [`Invaders`] decides when waves are created, paused, resumed and finished.
/// It reads input once per frame and only hands the frame to the active
/// [`Wave`] while in [`FlowState::Active`].

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::config::GameConfig;
use crate::error::GameError;
use crate::input::{InputState, KeyEdge};
use crate::wave::Wave;

// ── States & messages ─────────────────────────────────────────────────────────

/// How a finished wave ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Every alien was shot down.
    Cleared,
    /// An alien reached the defense line.
    Breached,
    /// The last life was lost.
    Defeated,
}

impl Outcome {
    pub fn is_win(&self) -> bool {
        *self == Outcome::Cleared
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlowState {
    /// Waiting for the first key press.
    Inactive,
    /// A fresh wave is built and shown for one frame.
    NewWave,
    Active,
    /// The ship was lost; waiting for a key press to bring it back.
    Paused,
    /// The ship is back; resumes play next frame.
    Continue,
    /// The wave is over. Only [`Invaders::next_wave`] leaves this state.
    Complete(Outcome),
}

/// Text shown over the play field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Message {
    PressAnyKey,
    Incoming(u32),
    LostLife,
    Won,
    Lost,
}

impl Message {
    pub fn text(&self) -> String {
        match self {
            Message::PressAnyKey => "Press Any Key To Play".to_string(),
            Message::Incoming(n) => format!("Wave {n}"),
            Message::LostLife => "You Lost A Life, Press Any Key To Play".to_string(),
            Message::Won => "Yay, You Won!".to_string(),
            Message::Lost => "Oops, You Lost, Try Again".to_string(),
        }
    }

    fn for_state(state: FlowState, wave_number: u32) -> Option<Self> {
        match state {
            FlowState::Inactive => Some(Message::PressAnyKey),
            FlowState::NewWave => Some(Message::Incoming(wave_number)),
            FlowState::Active => None,
            FlowState::Paused | FlowState::Continue => Some(Message::LostLife),
            FlowState::Complete(outcome) if outcome.is_win() => Some(Message::Won),
            FlowState::Complete(_) => Some(Message::Lost),
        }
    }
}

// ── Controller ────────────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct Invaders {
    config: GameConfig,
    state: FlowState,
    wave: Option<Wave>,
    message: Option<Message>,
    edge: KeyEdge,
    /// Source of per-wave seeds, so a whole game replays from one seed.
    seeds: Pcg32,
    wave_number: u32,
}

impl Invaders {
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, GameError> {
        config.validate()?;
        Ok(Self {
            config,
            state: FlowState::Inactive,
            wave: None,
            message: Some(Message::PressAnyKey),
            edge: KeyEdge::new(),
            seeds: Pcg32::seed_from_u64(seed),
            wave_number: 0,
        })
    }

    pub fn state(&self) -> FlowState {
        self.state
    }

    pub fn message(&self) -> Option<Message> {
        self.message
    }

    pub fn wave(&self) -> Option<&Wave> {
        self.wave.as_ref()
    }

    /// 1-based number of the current wave; 0 before the first one.
    pub fn wave_number(&self) -> u32 {
        self.wave_number
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Run one frame.
    pub fn update(&mut self, input: &InputState, dt: f32) -> Result<(), GameError> {
        let pressed = self.edge.observe(input.key_count());

        match self.state {
            FlowState::Inactive => {
                if pressed {
                    self.begin_wave(self.config.ship_lives, 0)?;
                }
            }
            FlowState::NewWave | FlowState::Continue => self.enter(FlowState::Active),
            FlowState::Active => self.play(input, dt),
            FlowState::Paused => {
                if pressed {
                    if let Some(wave) = self.wave.as_mut() {
                        wave.restart_ship();
                    }
                    self.enter(FlowState::Continue);
                }
            }
            FlowState::Complete(_) => {}
        }
        Ok(())
    }

    /// Leave [`FlowState::Complete`]: a cleared wave leads to the next one with
    /// lives and score carried over, a lost one back to the title screen.
    /// Returns `false` (and does nothing) in any other state.
    pub fn next_wave(&mut self) -> Result<bool, GameError> {
        let FlowState::Complete(outcome) = self.state else {
            return Ok(false);
        };
        let carried = match outcome {
            Outcome::Cleared => self.wave.as_ref().map(|w| (w.lives(), w.score())),
            Outcome::Breached | Outcome::Defeated => None,
        };
        match carried {
            Some((lives, score)) => self.begin_wave(lives, score)?,
            None => {
                self.wave = None;
                self.wave_number = 0;
                self.enter(FlowState::Inactive);
            }
        }
        Ok(true)
    }

    fn begin_wave(&mut self, lives: u32, score: u32) -> Result<(), GameError> {
        let seed: u64 = self.seeds.gen();
        self.wave = Some(Wave::with_carryover(&self.config, lives, score, seed)?);
        self.wave_number += 1;
        self.enter(FlowState::NewWave);
        Ok(())
    }

    fn play(&mut self, input: &InputState, dt: f32) {
        let Some(wave) = self.wave.as_mut() else {
            return;
        };
        wave.update(input, dt);

        let next = if wave.is_game_over() {
            FlowState::Complete(Outcome::Defeated)
        } else if wave.have_aliens_breached_line() {
            FlowState::Complete(Outcome::Breached)
        } else if wave.is_all_aliens_dead() {
            FlowState::Complete(Outcome::Cleared)
        } else if wave.is_paused() {
            FlowState::Paused
        } else {
            return;
        };
        self.enter(next);
    }

    fn enter(&mut self, state: FlowState) {
        if let FlowState::Complete(outcome) = state {
            let score = self.wave.as_ref().map_or(0, Wave::score);
            log::info!("Wave {} complete: {outcome:?}, score {score}", self.wave_number);
        }
        self.state = state;
        self.message = Message::for_state(state, self.wave_number);
    }
}
