//! Abstract per-frame input, decoupled from any keyboard backend.

/// The keys the simulation reacts to while a wave is in play.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Fire,
}

/// Snapshot of the keyboard for one frame.
///
/// `key_count` counts every held key, including ones the game does not map,
/// so "press any key" prompts work with any key.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
    pub fire: bool,
    pub key_count: usize,
}

impl InputState {
    /// No keys held.
    pub fn idle() -> Self {
        Self::default()
    }

    /// Only `keys` held.
    pub fn holding(keys: &[Key]) -> Self {
        let mut input = Self::default();
        for key in keys {
            match key {
                Key::Left => input.left = true,
                Key::Right => input.right = true,
                Key::Fire => input.fire = true,
            }
        }
        input.key_count = keys.len();
        input
    }

    pub fn is_key_down(&self, key: Key) -> bool {
        match key {
            Key::Left => self.left,
            Key::Right => self.right,
            Key::Fire => self.fire,
        }
    }

    pub fn key_count(&self) -> usize {
        self.key_count
    }
}

/// Detects the frame on which the held-key count rises from zero.
///
/// Holding a key does not retrigger; the player has to release every key and
/// press again.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KeyEdge {
    last_count: usize,
}

impl KeyEdge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record this frame's count. Returns `true` on a fresh press.
    pub fn observe(&mut self, key_count: usize) -> bool {
        let pressed = key_count > 0 && self.last_count == 0;
        self.last_count = key_count;
        pressed
    }
}
