/// Game entity types: plain data plus movement and collision primitives.
///
/// Coordinates are world units with y growing upward. Ships and bolts are
/// anchored by their bottom edge, aliens by their centre.

// ── Ownership & kinds ─────────────────────────────────────────────────────────

/// Which side fired a bolt. Fixed for the bolt's lifetime.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoltOwner {
    /// Fired by the ship, travels up.
    Player,
    /// Fired by an alien, travels down.
    Alien,
}

/// Sprite variant of an alien. Purely cosmetic; every kind is worth the same.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AlienKind {
    Crab,
    Squid,
    Octopus,
}

impl AlienKind {
    /// Rows are painted in pairs: two rows of crabs, two of squids, two of
    /// octopuses, repeating upward.
    pub fn for_row(row: usize) -> Self {
        match row % 6 {
            0 | 1 => AlienKind::Crab,
            2 | 3 => AlienKind::Squid,
            _ => AlienKind::Octopus,
        }
    }
}

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Axis-aligned rectangle, edges inclusive.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub bottom: f32,
    pub right: f32,
    pub top: f32,
}

impl Rect {
    pub fn contains(&self, (x, y): (f32, f32)) -> bool {
        x >= self.left && x <= self.right && y >= self.bottom && y <= self.top
    }
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Bolt {
    /// Horizontal centre.
    pub x: f32,
    pub bottom: f32,
    pub width: f32,
    pub height: f32,
    pub owner: BoltOwner,
}

impl Bolt {
    pub fn new(x: f32, bottom: f32, width: f32, height: f32, owner: BoltOwner) -> Self {
        Self {
            x,
            bottom,
            width,
            height,
            owner,
        }
    }

    pub fn is_player_bolt(&self) -> bool {
        self.owner == BoltOwner::Player
    }

    pub fn is_alien_bolt(&self) -> bool {
        self.owner == BoltOwner::Alien
    }

    /// Move one frame's worth in the owner's direction.
    pub fn advance(&mut self, speed: f32) {
        match self.owner {
            BoltOwner::Player => self.bottom += speed,
            BoltOwner::Alien => self.bottom -= speed,
        }
    }

    /// The four corner points, used for overlap tests.
    pub fn corners(&self) -> [(f32, f32); 4] {
        let half = 0.5 * self.width;
        let top = self.bottom + self.height;
        [
            (self.x - half, self.bottom),
            (self.x + half, self.bottom),
            (self.x - half, top),
            (self.x + half, top),
        ]
    }

    fn overlaps(&self, rect: &Rect) -> bool {
        self.corners().iter().any(|&p| rect.contains(p))
    }
}

// ── Ship ──────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Ship {
    /// Horizontal centre.
    pub x: f32,
    pub bottom: f32,
    pub width: f32,
    pub height: f32,
}

impl Ship {
    pub fn new(x: f32, bottom: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            bottom,
            width,
            height,
        }
    }

    /// Shift horizontally by `dx`, then clamp so the hull stays on screen.
    pub fn move_by(&mut self, dx: f32, game_width: f32) {
        let min = 0.5 * self.width;
        let max = game_width - 0.5 * self.width;
        self.x = (self.x + dx).clamp(min, max);
    }

    /// y of the ship's nose, where player bolts spawn.
    pub fn nose(&self) -> f32 {
        self.bottom + self.height
    }

    pub fn bounds(&self) -> Rect {
        let half = 0.5 * self.width;
        Rect {
            left: self.x - half,
            bottom: self.bottom,
            right: self.x + half,
            top: self.bottom + self.height,
        }
    }

    /// Only alien bolts can hit the ship.
    pub fn collides_with_alien_bolt(&self, bolt: &Bolt) -> bool {
        bolt.is_alien_bolt() && bolt.overlaps(&self.bounds())
    }
}

// ── Aliens ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Alien {
    /// Centre.
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub kind: AlienKind,
}

impl Alien {
    pub fn new(x: f32, y: f32, width: f32, height: f32, kind: AlienKind) -> Self {
        Self {
            x,
            y,
            width,
            height,
            kind,
        }
    }

    pub fn step_right(&mut self, distance: f32) {
        self.x += distance;
    }

    pub fn step_left(&mut self, distance: f32) {
        self.x -= distance;
    }

    pub fn step_down(&mut self, distance: f32) {
        self.y -= distance;
    }

    pub fn bounds(&self) -> Rect {
        let hw = 0.5 * self.width;
        let hh = 0.5 * self.height;
        Rect {
            left: self.x - hw,
            bottom: self.y - hh,
            right: self.x + hw,
            top: self.y + hh,
        }
    }

    /// Only player bolts can hit an alien.
    pub fn collides_with_player_bolt(&self, bolt: &Bolt) -> bool {
        bolt.is_player_bolt() && bolt.overlaps(&self.bounds())
    }
}
