/// Rendering layer: all terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable view of the game.
/// No game logic is performed; this module only projects world coordinates
/// onto terminal cells and emits crossterm commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};

use invaders::entities::{Alien, AlienKind, Bolt, BoltOwner, Ship};
use invaders::invaders::{FlowState, Invaders};
use invaders::wave::Wave;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_LIVES: Color = Color::Red;
const C_HUD_WAVE: Color = Color::Cyan;
const C_DEFENSE_LINE: Color = Color::DarkGreen;
const C_SHIP: Color = Color::White;
const C_CRAB: Color = Color::Green;
const C_SQUID: Color = Color::Yellow;
const C_OCTOPUS: Color = Color::Red;
const C_BOLT_PLAYER: Color = Color::Cyan;
const C_BOLT_ALIEN: Color = Color::Magenta;
const C_MESSAGE: Color = Color::Blue;
const C_HINT: Color = Color::DarkGrey;

// ── World → terminal projection ───────────────────────────────────────────────

/// Maps world units (y up) onto the cells inside the border.
struct Viewport {
    width: u16,
    height: u16,
    game_width: f32,
    game_height: f32,
}

impl Viewport {
    fn first_row(&self) -> u16 {
        2
    }

    fn last_row(&self) -> u16 {
        self.height.saturating_sub(3).max(self.first_row())
    }

    fn last_col(&self) -> u16 {
        self.width.saturating_sub(2).max(1)
    }

    fn column(&self, x: f32) -> u16 {
        let span = (self.last_col() - 1) as f32;
        let col = 1.0 + (x / self.game_width * span).round();
        col.clamp(1.0, self.last_col() as f32) as u16
    }

    fn row(&self, y: f32) -> u16 {
        let top = self.first_row() as f32;
        let span = (self.last_row() - self.first_row()) as f32;
        let row = top + ((self.game_height - y) / self.game_height * span).round();
        row.clamp(top, self.last_row() as f32) as u16
    }

    /// Column where a `len`-wide sprite centred on `x` starts.
    fn sprite_column(&self, x: f32, len: u16) -> u16 {
        let max = (self.last_col() + 1).saturating_sub(len).max(1);
        self.column(x).saturating_sub(len / 2).clamp(1, max)
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, game: &Invaders) -> std::io::Result<()> {
    let (width, height) = terminal::size()?;
    let config = game.config();
    let view = Viewport {
        width,
        height,
        game_width: config.game_width,
        game_height: config.game_height,
    };

    out.queue(terminal::Clear(terminal::ClearType::All))?;
    draw_border(out, &view)?;

    if let Some(wave) = game.wave() {
        draw_hud(out, &view, wave, game.wave_number())?;
        draw_defense_line(out, &view, wave)?;
        for (_, alien) in wave.aliens().iter_live() {
            draw_alien(out, &view, alien)?;
        }
        for bolt in wave.bolts() {
            draw_bolt(out, &view, bolt)?;
        }
        if let Some(ship) = wave.ship() {
            draw_ship(out, &view, ship)?;
        }
    }

    if let Some(message) = game.message() {
        draw_message(out, &view, &message.text(), game.state())?;
    }
    draw_controls_hint(out, &view)?;

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    let w = view.width as usize;
    let h = view.height;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    // Row 1: top bar
    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    // Row h-2: bottom bar
    out.queue(cursor::MoveTo(0, h.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    for row in 2..h.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(view.width.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(
    out: &mut W,
    view: &Viewport,
    wave: &Wave,
    wave_number: u32,
) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Score: {:>6}", wave.score())))?;

    let wave_str = format!("[ WAVE {wave_number} ]");
    let wx = (view.width / 2).saturating_sub(wave_str.len() as u16 / 2);
    out.queue(cursor::MoveTo(wx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_WAVE))?;
    out.queue(Print(&wave_str))?;

    let hearts: String = "♥".repeat(wave.lives() as usize);
    let lives_text = format!("Lives: {}", hearts);
    let lx = view
        .width
        .saturating_sub(lives_text.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(lx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_LIVES))?;
    out.queue(Print(&lives_text))?;

    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_defense_line<W: Write>(out: &mut W, view: &Viewport, wave: &Wave) -> std::io::Result<()> {
    let row = view.row(wave.defense_line());
    let len = view.last_col() as usize;
    out.queue(cursor::MoveTo(1, row))?;
    out.queue(style::SetForegroundColor(C_DEFENSE_LINE))?;
    out.queue(Print("╌".repeat(len)))?;
    Ok(())
}

fn draw_ship<W: Write>(out: &mut W, view: &Viewport, ship: &Ship) -> std::io::Result<()> {
    // Sprite (2 rows, 3 cols):
    //   ▲       ← nose row
    //  /|\      ← hull row
    let col = view.sprite_column(ship.x, 3);
    let hull = view.row(ship.bottom);
    let nose = view.row(ship.nose()).min(hull.saturating_sub(1)).max(view.first_row());

    out.queue(style::SetForegroundColor(C_SHIP))?;
    out.queue(cursor::MoveTo(col + 1, nose))?;
    out.queue(Print("▲"))?;
    if hull != nose {
        out.queue(cursor::MoveTo(col, hull))?;
        out.queue(Print("/|\\"))?;
    }
    Ok(())
}

fn draw_alien<W: Write>(out: &mut W, view: &Viewport, alien: &Alien) -> std::io::Result<()> {
    let (sprite, color) = match alien.kind {
        AlienKind::Crab => ("/M\\", C_CRAB),
        AlienKind::Squid => ("{@}", C_SQUID),
        AlienKind::Octopus => ("(◉)", C_OCTOPUS),
    };
    let col = view.sprite_column(alien.x, 3);
    out.queue(cursor::MoveTo(col, view.row(alien.y)))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(sprite))?;
    Ok(())
}

fn draw_bolt<W: Write>(out: &mut W, view: &Viewport, bolt: &Bolt) -> std::io::Result<()> {
    let mid = bolt.bottom + 0.5 * bolt.height;
    out.queue(cursor::MoveTo(view.column(bolt.x), view.row(mid)))?;
    match bolt.owner {
        BoltOwner::Player => {
            out.queue(style::SetForegroundColor(C_BOLT_PLAYER))?;
            out.queue(Print("║"))?;
        }
        BoltOwner::Alien => {
            out.queue(style::SetForegroundColor(C_BOLT_ALIEN))?;
            out.queue(Print("↓"))?;
        }
    }
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, view.height.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("← → / A D : Move   SPACE : Fire   Q : Quit"))?;
    Ok(())
}

// ── Message overlay ───────────────────────────────────────────────────────────

fn draw_message<W: Write>(
    out: &mut W,
    view: &Viewport,
    text: &str,
    state: FlowState,
) -> std::io::Result<()> {
    let inner = text.chars().count() + 4;
    let top = format!("╔{}╗", "═".repeat(inner));
    let middle = format!("║  {text}  ║");
    let bottom = format!("╚{}╝", "═".repeat(inner));
    let mut lines: Vec<(&str, Color)> = vec![
        (top.as_str(), C_MESSAGE),
        (middle.as_str(), C_MESSAGE),
        (bottom.as_str(), C_MESSAGE),
    ];
    if let FlowState::Complete(outcome) = state {
        let hint = if outcome.is_win() {
            "ENTER - Next Wave  Q - Quit"
        } else {
            "ENTER - Title Screen  Q - Quit"
        };
        lines.push((hint, Color::White));
    }

    let cx = view.width / 2;
    let start_row = (view.height / 2).saturating_sub(lines.len() as u16 / 2);

    for (i, (msg, color)) in lines.iter().enumerate() {
        let row = start_row + i as u16;
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }

    Ok(())
}
