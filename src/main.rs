mod display;

use std::collections::HashMap;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::Rng;

use invaders::config::GameConfig;
use invaders::input::InputState;
use invaders::invaders::{FlowState, Invaders};

const FRAME: Duration = Duration::from_millis(16); // ≈60 FPS

/// A key is considered "held" if its last press/repeat event arrived within
/// a window of frames. Covers terminals that don't emit key-release events.
///
/// Before a key's first repeat the window has to outlast the OS initial
/// repeat delay (up to ~500 ms); once repeats flow at >= 15 Hz the short
/// window is enough.
const FIRST_HOLD_WINDOW: u64 = 36; // ≈580 ms
const HOLD_WINDOW: u64 = 8; // ≈130 ms

// ── Held-key tracking ─────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Hold {
    last_seen: u64,
    repeating: bool,
}

impl Hold {
    fn window(&self) -> u64 {
        if self.repeating {
            HOLD_WINDOW
        } else {
            FIRST_HOLD_WINDOW
        }
    }
}

/// Maps each held key to the frame it was last seen (press or repeat).
#[derive(Default)]
struct HeldKeys {
    keys: HashMap<KeyCode, Hold>,
}

impl HeldKeys {
    /// Record a press. Classic terminals report auto-repeat as further
    /// presses, so a press of a key already held counts as a repeat.
    fn press(&mut self, code: KeyCode, frame: u64) {
        self.keys
            .entry(code)
            .and_modify(|hold| {
                hold.last_seen = frame;
                hold.repeating = true;
            })
            .or_insert(Hold {
                last_seen: frame,
                repeating: false,
            });
    }

    fn release(&mut self, code: &KeyCode) {
        self.keys.remove(code);
    }

    /// Forget keys whose hold window has lapsed.
    fn expire(&mut self, frame: u64) {
        self.keys
            .retain(|_, hold| frame.saturating_sub(hold.last_seen) <= hold.window());
    }

    fn any(&self, codes: &[KeyCode]) -> bool {
        codes.iter().any(|c| self.keys.contains_key(c))
    }

    fn snapshot(&self) -> InputState {
        InputState {
            left: self.any(&[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')]),
            right: self.any(&[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')]),
            fire: self.any(&[KeyCode::Char(' '), KeyCode::Up]),
            key_count: self.keys.len(),
        }
    }
}

// ── Logging & config ──────────────────────────────────────────────────────────

/// Log to a file: stderr would scribble over the raw-mode screen.
fn init_logging() {
    let path = std::env::temp_dir().join("invaders.log");
    let Ok(file) = File::create(&path) else {
        return;
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
}

fn config_path() -> Option<PathBuf> {
    std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("INVADERS_CONFIG").map(PathBuf::from))
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player quits.
///
/// Input model: every press/repeat event refreshes the key's entry in
/// [`HeldKeys`]; release events (keyboard-enhancement terminals) remove it,
/// and on classic terminals keys expire after a window of silent frames.
/// Each frame the surviving keys become one [`InputState`].
fn game_loop<W: Write>(
    out: &mut W,
    game: &mut Invaders,
    rx: &mpsc::Receiver<Event>,
) -> std::io::Result<()> {
    let mut held = HeldKeys::default();
    let mut frame: u64 = 0;
    let mut last = Instant::now();

    loop {
        let frame_start = Instant::now();
        frame += 1;
        let mut advance = false;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            let Event::Key(KeyEvent {
                code,
                kind,
                modifiers,
                ..
            }) = ev
            else {
                continue;
            };
            match kind {
                KeyEventKind::Press => {
                    match code {
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Ok(()),
                        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                            return Ok(())
                        }
                        KeyCode::Enter | KeyCode::Char('n') | KeyCode::Char('N')
                            if matches!(game.state(), FlowState::Complete(_)) =>
                        {
                            advance = true;
                        }
                        _ => {}
                    }
                    held.press(code, frame);
                }
                KeyEventKind::Repeat => held.press(code, frame),
                KeyEventKind::Release => held.release(&code),
            }
        }
        held.expire(frame);

        let dt = last.elapsed().as_secs_f32();
        last = Instant::now();
        game.update(&held.snapshot(), dt).map_err(std::io::Error::other)?;

        // After the update, so the key that leaves a finished wave is not
        // also taken as the title screen's "any key".
        if advance {
            game.next_wave().map_err(std::io::Error::other)?;
        }

        display::render(out, game)?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> std::io::Result<()> {
    init_logging();

    let config = match config_path() {
        Some(path) => GameConfig::load_or_default(&path),
        None => GameConfig::default(),
    };
    let seed: u64 = rand::thread_rng().gen();
    log::info!("Starting game (seed {seed})");
    let mut game = Invaders::new(config, seed).map_err(std::io::Error::other)?;

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let result = game_loop(&mut out, &mut game, &rx);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    if let Some(wave) = game.wave() {
        log::info!("Exiting with score {}", wave.score());
    }
    result
}
