mod display;

use std::collections::HashMap;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::Path;
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags,
    },
    style::{self, Color, Print},
    terminal, ExecutableCommand, QueueableCommand,
};
use rand::thread_rng;
use tracing::{info, warn};

use arcade_brawl::config::{log_path, GameConfig, HighScoreFile};
use arcade_brawl::dodge::{self, DodgeState, DodgeStatus};
use arcade_brawl::entities::{Archetype, Ruleset};
use arcade_brawl::input::Controls;
use arcade_brawl::round::{self, FightState};
use arcade_brawl::sprite::CharacterSprite;

// ── Simultaneous-input constants ──────────────────────────────────────────────

/// A key is considered "held" if its last press/repeat event arrived within
/// this many milliseconds.  Covers terminals that don't emit key-release
/// events: the OS key-repeat rate is ≥ 15 Hz, so the window is always
/// refreshed before expiry.
const HOLD_WINDOW_MS: u64 = 133;

/// Keys currently held (frame last seen) plus the keys newly pressed this
/// frame.  Attacks trigger on a fresh press; movement and guard on hold.
struct KeyState {
    key_frame: HashMap<KeyCode, u64>,
    pressed: Vec<KeyCode>,
    hold_frames: u64,
}

impl KeyState {
    fn new(fps: u32) -> Self {
        KeyState {
            key_frame: HashMap::new(),
            pressed: Vec::new(),
            hold_frames: (HOLD_WINDOW_MS * fps as u64 / 1000).max(1),
        }
    }

    fn press(&mut self, code: KeyCode, frame: u64) {
        self.key_frame.insert(code, frame);
        self.pressed.push(code);
    }

    fn held(&self, keys: &[KeyCode], frame: u64) -> bool {
        keys.iter().any(|key| {
            self.key_frame
                .get(key)
                .map(|&last| frame.saturating_sub(last) <= self.hold_frames)
                .unwrap_or(false)
        })
    }

    fn just_pressed(&self, keys: &[KeyCode]) -> bool {
        keys.iter().any(|key| self.pressed.contains(key))
    }

    fn directions(&self, frame: u64) -> Controls {
        Controls {
            up: self.held(&[KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W')], frame),
            down: self.held(&[KeyCode::Down, KeyCode::Char('s'), KeyCode::Char('S')], frame),
            left: self.held(&[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')], frame),
            right: self.held(&[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')], frame),
            ..Controls::default()
        }
    }
}

/// What a drained event asks the loop to do besides updating `KeyState`.
enum Signal {
    Quit,
    Paste(String),
}

fn is_quit(code: KeyCode, modifiers: KeyModifiers) -> bool {
    matches!(code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL))
}

/// Drain all pending input events (non-blocking).
fn drain_events(rx: &mpsc::Receiver<Event>, keys: &mut KeyState, frame: u64) -> Vec<Signal> {
    keys.pressed.clear();
    let mut signals = Vec::new();
    while let Ok(ev) = rx.try_recv() {
        match ev {
            Event::Key(KeyEvent { code, kind, modifiers, .. }) => match kind {
                KeyEventKind::Press => {
                    if is_quit(code, modifiers) {
                        signals.push(Signal::Quit);
                    }
                    keys.press(code, frame);
                }
                // Repeat: refresh timestamp so key stays "held"
                KeyEventKind::Repeat => {
                    keys.key_frame.insert(code, frame);
                }
                // Release: remove key immediately (keyboard-enhancement path)
                KeyEventKind::Release => {
                    keys.key_frame.remove(&code);
                }
            },
            Event::Paste(text) => signals.push(Signal::Paste(text)),
            _ => {}
        }
    }
    signals
}

fn pace(frame_start: Instant, frame: Duration) {
    let elapsed = frame_start.elapsed();
    if elapsed < frame {
        thread::sleep(frame - elapsed);
    }
}

// ── Menus ─────────────────────────────────────────────────────────────────────

enum MenuResult {
    Brawl(Ruleset),
    Dodge,
    Quit,
}

fn draw_options<W: Write>(
    out: &mut W,
    title: &str,
    subtitle: Option<String>,
    options: &[(&str, &str, Color, &str)],
    footer: &str,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let (width, height) = terminal::size()?;
    let cx = width / 2;
    let cy = height / 2;

    out.queue(cursor::MoveTo(
        cx.saturating_sub(title.chars().count() as u16 / 2),
        cy.saturating_sub(6),
    ))?;
    out.queue(style::SetForegroundColor(Color::Cyan))?;
    out.queue(Print(title))?;

    if let Some(sub) = subtitle {
        out.queue(cursor::MoveTo(
            cx.saturating_sub(sub.chars().count() as u16 / 2),
            cy.saturating_sub(5),
        ))?;
        out.queue(style::SetForegroundColor(Color::Yellow))?;
        out.queue(Print(&sub))?;
    }

    for (i, (key, label, color, desc)) in options.iter().enumerate() {
        let row = cy.saturating_sub(2) + i as u16;
        out.queue(cursor::MoveTo(cx.saturating_sub(16), row))?;
        out.queue(style::SetForegroundColor(Color::DarkGrey))?;
        out.queue(Print(format!("[{}] ", key)))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(format!("{:<10}", label)))?;
        out.queue(style::SetForegroundColor(Color::DarkGrey))?;
        out.queue(Print(format!(" {}", desc)))?;
    }

    out.queue(cursor::MoveTo(cx.saturating_sub(16), cy + 3))?;
    out.queue(style::SetForegroundColor(Color::DarkGrey))?;
    out.queue(Print(footer))?;

    out.queue(style::ResetColor)?;
    out.flush()
}

/// Block until one of `keys` (or a quit key) is pressed.
fn wait_choice(rx: &mpsc::Receiver<Event>, keys: &[char]) -> Option<char> {
    loop {
        match rx.recv() {
            Ok(Event::Key(KeyEvent { code, modifiers, kind: KeyEventKind::Press, .. })) => {
                if is_quit(code, modifiers) {
                    return None;
                }
                if let KeyCode::Char(c) = code {
                    if keys.contains(&c) {
                        return Some(c);
                    }
                }
            }
            Ok(_) => {}
            Err(_) => return None,
        }
    }
}

fn show_menu<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    high_score: u32,
) -> std::io::Result<MenuResult> {
    let subtitle = (high_score > 0).then(|| format!("Best Dodge Score: {}", high_score));
    draw_options(
        out,
        "★  ARCADE  BRAWL  ★",
        subtitle,
        &[
            ("1", "Brawl", Color::Green, "Classic one-on-one"),
            ("2", "Brawl+", Color::Yellow, "Guard, shots and a final boss"),
            ("3", "Dodge", Color::Red, "Survive the swarm"),
        ],
        "Q : Quit",
    )?;

    Ok(match wait_choice(rx, &['1', '2', '3']) {
        Some('1') => MenuResult::Brawl(Ruleset::Classic),
        Some('2') => MenuResult::Brawl(Ruleset::Extended),
        Some(_) => MenuResult::Dodge,
        None => MenuResult::Quit,
    })
}

fn select_archetype<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    default: Archetype,
) -> std::io::Result<Option<Archetype>> {
    draw_options(
        out,
        "CHOOSE YOUR FIGHTER",
        Some(format!("Default: {:?}", default)),
        &[
            ("1", "Balance", Color::Green, "100 HP, all-rounder"),
            ("2", "Power", Color::Red, "140 HP, heavy hits, slow"),
            ("3", "Speed", Color::Cyan, "80 HP, fast, high jump"),
            ("↵", "Default", Color::White, ""),
        ],
        "Q : Back",
    )?;

    loop {
        match rx.recv() {
            Ok(Event::Key(KeyEvent { code, modifiers, kind: KeyEventKind::Press, .. })) => {
                if is_quit(code, modifiers) {
                    return Ok(None);
                }
                match code {
                    KeyCode::Char('1') => return Ok(Some(Archetype::Balance)),
                    KeyCode::Char('2') => return Ok(Some(Archetype::Power)),
                    KeyCode::Char('3') => return Ok(Some(Archetype::Speed)),
                    KeyCode::Enter => return Ok(Some(default)),
                    _ => {}
                }
            }
            Ok(_) => {}
            Err(_) => return Ok(None),
        }
    }
}

// ── Brawl loop ────────────────────────────────────────────────────────────────

fn fight_controls(keys: &KeyState, ruleset: Ruleset, frame: u64) -> Controls {
    let dirs = keys.directions(frame);
    let down_pressed = keys.just_pressed(&[KeyCode::Down, KeyCode::Char('s'), KeyCode::Char('S')]);
    let (guard, down_punch) = match ruleset {
        Ruleset::Classic => (false, down_pressed),
        Ruleset::Extended => (dirs.down, false),
    };
    Controls {
        punch: keys.just_pressed(&[KeyCode::Char('z'), KeyCode::Char('Z')]) || down_punch,
        kick: keys.just_pressed(&[KeyCode::Char('x'), KeyCode::Char('X')]),
        slide: keys.just_pressed(&[KeyCode::Char(' ')]),
        special: keys.just_pressed(&[KeyCode::Char('c'), KeyCode::Char('C')]),
        guard,
        ..dirs
    }
}

/// Returns `true` → quit program,  `false` → back to menu.
///
/// Input model: a `key_frame` map records the frame number of the last
/// press/repeat event for every key, so several keys can be held at once on
/// terminals with or without key-release events.
fn fight_loop<W: Write>(
    out: &mut W,
    state: &mut FightState,
    rx: &mpsc::Receiver<Event>,
) -> std::io::Result<bool> {
    let mut rng = thread_rng();
    let frame_len = Duration::from_millis(1000 / state.fps as u64);
    let mut keys = KeyState::new(state.fps);
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        for signal in drain_events(rx, &mut keys, frame) {
            if let Signal::Quit = signal {
                return Ok(true);
            }
        }

        if state.is_finished() {
            if keys.just_pressed(&[KeyCode::Char('r'), KeyCode::Char('R')]) {
                let archetype = if state.restart_picks_fighter() {
                    match select_archetype(out, rx, state.archetype)? {
                        Some(archetype) => archetype,
                        None => return Ok(false),
                    }
                } else {
                    state.archetype
                };
                *state = round::restart(state, archetype);
                keys = KeyState::new(state.fps);
            } else if keys.just_pressed(&[KeyCode::Char('m'), KeyCode::Char('M')]) {
                return Ok(false);
            }
        }

        let controls = fight_controls(&keys, state.ruleset, frame);
        *state = round::tick(state, &controls, &mut rng);

        let (width, height) = terminal::size()?;
        display::render_fight(out, state, width, height)?;

        pace(frame_start, frame_len);
    }
}

// ── Dodge loop ────────────────────────────────────────────────────────────────

fn load_sprite(path: &str, current: &CharacterSprite) -> CharacterSprite {
    let path = Path::new(path.trim().trim_matches(|c| c == '\'' || c == '"'));
    match CharacterSprite::load(path) {
        Ok(sprite) => {
            info!(path = %path.display(), "loaded character sprite");
            sprite
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "keeping current sprite");
            current.clone()
        }
    }
}

fn dodge_loop<W: Write>(
    out: &mut W,
    scores: &HighScoreFile,
    fps: u32,
    rx: &mpsc::Receiver<Event>,
) -> std::io::Result<bool> {
    let mut rng = thread_rng();
    let frame_len = Duration::from_millis(1000 / fps.max(1) as u64);
    let mut keys = KeyState::new(fps);
    let mut sprite = CharacterSprite::default();
    let mut state: DodgeState = dodge::init_state(sprite.world_size(), scores.load());
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        for signal in drain_events(rx, &mut keys, frame) {
            match signal {
                Signal::Quit => return Ok(true),
                Signal::Paste(text) if state.status != DodgeStatus::Playing => {
                    sprite = load_sprite(&text, &sprite);
                    state = dodge::resize_player(&state, sprite.world_size());
                }
                Signal::Paste(_) => {}
            }
        }

        if state.status != DodgeStatus::Playing {
            if keys.just_pressed(&[KeyCode::Char(' ')]) {
                state = dodge::start(&state);
            } else if keys.just_pressed(&[KeyCode::Char('m'), KeyCode::Char('M')]) {
                return Ok(false);
            }
        }

        let previous_best = state.high_score;
        state = dodge::tick(&state, &keys.directions(frame), &mut rng);
        if state.high_score > previous_best {
            scores.save(state.high_score);
        }

        let (width, height) = terminal::size()?;
        display::render_dodge(out, &state, &sprite, width, height)?;

        pace(frame_start, frame_len);
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

/// Log to a file; the terminal belongs to the game.
fn init_logging() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let path = log_path();
    let file = match File::create(&path) {
        Ok(file) => file,
        Err(_) => return,
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("arcade_brawl=info"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
        .with(filter)
        .init();
}

fn main() -> std::io::Result<()> {
    init_logging();
    let config = GameConfig::load_or_default();
    info!(?config, "starting");

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableBracketedPaste)?;

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

    let result = run(&mut out, &config, &rx);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(DisableBracketedPaste);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    if let Err(e) = &result {
        warn!(error = %e, "exiting on terminal error");
    }
    result
}

fn run<W: Write>(
    out: &mut W,
    config: &GameConfig,
    rx: &mpsc::Receiver<Event>,
) -> std::io::Result<()> {
    let scores = HighScoreFile::in_home();

    loop {
        let quit = match show_menu(out, rx, scores.load())? {
            MenuResult::Quit => break,
            MenuResult::Brawl(ruleset) => {
                let mut chosen = GameConfig { ruleset, ..config.clone() };
                if ruleset == Ruleset::Extended {
                    match select_archetype(out, rx, config.archetype)? {
                        Some(archetype) => chosen.archetype = archetype,
                        None => continue,
                    }
                }
                let mut state = round::init_fight(&chosen);
                fight_loop(out, &mut state, rx)?
            }
            MenuResult::Dodge => dodge_loop(out, &scores, config.fps, rx)?,
        };
        if quit {
            break;
        }
    }
    info!("bye");
    Ok(())
}
