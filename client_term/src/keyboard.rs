//! Keyboard handling: turns crossterm key events into level state

use std::collections::{HashMap, VecDeque};
use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use game_core::{HostEvent, InputProvider, Key};

/// How long a press counts as held when the terminal never reports releases.
/// Long enough to bridge the gap before the OS key repeat kicks in.
const HOLD_WINDOW: Duration = Duration::from_millis(550);

pub fn map_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Up => Some(Key::Up),
        KeyCode::Down => Some(Key::Down),
        KeyCode::Left => Some(Key::Left),
        KeyCode::Right => Some(Key::Right),
        KeyCode::Esc => Some(Key::Escape),
        KeyCode::Char(' ') => Some(Key::Space),
        KeyCode::Char(c) => Some(Key::Char(c.to_ascii_lowercase())),
        _ => None,
    }
}

/// Which keys are down right now
pub struct KeyState {
    held: HashMap<Key, Instant>,
    reports_release: bool,
}

impl KeyState {
    /// `reports_release` is false on terminals without the keyboard
    /// enhancement protocol; presses then expire after [`HOLD_WINDOW`]
    pub fn new(reports_release: bool) -> Self {
        Self {
            held: HashMap::new(),
            reports_release,
        }
    }

    /// Fold one key event into the held set, queueing discrete signals.
    ///
    /// Ctrl-C is the only key that quits on its own; the configured quit
    /// key arrives as a plain `KeyDown` and is matched by the frame loop.
    pub fn apply(&mut self, event: KeyEvent, pending: &mut VecDeque<HostEvent>) {
        if event.modifiers.contains(KeyModifiers::CONTROL) && event.code == KeyCode::Char('c') {
            pending.push_back(HostEvent::Quit);
            return;
        }
        let Some(key) = map_key(event.code) else {
            return;
        };

        match event.kind {
            KeyEventKind::Press => {
                self.held.insert(key, Instant::now());
                pending.push_back(HostEvent::KeyDown(key));
            }
            KeyEventKind::Repeat => {
                self.held.insert(key, Instant::now());
            }
            KeyEventKind::Release => {
                self.held.remove(&key);
            }
        }
    }

    /// Read every queued terminal event without blocking
    pub fn pump(&mut self, pending: &mut VecDeque<HostEvent>) -> io::Result<()> {
        while event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Key(key) => self.apply(key, pending),
                Event::Resize(cols, rows) => {
                    log::warn!("Terminal resized to {cols}x{rows}; restart to rescale")
                }
                _ => {}
            }
        }
        Ok(())
    }
}

impl InputProvider for KeyState {
    fn is_held(&self, key: Key) -> bool {
        match self.held.get(&key) {
            Some(pressed) => self.reports_release || pressed.elapsed() < HOLD_WINDOW,
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn key(code: KeyCode, kind: KeyEventKind) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn test_map_key_lowercases() {
        assert_eq!(map_key(KeyCode::Char('W')), Some(Key::Char('w')));
        assert_eq!(map_key(KeyCode::Esc), Some(Key::Escape));
        assert_eq!(map_key(KeyCode::F(1)), None);
    }

    #[test]
    fn test_press_and_release() {
        let mut keys = KeyState::new(true);
        let mut pending = VecDeque::new();

        keys.apply(key(KeyCode::Up, KeyEventKind::Press), &mut pending);
        assert!(keys.is_held(Key::Up));
        assert_eq!(pending.pop_front(), Some(HostEvent::KeyDown(Key::Up)));

        keys.apply(key(KeyCode::Up, KeyEventKind::Release), &mut pending);
        assert!(!keys.is_held(Key::Up));
        assert!(pending.is_empty());
    }

    #[test]
    fn test_press_expires_without_release_reports() {
        let mut keys = KeyState::new(false);
        let mut pending = VecDeque::new();
        keys.apply(key(KeyCode::Char('s'), KeyEventKind::Press), &mut pending);
        assert!(keys.is_held(Key::Char('s')));

        keys.held.insert(Key::Char('s'), Instant::now() - HOLD_WINDOW * 2);
        assert!(!keys.is_held(Key::Char('s')));
    }

    #[test]
    fn test_ctrl_c_quits() {
        let mut keys = KeyState::new(true);
        let mut pending = VecDeque::new();
        let mut ctrl_c = key(KeyCode::Char('c'), KeyEventKind::Press);
        ctrl_c.modifiers = KeyModifiers::CONTROL;

        keys.apply(ctrl_c, &mut pending);

        assert_eq!(pending, VecDeque::from([HostEvent::Quit]));
        assert!(!keys.is_held(Key::Char('c')));
    }

    #[test]
    fn test_q_is_an_ordinary_key() {
        let mut keys = KeyState::new(true);
        let mut pending = VecDeque::new();

        keys.apply(key(KeyCode::Char('q'), KeyEventKind::Press), &mut pending);

        assert_eq!(pending, VecDeque::from([HostEvent::KeyDown(Key::Char('q'))]));
        assert!(keys.is_held(Key::Char('q')));
    }

    #[test]
    fn test_paddle_bound_to_q_keeps_playing() {
        use game_core::headless::{MonoText, RecordingSurface};
        use game_core::{Config, FrameOutcome, Match, Side};

        let config =
            Config::from_json(r#"{ "left_keys": { "up": { "char": "q" }, "down": { "char": "a" } } }"#)
                .unwrap();
        let mut game = Match::new(config).unwrap();
        let mut surface = RecordingSurface::new(1280, 720);
        let mut keys = KeyState::new(true);
        let mut pending = VecDeque::new();

        keys.apply(key(KeyCode::Char('q'), KeyEventKind::Press), &mut pending);
        let outcome = game.run_frame(&mut surface, &mut MonoText, &keys, &mut pending);

        assert_eq!(outcome, FrameOutcome::Continue);
        assert!(game.paddle(Side::Left).unwrap().y < 285.0);
    }
}
