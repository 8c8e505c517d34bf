//! On-screen keyboard editor.
//!
//! A four-row key grid navigated with the joystick. The highlighted key is
//! activated with CHARSELECT; dedicated controls delete, toggle shift and
//! switch between the letter and number boards. The grid also carries
//! shift, backspace, mode, space and accept keys so the whole editor can
//! be driven from the joystick alone.
//!
//! The editor is a pure state machine: the prompt loop feeds it key edges
//! and ticks with the current time and redraws whenever it reports dirty.
//! Held navigation and delete keys repeat after [`KEY_REPEAT_DELAY_MS`].

use embassy_time::{Duration, Instant};
use heapless::String;

use crate::config::{KEY_REPEAT_DELAY_MS, KEY_REPEAT_INTERVAL_MS};
use crate::ui::text::copy_truncated;

/// Editor commands, one per physical control.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KeyboardKey {
    Up,
    Down,
    Left,
    Right,
    Shift,
    /// Activate the highlighted key.
    CharSelect,
    /// Delete the character before the text cursor.
    DeleteBefore,
    /// Switch between letters and numbers.
    ModeSelect,
}

impl KeyboardKey {
    fn repeats(self) -> bool {
        matches!(
            self,
            KeyboardKey::Up
                | KeyboardKey::Down
                | KeyboardKey::Left
                | KeyboardKey::Right
                | KeyboardKey::DeleteBefore
        )
    }
}

/// A key on the on-screen grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Shift,
    Backspace,
    Mode,
    Space,
    Accept,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Board {
    Letters,
    Numbers,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ShiftState {
    Off,
    /// Applies to the next character only.
    Once,
    Locked,
}

impl ShiftState {
    fn cycle(self) -> Self {
        match self {
            ShiftState::Off => ShiftState::Once,
            ShiftState::Once => ShiftState::Locked,
            ShiftState::Locked => ShiftState::Off,
        }
    }

    pub fn is_active(self) -> bool {
        self != ShiftState::Off
    }
}

pub const ROWS: usize = 4;

// Grid layouts. Control codes stand for the special keys:
// 0x01 shift, 0x02 backspace, 0x03 mode, 0x04 accept, ' ' space.
const LETTERS: [&str; ROWS] = [
    "qwertyuiop",
    "asdfghjkl",
    "\u{1}zxcvbnm\u{2}",
    "\u{3}, .\u{4}",
];
const NUMBERS: [&str; ROWS] = [
    "1234567890",
    "@#$_&-+()/",
    "\u{1}*\"':;!?\u{2}",
    "\u{3}, .\u{4}",
];
const SYMBOLS: [&str; ROWS] = [
    "~`|[]{}<>",
    "%^=\\$&*-+",
    "\u{1}.,?!'\"\u{2}",
    "\u{3}, .\u{4}",
];

fn decode(c: char) -> Key {
    match c {
        '\u{1}' => Key::Shift,
        '\u{2}' => Key::Backspace,
        '\u{3}' => Key::Mode,
        '\u{4}' => Key::Accept,
        ' ' => Key::Space,
        c => Key::Char(c),
    }
}

#[derive(Clone, Copy, Debug)]
struct Held {
    key: KeyboardKey,
    since: Instant,
    last_repeat: Instant,
}

/// Keyboard editor with an edit buffer of `N` bytes.
pub struct Keyboard<const N: usize> {
    content: String<N>,
    board: Board,
    shift: ShiftState,
    key_x: usize,
    key_y: usize,
    held: Option<Held>,
    highlight: bool,
    dirty: bool,
    accepted: bool,
}

impl<const N: usize> Keyboard<N> {
    /// Create an editor seeded with `initial` (truncated to `N`).
    pub fn new(initial: &str) -> Self {
        let mut content = String::new();
        copy_truncated(initial, &mut content);
        Self {
            content,
            board: Board::Letters,
            shift: ShiftState::Off,
            key_x: 0,
            key_y: 0,
            held: None,
            highlight: false,
            dirty: true,
            accepted: false,
        }
    }

    pub fn content(&self) -> &str {
        self.content.as_str()
    }

    pub fn board(&self) -> Board {
        self.board
    }

    pub fn shift(&self) -> ShiftState {
        self.shift
    }

    /// Grid position `(column, row)` of the highlighted key.
    pub fn selection(&self) -> (usize, usize) {
        (self.key_x, self.key_y)
    }

    /// Whether the highlighted key is currently held down.
    pub fn is_pressed(&self) -> bool {
        self.highlight
    }

    /// Set once the accept key has been activated.
    pub fn is_accepted(&self) -> bool {
        self.accepted
    }

    /// Returns whether the editor changed since the last call and clears
    /// the flag.
    pub fn take_dirty(&mut self) -> bool {
        core::mem::replace(&mut self.dirty, false)
    }

    fn layout(&self) -> &'static [&'static str; ROWS] {
        match (self.board, self.shift.is_active()) {
            (Board::Letters, _) => &LETTERS,
            (Board::Numbers, false) => &NUMBERS,
            (Board::Numbers, true) => &SYMBOLS,
        }
    }

    /// Number of keys in `row` of the current layout.
    pub fn row_len(&self, row: usize) -> usize {
        self.layout().get(row).map_or(0, |r| r.chars().count())
    }

    /// Key at `(column, row)` of the current layout.
    pub fn key_at(&self, column: usize, row: usize) -> Option<Key> {
        let c = self.layout().get(row)?.chars().nth(column)?;
        Some(decode(c))
    }

    /// The character a `Key::Char` inserts with the current shift state.
    pub fn display_char(&self, c: char) -> char {
        if self.board == Board::Letters && self.shift.is_active() {
            c.to_ascii_uppercase()
        } else {
            c
        }
    }

    /// Handle the press edge of a control.
    pub fn press(&mut self, key: KeyboardKey, now: Instant) {
        if key.repeats() {
            self.held = Some(Held {
                key,
                since: now,
                last_repeat: now,
            });
        }
        match key {
            KeyboardKey::CharSelect => {
                self.highlight = true;
                self.dirty = true;
                self.activate();
            }
            KeyboardKey::Shift => self.cycle_shift(),
            KeyboardKey::ModeSelect => self.toggle_board(),
            _ => self.apply(key),
        }
    }

    /// Handle the release edge of a control.
    pub fn release(&mut self, key: KeyboardKey) {
        if self.held.is_some_and(|h| h.key == key) {
            self.held = None;
        }
        if key == KeyboardKey::CharSelect && self.highlight {
            self.highlight = false;
            self.dirty = true;
        }
    }

    /// Advance timers: repeats a held navigation or delete key.
    pub fn tick(&mut self, now: Instant) {
        let Some(mut held) = self.held else {
            return;
        };
        let delay = Duration::from_millis(KEY_REPEAT_DELAY_MS);
        let interval = Duration::from_millis(KEY_REPEAT_INTERVAL_MS);
        if now.saturating_duration_since(held.since) < delay {
            return;
        }
        if held.last_repeat != held.since
            && now.saturating_duration_since(held.last_repeat) < interval
        {
            return;
        }
        held.last_repeat = now;
        self.held = Some(held);
        self.apply(held.key);
    }

    fn apply(&mut self, key: KeyboardKey) {
        match key {
            KeyboardKey::Up => {
                if self.key_y > 0 {
                    self.key_y -= 1;
                    self.clamp_column();
                    self.dirty = true;
                }
            }
            KeyboardKey::Down => {
                if self.key_y + 1 < ROWS {
                    self.key_y += 1;
                    self.clamp_column();
                    self.dirty = true;
                }
            }
            KeyboardKey::Left => {
                let len = self.row_len(self.key_y);
                self.key_x = if self.key_x == 0 { len - 1 } else { self.key_x - 1 };
                self.dirty = true;
            }
            KeyboardKey::Right => {
                let len = self.row_len(self.key_y);
                self.key_x = (self.key_x + 1) % len;
                self.dirty = true;
            }
            KeyboardKey::DeleteBefore => self.delete_before(),
            KeyboardKey::Shift | KeyboardKey::CharSelect | KeyboardKey::ModeSelect => {}
        }
    }

    fn activate(&mut self) {
        let Some(key) = self.key_at(self.key_x, self.key_y) else {
            return;
        };
        match key {
            Key::Char(c) => {
                let c = self.display_char(c);
                self.insert(c);
                if self.shift == ShiftState::Once {
                    self.shift = ShiftState::Off;
                    self.clamp_column();
                }
            }
            Key::Space => self.insert(' '),
            Key::Shift => self.cycle_shift(),
            Key::Backspace => self.delete_before(),
            Key::Mode => self.toggle_board(),
            Key::Accept => self.accepted = true,
        }
    }

    fn insert(&mut self, c: char) {
        // A full buffer swallows further input.
        if self.content.push(c).is_ok() {
            self.dirty = true;
        }
    }

    fn delete_before(&mut self) {
        if self.content.pop().is_some() {
            self.dirty = true;
        }
    }

    fn cycle_shift(&mut self) {
        self.shift = self.shift.cycle();
        self.clamp_column();
        self.dirty = true;
    }

    fn toggle_board(&mut self) {
        self.board = match self.board {
            Board::Letters => Board::Numbers,
            Board::Numbers => Board::Letters,
        };
        self.shift = ShiftState::Off;
        self.clamp_column();
        self.dirty = true;
    }

    fn clamp_column(&mut self) {
        let len = self.row_len(self.key_y);
        if self.key_x >= len {
            self.key_x = len - 1;
        }
    }
}
