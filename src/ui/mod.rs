//! User interface subsystem - menus, on-screen keyboard, rendering.
//!
//! Every screen is a cooperative loop that owns the display until it
//! returns: a list screen ([`list::choose`]) hands back the chosen entry's
//! action, the text prompt ([`prompt::text_prompt`]) reports whether its
//! input was accepted. Screens nest strictly, never run side by side.
//!
//! ## Components
//!
//! - **Menu**: titled entry list with a saturating cursor
//! - **Keyboard**: on-screen key grid editor
//! - **Display**: ILI9341 320×240 rendering via `embedded-graphics`

pub mod display;
pub mod input_logic;
pub mod keyboard;
pub mod list;
pub mod menu;
pub mod prompt;
pub mod text;

use keyboard::Keyboard;
use menu::Menu;

/// Title and hint line of a keyboard dialog.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Dialog<'a> {
    pub title: &'a str,
    pub hint: &'a str,
}

/// Sink for frames. Every call draws and presents one complete frame.
pub trait Render {
    fn draw_menu<A>(&mut self, menu: &Menu<A>);

    fn draw_keyboard<const N: usize>(&mut self, dialog: &Dialog<'_>, keyboard: &Keyboard<N>);

    /// Full-screen status text. `\n` starts a new line.
    fn draw_message(&mut self, message: &str);
}
