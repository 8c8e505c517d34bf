//! List screen: cursor navigation over a [`Menu`] until an entry is chosen.

use embassy_time::Duration;

use crate::config::INPUT_TICK_MS;
use crate::input::InputSource;
use crate::ui::input_logic::{list_command, ListCommand};
use crate::ui::menu::Menu;
use crate::ui::Render;

/// Run a list screen until the user presses ACCEPT.
///
/// The menu is drawn on entry and again after every cursor move; events
/// that leave the cursor where it was do not redraw. There is no way to
/// back out: a screen that needs one carries its own back entry.
///
/// Consumes the menu and returns the chosen entry's action, dropping all
/// other entries. Returns `None` only for an empty menu.
pub async fn choose<A, I, R>(mut menu: Menu<A>, input: &mut I, render: &mut R) -> Option<A>
where
    I: InputSource,
    R: Render,
{
    let tick = Duration::from_millis(INPUT_TICK_MS);

    if menu.is_empty() {
        render.draw_menu(&menu);
        return None;
    }

    let mut dirty = true;
    loop {
        if dirty {
            render.draw_menu(&menu);
            dirty = false;
        }

        let Some(event) = input.next_event(tick).await else {
            continue;
        };
        match list_command(event) {
            Some(ListCommand::Next) => dirty = menu.navigate_next(),
            Some(ListCommand::Previous) => dirty = menu.navigate_previous(),
            Some(ListCommand::Choose) => break,
            None => {}
        }
    }

    #[cfg(feature = "defmt")]
    defmt::info!("{}: chose entry {}", menu.title(), menu.position());

    menu.into_selected()
}
