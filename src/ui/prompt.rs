//! Modal text prompt: runs the on-screen keyboard until accept or HOME.

use embassy_time::{Duration, Instant};
use heapless::String;

use crate::config::{INPUT_TICK_MS, TEXT_INPUT_CAPACITY};
use crate::input::{Control, InputSource};
use crate::ui::input_logic::keyboard_key;
use crate::ui::keyboard::Keyboard;
use crate::ui::text::copy_truncated;
use crate::ui::{Dialog, Render};

/// Edit `output` with the on-screen keyboard.
///
/// The editor starts with the current content of `output`. Unlike list
/// screens, both press and release edges reach the editor so held keys
/// repeat and the pressed key stays highlighted.
///
/// Returns `true` once the accept key is activated; `output` then holds
/// the edited text, truncated to its capacity. Pressing HOME returns
/// `false` and leaves `output` untouched.
pub async fn text_prompt<I, R, const M: usize>(
    input: &mut I,
    render: &mut R,
    dialog: &Dialog<'_>,
    output: &mut String<M>,
) -> bool
where
    I: InputSource,
    R: Render,
{
    let tick = Duration::from_millis(INPUT_TICK_MS);
    let mut keyboard: Keyboard<TEXT_INPUT_CAPACITY> = Keyboard::new(output.as_str());

    loop {
        keyboard.tick(Instant::now());
        if keyboard.take_dirty() {
            render.draw_keyboard(dialog, &keyboard);
        }

        if keyboard.is_accepted() {
            if copy_truncated(keyboard.content(), output) {
                #[cfg(feature = "defmt")]
                defmt::debug!("{}: input truncated to {} bytes", dialog.title, M);
            }
            return true;
        }

        let Some(event) = input.next_event(tick).await else {
            continue;
        };
        match keyboard_key(event.control) {
            Some(key) if event.pressed => keyboard.press(key, Instant::now()),
            Some(key) => keyboard.release(key),
            None if event.control == Control::Home && event.pressed => {
                #[cfg(feature = "defmt")]
                defmt::info!("{}: cancelled", dialog.title);
                return false;
            }
            None => {}
        }
    }
}
