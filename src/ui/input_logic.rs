use crate::input::{Control, InputEvent};
use crate::ui::keyboard::KeyboardKey;

/// Move selection cursor one item up.
pub fn select_prev(selected: usize) -> usize {
    selected.saturating_sub(1)
}

/// Move selection cursor one item down if another item exists.
pub fn select_next(selected: usize, item_count: usize) -> usize {
    if selected + 1 < item_count {
        selected + 1
    } else {
        selected
    }
}

/// What a list screen does with an input event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListCommand {
    Next,
    Previous,
    Choose,
}

/// Classify an event for list navigation.
///
/// Only press edges of the joystick up/down and ACCEPT act on a list;
/// releases and every other control are ignored.
pub fn list_command(event: InputEvent) -> Option<ListCommand> {
    if !event.pressed {
        return None;
    }
    match event.control {
        Control::Next => Some(ListCommand::Next),
        Control::Previous => Some(ListCommand::Previous),
        Control::Accept => Some(ListCommand::Choose),
        _ => None,
    }
}

/// Map a control to its keyboard editor command.
///
/// HOME has no editor command: it closes the prompt.
pub fn keyboard_key(control: Control) -> Option<KeyboardKey> {
    match control {
        Control::Next => Some(KeyboardKey::Down),
        Control::Previous => Some(KeyboardKey::Up),
        Control::Left => Some(KeyboardKey::Left),
        Control::Right => Some(KeyboardKey::Right),
        Control::Shift => Some(KeyboardKey::Shift),
        Control::Accept => Some(KeyboardKey::CharSelect),
        Control::Back => Some(KeyboardKey::DeleteBefore),
        Control::Select => Some(KeyboardKey::ModeSelect),
        Control::Home => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_boundaries() {
        assert_eq!(select_prev(0), 0);
        assert_eq!(select_prev(3), 2);
        assert_eq!(select_next(0, 1), 0);
        assert_eq!(select_next(0, 3), 1);
        assert_eq!(select_next(2, 3), 2);
        assert_eq!(select_next(0, 0), 0);
    }

    #[test]
    fn releases_are_ignored() {
        for control in [Control::Next, Control::Previous, Control::Accept] {
            assert_eq!(list_command(InputEvent::release(control)), None);
        }
    }

    #[test]
    fn press_edges_map_to_commands() {
        assert_eq!(
            list_command(InputEvent::press(Control::Next)),
            Some(ListCommand::Next)
        );
        assert_eq!(
            list_command(InputEvent::press(Control::Previous)),
            Some(ListCommand::Previous)
        );
        assert_eq!(
            list_command(InputEvent::press(Control::Accept)),
            Some(ListCommand::Choose)
        );
    }

    #[test]
    fn other_controls_are_ignored() {
        for control in [
            Control::Left,
            Control::Right,
            Control::Shift,
            Control::Back,
            Control::Select,
            Control::Home,
        ] {
            assert_eq!(list_command(InputEvent::press(control)), None);
        }
    }

    #[test]
    fn every_control_but_home_drives_the_keyboard() {
        assert_eq!(keyboard_key(Control::Home), None);
        assert_eq!(keyboard_key(Control::Accept), Some(KeyboardKey::CharSelect));
        assert_eq!(keyboard_key(Control::Back), Some(KeyboardKey::DeleteBefore));
        assert_eq!(keyboard_key(Control::Select), Some(KeyboardKey::ModeSelect));
        assert_eq!(keyboard_key(Control::Shift), Some(KeyboardKey::Shift));
        assert_eq!(keyboard_key(Control::Next), Some(KeyboardKey::Down));
        assert_eq!(keyboard_key(Control::Previous), Some(KeyboardKey::Up));
    }
}
