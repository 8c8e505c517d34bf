//! Collaborator doubles shared by the integration tests.

#![allow(dead_code)]

use std::collections::{BTreeMap, VecDeque};

use badge_launcher::apps::AppHandle;
use badge_launcher::input::{Control, InputEvent, InputSource};
use badge_launcher::launcher::Platform;
use badge_launcher::storage::{SettingKey, SettingsStore};
use badge_launcher::ui::keyboard::Keyboard;
use badge_launcher::ui::menu::Menu;
use badge_launcher::ui::text::copy_truncated;
use badge_launcher::ui::{Dialog, Render};
use badge_launcher::Error;
use embassy_time::Duration;

/// Replays a fixed event script. `None` entries are poll timeouts.
pub struct ScriptedInput {
    script: VecDeque<Option<InputEvent>>,
}

impl ScriptedInput {
    pub fn new(events: impl IntoIterator<Item = InputEvent>) -> Self {
        Self::with_idle_ticks(events, 0)
    }

    /// Insert `idle` timeouts before every event.
    pub fn with_idle_ticks(events: impl IntoIterator<Item = InputEvent>, idle: usize) -> Self {
        let mut script = VecDeque::new();
        for event in events {
            script.extend(std::iter::repeat(None).take(idle));
            script.push_back(Some(event));
        }
        Self { script }
    }

    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl InputSource for ScriptedInput {
    async fn next_event(&mut self, _timeout: Duration) -> Option<InputEvent> {
        match self.script.pop_front() {
            Some(slot) => slot,
            None => panic!("input script exhausted"),
        }
    }
}

pub fn press(control: Control) -> Vec<InputEvent> {
    vec![InputEvent::press(control)]
}

/// Press and release.
pub fn tap(control: Control) -> Vec<InputEvent> {
    vec![InputEvent::press(control), InputEvent::release(control)]
}

/// Move the list cursor down `steps` times, then choose.
pub fn pick(steps: usize) -> Vec<InputEvent> {
    let mut events: Vec<_> = (0..steps).flat_map(|_| press(Control::Next)).collect();
    events.extend(press(Control::Accept));
    events
}

/// Walk the keyboard cursor from the top-left key to the accept key and
/// activate it.
pub fn keyboard_accept() -> Vec<InputEvent> {
    [
        Control::Next,
        Control::Next,
        Control::Next,
        Control::Left,
        Control::Accept,
    ]
    .into_iter()
    .flat_map(tap)
    .collect()
}

#[derive(Default)]
pub struct RecordingRender {
    pub menu_titles: Vec<String>,
    pub menu_positions: Vec<usize>,
    pub keyboard_titles: Vec<String>,
    pub keyboard_frames: Vec<String>,
    pub keyboard_pressed: Vec<bool>,
    pub messages: Vec<String>,
}

impl Render for RecordingRender {
    fn draw_menu<A>(&mut self, menu: &Menu<A>) {
        self.menu_titles.push(menu.title().to_string());
        self.menu_positions.push(menu.position());
    }

    fn draw_keyboard<const N: usize>(&mut self, dialog: &Dialog<'_>, keyboard: &Keyboard<N>) {
        self.keyboard_titles.push(dialog.title.to_string());
        self.keyboard_frames.push(keyboard.content().to_string());
        self.keyboard_pressed.push(keyboard.is_pressed());
    }

    fn draw_message(&mut self, message: &str) {
        self.messages.push(message.to_string());
    }
}

impl RecordingRender {
    /// Titles of the keyboard dialogs in the order they were opened.
    pub fn dialogs_opened(&self) -> Vec<&str> {
        let mut opened: Vec<&str> = Vec::new();
        for title in &self.keyboard_titles {
            if opened.last() != Some(&title.as_str()) {
                opened.push(title);
            }
        }
        opened
    }
}

/// Settings store in memory, keyed like the flash store.
#[derive(Default)]
pub struct MemorySettings {
    pub(crate) values: BTreeMap<u8, String>,
    pub fail_stores: bool,
}

impl MemorySettings {
    pub fn with(mut self, key: SettingKey, value: &str) -> Self {
        self.values.insert(key.id(), value.to_string());
        self
    }

    pub fn get(&self, key: SettingKey) -> Option<&str> {
        self.values.get(&key.id()).map(String::as_str)
    }
}

impl SettingsStore for MemorySettings {
    async fn load<const N: usize>(
        &mut self,
        key: SettingKey,
        out: &mut heapless::String<N>,
    ) -> Result<bool, Error> {
        match self.values.get(&key.id()) {
            Some(value) => {
                copy_truncated(value, out);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn store(&mut self, key: SettingKey, value: &str) -> Result<(), Error> {
        if self.fail_stores {
            return Err(Error::Storage);
        }
        self.values.insert(key.id(), value.to_string());
        Ok(())
    }
}

/// Records which leaf actions ran.
#[derive(Default)]
pub struct RecordingPlatform {
    pub calls: Vec<&'static str>,
    pub launched: Vec<AppHandle>,
}

impl Platform for RecordingPlatform {
    async fn launch_app(&mut self, app: AppHandle) {
        self.calls.push("app");
        self.launched.push(app);
    }

    async fn run_installer(&mut self) {
        self.calls.push("installer");
    }

    async fn firmware_update(&mut self) {
        self.calls.push("firmware update");
    }

    async fn fpga_test(&mut self) {
        self.calls.push("fpga test");
    }

    async fn wifi_scan(&mut self) {
        self.calls.push("wifi scan");
    }
}
