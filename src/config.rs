//! Application-wide constants and compile-time configuration.
//!
//! Timing parameters, buffer capacities, storage layout and screen
//! geometry live here so they can be tuned in one place.

// Input

/// Poll interval of every interaction loop (ms). One display frame at ~60 Hz.
pub const INPUT_TICK_MS: u64 = 16;

/// Depth of the button event queue between the input task and the UI.
pub const BUTTON_QUEUE_DEPTH: usize = 10;

/// Delay before a held key starts repeating (ms).
pub const KEY_REPEAT_DELAY_MS: u64 = 400;

/// Interval between repeats of a held key (ms).
pub const KEY_REPEAT_INTERVAL_MS: u64 = 75;

// Menus

/// Maximum number of entries in a single menu (apps + static entries).
pub const MAX_MENU_ITEMS: usize = 32;

/// Maximum menu label length in bytes. Longer labels are truncated.
pub const MENU_LABEL_MAX_LEN: usize = 48;

// Text entry

/// Capacity of the on-screen keyboard edit buffer (bytes).
pub const TEXT_INPUT_CAPACITY: usize = 64;

/// Maximum stored SSID length (802.11 limit).
pub const WIFI_SSID_MAX_LEN: usize = 32;

/// Maximum stored WiFi password length.
pub const WIFI_PASSWORD_MAX_LEN: usize = 32;

/// Capacity of a rendered status message.
pub const MESSAGE_MAX_LEN: usize = 300;

// Settings storage
//
// The settings partition on the ESP32 flash map (see partitions.csv of the
// board crate). Two sectors are the minimum `sequential-storage` needs.

/// Flash sector size (4 KB on the ESP32 SPI flash).
pub const FLASH_SECTOR_SIZE: u32 = 4096;

/// Byte offset of the settings region inside the flash device.
pub const SETTINGS_FLASH_START: u32 = 0x9000;

/// Number of sectors reserved for settings.
pub const SETTINGS_FLASH_SECTORS: u32 = 4;

/// Largest serialized setting value.
pub const SETTINGS_MAX_VALUE_LEN: usize = 64;

// Display (ILI9341, landscape)

pub const DISPLAY_WIDTH: u32 = 320;
pub const DISPLAY_HEIGHT: u32 = 240;

/// Margin between the screen edge and the keyboard dialog.
pub const DIALOG_MARGIN: i32 = 30;

/// Height of the keyboard dialog title bar.
pub const DIALOG_TITLE_HEIGHT: u32 = 20;

/// Height of the keyboard dialog hint line.
pub const DIALOG_HINT_HEIGHT: u32 = 14;
