//! Screen sequencing: main menu, WiFi settings and the actions behind them.
//!
//! Every pass through the main menu rebuilds it from the app catalog, so
//! apps installed by a leaf action show up when control comes back.

use core::fmt::Write as _;
use core::future::Future;

use heapless::String;

use crate::apps::{entries, AppCatalog, AppHandle};
use crate::config::{MAX_MENU_ITEMS, MESSAGE_MAX_LEN, WIFI_PASSWORD_MAX_LEN, WIFI_SSID_MAX_LEN};
use crate::input::InputSource;
use crate::storage::{load_or_empty, SettingKey, SettingsStore};
use crate::ui::list::choose;
use crate::ui::menu::Menu;
use crate::ui::prompt::text_prompt;
use crate::ui::{Dialog, Render};

/// Static entries appended after the apps.
const MAIN_STATIC_ENTRIES: [(&str, MainAction); 4] = [
    ("Hatchery", MainAction::Installer),
    ("WiFi settings", MainAction::Settings),
    ("Firmware update", MainAction::FirmwareUpdate),
    ("FPGA test", MainAction::FpgaTest),
];

const WIFI_ENTRIES: [(&str, SettingsAction); 4] = [
    ("Add by scan...", SettingsAction::WifiScan),
    ("Add manually...", SettingsAction::WifiManual),
    ("List known networks", SettingsAction::WifiList),
    ("< Back", SettingsAction::Back),
];

// Both menus' fixed entries always fit.
const _: () = assert!(MAIN_STATIC_ENTRIES.len() <= MAX_MENU_ITEMS);
const _: () = assert!(WIFI_ENTRIES.len() <= MAX_MENU_ITEMS);

pub const SSID_DIALOG: Dialog<'static> = Dialog {
    title: "WiFi SSID",
    hint: "Press HOME to exit",
};

pub const PASSWORD_DIALOG: Dialog<'static> = Dialog {
    title: "WiFi password",
    hint: "Press HOME to exit",
};

/// Payload of a main menu entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MainAction {
    App(AppHandle),
    Installer,
    Settings,
    FirmwareUpdate,
    FpgaTest,
}

/// Payload of a WiFi settings entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SettingsAction {
    WifiScan,
    WifiManual,
    WifiList,
    Back,
}

/// Build the main menu: installed apps in catalog order, then the static
/// entries. Apps that do not fit are left out so the static entries
/// always remain.
pub fn build_main_menu<C: AppCatalog + ?Sized>(catalog: &C) -> Menu<MainAction> {
    let mut menu = Menu::new("Main menu");
    let app_slots = MAX_MENU_ITEMS - MAIN_STATIC_ENTRIES.len();

    for (index, (handle, name)) in entries(catalog).enumerate() {
        if index == app_slots {
            #[cfg(feature = "defmt")]
            defmt::warn!("main menu full, skipping remaining apps");
            break;
        }
        let pushed = menu.push(name, MainAction::App(handle));
        debug_assert!(pushed.is_ok());
    }
    // `app_slots` leaves exactly enough room for these.
    for (label, action) in MAIN_STATIC_ENTRIES {
        let pushed = menu.push(label, action);
        debug_assert!(pushed.is_ok());
    }
    menu
}

pub fn build_wifi_menu() -> Menu<SettingsAction> {
    let mut menu = Menu::new("WiFi settings");
    for (label, action) in WIFI_ENTRIES {
        let pushed = menu.push(label, action);
        debug_assert!(pushed.is_ok());
    }
    menu
}

/// Leaf actions handled outside the launcher.
///
/// Each call owns the device until it returns; the launcher then shows a
/// freshly built menu.
pub trait Platform {
    /// Boot an installed app. Usually does not return.
    fn launch_app(&mut self, app: AppHandle) -> impl Future<Output = ()>;

    fn run_installer(&mut self) -> impl Future<Output = ()>;

    fn firmware_update(&mut self) -> impl Future<Output = ()>;

    fn fpga_test(&mut self) -> impl Future<Output = ()>;

    fn wifi_scan(&mut self) -> impl Future<Output = ()>;
}

/// The launcher and its collaborators.
pub struct Launcher<I, R, S, C, P> {
    input: I,
    render: R,
    settings: S,
    catalog: C,
    platform: P,
}

impl<I, R, S, C, P> Launcher<I, R, S, C, P>
where
    I: InputSource,
    R: Render,
    S: SettingsStore,
    C: AppCatalog,
    P: Platform,
{
    pub fn new(input: I, render: R, settings: S, catalog: C, platform: P) -> Self {
        Self {
            input,
            render,
            settings,
            catalog,
            platform,
        }
    }

    pub fn render(&self) -> &R {
        &self.render
    }

    pub fn settings(&self) -> &S {
        &self.settings
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    /// Run the main menu forever. There is no way out of it.
    pub async fn run(&mut self) {
        loop {
            self.run_once().await;
        }
    }

    /// Show the main menu once and carry out the chosen action.
    pub async fn run_once(&mut self) -> Option<MainAction> {
        let menu = build_main_menu(&self.catalog);
        let action = choose(menu, &mut self.input, &mut self.render).await?;

        match action {
            MainAction::App(app) => self.platform.launch_app(app).await,
            MainAction::Installer => {
                self.render.draw_message("INSTALLER");
                self.platform.run_installer().await;
            }
            MainAction::Settings => self.wifi_settings().await,
            MainAction::FirmwareUpdate => {
                self.render.draw_message("Firmware update...");
                self.platform.firmware_update().await;
            }
            MainAction::FpgaTest => {
                self.render.draw_message("FPGA TEST");
                self.platform.fpga_test().await;
            }
        }
        Some(action)
    }

    /// WiFi settings screen; returns on "< Back".
    pub async fn wifi_settings(&mut self) {
        loop {
            let Some(action) = choose(build_wifi_menu(), &mut self.input, &mut self.render).await
            else {
                return;
            };
            match action {
                SettingsAction::WifiScan => self.platform.wifi_scan().await,
                SettingsAction::WifiManual => {
                    self.edit_wifi().await;
                }
                SettingsAction::WifiList => self.show_wifi().await,
                SettingsAction::Back => return,
            }
        }
    }

    /// Edit SSID then password, seeded with the stored values. Both are
    /// stored only if both prompts are accepted.
    ///
    /// Returns `true` if new credentials were stored.
    pub async fn edit_wifi(&mut self) -> bool {
        let mut ssid: String<WIFI_SSID_MAX_LEN> =
            load_or_empty(&mut self.settings, SettingKey::WifiSsid).await;
        let mut password: String<WIFI_PASSWORD_MAX_LEN> =
            load_or_empty(&mut self.settings, SettingKey::WifiPassword).await;

        let accepted = text_prompt(&mut self.input, &mut self.render, &SSID_DIALOG, &mut ssid)
            .await
            && text_prompt(
                &mut self.input,
                &mut self.render,
                &PASSWORD_DIALOG,
                &mut password,
            )
            .await;
        if !accepted {
            self.render.draw_message("Canceled");
            return false;
        }

        let mut stored = self.settings.store(SettingKey::WifiSsid, &ssid).await;
        if stored.is_ok() {
            stored = self.settings.store(SettingKey::WifiPassword, &password).await;
        }
        match stored {
            Ok(()) => {
                self.render.draw_message("WiFi settings stored");
                true
            }
            Err(_e) => {
                #[cfg(feature = "defmt")]
                defmt::error!("storing WiFi settings failed: {}", _e);
                self.render.draw_message("Failed to store WiFi settings");
                false
            }
        }
    }

    /// Show the stored credentials.
    pub async fn show_wifi(&mut self) {
        let ssid: String<WIFI_SSID_MAX_LEN> =
            load_or_empty(&mut self.settings, SettingKey::WifiSsid).await;
        let password: String<WIFI_PASSWORD_MAX_LEN> =
            load_or_empty(&mut self.settings, SettingKey::WifiPassword).await;

        let mut message: String<MESSAGE_MAX_LEN> = String::new();
        let _ = write!(message, "SSID is {}\nPassword is {}", ssid, password);
        self.render.draw_message(&message);
    }
}
