//! Persistent settings (WiFi credentials).
//!
//! Settings live in a dedicated flash region managed by the
//! `sequential-storage` crate as a key-value map, which takes care of
//! wear levelling and garbage collection.
//!
//! Storage layout:
//!   - One map item per [`SettingKey`], keyed by its one-byte id.
//!   - Values are raw UTF-8 bytes, at most `SETTINGS_MAX_VALUE_LEN` long.

use core::future::Future;
use core::ops::Range;

use embedded_storage_async::nor_flash::NorFlash;
use heapless::String;
use sequential_storage::cache::NoCache;

use crate::config::{
    FLASH_SECTOR_SIZE, SETTINGS_FLASH_SECTORS, SETTINGS_FLASH_START, SETTINGS_MAX_VALUE_LEN,
};
use crate::error::Error;
use crate::ui::text::copy_truncated;

/// Scratch space for one serialized map item (key + value + headers).
const ITEM_BUFFER_LEN: usize = 2 * SETTINGS_MAX_VALUE_LEN;

/// Flash range of the settings region.
pub const fn settings_range() -> Range<u32> {
    SETTINGS_FLASH_START..SETTINGS_FLASH_START + SETTINGS_FLASH_SECTORS * FLASH_SECTOR_SIZE
}

/// Known settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SettingKey {
    WifiSsid,
    WifiPassword,
}

impl SettingKey {
    /// Name of the setting in the "system" namespace.
    pub const fn name(self) -> &'static str {
        match self {
            SettingKey::WifiSsid => "wifi.ssid",
            SettingKey::WifiPassword => "wifi.password",
        }
    }

    /// Map key in flash.
    pub const fn id(self) -> u8 {
        match self {
            SettingKey::WifiSsid => 0x01,
            SettingKey::WifiPassword => 0x02,
        }
    }
}

/// String key-value store for settings.
pub trait SettingsStore {
    /// Read `key` into `out`, truncating to its capacity.
    ///
    /// Returns `Ok(false)` if the key was never written; `out` is left
    /// untouched in that case.
    fn load<const N: usize>(
        &mut self,
        key: SettingKey,
        out: &mut String<N>,
    ) -> impl Future<Output = Result<bool, Error>>;

    /// Persist `value` under `key`, replacing any previous value.
    fn store(&mut self, key: SettingKey, value: &str) -> impl Future<Output = Result<(), Error>>;
}

/// Read a setting, defaulting to an empty string when it is missing or
/// cannot be read.
pub async fn load_or_empty<S: SettingsStore, const N: usize>(
    store: &mut S,
    key: SettingKey,
) -> String<N> {
    let mut value = String::new();
    match store.load(key, &mut value).await {
        Ok(true) => {}
        Ok(false) => {
            #[cfg(feature = "defmt")]
            defmt::debug!("{} not set", key.name());
        }
        Err(_e) => {
            #[cfg(feature = "defmt")]
            defmt::warn!("reading {} failed: {}", key.name(), _e);
            value.clear();
        }
    }
    value
}

/// Settings store on a NOR flash region.
pub struct FlashSettings<F> {
    flash: F,
    range: Range<u32>,
    buffer: [u8; ITEM_BUFFER_LEN],
}

impl<F: NorFlash> FlashSettings<F> {
    /// Store on the default settings region.
    pub fn new(flash: F) -> Self {
        Self::with_range(flash, settings_range())
    }

    pub fn with_range(flash: F, range: Range<u32>) -> Self {
        Self {
            flash,
            range,
            buffer: [0; ITEM_BUFFER_LEN],
        }
    }

    pub fn into_inner(self) -> F {
        self.flash
    }
}

impl<F: NorFlash> SettingsStore for FlashSettings<F> {
    async fn load<const N: usize>(
        &mut self,
        key: SettingKey,
        out: &mut String<N>,
    ) -> Result<bool, Error> {
        let item = sequential_storage::map::fetch_item::<u8, &[u8], _>(
            &mut self.flash,
            self.range.clone(),
            &mut NoCache::new(),
            &mut self.buffer,
            &key.id(),
        )
        .await?;

        let Some(bytes) = item else {
            return Ok(false);
        };
        let text = core::str::from_utf8(bytes).map_err(|_| Error::Storage)?;
        if copy_truncated(text, out) {
            #[cfg(feature = "defmt")]
            defmt::debug!("{} truncated to {} bytes", key.name(), N);
        }
        Ok(true)
    }

    async fn store(&mut self, key: SettingKey, value: &str) -> Result<(), Error> {
        if value.len() > SETTINGS_MAX_VALUE_LEN {
            return Err(Error::BufferOverflow);
        }

        sequential_storage::map::store_item::<u8, &[u8], _>(
            &mut self.flash,
            self.range.clone(),
            &mut NoCache::new(),
            &mut self.buffer,
            &key.id(),
            &value.as_bytes(),
        )
        .await?;

        #[cfg(feature = "defmt")]
        defmt::info!("stored {}", key.name());
        Ok(())
    }
}
