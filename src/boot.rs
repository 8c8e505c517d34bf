//! Start-up sequence: bring up the launcher's collaborators one by one,
//! showing progress on screen.
//!
//! Allocation of the button queue and framebuffer and the board init
//! itself happen in the board crate before this runs; failures there are
//! fatal and end in a restart. Here the app filesystem and settings store
//! must come up or the launcher stops; the SD card is optional.

use core::future::Future;

use crate::error::Error;
use crate::ui::Render;

/// Collaborators initialised at boot.
pub trait Board {
    /// Start the button input task.
    fn start_buttons(&mut self) -> impl Future<Output = ()>;

    fn init_appfs(&mut self) -> impl Future<Output = Result<(), Error>>;

    fn init_nvs(&mut self) -> impl Future<Output = Result<(), Error>>;

    fn mount_sd(&mut self) -> impl Future<Output = Result<(), Error>>;
}

/// Outcome of a successful bring-up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BootStatus {
    pub sd_mounted: bool,
}

/// Run the start-up sequence.
///
/// On an app filesystem or settings store failure the failure message
/// stays on screen and the error is returned; the caller must not enter
/// the launcher.
pub async fn bring_up<B: Board, R: Render>(board: &mut B, render: &mut R) -> Result<BootStatus, Error> {
    render.draw_message("Button init...");
    board.start_buttons().await;

    render.draw_message("AppFS init...");
    if let Err(e) = board.init_appfs().await {
        #[cfg(feature = "defmt")]
        defmt::error!("AppFS init failed: {}", e);
        render.draw_message("AppFS init failed!");
        return Err(e);
    }
    #[cfg(feature = "defmt")]
    defmt::info!("AppFS initialized");

    render.draw_message("NVS init...");
    if let Err(e) = board.init_nvs().await {
        #[cfg(feature = "defmt")]
        defmt::error!("NVS init failed: {}", e);
        render.draw_message("NVS init failed!");
        return Err(e);
    }
    #[cfg(feature = "defmt")]
    defmt::info!("NVS initialized");

    render.draw_message("Mount SD card...");
    let sd_mounted = board.mount_sd().await.is_ok();
    if sd_mounted {
        render.draw_message("SD card mounted");
    } else {
        #[cfg(feature = "defmt")]
        defmt::warn!("SD card not mounted");
    }

    Ok(BootStatus { sd_mounted })
}
