//! App launcher and settings UI for the event badge.
//!
//! The board crate owns the hardware: it allocates the button queue and
//! framebuffer, brings up the drivers and spawns the button task. It then
//! hands the launcher its collaborators and runs [`boot::bring_up`]
//! followed by [`launcher::Launcher::run`] on the embassy executor.
//!
//! Everything here is hardware-independent and tested on the host:
//! `cargo test`. Enable the `defmt` feature for on-target logging.

#![cfg_attr(not(test), no_std)]

pub mod apps;
pub mod boot;
pub mod config;
pub mod error;
pub mod input;
pub mod launcher;
pub mod storage;
pub mod ui;

#[cfg(test)]
mod testing;

pub use error::Error;
