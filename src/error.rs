//! Unified error type for the launcher.
//!
//! We avoid `alloc` - all error variants carry no data.
//! Implements `defmt::Format` for efficient on-target logging.

/// Top-level error type used across the launcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    // Foundational resources. Raised by the board crate while it allocates
    // the button queue and framebuffer and initialises drivers, before the
    // launcher runs.
    /// The button event queue could not be allocated.
    QueueAlloc,

    /// The display framebuffer could not be allocated.
    FramebufferAlloc,

    /// Board-level peripheral initialisation failed.
    BoardInit,

    // Collaborators
    /// The app filesystem could not be initialised.
    AppFsInit,

    /// The settings store could not be initialised.
    NvsInit,

    /// The SD card could not be mounted.
    SdMount,

    // Storage
    /// Flash read/write/erase failed.
    Storage,

    // Generic
    /// Buffer too small for the requested operation.
    BufferOverflow,
}

impl Error {
    /// Errors after which the only recovery is a full device restart.
    pub fn is_fatal(self) -> bool {
        matches!(
            self,
            Error::QueueAlloc | Error::FramebufferAlloc | Error::BoardInit
        )
    }
}

// Convenience conversions

impl<E> From<sequential_storage::Error<E>> for Error {
    fn from(_: sequential_storage::Error<E>) -> Self {
        Error::Storage
    }
}
