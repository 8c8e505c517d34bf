//! Flash test double for the storage unit tests.

use std::vec::Vec;

use embedded_storage_async::nor_flash::{
    ErrorType, NorFlash, NorFlashError, NorFlashErrorKind, ReadNorFlash,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RamFlashError;

impl NorFlashError for RamFlashError {
    fn kind(&self) -> NorFlashErrorKind {
        NorFlashErrorKind::Other
    }
}

/// NOR flash in RAM: erase sets bytes to 0xFF, writes can only clear bits.
pub struct RamFlash {
    bytes: Vec<u8>,
    pub fail_reads: bool,
}

impl RamFlash {
    /// 64 KiB, enough to hold the default settings region.
    pub fn new() -> Self {
        Self {
            bytes: std::vec![0xFF; 64 * 1024],
            fail_reads: false,
        }
    }
}

impl ErrorType for RamFlash {
    type Error = RamFlashError;
}

impl ReadNorFlash for RamFlash {
    const READ_SIZE: usize = 1;

    async fn read(&mut self, offset: u32, bytes: &mut [u8]) -> Result<(), Self::Error> {
        if self.fail_reads {
            return Err(RamFlashError);
        }
        let start = offset as usize;
        let src = self.bytes.get(start..start + bytes.len()).ok_or(RamFlashError)?;
        bytes.copy_from_slice(src);
        Ok(())
    }

    fn capacity(&self) -> usize {
        self.bytes.len()
    }
}

impl NorFlash for RamFlash {
    const WRITE_SIZE: usize = 4;
    const ERASE_SIZE: usize = 4096;

    async fn erase(&mut self, from: u32, to: u32) -> Result<(), Self::Error> {
        let region = self
            .bytes
            .get_mut(from as usize..to as usize)
            .ok_or(RamFlashError)?;
        region.fill(0xFF);
        Ok(())
    }

    async fn write(&mut self, offset: u32, bytes: &[u8]) -> Result<(), Self::Error> {
        let start = offset as usize;
        let dst = self
            .bytes
            .get_mut(start..start + bytes.len())
            .ok_or(RamFlashError)?;
        for (cell, byte) in dst.iter_mut().zip(bytes) {
            *cell &= *byte;
        }
        Ok(())
    }
}
