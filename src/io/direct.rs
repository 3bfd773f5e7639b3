//! Direct unbuffered I/O strategy
//!
//! Writes with plain syscall-sized chunks after requesting cache bypass
//! from the OS, then forces a durability sync. The read checksum folds
//! only the first byte of each chunk; a deliberately cheap
//! anti-optimization checksum, not a full-buffer one.

use crate::io::{request_cache_bypass, IoStrategy};
use crate::{Result, SweepError};
use std::fs::OpenOptions;
use std::io::{Read, Write};
use std::path::Path;

pub struct DirectStrategy;

impl IoStrategy for DirectStrategy {
    fn name(&self) -> &'static str {
        "read/write"
    }

    fn write_file(&self, path: &Path, buffer: &[u8], size_bytes: u64) -> Result<()> {
        let mut opts = OpenOptions::new();
        opts.write(true).create(true).truncate(true);
        #[cfg(windows)]
        {
            use std::os::windows::fs::OpenOptionsExt;
            const FILE_FLAG_WRITE_THROUGH: u32 = 0x8000_0000;
            opts.custom_flags(FILE_FLAG_WRITE_THROUGH);
        }
        let mut file = opts
            .open(path)
            .map_err(|e| SweepError::io("direct write/open", e))?;

        request_cache_bypass(&file).map_err(|e| SweepError::io("direct write/cache bypass", e))?;

        let mut written = 0u64;
        while written < size_bytes {
            let to_write = (buffer.len() as u64).min(size_bytes - written) as usize;
            file.write_all(&buffer[..to_write])
                .map_err(|e| SweepError::io("direct write/write", e))?;
            written += to_write as u64;
        }

        file.sync_all()
            .map_err(|e| SweepError::io("direct write/sync", e))?;

        // Evict what was just written so the read phase hits the medium.
        request_cache_bypass(&file).map_err(|e| SweepError::io("direct write/cache bypass", e))?;

        Ok(())
    }

    fn read_file(&self, path: &Path, buffer: &mut [u8], size_bytes: u64) -> Result<u8> {
        let mut file = OpenOptions::new()
            .read(true)
            .open(path)
            .map_err(|e| SweepError::io("direct read/open", e))?;

        request_cache_bypass(&file).map_err(|e| SweepError::io("direct read/cache bypass", e))?;

        let mut checksum = 0u8;
        let mut read = 0u64;
        while read < size_bytes {
            let to_read = (buffer.len() as u64).min(size_bytes - read) as usize;
            file.read_exact(&mut buffer[..to_read])
                .map_err(|e| SweepError::io("direct read/read", e))?;
            read += to_read as u64;
            checksum ^= buffer[0];
        }

        Ok(checksum)
    }
}
