//! Memory-mapped I/O strategy
//!
//! Sets the file length up front, maps the whole file once, and copies the
//! buffer into successive buffer-sized regions, forcing each region to
//! durable storage immediately after its copy (one synchronization call
//! per chunk, not one at the end). The read path maps read-only and folds
//! every byte of every chunk into the checksum.
//!
//! Chunk count is `size_bytes / buffer.len()` by integer division: a
//! trailing remainder smaller than one buffer is never written or
//! verified. Configuration validation rejects sweeps where that remainder
//! could occur; the behavior is kept here so it can be asserted directly.

use crate::io::{request_cache_bypass, IoStrategy};
use crate::{Result, SweepError};
use memmap2::{Mmap, MmapMut};
use std::fs::OpenOptions;
use std::io;
use std::path::Path;

pub struct MmapStrategy;

impl IoStrategy for MmapStrategy {
    fn name(&self) -> &'static str {
        "mmap"
    }

    fn write_file(&self, path: &Path, buffer: &[u8], size_bytes: u64) -> Result<()> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)
            .map_err(|e| SweepError::io("mmap write/open", e))?;

        request_cache_bypass(&file).map_err(|e| SweepError::io("mmap write/cache bypass", e))?;

        file.set_len(size_bytes)
            .map_err(|e| SweepError::io("mmap write/set length", e))?;

        // The mapping is dropped (unmapped) on every exit path below.
        let mut map = unsafe { MmapMut::map_mut(&file) }
            .map_err(|e| SweepError::io("mmap write/map", e))?;

        let chunk = buffer.len();
        let count = size_bytes / chunk as u64;
        for i in 0..count {
            let offset = (i as usize) * chunk;
            map[offset..offset + chunk].copy_from_slice(buffer);
            map.flush_range(offset, chunk)
                .map_err(|e| SweepError::io("mmap write/sync", e))?;
        }

        Ok(())
    }

    fn read_file(&self, path: &Path, buffer: &mut [u8], size_bytes: u64) -> Result<u8> {
        let file = OpenOptions::new()
            .read(true)
            .open(path)
            .map_err(|e| SweepError::io("mmap read/open", e))?;

        request_cache_bypass(&file).map_err(|e| SweepError::io("mmap read/cache bypass", e))?;

        let map = unsafe { Mmap::map(&file) }.map_err(|e| SweepError::io("mmap read/map", e))?;

        let chunk = buffer.len();
        let count = size_bytes / chunk as u64;
        let needed = (count as usize) * chunk;
        if map.len() < needed {
            return Err(SweepError::io(
                "mmap read/map",
                io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    format!("mapped {} bytes, expected at least {}", map.len(), needed),
                ),
            ));
        }

        let mut checksum = 0u8;
        for i in 0..count {
            let offset = (i as usize) * chunk;
            for &byte in &map[offset..offset + chunk] {
                checksum ^= byte;
            }
        }

        Ok(checksum)
    }
}
