//! I/O strategy module
//!
//! Contains the three competing I/O strategies behind one contract so the
//! sweep driver can treat them interchangeably, plus the platform-specific
//! cache-bypass request they share.

pub mod buffered;
pub mod direct;
pub mod mmap;
pub mod strategy;

pub use buffered::BufferedStrategy;
pub use direct::DirectStrategy;
pub use mmap::MmapStrategy;
pub use strategy::{create_strategy, IoStrategy};

use std::fs::File;
use std::io;

/// Request that the OS skip its page cache for this file so measured
/// throughput reflects the physical medium rather than cache hits.
#[cfg(target_os = "macos")]
pub(crate) fn request_cache_bypass(file: &File) -> io::Result<()> {
    use std::os::fd::AsRawFd;

    let rc = unsafe { libc::fcntl(file.as_raw_fd(), libc::F_NOCACHE, 1) };
    if rc < 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(())
}

/// Request that the OS skip its page cache for this file so measured
/// throughput reflects the physical medium rather than cache hits.
///
/// O_DIRECT would impose buffer-alignment and transfer-size constraints
/// that the sweep's arbitrary buffer sizes cannot honor, so cached pages
/// are evicted explicitly instead.
#[cfg(all(unix, not(target_os = "macos")))]
pub(crate) fn request_cache_bypass(file: &File) -> io::Result<()> {
    use std::os::fd::AsRawFd;

    let rc = unsafe { libc::posix_fadvise(file.as_raw_fd(), 0, 0, libc::POSIX_FADV_DONTNEED) };
    if rc != 0 {
        return Err(io::Error::from_raw_os_error(rc));
    }
    Ok(())
}

/// On Windows write-through is requested with open flags instead; there is
/// no per-descriptor cache-bypass call to make after the fact.
#[cfg(windows)]
pub(crate) fn request_cache_bypass(_file: &File) -> io::Result<()> {
    Ok(())
}
