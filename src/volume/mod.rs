//! RAM-backed volume lifecycle
//!
//! Creates and tears down a temporary RAM-backed volume through the OS
//! disk-management utilities (`hdiutil`/`diskutil` on macOS). The sweep
//! driver only ever consumes the mount path; it does not depend on how
//! the path is backed.

use crate::{Result, VolumeError};
use std::path::{Path, PathBuf};

/// Explicit RAM volume parameters, passed in rather than read from
/// process-wide constants.
#[derive(Debug, Clone)]
pub struct VolumeConfig {
    /// Volume size in megabytes
    pub size_mb: u64,
    /// Volume name; the mount point becomes /Volumes/{name}
    pub volume_name: String,
}

impl Default for VolumeConfig {
    fn default() -> Self {
        Self {
            size_mb: 2047,
            volume_name: "RAMDisk".to_string(),
        }
    }
}

impl VolumeConfig {
    /// Device block count for the requested size (512-byte blocks)
    pub fn block_count(&self) -> u64 {
        self.size_mb * 1024 * 1024 / 512
    }

    /// Mount point the volume will appear at
    pub fn mount_path(&self) -> PathBuf {
        PathBuf::from("/Volumes").join(&self.volume_name)
    }
}

/// A mounted RAM volume. Ejected explicitly with [`RamVolume::eject`];
/// dropping without ejecting makes a best-effort eject attempt.
#[derive(Debug)]
pub struct RamVolume {
    mount_path: PathBuf,
    ejected: bool,
}

impl RamVolume {
    /// Create, format, and mount a RAM volume.
    #[cfg(target_os = "macos")]
    pub fn create(config: &VolumeConfig) -> Result<Self> {
        use std::process::Command;
        use std::thread::sleep;
        use std::time::Duration;

        let output = Command::new("hdiutil")
            .args(["attach", "-nomount", &format!("ram://{}", config.block_count())])
            .output()
            .map_err(|e| VolumeError::DeviceCreateFailed(format!("hdiutil: {}", e)))?;
        if !output.status.success() {
            return Err(VolumeError::DeviceCreateFailed(format!(
                "hdiutil exited with {}",
                output.status
            ))
            .into());
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let device = parse_device_path(&stdout).ok_or_else(|| {
            VolumeError::DeviceCreateFailed(format!("unexpected hdiutil output: {}", stdout.trim()))
        })?;

        let status = Command::new("diskutil")
            .args(["erasevolume", "HFS+", &config.volume_name, &device])
            .status()
            .map_err(|e| VolumeError::MountFailed(format!("diskutil: {}", e)))?;
        if !status.success() {
            return Err(
                VolumeError::MountFailed(format!("diskutil exited with {}", status)).into(),
            );
        }

        // Give the volume a moment to appear under /Volumes.
        let mount_path = config.mount_path();
        for _ in 0..10 {
            if mount_path.exists() {
                break;
            }
            sleep(Duration::from_millis(100));
        }
        if !mount_path.exists() {
            return Err(VolumeError::VolumeNotFound(format!(
                "{} never appeared",
                mount_path.display()
            ))
            .into());
        }

        Ok(Self {
            mount_path,
            ejected: false,
        })
    }

    /// Create, format, and mount a RAM volume.
    #[cfg(not(target_os = "macos"))]
    pub fn create(_config: &VolumeConfig) -> Result<Self> {
        Err(VolumeError::Unsupported(
            "RAM volume creation requires the macOS disk-management utilities".to_string(),
        )
        .into())
    }

    /// Path under which the sweep creates its temporary files
    pub fn mount_path(&self) -> &Path {
        &self.mount_path
    }

    /// Unmount and eject the volume.
    pub fn eject(mut self) -> Result<()> {
        self.eject_inner()
    }

    #[cfg(target_os = "macos")]
    fn eject_inner(&mut self) -> Result<()> {
        use std::process::Command;

        let status = Command::new("diskutil")
            .args(["eject", &self.mount_path.to_string_lossy()])
            .status()
            .map_err(|e| VolumeError::EjectFailed(format!("diskutil: {}", e)))?;
        if !status.success() {
            return Err(
                VolumeError::EjectFailed(format!("diskutil exited with {}", status)).into(),
            );
        }

        if self.mount_path.exists() {
            return Err(VolumeError::StillMounted(format!(
                "{} still present after eject",
                self.mount_path.display()
            ))
            .into());
        }

        self.ejected = true;
        Ok(())
    }

    #[cfg(not(target_os = "macos"))]
    fn eject_inner(&mut self) -> Result<()> {
        self.ejected = true;
        Ok(())
    }
}

impl Drop for RamVolume {
    fn drop(&mut self) {
        if !self.ejected {
            let _ = self.eject_inner();
        }
    }
}

/// Extract the device path from `hdiutil attach` output
/// (e.g. "/dev/disk3" surrounded by whitespace).
pub(crate) fn parse_device_path(output: &str) -> Option<String> {
    let trimmed = output.trim();
    if trimmed.is_empty() || !trimmed.contains("/dev/disk") {
        return None;
    }
    trimmed
        .split_whitespace()
        .find(|token| token.starts_with("/dev/disk"))
        .map(|token| token.to_string())
}
