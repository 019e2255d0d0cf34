use sysinfo::Disks;

use crate::core::monitor::{VolumeSample, VolumeSource};
use crate::error::Result;

/// Volume source backed by `sysinfo`.
///
/// The disk list is rebuilt on every call so volumes mounted after startup are picked up.
#[derive(Debug, Default)]
pub struct SysinfoVolumes;

impl SysinfoVolumes {
    pub fn new() -> Self {
        Self
    }
}

impl VolumeSource for SysinfoVolumes {
    fn volumes(&mut self) -> Result<Vec<VolumeSample>> {
        let disks = Disks::new_with_refreshed_list();

        let samples = disks
            .list()
            .iter()
            .map(|disk| {
                let total = disk.total_space();
                VolumeSample {
                    label: disk.name().to_string_lossy().to_string(),
                    mount_point: disk.mount_point().to_string_lossy().to_string(),
                    total_bytes: total,
                    free_bytes: disk.available_space(),
                    ready: total > 0,
                }
            })
            .collect();

        Ok(samples)
    }
}
