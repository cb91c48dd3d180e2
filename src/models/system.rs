// Router Dashboard - System Resource Models
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! Memory, disk and CPU usage reported by the router.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{field_array, field_f64, field_string};
use crate::units::{leading_integer, parse_size, SizeError};

/// Memory bar turns red above this percentage.
pub const MEMORY_LOW_THRESHOLD: f64 = 85.0;
/// Disk bar turns red above this percentage.
pub const DISK_LOW_THRESHOLD: f64 = 80.0;
/// CPU bar turns red above this percentage.
pub const CPU_LOW_THRESHOLD: f64 = 80.0;

/// Whether a usage bar should be highlighted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsageLevel {
    Normal,
    /// Few resources left.
    Low,
}

impl UsageLevel {
    /// Classify a percentage against a threshold (strictly greater is low).
    pub fn classify(percent: f64, threshold: f64) -> Self {
        if percent > threshold {
            UsageLevel::Low
        } else {
            UsageLevel::Normal
        }
    }
}

fn percent_of(part: f64, total: f64) -> f64 {
    if total > 0.0 {
        (part / total * 100.0).clamp(0.0, 100.0)
    } else {
        0.0
    }
}

/// Memory usage in megabytes, ARC cache excluded from "used".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MemoryUsage {
    pub total_mb: i64,
    pub used_mb: i64,
}

impl MemoryUsage {
    /// Build from a `systemResources` response, `None` without memory data.
    pub fn from_resources(value: &Value) -> Option<Self> {
        let memory = value.get("memory")?;
        memory.get("total")?;

        let mb = |key: &str| leading_integer(&field_string(memory, key)).unwrap_or(0);
        let used = mb("used_frmt");
        let arc = if memory.get("arc").is_some() { mb("arc_frmt") } else { 0 };

        Some(Self {
            total_mb: mb("total_frmt"),
            used_mb: used - arc,
        })
    }

    pub fn free_mb(&self) -> i64 {
        self.total_mb - self.used_mb
    }

    pub fn percent(&self) -> f64 {
        percent_of(self.used_mb as f64, self.total_mb as f64)
    }

    pub fn level(&self) -> UsageLevel {
        UsageLevel::classify(self.percent(), MEMORY_LOW_THRESHOLD)
    }

    /// Text shown above the memory bar.
    pub fn summary(&self) -> String {
        format!(
            "Total {}MB  Used {}MB  Free {}MB",
            self.total_mb,
            self.used_mb,
            self.free_mb()
        )
    }
}

/// A mounted filesystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiskDevice {
    pub device: String,
    pub fs_type: String,
    pub mountpoint: String,
    /// Sizes as the router formatted them.
    pub blocks: String,
    pub used: String,
    pub available: String,
    pub total_bytes: u64,
    pub used_bytes: u64,
}

impl DiskDevice {
    /// Build from one entry of `devices`. Size strings must parse.
    pub fn from_value(value: &Value) -> Result<Self, SizeError> {
        let blocks = field_string(value, "blocks");
        let used = field_string(value, "used");
        let total_bytes = parse_size(&blocks)?;
        let used_bytes = parse_size(&used)?;

        Ok(Self {
            device: field_string(value, "device"),
            fs_type: field_string(value, "type"),
            mountpoint: field_string(value, "mountpoint"),
            blocks,
            used,
            available: field_string(value, "available"),
            total_bytes,
            used_bytes,
        })
    }

    pub fn free_bytes(&self) -> u64 {
        self.total_bytes.saturating_sub(self.used_bytes)
    }

    pub fn percent(&self) -> f64 {
        percent_of(self.used_bytes as f64, self.total_bytes as f64)
    }

    pub fn level(&self) -> UsageLevel {
        UsageLevel::classify(self.percent(), DISK_LOW_THRESHOLD)
    }

    pub fn is_root(&self) -> bool {
        self.mountpoint == "/"
    }

    /// Text shown above the disk bar.
    pub fn summary(&self) -> String {
        format!(
            "({}) {}  Total {}  Used {}  Free {}",
            self.fs_type, self.mountpoint, self.blocks, self.used, self.available
        )
    }
}

/// All filesystems from a `systemDisk` response.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DiskUsage {
    pub devices: Vec<DiskDevice>,
}

impl DiskUsage {
    /// Build from a `systemDisk` response, `Ok(None)` when it has no devices list.
    pub fn from_disk_info(value: &Value) -> Result<Option<Self>, SizeError> {
        if value.get("devices").and_then(Value::as_array).is_none() {
            return Ok(None);
        }
        let devices = field_array(value, "devices")
            .map(DiskDevice::from_value)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Some(Self { devices }))
    }

    /// The root filesystem, which drives the usage bar.
    pub fn root(&self) -> Option<&DiskDevice> {
        self.devices.iter().find(|d| d.is_root())
    }

    /// Largest device size, used as the common chart scale.
    pub fn scale_max(&self) -> u64 {
        self.devices.iter().map(|d| d.total_bytes).max().unwrap_or(0)
    }
}

/// CPU sub-metric that can be charted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CpuGraph {
    Total,
    Intr,
    User,
    Sys,
}

impl CpuGraph {
    pub const ALL: [CpuGraph; 4] = [CpuGraph::Total, CpuGraph::Intr, CpuGraph::User, CpuGraph::Sys];

    /// Key used by the router's stream and by the options schema.
    pub fn key(&self) -> &'static str {
        match self {
            CpuGraph::Total => "total",
            CpuGraph::Intr => "intr",
            CpuGraph::User => "user",
            CpuGraph::Sys => "sys",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CpuGraph::Total => "Total",
            CpuGraph::Intr => "Interrupt",
            CpuGraph::User => "User",
            CpuGraph::Sys => "System",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|g| g.key() == key)
    }
}

/// One message of the CPU usage stream, percentages.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CpuSample {
    pub total: f64,
    pub user: f64,
    pub nice: f64,
    pub sys: f64,
    pub intr: f64,
    pub idle: f64,
}

impl CpuSample {
    pub fn from_json(data: &str) -> serde_json::Result<Self> {
        let value: Value = serde_json::from_str(data)?;
        let get = |key: &str| field_f64(&value, key).unwrap_or(0.0);
        Ok(Self {
            total: get("total"),
            user: get("user"),
            nice: get("nice"),
            sys: get("sys"),
            intr: get("intr"),
            idle: get("idle"),
        })
    }

    pub fn value(&self, graph: CpuGraph) -> f64 {
        match graph {
            CpuGraph::Total => self.total,
            CpuGraph::Intr => self.intr,
            CpuGraph::User => self.user,
            CpuGraph::Sys => self.sys,
        }
    }

    pub fn level(&self) -> UsageLevel {
        UsageLevel::classify(self.total, CPU_LOW_THRESHOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_memory_excludes_arc() {
        let value = json!({
            "memory": {
                "total": "17179869184",
                "total_frmt": "16384 MB",
                "used": "9000000000",
                "used_frmt": "9000 MB",
                "arc": "3000000000",
                "arc_frmt": "3000 MB"
            }
        });
        let memory = MemoryUsage::from_resources(&value).unwrap();
        assert_eq!(memory.used_mb, 6000);
        assert_eq!(memory.free_mb(), 10384);
        assert_eq!(memory.level(), UsageLevel::Normal);
        assert_eq!(memory.summary(), "Total 16384MB  Used 6000MB  Free 10384MB");
    }

    #[test]
    fn test_memory_without_total_is_ignored() {
        assert_eq!(MemoryUsage::from_resources(&json!({"memory": {}})), None);
        assert_eq!(MemoryUsage::from_resources(&json!({})), None);
    }

    #[test]
    fn test_memory_low_level() {
        let memory = MemoryUsage { total_mb: 1000, used_mb: 900 };
        assert_eq!(memory.level(), UsageLevel::Low);
    }

    #[test]
    fn test_disk_usage_root_and_scale() {
        let value = json!({
            "devices": [
                {"device": "/dev/gpt/rootfs", "type": "ufs", "blocks": "100G",
                 "used": "85G", "available": "15G", "used_pct": 85, "mountpoint": "/"},
                {"device": "tmpfs", "type": "tmpfs", "blocks": "2G",
                 "used": "500M", "available": "1.5G", "used_pct": 25, "mountpoint": "/tmp"}
            ]
        });
        let disks = DiskUsage::from_disk_info(&value).unwrap().unwrap();
        let root = disks.root().unwrap();
        assert_eq!(root.used_bytes, 85_000_000_000);
        assert_eq!(root.free_bytes(), 15_000_000_000);
        assert_eq!(root.level(), UsageLevel::Low);
        assert_eq!(disks.scale_max(), 100_000_000_000);
        assert_eq!(disks.devices[1].free_bytes(), 1_500_000_000);
    }

    #[test]
    fn test_disk_usage_fails_on_bad_size() {
        let value = json!({"devices": [{"blocks": "10Q", "used": "1G", "mountpoint": "/"}]});
        assert!(matches!(
            DiskUsage::from_disk_info(&value),
            Err(SizeError::Unit { unit: 'Q', .. })
        ));
        assert_eq!(DiskUsage::from_disk_info(&json!({})), Ok(None));
    }

    #[test]
    fn test_cpu_sample() {
        let sample = CpuSample::from_json(r#"{"total": 82.5, "user": "10", "sys": 5, "intr": 1.5}"#).unwrap();
        assert_eq!(sample.value(CpuGraph::Total), 82.5);
        assert_eq!(sample.value(CpuGraph::User), 10.0);
        assert_eq!(sample.value(CpuGraph::Intr), 1.5);
        assert_eq!(sample.idle, 0.0);
        assert_eq!(sample.level(), UsageLevel::Low);
    }

    #[test]
    fn test_cpu_graph_keys() {
        for graph in CpuGraph::ALL {
            assert_eq!(CpuGraph::from_key(graph.key()), Some(graph));
        }
        assert_eq!(CpuGraph::from_key("nice"), None);
    }
}
