//! Process memory sampling and human-readable byte formatting.

use sysinfo::{Pid, ProcessRefreshKind, ProcessesToUpdate, System};

const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Formats a byte count with binary (1024) magnitudes, e.g. `1536 -> "1.5 KB"`.
///
/// The value is rounded to two decimals and trailing zeros are dropped.
/// Magnitudes stop at `TB`; larger inputs are expressed in terabytes.
pub fn format_bytes(bytes: u64) -> String {
    let mut magnitude = 0_usize;
    while magnitude + 1 < UNITS.len() && bytes >= 1_u64 << (10 * (magnitude + 1)) {
        magnitude += 1;
    }

    let scaled = bytes as f64 / (1_u64 << (10 * magnitude)) as f64;
    let rounded = (scaled * 100.0).round() / 100.0;
    format!("{rounded} {}", UNITS[magnitude])
}

/// Source of the current process memory footprint in bytes.
pub trait MemoryProbe {
    /// Returns `None` when the platform cannot report a value.
    fn current_bytes(&mut self) -> Option<u64>;
}

/// Reads the resident set size of this process through `sysinfo`.
pub struct SysinfoProbe {
    system: System,
    pid: Option<Pid>,
}

impl SysinfoProbe {
    pub fn new() -> Self {
        Self {
            system: System::new(),
            pid: sysinfo::get_current_pid().ok(),
        }
    }
}

impl Default for SysinfoProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryProbe for SysinfoProbe {
    fn current_bytes(&mut self) -> Option<u64> {
        let pid = self.pid?;
        self.system.refresh_processes_specifics(
            ProcessesToUpdate::Some(&[pid]),
            true,
            ProcessRefreshKind::nothing().with_memory(),
        );
        self.system.process(pid).map(|process| process.memory())
    }
}

/// One memory reading plus the highest reading seen so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MemorySample {
    pub current: u64,
    pub peak: u64,
}

/// Samples a probe and remembers the peak since construction.
pub struct MemoryMonitor<P: MemoryProbe> {
    probe: P,
    peak: u64,
}

impl<P: MemoryProbe> MemoryMonitor<P> {
    pub fn new(probe: P) -> Self {
        Self { probe, peak: 0 }
    }

    /// Takes a reading; an unavailable reading keeps the previous peak.
    pub fn sample(&mut self) -> MemorySample {
        let current = self.probe.current_bytes().unwrap_or(0);
        self.peak = self.peak.max(current);
        MemorySample {
            current,
            peak: self.peak,
        }
    }

    pub fn peak(&self) -> u64 {
        self.peak
    }
}
