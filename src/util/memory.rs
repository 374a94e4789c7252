//! Process memory snapshots.
//!
//! Read from `/proc/self/status` on Linux. On other platforms every field is
//! `None`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Memory and thread counters of the current process.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessMemory {
    /// Resident set size in KiB (`VmRSS`).
    pub rss_kb: Option<u64>,
    /// Virtual memory size in KiB (`VmSize`), including reserved thread stacks.
    pub virtual_kb: Option<u64>,
    /// Number of OS threads (`Threads`).
    pub threads: Option<u64>,
}

impl ProcessMemory {
    /// Capture the current counters.
    #[must_use]
    pub fn capture() -> Self {
        std::fs::read_to_string("/proc/self/status")
            .map(|status| Self::parse_proc_status(&status))
            .unwrap_or_default()
    }

    /// Parse the body of a `/proc/<pid>/status` file.
    #[must_use]
    pub fn parse_proc_status(status: &str) -> Self {
        let mut out = Self::default();
        for line in status.lines() {
            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            let number = value
                .split_whitespace()
                .next()
                .and_then(|v| v.parse::<u64>().ok());
            match key.trim() {
                "VmRSS" => out.rss_kb = number,
                "VmSize" => out.virtual_kb = number,
                "Threads" => out.threads = number,
                _ => {}
            }
        }
        out
    }
}

fn fmt_kb(f: &mut fmt::Formatter<'_>, kb: Option<u64>) -> fmt::Result {
    match kb {
        Some(kb) => write!(f, "{:>8} MB", kb / 1024),
        None => write!(f, "{:>11}", "n/a"),
    }
}

impl fmt::Display for ProcessMemory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("rss ")?;
        fmt_kb(f, self.rss_kb)?;
        f.write_str("  virt ")?;
        fmt_kb(f, self.virtual_kb)?;
        match self.threads {
            Some(n) => write!(f, "  threads {n:>6}"),
            None => write!(f, "  threads {:>6}", "n/a"),
        }
    }
}
