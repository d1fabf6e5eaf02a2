//! Stage timing and memory instrumentation for benchmark runs.

use std::time::{Duration, Instant};

use sysinfo::System;

/// Resident set size of the current process, in bytes.
pub fn capture_rss_bytes() -> Option<u64> {
    let pid = sysinfo::Pid::from(std::process::id() as usize);

    // Refresh only this process, not the whole system.
    let mut sys = System::new();
    sys.refresh_processes_specifics(
        sysinfo::ProcessesToUpdate::Some(&[pid]),
        true,
        sysinfo::ProcessRefreshKind::nothing().with_memory(),
    );

    sys.process(pid).map(|process| process.memory())
}

/// RSS growth between two optional samples.
pub fn rss_delta(before: Option<u64>, after: Option<u64>) -> Option<i64> {
    match (before, after) {
        (Some(before), Some(after)) => Some(after as i64 - before as i64),
        _ => None,
    }
}

/// Timing and memory data for one benchmark stage.
#[derive(Debug, Clone)]
pub struct StageMeasurement {
    pub stage: &'static str,
    pub duration: Duration,
    pub rss_before_bytes: Option<u64>,
    pub rss_after_bytes: Option<u64>,
    pub rss_delta_bytes: Option<i64>,
}

/// Records stage measurements around closures.
#[derive(Debug, Default)]
pub struct StageRecorder {
    stages: Vec<StageMeasurement>,
}

impl StageRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `work` as a named stage, capturing wall time and RSS around it.
    pub fn record<T>(&mut self, stage: &'static str, work: impl FnOnce() -> T) -> T {
        let rss_before_bytes = capture_rss_bytes();
        let started = Instant::now();
        let out = work();
        let duration = started.elapsed();
        let rss_after_bytes = capture_rss_bytes();

        self.stages.push(StageMeasurement {
            stage,
            duration,
            rss_before_bytes,
            rss_after_bytes,
            rss_delta_bytes: rss_delta(rss_before_bytes, rss_after_bytes),
        });
        out
    }

    /// Captured stage measurements, in execution order.
    pub fn stages(&self) -> &[StageMeasurement] {
        &self.stages
    }
}
