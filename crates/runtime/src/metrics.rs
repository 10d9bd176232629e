use std::collections::BTreeMap;
use std::fmt;

/// Tick-loop counters and gauges.
///
/// Uses sorted maps so snapshots and log lines have a stable ordering.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Metrics {
    counters: BTreeMap<&'static str, u64>,
    gauges: BTreeMap<&'static str, i64>,
}

pub const TICKS: &str = "ticks";
pub const ANNOTATIONS_SPAWNED: &str = "annotations.spawned";
pub const ANNOTATIONS_RETIRED: &str = "annotations.retired";
pub const ANNOTATIONS_ACTIVE: &str = "annotations.active";
pub const PLACEMENT_ATTEMPTS: &str = "placement.attempts";
pub const PLACEMENT_FALLBACKS: &str = "placement.fallbacks";
pub const PLACEMENT_OVERLAPS: &str = "placement.overlaps";
pub const SAMPLES_INGESTED: &str = "samples.ingested";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub counters: Vec<(&'static str, u64)>,
    pub gauges: Vec<(&'static str, i64)>,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn counter(&self, name: &str) -> u64 {
        self.counters.get(name).copied().unwrap_or(0)
    }

    pub fn inc_counter(&mut self, name: &'static str, by: u64) {
        *self.counters.entry(name).or_insert(0) += by;
    }

    pub fn gauge(&self, name: &str) -> Option<i64> {
        self.gauges.get(name).copied()
    }

    pub fn set_gauge(&mut self, name: &'static str, value: i64) {
        self.gauges.insert(name, value);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            counters: self.counters.iter().map(|(k, v)| (*k, *v)).collect(),
            gauges: self.gauges.iter().map(|(k, v)| (*k, *v)).collect(),
        }
    }
}

impl fmt::Display for MetricsSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (name, value) in &self.counters {
            if !first {
                write!(f, " ")?;
            }
            first = false;
            write!(f, "{name}={value}")?;
        }
        for (name, value) in &self.gauges {
            if !first {
                write!(f, " ")?;
            }
            first = false;
            write!(f, "{name}={value}")?;
        }
        Ok(())
    }
}
