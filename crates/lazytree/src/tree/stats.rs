use core::{fmt, time::Duration};
use sketches_ddsketch::{Config, DDSketch};

/// Operations tracked by [Stats]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Op {
    Build,
    RangeSum,
    RangeMin,
    Update,
    Reconcile,
}

/// Latency and node-visit counters of a single kind of operation
#[derive(Clone)]
pub struct OpStats {
    latency: DDSketch,
    calls: u64,
    visits: u64,
    max_visits: u64,
}

impl Default for OpStats {
    fn default() -> Self {
        Self {
            latency: DDSketch::new(Config::new(0.01, 2048, 1.0e-9)),
            calls: 0,
            visits: 0,
            max_visits: 0,
        }
    }
}

impl OpStats {
    #[inline]
    pub(crate) fn record(&mut self, elapsed: Duration, visits: u64) {
        self.latency.add(elapsed.as_nanos() as f64);
        self.calls += 1;
        self.visits += visits;
        self.max_visits = self.max_visits.max(visits);
    }

    /// Number of recorded calls
    pub fn calls(&self) -> u64 {
        self.calls
    }

    /// Total number of heap nodes visited across all calls
    pub fn visits(&self) -> u64 {
        self.visits
    }

    /// Largest number of heap nodes visited by a single call
    pub fn max_visits(&self) -> u64 {
        self.max_visits
    }

    /// Average number of heap nodes visited per call
    pub fn mean_visits(&self) -> f64 {
        if self.calls == 0 {
            0.0
        } else {
            self.visits as f64 / self.calls as f64
        }
    }

    /// Latency in nanoseconds at quantile `q` (`0.0..=1.0`), or `None` if nothing was recorded
    pub fn latency(&self, q: f64) -> Option<f64> {
        self.latency.quantile(q).ok().flatten()
    }
}

impl fmt::Debug for OpStats {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("OpStats")
            .field("calls", &self.calls)
            .field("mean_visits", &format_args!("{:.2}", self.mean_visits()))
            .field("max_visits", &self.max_visits)
            .field("p50", &format_args!("{:.2}ns", self.latency(0.5).unwrap_or(0.0)))
            .field("p99", &format_args!("{:.2}ns", self.latency(0.99).unwrap_or(0.0)))
            .finish()
    }
}

/// Stats for [SegmentTree](crate::SegmentTree)
#[derive(Clone, Default)]
pub struct Stats {
    /// Building the tree
    pub build: OpStats,
    /// Range sum queries
    pub range_sum: OpStats,
    /// Range minimum queries
    pub range_min: OpStats,
    /// Range updates
    pub update: OpStats,
    /// Pushing all pending values down for `to_vec`/`into_vec`
    pub reconcile: OpStats,
}

impl Stats {
    #[inline]
    pub(crate) fn op_mut(&mut self, op: Op) -> &mut OpStats {
        match op {
            Op::Build => &mut self.build,
            Op::RangeSum => &mut self.range_sum,
            Op::RangeMin => &mut self.range_min,
            Op::Update => &mut self.update,
            Op::Reconcile => &mut self.reconcile,
        }
    }
}

impl fmt::Debug for Stats {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("SegmentTree Stats")
            .field("build", &self.build)
            .field("range_sum", &self.range_sum)
            .field("range_min", &self.range_min)
            .field("update", &self.update)
            .field("reconcile", &self.reconcile)
            .finish()
    }
}
