//! Configuration settings for column generation and branch-and-cut runs.

use std::collections::HashSet;
use std::time::{Duration, Instant};

use crate::execution_log::{BcOption, CgOption, LogOptions};

/// Column generation settings.
#[derive(Debug, Clone)]
pub struct ColumnGenerationSettings {
    /// Time limit in milliseconds (None = unlimited).
    pub time_limit_ms: Option<u64>,

    /// Optional statistics collected in the execution log.
    pub options: LogOptions<CgOption>,

    /// Print progress information.
    pub verbose: bool,

    /// Log frequency (print every N iterations).
    pub log_freq: u64,
}

impl Default for ColumnGenerationSettings {
    fn default() -> Self {
        Self {
            time_limit_ms: None,
            options: HashSet::from([CgOption::IterationsInformation]),
            verbose: false,
            log_freq: 10,
        }
    }
}

impl ColumnGenerationSettings {
    /// Create settings with verbose output enabled.
    pub fn verbose() -> Self {
        Self {
            verbose: true,
            log_freq: 1,
            ..Self::default()
        }
    }

    /// Set time limit in seconds.
    pub fn with_time_limit(mut self, seconds: f64) -> Self {
        self.time_limit_ms = Some((seconds * 1000.0) as u64);
        self
    }

    /// Set time limit in milliseconds.
    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.time_limit_ms = Some(ms);
        self
    }

    /// Enable an optional statistic.
    pub fn with_option(mut self, option: CgOption) -> Self {
        self.options.insert(option);
        self
    }

    /// Replace the set of enabled statistics.
    pub fn with_options(mut self, options: impl IntoIterator<Item = CgOption>) -> Self {
        self.options = options.into_iter().collect();
        self
    }

    /// Whether `option` is enabled.
    pub fn has_option(&self, option: CgOption) -> bool {
        self.options.contains(&option)
    }

    pub(crate) fn time_limit(&self) -> Option<Duration> {
        self.time_limit_ms.map(Duration::from_millis)
    }
}

/// Branch-and-cut session settings.
#[derive(Debug, Clone)]
pub struct BranchAndCutSettings {
    /// Time limit in milliseconds (None = unlimited).
    pub time_limit_ms: Option<u64>,

    /// Maximum number of nodes to close (None = unlimited).
    pub max_nodes: Option<u64>,

    /// Maximum cuts returned by one separation round (None = unlimited).
    pub round_cut_budget: Option<usize>,

    /// Optional statistics collected in the execution log.
    pub options: LogOptions<BcOption>,

    /// Print progress information.
    pub verbose: bool,

    /// Log frequency (print every N closed nodes).
    pub log_freq: u64,
}

impl Default for BranchAndCutSettings {
    fn default() -> Self {
        Self {
            time_limit_ms: None,
            max_nodes: None,
            round_cut_budget: None,
            options: HashSet::new(),
            verbose: false,
            log_freq: 100,
        }
    }
}

impl BranchAndCutSettings {
    /// Create settings with verbose output enabled.
    pub fn verbose() -> Self {
        Self {
            verbose: true,
            log_freq: 1,
            ..Self::default()
        }
    }

    /// Set time limit in seconds.
    pub fn with_time_limit(mut self, seconds: f64) -> Self {
        self.time_limit_ms = Some((seconds * 1000.0) as u64);
        self
    }

    /// Set time limit in milliseconds.
    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.time_limit_ms = Some(ms);
        self
    }

    /// Set maximum nodes.
    pub fn with_max_nodes(mut self, nodes: u64) -> Self {
        self.max_nodes = Some(nodes);
        self
    }

    /// Set the per-round cut budget.
    pub fn with_round_cut_budget(mut self, cuts: usize) -> Self {
        self.round_cut_budget = Some(cuts);
        self
    }

    /// Enable an optional statistic.
    pub fn with_option(mut self, option: BcOption) -> Self {
        self.options.insert(option);
        self
    }

    /// Whether `option` is enabled.
    pub fn has_option(&self, option: BcOption) -> bool {
        self.options.contains(&option)
    }
}

/// Wall clock of a run measured against an optional limit.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Deadline {
    start: Instant,
    limit: Option<Duration>,
}

impl Deadline {
    pub(crate) fn start(limit_ms: Option<u64>) -> Self {
        Self {
            start: Instant::now(),
            limit: limit_ms.map(Duration::from_millis),
        }
    }

    pub(crate) fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Whether the limit has been reached. A zero limit is reached at once.
    pub(crate) fn expired(&self) -> bool {
        self.limit.is_some_and(|limit| self.elapsed() >= limit)
    }

    /// Time left before the limit (`Duration::MAX` when unlimited).
    pub(crate) fn remaining(&self) -> Duration {
        match self.limit {
            Some(limit) => limit.saturating_sub(self.elapsed()),
            None => Duration::MAX,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cg_defaults() {
        let s = ColumnGenerationSettings::default();
        assert!(s.time_limit_ms.is_none());
        assert!(s.has_option(CgOption::IterationsInformation));
        assert!(!s.has_option(CgOption::IncumbentSolution));
        assert!(!s.verbose);
    }

    #[test]
    fn test_builders() {
        let s = ColumnGenerationSettings::verbose()
            .with_time_limit(1.5)
            .with_options([CgOption::IncumbentSolution]);
        assert_eq!(s.time_limit_ms, Some(1500));
        assert_eq!(s.log_freq, 1);
        assert!(!s.has_option(CgOption::IterationsInformation));

        let b = BranchAndCutSettings::default()
            .with_max_nodes(10)
            .with_round_cut_budget(50)
            .with_option(BcOption::CutInformation);
        assert_eq!(b.max_nodes, Some(10));
        assert_eq!(b.round_cut_budget, Some(50));
        assert!(b.has_option(BcOption::CutInformation));
        assert!(!b.has_option(BcOption::RootInformation));
    }

    #[test]
    fn test_deadline() {
        assert!(Deadline::start(Some(0)).expired());
        let open = Deadline::start(None);
        assert!(!open.expired());
        assert_eq!(open.remaining(), Duration::MAX);
        assert!(Deadline::start(Some(60_000)).remaining() <= Duration::from_secs(60));
    }
}
