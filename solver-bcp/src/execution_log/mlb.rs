//! Single-direction labeling log.

use std::time::Duration;

use serde::Serialize;

use super::{secs, LogDocument};

/// Terminal status of a single-direction labeling run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum MlbStatus {
    /// The run has not finished (or not started).
    #[default]
    DidNotStart,

    /// Stopped by the time limit.
    TimeLimitReached,

    /// Stopped after processing the maximum number of labels.
    ProcessLimitReached,

    /// All labels were processed.
    Finished,
}

status_display!(MlbStatus {
    DidNotStart,
    TimeLimitReached,
    ProcessLimitReached,
    Finished,
});

/// Statistics of one labeling pass.
///
/// A label goes through enumeration (queued), extension, domination check
/// and processing (stored as non-dominated). Correction and bounding are
/// optional phases.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MlbExecutionLog {
    /// Terminal status.
    pub status: MlbStatus,

    /// Total time.
    #[serde(with = "secs")]
    pub time: Duration,

    /// Labels enumerated.
    pub enumerated_count: u64,

    /// Labels extended.
    pub extended_count: u64,

    /// Labels found dominated.
    pub dominated_count: u64,

    /// Labels corrected.
    pub corrected_count: u64,

    /// Labels processed.
    pub processed_count: u64,

    /// Labels discarded by bounding.
    pub bounded_count: u64,

    /// `count_by_length[i]` is the number of processed labels of length `i`.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub count_by_length: Vec<u64>,

    /// Time pushing to and popping from the queue.
    #[serde(with = "secs")]
    pub queuing_time: Duration,

    /// Time in the enumeration phase.
    #[serde(with = "secs")]
    pub enumeration_time: Duration,

    /// Time in the extension phase.
    #[serde(with = "secs")]
    pub extension_time: Duration,

    /// Time in the domination phase.
    #[serde(with = "secs")]
    pub domination_time: Duration,

    /// Time in the correction phase.
    #[serde(with = "secs")]
    pub correction_time: Duration,

    /// Time in the process phase.
    #[serde(with = "secs")]
    pub process_time: Duration,

    /// Time in the bounding phase.
    #[serde(with = "secs")]
    pub bounding_time: Duration,
}

impl MlbExecutionLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a processed label of the given length.
    pub fn record_processed(&mut self, length: usize) {
        self.processed_count += 1;
        if self.count_by_length.len() <= length {
            self.count_by_length.resize(length + 1, 0);
        }
        self.count_by_length[length] += 1;
    }
}

impl LogDocument for MlbExecutionLog {
    const KD_TYPE: &'static str = "mlb";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_processed() {
        let mut log = MlbExecutionLog::new();
        log.record_processed(2);
        log.record_processed(0);
        log.record_processed(2);
        assert_eq!(log.processed_count, 3);
        assert_eq!(log.count_by_length, vec![1, 0, 2]);
    }

    #[test]
    fn test_json_durations_in_seconds() {
        let log = MlbExecutionLog {
            status: MlbStatus::Finished,
            time: Duration::from_millis(1500),
            extended_count: 7,
            ..Default::default()
        };
        let json = log.to_json();
        assert_eq!(json["kd_type"], "mlb");
        assert_eq!(json["status"], "Finished");
        assert_eq!(json["time"], 1.5);
        assert_eq!(json["extended_count"], 7);
        assert!(json.get("count_by_length").is_none());
    }
}
