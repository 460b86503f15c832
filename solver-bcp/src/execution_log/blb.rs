//! Bidirectional labeling log.

use std::time::Duration;

use serde::Serialize;

use super::{secs, serialize_sub_log, LogDocument, MlbExecutionLog};
use crate::error::{BcpError, BcpResult};

/// Terminal status of a bidirectional labeling run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum BlbStatus {
    /// The run has not finished (or not started).
    #[default]
    DidNotStart,

    /// Stopped by the time limit.
    TimeLimitReached,

    /// Stopped after finding the maximum number of solutions.
    SolutionLimitReached,

    /// Both directions and the merge completed.
    Finished,
}

status_display!(BlbStatus {
    DidNotStart,
    TimeLimitReached,
    SolutionLimitReached,
    Finished,
});

/// Statistics of a bidirectional labeling run: a forward pass, a backward
/// pass and the merge of their labels.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BlbExecutionLog {
    /// Terminal status.
    pub status: BlbStatus,

    /// Total time.
    #[serde(with = "secs")]
    pub time: Duration,

    /// Time merging forward and backward labels.
    #[serde(with = "secs")]
    pub merge_time: Duration,

    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_sub_log"
    )]
    forward_log: Option<MlbExecutionLog>,

    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_sub_log"
    )]
    backward_log: Option<MlbExecutionLog>,
}

impl BlbExecutionLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Log of the forward pass, once it completed.
    pub fn forward_log(&self) -> Option<&MlbExecutionLog> {
        self.forward_log.as_ref()
    }

    /// Log of the backward pass, once it completed.
    pub fn backward_log(&self) -> Option<&MlbExecutionLog> {
        self.backward_log.as_ref()
    }

    /// Attach the forward pass log. Can be set once.
    pub fn set_forward_log(&mut self, log: MlbExecutionLog) -> BcpResult<()> {
        if self.forward_log.is_some() {
            return Err(BcpError::SubLogAlreadySet("forward_log"));
        }
        self.forward_log = Some(log);
        Ok(())
    }

    /// Attach the backward pass log. Can be set once.
    pub fn set_backward_log(&mut self, log: MlbExecutionLog) -> BcpResult<()> {
        if self.backward_log.is_some() {
            return Err(BcpError::SubLogAlreadySet("backward_log"));
        }
        self.backward_log = Some(log);
        Ok(())
    }
}

impl LogDocument for BlbExecutionLog {
    const KD_TYPE: &'static str = "blb";
}
