//! Branch-cut-price log.

use std::time::Duration;

use serde::Serialize;

use super::{
    secs, serialize_sub_log, BcExecutionLog, BcpOption, CgExecutionLog, LogDocument, LogOptions,
};
use crate::error::{BcpError, BcpResult};

/// Statistics of a branch-cut-price run.
///
/// Carries every branch-and-cut statistic plus the pricing side and the
/// column generation log of the root node.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BcpExecutionLog {
    /// Branch-and-cut statistics.
    #[serde(flatten)]
    pub bc: BcExecutionLog,

    /// Constraints after solving the root node.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root_constraint_count: Option<u64>,

    /// Variables after solving the root node.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root_variable_count: Option<u64>,

    /// Constraints at the end of the run.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_constraint_count: Option<u64>,

    /// Variables at the end of the run.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_variable_count: Option<u64>,

    /// Time solving relaxations.
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "secs::option::serialize"
    )]
    pub lp_time: Option<Duration>,

    /// Time solving pricing problems.
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "secs::option::serialize"
    )]
    pub pricing_time: Option<Duration>,

    /// Time branching.
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "secs::option::serialize"
    )]
    pub branching_time: Option<Duration>,

    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_sub_log"
    )]
    root_log: Option<CgExecutionLog>,
}

impl BcpExecutionLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Column generation log of the root node, once it completed.
    pub fn root_log(&self) -> Option<&CgExecutionLog> {
        self.root_log.as_ref()
    }

    /// Attach the root node log. Can be set once.
    ///
    /// Also fills `root_lp_value` from the root relaxation if still unset.
    pub fn set_root_log(&mut self, log: CgExecutionLog) -> BcpResult<()> {
        if self.root_log.is_some() {
            return Err(BcpError::SubLogAlreadySet("root_log"));
        }
        if self.bc.root_lp_value.is_none() {
            self.bc.root_lp_value = log.incumbent_value;
        }
        self.root_log = Some(log);
        Ok(())
    }

    /// Clear the optional statistics whose option is not enabled.
    pub fn restrict_to(&mut self, options: &LogOptions<BcpOption>) {
        if !options.contains(&BcpOption::RootInformation) {
            self.root_constraint_count = None;
            self.root_variable_count = None;
            self.root_log = None;
            self.bc.root_lp_value = None;
            self.bc.root_int_value = None;
            self.bc.root_int_solution = None;
        }
        if !options.contains(&BcpOption::CutInformation) {
            self.bc.cut_count = None;
            self.bc.cut_time = None;
            self.bc.cut_families = None;
        }
    }
}

impl LogDocument for BcpExecutionLog {
    const KD_TYPE: &'static str = "bcp";
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::execution_log::{BcStatus, CgStatus};

    #[test]
    fn test_json_flattens_bc_fields() {
        let mut log = BcpExecutionLog::new();
        log.bc.status = BcStatus::Optimum;
        log.bc.best_int_value = Some(12.0);
        log.pricing_time = Some(Duration::from_millis(500));

        let json = log.to_json();
        assert_eq!(json["kd_type"], "bcp");
        assert_eq!(json["status"], "Optimum");
        assert_eq!(json["best_int_value"], 12.0);
        assert_eq!(json["pricing_time"], 0.5);
        assert!(json.get("bc").is_none());
        assert!(json.get("root_log").is_none());
    }

    #[test]
    fn test_root_log_set_once() {
        let mut log = BcpExecutionLog::new();
        let root = CgExecutionLog {
            status: CgStatus::Optimum,
            incumbent_value: Some(7.5),
            ..Default::default()
        };
        log.set_root_log(root.clone()).unwrap();
        assert_eq!(log.bc.root_lp_value, Some(7.5));
        assert!(matches!(
            log.set_root_log(root),
            Err(BcpError::SubLogAlreadySet("root_log"))
        ));

        let json = log.to_json();
        assert_eq!(json["root_log"]["kd_type"], "cg");
        assert_eq!(json["root_log"]["status"], "Optimum");
    }

    fn full_log() -> BcpExecutionLog {
        let mut log = BcpExecutionLog::new();
        log.bc.status = BcStatus::Optimum;
        log.bc.best_int_value = Some(3.0);
        log.bc.cut_count = Some(14);
        log.bc.cut_time = Some(Duration::from_millis(20));
        log.bc.cut_families = Some(Vec::new());
        log.root_constraint_count = Some(10);
        log.root_variable_count = Some(25);
        log.final_variable_count = Some(40);
        log.set_root_log(CgExecutionLog {
            status: CgStatus::Optimum,
            incumbent_value: Some(2.5),
            ..Default::default()
        })
        .unwrap();
        log
    }

    #[test]
    fn test_restrict_to_root_information() {
        let mut log = full_log();
        log.restrict_to(&LogOptions::from([BcpOption::RootInformation]));

        let json = log.to_json();
        assert_eq!(json["root_lp_value"], 2.5);
        assert_eq!(json["root_constraint_count"], 10);
        assert_eq!(json["root_log"]["kd_type"], "cg");
        assert!(json.get("cut_count").is_none());
        assert!(json.get("cut_families").is_none());
        assert_eq!(json["final_variable_count"], 40);
        assert_eq!(json["best_int_value"], 3.0);
    }

    #[test]
    fn test_restrict_to_no_options() {
        let mut log = full_log();
        log.restrict_to(&LogOptions::new());

        assert!(log.root_log().is_none());
        assert!(log.bc.root_lp_value.is_none());
        assert!(log.root_variable_count.is_none());
        assert!(log.bc.cut_time.is_none());
        assert_eq!(log.bc.status, BcStatus::Optimum);

        // Cleared sub-logs can be attached again.
        log.set_root_log(CgExecutionLog::default()).unwrap();
    }

    #[test]
    fn test_restrict_to_all_options_keeps_everything() {
        let mut log = full_log();
        let before = log.clone();
        log.restrict_to(&LogOptions::from([
            BcpOption::RootInformation,
            BcpOption::CutInformation,
        ]));
        assert_eq!(log, before);
    }
}
