//! Structured execution logs.
//!
//! Every run produces a log document: a flat record of optional statistics,
//! a terminal status and, for composite runs, owned sub-logs. Documents are
//! serialized with a `kd_type` discriminant:
//!
//! | type                  | `kd_type` | sub-logs                        |
//! |-----------------------|-----------|---------------------------------|
//! | [`MlbExecutionLog`]   | `mlb`     | -                               |
//! | [`BlbExecutionLog`]   | `blb`     | `forward_log`, `backward_log`   |
//! | [`BcExecutionLog`]    | `bc`      | -                               |
//! | [`BcpExecutionLog`]   | `bcp`     | `root_log`                      |
//! | [`CgExecutionLog`]    | `cg`      | per-iteration pricing logs      |
//!
//! Serialization can be called at any point of a run; unset statistics are
//! left out of the document.

/// Implements `Display` with the variant name, matching the serialized form.
macro_rules! status_display {
    ($ty:ident { $($variant:ident),* $(,)? }) => {
        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                let name = match self {
                    $($ty::$variant => stringify!($variant),)*
                };
                f.write_str(name)
            }
        }
    };
}

mod bc;
mod bcp;
mod blb;
mod cg;
mod mlb;

use std::collections::HashSet;

use serde::{Serialize, Serializer};

pub use bc::{BcExecutionLog, BcStatus, CutFamilyLog};
pub use bcp::BcpExecutionLog;
pub use blb::{BlbExecutionLog, BlbStatus};
pub use cg::{CgExecutionLog, CgIterationLog, CgStatus};
pub use mlb::{MlbExecutionLog, MlbStatus};

/// Optional statistics of branch-and-cut logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BcOption {
    /// Root relaxation value and root integer solution.
    RootInformation,

    /// The best integer solution itself (linear in the number of variables).
    BestIntSolution,

    /// Cut totals and the per-family breakdown.
    CutInformation,
}

/// Optional statistics of branch-cut-price logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BcpOption {
    /// Root node counts and the root column generation log.
    RootInformation,

    /// Cut totals and the per-family breakdown.
    CutInformation,
}

/// Optional statistics of column generation logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CgOption {
    /// One entry per iteration.
    IterationsInformation,

    /// The final relaxation solution.
    IncumbentSolution,
}

/// Set of enabled options.
pub type LogOptions<T> = HashSet<T>;

/// A log type with a document discriminant.
pub trait LogDocument: Serialize + Sized {
    /// Value of the `kd_type` field.
    const KD_TYPE: &'static str;

    /// Wrap the log so that it serializes with its `kd_type`.
    fn tagged(&self) -> Tagged<'_, Self> {
        Tagged {
            kd_type: Self::KD_TYPE,
            log: self,
        }
    }

    /// Serialize the current field values.
    fn to_json(&self) -> serde_json::Value {
        // Logs contain only string-keyed maps and plain numbers; non-finite
        // floats become null, so conversion does not fail.
        serde_json::to_value(self.tagged()).unwrap_or(serde_json::Value::Null)
    }

    /// Serialize to a compact JSON string.
    fn to_json_string(&self) -> String {
        self.to_json().to_string()
    }
}

/// A log serialized together with its `kd_type`.
#[derive(Serialize)]
pub struct Tagged<'a, T: Serialize> {
    kd_type: &'static str,
    #[serde(flatten)]
    log: &'a T,
}

/// Any log, for places that store heterogeneous sub-logs.
#[derive(Debug, Clone, PartialEq)]
pub enum ExecutionLog {
    /// Single-direction labeling.
    Mlb(MlbExecutionLog),

    /// Bidirectional labeling.
    Blb(BlbExecutionLog),

    /// Branch and cut.
    Bc(BcExecutionLog),

    /// Branch, cut and price.
    Bcp(BcpExecutionLog),

    /// Column generation.
    Cg(CgExecutionLog),
}

impl ExecutionLog {
    /// The `kd_type` of the wrapped log.
    pub fn kd_type(&self) -> &'static str {
        match self {
            ExecutionLog::Mlb(_) => MlbExecutionLog::KD_TYPE,
            ExecutionLog::Blb(_) => BlbExecutionLog::KD_TYPE,
            ExecutionLog::Bc(_) => BcExecutionLog::KD_TYPE,
            ExecutionLog::Bcp(_) => BcpExecutionLog::KD_TYPE,
            ExecutionLog::Cg(_) => CgExecutionLog::KD_TYPE,
        }
    }

    /// Serialize the wrapped log.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            ExecutionLog::Mlb(log) => log.to_json(),
            ExecutionLog::Blb(log) => log.to_json(),
            ExecutionLog::Bc(log) => log.to_json(),
            ExecutionLog::Bcp(log) => log.to_json(),
            ExecutionLog::Cg(log) => log.to_json(),
        }
    }
}

impl Serialize for ExecutionLog {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ExecutionLog::Mlb(log) => log.tagged().serialize(serializer),
            ExecutionLog::Blb(log) => log.tagged().serialize(serializer),
            ExecutionLog::Bc(log) => log.tagged().serialize(serializer),
            ExecutionLog::Bcp(log) => log.tagged().serialize(serializer),
            ExecutionLog::Cg(log) => log.tagged().serialize(serializer),
        }
    }
}

impl std::fmt::Display for ExecutionLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_json())
    }
}

macro_rules! impl_from_log {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        $(
            impl From<$ty> for ExecutionLog {
                fn from(log: $ty) -> Self {
                    ExecutionLog::$variant(log)
                }
            }
        )*
    };
}

impl_from_log!(
    Mlb(MlbExecutionLog),
    Blb(BlbExecutionLog),
    Bc(BcExecutionLog),
    Bcp(BcpExecutionLog),
    Cg(CgExecutionLog),
);

/// Serialize a sub-log with its `kd_type`.
pub(crate) fn serialize_sub_log<S, T>(log: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    T: LogDocument,
{
    match log {
        Some(log) => log.tagged().serialize(serializer),
        None => serializer.serialize_none(),
    }
}

/// Durations are written as seconds.
pub(crate) mod secs {
    use std::time::Duration;

    use serde::Serializer;

    pub fn serialize<S: Serializer>(d: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(d.as_secs_f64())
    }

    pub mod option {
        use std::time::Duration;

        use serde::Serializer;

        pub fn serialize<S: Serializer>(
            d: &Option<Duration>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match d {
                Some(d) => serializer.serialize_some(&d.as_secs_f64()),
                None => serializer.serialize_none(),
            }
        }
    }
}
