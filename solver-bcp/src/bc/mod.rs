//! Branch-and-cut bookkeeping.
//!
//! The integer solver itself is external. A [`BranchAndCutSession`] sits
//! behind its callbacks: separation at each node, incumbent updates,
//! node closing and limit checks, and finally the execution log.

mod incumbent;
mod session;

pub use incumbent::IncumbentTracker;
pub use session::BranchAndCutSession;
