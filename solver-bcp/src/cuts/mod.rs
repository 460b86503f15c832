//! Cut separation: family registry, dependency graph and round scheduling.
//!
//! - Cut families with limits and counters
//! - Fallback dependencies between families (acyclic)
//! - Per-callback separation rounds
//! - JSON strategy configuration

mod config;
mod family;
mod graph;
mod scheduler;
mod strategy;

pub use config::{DependencyConfig, FamilyConfig, StrategyConfig};
pub use family::{
    CutFamily, FamilyId, FamilyLimits, FamilyStats, LimitKind, SeparationRoutine,
};
pub use graph::{CycleDetected, DependencyGraph};
pub use scheduler::{plan_family, FamilyDecision, Invocation, SeparationRound, SkipReason};
pub use strategy::SeparationStrategy;
