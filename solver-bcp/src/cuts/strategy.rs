//! Registry of cut families and their dependencies.

use std::collections::HashMap;
use std::time::Duration;

use super::family::{CutFamily, FamilyId, LimitKind, SeparationRoutine};
use super::graph::DependencyGraph;
use crate::error::{BcpError, BcpResult};
use crate::execution_log::CutFamilyLog;

/// Which families are separated, with what limits and in what order.
///
/// Configured before a solve starts; during the solve only the round
/// scheduler mutates it (counters). Each solver instance owns its own
/// strategy.
#[derive(Debug, Default)]
pub struct SeparationStrategy {
    /// Families in registration order.
    pub(super) families: Vec<CutFamily>,

    /// Name to family index.
    index: HashMap<String, FamilyId>,

    /// Fallback edges.
    pub(super) graph: DependencyGraph,

    /// Cached topological order, refreshed on every graph change.
    pub(super) order: Vec<FamilyId>,
}

impl SeparationStrategy {
    /// Create an empty strategy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new family with no routine and unlimited limits.
    pub fn register_family(&mut self, name: impl Into<String>) -> BcpResult<FamilyId> {
        let name = name.into();
        if self.index.contains_key(&name) {
            return Err(BcpError::DuplicateFamily(name));
        }

        let id = FamilyId(self.graph.add_node());
        debug_assert_eq!(id.0, self.families.len());
        self.index.insert(name.clone(), id);
        self.families.push(CutFamily::new(name));
        self.refresh_order();
        Ok(id)
    }

    /// Bind (or rebind) the detection routine of a family.
    pub fn set_routine<R>(&mut self, name: &str, routine: R) -> BcpResult<()>
    where
        R: SeparationRoutine + 'static,
    {
        let id = self.require(name)?;
        self.families[id.0].routine = Some(Box::new(routine));
        Ok(())
    }

    /// Overwrite one limit of a family.
    pub fn set_limit(&mut self, name: &str, kind: LimitKind, value: u64) -> BcpResult<()> {
        let id = self.require(name)?;
        self.families[id.0].limits.set(kind, Some(value));
        Ok(())
    }

    /// Reset one limit of a family to unlimited.
    pub fn clear_limit(&mut self, name: &str, kind: LimitKind) -> BcpResult<()> {
        let id = self.require(name)?;
        self.families[id.0].limits.set(kind, None);
        Ok(())
    }

    /// Attempt `to` in a round only if `from` found no cuts in that round.
    pub fn add_dependency(&mut self, from: &str, to: &str) -> BcpResult<()> {
        let from_id = self.require(from)?;
        let to_id = self.require(to)?;

        match self.graph.try_add_edge(from_id.0, to_id.0) {
            Ok(true) => {
                self.refresh_order();
                Ok(())
            }
            Ok(false) => Ok(()),
            Err(_) => Err(BcpError::Cycle {
                from: from.to_string(),
                to: to.to_string(),
            }),
        }
    }

    /// Check that every family can be separated.
    pub fn validate(&self) -> BcpResult<()> {
        match self.families.iter().find(|f| !f.has_routine()) {
            Some(family) => Err(BcpError::MissingRoutine(family.name.clone())),
            None => Ok(()),
        }
    }

    /// Look up a family identifier by name.
    pub fn id(&self, name: &str) -> Option<FamilyId> {
        self.index.get(name).copied()
    }

    /// Look up a family by name.
    pub fn family(&self, name: &str) -> Option<&CutFamily> {
        self.id(name).map(|id| &self.families[id.0])
    }

    /// Family by identifier.
    pub fn get(&self, id: FamilyId) -> Option<&CutFamily> {
        self.families.get(id.0)
    }

    /// Families in registration order.
    pub fn families(&self) -> impl Iterator<Item = &CutFamily> {
        self.families.iter()
    }

    /// Order in which families are attempted each round.
    pub fn order(&self) -> &[FamilyId] {
        &self.order
    }

    /// Prerequisites of a family.
    pub fn dependencies(&self, id: FamilyId) -> impl Iterator<Item = FamilyId> + '_ {
        self.graph.predecessors(id.0).iter().map(|&p| FamilyId(p))
    }

    /// Number of families.
    pub fn len(&self) -> usize {
        self.families.len()
    }

    /// Check if no family is registered.
    pub fn is_empty(&self) -> bool {
        self.families.is_empty()
    }

    /// Cuts added by all families.
    pub fn total_cuts(&self) -> u64 {
        self.families.iter().map(|f| f.stats.cuts_added).sum()
    }

    /// Time spent separating by all families.
    pub fn total_time(&self) -> Duration {
        self.families.iter().map(|f| f.stats.time_spent).sum()
    }

    /// Per-family breakdown for execution logs.
    pub fn family_logs(&self) -> Vec<CutFamilyLog> {
        self.families
            .iter()
            .map(|f| CutFamilyLog {
                name: f.name.clone(),
                cut_count: Some(f.stats.cuts_added),
                cut_iterations: Some(f.stats.iterations_run),
                cut_time: Some(f.stats.time_spent),
            })
            .collect()
    }

    /// Zero all counters, for reuse in a new solve.
    pub fn reset_statistics(&mut self) {
        for family in &mut self.families {
            family.stats = Default::default();
        }
    }

    fn require(&self, name: &str) -> BcpResult<FamilyId> {
        self.id(name)
            .ok_or_else(|| BcpError::UnknownFamily(name.to_string()))
    }

    fn refresh_order(&mut self) {
        self.order = self
            .graph
            .topological_order()
            .into_iter()
            .map(FamilyId)
            .collect();
    }
}
