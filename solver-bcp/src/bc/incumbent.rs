//! Best known integer solution.

use crate::model::Valuation;

/// Improvement threshold for accepting a new incumbent.
const IMPROVEMENT_TOL: f64 = 1e-9;

/// Tracks the best known feasible solution (incumbent).
#[derive(Debug, Clone)]
pub struct IncumbentTracker {
    /// Current best solution (if any).
    pub solution: Option<Valuation>,

    /// Objective value of incumbent (primal bound).
    /// Initialized to +inf for minimization.
    pub obj_val: f64,

    /// Number of times incumbent was updated.
    pub update_count: u64,
}

impl Default for IncumbentTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl IncumbentTracker {
    /// Create a new incumbent tracker.
    pub fn new() -> Self {
        Self {
            solution: None,
            obj_val: f64::INFINITY,
            update_count: 0,
        }
    }

    /// Check if we have an incumbent.
    pub fn has_incumbent(&self) -> bool {
        self.solution.is_some()
    }

    /// Objective value, if there is an incumbent.
    pub fn value(&self) -> Option<f64> {
        self.has_incumbent().then_some(self.obj_val)
    }

    /// Try to update incumbent with a new solution.
    ///
    /// Returns true if the incumbent was improved.
    pub fn update(&mut self, x: &Valuation, obj: f64) -> bool {
        // For minimization, accept if strictly better
        if obj < self.obj_val - IMPROVEMENT_TOL {
            self.solution = Some(x.clone());
            self.obj_val = obj;
            self.update_count += 1;
            true
        } else {
            false
        }
    }

    /// Relative gap to a dual bound: (incumbent - bound) / |incumbent|.
    pub fn gap(&self, dual_bound: f64) -> f64 {
        if self.obj_val.is_infinite() || dual_bound.is_infinite() {
            return f64::INFINITY;
        }
        let denom = self.obj_val.abs().max(1e-10);
        (self.obj_val - dual_bound).abs() / denom
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_incumbent_tracker() {
        let mut tracker = IncumbentTracker::new();

        assert!(!tracker.has_incumbent());
        assert_eq!(tracker.value(), None);

        // First solution
        assert!(tracker.update(&Valuation::new(vec![1.0, 2.0]), 10.0));
        assert_eq!(tracker.value(), Some(10.0));

        // Not an improvement
        assert!(!tracker.update(&Valuation::new(vec![0.0, 2.0]), 10.0));
        assert!(!tracker.update(&Valuation::new(vec![0.0, 2.0]), 12.0));
        assert_eq!(tracker.update_count, 1);

        assert!(tracker.update(&Valuation::new(vec![1.0, 1.0]), 8.0));
        assert_eq!(tracker.solution.as_ref().unwrap().as_slice(), &[1.0, 1.0]);
    }

    #[test]
    fn test_gap() {
        let mut tracker = IncumbentTracker::new();
        assert_eq!(tracker.gap(5.0), f64::INFINITY);
        tracker.update(&Valuation::new(vec![1.0]), 10.0);
        assert!((tracker.gap(8.0) - 0.2).abs() < 1e-12);
    }
}
