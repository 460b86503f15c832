//! Serializable description of a separation strategy.
//!
//! Lets families, limits and dependency edges be read from a JSON document
//! instead of being set up in code. Routines are still bound in code.

use serde::{Deserialize, Serialize};

use super::family::LimitKind;
use super::strategy::SeparationStrategy;
use crate::error::BcpResult;

/// Limits of one family. Missing fields mean unlimited.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilyConfig {
    /// Family name.
    pub name: String,

    /// Highest node number at which the family is attempted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_limit: Option<u64>,

    /// Maximum invocations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iteration_limit: Option<u64>,

    /// Maximum cuts in total.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cut_limit: Option<u64>,

    /// Maximum cuts per invocation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cuts_per_iteration: Option<u64>,
}

/// A fallback edge: `to` runs only if `from` found no cuts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyConfig {
    /// Prerequisite family.
    pub from: String,

    /// Dependent family.
    pub to: String,
}

/// Families and dependency edges of a strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyConfig {
    /// Families in registration order.
    #[serde(default)]
    pub families: Vec<FamilyConfig>,

    /// Dependency edges, applied after all families are registered.
    #[serde(default)]
    pub dependencies: Vec<DependencyConfig>,
}

impl StrategyConfig {
    /// Parse a JSON document.
    pub fn from_json_str(json: &str) -> BcpResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a JSON document.
    pub fn from_reader<R: std::io::Read>(reader: R) -> BcpResult<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Register the families, set their limits and add the edges.
    ///
    /// Stops at the first configuration error.
    pub fn apply(&self, strategy: &mut SeparationStrategy) -> BcpResult<()> {
        for family in &self.families {
            strategy.register_family(family.name.as_str())?;
            let limits = [
                (LimitKind::Node, family.node_limit),
                (LimitKind::Iteration, family.iteration_limit),
                (LimitKind::Cut, family.cut_limit),
                (LimitKind::CutsPerIteration, family.cuts_per_iteration),
            ];
            for (kind, value) in limits {
                if let Some(value) = value {
                    strategy.set_limit(&family.name, kind, value)?;
                }
            }
        }

        for edge in &self.dependencies {
            strategy.add_dependency(&edge.from, &edge.to)?;
        }
        Ok(())
    }

    /// Build a fresh strategy from this configuration.
    pub fn build(&self) -> BcpResult<SeparationStrategy> {
        let mut strategy = SeparationStrategy::new();
        self.apply(&mut strategy)?;
        Ok(strategy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BcpError;

    const DOC: &str = r#"{
        "families": [
            { "name": "clique", "node_limit": 10, "cuts_per_iteration": 3 },
            { "name": "odd-hole", "cut_limit": 500, "iteration_limit": 1 }
        ],
        "dependencies": [ { "from": "clique", "to": "odd-hole" } ]
    }"#;

    #[test]
    fn test_build_from_json() {
        let strategy = StrategyConfig::from_json_str(DOC).unwrap().build().unwrap();

        let clique = strategy.family("clique").unwrap();
        assert_eq!(clique.limits().node_limit, Some(10));
        assert_eq!(clique.limits().cuts_per_iteration, Some(3));
        assert_eq!(clique.limits().cut_limit, None);

        let odd_hole = strategy.family("odd-hole").unwrap();
        assert_eq!(odd_hole.limits().cut_limit, Some(500));
        assert_eq!(odd_hole.limits().iteration_limit, Some(1));

        let names: Vec<&str> = strategy
            .order()
            .iter()
            .map(|&id| strategy.get(id).unwrap().name())
            .collect();
        assert_eq!(names, vec!["clique", "odd-hole"]);
    }

    #[test]
    fn test_cycle_in_document() {
        let doc = r#"{
            "families": [ { "name": "a" }, { "name": "b" } ],
            "dependencies": [ { "from": "a", "to": "b" }, { "from": "b", "to": "a" } ]
        }"#;
        let err = StrategyConfig::from_json_str(doc).unwrap().build().unwrap_err();
        assert!(matches!(err, BcpError::Cycle { .. }));
    }

    #[test]
    fn test_malformed_document() {
        let err = StrategyConfig::from_json_str("{\"families\": 3}").unwrap_err();
        assert!(matches!(err, BcpError::InvalidConfig(_)));
    }
}
