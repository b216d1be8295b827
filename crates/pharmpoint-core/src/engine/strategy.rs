//! Selection strategies: policies that reduce a feature set to a bounded output.
//!
//! A strategy owns its parameters and is chosen explicitly through [`StrategyKind`].
//! Strategies bound *how many* features survive; ranking the survivors by weight stays a
//! pipeline concern (see [`crate::workflows::derive::rank_by_weight`]).
//!
//! New policies (for instance a ranking driven by density correlation) plug in by
//! implementing [`SelectionStrategy`] and adding a [`StrategyKind`] variant.

use super::config::ConfigError;
use super::merge::{MergeError, merge_nearby_features, validate_threshold};
use crate::core::models::feature::Feature;
use std::fmt;

/// Default upper bound on the number of features a strategy returns.
pub const DEFAULT_NUM_POINTS: usize = 5;
/// Default lower radius bound of the adjusted strategy, in Angstroms.
pub const DEFAULT_MIN_RADIUS: f64 = 0.0;
/// Default upper radius bound of the adjusted strategy, in Angstroms.
pub const DEFAULT_MAX_RADIUS: f64 = 1.0;

pub trait SelectionStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    /// Reduces `features` to at most the strategy's point budget.
    fn select(&self, features: &[Feature]) -> Result<Vec<Feature>, MergeError>;
}

/// Merges with the configured threshold and keeps the first `num_points` features in the
/// order the merge leaves them. No ranking is applied.
#[derive(Debug, Clone, PartialEq)]
pub struct SimpleStrategy {
    num_points: usize,
    threshold: f64,
}

impl SimpleStrategy {
    pub fn new(num_points: usize, threshold: f64) -> Result<Self, ConfigError> {
        validate_num_points(num_points)?;
        validate_strategy_threshold(threshold)?;
        Ok(Self {
            num_points,
            threshold,
        })
    }
}

impl SelectionStrategy for SimpleStrategy {
    fn name(&self) -> &'static str {
        "simple"
    }

    fn select(&self, features: &[Feature]) -> Result<Vec<Feature>, MergeError> {
        let mut merged = merge_nearby_features(features, self.threshold)?;
        merged.truncate(self.num_points);
        Ok(merged)
    }
}

/// Radius-aware variant of [`SimpleStrategy`].
///
/// After merging, every feature's radius is clamped into `[min_radius, max_radius]`, then
/// the first `num_points` features are kept. Positions, kinds, and weights are untouched,
/// so the clamp only tightens or loosens the tolerance sphere a search tool applies around
/// each point. A radius already inside the bounds is left exactly as it was.
#[derive(Debug, Clone, PartialEq)]
pub struct AdjustedStrategy {
    num_points: usize,
    threshold: f64,
    min_radius: f64,
    max_radius: f64,
}

impl AdjustedStrategy {
    pub fn new(
        num_points: usize,
        threshold: f64,
        min_radius: f64,
        max_radius: f64,
    ) -> Result<Self, ConfigError> {
        validate_num_points(num_points)?;
        validate_strategy_threshold(threshold)?;
        if !(min_radius.is_finite() && min_radius >= 0.0) {
            return Err(ConfigError::InvalidParameter {
                name: "min_radius",
                reason: format!("must be a non-negative number (got {})", min_radius),
            });
        }
        if !(max_radius.is_finite() && max_radius > 0.0) {
            return Err(ConfigError::InvalidParameter {
                name: "max_radius",
                reason: format!("must be a positive number (got {})", max_radius),
            });
        }
        if min_radius > max_radius {
            return Err(ConfigError::InvalidParameter {
                name: "min_radius",
                reason: format!(
                    "must not exceed max_radius ({} > {})",
                    min_radius, max_radius
                ),
            });
        }
        Ok(Self {
            num_points,
            threshold,
            min_radius,
            max_radius,
        })
    }
}

impl SelectionStrategy for AdjustedStrategy {
    fn name(&self) -> &'static str {
        "adjusted"
    }

    fn select(&self, features: &[Feature]) -> Result<Vec<Feature>, MergeError> {
        let merged = merge_nearby_features(features, self.threshold)?;
        merged
            .iter()
            .take(self.num_points)
            .map(|f| {
                f.with_radius(f.radius().clamp(self.min_radius, self.max_radius))
                    .map_err(MergeError::from)
            })
            .collect()
    }
}

/// Explicit choice of selection policy, with the parameters specific to each.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum StrategyKind {
    #[default]
    Simple,
    Adjusted { min_radius: f64, max_radius: f64 },
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StrategyKind::Simple => f.write_str("simple"),
            StrategyKind::Adjusted {
                min_radius,
                max_radius,
            } => write!(f, "adjusted [{}, {}]", min_radius, max_radius),
        }
    }
}

/// The strategy to apply and the point budget it works with.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionConfig {
    pub strategy: StrategyKind,
    pub num_points: usize,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            strategy: StrategyKind::default(),
            num_points: DEFAULT_NUM_POINTS,
        }
    }
}

impl SelectionConfig {
    /// Instantiates the configured strategy for a given merge threshold.
    pub fn build(&self, threshold: f64) -> Result<Box<dyn SelectionStrategy>, ConfigError> {
        let strategy: Box<dyn SelectionStrategy> = match self.strategy {
            StrategyKind::Simple => Box::new(SimpleStrategy::new(self.num_points, threshold)?),
            StrategyKind::Adjusted {
                min_radius,
                max_radius,
            } => Box::new(AdjustedStrategy::new(
                self.num_points,
                threshold,
                min_radius,
                max_radius,
            )?),
        };
        Ok(strategy)
    }
}

fn validate_num_points(num_points: usize) -> Result<(), ConfigError> {
    if num_points == 0 {
        return Err(ConfigError::InvalidParameter {
            name: "num_points",
            reason: "must be at least 1".to_string(),
        });
    }
    Ok(())
}

fn validate_strategy_threshold(threshold: f64) -> Result<(), ConfigError> {
    validate_threshold(threshold).map_err(|e| ConfigError::InvalidParameter {
        name: "merge_threshold",
        reason: e.to_string(),
    })
}
