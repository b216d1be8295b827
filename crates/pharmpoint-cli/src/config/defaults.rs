use crate::cli::StrategyName;
use pharmpoint::engine::merge::DEFAULT_MERGE_THRESHOLD;
use pharmpoint::engine::strategy::{DEFAULT_MAX_RADIUS, DEFAULT_MIN_RADIUS, DEFAULT_NUM_POINTS};

pub struct DefaultsConfig {
    pub merge_threshold: f64,
    pub strategy: StrategyName,
    pub num_points: usize,
    pub min_radius: f64,
    pub max_radius: f64,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            merge_threshold: DEFAULT_MERGE_THRESHOLD,
            strategy: StrategyName::Simple,
            num_points: DEFAULT_NUM_POINTS,
            min_radius: DEFAULT_MIN_RADIUS,
            max_radius: DEFAULT_MAX_RADIUS,
        }
    }
}
