use std::env;
use std::path::PathBuf;

use crate::error::ConfigError;

pub mod constant {
    pub(crate) const MAP_RANGE: (i32, i32) = (0, 100);
    pub(crate) const NUM_WAREHOUSES: usize = 5;
    pub(crate) const CLIENT_COUNT_RANGE: (usize, usize) = (3, 30);
    pub(crate) const VEHICLE_COUNT_RANGE: (usize, usize) = (3, 6);
    pub(crate) const DEMAND_RANGE: (i64, i64) = (100, 200);
    pub(crate) const SCENARIO_SEED: u64 = 64;

    pub(crate) const SUPPORTED_FLEET: (usize, usize) = (1, 64);
    pub(crate) const UNLOAD_THRESHOLD: f64 = 0.75;
    pub(crate) const MAX_IDLE_DIVERSIONS: usize = 2;

    pub(crate) const CLUSTER_SEED: u64 = 42;
    pub(crate) const KMEANS_RESTARTS: usize = 10;
    pub(crate) const KMEANS_MAX_ITER: usize = 300;

    pub(crate) const PLAN_CSV: &str = "plan_routes.csv";
}

/// Runtime settings for the planner binary, read from the environment.
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    pub scenario_dir: Option<PathBuf>,
    pub scenario_seed: u64,
    pub cluster_seed: u64,
    pub plan_csv: PathBuf,
    pub plan_json: Option<PathBuf>,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            scenario_dir: None,
            scenario_seed: constant::SCENARIO_SEED,
            cluster_seed: constant::CLUSTER_SEED,
            plan_csv: PathBuf::from(constant::PLAN_CSV),
            plan_json: None,
        }
    }
}

impl PlannerConfig {
    /// Expects `dotenv` to have been loaded already.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(dir) = env::var("SCENARIO_DIR") {
            config.scenario_dir = Some(PathBuf::from(dir));
        }
        if let Some(seed) = parse_seed("SCENARIO_SEED")? {
            config.scenario_seed = seed;
        }
        if let Some(seed) = parse_seed("CLUSTER_SEED")? {
            config.cluster_seed = seed;
        }
        if let Ok(path) = env::var("PLAN_CSV") {
            config.plan_csv = PathBuf::from(path);
        }
        if let Ok(path) = env::var("PLAN_JSON") {
            config.plan_json = Some(PathBuf::from(path));
        }

        Ok(config)
    }
}

fn parse_seed(name: &'static str) -> Result<Option<u64>, ConfigError> {
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse::<u64>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue { name, value }),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_use_fixed_seeds() {
        let config = PlannerConfig::default();
        assert_eq!(config.cluster_seed, 42);
        assert_eq!(config.plan_csv, PathBuf::from("plan_routes.csv"));
        assert!(config.scenario_dir.is_none());
    }

    #[test]
    fn rejects_non_numeric_seed() {
        env::set_var("CLUSTER_SEED_TEST_ONLY", "abc");
        let err = parse_seed("CLUSTER_SEED_TEST_ONLY").unwrap_err();
        assert!(err.to_string().contains("CLUSTER_SEED_TEST_ONLY"));
        env::remove_var("CLUSTER_SEED_TEST_ONLY");
    }
}
