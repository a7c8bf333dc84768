use thiserror::Error;

/// Rejections raised while validating a scenario, before any planning runs.
#[derive(Debug, Error, PartialEq)]
pub enum ScenarioError {
    #[error("fleet size {size} outside supported range {min}..={max}")]
    FleetSize { size: usize, min: usize, max: usize },

    #[error("scenario has no warehouses")]
    NoWarehouses,

    #[error("vehicle {0} has zero capacity")]
    ZeroCapacity(String),

    #[error("vehicle {id} starts with load {load} above capacity {capacity}")]
    LoadAboveCapacity { id: String, load: u64, capacity: u64 },

    #[error("vehicle {vehicle} starts at unknown warehouse {warehouse}")]
    UnknownWarehouse { vehicle: String, warehouse: String },

    #[error("{0} has non-finite coordinates")]
    NonFiniteCoordinates(String),

    #[error("duplicate identifier {0}")]
    DuplicateId(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("environment variable {name} has invalid value {value:?}")]
    InvalidValue { name: &'static str, value: String },
}

/// Failures reading a scenario from disk or writing a plan out.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid scenario: {0}")]
    Scenario(#[from] ScenarioError),
}
