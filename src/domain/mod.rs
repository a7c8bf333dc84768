pub mod scenario;
pub mod solution;
pub mod types;
