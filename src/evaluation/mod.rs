pub mod distance;
pub mod feasibility;
