pub mod assignment;
pub mod planner;
pub mod route_builder;

pub use assignment::*;
pub use planner::*;
pub use route_builder::*;
