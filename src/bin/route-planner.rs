use cluster_vrp::solver::cluster_first::planner;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    planner::run()
}
