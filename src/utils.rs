use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use csv::Writer;
use itertools::Itertools;

use crate::domain::solution::PlanSummary;
use crate::domain::types::StopKind;
use crate::error::LoadError;

pub fn format_route(route: &[String]) -> String {
    route.iter().join(" -> ")
}

/// One CSV row per route stop, in visiting order.
pub fn save_to_csv(summary: &PlanSummary, path: &Path) -> Result<(), LoadError> {
    let mut wtr = Writer::from_path(path)?;

    wtr.write_record(["vehicle", "sequence", "stop", "kind", "x", "y"])?;

    for vp in &summary.vehicles {
        for (seq, stop) in vp.stops.iter().enumerate() {
            let kind = match stop.kind {
                StopKind::Depot => "depot",
                StopKind::Client => "client",
            };
            wtr.write_record([
                vp.vehicle_id.clone(),
                seq.to_string(),
                stop.id.clone(),
                kind.to_string(),
                stop.point.x.to_string(),
                stop.point.y.to_string(),
            ])?;
        }
    }

    wtr.flush()?;
    Ok(())
}

pub fn save_to_json(summary: &PlanSummary, path: &Path) -> Result<(), LoadError> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, summary)?;
    writer.flush()?;
    Ok(())
}
