use super::TrackReport;
use anyhow::Result;

pub fn print_json(report: &TrackReport) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    println!("{}", json);
    Ok(())
}
