use anyhow::{Context, Result};
use glow_core::IonoDataset;
use std::fs;
use std::path::Path;

/// Persist the full dataset (axis, profiles, emission array, run
/// metadata) as a JSON run report next to the working directory.
pub(super) fn write_run_report(path: &Path, dataset: &IonoDataset) -> Result<()> {
    let json = serde_json::to_string_pretty(dataset).context("failed to serialize run report")?;
    fs::write(path, json)
        .with_context(|| format!("failed to write run report '{}'", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::write_run_report;
    use glow_core::modules::output::{DatasetAttrs, IonoDataset, ParsedOutput};
    use glow_core::{
        DailyIndices, IndexWindow, NUM_ALTITUDES, NUM_QUANTITIES, NUM_WAVELENGTHS,
        SimulationRequest,
    };
    use hifitime::Epoch;
    use tempfile::TempDir;

    fn small_dataset() -> IonoDataset {
        let parsed = ParsedOutput {
            alt_km: (0..NUM_ALTITUDES).map(|row| 96.5 + row as f64).collect(),
            profiles: vec![vec![1.0; NUM_ALTITUDES]; NUM_QUANTITIES],
            ver: vec![0.0; NUM_ALTITUDES * NUM_WAVELENGTHS],
        };
        let request = SimulationRequest::new(
            Epoch::from_gregorian_utc(2015, 12, 13, 10, 0, 0, 0),
            65.1,
            -147.4,
            1.0,
            100.0,
        );
        let indices = DailyIndices {
            f107: 150.0,
            f107a: 148.0,
            ap: 4.0,
        };
        let window = IndexWindow {
            previous: indices,
            current: indices,
        };
        IonoDataset::assemble(parsed, DatasetAttrs::new(&request, window))
            .expect("13 profiles should assemble")
    }

    #[test]
    fn report_lands_on_disk_as_json() {
        let temp = TempDir::new().expect("tempdir should be created");
        let path = temp.path().join("glow_run.json");

        write_run_report(&path, &small_dataset()).expect("report should be written");

        let written = std::fs::read_to_string(&path).expect("report should be readable");
        assert!(written.contains("\"alt_km\""));
        assert!(written.contains("\"glat\""));
    }
}
