//! Writing estimates to disk and rendering them for the terminal.

use crate::pipeline::Estimate;
use crate::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tephra_model::{EmpiricalCdf, Histogram, HISTOGRAM_BINS};
use tracing::info;

/// Header of the result table.
pub const RESULT_HEADER: &str = "Place,10th Percentile,50th Percentile,90th Percentile";

/// File-name stem for a place.
///
/// `"Napier, New Zealand"` becomes `"Napier"`; without a comma spaces become
/// underscores, so `"Upper Hutt"` becomes `"Upper_Hutt"`.
pub fn file_stem(place: &str) -> String {
    match place.split_once(',') {
        Some((head, _)) => head.replace(' ', ""),
        None => place.replace(' ', "_"),
    }
}

#[derive(Serialize)]
struct EstimateReport<'a> {
    generated_at: DateTime<Utc>,
    #[serde(flatten)]
    estimate: &'a Estimate,
}

/// Write `<stem>.csv` (the one-row result table) and `<stem>.json` (the full estimate).
pub fn write_tables(estimate: &Estimate, output_dir: &Path) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(output_dir)?;
    let stem = file_stem(&estimate.result.place_name);

    let csv_path = output_dir.join(format!("{}.csv", stem));
    let mut csv = BufWriter::new(File::create(&csv_path)?);
    writeln!(csv, "{}", RESULT_HEADER)?;
    writeln!(
        csv,
        "{},{},{},{}",
        csv_field(&estimate.result.place_name),
        estimate.result.p10,
        estimate.result.p50,
        estimate.result.p90
    )?;
    csv.flush()?;
    info!("Wrote {}", csv_path.display());

    let json_path = output_dir.join(format!("{}.json", stem));
    let report = EstimateReport {
        generated_at: Utc::now(),
        estimate,
    };
    let json = BufWriter::new(File::create(&json_path)?);
    serde_json::to_writer_pretty(json, &report)?;
    info!("Wrote {}", json_path.display());

    Ok(vec![csv_path, json_path])
}

/// Write the empirical CDF (`<stem>_cdf.csv`) and the density histogram
/// (`<stem>_histogram.csv`) of the samples.
pub fn write_distribution(estimate: &Estimate, output_dir: &Path) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(output_dir)?;
    let stem = file_stem(&estimate.result.place_name);

    let cdf = EmpiricalCdf::from_samples(&estimate.samples)?;
    let cdf_path = output_dir.join(format!("{}_cdf.csv", stem));
    let mut out = BufWriter::new(File::create(&cdf_path)?);
    writeln!(out, "volume_m3,cumulative_probability")?;
    for (volume, probability) in &cdf.points {
        writeln!(out, "{},{}", volume, probability)?;
    }
    out.flush()?;
    info!("Wrote {}", cdf_path.display());

    let histogram = Histogram::density(&estimate.samples, HISTOGRAM_BINS)?;
    let hist_path = output_dir.join(format!("{}_histogram.csv", stem));
    let mut out = BufWriter::new(File::create(&hist_path)?);
    writeln!(out, "bin_start_m3,bin_end_m3,density")?;
    for (i, density) in histogram.density.iter().enumerate() {
        writeln!(out, "{},{},{}", histogram.edges[i], histogram.edges[i + 1], density)?;
    }
    out.flush()?;
    info!("Wrote {}", hist_path.display());

    Ok(vec![cdf_path, hist_path])
}

/// Render the result row and descriptive statistics as a text table.
pub fn render_table(estimate: &Estimate) -> String {
    let r = &estimate.result;
    let s = &estimate.statistics;
    let mut lines = vec![
        format!(
            "{:<24} {:>16} {:>16} {:>16}",
            "Place", "10th Percentile", "50th Percentile", "90th Percentile"
        ),
        format!("{:<24} {:>16.2} {:>16.2} {:>16.2}", r.place_name, r.p10, r.p50, r.p90),
        String::new(),
    ];
    lines.extend(
        [
            ("count", s.count as f64),
            ("mean", s.mean),
            ("std", s.std_dev),
            ("min", s.min),
            ("25%", s.p25),
            ("50%", s.p50),
            ("75%", s.p75),
            ("max", s.max),
        ]
        .into_iter()
        .map(|(label, value)| format!("{:<6} {:>16.2}", label, value)),
    );
    lines.push(format!("seed   {:>16}", estimate.seed));

    let mut table = lines.join("\n");
    table.push('\n');
    table
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tephra_model::{
        summarize, CleanupVolumeBound, SampleBounds, SampleStatistics, VolumeSampler,
    };

    fn estimate_for(place: &str, min: f64, max: f64) -> Estimate {
        let bounds = SampleBounds::Direct {
            volume: CleanupVolumeBound { min, max },
        };
        let samples = VolumeSampler::new(1000).unwrap().sample_seeded(&bounds, 3).unwrap();
        Estimate {
            result: summarize(&samples, place).unwrap(),
            bounds,
            surfaces: None,
            zones: None,
            statistics: SampleStatistics::from_samples(&samples).unwrap(),
            seed: 3,
            samples,
        }
    }

    #[test]
    fn test_file_stem() {
        assert_eq!(file_stem("Napier, New Zealand"), "Napier");
        assert_eq!(file_stem("Palmerston North, New Zealand"), "PalmerstonNorth");
        assert_eq!(file_stem("Upper Hutt"), "Upper_Hutt");
    }

    #[test]
    fn test_csv_field_quotes_commas() {
        assert_eq!(csv_field("Napier"), "Napier");
        assert_eq!(csv_field("Napier, NZ"), "\"Napier, NZ\"");
    }

    #[test]
    fn test_write_tables() {
        let dir = tempfile::tempdir().unwrap();
        let estimate = estimate_for("Napier, New Zealand", 100.0, 200.0);
        let written = write_tables(&estimate, dir.path()).unwrap();
        assert_eq!(written.len(), 2);

        let csv = std::fs::read_to_string(dir.path().join("Napier.csv")).unwrap();
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some(RESULT_HEADER));
        assert!(lines.next().unwrap().starts_with("\"Napier, New Zealand\","));

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(dir.path().join("Napier.json")).unwrap()).unwrap();
        assert_eq!(json["seed"], 3);
        assert_eq!(json["bounds"]["mode"], "direct");
        assert!(json["generated_at"].is_string());
        assert!(json.get("samples").is_none());
    }

    #[test]
    fn test_write_distribution() {
        let dir = tempfile::tempdir().unwrap();
        let estimate = estimate_for("Upper Hutt", 100.0, 200.0);
        write_distribution(&estimate, dir.path()).unwrap();

        let cdf = std::fs::read_to_string(dir.path().join("Upper_Hutt_cdf.csv")).unwrap();
        assert_eq!(cdf.lines().count(), 1 + 1000);

        let hist = std::fs::read_to_string(dir.path().join("Upper_Hutt_histogram.csv")).unwrap();
        assert_eq!(hist.lines().count(), 1 + HISTOGRAM_BINS);
    }

    #[test]
    fn test_render_table() {
        let table = render_table(&estimate_for("Napier", 10.0, 20.0));
        let lines: Vec<&str> = table.lines().collect();
        assert!(lines[0].starts_with("Place"));
        assert!(lines[1].starts_with("Napier"));
        assert!(lines[2].is_empty());
        assert!(lines[3].starts_with("count") && lines[3].ends_with("1000.00"));
        assert_eq!(lines.len(), 12);
        assert_eq!(lines[11].split_whitespace().collect::<Vec<_>>(), ["seed", "3"]);
        assert!(table.ends_with('\n'));
    }
}
