use std::path::PathBuf;

use clap::Parser;

/// Interactive SpaceX launch records dashboard.
#[derive(Debug, Clone, Parser)]
#[command(name = "launch-dash", version, about)]
pub struct Args {
    /// Launch records to load at startup (.csv, .json or .parquet).
    #[arg(long, default_value = "spacex_launch_dash.csv")]
    pub dataset: PathBuf,

    /// Payload slider increment in kilograms.
    #[arg(long, default_value_t = 100.0, value_parser = parse_step)]
    pub payload_step: f64,
}

fn parse_step(s: &str) -> Result<f64, String> {
    let step: f64 = s.parse().map_err(|e| format!("{e}"))?;
    if step.is_finite() && step > 0.0 {
        Ok(step)
    } else {
        Err(format!("step must be a positive number of kilograms, got {s}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_bundled_dataset() {
        let args = Args::try_parse_from(["launch-dash"]).unwrap();
        assert_eq!(args.dataset, PathBuf::from("spacex_launch_dash.csv"));
        assert_eq!(args.payload_step, 100.0);
    }

    #[test]
    fn rejects_non_positive_step() {
        assert!(Args::try_parse_from(["launch-dash", "--payload-step", "0"]).is_err());
        assert!(Args::try_parse_from(["launch-dash", "--payload-step", "abc"]).is_err());
        let args = Args::try_parse_from(["launch-dash", "--payload-step", "250", "--dataset", "x.json"]).unwrap();
        assert_eq!(args.payload_step, 250.0);
        assert_eq!(args.dataset, PathBuf::from("x.json"));
    }
}
