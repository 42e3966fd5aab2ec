use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use serde::Serialize;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }
}

/// One row of `spacex_launch_dash.csv`.
#[derive(Debug, Serialize)]
struct LaunchRow {
    #[serde(rename = "Flight Number")]
    flight_number: i64,
    #[serde(rename = "Launch Site")]
    site: &'static str,
    class: i64,
    #[serde(rename = "Payload Mass (kg)")]
    payload_mass_kg: f64,
    #[serde(rename = "Booster Version Category")]
    booster_version_category: &'static str,
}

/// (site, weight in the launch mix, base success probability)
const SITES: [(&str, f64, f64); 4] = [
    ("CCAFS LC-40", 0.46, 0.27),
    ("VAFB SLC-4E", 0.18, 0.40),
    ("KSC LC-39A", 0.24, 0.77),
    ("CCAFS SLC-40", 0.12, 0.43),
];

/// (category, heaviest payload the booster flew)
const BOOSTERS: [(&str, f64); 5] = [
    ("v1.0", 700.0),
    ("v1.1", 4500.0),
    ("FT", 9600.0),
    ("B4", 6500.0),
    ("B5", 5400.0),
];

const N_LAUNCHES: i64 = 56;

fn pick_site(rng: &mut SimpleRng) -> (&'static str, f64) {
    let mut u = rng.next_f64();
    for (site, weight, success) in SITES {
        if u < weight {
            return (site, success);
        }
        u -= weight;
    }
    let (site, _, success) = SITES[SITES.len() - 1];
    (site, success)
}

fn generate(rng: &mut SimpleRng) -> Vec<LaunchRow> {
    (1..=N_LAUNCHES)
        .map(|flight_number| {
            let (site, base_success) = pick_site(rng);
            // Boosters evolve with flight number.
            let era = ((flight_number - 1) * BOOSTERS.len() as i64 / N_LAUNCHES) as usize;
            let (booster, max_payload) = BOOSTERS[era];
            let payload_mass_kg = (rng.next_f64() * max_payload / 10.0).round() * 10.0;
            let success_p = (base_success + 0.1 * era as f64).min(0.95);
            let class = i64::from(rng.next_f64() < success_p);
            LaunchRow {
                flight_number,
                site,
                class,
                payload_mass_kg,
                booster_version_category: booster,
            }
        })
        .collect()
}

fn write_csv(path: &str, rows: &[LaunchRow]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).with_context(|| format!("creating {path}"))?;
    for row in rows {
        writer.serialize(row).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}

fn write_parquet(path: &str, rows: &[LaunchRow]) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("Flight Number", DataType::Int64, false),
        Field::new("Launch Site", DataType::Utf8, false),
        Field::new("class", DataType::Int64, false),
        Field::new("Payload Mass (kg)", DataType::Float64, true),
        Field::new("Booster Version Category", DataType::Utf8, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.flight_number))),
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.site))),
            Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.class))),
            Arc::new(Float64Array::from_iter_values(rows.iter().map(|r| r.payload_mass_kg))),
            Arc::new(StringArray::from_iter_values(
                rows.iter().map(|r| r.booster_version_category),
            )),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).with_context(|| format!("creating {path}"))?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing parquet batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let rows = generate(&mut rng);

    write_csv("spacex_launch_dash.csv", &rows)?;
    write_parquet("spacex_launch_dash.parquet", &rows)?;

    let successes = rows.iter().filter(|r| r.class == 1).count();
    println!(
        "Wrote {} launches ({successes} successful) to spacex_launch_dash.csv and spacex_launch_dash.parquet",
        rows.len()
    );
    Ok(())
}
