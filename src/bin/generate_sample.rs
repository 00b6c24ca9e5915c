//! Writes two synthetic trade tables with the dashboard's column layout:
//! `export and import countries.csv` (Ireland by partner) and
//! `ireland import and export value.csv` (world by country), each with a
//! Parquet copy next to it.

use std::path::Path;
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

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// One output row; `Unit` mirrors the extra columns of real exports.
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct Row {
    domain: String,
    area: String,
    element: String,
    year: i64,
    unit: &'static str,
    value: Option<f64>,
}

const YEARS: std::ops::RangeInclusive<i64> = 2010..=2022;
const ELEMENTS: [&str; 3] = ["Import Value", "Export Value", "Import Quantity"];

fn generate(
    rng: &mut SimpleRng,
    domains: &[(&str, f64)],
    areas: &[(&str, f64)],
    missing_rate: f64,
) -> Vec<Row> {
    let mut rows = Vec::new();
    for &(domain, domain_scale) in domains {
        for &(area, area_scale) in areas {
            let growth = 1.0 + rng.gauss(0.03, 0.02);
            for element in ELEMENTS {
                for year in YEARS {
                    let trend = growth.powi((year - YEARS.start()) as i32);
                    let noise = rng.gauss(1.0, 0.08).max(0.1);
                    let value = (domain_scale * area_scale * trend * noise * 10.0).round() / 10.0;
                    let value = (rng.next_f64() >= missing_rate).then_some(value);
                    rows.push(Row {
                        domain: domain.to_string(),
                        area: area.to_string(),
                        element: element.to_string(),
                        year,
                        unit: "1000 USD",
                        value,
                    });
                }
            }
        }
    }
    rows
}

fn write_csv(path: &Path, rows: &[Row]) -> Result<()> {
    let mut writer =
        csv::Writer::from_path(path).with_context(|| format!("creating {}", path.display()))?;
    for row in rows {
        writer.serialize(row).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}

fn write_parquet(path: &Path, rows: &[Row]) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("Domain", DataType::Utf8, false),
        Field::new("Area", DataType::Utf8, false),
        Field::new("Element", DataType::Utf8, false),
        Field::new("Year", DataType::Int64, false),
        Field::new("Value", DataType::Float64, true),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.domain.as_str()))),
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.area.as_str()))),
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.element.as_str()))),
            Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.year))),
            Arc::new(Float64Array::from(rows.iter().map(|r| r.value).collect::<Vec<_>>())),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating Parquet writer")?;
    writer.write(&batch).context("writing Parquet batch")?;
    writer.close().context("closing Parquet writer")?;
    Ok(())
}

fn write_both(stem: &str, rows: &[Row]) -> Result<()> {
    let csv_path = format!("{stem}.csv");
    let parquet_path = format!("{stem}.parquet");
    write_csv(Path::new(&csv_path), rows)?;
    write_parquet(Path::new(&parquet_path), rows)?;
    println!("Wrote {} rows to {csv_path} and {parquet_path}", rows.len());
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);

    let domains = [
        ("Crops and livestock products", 900.0),
        ("Forestry", 120.0),
        ("Fisheries", 60.0),
    ];

    let ireland_partners = [
        ("United Kingdom", 25.0),
        ("United States of America", 12.0),
        ("France", 6.0),
        ("Germany", 5.5),
        ("Netherlands", 4.0),
        ("China", 3.0),
    ];
    let world_areas = [
        ("Ireland", 10.0),
        ("United Kingdom", 60.0),
        ("France", 70.0),
        ("Germany", 90.0),
        ("Brazil", 55.0),
        ("China", 120.0),
        ("United States of America", 140.0),
        ("Australia", 35.0),
    ];

    let ireland = generate(&mut rng, &domains, &ireland_partners, 0.01);
    let world = generate(&mut rng, &domains, &world_areas, 0.01);

    write_both("export and import countries", &ireland)?;
    write_both("ireland import and export value", &world)?;
    Ok(())
}
