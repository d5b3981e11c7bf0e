//! Writes a synthetic wide indicator table (CSV and Parquet) and a PISA
//! table into `data/sample/`.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Float64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

const FIRST_YEAR: i32 = 1994;
const LAST_YEAR: i32 = 2023;

/// (name, floor, ceiling, midpoint year, steepness)
const INDICATORS: [(&str, f64, f64, f64, f64); 4] = [
    ("NER Primary Education", 88.0, 98.0, 2002.0, 0.25),
    ("NER Lower Secondary Education", 50.0, 80.0, 2008.0, 0.30),
    ("NER Upper Secondary Education", 30.0, 62.0, 2012.0, 0.30),
    ("GER Tertiary Education", 10.0, 40.0, 2014.0, 0.20),
];

const PISA_SUBJECTS: [&str; 3] = ["Reading", "Mathematics", "Science"];
const PISA_SCORES: [(i32, [f64; 3]); 8] = [
    (2000, [371.0, 367.0, 393.0]),
    (2003, [382.0, 360.0, 395.0]),
    (2006, [393.0, 391.0, 393.0]),
    (2009, [402.0, 371.0, 383.0]),
    (2012, [396.0, 375.0, 382.0]),
    (2015, [397.0, 386.0, 403.0]),
    (2018, [371.0, 379.0, 396.0]),
    (2022, [359.0, 366.0, 383.0]),
];

fn logistic(year: f64, floor: f64, ceiling: f64, mid: f64, k: f64) -> f64 {
    floor + (ceiling - floor) / (1.0 + (-k * (year - mid)).exp())
}

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

/// One row per indicator; `None` marks a missing survey year.
fn build_rows(rng: &mut SimpleRng) -> Vec<(String, Vec<Option<f64>>)> {
    INDICATORS
        .iter()
        .map(|&(name, floor, ceiling, mid, k)| {
            let values = (FIRST_YEAR..=LAST_YEAR)
                .map(|year| {
                    if rng.next_f64() < 0.08 {
                        return None;
                    }
                    let noise = (rng.next_f64() - 0.5) * 1.5;
                    let v = logistic(year as f64, floor, ceiling, mid, k) + noise;
                    Some((v * 100.0).round() / 100.0)
                })
                .collect();
            (name.to_string(), values)
        })
        .collect()
}

fn year_headers() -> Vec<String> {
    (FIRST_YEAR..=LAST_YEAR).map(|y| y.to_string()).collect()
}

fn write_indicators_csv(path: &Path, rows: &[(String, Vec<Option<f64>>)]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).with_context(|| format!("creating {}", path.display()))?;
    let mut header = vec!["Indicator".to_string()];
    header.extend(year_headers());
    writer.write_record(&header)?;

    for (name, values) in rows {
        let mut record = vec![name.clone()];
        record.extend(values.iter().map(|v| v.map(|v| v.to_string()).unwrap_or_default()));
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(())
}

fn write_indicators_parquet(path: &Path, rows: &[(String, Vec<Option<f64>>)]) -> Result<()> {
    let mut fields = vec![Field::new("Indicator", DataType::Utf8, false)];
    fields.extend(year_headers().into_iter().map(|y| Field::new(y, DataType::Float64, true)));
    let schema = Arc::new(Schema::new(fields));

    let mut columns: Vec<ArrayRef> = vec![Arc::new(StringArray::from(
        rows.iter().map(|(name, _)| name.as_str()).collect::<Vec<_>>(),
    ))];
    for year_idx in 0..year_headers().len() {
        let values: Vec<Option<f64>> = rows.iter().map(|(_, v)| v[year_idx]).collect();
        columns.push(Arc::new(Float64Array::from(values)));
    }

    let batch = RecordBatch::try_new(schema.clone(), columns).context("building record batch")?;
    let file = std::fs::File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing parquet batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn write_pisa_csv(path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).with_context(|| format!("creating {}", path.display()))?;
    let mut header = vec!["Year"];
    header.extend(PISA_SUBJECTS);
    writer.write_record(&header)?;
    for (year, scores) in PISA_SCORES {
        let mut record = vec![year.to_string()];
        record.extend(scores.iter().map(|s| s.to_string()));
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    let out_dir = Path::new("data/sample");
    std::fs::create_dir_all(out_dir).context("creating output directory")?;

    let mut rng = SimpleRng::new(42);
    let rows = build_rows(&mut rng);

    write_indicators_csv(&out_dir.join("education-indicator-long.csv"), &rows)?;
    write_indicators_parquet(&out_dir.join("education-indicator-long.parquet"), &rows)?;
    write_pisa_csv(&out_dir.join("pisa-score.csv"))?;

    println!(
        "Wrote {} indicators x {} years and {} PISA rows to {}",
        rows.len(),
        LAST_YEAR - FIRST_YEAR + 1,
        PISA_SCORES.len(),
        out_dir.display()
    );
    Ok(())
}
