use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use arrow::util::pretty::print_batches;
use parquet::arrow::ArrowWriter;

const SITES: [&str; 4] = ["CCAFS LC-40", "VAFB SLC-4E", "KSC LC-39A", "CCAFS SLC-40"];

/// Booster generations in launch order, with their success probability.
const BOOSTERS: [(&str, f64); 5] = [
    ("F9 v1.0", 0.2),
    ("F9 v1.1", 0.35),
    ("F9 FT", 0.65),
    ("F9 B4", 0.55),
    ("F9 B5", 0.85),
];

const LAUNCHES: usize = 56;
const MAX_PAYLOAD_KG: f64 = 9600.0;

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

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }
}

struct Launch {
    site: String,
    payload: f64,
    class: i64,
    booster: String,
}

fn generate(rng: &mut SimpleRng) -> Vec<Launch> {
    (0..LAUNCHES)
        .map(|i| {
            // Later flights use later booster generations.
            let generation = i * BOOSTERS.len() / LAUNCHES;
            let (booster, p_success) = BOOSTERS[generation];
            let payload = (rng.next_f64() * MAX_PAYLOAD_KG * 10.0).round() / 10.0;
            Launch {
                site: rng.pick(&SITES).to_string(),
                payload,
                class: i64::from(rng.next_f64() < p_success),
                booster: format!("{booster} B{:04}", 1000 + i),
            }
        })
        .collect()
}

fn write_csv(path: &str, launches: &[Launch]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).with_context(|| format!("creating {path}"))?;
    writer.write_record(["Flight Number", "Launch Site", "class", "Payload Mass (kg)", "Booster Version"])?;
    for (i, l) in launches.iter().enumerate() {
        writer.write_record([
            (i + 1).to_string(),
            l.site.clone(),
            l.class.to_string(),
            format!("{:.1}", l.payload),
            l.booster.clone(),
        ])?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}

fn write_parquet(path: &str, launches: &[Launch]) -> Result<RecordBatch> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("Flight Number", DataType::Int64, false),
        Field::new("Launch Site", DataType::Utf8, false),
        Field::new("class", DataType::Int64, false),
        Field::new("Payload Mass (kg)", DataType::Float64, false),
        Field::new("Booster Version", DataType::Utf8, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Int64Array::from_iter_values(1..=launches.len() as i64)),
            Arc::new(StringArray::from_iter_values(launches.iter().map(|l| l.site.as_str()))),
            Arc::new(Int64Array::from_iter_values(launches.iter().map(|l| l.class))),
            Arc::new(Float64Array::from_iter_values(launches.iter().map(|l| l.payload))),
            Arc::new(StringArray::from_iter_values(launches.iter().map(|l| l.booster.as_str()))),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).with_context(|| format!("creating {path}"))?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing parquet batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(batch)
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let launches = generate(&mut rng);

    let csv_path = "spacex_launch_dash.csv";
    let parquet_path = "spacex_launch_dash.parquet";

    write_csv(csv_path, &launches)?;
    let batch = write_parquet(parquet_path, &launches)?;

    print_batches(&[batch.slice(0, 5.min(batch.num_rows()))]).context("printing preview")?;
    println!(
        "Wrote {} launches across {} sites to {csv_path} and {parquet_path}",
        launches.len(),
        SITES.len()
    );
    Ok(())
}
