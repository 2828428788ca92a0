//! Writes synthetic `{symbol}_Full_Day_Partial_Day_From_2008_V1.csv` files so the
//! dashboard can run offline with `DAILY_CYCLES_DATA_DIR=<dir>`.
//!
//! Usage: `generate_sample [output_dir] [sessions]`

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate, Weekday};
use strum::IntoEnumIterator;

use daily_cycles::config::dataset_filename;
use daily_cycles::data::buckets::{full_session_window, partial_session_window};
use daily_cycles::data::filter::DayFilter;
use daily_cycles::data::model::{DayType, Instrument, ModelOutcome, ModelPair};

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

    /// Uniform pick from a non-empty slice.
    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }

    /// Index biased toward the front of a range, for clustered extremes.
    fn skewed_index(&mut self, len: usize) -> usize {
        let u = self.next_f64();
        ((u * u) * len as f64) as usize % len.max(1)
    }
}

fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let out_dir = PathBuf::from(args.next().unwrap_or_else(|| "sample_data".to_string()));
    let sessions: usize = match args.next() {
        Some(n) => n.parse().with_context(|| format!("'{n}' is not a session count"))?,
        None => 2500,
    };

    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;

    let models: Vec<String> = ModelOutcome::iter().map(|m| m.to_string()).collect();
    let day_types: Vec<String> = DayType::iter().map(|d| d.to_string()).collect();
    let partial = partial_session_window().labels();
    let full = full_session_window().labels();

    for (seed, instrument) in Instrument::iter().enumerate() {
        let mut rng = SimpleRng::new(42 + seed as u64);
        let path = out_dir.join(dataset_filename(instrument.as_ref()));
        let mut writer = csv::Writer::from_path(&path)
            .with_context(|| format!("creating {}", path.display()))?;

        let mut header = vec!["session_date".to_string(), "day_of_week".to_string()];
        header.extend(ModelPair::iter().map(|p| p.column().to_string()));
        header.extend(
            [
                "partial_day_high_hm",
                "partial_day_low_hm",
                "day_high_hm",
                "day_low_hm",
                "partial_day_type",
                "full_day_type",
                "cycle_pair",
            ]
            .map(String::from),
        );
        writer.write_record(&header)?;

        let mut date = NaiveDate::from_ymd_opt(2008, 1, 2).context("start date")?;
        let mut written = 0;
        while written < sessions {
            if !matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
                let mut row = vec![
                    date.format("%Y-%m-%d").to_string(),
                    DayFilter::Only(date.weekday()).to_string(),
                ];

                for _ in ModelPair::iter() {
                    let r = rng.next_f64();
                    row.push(if r < 0.03 {
                        String::new()
                    } else if r < 0.08 {
                        "None".to_string()
                    } else {
                        rng.pick(&models).clone()
                    });
                }

                row.push(partial[rng.skewed_index(partial.len())].clone());
                row.push(partial[rng.skewed_index(partial.len())].clone());
                row.push(full[rng.skewed_index(full.len())].clone());
                row.push(full[rng.skewed_index(full.len())].clone());
                row.push(rng.pick(&day_types).clone());
                row.push(rng.pick(&day_types).clone());
                row.push(format!("{}-{}", rng.pick(&models), rng.pick(&models)));

                writer.write_record(&row)?;
                written += 1;
            }
            date = date.succ_opt().context("date overflow")?;
        }

        writer.flush()?;
        println!("Wrote {written} sessions for {instrument} to {}", path.display());
    }

    Ok(())
}
