use std::path::PathBuf;

use anyhow::{Context, Result};

/// Columns the equipment backend requires, in order.
const HEADERS: [&str; 5] = ["Equipment Name", "Type", "Flowrate", "Pressure", "Temperature"];

/// (type, name prefix, mean flowrate, mean pressure, mean temperature)
const PROFILES: [(&str, &str, f64, f64, f64); 6] = [
    ("Pump", "Pump", 120.0, 5.2, 110.0),
    ("Compressor", "Compressor", 95.0, 8.4, 95.0),
    ("Valve", "Valve", 60.0, 4.1, 105.0),
    ("HeatExchanger", "HX", 150.0, 6.2, 130.0),
    ("Reactor", "Reactor", 140.0, 7.5, 140.0),
    ("Condenser", "Condenser", 100.0, 5.8, 90.0),
];

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

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

/// Usage: `generate_sample [OUTPUT] [ROWS]`
fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let output = PathBuf::from(args.next().unwrap_or_else(|| "sample_equipment.csv".to_string()));
    let rows: usize = match args.next() {
        Some(n) => n.parse().with_context(|| format!("'{n}' is not a row count"))?,
        None => 15,
    };

    let mut rng = SimpleRng::new(42);
    let mut writer = csv::Writer::from_path(&output)
        .with_context(|| format!("creating {}", output.display()))?;
    writer.write_record(HEADERS).context("writing header")?;

    for i in 0..rows {
        let (kind, prefix, flow, pressure, temp) = PROFILES[i % PROFILES.len()];
        let serial = i / PROFILES.len() + 1;
        writer
            .write_record([
                format!("{prefix}-{serial}"),
                kind.to_string(),
                round1(rng.gauss(flow, flow * 0.08).max(0.0)).to_string(),
                round1(rng.gauss(pressure, pressure * 0.06).max(0.0)).to_string(),
                round1(rng.gauss(temp, temp * 0.05)).to_string(),
            ])
            .with_context(|| format!("writing row {i}"))?;
    }
    writer.flush().context("flushing CSV")?;

    println!("Wrote {rows} equipment rows to {}", output.display());
    Ok(())
}
