use anyhow::{Context, Result};

/// Seeded SplitMix64 stream used for measurement noise.
struct NoiseSource(u64);

impl NoiseSource {
    fn next_bits(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform noise in `[-amplitude, amplitude)`.
    fn noise(&mut self, amplitude: f64) -> f64 {
        let unit = (self.next_bits() >> 11) as f64 / (1u64 << 53) as f64;
        (unit * 2.0 - 1.0) * amplitude
    }
}

/// Columns of the sample file: `Group::Signal` headers after the time column.
const HEADERS: [&str; 9] = [
    "time",
    "Motor::Speed",
    "Motor::Torque",
    "Motor::Fault",
    "Pump::Pressure",
    "Pump::Setpoint",
    "Pump::Error",
    "Valve::Position",
    "Valve::Mode",
];

fn main() -> Result<()> {
    env_logger::init();

    let output_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "sample_measurement.csv".to_string());

    let mut rng = NoiseSource(42);
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b';')
        .quote(b'|')
        .from_path(&output_path)
        .with_context(|| format!("creating {output_path}"))?;

    writer.write_record(HEADERS)?;

    let rows = 500;
    for i in 0..rows {
        let t = i as f64 * 0.01;
        let speed = 1500.0 + 200.0 * (t * 2.0).sin() + rng.noise(5.0);
        let torque = 12.0 + 3.0 * (t * 2.0).cos() + rng.noise(0.2);
        let pressure = 2.5 + rng.noise(0.05);
        let position = if i < rows / 2 { 0 } else { 100 };

        writer.write_record([
            format!("{t:.2}"),
            format!("{speed:.3}"),
            format!("{torque:.3}"),
            "0".to_string(),
            format!("{pressure:.4}"),
            "2.5".to_string(),
            "0".to_string(),
            position.to_string(),
            "auto".to_string(),
        ])?;
    }
    writer.flush()?;

    log::info!("Wrote {rows} rows to {output_path}");
    println!(
        "Wrote {rows} rows ({} signals) to {output_path}",
        HEADERS.len() - 1
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noise_is_seeded_and_bounded() {
        let mut a = NoiseSource(42);
        let mut b = NoiseSource(42);
        for _ in 0..1000 {
            let n = a.noise(5.0);
            assert_eq!(n, b.noise(5.0));
            assert!((-5.0..5.0).contains(&n));
        }
    }
}
