use anyhow::Context;
use erscore::leader::{LeaderBuilder, LeaderValues};
use erscore::processing::{RANGE_SAMPLES_PER_RECORD, RAW_RECORD_HEADER_SIZE, RAW_RECORD_SIZE};
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use super::template::{complex_tone, to_unsigned_byte};

/// Configuration for generating a synthetic leader/raw file pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub mission_id: String,
    /// Data records written after the leading record.
    pub lines: usize,
    pub prf: f64,
    /// Tone frequency in cycles across one range line.
    pub cycles: f64,
    pub amplitude: f64,
    pub noise: f64,
    pub seed: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            mission_id: "ERS-SYNTH".into(),
            lines: 8,
            prf: 5.0,
            cycles: 512.0,
            amplitude: 60.0,
            noise: 4.0,
            seed: 0,
        }
    }
}

impl GeneratorConfig {
    pub fn leader_values(&self) -> LeaderValues {
        LeaderValues {
            mission_id: self.mission_id.clone(),
            wavelength: 0.0566,
            range_phase_offset: 0.0,
            sampling_frequency_mhz: 18.962468,
            pulse_length_us: 37.1,
            prf: self.prf,
            range_bandwidth_mhz: 15.55,
            range_gate_delay_ms: 5.5,
            velocity: [7098.0, 446.0, 123.0],
        }
    }
}

/// Paths of a generated product.
#[derive(Debug, Clone)]
pub struct SyntheticProduct {
    pub leader: PathBuf,
    pub raw: PathBuf,
}

fn build_raw_image(config: &GeneratorConfig) -> anyhow::Result<Vec<u8>> {
    let total = config
        .lines
        .checked_add(1)
        .and_then(|records| records.checked_mul(RAW_RECORD_SIZE))
        .context("overflow computing raw file size")?;

    let noise = config.noise.abs();
    let mut rng = StdRng::seed_from_u64(config.seed);
    let tone = complex_tone(RANGE_SAMPLES_PER_RECORD, config.cycles, config.amplitude);
    let mut bytes = Vec::with_capacity(total);
    bytes.resize(RAW_RECORD_SIZE, 0);

    for line in 0..config.lines {
        let mut header = vec![0u8; RAW_RECORD_HEADER_SIZE];
        header[..4].copy_from_slice(&(line as u32 + 2).to_be_bytes());
        bytes.extend_from_slice(&header);

        for &(i, q) in &tone {
            let jitter_i = rng.gen_range(-noise..=noise);
            let jitter_q = rng.gen_range(-noise..=noise);
            bytes.push(to_unsigned_byte(i + jitter_i));
            bytes.push(to_unsigned_byte(q + jitter_q));
        }
    }

    Ok(bytes)
}

/// Writes `LEA_01.001` and `DAT_01.001` into `dir`.
pub fn write_product(dir: &Path, config: &GeneratorConfig) -> anyhow::Result<SyntheticProduct> {
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    let product = SyntheticProduct {
        leader: dir.join("LEA_01.001"),
        raw: dir.join("DAT_01.001"),
    };

    let leader = LeaderBuilder::from_values(&config.leader_values()).build();
    fs::write(&product.leader, leader)
        .with_context(|| format!("writing {}", product.leader.display()))?;
    fs::write(&product.raw, build_raw_image(config)?)
        .with_context(|| format!("writing {}", product.raw.display()))?;

    Ok(product)
}
