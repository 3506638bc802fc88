use anyhow::Context;
use clap::Parser;
use generator::{write_product, GeneratorConfig};
use std::path::PathBuf;
use workflow::{ConfigOverrides, InspectConfig, InspectionResult, Runner};

mod generator;
mod workflow;

#[derive(Parser)]
#[command(author, version, about = "Inspect ERS-style SAR leader and raw-signal files")]
struct Args {
    /// Leader (metadata) file
    #[arg(short = 'l', long)]
    ldr: Option<PathBuf>,
    /// Raw signal data file
    #[arg(short = 'r', long)]
    raw: Option<PathBuf>,
    /// Load inspection settings from YAML
    #[arg(long)]
    workflow: Option<PathBuf>,
    /// Patches to decode, 0 reads until the raw file is exhausted
    #[arg(long)]
    max_patches: Option<usize>,
    /// Print the result as JSON
    #[arg(long, default_value_t = false)]
    json: bool,
    /// Dump the raw text of every leader field
    #[arg(long, default_value_t = false)]
    fields: bool,
    /// Report the range spectrum peak of each patch
    #[arg(long, default_value_t = false)]
    spectrum: bool,
    /// Write a synthetic leader/raw pair into this directory and exit
    #[arg(long)]
    synthesize: Option<PathBuf>,
    /// Data records in the synthetic raw file
    #[arg(long, default_value_t = 8)]
    synth_lines: usize,
    /// Pulse repetition frequency written to the synthetic leader
    #[arg(long, default_value_t = 5.0)]
    synth_prf: f64,
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

fn print_text(result: &InspectionResult) {
    print!("{}", result.parameters);
    for (name, text) in &result.fields {
        println!("{name:>26}: {text:?}");
    }
    for patch in &result.patches {
        let stats = &patch.stats;
        print!(
            "patch az {}..{} ({} x {}) mean I/Q {:.3}/{:.3} rms I/Q {:.3}/{:.3}",
            patch.azimuth_start,
            patch.azimuth_start + patch.n_azimuth,
            patch.n_azimuth,
            patch.n_range,
            stats.mean_i,
            stats.mean_q,
            stats.rms_i,
            stats.rms_q
        );
        match patch.spectrum_peak {
            Some(bin) => println!(" spectrum peak bin {bin}"),
            None => println!(),
        }
    }
    if result.end_of_data {
        println!("end of raw data");
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    if let Some(dir) = args.synthesize {
        let generator = GeneratorConfig {
            lines: args.synth_lines,
            prf: args.synth_prf,
            seed: args.seed,
            ..Default::default()
        };
        let product = write_product(&dir, &generator)?;
        println!(
            "Synthetic product -> leader {}, raw {}",
            product.leader.display(),
            product.raw.display()
        );
        return Ok(());
    }

    let base = match &args.workflow {
        Some(path) => InspectConfig::load(path)?,
        None => InspectConfig::default(),
    };
    let config = base.with_overrides(ConfigOverrides {
        ldr: args.ldr,
        raw: args.raw,
        max_patches: args.max_patches,
        json: args.json,
        fields: args.fields,
        spectrum: args.spectrum,
    });
    let json = config.json;

    let result = Runner::new(config).execute()?;
    if json {
        let text = serde_json::to_string_pretty(&result).context("encoding result as JSON")?;
        println!("{text}");
    } else {
        print_text(&result);
    }

    Ok(())
}
