//! lwe-datagen: generate the baseline and obfuscated LWE datasets listed in a
//! JSON configuration.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::info;

use lwe_datagen::dataset::{generate_all, write_index, GenerationConfig, IndexRow, INDEX_FILE};

#[derive(Parser)]
#[command(name = "lwe-datagen")]
#[command(about = "Generate LWE datasets with plain and obfuscated secrets")]
#[command(version)]
struct Args {
    /// Path to the JSON configuration listing the datasets
    #[arg(long, default_value = "configs/light_params.json")]
    config: PathBuf,

    /// Output directory for the datasets and their index
    #[arg(long, default_value = "data/precomputed")]
    output_dir: PathBuf,

    /// Also write the train/val/test/orig copies of A and b
    #[arg(long)]
    split_aliases: bool,
}

fn main() -> Result<()> {
    pretty_env_logger::formatted_builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let args = Args::parse();

    let config = GenerationConfig::from_file(&args.config)
        .with_context(|| format!("Failed to load configuration {}", args.config.display()))?;
    info!(
        "Loaded {} dataset(s) from {}",
        config.datasets.len(),
        args.config.display()
    );

    let start = Instant::now();
    let pairs = generate_all(&config).context("Failed to generate the datasets")?;
    info!("Generated {} dataset pair(s) in {:.2?}", pairs.len(), start.elapsed());

    let pb = ProgressBar::new(2 * pairs.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let mut rows = Vec::with_capacity(2 * pairs.len());
    for pair in &pairs {
        for record in [&pair.baseline, &pair.idea] {
            pb.set_message(record.dir_name());
            let dir = record
                .save(&args.output_dir)
                .with_context(|| format!("Failed to save dataset {}", record.dir_name()))?;
            if args.split_aliases {
                record.write_split_aliases(&dir).with_context(|| {
                    format!("Failed to write the split aliases of {}", record.dir_name())
                })?;
            }
            rows.push(IndexRow::new(record, &dir));
            pb.inc(1);
        }
    }
    pb.finish_with_message("done");

    let index = args.output_dir.join(INDEX_FILE);
    write_index(&rows, &index)
        .with_context(|| format!("Failed to write the index {}", index.display()))?;

    info!("Datasets saved in {}", args.output_dir.display());
    info!("Index written to {}", index.display());
    Ok(())
}
