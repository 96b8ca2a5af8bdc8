//! On-disk layout of generated datasets.
//!
//! Each dataset lives in its own directory holding `A.npy`, `b.npy`, `e.npy`,
//! `meta.json` and `params.json`. A CSV index lists every dataset of a batch.

use super::record::{DatasetKind, DatasetRecord, SecretMetadata};
use crate::lwe::LweInstance;
use crate::secret::hamming_weight;
use crate::Result;
use itertools::Itertools;
use log::debug;
use ndarray::{Array1, Array2};
use ndarray_npy::{read_npy, write_npy};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// File name of the public matrix.
pub const A_FILE: &str = "A.npy";
/// File name of the observations.
pub const B_FILE: &str = "b.npy";
/// File name of the noise.
pub const E_FILE: &str = "e.npy";
/// File name of the secret metadata.
pub const META_FILE: &str = "meta.json";
/// File name of the trainer parameter summary.
pub const PARAMS_FILE: &str = "params.json";
/// File name of the batch index.
pub const INDEX_FILE: &str = "generated_datasets_params.csv";

/// Prefixes of the split aliases expected by downstream trainers.
pub const SPLITS: [&str; 4] = ["train", "val", "test", "orig"];

/// Parameter summary in the format expected by the downstream trainer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[allow(non_snake_case)]
pub struct TrainerParams {
    /// Secret dimension.
    pub N: usize,
    /// LWE modulus.
    pub Q: u64,
    /// Floor of log2(Q).
    pub logq: u32,
    /// Noise standard deviation.
    pub sigma: f64,
    /// Noise standard deviation, under its legacy name.
    pub gamma: f64,
    /// Number of samples.
    pub m: usize,
    /// Distribution of the secret.
    pub secret_type: String,
    /// Hamming weight of the LWE secret.
    pub hamming_weight: usize,
    /// Lower bound of the Hamming weight.
    pub min_hamming: usize,
    /// Upper bound of the Hamming weight.
    pub max_hamming: usize,
    /// Base seed.
    pub seed: u64,
}

impl TrainerParams {
    /// Summary of a dataset record.
    pub fn from_record(record: &DatasetRecord) -> Self {
        let params = &record.meta.params;
        let (secret_type, weight) = match record.kind {
            DatasetKind::Baseline => ("binary", params.hamming),
            DatasetKind::Idea => ("obfuscated", hamming_weight(record.meta.lwe_secret())),
        };
        Self {
            N: params.n,
            Q: params.q,
            logq: params.q.ilog2(),
            sigma: params.sigma,
            gamma: params.sigma,
            m: params.m,
            secret_type: secret_type.to_string(),
            hamming_weight: weight,
            min_hamming: weight,
            max_hamming: weight,
            seed: params.seed,
        }
    }
}

fn write_json<T: Serialize>(value: &T, path: &Path) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.flush()?;
    Ok(())
}

impl DatasetRecord {
    /// Save the dataset in `root/<kind>_<name>` and return that directory.
    pub fn save<P: AsRef<Path>>(&self, root: P) -> Result<PathBuf> {
        let dir = root.as_ref().join(self.dir_name());
        fs::create_dir_all(&dir)?;

        write_npy(dir.join(A_FILE), &self.instance.a)?;
        write_npy(dir.join(B_FILE), &self.instance.b)?;
        write_npy(dir.join(E_FILE), &self.instance.e)?;
        write_json(&self.meta, &dir.join(META_FILE))?;
        write_json(&TrainerParams::from_record(self), &dir.join(PARAMS_FILE))?;

        debug!("Saved dataset `{}` in {}", self.dir_name(), dir.display());
        Ok(dir)
    }

    /// Write the `<split>_A.npy` and `<split>_b.npy` aliases of every split in
    /// `dir`.
    pub fn write_split_aliases<P: AsRef<Path>>(&self, dir: P) -> Result<()> {
        let dir = dir.as_ref();
        for split in SPLITS {
            write_npy(dir.join(format!("{split}_A.npy")), &self.instance.a)?;
            write_npy(dir.join(format!("{split}_b.npy")), &self.instance.b)?;
        }
        Ok(())
    }

    /// Load a dataset saved with [`DatasetRecord::save`].
    pub fn load<P: AsRef<Path>>(dir: P, kind: DatasetKind) -> Result<Self> {
        let dir = dir.as_ref();
        let meta: SecretMetadata =
            serde_json::from_reader(BufReader::new(File::open(dir.join(META_FILE))?))?;
        let instance = load_instance(dir, meta.params.q)?;
        let degrees = match kind {
            DatasetKind::Baseline => None,
            DatasetKind::Idea => meta.coeffs.as_ref().map(|c| c.keys().copied().collect()),
        };
        Ok(Self {
            kind,
            instance,
            meta,
            degrees,
        })
    }
}

/// Load the `A`, `b` and `e` arrays of a dataset directory.
pub fn load_instance<P: AsRef<Path>>(dir: P, modulus: u64) -> Result<LweInstance> {
    let dir = dir.as_ref();
    let a: Array2<i64> = read_npy(dir.join(A_FILE))?;
    let b: Array1<i64> = read_npy(dir.join(B_FILE))?;
    let e: Array1<i64> = read_npy(dir.join(E_FILE))?;
    LweInstance::try_from_arrays(a, b, e, modulus)
}

/// One row of the batch index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexRow {
    /// Obfuscation coefficients, empty for baseline datasets.
    pub coeffs: String,
    /// Obfuscation degrees, empty for baseline datasets.
    pub degrees: String,
    /// Number of samples.
    pub m: usize,
    /// Secret dimension.
    pub n: usize,
    /// Dataset name.
    pub name: String,
    /// Dataset directory.
    pub path: String,
    /// Dataset kind.
    #[serde(rename = "type")]
    pub kind: DatasetKind,
}

impl IndexRow {
    /// Header of the index.
    pub const HEADER: [&'static str; 7] = ["coeffs", "degrees", "m", "n", "name", "path", "type"];

    /// Index row of a record saved in `path`.
    pub fn new<P: AsRef<Path>>(record: &DatasetRecord, path: P) -> Self {
        let coeffs = record
            .meta
            .coeffs
            .as_ref()
            .map(|c| format!("{{{}}}", c.iter().map(|(d, c)| format!("{d}: {c}")).join(", ")))
            .unwrap_or_default();
        let degrees = record
            .degrees
            .as_ref()
            .map(|d| format!("[{}]", d.iter().join(", ")))
            .unwrap_or_default();
        Self {
            coeffs,
            degrees,
            m: record.instance.samples(),
            n: record.instance.dimension(),
            name: record.name().to_string(),
            path: path.as_ref().display().to_string(),
            kind: record.kind,
        }
    }
}

/// Write the batch index as CSV.
pub fn write_index<P: AsRef<Path>>(rows: &[IndexRow], path: P) -> Result<()> {
    if let Some(parent) = path.as_ref().parent() {
        fs::create_dir_all(parent)?;
    }
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path.as_ref())?;
    writer.write_record(IndexRow::HEADER)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Read a batch index written with [`write_index`].
pub fn read_index<P: AsRef<Path>>(path: P) -> Result<Vec<IndexRow>> {
    let mut reader = csv::Reader::from_path(path)?;
    let rows = reader
        .deserialize()
        .collect::<std::result::Result<Vec<IndexRow>, csv::Error>>()?;
    Ok(rows)
}
