//! Baseline and obfuscated dataset records.

use super::config::{DatasetSpec, GenerationConfig};
use crate::lwe::LweInstance;
use crate::obfuscation::{Coefficients, ObfuscationParameters};
use crate::secret::sample_secret_with_seed;
use crate::Result;
use log::{debug, warn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Offset of the generator seed of baseline datasets.
pub const BASELINE_SEED_OFFSET: u64 = 1;

/// Offset of the generator seed of obfuscated datasets.
pub const IDEA_SEED_OFFSET: u64 = 2;

/// Kind of a dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatasetKind {
    /// LWE samples for the binary secret.
    Baseline,
    /// LWE samples for the obfuscated secret.
    Idea,
}

impl fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Baseline => write!(f, "baseline"),
            Self::Idea => write!(f, "idea"),
        }
    }
}

/// Secret and parameters of a dataset, persisted as `meta.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecretMetadata {
    /// Binary secret.
    pub s: Vec<i64>,
    /// Obfuscated secret, for idea datasets.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub s_prime: Option<Vec<i64>>,
    /// Obfuscation coefficients, for idea datasets.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coeffs: Option<Coefficients>,
    /// Dataset parameters.
    pub params: DatasetSpec,
}

impl SecretMetadata {
    /// The secret the LWE samples were generated for.
    pub fn lwe_secret(&self) -> &[i64] {
        self.s_prime.as_deref().unwrap_or(&self.s)
    }
}

/// A generated dataset: the LWE instance and its metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetRecord {
    /// Kind of the dataset.
    pub kind: DatasetKind,
    /// LWE instance.
    pub instance: LweInstance,
    /// Secret and parameters.
    pub meta: SecretMetadata,
    /// Degrees of the obfuscation, for idea datasets.
    pub degrees: Option<Vec<usize>>,
}

impl DatasetRecord {
    /// Name of the dataset.
    pub fn name(&self) -> &str {
        &self.meta.params.name
    }

    /// Directory name of the dataset, e.g. `idea_n10`.
    pub fn dir_name(&self) -> String {
        format!("{}_{}", self.kind, self.name())
    }

    /// Checks that the instance matches the recorded secret.
    pub fn verify(&self) -> bool {
        self.instance.verify(self.meta.lwe_secret())
    }
}

/// The baseline and obfuscated datasets generated from the same secret.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetPair {
    /// Samples for the binary secret.
    pub baseline: DatasetRecord,
    /// Samples for the obfuscated secret.
    pub idea: DatasetRecord,
}

impl DatasetPair {
    /// Generate the baseline and idea datasets described by `dataset`.
    ///
    /// The secret is drawn from `dataset.seed`; the baseline and idea
    /// instances use the generator seeds `seed + 1` and `seed + 2`.
    pub fn generate(dataset: &DatasetSpec, obf: &ObfuscationParameters) -> Result<Self> {
        let par = dataset.lwe_parameters()?;
        if obf.modulus() != dataset.q {
            warn!(
                "Dataset `{}`: obfuscation modulus {} differs from the LWE modulus {}, \
                 the obfuscated secret is reduced modulo {}",
                dataset.name,
                obf.modulus(),
                dataset.q,
                dataset.q
            );
        }

        let s = sample_secret_with_seed(dataset.n, dataset.hamming, Some(dataset.seed))?;
        let baseline = LweInstance::generate_with_seed(
            &s,
            &par,
            Some(dataset.seed.wrapping_add(BASELINE_SEED_OFFSET)),
        )?;

        let (s_prime, coeffs) = obf.obfuscate(&s, None)?;
        let idea = LweInstance::generate_with_seed(
            &s_prime,
            &par,
            Some(dataset.seed.wrapping_add(IDEA_SEED_OFFSET)),
        )?;

        debug!(
            "Dataset `{}`: secret {:?}, obfuscated secret {:?}, coefficients {:?}",
            dataset.name, s, s_prime, coeffs
        );

        Ok(Self {
            baseline: DatasetRecord {
                kind: DatasetKind::Baseline,
                instance: baseline,
                meta: SecretMetadata {
                    s: s.clone(),
                    s_prime: None,
                    coeffs: None,
                    params: dataset.clone(),
                },
                degrees: None,
            },
            idea: DatasetRecord {
                kind: DatasetKind::Idea,
                instance: idea,
                meta: SecretMetadata {
                    s,
                    s_prime: Some(s_prime),
                    coeffs: Some(coeffs),
                    params: dataset.clone(),
                },
                degrees: Some(obf.degrees().to_vec()),
            },
        })
    }
}

/// Generate every dataset pair of the configuration, in parallel. The pairs
/// are returned in the order of the configuration.
pub fn generate_all(config: &GenerationConfig) -> Result<Vec<DatasetPair>> {
    let obf = config.idea_params.obfuscation_parameters()?;
    config
        .datasets
        .par_iter()
        .map(|dataset| DatasetPair::generate(dataset, &obf))
        .collect()
}
