//! Batch configuration of the datasets to generate.

use crate::lwe::{LweParameters, LweParametersBuilder};
use crate::obfuscation::{
    ObfuscationParameters, ObfuscationParametersBuilder, DEFAULT_OBFUSCATION_MODULUS,
};
use crate::{Error, Result};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Parameters of one dataset pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetSpec {
    /// Name of the dataset, e.g. `n10`.
    pub name: String,
    /// Secret dimension.
    pub n: usize,
    /// LWE modulus.
    pub q: u64,
    /// Number of samples.
    pub m: usize,
    /// Noise standard deviation.
    pub sigma: f64,
    /// Hamming weight of the secret.
    pub hamming: usize,
    /// Base seed of the dataset.
    pub seed: u64,
}

impl DatasetSpec {
    /// LWE generator parameters for this dataset.
    pub fn lwe_parameters(&self) -> Result<LweParameters> {
        LweParametersBuilder::new()
            .set_samples(self.m)
            .set_modulus(self.q)
            .set_sigma(self.sigma)
            .build()
    }

    /// Checks the parameters without generating anything.
    pub fn validate(&self) -> Result<()> {
        if self.n == 0 {
            return Err(Error::invalid_dimension(self.n));
        }
        if self.hamming > self.n {
            return Err(Error::hamming_too_large(self.hamming, self.n));
        }
        self.lwe_parameters().map(|_| ())
    }
}

fn default_obfuscation_modulus() -> u64 {
    DEFAULT_OBFUSCATION_MODULUS
}

/// Parameters of the obfuscated ("idea") datasets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdeaParams {
    /// Degrees combined by the obfuscation.
    pub degrees: Vec<usize>,
    /// Set the coefficients are drawn from.
    pub coeff_choices: Vec<i64>,
    /// Ring modulus of the obfuscation.
    #[serde(default = "default_obfuscation_modulus")]
    pub q_obf: u64,
}

impl Default for IdeaParams {
    fn default() -> Self {
        Self {
            degrees: vec![1, 3, 5],
            coeff_choices: vec![-1, 1],
            q_obf: DEFAULT_OBFUSCATION_MODULUS,
        }
    }
}

impl IdeaParams {
    /// Obfuscation parameters for these settings.
    pub fn obfuscation_parameters(&self) -> Result<ObfuscationParameters> {
        ObfuscationParametersBuilder::new()
            .set_modulus(self.q_obf)
            .set_degrees(&self.degrees)
            .set_coeff_choices(&self.coeff_choices)
            .build()
    }
}

/// Configuration of a batch of dataset pairs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Datasets to generate.
    pub datasets: Vec<DatasetSpec>,
    /// Obfuscation settings shared by every dataset.
    #[serde(default)]
    pub idea_params: IdeaParams,
}

impl GenerationConfig {
    /// Parse and validate a configuration from JSON.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a configuration from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        let config: Self = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks every dataset and the obfuscation settings.
    pub fn validate(&self) -> Result<()> {
        for dataset in &self.datasets {
            dataset.validate().map_err(|e| match e {
                Error::ParametersError(source) => Error::InvalidDataset {
                    name: dataset.name.clone(),
                    source,
                },
                e => e,
            })?;
        }
        let names = self.datasets.iter().map(|d| d.name.as_str());
        if let Some(name) = names.duplicates().next() {
            return Err(Error::DefaultError(format!(
                "Dataset name `{name}` is used more than once"
            )));
        }
        self.idea_params.obfuscation_parameters().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::{GenerationConfig, IdeaParams};
    use crate::{Error, ParametersError};
    use std::io::Write;

    const LIGHT_PARAMS: &str = r#"{
        "datasets": [
            {"name": "n10", "n": 10, "q": 842779, "m": 500, "sigma": 3.0, "hamming": 3, "seed": 111},
            {"name": "n30", "n": 30, "q": 842779, "m": 2000, "sigma": 3.0, "hamming": 3, "seed": 222}
        ],
        "idea_params": {"degrees": [1, 3, 5], "coeff_choices": [-1, 1]}
    }"#;

    #[test]
    fn parse_reference_config() {
        let config = GenerationConfig::from_json_str(LIGHT_PARAMS).unwrap();
        assert_eq!(config.datasets.len(), 2);
        assert_eq!(config.datasets[0].name, "n10");
        assert_eq!(config.datasets[1].m, 2000);
        assert_eq!(config.idea_params, IdeaParams::default());

        let par = config.datasets[0].lwe_parameters().unwrap();
        assert_eq!(par.samples(), 500);
        assert_eq!(par.modulus(), 842779);
        let obf = config.idea_params.obfuscation_parameters().unwrap();
        assert_eq!(obf.degrees(), &[1, 3, 5]);
    }

    #[test]
    fn from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(LIGHT_PARAMS.as_bytes()).unwrap();
        let config = GenerationConfig::from_file(file.path()).unwrap();
        assert_eq!(config, GenerationConfig::from_json_str(LIGHT_PARAMS).unwrap());

        assert!(GenerationConfig::from_file("/nonexistent/light_params.json").is_err());
    }

    #[test]
    fn shipped_config() {
        let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("../../configs/light_params.json");
        let config = GenerationConfig::from_file(path).unwrap();
        assert_eq!(config, GenerationConfig::from_json_str(LIGHT_PARAMS).unwrap());
    }

    #[test]
    fn missing_idea_params() {
        let config = GenerationConfig::from_json_str(
            r#"{"datasets": [{"name": "a", "n": 4, "q": 17, "m": 3, "sigma": 1.0, "hamming": 1, "seed": 0}]}"#,
        )
        .unwrap();
        assert_eq!(config.idea_params, IdeaParams::default());
    }

    #[test]
    fn invalid_configs() {
        let hamming = r#"{"datasets": [{"name": "a", "n": 4, "q": 17, "m": 3, "sigma": 1.0, "hamming": 5, "seed": 0}]}"#;
        let e = GenerationConfig::from_json_str(hamming).unwrap_err();
        assert!(e.to_string().contains("Invalid dataset `a`"));
        assert_eq!(
            e.as_parameters_error(),
            Some(&ParametersError::HammingTooLarge(5, 4))
        );

        let sigma = r#"{"datasets": [{"name": "b", "n": 4, "q": 17, "m": 3, "sigma": -2.0, "hamming": 1, "seed": 0}]}"#;
        assert!(matches!(
            GenerationConfig::from_json_str(sigma),
            Err(Error::InvalidDataset { name, source: ParametersError::InvalidSigma(_) }) if name == "b"
        ));

        let duplicated = r#"{"datasets": [
            {"name": "a", "n": 4, "q": 17, "m": 3, "sigma": 1.0, "hamming": 1, "seed": 0},
            {"name": "a", "n": 4, "q": 17, "m": 3, "sigma": 1.0, "hamming": 1, "seed": 1}
        ]}"#;
        assert!(GenerationConfig::from_json_str(duplicated).is_err());

        let degrees = r#"{"datasets": [], "idea_params": {"degrees": [0], "coeff_choices": [1]}}"#;
        assert_eq!(
            GenerationConfig::from_json_str(degrees)
                .unwrap_err()
                .as_parameters_error(),
            Some(&ParametersError::InvalidDegree(0))
        );

        assert!(GenerationConfig::from_json_str("{").is_err());
    }
}
