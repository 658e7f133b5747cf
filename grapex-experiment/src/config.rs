use grapex_core::EncodingType;
use serde::{Deserialize, Serialize};

/// Ground-truth ratio catalog of the original study design.
pub const DEFAULT_RATIOS: [u8; 9] = [14, 23, 30, 35, 43, 57, 64, 71, 86];

/// Immutable-for-the-run experiment parameters. Loadable from JSON, with
/// every field defaulting to the original study design.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    /// Ground-truth percentages, each in 1..=100, no duplicates.
    pub ratios: Vec<u8>,
    /// Encoding types to run, one block each, no duplicates.
    pub encodings: Vec<EncodingType>,
    /// Ratios sampled per block, without replacement.
    pub block_size: usize,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            ratios: DEFAULT_RATIOS.to_vec(),
            encodings: EncodingType::ALL.to_vec(),
            block_size: DEFAULT_RATIOS.len(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("ratio catalog is empty")]
    EmptyRatios,

    #[error("encoding set is empty")]
    EmptyEncodings,

    #[error("ratio {0} outside 1..=100")]
    RatioOutOfRange(u8),

    #[error("duplicate ratio {0} in catalog")]
    DuplicateRatio(u8),

    #[error("duplicate encoding {0}")]
    DuplicateEncoding(EncodingType),

    #[error("block size must be at least 1")]
    ZeroBlockSize,

    #[error("block size {block_size} exceeds the {catalog}-ratio catalog")]
    BlockTooLarge { block_size: usize, catalog: usize },
}

impl ExperimentConfig {
    /// Checked before any trial exists; a failing configuration never
    /// starts a run.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ratios.is_empty() {
            return Err(ConfigError::EmptyRatios);
        }
        if self.encodings.is_empty() {
            return Err(ConfigError::EmptyEncodings);
        }
        for (i, &ratio) in self.ratios.iter().enumerate() {
            if ratio == 0 || ratio > 100 {
                return Err(ConfigError::RatioOutOfRange(ratio));
            }
            if self.ratios[..i].contains(&ratio) {
                return Err(ConfigError::DuplicateRatio(ratio));
            }
        }
        for (i, &encoding) in self.encodings.iter().enumerate() {
            if self.encodings[..i].contains(&encoding) {
                return Err(ConfigError::DuplicateEncoding(encoding));
            }
        }
        if self.block_size == 0 {
            return Err(ConfigError::ZeroBlockSize);
        }
        if self.block_size > self.ratios.len() {
            return Err(ConfigError::BlockTooLarge {
                block_size: self.block_size,
                catalog: self.ratios.len(),
            });
        }
        Ok(())
    }

    pub fn trial_count(&self) -> usize {
        self.encodings.len() * self.block_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = ExperimentConfig::default();
        config.validate().unwrap();
        assert_eq!(config.trial_count(), 72);
    }

    #[test]
    fn block_size_beyond_catalog_is_rejected() {
        let config = ExperimentConfig {
            ratios: vec![25, 50],
            block_size: 5,
            ..ExperimentConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::BlockTooLarge {
                block_size: 5,
                catalog: 2
            })
        );
    }

    #[test]
    fn out_of_range_and_duplicate_ratios_are_rejected() {
        let zero = ExperimentConfig {
            ratios: vec![0],
            block_size: 1,
            ..ExperimentConfig::default()
        };
        assert_eq!(zero.validate(), Err(ConfigError::RatioOutOfRange(0)));

        let dup = ExperimentConfig {
            ratios: vec![25, 25],
            block_size: 1,
            ..ExperimentConfig::default()
        };
        assert_eq!(dup.validate(), Err(ConfigError::DuplicateRatio(25)));
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config: ExperimentConfig =
            serde_json::from_str(r#"{"ratios": [25, 50], "block_size": 2}"#).unwrap();
        assert_eq!(config.ratios, vec![25, 50]);
        assert_eq!(config.block_size, 2);
        assert_eq!(config.encodings, EncodingType::ALL.to_vec());
    }

    #[test]
    fn encodings_deserialize_from_wire_names() {
        let config: ExperimentConfig =
            serde_json::from_str(r#"{"encodings": ["aligned_bars", "pie_angle"]}"#).unwrap();
        assert_eq!(
            config.encodings,
            vec![EncodingType::AlignedBars, EncodingType::PieAngle]
        );
    }
}
