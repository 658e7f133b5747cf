use crate::config::{ConfigError, ExperimentConfig};
use grapex_core::Trial;
use rand::seq::SliceRandom;
use rand::Rng;

/// Counterbalanced trial schedule: one contiguous block per encoding in
/// uniformly random block order, each block a uniform random sample of
/// `block_size` catalog ratios without replacement.
///
/// Randomness comes entirely from the injected `rng`, so a seeded rng
/// reproduces an identical schedule.
pub fn generate_schedule<R: Rng + ?Sized>(
    config: &ExperimentConfig,
    rng: &mut R,
) -> Result<Vec<Trial>, ConfigError> {
    config.validate()?;

    let mut encodings = config.encodings.clone();
    encodings.shuffle(rng);

    let mut schedule = Vec::with_capacity(config.trial_count());
    for encoding in encodings {
        let mut ratios = config.ratios.clone();
        ratios.shuffle(rng);
        ratios.truncate(config.block_size);
        for (i, ground_truth) in ratios.into_iter().enumerate() {
            schedule.push(Trial {
                encoding,
                ground_truth,
                position_in_block: i + 1,
            });
        }
    }

    tracing::info!(
        trials = schedule.len(),
        blocks = config.encodings.len(),
        block_size = config.block_size,
        "trial schedule generated"
    );
    Ok(schedule)
}

#[cfg(test)]
mod tests {
    use super::*;
    use grapex_core::EncodingType;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn full_catalog_schedule_covers_every_pair_exactly_once() {
        let config = ExperimentConfig::default();
        let mut rng = StdRng::seed_from_u64(1);
        let schedule = generate_schedule(&config, &mut rng).unwrap();
        assert_eq!(schedule.len(), 72);

        let pairs: HashSet<(EncodingType, u8)> = schedule
            .iter()
            .map(|t| (t.encoding, t.ground_truth))
            .collect();
        assert_eq!(pairs.len(), 72);
        for encoding in EncodingType::ALL {
            for ratio in config.ratios.iter() {
                assert!(pairs.contains(&(encoding, *ratio)));
            }
        }
    }

    #[test]
    fn blocks_are_contiguous_and_positions_count_up() {
        let config = ExperimentConfig::default();
        let mut rng = StdRng::seed_from_u64(2);
        let schedule = generate_schedule(&config, &mut rng).unwrap();

        let mut seen_blocks: Vec<EncodingType> = Vec::new();
        for chunk in schedule.chunks(config.block_size) {
            let encoding = chunk[0].encoding;
            assert!(
                !seen_blocks.contains(&encoding),
                "encoding {encoding} split across blocks"
            );
            seen_blocks.push(encoding);
            for (i, trial) in chunk.iter().enumerate() {
                assert_eq!(trial.encoding, encoding);
                assert_eq!(trial.position_in_block, i + 1);
            }
        }
        assert_eq!(seen_blocks.len(), EncodingType::ALL.len());
    }

    #[test]
    fn subsampled_blocks_draw_without_replacement() {
        let config = ExperimentConfig {
            block_size: 4,
            ..ExperimentConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(3);
        let schedule = generate_schedule(&config, &mut rng).unwrap();
        assert_eq!(schedule.len(), 8 * 4);
        for chunk in schedule.chunks(4) {
            let distinct: HashSet<u8> = chunk.iter().map(|t| t.ground_truth).collect();
            assert_eq!(distinct.len(), 4);
            for ratio in &distinct {
                assert!(config.ratios.contains(ratio));
            }
        }
    }

    #[test]
    fn fixed_seed_reproduces_the_schedule() {
        let config = ExperimentConfig::default();
        let a = generate_schedule(&config, &mut StdRng::seed_from_u64(99)).unwrap();
        let b = generate_schedule(&config, &mut StdRng::seed_from_u64(99)).unwrap();
        assert_eq!(a, b);
        let c = generate_schedule(&config, &mut StdRng::seed_from_u64(100)).unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn invalid_config_yields_no_schedule() {
        let config = ExperimentConfig {
            ratios: vec![25, 50],
            block_size: 5,
            ..ExperimentConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(4);
        assert!(generate_schedule(&config, &mut rng).is_err());
    }
}
