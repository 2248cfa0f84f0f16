//! Train/validation partitioning.
//!
//! The whole record sequence is shuffled with a caller-supplied RNG, then
//! the first `validation_size` records become validation and the rest
//! training. Seeding the RNG makes the split reproducible.

use crate::config::SplitConfig;
use crate::error::Result;
use crate::metadata::{UtteranceRecord, write_canonical};
use rand::Rng;
use rand::seq::SliceRandom;
use std::path::{Path, PathBuf};
use tracing::info;

/// Validation sizing rule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitPolicy {
    /// Fraction of records reserved for validation.
    pub val_fraction: f64,
    /// Lower bound on validation size.
    pub min_val_size: usize,
}

impl SplitPolicy {
    /// Policy from configuration.
    pub fn from_config(config: &SplitConfig) -> Self {
        Self {
            val_fraction: config.val_fraction,
            min_val_size: config.min_val_size,
        }
    }

    /// `max(min_val_size, round(val_fraction * total))`, capped at `total`.
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    pub fn validation_size(&self, total: usize) -> usize {
        if total == 0 {
            return 0;
        }
        let fractional = (self.val_fraction * total as f64).round().max(0.0) as usize;
        self.min_val_size.max(fractional).min(total)
    }
}

impl Default for SplitPolicy {
    fn default() -> Self {
        Self::from_config(&SplitConfig::default())
    }
}

/// A shuffled corpus and its two disjoint partitions.
#[derive(Debug, Clone, Default)]
pub struct CorpusSplit {
    /// Every record, in shuffled order.
    pub all: Vec<UtteranceRecord>,
    /// Training partition.
    pub train: Vec<UtteranceRecord>,
    /// Validation partition.
    pub validation: Vec<UtteranceRecord>,
}

/// Shuffle `records` and split them by `policy`.
pub fn split_corpus<R: Rng + ?Sized>(
    mut records: Vec<UtteranceRecord>,
    policy: &SplitPolicy,
    rng: &mut R,
) -> CorpusSplit {
    records.shuffle(rng);
    let val_size = policy.validation_size(records.len());

    let validation = records[..val_size].to_vec();
    let train = records[val_size..].to_vec();

    CorpusSplit {
        all: records,
        train,
        validation,
    }
}

/// Paths of the three metadata files written for a split.
#[derive(Debug, Clone)]
pub struct SplitFiles {
    /// Combined shuffled file.
    pub combined: PathBuf,
    /// Training file.
    pub train: PathBuf,
    /// Validation file.
    pub validation: PathBuf,
}

/// Write the combined, train and validation files into `out_dir`.
pub fn write_split(split: &CorpusSplit, out_dir: &Path, names: &SplitConfig) -> Result<SplitFiles> {
    let files = SplitFiles {
        combined: out_dir.join(&names.combined_file),
        train: out_dir.join(&names.train_file),
        validation: out_dir.join(&names.val_file),
    };

    write_canonical(&files.combined, &split.all)?;
    write_canonical(&files.train, &split.train)?;
    write_canonical(&files.validation, &split.validation)?;

    info!(
        "Split {} record(s): {} train, {} validation",
        split.all.len(),
        split.train.len(),
        split.validation.len()
    );

    Ok(files)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    fn records(n: usize) -> Vec<UtteranceRecord> {
        (0..n)
            .map(|i| UtteranceRecord::new(format!("{i:05}"), format!("text {i}")))
            .collect()
    }

    #[test]
    fn test_validation_size() {
        let policy = SplitPolicy::default();
        assert_eq!(policy.validation_size(0), 0);
        assert_eq!(policy.validation_size(1), 1);
        assert_eq!(policy.validation_size(499), 499);
        assert_eq!(policy.validation_size(5000), 500);
        assert_eq!(policy.validation_size(20_000), 1000);
        // round, not floor: 0.05 * 10_010 = 500.5
        assert_eq!(policy.validation_size(10_010), 501);
        assert_eq!(policy.validation_size(22_200), 1110);
    }

    #[test]
    fn test_split_large_corpus_is_partition() {
        let n = 12_345;
        let mut rng = StdRng::seed_from_u64(7);
        let split = split_corpus(records(n), &SplitPolicy::default(), &mut rng);

        assert_eq!(split.validation.len(), 617);
        assert_eq!(split.train.len() + split.validation.len(), n);

        let train: HashSet<_> = split.train.iter().map(|r| r.id.clone()).collect();
        let val: HashSet<_> = split.validation.iter().map(|r| r.id.clone()).collect();
        assert!(train.is_disjoint(&val));
        let union: HashSet<_> = train.union(&val).cloned().collect();
        let expected: HashSet<_> = records(n).into_iter().map(|r| r.id).collect();
        assert_eq!(union, expected);
    }

    #[test]
    fn test_split_is_reproducible_with_seed() {
        let a = split_corpus(records(100), &SplitPolicy::default(), &mut StdRng::seed_from_u64(1));
        let b = split_corpus(records(100), &SplitPolicy::default(), &mut StdRng::seed_from_u64(1));
        assert_eq!(a.all, b.all);
        assert_eq!(a.validation, b.validation);
    }

    #[test]
    fn test_split_shuffles() {
        let split =
            split_corpus(records(100), &SplitPolicy::default(), &mut StdRng::seed_from_u64(3));
        assert_ne!(split.all, records(100));
    }

    #[test]
    fn test_split_empty() {
        let split = split_corpus(Vec::new(), &SplitPolicy::default(), &mut StdRng::seed_from_u64(0));
        assert!(split.all.is_empty());
        assert!(split.train.is_empty());
        assert!(split.validation.is_empty());
    }

    #[test]
    fn test_write_split() {
        let dir = tempfile::tempdir().unwrap();
        let policy = SplitPolicy {
            val_fraction: 0.5,
            min_val_size: 1,
        };
        let split = split_corpus(records(4), &policy, &mut StdRng::seed_from_u64(9));
        let files = write_split(&split, dir.path(), &SplitConfig::default()).unwrap();

        assert!(files.combined.ends_with("ruslan_meta.txt"));
        let train = std::fs::read_to_string(&files.train).unwrap();
        let val = std::fs::read_to_string(&files.validation).unwrap();
        assert_eq!(train.lines().count(), 2);
        assert_eq!(val.lines().count(), 2);
        assert!(val.lines().all(|l| l.contains('|')));
    }
}
