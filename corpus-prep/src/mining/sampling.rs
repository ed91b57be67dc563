//! Down-sampling of mined path sets.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::model::{AstPath, Dataset};

/// Caps the number of paths kept per sample.
///
/// Train-like samples (`Some(Train)` or no split) use the train cap,
/// val/test samples the eval cap. Sets at or under the cap pass through
/// untouched; larger sets are shuffled and truncated, so the kept subset is
/// uniform rather than a prefix of the deterministic mining order.
pub struct PathSampler {
    limit_train: Option<usize>,
    limit_eval: Option<usize>,
    rng: StdRng,
}

impl PathSampler {
    /// A seed makes sampling reproducible across runs; without one the RNG
    /// is seeded from the OS.
    pub fn new(limit_train: Option<usize>, limit_eval: Option<usize>, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            limit_train,
            limit_eval,
            rng,
        }
    }

    /// Applies the split's cap to one candidate set.
    pub fn sample<'t, N>(
        &mut self,
        mut paths: Vec<AstPath<'t, N>>,
        split: Option<Dataset>,
    ) -> Vec<AstPath<'t, N>> {
        let limit = match split {
            None | Some(Dataset::Train) => self.limit_train,
            Some(Dataset::Val) | Some(Dataset::Test) => self.limit_eval,
        };
        match limit {
            Some(limit) if paths.len() > limit => {
                paths.shuffle(&mut self.rng);
                paths.truncate(limit);
                paths
            }
            _ => paths,
        }
    }
}
