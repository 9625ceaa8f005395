//! Utilities.
use crate::{PleAct, PleEnv, PleObs};
use ple_core::Policy;

/// Policy choosing actions uniformly at random.
pub struct RandomPolicy {
    n_actions: usize,
    rng: fastrand::Rng,
}

impl RandomPolicy {
    /// Constructs a policy over `n_actions` actions.
    pub fn new(n_actions: usize, seed: u64) -> Self {
        Self {
            n_actions,
            rng: fastrand::Rng::with_seed(seed),
        }
    }
}

impl Policy<PleEnv> for RandomPolicy {
    fn sample(&mut self, _: &PleObs) -> PleAct {
        self.rng.usize(..self.n_actions).into()
    }
}
