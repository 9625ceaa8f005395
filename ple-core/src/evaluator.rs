//! Evaluate [`Policy`].
use crate::{record::Record, Env, Policy};
use anyhow::Result;
mod default_evaluator;
pub use default_evaluator::DefaultEvaluator;

/// Evaluate [`Policy`].
pub trait Evaluator<E: Env> {
    /// Runs `policy` on the environment and returns a summary of the episodes.
    fn evaluate(&mut self, policy: &mut dyn Policy<E>) -> Result<Record>;
}
