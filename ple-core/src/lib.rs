#![warn(missing_docs)]
//! Environment contract shared by arcade-game learning environments.
//!
//! An environment implementing [`Env`] is driven step by step with discrete
//! or structured actions and reports [`Step`] objects, which carry the next
//! observation, a scalar reward and the terminal/truncated flags of the
//! episode. [`Policy`] maps observations to actions and [`DefaultEvaluator`]
//! runs a policy for a number of episodes.
//!
//! The action and observation sets of an environment are described with
//! [`Discrete`] and [`BoxSpace`].
pub mod error;
pub mod record;

mod base;
pub use base::{Act, Env, Info, Obs, Policy, Step};

mod space;
pub use space::{BoxSpace, Discrete, Space};

mod evaluator;
pub use evaluator::{DefaultEvaluator, Evaluator};
