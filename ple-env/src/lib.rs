#![warn(missing_docs)]
//! Gym-style environment over arcade games of the PyGame Learning Environment kind.
//!
//! [`PleEnv`] wraps a game driver behind the usual reinforcement learning loop:
//! [`PleEnv::reset`] starts an episode, [`PleEnv::step`] presses the key of a
//! discrete action and returns the observation, the reward, the terminal flag
//! and an info object. Observations are either the internal state of the game
//! ([`ObsType::State`]) or a 64x64 RGB image of the screen ([`ObsType::Image`]).
//! [`PleEnv`] also implements [`ple_core::Env`], so it can be run by
//! [`ple_core::DefaultEvaluator`].
//!
//! Games are looked up by name in an [`engine::GameRegistry`]. The built-in
//! registry has [`games::Catcher`]; other games are registered under an
//! external package root and selected with
//! [`PleEnvConfig::root_game_name`].
//!
//! ```
//! use anyhow::Result;
//! use ple_core::{DefaultEvaluator, Evaluator as _};
//! use ple_env::{util::RandomPolicy, ObsType, PleEnv, PleEnvConfig};
//!
//! fn main() -> Result<()> {
//!     let config = PleEnvConfig::default()
//!         .name("Catcher")
//!         .obs_type(ObsType::State)
//!         .max_steps(Some(50));
//!     let n_actions = PleEnv::new(&config)?.n_actions();
//!
//!     let mut policy = RandomPolicy::new(n_actions, 42);
//!     let record = DefaultEvaluator::<PleEnv>::new(&config, 0, 2)?.evaluate(&mut policy)?;
//!     assert!(record.get_scalar("Episode length")? <= 50.0);
//!     Ok(())
//! }
//! ```
//!
//! Human rendering opens a window and requires the `viewer` feature.
mod act;
pub mod engine;
mod env;
mod error;
pub mod games;
pub mod keymap;
mod obs;
pub mod preprocess;
pub mod util;
pub use act::PleAct;
pub use env::{PleEnv, PleEnvConfig, PleInfo, RenderMode};
pub use error::PleEnvError;
pub use obs::{ObsType, PleObs};
