//! The game-engine side of the environment.
//!
//! A game implements [`Game`]: it advances its simulation by one tick given the
//! key pressed, draws itself onto a [`Surface`] and keeps a running score.
//! [`Ple`] runs a game at a fixed frame rate and implements [`GameDriver`],
//! the interface [`PleEnv`](crate::PleEnv) talks to. Games are looked up by
//! name in a [`GameRegistry`].
mod driver;
mod game;
mod registry;
mod surface;
pub use driver::{DriverConfig, GameDriver, Ple};
pub use game::{Action, Game, GameState, Rewards, SharedRng};
pub use registry::{GameArgs, GameFactory, GameRegistry, GameSource};
pub use surface::{Color, Surface};
