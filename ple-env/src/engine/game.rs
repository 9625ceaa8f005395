//! Game interface.
use super::Surface;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::{cell::RefCell, collections::BTreeMap, rc::Rc};

/// Random number generator shared by the driver and the game it runs.
pub type SharedRng = Rc<RefCell<StdRng>>;

/// Engine-native action: the key code pressed, `None` for no key.
pub type Action = Option<u32>;

/// Internal state of a game, named scalars.
pub type GameState = BTreeMap<String, f64>;

/// Rewards a game adds to its score on events.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rewards {
    /// Something good happened, e.g., a fruit was caught.
    pub positive: f64,

    /// Something bad happened, e.g., a life was lost.
    pub negative: f64,

    /// Added at every tick.
    pub tick: f64,

    /// The game is lost.
    pub loss: f64,

    /// The game is won.
    pub win: f64,
}

impl Default for Rewards {
    fn default() -> Self {
        Self {
            positive: 1.0,
            negative: -1.0,
            tick: 0.0,
            loss: -5.0,
            win: 5.0,
        }
    }
}

/// An arcade game run by a [`GameDriver`](super::GameDriver).
pub trait Game {
    /// Width of the screen in pixels.
    fn width(&self) -> usize;

    /// Height of the screen in pixels.
    fn height(&self) -> usize;

    /// Key codes the game reacts to.
    fn actions(&self) -> Vec<u32>;

    /// Rewards of the game.
    fn rewards(&self) -> &Rewards;

    /// Selects how the game scores, e.g., `sparse` or `dense`.
    ///
    /// The meaning of the value is up to the game.
    fn set_reward_type(&mut self, reward_type: &str);

    /// Installs the random number generator of the game.
    fn set_rng(&mut self, rng: SharedRng);

    /// Sets up a new game.
    fn init(&mut self);

    /// Starts a new episode.
    fn reset(&mut self) {
        self.init();
    }

    /// Advances the game by `dt` milliseconds with `action` held down.
    fn tick(&mut self, dt: f64, action: Action);

    /// Draws the current frame.
    fn draw(&self, surface: &mut Surface);

    /// Accumulated score of the episode.
    fn score(&self) -> f64;

    /// Returns `true` if the episode is over.
    fn game_over(&self) -> bool;

    /// Internal state of the game.
    fn state(&self) -> GameState;
}
