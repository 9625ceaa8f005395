//! Fixed-rate game loop.
use super::{Action, Game, GameState, SharedRng, Surface};
use crate::PleEnvError;
use anyhow::Result;
use image::RgbImage;
use log::{debug, trace};
use rand::{rngs::StdRng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::{cell::RefCell, rc::Rc};

/// Seed of the random number generator a driver starts with.
const DEFAULT_SEED: u64 = 24;

/// Runs the simulation loop of a game and exposes it to an environment.
///
/// [`PleEnv`](crate::PleEnv) only talks to this interface, never to a concrete driver.
pub trait GameDriver {
    /// Sets up the game. Called once after construction and again after seeding.
    fn init(&mut self);

    /// Engine-native actions, indexed by discrete action.
    fn action_set(&self) -> &[Action];

    /// Returns the action of the given index.
    ///
    /// Fails with [`PleEnvError::ActionOutOfRange`] if there is no such action.
    fn action(&self, ix: usize) -> Result<Action>;

    /// Screen size `(width, height)` in pixels.
    fn screen_dims(&self) -> (usize, usize);

    /// Applies an action and returns the reward obtained.
    fn act(&mut self, action: Action) -> f32;

    /// Returns `true` if the episode is over.
    fn game_over(&self) -> bool;

    /// Starts a new episode.
    fn reset_game(&mut self);

    /// Captures the current frame in the engine's native orientation.
    fn screen_rgb(&mut self) -> RgbImage;

    /// Internal state of the game.
    fn state(&self) -> GameState;

    /// Random number generator of the driver.
    fn rng(&self) -> SharedRng;

    /// Replaces the random number generator of the driver.
    fn set_rng(&mut self, rng: SharedRng);

    /// The game being run.
    fn game(&self) -> &dyn Game;

    /// The game being run.
    fn game_mut(&mut self) -> &mut dyn Game;
}

/// Configuration of [`Ple`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DriverConfig {
    /// Simulation rate, one tick lasts `1000 / fps` milliseconds.
    pub fps: usize,

    /// Ticks per action.
    pub frame_skip: usize,

    /// If `true`, the frame is redrawn after every tick.
    /// Otherwise it is drawn when captured.
    pub display_screen: bool,

    /// Appends the no-op action to the action set.
    pub add_noop_action: bool,

    /// Video output. Only off-screen rendering is supported.
    pub video: bool,

    /// Audio output. Not supported.
    pub audio: bool,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self::headless(30, true)
    }
}

impl DriverConfig {
    /// Off-screen rendering with video and audio outputs disabled.
    pub fn headless(fps: usize, display_screen: bool) -> Self {
        Self {
            fps,
            frame_skip: 1,
            display_screen,
            add_noop_action: true,
            video: false,
            audio: false,
        }
    }

    /// Sets the number of ticks per action.
    pub fn frame_skip(mut self, v: usize) -> Self {
        self.frame_skip = v;
        self
    }
}

/// Runs a game at a fixed frame rate, rendering off-screen.
pub struct Ple {
    game: Box<dyn Game>,
    config: DriverConfig,
    surface: Surface,
    action_set: Vec<Action>,
    rng: SharedRng,
    previous_score: f64,
    frame_count: usize,

    // The surface does not show the current frame.
    dirty: bool,
}

impl Ple {
    /// Wraps a game. Call [`GameDriver::init`] before use.
    ///
    /// Fails if `fps` or `frame_skip` is zero, or if video or audio output is asked for.
    pub fn new(game: Box<dyn Game>, config: DriverConfig) -> Result<Self> {
        if config.fps == 0 {
            return Err(PleEnvError::InvalidDriverConfig("fps".to_string()).into());
        }
        if config.frame_skip == 0 {
            return Err(PleEnvError::InvalidDriverConfig("frame_skip".to_string()).into());
        }
        if config.video {
            return Err(PleEnvError::UnsupportedOutput("video".to_string()).into());
        }
        if config.audio {
            return Err(PleEnvError::UnsupportedOutput("audio".to_string()).into());
        }

        let mut action_set: Vec<Action> = game.actions().into_iter().map(Some).collect();
        if config.add_noop_action {
            action_set.push(None);
        }

        Ok(Self {
            surface: Surface::new(game.width(), game.height()),
            game,
            config,
            action_set,
            rng: Rc::new(RefCell::new(StdRng::seed_from_u64(DEFAULT_SEED))),
            previous_score: 0.0,
            frame_count: 0,
            dirty: true,
        })
    }

    /// Number of ticks since construction.
    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    fn tick_duration(&self) -> f64 {
        1000.0 / self.config.fps as f64
    }

    fn draw_frame(&mut self) {
        self.game.draw(&mut self.surface);
        self.dirty = false;
    }

    fn one_step_act(&mut self, action: Action) -> f64 {
        if self.game.game_over() {
            return 0.0;
        }

        self.game.tick(self.tick_duration(), action);
        self.frame_count += 1;
        if self.config.display_screen {
            self.draw_frame();
        } else {
            self.dirty = true;
        }

        let score = self.game.score();
        let reward = score - self.previous_score;
        self.previous_score = score;
        reward
    }
}

impl GameDriver for Ple {
    fn init(&mut self) {
        self.game.set_rng(self.rng.clone());
        self.game.init();
        self.previous_score = self.game.score();
        self.dirty = true;
    }

    fn action_set(&self) -> &[Action] {
        &self.action_set
    }

    fn action(&self, ix: usize) -> Result<Action> {
        self.action_set.get(ix).copied().ok_or_else(|| {
            PleEnvError::ActionOutOfRange {
                index: ix,
                n_actions: self.action_set.len(),
            }
            .into()
        })
    }

    fn screen_dims(&self) -> (usize, usize) {
        (self.game.width(), self.game.height())
    }

    fn act(&mut self, action: Action) -> f32 {
        // Keys the game does not know are not pressed.
        let action = if self.action_set.contains(&action) {
            action
        } else {
            None
        };
        trace!("Ple::act({:?})", action);

        (0..self.config.frame_skip)
            .map(|_| self.one_step_act(action))
            .sum::<f64>() as f32
    }

    fn game_over(&self) -> bool {
        self.game.game_over()
    }

    fn reset_game(&mut self) {
        debug!("Ple::reset_game()");
        self.game.reset();
        self.previous_score = self.game.score();
        self.dirty = true;
    }

    fn screen_rgb(&mut self) -> RgbImage {
        if self.dirty {
            self.draw_frame();
        }
        self.surface.capture()
    }

    fn state(&self) -> GameState {
        self.game.state()
    }

    fn rng(&self) -> SharedRng {
        self.rng.clone()
    }

    fn set_rng(&mut self, rng: SharedRng) {
        self.rng = rng;
    }

    fn game(&self) -> &dyn Game {
        self.game.as_ref()
    }

    fn game_mut(&mut self) -> &mut dyn Game {
        self.game.as_mut()
    }
}
