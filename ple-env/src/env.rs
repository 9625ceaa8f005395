//! Gym-style environment over a game driver.
mod config;
mod window;
use crate::{
    engine::{Action, GameDriver, GameRegistry, Ple, SharedRng},
    keymap,
    preprocess::{screen_to_image, IMAGE_SHAPE},
    ObsType, PleAct, PleEnvError, PleObs,
};
use anyhow::Result;
pub use config::PleEnvConfig;
use log::{debug, info, trace};
use ndarray::Array3;
use ple_core::{
    record::{Record, RecordValue},
    BoxSpace, Discrete, Env, Info, Step,
};
use rand::{rngs::StdRng, SeedableRng};
use std::{cell::RefCell, collections::HashMap, fmt, rc::Rc, str::FromStr};
use window::ImageViewer;

/// Information given at every step of the interaction with the environment.
///
/// Currently, it is empty and used to match the type signature.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PleInfo {}

impl Info for PleInfo {}

/// How [`PleEnv::render`] shows the current frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderMode {
    /// Shows the frame in a window.
    Human,

    /// Returns the frame as an array.
    RgbArray,
}

impl FromStr for RenderMode {
    type Err = PleEnvError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "human" => Ok(Self::Human),
            "rgb_array" => Ok(Self::RgbArray),
            _ => Err(PleEnvError::InvalidRenderMode(s.to_string())),
        }
    }
}

/// Environment over a game of the PyGame Learning Environment kind.
///
/// The game is looked up by name in a [`GameRegistry`] and run by a headless
/// [`Ple`] driver at a fixed frame rate. The discrete action `i` presses the
/// key `action_set()[i]`. Observations are either the internal state of the
/// game or a 64x64 RGB image of the screen.
///
/// ```
/// use ple_env::{ObsType, PleEnv, PleEnvConfig};
///
/// # fn main() -> anyhow::Result<()> {
/// let config = PleEnvConfig::default().name("Catcher").obs_type(ObsType::Image);
/// let mut env = PleEnv::new(&config)?;
/// env.seed(42);
///
/// let obs = env.reset()?;
/// assert_eq!(obs.as_image().unwrap().dim(), (64, 64, 3));
///
/// let (obs, _reward, _terminal, _info) = env.step(0)?;
/// assert_eq!(obs.as_image().unwrap().dim(), (64, 64, 3));
/// env.close();
/// # Ok(())
/// # }
/// ```
pub struct PleEnv {
    name: String,
    driver: Box<dyn GameDriver>,
    obs_type: ObsType,
    action_space: Discrete,
    observation_space: BoxSpace<u8>,
    reward_range: (f64, f64),
    screen_width: usize,
    screen_height: usize,

    // Opened on the first human rendering.
    viewer: Option<ImageViewer>,

    max_steps: Option<usize>,
    count_steps: usize,
}

impl fmt::Debug for PleEnv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PleEnv")
            .field("name", &self.name)
            .field("obs_type", &self.obs_type)
            .field("action_set", &self.driver.action_set())
            .field("screen_dims", &(self.screen_width, self.screen_height))
            .finish()
    }
}

impl PleEnv {
    /// Builds the environment with the built-in games.
    pub fn new(config: &PleEnvConfig) -> Result<Self> {
        Self::with_registry(config, &GameRegistry::builtin())
    }

    /// Builds the environment, looking the game up in `registry`.
    pub fn with_registry(config: &PleEnvConfig, registry: &GameRegistry) -> Result<Self> {
        let obs_type = config.obs_type.ok_or(PleEnvError::ObsTypeMissing)?;

        let game = registry.resolve(&config.game_source, &config.name, &config.game_args)?;
        let driver = Ple::new(game, config.driver_config())?;

        Self::from_driver(config, Box::new(driver), obs_type)
    }

    fn from_driver(
        config: &PleEnvConfig,
        mut driver: Box<dyn GameDriver>,
        obs_type: ObsType,
    ) -> Result<Self> {
        driver.init();
        driver.game_mut().set_reward_type(&config.reward_type);

        let n_actions = driver.action_set().len();
        let (screen_width, screen_height) = driver.screen_dims();
        let rewards = driver.game().rewards();
        let reward_range = (rewards.loss, rewards.win);

        info!(
            "Initialize PleEnv: game = {} ({}), obs_type = {}, {} actions, screen = {}x{}",
            config.name,
            config.game_source.module_name(&config.name),
            obs_type,
            n_actions,
            screen_width,
            screen_height
        );

        Ok(Self {
            name: config.name.clone(),
            driver,
            obs_type,
            action_space: Discrete::new(n_actions),
            observation_space: BoxSpace::new(0, 255, &IMAGE_SHAPE),
            reward_range,
            screen_width,
            screen_height,
            viewer: None,
            max_steps: config.max_steps,
            count_steps: 0,
        })
    }

    /// Presses the key of the action `a` and advances the game.
    ///
    /// Returns the observation, the reward, the terminal flag and an empty info.
    /// An index out of the action set fails with [`PleEnvError::ActionOutOfRange`].
    /// Stepping after the episode ended is left to the driver.
    pub fn step(&mut self, a: usize) -> Result<(PleObs, f32, bool, PleInfo)> {
        let action = self.driver.action(a)?;
        let reward = self.driver.act(action);
        let obs = self.observation();
        let terminal = self.driver.game_over();
        trace!("PleEnv::step({}): reward = {}, terminal = {}", a, reward, terminal);

        Ok((obs, reward, terminal, PleInfo {}))
    }

    /// Starts a new episode and returns its first observation.
    pub fn reset(&mut self) -> Result<PleObs> {
        debug!("PleEnv::reset()");
        self.driver.reset_game();
        self.count_steps = 0;
        Ok(self.observation())
    }

    /// Renders the current frame.
    ///
    /// With `close`, releases the viewer window, if any, and returns `None`.
    /// [`RenderMode::RgbArray`] returns the image observation of the current frame.
    /// [`RenderMode::Human`] shows it in a window, opened on first use.
    pub fn render(&mut self, mode: RenderMode, close: bool) -> Result<Option<Array3<u8>>> {
        if close {
            self.close();
            return Ok(None);
        }

        let img = self.image();
        match mode {
            RenderMode::RgbArray => Ok(Some(img)),
            RenderMode::Human => {
                if self.viewer.is_none() {
                    let (h, w, _) = img.dim();
                    self.viewer = Some(ImageViewer::new(&self.name, w, h)?);
                }
                if let Some(viewer) = self.viewer.as_mut() {
                    viewer.imshow(&img)?;
                }
                Ok(None)
            }
        }
    }

    /// Seeds the random number generator shared by the driver and the game,
    /// then sets the game up again.
    pub fn seed(&mut self, seed: u64) {
        debug!("PleEnv::seed({})", seed);
        let rng: SharedRng = Rc::new(RefCell::new(StdRng::seed_from_u64(seed)));
        self.driver.set_rng(rng.clone());
        self.driver.game_mut().set_rng(rng);
        self.driver.init();
    }

    /// Releases the viewer window. Does nothing if it is not open.
    pub fn close(&mut self) {
        if self.viewer.take().is_some() {
            debug!("Close viewer");
        }
    }

    /// Chords of key codes for human play, see [`keymap::keys_to_action`].
    pub fn keys_to_action() -> HashMap<Vec<u32>, usize> {
        keymap::keys_to_action()
    }

    /// Number of actions.
    pub fn n_actions(&self) -> usize {
        self.action_space.n
    }

    /// Engine-native actions, indexed by discrete action.
    pub fn action_set(&self) -> &[Action] {
        self.driver.action_set()
    }

    /// Action space.
    pub fn action_space(&self) -> &Discrete {
        &self.action_space
    }

    /// Space of image observations, `(64, 64, 3)` bytes, whatever the screen size.
    pub fn observation_space(&self) -> &BoxSpace<u8> {
        &self.observation_space
    }

    /// Rewards of losing and winning the game.
    pub fn reward_range(&self) -> (f64, f64) {
        self.reward_range
    }

    /// Screen size `(width, height)` of the game in pixels.
    pub fn screen_dims(&self) -> (usize, usize) {
        (self.screen_width, self.screen_height)
    }

    /// Observation type.
    pub fn obs_type(&self) -> ObsType {
        self.obs_type
    }

    fn image(&mut self) -> Array3<u8> {
        screen_to_image(&self.driver.screen_rgb())
    }

    fn observation(&mut self) -> PleObs {
        match self.obs_type {
            ObsType::State => PleObs::State(self.driver.state()),
            ObsType::Image => PleObs::Image(self.image()),
        }
    }
}

impl Drop for PleEnv {
    fn drop(&mut self) {
        self.close();
    }
}

impl Env for PleEnv {
    type Config = PleEnvConfig;
    type Obs = PleObs;
    type Act = PleAct;
    type Info = PleInfo;

    /// Builds the environment with the built-in games and seeds it.
    ///
    /// The seed is taken by its bits, a negative seed `s` is the same as `s + 2^64`.
    fn build(config: &Self::Config, seed: i64) -> Result<Self> {
        let mut env = Self::new(config)?;
        env.seed(u64::from_ne_bytes(seed.to_ne_bytes()));
        Ok(env)
    }

    /// Runs a step, truncating the episode at `max_steps` if set.
    ///
    /// The record holds the reward and the terminal flag of the step.
    fn step(&mut self, a: &PleAct) -> Result<(Step<Self>, Record)> {
        let (obs, reward, is_terminated, info) = PleEnv::step(self, a.act)?;

        self.count_steps += 1;
        let is_truncated = self
            .max_steps
            .map_or(false, |max_steps| self.count_steps >= max_steps);

        let record = Record::from_slice(&[
            ("reward", RecordValue::Scalar(reward)),
            ("terminal", RecordValue::Scalar(is_terminated as i32 as f32)),
        ]);
        let step = Step::new(obs, *a, reward, is_terminated, is_truncated, info);
        Ok((step, record))
    }

    fn reset(&mut self) -> Result<PleObs> {
        PleEnv::reset(self)
    }

    /// Seeds the environment with `ix`, then resets it.
    fn reset_with_index(&mut self, ix: usize) -> Result<PleObs> {
        self.seed(ix as u64);
        PleEnv::reset(self)
    }
}
