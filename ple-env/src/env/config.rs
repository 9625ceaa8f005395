//! Configuration of [`PleEnv`](super::PleEnv).
use crate::{
    engine::{DriverConfig, GameArgs, GameSource},
    ObsType,
};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

// Simulation rate of the driver.
const FPS: usize = 30;

/// Configuration of [`PleEnv`](super::PleEnv).
///
/// The game runs at 30 ticks per second of game time.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct PleEnvConfig {
    pub(super) name: String,
    pub(super) display_screen: bool,
    pub(super) game_source: GameSource,
    pub(super) reward_type: String,
    pub(super) obs_type: Option<ObsType>,
    pub(super) game_args: GameArgs,
    pub(super) frame_skip: usize,
    pub(super) max_steps: Option<usize>,
}

impl Default for PleEnvConfig {
    fn default() -> Self {
        Self {
            name: "Catcher".to_string(),
            display_screen: true,
            game_source: GameSource::Builtin,
            reward_type: "sparse".to_string(),
            obs_type: None,
            game_args: GameArgs::new(),
            frame_skip: 1,
            max_steps: None,
        }
    }
}

impl PleEnvConfig {
    /// Sets the name of the game.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Redraws the screen at every tick if `true`, otherwise on capture.
    pub fn display_screen(mut self, v: bool) -> Self {
        self.display_screen = v;
        self
    }

    /// Sets where the game is looked up.
    pub fn game_source(mut self, source: GameSource) -> Self {
        self.game_source = source;
        self
    }

    /// Looks the game up in the external package `root`.
    pub fn root_game_name(self, root: impl Into<String>) -> Self {
        self.game_source(GameSource::External { root: root.into() })
    }

    /// Sets the reward type of the game, e.g., `sparse` or `dense`.
    pub fn reward_type(mut self, reward_type: impl Into<String>) -> Self {
        self.reward_type = reward_type.into();
        self
    }

    /// Sets the observation type. Required.
    pub fn obs_type(mut self, obs_type: ObsType) -> Self {
        self.obs_type = Some(obs_type);
        self
    }

    /// Adds a constructor argument of the game.
    pub fn game_arg(mut self, k: impl Into<String>, v: impl Into<serde_yaml::Value>) -> Self {
        self.game_args.insert(k.into(), v.into());
        self
    }

    /// Sets the number of ticks per step. Must be positive.
    pub fn frame_skip(mut self, v: usize) -> Self {
        self.frame_skip = v;
        self
    }

    /// Truncates episodes after the given number of steps.
    ///
    /// Applies to [`Env::step`](ple_core::Env::step) only.
    pub fn max_steps(mut self, v: Option<usize>) -> Self {
        self.max_steps = v;
        self
    }

    /// Headless driver configuration: video and audio outputs disabled.
    pub(super) fn driver_config(&self) -> DriverConfig {
        DriverConfig::headless(FPS, self.display_screen).frame_skip(self.frame_skip)
    }

    /// Constructs [`PleEnvConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves [`PleEnvConfig`].
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use tempdir::TempDir;

    #[test]
    fn test_serde_config() -> Result<()> {
        let config = PleEnvConfig::default()
            .root_game_name("MyGames")
            .name("Maze")
            .reward_type("dense")
            .obs_type(ObsType::Image)
            .game_arg("width", 96)
            .max_steps(Some(100));

        let dir = TempDir::new("ple_env_config")?;
        let path = dir.path().join("ple_env_config.yaml");
        config.save(&path)?;
        let config_ = PleEnvConfig::load(&path)?;
        assert_eq!(config, config_);
        Ok(())
    }

    #[test]
    fn test_partial_yaml() -> Result<()> {
        let config: PleEnvConfig = serde_yaml::from_str("obs_type: state\nframe_skip: 2\n")?;

        assert_eq!(config.obs_type, Some(ObsType::State));
        assert_eq!(config.frame_skip, 2);
        assert_eq!(config.name, "Catcher");
        assert_eq!(
            config.driver_config(),
            DriverConfig::headless(30, true).frame_skip(2)
        );
        Ok(())
    }

    #[test]
    fn test_missing_obs_type_by_default() {
        assert!(PleEnvConfig::default().obs_type.is_none());
    }
}
