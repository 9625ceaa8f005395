//! Observation of [`PleEnv`](crate::PleEnv).
use crate::{engine::GameState, PleEnvError};
use ndarray::Array3;
use ple_core::Obs;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// What [`PleEnv`](crate::PleEnv) reports as observation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObsType {
    /// Internal state of the game.
    State,

    /// Screen image, see [`screen_to_image`](crate::preprocess::screen_to_image).
    Image,
}

impl FromStr for ObsType {
    type Err = PleEnvError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "state" => Ok(Self::State),
            "image" => Ok(Self::Image),
            _ => Err(PleEnvError::InvalidObsType(s.to_string())),
        }
    }
}

impl fmt::Display for ObsType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::State => write!(f, "state"),
            Self::Image => write!(f, "image"),
        }
    }
}

/// Observation of [`PleEnv`](crate::PleEnv).
#[derive(Clone, Debug, PartialEq)]
pub enum PleObs {
    /// Internal state of the game.
    State(GameState),

    /// Screen image of shape `(64, 64, 3)`.
    Image(Array3<u8>),
}

impl PleObs {
    /// Returns the image, if this is an image observation.
    pub fn as_image(&self) -> Option<&Array3<u8>> {
        match self {
            Self::Image(img) => Some(img),
            Self::State(_) => None,
        }
    }

    /// Returns the game state, if this is a state observation.
    pub fn as_state(&self) -> Option<&GameState> {
        match self {
            Self::State(state) => Some(state),
            Self::Image(_) => None,
        }
    }

    /// Type of the observation.
    pub fn obs_type(&self) -> ObsType {
        match self {
            Self::State(_) => ObsType::State,
            Self::Image(_) => ObsType::Image,
        }
    }
}

impl Obs for PleObs {}
