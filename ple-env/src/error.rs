//! Errors in the library.
use thiserror::Error;

/// Errors raised while building or driving a [`PleEnv`](crate::PleEnv).
#[derive(Error, Debug, PartialEq)]
pub enum PleEnvError {
    /// The observation type was not given in the configuration.
    #[error("obs_type must be set to either `state` or `image`")]
    ObsTypeMissing,

    /// The string does not name an observation type.
    #[error("Invalid observation type: {0}")]
    InvalidObsType(String),

    /// No game module is registered under the name.
    #[error("Game module not found: {0}")]
    ModuleNotFound(String),

    /// The module exists, but has no game of the name.
    #[error("Game `{name}` not found in module `{module}`")]
    GameNotFound {
        /// Module searched.
        module: String,
        /// Name of the game.
        name: String,
    },

    /// A constructor argument of a game is unknown or has a wrong type.
    #[error("Invalid argument `{arg}` for game `{game}`: {reason}")]
    InvalidGameArg {
        /// Name of the game.
        game: String,
        /// Name of the argument.
        arg: String,
        /// What is wrong with it.
        reason: String,
    },

    /// The action index is not in `0..n_actions`.
    #[error("Action index {index} out of range, the number of actions is {n_actions}")]
    ActionOutOfRange {
        /// Given index.
        index: usize,
        /// Number of actions.
        n_actions: usize,
    },

    /// A rate of the driver, `fps` or `frame_skip`, is zero.
    #[error("Invalid driver configuration: `{0}` must be positive")]
    InvalidDriverConfig(String),

    /// The string does not name a render mode.
    #[error("Invalid render mode: {0}, expected `human` or `rgb_array`")]
    InvalidRenderMode(String),

    /// The driver was asked for a video or audio output, only off-screen drivers exist.
    #[error("Unsupported output device: {0}")]
    UnsupportedOutput(String),

    /// The crate was built without the `viewer` feature.
    #[error("Human rendering requires the `viewer` feature")]
    ViewerUnavailable,

    /// The viewer window failed.
    #[error("Viewer error: {0}")]
    Viewer(String),
}
