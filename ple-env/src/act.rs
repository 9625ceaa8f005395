//! Action for [`PleEnv`](crate::PleEnv).
use ple_core::Act;

/// Discrete action, an index into the action set of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PleAct {
    /// Index of the action.
    pub act: usize,
}

impl PleAct {
    /// Constructs an action.
    pub fn new(act: usize) -> Self {
        Self { act }
    }
}

impl Act for PleAct {}

impl From<usize> for PleAct {
    fn from(act: usize) -> Self {
        Self { act }
    }
}
