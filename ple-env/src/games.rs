//! Built-in games.
mod catcher;
pub use catcher::Catcher;
