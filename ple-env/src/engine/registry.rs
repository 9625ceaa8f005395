//! Lookup of games by name.
use super::Game;
use crate::{games::Catcher, PleEnvError};
use anyhow::Result;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Constructor arguments of a game, forwarded verbatim to its factory.
pub type GameArgs = BTreeMap<String, serde_yaml::Value>;

/// Builds a game from its constructor arguments.
pub type GameFactory = Box<dyn Fn(&GameArgs) -> Result<Box<dyn Game>>>;

/// Where the game of a given name is looked up.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameSource {
    /// The built-in catalog, module `ple.games.<name>`.
    Builtin,

    /// A game package supplied by the user, module `<root>.envs`.
    External {
        /// Name of the package.
        root: String,
    },
}

impl Default for GameSource {
    fn default() -> Self {
        Self::Builtin
    }
}

impl GameSource {
    /// Name of the module holding the game `name`.
    pub fn module_name(&self, name: &str) -> String {
        match self {
            Self::Builtin => format!("ple.games.{}", name).to_lowercase(),
            Self::External { root } => format!("{}.envs", root.to_lowercase()),
        }
    }
}

/// Maps module and game names to game factories.
///
/// Games are registered explicitly, [`GameRegistry::builtin`] holds the
/// built-in catalog.
#[derive(Default)]
pub struct GameRegistry {
    modules: HashMap<String, HashMap<String, GameFactory>>,
}

impl GameRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the built-in games.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(
            GameSource::Builtin.module_name("Catcher"),
            "Catcher",
            Box::new(|args| Ok(Box::new(Catcher::from_args(args)?) as Box<dyn Game>)),
        );
        registry
    }

    /// Registers a game in a module.
    pub fn register(
        &mut self,
        module: impl Into<String>,
        name: impl Into<String>,
        factory: GameFactory,
    ) -> &mut Self {
        self.modules
            .entry(module.into())
            .or_default()
            .insert(name.into(), factory);
        self
    }

    /// Registers a game of an external package, see [`GameSource::External`].
    pub fn register_external(
        &mut self,
        root: &str,
        name: impl Into<String>,
        factory: GameFactory,
    ) -> &mut Self {
        let module = GameSource::External {
            root: root.to_string(),
        }
        .module_name("");
        self.register(module, name, factory)
    }

    /// Returns `true` if the game can be resolved.
    pub fn contains(&self, source: &GameSource, name: &str) -> bool {
        self.modules
            .get(&source.module_name(name))
            .map_or(false, |games| games.contains_key(name))
    }

    /// Builds the game `name` of `source` with the given arguments.
    pub fn resolve(
        &self,
        source: &GameSource,
        name: &str,
        args: &GameArgs,
    ) -> Result<Box<dyn Game>> {
        let module = source.module_name(name);
        debug!("Resolve game {} in module {}", name, module);

        let games = self
            .modules
            .get(&module)
            .ok_or_else(|| PleEnvError::ModuleNotFound(module.clone()))?;
        let factory = games.get(name).ok_or_else(|| PleEnvError::GameNotFound {
            module: module.clone(),
            name: name.to_string(),
        })?;

        factory(args)
    }
}
