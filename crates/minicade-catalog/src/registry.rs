use std::collections::HashMap;

use rand::rngs::StdRng;

use minicade_core::catalog::GameVariant;
use minicade_core::config::ArcadeConfig;
use minicade_core::game_trait::MiniGame;

/// Builds a fresh game from the arcade config and a dedicated RNG.
type GameFactory = fn(&ArcadeConfig, StdRng) -> Box<dyn MiniGame>;

/// Maps each variant compiled into this build to its factory.
pub struct GameRegistry {
    factories: HashMap<GameVariant, GameFactory>,
}

impl Default for GameRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl GameRegistry {
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register_defaults();
        registry
    }

    /// Registry with nothing registered.
    pub fn empty() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    fn register_defaults(&mut self) {
        #[cfg(feature = "memory")]
        self.register(GameVariant::Memory, |config, rng| {
            Box::new(minicade_memory::MemoryMatch::with_rng(
                config.memory.clone(),
                rng,
            ))
        });
        #[cfg(feature = "reaction")]
        self.register(GameVariant::Reaction, |config, rng| {
            Box::new(minicade_reaction::ReactionTest::with_rng(
                config.reaction.clone(),
                rng,
            ))
        });
        #[cfg(feature = "guess")]
        self.register(GameVariant::NumberGuess, |config, rng| {
            Box::new(minicade_guess::NumberGuess::with_rng(
                config.guess.clone(),
                rng,
            ))
        });
        #[cfg(feature = "clicker")]
        self.register(GameVariant::Clicker, |config, _rng| {
            Box::new(minicade_clicker::SpeedClicker::with_config(
                config.clicker.clone(),
            ))
        });
    }

    /// Add or replace the factory for `variant`.
    pub fn register(&mut self, variant: GameVariant, factory: GameFactory) {
        self.factories.insert(variant, factory);
    }

    pub fn create(
        &self,
        variant: GameVariant,
        config: &ArcadeConfig,
        rng: StdRng,
    ) -> Option<Box<dyn MiniGame>> {
        self.factories.get(&variant).map(|f| f(config, rng))
    }

    pub fn supports(&self, variant: GameVariant) -> bool {
        self.factories.contains_key(&variant)
    }

    /// Number of registered variants.
    pub fn available_games(&self) -> usize {
        self.factories.len()
    }
}
