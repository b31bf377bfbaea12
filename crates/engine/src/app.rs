//! Application state and composition.

use std::sync::Arc;

use sheetforge_domain::{ProfessionCatalog, RenamePolicy};

use crate::infrastructure::{
    config::EngineConfig,
    ports::RandomPort,
    random::{SeededRandom, SystemRandom},
};
use crate::stores::CharacterDraftStore;
use crate::use_cases;

/// Main application state.
///
/// Holds all use cases.
/// Passed to HTTP handlers via Axum state.
pub struct App {
    pub use_cases: UseCases,
}

/// Container for all use cases.
pub struct UseCases {
    pub character_creation: use_cases::CharacterCreationUseCases,
}

impl App {
    /// Create a new App with all dependencies wired up.
    pub fn new(config: &EngineConfig) -> Self {
        let random: Arc<dyn RandomPort> = match config.dice_seed {
            Some(seed) => {
                tracing::info!(seed = seed, "Using seeded dice");
                Arc::new(SeededRandom::new(seed))
            }
            None => Arc::new(SystemRandom::new()),
        };
        Self::assemble(
            random,
            config.rename_policy,
            CharacterDraftStore::with_limit(config.max_drafts),
        )
    }

    /// Create an App around an explicit random source.
    pub fn with_random(random: Arc<dyn RandomPort>, rename_policy: RenamePolicy) -> Self {
        Self::assemble(random, rename_policy, CharacterDraftStore::new())
    }

    fn assemble(
        random: Arc<dyn RandomPort>,
        rename_policy: RenamePolicy,
        drafts: CharacterDraftStore,
    ) -> Self {
        let catalog = Arc::new(ProfessionCatalog::builtin());
        let drafts = Arc::new(drafts);

        let character_creation =
            use_cases::CharacterCreationUseCases::new(catalog, drafts, random, rename_policy);

        Self {
            use_cases: UseCases { character_creation },
        }
    }
}
