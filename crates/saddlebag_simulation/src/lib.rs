//! Saddlebag Simulation Core
//!
//! Рандомная экипировка маунтов на Bevy 0.16 (headless ECS)
//!
//! Хост владеет сущностями, каталогом items и контейнерами; outfitter
//! только решает, что выдать:
//! - seat roll (double / single / none)
//! - до 4 items, не более одного на slot category
//! - sweep по существующим маунтам + экипировка новых через кадр

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod components;
pub mod config;
pub mod error;
pub mod item_system;
pub mod logger;
pub mod outfit;

// Re-exports для удобства
pub use components::*;
pub use config::{ConfigStore, ItemSpec, OutfitConfig, ENGINE_VERSION};
pub use error::{ConfigError, OutfitError};
pub use item_system::{ItemCatalog, ItemDefinitions, ItemHandle, ItemId, SlotCategory};
pub use logger::{
    init_logger, log, log_error, log_info, log_warning, log_with_level, set_log_level, set_logger,
    set_logger_if_needed, LogLevel, LogPrinter,
};
pub use outfit::{
    OutfitAssigned, OutfitSource, OutfitSweep, OutfitterPlugin, OutfitterService, OutfitterSettings,
    PendingOutfits, SlotAssignmentResult,
};

/// Seed по умолчанию, если хост не подложил свой `DeterministicRng`
pub const DEFAULT_SEED: u64 = 42;

/// Главный plugin (сейчас только outfitter)
pub struct SaddlebagPlugin;

impl Plugin for SaddlebagPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(OutfitterPlugin);
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed));

    app
}

/// Snapshot мира для сравнения детерминизма
///
/// Компоненты сериализуются через Debug, отсортированные по Entity index.
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();
    entities.sort_by_key(|(entity, _)| entity.index());

    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
