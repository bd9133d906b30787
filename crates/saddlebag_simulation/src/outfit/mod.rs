//! Outfit module - рандомная экипировка маунтов
//!
//! # Architecture
//!
//! **Core (чистые функции, без ECS):**
//! - `resolver` - ItemSpec → ResolvedItem через каталог (memo)
//! - `selector` - перестановка + один item на slot category
//! - `seats` - double/single seat roll
//! - `assigner` - полный outfit одной сущности
//!
//! **ECS glue:**
//! - `sweep` - кооперативный проход по существующей популяции
//! - `spawn` - новые маунты, экипировка через один шаг
//! - `systems` - Bevy systems, связывающие всё выше
//!
//! **Lifecycle:** `OutfitterService` - init (Startup) / reload / shutdown.
//! Пока сервис выключен, sweep и spawn notifications игнорируются.

use std::path::PathBuf;
use std::time::Duration;

use bevy::prelude::*;
use rand::Rng;

pub mod assigner;
pub mod events;
pub mod resolver;
pub mod seats;
pub mod selector;
pub mod spawn;
pub mod sweep;
pub mod systems;


// Re-exports
pub use assigner::{assign_outfit, MountTarget, OutfitTarget, SlotAssignmentResult, MAX_EQUIPMENT_SLOTS};
pub use events::*;
pub use resolver::{ItemCatalogResolver, ResolvedItem};
pub use seats::assign_seats;
pub use selector::select_unique;
pub use spawn::PendingOutfits;
pub use sweep::{OutfitSweep, DEFAULT_SWEEP_STEP};

use crate::config::{ConfigStore, OutfitConfig};
use crate::item_system::{ItemCatalog, ItemDefinitions};
use crate::logger::{log_error, log_info, log_warning};
use crate::DeterministicRng;

// ============================================================================
// Settings
// ============================================================================

/// Runtime settings (задаются хостом до добавления plugin'а)
#[derive(Resource, Clone, Debug)]
pub struct OutfitterSettings {
    /// Пауза sweep'а между сущностями
    pub sweep_step: Duration,
    /// JSON документ; `None` → engine defaults только в памяти
    pub config_path: Option<PathBuf>,
    /// Запускать sweep по существующей популяции на Startup
    pub sweep_on_init: bool,
}

impl Default for OutfitterSettings {
    fn default() -> Self {
        Self {
            sweep_step: DEFAULT_SWEEP_STEP,
            config_path: None,
            sweep_on_init: true,
        }
    }
}

impl OutfitterSettings {
    /// Загрузить конфиг согласно настройкам; ошибки деградируют в defaults
    pub fn load_config(&self) -> OutfitConfig {
        let Some(path) = &self.config_path else {
            return OutfitConfig::engine_defaults();
        };

        match ConfigStore::new(path.clone()).load() {
            Ok(loaded) => {
                if loaded.created {
                    log_info(&format!("Wrote default outfit config to {}", path.display()));
                }
                loaded.config
            }
            Err(err) => {
                log_error(&format!(
                    "Failed to load outfit config {}: {} - using defaults",
                    path.display(),
                    err
                ));
                OutfitConfig::engine_defaults()
            }
        }
    }
}

// ============================================================================
// OutfitterService
// ============================================================================

/// Outfitter service: активный конфиг + memo каталога
///
/// Конфиг заменяется только целиком. RNG живёт отдельно
/// (`DeterministicRng`), общий для всей симуляции.
#[derive(Resource, Debug, Default)]
pub struct OutfitterService {
    config: Option<OutfitConfig>,
    resolver: ItemCatalogResolver,
}

impl OutfitterService {
    pub fn init<C: ItemCatalog + ?Sized>(&mut self, config: OutfitConfig, catalog: &C) {
        report_config_problems(&config, catalog);
        log_info(&format!(
            "Outfitter initialized: {} item specs, seats {}%/{}%, slots {}..={}",
            config.items.len(),
            config.double_seat_chance,
            config.single_seat_chance,
            config.min_slots_to_equip,
            config.max_slots_to_equip
        ));
        self.config = Some(config);
    }

    /// Wholesale replacement
    ///
    /// Возвращает `true`, если сервис был выключен и теперь снова активен:
    /// вызывающий обязан прогнать sweep по всей популяции.
    pub fn reload<C: ItemCatalog + ?Sized>(&mut self, config: OutfitConfig, catalog: &C) -> bool {
        report_config_problems(&config, catalog);
        let reactivated = !self.is_active();
        log_info(&format!(
            "Outfit config reloaded (version {}){}",
            config.version,
            if reactivated { ", outfitter reactivated" } else { "" }
        ));
        self.config = Some(config);
        reactivated
    }

    pub fn shutdown(&mut self) {
        self.config = None;
    }

    pub fn is_active(&self) -> bool {
        self.config.is_some()
    }

    pub fn config(&self) -> Option<&OutfitConfig> {
        self.config.as_ref()
    }

    /// Каталог заменён - memo больше не валиден, unknown items пересчитываются
    pub fn invalidate_catalog<C: ItemCatalog + ?Sized>(&mut self, catalog: &C) {
        self.resolver.invalidate();
        if let Some(config) = &self.config {
            report_unknown_items(config, catalog);
        }
    }

    /// Экипировать цель; `None` - сервис выключен
    pub fn outfit<T, C, R>(&mut self, target: &mut T, catalog: &C, rng: &mut R) -> Option<SlotAssignmentResult>
    where
        T: OutfitTarget + ?Sized,
        C: ItemCatalog + ?Sized,
        R: Rng + ?Sized,
    {
        let config = self.config.as_ref()?;
        Some(assign_outfit(target, config, &mut self.resolver, catalog, rng))
    }
}

fn report_config_problems<C: ItemCatalog + ?Sized>(config: &OutfitConfig, catalog: &C) {
    for problem in config.diagnose() {
        log_warning(&format!("Outfit config: {} (clamped at use time)", problem));
    }
    for spec in config.inert_specs() {
        log_warning(&format!(
            "Outfit config: item '{}' has amount 0 and will never be granted",
            spec.identifier
        ));
    }
    report_unknown_items(config, catalog);
}

/// Один warning на identifier, а не на каждый маунт sweep'а
fn report_unknown_items<C: ItemCatalog + ?Sized>(config: &OutfitConfig, catalog: &C) {
    for problem in config.unknown_items(catalog) {
        log_warning(&format!("Outfit config: {} (item will be skipped)", problem));
    }
}

// ============================================================================
// Plugin
// ============================================================================

/// Outfitter plugin (sweep + spawn listener + lifecycle)
pub struct OutfitterPlugin;

impl Plugin for OutfitterPlugin {
    fn build(&self, app: &mut App) {
        // Хост может подложить свой каталог / RNG до plugin'а
        if !app.world().contains_resource::<ItemDefinitions>() {
            app.insert_resource(ItemDefinitions::horse_equipment());
        }
        if !app.world().contains_resource::<DeterministicRng>() {
            app.insert_resource(DeterministicRng::new(crate::DEFAULT_SEED));
        }

        app.init_resource::<OutfitterSettings>()
            .init_resource::<OutfitterService>()
            .init_resource::<OutfitSweep>()
            .init_resource::<PendingOutfits>()
            // Events
            .add_event::<ReloadOutfitConfig>()
            .add_event::<ShutdownOutfitter>()
            .add_event::<StartOutfitSweep>()
            .add_event::<CancelOutfitSweep>()
            .add_event::<OutfitAssigned>()
            // Spawn notifications
            .add_observer(spawn::queue_spawned_mount)
            .add_systems(Startup, systems::init_outfitter)
            .add_systems(
                Update,
                (
                    systems::sync_catalog,
                    systems::handle_lifecycle_intents,
                    systems::handle_sweep_intents,
                    systems::advance_outfit_sweep,
                    systems::outfit_spawned_mounts,
                )
                    .chain(), // Последовательно: общий RNG → детерминизм
            )
            .add_systems(Last, spawn::promote_pending_outfits);
    }
}
