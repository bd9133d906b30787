//! Outfitter events
//!
//! # Architecture
//!
//! **Lifecycle intents:**
//! - `ReloadOutfitConfig` → заменить конфиг целиком (или перечитать файл)
//! - `ShutdownOutfitter` → остановить sweep, выбросить конфиг и pending spawns
//!
//! **Sweep intents:**
//! - `StartOutfitSweep` → снимок популяции маунтов, заменяет текущий sweep
//! - `CancelOutfitSweep` → немедленная остановка (без отката)
//!
//! **Observability:**
//! - `OutfitAssigned` → результат экипировки одной сущности

use bevy::prelude::*;

use crate::components::SeatCount;
use crate::config::OutfitConfig;
use crate::item_system::ItemId;

/// Reload конфига
///
/// `config: None` → перечитать документ с `OutfitterSettings::config_path`
/// (или engine defaults, если путь не задан).
#[derive(Event, Clone, Debug, Default)]
pub struct ReloadOutfitConfig {
    pub config: Option<OutfitConfig>,
}

#[derive(Event, Clone, Copy, Debug, Default)]
pub struct ShutdownOutfitter;

#[derive(Event, Clone, Copy, Debug, Default)]
pub struct StartOutfitSweep;

#[derive(Event, Clone, Copy, Debug, Default)]
pub struct CancelOutfitSweep;

/// Маунт экипирован (sweep или spawn)
#[derive(Event, Clone, Debug)]
pub struct OutfitAssigned {
    pub entity: Entity,
    pub source: OutfitSource,
    pub seats: SeatCount,
    pub granted: Vec<ItemId>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutfitSource {
    Sweep,
    Spawn,
}
