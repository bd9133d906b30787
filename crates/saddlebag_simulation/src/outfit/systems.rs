//! Outfitter system implementations
//!
//! # Systems
//!
//! **Lifecycle:**
//! - `init_outfitter` (Startup) - загрузка конфига + стартовый sweep
//! - `handle_lifecycle_intents` - reload (+ sweep при реактивации) / shutdown
//! - `sync_catalog` - сброс memo при замене каталога
//!
//! **Work:**
//! - `handle_sweep_intents` - start / cancel sweep
//! - `advance_outfit_sweep` - одна сущность за срабатывание таймера
//! - `outfit_spawned_mounts` - маунты, замеченные в прошлом кадре

use bevy::prelude::*;

use super::assigner::MountTarget;
use super::events::*;
use super::spawn::PendingOutfits;
use super::sweep::OutfitSweep;
use super::{OutfitterService, OutfitterSettings};
use crate::components::{EquipmentContainer, Mount, SaddleSeats};
use crate::error::OutfitError;
use crate::item_system::{ItemDefinitions, ItemId};
use crate::logger::{log, log_info};
use crate::DeterministicRng;

type MountQuery<'w, 's> =
    Query<'w, 's, (Option<&'static mut EquipmentContainer>, &'static mut SaddleSeats), With<Mount>>;

// ============================================================================
// Lifecycle
// ============================================================================

/// Startup: конфиг + sweep по уже существующей популяции
pub fn init_outfitter(
    settings: Res<OutfitterSettings>,
    catalog: Res<ItemDefinitions>,
    mut service: ResMut<OutfitterService>,
    mut sweep: ResMut<OutfitSweep>,
    mounts: Query<Entity, With<Mount>>,
) {
    service.init(settings.load_config(), &*catalog);
    sweep.set_step(settings.sweep_step);

    if settings.sweep_on_init {
        start_sweep(&mut sweep, mounts.iter());
    }
}

/// Process reload / shutdown intents
///
/// Reload выключенного сервиса = повторный init: маунты, появившиеся
/// пока он был выключен, подхватывает новый sweep. Reload и shutdown
/// в одном кадре → сервис остаётся выключенным.
pub fn handle_lifecycle_intents(
    mut reloads: EventReader<ReloadOutfitConfig>,
    mut shutdowns: EventReader<ShutdownOutfitter>,
    settings: Res<OutfitterSettings>,
    catalog: Res<ItemDefinitions>,
    mut service: ResMut<OutfitterService>,
    mut sweep: ResMut<OutfitSweep>,
    mut pending: ResMut<PendingOutfits>,
    mounts: Query<Entity, With<Mount>>,
) {
    let mut reactivated = false;
    for intent in reloads.read() {
        let config = match &intent.config {
            Some(config) => config.clone(),
            None => settings.load_config(),
        };
        reactivated |= service.reload(config, &*catalog);
    }

    if shutdowns.read().next().is_some() {
        let dropped = sweep.cancel();
        pending.clear();
        service.shutdown();
        log_info(&format!("Outfitter shut down ({} mounts left unprocessed)", dropped));
        // Остальные дубликаты в этом кадре ничего не меняют
        shutdowns.clear();
        return;
    }

    if reactivated {
        start_sweep(&mut sweep, mounts.iter());
    }
}

/// Каталог заменён хостом → memo больше не валиден
pub fn sync_catalog(catalog: Res<ItemDefinitions>, mut service: ResMut<OutfitterService>) {
    if catalog.is_changed() && !catalog.is_added() {
        service.invalidate_catalog(&*catalog);
    }
}

// ============================================================================
// Sweep
// ============================================================================

/// Process start / cancel sweep intents
pub fn handle_sweep_intents(
    mut starts: EventReader<StartOutfitSweep>,
    mut cancels: EventReader<CancelOutfitSweep>,
    service: Res<OutfitterService>,
    mut sweep: ResMut<OutfitSweep>,
    mounts: Query<Entity, With<Mount>>,
) {
    if cancels.read().next().is_some() {
        cancels.clear();
        if sweep.is_running() {
            let dropped = sweep.cancel();
            log_info(&format!(
                "Outfit sweep cancelled after {}/{} mounts ({} skipped)",
                sweep.processed(),
                sweep.total(),
                dropped
            ));
        }
    }

    if starts.read().next().is_some() {
        starts.clear();
        if !service.is_active() {
            log("Outfit sweep requested while outfitter is shut down, ignoring");
            return;
        }
        start_sweep(&mut sweep, mounts.iter());
    }
}

fn start_sweep(sweep: &mut OutfitSweep, mounts: impl Iterator<Item = Entity>) {
    let dropped = sweep.start(mounts);
    if dropped > 0 {
        log_info(&format!("Previous outfit sweep replaced ({} mounts skipped)", dropped));
    }
    log_info(&format!("Outfit sweep started: {} mounts", sweep.total()));
}

/// Одна сущность за срабатывание таймера
///
/// Сущности, исчезнувшие после снимка, пропускаются без траты шага.
pub fn advance_outfit_sweep(
    time: Res<Time>,
    mut sweep: ResMut<OutfitSweep>,
    mut service: ResMut<OutfitterService>,
    catalog: Res<ItemDefinitions>,
    mut rng: ResMut<DeterministicRng>,
    mut mounts: MountQuery,
    mut assigned: EventWriter<OutfitAssigned>,
) {
    if !sweep.tick(time.delta()) {
        return;
    }

    while let Some(entity) = sweep.next_entity() {
        if outfit_mount(
            entity,
            OutfitSource::Sweep,
            &mut mounts,
            &mut service,
            &catalog,
            &mut rng,
            &mut assigned,
        ) {
            break;
        }
    }

    if !sweep.is_running() {
        log_info(&format!("Outfit sweep complete: {} mounts", sweep.total()));
    }
}

// ============================================================================
// Spawn
// ============================================================================

/// Маунты, замеченные observer'ом в прошлом кадре
pub fn outfit_spawned_mounts(
    mut pending: ResMut<PendingOutfits>,
    mut service: ResMut<OutfitterService>,
    catalog: Res<ItemDefinitions>,
    mut rng: ResMut<DeterministicRng>,
    mut mounts: MountQuery,
    mut assigned: EventWriter<OutfitAssigned>,
) {
    let ready = pending.take_ready();
    if !service.is_active() {
        return;
    }

    for entity in ready {
        outfit_mount(
            entity,
            OutfitSource::Spawn,
            &mut mounts,
            &mut service,
            &catalog,
            &mut rng,
            &mut assigned,
        );
    }
}

// ============================================================================
// Shared
// ============================================================================

/// Экипировать одну сущность; `false`, если сущности больше нет
fn outfit_mount(
    entity: Entity,
    source: OutfitSource,
    mounts: &mut MountQuery,
    service: &mut OutfitterService,
    catalog: &ItemDefinitions,
    rng: &mut DeterministicRng,
    assigned: &mut EventWriter<OutfitAssigned>,
) -> bool {
    let Ok((container, mut seats)) = mounts.get_mut(entity) else {
        return false;
    };

    // Без контейнера не трогаем даже seats (и не помечаем их Changed)
    let Some(mut container) = container else {
        log(&OutfitError::NoContainer(entity).to_string());
        return true;
    };

    let mut target = MountTarget {
        container: Some(&mut *container),
        seats: &mut *seats,
    };
    let Some(result) = service.outfit(&mut target, catalog, &mut rng.rng) else {
        return true;
    };

    let granted: Vec<ItemId> = result
        .granted
        .iter()
        .map(|item| ItemId::from(item.spec.identifier.as_str()))
        .collect();

    log(&format!(
        "🐎 Outfitted {:?} via {:?}: {} seat(s), items {:?}",
        entity,
        source,
        result.seats.as_u8(),
        granted
    ));

    assigned.write(OutfitAssigned {
        entity,
        source,
        seats: result.seats,
        granted,
    });
    true
}
