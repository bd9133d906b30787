//! EquipmentAssigner - полный outfit одной сущности
//!
//! # Flow
//! 0. Нет контейнера → ничего не трогаем, RNG не тянем, пустой результат
//! 1. Seat roll → `set_seat_state` (сбрасывает оба флага перед установкой)
//! 2. `clear()` контейнера - "экипировка с нуля", старое выбрасывается
//! 3. `select_unique` по items конфига
//! 4. `slots_to_fill` в границах min/max, кламп к `[0, min(4, unique)]`
//! 5. Выдаём первые `slots_to_fill` items; item, пропавший из каталога
//!    между ресолвом и выдачей, пропускается без замены
//!
//! Ни один шаг не фейлится жёстко: всё деградирует в "выдать меньше".

use rand::Rng;

use super::resolver::{ItemCatalogResolver, ResolvedItem};
use super::seats::assign_seats;
use super::selector::select_unique;
use crate::components::{EquipmentContainer, SaddleSeats, SeatCount};
use crate::config::OutfitConfig;
use crate::item_system::ItemCatalog;
use crate::logger::log;

/// Максимум слотов экипировки маунта
pub const MAX_EQUIPMENT_SLOTS: usize = 4;

// ============================================================================
// OutfitTarget (boundary)
// ============================================================================

/// Сущность, которую экипируем: контейнер (может отсутствовать) + seat flags
pub trait OutfitTarget {
    fn equipment(&mut self) -> Option<&mut EquipmentContainer>;
    fn set_seat_state(&mut self, seats: SeatCount);
}

/// ECS-адаптер: компоненты маунта, вынутые из Query
pub struct MountTarget<'a> {
    pub container: Option<&'a mut EquipmentContainer>,
    pub seats: &'a mut SaddleSeats,
}

impl OutfitTarget for MountTarget<'_> {
    fn equipment(&mut self) -> Option<&mut EquipmentContainer> {
        self.container.as_deref_mut()
    }

    fn set_seat_state(&mut self, seats: SeatCount) {
        self.seats.set_seat_state(seats);
    }
}

// ============================================================================
// SlotAssignmentResult
// ============================================================================

/// Per-entity результат (не хранится, только для observability/тестов)
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SlotAssignmentResult {
    pub seats: SeatCount,
    pub granted: Vec<ResolvedItem>,
}

impl SlotAssignmentResult {
    pub fn empty() -> Self {
        Self::default()
    }
}

// ============================================================================
// Assignment
// ============================================================================

/// Сколько слотов заполнить
///
/// `upper = min(unique, max)` считается ДО ролла; `min > upper` → 0 без ролла.
/// Ролл включительный: `[min, upper]`.
pub fn slots_to_fill<R: Rng + ?Sized>(min: u32, max: u32, unique: usize, rng: &mut R) -> usize {
    let min = min as usize;
    let upper = (max as usize).min(unique);
    if min > upper {
        return 0;
    }

    let drawn = rng.gen_range(min..=upper);
    drawn.min(MAX_EQUIPMENT_SLOTS.min(unique))
}

/// Выдать первые `count` items в контейнер
///
/// Handle, который каталог больше не знает, пропускается и всё равно
/// занимает свою позицию (следующий кандидат его не заменяет).
pub fn grant_items<C>(
    container: &mut EquipmentContainer,
    unique: &[ResolvedItem],
    count: usize,
    catalog: &C,
) -> Vec<ResolvedItem>
where
    C: ItemCatalog + ?Sized,
{
    let mut granted = Vec::with_capacity(count);
    for item in unique.iter().take(count) {
        if catalog.slot_category(item.handle).is_none() {
            log(&format!("Skipping {}: definition vanished before grant", item.spec.identifier));
            continue;
        }
        container.grant(item.handle, item.spec.amount);
        granted.push(item.clone());
    }
    granted
}

pub fn assign_outfit<T, C, R>(
    target: &mut T,
    config: &OutfitConfig,
    resolver: &mut ItemCatalogResolver,
    catalog: &C,
    rng: &mut R,
) -> SlotAssignmentResult
where
    T: OutfitTarget + ?Sized,
    C: ItemCatalog + ?Sized,
    R: Rng + ?Sized,
{
    if target.equipment().is_none() {
        return SlotAssignmentResult::empty();
    }

    // 1. Seats
    let seats = assign_seats(config.double_seat_chance, config.single_seat_chance, rng);
    target.set_seat_state(seats);

    let Some(container) = target.equipment() else {
        return SlotAssignmentResult { seats, granted: Vec::new() };
    };

    // 2. Equip from scratch
    container.clear();

    // 3-4. Unique-per-slot candidates + fill count
    let unique = select_unique(&config.items, resolver, catalog, rng);
    let count = slots_to_fill(
        config.min_slots_to_equip,
        config.max_slots_to_equip,
        unique.len(),
        rng,
    );

    // 5. Grant
    let granted = grant_items(container, &unique, count, catalog);

    SlotAssignmentResult { seats, granted }
}
