//! UniqueSlotSelector - случайное подмножество items, по одному на slot category
//!
//! # Алгоритм
//! 1. Fisher–Yates перестановка КОПИИ списка (канонический список конфига
//!    не трогаем)
//! 2. Один проход: ресолвим каждый item, берём его только если его
//!    категория ещё не занята в этом проходе
//!
//! Первый в случайном порядке выигрывает категорию. Unresolvable и
//! дубликаты категорий молча отбрасываются (unknown identifiers
//! репортятся один раз при установке конфига, не на каждом маунте). Порядок выхода = случайный
//! порядок перестановки.

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;

use super::resolver::{ItemCatalogResolver, ResolvedItem};
use crate::config::ItemSpec;
use crate::item_system::ItemCatalog;

pub fn select_unique<C, R>(
    items: &[ItemSpec],
    resolver: &mut ItemCatalogResolver,
    catalog: &C,
    rng: &mut R,
) -> Vec<ResolvedItem>
where
    C: ItemCatalog + ?Sized,
    R: Rng + ?Sized,
{
    let mut order: Vec<&ItemSpec> = items.iter().collect();
    order.shuffle(rng);

    let mut seen_slots = HashSet::new();
    order
        .into_iter()
        .filter_map(|spec| resolver.resolve(spec, catalog))
        .filter(|item| seen_slots.insert(item.slot))
        .collect()
}
