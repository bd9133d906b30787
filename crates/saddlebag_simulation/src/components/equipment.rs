//! Equipment container маунта
//!
//! # Архитектура
//!
//! **EquipmentContainer** - то, что хост даёт outfitter'у:
//! - `clear()` - выбросить всё (предметы никуда не возвращаются)
//! - `grant(handle, amount)` - выдать предмет
//!
//! Слоты не валидируются здесь: уникальность по `SlotCategory`
//! гарантирует selector ещё до выдачи.

use bevy::prelude::*;
use crate::item_system::ItemHandle;

/// Предмет, лежащий в контейнере
#[derive(Clone, Copy, Debug, PartialEq, Eq, Reflect)]
pub struct EquippedItem {
    pub handle: ItemHandle,
    pub amount: u32,
}

/// Equipment container component
#[derive(Component, Debug, Clone, Default, Reflect)]
#[reflect(Component)]
pub struct EquipmentContainer {
    items: Vec<EquippedItem>,
}

impl EquipmentContainer {
    /// Создать пустой контейнер
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn grant(&mut self, handle: ItemHandle, amount: u32) {
        self.items.push(EquippedItem { handle, amount });
    }

    pub fn items(&self) -> &[EquippedItem] {
        &self.items
    }

    pub fn contains(&self, handle: ItemHandle) -> bool {
        self.items.iter().any(|item| item.handle == handle)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_container_grant_and_clear() {
        let mut container = EquipmentContainer::empty();
        assert!(container.is_empty());

        container.grant(ItemHandle(7), 1);
        container.grant(ItemHandle(9), 3);
        assert_eq!(container.len(), 2);
        assert!(container.contains(ItemHandle(9)));
        assert_eq!(container.items()[1].amount, 3);

        container.clear();
        assert!(container.is_empty());
        assert!(!container.contains(ItemHandle(7)));
    }
}
