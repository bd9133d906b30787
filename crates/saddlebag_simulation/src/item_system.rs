//! Item System - каталог определений предметов экипировки
//!
//! # Архитектура
//!
//! **ItemDefinition** - статический blueprint (id + handle + slot):
//! - Хранится в `ItemDefinitions` resource (HashMap lookup в обе стороны)
//! - Immutable данные (name, slot category, numeric handle)
//! - Лошадиная экипировка hardcoded в `ItemDefinitions::horse_equipment()`
//!
//! **ItemCatalog** - граница с внешним каталогом:
//! - `find_definition(identifier)` → numeric handle
//! - `slot_category(handle)` → в какой слот экипировки идёт предмет
//!
//! Outfitting код видит каталог только через trait, поэтому в тестах
//! его легко подменить (или удалить предмет "на лету").
//!
//! # Пример использования
//!
//! ```rust
//! use saddlebag_simulation::item_system::{ItemCatalog, ItemDefinitions, SlotCategory};
//!
//! let defs = ItemDefinitions::horse_equipment();
//! let handle = defs.find_definition("horse.saddlebag").unwrap();
//! assert_eq!(defs.slot_category(handle), Some(SlotCategory::Storage));
//! ```

use bevy::prelude::*;
use std::collections::HashMap;

// ============================================================================
// ItemId / ItemHandle
// ============================================================================

/// Item identifier (short name из конфига)
///
/// # Examples
/// - "horse.armor.roadsign"
/// - "horse.shoes.basic"
/// - "horse.saddlebag"
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Reflect)]
pub struct ItemId(pub String);

impl ItemId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque numeric handle для создания/выдачи предмета
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Reflect)]
pub struct ItemHandle(pub i32);

// ============================================================================
// SlotCategory
// ============================================================================

/// Слот экипировки маунта
///
/// Взаимоисключающие позиции: в одной категории одновременно может
/// находиться только один предмет.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Reflect)]
pub enum SlotCategory {
    Saddle,
    Armor,
    Shoes,
    Storage,
    Head,
}

// ============================================================================
// ItemDefinition (статические данные)
// ============================================================================

/// Static item definition (blueprint)
#[derive(Clone, Debug, Reflect)]
pub struct ItemDefinition {
    pub id: ItemId,
    pub handle: ItemHandle,
    /// Локализованное название
    pub name: String,
    pub slot: SlotCategory,
}

// ============================================================================
// ItemCatalog (boundary)
// ============================================================================

/// Read-only item catalog consumed by the outfitting engine
pub trait ItemCatalog {
    /// Lookup by identifier; `None` means the spec is inert
    fn find_definition(&self, identifier: &str) -> Option<ItemHandle>;

    /// Slot category of a live handle; `None` once the handle is gone
    fn slot_category(&self, handle: ItemHandle) -> Option<SlotCategory>;
}

// ============================================================================
// ItemDefinitions (Resource)
// ============================================================================

/// Item definitions lookup table (resource)
///
/// Хранит все статические данные предметов экипировки.
#[derive(Resource, Clone, Debug, Default)]
pub struct ItemDefinitions {
    definitions: HashMap<ItemHandle, ItemDefinition>,
    handles: HashMap<ItemId, ItemHandle>,
}

impl ItemDefinitions {
    /// Создать пустой registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Получить definition по ID
    pub fn get(&self, id: &ItemId) -> Option<&ItemDefinition> {
        self.handles
            .get(id)
            .and_then(|handle| self.definitions.get(handle))
    }

    pub fn by_handle(&self, handle: ItemHandle) -> Option<&ItemDefinition> {
        self.definitions.get(&handle)
    }

    /// Добавить definition (перезаписывает старую с тем же id)
    pub fn add(&mut self, definition: ItemDefinition) {
        if let Some(old) = self.handles.insert(definition.id.clone(), definition.handle) {
            self.definitions.remove(&old);
        }
        self.definitions.insert(definition.handle, definition);
    }

    /// Удалить definition (каталог может "потерять" предмет между ресолвом и выдачей)
    pub fn remove(&mut self, id: &ItemId) -> Option<ItemDefinition> {
        let handle = self.handles.remove(id)?;
        self.definitions.remove(&handle)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Построить каталог из списка (id, handle, slot) - удобно для тестов
    pub fn from_entries<'a>(entries: impl IntoIterator<Item = (&'a str, i32, SlotCategory)>) -> Self {
        let mut defs = Self::new();
        for (id, handle, slot) in entries {
            defs.add(ItemDefinition {
                id: id.into(),
                handle: ItemHandle(handle),
                name: id.to_string(),
                slot,
            });
        }
        defs
    }

    /// Hardcoded horse equipment
    pub fn horse_equipment() -> Self {
        let mut defs = Self::new();

        // === ARMOR ===
        defs.add(ItemDefinition {
            id: "horse.armor.roadsign".into(),
            handle: ItemHandle(1_001),
            name: "Roadsign Horse Armor".to_string(),
            slot: SlotCategory::Armor,
        });
        defs.add(ItemDefinition {
            id: "horse.armor.wood".into(),
            handle: ItemHandle(1_002),
            name: "Wooden Horse Armor".to_string(),
            slot: SlotCategory::Armor,
        });

        // === SHOES ===
        defs.add(ItemDefinition {
            id: "horse.shoes.basic".into(),
            handle: ItemHandle(1_101),
            name: "Basic Horse Shoes".to_string(),
            slot: SlotCategory::Shoes,
        });
        defs.add(ItemDefinition {
            id: "horse.shoes.advanced".into(),
            handle: ItemHandle(1_102),
            name: "High Quality Horse Shoes".to_string(),
            slot: SlotCategory::Shoes,
        });

        // === STORAGE ===
        defs.add(ItemDefinition {
            id: "horse.saddlebag".into(),
            handle: ItemHandle(1_201),
            name: "Saddle Bag".to_string(),
            slot: SlotCategory::Storage,
        });

        // === SADDLES ===
        defs.add(ItemDefinition {
            id: "horse.saddle.single".into(),
            handle: ItemHandle(1_301),
            name: "Single Horse Saddle".to_string(),
            slot: SlotCategory::Saddle,
        });
        defs.add(ItemDefinition {
            id: "horse.saddle.double".into(),
            handle: ItemHandle(1_302),
            name: "Double Horse Saddle".to_string(),
            slot: SlotCategory::Saddle,
        });

        // === HEAD ===
        defs.add(ItemDefinition {
            id: "horse.bridle".into(),
            handle: ItemHandle(1_401),
            name: "Horse Bridle".to_string(),
            slot: SlotCategory::Head,
        });

        defs
    }
}

impl ItemCatalog for ItemDefinitions {
    fn find_definition(&self, identifier: &str) -> Option<ItemHandle> {
        // ItemId(String) нельзя занять из &str без аллокации - лукап по ключу
        self.handles.get(&ItemId(identifier.to_string())).copied()
    }

    fn slot_category(&self, handle: ItemHandle) -> Option<SlotCategory> {
        self.definitions.get(&handle).map(|def| def.slot)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_horse_equipment_catalog() {
        let defs = ItemDefinitions::horse_equipment();

        assert!(defs.get(&"horse.armor.roadsign".into()).is_some());
        assert!(defs.get(&"horse.armor.wood".into()).is_some());
        assert!(defs.get(&"horse.shoes.basic".into()).is_some());
        assert!(defs.get(&"horse.shoes.advanced".into()).is_some());
        assert!(defs.get(&"horse.saddlebag".into()).is_some());
        assert_eq!(defs.len(), 8);
    }

    #[test]
    fn test_catalog_lookup_both_ways() {
        let defs = ItemDefinitions::horse_equipment();

        let handle = defs.find_definition("horse.shoes.basic").unwrap();
        assert_eq!(handle, ItemHandle(1_101));
        assert_eq!(defs.slot_category(handle), Some(SlotCategory::Shoes));

        assert_eq!(defs.find_definition("horse.unicorn.horn"), None);
        assert_eq!(defs.slot_category(ItemHandle(-1)), None);
    }

    #[test]
    fn test_remove_drops_handle() {
        let mut defs = ItemDefinitions::horse_equipment();
        let handle = defs.find_definition("horse.saddlebag").unwrap();

        assert!(defs.remove(&"horse.saddlebag".into()).is_some());
        assert_eq!(defs.find_definition("horse.saddlebag"), None);
        assert_eq!(defs.slot_category(handle), None);
    }

    #[test]
    fn test_add_replaces_previous_handle() {
        let mut defs = ItemDefinitions::from_entries([("a", 1, SlotCategory::Armor)]);
        defs.add(ItemDefinition {
            id: "a".into(),
            handle: ItemHandle(2),
            name: "A2".to_string(),
            slot: SlotCategory::Head,
        });

        assert_eq!(defs.len(), 1);
        assert_eq!(defs.slot_category(ItemHandle(1)), None);
        assert_eq!(defs.slot_category(ItemHandle(2)), Some(SlotCategory::Head));
    }
}
