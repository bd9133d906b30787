//! ItemCatalogResolver - мемоизированный ресолв item specs через каталог
//!
//! Успешный ресолв кэшируется на всё время жизни процесса (ключ - identifier:
//! все specs с одним identifier ресолвятся одинаково). Неудача НЕ кэшируется:
//! каталог может появиться позже, следующий вызов попробует снова.

use std::collections::HashMap;

use crate::config::ItemSpec;
use crate::item_system::{ItemCatalog, ItemHandle, SlotCategory};

/// ItemSpec + catalog metadata
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedItem {
    pub spec: ItemSpec,
    pub handle: ItemHandle,
    pub slot: SlotCategory,
}

#[derive(Debug, Default)]
pub struct ItemCatalogResolver {
    cache: HashMap<String, (ItemHandle, SlotCategory)>,
}

impl ItemCatalogResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// `None` = NotFound (spec пропускается вызывающим кодом)
    pub fn resolve<C>(&mut self, spec: &ItemSpec, catalog: &C) -> Option<ResolvedItem>
    where
        C: ItemCatalog + ?Sized,
    {
        if !spec.is_grantable() {
            return None;
        }

        let (handle, slot) = match self.cache.get(&spec.identifier) {
            Some(&cached) => cached,
            None => {
                let handle = catalog.find_definition(&spec.identifier)?;
                let slot = catalog.slot_category(handle)?;
                self.cache.insert(spec.identifier.clone(), (handle, slot));
                (handle, slot)
            }
        };

        Some(ResolvedItem {
            spec: spec.clone(),
            handle,
            slot,
        })
    }

    /// Сбросить memo (каталог заменён)
    pub fn invalidate(&mut self) {
        self.cache.clear();
    }

    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item_system::ItemDefinitions;
    use std::cell::Cell;

    /// Каталог, считающий обращения
    struct CountingCatalog {
        inner: ItemDefinitions,
        lookups: Cell<usize>,
    }

    impl ItemCatalog for CountingCatalog {
        fn find_definition(&self, identifier: &str) -> Option<ItemHandle> {
            self.lookups.set(self.lookups.get() + 1);
            self.inner.find_definition(identifier)
        }

        fn slot_category(&self, handle: ItemHandle) -> Option<SlotCategory> {
            self.inner.slot_category(handle)
        }
    }

    #[test]
    fn test_resolve_known_item() {
        let defs = ItemDefinitions::horse_equipment();
        let mut resolver = ItemCatalogResolver::new();

        let item = resolver
            .resolve(&ItemSpec::new("horse.saddlebag", 1), &defs)
            .unwrap();
        assert_eq!(item.slot, SlotCategory::Storage);
        assert_eq!(item.handle, ItemHandle(1_201));
        assert_eq!(item.spec.amount, 1);
    }

    #[test]
    fn test_success_is_memoized() {
        let catalog = CountingCatalog {
            inner: ItemDefinitions::horse_equipment(),
            lookups: Cell::new(0),
        };
        let mut resolver = ItemCatalogResolver::new();
        let spec = ItemSpec::new("horse.armor.wood", 1);

        for _ in 0..5 {
            assert!(resolver.resolve(&spec, &catalog).is_some());
        }
        assert_eq!(catalog.lookups.get(), 1);
        assert_eq!(resolver.cached_len(), 1);
    }

    #[test]
    fn test_failure_is_retried() {
        let mut defs = ItemDefinitions::new();
        let mut resolver = ItemCatalogResolver::new();
        let spec = ItemSpec::new("horse.bridle", 1);

        // Каталог ещё пуст
        assert!(resolver.resolve(&spec, &defs).is_none());
        assert_eq!(resolver.cached_len(), 0);

        // Каталог "догрузился"
        defs = ItemDefinitions::horse_equipment();
        let item = resolver.resolve(&spec, &defs).unwrap();
        assert_eq!(item.slot, SlotCategory::Head);
    }

    #[test]
    fn test_zero_amount_is_inert() {
        let defs = ItemDefinitions::horse_equipment();
        let mut resolver = ItemCatalogResolver::new();

        assert!(resolver
            .resolve(&ItemSpec::new("horse.saddlebag", 0), &defs)
            .is_none());
    }

    #[test]
    fn test_invalidate_clears_memo() {
        let defs = ItemDefinitions::horse_equipment();
        let mut resolver = ItemCatalogResolver::new();
        resolver.resolve(&ItemSpec::new("horse.saddlebag", 1), &defs);

        resolver.invalidate();
        assert_eq!(resolver.cached_len(), 0);
    }
}
