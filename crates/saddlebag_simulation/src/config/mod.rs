//! Outfit configuration - версионированный документ с item specs,
//! шансами на сёдла и границами заполнения слотов.
//!
//! # Архитектура
//!
//! - `OutfitConfig` - immutable после загрузки, заменяется целиком (reload)
//! - `ItemSpec` - identifier + amount, резолвится через каталог лениво
//! - `ConfigStore` - чтение/миграция/перезапись JSON документа
//!
//! Инвариант `min ≤ max` НЕ форсится при загрузке: нарушение логируется,
//! а при использовании границы просто клампятся (см. `outfit::assigner`).

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::OutfitError;
use crate::item_system::ItemCatalog;

pub mod store;
pub mod version;

pub use store::{ConfigStore, LoadedConfig};
pub use version::{ConfigVersion, ENGINE_VERSION};

// ============================================================================
// ItemSpec
// ============================================================================

/// Configured candidate item
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemSpec {
    pub identifier: String,
    pub amount: u32,
}

impl ItemSpec {
    pub fn new(identifier: impl Into<String>, amount: u32) -> Self {
        Self {
            identifier: identifier.into(),
            amount,
        }
    }

    /// Zero amount → spec инертен (никогда не выдаётся)
    pub fn is_grantable(&self) -> bool {
        self.amount > 0
    }
}

// ============================================================================
// OutfitConfig
// ============================================================================

/// Шанс в процентах; всё выше ведёт себя как 100
pub const MAX_CHANCE: u32 = 100;

/// Outfit configuration document
///
/// Шансы - проценты, ролл равномерный на `[0, 100)`:
/// `0` = никогда, `100` (и выше) = всегда.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OutfitConfig {
    /// Пустая/отсутствующая версия → документ считается древним
    #[serde(default)]
    pub version: String,
    pub double_seat_chance: u32,
    pub single_seat_chance: u32,
    pub min_slots_to_equip: u32,
    pub max_slots_to_equip: u32,
    pub items: Vec<ItemSpec>,
}

impl OutfitConfig {
    /// Engine defaults (horse equipment)
    pub fn engine_defaults() -> Self {
        Self {
            version: ENGINE_VERSION.to_string(),
            double_seat_chance: 50,
            single_seat_chance: 50,
            min_slots_to_equip: 1,
            max_slots_to_equip: 4,
            items: vec![
                ItemSpec::new("horse.armor.roadsign", 1),
                ItemSpec::new("horse.shoes.advanced", 1),
                ItemSpec::new("horse.saddlebag", 1),
                ItemSpec::new("horse.armor.wood", 1),
                ItemSpec::new("horse.shoes.basic", 1),
            ],
        }
    }

    pub fn parsed_version(&self) -> ConfigVersion {
        ConfigVersion::parse(&self.version)
    }

    /// Non-fatal проблемы документа (для логов при загрузке)
    pub fn diagnose(&self) -> Vec<OutfitError> {
        let mut problems = Vec::new();
        for (field, value) in [
            ("doubleSeatChance", self.double_seat_chance),
            ("singleSeatChance", self.single_seat_chance),
        ] {
            if value > MAX_CHANCE {
                problems.push(OutfitError::ChanceOutOfRange { field, value });
            }
        }
        if self.min_slots_to_equip > self.max_slots_to_equip {
            problems.push(OutfitError::InvalidBounds {
                min: self.min_slots_to_equip,
                max: self.max_slots_to_equip,
            });
        }
        problems
    }

    /// Identifiers, которых каталог не знает (по одному `NotFound` на identifier)
    pub fn unknown_items<C>(&self, catalog: &C) -> Vec<OutfitError>
    where
        C: ItemCatalog + ?Sized,
    {
        let mut seen = HashSet::new();
        self.items
            .iter()
            .filter(|spec| spec.is_grantable())
            .filter(|spec| seen.insert(spec.identifier.as_str()))
            .filter(|spec| catalog.find_definition(&spec.identifier).is_none())
            .map(|spec| OutfitError::NotFound(spec.identifier.clone()))
            .collect()
    }

    /// Specs с amount = 0 (инертны)
    pub fn inert_specs(&self) -> impl Iterator<Item = &ItemSpec> {
        self.items.iter().filter(|spec| !spec.is_grantable())
    }
}

impl Default for OutfitConfig {
    fn default() -> Self {
        Self::engine_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_defaults() {
        let config = OutfitConfig::engine_defaults();
        assert_eq!(config.version, ENGINE_VERSION);
        assert_eq!(config.double_seat_chance, 50);
        assert_eq!(config.single_seat_chance, 50);
        assert_eq!(config.min_slots_to_equip, 1);
        assert_eq!(config.max_slots_to_equip, 4);
        assert_eq!(config.items.len(), 5);
        assert!(config.diagnose().is_empty());
    }

    #[test]
    fn test_json_field_names() {
        let json = serde_json::to_value(OutfitConfig::engine_defaults()).unwrap();
        assert_eq!(json["doubleSeatChance"], 50);
        assert_eq!(json["maxSlotsToEquip"], 4);
        assert_eq!(json["items"][0]["identifier"], "horse.armor.roadsign");
        assert_eq!(json["items"][0]["amount"], 1);
    }

    #[test]
    fn test_missing_version_is_oldest() {
        let config: OutfitConfig = serde_json::from_str(r#"{ "doubleSeatChance": 10 }"#).unwrap();
        assert_eq!(config.version, "");
        assert_eq!(config.parsed_version(), ConfigVersion::default());
        assert_eq!(config.double_seat_chance, 10);
        // Остальные поля - engine defaults
        assert_eq!(config.items.len(), 5);
    }

    #[test]
    fn test_diagnose_inverted_bounds() {
        let config = OutfitConfig {
            min_slots_to_equip: 3,
            max_slots_to_equip: 1,
            ..OutfitConfig::engine_defaults()
        };
        assert_eq!(
            config.diagnose(),
            vec![OutfitError::InvalidBounds { min: 3, max: 1 }]
        );
    }

    #[test]
    fn test_diagnose_chance_above_hundred() {
        let config = OutfitConfig {
            double_seat_chance: 100,
            single_seat_chance: 250,
            ..OutfitConfig::engine_defaults()
        };
        assert_eq!(
            config.diagnose(),
            vec![OutfitError::ChanceOutOfRange {
                field: "singleSeatChance",
                value: 250
            }]
        );
    }

    #[test]
    fn test_diagnose_reports_every_problem() {
        let config = OutfitConfig {
            double_seat_chance: 101,
            min_slots_to_equip: 2,
            max_slots_to_equip: 0,
            ..OutfitConfig::engine_defaults()
        };
        let problems = config.diagnose();
        assert_eq!(problems.len(), 2);
        assert!(problems.contains(&OutfitError::InvalidBounds { min: 2, max: 0 }));
    }

    #[test]
    fn test_unknown_items_reported_once_per_identifier() {
        let catalog = crate::item_system::ItemDefinitions::horse_equipment();
        let config = OutfitConfig {
            items: vec![
                ItemSpec::new("horse.unicorn.horn", 1),
                ItemSpec::new("horse.saddlebag", 1),
                ItemSpec::new("horse.unicorn.horn", 2),
                // amount 0 уже репортится как inert
                ItemSpec::new("horse.ghost", 0),
            ],
            ..OutfitConfig::engine_defaults()
        };

        assert_eq!(
            config.unknown_items(&catalog),
            vec![OutfitError::NotFound("horse.unicorn.horn".to_string())]
        );
        assert!(OutfitConfig::engine_defaults().unknown_items(&catalog).is_empty());
    }

    #[test]
    fn test_inert_specs() {
        let config = OutfitConfig {
            items: vec![ItemSpec::new("a", 1), ItemSpec::new("b", 0)],
            ..OutfitConfig::engine_defaults()
        };
        let inert: Vec<_> = config.inert_specs().map(|s| s.identifier.as_str()).collect();
        assert_eq!(inert, vec!["b"]);
    }
}
