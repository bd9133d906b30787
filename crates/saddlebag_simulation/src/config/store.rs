//! Persisted config document (JSON)
//!
//! # Flow загрузки
//! 1. Файла нет → engine defaults, записываем на диск
//! 2. Читаем + парсим
//! 3. `version < ENGINE_VERSION` → миграция (warning оператору), штамп версии
//! 4. Документ всегда переписывается целиком (pretty JSON)

use std::fs;
use std::path::{Path, PathBuf};

use super::{ConfigVersion, OutfitConfig, ENGINE_VERSION};
use crate::error::ConfigError;
use crate::logger::log_warning;

/// Результат загрузки
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: OutfitConfig,
    /// Исходная версия, если документ мигрировал
    pub migrated_from: Option<String>,
    /// Файла не было - записали defaults
    pub created: bool,
}

/// JSON config store bound to one file path
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load → migrate → stamp → rewrite
    pub fn load(&self) -> Result<LoadedConfig, ConfigError> {
        if !self.path.exists() {
            let config = OutfitConfig::engine_defaults();
            self.save(&config)?;
            return Ok(LoadedConfig {
                config,
                migrated_from: None,
                created: true,
            });
        }

        let content = fs::read_to_string(&self.path)?;
        let mut config: OutfitConfig = serde_json::from_str(&content)?;

        let mut migrated_from = None;
        if config.parsed_version() < ConfigVersion::engine() {
            migrated_from = Some(config.version.clone());
            config = migrate(config);
        }

        self.save(&config)?;

        Ok(LoadedConfig {
            config,
            migrated_from,
            created: false,
        })
    }

    /// Перезаписать документ целиком
    pub fn save(&self, config: &OutfitConfig) -> Result<(), ConfigError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(config)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

/// Поднять документ до версии движка
///
/// Единственный tier: всё ниже 1.0.0 → полный reset к defaults.
pub fn migrate(config: OutfitConfig) -> OutfitConfig {
    log_warning("Config changes detected! Updating...");

    let from = config.version.clone();
    let mut migrated = if config.parsed_version() < ConfigVersion::FIRST_STABLE {
        OutfitConfig::engine_defaults()
    } else {
        config
    };

    log_warning(&format!(
        "Config update complete! Updated from version '{}' to {}",
        from, ENGINE_VERSION
    ));
    migrated.version = ENGINE_VERSION.to_string();
    migrated
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ItemSpec;

    fn store_in(dir: &tempfile::TempDir) -> ConfigStore {
        ConfigStore::new(dir.path().join("outfitter").join("config.json"))
    }

    #[test]
    fn test_missing_file_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        let loaded = store.load().unwrap();
        assert!(loaded.created);
        assert!(loaded.migrated_from.is_none());
        assert_eq!(loaded.config, OutfitConfig::engine_defaults());

        let on_disk: OutfitConfig =
            serde_json::from_str(&fs::read_to_string(store.path()).unwrap()).unwrap();
        assert_eq!(on_disk, OutfitConfig::engine_defaults());
    }

    #[test]
    fn test_old_version_resets_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let old = OutfitConfig {
            version: "0.9.0".to_string(),
            double_seat_chance: 0,
            items: vec![ItemSpec::new("horse.bridle", 1)],
            ..OutfitConfig::engine_defaults()
        };
        store.save(&old).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.migrated_from.as_deref(), Some("0.9.0"));
        assert_eq!(loaded.config, OutfitConfig::engine_defaults());

        // Переписан со штампом текущей версии
        let on_disk: OutfitConfig =
            serde_json::from_str(&fs::read_to_string(store.path()).unwrap()).unwrap();
        assert_eq!(on_disk.version, ENGINE_VERSION);
    }

    #[test]
    fn test_current_version_is_preserved() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let custom = OutfitConfig {
            double_seat_chance: 5,
            single_seat_chance: 95,
            min_slots_to_equip: 0,
            max_slots_to_equip: 2,
            items: vec![ItemSpec::new("horse.saddle.single", 1)],
            ..OutfitConfig::engine_defaults()
        };
        store.save(&custom).unwrap();

        let loaded = store.load().unwrap();
        assert!(loaded.migrated_from.is_none());
        assert!(!loaded.created);
        assert_eq!(loaded.config, custom);
    }

    #[test]
    fn test_malformed_json_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), "{ not json").unwrap();

        assert!(matches!(store.load(), Err(ConfigError::Json(_))));
    }

    #[test]
    fn test_migrate_stamps_version_without_reset_above_first_stable() {
        let config = OutfitConfig {
            version: "1.0.0".to_string(),
            double_seat_chance: 7,
            ..OutfitConfig::engine_defaults()
        };
        let migrated = migrate(config);
        assert_eq!(migrated.double_seat_chance, 7);
        assert_eq!(migrated.version, ENGINE_VERSION);
    }
}
