//! Версия конфигурационного документа
//!
//! Сравнение покомпонентное и численное: "1.10.0" > "1.9.0".
//! Недостающие компоненты = 0, мусор → 0.0.0 (документ считается
//! самым старым и уходит в миграцию).

use std::fmt;

/// Версия движка - ей штампуется каждый переписанный документ
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ConfigVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl ConfigVersion {
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self { major, minor, patch }
    }

    /// Первая версия со стабильной схемой; всё ниже - полный reset
    pub const FIRST_STABLE: ConfigVersion = ConfigVersion::new(1, 0, 0);

    pub fn parse(raw: &str) -> Self {
        let mut parts = [0u32; 3];
        for (slot, component) in parts.iter_mut().zip(raw.trim().split('.')) {
            match component.parse() {
                Ok(value) => *slot = value,
                Err(_) => return Self::default(),
            }
        }
        let [major, minor, patch] = parts;
        Self { major, minor, patch }
    }

    pub fn engine() -> Self {
        Self::parse(ENGINE_VERSION)
    }
}

impl fmt::Display for ConfigVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}
