//! Error taxonomy
//!
//! `OutfitError` - диагностика outfitting пути. Никогда не пробрасывается
//! наружу: логируется и деградирует в "выдать меньше предметов".
//!
//! `ConfigError` - I/O конфигурационного документа.

use bevy::prelude::Entity;
use thiserror::Error;

/// Non-fatal anomalies of the assignment path
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OutfitError {
    /// Item identifier is unknown to the catalog (spec is skipped)
    #[error("item definition not found: {0}")]
    NotFound(String),
    /// Entity has no equipment container attached (no-op)
    #[error("entity {0:?} has no equipment container")]
    NoContainer(Entity),
    /// min > max slot bounds (recovered by clamping at use time)
    #[error("invalid slot bounds: min {min} > max {max}")]
    InvalidBounds { min: u32, max: u32 },
    /// Chance above 100% (behaves as 100)
    #[error("{field} is {value}%, expected 0..=100")]
    ChanceOutOfRange { field: &'static str, value: u32 },
}

/// Errors that can occur when reading or writing the config document
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// JSON parsing or serialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
