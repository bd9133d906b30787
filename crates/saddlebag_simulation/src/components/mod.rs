//! ECS Components для маунтов
//!
//! Организация по доменам:
//! - mount: marker маунта + места в седле (Mount, SaddleSeats, SeatCount)
//! - equipment: контейнер экипировки (EquipmentContainer, EquippedItem)

pub mod mount;
pub mod equipment;

// Re-exports для удобного импорта
pub use mount::*;
pub use equipment::*;
