//! SpawnListener - экипировка новых маунтов с задержкой на один шаг
//!
//! # Flow
//! 1. Observer на `OnAdd<Mount>` кладёт entity в `incoming`
//! 2. `Last` schedule: `incoming` → `ready` (конец текущего кадра)
//! 3. Следующий кадр, `Update`: `ready` разбирается и экипируется
//!
//! К моменту экипировки construction-time компоненты (контейнер и т.п.)
//! уже на месте: хост успевает доспавнить сущность в том же кадре.

use bevy::prelude::*;

use crate::components::Mount;

#[derive(Resource, Debug, Default)]
pub struct PendingOutfits {
    incoming: Vec<Entity>,
    ready: Vec<Entity>,
}

impl PendingOutfits {
    pub fn notify(&mut self, entity: Entity) {
        self.incoming.push(entity);
    }

    /// Конец шага: всё замеченное становится готовым к обработке
    pub fn promote(&mut self) {
        self.ready.append(&mut self.incoming);
    }

    pub fn take_ready(&mut self) -> Vec<Entity> {
        std::mem::take(&mut self.ready)
    }

    pub fn clear(&mut self) {
        self.incoming.clear();
        self.ready.clear();
    }

    pub fn len(&self) -> usize {
        self.incoming.len() + self.ready.len()
    }

    pub fn is_empty(&self) -> bool {
        self.incoming.is_empty() && self.ready.is_empty()
    }
}

/// Observer: новый маунт появился
pub fn queue_spawned_mount(trigger: Trigger<OnAdd, Mount>, mut pending: ResMut<PendingOutfits>) {
    pending.notify(trigger.target());
}

/// `Last` system: закрыть шаг
pub fn promote_pending_outfits(mut pending: ResMut<PendingOutfits>) {
    if !pending.incoming.is_empty() {
        pending.promote();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notified_entity_not_ready_until_promoted() {
        let mut pending = PendingOutfits::default();
        pending.notify(Entity::from_raw(1));

        assert!(pending.take_ready().is_empty());
        assert_eq!(pending.len(), 1);

        pending.promote();
        assert_eq!(pending.take_ready(), vec![Entity::from_raw(1)]);
        assert!(pending.is_empty());
    }

    #[test]
    fn test_clear_drops_both_buffers() {
        let mut pending = PendingOutfits::default();
        pending.notify(Entity::from_raw(1));
        pending.promote();
        pending.notify(Entity::from_raw(2));

        pending.clear();
        assert!(pending.is_empty());
    }
}
