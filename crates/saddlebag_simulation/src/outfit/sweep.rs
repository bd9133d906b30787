//! BatchProcessor - кооперативный sweep по уже существующей популяции
//!
//! # Архитектура
//!
//! - `start` снимает снимок сущностей в порядке перечисления и заменяет
//!   текущий sweep (активен максимум один)
//! - Каждый раз, когда repeating timer (`sweep_step`, не ноль) срабатывает,
//!   обрабатывается РОВНО одна сущность → sweep никогда не монополизирует кадр
//! - `cancel` мгновенно очищает очередь; уже экипированные остаются как есть
//!
//! Между шагами держим только курсор (очередь) - RNG общий, в ресурсе.

use std::collections::VecDeque;
use std::time::Duration;

use bevy::prelude::*;

/// Пауза между сущностями по умолчанию
pub const DEFAULT_SWEEP_STEP: Duration = Duration::from_millis(50);

/// Нулевая пауза запрещена: sweep обязан уступать хосту
pub const MIN_SWEEP_STEP: Duration = Duration::from_millis(1);

#[derive(Resource, Debug)]
pub struct OutfitSweep {
    queue: VecDeque<Entity>,
    timer: Timer,
    total: usize,
    processed: usize,
}

impl Default for OutfitSweep {
    fn default() -> Self {
        Self::new(DEFAULT_SWEEP_STEP)
    }
}

impl OutfitSweep {
    pub fn new(step: Duration) -> Self {
        Self {
            queue: VecDeque::new(),
            timer: Timer::new(step.max(MIN_SWEEP_STEP), TimerMode::Repeating),
            total: 0,
            processed: 0,
        }
    }

    /// Начать новый sweep; незавершённый предыдущий отбрасывается
    ///
    /// Возвращает сколько сущностей осталось необработанными в старом sweep.
    pub fn start(&mut self, entities: impl IntoIterator<Item = Entity>) -> usize {
        let dropped = self.cancel();
        self.queue.extend(entities);
        self.total = self.queue.len();
        self.processed = 0;
        self.timer.reset();
        dropped
    }

    /// Остановить sweep; возвращает сколько сущностей не было обработано
    pub fn cancel(&mut self) -> usize {
        let remaining = self.queue.len();
        self.queue.clear();
        remaining
    }

    /// Продвинуть таймер; `true` - можно обработать следующую сущность
    pub fn tick(&mut self, delta: Duration) -> bool {
        if self.queue.is_empty() {
            return false;
        }
        self.timer.tick(delta);
        self.timer.just_finished()
    }

    /// Следующая сущность из снимка
    pub fn next_entity(&mut self) -> Option<Entity> {
        let entity = self.queue.pop_front()?;
        self.processed += 1;
        Some(entity)
    }

    pub fn set_step(&mut self, step: Duration) {
        self.timer.set_duration(step.max(MIN_SWEEP_STEP));
    }

    pub fn is_running(&self) -> bool {
        !self.queue.is_empty()
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }

    pub fn processed(&self) -> usize {
        self.processed
    }

    pub fn total(&self) -> usize {
        self.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STEP: Duration = Duration::from_millis(10);

    fn entities(count: u32) -> Vec<Entity> {
        (0..count).map(Entity::from_raw).collect()
    }

    #[test]
    fn test_sweep_yields_one_entity_per_step() {
        let mut sweep = OutfitSweep::new(STEP);
        sweep.start(entities(3));

        // Пол-шага - ещё рано
        assert!(!sweep.tick(STEP / 2));
        assert!(sweep.tick(STEP / 2));
        assert_eq!(sweep.next_entity(), Some(Entity::from_raw(0)));

        assert!(sweep.tick(STEP));
        assert_eq!(sweep.next_entity(), Some(Entity::from_raw(1)));
        assert_eq!(sweep.remaining(), 1);
        assert_eq!(sweep.processed(), 2);
    }

    #[test]
    fn test_cancel_drops_remaining() {
        let mut sweep = OutfitSweep::new(STEP);
        sweep.start(entities(5));
        sweep.next_entity();

        assert_eq!(sweep.cancel(), 4);
        assert!(!sweep.is_running());
        assert!(!sweep.tick(STEP));
        // Повторный cancel безопасен
        assert_eq!(sweep.cancel(), 0);
    }

    #[test]
    fn test_start_replaces_running_sweep() {
        let mut sweep = OutfitSweep::new(STEP);
        sweep.start(entities(5));
        sweep.next_entity();

        let dropped = sweep.start(entities(2));
        assert_eq!(dropped, 4);
        assert_eq!(sweep.total(), 2);
        assert_eq!(sweep.processed(), 0);
        assert_eq!(sweep.next_entity(), Some(Entity::from_raw(0)));
    }

    #[test]
    fn test_zero_step_is_clamped() {
        let mut sweep = OutfitSweep::new(Duration::ZERO);
        sweep.start(entities(1));
        assert!(!sweep.tick(Duration::ZERO));
        assert!(sweep.tick(MIN_SWEEP_STEP));
    }

    #[test]
    fn test_idle_sweep_does_not_tick() {
        let mut sweep = OutfitSweep::new(STEP);
        assert!(!sweep.tick(STEP * 10));
        assert_eq!(sweep.next_entity(), None);
    }
}
