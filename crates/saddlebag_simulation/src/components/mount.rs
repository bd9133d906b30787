//! Маунт и его посадочные места

use bevy::prelude::*;

/// Маунт (лошадь) - сущность, которую outfitter экипирует
///
/// Автоматически добавляет SaddleSeats через Required Components.
/// `EquipmentContainer` НЕ required: хост может прикрепить его позже
/// (или не прикрепить вовсе → outfitter ничего не трогает).
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
#[require(SaddleSeats)]
pub struct Mount;

/// Seat tier: сколько пассажирских мест включено на маунте
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Reflect)]
pub enum SeatCount {
    #[default]
    None,
    Single,
    Double,
}

impl SeatCount {
    pub fn as_u8(self) -> u8 {
        match self {
            SeatCount::None => 0,
            SeatCount::Single => 1,
            SeatCount::Double => 2,
        }
    }
}

/// Seat flags маунта
///
/// Два независимых флага (single / double), как их хранит хост.
/// Инвариант: не больше одного флага активно - `set_seat_state`
/// всегда сбрасывает оба перед установкой.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct SaddleSeats {
    single: bool,
    double: bool,
}

impl SaddleSeats {
    pub fn set_seat_state(&mut self, seats: SeatCount) {
        self.single = false;
        self.double = false;
        match seats {
            SeatCount::None => {}
            SeatCount::Single => self.single = true,
            SeatCount::Double => self.double = true,
        }
    }

    pub fn seat_count(&self) -> SeatCount {
        match (self.single, self.double) {
            (_, true) => SeatCount::Double,
            (true, false) => SeatCount::Single,
            (false, false) => SeatCount::None,
        }
    }

    /// Сколько флагов активно (для проверки инварианта)
    pub fn active_flags(&self) -> usize {
        usize::from(self.single) + usize::from(self.double)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seats_default_none() {
        let seats = SaddleSeats::default();
        assert_eq!(seats.seat_count(), SeatCount::None);
        assert_eq!(seats.active_flags(), 0);
    }

    #[test]
    fn test_set_seat_state_keeps_single_flag() {
        let mut seats = SaddleSeats::default();

        seats.set_seat_state(SeatCount::Double);
        assert_eq!(seats.seat_count(), SeatCount::Double);

        seats.set_seat_state(SeatCount::Single);
        assert_eq!(seats.seat_count(), SeatCount::Single);
        assert_eq!(seats.active_flags(), 1);

        seats.set_seat_state(SeatCount::None);
        assert_eq!(seats.active_flags(), 0);
    }

    #[test]
    fn test_seat_count_as_u8() {
        assert_eq!(SeatCount::None.as_u8(), 0);
        assert_eq!(SeatCount::Single.as_u8(), 1);
        assert_eq!(SeatCount::Double.as_u8(), 2);
    }
}
