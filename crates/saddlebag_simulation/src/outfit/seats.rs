//! SeatAssigner - двухступенчатый ролл мест в седле
//!
//! roll₁ < double → Double; иначе roll₂ < single → Single; иначе None.
//! Double проверяется первым и short-circuit'ит второй ролл:
//! (100, 100) всегда даёт Double.

use rand::Rng;

use crate::components::SeatCount;

/// Bernoulli trial: равномерный ролл на `[0, 100)` против процента
pub fn chance_succeeded<R: Rng + ?Sized>(percentage: u32, rng: &mut R) -> bool {
    rng.gen_range(0..100u32) < percentage
}

pub fn assign_seats<R: Rng + ?Sized>(double_chance: u32, single_chance: u32, rng: &mut R) -> SeatCount {
    if chance_succeeded(double_chance, rng) {
        SeatCount::Double
    } else if chance_succeeded(single_chance, rng) {
        SeatCount::Single
    } else {
        SeatCount::None
    }
}
