use bracket_lib::prelude::RandomNumberGenerator;
use common::Dice;

/// Game dice backed by `bracket-lib`'s generator.
pub struct GameRng(RandomNumberGenerator);

impl GameRng {
    /// Seeds from the system clock.
    pub fn new() -> Self {
        Self(RandomNumberGenerator::new())
    }

    pub fn seeded(seed: u64) -> Self {
        Self(RandomNumberGenerator::seeded(seed))
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::new()
    }
}

impl Dice for GameRng {
    fn roll(&mut self, min: i32, max: i32) -> i32 {
        // bracket-lib ranges are half-open
        self.0.range(min, max + 1)
    }

    fn chance(&mut self) -> f64 {
        self.0.range(0.0_f64, 1.0_f64)
    }
}
