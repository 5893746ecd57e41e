//! Catch the Fruit - a falling-fruit arcade game
//!
//! Core modules:
//! - `sim`: Game state controller, fruit spawner and per-frame driver
//! - `platform`: Browser bindings for the engine host
//! - `tuning`: Data-driven game balance

pub mod platform;
pub mod sim;
pub mod tuning;

pub use sim::{FrameInput, FrameOutput, GameController, GameEvent, GamePhase, GameState, Session};
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Playfield dimensions (pixels)
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Basket rests near the bottom edge
    pub const BASKET_Y: f32 = 550.0;

    /// Points per caught fruit
    pub const CATCH_REWARD: u64 = 10;
    /// Score per level
    pub const LEVEL_THRESHOLD: u64 = 100;
    pub const MAX_LEVEL: u32 = 3;

    /// Starting difficulty (pixels/s)
    pub const START_FALL_SPEED: f32 = 200.0;
    pub const START_MOVE_SPEED: f32 = 300.0;
    /// Difficulty increase per level
    pub const FALL_SPEED_STEP: f32 = 30.0;
    pub const MOVE_SPEED_STEP: f32 = 30.0;

    /// New fruit every 0.8s
    pub const SPAWN_INTERVAL_MS: f32 = 800.0;
    /// Delay before a caught fruit comes back
    pub const RESPAWN_DELAY_MS: f32 = 300.0;
    /// Fall speed is randomized in [fall_speed, fall_speed + spread]
    pub const FALL_SPEED_SPREAD: f32 = 100.0;
    /// Keep spawns away from the side walls
    pub const SPAWN_MARGIN: f32 = 50.0;

    /// Cap on spawns emitted by a single timer advance (tab-switch stalls)
    pub const MAX_SPAWNS_PER_ADVANCE: u32 = 4;
}

/// Horizontal basket velocity for the held direction keys.
/// Left wins when both are held.
#[inline]
pub fn basket_velocity(left: bool, right: bool, move_speed: f32) -> f32 {
    if left {
        -move_speed
    } else if right {
        move_speed
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basket_velocity() {
        assert_eq!(basket_velocity(true, false, 300.0), -300.0);
        assert_eq!(basket_velocity(false, true, 300.0), 300.0);
        assert_eq!(basket_velocity(false, false, 300.0), 0.0);
        assert_eq!(basket_velocity(true, true, 300.0), -300.0);
    }
}
