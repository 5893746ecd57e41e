//! Per-frame update
//!
//! The host calls `tick` once per frame. Motion, collision and rendering
//! stay with the engine; this only decides what the engine should do next.

use super::controller::GameController;
use super::spawner::{FruitSpawnRequest, Spawner};
use super::state::{GameEvent, GamePhase, GameState};
use crate::basket_velocity;
use crate::tuning::Tuning;

/// Input for a single frame
#[derive(Debug, Clone, Default)]
pub struct FrameInput {
    /// Left arrow held
    pub left: bool,
    /// Right arrow held
    pub right: bool,
    /// Space pressed this frame
    pub restart: bool,
    /// Frame time in milliseconds
    pub dt_ms: f32,
    /// y positions of the active fruit
    pub fruit_y: Vec<f32>,
}

/// What the host should apply after a frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameOutput {
    /// Basket horizontal velocity (pixels/s)
    pub basket_vx: f32,
    pub spawns: Vec<FruitSpawnRequest>,
    pub events: Vec<GameEvent>,
}

/// Controller plus spawner: the unit the host restarts
#[derive(Debug, Clone)]
pub struct Session {
    pub controller: GameController,
    pub spawner: Spawner,
}

impl Session {
    pub fn new(tuning: Tuning, seed: u64) -> Self {
        let spawner = Spawner::new(seed, &tuning);
        Self {
            controller: GameController::new(tuning),
            spawner,
        }
    }

    pub fn state(&self) -> &GameState {
        self.controller.state()
    }

    /// Collision callback: score the fruit and queue its replacement
    pub fn catch_fruit(&mut self) -> Vec<GameEvent> {
        let events = self.controller.on_fruit_caught();
        if !events.is_empty() && self.controller.phase() == GamePhase::Playing {
            self.spawner.schedule_respawn();
        }
        events
    }

    /// Out-of-bounds callback
    pub fn fruit_missed(&mut self) -> Vec<GameEvent> {
        self.controller.on_fruit_missed()
    }

    /// Restart input
    pub fn restart(&mut self) -> Vec<GameEvent> {
        self.spawner.clear();
        self.controller.reset()
    }
}

/// Advance the session by one frame
pub fn tick(session: &mut Session, input: &FrameInput) -> FrameOutput {
    let mut out = FrameOutput::default();

    if session.controller.phase().is_terminal() {
        // Everything stays frozen until restart
        if input.restart {
            out.events = session.restart();
        }
        return out;
    }

    let field_height = session.controller.tuning().field_height;
    if input.fruit_y.iter().any(|&y| y > field_height) {
        out.events.extend(session.fruit_missed());
        return out;
    }

    let state = session.controller.state();
    out.basket_vx = basket_velocity(input.left, input.right, state.move_speed);
    let fall_speed = state.fall_speed;
    out.spawns = session.spawner.advance(input.dt_ms, fall_speed);

    out
}
