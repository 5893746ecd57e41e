//! Deterministic game logic
//!
//! All gameplay decisions live here. This module must stay pure:
//! - Seeded RNG only
//! - No rendering, physics or platform dependencies
//! - The host engine decides when handlers run

pub mod controller;
pub mod spawner;
pub mod state;
pub mod tick;

pub use controller::GameController;
pub use spawner::{FruitKind, FruitSpawnRequest, Spawner};
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::{FrameInput, FrameOutput, Session, tick};
