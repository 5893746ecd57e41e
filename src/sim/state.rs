//! Game state and events
//!
//! Everything the controller owns for one play session lives here.

use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    #[default]
    Playing,
    /// A fruit hit the ground; waits for restart
    GameOver,
    /// Final level cleared; waits for restart
    Won,
}

impl GamePhase {
    /// GameOver and Won only exit through a restart
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GamePhase::Playing)
    }

    /// Center-screen banner for this phase
    pub fn banner(&self) -> Option<&'static str> {
        match self {
            GamePhase::Playing => None,
            GamePhase::GameOver => Some("GAME OVER\nPress SPACE to Restart"),
            GamePhase::Won => Some("YOU WIN!\nPress SPACE to Play Again"),
        }
    }
}

/// Effects produced by a state change, for the host to act on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// Score text should update
    ScoreChanged { score: u64 },
    /// Difficulty went up
    LevelUp {
        level: u32,
        fall_speed: f32,
        move_speed: f32,
    },
    /// Stop all motion and show the restart prompt
    GameOver,
    /// Final threshold crossed
    Won,
    /// Session reinitialized
    Restarted,
}

/// Score, level and difficulty for one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub score: u64,
    /// 1-based, never above `Tuning::max_level`
    pub level: u32,
    /// Base fruit descent rate (pixels/s)
    pub fall_speed: f32,
    /// Basket lateral speed (pixels/s)
    pub move_speed: f32,
    pub phase: GamePhase,
}

impl GameState {
    /// Fresh session at the tuning's starting difficulty
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            score: 0,
            level: 1,
            fall_speed: tuning.start_fall_speed,
            move_speed: tuning.start_move_speed,
            phase: GamePhase::Playing,
        }
    }

    /// Score text for the HUD
    pub fn score_text(&self) -> String {
        format!("Score: {}", self.score)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(&Tuning::default())
    }
}
