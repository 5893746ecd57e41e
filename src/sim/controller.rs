//! Game state controller
//!
//! Owns the session's `GameState` and applies the two gameplay events
//! (fruit caught, fruit missed) plus restart. Phase transitions:
//!
//! - Playing -> GameOver on a miss
//! - Playing -> Won when the last level threshold is crossed
//! - GameOver | Won -> Playing on reset
//!
//! Every handler returns the events it produced so the host can update
//! text, stop motion, and so on.

use super::state::{GameEvent, GamePhase, GameState};
use crate::tuning::Tuning;

#[derive(Debug, Clone)]
pub struct GameController {
    tuning: Tuning,
    state: GameState,
}

impl Default for GameController {
    fn default() -> Self {
        Self::new(Tuning::default())
    }
}

impl GameController {
    pub fn new(tuning: Tuning) -> Self {
        let state = GameState::new(&tuning);
        Self { tuning, state }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    /// Basket touched a fruit
    pub fn on_fruit_caught(&mut self) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if self.state.phase != GamePhase::Playing {
            return events;
        }

        let before = self.state.score / self.tuning.level_threshold;
        self.state.score += self.tuning.catch_reward;
        let after = self.state.score / self.tuning.level_threshold;
        events.push(GameEvent::ScoreChanged {
            score: self.state.score,
        });

        for _ in before..after {
            events.extend(self.advance_level());
            if self.state.phase != GamePhase::Playing {
                break;
            }
        }

        // Reaching the final threshold always ends the run
        if self.state.phase == GamePhase::Playing
            && self.state.score >= self.tuning.winning_score()
        {
            self.state.phase = GamePhase::Won;
            log::info!("Won with score {}", self.state.score);
            events.push(GameEvent::Won);
        }

        events
    }

    /// A fruit fell past the bottom edge. Idempotent once the game is over.
    pub fn on_fruit_missed(&mut self) -> Vec<GameEvent> {
        if self.state.phase != GamePhase::Playing {
            return Vec::new();
        }

        self.state.phase = GamePhase::GameOver;
        log::info!(
            "Game over at level {} with score {}",
            self.state.level,
            self.state.score
        );
        vec![GameEvent::GameOver]
    }

    /// Step up the difficulty, or win if already on the last level
    pub fn advance_level(&mut self) -> Vec<GameEvent> {
        if self.state.phase != GamePhase::Playing {
            return Vec::new();
        }

        if self.state.level >= self.tuning.max_level {
            self.state.phase = GamePhase::Won;
            log::info!("Won with score {}", self.state.score);
            return vec![GameEvent::Won];
        }

        self.state.level += 1;
        self.state.fall_speed += self.tuning.fall_speed_step;
        self.state.move_speed += self.tuning.move_speed_step;
        log::info!(
            "Level {} (fall {:.0}, move {:.0})",
            self.state.level,
            self.state.fall_speed,
            self.state.move_speed
        );

        vec![GameEvent::LevelUp {
            level: self.state.level,
            fall_speed: self.state.fall_speed,
            move_speed: self.state.move_speed,
        }]
    }

    /// Start over from the tuning's initial values, whatever the phase
    pub fn reset(&mut self) -> Vec<GameEvent> {
        self.state = GameState::new(&self.tuning);
        log::info!("Session restarted");
        vec![
            GameEvent::Restarted,
            GameEvent::ScoreChanged { score: 0 },
        ]
    }
}
