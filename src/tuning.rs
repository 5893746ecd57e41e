//! Game balance and tuning
//!
//! Thresholds and speed steps differ between game variants, so they are
//! data rather than code. Overrides can be supplied as JSON; missing fields
//! fall back to the defaults.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors from loading or validating a tuning table
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("invalid tuning JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("max_level must be at least 1")]
    NoLevels,
    #[error("level_threshold must be positive")]
    ZeroThreshold,
    #[error("level_threshold {threshold} is not a multiple of catch_reward {reward}")]
    UnreachableThreshold { threshold: u64, reward: u64 },
    #[error("spawn_interval_ms must be positive")]
    ZeroSpawnInterval,
    #[error("field width {width} leaves no room inside a {margin}px margin")]
    FieldTooNarrow { width: f32, margin: f32 },
    #[error("{field} must be a finite number")]
    NonFinite { field: &'static str },
    #[error("{field} must not be negative (got {value})")]
    Negative { field: &'static str, value: f32 },
}

/// Difficulty curve and spawn parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Scoring ===
    /// Points per caught fruit
    pub catch_reward: u64,
    /// Every multiple of this score advances a level
    pub level_threshold: u64,
    /// Highest level; crossing the next threshold wins
    pub max_level: u32,

    // === Difficulty ===
    pub start_fall_speed: f32,
    pub start_move_speed: f32,
    pub fall_speed_step: f32,
    pub move_speed_step: f32,

    // === Spawning ===
    pub spawn_interval_ms: f32,
    pub respawn_delay_ms: f32,
    pub fall_speed_spread: f32,
    pub spawn_margin: f32,

    // === Playfield ===
    pub field_width: f32,
    pub field_height: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            catch_reward: CATCH_REWARD,
            level_threshold: LEVEL_THRESHOLD,
            max_level: MAX_LEVEL,

            start_fall_speed: START_FALL_SPEED,
            start_move_speed: START_MOVE_SPEED,
            fall_speed_step: FALL_SPEED_STEP,
            move_speed_step: MOVE_SPEED_STEP,

            spawn_interval_ms: SPAWN_INTERVAL_MS,
            respawn_delay_ms: RESPAWN_DELAY_MS,
            fall_speed_spread: FALL_SPEED_SPREAD,
            spawn_margin: SPAWN_MARGIN,

            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
        }
    }
}

impl Tuning {
    /// Short-level variant: a level every 50 points, five levels
    pub fn quick() -> Self {
        Self {
            level_threshold: 50,
            max_level: 5,
            ..Self::default()
        }
    }

    /// Score at which the game is won (saturates on huge thresholds)
    pub fn winning_score(&self) -> u64 {
        self.level_threshold.saturating_mul(u64::from(self.max_level))
    }

    /// Float fields by name, for validation
    fn float_fields(&self) -> [(&'static str, f32); 10] {
        [
            ("start_fall_speed", self.start_fall_speed),
            ("start_move_speed", self.start_move_speed),
            ("fall_speed_step", self.fall_speed_step),
            ("move_speed_step", self.move_speed_step),
            ("spawn_interval_ms", self.spawn_interval_ms),
            ("respawn_delay_ms", self.respawn_delay_ms),
            ("fall_speed_spread", self.fall_speed_spread),
            ("spawn_margin", self.spawn_margin),
            ("field_width", self.field_width),
            ("field_height", self.field_height),
        ]
    }

    /// Parse a (possibly partial) tuning table and validate it
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn validate(&self) -> Result<(), TuningError> {
        // serde_json reads out-of-range floats such as 1e39 as infinity
        for (field, value) in self.float_fields() {
            if !value.is_finite() {
                return Err(TuningError::NonFinite { field });
            }
            if value < 0.0 {
                return Err(TuningError::Negative { field, value });
            }
        }
        // Fastest spawn on the last level must stay representable
        let top_fall_speed = self.start_fall_speed
            + self.fall_speed_step * self.max_level as f32
            + self.fall_speed_spread;
        if !top_fall_speed.is_finite() {
            return Err(TuningError::NonFinite {
                field: "top fall speed",
            });
        }
        let top_move_speed = self.start_move_speed + self.move_speed_step * self.max_level as f32;
        if !top_move_speed.is_finite() {
            return Err(TuningError::NonFinite {
                field: "top move speed",
            });
        }
        if self.max_level == 0 {
            return Err(TuningError::NoLevels);
        }
        if self.level_threshold == 0 {
            return Err(TuningError::ZeroThreshold);
        }
        if self.catch_reward == 0 || self.level_threshold % self.catch_reward != 0 {
            return Err(TuningError::UnreachableThreshold {
                threshold: self.level_threshold,
                reward: self.catch_reward,
            });
        }
        if self.spawn_interval_ms <= 0.0 {
            return Err(TuningError::ZeroSpawnInterval);
        }
        if self.field_width <= self.spawn_margin * 2.0 {
            return Err(TuningError::FieldTooNarrow {
                width: self.field_width,
                margin: self.spawn_margin,
            });
        }
        Ok(())
    }

    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "catch_fruit_tuning";

    /// Load tuning overrides from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(tuning) => {
                        log::info!("Loaded tuning overrides from LocalStorage");
                        return tuning;
                    }
                    Err(e) => log::warn!("Ignoring stored tuning: {}", e),
                }
            }
        }

        log::info!("Using default tuning");
        Self::default()
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Tuning::default().validate().is_ok());
        assert!(Tuning::quick().validate().is_ok());
        assert_eq!(Tuning::default().winning_score(), 300);
        assert_eq!(Tuning::quick().winning_score(), 250);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let tuning = Tuning::from_json(r#"{ "level_threshold": 50, "max_level": 5 }"#).unwrap();
        assert_eq!(tuning, Tuning::quick());
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            Tuning::from_json(r#"{ "max_level": 0 }"#),
            Err(TuningError::NoLevels)
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "level_threshold": 0 }"#),
            Err(TuningError::ZeroThreshold)
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "level_threshold": 55 }"#),
            Err(TuningError::UnreachableThreshold { threshold: 55, reward: 10 })
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "spawn_interval_ms": 0.0 }"#),
            Err(TuningError::ZeroSpawnInterval)
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "field_width": 100.0 }"#),
            Err(TuningError::FieldTooNarrow { .. })
        ));
    }

    #[test]
    fn test_rejects_out_of_range_floats() {
        // 1e39 overflows f32 and would reach the spawner as infinity
        assert!(matches!(
            Tuning::from_json(r#"{ "field_width": 1e39 }"#),
            Err(TuningError::NonFinite { field: "field_width" })
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "fall_speed_spread": 1e39 }"#),
            Err(TuningError::NonFinite { field: "fall_speed_spread" })
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "start_fall_speed": 3e38, "fall_speed_step": 3e38 }"#),
            Err(TuningError::NonFinite { field: "top fall speed" })
        ));
    }

    #[test]
    fn test_rejects_negative_values() {
        assert!(matches!(
            Tuning::from_json(r#"{ "spawn_margin": -400.0 }"#),
            Err(TuningError::Negative { field: "spawn_margin", .. })
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "start_fall_speed": -1.0 }"#),
            Err(TuningError::Negative { field: "start_fall_speed", .. })
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "field_height": -600.0 }"#),
            Err(TuningError::Negative { field: "field_height", .. })
        ));
    }

    #[test]
    fn test_validated_tuning_spawns_inside_field() {
        use crate::sim::Spawner;

        let tuning = Tuning::from_json(r#"{ "field_width": 400.0, "spawn_margin": 0.0 }"#).unwrap();
        let mut spawner = Spawner::new(1, &tuning);
        for _ in 0..50 {
            let req = spawner.request(tuning.start_fall_speed);
            assert!(req.pos.x >= 0.0 && req.pos.x <= 400.0);
        }
    }

    #[test]
    fn test_winning_score_saturates() {
        let tuning =
            Tuning::from_json(r#"{ "level_threshold": 10000000000000000000, "max_level": 3 }"#)
                .unwrap();
        assert_eq!(tuning.winning_score(), u64::MAX);
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(
            Tuning::from_json("{ not json"),
            Err(TuningError::Json(_))
        ));
    }
}
