//! Platform abstraction layer
//!
//! The browser engine host talks to the game through `web::WebGame`.
//! Events and spawn requests cross the boundary as JSON.

#[cfg(target_arch = "wasm32")]
pub mod web;

use serde::Serialize;

/// Encode a batch for the host. Falls back to an empty array on failure.
pub fn to_json<T: Serialize>(items: &[T]) -> String {
    match serde_json::to_string(items) {
        Ok(json) => json,
        Err(e) => {
            log::error!("Failed to encode {} items for host: {}", items.len(), e);
            "[]".to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{FruitKind, FruitSpawnRequest, GameEvent};
    use glam::Vec2;

    #[test]
    fn test_events_json() {
        let events = vec![
            GameEvent::ScoreChanged { score: 100 },
            GameEvent::LevelUp {
                level: 2,
                fall_speed: 230.0,
                move_speed: 330.0,
            },
        ];
        let json = to_json(&events);
        let parsed: Vec<GameEvent> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, events);
        assert!(json.contains(r#""type":"LevelUp""#));
    }

    #[test]
    fn test_spawn_json() {
        let spawns = vec![FruitSpawnRequest {
            kind: FruitKind::Grapes,
            pos: Vec2::new(120.0, 0.0),
            fall_speed: 250.0,
        }];
        let json = to_json(&spawns);
        assert!(json.contains(r#""kind":"grapes""#));
        assert_eq!(to_json::<GameEvent>(&[]), "[]");
    }
}
