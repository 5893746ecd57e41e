//! Timer-driven fruit spawner
//!
//! Produces spawn requests for the host's object pool. Seeded, so a given
//! seed always yields the same fruit stream.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::MAX_SPAWNS_PER_ADVANCE;
use crate::tuning::Tuning;

/// Fruit sprites. Serialized as the host's texture key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FruitKind {
    Apple,
    Banana,
    Grapes,
    Orange,
}

impl FruitKind {
    pub const ALL: [FruitKind; 4] = [
        FruitKind::Apple,
        FruitKind::Banana,
        FruitKind::Grapes,
        FruitKind::Orange,
    ];

    /// Texture key the host loaded the sprite under
    pub fn texture_key(&self) -> &'static str {
        match self {
            FruitKind::Apple => "apple",
            FruitKind::Banana => "banana",
            FruitKind::Grapes => "grapes",
            FruitKind::Orange => "orange",
        }
    }
}

/// One fruit for the host to create at the top of the field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FruitSpawnRequest {
    pub kind: FruitKind,
    /// Spawn position (y = 0 is the top edge)
    pub pos: Vec2,
    /// Downward speed (pixels/s)
    pub fall_speed: f32,
}

#[derive(Debug, Clone)]
pub struct Spawner {
    rng: Pcg32,
    interval_ms: f32,
    respawn_delay_ms: f32,
    spread: f32,
    x_min: f32,
    x_max: f32,
    /// Time since the last interval spawn
    elapsed_ms: f32,
    /// Remaining delay for each pending respawn
    respawns: Vec<f32>,
}

impl Spawner {
    pub fn new(seed: u64, tuning: &Tuning) -> Self {
        let x_min = tuning.spawn_margin;
        let x_max = (tuning.field_width - tuning.spawn_margin).max(x_min);
        Self {
            rng: Pcg32::seed_from_u64(seed),
            interval_ms: tuning.spawn_interval_ms.max(1.0),
            respawn_delay_ms: tuning.respawn_delay_ms.max(0.0),
            spread: tuning.fall_speed_spread.max(0.0),
            x_min,
            x_max,
            elapsed_ms: 0.0,
            respawns: Vec::new(),
        }
    }

    /// A single request at the given base fall speed
    pub fn request(&mut self, fall_speed: f32) -> FruitSpawnRequest {
        let kind = FruitKind::ALL[self.rng.random_range(0..FruitKind::ALL.len())];
        let x = self.rng.random_range(self.x_min..=self.x_max);
        let fall_speed = self.rng.random_range(fall_speed..=fall_speed + self.spread);
        FruitSpawnRequest {
            kind,
            pos: Vec2::new(x, 0.0),
            fall_speed,
        }
    }

    /// Queue a replacement fruit after the respawn delay
    pub fn schedule_respawn(&mut self) {
        self.respawns.push(self.respawn_delay_ms);
    }

    pub fn pending_respawns(&self) -> usize {
        self.respawns.len()
    }

    /// Advance the timers by `dt_ms`, returning whatever came due
    pub fn advance(&mut self, dt_ms: f32, fall_speed: f32) -> Vec<FruitSpawnRequest> {
        let dt_ms = dt_ms.max(0.0);
        let mut out = Vec::new();

        // Delayed respawns first, in the order they were scheduled
        let mut due = 0;
        self.respawns.retain_mut(|remaining| {
            *remaining -= dt_ms;
            if *remaining <= 0.0 {
                due += 1;
                false
            } else {
                true
            }
        });
        for _ in 0..due {
            out.push(self.request(fall_speed));
        }

        self.elapsed_ms += dt_ms;
        let mut spawned = 0;
        while self.elapsed_ms >= self.interval_ms && spawned < MAX_SPAWNS_PER_ADVANCE {
            self.elapsed_ms -= self.interval_ms;
            out.push(self.request(fall_speed));
            spawned += 1;
        }
        if spawned == MAX_SPAWNS_PER_ADVANCE {
            // Drop the backlog after a long stall
            self.elapsed_ms %= self.interval_ms;
        }

        out
    }

    /// Forget pending timers (scene restart)
    pub fn clear(&mut self) {
        self.elapsed_ms = 0.0;
        self.respawns.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_serializes_as_texture_key() {
        for kind in FruitKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.texture_key()));
        }
    }

    #[test]
    fn test_interval_spawning() {
        let mut spawner = Spawner::new(7, &Tuning::default());
        assert!(spawner.advance(799.0, 200.0).is_empty());
        assert_eq!(spawner.advance(1.0, 200.0).len(), 1);
        assert_eq!(spawner.advance(1600.0, 200.0).len(), 2);
    }

    #[test]
    fn test_stall_is_capped() {
        let mut spawner = Spawner::new(7, &Tuning::default());
        let spawns = spawner.advance(60_000.0, 200.0);
        assert_eq!(spawns.len(), MAX_SPAWNS_PER_ADVANCE as usize);
        // Backlog dropped
        assert!(spawner.advance(1.0, 200.0).is_empty());
    }

    #[test]
    fn test_request_bounds() {
        let tuning = Tuning::default();
        let mut spawner = Spawner::new(42, &tuning);
        for _ in 0..500 {
            let req = spawner.request(230.0);
            assert!(req.pos.x >= 50.0 && req.pos.x <= 750.0);
            assert_eq!(req.pos.y, 0.0);
            assert!(req.fall_speed >= 230.0 && req.fall_speed <= 330.0);
        }
    }

    #[test]
    fn test_determinism() {
        let tuning = Tuning::default();
        let mut a = Spawner::new(99999, &tuning);
        let mut b = Spawner::new(99999, &tuning);
        for _ in 0..20 {
            assert_eq!(a.advance(400.0, 200.0), b.advance(400.0, 200.0));
        }
    }

    #[test]
    fn test_respawn_delay() {
        let mut spawner = Spawner::new(1, &Tuning::default());
        spawner.schedule_respawn();
        assert_eq!(spawner.pending_respawns(), 1);
        assert!(spawner.advance(299.0, 200.0).is_empty());
        assert_eq!(spawner.advance(1.0, 200.0).len(), 1);
        assert_eq!(spawner.pending_respawns(), 0);

        spawner.schedule_respawn();
        spawner.clear();
        assert_eq!(spawner.pending_respawns(), 0);
    }
}
