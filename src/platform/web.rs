//! wasm-bindgen surface for a JavaScript engine host
//!
//! The host wires its overlap callback to `catchFruit`, its out-of-bounds
//! check to `fruitMissed` (or passes fruit positions to `tick`), and the
//! space key to `restart`. Every call returns a JSON array of events.

use std::sync::Once;

use wasm_bindgen::prelude::*;

use super::to_json;
use crate::sim::{FrameInput, Session, tick};
use crate::tuning::Tuning;

static INIT: Once = Once::new();

/// Install the console logger and panic hook (safe to call repeatedly)
#[wasm_bindgen(js_name = initLogging)]
pub fn init_logging() {
    INIT.call_once(|| {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }
    });
}

/// One game session owned by the host scene
#[wasm_bindgen]
pub struct WebGame {
    session: Session,
    /// Last frame's basket velocity
    basket_vx: f32,
    /// Last frame's spawns, fetched separately by the host
    pending_spawns: String,
}

#[wasm_bindgen]
impl WebGame {
    /// New session with tuning from LocalStorage, seeded from the clock
    #[wasm_bindgen(constructor)]
    pub fn new() -> WebGame {
        init_logging();
        let seed = js_sys::Date::now() as u64;
        log::info!("Catch the Fruit starting with seed: {}", seed);
        WebGame::with_session(Session::new(Tuning::load(), seed))
    }

    /// New session from an explicit JSON tuning table
    #[wasm_bindgen(js_name = withTuning)]
    pub fn with_tuning(json: &str, seed: u32) -> Result<WebGame, JsError> {
        init_logging();
        let tuning = Tuning::from_json(json)?;
        Ok(WebGame::with_session(Session::new(tuning, u64::from(seed))))
    }

    fn with_session(session: Session) -> WebGame {
        WebGame {
            session,
            basket_vx: 0.0,
            pending_spawns: "[]".to_string(),
        }
    }

    #[wasm_bindgen(js_name = catchFruit)]
    pub fn catch_fruit(&mut self) -> String {
        to_json(&self.session.catch_fruit())
    }

    #[wasm_bindgen(js_name = fruitMissed)]
    pub fn fruit_missed(&mut self) -> String {
        to_json(&self.session.fruit_missed())
    }

    pub fn restart(&mut self) -> String {
        to_json(&self.session.restart())
    }

    /// Per-frame update. Returns events; spawns are kept for `takeSpawns`.
    pub fn tick(
        &mut self,
        left: bool,
        right: bool,
        restart: bool,
        dt_ms: f32,
        fruit_y: Vec<f32>,
    ) -> String {
        let input = FrameInput {
            left,
            right,
            restart,
            dt_ms,
            fruit_y,
        };
        let out = tick(&mut self.session, &input);
        self.basket_vx = out.basket_vx;
        self.pending_spawns = to_json(&out.spawns);
        to_json(&out.events)
    }

    /// Spawn requests from the last `tick`
    #[wasm_bindgen(js_name = takeSpawns)]
    pub fn take_spawns(&mut self) -> String {
        std::mem::replace(&mut self.pending_spawns, "[]".to_string())
    }

    #[wasm_bindgen(getter, js_name = basketVelocity)]
    pub fn basket_velocity(&self) -> f32 {
        self.basket_vx
    }

    #[wasm_bindgen(getter)]
    pub fn score(&self) -> f64 {
        self.session.state().score as f64
    }

    #[wasm_bindgen(getter)]
    pub fn level(&self) -> u32 {
        self.session.state().level
    }

    #[wasm_bindgen(getter, js_name = winningScore)]
    pub fn winning_score(&self) -> f64 {
        self.session.controller.tuning().winning_score() as f64
    }

    #[wasm_bindgen(getter, js_name = scoreText)]
    pub fn score_text(&self) -> String {
        self.session.state().score_text()
    }

    /// Center banner for the current phase, empty while playing
    #[wasm_bindgen(getter)]
    pub fn banner(&self) -> String {
        self.session
            .state()
            .phase
            .banner()
            .unwrap_or_default()
            .to_string()
    }
}

impl Default for WebGame {
    fn default() -> Self {
        Self::new()
    }
}
