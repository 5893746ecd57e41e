//! Catch the Fruit entry point
//!
//! On the web the engine host drives `platform::web::WebGame`. Natively this
//! plays a scripted headless session and logs how it went.

#[cfg(target_arch = "wasm32")]
fn main() {
    catch_fruit::platform::web::init_logging();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use catch_fruit::consts::BASKET_Y;
    use catch_fruit::sim::{FrameInput, GamePhase, GameEvent, Session, tick};
    use catch_fruit::tuning::Tuning;

    env_logger::init();
    log::info!("Catch the Fruit (native) starting...");
    log::info!("Native mode is headless - embed the wasm build in an engine host to play");

    let tuning = match std::env::args().nth(1) {
        Some(path) => match std::fs::read_to_string(&path)
            .map_err(|e| e.to_string())
            .and_then(|json| Tuning::from_json(&json).map_err(|e| e.to_string()))
        {
            Ok(tuning) => tuning,
            Err(e) => {
                log::warn!("Could not load tuning from {}: {}", path, e);
                Tuning::default()
            }
        },
        None => Tuning::default(),
    };

    let mut session = Session::new(tuning, 12345);

    // Autopilot: catch every fruit until the game is won
    let frame = FrameInput {
        dt_ms: 1000.0 / 60.0,
        ..Default::default()
    };
    let mut frames = 0u32;
    while session.state().phase == GamePhase::Playing && frames < 100_000 {
        let out = tick(&mut session, &frame);
        for spawn in &out.spawns {
            log::debug!(
                "Spawn {} at x={:.0} falling {:.0}",
                spawn.kind.texture_key(),
                spawn.pos.x,
                spawn.fall_speed
            );
            for event in session.catch_fruit() {
                if let GameEvent::LevelUp { level, .. } = event {
                    println!("Level {} after {} frames", level, frames);
                }
            }
        }
        frames += 1;
    }
    println!(
        "Autopilot finished: {:?}, {} of {}",
        session.state().phase,
        session.state().score_text(),
        session.controller.tuning().winning_score()
    );

    // Then let one fruit drop past the basket
    let restart = FrameInput {
        restart: true,
        ..frame.clone()
    };
    tick(&mut session, &restart);
    let dropped = FrameInput {
        fruit_y: vec![BASKET_Y, session.controller.tuning().field_height + 1.0],
        ..frame
    };
    tick(&mut session, &dropped);
    if let Some(banner) = session.state().phase.banner() {
        println!("{}", banner);
    }
}
