//! Fute Street entry point
//!
//! The browser build starts from `wasm_start` in the library and is driven by
//! the JS renderer. Natively this runs a headless match with a simple
//! autopilot and prints the result.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use fute_street::scene::HeadlessScene;
    use fute_street::sim::{KickKind, MatchHooks, MatchOutcome, MatchPhase, Score, Team};
    use fute_street::{Game, Settings, planar};
    use glam::Vec3;

    /// Prints what a HUD would show
    #[derive(Default)]
    struct Commentary {
        kicks: u32,
    }

    impl MatchHooks for Commentary {
        fn goal_scored(&mut self, team: Team, score: Score) {
            println!("GOAL for {}! {}", team.as_str(), score);
        }

        fn match_ended(&mut self, score: Score, outcome: MatchOutcome) {
            println!("{}", outcome.summary(score));
        }

        fn kick(&mut self, kind: KickKind, _position: Vec3) {
            if kind != KickKind::Pass {
                self.kicks += 1;
            }
        }
    }

    pub fn run(seed: u64) {
        let mut game = Game::new(seed, Settings::load());
        let mut scene = HeadlessScene::new();
        let mut commentary = Commentary::default();
        game.start();

        let frame_ms = 1000.0 / 60.0;
        let mut now = 0.0;
        while game.state().phase() != MatchPhase::Ended {
            // Autopilot: run at the ball, shoot when on it
            let state = game.state();
            let to_ball = planar(state.ball.position - state.avatar.position);
            let direction = to_ball.normalize_or_zero();
            let close = to_ball.length() < 1.2;
            game.set_direction(direction.x, direction.z);
            if close {
                game.press_shoot();
            }

            game.frame(now, &mut scene, &mut commentary);
            now += frame_ms;
        }

        let hud = game.hud();
        log::info!(
            "Played {} ticks, {} shots, {} scene writes",
            game.state().time_ticks,
            commentary.kicks,
            scene.writes
        );
        println!("Final HUD: {}", hud.text);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Fute Street (native) starting...");
    log::info!("Rendering requires the browser build; running a headless match");

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(7);
    headless::run(seed);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_start in the library, this is just to satisfy the compiler
}
