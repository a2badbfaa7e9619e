//! Game loop
//!
//! `run` drives a `Game` with fixed-step updates:
//! - input is captured once per frame and routed to the `InputMap`
//! - widgets get one `ui` pass per rendered frame
//! - `update` runs as many fixed steps as the elapsed time allows
//! - `draw` renders, then the frame is paced to `target_fps`

mod config;
mod timestep;
pub mod logging;

pub use config::{ConfigError, EngineConfig};
pub use timestep::{FixedTimestep, FrameLimiter, FrameStats};

use macroquad::prelude::{get_time, next_frame, screen_height, screen_width};
use crate::gfx::{Graphics, HAlign, VAlign};
use crate::input::{InputMap, InputSnapshot};
use crate::rect::Rect;
use crate::ui::{theme, UiContext};

/// Callbacks the loop calls into
pub trait Game {
    /// Once, before the first frame
    fn setup(&mut self, _engine: &mut Engine) {}

    /// Once per fixed step; `dt` is always the step length.
    /// Per-frame press flags in `engine.input` are only seen by the first
    /// step of a frame (and by no step when a frame runs zero); use the
    /// counters of `engine.actions` for presses.
    fn update(&mut self, engine: &mut Engine, dt: f32);

    /// Once per rendered frame, before the fixed steps: widget updates go here
    fn ui(&mut self, _engine: &mut Engine) {}

    fn draw(&mut self, engine: &mut Engine, g: &mut Graphics);
}

/// Loop state handed to every `Game` callback
pub struct Engine {
    /// This frame's input
    pub input: InputSnapshot,
    pub actions: InputMap,
    pub ui: UiContext,
    config: EngineConfig,
    stats: FrameStats,
    running: bool,
    alpha: f32,
    width: f32,
    height: f32,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            input: InputSnapshot::default(),
            actions: InputMap::new(),
            ui: UiContext::new(),
            width: config.width as f32,
            height: config.height as f32,
            config,
            stats: FrameStats::default(),
            running: true,
            alpha: 0.0,
        }
    }

    /// Stop after the current frame
    pub fn quit(&mut self) {
        tracing::debug!("quit requested");
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn screen(&self) -> Rect {
        Rect::screen(self.width, self.height)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn stats(&self) -> &FrameStats {
        &self.stats
    }

    /// Leftover fraction of a fixed step at draw time, for interpolation
    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    /// Install this frame's input and window size
    pub fn begin_frame(&mut self, input: InputSnapshot, frame_dt: f32, width: f32, height: f32) {
        self.width = width;
        self.height = height;
        self.stats.record(frame_dt);
        self.actions.apply(&input);
        self.ui.begin_frame(input.clone(), frame_dt);
        self.input = input;
    }

    /// Run the fixed steps the timestep hands out; stops early on `quit`
    pub fn step<G: Game>(&mut self, game: &mut G, timestep: &mut FixedTimestep, frame_dt: f32) -> u32 {
        let steps = timestep.advance(frame_dt as f64);
        let dt = timestep.step() as f32;
        let mut ran = 0;
        for _ in 0..steps {
            if !self.running {
                break;
            }
            game.update(self, dt);
            ran += 1;
        }
        self.alpha = timestep.alpha();
        ran
    }
}

fn draw_fps(g: &mut Graphics, stats: &FrameStats) {
    g.push_style();
    g.fill(macroquad::prelude::YELLOW);
    g.text_size(16.0);
    g.text_align(HAlign::Left, VAlign::Top);
    g.text(&format!("{:.0} fps", stats.fps()), 6.0, 6.0);
    g.pop_style();
}

/// Run `game` until it calls `Engine::quit`
pub async fn run<G: Game>(config: EngineConfig, mut game: G) -> Result<(), ConfigError> {
    config.validate()?;
    tracing::info!(
        title = %config.title,
        update_hz = config.update_hz,
        target_fps = ?config.target_fps,
        "starting game loop"
    );

    let mut timestep = FixedTimestep::new(config.fixed_step(), config.max_steps_per_frame);
    let limiter = FrameLimiter::new(config.frame_time());
    let mut engine = Engine::new(config);
    let mut graphics = Graphics::new();

    game.setup(&mut engine);

    let mut last_frame = get_time();
    while engine.is_running() {
        let frame_start = get_time();
        let frame_dt = (frame_start - last_frame) as f32;
        last_frame = frame_start;

        let input = InputSnapshot::capture(Some(&engine.input));
        engine.begin_frame(input, frame_dt, screen_width(), screen_height());
        game.ui(&mut engine);
        engine.ui.end_frame();

        engine.step(&mut game, &mut timestep, frame_dt);

        graphics.begin_frame();
        graphics.background(engine.config.clear_color);
        game.draw(&mut engine, &mut graphics);
        engine.ui.draw_overlay(&mut graphics, &theme(), engine.screen());
        if engine.config.show_fps {
            draw_fps(&mut graphics, &engine.stats);
        }

        limiter.wait(frame_start, get_time);
        next_frame().await;
    }

    tracing::info!(
        frames = engine.stats.frame_count(),
        updates = timestep.total_steps(),
        seconds = engine.stats.elapsed(),
        "game loop stopped"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::ActionBehavior;
    use macroquad::prelude::KeyCode;

    #[derive(Default)]
    struct Counter {
        updates: u32,
        jumps: u32,
        quit_after: Option<u32>,
    }

    impl Game for Counter {
        fn update(&mut self, engine: &mut Engine, _dt: f32) {
            self.updates += 1;
            if let Some(id) = engine.actions.action_id("jump") {
                self.jumps += engine.actions.action(id).amount();
            }
            if Some(self.updates) == self.quit_after {
                engine.quit();
            }
        }

        fn draw(&mut self, _engine: &mut Engine, _g: &mut Graphics) {}
    }

    #[test]
    fn test_begin_frame_routes_input() {
        let mut engine = Engine::new(EngineConfig::default());
        let jump = engine.actions.add("jump", ActionBehavior::Normal);
        engine.actions.bind_key(KeyCode::Space, jump);

        let input = InputSnapshot::at(5.0, 6.0).with_key_pressed(KeyCode::Space);
        engine.begin_frame(input, 0.016, 640.0, 480.0);

        assert!(engine.actions.action(jump).is_pressed());
        assert_eq!(engine.ui.input.mouse_x, 5.0);
        assert_eq!(engine.screen(), Rect::new(0.0, 0.0, 640.0, 480.0));
        assert_eq!(engine.stats().frame_count(), 1);
    }

    #[test]
    fn test_press_survives_frames_without_updates() {
        let mut engine = Engine::new(EngineConfig::default());
        let jump = engine.actions.add("jump", ActionBehavior::Normal);
        engine.actions.bind_key(KeyCode::Space, jump);
        let mut game = Counter::default();
        let mut timestep = FixedTimestep::new(0.02, 5);

        // short frame: no fixed step, the press is kept for later
        engine.begin_frame(InputSnapshot::default().with_key_pressed(KeyCode::Space), 0.005, 800.0, 600.0);
        assert_eq!(engine.step(&mut game, &mut timestep, 0.005), 0);
        engine.begin_frame(InputSnapshot::default().with_key_released(KeyCode::Space), 0.016, 800.0, 600.0);
        assert_eq!(engine.step(&mut game, &mut timestep, 0.016), 1);
        assert_eq!(game.jumps, 1);
    }

    #[test]
    fn test_quit_stops_remaining_steps() {
        let mut engine = Engine::new(EngineConfig::default());
        let mut game = Counter { quit_after: Some(2), ..Default::default() };
        let mut timestep = FixedTimestep::new(0.01, 10);
        assert_eq!(engine.step(&mut game, &mut timestep, 0.055), 2);
        assert!(!engine.is_running());
    }
}
