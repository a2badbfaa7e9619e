//! quadkit demo: tweens, input actions and the widget set in one scene
//!
//! Click the stage to send the ball there, steer it with the arrow keys,
//! press Escape to quit.

use std::path::PathBuf;

use macroquad::prelude::{vec2, Color, Conf, Vec2};
use quadkit::prelude::*;
use quadkit::ui::{
    install_theme, theme, Button, CheckBox, ColorPicker, ComboBox, Dialog, DialogResult, Label, ListBox,
    Panel, ProgressBar, RadioGroup, Slider, Spinner, TextField, ToggleButton, Tooltip, UiError, WidgetId,
    Window,
};

const CONFIG_FILE: &str = "quadkit.ron";
const STAGE_LEFT: f32 = 290.0;
const MAX_LOG_LINES: usize = 40;

/// `quadkit.ron` in the working directory, else the per-user config
fn config_path() -> PathBuf {
    let local = PathBuf::from(CONFIG_FILE);
    if local.exists() {
        return local;
    }
    EngineConfig::user_config_path("quadkit").unwrap_or(local)
}

fn window_conf() -> Conf {
    EngineConfig::load_or_default(config_path()).window_conf()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BallShape {
    Circle,
    Square,
    Triangle,
}

impl BallShape {
    const NAMES: [&'static str; 3] = ["Circle", "Square", "Triangle"];

    fn from_index(index: Option<usize>) -> Self {
        match index {
            Some(1) => BallShape::Square,
            Some(2) => BallShape::Triangle,
            _ => BallShape::Circle,
        }
    }
}

/// Ids of the widgets read back every frame
struct Ids {
    easing: WidgetId,
    duration: WidgetId,
    yoyo: WidgetId,
    speed: WidgetId,
    progress: WidgetId,
    caption: WidgetId,
    light: WidgetId,
    about: WidgetId,
    color: WidgetId,
    shape: WidgetId,
    log: WidgetId,
}

struct Showcase {
    controls: Window,
    ball_window: Window,
    log_panel: Panel,
    stage_tip: Tooltip,
    about: Dialog,
    quit: Dialog,
    ids: Ids,

    slide: Tween<f32>,
    ball: MoveTo,
    ball_speed: f32,
    ball_color: Color,
    ball_shape: BallShape,
    caption: String,
    ripples: Animator<u32, f32>,
    ripple_points: Vec<(u32, Vec2, f32)>,
    next_ripple: u32,
    random: Random,
}

impl Showcase {
    fn new() -> Result<Self, UiError> {
        let easing_names = Easing::ALL.iter().map(|e| e.name().to_string()).collect();
        let default_easing = Easing::ALL.iter().position(|e| *e == Easing::CubicInOut);

        let mut controls = Window::new(Rect::new(16.0, 16.0, 260.0, 250.0), "Tween")?;
        controls.set_closable(false);
        controls.add(Label::new(Rect::new(8.0, 8.0, 80.0, 22.0), "Easing")?);
        controls.add(Label::new(Rect::new(8.0, 38.0, 80.0, 22.0), "Duration")?);
        let duration = controls.add(Spinner::new(Rect::new(90.0, 38.0, 100.0, 22.0), 0.2, 5.0, 1.5, 0.1)?.with_decimals(1));
        let yoyo = controls.add(CheckBox::new(Rect::new(8.0, 68.0, 120.0, 20.0), "Yoyo", true)?);
        controls.add(Label::new(Rect::new(8.0, 94.0, 80.0, 22.0), "Ball speed")?);
        let speed = controls.add(Slider::new(Rect::new(90.0, 97.0, 160.0, 16.0), 50.0, 600.0, 240.0)?.with_step(10.0));
        let progress = controls.add(ProgressBar::new(Rect::new(8.0, 124.0, 242.0, 18.0), 0.0, 1.0)?.with_text(true));
        let caption = controls.add(
            TextField::new(Rect::new(8.0, 150.0, 242.0, 24.0), "quadkit")?
                .with_placeholder("Caption")
                .with_max_chars(32),
        );
        let light = controls.add(ToggleButton::new(Rect::new(8.0, 184.0, 120.0, 26.0), "Light theme", false)?);
        let about_button = controls.add(Button::new(Rect::new(134.0, 184.0, 116.0, 26.0), "About")?);
        // last, so its dropdown draws over the rows below it
        let easing = controls.add(ComboBox::new(Rect::new(90.0, 8.0, 160.0, 22.0), easing_names, default_easing)?);

        let mut ball_window = Window::new(Rect::new(16.0, 280.0, 260.0, 250.0), "Ball")?;
        ball_window.set_closable(false);
        let color = ball_window.add(ColorPicker::new(Rect::new(8.0, 8.0, 160.0, 130.0), rgb(240, 180, 60))?);
        let shapes = BallShape::NAMES.iter().map(|s| s.to_string()).collect();
        let shape = ball_window.add(RadioGroup::new(Rect::new(8.0, 146.0, 160.0, 66.0), shapes, Some(0))?);

        let mut log_panel = Panel::new(Rect::new(STAGE_LEFT, 420.0, 220.0, 150.0))?;
        log_panel.add(Label::new(Rect::new(8.0, 6.0, 200.0, 18.0), "Tween events")?);
        let log = log_panel.add(ListBox::new(Rect::new(8.0, 28.0, 204.0, 114.0), Vec::new())?);

        let stage_tip = Tooltip::new(Rect::new(STAGE_LEFT, 16.0, 480.0, 390.0), "Click to move the ball")?;

        let mut about = Dialog::message(
            Rect::new(220.0, 160.0, 320.0, 150.0),
            "About",
            &format!("quadkit {}: a fixed-step loop, a sketch-style drawing API, tweens and widgets.", quadkit::VERSION),
        )?;
        about.set_visible(false);
        let mut quit = Dialog::confirm(Rect::new(220.0, 160.0, 320.0, 130.0), "Quit", "Leave the demo?")?;
        quit.set_visible(false);

        Ok(Self {
            controls,
            ball_window,
            log_panel,
            stage_tip,
            about,
            quit,
            ids: Ids { easing, duration, yoyo, speed, progress, caption, light, about: about_button, color, shape, log },
            slide: Self::slide_tween(Easing::CubicInOut, 1.5, true),
            ball: MoveTo::new(vec2(500.0, 200.0), vec2(500.0, 200.0), 240.0),
            ball_speed: 240.0,
            ball_color: rgb(240, 180, 60),
            ball_shape: BallShape::Circle,
            caption: "quadkit".to_string(),
            ripples: Animator::new(),
            ripple_points: Vec::new(),
            next_ripple: 0,
            random: Random::new(),
        })
    }

    fn slide_tween(easing: Easing, duration: f32, yoyo: bool) -> Tween<f32> {
        let mut tween = Tween::new(0.0, 1.0, duration).easing(easing).repeat(Repeat::Forever).yoyo(yoyo);
        tween.start();
        tween
    }

    fn stage(&self, engine: &Engine) -> Rect {
        Rect::new(STAGE_LEFT, 16.0, (engine.width() - STAGE_LEFT - 16.0).max(1.0), 390.0)
    }

    fn log(&mut self, line: String) {
        if let Some(Component::ListBox(list)) = self.log_panel.child_mut(self.ids.log) {
            list.push(line);
            if list.items().len() > MAX_LOG_LINES {
                let rest = list.items()[1..].to_vec();
                list.set_items(rest);
            }
            let last = list.items().len().saturating_sub(1);
            list.scroll_to(last);
        }
    }

    fn send_ball(&mut self, target: Vec2) {
        self.ball = MoveTo::new(self.ball.position(), target, self.ball_speed).auto_start();
        let key = self.next_ripple;
        self.next_ripple = self.next_ripple.wrapping_add(1);
        self.ripples.add(key, Tween::new(4.0, 60.0, 0.6).easing(Easing::QuadOut));
        self.ripple_points.push((key, target, 4.0));
    }

    /// Read back the tween controls and rebuild the slide when they change
    fn apply_controls(&mut self) {
        let mut rebuild = false;
        let mut easing = self.slide.current_easing();
        let mut duration = 1.5;
        let mut yoyo = true;

        if let Some(Component::ComboBox(c)) = self.controls.child(self.ids.easing) {
            rebuild |= c.changed();
            if let Some(e) = c.selected().and_then(|i| Easing::ALL.get(i)) {
                easing = *e;
            }
        }
        if let Some(Component::Spinner(s)) = self.controls.child(self.ids.duration) {
            rebuild |= s.changed();
            duration = s.value();
        }
        if let Some(Component::CheckBox(c)) = self.controls.child(self.ids.yoyo) {
            rebuild |= c.changed();
            yoyo = c.is_checked();
        }
        if rebuild {
            self.slide = Self::slide_tween(easing, duration, yoyo);
            self.log(format!("{} over {:.1}s", easing.name(), duration));
        }

        if let Some(Component::Slider(s)) = self.controls.child(self.ids.speed) {
            if s.changed() {
                self.ball_speed = s.value();
                self.ball.set_speed(self.ball_speed);
            }
        }
        if let Some(Component::TextField(f)) = self.controls.child(self.ids.caption) {
            if f.changed() {
                self.caption = f.text().to_string();
            }
        }
        if let Some(Component::ToggleButton(t)) = self.controls.child(self.ids.light) {
            if t.changed() {
                install_theme(if t.is_on() { Theme::light() } else { Theme::dark() });
            }
        }
        let about_clicked = matches!(self.controls.child(self.ids.about), Some(Component::Button(b)) if b.clicked());
        if about_clicked {
            self.about.show();
        }

        if let Some(Component::ColorPicker(p)) = self.ball_window.child(self.ids.color) {
            self.ball_color = p.color();
        }
        if let Some(Component::RadioGroup(r)) = self.ball_window.child(self.ids.shape) {
            self.ball_shape = BallShape::from_index(r.selected());
        }
    }

    fn draw_ball(&self, g: &mut Graphics, at: Vec2) {
        g.fill(self.ball_color);
        g.stroke(gray(20));
        g.stroke_weight(2.0);
        match self.ball_shape {
            BallShape::Circle => g.circle(at.x, at.y, 28.0),
            BallShape::Square => {
                g.rect_mode(ShapeMode::Center);
                g.square(at.x, at.y, 26.0);
            }
            BallShape::Triangle => g.triangle(at.x, at.y - 16.0, at.x + 15.0, at.y + 12.0, at.x - 15.0, at.y + 12.0),
        }
    }
}

impl Game for Showcase {
    fn setup(&mut self, engine: &mut Engine) {
        engine.actions = InputMap::from_bindings(&[
            ("left", "left"),
            ("left", "a"),
            ("right", "right"),
            ("right", "d"),
            ("up", "up"),
            ("up", "w"),
            ("down", "down"),
            ("down", "s"),
            ("quit", "escape"),
            ("scatter", "space"),
        ]);
        if let Some(quit) = engine.actions.action_id("quit") {
            *engine.actions.action(quit) = InputAction::with_behavior("quit", ActionBehavior::InitialPressOnly);
        }
        tracing::info!(easings = Easing::ALL.len(), "demo ready");
    }

    fn ui(&mut self, engine: &mut Engine) {
        let ctx = &mut engine.ui;
        let wants_quit = engine.actions.action_named("quit").is_some_and(|a| a.amount() > 0);

        self.controls.update(ctx);
        self.ball_window.update(ctx);
        self.log_panel.update(ctx);
        self.stage_tip.update(ctx);
        self.about.update(ctx);

        let quit_was_open = self.quit.is_visible();
        self.quit.update(ctx);
        if self.quit.answered() {
            if self.quit.result() == Some(DialogResult::Ok) {
                engine.quit();
            }
        } else if !quit_was_open && wants_quit {
            self.quit.show();
        }

        self.apply_controls();

        let stage = self.stage(engine);
        let input = &engine.ui.input;
        if input.left_pressed && engine.ui.hot.is_none() && engine.ui.pointer_in(&stage) {
            let target = vec2(input.mouse_x, input.mouse_y);
            self.send_ball(target);
        }
    }

    fn update(&mut self, engine: &mut Engine, dt: f32) {
        let mut nudge = Vec2::ZERO;
        for (name, dir) in [("left", vec2(-1.0, 0.0)), ("right", vec2(1.0, 0.0)), ("up", vec2(0.0, -1.0)), ("down", vec2(0.0, 1.0))] {
            if engine.actions.action_named(name).is_some_and(|a| a.is_pressed()) {
                nudge += dir;
            }
        }
        if nudge != Vec2::ZERO {
            let target = self.ball.position() + nudge.normalize() * self.ball_speed * dt;
            self.ball = MoveTo::new(self.ball.position(), target, self.ball_speed).auto_start();
        }

        if engine.actions.action_named("scatter").is_some_and(|a| a.amount() > 0) {
            let stage = self.stage(engine);
            let target = vec2(
                self.random.range(stage.x + 20.0, stage.right() - 20.0),
                self.random.range(stage.y + 20.0, stage.bottom() - 20.0),
            );
            self.send_ball(target);
        }

        if let Some(event) = self.ball.update(dt) {
            tracing::debug!(?event, "ball");
        }
        if let Some(event) = self.slide.update(dt) {
            let line = format!("{:?} at {:.2}", event, engine.stats().elapsed());
            self.log(line);
        }
        if let Some(Component::ProgressBar(p)) = self.controls.child_mut(self.ids.progress) {
            p.set_value(self.slide.percentage());
        }

        let points = &mut self.ripple_points;
        let done = self.ripples.update(dt, |key, radius| {
            if let Some(p) = points.iter_mut().find(|p| p.0 == *key) {
                p.2 = radius;
            }
        });
        self.ripple_points.retain(|p| !done.contains(&p.0));
    }

    fn draw(&mut self, engine: &mut Engine, g: &mut Graphics) {
        let theme = theme();
        let stage = self.stage(engine);

        g.push();
        g.fill(theme.panel);
        g.stroke(theme.border);
        g.rounded_rect(stage.x, stage.y, stage.w, stage.h, theme.corner_radius);

        // slide track
        let track_y = stage.bottom() - 40.0;
        let x = map_range(self.slide.value(), 0.0, 1.0, stage.x + 30.0, stage.right() - 30.0);
        g.stroke(theme.track);
        g.stroke_weight(3.0);
        g.line(stage.x + 30.0, track_y, stage.right() - 30.0, track_y);
        g.no_stroke();
        g.fill(theme.accent);
        g.rect_mode(ShapeMode::Center);
        g.rect(x, track_y, 24.0, 24.0);

        g.no_fill();
        for (_, at, radius) in &self.ripple_points {
            let fade = constrain(1.0 - radius / 60.0, 0.0, 1.0);
            g.stroke(Color::new(theme.accent.r, theme.accent.g, theme.accent.b, fade));
            g.stroke_weight(2.0);
            g.circle(at.x, at.y, radius * 2.0);
        }

        g.push_matrix();
        g.translate(self.ball.position().x, self.ball.position().y);
        g.rotate(self.slide.eased() * std::f32::consts::TAU);
        g.rect_mode(ShapeMode::Corner);
        self.draw_ball(g, Vec2::ZERO);
        g.pop_matrix();

        g.fill(theme.text);
        g.text_size(theme.font_size_header);
        g.text_align(HAlign::Center, VAlign::Top);
        g.text(&self.caption, stage.center_x(), stage.y + 10.0);
        g.pop();

        self.controls.draw(g, &theme);
        self.ball_window.draw(g, &theme);
        self.log_panel.draw(g, &theme);
        self.stage_tip.draw(g, &theme);
        self.about.draw(g, &theme);
        self.quit.draw(g, &theme);
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    #[cfg(not(target_arch = "wasm32"))]
    crashlog::setup!(crashlog::cargo_metadata!().capitalized(), false);

    let config = EngineConfig::load_or_default(config_path());
    quadkit::engine::logging::init(&config.log_filter);

    let showcase = match Showcase::new() {
        Ok(showcase) => showcase,
        Err(e) => {
            tracing::error!(error = %e, "failed to build the demo UI");
            return;
        }
    };
    if let Err(e) = run(config, showcase).await {
        tracing::error!(error = %e, "engine stopped");
    }
}
