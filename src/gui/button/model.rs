use crate::config::{Config, Label, Padding};
use crate::geometry::{Point, Size};
use crate::gui::button::animation::{Animation, AnimationKind};
use crate::gui::button::tilt::{Projection, TiltAngles};
use palette::Srgba;
use strum::Display;

/// Appearance of the button. Interaction never changes it; a config reload
/// replaces it through `CircleButton::restyle`.
#[derive(Debug, Clone)]
pub struct ButtonStyle {
    pub label: Label,
    pub text_size: f64,
    pub text_color: Srgba<f64>,
    pub button_color: Srgba<f64>,
    pub collapse_radius: u32,
    pub expand_radius: u32,
    pub animation_ms: u32,
    pub padding: Padding,
}

impl ButtonStyle {
    pub fn from_config(cfg: &Config) -> Self {
        Self {
            label: cfg.label.clone(),
            text_size: cfg.text_size,
            text_color: *cfg.text_color,
            button_color: *cfg.button_color,
            collapse_radius: cfg.collapse_radius,
            expand_radius: cfg.expand_radius,
            animation_ms: cfg.animation_ms,
            padding: cfg.padding,
        }
    }
}

impl Default for ButtonStyle {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// Font metrics relative to the baseline: `top` and `ascent` are negative,
/// `descent` and `bottom` positive.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FontMetrics {
    pub top: f64,
    pub ascent: f64,
    pub descent: f64,
    pub bottom: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Press(Point),
    Move(Point),
    Release,
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display)]
pub enum Phase {
    #[default]
    Idle,
    Pressed,
    Dragging,
    Released,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PointerResponse {
    pub handled: bool,
    pub should_redraw: bool,
    pub animation_started: bool,
}

impl PointerResponse {
    pub fn new(handled: bool, should_redraw: bool, animation_started: bool) -> Self {
        Self {
            handled,
            should_redraw,
            animation_started,
        }
    }

    pub fn ignored() -> Self {
        Self::default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickAction {
    pub should_redraw: bool,
    pub finished: bool,
}

impl TickAction {
    pub fn new(should_redraw: bool, finished: bool) -> Self {
        Self {
            should_redraw,
            finished,
        }
    }
}

pub struct CircleButton {
    pub style: ButtonStyle,
    pub centre: Point,
    pub content: Size,
    pub dragged: bool,
    pub tilt_angles: TiltAngles,
    pub tilt: Projection,
    progress: f64,
    phase: Phase,
    animation: Option<Animation>,
    allocation: (i32, i32),
    pending_style: Option<ButtonStyle>,
}

impl CircleButton {
    pub fn new(style: ButtonStyle) -> Self {
        Self {
            style,
            centre: Point::default(),
            content: Size::default(),
            dragged: false,
            tilt_angles: TiltAngles::default(),
            tilt: Projection::IDENTITY,
            progress: 0.0,
            phase: Phase::Idle,
            animation: None,
            allocation: (0, 0),
            pending_style: None,
        }
    }

    /// Anchors the circle at the horizontal centre of the content box, on
    /// its bottom edge.
    pub fn layout(&mut self, width: i32, height: i32) {
        self.allocation = (width, height);
        let p = &self.style.padding;
        let content_width = (width - p.left - p.right).max(0);
        let content_height = (height - p.top - p.bottom).max(0);

        self.content = Size::new(content_width as f64, content_height as f64);
        self.centre = Point::new((content_width / 2) as f64, content_height as f64);
    }

    /// Swaps in a new style between interactions. While a press, drag or
    /// collapse is in flight the style waits until the button is idle again.
    /// Returns whether it was applied right away.
    pub fn restyle(&mut self, style: ButtonStyle) -> bool {
        if self.phase == Phase::Idle {
            self.apply_style(style);
            true
        } else {
            self.pending_style = Some(style);
            false
        }
    }

    pub fn has_pending_style(&self) -> bool {
        self.pending_style.is_some()
    }

    fn apply_style(&mut self, style: ButtonStyle) {
        self.style = style;
        self.progress = 0.0;
        let (width, height) = self.allocation;
        self.layout(width, height);
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn animation(&self) -> Option<&Animation> {
        self.animation.as_ref()
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    pub fn radius(&self) -> f64 {
        let collapse = f64::from(self.style.collapse_radius);
        let expand = f64::from(self.style.expand_radius);
        collapse + (expand - collapse) * self.progress
    }

    pub fn contains(&self, point: Point) -> bool {
        point.distance(self.centre) <= self.radius()
    }

    pub fn handle_pointer(&mut self, event: PointerEvent) -> PointerResponse {
        match (event, self.phase) {
            (PointerEvent::Press(point), _) => self.press(point),
            (PointerEvent::Move(point), Phase::Pressed | Phase::Dragging) => self.drag(point),
            (PointerEvent::Release | PointerEvent::Cancel, Phase::Pressed | Phase::Dragging) => {
                self.release()
            }
            _ => PointerResponse::ignored(),
        }
    }

    fn press(&mut self, point: Point) -> PointerResponse {
        if !self.contains(point) {
            return PointerResponse::ignored();
        }
        self.start_animation(AnimationKind::Expand);
        self.set_phase(Phase::Pressed);
        PointerResponse::new(true, false, true)
    }

    fn drag(&mut self, point: Point) -> PointerResponse {
        self.dragged = true;
        self.tilt_angles = TiltAngles::from_pointer(self.centre, point, self.content);
        self.tilt = self.tilt_angles.projection(self.centre);
        self.set_phase(Phase::Dragging);
        PointerResponse::new(true, true, false)
    }

    fn release(&mut self) -> PointerResponse {
        self.dragged = false;
        self.tilt_angles = TiltAngles::default();
        self.tilt = Projection::IDENTITY;
        self.start_animation(AnimationKind::Collapse);
        self.set_phase(Phase::Released);
        PointerResponse::new(true, true, true)
    }

    /// Replaces whatever animation is running. The replaced one gets no
    /// final tick.
    fn start_animation(&mut self, kind: AnimationKind) {
        if let Some(previous) = self.animation.take() {
            log::debug!("cancelling {} animation at {:.3}", previous.kind, self.progress);
        }
        self.animation = Some(Animation::new(kind, self.progress, self.style.animation_ms));
    }

    fn set_phase(&mut self, phase: Phase) {
        if self.phase != phase {
            log::debug!("circle button: {} -> {}", self.phase, phase);
            self.phase = phase;
        }
    }

    /// Advances the running animation to the frame time `now_us`.
    pub fn tick(&mut self, now_us: i64) -> TickAction {
        let Some(animation) = self.animation.as_mut() else {
            return TickAction::new(false, true);
        };

        let (progress, finished) = animation.progress_at(now_us);
        let kind = animation.kind;
        self.progress = progress.clamp(0.0, 1.0);

        if finished {
            self.animation = None;
            if kind == AnimationKind::Collapse && self.phase == Phase::Released {
                self.set_phase(Phase::Idle);
                if let Some(style) = self.pending_style.take() {
                    self.apply_style(style);
                }
            }
        }
        TickAction::new(true, finished)
    }

    /// Label size grows with progress, so it is invisible when collapsed.
    pub fn label_font_size(&self) -> f64 {
        self.style.text_size * self.progress
    }

    /// Baseline that puts the label's vertical centre just above the
    /// circle's top edge.
    pub fn label_baseline(&self, metrics: &FontMetrics) -> f64 {
        let text_height = metrics.bottom - metrics.top;
        self.centre.y
            - self.radius()
            - text_height / 2.0
            - (metrics.descent - metrics.ascent) / 2.0
            - metrics.ascent
    }
}
