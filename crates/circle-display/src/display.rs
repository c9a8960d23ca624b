use crate::advisory::Advisory;
use crate::animation::{AnimationController, AnimationRun, Easing, TickOutcome};
use crate::config::GaugeConfig;
use crate::geometry::{self, GeometryFrame, Point, Size};
use crate::interaction::{InteractionController, PointerEvent, SelectionListener};
use crate::model::GaugeState;
use crate::options::{DisplayOptions, PaintRole, Style, Unit, ValueFormat};
use crate::render::{GaugeRenderer, Surface};
use palette::Srgba;
use std::time::Duration;

/// Services the embedding toolkit provides to the gauge.
pub trait Host {
    /// Asks for a repaint; the host answers with a later [`CircleDisplay::render`].
    fn request_redraw(&self);

    fn surface_size(&self) -> Size;

    /// Converts density-independent units to pixels.
    fn convert_density_unit(&self, value: f64) -> f64;

    /// Calls [`CircleDisplay::tick`] with `run` at a steady rate until it
    /// reports completion.
    fn schedule_animation_ticks(&self, run: AnimationRun);
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Action {
    pub should_redraw: bool,
    pub animation: Option<AnimationRun>,
}

impl Action {
    fn redraw() -> Self {
        Self {
            should_redraw: true,
            animation: None,
        }
    }

    fn animate(run: AnimationRun) -> Self {
        Self {
            should_redraw: true,
            animation: Some(run),
        }
    }

    pub fn dispatch<H: Host + ?Sized>(self, host: &H) {
        if let Some(run) = self.animation {
            host.schedule_animation_ticks(run);
        }
        if self.should_redraw {
            host.request_redraw();
        }
    }
}

pub struct CircleDisplay {
    state: GaugeState,
    animation: AnimationController,
    options: DisplayOptions,
    style: Style,
    interaction: InteractionController,
    size: Size,
    frame: Option<GeometryFrame>,
    text_size_px: f64,
}

impl Default for CircleDisplay {
    fn default() -> Self {
        let style = Style::default();
        Self {
            state: GaugeState::new(),
            animation: AnimationController::new(),
            options: DisplayOptions::default(),
            text_size_px: style.text_size_dp,
            style,
            interaction: InteractionController::new(),
            size: Size::default(),
            frame: None,
        }
    }
}

impl CircleDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &GaugeConfig) -> Self {
        let mut display = Self::new();
        display.apply_config(config);
        display
    }

    /// Replaces every configurable setting. The shown value is kept.
    pub fn apply_config(&mut self, config: &GaugeConfig) {
        let d = &config.display;
        self.set_unit(d.unit.clone());
        self.set_start_angle(d.start_angle);
        self.set_step_size(d.step_size);
        self.set_value_width_percent(d.value_width_percent);
        self.set_draw_inner_circle(d.draw_inner_circle);
        self.set_draw_text(d.draw_text);
        self.set_touch_enabled(d.touch_enabled);
        self.set_dim_alpha(d.dim_alpha);
        self.options.format = d
            .format_digits
            .map(ValueFormat::with_digits)
            .unwrap_or_default();
        self.set_custom_text(d.custom_text.clone());
        self.set_anim_duration(Duration::from_millis(d.animation_duration_ms));
        self.animation.set_easing(d.easing);

        let s = &config.style;
        self.set_paint(PaintRole::Arc, s.arc.into());
        self.set_paint(PaintRole::Inner, s.inner.into());
        self.set_paint(PaintRole::Text, s.text.into());
        self.style.text_size_dp = s.text_size_dp;
        self.frame = None;
    }

    /// Shows `to_show` out of `total`, animating the arc from empty when `animated`.
    pub fn show_value(&mut self, to_show: f64, total: f64, animated: bool) -> Action {
        self.state.set_value(to_show, total);
        if animated {
            self.start_anim()
        } else {
            self.animation.finish();
            Action::redraw()
        }
    }

    /// Replays the draw animation for the current value.
    pub fn start_anim(&mut self) -> Action {
        Action::animate(self.animation.start())
    }

    pub fn tick(&mut self, run: AnimationRun, elapsed: Duration) -> (TickOutcome, Action) {
        let outcome = self.animation.tick(run, elapsed);
        (outcome, Self::after_tick(outcome))
    }

    pub fn finish_anim(&mut self, run: AnimationRun) -> Action {
        Self::after_tick(self.animation.complete(run))
    }

    fn after_tick(outcome: TickOutcome) -> Action {
        match outcome {
            TickOutcome::Stale => Action::default(),
            _ => Action::redraw(),
        }
    }

    /// Re-reads the surface size and text density from the host.
    pub fn sync_layout<H: Host + ?Sized>(&mut self, host: &H) {
        self.text_size_px = host.convert_density_unit(self.style.text_size_dp);
        self.resize(host.surface_size());
    }

    pub fn resize(&mut self, size: Size) {
        if size != self.size {
            self.size = size;
            self.frame = None;
        }
    }

    fn frame(&mut self) -> GeometryFrame {
        *self.frame.get_or_insert_with(|| {
            log::debug!("Setting up gauge box for {:?}", self.size);
            GeometryFrame::from_size(self.size)
        })
    }

    pub fn render<S: Surface>(&mut self, surface: &mut S) -> Result<Option<Advisory>, S::Error> {
        self.resize(surface.size());
        let frame = self.frame();
        GaugeRenderer::new(
            &self.state,
            self.animation.phase(),
            &self.options,
            &self.style,
            &frame,
            self.text_size_px,
        )
        .draw(surface)
    }

    /// Feeds a pointer event. Returns `None` when touch is disabled so the host
    /// can handle the event itself.
    pub fn handle_pointer(&mut self, event: &PointerEvent) -> Option<Action> {
        let frame = self.frame();
        let outcome = self.interaction.handle(event, &mut self.state, &frame)?;
        if outcome.should_redraw {
            // a touched value is shown as is
            self.animation.finish();
        }
        Some(Action {
            should_redraw: outcome.should_redraw,
            animation: None,
        })
    }

    pub fn set_selection_listener(&mut self, listener: Option<Box<dyn SelectionListener>>) {
        self.interaction.set_listener(listener);
    }

    pub fn value(&self) -> f64 {
        self.state.value()
    }

    pub fn max_value(&self) -> f64 {
        self.state.max_value()
    }

    pub fn angle(&self) -> f64 {
        self.state.angle()
    }

    pub fn phase(&self) -> f64 {
        self.animation.phase()
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_running()
    }

    pub fn step_size(&self) -> f64 {
        self.state.step_size()
    }

    pub fn set_step_size(&mut self, step: f64) {
        self.state.set_step_size(step);
    }

    pub fn set_unit(&mut self, unit: impl Into<String>) {
        self.options.unit = Unit::new(unit);
    }

    pub fn unit(&self) -> &Unit {
        &self.options.unit
    }

    pub fn set_start_angle(&mut self, angle: f64) {
        self.state.set_start_angle(angle);
    }

    pub fn set_value_width_percent(&mut self, percent: f64) {
        self.state.set_value_width_percent(percent);
    }

    pub fn set_draw_inner_circle(&mut self, enabled: bool) {
        self.options.draw_inner_circle = enabled;
    }

    pub fn is_draw_inner_circle_enabled(&self) -> bool {
        self.options.draw_inner_circle
    }

    pub fn set_draw_text(&mut self, enabled: bool) {
        self.options.draw_text = enabled;
    }

    pub fn is_draw_text_enabled(&self) -> bool {
        self.options.draw_text
    }

    pub fn set_touch_enabled(&mut self, enabled: bool) {
        self.interaction.set_enabled(enabled);
    }

    pub fn is_touch_enabled(&self) -> bool {
        self.interaction.is_enabled()
    }

    pub fn set_dim_alpha(&mut self, alpha: u8) {
        self.state.set_dim_alpha(alpha);
    }

    pub fn set_format_digits(&mut self, digits: usize) {
        self.options.format = ValueFormat::with_digits(digits);
    }

    pub fn set_custom_text(&mut self, custom: Option<Vec<String>>) {
        self.options.custom_text = custom;
    }

    pub fn set_anim_duration(&mut self, duration: Duration) {
        self.animation.set_duration(duration);
    }

    pub fn set_easing(&mut self, easing: Easing) {
        self.animation.set_easing(easing);
    }

    pub fn set_paint(&mut self, role: PaintRole, color: Srgba<f64>) {
        self.style.set_color(role, color);
    }

    /// Text size in density-independent units; applied on the next [`sync_layout`](Self::sync_layout).
    pub fn set_text_size(&mut self, size_dp: f64) {
        self.style.text_size_dp = size_dp;
    }

    pub fn diameter(&self) -> f64 {
        self.size.width.min(self.size.height).max(0.0)
    }

    pub fn radius(&self) -> f64 {
        self.diameter() / 2.0
    }

    pub fn center(&self) -> Point {
        self.size.center()
    }

    pub fn angle_for_point(&self, point: Point) -> f64 {
        geometry::angle_for_point(point, self.center())
    }

    pub fn angle_for_value(&self, value: f64) -> f64 {
        geometry::angle_for_value(value, self.state.max_value())
    }

    pub fn value_for_angle(&self, angle: f64) -> f64 {
        geometry::value_for_angle(angle, self.state.max_value())
    }

    pub fn distance_to_center(&self, point: Point) -> f64 {
        geometry::distance_to_center(point, self.center())
    }
}
