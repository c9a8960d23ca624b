use crate::advisory::Advisory;
use crate::geometry::{GeometryFrame, Point, Rect, Size};
use crate::model::{self, GaugeState};
use crate::options::{DisplayOptions, Style};
use palette::Srgba;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub color: Srgba<f64>,
    pub size_px: f64,
}

/// 2D drawing target. Wedge angles are screen degrees: 0° points east and
/// angles grow clockwise.
pub trait Surface {
    type Error;

    fn size(&self) -> Size;

    fn fill_circle(
        &mut self,
        center: Point,
        radius: f64,
        color: Srgba<f64>,
    ) -> Result<(), Self::Error>;

    fn fill_wedge(
        &mut self,
        bounds: Rect,
        start_angle: f64,
        sweep: f64,
        color: Srgba<f64>,
    ) -> Result<(), Self::Error>;

    /// Draws `text` horizontally centered on `anchor`, with its baseline at `anchor.y`.
    fn draw_text(&mut self, text: &str, anchor: Point, style: &TextStyle)
    -> Result<(), Self::Error>;

    fn text_descent(&self, style: &TextStyle) -> f64;
}

fn with_alpha(color: Srgba<f64>, alpha: f64) -> Srgba<f64> {
    let (r, g, b, _) = color.into_components();
    Srgba::new(r, g, b, alpha)
}

pub struct GaugeRenderer<'a> {
    state: &'a GaugeState,
    phase: f64,
    options: &'a DisplayOptions,
    style: &'a Style,
    frame: &'a GeometryFrame,
    text_size_px: f64,
}

impl<'a> GaugeRenderer<'a> {
    pub fn new(
        state: &'a GaugeState,
        phase: f64,
        options: &'a DisplayOptions,
        style: &'a Style,
        frame: &'a GeometryFrame,
        text_size_px: f64,
    ) -> Self {
        Self {
            state,
            phase,
            options,
            style,
            frame,
            text_size_px,
        }
    }

    /// Paints ring, value arc, inner disc and label, in that order. A label
    /// that cannot be resolved is skipped and returned as an advisory.
    pub fn draw<S: Surface>(&self, surface: &mut S) -> Result<Option<Advisory>, S::Error> {
        self.draw_whole_circle(surface)?;
        self.draw_value(surface)?;
        if self.options.draw_inner_circle {
            self.draw_inner_circle(surface)?;
        }
        if self.options.draw_text {
            return self.draw_label(surface);
        }
        Ok(None)
    }

    fn draw_whole_circle<S: Surface>(&self, surface: &mut S) -> Result<(), S::Error> {
        let alpha = f64::from(self.state.dim_alpha()) / 255.0;
        surface.fill_circle(
            self.frame.center,
            self.frame.radius(),
            with_alpha(self.style.arc, alpha),
        )
    }

    fn draw_value<S: Surface>(&self, surface: &mut S) -> Result<(), S::Error> {
        surface.fill_wedge(
            self.frame.bounding_box,
            self.state.start_angle(),
            self.state.angle() * self.phase,
            with_alpha(self.style.arc, 1.0),
        )
    }

    fn draw_inner_circle<S: Surface>(&self, surface: &mut S) -> Result<(), S::Error> {
        surface.fill_circle(
            self.frame.center,
            self.state.inner_radius(self.frame.radius()),
            self.style.inner,
        )
    }

    fn draw_label<S: Surface>(&self, surface: &mut S) -> Result<Option<Advisory>, S::Error> {
        let text = match self.label() {
            Ok(text) => text,
            Err(advisory) => return Ok(Some(advisory.report())),
        };

        let style = TextStyle {
            color: self.style.text,
            size_px: self.text_size_px,
        };
        let anchor = Point::new(
            self.frame.center.x,
            self.frame.center.y + surface.text_descent(&style),
        );
        surface.draw_text(&text, anchor, &style)?;
        Ok(None)
    }

    pub fn label(&self) -> Result<String, Advisory> {
        let shown = self.state.value() * self.phase;

        let Some(custom) = &self.options.custom_text else {
            return Ok(format!(
                "{} {}",
                self.options.format.format(shown),
                self.options.unit
            ));
        };

        let position = model::step_index(shown, self.state.step_size());
        (position.is_finite() && position >= 0.0)
            .then(|| custom.get(position as usize))
            .flatten()
            .cloned()
            .ok_or(Advisory::CustomTextTooShort {
                position,
                len: custom.len(),
            })
    }
}
