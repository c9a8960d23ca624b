use cairo::Context;
use circle_display::{Point, Rect, Size, Surface, TextStyle};
use palette::Srgba;
use std::f64::consts::PI;

const FONT_FAMILY: &str = "Sans";

/// Cairo context of a `DrawingArea` draw call.
pub struct CairoSurface<'a> {
    cr: &'a Context,
    size: Size,
}

impl<'a> CairoSurface<'a> {
    pub fn new(cr: &'a Context, width: i32, height: i32) -> Self {
        Self {
            cr,
            size: Size::new(width as f64, height as f64),
        }
    }

    fn set_color(&self, color: Srgba<f64>) {
        let (r, g, b, a) = color.into_components();
        self.cr.set_source_rgba(r, g, b, a);
    }

    fn set_font(&self, style: &TextStyle) {
        self.cr.select_font_face(
            FONT_FAMILY,
            cairo::FontSlant::Normal,
            cairo::FontWeight::Normal,
        );
        self.cr.set_font_size(style.size_px);
    }
}

impl Surface for CairoSurface<'_> {
    type Error = cairo::Error;

    fn size(&self) -> Size {
        self.size
    }

    fn fill_circle(
        &mut self,
        center: Point,
        radius: f64,
        color: Srgba<f64>,
    ) -> Result<(), cairo::Error> {
        if radius <= 0.0 {
            return Ok(());
        }
        self.set_color(color);
        self.cr.new_path();
        self.cr.arc(center.x, center.y, radius, 0.0, 2.0 * PI);
        self.cr.fill()
    }

    fn fill_wedge(
        &mut self,
        bounds: Rect,
        start_angle: f64,
        sweep: f64,
        color: Srgba<f64>,
    ) -> Result<(), cairo::Error> {
        let (rx, ry) = (bounds.width() / 2.0, bounds.height() / 2.0);
        if sweep == 0.0 || rx <= 0.0 || ry <= 0.0 {
            return Ok(());
        }

        let center = bounds.center();
        let (from, to) = (start_angle.to_radians(), (start_angle + sweep).to_radians());

        self.set_color(color);
        self.cr.new_path();
        // unit circle scaled to the box, path survives the restore
        self.cr.save()?;
        self.cr.translate(center.x, center.y);
        self.cr.scale(rx, ry);
        self.cr.move_to(0.0, 0.0);
        if sweep > 0.0 {
            self.cr.arc(0.0, 0.0, 1.0, from, to);
        } else {
            self.cr.arc_negative(0.0, 0.0, 1.0, from, to);
        }
        self.cr.close_path();
        self.cr.restore()?;
        self.cr.fill()
    }

    fn draw_text(
        &mut self,
        text: &str,
        anchor: Point,
        style: &TextStyle,
    ) -> Result<(), cairo::Error> {
        self.set_color(style.color);
        self.set_font(style);
        let ext = self.cr.text_extents(text)?;
        self.cr
            .move_to(anchor.x - ext.width() / 2.0 - ext.x_bearing(), anchor.y);
        self.cr.show_text(text)
    }

    fn text_descent(&self, style: &TextStyle) -> f64 {
        self.set_font(style);
        self.cr
            .font_extents()
            .map(|e| e.descent())
            .unwrap_or_default()
    }
}
