use circle_display::{AnimationRun, CircleDisplay, Host, SelectionListener, Size};
use gtk::prelude::*;
use gtk4 as gtk;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::{Duration, Instant};

const FRAME_INTERVAL: Duration = Duration::from_millis(16);
/// Density-independent units are 1/96 inch.
const REFERENCE_DPI: f64 = 96.0;

/// Connects the gauge to its `DrawingArea` and the glib main loop.
pub struct GtkHost {
    drawing_area: gtk::DrawingArea,
    display: Weak<RefCell<CircleDisplay>>,
}

impl GtkHost {
    pub fn new(drawing_area: &gtk::DrawingArea, display: &Rc<RefCell<CircleDisplay>>) -> Self {
        Self {
            drawing_area: drawing_area.clone(),
            display: Rc::downgrade(display),
        }
    }

    fn screen_dpi() -> f64 {
        gtk::Settings::default()
            .map(|s| s.gtk_xft_dpi())
            .filter(|&dpi| dpi > 0)
            .map(|dpi| dpi as f64 / 1024.0)
            .unwrap_or(REFERENCE_DPI)
    }
}

impl Host for GtkHost {
    fn request_redraw(&self) {
        self.drawing_area.queue_draw();
    }

    fn surface_size(&self) -> Size {
        Size::new(
            self.drawing_area.width() as f64,
            self.drawing_area.height() as f64,
        )
    }

    fn convert_density_unit(&self, value: f64) -> f64 {
        value * Self::screen_dpi() / REFERENCE_DPI
    }

    fn schedule_animation_ticks(&self, run: AnimationRun) {
        let display = self.display.clone();
        let drawing_area = self.drawing_area.clone();
        let started = Instant::now();

        glib::timeout_add_local(FRAME_INTERVAL, move || {
            let Some(display) = display.upgrade() else {
                return glib::ControlFlow::Break;
            };

            let (outcome, action) = display.borrow_mut().tick(run, started.elapsed());
            if action.should_redraw {
                drawing_area.queue_draw();
            }

            if outcome.is_done() {
                glib::ControlFlow::Break
            } else {
                glib::ControlFlow::Continue
            }
        });
    }
}

/// Logs selections, the way a host application would react to them.
pub struct LoggingListener;

impl SelectionListener for LoggingListener {
    fn on_selection_update(&mut self, value: f64, max_value: f64) {
        log::info!("Selection update: {}, max: {}", value, max_value);
    }

    fn on_value_selected(&mut self, value: f64, max_value: f64) {
        log::info!("Selection complete: {}, max: {}", value, max_value);
    }
}
