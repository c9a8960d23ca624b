use crate::advisory::Advisory;
use crate::geometry::{self, GeometryFrame, Point};
use crate::model::GaugeState;
use std::time::{Duration, Instant};

pub const TAP_SLOP: f64 = 8.0;
pub const TAP_TIMEOUT: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerAction {
    Down,
    Move,
    Up,
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub action: PointerAction,
    pub position: Point,
    pub time: Instant,
}

impl PointerEvent {
    pub fn new(action: PointerAction, position: Point, time: Instant) -> Self {
        Self {
            action,
            position,
            time,
        }
    }
}

/// Receives values selected by touch.
pub trait SelectionListener {
    fn on_selection_update(&mut self, value: f64, max_value: f64);

    fn on_value_selected(&mut self, value: f64, max_value: f64);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Selection {
    Update { value: f64, max_value: f64 },
    Selected { value: f64, max_value: f64 },
}

pub fn in_arc_band(point: Point, frame: &GeometryFrame, value_width_percent: f64) -> bool {
    let distance = geometry::distance_to_center(point, frame.center);
    let radius = frame.radius();
    distance >= radius * (1.0 - value_width_percent / 100.0) && distance < radius
}

/// Recognizes single taps. Consulted before the drag path; an `Up` it claims
/// is not treated as a drag release.
#[derive(Debug, Clone)]
pub struct TapDetector {
    slop: f64,
    timeout: Duration,
    down: Option<(Point, Instant)>,
}

impl Default for TapDetector {
    fn default() -> Self {
        Self::new(TAP_SLOP, TAP_TIMEOUT)
    }
}

impl TapDetector {
    pub fn new(slop: f64, timeout: Duration) -> Self {
        Self {
            slop,
            timeout,
            down: None,
        }
    }

    pub fn on_event(&mut self, event: &PointerEvent) -> bool {
        match event.action {
            PointerAction::Down => {
                self.down = Some((event.position, event.time));
                false
            }
            PointerAction::Move => {
                if let Some((origin, _)) = self.down
                    && geometry::distance_to_center(event.position, origin) > self.slop
                {
                    self.down = None;
                }
                false
            }
            PointerAction::Up => self.down.take().is_some_and(|(origin, started)| {
                geometry::distance_to_center(event.position, origin) <= self.slop
                    && event.time.saturating_duration_since(started) < self.timeout
            }),
            PointerAction::Cancel => {
                self.down = None;
                false
            }
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerOutcome {
    pub should_redraw: bool,
    pub selection: Option<Selection>,
}

pub struct InteractionController {
    enabled: bool,
    listener: Option<Box<dyn SelectionListener>>,
    tap: TapDetector,
    warned_unrouted: bool,
}

impl Default for InteractionController {
    fn default() -> Self {
        Self {
            enabled: true,
            listener: None,
            tap: TapDetector::default(),
            warned_unrouted: false,
        }
    }
}

impl InteractionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn set_listener(&mut self, listener: Option<Box<dyn SelectionListener>>) {
        if listener.is_none() {
            self.warned_unrouted = false;
        }
        self.listener = listener;
    }

    pub fn has_listener(&self) -> bool {
        self.listener.is_some()
    }

    /// Feeds one pointer event. Returns `None` when touch is disabled and the
    /// event is left to the host.
    pub fn handle(
        &mut self,
        event: &PointerEvent,
        state: &mut GaugeState,
        frame: &GeometryFrame,
    ) -> Option<PointerOutcome> {
        if !self.enabled {
            return None;
        }

        if self.listener.is_none() && !self.warned_unrouted {
            self.warned_unrouted = true;
            Advisory::NoSelectionListener.report();
        }

        let is_tap = self.tap.on_event(event);
        if !in_arc_band(event.position, frame, state.value_width_percent()) {
            return Some(PointerOutcome::default());
        }

        let outcome = match (is_tap, event.action) {
            (true, _) => self.select(event.position, state, frame, true),
            (false, PointerAction::Move) => self.select(event.position, state, frame, false),
            (false, PointerAction::Up) if state.can_select() => PointerOutcome {
                should_redraw: false,
                selection: Some(self.emit_selected(state)),
            },
            _ => PointerOutcome::default(),
        };
        Some(outcome)
    }

    fn select(
        &mut self,
        point: Point,
        state: &mut GaugeState,
        frame: &GeometryFrame,
        done: bool,
    ) -> PointerOutcome {
        if !state.update_from_point(point, frame.center) {
            return PointerOutcome::default();
        }

        let selection = if done {
            self.emit_selected(state)
        } else {
            self.emit_update(state)
        };
        PointerOutcome {
            should_redraw: true,
            selection: Some(selection),
        }
    }

    fn emit_update(&mut self, state: &GaugeState) -> Selection {
        let (value, max_value) = (state.value(), state.max_value());
        if let Some(listener) = self.listener.as_mut() {
            listener.on_selection_update(value, max_value);
        }
        Selection::Update { value, max_value }
    }

    fn emit_selected(&mut self, state: &GaugeState) -> Selection {
        let (value, max_value) = (state.value(), state.max_value());
        if let Some(listener) = self.listener.as_mut() {
            listener.on_value_selected(value, max_value);
        }
        Selection::Selected { value, max_value }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::geometry::Size;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    pub(crate) struct Recorder {
        pub events: Rc<RefCell<Vec<Selection>>>,
    }

    impl SelectionListener for Recorder {
        fn on_selection_update(&mut self, value: f64, max_value: f64) {
            self.events
                .borrow_mut()
                .push(Selection::Update { value, max_value });
        }

        fn on_value_selected(&mut self, value: f64, max_value: f64) {
            self.events
                .borrow_mut()
                .push(Selection::Selected { value, max_value });
        }
    }

    fn frame() -> GeometryFrame {
        GeometryFrame::from_size(Size::new(200.0, 200.0))
    }

    fn state() -> GaugeState {
        let mut state = GaugeState::new();
        state.set_value(0.0, 100.0);
        state
    }

    fn controller() -> (InteractionController, Rc<RefCell<Vec<Selection>>>) {
        let recorder = Recorder::default();
        let events = recorder.events.clone();
        let mut controller = InteractionController::new();
        controller.set_listener(Some(Box::new(recorder)));
        (controller, events)
    }

    fn ev(action: PointerAction, x: f64, y: f64, t: Instant) -> PointerEvent {
        PointerEvent::new(action, Point::new(x, y), t)
    }

    #[test]
    fn test_band_boundaries() {
        let f = frame();
        // outer edge is exclusive
        assert!(!in_arc_band(Point::new(200.0, 100.0), &f, 50.0));
        assert!(in_arc_band(Point::new(199.999, 100.0), &f, 50.0));
        // inner edge is inclusive
        assert!(in_arc_band(Point::new(150.0, 100.0), &f, 50.0));
        assert!(!in_arc_band(Point::new(149.9, 100.0), &f, 50.0));
        assert!(!in_arc_band(Point::new(100.0, 100.0), &f, 50.0));
    }

    #[test]
    fn test_tap_selects_value() {
        let (mut controller, events) = controller();
        let mut state = state();
        let t = Instant::now();

        // right side of the ring, 90°
        controller.handle(&ev(PointerAction::Down, 175.0, 100.0, t), &mut state, &frame());
        let outcome = controller
            .handle(
                &ev(PointerAction::Up, 175.0, 100.0, t + Duration::from_millis(80)),
                &mut state,
                &frame(),
            )
            .unwrap();

        assert!(outcome.should_redraw);
        assert_eq!(state.value(), 25.0);
        assert_eq!(
            *events.borrow(),
            vec![Selection::Selected {
                value: 25.0,
                max_value: 100.0
            }]
        );
    }

    #[test]
    fn test_drag_updates_then_selects() {
        let (mut controller, events) = controller();
        let mut state = state();
        let t = Instant::now();
        let f = frame();

        controller.handle(&ev(PointerAction::Down, 175.0, 100.0, t), &mut state, &f);
        controller.handle(&ev(PointerAction::Move, 100.0, 175.0, t), &mut state, &f);
        controller.handle(&ev(PointerAction::Move, 25.0, 100.0, t), &mut state, &f);
        controller.handle(&ev(PointerAction::Up, 25.0, 100.0, t), &mut state, &f);

        assert_eq!(state.value(), 75.0);
        assert_eq!(
            *events.borrow(),
            vec![
                Selection::Update {
                    value: 50.0,
                    max_value: 100.0
                },
                Selection::Update {
                    value: 75.0,
                    max_value: 100.0
                },
                Selection::Selected {
                    value: 75.0,
                    max_value: 100.0
                },
            ]
        );
    }

    #[test]
    fn test_slow_press_is_not_a_tap() {
        let (mut controller, events) = controller();
        let mut state = state();
        let t = Instant::now();
        let f = frame();

        controller.handle(&ev(PointerAction::Down, 175.0, 100.0, t), &mut state, &f);
        controller.handle(
            &ev(PointerAction::Up, 175.0, 100.0, t + Duration::from_secs(2)),
            &mut state,
            &f,
        );

        // released as a drag: reports the unchanged value without selecting
        assert_eq!(state.value(), 0.0);
        assert_eq!(
            *events.borrow(),
            vec![Selection::Selected {
                value: 0.0,
                max_value: 100.0
            }]
        );
    }

    #[test]
    fn test_no_selection_before_max_is_set() {
        let (mut controller, events) = controller();
        let mut state = GaugeState::new();
        let t = Instant::now();
        let f = frame();

        controller.handle(&ev(PointerAction::Down, 175.0, 100.0, t), &mut state, &f);
        controller.handle(&ev(PointerAction::Move, 100.0, 175.0, t), &mut state, &f);
        let outcome = controller
            .handle(&ev(PointerAction::Up, 100.0, 175.0, t), &mut state, &f)
            .unwrap();

        assert_eq!(outcome, PointerOutcome::default());
        assert_eq!(state.value(), 0.0);
        assert!(events.borrow().is_empty());
    }

    #[test]
    fn test_touch_outside_band_is_ignored() {
        let (mut controller, events) = controller();
        let mut state = state();
        let t = Instant::now();
        let f = frame();

        controller.handle(&ev(PointerAction::Down, 110.0, 100.0, t), &mut state, &f);
        let outcome = controller
            .handle(&ev(PointerAction::Up, 110.0, 100.0, t), &mut state, &f)
            .unwrap();

        assert_eq!(outcome, PointerOutcome::default());
        assert!(events.borrow().is_empty());
    }

    #[test]
    fn test_disabled_controller_passes_events_through() {
        let (mut controller, events) = controller();
        controller.set_enabled(false);
        let mut state = state();
        let t = Instant::now();

        let outcome = controller.handle(
            &ev(PointerAction::Move, 175.0, 100.0, t),
            &mut state,
            &frame(),
        );
        assert!(outcome.is_none());
        assert!(events.borrow().is_empty());
    }

    #[test]
    fn test_without_listener_state_still_updates() {
        let mut controller = InteractionController::new();
        let mut state = state();
        let t = Instant::now();

        let outcome = controller
            .handle(&ev(PointerAction::Move, 100.0, 175.0, t), &mut state, &frame())
            .unwrap();
        assert!(outcome.should_redraw);
        assert_eq!(state.value(), 50.0);
        assert!(controller.warned_unrouted);
    }

    #[test]
    fn test_clearing_listener_rearms_advisory() {
        let (mut controller, _events) = controller();
        let mut state = state();
        let t = Instant::now();

        controller.handle(&ev(PointerAction::Move, 100.0, 175.0, t), &mut state, &frame());
        assert!(!controller.warned_unrouted);

        controller.set_listener(None);
        controller.handle(&ev(PointerAction::Move, 25.0, 100.0, t), &mut state, &frame());
        assert!(controller.warned_unrouted);

        controller.set_listener(Some(Box::new(Recorder::default())));
        controller.set_listener(None);
        assert!(!controller.warned_unrouted);
        assert!(!controller.has_listener());
    }

    #[test]
    fn test_tap_detector_slop() {
        let mut tap = TapDetector::default();
        let t = Instant::now();
        assert!(!tap.on_event(&ev(PointerAction::Down, 0.0, 0.0, t)));
        assert!(!tap.on_event(&ev(PointerAction::Move, 20.0, 0.0, t)));
        assert!(!tap.on_event(&ev(PointerAction::Up, 0.0, 0.0, t)));

        assert!(!tap.on_event(&ev(PointerAction::Down, 0.0, 0.0, t)));
        assert!(!tap.on_event(&ev(PointerAction::Move, 3.0, 3.0, t)));
        assert!(tap.on_event(&ev(PointerAction::Up, 3.0, 3.0, t)));

        // an up without a down is never a tap
        assert!(!tap.on_event(&ev(PointerAction::Up, 0.0, 0.0, t)));
    }
}
