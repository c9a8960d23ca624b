use crate::geometry::{self, Point};

pub const DEFAULT_START_ANGLE: f64 = 270.0;
pub const DEFAULT_STEP_SIZE: f64 = 1.0;
pub const DEFAULT_VALUE_WIDTH_PERCENT: f64 = 50.0;
pub const DEFAULT_DIM_ALPHA: u8 = 80;
const STEP_EPSILON: f64 = 1e-9;

/// Index of the step `value` falls into. Quotients within rounding error of a
/// whole step count as that step.
pub fn step_index(value: f64, step: f64) -> f64 {
    let quotient = value / step;
    let nearest = quotient.round();
    if (quotient - nearest).abs() < STEP_EPSILON {
        nearest
    } else {
        quotient.floor()
    }
}

/// Rounds `raw` to the nearest multiple of `step`. Ties round down, a step of 0
/// leaves the value untouched.
pub fn snap_to_step(raw: f64, step: f64) -> f64 {
    if step == 0.0 {
        return raw;
    }

    let index = step_index(raw, step);
    let remainder = raw - index * step;
    if remainder <= step / 2.0 {
        index * step
    } else {
        (index + 1.0) * step
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GaugeState {
    value: f64,
    max_value: f64,
    step_size: f64,
    angle: f64,
    start_angle: f64,
    value_width_percent: f64,
    dim_alpha: u8,
}

impl Default for GaugeState {
    fn default() -> Self {
        Self {
            value: 0.0,
            max_value: 0.0,
            step_size: DEFAULT_STEP_SIZE,
            angle: 0.0,
            start_angle: DEFAULT_START_ANGLE,
            value_width_percent: DEFAULT_VALUE_WIDTH_PERCENT,
            dim_alpha: DEFAULT_DIM_ALPHA,
        }
    }
}

impl GaugeState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_value(&mut self, value: f64, max_value: f64) {
        self.value = value;
        self.max_value = max_value;
        self.angle = geometry::angle_for_value(value, max_value);
    }

    /// Moves the value to the step closest to `point`. Returns false when no
    /// selection is possible because the maximum is not set yet.
    pub fn update_from_point(&mut self, point: Point, center: Point) -> bool {
        if !self.can_select() {
            log::debug!(
                "Ignoring selection at {:?}: max value is {}",
                point,
                self.max_value
            );
            return false;
        }

        let angle = geometry::angle_for_point(point, center);
        let raw = self.max_value * angle / 360.0;

        if self.step_size == 0.0 {
            self.value = raw;
            self.angle = angle;
            return true;
        }

        self.value = snap_to_step(raw, self.step_size);
        self.angle = geometry::angle_for_value(self.value, self.max_value);
        true
    }

    /// Touch selection needs a positive maximum.
    pub fn can_select(&self) -> bool {
        self.max_value > 0.0 && self.max_value.is_finite()
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn max_value(&self) -> f64 {
        self.max_value
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn step_size(&self) -> f64 {
        self.step_size
    }

    pub fn set_step_size(&mut self, step: f64) {
        if step < 0.0 || !step.is_finite() {
            log::warn!("Step size {} is invalid, disabling step snapping", step);
            self.step_size = 0.0;
        } else {
            self.step_size = step;
        }
    }

    pub fn start_angle(&self) -> f64 {
        self.start_angle
    }

    pub fn set_start_angle(&mut self, angle: f64) {
        self.start_angle = angle;
    }

    pub fn value_width_percent(&self) -> f64 {
        self.value_width_percent
    }

    pub fn set_value_width_percent(&mut self, percent: f64) {
        if !(0.0..=100.0).contains(&percent) {
            log::warn!(
                "Value width {}% is out of range [0, 100], clamping",
                percent
            );
        }
        self.value_width_percent = if percent.is_nan() {
            DEFAULT_VALUE_WIDTH_PERCENT
        } else {
            percent.clamp(0.0, 100.0)
        };
    }

    pub fn dim_alpha(&self) -> u8 {
        self.dim_alpha
    }

    pub fn set_dim_alpha(&mut self, alpha: u8) {
        self.dim_alpha = alpha;
    }

    pub fn inner_radius(&self, radius: f64) -> f64 {
        radius * (1.0 - self.value_width_percent / 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn center() -> Point {
        Point::new(100.0, 100.0)
    }

    /// Point on a circle of radius 75 around `center()` at the given gauge angle.
    fn at_angle(deg: f64) -> Point {
        let rad = deg.to_radians();
        Point::new(100.0 + 75.0 * rad.sin(), 100.0 - 75.0 * rad.cos())
    }

    #[test]
    fn test_defaults() {
        let state = GaugeState::new();
        assert_eq!(state.value(), 0.0);
        assert_eq!(state.max_value(), 0.0);
        assert_eq!(state.step_size(), 1.0);
        assert_eq!(state.start_angle(), 270.0);
        assert_eq!(state.value_width_percent(), 50.0);
        assert_eq!(state.dim_alpha(), 80);
    }

    #[test]
    fn test_set_value_derives_angle() {
        let mut state = GaugeState::new();
        state.set_value(75.0, 100.0);
        assert_eq!(state.angle(), 270.0);
        state.set_value(50.0, 200.0);
        assert_eq!(state.angle(), 90.0);
        state.set_value(5.0, 0.0);
        assert_eq!(state.angle(), 0.0);
    }

    #[test]
    fn test_snap_ties_round_down() {
        assert_eq!(snap_to_step(15.0, 10.0), 10.0);
        assert_eq!(snap_to_step(15.5, 10.0), 20.0);
        assert_eq!(snap_to_step(14.9, 10.0), 10.0);
        assert_eq!(snap_to_step(0.25, 0.5), 0.0);
        assert_eq!(snap_to_step(0.3, 0.5), 0.5);
    }

    #[test]
    fn test_snap_without_step() {
        assert_eq!(snap_to_step(12.345, 0.0), 12.345);
    }

    #[test]
    fn test_snap_is_idempotent() {
        for step in [0.1, 0.3, 0.5, 1.0, 2.5, 10.0, 25.0] {
            for i in 0..400 {
                let raw = i as f64 * 0.37;
                let once = snap_to_step(raw, step);
                assert_eq!(snap_to_step(once, step), once, "raw {raw} step {step}");
            }
        }
    }

    #[test]
    fn test_snap_with_inexact_step() {
        let once = snap_to_step(1.2604, 0.1);
        assert_eq!(snap_to_step(once, 0.1), once);
        assert!((once - 1.3).abs() < 1e-9);
        // exactly half of 0.1 past 0.2 still rounds down
        assert!((snap_to_step(0.25, 0.1) - 0.2).abs() < 1e-9);
    }

    #[test]
    fn test_step_index_absorbs_rounding() {
        assert_eq!(step_index(0.7, 0.1), 7.0);
        assert_eq!(step_index(0.75, 0.1), 7.0);
        assert_eq!(step_index(7.0, 1.0), 7.0);
        assert_eq!(step_index(6.99, 1.0), 6.0);
    }

    #[test]
    fn test_update_from_point_snaps() {
        let mut state = GaugeState::new();
        state.set_value(0.0, 100.0);
        state.set_step_size(10.0);

        // 100° maps to 27.77.., which snaps up to 30
        assert!(state.update_from_point(at_angle(100.0), center()));
        assert!((state.value() - 30.0).abs() < 1e-9);
        assert!((state.angle() - 108.0).abs() < 1e-9);

        // 90° maps to 25, exactly half a step: rounds down
        assert!(state.update_from_point(Point::new(175.0, 100.0), center()));
        assert!((state.value() - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_update_from_point_without_step() {
        let mut state = GaugeState::new();
        state.set_value(0.0, 200.0);
        state.set_step_size(0.0);

        assert!(state.update_from_point(Point::new(175.0, 100.0), center()));
        assert!((state.value() - 50.0).abs() < 1e-9);
        assert!((state.angle() - 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_update_ignored_without_max() {
        let mut state = GaugeState::new();
        assert!(!state.update_from_point(at_angle(90.0), center()));
        assert_eq!(state.value(), 0.0);
        assert_eq!(state.angle(), 0.0);
    }

    #[test]
    fn test_can_select_needs_positive_max() {
        let mut state = GaugeState::new();
        assert!(!state.can_select());
        state.set_value(0.0, f64::INFINITY);
        assert!(!state.can_select());
        state.set_value(0.0, -5.0);
        assert!(!state.can_select());
        state.set_value(0.0, 10.0);
        assert!(state.can_select());
    }

    #[test]
    fn test_setter_validation() {
        let mut state = GaugeState::new();
        state.set_value_width_percent(140.0);
        assert_eq!(state.value_width_percent(), 100.0);
        state.set_value_width_percent(-3.0);
        assert_eq!(state.value_width_percent(), 0.0);
        state.set_step_size(-1.0);
        assert_eq!(state.step_size(), 0.0);
    }

    #[test]
    fn test_inner_radius() {
        let mut state = GaugeState::new();
        assert_eq!(state.inner_radius(100.0), 50.0);
        state.set_value_width_percent(25.0);
        assert_eq!(state.inner_radius(100.0), 75.0);
    }
}
