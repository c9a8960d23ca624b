#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.left + self.right) / 2.0,
            (self.top + self.bottom) / 2.0,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GeometryFrame {
    pub bounding_box: Rect,
    pub diameter: f64,
    pub center: Point,
}

impl GeometryFrame {
    pub fn from_size(size: Size) -> Self {
        let diameter = size.width.min(size.height).max(0.0);
        let center = size.center();
        let half = diameter / 2.0;

        Self {
            bounding_box: Rect::new(
                center.x - half,
                center.y - half,
                center.x + half,
                center.y + half,
            ),
            diameter,
            center,
        }
    }

    pub fn radius(&self) -> f64 {
        self.diameter / 2.0
    }
}

/// Angle of `point` around `center` in [0, 360), 0° north and clockwise.
/// A point on the center yields 0.
pub fn angle_for_point(point: Point, center: Point) -> f64 {
    let (tx, ty) = (point.x - center.x, point.y - center.y);
    let length = tx.hypot(ty);
    if length == 0.0 || !length.is_finite() {
        return 0.0;
    }

    // acos of the vertical component measures from south; mirror the right half
    let mut angle = (ty / length).clamp(-1.0, 1.0).acos().to_degrees();
    if point.x > center.x {
        angle = 360.0 - angle;
    }

    let angle = (angle + 180.0).rem_euclid(360.0);
    // rem_euclid can round a tiny negative up to exactly 360
    if angle >= 360.0 { 0.0 } else { angle }
}

pub fn angle_for_value(value: f64, max_value: f64) -> f64 {
    let angle = value / max_value * 360.0;
    if angle.is_finite() { angle } else { 0.0 }
}

pub fn value_for_angle(angle: f64, max_value: f64) -> f64 {
    let value = angle / 360.0 * max_value;
    if value.is_finite() { value } else { 0.0 }
}

pub fn distance_to_center(point: Point, center: Point) -> f64 {
    let (dx, dy) = (point.x - center.x, point.y - center.y);
    dx.hypot(dy)
}
