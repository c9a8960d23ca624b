pub mod advisory;
pub mod animation;
pub mod config;
pub mod display;
pub mod geometry;
pub mod interaction;
pub mod model;
pub mod options;
pub mod protocol;
pub mod render;

pub use advisory::Advisory;
pub use animation::{AnimationController, AnimationRun, Easing, TickOutcome};
pub use display::{Action, CircleDisplay, Host};
pub use geometry::{GeometryFrame, Point, Rect, Size};
pub use interaction::{PointerAction, PointerEvent, SelectionListener};
pub use options::{DisplayOptions, PaintRole, Style, Unit, ValueFormat};
pub use render::{Surface, TextStyle};
