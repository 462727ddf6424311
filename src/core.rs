pub use kurbo::{Point, Vec2};

/// Opaque handle to a drawable owned by the rendering backend.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct DrawableId(pub u64);

/// The four endpoint coordinates of a line drawable.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Endpoints {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl Endpoints {
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    pub fn from_points(a: Point, b: Point) -> Self {
        Self {
            x1: a.x,
            y1: a.y,
            x2: b.x,
            y2: b.y,
        }
    }

    pub fn start(self) -> Point {
        Point::new(self.x1, self.y1)
    }

    pub fn end(self) -> Point {
        Point::new(self.x2, self.y2)
    }

    pub fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Self {
            x1: a.x1 + (b.x1 - a.x1) * t,
            y1: a.y1 + (b.y1 - a.y1) * t,
            x2: a.x2 + (b.x2 - a.x2) * t,
            y2: a.y2 + (b.y2 - a.y2) * t,
        }
    }
}
