use crate::{
    core::{DrawableId, Endpoints},
    error::{LinemorphError, LinemorphResult},
};

/// A polyline (open) or polygon (closed) sourced from static markup.
///
/// Coordinates are a flat `x0,y0,x1,y1,…` list in source order. A shape may
/// carry the handle of the original drawable it was read from; the builder
/// consumes that marker when the shape is decomposed into segments.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Shape {
    pub points: Vec<f64>,
    pub closed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marker: Option<DrawableId>,
}

impl Shape {
    /// A polyline: edges connect consecutive points, ends stay apart.
    pub fn open(points: Vec<f64>) -> Self {
        Self {
            points,
            closed: false,
            marker: None,
        }
    }

    /// A polygon: an extra edge closes the last point back to the first.
    pub fn closed(points: Vec<f64>) -> Self {
        Self {
            points,
            closed: true,
            marker: None,
        }
    }

    /// Attach the handle of the source drawable this shape was read from.
    pub fn with_marker(mut self, marker: DrawableId) -> Self {
        self.marker = Some(marker);
        self
    }

    pub fn point_count(&self) -> usize {
        self.points.len() / 2
    }

    pub fn validate(&self) -> LinemorphResult<()> {
        if self.points.len() % 2 != 0 {
            return Err(LinemorphError::malformed_shape(format!(
                "coordinate list has odd length {}",
                self.points.len()
            )));
        }
        if self.points.len() < 4 {
            return Err(LinemorphError::malformed_shape(format!(
                "need at least 2 points, got {}",
                self.point_count()
            )));
        }
        Ok(())
    }

    /// Decompose into one edge per consecutive point pair, in source order.
    ///
    /// Closed shapes are made cyclic first, so the closing edge is emitted and
    /// an n-point polygon yields n edges (a polyline yields n-1).
    pub fn edges(&self) -> LinemorphResult<Vec<Endpoints>> {
        self.validate()?;

        let mut coords = self.points.clone();
        if self.closed {
            coords.push(self.points[0]);
            coords.push(self.points[1]);
        }

        let edges = coords
            .windows(4)
            .step_by(2)
            .map(|w| Endpoints::new(w[0], w[1], w[2], w[3]))
            .collect();
        Ok(edges)
    }
}
