use rand::Rng;

use crate::{
    core::{DrawableId, Endpoints},
    error::{LinemorphError, LinemorphResult},
    render::Renderer,
};

/// Continuous back-and-forth stroke-width animation attached to one segment.
///
/// Rolled once at build time, independently per segment, and never cancelled.
/// The uneven per-segment parameters are what give a group its shimmer.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct OscillationSpec {
    pub from_width: f64,
    pub to_width: f64,
    pub duration_secs: f64,
}

impl OscillationSpec {
    /// Roll a fresh spec: width 2..4 growing by 1..3, over 2..4 seconds.
    pub fn roll(rng: &mut impl Rng) -> Self {
        let from_width = rng.random_range(2.0..4.0);
        Self {
            from_width,
            to_width: from_width + rng.random_range(1.0..3.0),
            duration_secs: rng.random_range(2.0..4.0),
        }
    }

    pub fn validate(&self) -> LinemorphResult<()> {
        if self.from_width >= self.to_width {
            return Err(LinemorphError::animation(
                "oscillation from_width must be < to_width",
            ));
        }
        if self.duration_secs <= 0.0 {
            return Err(LinemorphError::animation(
                "oscillation duration_secs must be > 0",
            ));
        }
        Ok(())
    }

    /// Sample the stroke width at `elapsed_secs` since the oscillation began.
    ///
    /// Triangle wave: `from_width` at 0, `to_width` at `duration_secs`, back
    /// to `from_width` at twice the duration, repeating indefinitely. Lets a
    /// backend without a native indefinite-repeat animation primitive honor
    /// [`Renderer::start_oscillation`] by sampling per frame.
    pub fn width_at(&self, elapsed_secs: f64) -> f64 {
        let period = 2.0 * self.duration_secs;
        let phase = elapsed_secs.rem_euclid(period);
        let t = if phase < self.duration_secs {
            phase / self.duration_secs
        } else {
            (period - phase) / self.duration_secs
        };
        self.from_width + (self.to_width - self.from_width) * t
    }
}

/// One line primitive derived from a shape edge.
///
/// Created once at build time; morph transitions drag `endpoints` around, but
/// a segment rests at `home` whenever it is hidden, so the drawable handle,
/// home position and oscillation stay fixed for the segment's lifetime.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Segment {
    pub drawable: DrawableId,
    pub endpoints: Endpoints,
    /// Build-time position; hidden movers settle back here after a morph.
    pub home: Endpoints,
    pub oscillation: OscillationSpec,
    pub hidden: bool,
}

/// Named ordered collection of segments; two groups form the animated pair.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Group {
    pub name: String,
    pub segments: Vec<Segment>,
}

impl Group {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            segments: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Flip every segment's visibility, mirroring the change to the renderer.
    pub fn set_all_hidden(&mut self, hidden: bool, renderer: &mut dyn Renderer) {
        for segment in &mut self.segments {
            segment.hidden = hidden;
            renderer.set_hidden(segment.drawable, hidden);
        }
    }
}
