use rand::Rng;

use crate::{
    error::LinemorphResult,
    render::Renderer,
    segment::{Group, OscillationSpec, Segment},
    shape::Shape,
};

/// Converts shapes into groups of oscillating line segments.
///
/// Owns the random source that rolls each segment's oscillation, so two
/// builders with the same seed produce identical groups.
pub struct SegmentBuilder<R: Rng> {
    rng: R,
}

impl<R: Rng> SegmentBuilder<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Decompose one shape into a group of segments.
    ///
    /// One line drawable is created per edge and its oscillation started
    /// immediately; the shape's source marker, if any, is removed once the
    /// segments replace it. Fails with
    /// [`MalformedShape`](crate::LinemorphError::MalformedShape) when the
    /// coordinate list has odd length or fewer than two points.
    pub fn build(
        &mut self,
        name: &str,
        shape: &Shape,
        renderer: &mut dyn Renderer,
    ) -> LinemorphResult<Group> {
        let mut group = Group::new(name);
        self.append(shape, &mut group, renderer)?;
        Ok(group)
    }

    /// Decompose several shapes into one group.
    ///
    /// A malformed shape is skipped with a warning rather than failing the
    /// whole build; its marker is left untouched.
    #[tracing::instrument(skip(self, shapes, renderer), fields(count = shapes.len()))]
    pub fn build_group(
        &mut self,
        name: &str,
        shapes: &[Shape],
        renderer: &mut dyn Renderer,
    ) -> Group {
        let mut group = Group::new(name);
        for shape in shapes {
            if let Err(err) = self.append(shape, &mut group, renderer) {
                tracing::warn!(group = name, error = %err, "skipping malformed shape");
            }
        }
        group
    }

    fn append(
        &mut self,
        shape: &Shape,
        group: &mut Group,
        renderer: &mut dyn Renderer,
    ) -> LinemorphResult<()> {
        let edges = shape.edges()?;

        for endpoints in edges {
            let drawable = renderer.create_segment(endpoints);
            let oscillation = OscillationSpec::roll(&mut self.rng);
            renderer.start_oscillation(drawable, oscillation);
            group.segments.push(Segment {
                drawable,
                endpoints,
                home: endpoints,
                oscillation,
                hidden: false,
            });
        }

        if let Some(marker) = shape.marker {
            renderer.remove(marker);
        }
        Ok(())
    }
}
