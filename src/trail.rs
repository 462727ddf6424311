use rand::Rng;

use crate::core::Point;

/// One glyph to stamp onto the trail canvas.
///
/// `anchor` is the pen position the glyph starts at and `angle_rad` points
/// toward the pointer; the host translates/rotates its canvas accordingly.
#[derive(Clone, Copy, Debug, serde::Serialize)]
pub struct GlyphPlacement {
    pub ch: char,
    pub anchor: Point,
    pub angle_rad: f64,
    pub font_px: f64,
    pub alpha: f64,
}

/// Walks a repeating text along the pointer path, one glyph at a time.
///
/// The pen trails the pointer: nothing is emitted until the pointer has moved
/// further from the pen than the next glyph's advance width, then the glyph
/// is placed at the pen, the pen steps by exactly that advance toward the
/// pointer, and the text index wraps around. Faster pointer movement means a
/// larger gap, which scales the font up (`5 + d/2` px).
///
/// Glyph metrics stay with the host: `advance` takes a measure callback so
/// this type never touches a font stack.
#[derive(Clone, Debug)]
pub struct TrailWriter {
    chars: Vec<char>,
    pen: Point,
    index: usize,
}

impl TrailWriter {
    pub fn new(text: impl Into<String>, start: Point) -> Self {
        Self {
            chars: text.into().chars().collect(),
            pen: start,
            index: 0,
        }
    }

    /// Current pen position.
    pub fn pen(&self) -> Point {
        self.pen
    }

    /// Feed one pointer sample; emits at most one glyph.
    pub fn advance(
        &mut self,
        pointer: Point,
        rng: &mut impl Rng,
        measure: &mut dyn FnMut(char, f64) -> f64,
    ) -> Option<GlyphPlacement> {
        let ch = *self.chars.get(self.index)?;

        let d = self.pen.distance(pointer);
        let font_px = 5.0 + d / 2.0;
        let advance_px = measure(ch, font_px);
        if d <= advance_px {
            return None;
        }

        let angle_rad = (pointer.y - self.pen.y).atan2(pointer.x - self.pen.x);
        let placement = GlyphPlacement {
            ch,
            anchor: self.pen,
            angle_rad,
            font_px,
            alpha: rng.random_range(0.2..0.5),
        };

        self.index = (self.index + 1) % self.chars.len();
        self.pen.x += angle_rad.cos() * advance_px;
        self.pen.y += angle_rad.sin() * advance_px;

        Some(placement)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn fixed_width(width: f64) -> impl FnMut(char, f64) -> f64 {
        move |_, _| width
    }

    #[test]
    fn close_pointer_emits_nothing() {
        let mut writer = TrailWriter::new("ab", Point::new(0.0, 0.0));
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut measure = fixed_width(10.0);

        assert!(
            writer
                .advance(Point::new(5.0, 0.0), &mut rng, &mut measure)
                .is_none()
        );
        assert_eq!(writer.pen(), Point::new(0.0, 0.0));
    }

    #[test]
    fn glyph_is_placed_at_pen_and_pen_steps_by_advance() {
        let mut writer = TrailWriter::new("ab", Point::new(0.0, 0.0));
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut measure = fixed_width(10.0);

        let glyph = writer
            .advance(Point::new(40.0, 0.0), &mut rng, &mut measure)
            .unwrap();

        assert_eq!(glyph.ch, 'a');
        assert_eq!(glyph.anchor, Point::new(0.0, 0.0));
        assert_eq!(glyph.angle_rad, 0.0);
        assert_eq!(glyph.font_px, 5.0 + 40.0 / 2.0);
        assert!((0.2..0.5).contains(&glyph.alpha));
        assert_eq!(writer.pen(), Point::new(10.0, 0.0));
    }

    #[test]
    fn text_index_wraps() {
        let mut writer = TrailWriter::new("ab", Point::new(0.0, 0.0));
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut measure = fixed_width(10.0);

        let pointer = Point::new(400.0, 0.0);
        let a = writer.advance(pointer, &mut rng, &mut measure).unwrap();
        let b = writer.advance(pointer, &mut rng, &mut measure).unwrap();
        let again = writer.advance(pointer, &mut rng, &mut measure).unwrap();

        assert_eq!((a.ch, b.ch, again.ch), ('a', 'b', 'a'));
    }

    #[test]
    fn empty_text_never_emits() {
        let mut writer = TrailWriter::new("", Point::new(0.0, 0.0));
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut measure = fixed_width(1.0);

        assert!(
            writer
                .advance(Point::new(100.0, 0.0), &mut rng, &mut measure)
                .is_none()
        );
    }

    #[test]
    fn font_scales_with_pointer_distance() {
        let mut writer = TrailWriter::new("xx", Point::new(0.0, 0.0));
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut measure = fixed_width(5.0);

        let near = writer
            .advance(Point::new(20.0, 0.0), &mut rng, &mut measure)
            .unwrap();
        let far = writer
            .advance(Point::new(200.0, 0.0), &mut rng, &mut measure)
            .unwrap();
        assert!(far.font_px > near.font_px);
    }
}
