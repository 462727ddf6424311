//! Linemorph animates line-segment logotypes.
//!
//! A logotype is supplied as polylines/polygons ([`Shape`]), decomposed by
//! [`SegmentBuilder`] into one line segment per edge, each with a continuous
//! stroke-width oscillation. Two segment groups form a pair managed by
//! [`PairAnimator`], which alternates the visible group on a periodic timer or
//! an external trigger, dissolving or morphing one group into the other.
//!
//! The key design constraints:
//!
//! - **No drawing**: all visual output goes through the narrow [`Renderer`]
//!   capability trait; [`NullRenderer`] runs the logic headless.
//! - **No clocks, no frame scheduling**: time arrives as `advance(dt)` calls
//!   from the host's frame driver.
//! - **Deterministic under a seeded RNG**: every random decision (oscillation
//!   rolls, stagger delays, morph pairing, strategy choice) is taken from an
//!   injected [`rand::Rng`] source.
//!
//! ```
//! use linemorph::{NullRenderer, PairAnimator, PairConfig, SegmentBuilder, Shape};
//! use rand::{SeedableRng, rngs::StdRng};
//!
//! let mut renderer = NullRenderer::new();
//! let mut builder = SegmentBuilder::new(StdRng::seed_from_u64(1));
//!
//! let head = builder.build(
//!     "head",
//!     &Shape::closed(vec![0.0, 0.0, 40.0, 0.0, 20.0, 30.0]),
//!     &mut renderer,
//! )?;
//! let name = builder.build("name", &Shape::open(vec![0.0, 40.0, 60.0, 40.0]), &mut renderer)?;
//!
//! let mut pair =
//!     PairAnimator::start(head, name, PairConfig::default(), StdRng::seed_from_u64(2), &mut renderer)?;
//! pair.trigger(&mut renderer);
//! for _ in 0..120 {
//!     pair.advance(1.0 / 60.0, &mut renderer);
//! }
//! # Ok::<(), linemorph::LinemorphError>(())
//! ```
#![forbid(unsafe_code)]

pub mod animator;
pub mod builder;
pub mod core;
pub mod error;
pub mod render;
pub mod scheduler;
pub mod segment;
pub mod shape;
pub mod trail;
pub mod transition;

pub use animator::{PairAnimator, PairConfig, TransitionChoice};
pub use builder::SegmentBuilder;
pub use crate::core::{DrawableId, Endpoints, Point, Vec2};
pub use error::{LinemorphError, LinemorphResult};
pub use render::{NullRenderer, Renderer};
pub use scheduler::Scheduler;
pub use segment::{Group, OscillationSpec, Segment};
pub use shape::Shape;
pub use trail::{GlyphPlacement, TrailWriter};
pub use transition::{Progress, Transition, TransitionKind};
