use rand::Rng;

use crate::{core::Endpoints, render::Renderer, segment::Group};

/// How one group is exchanged for the other.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum TransitionKind {
    /// Hide and reveal each segment after an independent random delay.
    Stagger,
    /// Fly segments of the larger group onto partners in the smaller one.
    Morph,
}

/// Outcome of one `advance` step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Progress {
    Continue,
    Done,
}

#[derive(Clone, Copy, Debug)]
struct FadeJob {
    group: usize,
    index: usize,
    at: f64,
    hidden: bool,
}

#[derive(Clone, Copy, Debug)]
struct MorphJob {
    group: usize,
    index: usize,
    from: Endpoints,
    to: Endpoints,
    end_hide: Option<(usize, usize)>,
    end_show: Option<(usize, usize)>,
    // where to leave the mover once it is hidden again
    settle: Option<Endpoints>,
}

/// One in-flight exchange between the two groups of a pair.
///
/// Created by [`PairAnimator`](crate::PairAnimator) and driven by `advance`
/// calls; once started it always runs to completion. Several transitions may
/// be in flight at once and never block each other.
#[derive(Clone, Debug)]
pub struct Transition {
    kind: TransitionKind,
    elapsed: f64,
    fades: Vec<FadeJob>,
    morphs: Vec<MorphJob>,
    morph_duration_secs: f64,
    morph_done: bool,
}

impl Transition {
    /// Dissolve: every outgoing segment hides and every incoming segment
    /// reveals after its own random delay in `[0, spread_secs)`. No ordering
    /// is guaranteed across segments.
    pub(crate) fn stagger(
        groups: &[Group; 2],
        outgoing: usize,
        incoming: usize,
        spread_secs: f64,
        rng: &mut impl Rng,
    ) -> Self {
        let mut fades =
            Vec::with_capacity(groups[outgoing].len() + groups[incoming].len());
        for index in 0..groups[outgoing].len() {
            fades.push(FadeJob {
                group: outgoing,
                index,
                at: rng.random_range(0.0..spread_secs),
                hidden: true,
            });
        }
        for index in 0..groups[incoming].len() {
            fades.push(FadeJob {
                group: incoming,
                index,
                at: rng.random_range(0.0..spread_secs),
                hidden: false,
            });
        }

        Self {
            kind: TransitionKind::Stagger,
            elapsed: 0.0,
            fades,
            morphs: Vec::new(),
            morph_duration_secs: 0.0,
            morph_done: true,
        }
    }

    /// Morph: each segment of the larger group is assigned a uniformly-random
    /// partner in the smaller group (many-to-one allowed) and interpolates
    /// onto it over `duration_secs`. Segments left without a partner fall
    /// back to the stagger behavior.
    pub(crate) fn morph(
        groups: &mut [Group; 2],
        outgoing: usize,
        incoming: usize,
        duration_secs: f64,
        spread_secs: f64,
        rng: &mut impl Rng,
        renderer: &mut dyn Renderer,
    ) -> Self {
        let out_len = groups[outgoing].len();
        let in_len = groups[incoming].len();

        if out_len == 0 || in_len == 0 {
            // nothing to pair up; dissolve whatever is there
            return Self::stagger(groups, outgoing, incoming, spread_secs, rng);
        }

        let mut fades = Vec::new();
        let mut morphs = Vec::new();

        if out_len >= in_len {
            // outgoing segments fly onto a partner in the incoming group and
            // hand visibility over to it on arrival
            let mut chosen = vec![false; in_len];
            for index in 0..out_len {
                let partner = rng.random_range(0..in_len);
                chosen[partner] = true;
                morphs.push(MorphJob {
                    group: outgoing,
                    index,
                    from: groups[outgoing].segments[index].endpoints,
                    to: groups[incoming].segments[partner].home,
                    end_hide: Some((outgoing, index)),
                    end_show: Some((incoming, partner)),
                    settle: Some(groups[outgoing].segments[index].home),
                });
            }
            for (partner, taken) in chosen.iter().enumerate() {
                if !taken {
                    fades.push(FadeJob {
                        group: incoming,
                        index: partner,
                        at: rng.random_range(0.0..spread_secs),
                        hidden: false,
                    });
                }
            }
        } else {
            // incoming segments appear on a partner in the outgoing group and
            // fly home; the partner hides once its mover arrives
            let mut chosen = vec![false; out_len];
            for index in 0..in_len {
                let partner = rng.random_range(0..out_len);
                chosen[partner] = true;
                let home = groups[incoming].segments[index].home;
                let start = groups[outgoing].segments[partner].endpoints;

                let segment = &mut groups[incoming].segments[index];
                segment.endpoints = start;
                segment.hidden = false;
                renderer.set_endpoints(segment.drawable, start);
                renderer.set_hidden(segment.drawable, false);

                morphs.push(MorphJob {
                    group: incoming,
                    index,
                    from: start,
                    to: home,
                    end_hide: Some((outgoing, partner)),
                    end_show: None,
                    settle: None,
                });
            }
            for (partner, taken) in chosen.iter().enumerate() {
                if !taken {
                    fades.push(FadeJob {
                        group: outgoing,
                        index: partner,
                        at: rng.random_range(0.0..spread_secs),
                        hidden: true,
                    });
                }
            }
        }

        Self {
            kind: TransitionKind::Morph,
            elapsed: 0.0,
            fades,
            morphs,
            morph_duration_secs: duration_secs,
            morph_done: false,
        }
    }

    pub fn kind(&self) -> TransitionKind {
        self.kind
    }

    /// Advance by `dt` seconds, applying due visibility flips and moving
    /// morphing segments. Returns [`Progress::Done`] once every job has run.
    ///
    /// At interpolation completion, morphing segments snap to the exact
    /// target coordinates so the visibility handover is seamless; a mover
    /// that ends hidden then settles back at its home position, ready for
    /// the next reveal.
    pub fn advance(
        &mut self,
        dt: f64,
        groups: &mut [Group; 2],
        renderer: &mut dyn Renderer,
    ) -> Progress {
        self.elapsed += dt.max(0.0);

        let elapsed = self.elapsed;
        self.fades.retain(|job| {
            if job.at > elapsed {
                return true;
            }
            let segment = &mut groups[job.group].segments[job.index];
            segment.hidden = job.hidden;
            renderer.set_hidden(segment.drawable, job.hidden);
            false
        });

        if !self.morph_done {
            let t = (self.elapsed / self.morph_duration_secs).min(1.0);
            if t < 1.0 {
                for job in &self.morphs {
                    let segment = &mut groups[job.group].segments[job.index];
                    segment.endpoints = Endpoints::lerp(&job.from, &job.to, t);
                    renderer.set_endpoints(segment.drawable, segment.endpoints);
                }
            } else {
                for job in &self.morphs {
                    let segment = &mut groups[job.group].segments[job.index];
                    segment.endpoints = job.to;
                    renderer.set_endpoints(segment.drawable, segment.endpoints);

                    if let Some((group, index)) = job.end_hide {
                        let partner = &mut groups[group].segments[index];
                        partner.hidden = true;
                        renderer.set_hidden(partner.drawable, true);
                    }
                    if let Some((group, index)) = job.end_show {
                        let partner = &mut groups[group].segments[index];
                        partner.hidden = false;
                        renderer.set_hidden(partner.drawable, false);
                    }
                    if let Some(home) = job.settle {
                        let segment = &mut groups[job.group].segments[job.index];
                        segment.endpoints = home;
                        renderer.set_endpoints(segment.drawable, home);
                    }
                }
                self.morph_done = true;
            }
        }

        if self.fades.is_empty() && self.morph_done {
            Progress::Done
        } else {
            Progress::Continue
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::DrawableId,
        render::NullRenderer,
        segment::{OscillationSpec, Segment},
    };
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    const SPREAD: f64 = 0.5;
    const DURATION: f64 = 0.5;

    fn segment(id: u64, endpoints: Endpoints, hidden: bool) -> Segment {
        Segment {
            drawable: DrawableId(id),
            endpoints,
            home: endpoints,
            oscillation: OscillationSpec {
                from_width: 2.0,
                to_width: 4.0,
                duration_secs: 3.0,
            },
            hidden,
        }
    }

    fn group(name: &str, segments: Vec<Segment>) -> Group {
        let mut g = Group::new(name);
        g.segments = segments;
        g
    }

    #[test]
    fn stagger_settles_within_spread() {
        let mut groups = [
            group(
                "a",
                vec![
                    segment(0, Endpoints::new(0.0, 0.0, 1.0, 0.0), false),
                    segment(1, Endpoints::new(1.0, 0.0, 2.0, 0.0), false),
                ],
            ),
            group(
                "b",
                vec![segment(2, Endpoints::new(5.0, 5.0, 6.0, 5.0), true)],
            ),
        ];
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut renderer = NullRenderer::new();
        let mut transition = Transition::stagger(&groups, 0, 1, SPREAD, &mut rng);

        assert_eq!(transition.kind(), TransitionKind::Stagger);
        assert_eq!(
            transition.advance(0.0, &mut groups, &mut renderer),
            Progress::Continue
        );
        assert_eq!(
            transition.advance(SPREAD, &mut groups, &mut renderer),
            Progress::Done
        );
        assert!(groups[0].segments.iter().all(|s| s.hidden));
        assert!(groups[1].segments.iter().all(|s| !s.hidden));
    }

    #[derive(Clone, Copy, Debug, PartialEq)]
    enum Event {
        Moved(u64, Endpoints),
        Visible(u64, bool),
    }

    /// Keeps the exact call order a real backend would see.
    #[derive(Default)]
    struct EventRenderer {
        events: Vec<Event>,
    }

    impl Renderer for EventRenderer {
        fn create_segment(&mut self, _endpoints: Endpoints) -> DrawableId {
            DrawableId(0)
        }

        fn set_endpoints(&mut self, id: DrawableId, endpoints: Endpoints) {
            self.events.push(Event::Moved(id.0, endpoints));
        }

        fn set_hidden(&mut self, id: DrawableId, hidden: bool) {
            self.events.push(Event::Visible(id.0, !hidden));
        }

        fn remove(&mut self, _id: DrawableId) {}

        fn start_oscillation(&mut self, _id: DrawableId, _spec: OscillationSpec) {}
    }

    #[test]
    fn morph_snaps_exactly_to_target_before_handover() {
        let home = Endpoints::new(0.0, 0.0, 10.0, 0.0);
        let target = Endpoints::new(20.0, 20.0, 30.0, 20.0);
        let mut groups = [
            group("a", vec![segment(0, home, false)]),
            group("b", vec![segment(1, target, true)]),
        ];
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let mut renderer = EventRenderer::default();
        let mut transition = Transition::morph(
            &mut groups,
            0,
            1,
            DURATION,
            SPREAD,
            &mut rng,
            &mut renderer,
        );

        assert_eq!(
            transition.advance(DURATION / 2.0, &mut groups, &mut renderer),
            Progress::Continue
        );
        assert_eq!(
            groups[0].segments[0].endpoints,
            Endpoints::new(10.0, 10.0, 20.0, 10.0)
        );

        assert_eq!(
            transition.advance(DURATION / 2.0, &mut groups, &mut renderer),
            Progress::Done
        );

        // arrival is exact, the handover swaps visibility, then the hidden
        // mover settles back home
        let tail = &renderer.events[renderer.events.len() - 4..];
        assert_eq!(
            tail,
            &[
                Event::Moved(0, target),
                Event::Visible(0, false),
                Event::Visible(1, true),
                Event::Moved(0, home),
            ]
        );
        assert_eq!(groups[0].segments[0].endpoints, home);
        assert!(groups[0].segments[0].hidden);
        assert!(!groups[1].segments[0].hidden);
    }

    #[test]
    fn morph_many_to_one_converges_on_single_target() {
        let homes = [
            Endpoints::new(0.0, 0.0, 1.0, 0.0),
            Endpoints::new(2.0, 0.0, 3.0, 0.0),
            Endpoints::new(4.0, 0.0, 5.0, 0.0),
        ];
        let target = Endpoints::new(50.0, 50.0, 60.0, 50.0);
        let mut groups = [
            group(
                "a",
                vec![
                    segment(0, homes[0], false),
                    segment(1, homes[1], false),
                    segment(2, homes[2], false),
                ],
            ),
            group("b", vec![segment(3, target, true)]),
        ];
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let mut renderer = NullRenderer::new();
        let mut transition = Transition::morph(
            &mut groups,
            0,
            1,
            DURATION,
            SPREAD,
            &mut rng,
            &mut renderer,
        );

        // the single possible partner means every mover flies at one target
        assert_eq!(
            transition.advance(DURATION / 2.0, &mut groups, &mut renderer),
            Progress::Continue
        );
        for (s, home) in groups[0].segments.iter().zip(homes) {
            assert_eq!(s.endpoints, Endpoints::lerp(&home, &target, 0.5));
        }

        while transition.advance(0.1, &mut groups, &mut renderer) == Progress::Continue {}

        for (s, home) in groups[0].segments.iter().zip(homes) {
            assert_eq!(s.endpoints, home);
            assert!(s.hidden);
        }
        assert!(!groups[1].segments[0].hidden);
    }

    #[test]
    fn morph_into_larger_group_flies_segments_home() {
        let homes = [
            Endpoints::new(10.0, 0.0, 11.0, 0.0),
            Endpoints::new(20.0, 0.0, 21.0, 0.0),
            Endpoints::new(30.0, 0.0, 31.0, 0.0),
        ];
        let mut groups = [
            group(
                "a",
                vec![segment(0, Endpoints::new(0.0, 0.0, 1.0, 0.0), false)],
            ),
            group(
                "b",
                vec![
                    segment(1, homes[0], true),
                    segment(2, homes[1], true),
                    segment(3, homes[2], true),
                ],
            ),
        ];
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut renderer = NullRenderer::new();
        let mut transition = Transition::morph(
            &mut groups,
            0,
            1,
            DURATION,
            SPREAD,
            &mut rng,
            &mut renderer,
        );

        // movers are revealed at their partner's position right away
        assert!(groups[1].segments.iter().all(|s| !s.hidden));

        while transition.advance(0.1, &mut groups, &mut renderer) == Progress::Continue {}

        for (s, home) in groups[1].segments.iter().zip(homes) {
            assert_eq!(s.endpoints, home);
            assert!(!s.hidden);
        }
        assert!(groups[0].segments[0].hidden);
    }

    #[test]
    fn morph_with_empty_partner_group_falls_back_to_stagger() {
        let mut groups = [
            group(
                "a",
                vec![segment(0, Endpoints::new(0.0, 0.0, 1.0, 0.0), false)],
            ),
            group("b", vec![]),
        ];
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut renderer = NullRenderer::new();
        let mut transition = Transition::morph(
            &mut groups,
            0,
            1,
            DURATION,
            SPREAD,
            &mut rng,
            &mut renderer,
        );

        assert_eq!(transition.kind(), TransitionKind::Stagger);
        assert_eq!(
            transition.advance(SPREAD, &mut groups, &mut renderer),
            Progress::Done
        );
        assert!(groups[0].segments[0].hidden);
    }

    #[test]
    fn empty_pair_is_a_noop() {
        let mut groups = [group("a", vec![]), group("b", vec![])];
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut renderer = NullRenderer::new();

        let mut transition = Transition::stagger(&groups, 0, 1, SPREAD, &mut rng);
        assert_eq!(
            transition.advance(0.0, &mut groups, &mut renderer),
            Progress::Done
        );
    }
}
