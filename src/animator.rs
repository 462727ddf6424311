use rand::Rng;

use crate::{
    error::{LinemorphError, LinemorphResult},
    render::Renderer,
    scheduler::Scheduler,
    segment::Group,
    transition::{Progress, Transition, TransitionKind},
};

/// Transition selection policy for the pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum TransitionChoice {
    /// Always use the same kind.
    Fixed(TransitionKind),
    /// Pick stagger or morph with equal probability per transition.
    Random,
}

/// Timing and selection parameters for a [`PairAnimator`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PairConfig {
    /// Seconds between a completed transition and the next automatic one.
    pub swap_period_secs: f64,
    /// Upper bound for each segment's random hide/reveal delay.
    pub stagger_spread_secs: f64,
    /// Length of the morph interpolation.
    pub morph_duration_secs: f64,
    pub transition: TransitionChoice,
}

impl Default for PairConfig {
    fn default() -> Self {
        Self {
            swap_period_secs: 10.0,
            stagger_spread_secs: 0.5,
            morph_duration_secs: 0.5,
            transition: TransitionChoice::Random,
        }
    }
}

impl PairConfig {
    pub fn validate(&self) -> LinemorphResult<()> {
        if !(self.swap_period_secs.is_finite() && self.swap_period_secs > 0.0) {
            return Err(LinemorphError::validation(
                "swap_period_secs must be finite and > 0",
            ));
        }
        if !(self.stagger_spread_secs.is_finite() && self.stagger_spread_secs > 0.0) {
            return Err(LinemorphError::validation(
                "stagger_spread_secs must be finite and > 0",
            ));
        }
        if !(self.morph_duration_secs.is_finite() && self.morph_duration_secs > 0.0) {
            return Err(LinemorphError::validation(
                "morph_duration_secs must be finite and > 0",
            ));
        }
        Ok(())
    }
}

/// Owns the two groups of a pair and alternates which one is visible.
///
/// Transitions begin on a periodic timer or an explicit [`trigger`] (a
/// pointer click, typically). The pending timer is the only thing a trigger
/// cancels: transitions already in flight always run to completion, and a
/// trigger during one simply starts another. Overlapping transitions are
/// allowed and never block each other.
///
/// [`trigger`]: PairAnimator::trigger
pub struct PairAnimator<R: Rng> {
    groups: [Group; 2],
    front: usize,
    timer: Scheduler,
    in_flight: Vec<Transition>,
    config: PairConfig,
    rng: R,
    running: bool,
}

impl<R: Rng> PairAnimator<R> {
    /// Take ownership of the pair and begin alternating.
    ///
    /// The last-declared member is shown first: `group_b` starts as the
    /// foreground and every segment of `group_a` is hidden immediately. The
    /// first automatic transition fires one full swap period later.
    #[tracing::instrument(skip_all, fields(a = %group_a.name, b = %group_b.name))]
    pub fn start(
        group_a: Group,
        group_b: Group,
        config: PairConfig,
        rng: R,
        renderer: &mut dyn Renderer,
    ) -> LinemorphResult<Self> {
        config.validate()?;

        let mut groups = [group_a, group_b];
        groups[0].set_all_hidden(true, renderer);

        let mut timer = Scheduler::new();
        timer.schedule_in(config.swap_period_secs);

        Ok(Self {
            groups,
            front: 1,
            timer,
            in_flight: Vec::new(),
            config,
            rng,
            running: true,
        })
    }

    /// Begin a transition now, cancelling the pending automatic one.
    ///
    /// The periodic timer is re-armed only once the new transition's strategy
    /// has completed. No-op after [`stop`](PairAnimator::stop).
    #[tracing::instrument(skip_all)]
    pub fn trigger(&mut self, renderer: &mut dyn Renderer) {
        if !self.running {
            return;
        }
        self.timer.cancel();
        self.begin_transition(renderer);
    }

    /// Advance all pair state by `dt` seconds.
    ///
    /// Ticks the swap timer, drives every in-flight transition, and re-arms
    /// the timer one full period after a transition completes.
    pub fn advance(&mut self, dt: f64, renderer: &mut dyn Renderer) {
        let fired = self.timer.tick(dt);

        let mut completed = 0usize;
        let Self {
            groups, in_flight, ..
        } = self;
        in_flight.retain_mut(|transition| {
            match transition.advance(dt, groups, renderer) {
                Progress::Done => {
                    completed += 1;
                    false
                }
                Progress::Continue => true,
            }
        });

        if completed > 0 {
            tracing::debug!(completed, front = %self.groups[self.front].name, "transition finished");
            if self.running {
                self.timer.schedule_in(self.config.swap_period_secs);
            }
        }

        if fired {
            self.begin_transition(renderer);
        }
    }

    /// Cancel the periodic timer and stop starting new transitions.
    ///
    /// In-flight transitions still run to completion on later `advance`
    /// calls; they are never aborted.
    pub fn stop(&mut self) {
        self.running = false;
        self.timer.cancel();
    }

    /// The group that is (or is becoming) visible.
    pub fn foreground(&self) -> &Group {
        &self.groups[self.front]
    }

    pub fn background(&self) -> &Group {
        &self.groups[1 - self.front]
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_transitioning(&self) -> bool {
        !self.in_flight.is_empty()
    }

    pub fn active_transitions(&self) -> usize {
        self.in_flight.len()
    }

    /// The swap timer; pending only between transitions while running.
    pub fn scheduler(&self) -> &Scheduler {
        &self.timer
    }

    fn begin_transition(&mut self, renderer: &mut dyn Renderer) {
        let outgoing = self.front;
        let incoming = 1 - self.front;

        let kind = match self.config.transition {
            TransitionChoice::Fixed(kind) => kind,
            TransitionChoice::Random => {
                if self.rng.random_bool(0.5) {
                    TransitionKind::Morph
                } else {
                    TransitionKind::Stagger
                }
            }
        };

        let transition = match kind {
            TransitionKind::Stagger => Transition::stagger(
                &self.groups,
                outgoing,
                incoming,
                self.config.stagger_spread_secs,
                &mut self.rng,
            ),
            TransitionKind::Morph => Transition::morph(
                &mut self.groups,
                outgoing,
                incoming,
                self.config.morph_duration_secs,
                self.config.stagger_spread_secs,
                &mut self.rng,
                renderer,
            ),
        };

        tracing::debug!(
            kind = ?transition.kind(),
            from = %self.groups[outgoing].name,
            to = %self.groups[incoming].name,
            "transition started"
        );

        self.front = incoming;
        self.in_flight.push(transition);
    }
}
