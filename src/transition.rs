//! Eased blending from one color space layout to another.

use std::time::Duration;

use crate::{color::ColorSpace, math::ease_in_out_cubic, Component};

/// Whether a transition is running.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// `blend` is 1 and the layout rests on `to`.
    Idle,
    /// `blend` is ramping from 0 to 1.
    Animating,
}

/// The pair of layouts being blended and how far along the blend is.
///
/// Every consumer that positions geometry reads the same value; there is no
/// per-consumer copy of the spaces or the blend.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransitionState {
    from: ColorSpace,
    to: ColorSpace,
    blend: Component,
    elapsed: Duration,
    duration: Duration,
    phase: Phase,
}

impl Default for TransitionState {
    fn default() -> Self {
        Self::new(ColorSpace::Rgb, Self::DEFAULT_DURATION)
    }
}

impl TransitionState {
    /// Duration of a transition when nothing else is configured.
    pub const DEFAULT_DURATION: Duration = Duration::from_millis(1500);

    /// Create an idle state resting on `space`.
    pub fn new(space: ColorSpace, duration: Duration) -> Self {
        Self {
            from: space,
            to: space,
            blend: 1.0,
            elapsed: Duration::ZERO,
            duration,
            phase: Phase::Idle,
        }
    }

    /// The space being blended away from.
    pub fn from(&self) -> ColorSpace {
        self.from
    }

    /// The space being blended towards.
    pub fn to(&self) -> ColorSpace {
        self.to
    }

    /// The eased blend factor in [0..1].
    pub fn blend(&self) -> Component {
        self.blend
    }

    /// The current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Shorthand for `phase() == Phase::Animating`.
    pub fn is_animating(&self) -> bool {
        self.phase == Phase::Animating
    }

    /// Length of a full transition.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Change the length of transitions, including one that is running.
    pub fn set_duration(&mut self, duration: Duration) {
        self.duration = duration;
    }

    /// Start blending from the current target towards `target`. A transition
    /// that is already running is abandoned.
    pub fn start_transition(&mut self, target: ColorSpace) {
        tracing::debug!(from = ?self.to, to = ?target, "starting transition");
        self.from = self.to;
        self.to = target;
        self.blend = 0.0;
        self.elapsed = Duration::ZERO;
        self.phase = Phase::Animating;
    }

    /// Advance a running transition by `dt` and return the new blend.
    pub fn tick(&mut self, dt: Duration) -> Component {
        if self.phase == Phase::Idle {
            return self.blend;
        }

        self.elapsed += dt;
        let t: Component = if self.duration.is_zero() {
            1.0
        } else {
            let t = self.elapsed.as_secs_f64() / self.duration.as_secs_f64();
            t.clamp(0.0, 1.0) as Component
        };

        if t >= 1.0 {
            self.blend = 1.0;
            self.phase = Phase::Idle;
        } else {
            self.blend = ease_in_out_cubic(t);
        }

        self.blend
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_component_eq;

    #[test]
    fn default_rests_on_rgb() {
        let state = TransitionState::default();
        assert_eq!(state.from(), ColorSpace::Rgb);
        assert_eq!(state.to(), ColorSpace::Rgb);
        assert_eq!(state.blend(), 1.0);
        assert_eq!(state.phase(), Phase::Idle);
        assert_eq!(state.duration(), Duration::from_millis(1500));
    }

    #[test]
    fn blend_follows_the_eased_curve() {
        let mut state = TransitionState::new(ColorSpace::Rgb, Duration::from_secs(2));
        state.start_transition(ColorSpace::CieLab);
        assert!(state.is_animating());
        assert_eq!(state.from(), ColorSpace::Rgb);
        assert_eq!(state.to(), ColorSpace::CieLab);
        assert_eq!(state.blend(), 0.0);

        assert_component_eq!(state.tick(Duration::from_millis(500)), 0.0625);
        assert_component_eq!(state.tick(Duration::from_millis(500)), 0.5);
        assert_component_eq!(state.tick(Duration::from_millis(500)), 0.9375);
        assert!(state.is_animating());

        assert_eq!(state.tick(Duration::from_millis(600)), 1.0);
        assert_eq!(state.phase(), Phase::Idle);
    }

    #[test]
    fn idle_ticks_change_nothing() {
        let mut state = TransitionState::default();
        assert_eq!(state.tick(Duration::from_secs(3)), 1.0);
        assert_eq!(state.phase(), Phase::Idle);
    }

    #[test]
    fn a_new_start_preempts_the_running_one() {
        let mut state = TransitionState::new(ColorSpace::Rgb, Duration::from_secs(1));
        state.start_transition(ColorSpace::Oklab);
        state.tick(Duration::from_millis(300));

        state.start_transition(ColorSpace::CieLuv);
        assert_eq!(state.from(), ColorSpace::Oklab);
        assert_eq!(state.to(), ColorSpace::CieLuv);
        assert_eq!(state.blend(), 0.0);
        assert!(state.is_animating());

        assert_component_eq!(state.tick(Duration::from_millis(500)), 0.5);
    }

    #[test]
    fn zero_duration_completes_on_the_next_tick() {
        let mut state = TransitionState::new(ColorSpace::CieXyz, Duration::ZERO);
        state.start_transition(ColorSpace::Rgb);
        assert!(state.is_animating());
        assert_eq!(state.tick(Duration::ZERO), 1.0);
        assert_eq!(state.phase(), Phase::Idle);
    }
}
