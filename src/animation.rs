use std::time::Duration;

use bevy::prelude::*;

use crate::AppSystems;

pub(super) fn plugin(app: &mut App) {
    app.init_asset::<TransitionCurve>()
        .add_systems(Update, tick_transitions.in_set(AppSystems::TickTimers));
}

/// Static timing data for a [`Transition`]: how long the eased movement takes,
/// how long to wait before starting it, and the shape of the easing.
#[derive(Asset, Reflect)]
pub struct TransitionCurve {
    pub duration: Duration,
    pub delay: Duration,
    pub easing: EaseFunction,
}

impl TransitionCurve {
    pub fn from_millis(duration_millis: u64, easing: EaseFunction) -> Self {
        Self {
            duration: Duration::from_millis(duration_millis),
            delay: Duration::ZERO,
            easing,
        }
    }

    pub fn with_delay_millis(mut self, delay_millis: u64) -> Self {
        self.delay = Duration::from_millis(delay_millis);
        self
    }
}

/// Drives an entity's [`TransitionState`] toward `target` along `curve`.
///
/// Changing `target` restarts the curve's start delay; the movement then
/// proceeds from wherever the previous movement left off, so reversing
/// mid-flight does not snap.
#[derive(Component, Reflect)]
#[reflect(Component)]
#[require(TransitionState)]
pub struct Transition {
    pub curve: Handle<TransitionCurve>,
    pub target: f32,
}

impl From<Handle<TransitionCurve>> for Transition {
    fn from(curve: Handle<TransitionCurve>) -> Self {
        Self { curve, target: 0.0 }
    }
}

#[derive(Component, Reflect, Default)]
#[reflect(Component)]
pub struct TransitionState {
    progress: f32,
    eased: f32,
    delay: Option<Timer>,
}

impl TransitionState {
    /// The eased value in `0.0..=1.0` that visual systems consume.
    pub fn eased(&self) -> f32 {
        self.eased
    }

    fn restart_delay(&mut self, curve: &TransitionCurve) {
        self.delay = (!curve.delay.is_zero()).then(|| Timer::new(curve.delay, TimerMode::Once));
    }

    /// Advances toward `target` by `delta`, consuming the start delay first.
    /// Returns whether the eased value moved.
    fn advance(&mut self, curve: &TransitionCurve, target: f32, delta: Duration) -> bool {
        if let Some(delay) = self.delay.as_mut() {
            if !delay.tick(delta).is_finished() {
                return false;
            }
            // The delaying frame is consumed whole; movement starts next tick.
            self.delay = None;
            return false;
        }

        if self.progress == target {
            return false;
        }

        let step = delta.as_secs_f32() / curve.duration.as_secs_f32().max(f32::EPSILON);
        self.progress = if target > self.progress {
            (self.progress + step).min(target)
        } else {
            (self.progress - step).max(target)
        };
        self.eased = EasingCurve::new(0.0, 1.0, curve.easing).sample_clamped(self.progress);
        true
    }
}

fn tick_transitions(
    time: Res<Time>,
    curves: Res<Assets<TransitionCurve>>,
    mut transitions: Query<(Ref<Transition>, &mut TransitionState)>,
) {
    for (transition, mut state) in &mut transitions {
        let Some(curve) = curves.get(&transition.curve) else {
            continue;
        };

        if transition.is_changed() && !transition.is_added() {
            state.bypass_change_detection().restart_delay(curve);
        }

        if state
            .bypass_change_detection()
            .advance(curve, transition.target, time.delta())
        {
            state.set_changed();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn curve(duration_millis: u64, delay_millis: u64) -> TransitionCurve {
        TransitionCurve::from_millis(duration_millis, EaseFunction::CubicOut)
            .with_delay_millis(delay_millis)
    }

    fn step(state: &mut TransitionState, curve: &TransitionCurve, target: f32, millis: u64) -> bool {
        state.advance(curve, target, Duration::from_millis(millis))
    }

    #[test]
    fn rests_at_target() {
        let curve = curve(650, 0);
        let mut state = TransitionState::default();

        assert!(!step(&mut state, &curve, 0.0, 100));
        assert_eq!(state.eased(), 0.0);
    }

    #[test]
    fn reaches_target_and_stops() {
        let curve = curve(650, 0);
        let mut state = TransitionState::default();

        assert!(step(&mut state, &curve, 1.0, 325));
        assert!(state.eased() > 0.0);
        assert!(state.eased() < 1.0);

        assert!(step(&mut state, &curve, 1.0, 400));
        assert_eq!(state.progress, 1.0);
        assert_eq!(state.eased(), 1.0);

        // Settled; further time does nothing.
        assert!(!step(&mut state, &curve, 1.0, 100));
    }

    #[test]
    fn delay_is_consumed_before_movement() {
        let curve = curve(650, 120);
        let mut state = TransitionState::default();
        state.restart_delay(&curve);

        assert!(!step(&mut state, &curve, 1.0, 100));
        assert!(!step(&mut state, &curve, 1.0, 100));
        assert_eq!(state.eased(), 0.0);

        assert!(step(&mut state, &curve, 1.0, 100));
        assert!(state.eased() > 0.0);
    }

    #[test]
    fn reversing_resumes_from_current_progress() {
        let curve = curve(1000, 0);
        let mut state = TransitionState::default();

        step(&mut state, &curve, 1.0, 600);
        assert_eq!(state.progress, 0.6);

        step(&mut state, &curve, 0.0, 100);
        assert!((state.progress - 0.5).abs() < 1e-6);

        step(&mut state, &curve, 0.0, 1000);
        assert_eq!(state.progress, 0.0);
        assert_eq!(state.eased(), 0.0);
    }

    #[test]
    fn eased_value_stays_in_unit_range() {
        let curve = curve(100, 0);
        let mut state = TransitionState::default();

        for _ in 0..20 {
            step(&mut state, &curve, 1.0, 17);
            assert!((0.0..=1.0).contains(&state.eased()));
        }
        assert_eq!(state.eased(), 1.0);
    }
}
