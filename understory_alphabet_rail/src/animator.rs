// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Release halo tween.
//!
//! When a letter is deselected, a translucent disc behind it grows and fades
//! out. Only the most recent deselection is ever shown: starting a run
//! replaces the previous one outright instead of queuing.
//!
//! The animator never schedules itself. The host calls
//! [`ReleaseAnimator::tick`] from its frame loop with the current time in
//! milliseconds while [`ReleaseAnimator::is_active`] is `true`.
//!
//! ```
//! use understory_alphabet_rail::{Letter, ReleaseAnimator, TickOutcome};
//!
//! let mut animator = ReleaseAnimator::new();
//! animator.start(Letter::M, 20.0, 1_000);
//!
//! let TickOutcome::Running(halo) = animator.tick(1_075) else {
//!     panic!("halfway through the run");
//! };
//! assert!((halo.radius - 19.0).abs() < 1e-9);
//! assert_eq!(halo.alpha, 20);
//!
//! assert_eq!(animator.tick(1_150), TickOutcome::Finished(Letter::M));
//! assert!(!animator.is_active());
//! ```

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

use crate::Letter;

/// Length of a release run in milliseconds.
pub const RELEASE_DURATION_MS: u64 = 150;

/// Halo radius at the start of a run, as a fraction of the text size.
pub const HALO_START_RADIUS_RATIO: f64 = 0.7;

/// Halo radius at the end of a run, as a fraction of the text size.
pub const HALO_END_RADIUS_RATIO: f64 = 1.2;

/// Halo alpha (0–255) for the selected letter and at the start of a run.
pub const HALO_ALPHA: u8 = 40;

/// One frame of the halo.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HaloSample {
    /// Letter the halo is drawn behind.
    pub target: Letter,
    /// Disc radius.
    pub radius: f64,
    /// Disc alpha on a 0–255 scale.
    pub alpha: u8,
}

/// Parameters of one release run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationRun {
    /// Letter being released.
    pub target: Letter,
    /// Start timestamp in milliseconds.
    pub start_time: u64,
    /// Duration in milliseconds.
    pub duration: u64,
    /// Radius at `t = 0`.
    pub from_radius: f64,
    /// Radius at `t = 1`.
    pub to_radius: f64,
    /// Alpha at `t = 0`.
    pub from_alpha: u8,
    /// Alpha at `t = 1`.
    pub to_alpha: u8,
}

impl AnimationRun {
    /// The standard release run for `target`, sized from the text size at release time.
    #[must_use]
    pub fn release(target: Letter, text_size: f64, start_time: u64) -> Self {
        Self {
            target,
            start_time,
            duration: RELEASE_DURATION_MS,
            from_radius: HALO_START_RADIUS_RATIO * text_size,
            to_radius: HALO_END_RADIUS_RATIO * text_size,
            from_alpha: HALO_ALPHA,
            to_alpha: 0,
        }
    }

    /// Normalized progress at `now`, clamped to `0..=1`.
    ///
    /// A zero-length run is complete immediately.
    #[must_use]
    pub fn progress(&self, now: u64) -> f64 {
        if self.duration == 0 {
            return 1.0;
        }
        let elapsed = now.saturating_sub(self.start_time);
        (elapsed as f64 / self.duration as f64).clamp(0.0, 1.0)
    }

    /// Linearly interpolated halo at progress `t`.
    #[must_use]
    pub fn sample(&self, t: f64) -> HaloSample {
        let t = t.clamp(0.0, 1.0);
        let alpha = lerp(f64::from(self.from_alpha), f64::from(self.to_alpha), t).round();
        #[allow(
            clippy::cast_possible_truncation,
            reason = "Interpolating between two u8 values stays within u8"
        )]
        let alpha = alpha as u8;
        HaloSample {
            target: self.target,
            radius: lerp(self.from_radius, self.to_radius, t),
            alpha,
        }
    }
}

fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

/// Result of advancing the animator.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TickOutcome {
    /// No run is active; nothing to redraw.
    Idle,
    /// The run advanced; redraw with this sample.
    Running(HaloSample),
    /// The run reached its end and stopped; the letter's halo is gone.
    Finished(Letter),
}

/// Drives at most one [`AnimationRun`] at a time.
///
/// After [`ReleaseAnimator::dispose`] the animator is inert: runs cannot be
/// started and ticks do nothing, so a detached rail never touches its surface.
#[derive(Clone, Copy, Debug, Default)]
pub struct ReleaseAnimator {
    run: Option<AnimationRun>,
    sample: Option<HaloSample>,
    disposed: bool,
}

impl ReleaseAnimator {
    /// Creates an idle animator.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            run: None,
            sample: None,
            disposed: false,
        }
    }

    /// Starts a release run for `target`, discarding any run in flight.
    ///
    /// Returns `false` if the animator has been disposed.
    pub fn start(&mut self, target: Letter, text_size: f64, now: u64) -> bool {
        if self.disposed {
            return false;
        }
        if let Some(old) = self.run {
            log::trace!("release halo for {} superseded by {target}", old.target);
        }
        let run = AnimationRun::release(target, text_size, now);
        self.sample = Some(run.sample(0.0));
        self.run = Some(run);
        true
    }

    /// Advances the active run to `now`.
    pub fn tick(&mut self, now: u64) -> TickOutcome {
        if self.disposed {
            return TickOutcome::Idle;
        }
        let Some(run) = self.run else {
            return TickOutcome::Idle;
        };
        let t = run.progress(now);
        if t >= 1.0 {
            self.run = None;
            self.sample = None;
            log::trace!("release halo for {} finished", run.target);
            return TickOutcome::Finished(run.target);
        }
        let sample = run.sample(t);
        self.sample = Some(sample);
        TickOutcome::Running(sample)
    }

    /// Stops the active run without completing it.
    ///
    /// Returns the letter whose halo was cancelled, if any.
    pub fn cancel(&mut self) -> Option<Letter> {
        self.sample = None;
        self.run.take().map(|run| run.target)
    }

    /// Cancels any run and refuses all further work.
    pub fn dispose(&mut self) -> Option<Letter> {
        self.disposed = true;
        self.cancel()
    }

    /// Returns `true` once [`ReleaseAnimator::dispose`] has been called.
    #[must_use]
    pub const fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Returns `true` while a run is in flight.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.run.is_some()
    }

    /// The active run, if any.
    #[must_use]
    pub const fn run(&self) -> Option<&AnimationRun> {
        self.run.as_ref()
    }

    /// The halo as of the last start or tick.
    #[must_use]
    pub const fn sample(&self) -> Option<HaloSample> {
        self.sample
    }
}
