//! Smooth scrolling for the preview pane
//!
//! An ease-out that halves the remaining distance on every timer tick, then
//! snaps exactly onto the target once the gap is small or the step budget is
//! spent. It never overshoots and always stops within `max_iterations` ticks.
//!
//! # Architecture
//!
//! The animator owns no timer. `animate_to` returns an [`AnimationHandle`]; the
//! embedding environment fires `tick(handle, ..)` every [`ScrollConfig::interval`].
//! Starting a new animation retires the previous handle immediately, so late
//! ticks from a superseded timer are ignored instead of fighting the new one.
//!
//! ```ignore
//! let handle = animator.animate_to(&mut preview, 480.0);
//! // every 30ms:
//! match animator.tick(handle, &mut preview) {
//!     TickOutcome::Running(_) => {}
//!     TickOutcome::Finished(_) | TickOutcome::Stale => stop_timer(),
//! }
//! ```

use log::debug;
use std::time::Duration;

// ─────────────────────────────────────────────────────────────────────────────
// Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Timing parameters for the animator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollConfig {
    /// Maximum number of ticks before snapping to the target
    pub max_iterations: u32,
    /// Wall-clock spacing between ticks
    pub interval: Duration,
    /// Remaining distance (pixels) below which the animation snaps
    pub snap_threshold: f64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            max_iterations: 15,
            interval: Duration::from_millis(30),
            snap_threshold: 2.0,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Scroll Container
// ─────────────────────────────────────────────────────────────────────────────

/// Anything with a vertical scroll position.
pub trait ScrollContainer {
    /// Current vertical scroll offset in pixels.
    fn scroll_offset(&self) -> f64;

    /// Set the vertical scroll offset in pixels.
    fn set_scroll_offset(&mut self, offset: f64);
}

// ─────────────────────────────────────────────────────────────────────────────
// Animation State
// ─────────────────────────────────────────────────────────────────────────────

/// Identifies one interpolation; ticks carry it back to the animator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnimationHandle(u64);

/// The single in-flight interpolation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollAnimation {
    /// Offset when the animation started
    pub origin: f64,
    /// Offset the animation converges on
    pub target: f64,
    /// Ticks taken so far
    pub steps: u32,
    handle: AnimationHandle,
}

impl ScrollAnimation {
    /// Handle of this animation.
    pub fn handle(&self) -> AnimationHandle {
        self.handle
    }
}

/// Result of delivering one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    /// The handle is not the live animation (cancelled, superseded, or done)
    Stale,
    /// Moved to the given offset; more ticks needed
    Running(f64),
    /// Snapped onto the target; the animator is idle
    Finished(f64),
}

// ─────────────────────────────────────────────────────────────────────────────
// ScrollAnimator
// ─────────────────────────────────────────────────────────────────────────────

/// Idle/Running state machine holding at most one [`ScrollAnimation`].
#[derive(Debug, Clone, Default)]
pub struct ScrollAnimator {
    config: ScrollConfig,
    current: Option<ScrollAnimation>,
    next_handle: u64,
}

impl ScrollAnimator {
    /// Create an idle animator with default timing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with custom configuration.
    pub fn with_config(config: ScrollConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Timing parameters in use.
    pub fn config(&self) -> &ScrollConfig {
        &self.config
    }

    /// Check if an animation is currently running.
    pub fn is_running(&self) -> bool {
        self.current.is_some()
    }

    /// The live animation, if any.
    pub fn current(&self) -> Option<&ScrollAnimation> {
        self.current.as_ref()
    }

    /// Target of the live animation, if any.
    pub fn current_target(&self) -> Option<f64> {
        self.current.map(|anim| anim.target)
    }

    /// Start animating `container` towards `target`.
    ///
    /// A running animation is cancelled first. If it had not moved the
    /// container yet, the container jumps straight to that animation's target
    /// so its scroll is not silently lost.
    pub fn animate_to<C>(&mut self, container: &mut C, target: f64) -> AnimationHandle
    where
        C: ScrollContainer + ?Sized,
    {
        if let Some(previous) = self.current.take() {
            debug!(
                "Superseding scroll animation {:?} (target {}, {} steps)",
                previous.handle, previous.target, previous.steps
            );
            if previous.steps == 0 {
                container.set_scroll_offset(previous.target);
            }
        }

        self.next_handle += 1;
        let handle = AnimationHandle(self.next_handle);
        self.current = Some(ScrollAnimation {
            origin: container.scroll_offset(),
            target,
            steps: 0,
            handle,
        });
        handle
    }

    /// Cancel the live animation, leaving the container where it is.
    pub fn cancel(&mut self) -> bool {
        self.current.take().is_some()
    }

    /// Advance the animation identified by `handle` by one step.
    pub fn tick<C>(&mut self, handle: AnimationHandle, container: &mut C) -> TickOutcome
    where
        C: ScrollContainer + ?Sized,
    {
        let Some(anim) = self.current.as_mut().filter(|anim| anim.handle == handle) else {
            return TickOutcome::Stale;
        };

        let from = container.scroll_offset();
        let next = from + (anim.target - from) / 2.0;
        anim.steps += 1;

        if anim.steps >= self.config.max_iterations
            || (next - anim.target).abs() < self.config.snap_threshold
        {
            let target = anim.target;
            container.set_scroll_offset(target);
            self.current = None;
            TickOutcome::Finished(target)
        } else {
            container.set_scroll_offset(next);
            TickOutcome::Running(next)
        }
    }

    /// Drive the live animation to its end synchronously.
    ///
    /// Returns the number of ticks delivered.
    pub fn run_to_completion<C>(&mut self, container: &mut C) -> u32
    where
        C: ScrollContainer + ?Sized,
    {
        let mut ticks = 0;
        while let Some(handle) = self.current.map(|anim| anim.handle) {
            ticks += 1;
            if let TickOutcome::Finished(_) | TickOutcome::Stale = self.tick(handle, container) {
                break;
            }
        }
        ticks
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
