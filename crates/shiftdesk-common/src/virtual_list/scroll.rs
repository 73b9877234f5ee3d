use std::time::{Duration, Instant};

/// Ease-in-out quadratic curve over `t` in `[0, 1]`.
pub fn ease_in_out_quad(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        2.0 * t * t
    } else {
        -1.0 + (4.0 - 2.0 * t) * t
    }
}

/// Scroll offset that brings a row into view a little below the top edge.
///
/// The row lands a fifth of the leftover viewport space below the top. The
/// result is clamped to `[0, max_offset]`, also when the row is taller than
/// the viewport.
pub fn target_offset(cumulative: u32, item_height: u16, viewport_height: u16, max_offset: u32) -> u32 {
    let bias = (i64::from(viewport_height) - i64::from(item_height)) / 5;
    let target = i64::from(cumulative) - bias;
    target.clamp(0, i64::from(max_offset)) as u32
}

/// Offset after a manual wheel step, or `None` while scrolling is disabled.
pub fn wheel_target(
    current: u32,
    delta: i32,
    scroll_height: u32,
    viewport_height: u16,
    scroll_disabled: bool,
) -> Option<u32> {
    if scroll_disabled {
        return None;
    }
    let max = scroll_height.saturating_sub(u32::from(viewport_height));
    let next = i64::from(current) + i64::from(delta);
    Some(next.clamp(0, i64::from(max)) as u32)
}

/// Identifies one started animation. Only the newest handle may write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationHandle {
    generation: u64,
}

/// Result of advancing an animation by one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Intermediate offset to apply
    Write(u32),
    /// Final offset; the animation is over
    Done(u32),
    /// A newer animation (or a cancel) replaced this one; write nothing
    Superseded,
}

#[derive(Debug, Clone, Copy)]
struct Animation {
    from: u32,
    to: u32,
    started_at: Instant,
}

/// Wall-clock scroll animation where the last started animation wins.
#[derive(Debug, Clone)]
pub struct ScrollController {
    duration: Duration,
    generation: u64,
    active: Option<Animation>,
}

impl ScrollController {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            generation: 0,
            active: None,
        }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn is_animating(&self) -> bool {
        self.active.is_some()
    }

    pub fn current(&self) -> Option<AnimationHandle> {
        self.active.map(|_| AnimationHandle {
            generation: self.generation,
        })
    }

    /// Start animating from `from` to `to`, superseding any running animation.
    pub fn start(&mut self, from: u32, to: u32, now: Instant) -> AnimationHandle {
        self.generation += 1;
        self.active = Some(Animation {
            from,
            to,
            started_at: now,
        });
        AnimationHandle {
            generation: self.generation,
        }
    }

    pub fn cancel(&mut self) {
        if self.active.take().is_some() {
            self.generation += 1;
        }
    }

    /// Advance the animation behind `handle` to `now`.
    pub fn frame(&mut self, handle: AnimationHandle, now: Instant) -> FrameOutcome {
        if handle.generation != self.generation {
            return FrameOutcome::Superseded;
        }
        let Some(anim) = self.active else {
            return FrameOutcome::Superseded;
        };

        let elapsed = now.saturating_duration_since(anim.started_at);
        let progress = if self.duration.is_zero() {
            1.0
        } else {
            (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
        };

        if progress >= 1.0 {
            self.active = None;
            return FrameOutcome::Done(anim.to);
        }

        let span = f64::from(anim.to) - f64::from(anim.from);
        let offset = f64::from(anim.from) + span * ease_in_out_quad(progress);
        FrameOutcome::Write(offset.round().max(0.0) as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn test_ease_endpoints_and_midpoint() {
        assert_eq!(ease_in_out_quad(0.0), 0.0);
        assert_eq!(ease_in_out_quad(1.0), 1.0);
        assert!((ease_in_out_quad(0.5) - 0.5).abs() < 1e-9);
        assert!(ease_in_out_quad(0.25) < 0.25);
        assert!(ease_in_out_quad(0.75) > 0.75);
        assert_eq!(ease_in_out_quad(-3.0), 0.0);
        assert_eq!(ease_in_out_quad(7.0), 1.0);
    }

    #[test]
    fn test_target_offset_biases_below_top() {
        // viewport 30, row 5: bias (30 - 5) / 5 = 5
        assert_eq!(target_offset(100, 5, 30, 1_000), 95);
    }

    #[test]
    fn test_target_offset_clamps_at_zero_and_max() {
        assert_eq!(target_offset(2, 3, 30, 1_000), 0);
        assert_eq!(target_offset(0, 1, 200, 1_000), 0);
        assert_eq!(target_offset(500, 3, 30, 120), 120);
    }

    #[test]
    fn test_target_offset_row_taller_than_viewport() {
        // bias (10 - 40) / 5 = -6 pushes the target down, never below zero
        assert_eq!(target_offset(0, 40, 10, 1_000), 6);
        assert_eq!(target_offset(20, 40, 10, 1_000), 26);
    }

    #[test]
    fn test_wheel_target_respects_disabled_and_bounds() {
        assert_eq!(wheel_target(10, 3, 100, 20, true), None);
        assert_eq!(wheel_target(10, 3, 100, 20, false), Some(13));
        assert_eq!(wheel_target(1, -5, 100, 20, false), Some(0));
        assert_eq!(wheel_target(78, 5, 100, 20, false), Some(80));
        // content shorter than the viewport cannot scroll
        assert_eq!(wheel_target(0, 5, 10, 20, false), Some(0));
    }

    #[test]
    fn test_animation_follows_wall_clock() {
        let mut ctl = ScrollController::new(Duration::from_millis(300));
        let t0 = Instant::now();
        let handle = ctl.start(0, 100, t0);

        assert_eq!(ctl.frame(handle, t0), FrameOutcome::Write(0));
        assert_eq!(ctl.frame(handle, t0 + 150 * MS), FrameOutcome::Write(50));
        assert_eq!(ctl.frame(handle, t0 + 300 * MS), FrameOutcome::Done(100));
        assert!(!ctl.is_animating());
        assert_eq!(ctl.frame(handle, t0 + 310 * MS), FrameOutcome::Superseded);
    }

    #[test]
    fn test_animation_scrolls_upwards() {
        let mut ctl = ScrollController::new(Duration::from_millis(200));
        let t0 = Instant::now();
        let handle = ctl.start(80, 20, t0);
        assert_eq!(ctl.frame(handle, t0 + 100 * MS), FrameOutcome::Write(50));
        assert_eq!(ctl.frame(handle, t0 + 500 * MS), FrameOutcome::Done(20));
    }

    #[test]
    fn test_new_start_supersedes_old_handle() {
        let mut ctl = ScrollController::new(Duration::from_millis(300));
        let t0 = Instant::now();
        let first = ctl.start(0, 100, t0);
        let second = ctl.start(40, 10, t0 + 50 * MS);

        assert_eq!(ctl.frame(first, t0 + 100 * MS), FrameOutcome::Superseded);
        assert_eq!(ctl.current(), Some(second));
        assert_eq!(ctl.frame(second, t0 + 350 * MS), FrameOutcome::Done(10));
    }

    #[test]
    fn test_cancel_stops_writes() {
        let mut ctl = ScrollController::new(Duration::from_millis(300));
        let t0 = Instant::now();
        let handle = ctl.start(0, 100, t0);
        ctl.cancel();
        assert_eq!(ctl.frame(handle, t0 + 10 * MS), FrameOutcome::Superseded);
        assert_eq!(ctl.current(), None);
    }

    #[test]
    fn test_zero_duration_finishes_immediately() {
        let mut ctl = ScrollController::new(Duration::ZERO);
        let t0 = Instant::now();
        let handle = ctl.start(3, 9, t0);
        assert_eq!(ctl.frame(handle, t0), FrameOutcome::Done(9));
    }

    proptest! {
        #[test]
        fn prop_target_offset_within_bounds(
            cumulative in 0u32..100_000,
            item_height in 1u16..500,
            viewport_height in 0u16..500,
            max_offset in 0u32..100_000,
        ) {
            let target = target_offset(cumulative, item_height, viewport_height, max_offset);
            prop_assert!(target <= max_offset);
        }
    }
}
