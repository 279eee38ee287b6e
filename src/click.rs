//! Multi-click classification.
//!
//! A rapid sequence of presses of the same button at a stable position
//! chains into double and triple clicks; anything slower or farther away
//! starts a new chain.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::geom::Point;

/// Presses of the same button within this window chain into multi-clicks.
pub const MULTI_CLICK_TIME: Duration = Duration::from_millis(400);

/// Pointer slop allowed between chained presses, in pixels at 1x scale.
pub const MULTI_CLICK_SLOP_PX: i32 = 4;

/// Click-chain state for a single button.
#[derive(Debug, Clone, Default)]
pub struct ClickState {
    last: Option<(Instant, Point)>,
    count: u8,
}

impl ClickState {
    /// Classify a press at `pt`, advancing the chain. Returns 1..=3;
    /// a fourth chained press wraps back to 1.
    pub fn track(&mut self, now: Instant, pt: Point, scale: f32) -> u8 {
        let slop = (MULTI_CLICK_SLOP_PX as f32 * scale).round() as i32;
        let chained = self.last.is_some_and(|(t, p)| {
            now.saturating_duration_since(t) <= MULTI_CLICK_TIME && p.chebyshev(pt) <= slop
        });
        self.count = if chained && self.count < 3 { self.count + 1 } else { 1 };
        self.last = Some((now, pt));
        self.count
    }
}

/// Click chains for every mouse button, independent per button.
#[derive(Debug, Clone, Default)]
pub struct MultiClick {
    buttons: HashMap<i32, ClickState>,
}

impl MultiClick {
    pub fn track(&mut self, button: i32, now: Instant, pt: Point, scale: f32) -> u8 {
        self.buttons.entry(button).or_default().track(now, pt, scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presses_cycle_one_two_three_one() {
        let mut st = ClickState::default();
        let t0 = Instant::now();
        let pt = Point::new(10, 10);
        let counts: Vec<u8> = [0u64, 100, 200, 300]
            .iter()
            .map(|&ms| st.track(t0 + Duration::from_millis(ms), pt, 1.0))
            .collect();
        assert_eq!(counts, vec![1, 2, 3, 1]);
    }

    #[test]
    fn slow_press_resets() {
        let mut st = ClickState::default();
        let t0 = Instant::now();
        let pt = Point::new(0, 0);
        assert_eq!(st.track(t0, pt, 1.0), 1);
        assert_eq!(st.track(t0 + Duration::from_millis(401), pt, 1.0), 1);
    }

    #[test]
    fn distant_press_resets() {
        let mut st = ClickState::default();
        let t0 = Instant::now();
        assert_eq!(st.track(t0, Point::new(0, 0), 1.0), 1);
        assert_eq!(st.track(t0 + Duration::from_millis(50), Point::new(100, 0), 1.0), 1);
    }

    #[test]
    fn slop_scales_with_dpi() {
        let t0 = Instant::now();
        let near = Point::new(7, 0);
        let mut at_1x = ClickState::default();
        at_1x.track(t0, Point::ZERO, 1.0);
        assert_eq!(at_1x.track(t0 + Duration::from_millis(50), near, 1.0), 1);

        let mut at_2x = ClickState::default();
        at_2x.track(t0, Point::ZERO, 2.0);
        assert_eq!(at_2x.track(t0 + Duration::from_millis(50), near, 2.0), 2);
    }

    #[test]
    fn buttons_are_independent() {
        let mut clicks = MultiClick::default();
        let t0 = Instant::now();
        let pt = Point::new(5, 5);
        assert_eq!(clicks.track(1, t0, pt, 1.0), 1);
        assert_eq!(clicks.track(1, t0 + Duration::from_millis(50), pt, 1.0), 2);
        assert_eq!(clicks.track(2, t0 + Duration::from_millis(60), pt, 1.0), 1);
        assert_eq!(clicks.track(1, t0 + Duration::from_millis(100), pt, 1.0), 3);
    }
}
