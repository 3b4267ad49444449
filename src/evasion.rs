//! Evasive "No" button engine
//!
//! Pure geometry + timing logic, no DOM. The shell feeds pointer positions
//! and the button's current on-screen rect in; the engine answers with the
//! next relative offset to animate toward. The offset is *committed* only
//! when the shell reports the animation finished, so consecutive dodges
//! always compute from a settled position instead of an in-flight one.

use glam::Vec2;

use crate::consts::{
    EVADE_DURATION_SECS, FLEE_DISTANCE, TEASE_COOLDOWN_MS, TRIGGER_RADIUS, VIEWPORT_PADDING,
};
use crate::{BoxRect, Viewport};

/// One dodge: animate the button to `offset` over `duration_secs` (ease-out),
/// then call [`EvasionEngine::commit`] with the same offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvadeMove {
    /// Target offset relative to the button's layout position
    pub offset: Vec2,
    pub duration_secs: f32,
}

/// Tracks the No button's committed offset and the tease attempt counter.
///
/// Created fresh each time the question screen mounts; discarded on leave.
#[derive(Debug, Clone)]
pub struct EvasionEngine {
    /// Offset the last finished animation settled at
    committed: Vec2,
    attempts: u32,
    /// Timestamp (ms) before which further attempts are not counted
    cooldown_until: f64,
}

impl Default for EvasionEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl EvasionEngine {
    pub fn new() -> Self {
        Self {
            committed: Vec2::ZERO,
            attempts: 0,
            cooldown_until: 0.0,
        }
    }

    /// Number of counted dodge attempts so far
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Offset the button has settled at
    pub fn committed_offset(&self) -> Vec2 {
        self.committed
    }

    /// Record that the dodge animation reached `offset`
    pub fn commit(&mut self, offset: Vec2) {
        self.committed = offset;
    }

    /// Pointer moved to `pointer` while the button occupies `bounds` on
    /// screen. Returns the dodge to perform, or `None` when the pointer is
    /// outside the trigger radius.
    ///
    /// Every qualifying event yields a move; only the attempt counter is
    /// debounced (pointermove fires far more often than a human dodge).
    pub fn on_pointer_move(
        &mut self,
        pointer: Vec2,
        bounds: BoxRect,
        viewport: Viewport,
        now_ms: f64,
    ) -> Option<EvadeMove> {
        let d = pointer - bounds.center();
        if d.length() >= TRIGGER_RADIUS {
            return None;
        }

        if now_ms >= self.cooldown_until {
            self.attempts += 1;
            self.cooldown_until = now_ms + TEASE_COOLDOWN_MS;
        }

        // Flee directly away from the pointer by a fixed step
        let angle = d.y.atan2(d.x);
        let mut target = self.committed - Vec2::new(angle.cos(), angle.sin()) * FLEE_DISTANCE;

        // Clamp the button's *absolute* top-left so the whole box stays
        // inside the padded viewport. `bounds.origin` is where the box sits
        // right now, so the prospective absolute position is the current one
        // shifted by the offset delta.
        let abs = bounds.origin + (target - self.committed);
        let min = Vec2::splat(VIEWPORT_PADDING);
        let max = Vec2::new(
            viewport.width - bounds.size.x - VIEWPORT_PADDING,
            viewport.height - bounds.size.y - VIEWPORT_PADDING,
        );
        target += abs.clamp(min, max) - abs;

        Some(EvadeMove {
            offset: target,
            duration_secs: EVADE_DURATION_SECS,
        })
    }

    /// The pointer entered the button's own hit area. Fast pointers can land
    /// on the button between two pointermove events; this forces the same
    /// check immediately so the button still slips away before a click.
    pub fn on_pointer_enter(
        &mut self,
        pointer: Vec2,
        bounds: BoxRect,
        viewport: Viewport,
        now_ms: f64,
    ) -> Option<EvadeMove> {
        self.on_pointer_move(pointer, bounds, viewport, now_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const VIEW: Viewport = Viewport {
        width: 1280.0,
        height: 800.0,
    };

    fn centered_button() -> BoxRect {
        BoxRect::new(Vec2::new(600.0, 380.0), Vec2::new(120.0, 48.0))
    }

    #[test]
    fn test_far_pointer_is_noop() {
        let mut engine = EvasionEngine::new();
        let bounds = centered_button();
        // Exactly on the trigger boundary does not qualify
        let pointer = bounds.center() + Vec2::new(TRIGGER_RADIUS, 0.0);
        assert_eq!(engine.on_pointer_move(pointer, bounds, VIEW, 0.0), None);
        assert_eq!(engine.attempts(), 0);
        assert_eq!(engine.committed_offset(), Vec2::ZERO);
    }

    #[test]
    fn test_near_pointer_flees_away() {
        let mut engine = EvasionEngine::new();
        let bounds = centered_button();
        // Pointer to the left of center: button should flee right
        let pointer = bounds.center() - Vec2::new(100.0, 0.0);
        let mv = engine.on_pointer_move(pointer, bounds, VIEW, 0.0).unwrap();
        assert!(mv.offset.x > 0.0);
        assert!((mv.offset.x - FLEE_DISTANCE).abs() < 0.001);
        assert!(mv.offset.y.abs() < 0.001);
        assert_eq!(engine.attempts(), 1);
    }

    #[test]
    fn test_flee_step_is_fixed_regardless_of_distance() {
        let bounds = centered_button();
        let mut near = EvasionEngine::new();
        let mut edge = EvasionEngine::new();
        let mv_near = near
            .on_pointer_move(bounds.center() - Vec2::new(10.0, 0.0), bounds, VIEW, 0.0)
            .unwrap();
        let mv_edge = edge
            .on_pointer_move(
                bounds.center() - Vec2::new(TRIGGER_RADIUS - 1.0, 0.0),
                bounds,
                VIEW,
                0.0,
            )
            .unwrap();
        assert!((mv_near.offset.length() - mv_edge.offset.length()).abs() < 0.001);
    }

    #[test]
    fn test_clamped_to_padded_viewport() {
        let mut engine = EvasionEngine::new();
        // Button already hugging the right edge, pointer approaching from the left
        let bounds = BoxRect::new(
            Vec2::new(VIEW.width - 120.0 - VIEWPORT_PADDING, 380.0),
            Vec2::new(120.0, 48.0),
        );
        let pointer = bounds.center() - Vec2::new(50.0, 0.0);
        let mv = engine.on_pointer_move(pointer, bounds, VIEW, 0.0).unwrap();
        let abs = bounds.origin + (mv.offset - engine.committed_offset());
        assert!(abs.x <= VIEW.width - bounds.size.x - VIEWPORT_PADDING + 0.001);
        assert!(abs.x >= VIEWPORT_PADDING - 0.001);
    }

    #[test]
    fn test_counter_debounced_within_cooldown() {
        let mut engine = EvasionEngine::new();
        let bounds = centered_button();
        let pointer = bounds.center() + Vec2::new(40.0, 0.0);

        // A burst of pointermove events within one cooldown window
        for i in 0..10 {
            let mv = engine.on_pointer_move(pointer, bounds, VIEW, i as f64 * 10.0);
            // Motion is never throttled
            assert!(mv.is_some());
        }
        assert_eq!(engine.attempts(), 1);

        // After the window, the next qualifying event counts again
        assert!(
            engine
                .on_pointer_move(pointer, bounds, VIEW, TEASE_COOLDOWN_MS + 1.0)
                .is_some()
        );
        assert_eq!(engine.attempts(), 2);
    }

    #[test]
    fn test_five_spaced_attempts_count_five() {
        let mut engine = EvasionEngine::new();
        let bounds = centered_button();
        let pointer = bounds.center() + Vec2::new(30.0, 30.0);
        for i in 0..5 {
            engine.on_pointer_move(pointer, bounds, VIEW, i as f64 * (TEASE_COOLDOWN_MS + 10.0));
        }
        assert_eq!(engine.attempts(), 5);
    }

    #[test]
    fn test_commit_moves_the_baseline() {
        let mut engine = EvasionEngine::new();
        let bounds = centered_button();
        let pointer = bounds.center() - Vec2::new(100.0, 0.0);
        let first = engine.on_pointer_move(pointer, bounds, VIEW, 0.0).unwrap();

        // Until committed, a re-trigger still computes from the old baseline
        let again = engine.on_pointer_move(pointer, bounds, VIEW, 10.0).unwrap();
        assert_eq!(first.offset, again.offset);

        engine.commit(first.offset);
        // Button has moved on screen; feed the settled rect back in
        let settled = BoxRect::new(bounds.origin + first.offset, bounds.size);
        let next = engine
            .on_pointer_move(settled.center() - Vec2::new(100.0, 0.0), settled, VIEW, 200.0)
            .unwrap();
        assert!(next.offset.x > first.offset.x);
    }

    #[test]
    fn test_pointer_enter_forces_check() {
        let mut engine = EvasionEngine::new();
        let bounds = centered_button();
        // Pointer dead center on the button
        let mv = engine.on_pointer_enter(bounds.center(), bounds, VIEW, 0.0);
        assert!(mv.is_some());
        assert_eq!(engine.attempts(), 1);
    }

    proptest! {
        /// Any qualifying dodge leaves the whole button inside the padded
        /// viewport, wherever the button starts and wherever the pointer is.
        #[test]
        fn prop_dodge_stays_in_padded_viewport(
            bx in VIEWPORT_PADDING..(1280.0 - 120.0 - VIEWPORT_PADDING),
            by in VIEWPORT_PADDING..(800.0 - 48.0 - VIEWPORT_PADDING),
            px in 0.0f32..1280.0,
            py in 0.0f32..800.0,
        ) {
            let mut engine = EvasionEngine::new();
            let bounds = BoxRect::new(Vec2::new(bx, by), Vec2::new(120.0, 48.0));
            if let Some(mv) = engine.on_pointer_move(Vec2::new(px, py), bounds, VIEW, 0.0) {
                let abs = bounds.origin + (mv.offset - engine.committed_offset());
                prop_assert!(abs.x >= VIEWPORT_PADDING - 0.001);
                prop_assert!(abs.y >= VIEWPORT_PADDING - 0.001);
                prop_assert!(abs.x <= VIEW.width - bounds.size.x - VIEWPORT_PADDING + 0.001);
                prop_assert!(abs.y <= VIEW.height - bounds.size.y - VIEWPORT_PADDING + 0.001);
            }
        }

        /// Pointer at or beyond the trigger radius never produces motion.
        #[test]
        fn prop_far_pointer_never_moves(
            angle in 0.0f32..std::f32::consts::TAU,
            extra in 0.0f32..500.0,
        ) {
            let mut engine = EvasionEngine::new();
            let bounds = centered_button();
            let pointer = bounds.center()
                + Vec2::new(angle.cos(), angle.sin()) * (TRIGGER_RADIUS + extra);
            prop_assert_eq!(engine.on_pointer_move(pointer, bounds, VIEW, 0.0), None);
            prop_assert_eq!(engine.attempts(), 0);
        }
    }
}
