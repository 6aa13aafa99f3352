//! Touch routing for the guided controller.
//!
//! [`TouchRouter`] assigns each finger a role when it lands and keeps that
//! role until it lifts:
//!
//! - on the joystick widget: planar movement, reported as a vector in the
//!   unit disk;
//! - on the rotation wheel: yaw-only drag;
//! - anywhere else on the canvas: a possible tap, and, when it starts in the
//!   right half of the viewport and no other finger is looking, a swipe look.

use glam::Vec2;
use rustc_hash::FxHashMap;
use winit::event::TouchPhase;

use crate::TouchEvent;

/// Axis-aligned screen rectangle in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenRect {
    pub min: Vec2,
    pub max: Vec2,
}

impl ScreenRect {
    #[must_use]
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
        }
    }

    #[must_use]
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}

/// Screen placement of the touch widgets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchLayout {
    /// Viewport size in pixels.
    pub viewport: Vec2,
    /// Center of the joystick widget.
    pub joystick_center: Vec2,
    /// Joystick radius in pixels: hit area and full-deflection distance.
    pub joystick_radius: f32,
    /// The rotation wheel track, if the shell shows one.
    pub wheel: Option<ScreenRect>,
}

impl TouchLayout {
    /// Joystick in the lower-left corner, rotation wheel centered along the
    /// bottom edge.
    #[must_use]
    pub fn for_viewport(viewport: Vec2, joystick_radius: f32) -> Self {
        let margin = joystick_radius * 1.5;
        let wheel_half = Vec2::new(viewport.x * 0.15, joystick_radius * 0.4);
        let wheel_center = Vec2::new(viewport.x * 0.5, viewport.y - joystick_radius * 0.6);
        Self {
            viewport,
            joystick_center: Vec2::new(margin, viewport.y - margin),
            joystick_radius,
            wheel: Some(ScreenRect::new(
                wheel_center - wheel_half,
                wheel_center + wheel_half,
            )),
        }
    }

    fn on_joystick(&self, p: Vec2) -> bool {
        p.distance(self.joystick_center) <= self.joystick_radius
    }

    fn on_wheel(&self, p: Vec2) -> bool {
        self.wheel.is_some_and(|w| w.contains(p))
    }

    fn in_look_region(&self, p: Vec2) -> bool {
        p.x > self.viewport.x * 0.5
    }

    /// Joystick deflection for a finger at `p`, clamped into the unit disk.
    /// Screen y grows downward, so pushing up yields negative y.
    #[must_use]
    pub fn joystick_vector(&self, p: Vec2) -> Vec2 {
        if self.joystick_radius <= 0.0 {
            return Vec2::ZERO;
        }
        let offset = (p - self.joystick_center).clamp_length_max(self.joystick_radius);
        offset / self.joystick_radius
    }
}

/// What a touch update means to the controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TouchIntent {
    /// New joystick deflection (unit disk).
    Joystick(Vec2),
    /// The joystick finger lifted; deflection returns to zero.
    JoystickReleased,
    /// A finger landed on the rotation wheel.
    WheelGrabbed,
    /// Horizontal wheel drag since the previous update, in pixels.
    Wheel { dx: f32 },
    /// The wheel finger lifted.
    WheelReleased,
    /// Look drag since the previous update, in pixels. `travel` is the
    /// straight-line distance from where the finger landed.
    Look { delta: Vec2, travel: f32 },
    /// A canvas touch lifted without moving past the swipe threshold.
    Tap(Vec2),
}

#[derive(Debug, Clone, Copy)]
enum Role {
    Joystick,
    Wheel { last_x: f32 },
    Canvas {
        start: Vec2,
        last: Vec2,
        moved: bool,
        look: bool,
    },
}

/// Tracks active touches and converts their updates to [`TouchIntent`]s.
#[derive(Debug, Clone)]
pub struct TouchRouter {
    layout: TouchLayout,
    swipe_threshold: f32,
    touches: FxHashMap<u64, Role>,
}

impl TouchRouter {
    /// `swipe_threshold` is the distance in pixels a canvas touch may travel
    /// and still count as a tap.
    #[must_use]
    pub fn new(layout: TouchLayout, swipe_threshold: f32) -> Self {
        Self {
            layout,
            swipe_threshold,
            touches: FxHashMap::default(),
        }
    }

    #[must_use]
    pub fn layout(&self) -> &TouchLayout {
        &self.layout
    }

    /// Replace the layout (e.g. after a resize). Active touches keep their roles.
    pub fn set_layout(&mut self, layout: TouchLayout) {
        self.layout = layout;
    }

    /// Number of fingers currently down.
    #[must_use]
    pub fn active_touches(&self) -> usize {
        self.touches.len()
    }

    fn has_role(&self, pred: impl Fn(&Role) -> bool) -> bool {
        self.touches.values().any(pred)
    }

    /// Process one touch update.
    pub fn handle(&mut self, event: TouchEvent) -> Option<TouchIntent> {
        match event.phase {
            TouchPhase::Started => self.start(event.id, event.position),
            TouchPhase::Moved => self.moved(event.id, event.position),
            TouchPhase::Ended => self.end(event.id, event.position, true),
            TouchPhase::Cancelled => self.end(event.id, event.position, false),
        }
    }

    fn start(&mut self, id: u64, p: Vec2) -> Option<TouchIntent> {
        if self.touches.contains_key(&id) {
            tracing::trace!(id, "duplicate touch start ignored");
            return None;
        }
        if self.layout.on_joystick(p) && !self.has_role(|r| matches!(r, Role::Joystick)) {
            self.touches.insert(id, Role::Joystick);
            return Some(TouchIntent::Joystick(self.layout.joystick_vector(p)));
        }
        if self.layout.on_wheel(p) && !self.has_role(|r| matches!(r, Role::Wheel { .. })) {
            self.touches.insert(id, Role::Wheel { last_x: p.x });
            return Some(TouchIntent::WheelGrabbed);
        }
        let look = self.layout.in_look_region(p)
            && !self.has_role(|r| matches!(r, Role::Canvas { look: true, .. }));
        self.touches.insert(
            id,
            Role::Canvas {
                start: p,
                last: p,
                moved: false,
                look,
            },
        );
        None
    }

    fn moved(&mut self, id: u64, p: Vec2) -> Option<TouchIntent> {
        let threshold = self.swipe_threshold;
        let role = self.touches.get_mut(&id)?;
        match role {
            Role::Joystick => Some(TouchIntent::Joystick(self.layout.joystick_vector(p))),
            Role::Wheel { last_x } => {
                let dx = p.x - *last_x;
                *last_x = p.x;
                Some(TouchIntent::Wheel { dx })
            }
            Role::Canvas {
                start,
                last,
                moved,
                look,
            } => {
                let delta = p - *last;
                *last = p;
                let travel = (p - *start).abs();
                if travel.x > threshold || travel.y > threshold {
                    *moved = true;
                }
                (*look).then(|| TouchIntent::Look {
                    delta,
                    travel: p.distance(*start),
                })
            }
        }
    }

    fn end(&mut self, id: u64, p: Vec2, completed: bool) -> Option<TouchIntent> {
        match self.touches.remove(&id)? {
            Role::Joystick => Some(TouchIntent::JoystickReleased),
            Role::Wheel { .. } => Some(TouchIntent::WheelReleased),
            Role::Canvas { moved, .. } => (completed && !moved).then_some(TouchIntent::Tap(p)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> TouchLayout {
        TouchLayout {
            viewport: Vec2::new(800.0, 600.0),
            joystick_center: Vec2::new(100.0, 500.0),
            joystick_radius: 50.0,
            wheel: Some(ScreenRect::new(
                Vec2::new(300.0, 560.0),
                Vec2::new(500.0, 590.0),
            )),
        }
    }

    fn touch(id: u64, phase: TouchPhase, x: f32, y: f32) -> TouchEvent {
        TouchEvent {
            id,
            phase,
            position: Vec2::new(x, y),
        }
    }

    #[test]
    fn test_joystick_vector_clamped_to_unit_disk() {
        let mut router = TouchRouter::new(layout(), 2.0);
        router.handle(touch(1, TouchPhase::Started, 100.0, 500.0));
        let intent = router.handle(touch(1, TouchPhase::Moved, 100.0, 300.0));
        assert_eq!(intent, Some(TouchIntent::Joystick(Vec2::new(0.0, -1.0))));
        let intent = router.handle(touch(1, TouchPhase::Moved, 125.0, 500.0));
        assert_eq!(intent, Some(TouchIntent::Joystick(Vec2::new(0.5, 0.0))));
    }

    #[test]
    fn test_joystick_release_resets() {
        let mut router = TouchRouter::new(layout(), 2.0);
        router.handle(touch(7, TouchPhase::Started, 110.0, 490.0));
        let intent = router.handle(touch(7, TouchPhase::Ended, 140.0, 490.0));
        assert_eq!(intent, Some(TouchIntent::JoystickReleased));
        assert_eq!(router.active_touches(), 0);
    }

    #[test]
    fn test_right_half_drag_looks() {
        let mut router = TouchRouter::new(layout(), 2.0);
        assert_eq!(router.handle(touch(1, TouchPhase::Started, 600.0, 200.0)), None);
        let intent = router.handle(touch(1, TouchPhase::Moved, 610.0, 195.0));
        assert_eq!(
            intent,
            Some(TouchIntent::Look {
                delta: Vec2::new(10.0, -5.0),
                travel: Vec2::new(10.0, -5.0).length(),
            })
        );
        // Moved past threshold: lifting is not a tap.
        assert_eq!(router.handle(touch(1, TouchPhase::Ended, 610.0, 195.0)), None);
    }

    #[test]
    fn test_slow_drag_accumulates_travel() {
        let mut router = TouchRouter::new(layout(), 2.0);
        router.handle(touch(1, TouchPhase::Started, 600.0, 200.0));
        let mut last = None;
        for step in 1..=10 {
            last = router.handle(touch(1, TouchPhase::Moved, 600.0 + step as f32, 200.0));
        }
        assert_eq!(
            last,
            Some(TouchIntent::Look {
                delta: Vec2::new(1.0, 0.0),
                travel: 10.0,
            })
        );
        assert_eq!(router.handle(touch(1, TouchPhase::Ended, 610.0, 200.0)), None);
    }

    #[test]
    fn test_left_half_drag_does_not_look() {
        let mut router = TouchRouter::new(layout(), 2.0);
        router.handle(touch(1, TouchPhase::Started, 300.0, 200.0));
        assert_eq!(router.handle(touch(1, TouchPhase::Moved, 340.0, 200.0)), None);
    }

    #[test]
    fn test_only_one_look_touch() {
        let mut router = TouchRouter::new(layout(), 2.0);
        router.handle(touch(1, TouchPhase::Started, 600.0, 200.0));
        router.handle(touch(2, TouchPhase::Started, 700.0, 200.0));
        assert_eq!(router.handle(touch(2, TouchPhase::Moved, 720.0, 200.0)), None);
    }

    #[test]
    fn test_still_touch_is_tap() {
        let mut router = TouchRouter::new(layout(), 2.0);
        router.handle(touch(3, TouchPhase::Started, 400.0, 300.0));
        router.handle(touch(3, TouchPhase::Moved, 401.0, 301.0));
        let intent = router.handle(touch(3, TouchPhase::Ended, 401.0, 301.0));
        assert_eq!(intent, Some(TouchIntent::Tap(Vec2::new(401.0, 301.0))));
    }

    #[test]
    fn test_cancelled_touch_is_not_tap() {
        let mut router = TouchRouter::new(layout(), 2.0);
        router.handle(touch(3, TouchPhase::Started, 400.0, 300.0));
        assert_eq!(router.handle(touch(3, TouchPhase::Cancelled, 400.0, 300.0)), None);
    }

    #[test]
    fn test_wheel_reports_horizontal_delta() {
        let mut router = TouchRouter::new(layout(), 2.0);
        let grabbed = router.handle(touch(4, TouchPhase::Started, 400.0, 575.0));
        assert_eq!(grabbed, Some(TouchIntent::WheelGrabbed));
        let intent = router.handle(touch(4, TouchPhase::Moved, 430.0, 580.0));
        assert_eq!(intent, Some(TouchIntent::Wheel { dx: 30.0 }));
        let intent = router.handle(touch(4, TouchPhase::Moved, 420.0, 580.0));
        assert_eq!(intent, Some(TouchIntent::Wheel { dx: -10.0 }));
        let intent = router.handle(touch(4, TouchPhase::Ended, 420.0, 580.0));
        assert_eq!(intent, Some(TouchIntent::WheelReleased));
    }

    #[test]
    fn test_unknown_touch_ignored() {
        let mut router = TouchRouter::new(layout(), 2.0);
        assert_eq!(router.handle(touch(9, TouchPhase::Moved, 1.0, 1.0)), None);
        assert_eq!(router.handle(touch(9, TouchPhase::Ended, 1.0, 1.0)), None);
    }

    #[test]
    fn test_default_layout_places_widgets_on_screen() {
        let l = TouchLayout::for_viewport(Vec2::new(390.0, 844.0), 50.0);
        assert!(l.joystick_center.x < l.viewport.x * 0.5);
        assert!(l.joystick_center.y < l.viewport.y);
        let wheel = l.wheel.unwrap();
        assert!(wheel.max.y <= l.viewport.y);
        assert!(!l.on_joystick(wheel.min));
    }
}
