//! Guided controller: on-screen joystick, swipe look, a one-axis rotation
//! wheel and a waypoint tour with optional auto-walk.
//!
//! Manual input of any kind preempts the tour. Joystick deflection above the
//! deadzone, a swipe that has travelled past the pixel threshold and any
//! wheel drag all clear
//! `traversing` and `auto_advance` and invalidate a pending dwell advance.
//! A dwell advance only fires if its token is still the one the controller
//! scheduled.

use galleria_input::TouchIntent;
use galleria_math::{Bounds, Camera, YawPitch};
use galleria_scene::{ExhibitItem, Room, WaypointBuilder, WaypointSet};
use glam::{Vec2, Vec3};
use tracing::{debug, info};

use crate::{AdvanceTimer, AdvanceToken, CameraController, CaptureError};

/// Tunables for [`GuidedController`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GuidedSettings {
    /// Joystick movement speed in world units per second.
    pub move_speed: f32,
    /// Radians of rotation per pixel of swipe.
    pub look_speed: f32,
    /// Radians of yaw per pixel of wheel drag.
    pub rotation_speed: f32,
    /// Speed of waypoint traversal in world units per second.
    pub auto_walk_speed: f32,
    /// Joystick magnitude at or below which deflection is ignored.
    pub deadzone: f32,
    /// Distance in pixels a swipe may travel from its start before it
    /// cancels the tour.
    pub swipe_threshold: f32,
    /// Distance at which traversal snaps onto its target.
    pub arrival_threshold: f32,
    /// Seconds spent at a waypoint before auto-walk moves on.
    pub dwell_seconds: f32,
    /// Orientation blend factor per second (`min(1, dt * rate)` per frame).
    pub orientation_blend_rate: f32,
}

impl Default for GuidedSettings {
    fn default() -> Self {
        Self {
            move_speed: 3.5,
            look_speed: 0.003,
            rotation_speed: 0.012,
            auto_walk_speed: 1.5,
            deadzone: 0.05,
            swipe_threshold: 2.0,
            arrival_threshold: 0.1,
            dwell_seconds: 3.0,
            orientation_blend_rate: 3.0,
        }
    }
}

/// Touch-first controller with a waypoint tour.
#[derive(Debug)]
pub struct GuidedController {
    camera: Camera,
    settings: GuidedSettings,
    locked: bool,
    bounds: Option<Bounds>,

    joystick: Vec2,
    wheel_active: bool,

    builder: WaypointBuilder,
    waypoints: WaypointSet,
    current_index: usize,
    traversing: bool,
    auto_advance: bool,
    target_position: Vec3,
    target_look_at: Vec3,
    timer: AdvanceTimer,
    dwell: Option<AdvanceToken>,
}

impl GuidedController {
    #[must_use]
    pub fn new(camera: Camera, settings: GuidedSettings) -> Self {
        Self {
            camera,
            settings,
            locked: false,
            bounds: None,
            joystick: Vec2::ZERO,
            wheel_active: false,
            builder: WaypointBuilder::default(),
            waypoints: WaypointSet::default(),
            current_index: 0,
            traversing: false,
            auto_advance: false,
            target_position: Vec3::ZERO,
            target_look_at: Vec3::ZERO,
            timer: AdvanceTimer::new(),
            dwell: None,
        }
    }

    /// Use `builder` for subsequent [`set_waypoints`](Self::set_waypoints) calls.
    #[must_use]
    pub fn with_waypoint_builder(mut self, builder: WaypointBuilder) -> Self {
        self.builder = builder;
        self
    }

    #[must_use]
    pub fn settings(&self) -> &GuidedSettings {
        &self.settings
    }

    #[must_use]
    pub fn waypoints(&self) -> &WaypointSet {
        &self.waypoints
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    #[must_use]
    pub fn is_traversing(&self) -> bool {
        self.traversing
    }

    #[must_use]
    pub fn auto_advance_enabled(&self) -> bool {
        self.auto_advance
    }

    #[must_use]
    pub fn joystick(&self) -> Vec2 {
        self.joystick
    }

    #[must_use]
    pub fn has_pending_advance(&self) -> bool {
        self.dwell.is_some() && self.timer.is_pending()
    }

    /// Rebuild the tour for `room` and place the camera at the first stop,
    /// facing its item. Any traversal in progress is dropped.
    pub fn set_waypoints(&mut self, items: &[ExhibitItem], room: &Room) {
        self.waypoints = self.builder.build(items, room);
        self.current_index = 0;
        self.cancel_traversal();
        if let Some(first) = self.waypoints.get(0) {
            self.camera.position = first.view_position;
            self.camera.look_at(first.look_at);
        }
        info!(room = %room.id, waypoints = self.waypoints.len(), "guided tour ready");
    }

    /// Start walking to the waypoint at `index`. Returns `false` (and does
    /// nothing) if there is no such waypoint.
    pub fn move_to_waypoint(&mut self, index: usize) -> bool {
        let Some(wp) = self.waypoints.get(index) else {
            return false;
        };
        let item = wp.item.clone();
        self.target_position = wp.view_position;
        self.target_look_at = wp.look_at;
        self.current_index = index;
        self.traversing = true;
        self.cancel_dwell();
        debug!(index, item = %item, "walking to waypoint");
        true
    }

    /// Walk to the next waypoint (wrapping) with auto-walk enabled.
    pub fn advance(&mut self) -> bool {
        let Some(next) = self.waypoints.next_index(self.current_index) else {
            return false;
        };
        self.auto_advance = true;
        self.move_to_waypoint(next)
    }

    /// Walk to the previous waypoint (wrapping) with auto-walk enabled.
    pub fn retreat(&mut self) -> bool {
        let Some(prev) = self.waypoints.prev_index(self.current_index) else {
            return false;
        };
        self.auto_advance = true;
        self.move_to_waypoint(prev)
    }

    /// Flip auto-walk and return the new state. Enabling while idle starts
    /// walking to the next waypoint. Always `false` without waypoints.
    pub fn toggle_auto_walk(&mut self) -> bool {
        if self.waypoints.is_empty() {
            self.auto_advance = false;
            return false;
        }
        self.auto_advance = !self.auto_advance;
        if self.auto_advance {
            if !self.traversing {
                self.advance();
            }
        } else {
            self.cancel_dwell();
        }
        self.auto_advance
    }

    /// Stop the tour: no traversal, no auto-walk, no pending advance.
    pub fn cancel_traversal(&mut self) {
        if self.traversing || self.auto_advance {
            debug!("guided traversal cancelled");
        }
        self.traversing = false;
        self.auto_advance = false;
        self.cancel_dwell();
    }

    fn cancel_dwell(&mut self) {
        if let Some(token) = self.dwell.take() {
            self.timer.cancel_token(token);
        }
    }

    /// Stage a joystick deflection; magnitude is clamped to 1.
    pub fn set_joystick(&mut self, vector: Vec2) {
        if !self.locked {
            return;
        }
        self.joystick = vector.clamp_length_max(1.0);
        if self.joystick.length() > self.settings.deadzone {
            self.cancel_traversal();
        }
    }

    pub fn release_joystick(&mut self) {
        self.joystick = Vec2::ZERO;
    }

    /// Swipe look, applied immediately like pointer motion. `travel` is how
    /// far the finger has moved since it landed; once it passes the swipe
    /// threshold the tour is cancelled, however small each step was.
    pub fn on_swipe_look(&mut self, delta: Vec2, travel: f32) {
        if !self.locked {
            return;
        }
        let mut orientation = self.camera.orientation();
        orientation.apply_look_delta(delta.x, delta.y, self.settings.look_speed);
        self.camera.set_orientation(orientation);
        if travel.max(delta.length()) > self.settings.swipe_threshold {
            self.cancel_traversal();
        }
    }

    /// A finger landed on the rotation wheel. Grabbing it stops the tour.
    pub fn begin_rotation_drag(&mut self) {
        if self.locked {
            self.wheel_active = true;
            self.cancel_traversal();
        }
    }

    /// Horizontal wheel drag: yaw only.
    pub fn on_rotation_drag(&mut self, dx: f32) {
        if !self.locked || !self.wheel_active {
            return;
        }
        let o = self.camera.orientation();
        self.camera
            .set_orientation(YawPitch::new(o.yaw - dx * self.settings.rotation_speed, o.pitch));
        self.cancel_traversal();
    }

    pub fn end_rotation_drag(&mut self) {
        self.wheel_active = false;
    }

    /// Route a touch intent to the matching input. Returns the tap position
    /// for [`TouchIntent::Tap`], which the caller resolves as an activation.
    pub fn apply_touch(&mut self, intent: TouchIntent) -> Option<Vec2> {
        match intent {
            TouchIntent::Joystick(v) => self.set_joystick(v),
            TouchIntent::JoystickReleased => self.release_joystick(),
            TouchIntent::WheelGrabbed => self.begin_rotation_drag(),
            TouchIntent::Wheel { dx } => self.on_rotation_drag(dx),
            TouchIntent::WheelReleased => self.end_rotation_drag(),
            TouchIntent::Look { delta, travel } => self.on_swipe_look(delta, travel),
            TouchIntent::Tap(p) => return Some(p),
        }
        None
    }

    fn blend_toward_target(&mut self, factor: f32) {
        if let Some(target) = YawPitch::looking_at(self.camera.position, self.target_look_at) {
            let blended = self.camera.orientation().blend_toward(target, factor);
            self.camera.set_orientation(blended);
        }
    }

    fn clamp_to_bounds(&mut self) {
        if let Some(bounds) = self.bounds {
            self.camera.position = bounds.clamp(self.camera.position);
        }
    }

    fn drive(&mut self, dt: f32) {
        if self.joystick.length() <= self.settings.deadzone {
            return;
        }
        let speed = self.settings.move_speed * dt;
        let forward = self.camera.planar_forward();
        let right = self.camera.planar_right();
        self.camera.position += forward * (-self.joystick.y * speed) + right * (self.joystick.x * speed);
        self.cancel_traversal();
        self.clamp_to_bounds();
    }

    fn traverse(&mut self, dt: f32) {
        if !self.traversing {
            return;
        }
        let blend = (dt * self.settings.orientation_blend_rate).min(1.0);
        let to_target = self.target_position - self.camera.position;
        let distance = to_target.length();
        if distance < self.settings.arrival_threshold {
            self.camera.position = self.target_position;
            self.traversing = false;
            self.blend_toward_target(blend);
            debug!(index = self.current_index, "arrived at waypoint");
            if self.auto_advance {
                self.dwell = Some(self.timer.schedule(self.settings.dwell_seconds));
            }
        } else {
            let step = (self.settings.auto_walk_speed * dt).min(distance);
            self.camera.position += to_target / distance * step;
            self.blend_toward_target(blend);
        }
    }
}

impl CameraController for GuidedController {
    /// Touch input needs no host capture, so locking always succeeds.
    fn lock(&mut self) -> Result<(), CaptureError> {
        if !self.locked {
            info!("guided controls locked");
        }
        self.locked = true;
        Ok(())
    }

    fn unlock(&mut self) {
        if self.locked {
            info!("guided controls unlocked");
        }
        self.locked = false;
        self.auto_advance = false;
        self.cancel_dwell();
        self.joystick = Vec2::ZERO;
        self.wheel_active = false;
    }

    fn is_locked(&self) -> bool {
        self.locked
    }

    fn set_bounds(&mut self, bounds: Bounds) {
        self.bounds = Some(bounds);
    }

    fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }

    fn update(&mut self, dt: f32) {
        if !self.locked {
            return;
        }
        if let Some(fired) = self.timer.tick(dt)
            && self.dwell == Some(fired)
        {
            self.dwell = None;
            if self.auto_advance && !self.traversing {
                self.advance();
            }
        }
        self.drive(dt);
        self.traverse(dt);
        self.clamp_to_bounds();
    }

    fn camera(&self) -> &Camera {
        &self.camera
    }

    fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use galleria_scene::{ItemId, ItemPlacement, ItemSize, RoomDimensions, RoomId, SpawnPoint, WallSide};

    fn room() -> Room {
        Room {
            id: RoomId::from("main"),
            name: String::new(),
            dimensions: RoomDimensions::new(10.0, 4.0, 8.0),
            spawn_point: SpawnPoint::default(),
        }
    }

    fn item(id: &str, wall: WallSide) -> ExhibitItem {
        ExhibitItem {
            id: ItemId::from(id),
            title: id.to_string(),
            description: String::new(),
            position: ItemPlacement {
                room: RoomId::from("main"),
                wall,
                x: 0.0,
                y: 1.6,
            },
            dimensions: ItemSize::default(),
            frame: None,
        }
    }

    fn four_walls() -> Vec<ExhibitItem> {
        WallSide::ALL
            .iter()
            .enumerate()
            .map(|(i, w)| item(&format!("item-{i}"), *w))
            .collect()
    }

    fn toured() -> GuidedController {
        let mut g = GuidedController::new(Camera::default(), GuidedSettings::default());
        g.set_waypoints(&four_walls(), &room());
        g.set_bounds(room().bounds(0.5));
        g.lock().unwrap();
        g
    }

    fn run_until_idle(g: &mut GuidedController) {
        for _ in 0..2000 {
            if !g.is_traversing() {
                return;
            }
            g.update(0.05);
        }
        panic!("traversal never finished");
    }

    #[test]
    fn test_set_waypoints_places_camera_at_first_stop() {
        let g = toured();
        assert_eq!(g.waypoints().len(), 4);
        let first = g.waypoints().get(0).unwrap();
        assert_eq!(g.camera().position, first.view_position);
        let dir = (first.look_at - first.view_position).normalize();
        assert!((g.camera().forward() - dir).length() < 1e-4);
        assert!(!g.is_traversing());
    }

    #[test]
    fn test_advance_and_retreat_wrap() {
        let mut g = toured();
        assert!(g.advance());
        assert_eq!(g.current_index(), 1);
        assert!(g.is_traversing());
        assert!(g.auto_advance_enabled());

        let mut g = toured();
        assert!(g.retreat());
        assert_eq!(g.current_index(), 3);
    }

    #[test]
    fn test_advance_cycles_back_to_start() {
        let mut g = toured();
        let n = g.waypoints().len();
        for _ in 0..n {
            g.advance();
        }
        assert_eq!(g.current_index(), 0);
        for _ in 0..n {
            g.retreat();
        }
        assert_eq!(g.current_index(), 0);
    }

    #[test]
    fn test_empty_tour_is_inert() {
        let mut g = GuidedController::new(Camera::default(), GuidedSettings::default());
        g.set_waypoints(&[], &room());
        g.lock().unwrap();
        assert!(!g.advance());
        assert!(!g.retreat());
        assert!(!g.toggle_auto_walk());
        assert!(!g.is_traversing());
        assert!(!g.auto_advance_enabled());
    }

    #[test]
    fn test_joystick_cancels_traversal_in_same_update() {
        let mut g = toured();
        g.advance();
        g.update(0.016);
        assert!(g.is_traversing());
        g.joystick = Vec2::new(0.0, -0.5);
        g.update(0.016);
        assert!(!g.is_traversing());
        assert!(!g.auto_advance_enabled());
    }

    #[test]
    fn test_set_joystick_above_deadzone_cancels_immediately() {
        let mut g = toured();
        g.advance();
        g.set_joystick(Vec2::new(0.03, 0.0));
        assert!(g.is_traversing());
        g.set_joystick(Vec2::new(0.2, 0.0));
        assert!(!g.is_traversing());
        assert!(!g.auto_advance_enabled());
    }

    #[test]
    fn test_joystick_moves_on_floor_plane() {
        let mut g = toured();
        g.camera_mut().position = Vec3::new(0.0, 1.6, 0.0);
        g.camera_mut().set_orientation(YawPitch::new(0.0, -0.8));
        g.set_joystick(Vec2::new(0.0, -1.0));
        g.update(0.5);
        let p = g.camera().position;
        assert!((p.z + 1.75).abs() < 1e-5, "{p:?}");
        assert!(p.x.abs() < 1e-5);
        assert_eq!(p.y, 1.6);
    }

    #[test]
    fn test_joystick_magnitude_clamped() {
        let mut g = toured();
        g.set_joystick(Vec2::new(3.0, 4.0));
        assert!((g.joystick().length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_traversal_reaches_target_and_faces_item() {
        let mut g = toured();
        g.advance();
        run_until_idle(&mut g);
        let wp = g.waypoints().get(1).unwrap().clone();
        assert_eq!(g.camera().position, wp.view_position);
        let dir = (wp.look_at - wp.view_position).normalize();
        assert!((g.camera().forward() - dir).length() < 1e-2);
    }

    #[test]
    fn test_traversal_step_never_overshoots() {
        let mut g = toured();
        g.advance();
        let target = g.waypoints().get(1).unwrap().view_position;
        let before = (target - g.camera().position).length();
        assert!(before > 0.1);
        g.update(10.0);
        assert!((g.camera().position - target).length() < 1e-4);
        assert!(g.is_traversing());
    }

    #[test]
    fn test_dwell_then_auto_advance() {
        let mut g = toured();
        g.advance();
        run_until_idle(&mut g);
        assert_eq!(g.current_index(), 1);
        assert!(g.has_pending_advance());
        g.update(1.5);
        assert!(!g.is_traversing());
        g.update(1.6);
        assert!(g.is_traversing());
        assert_eq!(g.current_index(), 2);
    }

    #[test]
    fn test_manual_input_invalidates_pending_advance() {
        let mut g = toured();
        g.advance();
        run_until_idle(&mut g);
        assert!(g.has_pending_advance());
        g.begin_rotation_drag();
        g.on_rotation_drag(10.0);
        assert!(!g.has_pending_advance());
        g.update(5.0);
        assert!(!g.is_traversing());
        assert_eq!(g.current_index(), 1);
    }

    #[test]
    fn test_swipe_within_threshold_keeps_tour() {
        let mut g = toured();
        g.advance();
        g.on_swipe_look(Vec2::new(1.0, 0.0), 1.0);
        g.on_swipe_look(Vec2::new(0.5, 0.0), 1.5);
        assert!(g.is_traversing());
        assert!(g.auto_advance_enabled());
        g.on_swipe_look(Vec2::new(5.0, 0.0), 6.5);
        assert!(!g.is_traversing());
    }

    #[test]
    fn test_slow_swipe_cancels_once_travel_passes_threshold() {
        let mut g = toured();
        g.advance();
        let mut travel = 0.0;
        for _ in 0..100 {
            travel += 1.5;
            g.apply_touch(TouchIntent::Look {
                delta: Vec2::new(1.5, 0.0),
                travel,
            });
        }
        assert!(!g.is_traversing());
        assert!(!g.auto_advance_enabled());

        let yaw = g.camera().orientation().yaw;
        g.update(0.5);
        assert_eq!(g.camera().orientation().yaw, yaw);
    }

    #[test]
    fn test_stale_dwell_token_does_not_advance() {
        let mut g = toured();
        g.advance();
        run_until_idle(&mut g);
        assert!(g.has_pending_advance());
        // A fresh advance supersedes the dwell scheduled on arrival.
        g.advance();
        assert!(!g.has_pending_advance());
        assert_eq!(g.current_index(), 2);
        g.update(0.01);
        assert_eq!(g.current_index(), 2);
        assert!(g.is_traversing());
    }

    #[test]
    fn test_rotation_wheel_changes_yaw_only() {
        let mut g = toured();
        g.camera_mut().set_orientation(YawPitch::new(0.0, 0.2));
        g.apply_touch(TouchIntent::WheelGrabbed);
        g.apply_touch(TouchIntent::Wheel { dx: 10.0 });
        let o = g.camera().orientation();
        assert!((o.yaw + 0.12).abs() < 1e-6);
        assert!((o.pitch - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_toggle_auto_walk_reports_new_state() {
        let mut g = toured();
        assert!(g.toggle_auto_walk());
        assert!(g.is_traversing());
        assert_eq!(g.current_index(), 1);
        assert!(!g.toggle_auto_walk());
        assert!(g.is_traversing());
    }

    #[test]
    fn test_unlock_stops_auto_walk_and_freezes_update() {
        let mut g = toured();
        g.advance();
        g.unlock();
        assert!(!g.auto_advance_enabled());
        let before = g.camera().position;
        g.update(1.0);
        assert_eq!(g.camera().position, before);
    }

    #[test]
    fn test_tap_is_returned_to_caller() {
        let mut g = toured();
        let p = Vec2::new(100.0, 50.0);
        assert_eq!(g.apply_touch(TouchIntent::Tap(p)), Some(p));
        assert_eq!(g.apply_touch(TouchIntent::JoystickReleased), None);
    }
}
