//! One visit to the gallery.
//!
//! The session owns the active controller, the pick surfaces and the hover
//! state. Input events are staged on the controller as they arrive;
//! [`GallerySession::frame`] integrates motion and recomputes hover once per
//! frame.

use std::collections::VecDeque;

use glam::Vec2;
use tracing::{debug, info};

use galleria_config::{Config, ControlScheme};
use galleria_input::{InputEvent, TouchLayout, TouchRouter};
use galleria_interact::{
    Aim, HoverChange, HoverTracker, InteractionEvent, InteractionResolver, QuadScene,
    SurfaceRegistry,
};
use galleria_math::Camera;
use galleria_player::{
    CameraController, CaptureError, ContinuousController, ContinuousSettings, Controller,
    GuidedController, GuidedSettings, PointerCapture,
};
use galleria_scene::{
    GalleryLayout, ItemId, LayoutError, PlacementResolver, Room, WaypointBuilder,
};

/// Gallery description bundled with the binary.
pub const DEMO_GALLERY: &str = include_str!("../../../demos/gallery-config.json");

/// Navigation and interaction state for one gallery room.
#[derive(Debug)]
pub struct GallerySession {
    layout: GalleryLayout,
    room: Room,
    controller: Controller,
    surfaces: QuadScene,
    registry: SurfaceRegistry,
    resolver: InteractionResolver,
    hover: HoverTracker,
    touch: TouchRouter,
    viewport: Vec2,
    detail: Option<ItemId>,
    events: VecDeque<InteractionEvent>,
}

impl GallerySession {
    /// Build a session in the layout's entry room using `config`.
    pub fn new(layout: GalleryLayout, config: &Config) -> Result<Self, LayoutError> {
        let room = layout.entry_room()?.clone();
        let viewport = Vec2::new(
            config.camera.viewport_width as f32,
            config.camera.viewport_height as f32,
        );
        let camera = Camera::new(
            room.spawn_point.into(),
            config.camera.fov_y_degrees.to_radians(),
            config.camera.aspect(),
        );
        let placement = PlacementResolver::new(config.layout.wall_inset);

        let mut controller = match config.session.scheme {
            ControlScheme::Continuous => {
                let c = &config.controls.continuous;
                Controller::from(ContinuousController::new(
                    camera,
                    ContinuousSettings {
                        move_speed: c.move_speed,
                        look_speed: c.look_speed,
                    },
                ))
            }
            ControlScheme::Guided => {
                let builder = WaypointBuilder {
                    view_distance: config.layout.view_distance,
                    eye_height: config.layout.eye_height,
                    excluded: config.layout.cover_item.as_deref().map(ItemId::from),
                    resolver: placement,
                };
                let mut guided = GuidedController::new(camera, guided_settings(config))
                    .with_waypoint_builder(builder);
                guided.set_waypoints(&layout.items, &room);
                Controller::from(guided)
            }
        };
        controller.set_bounds(room.bounds(config.layout.bounds_margin));

        let (surfaces, registry) = QuadScene::from_layout(&layout, &placement);
        let touch = TouchRouter::new(
            TouchLayout::for_viewport(viewport, config.controls.guided.joystick_radius),
            config.controls.guided.swipe_threshold,
        );

        info!(
            room = %room.id,
            scheme = ?config.session.scheme,
            items = layout.items.len(),
            "gallery session ready"
        );
        Ok(Self {
            layout,
            room,
            controller,
            surfaces,
            registry,
            resolver: InteractionResolver::new(config.interaction.max_hover_distance),
            hover: HoverTracker::new(),
            touch,
            viewport,
            detail: None,
            events: VecDeque::new(),
        })
    }

    /// Route pointer capture through `capture` (continuous scheme only).
    pub fn set_pointer_capture(&mut self, capture: impl PointerCapture + 'static) {
        if let Controller::Continuous(c) = &mut self.controller {
            c.set_capture(capture);
        }
    }

    #[must_use]
    pub fn layout(&self) -> &GalleryLayout {
        &self.layout
    }

    #[must_use]
    pub fn room(&self) -> &Room {
        &self.room
    }

    #[must_use]
    pub fn scheme(&self) -> ControlScheme {
        match self.controller {
            Controller::Continuous(_) => ControlScheme::Continuous,
            Controller::Guided(_) => ControlScheme::Guided,
        }
    }

    #[must_use]
    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut Controller {
        &mut self.controller
    }

    #[must_use]
    pub fn camera(&self) -> &Camera {
        self.controller.camera()
    }

    #[must_use]
    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    /// Resize the viewport: camera aspect and touch widget placement follow.
    pub fn set_viewport(&mut self, viewport: Vec2) {
        self.viewport = viewport;
        if viewport.y > 0.0 {
            self.controller.camera_mut().aspect = viewport.x / viewport.y;
        }
        let radius = self.touch.layout().joystick_radius;
        self.touch.set_layout(TouchLayout::for_viewport(viewport, radius));
    }

    /// Enable input.
    pub fn lock(&mut self) -> Result<(), CaptureError> {
        self.controller.lock()
    }

    /// Disable input and drop any hover.
    pub fn unlock(&mut self) {
        self.controller.unlock();
        self.clear_hover();
    }

    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.controller.is_locked()
    }

    /// Locked and no detail view open.
    #[must_use]
    pub fn is_interactive(&self) -> bool {
        self.controller.is_locked() && self.detail.is_none()
    }

    #[must_use]
    pub fn hovered_item(&self) -> Option<&ItemId> {
        self.hover.hovered_item()
    }

    /// The item shown in the detail view, if open.
    #[must_use]
    pub fn detail_item(&self) -> Option<&ItemId> {
        self.detail.as_ref()
    }

    /// Take the notifications produced since the last call.
    pub fn drain_events(&mut self) -> Vec<InteractionEvent> {
        self.events.drain(..).collect()
    }

    /// Stage one input event.
    pub fn handle_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::Key(key) => {
                if let Some(c) = self.controller.as_continuous_mut() {
                    c.on_key(key);
                }
            }
            InputEvent::PointerMotion { dx, dy } => {
                if let Some(c) = self.controller.as_continuous_mut() {
                    c.on_pointer_motion(dx, dy);
                }
            }
            InputEvent::Click { x, y } => {
                let aim = match self.scheme() {
                    ControlScheme::Continuous => Aim::Center,
                    ControlScheme::Guided => Aim::Screen {
                        point: Vec2::new(x, y),
                        viewport: self.viewport,
                    },
                };
                self.activate(aim);
            }
            InputEvent::Touch(touch) => {
                let Some(intent) = self.touch.handle(touch) else {
                    return;
                };
                let tap = self
                    .controller
                    .as_guided_mut()
                    .and_then(|g| g.apply_touch(intent));
                if let Some(point) = tap {
                    self.activate(Aim::Screen {
                        point,
                        viewport: self.viewport,
                    });
                }
            }
            InputEvent::CaptureLost => {
                if let Some(c) = self.controller.as_continuous_mut() {
                    c.on_capture_lost();
                }
                self.clear_hover();
            }
        }
    }

    /// Advance one frame of `dt` seconds.
    pub fn frame(&mut self, dt: f32) {
        self.controller.update(dt);
        self.update_hover();
    }

    /// Resolve an activation at `aim`. On a hit the detail view opens and
    /// the controller unlocks.
    pub fn activate(&mut self, aim: Aim) -> Option<ItemId> {
        if self.detail.is_some() {
            return None;
        }
        if self.scheme() == ControlScheme::Continuous && !self.controller.is_locked() {
            return None;
        }
        let hit = self.resolver.resolve_hit(
            aim,
            self.controller.camera(),
            &self.surfaces,
            &self.registry,
        )?;
        info!(item = %hit.item, distance = hit.distance, "item activated");
        self.detail = Some(hit.item.clone());
        self.events
            .push_back(InteractionEvent::Activated(hit.item.clone()));
        self.unlock();
        Some(hit.item)
    }

    /// Close the detail view and re-enable input.
    pub fn close_detail(&mut self) -> Result<(), CaptureError> {
        match self.detail.take() {
            Some(item) => {
                debug!(item = %item, "detail view closed");
                self.controller.lock()
            }
            None => Ok(()),
        }
    }

    /// Walk to the next tour stop (guided scheme).
    pub fn advance(&mut self) -> bool {
        self.controller
            .as_guided_mut()
            .is_some_and(GuidedController::advance)
    }

    /// Walk to the previous tour stop (guided scheme).
    pub fn retreat(&mut self) -> bool {
        self.controller
            .as_guided_mut()
            .is_some_and(GuidedController::retreat)
    }

    /// Flip auto-walk; returns the new state (guided scheme).
    pub fn toggle_auto_walk(&mut self) -> bool {
        self.controller
            .as_guided_mut()
            .is_some_and(GuidedController::toggle_auto_walk)
    }

    fn update_hover(&mut self) {
        let hit = if self.is_interactive() && self.scheme() == ControlScheme::Continuous {
            self.resolver.resolve_hover(
                Aim::Center,
                self.controller.camera(),
                &self.surfaces,
                &self.registry,
            )
        } else {
            None
        };
        if let Some(change) = self.hover.update(hit) {
            self.push_hover_change(change);
        }
    }

    fn clear_hover(&mut self) {
        if let Some(change) = self.hover.clear() {
            self.push_hover_change(change);
        }
    }

    fn push_hover_change(&mut self, change: HoverChange) {
        self.events.extend(change.into_events());
    }
}

fn guided_settings(config: &Config) -> GuidedSettings {
    let g = &config.controls.guided;
    GuidedSettings {
        move_speed: g.move_speed,
        look_speed: g.look_speed,
        rotation_speed: g.rotation_speed,
        auto_walk_speed: g.auto_walk_speed,
        deadzone: g.joystick_deadzone,
        swipe_threshold: g.swipe_threshold,
        arrival_threshold: g.arrival_threshold,
        dwell_seconds: g.dwell_seconds,
        orientation_blend_rate: g.orientation_blend_rate,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use galleria_input::RawKeyEvent;
    use glam::Vec3;
    use winit::event::ElementState;
    use winit::keyboard::KeyCode;

    const ONE_ITEM: &str = r#"{
        "rooms": [{ "id": "main", "dimensions": { "width": 10, "height": 4, "depth": 8 },
                    "spawnPoint": { "x": 0, "y": 1.6, "z": 2 } }],
        "photos": [
            { "id": "north", "position": { "room": "main", "wall": "north", "x": 0, "y": 1.6 } }
        ]
    }"#;

    fn session(scheme: ControlScheme) -> GallerySession {
        let mut config = Config::default();
        config.session.scheme = scheme;
        GallerySession::new(GalleryLayout::from_json_str(ONE_ITEM).unwrap(), &config).unwrap()
    }

    #[test]
    fn test_demo_gallery_parses() {
        let layout = GalleryLayout::from_json_str(DEMO_GALLERY).unwrap();
        assert!(!layout.items.is_empty());
        GallerySession::new(layout, &Config::default()).unwrap();
    }

    #[test]
    fn test_starts_at_spawn_unlocked() {
        let s = session(ControlScheme::Continuous);
        assert_eq!(s.camera().position, Vec3::new(0.0, 1.6, 2.0));
        assert!(!s.is_locked());
        assert!(s.controller().bounds().is_some());
    }

    #[test]
    fn test_no_hover_while_unlocked() {
        let mut s = session(ControlScheme::Continuous);
        s.controller_mut().camera_mut().position = Vec3::new(0.0, 1.6, 0.0);
        s.frame(0.016);
        assert!(s.hovered_item().is_none());
        s.lock().unwrap();
        s.frame(0.016);
        assert_eq!(s.hovered_item(), Some(&ItemId::from("north")));
    }

    #[test]
    fn test_key_walk_brings_item_into_hover() {
        let mut s = session(ControlScheme::Continuous);
        s.lock().unwrap();
        s.handle_input(InputEvent::Key(RawKeyEvent::code(KeyCode::KeyW, ElementState::Pressed)));
        s.frame(0.2);
        assert_eq!(s.hovered_item(), Some(&ItemId::from("north")));
        assert_eq!(
            s.drain_events(),
            vec![InteractionEvent::HoverEntered(ItemId::from("north"))]
        );
    }
}
