//! One sphere, one light, and the smoothed movement that drives them.

use crate::{algebra::Vec2, color::Color, light::Light, sphere::Sphere};
use tracing::trace;

pub const DEFAULT_MOVE_SPEED: f32 = 5.0;
pub const DEFAULT_SMOOTHNESS: f32 = 0.1;
pub const SPHERE_RADIUS: f32 = 100.0;
pub const SPHERE_MATERIAL: Color = Color::rgb(220, 60, 60);
pub const LIGHT_COLOR: Color = Color::rgb(255, 255, 200);
pub const LIGHT_START: Vec2 = Vec2(400.0, 300.0);
/// Pointer to sphere-target offset; the sphere trails up-left of the cursor.
pub const POINTER_OFFSET: Vec2 = Vec2(100.0, 100.0);

/// Public world state
pub struct Scene {
    sphere: Sphere,
    light: Light,
    pub move_speed: f32,
    pub smoothness: f32,
    pub pointer_offset: Vec2,
    target: Vec2,
}

impl Scene {
    /// The target starts at the origin whatever the sphere position, so an
    /// offset sphere drifts there until the first input arrives.
    pub fn new(sphere: Sphere, light: Light) -> Self {
        Self {
            target: Vec2::ZERO,
            sphere,
            light,
            move_speed: DEFAULT_MOVE_SPEED,
            smoothness: DEFAULT_SMOOTHNESS,
            pointer_offset: POINTER_OFFSET,
        }
    }

    pub fn sphere(&self) -> &Sphere { &self.sphere }
    pub fn light(&self) -> &Light { &self.light }
    pub fn target_position(&self) -> Vec2 { self.target }

    /// Moves the sphere a fixed fraction of the way to its target.
    ///
    /// `_dt` is not used: motion is per call, so it speeds up with the frame
    /// rate. The light movement in [`Scene::handle_input`] behaves the same.
    pub fn update(&mut self, _dt: f32) {
        let pos = self.sphere.center;
        self.sphere.center = pos.add(self.target.sub(pos).scale(self.smoothness));
        trace!(x = self.sphere.center.0, y = self.sphere.center.1, "sphere moved");
    }

    pub fn handle_input(&mut self, pointer: Vec2, left: bool, right: bool, up: bool, down: bool) {
        self.target = pointer.sub(self.pointer_offset);

        let mut pos = self.light.pos;
        if left  { pos.0 -= self.move_speed; }
        if right { pos.0 += self.move_speed; }
        if up    { pos.1 -= self.move_speed; }
        if down  { pos.1 += self.move_speed; }
        self.light.pos = pos;
    }

    pub fn set_light_position(&mut self, pos: Vec2) {
        self.light.pos = pos;
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(
            Sphere::new(Vec2::ZERO, SPHERE_RADIUS, SPHERE_MATERIAL),
            Light::new(LIGHT_START, LIGHT_COLOR),
        )
    }
}
