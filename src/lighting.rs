//! Analytic 2D lighting.
//!
//! No rays are marched here. Occlusion is decided by comparing the angle
//! between the light→point and light→sphere directions against the half-angle
//! the sphere subtends at the light, and brightness falls off linearly with
//! distance. It is cheaper than [`crate::raytracer`] and deliberately looks
//! different.

use crate::{
    algebra::{clamp, Vec2},
    color::{channel, Color},
    light::Light,
    scene::Scene,
    sphere::Sphere,
};

/// Ambient term added to every lit point (0.0-1.0).
pub const AMBIENT_LIGHT: f32 = 0.3;

/// Multiplier on the linear distance falloff before clamping.
pub const DIFFUSE_INTENSITY: f32 = 2.0;

/// Distance at which the falloff reaches zero.
pub const MAX_LIGHT_DISTANCE: f32 = 800.0;

/// Color of points inside the shadow cone.
pub const SHADOW_COLOR: Color = Color::rgb(10, 10, 10);

#[derive(Clone, Copy, Debug)]
pub struct AnalyticLighting {
    pub ambient_light: f32,
    pub diffuse_intensity: f32,
    pub max_light_distance: f32,
}

impl Default for AnalyticLighting {
    fn default() -> Self {
        Self {
            ambient_light: AMBIENT_LIGHT,
            diffuse_intensity: DIFFUSE_INTENSITY,
            max_light_distance: MAX_LIGHT_DISTANCE,
        }
    }
}

impl AnalyticLighting {
    /// Scalar brightness in `[0, 1]` from distance alone, ignoring shadows.
    pub fn calculate_lighting(&self, point: Vec2, light: &Light) -> f32 {
        let falloff = clamp(1.0 - point.distance(light.pos) / self.max_light_distance, 0.0, 1.0);
        clamp(self.ambient_light + self.diffuse_intensity * falloff, 0.0, 1.0)
    }

    /// Solid red fill used for the sphere in the basic view, judged at its center.
    pub fn sphere_color(&self, sphere: &Sphere, light: &Light) -> Color {
        Color::rgb(channel(255.0 * self.calculate_lighting(sphere.center, light)), 0, 0)
    }

    pub fn is_point_in_shadow(&self, point: Vec2, light: &Light, sphere: &Sphere) -> bool {
        let to_point = point.sub(light.pos);
        let to_sphere = sphere.center.sub(light.pos);
        let dist_to_point = to_point.norm();
        let dist_to_sphere = to_sphere.norm();

        // Nearer than the occluder.
        if dist_to_point < dist_to_sphere {
            return false;
        }
        if dist_to_point == 0.0 || dist_to_sphere == 0.0 {
            return false;
        }

        // Light inside the sphere: asin has no answer, so there is no cone.
        let sine = sphere.radius() / dist_to_sphere;
        if sine > 1.0 {
            return false;
        }

        let cos_angle = clamp(to_point.dot(to_sphere) / (dist_to_point * dist_to_sphere), -1.0, 1.0);
        cos_angle.acos() < sine.asin()
    }

    pub fn calculate_2d_lighting(&self, point: Vec2, light: &Light, sphere: &Sphere) -> Color {
        if self.is_point_in_shadow(point, light, sphere) {
            return SHADOW_COLOR;
        }

        let intensity = channel(255.0 * self.calculate_lighting(point, light));
        Color::rgb(
            intensity,
            channel(intensity as f32 * 0.9),
            channel(intensity as f32 * 0.6),
        )
    }

    pub fn calculate_2d_lighting_in(&self, point: Vec2, scene: &Scene) -> Color {
        self.calculate_2d_lighting(point, scene.light(), scene.sphere())
    }
}
