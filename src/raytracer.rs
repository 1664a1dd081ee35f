use crate::{
    algebra::Vec2,
    color::{channel, Color},
    framebuffer::FrameBuffer,
    light::Light,
    ray::{Ray, RayHit},
    scene::Scene,
};
use rayon::prelude::*;
use std::f32::consts::PI;
use tracing::debug;

const MAX_DEPTH: u32 = 3;
const SHADOW_RAYS: u32 = 8;

pub const AMBIENT_INTENSITY: f32 = 0.2;
pub const DIFFUSE_INTENSITY: f32 = 0.8;
pub const SPECULAR_INTENSITY: f32 = 0.3;

/// Returned by rays that leave the scene without hitting anything.
pub const BACKGROUND: Color = Color::rgb(20, 20, 40);

/// Every camera ray starts here, the top-left corner of the viewport.
pub const CAMERA_ORIGIN: Vec2 = Vec2::ZERO;

/// Radius of the disc drawn over the light position.
pub const LIGHT_RADIUS: f32 = 30.0;

/// Per-pixel ray tracer: one camera ray per sample, one shadow ray per hit.
#[derive(Clone, Debug)]
pub struct RayTracer {
    pub max_depth: u32,
    /// Reserved for soft shadows; no algorithm reads it yet.
    pub shadow_rays: u32,
    pub anti_aliasing: bool,
    pub ambient_intensity: f32,
    pub diffuse_intensity: f32,
    /// Reserved for a specular term; no algorithm reads it yet.
    pub specular_intensity: f32,
}

impl Default for RayTracer {
    fn default() -> Self {
        Self {
            max_depth: MAX_DEPTH,
            shadow_rays: SHADOW_RAYS,
            anti_aliasing: false,
            ambient_intensity: AMBIENT_INTENSITY,
            diffuse_intensity: DIFFUSE_INTENSITY,
            specular_intensity: SPECULAR_INTENSITY,
        }
    }
}

impl RayTracer {
    pub fn set_max_depth(&mut self, depth: u32) { self.max_depth = depth; }
    pub fn set_shadow_rays(&mut self, rays: u32) { self.shadow_rays = rays; }
    pub fn set_anti_aliasing(&mut self, enabled: bool) { self.anti_aliasing = enabled; }

    /// Distance between sample points in both axes.
    pub fn pixel_step(&self) -> u32 {
        if self.anti_aliasing { 1 } else { 2 }
    }

    /// Sweeps the sample grid, then draws the light and the sphere outline on top.
    pub fn render_scene(&self, scene: &Scene, fb: &mut FrameBuffer) {
        let step = self.pixel_step();
        let (width, height) = (fb.width(), fb.height());
        debug!(width, height, step, max_depth = self.max_depth, "ray tracing sweep");

        fb.clear(Color::BLACK);

        let ys: Vec<u32> = (0..height).step_by(step as usize).collect();
        let cells: Vec<_> = ys.into_par_iter().flat_map(|y| {
            let mut row = Vec::with_capacity((width / step + 1) as usize);
            for x in (0..width).step_by(step as usize) {
                let sample = Vec2(x as f32, y as f32);
                let ray = Ray::new(CAMERA_ORIGIN, sample.sub(CAMERA_ORIGIN));
                row.push(((x, y), self.trace_ray(&ray, scene, 0)));
            }
            row
        }).collect();

        for ((x, y), color) in cells { fb.fill_cell(x, y, step, color); }

        let light = scene.light();
        let sphere = scene.sphere();
        fb.fill_disc(light.pos, LIGHT_RADIUS, light.color());
        fb.stroke_circle(sphere.center, sphere.radius(), 1.0, Color::WHITE);
    }

    /// Color seen along `ray`. Only direct light is computed; `depth` guards
    /// any future reflection or refraction bounce.
    pub fn trace_ray(&self, ray: &Ray, scene: &Scene, depth: u32) -> Color {
        if depth >= self.max_depth {
            return Color::BLACK;
        }

        let hit = self.find_closest_hit(ray, scene);
        if !hit.hit {
            return BACKGROUND;
        }

        let lighting = self.calculate_lighting(hit.point, hit.normal, scene);
        scene.sphere().material().modulate(lighting)
    }

    /// Gray light level at a surface point: ambient, plus attenuated diffuse
    /// when the light is visible.
    pub fn calculate_lighting(&self, point: Vec2, normal: Vec2, scene: &Scene) -> Color {
        let light = scene.light();
        let ambient = Color::gray(self.ambient_intensity);

        if self.is_in_shadow(point, light, scene) {
            return ambient;
        }

        let distance = point.distance(light.pos);
        let attenuation = 1.0 / (1.0 + 0.01 * distance + 0.001 * distance * distance);
        let light_dir = light.pos.sub(point).normalize();
        let diffuse_dot = normal.dot(light_dir).max(0.0);

        let d = channel(255.0 * self.diffuse_intensity * diffuse_dot * attenuation);
        ambient.saturating_add(Color::rgb(d, d, d))
    }

    /// True when the sphere sits strictly between `point` and the light.
    pub fn is_in_shadow(&self, point: Vec2, light: &Light, scene: &Scene) -> bool {
        let distance = point.distance(light.pos);
        let shadow_ray = Ray::with_max_distance(point, light.pos.sub(point), distance);
        let hit = self.find_closest_hit(&shadow_ray, scene);
        hit.hit && hit.distance < distance
    }

    /// Single-object world, so this is just the sphere test. With several
    /// objects it becomes a scan keeping the smallest positive distance.
    pub fn find_closest_hit(&self, ray: &Ray, scene: &Scene) -> RayHit {
        scene.sphere().intersect(ray)
    }

    /// `n` rays fanned evenly around the light, starting along +x.
    pub fn rays_from_light(&self, light: &Light, n: u32) -> Vec<Ray> {
        self.rays_from_point(light.pos, n)
    }

    pub fn rays_from_point(&self, origin: Vec2, n: u32) -> Vec<Ray> {
        let angle_step = 2.0 * PI / n as f32;
        (0..n)
            .map(|i| Ray::new(origin, Vec2::from_angle(i as f32 * angle_step)))
            .collect()
    }
}
