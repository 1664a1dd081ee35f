use crate::{
    algebra::Vec2,
    color::{channel, Color},
    framebuffer::FrameBuffer,
    lighting::AnalyticLighting,
    raytracer::{RayTracer, LIGHT_RADIUS},
    scene::Scene,
};
use rand::Rng;
use rayon::prelude::*;
use serde::Deserialize;
use std::f32::consts::PI;
use tracing::debug;

/// Grid step of the analytic sweep. Unlike the ray tracer it has no
/// anti-aliasing switch.
const ANALYTIC_STEP: u32 = 2;
const ALL_RAYS: u32 = 36;
const RIM_RAYS: u32 = 12;

/// Which lighting philosophy draws the frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum RenderMode {
    /// Flat red disc plus the debug ray overlay.
    Basic,
    /// Shadow cone and linear falloff, see [`AnalyticLighting`].
    Analytic,
    /// Camera and shadow rays, see [`RayTracer`].
    RayTraced,
}

impl RenderMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Analytic => "analytic",
            Self::RayTraced => "ray-traced",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RayDisplayMode {
    None,
    SphereOnly,
    AllRays,
    Both,
}

impl RayDisplayMode {
    pub fn next(self) -> Self {
        match self {
            Self::None => Self::SphereOnly,
            Self::SphereOnly => Self::AllRays,
            Self::AllRays => Self::Both,
            Self::Both => Self::None,
        }
    }
}

/// Presentation state: which model runs and which overlays are on. The
/// lighting models themselves stay stateless.
pub struct Renderer {
    pub analytic: AnalyticLighting,
    pub ray_tracer: RayTracer,
    show_debug: bool,
    mode_2d: bool,
    ray_traced: bool,
    ray_display: RayDisplayMode,
}

impl Default for Renderer {
    fn default() -> Self {
        Self {
            analytic: AnalyticLighting::default(),
            ray_tracer: RayTracer::default(),
            show_debug: true,
            mode_2d: false,
            ray_traced: false,
            ray_display: RayDisplayMode::AllRays,
        }
    }
}

impl Renderer {
    /// Ray tracing wins over 2D mode; with neither on the basic view is drawn.
    pub fn mode(&self) -> RenderMode {
        if self.ray_traced {
            RenderMode::RayTraced
        } else if self.mode_2d {
            RenderMode::Analytic
        } else {
            RenderMode::Basic
        }
    }

    pub fn set_mode(&mut self, mode: RenderMode) {
        self.mode_2d = mode == RenderMode::Analytic;
        self.ray_traced = mode == RenderMode::RayTraced;
    }

    pub fn toggle_2d_mode(&mut self) {
        self.mode_2d = !self.mode_2d;
        if self.mode_2d {
            self.ray_traced = false;
        }
    }

    pub fn toggle_ray_tracing(&mut self) {
        self.ray_traced = !self.ray_traced;
        if self.ray_traced {
            self.mode_2d = false;
        }
    }

    pub fn is_2d_mode(&self) -> bool { self.mode_2d }
    pub fn is_ray_tracing(&self) -> bool { self.ray_traced }

    pub fn toggle_debug_mode(&mut self) { self.show_debug = !self.show_debug; }
    pub fn set_debug_mode(&mut self, on: bool) { self.show_debug = on; }
    pub fn is_debug_mode(&self) -> bool { self.show_debug }

    pub fn set_ray_display_mode(&mut self, mode: RayDisplayMode) { self.ray_display = mode; }
    pub fn ray_display_mode(&self) -> RayDisplayMode { self.ray_display }
    pub fn cycle_ray_display_mode(&mut self) { self.ray_display = self.ray_display.next(); }

    pub fn render_scene(&self, scene: &Scene, fb: &mut FrameBuffer) {
        match self.mode() {
            RenderMode::RayTraced => self.ray_tracer.render_scene(scene, fb),
            RenderMode::Analytic => self.render_2d_scene(scene, fb),
            RenderMode::Basic => self.render_basic(scene, fb),
        }
    }

    /// Analytic sweep: every cell lit by [`AnalyticLighting::calculate_2d_lighting`].
    pub fn render_2d_scene(&self, scene: &Scene, fb: &mut FrameBuffer) {
        let (width, height) = (fb.width(), fb.height());
        let light = scene.light();
        let sphere = scene.sphere();
        debug!(width, height, step = ANALYTIC_STEP, "analytic sweep");

        fb.clear(Color::BLACK);

        let ys: Vec<u32> = (0..height).step_by(ANALYTIC_STEP as usize).collect();
        let cells: Vec<_> = ys.into_par_iter().flat_map(|y| {
            (0..width).step_by(ANALYTIC_STEP as usize).map(|x| {
                let p = Vec2(x as f32, y as f32);
                ((x, y), self.analytic.calculate_2d_lighting(p, light, sphere))
            }).collect::<Vec<_>>()
        }).collect();

        for ((x, y), color) in cells { fb.fill_cell(x, y, ANALYTIC_STEP, color); }

        fb.stroke_circle(sphere.center, sphere.radius(), 2.0, Color::WHITE);
        render_light(scene, fb);
    }

    pub fn render_basic(&self, scene: &Scene, fb: &mut FrameBuffer) {
        fb.clear(Color::BLACK);

        if self.show_debug {
            match self.ray_display {
                RayDisplayMode::None => {}
                RayDisplayMode::SphereOnly => self.draw_rays(scene, fb),
                RayDisplayMode::AllRays => self.draw_all_rays(scene, fb),
                RayDisplayMode::Both => {
                    self.draw_all_rays(scene, fb);
                    self.draw_rays(scene, fb);
                }
            }
        }

        let sphere = scene.sphere();
        fb.fill_disc(sphere.center, sphere.radius(), self.analytic.sphere_color(sphere, scene.light()));
        render_light(scene, fb);
    }

    /// Fan of rays out to the falloff distance, tinted by the light level there.
    fn draw_all_rays(&self, scene: &Scene, fb: &mut FrameBuffer) {
        let light = scene.light();
        for ray in self.ray_tracer.rays_from_light(light, ALL_RAYS) {
            let end = ray.point_at(self.analytic.max_light_distance);
            let l = self.analytic.calculate_lighting(end, light);
            let color = Color::rgba(
                channel(255.0 * l * 0.5),
                channel(255.0 * l * 0.4),
                0,
                channel(50.0 + 150.0 * l),
            );
            fb.draw_line(light.pos, end, 2, color);
        }
    }

    /// Rays to the sphere center and around its rim, plus the falloff circle.
    fn draw_rays(&self, scene: &Scene, fb: &mut FrameBuffer) {
        let light = scene.light();
        let sphere = scene.sphere();
        fb.draw_line(light.pos, sphere.center, 2, Color::rgba(255, 255, 0, 150));

        let angle_step = 2.0 * PI / RIM_RAYS as f32;
        for i in 0..RIM_RAYS {
            let rim = sphere.center.add(Vec2::from_angle(i as f32 * angle_step).scale(sphere.radius()));
            let l = self.analytic.calculate_lighting(rim, light);
            let color = Color::rgba(
                channel(255.0 * l),
                channel(255.0 * l * 0.5),
                0,
                channel(100.0 + 155.0 * l),
            );
            fb.draw_line(light.pos, rim, 2, color);
        }

        fb.stroke_circle(light.pos, self.analytic.max_light_distance, 1.0, Color::rgba(255, 255, 0, 50));
    }
}

fn render_light(scene: &Scene, fb: &mut FrameBuffer) {
    let light = scene.light();
    fb.fill_disc(light.pos, LIGHT_RADIUS, light.color());
}

pub fn render_image_name(mode: RenderMode, frame: u32) -> String {
    let suf: String = rand::thread_rng()
        .sample_iter(&rand::distributions::Alphanumeric)
        .take(6).map(char::from).collect();
    format!("frame_{}_{frame:05}_{suf}.png", mode.as_str())
}
