//! `scene.json` loading. Every field is optional; missing ones fall back to
//! the demo's built-in layout.

use crate::{
    algebra::{vec2_from_array, Vec2},
    color::{color_from_array, Color},
    error::{Error, Result},
    light::Light,
    renderer::{RayDisplayMode, RenderMode, Renderer},
    scene::{self, Scene},
    sphere::Sphere,
};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

pub const WINDOW_WIDTH: u32 = 1280;
pub const WINDOW_HEIGHT: u32 = 720;
pub const FRAME_RATE_LIMIT: u32 = 120;

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct RenderJson {
    pub width: u32,
    pub height: u32,
    pub mode: RenderMode,
    pub anti_aliasing: bool,
    pub max_depth: u32,
    pub shadow_rays: u32,
    pub debug: bool,
    pub ray_display: RayDisplayMode,
}

impl Default for RenderJson {
    fn default() -> Self {
        let rt = crate::raytracer::RayTracer::default();
        Self {
            width: WINDOW_WIDTH,
            height: WINDOW_HEIGHT,
            mode: RenderMode::Basic,
            anti_aliasing: rt.anti_aliasing,
            max_depth: rt.max_depth,
            shadow_rays: rt.shadow_rays,
            debug: true,
            ray_display: RayDisplayMode::AllRays,
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct SphereJson {
    #[serde(deserialize_with = "vec2_from_array")]
    pub pos: Vec2,
    pub radius: f32,
    #[serde(deserialize_with = "color_from_array")]
    pub material: Color,
}

impl Default for SphereJson {
    fn default() -> Self {
        Self { pos: Vec2::ZERO, radius: scene::SPHERE_RADIUS, material: scene::SPHERE_MATERIAL }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct LightJson {
    #[serde(deserialize_with = "vec2_from_array")]
    pub pos: Vec2,
    #[serde(deserialize_with = "color_from_array")]
    pub color: Color,
}

impl Default for LightJson {
    fn default() -> Self {
        Self { pos: scene::LIGHT_START, color: scene::LIGHT_COLOR }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct SceneJson {
    pub sphere: SphereJson,
    pub light: LightJson,
    pub move_speed: f32,
    pub smoothness: f32,
    #[serde(deserialize_with = "vec2_from_array")]
    pub pointer_offset: Vec2,
}

impl Default for SceneJson {
    fn default() -> Self {
        Self {
            sphere: SphereJson::default(),
            light: LightJson::default(),
            move_speed: scene::DEFAULT_MOVE_SPEED,
            smoothness: scene::DEFAULT_SMOOTHNESS,
            pointer_offset: scene::POINTER_OFFSET,
        }
    }
}

/// One scripted input state, held for `frames` ticks. The toggle flags are
/// one-shot: they fire on the first frame of the step only.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct InputStep {
    pub frames: u32,
    #[serde(deserialize_with = "vec2_from_array")]
    pub pointer: Vec2,
    #[serde(default)]
    pub left: bool,
    #[serde(default)]
    pub right: bool,
    #[serde(default)]
    pub up: bool,
    #[serde(default)]
    pub down: bool,
    #[serde(default)]
    pub toggle_2d: bool,
    #[serde(default)]
    pub toggle_ray_tracing: bool,
    #[serde(default)]
    pub toggle_debug: bool,
    #[serde(default)]
    pub cycle_rays: bool,
}

impl InputStep {
    /// Same pointer and keys, toggles cleared.
    fn held(self) -> Self {
        Self { toggle_2d: false, toggle_ray_tracing: false, toggle_debug: false, cycle_rays: false, ..self }
    }

    fn released(self) -> Self {
        Self { frames: 0, left: false, right: false, up: false, down: false, ..self.held() }
    }

    /// Fires the toggles, then feeds pointer and keys to the scene.
    pub fn apply(&self, scene: &mut Scene, renderer: &mut Renderer) {
        if self.toggle_2d { renderer.toggle_2d_mode(); }
        if self.toggle_ray_tracing { renderer.toggle_ray_tracing(); }
        if self.toggle_debug { renderer.toggle_debug_mode(); }
        if self.cycle_rays { renderer.cycle_ray_display_mode(); }
        scene.handle_input(self.pointer, self.left, self.right, self.up, self.down);
    }
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct InputJson {
    /// Frames to simulate; defaults to the length of the script.
    pub frames: Option<u32>,
    pub script: Vec<InputStep>,
}

impl InputJson {
    /// Capped at `u32::MAX`; [`Config::validate`] rejects longer scripts.
    pub fn total_frames(&self) -> u32 {
        self.frames
            .unwrap_or_else(|| self.script.iter().fold(0u32, |acc, s| acc.saturating_add(s.frames)))
            .max(1)
    }

    /// Input for `frame`. Past the end of the script the last pointer is held
    /// with every key released. `None` when there is no script at all.
    pub fn step_at(&self, frame: u32) -> Option<InputStep> {
        let mut start = 0u32;
        for step in &self.script {
            let end = start.saturating_add(step.frames);
            if frame < end {
                return Some(if frame == start { *step } else { step.held() });
            }
            start = end;
        }
        self.script.last().map(|s| s.released())
    }

    /// Replays the scripted input for `frame`, if any.
    pub fn play_frame(&self, frame: u32, scene: &mut Scene, renderer: &mut Renderer) {
        if let Some(step) = self.step_at(frame) {
            step.apply(scene, renderer);
        }
    }
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub render: RenderJson,
    pub scene: SceneJson,
    pub input: InputJson,
}

impl Config {
    pub fn from_json(data: &str) -> Result<Self> {
        let cfg: Config = serde_json::from_str(data)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        let r = &self.render;
        if r.width == 0 || r.height == 0 {
            return Err(Error::InvalidConfig(format!("viewport {}x{} is empty", r.width, r.height)));
        }
        if r.max_depth == 0 {
            return Err(Error::InvalidConfig("max_depth must be at least 1".into()));
        }
        let s = &self.scene;
        if !(s.sphere.radius > 0.0) {
            return Err(Error::InvalidConfig(format!("sphere radius {} must be positive", s.sphere.radius)));
        }
        if !(0.0..=1.0).contains(&s.smoothness) {
            return Err(Error::InvalidConfig(format!("smoothness {} outside [0, 1]", s.smoothness)));
        }
        let script = &self.input.script;
        if script.iter().try_fold(0u32, |acc, st| acc.checked_add(st.frames)).is_none() {
            return Err(Error::InvalidConfig(format!("input script of {} steps exceeds {} frames", script.len(), u32::MAX)));
        }
        Ok(())
    }

    pub fn build_scene(&self) -> Scene {
        let s = &self.scene;
        let mut scene = Scene::new(
            Sphere::new(s.sphere.pos, s.sphere.radius, s.sphere.material),
            Light::new(s.light.pos, s.light.color),
        );
        scene.move_speed = s.move_speed;
        scene.smoothness = s.smoothness;
        scene.pointer_offset = s.pointer_offset;
        scene
    }

    pub fn build_renderer(&self) -> Renderer {
        let r = &self.render;
        let mut renderer = Renderer::default();
        renderer.set_mode(r.mode);
        renderer.set_debug_mode(r.debug);
        renderer.set_ray_display_mode(r.ray_display);
        renderer.ray_tracer.set_max_depth(r.max_depth);
        renderer.ray_tracer.set_shadow_rays(r.shadow_rays);
        renderer.ray_tracer.set_anti_aliasing(r.anti_aliasing);
        renderer
    }
}

pub fn load(path: impl AsRef<Path>) -> Result<Config> {
    let path = path.as_ref();
    let data = std::fs::read_to_string(path)
        .map_err(|source| Error::Io { path: path.to_path_buf(), source })?;
    let cfg = Config::from_json(&data)?;
    debug!(?path, ?cfg, "loaded config");
    Ok(cfg)
}
