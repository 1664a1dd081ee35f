//! 2D lighting demo engine: one movable sphere and one movable light, shaded
//! either by an analytic shadow-cone model or by per-pixel ray tracing.
//!
//! The presentation layer (window, input polling) stays outside the crate. It
//! drives a [`Scene`] once per frame and asks a [`Renderer`] to fill a
//! [`FrameBuffer`].

pub mod algebra;
pub mod color;
pub mod config;
pub mod error;
pub mod framebuffer;
pub mod light;
pub mod lighting;
pub mod ray;
pub mod raytracer;
pub mod renderer;
pub mod scene;
pub mod sphere;

pub use algebra::Vec2;
pub use color::Color;
pub use config::Config;
pub use error::{Error, Result};
pub use framebuffer::FrameBuffer;
pub use light::Light;
pub use lighting::AnalyticLighting;
pub use ray::{Ray, RayHit};
pub use raytracer::RayTracer;
pub use renderer::{RayDisplayMode, RenderMode, Renderer};
pub use scene::Scene;
pub use sphere::Sphere;
