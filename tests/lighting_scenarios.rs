//! Geometry and lighting scenarios for both lighting models.
//!
//! Reference layout: sphere at (400, 300) with radius 100, light at (400, 100)
//! directly above it, 200 units from the center.

use raytracer2d::{AnalyticLighting, Color, Light, Ray, RayTracer, Scene, Sphere, Vec2};

const EPS: f32 = 1e-3;
/// Looser bound for hit distances, which go through a squared discriminant.
const DIST_EPS: f32 = 1e-2;

fn reference_scene() -> Scene {
    Scene::new(
        Sphere::new(Vec2(400.0, 300.0), 100.0, Color::rgb(220, 60, 60)),
        Light::new(Vec2(400.0, 100.0), Color::rgb(255, 255, 200)),
    )
}

fn luminance(c: Color) -> u32 {
    c.r as u32 + c.g as u32 + c.b as u32
}

#[test]
fn aimed_ray_hits_at_center_distance_minus_radius() {
    let scene = reference_scene();
    let sphere = scene.sphere();
    for origin in [Vec2(0.0, 0.0), Vec2(900.0, 300.0), Vec2(400.0, 850.0), Vec2(120.0, 640.0)] {
        let ray = Ray::new(origin, sphere.center.sub(origin));
        let hit = sphere.intersect(&ray);
        let expected = origin.distance(sphere.center) - sphere.radius();
        assert!(hit.hit, "origin {origin:?}");
        assert!((hit.distance - expected).abs() < DIST_EPS, "origin {origin:?}: {} vs {expected}", hit.distance);
        assert!((hit.point.distance(sphere.center) - sphere.radius()).abs() < DIST_EPS);
    }
}

#[test]
fn rays_offset_past_radius_miss() {
    let scene = reference_scene();
    let sphere = scene.sphere();
    for offset in [100.5, 150.0, 400.0] {
        let ray = Ray::new(Vec2(0.0, 300.0 + offset), Vec2(1.0, 0.0));
        assert!(!sphere.intersect(&ray).hit, "offset {offset}");
        let ray = Ray::new(Vec2(0.0, 300.0 - offset), Vec2(1.0, 0.0));
        assert!(!sphere.intersect(&ray).hit, "offset -{offset}");
    }
}

#[test]
fn top_surface_faces_light_unshadowed() {
    let scene = reference_scene();
    let rt = RayTracer::default();
    let top = Vec2(400.0, 200.0);

    let normal = scene.sphere().normal(top);
    let light_dir = scene.light().pos.sub(top).normalize();
    assert!((normal.0).abs() < EPS && (normal.1 + 1.0).abs() < EPS);
    assert!((normal.dot(light_dir) - 1.0).abs() < EPS);

    assert!(!rt.is_in_shadow(top, scene.light(), &scene));
    let lit = rt.calculate_lighting(top, normal, &scene);
    assert!(lit.r > 51, "expected diffuse on top of ambient, got {lit:?}");
}

#[test]
fn bottom_surface_is_shadowed_by_exit_root() {
    let scene = reference_scene();
    let rt = RayTracer::default();
    let bottom = Vec2(400.0, 400.0);

    // The shadow ray starts on the surface: t1 == 0 is rejected, t2 == 200 is
    // the far side, well short of the light at 300.
    let ray = Ray::with_max_distance(bottom, scene.light().pos.sub(bottom), 300.0);
    let hit = scene.sphere().intersect(&ray);
    assert!(hit.hit);
    assert!((hit.distance - 200.0).abs() < DIST_EPS);

    assert!(rt.is_in_shadow(bottom, scene.light(), &scene));
}

#[test]
fn occlusion_is_monotonic_along_shadow_ray() {
    let scene = reference_scene();
    let rt = RayTracer::default();
    let light = scene.light();

    for dir in [Vec2(0.0, 1.0), Vec2(0.2, 1.0), Vec2(-0.3, 1.0), Vec2(1.0, 0.4)] {
        let away = dir.normalize();
        let mut shadowed = false;
        for step in 1..120 {
            let p = light.pos.add(away.scale(step as f32 * 10.0));
            let now = rt.is_in_shadow(p, light, &scene);
            if shadowed {
                assert!(now, "shadow lost at {p:?} along {dir:?}");
            }
            shadowed |= now;
        }
    }
}

#[test]
fn ray_traced_lighting_falls_off_with_distance() {
    let scene = reference_scene();
    let rt = RayTracer::default();
    let light = scene.light();

    // Walk left from the light along y = 100; the sphere never blocks this line.
    let normal = Vec2(1.0, 0.0);
    let first = luminance(rt.calculate_lighting(Vec2(light.pos.0 - 5.0, light.pos.1), normal, &scene));
    let mut prev = u32::MAX;
    for step in 1..80 {
        let p = Vec2(light.pos.0 - step as f32 * 5.0, light.pos.1);
        assert!(!rt.is_in_shadow(p, light, &scene));
        let l = luminance(rt.calculate_lighting(p, normal, &scene));
        assert!(l <= prev, "lighting rose at {p:?}");
        prev = l;
    }
    assert!(prev < first);
    assert!(prev >= luminance(Color::rgb(51, 51, 51)));
}

#[test]
fn analytic_model_is_pure_and_falls_off() {
    let scene = reference_scene();
    let model = AnalyticLighting::default();

    let p = Vec2(250.0, 80.0);
    let a = model.calculate_2d_lighting_in(p, &scene);
    let b = model.calculate_2d_lighting_in(p, &scene);
    assert_eq!(a, b);

    let mut prev = u32::MAX;
    for step in 0..100 {
        let q = Vec2(400.0 - step as f32 * 10.0, 100.0);
        let l = luminance(model.calculate_2d_lighting_in(q, &scene));
        assert!(l <= prev);
        prev = l;
    }
}

#[test]
fn both_models_shadow_below_the_sphere() {
    // Analytic shadow is a fixed near-black; the ray tracer falls back to ambient.
    let scene = reference_scene();
    let below = Vec2(400.0, 600.0);

    let model = AnalyticLighting::default();
    assert!(model.is_point_in_shadow(below, scene.light(), scene.sphere()));
    assert_eq!(model.calculate_2d_lighting_in(below, &scene), Color::rgb(10, 10, 10));

    let rt = RayTracer::default();
    assert!(rt.is_in_shadow(below, scene.light(), &scene));
    assert_eq!(rt.calculate_lighting(below, Vec2(0.0, -1.0), &scene), Color::rgb(51, 51, 51));
}

#[test]
fn moving_light_inside_sphere_disables_cone() {
    let mut scene = reference_scene();
    scene.set_light_position(Vec2(410.0, 310.0));
    let model = AnalyticLighting::default();
    for p in [Vec2(0.0, 0.0), Vec2(1000.0, 700.0), Vec2(410.0, 700.0)] {
        assert!(!model.is_point_in_shadow(p, scene.light(), scene.sphere()));
    }
}
