//! src/sphere.rs
//! -------------
//! Disc seen as the 2D slice of a sphere, with a flat material color.

use crate::{
    algebra::Vec2,
    color::Color,
    ray::{Ray, RayHit},
};

#[derive(Clone, Copy, Debug)]
pub struct Sphere {
    pub center   : Vec2,
    radius       : f32,
    material     : Color,
}

impl Sphere {
    pub fn new(center: Vec2, radius: f32, material: Color) -> Self {
        Self { center, radius, material }
    }

    pub fn radius(&self) -> f32 { self.radius }
    pub fn material(&self) -> Color { self.material }

    /// Intersect a ray (ro + t·rd).
    /// Takes the near root when it is in front of the origin, otherwise the
    /// far one, so a ray starting inside reports where it leaves.
    pub fn intersect(&self, ray: &Ray) -> RayHit {
        // Analytic quadratic
        let oc   = ray.origin.sub(self.center);
        let a    = ray.direction.dot(ray.direction);
        let b    = 2.0 * oc.dot(ray.direction);
        let c    = oc.dot(oc) - self.radius * self.radius;
        let disc = b*b - 4.0*a*c;
        if disc < 0.0 || a == 0.0 { return RayHit::MISS; }

        let sq = disc.sqrt();
        let t1 = (-b - sq) / (2.0 * a);
        let t2 = (-b + sq) / (2.0 * a);
        let t  = if t1 > 0.0 { t1 } else { t2 };
        if t <= 0.0 || t > ray.max_distance { return RayHit::MISS; }

        let point = ray.point_at(t);
        RayHit::new(point, self.normal(point), t)
    }

    /// Outward unit normal. Zero at the center itself.
    pub fn normal(&self, point: Vec2) -> Vec2 {
        point.sub(self.center).normalize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sphere() -> Sphere {
        Sphere::new(Vec2(400.0, 300.0), 100.0, Color::rgb(220, 60, 60))
    }

    #[test]
    fn hit_towards_center_lands_on_surface() {
        let s = sphere();
        let origin = Vec2(100.0, 300.0);
        let hit = s.intersect(&Ray::new(origin, s.center.sub(origin)));
        assert!(hit.hit);
        assert!((hit.distance - 200.0).abs() < 1e-3);
        assert!((hit.point.0 - 300.0).abs() < 1e-3);
        assert!((hit.normal.0 + 1.0).abs() < 1e-5);
    }

    #[test]
    fn offset_beyond_radius_misses() {
        let s = sphere();
        let hit = s.intersect(&Ray::new(Vec2(100.0, 199.0), Vec2(1.0, 0.0)));
        assert!(!hit.hit);
        assert_eq!(hit, RayHit::MISS);
    }

    #[test]
    fn origin_inside_reports_exit_point() {
        let s = sphere();
        let hit = s.intersect(&Ray::new(s.center, Vec2(0.0, 1.0)));
        assert!(hit.hit);
        assert!((hit.distance - 100.0).abs() < 1e-3);
        assert!((hit.point.1 - 400.0).abs() < 1e-3);
    }

    #[test]
    fn sphere_behind_origin_misses() {
        let s = sphere();
        let hit = s.intersect(&Ray::new(Vec2(600.0, 300.0), Vec2(1.0, 0.0)));
        assert!(!hit.hit);
    }

    #[test]
    fn hit_past_max_distance_is_rejected() {
        let s = sphere();
        let ray = Ray::with_max_distance(Vec2(100.0, 300.0), Vec2(1.0, 0.0), 150.0);
        assert!(!s.intersect(&ray).hit);
    }

    #[test]
    fn zero_direction_never_hits() {
        let s = sphere();
        assert!(!s.intersect(&Ray::new(Vec2(100.0, 300.0), Vec2::ZERO)).hit);
        assert!(!s.intersect(&Ray::new(s.center, Vec2::ZERO)).hit);
    }

    #[test]
    fn normal_points_outward() {
        let s = sphere();
        for i in 0..16 {
            let p = s.center.add(Vec2::from_angle(i as f32 * 0.39).scale(s.radius()));
            let n = s.normal(p);
            assert!((n.norm() - 1.0).abs() < 1e-5);
            assert!(n.dot(p.sub(s.center)) > 0.0);
        }
    }

    #[test]
    fn normal_at_center_is_zero() {
        let s = sphere();
        assert_eq!(s.normal(s.center), Vec2::ZERO);
    }
}
