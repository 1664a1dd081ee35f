use crate::algebra::Vec2;

pub const DEFAULT_MAX_DISTANCE: f32 = 1000.0;

/// Bounded ray. `direction` is unit length unless the ray was built from a
/// zero vector, in which case it stays zero and nothing will ever hit it.
#[derive(Clone, Copy, Debug)]
pub struct Ray {
    pub origin: Vec2,
    pub direction: Vec2,
    pub max_distance: f32,
}

impl Ray {
    pub fn new(origin: Vec2, direction: Vec2) -> Self {
        Self::with_max_distance(origin, direction, DEFAULT_MAX_DISTANCE)
    }

    pub fn with_max_distance(origin: Vec2, direction: Vec2, max_distance: f32) -> Self {
        Self { origin, direction: direction.normalize(), max_distance }
    }

    pub fn point_at(&self, distance: f32) -> Vec2 {
        self.origin.add(self.direction.scale(distance))
    }
}

/// Result of a ray query. `RayHit::MISS` is the zero/false sentinel; the other
/// fields only mean something when `hit` is set.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
    pub hit: bool,
    pub point: Vec2,
    pub normal: Vec2,
    pub distance: f32,
}

impl RayHit {
    pub const MISS: RayHit = RayHit { hit: false, point: Vec2::ZERO, normal: Vec2::ZERO, distance: 0.0 };

    pub fn new(point: Vec2, normal: Vec2, distance: f32) -> Self {
        Self { hit: true, point, normal, distance }
    }
}

impl Default for RayHit {
    fn default() -> Self { Self::MISS }
}
