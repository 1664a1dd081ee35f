use serde::Deserialize;
use std::ops::{Add, Mul, Neg, Sub};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2(pub f32, pub f32);

impl Vec2 {
    pub const ZERO: Vec2 = Vec2(0.0, 0.0);

    pub fn add(self, v: Self) -> Self { Self(self.0+v.0, self.1+v.1) }
    pub fn sub(self, v: Self) -> Self { Self(self.0-v.0, self.1-v.1) }
    pub fn scale(self, f: f32) -> Self { Self(self.0*f, self.1*f) }
    pub fn dot(self, v: Self) -> f32 { self.0*v.0 + self.1*v.1 }
    pub fn norm(self) -> f32 { self.dot(self).sqrt() }
    pub fn neg(self) -> Self { Self(-self.0, -self.1) }

    /// Unit vector in the same direction. A zero vector comes back unchanged
    /// instead of turning into NaNs.
    pub fn normalize(self) -> Self {
        let len = self.norm();
        if len > 0.0 { self.scale(1.0/len) } else { self }
    }

    pub fn distance(self, v: Self) -> f32 { v.sub(self).norm() }

    /// Unit vector at `angle` radians, measured from +x towards +y.
    pub fn from_angle(angle: f32) -> Self { Self(angle.cos(), angle.sin()) }
}

impl Add for Vec2 {
    type Output = Vec2;
    fn add(self, v: Vec2) -> Vec2 { Vec2::add(self, v) }
}

impl Sub for Vec2 {
    type Output = Vec2;
    fn sub(self, v: Vec2) -> Vec2 { Vec2::sub(self, v) }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;
    fn mul(self, f: f32) -> Vec2 { self.scale(f) }
}

impl Neg for Vec2 {
    type Output = Vec2;
    fn neg(self) -> Vec2 { Vec2::neg(self) }
}

impl From<[f32; 2]> for Vec2 {
    fn from(a: [f32; 2]) -> Self { Vec2(a[0], a[1]) }
}

/// Same as `f32::clamp` but never panics when `min > max`; the lower bound wins.
pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
    if value < min { return min; }
    if value > max { return max; }
    value
}

/* Custom helper so Serde turns a JSON array into Vec2 */
pub fn vec2_from_array<'de, D>(d: D) -> Result<Vec2, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let arr = <[f32; 2]>::deserialize(d)?;
    Ok(arr.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_gives_unit_length() {
        let v = Vec2(3.0, 4.0).normalize();
        assert!((v.norm() - 1.0).abs() < 1e-6);
        assert!((v.0 - 0.6).abs() < 1e-6 && (v.1 - 0.8).abs() < 1e-6);
    }

    #[test]
    fn normalize_leaves_zero_vector_alone() {
        assert_eq!(Vec2::ZERO.normalize(), Vec2::ZERO);
    }

    #[test]
    fn distance_is_symmetric() {
        let a = Vec2(1.0, 2.0);
        let b = Vec2(4.0, 6.0);
        assert_eq!(a.distance(b), 5.0);
        assert_eq!(b.distance(a), 5.0);
    }

    #[test]
    fn clamp_bounds() {
        assert_eq!(clamp(-1.0, 0.0, 1.0), 0.0);
        assert_eq!(clamp(2.0, 0.0, 1.0), 1.0);
        assert_eq!(clamp(0.25, 0.0, 1.0), 0.25);
    }

    #[test]
    fn operators_match_methods() {
        let a = Vec2(1.0, -2.0);
        let b = Vec2(0.5, 3.0);
        assert_eq!(a + b, a.add(b));
        assert_eq!(a - b, a.sub(b));
        assert_eq!(a * 2.0, a.scale(2.0));
        assert_eq!(-a, Vec2(-1.0, 2.0));
    }
}
