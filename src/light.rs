use crate::{algebra::Vec2, color::Color};

#[derive(Clone, Copy, Debug)]
pub struct Light {
    pub pos: Vec2,
    color:   Color,
}

impl Light {
    pub fn new(pos: Vec2, color: Color) -> Self { Self { pos, color } }

    pub fn color(&self) -> Color { self.color }
}
