use serde::{Deserialize, Serialize};

/// Linear RGBA color, laid out for direct upload as a uniform.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable, Serialize, Deserialize)]
pub struct RgbaColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl RgbaColor {
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    pub const RED: Self = Self::rgb(1.0, 0.0, 0.0);
    pub const GREEN: Self = Self::rgb(0.0, 1.0, 0.0);
    pub const BLUE: Self = Self::rgb(0.0, 0.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color from its RGB components.
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Multiplies the RGB channels by `factor`, leaving alpha alone.
    pub fn scaled(&self, factor: f32) -> Self {
        Self::new(self.r * factor, self.g * factor, self.b * factor, self.a)
    }
}

impl Default for RgbaColor {
    fn default() -> Self {
        Self::BLACK
    }
}

impl From<[f32; 4]> for RgbaColor {
    fn from(c: [f32; 4]) -> Self {
        Self::new(c[0], c[1], c[2], c[3])
    }
}

impl From<RgbaColor> for [f32; 4] {
    fn from(c: RgbaColor) -> Self {
        [c.r, c.g, c.b, c.a]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scaled_keeps_alpha() {
        let c = RgbaColor::new(0.5, 0.25, 1.0, 0.5).scaled(2.0);
        assert_eq!(c, RgbaColor::new(1.0, 0.5, 2.0, 0.5));
    }

    #[test]
    fn test_pod_layout() {
        let c = RgbaColor::RED;
        let bytes: &[u8] = bytemuck::bytes_of(&c);
        assert_eq!(bytes.len(), 16);
        let floats: &[f32] = bytemuck::cast_slice(bytes);
        assert_eq!(floats, &[1.0, 0.0, 0.0, 1.0]);
    }
}
