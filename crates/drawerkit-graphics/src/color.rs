//! Color representation

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color(pub f32, pub f32, pub f32, pub f32);

impl Color {
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self(r, g, b, 1.0)
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self(r, g, b, a)
    }

    pub const fn from_rgba_u8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self(
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            a as f32 / 255.0,
        )
    }

    /// Unpacks a `0xAARRGGBB` value.
    pub const fn from_argb_u32(argb: u32) -> Self {
        Self::from_rgba_u8(
            ((argb >> 16) & 0xff) as u8,
            ((argb >> 8) & 0xff) as u8,
            (argb & 0xff) as u8,
            (argb >> 24) as u8,
        )
    }

    pub fn a(&self) -> f32 {
        self.3
    }

    pub fn with_alpha(&self, alpha: f32) -> Self {
        Self(self.0, self.1, self.2, alpha)
    }

    /// Scales the alpha channel, keeping the rgb channels untouched.
    pub fn scale_alpha(&self, factor: f32) -> Self {
        self.with_alpha(self.3 * factor.clamp(0.0, 1.0))
    }

    pub const BLACK: Color = Color(0.0, 0.0, 0.0, 1.0);
    pub const TRANSPARENT: Color = Color(0.0, 0.0, 0.0, 0.0);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argb_unpacks_alpha_from_high_byte() {
        let color = Color::from_argb_u32(0x9900_0000);
        assert_eq!(color.0, 0.0);
        assert!((color.a() - 0.6).abs() < 1e-6);
    }

    #[test]
    fn scale_alpha_clamps_factor() {
        let color = Color::BLACK.scale_alpha(2.0);
        assert_eq!(color.a(), 1.0);
        let color = Color::BLACK.scale_alpha(0.25);
        assert_eq!(color.a(), 0.25);
    }
}
