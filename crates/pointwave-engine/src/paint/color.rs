/// Linear RGB color, straight (no alpha channel).
///
/// Components are nominally in `[0, 1]`; nothing clamps them, the shader
/// receives exactly what is stored.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(1.0, 1.0, 1.0);
    pub const BLACK: Rgb = Rgb::new(0.0, 0.0, 0.0);

    #[inline]
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Creates a color from 8-bit channels (`0`–`255`), mapped linearly.
    #[inline]
    pub fn from_u8(r: u8, g: u8, b: u8) -> Self {
        Self::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
    }

    /// Linear interpolation `self + t * (other - self)`, the GLSL/WGSL `mix`.
    ///
    /// `t = 0` returns `self` exactly and `t = 1` returns `other` exactly.
    #[inline]
    pub fn lerp(self, other: Rgb, t: f32) -> Rgb {
        Rgb::new(
            mix(self.r, other.r, t),
            mix(self.g, other.g, t),
            mix(self.b, other.b, t),
        )
    }

    #[inline]
    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    /// Opaque RGBA, padded for a WGSL `vec4<f32>` slot.
    #[inline]
    pub fn to_rgba(self) -> [f32; 4] {
        [self.r, self.g, self.b, 1.0]
    }

    #[inline]
    pub fn to_wgpu(self) -> wgpu::Color {
        wgpu::Color {
            r: self.r as f64,
            g: self.g as f64,
            b: self.b as f64,
            a: 1.0,
        }
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.r.is_finite() && self.g.is_finite() && self.b.is_finite()
    }
}

impl From<[f32; 3]> for Rgb {
    fn from([r, g, b]: [f32; 3]) -> Self {
        Rgb::new(r, g, b)
    }
}

// Written as a*(1-t) + b*t so both endpoints are exact in f32.
#[inline]
fn mix(a: f32, b: f32, t: f32) -> f32 {
    a * (1.0 - t) + b * t
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgb = Rgb::new(1.0, 0.4, 0.4);

    #[test]
    fn lerp_endpoints_are_exact() {
        assert_eq!(Rgb::WHITE.lerp(RED, 0.0), Rgb::WHITE);
        assert_eq!(Rgb::WHITE.lerp(RED, 1.0), RED);
    }

    #[test]
    fn lerp_midpoint() {
        let c = Rgb::BLACK.lerp(Rgb::WHITE, 0.5);
        assert_eq!(c, Rgb::new(0.5, 0.5, 0.5));
    }

    #[test]
    fn lerp_is_monotonic_per_channel() {
        let mut prev = Rgb::WHITE.lerp(RED, 0.0);
        for i in 1..=100 {
            let c = Rgb::WHITE.lerp(RED, i as f32 / 100.0);
            assert!(c.g <= prev.g);
            assert!(c.b <= prev.b);
            assert_eq!(c.r, 1.0);
            prev = c;
        }
    }

    #[test]
    fn from_u8_maps_full_range() {
        assert_eq!(Rgb::from_u8(255, 0, 255), Rgb::new(1.0, 0.0, 1.0));
    }
}
