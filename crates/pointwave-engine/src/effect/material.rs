use glam::{Mat4, Vec2, Vec3};

use crate::paint::Rgb;

use super::stages::{self, StageToggles};

/// Uniform values consumed by both shader stages.
///
/// Colors and size are fixed at construction; `time` is the only value that
/// changes while the scene runs, and it only ever grows.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ColorShiftUniforms {
    pub time: f32,
    pub color_a: Rgb,
    pub color_b: Rgb,
    pub point_size: f32,
}

impl Default for ColorShiftUniforms {
    fn default() -> Self {
        Self {
            time: 0.0,
            color_a: Rgb::WHITE,
            color_b: Rgb::new(1.0, 0.4, 0.4),
            point_size: 2.0,
        }
    }
}

/// Output of the vertex stage for one grid point.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ShadedVertex {
    /// Displaced position in the node's local space.
    pub local: Vec3,
    /// Displaced position in view space (camera looks down -Z).
    pub view: Vec3,
    /// Rasterized point size in framebuffer pixels.
    pub point_size: f32,
}

/// Material that ripples a point grid and shifts its color over time.
///
/// Construct it once, then call [`advance`](Self::advance) once per frame with
/// the frame delta. The material is unlit and opaque per fragment; it is
/// still drawn with blending enabled so overlapping round points compose.
#[derive(Debug, Clone, Default)]
pub struct ColorShiftMaterial {
    uniforms: ColorShiftUniforms,
    toggles: StageToggles,
}

impl ColorShiftMaterial {
    pub fn new(color_a: Rgb, color_b: Rgb, point_size: f32) -> Self {
        Self {
            uniforms: ColorShiftUniforms {
                time: 0.0,
                color_a,
                color_b,
                point_size,
            },
            toggles: StageToggles::default(),
        }
    }

    pub fn with_toggles(mut self, toggles: StageToggles) -> Self {
        self.toggles = toggles;
        self
    }

    #[inline]
    pub fn uniforms(&self) -> &ColorShiftUniforms {
        &self.uniforms
    }

    #[inline]
    pub fn toggles(&self) -> StageToggles {
        self.toggles
    }

    #[inline]
    pub fn time(&self) -> f32 {
        self.uniforms.time
    }

    /// Frame driver: `time += delta`.
    ///
    /// Negative and non-finite deltas are dropped so `time` never decreases.
    pub fn advance(&mut self, delta: f32) {
        if !delta.is_finite() || delta < 0.0 {
            log::debug!("ignoring frame delta {delta}");
            return;
        }
        self.uniforms.time += delta;
    }

    /// Vertex stage for one point of the grid.
    pub fn vertex(&self, local: Vec3, model_view: Mat4) -> ShadedVertex {
        let displaced = stages::displace(local, self.uniforms.time, self.toggles);
        let view = (model_view * displaced.extend(1.0)).truncate();
        ShadedVertex {
            local: displaced,
            view,
            point_size: stages::attenuated_point_size(self.uniforms.point_size, view.z),
        }
    }

    /// Fragment stage: final RGB for a fragment with texture coordinate `uv`.
    ///
    /// `point_coord` is the fragment position across its point in `[0,1]²`;
    /// it only matters with the round-point toggle, where `None` means the
    /// fragment is discarded.
    pub fn fragment(&self, uv: Vec2, point_coord: Vec2) -> Option<Rgb> {
        if self.toggles.round_points && !stages::inside_round_point(point_coord) {
            return None;
        }
        let strength = stages::mix_strength(uv, self.uniforms.time);
        Some(self.uniforms.color_a.lerp(self.uniforms.color_b, strength))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;
    const CENTER: Vec2 = Vec2::splat(0.5);

    fn close(a: Rgb, b: Rgb) -> bool {
        (a.r - b.r).abs() < EPS && (a.g - b.g).abs() < EPS && (a.b - b.b).abs() < EPS
    }

    // ── frame driver ──────────────────────────────────────────────────────

    #[test]
    fn advance_accumulates_time() {
        let mut m = ColorShiftMaterial::default();
        m.advance(0.016);
        m.advance(0.016);
        assert!((m.time() - 0.032).abs() < EPS);
    }

    #[test]
    fn zero_delta_changes_nothing() {
        let mut m = ColorShiftMaterial::default();
        m.advance(1.25);
        let before = m.clone();
        m.advance(0.0);
        assert_eq!(m.uniforms(), before.uniforms());
        let uv = Vec2::new(0.3, 0.8);
        assert_eq!(m.fragment(uv, CENTER), before.fragment(uv, CENTER));
    }

    #[test]
    fn split_advance_equals_single_advance() {
        let mut a = ColorShiftMaterial::default();
        let mut b = ColorShiftMaterial::default();
        a.advance(0.3);
        a.advance(0.45);
        b.advance(0.75);
        assert!((a.time() - b.time()).abs() < EPS);
    }

    #[test]
    fn time_never_decreases() {
        let mut m = ColorShiftMaterial::default();
        m.advance(2.0);
        m.advance(-1.0);
        m.advance(f32::NAN);
        m.advance(f32::INFINITY);
        assert_eq!(m.time(), 2.0);
    }

    #[test]
    fn advance_leaves_colors_and_size_alone() {
        let mut m = ColorShiftMaterial::default();
        m.advance(10.0);
        let u = m.uniforms();
        assert_eq!(u.color_a, Rgb::WHITE);
        assert_eq!(u.color_b, Rgb::new(1.0, 0.4, 0.4));
        assert_eq!(u.point_size, 2.0);
    }

    // ── vertex stage ──────────────────────────────────────────────────────

    #[test]
    fn vertex_attenuates_by_view_depth() {
        let m = ColorShiftMaterial::default();
        let v = m.vertex(Vec3::new(0.0, 0.0, 0.0), Mat4::from_translation(Vec3::new(0.0, 0.0, -20.0)));
        assert!((v.view.z + 20.0).abs() < EPS);
        assert!((v.point_size - 2.0).abs() < EPS);
    }

    #[test]
    fn vertex_displaces_before_transforming() {
        let mut m = ColorShiftMaterial::default();
        m.advance(std::f32::consts::FRAC_PI_2);
        let v = m.vertex(Vec3::ZERO, Mat4::IDENTITY);
        assert!((v.local.z - 0.15).abs() < EPS);
        assert!((v.view.z - 0.15).abs() < EPS);
    }

    // ── fragment stage ────────────────────────────────────────────────────

    #[test]
    fn fragment_at_origin_and_time_zero() {
        let m = ColorShiftMaterial::default();
        let c = m.fragment(Vec2::ZERO, CENTER).unwrap();
        assert!(close(c, Rgb::new(1.0, 0.55, 0.55)), "{c:?}");
    }

    #[test]
    fn fragment_stays_between_the_two_colors() {
        let mut m = ColorShiftMaterial::new(Rgb::BLACK, Rgb::WHITE, 1.0);
        for step in 0..50 {
            m.advance(0.37);
            let uv = Vec2::new(step as f32 * 0.02, 1.0 - step as f32 * 0.02);
            let c = m.fragment(uv, CENTER).unwrap();
            assert!((0.0..=1.0).contains(&c.r));
            assert_eq!(c.r, c.g);
            assert_eq!(c.g, c.b);
        }
    }

    #[test]
    fn square_points_keep_corners() {
        let m = ColorShiftMaterial::default();
        assert!(m.fragment(Vec2::ZERO, Vec2::ZERO).is_some());
    }

    #[test]
    fn round_points_discard_corners() {
        let m = ColorShiftMaterial::default()
            .with_toggles(StageToggles { round_points: true, ..Default::default() });
        assert!(m.fragment(Vec2::ZERO, Vec2::ZERO).is_none());
        assert!(m.fragment(Vec2::ZERO, CENTER).is_some());
    }
}
