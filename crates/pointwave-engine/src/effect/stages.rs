//! CPU reference of the color-shift shader stages.
//!
//! Every function here mirrors a line of `render/shaders/color_shift.wgsl`.
//! They are pure functions of per-point inputs and the uniform values, so
//! the same math can be checked without a GPU.

use glam::{Vec2, Vec3};

/// Peak displacement of the surface wave, in local units.
pub const WAVE_AMPLITUDE: f32 = 0.15;

/// Spatial frequency of the surface wave (radians per local unit).
pub const WAVE_FREQUENCY: f32 = 0.75;

/// Numerator of the point-size attenuation `size * 20 / -view_z`.
pub const SIZE_ATTENUATION: f32 = 20.0;

/// Spatial frequency of the color waves across UV space.
pub const COLOR_FREQUENCY: f32 = 5.0;

/// Radius of the round-point mask in point coordinates.
pub const ROUND_POINT_RADIUS: f32 = 0.5;

/// Which of the optional displacement/mask paths are active.
///
/// Both are off in the showcase; they exist as switches so the shader can be
/// explored without editing WGSL.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct StageToggles {
    /// Also ripple points along X, driven by their Z coordinate.
    pub x_wave: bool,
    /// Discard fragments outside a circle inscribed in the point quad.
    pub round_points: bool,
}

/// Displaces a local-space position for the current time.
///
/// `z' = z + 0.15 * sin(0.75 * x + time)`. With `x_wave`, additionally
/// `x' = x + 0.15 * sin(0.75 * z + time)` using the undisplaced `z`.
#[inline]
pub fn displace(position: Vec3, time: f32, toggles: StageToggles) -> Vec3 {
    let wave = (position.x * WAVE_FREQUENCY + time).sin() * WAVE_AMPLITUDE;
    let wave2 = (position.z * WAVE_FREQUENCY + time).sin() * WAVE_AMPLITUDE;

    let mut out = position;
    out.z += wave;
    if toggles.x_wave {
        out.x += wave2;
    }
    out
}

/// Point size in framebuffer pixels for a point at view-space depth `view_z`.
///
/// `view_z` is negative in front of the camera. The result diverges as
/// `view_z` approaches zero and turns negative behind the camera; the
/// rasterizer clips those points.
#[inline]
pub fn attenuated_point_size(point_size: f32, view_z: f32) -> f32 {
    point_size * (SIZE_ATTENUATION / -view_z)
}

/// The two color-wave weights `(wave, wave2)`, each in `[0, 1]`.
#[inline]
pub fn color_waves(uv: Vec2, time: f32) -> (f32, f32) {
    let wave = (uv.x * COLOR_FREQUENCY + time).sin() * 0.5 + 0.5;
    let wave2 = (uv.y * COLOR_FREQUENCY + time * 2.0).cos() * 0.5 + 0.5;
    (wave, wave2)
}

/// Mix factor between the two material colors, in `[0, 1]`.
#[inline]
pub fn mix_strength(uv: Vec2, time: f32) -> f32 {
    let (wave, wave2) = color_waves(uv, time);
    (wave + wave2) * 0.5
}

/// Whether a fragment at `point_coord` (`[0,1]²` across the point) survives
/// the round-point mask.
#[inline]
pub fn inside_round_point(point_coord: Vec2) -> bool {
    (point_coord - Vec2::splat(0.5)).length() <= ROUND_POINT_RADIUS
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    fn samples() -> impl Iterator<Item = f32> {
        (-200..=200).map(|i| i as f32 * 0.173)
    }

    // ── displacement ──────────────────────────────────────────────────────

    #[test]
    fn displacement_matches_formula() {
        let p = Vec3::new(1.3, -2.0, 0.4);
        let t = 2.5;
        let d = displace(p, t, StageToggles::default());
        assert!((d.z - (0.4 + 0.15 * (0.75f32 * 1.3 + 2.5).sin())).abs() < EPS);
        assert_eq!(d.x, p.x);
        assert_eq!(d.y, p.y);
    }

    #[test]
    fn displacement_stays_within_amplitude() {
        for x in samples() {
            for t in [0.0, 0.7, 13.0, 1000.0] {
                let z = x * 0.5;
                let d = displace(Vec3::new(x, 0.0, z), t, StageToggles::default());
                assert!(d.z >= z - WAVE_AMPLITUDE - EPS && d.z <= z + WAVE_AMPLITUDE + EPS);
            }
        }
    }

    #[test]
    fn x_wave_is_off_by_default() {
        let p = Vec3::new(0.0, 0.0, 1.0);
        assert_eq!(displace(p, 1.0, StageToggles::default()).x, 0.0);
    }

    #[test]
    fn x_wave_uses_undisplaced_z() {
        let toggles = StageToggles { x_wave: true, ..Default::default() };
        let p = Vec3::new(0.5, 0.0, 1.0);
        let t = 0.3;
        let d = displace(p, t, toggles);
        let expected = 0.5 + 0.15 * (0.75f32 * 1.0 + 0.3).sin();
        assert!((d.x - expected).abs() < EPS);
    }

    // ── point size ────────────────────────────────────────────────────────

    #[test]
    fn point_size_at_depth_twenty_is_unchanged() {
        assert!((attenuated_point_size(2.0, -20.0) - 2.0).abs() < EPS);
    }

    #[test]
    fn point_size_shrinks_with_distance() {
        let near = attenuated_point_size(2.0, -5.0);
        let far = attenuated_point_size(2.0, -50.0);
        assert!(near > far);
        assert!((near - 8.0).abs() < EPS);
    }

    // ── color waves ───────────────────────────────────────────────────────

    #[test]
    fn strength_is_a_unit_interval_weight() {
        for u in samples() {
            for t in [0.0, 1.1, 57.0] {
                let s = mix_strength(Vec2::new(u, -u * 0.3), t);
                assert!((0.0..=1.0).contains(&s), "strength {s} out of range");
            }
        }
    }

    #[test]
    fn waves_at_origin_and_time_zero() {
        let (wave, wave2) = color_waves(Vec2::ZERO, 0.0);
        assert!((wave - 0.5).abs() < EPS);
        assert!((wave2 - 1.0).abs() < EPS);
        assert!((mix_strength(Vec2::ZERO, 0.0) - 0.75).abs() < EPS);
    }

    // ── round mask ────────────────────────────────────────────────────────

    #[test]
    fn round_mask_keeps_center_and_drops_corners() {
        assert!(inside_round_point(Vec2::splat(0.5)));
        assert!(inside_round_point(Vec2::new(0.5, 0.0)));
        assert!(!inside_round_point(Vec2::ZERO));
        assert!(!inside_round_point(Vec2::ONE));
    }
}
