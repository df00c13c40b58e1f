use std::f32::consts::{PI, TAU};

use glam::Vec3;

use crate::input::{InputFrame, InputState, MouseButton};

use super::PerspectiveCamera;

/// Keeps the polar angle off the poles, where the view basis degenerates.
const POLE_EPS: f32 = 1e-6;

/// Deltas smaller than this are dropped when damping winds down.
const SETTLE_EPS: f32 = 1e-6;

/// Orbit controls tuning.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitConfig {
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,

    /// Smooth rotation and panning by decaying them over several frames.
    pub enable_damping: bool,
    /// Fraction of the pending motion applied per update when damping.
    pub damping_factor: f32,

    pub min_distance: f32,
    pub max_distance: f32,

    /// Polar angle bounds in radians, measured from +Y.
    pub min_polar: f32,
    pub max_polar: f32,
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            rotate_speed: 1.0,
            zoom_speed: 1.0,
            pan_speed: 1.0,
            enable_damping: true,
            damping_factor: 0.05,
            min_distance: 0.1,
            max_distance: f32::INFINITY,
            min_polar: 0.0,
            max_polar: PI,
        }
    }
}

/// Spherical coordinates around the orbit target, Y up.
#[derive(Debug, Copy, Clone, PartialEq)]
struct Spherical {
    radius: f32,
    /// Azimuth around +Y, zero along +Z.
    theta: f32,
    /// Polar angle from +Y.
    phi: f32,
}

impl Spherical {
    fn from_offset(offset: Vec3) -> Self {
        let radius = offset.length();
        if radius == 0.0 {
            return Self { radius, theta: 0.0, phi: 0.0 };
        }
        Self {
            radius,
            theta: offset.x.atan2(offset.z),
            phi: (offset.y / radius).clamp(-1.0, 1.0).acos(),
        }
    }

    fn to_offset(self) -> Vec3 {
        let sin_phi_r = self.phi.sin() * self.radius;
        Vec3::new(
            sin_phi_r * self.theta.sin(),
            self.phi.cos() * self.radius,
            sin_phi_r * self.theta.cos(),
        )
    }
}

/// Mouse-driven orbit camera.
///
/// - left drag rotates around the target
/// - right drag (or left drag with a modifier) pans in the screen plane
/// - wheel dollies towards / away from the target
///
/// Input is accumulated by [`handle_input`](Self::handle_input) and applied to
/// the camera by [`update`](Self::update), once per frame in that order.
#[derive(Debug, Clone)]
pub struct OrbitControls {
    config: OrbitConfig,

    target: Vec3,

    // pending motion
    delta_theta: f32,
    delta_phi: f32,
    scale: f32,
    pan_offset: Vec3,

    home_position: Vec3,
    home_target: Vec3,
}

impl OrbitControls {
    /// Creates controls orbiting `camera.target`, starting from the camera's
    /// current pose. That pose is also what [`reset`](Self::reset) returns to.
    pub fn new(camera: &PerspectiveCamera, config: OrbitConfig) -> Self {
        Self {
            config,
            target: camera.target,
            delta_theta: 0.0,
            delta_phi: 0.0,
            scale: 1.0,
            pan_offset: Vec3::ZERO,
            home_position: camera.position,
            home_target: camera.target,
        }
    }

    #[inline]
    pub fn target(&self) -> Vec3 {
        self.target
    }

    #[inline]
    pub fn config(&self) -> &OrbitConfig {
        &self.config
    }

    /// Folds this frame's pointer and wheel input into pending motion.
    ///
    /// `viewport_height` is the window height in the same logical pixels the
    /// pointer deltas are measured in.
    pub fn handle_input(
        &mut self,
        input: &InputState,
        frame: &InputFrame,
        camera: &PerspectiveCamera,
        viewport_height: f32,
    ) {
        let height = viewport_height.max(1.0);
        let (dx, dy) = frame.pointer_delta;

        if dx != 0.0 || dy != 0.0 {
            let modified = input.modifiers.ctrl || input.modifiers.meta || input.modifiers.shift;
            let left = input.button_down(MouseButton::Left);

            if input.button_down(MouseButton::Right) || (left && modified) {
                self.pan(dx, dy, camera, height);
            } else if left {
                self.rotate_left(TAU * dx / height * self.config.rotate_speed);
                self.rotate_up(TAU * dy / height * self.config.rotate_speed);
            }
        }

        if frame.wheel_lines > 0.0 {
            self.dolly_in(self.zoom_scale(frame.wheel_lines));
        } else if frame.wheel_lines < 0.0 {
            self.dolly_out(self.zoom_scale(frame.wheel_lines));
        }
    }

    /// Applies pending motion to `camera`. Returns whether the camera moved.
    pub fn update(&mut self, camera: &mut PerspectiveCamera) -> bool {
        if self.is_idle() && camera.target == self.target {
            return false;
        }

        let before = camera.position;
        let before_target = camera.target;

        let mut s = Spherical::from_offset(camera.position - self.target);

        let step = if self.config.enable_damping {
            self.config.damping_factor
        } else {
            1.0
        };

        s.theta += self.delta_theta * step;
        s.phi += self.delta_phi * step;
        s.phi = s
            .phi
            .clamp(self.config.min_polar, self.config.max_polar)
            .clamp(POLE_EPS, PI - POLE_EPS);

        s.radius = (s.radius * self.scale).clamp(self.config.min_distance, self.config.max_distance);

        self.target += self.pan_offset * step;

        camera.target = self.target;
        camera.position = self.target + s.to_offset();

        if self.config.enable_damping {
            let keep = 1.0 - self.config.damping_factor;
            self.delta_theta = settle(self.delta_theta * keep);
            self.delta_phi = settle(self.delta_phi * keep);
            self.pan_offset *= keep;
            if self.pan_offset.length() < SETTLE_EPS {
                self.pan_offset = Vec3::ZERO;
            }
        } else {
            self.delta_theta = 0.0;
            self.delta_phi = 0.0;
            self.pan_offset = Vec3::ZERO;
        }
        self.scale = 1.0;

        camera.position.distance_squared(before) > SETTLE_EPS * SETTLE_EPS
            || camera.target.distance_squared(before_target) > SETTLE_EPS * SETTLE_EPS
    }

    /// Returns the camera to the pose the controls were created with and
    /// drops any pending motion.
    pub fn reset(&mut self, camera: &mut PerspectiveCamera) {
        self.target = self.home_target;
        self.delta_theta = 0.0;
        self.delta_phi = 0.0;
        self.scale = 1.0;
        self.pan_offset = Vec3::ZERO;

        camera.position = self.home_position;
        camera.target = self.home_target;
        log::debug!("orbit controls reset");
    }

    fn is_idle(&self) -> bool {
        self.delta_theta == 0.0
            && self.delta_phi == 0.0
            && self.scale == 1.0
            && self.pan_offset == Vec3::ZERO
    }

    fn rotate_left(&mut self, angle: f32) {
        self.delta_theta -= angle;
    }

    fn rotate_up(&mut self, angle: f32) {
        self.delta_phi -= angle;
    }

    fn dolly_in(&mut self, factor: f32) {
        self.scale *= factor;
    }

    fn dolly_out(&mut self, factor: f32) {
        self.scale /= factor;
    }

    fn zoom_scale(&self, lines: f32) -> f32 {
        0.95f32.powf(self.config.zoom_speed * lines.abs())
    }

    fn pan(&mut self, dx: f32, dy: f32, camera: &PerspectiveCamera, height: f32) {
        // Distance covered by half the viewport height at the target plane.
        let target_distance = (camera.position - self.target).length() * (camera.fov_y() * 0.5).tan();
        let (right, up) = camera.screen_axes();

        let left = 2.0 * dx * target_distance / height * self.config.pan_speed;
        let upward = 2.0 * dy * target_distance / height * self.config.pan_speed;

        self.pan_offset += right * -left;
        self.pan_offset += up * upward;
    }
}

#[inline]
fn settle(v: f32) -> f32 {
    if v.abs() < SETTLE_EPS { 0.0 } else { v }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;
    const HEIGHT: f32 = 800.0;

    fn undamped() -> OrbitConfig {
        OrbitConfig {
            enable_damping: false,
            ..Default::default()
        }
    }

    fn drag(button: MouseButton, dx: f32, dy: f32) -> (InputState, InputFrame) {
        let mut input = InputState::default();
        input.buttons_down.insert(button);
        let frame = InputFrame {
            pointer_delta: (dx, dy),
            ..Default::default()
        };
        (input, frame)
    }

    fn wheel(lines: f32) -> (InputState, InputFrame) {
        let frame = InputFrame {
            wheel_lines: lines,
            ..Default::default()
        };
        (InputState::default(), frame)
    }

    fn step(
        controls: &mut OrbitControls,
        camera: &mut PerspectiveCamera,
        (input, frame): (InputState, InputFrame),
    ) -> bool {
        controls.handle_input(&input, &frame, camera, HEIGHT);
        controls.update(camera)
    }

    // ── spherical ─────────────────────────────────────────────────────────

    #[test]
    fn spherical_round_trips_an_offset() {
        let offset = Vec3::new(1.0, 2.0, -3.0);
        let back = Spherical::from_offset(offset).to_offset();
        assert!((back - offset).length() < EPS);
    }

    // ── idle ──────────────────────────────────────────────────────────────

    #[test]
    fn no_input_leaves_camera_in_place() {
        let mut cam = PerspectiveCamera::default();
        let mut controls = OrbitControls::new(&cam, undamped());
        let moved = step(&mut controls, &mut cam, (InputState::default(), InputFrame::default()));
        assert!(!moved);
        assert!((cam.position - Vec3::new(0.0, 0.0, 5.0)).length() < EPS);
    }

    #[test]
    fn hover_without_buttons_does_nothing() {
        let mut cam = PerspectiveCamera::default();
        let mut controls = OrbitControls::new(&cam, undamped());
        let frame = InputFrame {
            pointer_delta: (120.0, -40.0),
            ..Default::default()
        };
        assert!(!step(&mut controls, &mut cam, (InputState::default(), frame)));
    }

    // ── rotate ────────────────────────────────────────────────────────────

    #[test]
    fn quarter_height_drag_turns_a_quarter() {
        let mut cam = PerspectiveCamera::default();
        let mut controls = OrbitControls::new(&cam, undamped());
        step(&mut controls, &mut cam, drag(MouseButton::Left, HEIGHT / 4.0, 0.0));
        assert!((cam.position - Vec3::new(-5.0, 0.0, 0.0)).length() < EPS, "{:?}", cam.position);
        assert_eq!(cam.target, Vec3::ZERO);
    }

    #[test]
    fn rotation_keeps_distance() {
        let mut cam = PerspectiveCamera::default();
        let mut controls = OrbitControls::new(&cam, undamped());
        step(&mut controls, &mut cam, drag(MouseButton::Left, 37.0, 91.0));
        assert!((cam.position.length() - 5.0).abs() < EPS);
    }

    #[test]
    fn polar_angle_never_crosses_the_poles() {
        let mut cam = PerspectiveCamera::default();
        let mut controls = OrbitControls::new(&cam, undamped());
        let off_axis = |p: Vec3| glam::Vec2::new(p.x, p.z).length() > 0.0;

        step(&mut controls, &mut cam, drag(MouseButton::Left, 0.0, -10.0 * HEIGHT));
        assert!(cam.position.y < 0.0);
        assert!(off_axis(cam.position));

        step(&mut controls, &mut cam, drag(MouseButton::Left, 0.0, 10.0 * HEIGHT));
        assert!(cam.position.y > 0.0);
        assert!(off_axis(cam.position));

        let (right, up) = cam.screen_axes();
        assert!(right.is_finite() && up.is_finite());
    }

    // ── dolly ─────────────────────────────────────────────────────────────

    #[test]
    fn wheel_up_moves_closer() {
        let mut cam = PerspectiveCamera::default();
        let mut controls = OrbitControls::new(&cam, undamped());
        step(&mut controls, &mut cam, wheel(1.0));
        assert!((cam.position.length() - 5.0 * 0.95).abs() < EPS);
    }

    #[test]
    fn wheel_down_moves_away() {
        let mut cam = PerspectiveCamera::default();
        let mut controls = OrbitControls::new(&cam, undamped());
        step(&mut controls, &mut cam, wheel(-1.0));
        assert!((cam.position.length() - 5.0 / 0.95).abs() < EPS);
    }

    #[test]
    fn distance_is_clamped() {
        let mut cam = PerspectiveCamera::default();
        let config = OrbitConfig {
            min_distance: 2.0,
            max_distance: 6.0,
            ..undamped()
        };
        let mut controls = OrbitControls::new(&cam, config);
        step(&mut controls, &mut cam, wheel(-100.0));
        assert!((cam.position.length() - 6.0).abs() < EPS);
        step(&mut controls, &mut cam, wheel(100.0));
        assert!((cam.position.length() - 2.0).abs() < EPS);
    }

    // ── pan ───────────────────────────────────────────────────────────────

    #[test]
    fn right_drag_pans_target_and_camera_together() {
        let mut cam = PerspectiveCamera::default();
        let mut controls = OrbitControls::new(&cam, undamped());
        step(&mut controls, &mut cam, drag(MouseButton::Right, 100.0, 0.0));
        assert!(cam.target.x < 0.0);
        assert!(cam.target.y.abs() < EPS);
        assert!(((cam.position - cam.target) - Vec3::new(0.0, 0.0, 5.0)).length() < EPS);
        assert_eq!(controls.target(), cam.target);
    }

    // ── damping ───────────────────────────────────────────────────────────

    #[test]
    fn damping_spreads_rotation_over_frames() {
        let mut cam = PerspectiveCamera::default();
        let mut controls = OrbitControls::new(&cam, OrbitConfig::default());
        step(&mut controls, &mut cam, drag(MouseButton::Left, HEIGHT / 4.0, 0.0));
        let first = cam.position;
        assert!(first.x < 0.0 && first.x > -5.0);

        // Pending motion keeps the camera moving without new input.
        assert!(step(&mut controls, &mut cam, (InputState::default(), InputFrame::default())));
    }

    #[test]
    fn damping_settles() {
        let mut cam = PerspectiveCamera::default();
        let mut controls = OrbitControls::new(&cam, OrbitConfig::default());
        step(&mut controls, &mut cam, drag(MouseButton::Left, 200.0, 50.0));
        for _ in 0..2000 {
            step(&mut controls, &mut cam, (InputState::default(), InputFrame::default()));
        }
        let rest = cam.position;
        assert!(!step(&mut controls, &mut cam, (InputState::default(), InputFrame::default())));
        assert_eq!(cam.position, rest);
    }

    // ── reset ─────────────────────────────────────────────────────────────

    #[test]
    fn reset_restores_the_initial_pose() {
        let mut cam = PerspectiveCamera::default().with_position(Vec3::new(1.0, 2.0, 3.0));
        let mut controls = OrbitControls::new(&cam, undamped());
        step(&mut controls, &mut cam, drag(MouseButton::Left, 300.0, 20.0));
        step(&mut controls, &mut cam, drag(MouseButton::Right, 40.0, 40.0));
        controls.reset(&mut cam);
        assert_eq!(cam.position, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(cam.target, Vec3::ZERO);
        assert_eq!(controls.target(), Vec3::ZERO);
    }
}
