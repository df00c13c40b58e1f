//! Scene composition.
//!
//! A `Scene` is the one fixed arrangement the showcase draws: a perspective
//! camera with orbit controls, the lighting setup, and a flat point grid
//! shaded by the color-shift material. Per frame the material time advances
//! first, then the controls move the camera, then the grid is drawn.

mod config;
mod lighting;
mod node;

pub use config::{GridConfig, MaterialConfig, SceneConfig};
pub use lighting::{DirectionalLight, EnvironmentPreset, Lighting};
pub use node::{PointCloud, Transform};

use crate::camera::{OrbitControls, PerspectiveCamera};
use crate::coords::Viewport;
use crate::effect::ColorShiftMaterial;
use crate::input::{InputFrame, InputState};
use crate::paint::Rgb;
use crate::render::{PointCloudDraw, PointCloudRenderer, RenderCtx, RenderTarget};

pub struct Scene {
    camera: PerspectiveCamera,
    controls: OrbitControls,
    lighting: Lighting,
    points: PointCloud,
    clear_color: Rgb,
    renderer: PointCloudRenderer,
}

impl Scene {
    pub fn new(config: SceneConfig) -> Self {
        let SceneConfig {
            camera,
            controls,
            lighting,
            grid,
            node,
            material,
            clear_color,
        } = config;

        let controls = OrbitControls::new(&camera, controls);
        let geometry = grid.build();
        let material = ColorShiftMaterial::new(material.color_a, material.color_b, material.point_size)
            .with_toggles(material.toggles);

        log::info!(
            "scene composed: {} points, camera at {:?}, environment {}",
            geometry.len(),
            camera.position,
            lighting.environment,
        );
        log::debug!(
            "lighting: ambient {}, directional from {:?} x{}",
            lighting.ambient_intensity,
            lighting.light_direction(),
            lighting.directional.intensity,
        );

        Self {
            camera,
            controls,
            lighting,
            points: PointCloud::new(geometry, material, node),
            clear_color,
            renderer: PointCloudRenderer::new(),
        }
    }

    #[inline]
    pub fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    #[inline]
    pub fn lighting(&self) -> &Lighting {
        &self.lighting
    }

    #[inline]
    pub fn points(&self) -> &PointCloud {
        &self.points
    }

    #[inline]
    pub fn material(&self) -> &ColorShiftMaterial {
        &self.points.material
    }

    #[inline]
    pub fn clear_color(&self) -> Rgb {
        self.clear_color
    }

    /// Keeps the camera aspect in step with the drawable.
    pub fn resize(&mut self, viewport: Viewport) {
        if viewport.is_valid() {
            self.camera.aspect = viewport.aspect();
        }
    }

    /// Per-frame update: advances the shader time by `dt` seconds, then
    /// applies orbit input. `logical_height` is the window height in the
    /// pixels pointer deltas are measured in.
    pub fn frame(&mut self, dt: f32, input: &InputState, frame: &InputFrame, logical_height: f32) {
        self.points.material.advance(dt);
        self.controls.handle_input(input, frame, &self.camera, logical_height);
        self.controls.update(&mut self.camera);
    }

    /// Returns the camera to where it started.
    pub fn reset_camera(&mut self) {
        self.controls.reset(&mut self.camera);
    }

    pub fn draw(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>) {
        let draw = PointCloudDraw {
            geometry: &self.points.geometry,
            material: &self.points.material,
            model: self.points.transform.matrix(),
            view: self.camera.view_matrix(),
            projection: self.camera.projection_matrix(),
        };
        self.renderer.render(ctx, target, &draw);
    }
}
