use crate::camera::{OrbitConfig, PerspectiveCamera};
use crate::effect::StageToggles;
use crate::geometry::PlaneGeometry;
use crate::paint::Rgb;

use super::lighting::Lighting;
use super::node::Transform;

/// Extents and subdivisions of the point grid.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GridConfig {
    pub width: f32,
    pub height: f32,
    pub width_segments: u32,
    pub height_segments: u32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            width: 20.0,
            height: 20.0,
            width_segments: 128,
            height_segments: 128,
        }
    }
}

impl GridConfig {
    pub fn build(&self) -> PlaneGeometry {
        PlaneGeometry::new(self.width, self.height, self.width_segments, self.height_segments)
    }

    /// Number of points the grid produces.
    pub fn point_count(&self) -> usize {
        (self.width_segments.max(1) as usize + 1) * (self.height_segments.max(1) as usize + 1)
    }
}

/// Initial uniform values of the color-shift material.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MaterialConfig {
    pub color_a: Rgb,
    pub color_b: Rgb,
    pub point_size: f32,
    pub toggles: StageToggles,
}

impl Default for MaterialConfig {
    fn default() -> Self {
        Self {
            color_a: Rgb::WHITE,
            color_b: Rgb::new(1.0, 0.4, 0.4),
            point_size: 2.0,
            toggles: StageToggles::default(),
        }
    }
}

/// Everything needed to compose the showcase scene.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneConfig {
    pub camera: PerspectiveCamera,
    pub controls: OrbitConfig,
    pub lighting: Lighting,
    pub grid: GridConfig,
    pub node: Transform,
    pub material: MaterialConfig,
    pub clear_color: Rgb,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            camera: PerspectiveCamera::default(),
            controls: OrbitConfig::default(),
            lighting: Lighting::default(),
            grid: GridConfig::default(),
            node: Transform::floor(),
            material: MaterialConfig::default(),
            clear_color: Rgb::BLACK,
        }
    }
}

impl SceneConfig {
    pub fn grid(mut self, grid: GridConfig) -> Self {
        self.grid = grid;
        self
    }

    pub fn material(mut self, material: MaterialConfig) -> Self {
        self.material = material;
        self
    }

    pub fn toggles(mut self, toggles: StageToggles) -> Self {
        self.material.toggles = toggles;
        self
    }

    pub fn camera(mut self, camera: PerspectiveCamera) -> Self {
        self.camera = camera;
        self
    }

    pub fn clear_color(mut self, color: Rgb) -> Self {
        self.clear_color = color;
        self
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::scene::EnvironmentPreset;

    #[test]
    fn defaults_describe_the_showcase() {
        let cfg = SceneConfig::default();

        assert_eq!(cfg.camera.position, Vec3::new(0.0, 0.0, 5.0));
        assert_eq!(cfg.camera.fov_y_deg, 75.0);
        assert_eq!(cfg.camera.near, 0.1);
        assert_eq!(cfg.camera.far, 1000.0);

        assert_eq!(cfg.material.color_a, Rgb::new(1.0, 1.0, 1.0));
        assert_eq!(cfg.material.color_b, Rgb::new(1.0, 0.4, 0.4));
        assert_eq!(cfg.material.point_size, 2.0);
        assert!(!cfg.material.toggles.x_wave);
        assert!(!cfg.material.toggles.round_points);

        assert_eq!(cfg.lighting.ambient_intensity, 0.5);
        assert_eq!(cfg.lighting.directional.position, Vec3::new(10.0, 10.0, 5.0));
        assert_eq!(cfg.lighting.directional.intensity, 1.0);
        assert_eq!(cfg.lighting.environment, EnvironmentPreset::City);

        assert_eq!(cfg.node, Transform::floor());
    }

    #[test]
    fn default_grid_has_16641_points() {
        let grid = GridConfig::default();
        assert_eq!(grid.point_count(), 16641);
        assert_eq!(grid.build().len(), grid.point_count());
    }

    #[test]
    fn builders_override_fields() {
        let cfg = SceneConfig::default()
            .grid(GridConfig { width_segments: 4, height_segments: 2, ..Default::default() })
            .toggles(StageToggles { x_wave: true, round_points: false })
            .clear_color(Rgb::new(0.1, 0.1, 0.1));

        assert_eq!(cfg.grid.point_count(), 15);
        assert!(cfg.material.toggles.x_wave);
        assert_eq!(cfg.clear_color, Rgb::new(0.1, 0.1, 0.1));
    }
}
