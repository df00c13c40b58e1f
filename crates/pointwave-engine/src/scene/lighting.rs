use std::fmt;

use glam::Vec3;

/// Image-based lighting presets.
///
/// Named after the HDR environments commonly bundled with web 3D toolkits.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum EnvironmentPreset {
    Apartment,
    #[default]
    City,
    Dawn,
    Forest,
    Lobby,
    Night,
    Park,
    Studio,
    Sunset,
    Warehouse,
}

impl fmt::Display for EnvironmentPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EnvironmentPreset::Apartment => "apartment",
            EnvironmentPreset::City => "city",
            EnvironmentPreset::Dawn => "dawn",
            EnvironmentPreset::Forest => "forest",
            EnvironmentPreset::Lobby => "lobby",
            EnvironmentPreset::Night => "night",
            EnvironmentPreset::Park => "park",
            EnvironmentPreset::Studio => "studio",
            EnvironmentPreset::Sunset => "sunset",
            EnvironmentPreset::Warehouse => "warehouse",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DirectionalLight {
    pub position: Vec3,
    pub intensity: f32,
}

/// Scene lighting.
///
/// The color-shift material is unlit, so these values do not change what is
/// drawn. They are part of the composed scene so lit materials added later
/// see the same setup.
#[derive(Debug, Clone, PartialEq)]
pub struct Lighting {
    pub ambient_intensity: f32,
    pub directional: DirectionalLight,
    pub environment: EnvironmentPreset,
}

impl Default for Lighting {
    fn default() -> Self {
        Self {
            ambient_intensity: 0.5,
            directional: DirectionalLight {
                position: Vec3::new(10.0, 10.0, 5.0),
                intensity: 1.0,
            },
            environment: EnvironmentPreset::City,
        }
    }
}

impl Lighting {
    /// Unit vector pointing from the scene origin towards the directional light.
    pub fn light_direction(&self) -> Vec3 {
        self.directional.position.normalize_or_zero()
    }
}
