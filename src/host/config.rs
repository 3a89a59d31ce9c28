use glam::Vec3;

/// Perspective camera placement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraConfig {
    pub fov_deg: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
    pub target: Vec3,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_deg: 75.0,
            near: 0.1,
            far: 100.0,
            position: Vec3::new(0.0, 0.0, 2.0),
            target: Vec3::ZERO,
        }
    }
}

/// Directional light aimed at the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightConfig {
    pub color: u32,
    pub intensity: f32,
    pub position: Vec3,
}

impl LightConfig {
    #[must_use]
    pub fn white_at(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            color: 0xff_ff_ff,
            intensity: 1.0,
            position: Vec3::new(-1.0, 2.0, 4.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitConfig {
    pub enable_damping: bool,
    pub max_polar_angle: f32,
    pub min_distance: f32,
    pub max_distance: f32,
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            enable_damping: true,
            max_polar_angle: std::f32::consts::PI,
            min_distance: 0.1,
            max_distance: 1000.0,
        }
    }
}

/// Per-demo scene host settings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HostConfig {
    pub camera: CameraConfig,
    pub light: Option<LightConfig>,
    /// Clear color as `0xRRGGBB`.
    pub background: Option<u32>,
    pub orbit: Option<OrbitConfig>,
}

impl HostConfig {
    #[must_use]
    pub fn new() -> Self {
        Self {
            light: Some(LightConfig::default()),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_camera_position(mut self, position: Vec3) -> Self {
        self.camera.position = position;
        self
    }

    #[must_use]
    pub fn with_light(mut self, light: LightConfig) -> Self {
        self.light = Some(light);
        self
    }

    #[must_use]
    pub fn without_light(mut self) -> Self {
        self.light = None;
        self
    }

    #[must_use]
    pub fn with_background(mut self, color: u32) -> Self {
        self.background = Some(color);
        self
    }

    #[must_use]
    pub fn with_orbit(mut self, orbit: OrbitConfig) -> Self {
        self.orbit = Some(orbit);
        self
    }
}
