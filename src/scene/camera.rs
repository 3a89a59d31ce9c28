use glam::{Mat4, Vec3};

use crate::scene::transform::Transform;

/// Perspective camera.
///
/// The camera owns its transform: it is not part of the scene graph, so
/// orbit controls and resizes never touch scene nodes.
#[derive(Debug, Clone)]
pub struct Camera {
    pub transform: Transform,

    // === 投影属性 ===
    /// Vertical field of view in radians.
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,

    projection_matrix: Mat4,
}

impl Camera {
    /// `fov_deg` is the vertical field of view in degrees.
    #[must_use]
    pub fn new_perspective(fov_deg: f32, aspect: f32, near: f32, far: f32) -> Self {
        let mut cam = Self {
            transform: Transform::new(),
            fov: fov_deg.to_radians(),
            aspect,
            near,
            far,
            projection_matrix: Mat4::IDENTITY,
        };
        cam.update_projection_matrix();
        cam
    }

    pub fn update_projection_matrix(&mut self) {
        // glam 的 perspective_rh 是为 WGPU 设计的 (depth 0 to 1)
        self.projection_matrix = Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far);
    }

    /// Sets the aspect ratio and refreshes the projection.
    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
        self.update_projection_matrix();
    }

    #[must_use]
    pub fn fov_degrees(&self) -> f32 {
        self.fov.to_degrees()
    }

    #[must_use]
    pub fn projection_matrix(&self) -> Mat4 {
        self.projection_matrix
    }

    /// Inverse of the camera's own TRS.
    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        let t = &self.transform;
        Mat4::from_scale_rotation_translation(t.scale, t.rotation, t.position).inverse()
    }

    #[must_use]
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix * self.view_matrix()
    }

    #[must_use]
    pub fn position(&self) -> Vec3 {
        self.transform.position
    }
}
