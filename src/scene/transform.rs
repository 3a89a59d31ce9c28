use glam::{Affine3A, EulerRot, Mat3, Quat, Vec3};

/// Local TRS of a node plus its cached matrices.
///
/// `position`, `rotation` and `scale` are edited freely; the local matrix is
/// rebuilt lazily by [`Transform::update_local_matrix`] when they differ from
/// the values it was last built from.
#[derive(Debug, Clone)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,

    pub(crate) local_matrix: Affine3A,
    pub(crate) world_matrix: Affine3A,

    /// TRS baked into `local_matrix`; `None` forces a rebuild.
    baked: Option<(Vec3, Quat, Vec3)>,
}

impl Transform {
    #[must_use]
    pub fn new() -> Self {
        Self::from_position(Vec3::ZERO)
    }

    #[must_use]
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
            local_matrix: Affine3A::IDENTITY,
            world_matrix: Affine3A::IDENTITY,
            baked: None,
        }
    }

    /// Rebuilds the local matrix if the TRS changed; returns whether it did.
    pub fn update_local_matrix(&mut self) -> bool {
        let trs = (self.position, self.rotation, self.scale);
        if self.baked == Some(trs) {
            return false;
        }
        self.local_matrix = Affine3A::from_scale_rotation_translation(self.scale, self.rotation, self.position);
        self.baked = Some(trs);
        true
    }

    /// XYZ-ordered Euler angles in radians, as used by the spin animation.
    pub fn set_rotation_euler(&mut self, x: f32, y: f32, z: f32) {
        self.rotation = Quat::from_euler(EulerRot::XYZ, x, y, z);
    }

    #[must_use]
    pub fn rotation_euler(&self) -> Vec3 {
        let (x, y, z) = self.rotation.to_euler(EulerRot::XYZ);
        Vec3::new(x, y, z)
    }

    #[inline]
    #[must_use]
    pub fn local_matrix(&self) -> &Affine3A {
        &self.local_matrix
    }

    #[inline]
    #[must_use]
    pub fn world_matrix(&self) -> &Affine3A {
        &self.world_matrix
    }

    pub(crate) fn set_world_matrix(&mut self, mat: Affine3A) {
        self.world_matrix = mat;
    }

    /// Points -Z at `target` (both in parent space). Degenerate inputs are ignored.
    pub fn look_at(&mut self, target: Vec3, up: Vec3) {
        let Some(forward) = (target - self.position).try_normalize() else {
            return;
        };
        // forward 与 up 平行时无法确定朝向
        let Some(right) = forward.cross(up).try_normalize() else {
            return;
        };
        let up = right.cross(forward);
        self.rotation = Quat::from_mat3(&Mat3::from_cols(right, up, -forward));
    }

    /// Forces the next [`Transform::update_local_matrix`] to report a change,
    /// e.g. after the node moved to another parent.
    pub fn mark_dirty(&mut self) {
        self.baked = None;
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new()
    }
}
