use std::f32::consts::{FRAC_PI_2, PI, TAU};

use glam::{Vec2, Vec3};

use crate::resources::input::{Input, Key, MouseButton};
use crate::scene::transform::Transform;

/// Screen pixels panned per arrow-key press.
const KEY_PAN_PIXELS: f32 = 7.0;

/// Spherical-coordinate camera controller.
///
/// Left drag rotates, right drag and arrow keys pan, the wheel zooms.
/// `phi` is the polar angle from +Y, `theta` the azimuth around Y.
#[derive(Debug, Clone)]
pub struct OrbitControls {
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    pub damping_factor: f32,
    pub enable_damping: bool,
    pub min_distance: f32,
    pub max_distance: f32,
    pub min_polar_angle: f32,
    pub max_polar_angle: f32,

    pub center: Vec3,
    pub radius: f32,
    pub theta: f32,
    pub phi: f32,

    rotate_delta: Vec2,
}

impl OrbitControls {
    #[must_use]
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self {
            rotate_speed: 1.0,
            zoom_speed: 0.05,
            pan_speed: 1.0,
            damping_factor: 0.05,
            enable_damping: true,
            min_distance: 0.1,
            max_distance: 1000.0,
            min_polar_angle: 0.0,
            max_polar_angle: PI,

            center,
            radius,
            theta: 0.0,
            phi: FRAC_PI_2,

            rotate_delta: Vec2::ZERO,
        }
    }

    /// Controller that keeps a camera at `position` looking at `target`.
    #[must_use]
    pub fn from_position(position: Vec3, target: Vec3) -> Self {
        let offset = position - target;
        let radius = offset.length().max(f32::EPSILON);
        let mut controls = Self::new(target, radius);
        controls.theta = offset.x.atan2(offset.z);
        controls.phi = (offset.y / radius).clamp(-1.0, 1.0).acos();
        controls
    }

    #[must_use]
    pub fn with_max_polar_angle(mut self, angle: f32) -> Self {
        self.max_polar_angle = angle;
        self
    }

    #[must_use]
    pub fn with_distance_range(mut self, min: f32, max: f32) -> Self {
        self.min_distance = min;
        self.max_distance = max;
        self
    }

    pub fn update(&mut self, transform: &mut Transform, input: &Input, fov_degrees: f32, dt: f32) {
        let screen_height = input.screen_size().y.max(1.0);
        let cursor_delta = input.cursor_delta();

        if input.button_down(MouseButton::Left) {
            let rotate_per_pixel = TAU / screen_height;
            self.rotate_delta -= cursor_delta * rotate_per_pixel * self.rotate_speed;
        }

        if self.enable_damping {
            let target_fps = 60.0;
            let retention = (1.0 - self.damping_factor).powf(dt * target_fps);
            let delta_apply = self.rotate_delta * (1.0 - retention);

            self.theta += delta_apply.x;
            self.phi += delta_apply.y;
            self.rotate_delta *= retention;
        } else {
            self.theta += self.rotate_delta.x;
            self.phi += self.rotate_delta.y;
            self.rotate_delta = Vec2::ZERO;
        }

        const EPS: f32 = 0.0001;
        let min_phi = self.min_polar_angle.max(EPS);
        let max_phi = self.max_polar_angle.min(PI - EPS).max(min_phi);
        self.phi = self.phi.clamp(min_phi, max_phi);

        let scroll = input.scroll_delta().y;
        if scroll != 0.0 {
            let scale = (1.0 - self.zoom_speed).powf(scroll.abs());
            if scroll > 0.0 {
                self.radius *= scale;
            } else {
                self.radius /= scale;
            }
        }
        self.radius = self.radius.clamp(self.min_distance, self.max_distance);

        let mut pan_pixels = Vec2::ZERO;
        if input.button_down(MouseButton::Right) {
            pan_pixels += cursor_delta;
        }
        // 方向键平移 (按下的那一帧)
        if input.key_pressed(Key::ArrowLeft) {
            pan_pixels.x += KEY_PAN_PIXELS;
        }
        if input.key_pressed(Key::ArrowRight) {
            pan_pixels.x -= KEY_PAN_PIXELS;
        }
        if input.key_pressed(Key::ArrowUp) {
            pan_pixels.y += KEY_PAN_PIXELS;
        }
        if input.key_pressed(Key::ArrowDown) {
            pan_pixels.y -= KEY_PAN_PIXELS;
        }
        if pan_pixels != Vec2::ZERO {
            self.pan(pan_pixels, fov_degrees, screen_height);
        }

        transform.position = self.center + self.offset();
        transform.look_at(self.center, Vec3::Y);
    }

    fn offset(&self) -> Vec3 {
        let (sin_phi, cos_phi) = self.phi.sin_cos();
        let (sin_theta, cos_theta) = self.theta.sin_cos();
        Vec3::new(
            self.radius * sin_phi * sin_theta,
            self.radius * cos_phi,
            self.radius * sin_phi * cos_theta,
        )
    }

    fn pan(&mut self, pixels: Vec2, fov_degrees: f32, screen_height: f32) {
        let half_fov = fov_degrees.to_radians() / 2.0;
        let target_world_height = 2.0 * self.radius * half_fov.tan();
        let pixels_to_world = target_world_height / screen_height;

        let forward = -self.offset().normalize_or_zero();
        let right = forward.cross(Vec3::Y).normalize_or_zero();
        let up = right.cross(forward).normalize_or_zero();

        self.center += (right * -pixels.x + up * pixels.y) * pixels_to_world * self.pan_speed;
    }
}
