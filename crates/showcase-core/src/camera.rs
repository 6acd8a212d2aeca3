//! Active camera state owned by the viewer.
//!
//! The view matrix is cached and only recomputed by
//! [`CameraState::position_target_updated`], which the frame gate calls at most
//! once per frame. Writes to `position`/`target` are therefore invisible to the
//! renderer until the gate fires.

use crate::constants::{CAMERA_ZFAR, CAMERA_ZNEAR, DEFAULT_FOV_DEGREES};
use glam::{Mat4, Vec3};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CameraOptions {
    pub controls_enabled: Option<bool>,
    pub fov: Option<f32>,
}

#[derive(Clone, Debug)]
pub struct CameraState {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    /// Vertical field of view in degrees. Zero selects an orthographic framing.
    pub fov: f32,
    pub aspect: f32,
    pub znear: f32,
    pub zfar: f32,
    pub controls_enabled: bool,
    view: Mat4,
    projection: Mat4,
    updates: u64,
}

impl CameraState {
    pub fn new(position: Vec3, target: Vec3, fov: f32) -> Self {
        let mut cam = Self {
            position,
            target,
            up: Vec3::Y,
            fov,
            aspect: 1.0,
            znear: CAMERA_ZNEAR,
            zfar: CAMERA_ZFAR,
            controls_enabled: true,
            view: Mat4::IDENTITY,
            projection: Mat4::IDENTITY,
            updates: 0,
        };
        cam.view = cam.compute_view();
        cam.projection = cam.compute_projection();
        cam
    }

    pub fn set_options(&mut self, options: CameraOptions) {
        if let Some(enabled) = options.controls_enabled {
            self.controls_enabled = enabled;
        }
        if let Some(fov) = options.fov {
            self.fov = fov.max(0.0);
            self.update_projection_matrix();
        }
    }

    /// Camera-vectors-changed side effect: refresh the cached view matrix.
    pub fn position_target_updated(&mut self) {
        self.view = self.compute_view();
        // the orthographic extent depends on target distance
        if self.fov <= 0.0 {
            self.projection = self.compute_projection();
        }
        self.updates += 1;
    }

    pub fn update_projection_matrix(&mut self) {
        self.projection = self.compute_projection();
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        if aspect.is_finite() && aspect > 0.0 {
            self.aspect = aspect;
            self.update_projection_matrix();
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        self.view
    }

    pub fn projection_matrix(&self) -> Mat4 {
        self.projection
    }

    /// Number of times the view has been refreshed.
    pub fn update_count(&self) -> u64 {
        self.updates
    }

    pub fn is_orthographic(&self) -> bool {
        self.fov <= 0.0
    }

    fn compute_view(&self) -> Mat4 {
        let eye = self.position;
        // look_at is undefined when eye == target
        let target = if (self.target - eye).length_squared() < 1e-12 {
            eye - Vec3::Z
        } else {
            self.target
        };
        Mat4::look_at_rh(eye, target, self.up)
    }

    fn compute_projection(&self) -> Mat4 {
        if self.fov > 0.0 {
            Mat4::perspective_rh(self.fov.to_radians(), self.aspect, self.znear, self.zfar)
        } else {
            let distance = (self.target - self.position).length().max(self.znear);
            let half_h = distance * (DEFAULT_FOV_DEGREES.to_radians() * 0.5).tan();
            let half_w = half_h * self.aspect;
            Mat4::orthographic_rh(-half_w, half_w, -half_h, half_h, self.znear, self.zfar)
        }
    }
}
