//! Orbit controls with inertial damping.
//!
//! Drag and scroll input accumulate into a pending delta; each tick applies
//! a `damping` fraction of it and keeps the rest, so the camera glides to a
//! stop after the input ends.

use std::f32::consts::PI;
use std::time::Duration;

use glam::{Mat4, Vec2, Vec3};

use super::core::{Camera, CameraUniform};
use crate::options::CameraOptions;

/// Radians of orbit per pixel of drag at `rotate_speed == 1`.
const RADIANS_PER_PIXEL: f32 = 0.01;
/// Keeps the polar angle off the poles, where `look_at` degenerates.
const POLE_EPSILON: f32 = 1e-3;
const MIN_DISTANCE: f32 = 1.0;
/// Pending motion below this is dropped so `update` can report rest.
const REST_THRESHOLD: f32 = 1e-5;
/// Damping is specified per frame at this rate.
const REFERENCE_FPS: f32 = 60.0;

/// Spherical orbit camera around a fixed target.
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    target: Vec3,
    distance: f32,
    /// Azimuth around +Y, 0 looks down -Z.
    theta: f32,
    /// Polar angle from +Y.
    phi: f32,
    pending_theta: f32,
    pending_phi: f32,
    pending_zoom: f32,
    damping: f32,
    rotate_speed: f32,
    zoom_speed: f32,
    aspect: f32,
    fovy: f32,
    znear: f32,
    zfar: f32,
}

impl OrbitCamera {
    /// Camera on the +Z axis looking at the origin.
    pub fn new(options: &CameraOptions, aspect: f32) -> Self {
        Self {
            target: Vec3::ZERO,
            distance: options.distance.max(MIN_DISTANCE),
            theta: 0.0,
            phi: PI / 2.0,
            pending_theta: 0.0,
            pending_phi: 0.0,
            pending_zoom: 0.0,
            damping: options.damping.clamp(0.0, 1.0),
            rotate_speed: options.rotate_speed,
            zoom_speed: options.zoom_speed,
            aspect,
            fovy: options.fovy,
            znear: options.znear,
            zfar: options.zfar,
        }
    }

    /// Queue an orbit by `delta` pixels of drag.
    pub fn rotate(&mut self, delta: Vec2) {
        let scale = RADIANS_PER_PIXEL * self.rotate_speed;
        self.pending_theta -= delta.x * scale;
        self.pending_phi -= delta.y * scale;
    }

    /// Queue a zoom (positive = in).
    pub fn zoom(&mut self, delta: f32) {
        self.pending_zoom += delta * self.zoom_speed;
    }

    /// Update the viewport aspect ratio. Zero-height viewports are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    /// Apply the damped share of pending input. Returns whether the camera
    /// is still moving.
    pub fn update(&mut self, dt: Duration) -> bool {
        // Without damping, input applies in full on the next tick.
        let share = if self.damping <= 0.0 {
            1.0
        } else {
            1.0 - (1.0 - self.damping).powf(dt.as_secs_f32() * REFERENCE_FPS)
        };

        let d_theta = self.pending_theta * share;
        let d_phi = self.pending_phi * share;
        let d_zoom = self.pending_zoom * share;
        self.pending_theta -= d_theta;
        self.pending_phi -= d_phi;
        self.pending_zoom -= d_zoom;

        self.theta += d_theta;
        self.phi = (self.phi + d_phi).clamp(POLE_EPSILON, PI - POLE_EPSILON);
        let max_distance = (self.zfar * 0.9).max(MIN_DISTANCE);
        self.distance = (self.distance * (1.0 - d_zoom))
            .clamp(MIN_DISTANCE, max_distance);

        for pending in [
            &mut self.pending_theta,
            &mut self.pending_phi,
            &mut self.pending_zoom,
        ] {
            if pending.abs() < REST_THRESHOLD {
                *pending = 0.0;
            }
        }
        self.is_moving()
    }

    /// Whether input is still being applied.
    pub fn is_moving(&self) -> bool {
        self.pending_theta != 0.0
            || self.pending_phi != 0.0
            || self.pending_zoom != 0.0
    }

    /// Current distance from the target.
    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// World-space eye position.
    pub fn eye(&self) -> Vec3 {
        let (sin_phi, cos_phi) = self.phi.sin_cos();
        let (sin_theta, cos_theta) = self.theta.sin_cos();
        self.target
            + self.distance
                * Vec3::new(sin_phi * sin_theta, cos_phi, sin_phi * cos_theta)
    }

    /// Snapshot as a plain perspective camera.
    pub fn camera(&self) -> Camera {
        Camera {
            eye: self.eye(),
            target: self.target,
            up: Vec3::Y,
            aspect: self.aspect,
            fovy: self.fovy,
            znear: self.znear,
            zfar: self.zfar,
        }
    }

    /// Combined view-projection matrix.
    pub fn view_proj(&self) -> Mat4 {
        self.camera().build_matrix()
    }

    /// GPU uniform for the current state.
    pub fn uniform(&self) -> CameraUniform {
        CameraUniform::from_camera(&self.camera())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: Duration = Duration::from_micros(16_667);

    fn orbit() -> OrbitCamera {
        OrbitCamera::new(&CameraOptions::default(), 1.5)
    }

    #[test]
    fn starts_on_positive_z_at_default_distance() {
        let cam = orbit();
        let eye = cam.eye();
        assert!(eye.x.abs() < 1e-5);
        assert!(eye.y.abs() < 1e-5);
        assert!((eye.z - 16.0).abs() < 1e-4);
        assert!(!cam.is_moving());
    }

    #[test]
    fn damping_spreads_rotation_over_frames() {
        let mut cam = orbit();
        cam.rotate(Vec2::new(100.0, 0.0));
        assert!(cam.update(FRAME));
        let after_one = cam.eye();
        // Only a share of the drag lands on the first frame
        let full = -100.0 * RADIANS_PER_PIXEL * 0.5;
        assert!(cam.theta > full && cam.theta < 0.0);
        for _ in 0..2000 {
            let _ = cam.update(FRAME);
        }
        assert!(!cam.is_moving());
        assert!((cam.theta - full).abs() < 1e-3);
        assert!(after_one.x < 0.0);
        assert!((cam.eye().length() - 16.0).abs() < 1e-3);
    }

    #[test]
    fn zero_damping_applies_immediately() {
        let options = CameraOptions {
            damping: 0.0,
            ..CameraOptions::default()
        };
        let mut cam = OrbitCamera::new(&options, 1.0);
        cam.zoom(1.0);
        assert!(!cam.update(FRAME));
        assert!((cam.distance() - 16.0 * 0.9).abs() < 1e-4);
    }

    #[test]
    fn polar_angle_stays_off_the_poles() {
        let mut cam = orbit();
        cam.rotate(Vec2::new(0.0, -1.0e5));
        for _ in 0..500 {
            let _ = cam.update(FRAME);
        }
        assert!(cam.phi <= PI - POLE_EPSILON);
        assert!(cam.view_proj().is_finite());
    }

    #[test]
    fn zoom_is_clamped() {
        let mut cam = orbit();
        cam.zoom(1.0e4);
        for _ in 0..500 {
            let _ = cam.update(FRAME);
        }
        assert!(cam.distance() >= MIN_DISTANCE);
    }

    #[test]
    fn resize_ignores_zero_height() {
        let mut cam = orbit();
        cam.resize(800, 0);
        assert_eq!(cam.aspect, 1.5);
        cam.resize(800, 400);
        assert_eq!(cam.aspect, 2.0);
    }
}
